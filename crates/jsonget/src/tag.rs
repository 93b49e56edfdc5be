//! The closed set of value kinds a [`crate::Cursor`] can classify as.

/// Discriminant identifying what kind of JSON value a cursor points at.
///
/// The numeric values are part of the public contract (a host binding may
/// need to pass them across an FFI boundary) and must not be renumbered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    /// Sentinel for parse failure, absence, or a failed navigation step.
    Invalid = 0,
    /// JSON `null`.
    Null = 1,
    /// JSON `true` or `false`.
    Boolean = 2,
    /// A number token with no `.` after its integer part.
    Integer = 3,
    /// A number token with a `.` after its integer part.
    Double = 4,
    /// A quoted JSON string.
    String = 5,
    /// A `{...}` object.
    Object = 6,
    /// A `[...]` array.
    Array = 7,
    /// A cursor pointing at an object member's key, produced only by
    /// object iteration; its value is reached via
    /// [`crate::Cursor::move_pair_value`].
    Pair = 8,
}

impl Tag {
    /// Whether this tag represents a container a navigator can descend into.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}
