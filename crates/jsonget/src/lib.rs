//! A zero-allocation, on-demand JSON navigator.
//!
//! [`Cursor`] borrows a position inside a JSON document and a classified
//! [`Tag`]; every navigation call (`move_key`, `move_index`, `move_next`,
//! `move_pair_value`) re-walks the byte structure from that position
//! instead of following stored parent/child links, and every extractor
//! (`as_int`, `as_double`, `raw`, `string`, ...) re-enters the decoder on
//! demand. Only the subtree a caller actually touches gets parsed;
//! malformed regions elsewhere in the document are never visited.
//!
//! ```
//! use jsonget::Cursor;
//!
//! let doc = Cursor::parse_str(r#"{"k":"v","a":[10,20]}"#);
//! let v = doc.move_key("a").move_index(0);
//! assert_eq!(v.as_int(), Some(10));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod classify;
mod cursor;
mod number;
mod path_component;
mod scanner;
mod skip;
mod string_decode;
mod string_skip;
mod tag;

pub use cursor::Cursor;
pub use path_component::{PathComponent, PathComponentFrom};
pub use tag::Tag;

#[cfg(feature = "fuzzing")]
pub use skip::max_nesting_depth;

#[doc(hidden)]
pub use alloc::vec;

/// Builds a `Vec<PathComponent>` from a heterogeneous list of keys and
/// indices, for use with [`Cursor::get_path`].
///
/// ```
/// extern crate alloc;
/// # use jsonget::{path, PathComponent};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     alloc::vec![
///         PathComponent::Index(0),
///         PathComponent::Key("foo"),
///         PathComponent::Index(2),
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::PathComponentFrom;
        $crate::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Cursor, Tag};

    #[test]
    fn path_macro_walks_mixed_keys_and_indices() {
        let doc = Cursor::parse_str(r#"{"o":{"x":[true,null,false]}}"#);
        let p = path!["o", "x", 1];
        assert!(doc.get_path(&p).is_null());
    }

    #[test]
    fn path_macro_short_circuits_on_missing_step() {
        let doc = Cursor::parse_str(r#"{"a":1}"#);
        let p = path!["missing", 0];
        assert_eq!(doc.get_path(&p).tag(), Tag::Invalid);
    }
}
