//! The cursor: a borrowed pointer into the input buffer plus a classified
//! tag, and every navigation/extraction operation that re-enters the
//! lower-level components to act on it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::classify::classify;
use crate::number::read_number;
use crate::path_component::PathComponent;
use crate::scanner::skip_whitespace;
use crate::skip::skip_value;
use crate::string_decode::decode_char;
use crate::string_skip::skip_string_content;
use crate::tag::Tag;

/// A value inside a JSON document, referenced by a borrow into the
/// original input plus a byte offset and a classified [`Tag`].
///
/// A `Cursor` owns nothing: it is valid exactly as long as the buffer it
/// borrows from is. Every navigation method re-walks structure from the
/// cursor's position rather than following stored links, so a `Cursor` is
/// as cheap to copy as a `(&[u8], usize, Tag)` triple -- because that's
/// all it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    tag: Tag,
}

impl<'a> Cursor<'a> {
    /// Creates a root cursor over `input`, classifying the first value
    /// found after skipping leading whitespace.
    #[must_use]
    pub fn parse(input: &'a [u8]) -> Self {
        Self::classify_cursor(input, 0)
    }

    /// Convenience over [`Cursor::parse`] for UTF-8 input.
    #[must_use]
    pub fn parse_str(s: &'a str) -> Self {
        Self::parse(s.as_bytes())
    }

    fn invalid(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            tag: Tag::Invalid,
        }
    }

    fn classify_cursor(input: &'a [u8], pos: usize) -> Self {
        let (pos, tag) = classify(input, pos);
        Self { input, pos, tag }
    }

    /// A [`Tag::Pair`] cursor at `pos`, or invalid if nothing is there.
    fn make_pair_cursor(input: &'a [u8], pos: usize) -> Self {
        let pos = skip_whitespace(input, pos);
        if pos < input.len() {
            Self {
                input,
                pos,
                tag: Tag::Pair,
            }
        } else {
            Self::invalid(input)
        }
    }

    /// This cursor's classified tag.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// True for `Tag::Null` and also for `Tag::Invalid`, mirroring SQL's
    /// "absent is null" convention that a host binding would otherwise
    /// have to special-case itself.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.tag, Tag::Invalid | Tag::Null)
    }

    /// True only for a `Tag::Boolean` cursor whose token is `true`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.tag == Tag::Boolean && self.input.get(self.pos) == Some(&b't')
    }

    /// The integer view of this value: `0`/`1` for booleans, `0` for
    /// null, the truncated view from [`crate::number`] for numbers, and
    /// `None` for every other tag.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self.tag {
            Tag::Null => Some(0),
            Tag::Boolean => Some(i64::from(self.input.get(self.pos) == Some(&b't'))),
            Tag::Integer | Tag::Double => Some(read_number(self.input, self.pos).int_view),
            _ => None,
        }
    }

    /// The double view of this value, for numbers only.
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self.tag {
            Tag::Integer | Tag::Double => Some(read_number(self.input, self.pos).double_view),
            _ => None,
        }
    }

    /// The position just past this cursor's value (and, for `Tag::Pair`,
    /// just past its key), or `None` if it cannot be skipped.
    fn end(&self) -> Option<usize> {
        if self.tag == Tag::Invalid {
            return None;
        }
        skip_value(self.input, self.pos, false).ok()
    }

    /// The exact slice of input bytes making up this value, quotes or
    /// brackets included, as a zero-copy borrow into the original buffer.
    #[must_use]
    pub fn raw(&self) -> Option<&'a [u8]> {
        let end = self.end()?;
        Some(&self.input[self.pos..end])
    }

    /// Copies [`Cursor::raw`] into `dest`, truncating to `dest.len() - 1`
    /// bytes and always writing a trailing NUL, for callers needing a
    /// fixed, caller-owned buffer (e.g. an FFI host binding). Returns the
    /// true (untruncated) length.
    pub fn raw_copy(&self, dest: &mut [u8]) -> Option<usize> {
        let raw = self.raw()?;
        copy_truncated(raw, dest);
        Some(raw.len())
    }

    /// For `Tag::String`/`Tag::Pair`, decodes the string body (escapes and
    /// all) into `dest`, truncating and NUL-terminating the same way as
    /// [`Cursor::raw_copy`] but returning the true *decoded* length even
    /// when truncated. Any other tag degrades to `raw_copy`.
    pub fn string(&self, dest: &mut [u8]) -> Option<usize> {
        if !matches!(self.tag, Tag::String | Tag::Pair) {
            return self.raw_copy(dest);
        }
        if self.input.get(self.pos) != Some(&b'"') {
            return None;
        }
        let mut p = self.pos + 1;
        let mut real_len = 0usize;
        let mut written = 0usize;
        loop {
            let dc = decode_char(self.input, p);
            if dc.consumed == 0 {
                break;
            }
            p += dc.consumed;
            let bytes = dc.as_bytes();
            real_len += bytes.len();
            for &b in bytes {
                if written + 1 < dest.len() {
                    dest[written] = b;
                    written += 1;
                }
            }
        }
        if !dest.is_empty() {
            dest[written] = 0;
        }
        Some(real_len)
    }

    /// Allocating convenience over [`Cursor::string`] for callers who
    /// don't need the zero-allocation fixed-buffer form. `None` for
    /// non-string, non-pair tags.
    #[must_use]
    pub fn decoded_string(&self) -> Option<String> {
        if !matches!(self.tag, Tag::String | Tag::Pair) {
            return None;
        }
        if self.input.get(self.pos) != Some(&b'"') {
            return None;
        }
        let mut p = self.pos + 1;
        let mut buf = Vec::new();
        loop {
            let dc = decode_char(self.input, p);
            if dc.consumed == 0 {
                break;
            }
            p += dc.consumed;
            buf.extend_from_slice(dc.as_bytes());
        }
        String::from_utf8(buf).ok()
    }

    /// For `Tag::Array`/`Tag::Object`, the number of elements, computed by
    /// repeated `move_index(0)` + `move_next` -- O(n) moves each costing
    /// O(k) to re-parse, so this is not O(n) overall for large containers.
    /// `0` for every other tag.
    #[must_use]
    pub fn array_count(&self) -> usize {
        if !self.tag.is_container() {
            return 0;
        }
        let mut count = 0usize;
        let mut cur = self.move_index(0);
        while cur.tag != Tag::Invalid {
            count += 1;
            cur = cur.move_next();
        }
        count
    }

    /// Three-way comparison of this cursor's value against `s`: for
    /// `Tag::String`/`Tag::Pair`, the *decoded* string is compared
    /// byte-for-byte against `s` (shorter side sorts first); for any other
    /// non-invalid tag, the raw value text is compared the same way.
    /// `Tag::Invalid` always compares less.
    #[must_use]
    pub fn string_compare(&self, s: &[u8]) -> i32 {
        self.compare_at(s).0
    }

    /// Comparison plus the position immediately after the compared token,
    /// which `move_key` reuses to continue scanning without re-skipping
    /// the key it just rejected.
    fn compare_at(&self, s: &[u8]) -> (i32, usize) {
        match self.tag {
            Tag::Invalid => (-1, self.pos),
            Tag::String | Tag::Pair => self.decoded_string_compare(s),
            _ => self.raw_compare(s),
        }
    }

    fn decoded_string_compare(&self, s: &[u8]) -> (i32, usize) {
        let Some(&b'"') = self.input.get(self.pos) else {
            return (-1, self.pos);
        };
        let mut p = self.pos + 1;
        let mut si = 0usize;
        loop {
            let dc = decode_char(self.input, p);
            if dc.consumed == 0 {
                break;
            }
            p += dc.consumed;
            for &b in dc.as_bytes() {
                match s.get(si) {
                    Some(&sb) => {
                        si += 1;
                        if b != sb {
                            return (i32::from(b) - i32::from(sb), string_end(self.input, p));
                        }
                    }
                    None => return (i32::from(b), string_end(self.input, p)),
                }
            }
        }
        let end = if self.input.get(p) == Some(&b'"') { p + 1 } else { p };
        let diff = s.get(si).map_or(0, |&sb| -i32::from(sb));
        (diff, end)
    }

    fn raw_compare(&self, s: &[u8]) -> (i32, usize) {
        let Some(end) = self.end() else {
            return (-1, self.pos);
        };
        let raw = &self.input[self.pos..end];
        let mut i = 0usize;
        while i < raw.len() && i < s.len() && raw[i] == s[i] {
            i += 1;
        }
        let diff = match (raw.get(i), s.get(i)) {
            (Some(&a), Some(&b)) => i32::from(a) - i32::from(b),
            (Some(&a), None) => i32::from(a),
            (None, Some(&b)) => -i32::from(b),
            (None, None) => 0,
        };
        (diff, end)
    }

    /// Moves to the member named `key` of an object cursor; `Tag::Invalid`
    /// on any other tag, a missing key, or a structural parse failure.
    #[must_use]
    pub fn move_key(&self, key: &str) -> Self {
        if self.tag != Tag::Object {
            return Self::invalid(self.input);
        }
        let key_bytes = key.as_bytes();
        let mut p = self.pos + 1; // past '{'
        loop {
            let (kpos, ktag) = classify(self.input, p);
            if ktag != Tag::String {
                // Either the closing '}' or a structural error: either way
                // the key was never found.
                return Self::invalid(self.input);
            }
            let key_cursor = Self {
                input: self.input,
                pos: kpos,
                tag: Tag::String,
            };
            let (diff, mut q) = key_cursor.decoded_string_compare(key_bytes);
            q = skip_whitespace(self.input, q);
            if self.input.get(q) != Some(&b':') {
                return Self::invalid(self.input);
            }
            q += 1;
            if diff == 0 {
                return Self::classify_cursor(self.input, q);
            }
            q = skip_whitespace(self.input, q);
            let Ok(after_val) = skip_value(self.input, q, false) else {
                return Self::invalid(self.input);
            };
            q = skip_whitespace(self.input, after_val);
            if self.input.get(q) == Some(&b',') {
                q += 1;
            }
            p = q;
        }
    }

    /// Moves to the `index`-th element of an array, or the `index`-th
    /// member (as a `Tag::Pair`) of an object; `Tag::Invalid` if the
    /// container ends first, on a structural parse failure, or on any
    /// other tag.
    #[must_use]
    pub fn move_index(&self, index: usize) -> Self {
        if !self.tag.is_container() {
            return Self::invalid(self.input);
        }
        let is_object = self.tag == Tag::Object;
        let closec = if is_object { b'}' } else { b']' };
        let mut p = self.pos + 1;
        let mut i = 0usize;
        while i != index {
            p = skip_whitespace(self.input, p);
            match self.input.get(p) {
                None => return Self::invalid(self.input),
                Some(&b) if b == closec => return Self::invalid(self.input),
                _ => {}
            }
            let Ok(after) = skip_value(self.input, p, is_object) else {
                return Self::invalid(self.input);
            };
            p = skip_whitespace(self.input, after);
            if self.input.get(p) == Some(&b',') {
                p += 1;
            }
            i += 1;
        }
        if is_object {
            Self::make_pair_cursor(self.input, p)
        } else {
            Self::classify_cursor(self.input, p)
        }
    }

    /// Moves to the next sibling: the next array element, the next
    /// object member (as a `Tag::Pair`), or `Tag::Invalid` when a closing
    /// delimiter is reached instead of a `,` -- which is how iteration
    /// terminates.
    #[must_use]
    pub fn move_next(&self) -> Self {
        if self.tag == Tag::Invalid {
            return Self::invalid(self.input);
        }
        let is_pair = self.tag == Tag::Pair;
        let Ok(after) = skip_value(self.input, self.pos, is_pair) else {
            return Self::invalid(self.input);
        };
        let p = skip_whitespace(self.input, after);
        if self.input.get(p) != Some(&b',') {
            return Self::invalid(self.input);
        }
        let p = p + 1;
        if is_pair {
            Self::make_pair_cursor(self.input, p)
        } else {
            Self::classify_cursor(self.input, p)
        }
    }

    /// Moves from a `Tag::Pair` cursor to the value associated with its
    /// key; `Tag::Invalid` on any other tag.
    #[must_use]
    pub fn move_pair_value(&self) -> Self {
        if self.tag != Tag::Pair {
            return Self::invalid(self.input);
        }
        let Ok(after) = skip_value(self.input, self.pos, false) else {
            return Self::invalid(self.input);
        };
        let p = skip_whitespace(self.input, after);
        if self.input.get(p) != Some(&b':') {
            return Self::invalid(self.input);
        }
        Self::classify_cursor(self.input, p + 1)
    }

    /// Walks a sequence of key/index steps in one call, short-circuiting
    /// to `Tag::Invalid` at the first failed step. A thin, allocation-free
    /// generalization of the repeated `move_key`/`move_index` chaining a
    /// host binding's variadic argument walk would otherwise hand-roll.
    #[must_use]
    pub fn get_path(&self, path: &[PathComponent<'_>]) -> Self {
        let mut cur = *self;
        for component in path {
            cur = match *component {
                PathComponent::Key(k) => cur.move_key(k),
                PathComponent::Index(i) => cur.move_index(i),
            };
            if cur.tag == Tag::Invalid {
                break;
            }
        }
        cur
    }
}

fn string_end(input: &[u8], pos: usize) -> usize {
    let end = skip_string_content(input, pos);
    if input.get(end) == Some(&b'"') {
        end + 1
    } else {
        end
    }
}

fn copy_truncated(src: &[u8], dest: &mut [u8]) {
    if dest.is_empty() {
        return;
    }
    let n = src.len().min(dest.len() - 1);
    dest[..n].copy_from_slice(&src[..n]);
    dest[n] = 0;
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::tag::Tag;

    #[test]
    fn parses_each_top_level_kind() {
        assert_eq!(Cursor::parse_str("{}").tag(), Tag::Object);
        assert_eq!(Cursor::parse_str("[]").tag(), Tag::Array);
        assert_eq!(Cursor::parse_str("null").tag(), Tag::Null);
        assert_eq!(Cursor::parse_str("true").tag(), Tag::Boolean);
        assert_eq!(Cursor::parse_str("\"s\"").tag(), Tag::String);
        assert_eq!(Cursor::parse_str("42").tag(), Tag::Integer);
        assert_eq!(Cursor::parse_str("4.2").tag(), Tag::Double);
        assert_eq!(Cursor::parse_str("").tag(), Tag::Invalid);
        assert_eq!(Cursor::parse_str("garbage").tag(), Tag::Invalid);
    }

    #[test]
    fn move_key_finds_member_and_misses_cleanly() {
        let c = Cursor::parse_str(r#"{"k":"v","a":[10,20]}"#);
        let v = c.move_key("k");
        assert_eq!(v.tag(), Tag::String);
        assert_eq!(v.decoded_string().as_deref(), Some("v"));
        assert_eq!(c.move_key("missing").tag(), Tag::Invalid);
    }

    #[test]
    fn move_key_then_index_then_int() {
        let c = Cursor::parse_str(r#"{"k":"v","a":[10,20]}"#);
        let v = c.move_key("a").move_index(0);
        assert_eq!(v.as_int(), Some(10));
    }

    #[test]
    fn move_key_is_insensitive_to_extra_whitespace() {
        let c = Cursor::parse_str("{  \"k\"   :   \"v\"  ,  \"a\" : 1 }");
        assert_eq!(c.move_key("a").as_int(), Some(1));
    }

    #[test]
    fn negative_exponent_number_reads_as_double() {
        let c = Cursor::parse_str(r#"{"n":-1.5e2}"#).move_key("n");
        assert_eq!(c.tag(), Tag::Double);
        let d = c.as_double().unwrap();
        assert!((d - (-150.0)).abs() < 1e-9);
    }

    #[test]
    fn string_extractor_decodes_unicode_escape() {
        let c = Cursor::parse_str(r#"{"s":"é"}"#).move_key("s");
        let mut buf = [0u8; 16];
        let n = c.string(&mut buf).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buf[..2], [0xC3, 0xA9]);
    }

    #[test]
    fn array_count_matches_manual_iteration() {
        let c = Cursor::parse_str("[1,2,3,4]");
        assert_eq!(c.array_count(), 4);
    }

    #[test]
    fn iterating_object_pairs_collects_keys_in_order() {
        use alloc::{string::ToString, vec, vec::Vec};
        let c = Cursor::parse_str(r#"{"a":1,"b":2}"#);
        let mut keys: Vec<alloc::string::String> = Vec::new();
        let mut cur = c.move_index(0);
        while cur.tag() != Tag::Invalid {
            keys.push(cur.decoded_string().unwrap());
            cur = cur.move_next();
        }
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn nested_path_walk_reaches_deep_value() {
        let c = Cursor::parse_str(r#"{"o":{"x":[true,null,false]}}"#);
        let v = c.move_key("o").move_key("x").move_index(1);
        assert!(v.is_null());
    }

    #[test]
    fn get_path_short_circuits_on_missing_step() {
        use crate::path_component::PathComponent;
        let c = Cursor::parse_str(r#"{"a":1}"#);
        let path = [PathComponent::Key("missing"), PathComponent::Index(0)];
        assert_eq!(c.get_path(&path).tag(), Tag::Invalid);
    }

    #[test]
    fn raw_returns_exact_source_span_including_quotes() {
        let c = Cursor::parse_str(r#"{"k":"v"}"#).move_key("k");
        assert_eq!(c.raw(), Some(&b"\"v\""[..]));
    }

    #[test]
    fn raw_copy_truncates_and_null_terminates() {
        let c = Cursor::parse_str(r#""abcdef""#);
        let mut buf = [0xFFu8; 4];
        let real_len = c.raw_copy(&mut buf).unwrap();
        assert_eq!(real_len, 8); // includes both quotes
        assert_eq!(&buf, b"\"ab\0");
    }

    #[test]
    fn string_compare_equal_lengths_and_content() {
        let c = Cursor::parse_str(r#""hello""#);
        assert_eq!(c.string_compare(b"hello"), 0);
    }

    #[test]
    fn string_compare_orders_by_byte_value() {
        let c = Cursor::parse_str(r#""abc""#);
        assert!(c.string_compare(b"abd") < 0);
        assert!(c.string_compare(b"abb") > 0);
    }

    #[test]
    fn string_compare_treats_shorter_side_as_less() {
        let c = Cursor::parse_str(r#""ab""#);
        assert!(c.string_compare(b"abc") < 0);
        assert!(c.string_compare(b"a") > 0);
    }

    #[test]
    fn invalid_cursor_propagates_through_every_navigator() {
        let c = Cursor::parse_str(r#"{"a":1}"#).move_key("missing");
        assert_eq!(c.tag(), Tag::Invalid);
        assert_eq!(c.move_key("x").tag(), Tag::Invalid);
        assert_eq!(c.move_index(0).tag(), Tag::Invalid);
        assert_eq!(c.move_next().tag(), Tag::Invalid);
        assert_eq!(c.move_pair_value().tag(), Tag::Invalid);
    }
}
