#![no_main]

use arbitrary::Arbitrary;
use jsonget::{Cursor, PathComponent};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// One fuzz case: a JSON document plus a sequence of navigation steps to
/// walk over it. The document is built from an `arbitrary`-derived
/// `serde_json::Value` so most inputs are well-formed JSON (exercising the
/// navigator's happy path) while the raw leftover fuzzer bytes are appended
/// verbatim so malformed/truncated documents keep showing up too.
#[derive(Debug, Arbitrary)]
struct Case {
    value: ArbitraryValue,
    steps: Vec<Step>,
    trailing_garbage: Vec<u8>,
}

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Key(String),
    Index(usize),
}

fn navigate(data: &[u8]) {
    let Ok(case) = arbitrary::Unstructured::new(data).arbitrary::<Case>() else {
        return;
    };

    let mut doc = serde_json::to_vec(&case.value.0).unwrap_or_default();
    doc.extend_from_slice(&case.trailing_garbage);

    let root = Cursor::parse(&doc);
    let path: Vec<PathComponent<'_>> = case
        .steps
        .iter()
        .map(|s| match s {
            Step::Key(k) => PathComponent::Key(k.as_str()),
            Step::Index(i) => PathComponent::Index(*i),
        })
        .collect();

    let cursor = root.get_path(&path);
    // Every extractor must degrade gracefully, never panic, regardless of
    // which tag the walk lands on.
    let _ = cursor.is_null();
    let _ = cursor.is_true();
    let _ = cursor.as_int();
    let _ = cursor.as_double();
    let _ = cursor.raw();
    let _ = cursor.decoded_string();
    let _ = cursor.array_count();
    let _ = cursor.string_compare(b"probe");

    let mut buf = [0u8; 64];
    let _ = cursor.raw_copy(&mut buf);
    let _ = cursor.string(&mut buf);

    // A document nested around the ceiling must still fail cleanly rather
    // than overflow the stack; vary how far past it we go using leftover
    // input bytes so the corpus explores both sides of the boundary.
    let ceiling = jsonget::max_nesting_depth() as usize;
    let slack = case.trailing_garbage.len() % 4;
    let depth = ceiling + 1 - slack.min(ceiling);
    let mut deep = "[".repeat(depth);
    deep.push_str(&"]".repeat(depth));
    let _ = Cursor::parse_str(&deep).array_count();
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Depth is bounded by arbitrary's own recursion guard via
        // `arbitrary_take_rest`-free recursive calls below; `len` just picks
        // a node kind.
        let node_type = u.choose_index(9)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(serde_json::Number::from_f64(n).unwrap_or_else(|| 0.into()))
            }
            3 | 4 => Value::String(u.arbitrary()?),
            5 | 6 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().take(16).map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(
                    m.into_iter().take(16).map(|(k, v)| (k, v.0)),
                ))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fuzz_target!(|data: &[u8]| navigate(data));
