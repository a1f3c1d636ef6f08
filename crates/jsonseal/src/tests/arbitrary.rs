//! Random JSON documents for the property tests.
//!
//! Numbers are restricted to exponent-free decimals: the completer
//! deliberately recognizes `e`/`E` only after a started fraction, and
//! `serde_json` may otherwise serialize extreme floats in exponent notation.

use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub(crate) struct ArbitraryJson(pub Value);

impl Arbitrary for ArbitraryJson {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbitraryJson(gen_value(g, 3))
    }
}

fn gen_value(g: &mut Gen, depth: usize) -> Value {
    let choices = if depth == 0 { 4 } else { 6 };
    match u8::arbitrary(g) % choices {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => gen_number(g),
        3 => Value::String(String::arbitrary(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| gen_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            let entries =
                (0..len).map(|_| (String::arbitrary(g), gen_value(g, depth - 1)));
            Value::Object(Map::from_iter(entries))
        }
    }
}

fn gen_number(g: &mut Gen) -> Value {
    let int = i32::arbitrary(g);
    match u8::arbitrary(g) % 3 {
        0 => Value::from(i64::from(int)),
        1 => Value::from(f64::from(int) / 10.0),
        _ => Value::from(f64::from(int) / 100.0),
    }
}
