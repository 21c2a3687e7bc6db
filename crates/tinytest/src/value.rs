//! Dynamic value representation
//!
//! Loosely-typed values compared by the assertion helpers.
//! - Undefined, Null, Bool, Number: immediate values
//! - Strings: heap-allocated, reference-counted (Arc<str>), immutable
//! - Arrays and Objects: shared references (Arc), compared by identity
//!
//! Two equality relations are provided and kept separate:
//! [`Value::strict_eq`] never coerces, [`Value::loose_eq`] coerces values
//! of differing kinds before comparing them.

use std::fmt;
use std::sync::Arc;

/// Shared, immutable array. Clones share identity.
#[derive(Clone, Debug, Default)]
pub struct ValueArray(Arc<Vec<Value>>);

impl ValueArray {
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// True when both handles refer to the same allocation.
    pub fn ptr_eq(&self, other: &ValueArray) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<Value> for ValueArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueArray(Arc::new(iter.into_iter().collect()))
    }
}

/// Shared, immutable string-keyed record. Keys keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct ValueObject(Arc<Vec<(String, Value)>>);

impl ValueObject {
    /// Build from entries; a repeated key overwrites the earlier value in place.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut fields: Vec<(String, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            match fields.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => fields.push((key, value)),
            }
        }
        ValueObject(Arc::new(fields))
    }

    /// True when both handles refer to the same allocation.
    pub fn ptr_eq(&self, other: &ValueObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A dynamically typed value
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Undefined,
    /// Explicit null, distinct from `Undefined` under strict equality
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    Array(ValueArray),
    Object(ValueObject),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    /// Create a fresh array (new identity)
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Create a fresh object (new identity)
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(ValueObject::from_entries(
            entries.into_iter().map(|(k, v)| (k, v.into())),
        ))
    }

    /// Truthiness: `false`, `0`, `-0`, `NaN`, `""`, `null` and `undefined`
    /// are falsy. Everything else, including empty arrays and objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Numeric coercion, as applied by [`Value::loose_eq`]
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => bool_to_number(*b),
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Array(_) | Value::Object(_) => string_to_number(&self.to_string()),
        }
    }

    /// Strict equality: no coercion between kinds.
    ///
    /// `NaN` is unequal to itself, `0` equals `-0`, `undefined` and `null`
    /// differ, arrays and objects are equal only to themselves.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Loose equality: values of differing kinds are coerced before comparing.
    ///
    /// - `null` and `undefined` equal each other and nothing else
    /// - number vs string: the string is converted to a number
    /// - a boolean is converted to `1`/`0` and compared again
    /// - an array or object against a primitive is converted to its string form
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
            (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
            (Value::Number(a), Value::String(_)) => *a == other.to_number(),
            (Value::String(_), Value::Number(b)) => self.to_number() == *b,
            (Value::Bool(_), _) => Value::Number(self.to_number()).loose_eq(other),
            (_, Value::Bool(_)) => self.loose_eq(&Value::Number(other.to_number())),
            (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => {
                self.strict_eq(other)
            }
            (Value::Array(_) | Value::Object(_), _) => {
                Value::string(self.to_string()).loose_eq(other)
            }
            (_, Value::Array(_) | Value::Object(_)) => {
                self.loose_eq(&Value::string(other.to_string()))
            }
            _ => self.strict_eq(other),
        }
    }
}

impl PartialEq for Value {
    /// Strict equality, see [`Value::strict_eq`].
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(arr) => {
                let elements: Vec<String> = arr
                    .iter()
                    .map(|v| match v {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                write!(f, "{}", elements.join(","))
            }
            Value::Object(_) => write!(f, "[object Object]"),
        }
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Format a number the way it reads in assertion messages:
/// no trailing `.0`, `-0` as `0`, exponent form outside `[1e-6, 1e21)`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", n);
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

/// Convert a string to a number. Unparseable input yields `NaN`.
pub(crate) fn string_to_number(s: &str) -> f64 {
    let text = s.trim();
    if text.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // f64::from_str also accepts "inf" and "nan", which are not numeric literals here
    let starts_numeric = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    let only_numeric = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !starts_numeric || !only_numeric {
        return f64::NAN;
    }

    unsigned.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return f64::NAN,
        }
    }
    acc
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::string(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Undefined,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items)
    }
}

impl From<ValueArray> for Value {
    fn from(arr: ValueArray) -> Self {
        Value::Array(arr)
    }
}

impl From<ValueObject> for Value {
    fn from(obj: ValueObject) -> Self {
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from(false), false)]
    #[case(Value::from(0), false)]
    #[case(Value::from(-0.0), false)]
    #[case(Value::from(f64::NAN), false)]
    #[case(Value::from(""), false)]
    #[case(Value::Null, false)]
    #[case(Value::Undefined, false)]
    #[case(Value::from(true), true)]
    #[case(Value::from(1), true)]
    #[case(Value::from("0"), true)]
    #[case(Value::from(" "), true)]
    #[case(Value::array(Vec::<Value>::new()), true)]
    #[case(Value::object(Vec::<(&str, Value)>::new()), true)]
    fn test_truthiness(#[case] value: Value, #[case] truthy: bool) {
        assert_eq!(value.is_truthy(), truthy, "{:?}", value);
    }

    #[rstest]
    #[case(Value::from(1), Value::from("1"), true)]
    #[case(Value::from(0), Value::from(""), true)]
    #[case(Value::from(0), Value::from("0"), true)]
    #[case(Value::from(""), Value::from("0"), false)]
    #[case(Value::Null, Value::Undefined, true)]
    #[case(Value::Null, Value::from(0), false)]
    #[case(Value::Undefined, Value::from(false), false)]
    #[case(Value::from(true), Value::from(1), true)]
    #[case(Value::from(true), Value::from("1"), true)]
    #[case(Value::from(false), Value::from(""), true)]
    #[case(Value::from(false), Value::from("0"), true)]
    #[case(Value::from(true), Value::from(2), false)]
    #[case(Value::from(f64::NAN), Value::from(f64::NAN), false)]
    #[case(Value::from(" 12 "), Value::from(12), true)]
    #[case(Value::from("0x10"), Value::from(16), true)]
    #[case(Value::from("Infinity"), Value::from(f64::INFINITY), true)]
    #[case(Value::from("abc"), Value::from(f64::NAN), false)]
    #[case(Value::from("inf"), Value::from(f64::INFINITY), false)]
    #[case(Value::array([1, 2]), Value::from("1,2"), true)]
    #[case(Value::array(Vec::<Value>::new()), Value::from(""), true)]
    #[case(Value::array(Vec::<Value>::new()), Value::from(0), true)]
    #[case(Value::array([0]), Value::from(false), true)]
    #[case(Value::array([1, 2]), Value::array([1, 2]), false)]
    #[case(Value::object([("a", 1)]), Value::from("[object Object]"), true)]
    fn test_loose_eq(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
        assert_eq!(a.loose_eq(&b), expected, "{:?} == {:?}", a, b);
        assert_eq!(b.loose_eq(&a), expected, "{:?} == {:?}", b, a);
    }

    #[rstest]
    #[case(Value::from(1), Value::from(1), true)]
    #[case(Value::from(1), Value::from("1"), false)]
    #[case(Value::Null, Value::Undefined, false)]
    #[case(Value::Null, Value::Null, true)]
    #[case(Value::from(f64::NAN), Value::from(f64::NAN), false)]
    #[case(Value::from(0.0), Value::from(-0.0), true)]
    #[case(Value::from("a"), Value::from("a"), true)]
    #[case(Value::from(true), Value::from(1), false)]
    #[case(Value::array([1]), Value::array([1]), false)]
    fn test_strict_eq(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
        assert_eq!(a.strict_eq(&b), expected, "{:?} === {:?}", a, b);
    }

    #[test]
    fn test_shared_array_keeps_identity() {
        let arr = Value::array([1, 2, 3]);
        let alias = arr.clone();
        assert!(arr.strict_eq(&alias));
        assert!(arr.loose_eq(&alias));
        assert_eq!(arr, alias);
    }

    #[rstest]
    #[case(Value::from(1), "1")]
    #[case(Value::from(6.6), "6.6")]
    #[case(Value::from(-2), "-2")]
    #[case(Value::from(-0.0), "0")]
    #[case(Value::from(0.1 + 0.2), "0.30000000000000004")]
    #[case(Value::from(1e21), "1e+21")]
    #[case(Value::from(1.5e-7), "1.5e-7")]
    #[case(Value::from(123456789.0), "123456789")]
    #[case(Value::from(f64::NAN), "NaN")]
    #[case(Value::from(f64::NEG_INFINITY), "-Infinity")]
    #[case(Value::Undefined, "undefined")]
    #[case(Value::Null, "null")]
    #[case(Value::from(true), "true")]
    #[case(Value::from("text"), "text")]
    #[case(Value::array([Value::from(1), Value::Null, Value::from("a")]), "1,,a")]
    #[case(Value::array([Value::array([1, 2]), Value::from(3)]), "1,2,3")]
    #[case(Value::object([("k", "v")]), "[object Object]")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case("", 0.0)]
    #[case("  42  ", 42.0)]
    #[case("-3.5", -3.5)]
    #[case("+7", 7.0)]
    #[case(".5", 0.5)]
    #[case("1e3", 1000.0)]
    #[case("0b101", 5.0)]
    #[case("0o17", 15.0)]
    #[case("-Infinity", f64::NEG_INFINITY)]
    fn test_string_to_number(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(string_to_number(input), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1e")]
    #[case(".")]
    #[case("0x")]
    #[case("-0x10")]
    #[case("nan")]
    #[case("12px")]
    fn test_string_to_number_nan(#[case] input: &str) {
        assert!(string_to_number(input).is_nan(), "{:?}", input);
    }

    #[test]
    fn test_object_repeated_key_overwrites_in_place() {
        let obj = ValueObject::from_entries([
            ("a", Value::from(1)),
            ("b", Value::from(2)),
            ("a", Value::from(3)),
        ]);
        assert_eq!(
            format!("{:?}", obj),
            r#"ValueObject([("a", Number(3.0)), ("b", Number(2.0))])"#
        );
    }

    #[rstest]
    #[case(Value::Undefined, f64::NAN)]
    #[case(Value::Null, 0.0)]
    #[case(Value::from(true), 1.0)]
    #[case(Value::from(" 8 "), 8.0)]
    #[case(Value::array(Vec::<Value>::new()), 0.0)]
    #[case(Value::array([5]), 5.0)]
    #[case(Value::array([1, 2]), f64::NAN)]
    fn test_to_number(#[case] value: Value, #[case] expected: f64) {
        let n = value.to_number();
        assert!(n == expected || (n.is_nan() && expected.is_nan()), "{:?} -> {}", value, n);
    }

    #[test]
    fn test_option_and_unit_convert_to_undefined() {
        assert!(Value::from(None::<i32>).strict_eq(&Value::Undefined));
        assert!(Value::from(()).strict_eq(&Value::Undefined));
        assert!(Value::from(Some("x")).strict_eq(&Value::from("x")));
    }
}
