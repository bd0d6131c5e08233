//! crates/logging/src/field.rs
//! Structured attributes attached to a single record.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// A typed value carried by a [`Field`] or passed in a key/value slice.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// UTF-8 text.
    Str(String),
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Floating point number.
    F64(f64),
    /// Elapsed time, rendered according to the encoder's duration setting.
    Duration(Duration),
    /// Rendered error message.
    Error(String),
    /// `Debug` rendering of an arbitrary value.
    Debug(String),
    /// Pre-serialized JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Captures the `Debug` rendering of `value`.
    pub fn debug(value: &impl fmt::Debug) -> Self {
        Self::Debug(format!("{value:?}"))
    }

    /// Serializes `value` to JSON; serialization failures are kept as error text.
    pub fn json(value: &impl Serialize) -> Self {
        serde_json::to_value(value).map_or_else(|error| Self::Error(error.to_string()), Self::Json)
    }

    pub(crate) fn as_key(&self) -> Option<&str> {
        match self {
            Self::Str(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) | Self::Error(text) | Self::Debug(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::I64(number) => write!(f, "{number}"),
            Self::U64(number) => write!(f, "{number}"),
            Self::F64(number) => write!(f, "{number}"),
            Self::Duration(elapsed) => write!(f, "{elapsed:?}"),
            Self::Json(json) => write!(f, "{json}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Self::Str(text.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(text: Cow<'_, str>) -> Self {
        Self::Str(text.into_owned())
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

macro_rules! value_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(number: $ty) -> Self {
                Self::I64(i64::from(number))
            }
        })*
    };
}

macro_rules! value_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(number: $ty) -> Self {
                Self::U64(u64::from(number))
            }
        })*
    };
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(number: isize) -> Self {
        Self::I64(number as i64)
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::U64(number as u64)
    }
}

impl From<f32> for Value {
    fn from(number: f32) -> Self {
        Self::F64(f64::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::F64(number)
    }
}

impl From<Duration> for Value {
    fn from(elapsed: Duration) -> Self {
        Self::Duration(elapsed)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::Json(json)
    }
}

/// A key/value attribute attached to one record.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    /// Builds a field from any value convertible into [`Value`].
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Text field.
    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, Value::Str(value.into()))
    }

    /// Signed integer field.
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, Value::I64(value))
    }

    /// Unsigned integer field.
    pub fn uint(key: impl Into<Cow<'static, str>>, value: u64) -> Self {
        Self::new(key, Value::U64(value))
    }

    /// Floating point field.
    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, Value::F64(value))
    }

    /// Boolean field.
    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    /// Elapsed time field.
    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /// Error field under the conventional `error` key.
    pub fn error(error: &(dyn StdError + 'static)) -> Self {
        Self::named_error("error", error)
    }

    /// Error field under a custom key.
    pub fn named_error(key: impl Into<Cow<'static, str>>, error: &(dyn StdError + 'static)) -> Self {
        Self::new(key, Value::Error(error.to_string()))
    }

    /// Field holding the `Debug` rendering of `value`.
    pub fn debug(key: impl Into<Cow<'static, str>>, value: &impl fmt::Debug) -> Self {
        Self::new(key, Value::debug(value))
    }

    /// Field holding the JSON serialization of `value`.
    pub fn json(key: impl Into<Cow<'static, str>>, value: &impl Serialize) -> Self {
        Self::new(key, Value::json(value))
    }

    /// The field's key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The field's value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

/// A key/value pair dropped because its key is not a string.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InvalidPair {
    pub(crate) position: usize,
    pub(crate) key: Value,
    pub(crate) value: Value,
}

/// Result of splitting an alternating key/value slice into fields.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Pairs {
    pub(crate) fields: Vec<Field>,
    pub(crate) invalid: Vec<InvalidPair>,
    pub(crate) dangling_key: Option<Value>,
}

impl Pairs {
    /// The dropped pairs as `[{"position":..,"key":..,"value":..}, ...]`.
    pub(crate) fn invalid_json(&self) -> serde_json::Value {
        self.invalid
            .iter()
            .map(|pair| {
                serde_json::json!({
                    "position": pair.position,
                    "key": pair.key.to_string(),
                    "value": pair.value.to_string(),
                })
            })
            .collect()
    }
}

/// Pairs up `keys_and_values` left to right.
///
/// A pair whose key is not a string lands in `invalid` with the index of its
/// key. A trailing key without a value ends up in `dangling_key`.
pub(crate) fn pair_up(keys_and_values: &[Value]) -> Pairs {
    let mut pairs = Pairs::default();
    let mut chunks = keys_and_values.chunks_exact(2);
    for (index, chunk) in (&mut chunks).enumerate() {
        let (key, value) = (&chunk[0], &chunk[1]);
        match key.as_key() {
            Some(name) => pairs.fields.push(Field::new(name.to_owned(), value.clone())),
            None => pairs.invalid.push(InvalidPair {
                position: index * 2,
                key: key.clone(),
                value: value.clone(),
            }),
        }
    }
    pairs.dangling_key = chunks.remainder().first().cloned();
    pairs
}

/// Builds a key/value slice for the `*w` logging functions.
///
/// ```
/// use logfacade::{Value, kv};
///
/// let pairs = kv!["user", "alice", "attempts", 3];
/// assert_eq!(pairs[0], Value::from("user"));
/// assert_eq!(pairs[3], Value::from(3));
/// ```
#[macro_export]
macro_rules! kv {
    ($($item:expr),* $(,)?) => {
        [$($crate::Value::from($item)),*]
    };
}
