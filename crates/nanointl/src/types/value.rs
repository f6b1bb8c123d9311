use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Weak};

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::opaque::Opaque;
use super::output::Output;

/// Arguments for one `format_message` call, in insertion order.
///
/// The order matters: it is part of the memoization key.
pub type Values = IndexMap<String, Value>;

/// A runtime argument passed to a message.
///
/// # Example
///
/// ```
/// use nanointl::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let absent: Value = Option::<i64>::None.into();
///
/// assert_eq!(count.as_f64(), Some(42.0));
/// assert_eq!(name.to_string(), "Alice");
/// assert!(absent.is_suppressed());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; renders as nothing in a simple interpolation.
    Null,

    Bool(bool),

    /// An integer number.
    Int(i64),

    /// A floating-point number.
    Float(f64),

    String(String),

    /// A point in time with its UTC offset.
    Date(DateTime<FixedOffset>),

    /// An opaque object embedded in rich output as-is.
    Object(Object),

    /// A render callback, used by tag and markdown nodes.
    Function(Callback),
}

impl Value {
    /// Wrap any comparable value as an opaque object.
    pub fn object<T: Opaque>(value: T) -> Self {
        Value::Object(Object::new(value))
    }

    /// Wrap a render callback.
    pub fn function<F>(callback: F) -> Self
    where
        F: Fn(RenderProps) -> Output + Send + Sync + 'static,
    {
        Value::Function(Callback::new(callback))
    }

    /// Numeric view of this value. Strings are parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integer view of this value, used for exact plural matches.
    ///
    /// Floats qualify only when they have no fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Value::Function(callback) => Some(callback),
            _ => None,
        }
    }

    /// Whether a simple interpolation of this value renders nothing.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Value::Null | Value::Bool(false))
    }

    /// Whether this value is compared by identity rather than by content.
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Function(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) if n.is_nan() => f.write_str("NaN"),
            Value::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Date(date) => f.write_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Object(object) => write!(f, "{object:?}"),
            Value::Function(_) => f.write_str("[function]"),
        }
    }
}

/// An opaque object compared by content when both sides share a type.
///
/// Objects are also tracked by identity in the memoization cache, see
/// [`Object::downgrade`].
#[derive(Clone)]
pub struct Object(Arc<dyn Opaque>);

impl Object {
    pub fn new<T: Opaque>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    /// Address of the shared allocation, stable while any clone is alive.
    pub fn address(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub fn downgrade(&self) -> Weak<dyn Opaque> {
        Arc::downgrade(&self.0)
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        self.address() == other.address()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (*self.0).eq_opaque(&*other.0)
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

/// Properties handed to a render callback.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProps {
    /// Name of the tag or markdown token being rendered.
    pub tag: String,

    /// Already serialized content between the opening and closing markers.
    pub children: Output,

    /// Target of a markdown link.
    pub url: Option<String>,
}

pub(crate) type CallbackFn = dyn Fn(RenderProps) -> Output + Send + Sync;

/// A shared render callback. Two callbacks are equal only when they are
/// clones of the same closure.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(RenderProps) -> Output + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub fn call(&self, props: RenderProps) -> Output {
        (self.0)(props)
    }

    pub fn address(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub fn downgrade(&self) -> Weak<CallbackFn> {
        Arc::downgrade(&self.0)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Debug for Callback {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:#x})", self.address())
    }
}

// From implementations for common types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(date: DateTime<FixedOffset>) -> Self {
        Value::Date(date)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date.fixed_offset())
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Callback> for Value {
    fn from(callback: Callback) -> Self {
        Value::Function(callback)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => n
                .as_i64()
                .map_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN)), Value::Int),
            JsonValue::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}
