use crate::core::number::number_to_string;
use crate::core::{Collect, GcTrace, JSObject, ObjectKind};
use crate::unicode::{utf8_to_utf16, utf16_to_utf8};

/// An ECMAScript language value.
///
/// Exactly one variant is active; only `Object` is non-primitive. Objects are shared handles
/// into the arena and compare by identity.
#[derive(Clone)]
pub enum Value<'gc> {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Vec<u16>),
    Object(JSObject<'gc>),
}

/// https://tc39.es/ecma262/multipage/ecmascript-data-types-and-values.html#sec-ecmascript-language-types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Object,
}

/// Hint accepted by ToPrimitive / [[DefaultValue]].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String,
    Number,
}

unsafe impl<'gc> Collect<'gc> for Value<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        if let Value::Object(obj) = self {
            obj.trace(cc);
        }
    }
}

impl<'gc> Value<'gc> {
    pub fn type_of_value(&self) -> Type {
        match self {
            Value::Undefined => Type::Undefined,
            Value::Null => Type::Null,
            Value::Boolean(_) => Type::Boolean,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Object(_) => Type::Object,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn as_object(&self) -> Option<JSObject<'gc>> {
        match self {
            Value::Object(obj) => Some(*obj),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Object(obj) if obj.is_callable())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(utf16_to_utf8(s)),
            _ => None,
        }
    }

    /// Render the value without running any script code.
    ///
    /// Error objects render as `Name: message` from their own or inherited data properties,
    /// other objects as `[object Class]`. This is what escapes to the host when a conversion
    /// through `toString` is not possible.
    pub fn display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => utf16_to_utf8(s),
            Value::Object(obj) => {
                if let ObjectKind::PrimitiveWrapper(inner) = obj.kind() {
                    return inner.display_string();
                }
                if obj.error_kind().is_some() {
                    let name = obj.peek_data_string("name").unwrap_or_else(|| "Error".to_string());
                    let message = obj.peek_data_string("message").unwrap_or_default();
                    if message.is_empty() {
                        return name;
                    }
                    return format!("{name}: {message}");
                }
                format!("[object {}]", obj.class())
            }
        }
    }
}

/// The SameValue algorithm: NaN equals NaN, +0 and -0 differ, objects compare by identity.
pub fn same_value<'gc>(x: &Value<'gc>, y: &Value<'gc>) -> bool {
    match (x, y) {
        (Value::Number(a), Value::Number(b)) => {
            if a.is_nan() && b.is_nan() {
                true
            } else {
                a == b && a.is_sign_negative() == b.is_sign_negative()
            }
        }
        _ => strict_equals(x, y),
    }
}

/// The Strict Equality Comparison Algorithm (`===`). Never coerces.
pub fn strict_equals<'gc>(x: &Value<'gc>, y: &Value<'gc>) -> bool {
    match (x, y) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => JSObject::ptr_eq(*a, *b),
        _ => false,
    }
}

impl<'gc> PartialEq for Value<'gc> {
    fn eq(&self, other: &Self) -> bool {
        same_value(self, other)
    }
}

impl<'gc> std::fmt::Debug for Value<'gc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", utf16_to_utf8(s)),
            Value::Object(obj) => write!(f, "Object({:?})", obj),
        }
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Value::String(utf8_to_utf16(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(utf8_to_utf16(&s))
    }
}

impl From<&String> for Value<'_> {
    fn from(s: &String) -> Self {
        Value::String(utf8_to_utf16(s))
    }
}

impl<'gc> From<JSObject<'gc>> for Value<'gc> {
    fn from(obj: JSObject<'gc>) -> Self {
        Value::Object(obj)
    }
}
