// Type conversion abstract operations (ToPrimitive, ToBoolean, ToNumber, ToString, ToObject, ...)

use crate::core::number::{number_to_string, string_to_number, to_int32, to_integer, to_uint16, to_uint32};
use crate::core::{JSObject, JsContext, JsResult, ObjectKind, PreferredType, Property, PropertyKey, Value};
use crate::raise_type_error;
use crate::unicode::{utf8_to_utf16, utf16_to_utf8};

impl<'gc> Value<'gc> {
    /// ToPrimitive. Objects go through [[DefaultValue]], with Number as the default hint.
    pub fn to_primitive(&self, cx: &JsContext<'gc>, hint: Option<PreferredType>) -> JsResult<'gc, Value<'gc>> {
        match self {
            Value::Object(obj) => obj.default_value(cx, hint.unwrap_or(PreferredType::Number)),
            primitive => Ok(primitive.clone()),
        }
    }

    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn to_number(&self, cx: &JsContext<'gc>) -> JsResult<'gc, f64> {
        Ok(match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Object(_) => self.to_primitive(cx, Some(PreferredType::Number))?.to_number(cx)?,
        })
    }

    /// ToString, as UTF-16 code units.
    pub fn to_js_string(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Vec<u16>> {
        Ok(match self {
            Value::Undefined => utf8_to_utf16("undefined"),
            Value::Null => utf8_to_utf16("null"),
            Value::Boolean(b) => utf8_to_utf16(if *b { "true" } else { "false" }),
            Value::Number(n) => utf8_to_utf16(&number_to_string(*n)),
            Value::String(s) => s.clone(),
            Value::Object(_) => self.to_primitive(cx, Some(PreferredType::String))?.to_js_string(cx)?,
        })
    }

    pub fn to_rust_string(&self, cx: &JsContext<'gc>) -> JsResult<'gc, String> {
        Ok(utf16_to_utf8(&self.to_js_string(cx)?))
    }

    /// ToObject. Primitives are wrapped in a fresh Boolean, Number or String object.
    pub fn to_object(&self, cx: &JsContext<'gc>) -> JsResult<'gc, JSObject<'gc>> {
        let realm = cx.realm();
        let (prototype, class) = match self {
            Value::Undefined | Value::Null => {
                return Err(raise_type_error!(cx, "Cannot convert undefined or null to object"));
            }
            Value::Object(obj) => return Ok(*obj),
            Value::Boolean(_) => (realm.boolean_prototype(), "Boolean"),
            Value::Number(_) => (realm.number_prototype(), "Number"),
            Value::String(_) => (realm.string_prototype(), "String"),
        };
        Ok(new_primitive_wrapper(cx.mc(), prototype, class, self.clone()))
    }

    pub fn to_integer(&self, cx: &JsContext<'gc>) -> JsResult<'gc, f64> {
        Ok(to_integer(self.to_number(cx)?))
    }

    pub fn to_int32(&self, cx: &JsContext<'gc>) -> JsResult<'gc, i32> {
        Ok(to_int32(self.to_number(cx)?))
    }

    pub fn to_uint32(&self, cx: &JsContext<'gc>) -> JsResult<'gc, u32> {
        Ok(to_uint32(self.to_number(cx)?))
    }

    pub fn to_uint16(&self, cx: &JsContext<'gc>) -> JsResult<'gc, u16> {
        Ok(to_uint16(self.to_number(cx)?))
    }

    pub fn to_property_key(&self, cx: &JsContext<'gc>) -> JsResult<'gc, PropertyKey> {
        PropertyKey::from_value(cx, self)
    }
}

/// Boolean, Number or String object holding `primitive`. String objects get their read-only `length`.
pub(crate) fn new_primitive_wrapper<'gc>(
    mc: &crate::core::MutationContext<'gc>,
    prototype: JSObject<'gc>,
    class: &'static str,
    primitive: Value<'gc>,
) -> JSObject<'gc> {
    let length = match &primitive {
        Value::String(s) => Some(s.len()),
        _ => None,
    };
    let obj = JSObject::with_kind(mc, Some(prototype), class, ObjectKind::PrimitiveWrapper(primitive));
    if let Some(length) = length {
        obj.insert_property(mc, "length", Property::data(Value::Number(length as f64), false, false, false));
    }
    obj
}
