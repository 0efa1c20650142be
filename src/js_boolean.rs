use crate::core::{Args, JSObject, JsContext, JsResult, MutationContext, NativeMember, ObjectKind, Value, initialize_members};
use crate::raise_type_error;
use crate::unicode::utf8_to_utf16;

static BOOLEAN_PROTOTYPE_MEMBERS: &[NativeMember] = &[
    NativeMember::method("toString", 0, boolean_to_string),
    NativeMember::method("valueOf", 0, boolean_value_of),
];

/// Boolean.prototype is itself a Boolean object whose value is false.
pub fn create_boolean_prototype<'gc>(
    mc: &MutationContext<'gc>,
    object_prototype: JSObject<'gc>,
    function_prototype: JSObject<'gc>,
) -> JSObject<'gc> {
    let proto = JSObject::with_kind(mc, Some(object_prototype), "Boolean", ObjectKind::PrimitiveWrapper(Value::Boolean(false)));
    initialize_members(mc, proto, function_prototype, BOOLEAN_PROTOTYPE_MEMBERS);
    proto
}

fn boolean_to_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let b = this_boolean_value(cx, &this)?;
    Ok(Value::String(utf8_to_utf16(if b { "true" } else { "false" })))
}

fn boolean_value_of<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    Ok(Value::Boolean(this_boolean_value(cx, &this)?))
}

fn this_boolean_value<'gc>(cx: &JsContext<'gc>, value: &Value<'gc>) -> JsResult<'gc, bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Object(obj) => match obj.primitive_value() {
            Some(Value::Boolean(b)) => Ok(b),
            _ => Err(raise_type_error!(cx, "Boolean.prototype method called on incompatible receiver")),
        },
        _ => Err(raise_type_error!(cx, "Boolean.prototype method called on incompatible receiver")),
    }
}
