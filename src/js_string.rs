use crate::core::{Args, JSObject, JsContext, JsResult, MutationContext, NativeMember, ObjectKind, Property, Value, initialize_members};
use crate::raise_type_error;

static STRING_PROTOTYPE_MEMBERS: &[NativeMember] = &[
    NativeMember::method("toString", 0, string_to_string),
    NativeMember::method("valueOf", 0, string_value_of),
];

/// String.prototype is itself a String object whose value is the empty string.
pub fn create_string_prototype<'gc>(
    mc: &MutationContext<'gc>,
    object_prototype: JSObject<'gc>,
    function_prototype: JSObject<'gc>,
) -> JSObject<'gc> {
    let proto = JSObject::with_kind(mc, Some(object_prototype), "String", ObjectKind::PrimitiveWrapper(Value::String(Vec::new())));
    proto.insert_property(mc, "length", Property::data(Value::Number(0.0), false, false, false));
    initialize_members(mc, proto, function_prototype, STRING_PROTOTYPE_MEMBERS);
    proto
}

// toString and valueOf are the same function for String objects
fn string_to_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    Ok(Value::String(this_string_value(cx, &this)?))
}

fn string_value_of<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    Ok(Value::String(this_string_value(cx, &this)?))
}

fn this_string_value<'gc>(cx: &JsContext<'gc>, value: &Value<'gc>) -> JsResult<'gc, Vec<u16>> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Object(obj) => match obj.primitive_value() {
            Some(Value::String(s)) => Ok(s),
            _ => Err(raise_type_error!(cx, "String.prototype.valueOf requires that 'this' be a String")),
        },
        _ => Err(raise_type_error!(cx, "String.prototype.valueOf requires that 'this' be a String")),
    }
}
