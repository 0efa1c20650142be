use crate::core::{Args, JSObject, JsContext, JsResult, MutationContext, NativeMember, Value, initialize_members};
use crate::raise_type_error;

static OBJECT_PROTOTYPE_MEMBERS: &[NativeMember] = &[
    NativeMember::method("toString", 0, object_to_string),
    NativeMember::method("toLocaleString", 0, object_to_locale_string),
    NativeMember::method("valueOf", 0, object_value_of),
    NativeMember::method("hasOwnProperty", 1, object_has_own_property),
    NativeMember::method("isPrototypeOf", 1, object_is_prototype_of),
    NativeMember::method("propertyIsEnumerable", 1, object_property_is_enumerable),
];

pub fn initialize_object_prototype<'gc>(mc: &MutationContext<'gc>, object_prototype: JSObject<'gc>, function_prototype: JSObject<'gc>) {
    initialize_members(mc, object_prototype, function_prototype, OBJECT_PROTOTYPE_MEMBERS);
}

/// Object.prototype.toString
fn object_to_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let class = match &this {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        other => other.to_object(cx)?.class(),
    };
    Ok(Value::from(format!("[object {class}]")))
}

/// Object.prototype.toLocaleString
fn object_to_locale_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let obj = this.to_object(cx)?;
    match obj.get(cx, "toString")? {
        Value::Object(func) if func.is_callable() => func.call(cx, this, &Args::default()),
        _ => Err(raise_type_error!(cx, "toString is not a function")),
    }
}

/// Object.prototype.valueOf
fn object_value_of<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    Ok(Value::Object(this.to_object(cx)?))
}

/// Object.prototype.hasOwnProperty
fn object_has_own_property<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let key = args.get(0).to_property_key(cx)?;
    let obj = this.to_object(cx)?;
    Ok(Value::Boolean(obj.has_own_property(key.as_str())))
}

/// Object.prototype.isPrototypeOf
fn object_is_prototype_of<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let Value::Object(other) = args.get(0) else {
        return Ok(Value::Boolean(false));
    };
    let obj = this.to_object(cx)?;
    Ok(Value::Boolean(obj.is_prototype_of(other)))
}

/// Object.prototype.propertyIsEnumerable
fn object_property_is_enumerable<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let key = args.get(0).to_property_key(cx)?;
    let obj = this.to_object(cx)?;
    let enumerable = obj.get_own_property(key.as_str()).and_then(|desc| desc.enumerable).unwrap_or(false);
    Ok(Value::Boolean(enumerable))
}
