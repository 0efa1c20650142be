use crate::core::{
    Args, JSObject, JsContext, JsResult, MutationContext, NativeFunction, NativeMember, ObjectKind, Value, create_native_function,
    initialize_members,
};
use crate::{raise_range_error, raise_type_error};

/// Most arguments `apply` will spread out of an array-like.
pub const MAX_APPLY_ARGUMENTS: u32 = 65_535;

static FUNCTION_PROTOTYPE_MEMBERS: &[NativeMember] = &[
    NativeMember::method("toString", 0, function_to_string),
    NativeMember::method("call", 1, function_call),
    NativeMember::method("apply", 2, function_apply),
];

/// Function.prototype: a callable that accepts any arguments and returns undefined.
pub fn create_function_prototype<'gc>(mc: &MutationContext<'gc>, object_prototype: JSObject<'gc>) -> JSObject<'gc> {
    create_native_function(mc, Some(object_prototype), "", 0, Some(function_prototype_call), None)
}

pub fn initialize_function_prototype<'gc>(mc: &MutationContext<'gc>, function_prototype: JSObject<'gc>) {
    initialize_members(mc, function_prototype, function_prototype, FUNCTION_PROTOTYPE_MEMBERS);
}

fn function_prototype_call<'gc>(_cx: &JsContext<'gc>, _this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    Ok(Value::Undefined)
}

/// Function.prototype.toString
fn function_to_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let name = match &this {
        Value::Object(func) => match func.kind() {
            ObjectKind::NativeFunction(NativeFunction { name, .. }) => name,
            ObjectKind::ErrorConstructor(kind) => kind.name(),
            _ => return Err(raise_type_error!(cx, "Function.prototype.toString requires that 'this' be a Function")),
        },
        _ => return Err(raise_type_error!(cx, "Function.prototype.toString requires that 'this' be a Function")),
    };
    Ok(Value::from(format!("function {name}() {{ [native code] }}")))
}

/// Function.prototype.call
fn function_call<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let forwarded = Args::new(args.iter().skip(1).cloned().collect());
    this.op_call(cx, args.get(0), &forwarded)
}

/// Function.prototype.apply
fn function_apply<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    if !this.is_callable() {
        return Err(raise_type_error!(cx, "Function.prototype.apply was called on {}, which is not a function", this.display_string()));
    }
    let forwarded = match args.get(1) {
        Value::Undefined | Value::Null => Args::default(),
        Value::Object(list) => {
            let length = list.get(cx, "length")?.to_uint32(cx)?;
            if length > MAX_APPLY_ARGUMENTS {
                return Err(raise_range_error!(cx, "Too many arguments in function call (length {length})"));
            }
            let mut items = Vec::new();
            for index in 0..length {
                items.push(list.get(cx, &index.to_string())?);
            }
            Args::new(items)
        }
        _ => return Err(raise_type_error!(cx, "CreateListFromArrayLike called on non-object")),
    };
    this.op_call(cx, args.get(0), &forwarded)
}
