use crate::core::{Args, Attributes, JSObject, JsContext, JsResult, MutationContext, ObjectKind, Property, Value, construct_error};
use crate::raise_type_error;

/// Host implementation of [[Call]]: `(context, this, arguments)`.
pub type NativeCall = for<'gc> fn(&JsContext<'gc>, Value<'gc>, &Args<'gc>) -> JsResult<'gc, Value<'gc>>;

/// Host implementation of [[Construct]].
pub type NativeConstruct = for<'gc> fn(&JsContext<'gc>, &Args<'gc>) -> JsResult<'gc, JSObject<'gc>>;

/// The callable/constructable capabilities of a native function object. Either may be absent.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub call: Option<NativeCall>,
    pub construct: Option<NativeConstruct>,
}

/// One row of an intrinsic object's member table.
#[derive(Clone, Copy)]
pub struct NativeMember {
    pub name: &'static str,
    pub arity: u32,
    pub attributes: Attributes,
    pub call: NativeCall,
}

impl NativeMember {
    /// A built-in method with the usual writable, non-enumerable, configurable attributes.
    pub const fn method(name: &'static str, arity: u32, call: NativeCall) -> Self {
        NativeMember {
            name,
            arity,
            attributes: Attributes::METHOD,
            call,
        }
    }
}

/// Allocate a function object inheriting from `function_prototype` with `length` and `name` set.
pub fn create_native_function<'gc>(
    mc: &MutationContext<'gc>,
    function_prototype: Option<JSObject<'gc>>,
    name: &'static str,
    arity: u32,
    call: Option<NativeCall>,
    construct: Option<NativeConstruct>,
) -> JSObject<'gc> {
    let func = JSObject::with_kind(
        mc,
        function_prototype,
        "Function",
        ObjectKind::NativeFunction(NativeFunction { name, call, construct }),
    );
    func.insert_property(mc, "length", Property::data(Value::Number(arity as f64), false, false, false));
    func.insert_property(mc, "name", Property::data(Value::from(name), false, false, true));
    func
}

/// Install every entry of `members` on `target` as a native method.
pub fn initialize_members<'gc>(mc: &MutationContext<'gc>, target: JSObject<'gc>, function_prototype: JSObject<'gc>, members: &[NativeMember]) {
    for member in members {
        let func = create_native_function(mc, Some(function_prototype), member.name, member.arity, Some(member.call), None);
        let Attributes {
            writable,
            enumerable,
            configurable,
        } = member.attributes;
        target.insert_property(mc, member.name, Property::data(Value::Object(func), writable, enumerable, configurable));
    }
    log::debug!("installed {} native members on {target:?}", members.len());
}

impl<'gc> JSObject<'gc> {
    pub fn is_callable(&self) -> bool {
        match self.kind() {
            ObjectKind::NativeFunction(f) => f.call.is_some(),
            ObjectKind::ErrorConstructor(_) => true,
            _ => false,
        }
    }

    pub fn is_constructor(&self) -> bool {
        match self.kind() {
            ObjectKind::NativeFunction(f) => f.construct.is_some(),
            ObjectKind::ErrorConstructor(_) => true,
            _ => false,
        }
    }

    /// [[Call]]
    pub fn call(&self, cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
        match self.kind() {
            ObjectKind::NativeFunction(NativeFunction { call: Some(call), name, .. }) => {
                log::trace!("calling native {name} with {} arguments", args.count());
                call(cx, this, args)
            }
            // Error constructors called without `new` behave as if constructed
            ObjectKind::ErrorConstructor(kind) => Ok(Value::Object(construct_error(cx, kind, args)?)),
            _ => Err(raise_type_error!(cx, "{} is not a function", Value::Object(*self).display_string())),
        }
    }

    /// [[Construct]]
    pub fn construct(&self, cx: &JsContext<'gc>, args: &Args<'gc>) -> JsResult<'gc, JSObject<'gc>> {
        match self.kind() {
            ObjectKind::NativeFunction(NativeFunction {
                construct: Some(construct), ..
            }) => construct(cx, args),
            ObjectKind::ErrorConstructor(kind) => construct_error(cx, kind, args),
            _ => Err(raise_type_error!(cx, "{} is not a constructor", Value::Object(*self).display_string())),
        }
    }
}
