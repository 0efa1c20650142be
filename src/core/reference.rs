use crate::core::{Args, EnvironmentRecord, JsContext, JsResult, Value};
use crate::{ErrorKind, raise_reference_error, raise_type_error};

/// What a reference resolves against.
#[derive(Clone, Debug)]
pub enum ReferenceBase<'gc> {
    Unresolvable,
    Environment(EnvironmentRecord<'gc>),
    Value(Value<'gc>),
}

/// A resolved name binding: the target of assignment, `delete`, `typeof` and the update operators.
#[derive(Clone, Debug)]
pub struct Reference<'gc> {
    base: ReferenceBase<'gc>,
    name: String,
    strict: bool,
}

impl<'gc> Reference<'gc> {
    pub fn environment(record: EnvironmentRecord<'gc>, name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Environment(record),
            name: name.to_string(),
            strict,
        }
    }

    pub fn property(base: Value<'gc>, name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Value(base),
            name: name.to_string(),
            strict,
        }
    }

    pub fn unresolvable(name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Unresolvable,
            name: name.to_string(),
            strict,
        }
    }

    pub fn base(&self) -> &ReferenceBase<'gc> {
        &self.base
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self.base, ReferenceBase::Unresolvable)
    }

    pub fn is_property_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Value(_))
    }

    pub fn has_primitive_base(&self) -> bool {
        matches!(&self.base, ReferenceBase::Value(v) if v.is_primitive())
    }

    /// The `this` value for a call through this reference.
    pub fn this_value(&self) -> Value<'gc> {
        match &self.base {
            ReferenceBase::Value(base) => base.clone(),
            ReferenceBase::Environment(record) => record.implicit_this_value(),
            ReferenceBase::Unresolvable => Value::Undefined,
        }
    }

    /// GetValue
    pub fn get_value(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        match &self.base {
            ReferenceBase::Unresolvable => Err(raise_reference_error!(cx, "{} is not defined", self.name)),
            ReferenceBase::Value(base) => get_property_of(cx, base, &self.name),
            ReferenceBase::Environment(record) => record.get_binding_value(cx, &self.name, self.strict),
        }
    }

    /// PutValue
    pub fn put_value(&self, cx: &JsContext<'gc>, value: Value<'gc>) -> JsResult<'gc, ()> {
        match &self.base {
            ReferenceBase::Unresolvable => {
                if self.strict {
                    return Err(raise_reference_error!(cx, "{} is not defined", self.name));
                }
                cx.global_object().put(cx, &self.name, value, false)
            }
            ReferenceBase::Value(base) => put_property_of(cx, base, &self.name, value, self.strict),
            ReferenceBase::Environment(record) => record.set_mutable_binding(cx, &self.name, value, self.strict),
        }
    }

    /// The `delete` operator applied to this reference.
    pub fn delete(&self, cx: &JsContext<'gc>) -> JsResult<'gc, bool> {
        match &self.base {
            ReferenceBase::Unresolvable | ReferenceBase::Environment(_) if self.strict => {
                Err(cx.throw_error(ErrorKind::SyntaxError, "Delete of an unqualified identifier in strict mode."))
            }
            ReferenceBase::Unresolvable => Ok(true),
            ReferenceBase::Value(base) => base.to_object(cx)?.delete(cx, &self.name, self.strict),
            ReferenceBase::Environment(record) => record.delete_binding(cx, &self.name),
        }
    }

    /// The `typeof` operator applied to this reference.
    pub fn type_of(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        if self.is_unresolvable() {
            return Ok(Value::from("undefined"));
        }
        Ok(self.get_value(cx)?.op_typeof())
    }

    pub fn prefix_increment(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        self.update(cx, 1.0, true)
    }

    pub fn prefix_decrement(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        self.update(cx, -1.0, true)
    }

    pub fn postfix_increment(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        self.update(cx, 1.0, false)
    }

    pub fn postfix_decrement(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        self.update(cx, -1.0, false)
    }

    fn update(&self, cx: &JsContext<'gc>, delta: f64, prefix: bool) -> JsResult<'gc, Value<'gc>> {
        let old = self.get_value(cx)?.to_number(cx)?;
        let new = old + delta;
        self.put_value(cx, Value::Number(new))?;
        Ok(Value::Number(if prefix { new } else { old }))
    }
}

/// [[Get]] on an arbitrary base. Primitive bases read through their wrapper prototype with the
/// primitive itself as `this`.
pub(crate) fn get_property_of<'gc>(cx: &JsContext<'gc>, base: &Value<'gc>, key: &str) -> JsResult<'gc, Value<'gc>> {
    match base {
        Value::Object(obj) => obj.get(cx, key),
        primitive => primitive.to_object(cx)?.get_with_receiver(cx, key, primitive.clone()),
    }
}

/// [[Put]] on an arbitrary base. Writes to a primitive base only ever reach inherited setters;
/// anything else is dropped, or rejected when `throw`.
pub(crate) fn put_property_of<'gc>(cx: &JsContext<'gc>, base: &Value<'gc>, key: &str, value: Value<'gc>, throw: bool) -> JsResult<'gc, ()> {
    let primitive = match base {
        Value::Object(obj) => return obj.put(cx, key, value, throw),
        primitive => primitive,
    };
    let wrapper = primitive.to_object(cx)?;
    let rejected = || -> JsResult<'gc, ()> {
        if throw {
            return Err(raise_type_error!(cx, "Cannot create property '{key}' on {}", primitive.op_typeof().display_string()));
        }
        Ok(())
    };
    if !wrapper.can_put(key) || wrapper.has_own_property(key) {
        return rejected();
    }
    match wrapper.get_property(key) {
        Some(desc) if desc.is_accessor_descriptor() => {
            if let Some(Value::Object(setter)) = desc.set {
                setter.call(cx, primitive.clone(), &Args::from(vec![value]))?;
            }
            Ok(())
        }
        _ => rejected(),
    }
}

