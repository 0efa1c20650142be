// The operator surface the evaluator drives: one method per ECMAScript operator. Operands arrive
// already evaluated; short-circuiting and reference resolution happen before these are reached.

use crate::core::reference::{get_property_of, put_property_of};
use crate::core::{Args, EvalError, JsContext, JsResult, PreferredType, RuntimeException, Value, strict_equals};
use crate::{raise_reference_error, raise_type_error};

impl<'gc> Value<'gc> {
    pub fn op_logical_not(&self) -> Value<'gc> {
        Value::Boolean(!self.to_boolean())
    }

    pub fn op_logical_or(&self, other: Value<'gc>) -> Value<'gc> {
        if self.to_boolean() { self.clone() } else { other }
    }

    pub fn op_logical_and(&self, other: Value<'gc>) -> Value<'gc> {
        if self.to_boolean() { other } else { self.clone() }
    }

    pub fn op_bitwise_not(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Ok(Value::Number(!self.to_int32(cx)? as f64))
    }

    pub fn op_bitwise_or(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let (l, r) = (self.to_int32(cx)?, other.to_int32(cx)?);
        Ok(Value::Number((l | r) as f64))
    }

    pub fn op_bitwise_xor(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let (l, r) = (self.to_int32(cx)?, other.to_int32(cx)?);
        Ok(Value::Number((l ^ r) as f64))
    }

    pub fn op_bitwise_and(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let (l, r) = (self.to_int32(cx)?, other.to_int32(cx)?);
        Ok(Value::Number((l & r) as f64))
    }

    /// `==`
    pub fn op_equals(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        loose_equals(cx, self, other)
    }

    /// `!=`
    pub fn op_not_equals(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        Ok(!loose_equals(cx, self, other)?)
    }

    /// `===`
    pub fn op_strict_equals(&self, other: &Value<'gc>) -> bool {
        strict_equals(self, other)
    }

    /// `!==`
    pub fn op_strict_not_equals(&self, other: &Value<'gc>) -> bool {
        !strict_equals(self, other)
    }

    pub fn op_less_than(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        Ok(compare(cx, self, other, true)? == Some(true))
    }

    pub fn op_greater_than(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        Ok(compare(cx, other, self, false)? == Some(true))
    }

    pub fn op_less_than_or_equal(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        Ok(compare(cx, other, self, false)? == Some(false))
    }

    pub fn op_greater_than_or_equal(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        Ok(compare(cx, self, other, true)? == Some(false))
    }

    /// `instanceof`, through the [[HasInstance]] of callable objects.
    pub fn op_instanceof(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        let Value::Object(ctor) = other else {
            return Err(raise_type_error!(cx, "Right-hand side of 'instanceof' is not an object"));
        };
        if !ctor.is_callable() {
            return Err(raise_type_error!(cx, "Right-hand side of 'instanceof' is not callable"));
        }
        let Value::Object(instance) = self else {
            return Ok(false);
        };
        let Value::Object(prototype) = ctor.get(cx, "prototype")? else {
            return Err(raise_type_error!(cx, "Function has non-object prototype in instanceof check"));
        };
        Ok(prototype.is_prototype_of(*instance))
    }

    /// `in`; the left operand is the property name.
    pub fn op_in(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, bool> {
        let Value::Object(obj) = other else {
            return Err(raise_type_error!(cx, "Cannot use 'in' operator to search for a key in {}", other.display_string()));
        };
        let key = self.to_property_key(cx)?;
        Ok(obj.has_property(key.as_str()))
    }

    pub fn op_left_shift(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let (l, r) = (self.to_int32(cx)?, other.to_uint32(cx)?);
        Ok(Value::Number(l.wrapping_shl(r & 0x1F) as f64))
    }

    pub fn op_signed_right_shift(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let (l, r) = (self.to_int32(cx)?, other.to_uint32(cx)?);
        Ok(Value::Number((l >> (r & 0x1F)) as f64))
    }

    pub fn op_unsigned_right_shift(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let (l, r) = (self.to_uint32(cx)?, other.to_uint32(cx)?);
        Ok(Value::Number((l >> (r & 0x1F)) as f64))
    }

    /// `+`: string concatenation if either primitive is a string, numeric addition otherwise.
    pub fn op_add(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        let l = self.to_primitive(cx, None)?;
        let r = other.to_primitive(cx, None)?;
        if matches!(l, Value::String(_)) || matches!(r, Value::String(_)) {
            let mut out = l.to_js_string(cx)?;
            out.extend(r.to_js_string(cx)?);
            return Ok(Value::String(out));
        }
        Ok(Value::Number(l.to_number(cx)? + r.to_number(cx)?))
    }

    pub fn op_subtract(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        numeric(cx, self, other, |l, r| l - r)
    }

    pub fn op_multiply(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        numeric(cx, self, other, |l, r| l * r)
    }

    pub fn op_divide(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        numeric(cx, self, other, |l, r| l / r)
    }

    /// `%` keeps the sign of the dividend, like C's fmod.
    pub fn op_modulo(&self, cx: &JsContext<'gc>, other: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        numeric(cx, self, other, |l, r| l % r)
    }

    pub fn op_unary_plus(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Ok(Value::Number(self.to_number(cx)?))
    }

    pub fn op_unary_minus(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Ok(Value::Number(-self.to_number(cx)?))
    }

    /// `delete` applied to a value rather than a reference always succeeds.
    pub fn op_delete(&self) -> Value<'gc> {
        Value::Boolean(true)
    }

    /// `delete base[key]`
    pub fn op_delete_property(&self, cx: &JsContext<'gc>, key: &Value<'gc>, strict: bool) -> JsResult<'gc, bool> {
        let obj = self.to_object(cx)?;
        let key = key.to_property_key(cx)?;
        obj.delete(cx, key.as_str(), strict)
    }

    pub fn op_void(&self) -> Value<'gc> {
        Value::Undefined
    }

    pub fn op_typeof(&self) -> Value<'gc> {
        Value::from(match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(obj) if obj.is_callable() => "function",
            Value::Object(_) => "object",
        })
    }

    // Update operators need an assignable reference; a bare value never is one.

    pub fn op_prefix_increment(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Err(raise_reference_error!(cx, "Invalid left-hand side expression in prefix operation"))
    }

    pub fn op_prefix_decrement(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Err(raise_reference_error!(cx, "Invalid left-hand side expression in prefix operation"))
    }

    pub fn op_postfix_increment(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Err(raise_reference_error!(cx, "Invalid left-hand side expression in postfix operation"))
    }

    pub fn op_postfix_decrement(&self, cx: &JsContext<'gc>) -> JsResult<'gc, Value<'gc>> {
        Err(raise_reference_error!(cx, "Invalid left-hand side expression in postfix operation"))
    }

    /// `base[key]`
    pub fn op_get_property(&self, cx: &JsContext<'gc>, key: &Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        if self.is_null_or_undefined() {
            return Err(raise_type_error!(
                cx,
                "Cannot read properties of {} (reading '{}')",
                self.display_string(),
                key.display_string()
            ));
        }
        let name = key.to_property_key(cx)?;
        get_property_of(cx, self, name.as_str())
    }

    /// `base[key] = value`, throwing on failure when the realm runs in strict mode.
    pub fn op_set_property(&self, cx: &JsContext<'gc>, key: &Value<'gc>, value: Value<'gc>) -> JsResult<'gc, ()> {
        if self.is_null_or_undefined() {
            return Err(raise_type_error!(
                cx,
                "Cannot set properties of {} (setting '{}')",
                self.display_string(),
                key.display_string()
            ));
        }
        let name = key.to_property_key(cx)?;
        put_property_of(cx, self, name.as_str(), value, cx.is_strict())
    }

    pub fn op_call(&self, cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
        match self {
            Value::Object(func) => func.call(cx, this, args),
            other => Err(raise_type_error!(cx, "{} is not a function", other.display_string())),
        }
    }

    pub fn op_construct(&self, cx: &JsContext<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
        match self {
            Value::Object(ctor) => Ok(Value::Object(ctor.construct(cx, args)?)),
            other => Err(raise_type_error!(cx, "{} is not a constructor", other.display_string())),
        }
    }

    /// `throw value`
    pub fn op_throw<T>(&self) -> JsResult<'gc, T> {
        Err(EvalError::Throw(RuntimeException::new(self.clone())))
    }
}

fn numeric<'gc>(cx: &JsContext<'gc>, l: &Value<'gc>, r: &Value<'gc>, f: impl FnOnce(f64, f64) -> f64) -> JsResult<'gc, Value<'gc>> {
    let l = l.to_number(cx)?;
    let r = r.to_number(cx)?;
    Ok(Value::Number(f(l, r)))
}

/// The Abstract Equality Comparison Algorithm.
fn loose_equals<'gc>(cx: &JsContext<'gc>, x: &Value<'gc>, y: &Value<'gc>) -> JsResult<'gc, bool> {
    if x.type_of_value() == y.type_of_value() {
        return Ok(strict_equals(x, y));
    }
    match (x, y) {
        (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => Ok(true),
        (Value::Number(n), Value::String(_)) => Ok(*n == y.to_number(cx)?),
        (Value::String(_), Value::Number(n)) => Ok(x.to_number(cx)? == *n),
        (Value::Boolean(_), _) => loose_equals(cx, &Value::Number(x.to_number(cx)?), y),
        (_, Value::Boolean(_)) => loose_equals(cx, x, &Value::Number(y.to_number(cx)?)),
        (Value::Number(_) | Value::String(_), Value::Object(_)) => loose_equals(cx, x, &y.to_primitive(cx, None)?),
        (Value::Object(_), Value::Number(_) | Value::String(_)) => loose_equals(cx, &x.to_primitive(cx, None)?, y),
        _ => Ok(false),
    }
}

/// The Abstract Relational Comparison Algorithm for `x < y`. `None` stands for undefined (a NaN
/// operand). `left_first` fixes which operand is converted first, since conversion is observable.
fn compare<'gc>(cx: &JsContext<'gc>, x: &Value<'gc>, y: &Value<'gc>, left_first: bool) -> JsResult<'gc, Option<bool>> {
    let (px, py) = if left_first {
        let px = x.to_primitive(cx, Some(PreferredType::Number))?;
        (px, y.to_primitive(cx, Some(PreferredType::Number))?)
    } else {
        let py = y.to_primitive(cx, Some(PreferredType::Number))?;
        (x.to_primitive(cx, Some(PreferredType::Number))?, py)
    };
    if let (Value::String(a), Value::String(b)) = (&px, &py) {
        // code unit order; a proper prefix sorts first
        return Ok(Some(a < b));
    }
    let nx = px.to_number(cx)?;
    let ny = py.to_number(cx)?;
    if nx.is_nan() || ny.is_nan() {
        return Ok(None);
    }
    Ok(Some(nx < ny))
}

