use crate::core::number::{number_to_string, to_integer};
use crate::core::{Args, JSObject, JsContext, JsResult, MutationContext, NativeMember, ObjectKind, Value, initialize_members};
use crate::unicode::utf8_to_utf16;
use crate::{raise_range_error, raise_type_error};

static NUMBER_PROTOTYPE_MEMBERS: &[NativeMember] = &[
    NativeMember::method("toString", 1, number_to_string_method),
    NativeMember::method("toLocaleString", 0, number_to_locale_string),
    NativeMember::method("valueOf", 0, number_value_of),
];

/// Number.prototype is itself a Number object whose value is +0.
pub fn create_number_prototype<'gc>(
    mc: &MutationContext<'gc>,
    object_prototype: JSObject<'gc>,
    function_prototype: JSObject<'gc>,
) -> JSObject<'gc> {
    let proto = JSObject::with_kind(mc, Some(object_prototype), "Number", ObjectKind::PrimitiveWrapper(Value::Number(0.0)));
    initialize_members(mc, proto, function_prototype, NUMBER_PROTOTYPE_MEMBERS);
    proto
}

fn number_to_string_method<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let n = this_number_value(cx, &this)?;
    let radix = match args.get(0) {
        Value::Undefined => 10.0,
        radix => to_integer(radix.to_number(cx)?),
    };
    if !(2.0..=36.0).contains(&radix) {
        return Err(raise_range_error!(cx, "toString() radix must be between 2 and 36"));
    }
    if radix == 10.0 {
        return Ok(Value::String(utf8_to_utf16(&number_to_string(n))));
    }
    Ok(Value::String(utf8_to_utf16(&number_to_radix_string(n, radix as u32))))
}

fn number_to_locale_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let n = this_number_value(cx, &this)?;
    Ok(Value::String(utf8_to_utf16(&number_to_string(n))))
}

fn number_value_of<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    Ok(Value::Number(this_number_value(cx, &this)?))
}

fn this_number_value<'gc>(cx: &JsContext<'gc>, value: &Value<'gc>) -> JsResult<'gc, f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Object(obj) => match obj.primitive_value() {
            Some(Value::Number(n)) => Ok(n),
            _ => Err(raise_type_error!(cx, "Number.prototype method called on incompatible receiver")),
        },
        _ => Err(raise_type_error!(cx, "Number.prototype method called on incompatible receiver")),
    }
}

/// Number→string in non-decimal radix (2–36), with fractional part.
fn number_to_radix_string(n: f64, radix: u32) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let negative = n < 0.0;
    let abs_n = n.abs();
    let mut integer_part = abs_n.trunc();
    let mut fractional_part = abs_n - integer_part;

    let digit_char = |d: u32| std::char::from_digit(d, radix).unwrap_or('0');

    let mut int_digits = Vec::new();
    if integer_part == 0.0 {
        int_digits.push('0');
    }
    while integer_part >= 1.0 {
        let d = (integer_part % radix as f64) as u32;
        int_digits.push(digit_char(d));
        integer_part = (integer_part / radix as f64).trunc();
    }
    int_digits.reverse();

    let mut out: String = int_digits.into_iter().collect();
    if fractional_part > 0.0 {
        out.push('.');
        // 52 digits exhaust the mantissa even in base 2
        for _ in 0..52 {
            fractional_part *= radix as f64;
            let digit = fractional_part.trunc();
            out.push(digit_char(digit as u32));
            fractional_part -= digit;
            if fractional_part < f64::EPSILON * radix as f64 {
                break;
            }
        }
    }

    if negative { format!("-{out}") } else { out }
}
