use machete::{Args, ErrorKind, JsArena, JsContext, JsResult, JsRoot, MAX_APPLY_ARGUMENTS, Value, create_native_function};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn with_context(f: impl for<'gc> FnOnce(&JsContext<'gc>)) {
    let arena = JsArena::new(|mc| JsRoot::with_defaults(mc));
    arena.mutate(|mc, root| f(&root.context(mc)));
}

/// Describes what the callee saw: "<count>:<third argument's type>:<third present>".
fn describe_arguments<'gc>(_cx: &JsContext<'gc>, _this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let third = args.get(2);
    Ok(Value::from(format!("{}:{}:{}", args.count(), third.op_typeof().display_string(), args.is_present(2))))
}

fn sum_arguments<'gc>(cx: &JsContext<'gc>, _this: Value<'gc>, args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let mut total = 0.0;
    for arg in args {
        total += arg.to_number(cx)?;
    }
    Ok(Value::Number(total))
}

#[test]
fn reading_past_the_end_yields_undefined() {
    let args = Args::new(vec![Value::from("a")]);
    assert_eq!(args.get(0), Value::from("a"));
    for index in [1, 2, 10, usize::MAX] {
        assert!(args.get(index).is_undefined());
        assert!(!args.is_present(index));
    }
    assert_eq!(args.count(), 1);
    assert_eq!(args.as_slice().len(), 1);
    assert!(!args.is_empty());
}

#[test]
fn explicit_undefined_is_present() {
    let args = Args::from([Value::Number(1.0), Value::Undefined]);
    assert!(args.is_present(1));
    assert!(args.get(1).is_undefined());
    assert!(!args.is_present(2));
    assert_eq!(args.iter().count(), 2);
}

#[test]
fn callees_see_the_arguments_they_were_given() {
    with_context(|cx| {
        let describe = create_native_function(cx.mc(), Some(cx.realm().function_prototype()), "describe", 3, Some(describe_arguments), None);
        let describe = Value::Object(describe);

        let seen = describe.op_call(cx, Value::Undefined, &Args::from([Value::Null])).unwrap();
        assert_eq!(seen, Value::from("1:undefined:false"));
        let seen = describe
            .op_call(cx, Value::Undefined, &Args::from([Value::Null, Value::Null, Value::from("x")]))
            .unwrap();
        assert_eq!(seen, Value::from("3:string:true"));

        // Function.prototype.call shifts the receiver off the front
        let call = describe.op_get_property(cx, &Value::from("call")).unwrap();
        let seen = call.op_call(cx, describe.clone(), &Args::from([Value::Null, Value::Number(1.0)])).unwrap();
        assert_eq!(seen, Value::from("1:undefined:false"));
    });
}

#[test]
fn apply_spreads_an_array_like() {
    with_context(|cx| {
        let sum = Value::Object(create_native_function(cx.mc(), Some(cx.realm().function_prototype()), "sum", 0, Some(sum_arguments), None));
        let list = cx.new_object();
        list.put(cx, "length", Value::Number(3.0), true).unwrap();
        list.put(cx, "0", Value::Number(1.0), true).unwrap();
        list.put(cx, "1", Value::from("2"), true).unwrap();
        list.put(cx, "2", Value::Boolean(true), true).unwrap();

        let apply = sum.op_get_property(cx, &Value::from("apply")).unwrap();
        let total = apply.op_call(cx, sum.clone(), &Args::from([Value::Undefined, Value::Object(list)])).unwrap();
        assert_eq!(total, Value::Number(4.0));

        let none = apply.op_call(cx, sum, &Args::from([Value::Undefined])).unwrap();
        assert_eq!(none, Value::Number(0.0));
    });
}

#[test]
fn apply_rejects_oversized_array_likes() {
    with_context(|cx| {
        let sum = Value::Object(create_native_function(cx.mc(), Some(cx.realm().function_prototype()), "sum", 0, Some(sum_arguments), None));
        let apply = sum.op_get_property(cx, &Value::from("apply")).unwrap();

        let huge = cx.new_object();
        huge.put(cx, "length", Value::Number(4294967295.0), true).unwrap();
        let err = apply.op_call(cx, sum.clone(), &Args::from([Value::Undefined, Value::Object(huge)])).unwrap_err();
        assert_eq!(err.error_kind(), Some(ErrorKind::RangeError));

        let just_over = cx.new_object();
        just_over.put(cx, "length", Value::Number(f64::from(MAX_APPLY_ARGUMENTS) + 1.0), true).unwrap();
        let err = apply.op_call(cx, sum.clone(), &Args::from([Value::Undefined, Value::Object(just_over)])).unwrap_err();
        assert_eq!(err.error_kind(), Some(ErrorKind::RangeError));

        // holes read as undefined, which sums to NaN
        let at_limit = cx.new_object();
        at_limit.put(cx, "length", Value::Number(f64::from(MAX_APPLY_ARGUMENTS)), true).unwrap();
        let total = apply.op_call(cx, sum, &Args::from([Value::Undefined, Value::Object(at_limit)])).unwrap();
        assert!(total.as_number().unwrap().is_nan());
    });
}
