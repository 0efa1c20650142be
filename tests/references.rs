use machete::{
    ErrorKind, JsArena, JsContext, JsResult, JsRoot, PropertyDescriptor, RealmOptions, Reference, Value, new_declarative_environment,
};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn with_realm(options: RealmOptions, f: impl for<'gc> FnOnce(&JsContext<'gc>)) {
    let arena = JsArena::new(|mc| JsRoot::new(mc, options));
    arena.mutate(|mc, root| f(&root.context(mc)));
}

fn with_context(f: impl for<'gc> FnOnce(&JsContext<'gc>)) {
    with_realm(RealmOptions::default(), f)
}

fn expect_error<T>(result: JsResult<'_, T>, kind: ErrorKind) {
    match result {
        Ok(_) => panic!("expected {kind} but the operation succeeded"),
        Err(err) => assert_eq!(err.error_kind(), Some(kind), "unexpected error: {}", err.message()),
    }
}

#[test]
fn unresolvable_references() {
    with_context(|cx| {
        let sloppy = Reference::unresolvable("ghost", false);
        let strict = Reference::unresolvable("ghost", true);

        expect_error(sloppy.get_value(cx), ErrorKind::ReferenceError);
        assert_eq!(sloppy.type_of(cx).unwrap(), Value::from("undefined"));
        assert!(sloppy.delete(cx).unwrap());
        assert!(sloppy.this_value().is_undefined());
        assert!(!sloppy.is_property_reference());

        expect_error(strict.put_value(cx, Value::Number(1.0)), ErrorKind::ReferenceError);
        assert!(!cx.global_object().has_own_property("ghost"));
        expect_error(strict.delete(cx), ErrorKind::SyntaxError);

        // sloppy assignment lands on the global object
        sloppy.put_value(cx, Value::Number(1.0)).unwrap();
        assert_eq!(cx.global_object().get(cx, "ghost").unwrap(), Value::Number(1.0));
    });
}

#[test]
fn environment_references_read_write_and_update() {
    with_context(|cx| {
        let scope = new_declarative_environment(cx.mc(), Some(cx.realm().global_env()));
        scope.record().create_mutable_binding(cx, "i", true).unwrap();
        let r = scope.get_identifier_reference("i", false);
        r.put_value(cx, Value::Number(1.0)).unwrap();

        assert_eq!(r.prefix_increment(cx).unwrap(), Value::Number(2.0));
        assert_eq!(r.postfix_increment(cx).unwrap(), Value::Number(2.0));
        assert_eq!(r.get_value(cx).unwrap(), Value::Number(3.0));
        assert_eq!(r.postfix_decrement(cx).unwrap(), Value::Number(3.0));
        assert_eq!(r.prefix_decrement(cx).unwrap(), Value::Number(1.0));
        assert_eq!(r.type_of(cx).unwrap(), Value::from("number"));

        r.put_value(cx, Value::from("x")).unwrap();
        assert!(r.postfix_increment(cx).unwrap().as_number().unwrap().is_nan());

        assert!(r.delete(cx).unwrap());
        assert!(!scope.record().has_binding("i"));
    });
}

#[test]
fn strict_delete_of_an_identifier_is_a_syntax_error() {
    with_context(|cx| {
        let scope = new_declarative_environment(cx.mc(), None);
        scope.record().create_mutable_binding(cx, "v", true).unwrap();
        expect_error(scope.get_identifier_reference("v", true).delete(cx), ErrorKind::SyntaxError);
        assert!(scope.record().has_binding("v"));
    });
}

#[test]
fn update_of_an_unresolvable_name_fails() {
    with_context(|cx| {
        expect_error(Reference::unresolvable("missing", false).prefix_increment(cx), ErrorKind::ReferenceError);
        expect_error(Reference::unresolvable("missing", true).postfix_decrement(cx), ErrorKind::ReferenceError);
    });
}

#[test]
fn property_references_on_objects() {
    with_context(|cx| {
        let obj = cx.new_object();
        let r = Reference::property(Value::Object(obj), "count", false);
        assert!(r.is_property_reference());
        assert!(!r.has_primitive_base());
        assert_eq!(r.this_value(), Value::Object(obj));

        assert!(r.get_value(cx).unwrap().is_undefined());
        r.put_value(cx, Value::Number(41.0)).unwrap();
        assert_eq!(r.prefix_increment(cx).unwrap(), Value::Number(42.0));
        assert_eq!(obj.get(cx, "count").unwrap(), Value::Number(42.0));
        assert_eq!(r.type_of(cx).unwrap(), Value::from("number"));

        assert!(r.delete(cx).unwrap());
        assert!(!obj.has_own_property("count"));

        obj.define_own_property(cx, "fixed", PropertyDescriptor::new_data(Value::Null, false, false, false), true).unwrap();
        assert!(!Reference::property(Value::Object(obj), "fixed", false).delete(cx).unwrap());
        expect_error(Reference::property(Value::Object(obj), "fixed", true).delete(cx), ErrorKind::TypeError);
        expect_error(Reference::property(Value::Object(obj), "fixed", true).put_value(cx, Value::Null), ErrorKind::TypeError);
    });
}

#[test]
fn property_references_on_primitives() {
    with_context(|cx| {
        let sloppy = Reference::property(Value::from("abc"), "length", false);
        assert!(sloppy.has_primitive_base());
        assert_eq!(sloppy.get_value(cx).unwrap(), Value::Number(3.0));
        assert_eq!(sloppy.this_value(), Value::from("abc"));
        sloppy.put_value(cx, Value::Number(0.0)).unwrap();
        assert_eq!(sloppy.get_value(cx).unwrap(), Value::Number(3.0));

        let strict = Reference::property(Value::from("abc"), "length", true);
        expect_error(strict.put_value(cx, Value::Number(0.0)), ErrorKind::TypeError);
        let strict_new = Reference::property(Value::Number(1.0), "tag", true);
        expect_error(strict_new.put_value(cx, Value::Null), ErrorKind::TypeError);
        let sloppy_new = Reference::property(Value::Boolean(true), "tag", false);
        sloppy_new.put_value(cx, Value::Null).unwrap();
        assert!(sloppy_new.get_value(cx).unwrap().is_undefined());

        let method = Reference::property(Value::Number(2.5), "toString", false);
        assert_eq!(method.type_of(cx).unwrap(), Value::from("function"));
        assert!(Reference::property(Value::Number(2.5), "nothing", false).get_value(cx).unwrap().is_undefined());
    });
}

#[test]
fn primitive_base_getters_receive_the_primitive() {
    with_context(|cx| {
        // Object.prototype.valueOf boxes its receiver, so a getter built from it observes `this`
        let value_of = cx.realm().object_prototype().get(cx, "valueOf").unwrap();
        let desc = PropertyDescriptor::new_accessor(Some(value_of), None, false, true);
        cx.realm()
            .number_prototype()
            .define_own_property(cx, "boxed", desc, true)
            .unwrap();

        let boxed = Reference::property(Value::Number(7.0), "boxed", false).get_value(cx).unwrap();
        let boxed = boxed.as_object().unwrap();
        assert_eq!(boxed.class(), "Number");
        assert_eq!(boxed.primitive_value(), Some(Value::Number(7.0)));
    });
}

#[test]
fn strict_realm_flag_reaches_the_operator_surface() {
    with_realm(RealmOptions::default().strict(true), |cx| {
        assert!(cx.is_strict());
        assert!(cx.realm().options().strict);
        let obj = cx.new_object();
        obj.define_own_property(cx, "ro", PropertyDescriptor::new_data(Value::Null, false, true, true), true).unwrap();
        expect_error(Value::Object(obj).op_set_property(cx, &Value::from("ro"), Value::Null), ErrorKind::TypeError);
    });
}
