use machete::{
    ErrorKind, EvalError, EnvironmentRecord, JSError, JSObject, JsArena, JsContext, JsResult, JsRoot, ObjectBuilder, PropertyDescriptor,
    RealmOptions, ReferenceBase, Value, new_declarative_environment, new_object_environment,
};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

fn with_context(f: impl for<'gc> FnOnce(&JsContext<'gc>)) {
    let arena = JsArena::new(|mc| JsRoot::new(mc, RealmOptions::default()));
    arena.mutate(|mc, root| f(&root.context(mc)));
}

fn expect_error<T>(result: JsResult<'_, T>, kind: ErrorKind) {
    match result {
        Ok(_) => panic!("expected {kind} but the operation succeeded"),
        Err(err) => assert_eq!(err.error_kind(), Some(kind), "unexpected error: {}", err.message()),
    }
}

fn record_of<'gc>(reference: &machete::Reference<'gc>) -> EnvironmentRecord<'gc> {
    match reference.base() {
        ReferenceBase::Environment(record) => *record,
        other => panic!("expected an environment reference, got {other:?}"),
    }
}

#[test]
fn declarative_mutable_bindings() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_declarative(cx.mc());
        assert!(!env.has_binding("x"));
        env.create_mutable_binding(cx, "x", false).unwrap();
        assert!(env.has_binding("x"));
        assert!(env.get_binding_value(cx, "x", true).unwrap().is_undefined());

        env.set_mutable_binding(cx, "x", Value::Number(5.0), true).unwrap();
        assert_eq!(env.get_binding_value(cx, "x", false).unwrap(), Value::Number(5.0));
        assert!(env.implicit_this_value().is_undefined());
        assert!(env.binding_object().is_none());
    });
}

#[test]
fn duplicate_and_missing_bindings_are_faults() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_declarative(cx.mc());
        env.create_mutable_binding(cx, "x", true).unwrap();
        let err = env.create_mutable_binding(cx, "x", true).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::DuplicateBinding { ref name }) if name == "x"));
        let err = env.create_immutable_binding(cx, "x").unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::DuplicateBinding { .. })));

        let err = env.get_binding_value(cx, "nope", false).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::BindingNotFound { .. })));
        let err = env.set_mutable_binding(cx, "nope", Value::Null, false).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::BindingNotFound { .. })));
        assert_eq!(err.thrown(), None);
        assert_eq!(err.error_kind(), None);
    });
}

#[test]
fn uninitialized_immutable_binding_reads() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_declarative(cx.mc());
        env.create_immutable_binding(cx, "k").unwrap();
        assert!(env.has_binding("k"));

        expect_error(env.get_binding_value(cx, "k", true), ErrorKind::ReferenceError);
        assert!(env.get_binding_value(cx, "k", false).unwrap().is_undefined());

        env.initialize_immutable_binding(cx, "k", Value::from("fixed")).unwrap();
        assert_eq!(env.get_binding_value(cx, "k", true).unwrap(), Value::from("fixed"));
        assert_eq!(env.get_binding_value(cx, "k", false).unwrap(), Value::from("fixed"));

        let err = env.initialize_immutable_binding(cx, "k", Value::Null).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::BindingAlreadyInitialized { .. })));
    });
}

#[test]
fn immutable_bindings_reject_assignment() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_declarative(cx.mc());
        env.create_immutable_binding(cx, "k").unwrap();
        env.initialize_immutable_binding(cx, "k", Value::Number(1.0)).unwrap();
        expect_error(env.set_mutable_binding(cx, "k", Value::Number(2.0), true), ErrorKind::TypeError);
        expect_error(env.set_mutable_binding(cx, "k", Value::Number(2.0), false), ErrorKind::TypeError);
        assert_eq!(env.get_binding_value(cx, "k", true).unwrap(), Value::Number(1.0));
        assert!(!env.delete_binding(cx, "k").unwrap());
    });
}

#[test]
fn delete_honours_the_deletable_flag() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_declarative(cx.mc());
        env.create_mutable_binding(cx, "kept", false).unwrap();
        env.create_mutable_binding(cx, "gone", true).unwrap();

        assert!(!env.delete_binding(cx, "kept").unwrap());
        assert!(env.has_binding("kept"));
        assert!(env.delete_binding(cx, "gone").unwrap());
        assert!(!env.has_binding("gone"));
        assert!(env.delete_binding(cx, "never").unwrap());

        // the name can be declared again after deletion
        env.create_mutable_binding(cx, "gone", true).unwrap();
    });
}

#[test]
fn object_records_reflect_their_binding_object() {
    with_context(|cx| {
        let proto = cx.new_object();
        proto.put(cx, "inherited", Value::Number(1.0), true).unwrap();
        let bindings = JSObject::new(cx.mc(), Some(proto), "Object");
        let env = EnvironmentRecord::new_object(cx.mc(), bindings, false);

        assert!(env.has_binding("inherited"));
        assert_eq!(env.get_binding_value(cx, "inherited", true).unwrap(), Value::Number(1.0));

        env.create_mutable_binding(cx, "local", true).unwrap();
        let desc = bindings.get_own_property("local").unwrap();
        assert_eq!(desc.value, Some(Value::Undefined));
        assert_eq!(desc.configurable, Some(true));
        let err = env.create_mutable_binding(cx, "local", true).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::DuplicateBinding { .. })));

        env.set_mutable_binding(cx, "local", Value::from("v"), true).unwrap();
        assert_eq!(bindings.get(cx, "local").unwrap(), Value::from("v"));
        bindings.put(cx, "local", Value::from("w"), true).unwrap();
        assert_eq!(env.get_binding_value(cx, "local", false).unwrap(), Value::from("w"));

        assert!(env.delete_binding(cx, "local").unwrap());
        assert!(!bindings.has_own_property("local"));
        assert!(JSObject::ptr_eq(env.binding_object().unwrap(), bindings));
    });
}

#[test]
fn object_records_treat_vanished_properties_per_strictness() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_object(cx.mc(), cx.new_object(), false);
        expect_error(env.get_binding_value(cx, "absent", true), ErrorKind::ReferenceError);
        assert!(env.get_binding_value(cx, "absent", false).unwrap().is_undefined());
    });
}

#[test]
fn object_records_provide_this_only_when_asked() {
    with_context(|cx| {
        let bindings = cx.new_object();
        let with_this = EnvironmentRecord::new_object(cx.mc(), bindings, true);
        let without = EnvironmentRecord::new_object(cx.mc(), bindings, false);
        assert_eq!(with_this.implicit_this_value(), Value::Object(bindings));
        assert!(without.implicit_this_value().is_undefined());
    });
}

#[test]
fn object_records_have_no_immutable_bindings() {
    with_context(|cx| {
        let env = EnvironmentRecord::new_object(cx.mc(), cx.new_object(), false);
        let err = env.create_immutable_binding(cx, "k").unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::UnsupportedBindingOperation { record: "object", .. })));
        let err = env.initialize_immutable_binding(cx, "k", Value::Null).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::UnsupportedBindingOperation { .. })));
        let err = env.create_global_var_binding(cx, "k", true).unwrap_err();
        assert!(matches!(err, EvalError::Js(JSError::UnsupportedBindingOperation { .. })));
    });
}

#[test]
fn global_record_sees_the_installed_globals() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        assert!(global.has_binding("undefined"));
        assert!(global.has_binding("TypeError"));
        // inherited from Object.prototype through the global object
        assert!(global.has_binding("toString"));
        assert!(global.get_binding_value(cx, "undefined", true).unwrap().is_undefined());
        assert!(global.get_binding_value(cx, "NaN", true).unwrap().as_number().unwrap().is_nan());
        assert!(JSObject::ptr_eq(global.binding_object().unwrap(), cx.global_object()));
        assert!(cx.realm().global_env().outer().is_none());

        // `undefined` is read-only
        global.set_mutable_binding(cx, "undefined", Value::Number(1.0), false).unwrap();
        assert!(global.get_binding_value(cx, "undefined", false).unwrap().is_undefined());
        expect_error(global.set_mutable_binding(cx, "undefined", Value::Number(1.0), true), ErrorKind::TypeError);
        assert!(!global.delete_binding(cx, "undefined").unwrap());
    });
}

#[test]
fn global_var_and_function_declarations() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        let object = cx.global_object();

        global.create_global_var_binding(cx, "counter", false).unwrap();
        assert!(global.has_var_declaration("counter"));
        assert!(!global.has_lexical_declaration("counter"));
        let desc = object.get_own_property("counter").unwrap();
        assert_eq!(desc.value, Some(Value::Undefined));
        assert_eq!(desc.configurable, Some(false));

        // redeclaring keeps the current value
        global.set_mutable_binding(cx, "counter", Value::Number(3.0), true).unwrap();
        global.create_global_var_binding(cx, "counter", false).unwrap();
        assert_eq!(object.get(cx, "counter").unwrap(), Value::Number(3.0));

        let func = Value::Object(cx.realm().function_prototype());
        global.create_global_function_binding(cx, "helper", func.clone(), true).unwrap();
        assert!(global.has_var_declaration("helper"));
        let desc = object.get_own_property("helper").unwrap();
        assert_eq!(desc.value, Some(func));
        assert_eq!(desc.enumerable, Some(true));
        assert_eq!(desc.configurable, Some(true));

        assert!(global.delete_binding(cx, "helper").unwrap());
        assert!(!global.has_var_declaration("helper"));
        assert!(!global.delete_binding(cx, "counter").unwrap());
        assert!(global.has_var_declaration("counter"));
    });
}

#[test]
fn global_lexical_declarations_shadow_the_global_object() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        let object = cx.global_object();
        object.put(cx, "shared", Value::Number(1.0), true).unwrap();

        global.create_mutable_binding(cx, "shared", false).unwrap();
        assert!(global.has_lexical_declaration("shared"));
        global.set_mutable_binding(cx, "shared", Value::Number(2.0), true).unwrap();
        assert_eq!(global.get_binding_value(cx, "shared", true).unwrap(), Value::Number(2.0));
        assert_eq!(object.get(cx, "shared").unwrap(), Value::Number(1.0));

        global.create_immutable_binding(cx, "limit").unwrap();
        expect_error(global.get_binding_value(cx, "limit", true), ErrorKind::ReferenceError);
        assert!(global.get_binding_value(cx, "limit", false).unwrap().is_undefined());
        global.initialize_immutable_binding(cx, "limit", Value::Number(10.0)).unwrap();
        assert_eq!(global.get_binding_value(cx, "limit", true).unwrap(), Value::Number(10.0));
        expect_error(global.set_mutable_binding(cx, "limit", Value::Number(11.0), false), ErrorKind::TypeError);
        assert!(!object.has_own_property("limit"));
    });
}

#[test]
fn global_assignment_to_a_new_name_creates_a_property() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        global.set_mutable_binding(cx, "fresh", Value::Boolean(true), false).unwrap();
        assert_eq!(cx.global_object().get(cx, "fresh").unwrap(), Value::Boolean(true));
        assert!(global.has_binding("fresh"));
    });
}

#[test]
fn identifier_resolution_walks_outward() {
    with_context(|cx| {
        let global_env = cx.realm().global_env();
        let scope_object = cx.new_object();
        ObjectBuilder::new(cx.mc(), scope_object).data("fromWith", 1.0).data("both", 2.0);
        let with_env = new_object_environment(cx.mc(), scope_object, true, Some(global_env));
        let block = new_declarative_environment(cx.mc(), Some(with_env));
        block.record().create_mutable_binding(cx, "both", false).unwrap();
        block.record().set_mutable_binding(cx, "both", Value::from("inner"), true).unwrap();

        let r = block.get_identifier_reference("both", false);
        assert!(EnvironmentRecord::ptr_eq(record_of(&r), block.record()));
        assert_eq!(r.get_value(cx).unwrap(), Value::from("inner"));
        assert!(r.this_value().is_undefined());

        let r = block.get_identifier_reference("fromWith", false);
        assert!(EnvironmentRecord::ptr_eq(record_of(&r), with_env.record()));
        assert_eq!(r.get_value(cx).unwrap(), Value::Number(1.0));
        assert_eq!(r.this_value(), Value::Object(scope_object));

        let r = block.get_identifier_reference("Infinity", true);
        assert!(EnvironmentRecord::ptr_eq(record_of(&r), global_env.record()));
        assert!(r.is_strict());
        assert_eq!(r.get_value(cx).unwrap(), Value::Number(f64::INFINITY));

        let r = block.get_identifier_reference("nowhere", false);
        assert!(r.is_unresolvable());
        assert_eq!(r.name(), "nowhere");
        assert!(!EnvironmentRecord::ptr_eq(block.record(), with_env.record()));
    });
}

#[test]
fn global_function_declarations_over_fixed_properties() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        let object = cx.global_object();
        let func = Value::Object(cx.realm().function_prototype());

        // writable but hidden: cannot become an enumerable function binding
        object
            .define_own_property(cx, "hidden", PropertyDescriptor::new_data(Value::Null, true, false, false), true)
            .unwrap();
        expect_error(global.create_global_function_binding(cx, "hidden", func.clone(), false), ErrorKind::TypeError);
        assert_eq!(object.get(cx, "hidden").unwrap(), Value::Null);

        // read-only value globals are rejected too
        expect_error(global.create_global_function_binding(cx, "undefined", func.clone(), false), ErrorKind::TypeError);
        assert!(object.get(cx, "undefined").unwrap().is_undefined());

        let getter = object.get(cx, "toString").unwrap();
        let accessor = PropertyDescriptor::new_accessor(Some(getter), None, true, false);
        object.define_own_property(cx, "computed", accessor, true).unwrap();
        expect_error(global.create_global_function_binding(cx, "computed", func.clone(), false), ErrorKind::TypeError);

        // writable and enumerable: only the value changes
        object
            .define_own_property(cx, "open", PropertyDescriptor::new_data(Value::Null, true, true, false), true)
            .unwrap();
        global.create_global_function_binding(cx, "open", func.clone(), true).unwrap();
        let desc = object.get_own_property("open").unwrap();
        assert_eq!(desc.value, Some(func.clone()));
        assert_eq!(desc.configurable, Some(false));
        assert!(global.has_var_declaration("open"));
        assert!(!global.has_var_declaration("hidden"));
    });
}

#[test]
fn global_declarations_see_inherited_names() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        let object = cx.global_object();

        // `var toString` resolves through Object.prototype and creates nothing
        global.create_global_var_binding(cx, "toString", true).unwrap();
        assert!(!object.has_own_property("toString"));
        assert!(global.has_var_declaration("toString"));

        // an inherited configurable method is shadowed by an own function binding
        let func = Value::Object(cx.realm().function_prototype());
        global.create_global_function_binding(cx, "valueOf", func.clone(), false).unwrap();
        let desc = object.get_own_property("valueOf").unwrap();
        assert_eq!(desc.value, Some(func));
        assert_eq!(desc.enumerable, Some(true));
        assert_eq!(desc.configurable, Some(false));
    });
}

#[test]
fn global_var_on_a_sealed_global_object() {
    with_context(|cx| {
        let global = cx.realm().global_env().record();
        cx.global_object().prevent_extensions(cx.mc());
        expect_error(global.create_global_var_binding(cx, "fresh", true), ErrorKind::TypeError);
        assert!(!cx.global_object().has_own_property("fresh"));
        // existing names are still fine
        global.create_global_var_binding(cx, "NaN", true).unwrap();
    });
}
