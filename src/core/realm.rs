use crate::core::{
    Collect, ErrorIntrinsics, ErrorKind, JSObject, LexicalEnvironment, MutationContext, ObjectBuilder, Value, initialize_error_intrinsics,
    new_global_environment,
};
use crate::{js_boolean, js_function, js_number, js_object, js_string};

/// Knobs for realm creation.
#[derive(Clone, Debug, PartialEq, Eq, Collect)]
#[collect(require_static)]
pub struct RealmOptions {
    /// Evaluation mode reported by `JsContext::is_strict`.
    pub strict: bool,
    /// Install `undefined`, `NaN`, `Infinity`, `globalThis` and the error constructors on the
    /// global object.
    pub install_globals: bool,
}

impl Default for RealmOptions {
    fn default() -> Self {
        RealmOptions {
            strict: false,
            install_globals: true,
        }
    }
}

impl RealmOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn install_globals(mut self, install: bool) -> Self {
        self.install_globals = install;
        self
    }

    /// Defaults overridden by `MACHETE_STRICT` and `MACHETE_BARE_GLOBAL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = RealmOptions::default();
        if let Some(strict) = lookup("MACHETE_STRICT").and_then(|raw| parse_flag("MACHETE_STRICT", &raw)) {
            options.strict = strict;
        }
        if let Some(bare) = lookup("MACHETE_BARE_GLOBAL").and_then(|raw| parse_flag("MACHETE_BARE_GLOBAL", &raw)) {
            options.install_globals = !bare;
        }
        options
    }
}

fn parse_flag(name: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            log::warn!("ignoring {name}={other}: expected a boolean");
            None
        }
    }
}

/// The intrinsic objects and global scope that every operation in one arena shares.
#[derive(Collect)]
#[collect(no_drop)]
pub struct Realm<'gc> {
    object_prototype: JSObject<'gc>,
    function_prototype: JSObject<'gc>,
    boolean_prototype: JSObject<'gc>,
    number_prototype: JSObject<'gc>,
    string_prototype: JSObject<'gc>,
    errors: ErrorIntrinsics<'gc>,
    global_object: JSObject<'gc>,
    global_env: LexicalEnvironment<'gc>,
    options: RealmOptions,
}

impl<'gc> Realm<'gc> {
    pub fn new(mc: &MutationContext<'gc>, options: RealmOptions) -> Self {
        log::debug!("bootstrapping realm with {options:?}");
        let object_prototype = JSObject::new(mc, None, "Object");
        let function_prototype = js_function::create_function_prototype(mc, object_prototype);
        js_object::initialize_object_prototype(mc, object_prototype, function_prototype);
        js_function::initialize_function_prototype(mc, function_prototype);

        let boolean_prototype = js_boolean::create_boolean_prototype(mc, object_prototype, function_prototype);
        let number_prototype = js_number::create_number_prototype(mc, object_prototype, function_prototype);
        let string_prototype = js_string::create_string_prototype(mc, object_prototype, function_prototype);
        let errors = initialize_error_intrinsics(mc, object_prototype, function_prototype);

        let global_object = JSObject::new(mc, Some(object_prototype), "global");
        if options.install_globals {
            let mut builder = ObjectBuilder::new(mc, global_object)
                .set_attributes(false, false, false)
                .data("undefined", Value::Undefined)
                .data("NaN", f64::NAN)
                .data("Infinity", f64::INFINITY)
                .set_attributes(true, false, true)
                .data("globalThis", global_object);
            for kind in ErrorKind::ALL {
                builder = builder.data(kind.name(), errors.constructor(kind));
            }
            builder.build();
        }
        let global_env = new_global_environment(mc, global_object);

        Realm {
            object_prototype,
            function_prototype,
            boolean_prototype,
            number_prototype,
            string_prototype,
            errors,
            global_object,
            global_env,
            options,
        }
    }

    pub fn object_prototype(&self) -> JSObject<'gc> {
        self.object_prototype
    }

    pub fn function_prototype(&self) -> JSObject<'gc> {
        self.function_prototype
    }

    pub fn boolean_prototype(&self) -> JSObject<'gc> {
        self.boolean_prototype
    }

    pub fn number_prototype(&self) -> JSObject<'gc> {
        self.number_prototype
    }

    pub fn string_prototype(&self) -> JSObject<'gc> {
        self.string_prototype
    }

    pub fn errors(&self) -> &ErrorIntrinsics<'gc> {
        &self.errors
    }

    pub fn error_prototype(&self, kind: ErrorKind) -> JSObject<'gc> {
        self.errors.prototype(kind)
    }

    pub fn error_constructor(&self, kind: ErrorKind) -> JSObject<'gc> {
        self.errors.constructor(kind)
    }

    pub fn global_object(&self) -> JSObject<'gc> {
        self.global_object
    }

    pub fn global_env(&self) -> LexicalEnvironment<'gc> {
        self.global_env
    }

    pub fn options(&self) -> &RealmOptions {
        &self.options
    }
}
