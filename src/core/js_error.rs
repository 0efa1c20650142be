use crate::core::{
    Args, Collect, JSObject, JsContext, MutationContext, NativeMember, ObjectBuilder, ObjectKind, Property, Value, initialize_members,
};
use crate::{JSError, raise_type_error};

/// The native error types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    URIError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Error,
        ErrorKind::EvalError,
        ErrorKind::RangeError,
        ErrorKind::ReferenceError,
        ErrorKind::SyntaxError,
        ErrorKind::TypeError,
        ErrorKind::URIError,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::URIError => "URIError",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value travelling through the language `throw` channel. Any value may be thrown.
#[derive(Clone, Debug)]
pub struct RuntimeException<'gc> {
    thrown: Value<'gc>,
}

impl<'gc> RuntimeException<'gc> {
    pub fn new(thrown: Value<'gc>) -> Self {
        RuntimeException { thrown }
    }

    pub fn value(&self) -> &Value<'gc> {
        &self.thrown
    }

    pub fn into_value(self) -> Value<'gc> {
        self.thrown
    }

    /// The thrown value converted with ToString; may run the value's `toString`/`valueOf`.
    pub fn message(&self, cx: &JsContext<'gc>) -> JsResult<'gc, String> {
        self.thrown.to_rust_string(cx)
    }
}

impl std::fmt::Display for RuntimeException<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.thrown.display_string())
    }
}

#[derive(Debug)]
pub enum EvalError<'gc> {
    Js(JSError),
    Throw(RuntimeException<'gc>),
}

pub type JsResult<'gc, T> = Result<T, EvalError<'gc>>;

impl<'gc> From<JSError> for EvalError<'gc> {
    fn from(e: JSError) -> Self {
        EvalError::Js(e)
    }
}

impl<'gc> From<RuntimeException<'gc>> for EvalError<'gc> {
    fn from(e: RuntimeException<'gc>) -> Self {
        EvalError::Throw(e)
    }
}

impl<'gc> From<EvalError<'gc>> for JSError {
    fn from(e: EvalError<'gc>) -> Self {
        match e {
            EvalError::Js(j) => j,
            EvalError::Throw(ex) => JSError::Uncaught { message: ex.to_string() },
        }
    }
}

impl<'gc> EvalError<'gc> {
    pub fn message(&self) -> String {
        match self {
            EvalError::Js(e) => e.message(),
            EvalError::Throw(ex) => ex.to_string(),
        }
    }

    pub fn thrown(&self) -> Option<&Value<'gc>> {
        match self {
            EvalError::Throw(ex) => Some(ex.value()),
            EvalError::Js(_) => None,
        }
    }

    /// Kind of the thrown error object, if a native error object was thrown.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.thrown()? {
            Value::Object(obj) => obj.error_kind(),
            _ => None,
        }
    }
}

/// Prototypes and constructors of the native errors, indexed by `ErrorKind`.
#[derive(Collect)]
#[collect(no_drop)]
pub struct ErrorIntrinsics<'gc> {
    prototypes: Vec<JSObject<'gc>>,
    constructors: Vec<JSObject<'gc>>,
}

impl<'gc> ErrorIntrinsics<'gc> {
    pub fn prototype(&self, kind: ErrorKind) -> JSObject<'gc> {
        self.prototypes[kind.index()]
    }

    pub fn constructor(&self, kind: ErrorKind) -> JSObject<'gc> {
        self.constructors[kind.index()]
    }
}

static ERROR_PROTOTYPE_MEMBERS: &[NativeMember] = &[NativeMember::method("toString", 0, error_to_string)];

/// Build Error.prototype, the native error prototypes inheriting from it, and their constructors.
pub fn initialize_error_intrinsics<'gc>(
    mc: &MutationContext<'gc>,
    object_prototype: JSObject<'gc>,
    function_prototype: JSObject<'gc>,
) -> ErrorIntrinsics<'gc> {
    let base = JSObject::new(mc, Some(object_prototype), "Error");
    initialize_members(mc, base, function_prototype, ERROR_PROTOTYPE_MEMBERS);

    let mut prototypes = Vec::with_capacity(ErrorKind::ALL.len());
    let mut constructors = Vec::with_capacity(ErrorKind::ALL.len());
    for kind in ErrorKind::ALL {
        let proto = match kind {
            ErrorKind::Error => base,
            _ => JSObject::new(mc, Some(base), "Error"),
        };
        let ctor = JSObject::with_kind(mc, Some(function_prototype), "Function", ObjectKind::ErrorConstructor(kind));
        ObjectBuilder::new(mc, ctor)
            .set_attributes(false, false, false)
            .data("length", 1.0)
            .data("prototype", proto)
            .set_attributes(false, false, true)
            .data("name", kind.name())
            .build();
        ObjectBuilder::new(mc, proto)
            .set_attributes(true, false, true)
            .data("constructor", ctor)
            .data("name", kind.name())
            .data("message", "")
            .build();
        prototypes.push(proto);
        constructors.push(ctor);
    }
    log::debug!("initialized {} native error constructors", constructors.len());
    ErrorIntrinsics { prototypes, constructors }
}

/// Shared [[Construct]] of every native error constructor.
pub fn construct_error<'gc>(cx: &JsContext<'gc>, kind: ErrorKind, args: &Args<'gc>) -> JsResult<'gc, JSObject<'gc>> {
    let message = match args.get(0) {
        Value::Undefined => Vec::new(),
        other => other.to_js_string(cx)?,
    };
    Ok(new_error_object(cx, kind, Value::String(message)))
}

/// Error object of `kind` carrying `message`, as raised by the core itself.
pub fn create_error<'gc>(cx: &JsContext<'gc>, kind: ErrorKind, message: &str) -> JSObject<'gc> {
    new_error_object(cx, kind, Value::from(message))
}

fn new_error_object<'gc>(cx: &JsContext<'gc>, kind: ErrorKind, message: Value<'gc>) -> JSObject<'gc> {
    let proto = cx.realm().errors().prototype(kind);
    let obj = JSObject::with_kind(cx.mc(), Some(proto), "Error", ObjectKind::Error(kind));
    obj.insert_property(cx.mc(), "message", Property::data(message, true, false, true));
    obj
}

/// Error.prototype.toString
fn error_to_string<'gc>(cx: &JsContext<'gc>, this: Value<'gc>, _args: &Args<'gc>) -> JsResult<'gc, Value<'gc>> {
    let Value::Object(obj) = this else {
        return Err(raise_type_error!(cx, "Error.prototype.toString called on non-object"));
    };
    let name = match obj.get(cx, "name")? {
        Value::Undefined => crate::unicode::utf8_to_utf16("Error"),
        other => other.to_js_string(cx)?,
    };
    let message = match obj.get(cx, "message")? {
        Value::Undefined => Vec::new(),
        other => other.to_js_string(cx)?,
    };
    if name.is_empty() {
        return Ok(Value::String(message));
    }
    if message.is_empty() {
        return Ok(Value::String(name));
    }
    let mut out = name;
    out.extend(crate::unicode::utf8_to_utf16(": "));
    out.extend(message);
    Ok(Value::String(out))
}
