use crate::core::{Collect, Gc, GcPtr, JSObject, JsContext, JsResult, MutationContext, PropertyDescriptor, Reference, Value, new_gc_cell_ptr};
use crate::{JSError, raise_reference_error, raise_type_error};
use std::collections::HashMap;

/// Storage cell for one identifier.
#[derive(Clone, Debug, Collect)]
#[collect(no_drop)]
pub struct Binding<'gc> {
    pub value: Value<'gc>,
    pub deletable: bool,
    pub immutable: bool,
    pub initialized: bool,
}

/// Bindings held in native storage.
#[derive(Default, Collect)]
#[collect(no_drop)]
pub struct DeclarativeEnvironment<'gc> {
    bindings: HashMap<String, Binding<'gc>>,
}

/// Result of writing a declarative binding, before any language error is raised.
enum SetOutcome {
    Written,
    Immutable,
}

impl<'gc> DeclarativeEnvironment<'gc> {
    fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn create_binding(&mut self, name: &str, binding: Binding<'gc>) -> Result<(), JSError> {
        if self.bindings.contains_key(name) {
            return Err(JSError::DuplicateBinding { name: name.to_string() });
        }
        log::debug!("create binding '{name}' (immutable: {})", binding.immutable);
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }

    fn create_mutable_binding(&mut self, name: &str, deletable: bool) -> Result<(), JSError> {
        self.create_binding(
            name,
            Binding {
                value: Value::Undefined,
                deletable,
                immutable: false,
                initialized: true,
            },
        )
    }

    fn create_immutable_binding(&mut self, name: &str) -> Result<(), JSError> {
        self.create_binding(
            name,
            Binding {
                value: Value::Undefined,
                deletable: false,
                immutable: true,
                initialized: false,
            },
        )
    }

    fn initialize_immutable_binding(&mut self, name: &str, value: Value<'gc>) -> Result<(), JSError> {
        let binding = self.bindings.get_mut(name).ok_or_else(|| JSError::BindingNotFound { name: name.to_string() })?;
        if binding.initialized {
            return Err(JSError::BindingAlreadyInitialized { name: name.to_string() });
        }
        binding.value = value;
        binding.initialized = true;
        Ok(())
    }

    fn set_mutable_binding(&mut self, name: &str, value: Value<'gc>) -> Result<SetOutcome, JSError> {
        let binding = self.bindings.get_mut(name).ok_or_else(|| JSError::BindingNotFound { name: name.to_string() })?;
        if binding.immutable {
            return Ok(SetOutcome::Immutable);
        }
        binding.value = value;
        binding.initialized = true;
        Ok(SetOutcome::Written)
    }

    /// `None` while the binding is uninitialized.
    fn get_binding_value(&self, name: &str) -> Result<Option<Value<'gc>>, JSError> {
        let binding = self.bindings.get(name).ok_or_else(|| JSError::BindingNotFound { name: name.to_string() })?;
        Ok(binding.initialized.then(|| binding.value.clone()))
    }

    fn delete_binding(&mut self, name: &str) -> bool {
        match self.bindings.get(name) {
            None => true,
            Some(binding) if !binding.deletable => false,
            Some(_) => {
                log::debug!("delete binding '{name}'");
                self.bindings.remove(name);
                true
            }
        }
    }
}

/// Bindings that are the properties of an object, as created by `with` and the global scope.
#[derive(Collect)]
#[collect(no_drop)]
pub struct ObjectEnvironment<'gc> {
    bindings: JSObject<'gc>,
    provide_this: bool,
}

/// The global scope: an object part over the global object plus a declarative part for lexical
/// declarations, which shadows it.
#[derive(Collect)]
#[collect(no_drop)]
pub struct GlobalEnvironment<'gc> {
    object: JSObject<'gc>,
    declarative: DeclarativeEnvironment<'gc>,
    var_names: Vec<String>,
}

#[derive(Clone, Copy, Collect)]
#[collect(no_drop)]
pub enum EnvironmentRecord<'gc> {
    Declarative(GcPtr<'gc, DeclarativeEnvironment<'gc>>),
    Object(Gc<'gc, ObjectEnvironment<'gc>>),
    Global(GcPtr<'gc, GlobalEnvironment<'gc>>),
}

impl<'gc> EnvironmentRecord<'gc> {
    pub fn new_declarative(mc: &MutationContext<'gc>) -> Self {
        EnvironmentRecord::Declarative(new_gc_cell_ptr(mc, DeclarativeEnvironment::default()))
    }

    pub fn new_object(mc: &MutationContext<'gc>, bindings: JSObject<'gc>, provide_this: bool) -> Self {
        EnvironmentRecord::Object(Gc::new(mc, ObjectEnvironment { bindings, provide_this }))
    }

    pub fn new_global(mc: &MutationContext<'gc>, global_object: JSObject<'gc>) -> Self {
        EnvironmentRecord::Global(new_gc_cell_ptr(
            mc,
            GlobalEnvironment {
                object: global_object,
                declarative: DeclarativeEnvironment::default(),
                var_names: Vec::new(),
            },
        ))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            EnvironmentRecord::Declarative(_) => "declarative",
            EnvironmentRecord::Object(_) => "object",
            EnvironmentRecord::Global(_) => "global",
        }
    }

    pub fn ptr_eq(a: Self, b: Self) -> bool {
        match (a, b) {
            (EnvironmentRecord::Declarative(x), EnvironmentRecord::Declarative(y)) => Gc::ptr_eq(x, y),
            (EnvironmentRecord::Object(x), EnvironmentRecord::Object(y)) => Gc::ptr_eq(x, y),
            (EnvironmentRecord::Global(x), EnvironmentRecord::Global(y)) => Gc::ptr_eq(x, y),
            _ => false,
        }
    }

    /// The object whose properties back this record, for object and global records.
    pub fn binding_object(&self) -> Option<JSObject<'gc>> {
        match self {
            EnvironmentRecord::Declarative(_) => None,
            EnvironmentRecord::Object(env) => Some(env.bindings),
            EnvironmentRecord::Global(env) => Some(env.borrow().object),
        }
    }

    pub fn has_binding(&self, name: &str) -> bool {
        match self {
            EnvironmentRecord::Declarative(env) => env.borrow().has_binding(name),
            EnvironmentRecord::Object(env) => env.bindings.has_property(name),
            EnvironmentRecord::Global(env) => {
                let env = env.borrow();
                env.declarative.has_binding(name) || env.object.has_property(name)
            }
        }
    }

    pub fn create_mutable_binding(&self, cx: &JsContext<'gc>, name: &str, deletable: bool) -> JsResult<'gc, ()> {
        match self {
            EnvironmentRecord::Declarative(env) => Ok(env.borrow_mut(cx.mc()).create_mutable_binding(name, deletable)?),
            EnvironmentRecord::Object(env) => create_object_binding(cx, env.bindings, name, deletable),
            EnvironmentRecord::Global(env) => Ok(env.borrow_mut(cx.mc()).declarative.create_mutable_binding(name, deletable)?),
        }
    }

    pub fn create_immutable_binding(&self, cx: &JsContext<'gc>, name: &str) -> JsResult<'gc, ()> {
        match self {
            EnvironmentRecord::Declarative(env) => Ok(env.borrow_mut(cx.mc()).create_immutable_binding(name)?),
            EnvironmentRecord::Global(env) => Ok(env.borrow_mut(cx.mc()).declarative.create_immutable_binding(name)?),
            EnvironmentRecord::Object(_) => Err(self.unsupported("CreateImmutableBinding").into()),
        }
    }

    pub fn initialize_immutable_binding(&self, cx: &JsContext<'gc>, name: &str, value: Value<'gc>) -> JsResult<'gc, ()> {
        match self {
            EnvironmentRecord::Declarative(env) => Ok(env.borrow_mut(cx.mc()).initialize_immutable_binding(name, value)?),
            EnvironmentRecord::Global(env) => Ok(env.borrow_mut(cx.mc()).declarative.initialize_immutable_binding(name, value)?),
            EnvironmentRecord::Object(_) => Err(self.unsupported("InitializeImmutableBinding").into()),
        }
    }

    pub fn set_mutable_binding(&self, cx: &JsContext<'gc>, name: &str, value: Value<'gc>, strict: bool) -> JsResult<'gc, ()> {
        let outcome = match self {
            EnvironmentRecord::Declarative(env) => env.borrow_mut(cx.mc()).set_mutable_binding(name, value)?,
            EnvironmentRecord::Object(env) => return env.bindings.put(cx, name, value, strict),
            EnvironmentRecord::Global(env) => {
                let object = {
                    let mut env = env.borrow_mut(cx.mc());
                    if env.declarative.has_binding(name) {
                        Err(env.declarative.set_mutable_binding(name, value)?)
                    } else {
                        Ok((env.object, value))
                    }
                };
                match object {
                    Ok((object, value)) => return object.put(cx, name, value, strict),
                    Err(outcome) => outcome,
                }
            }
        };
        match outcome {
            SetOutcome::Written => Ok(()),
            SetOutcome::Immutable => Err(raise_type_error!(cx, "Assignment to constant variable '{name}'")),
        }
    }

    pub fn get_binding_value(&self, cx: &JsContext<'gc>, name: &str, strict: bool) -> JsResult<'gc, Value<'gc>> {
        let stored = match self {
            EnvironmentRecord::Declarative(env) => env.borrow().get_binding_value(name)?,
            EnvironmentRecord::Object(env) => return get_object_binding(cx, env.bindings, name, strict),
            EnvironmentRecord::Global(env) => {
                let object = {
                    let env = env.borrow();
                    if env.declarative.has_binding(name) {
                        Err(env.declarative.get_binding_value(name)?)
                    } else {
                        Ok(env.object)
                    }
                };
                match object {
                    Ok(object) => return get_object_binding(cx, object, name, strict),
                    Err(stored) => stored,
                }
            }
        };
        match stored {
            Some(value) => Ok(value),
            None if strict => Err(raise_reference_error!(cx, "Cannot access '{name}' before initialization")),
            None => Ok(Value::Undefined),
        }
    }

    pub fn delete_binding(&self, cx: &JsContext<'gc>, name: &str) -> JsResult<'gc, bool> {
        match self {
            EnvironmentRecord::Declarative(env) => Ok(env.borrow_mut(cx.mc()).delete_binding(name)),
            EnvironmentRecord::Object(env) => env.bindings.delete(cx, name, false),
            EnvironmentRecord::Global(env) => {
                let object = {
                    let mut env = env.borrow_mut(cx.mc());
                    if env.declarative.has_binding(name) {
                        return Ok(env.declarative.delete_binding(name));
                    }
                    env.object
                };
                if !object.has_own_property(name) {
                    return Ok(true);
                }
                let deleted = object.delete(cx, name, false)?;
                if deleted {
                    env.borrow_mut(cx.mc()).var_names.retain(|n| n != name);
                }
                Ok(deleted)
            }
        }
    }

    pub fn implicit_this_value(&self) -> Value<'gc> {
        match self {
            EnvironmentRecord::Object(env) if env.provide_this => Value::Object(env.bindings),
            _ => Value::Undefined,
        }
    }

    pub fn has_lexical_declaration(&self, name: &str) -> bool {
        match self {
            EnvironmentRecord::Global(env) => env.borrow().declarative.has_binding(name),
            _ => false,
        }
    }

    pub fn has_var_declaration(&self, name: &str) -> bool {
        match self {
            EnvironmentRecord::Global(env) => env.borrow().var_names.iter().any(|n| n == name),
            _ => false,
        }
    }

    /// Declare a `var` on the global object unless the name already resolves there, inherited
    /// properties included. A non-extensible global object rejects a new name with a TypeError.
    pub fn create_global_var_binding(&self, cx: &JsContext<'gc>, name: &str, deletable: bool) -> JsResult<'gc, ()> {
        let EnvironmentRecord::Global(env) = self else {
            return Err(self.unsupported("CreateGlobalVarBinding").into());
        };
        let object = env.borrow().object;
        if !object.has_property(name) {
            create_object_binding(cx, object, name, deletable)?;
        }
        remember_var_name(cx, *env, name);
        Ok(())
    }

    /// Declare a function on the global object (ES5 10.5 step 5). A configurable property, own or
    /// inherited, is replaced by a fresh data property; a non-configurable one must be a writable,
    /// enumerable data property and only has its value written.
    pub fn create_global_function_binding(&self, cx: &JsContext<'gc>, name: &str, value: Value<'gc>, deletable: bool) -> JsResult<'gc, ()> {
        let EnvironmentRecord::Global(env) = self else {
            return Err(self.unsupported("CreateGlobalFunctionBinding").into());
        };
        let object = env.borrow().object;
        match object.get_property(name) {
            None => {
                object.define_own_property(cx, name, PropertyDescriptor::new_data(value, true, true, deletable), true)?;
            }
            Some(existing) if existing.configurable == Some(true) => {
                object.define_own_property(cx, name, PropertyDescriptor::new_data(value, true, true, deletable), true)?;
            }
            Some(existing) if existing.is_accessor_descriptor() || existing.writable != Some(true) || existing.enumerable != Some(true) => {
                return Err(raise_type_error!(cx, "Cannot redeclare global function {name}"));
            }
            Some(_) => object.put(cx, name, value, true)?,
        }
        remember_var_name(cx, *env, name);
        Ok(())
    }

    fn unsupported(&self, operation: &'static str) -> JSError {
        JSError::UnsupportedBindingOperation {
            operation,
            record: self.kind_name(),
        }
    }
}

fn create_object_binding<'gc>(cx: &JsContext<'gc>, object: JSObject<'gc>, name: &str, deletable: bool) -> JsResult<'gc, ()> {
    if object.has_own_property(name) {
        return Err(JSError::DuplicateBinding { name: name.to_string() }.into());
    }
    log::debug!("create object binding '{name}' on {object:?}");
    object.define_own_property(cx, name, PropertyDescriptor::new_data(Value::Undefined, true, true, deletable), true)?;
    Ok(())
}

fn get_object_binding<'gc>(cx: &JsContext<'gc>, object: JSObject<'gc>, name: &str, strict: bool) -> JsResult<'gc, Value<'gc>> {
    if !object.has_property(name) {
        if strict {
            return Err(raise_reference_error!(cx, "{name} is not defined"));
        }
        return Ok(Value::Undefined);
    }
    object.get(cx, name)
}

fn remember_var_name<'gc>(cx: &JsContext<'gc>, env: GcPtr<'gc, GlobalEnvironment<'gc>>, name: &str) {
    let mut env = env.borrow_mut(cx.mc());
    if !env.var_names.iter().any(|n| n == name) {
        env.var_names.push(name.to_string());
    }
}

impl std::fmt::Debug for EnvironmentRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentRecord::Declarative(env) => {
                let count = env.try_borrow().map(|e| e.bindings.len()).unwrap_or_default();
                write!(f, "DeclarativeEnvironment({count} bindings)")
            }
            EnvironmentRecord::Object(env) => write!(f, "ObjectEnvironment({:?})", env.bindings),
            EnvironmentRecord::Global(_) => write!(f, "GlobalEnvironment"),
        }
    }
}

#[derive(Collect)]
#[collect(no_drop)]
struct LexicalEnvironmentData<'gc> {
    record: EnvironmentRecord<'gc>,
    outer: Option<LexicalEnvironment<'gc>>,
}

/// One level of the scope chain: an environment record plus the enclosing environment.
#[derive(Clone, Copy, Collect)]
#[collect(no_drop)]
pub struct LexicalEnvironment<'gc>(Gc<'gc, LexicalEnvironmentData<'gc>>);

impl<'gc> LexicalEnvironment<'gc> {
    pub fn new(mc: &MutationContext<'gc>, record: EnvironmentRecord<'gc>, outer: Option<LexicalEnvironment<'gc>>) -> Self {
        LexicalEnvironment(Gc::new(mc, LexicalEnvironmentData { record, outer }))
    }

    pub fn record(&self) -> EnvironmentRecord<'gc> {
        self.0.record
    }

    pub fn outer(&self) -> Option<LexicalEnvironment<'gc>> {
        self.0.outer
    }

    /// GetIdentifierReference: the first record on the chain that binds `name`, else unresolvable.
    pub fn get_identifier_reference(&self, name: &str, strict: bool) -> Reference<'gc> {
        let mut current = Some(*self);
        while let Some(env) = current {
            let record = env.record();
            if record.has_binding(name) {
                return Reference::environment(record, name, strict);
            }
            current = env.outer();
        }
        log::trace!("identifier '{name}' is unresolvable");
        Reference::unresolvable(name, strict)
    }
}

pub fn new_declarative_environment<'gc>(mc: &MutationContext<'gc>, outer: Option<LexicalEnvironment<'gc>>) -> LexicalEnvironment<'gc> {
    LexicalEnvironment::new(mc, EnvironmentRecord::new_declarative(mc), outer)
}

pub fn new_object_environment<'gc>(
    mc: &MutationContext<'gc>,
    bindings: JSObject<'gc>,
    provide_this: bool,
    outer: Option<LexicalEnvironment<'gc>>,
) -> LexicalEnvironment<'gc> {
    LexicalEnvironment::new(mc, EnvironmentRecord::new_object(mc, bindings, provide_this), outer)
}

pub fn new_global_environment<'gc>(mc: &MutationContext<'gc>, global_object: JSObject<'gc>) -> LexicalEnvironment<'gc> {
    LexicalEnvironment::new(mc, EnvironmentRecord::new_global(mc, global_object), None)
}
