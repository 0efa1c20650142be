pub(crate) use gc_arena::Mutation as MutationContext;
pub(crate) use gc_arena::collect::Trace as GcTrace;
pub(crate) use gc_arena::lock::RefLock as GcCell;
pub(crate) use gc_arena::{Collect, Gc};
pub(crate) type GcPtr<'gc, T> = Gc<'gc, GcCell<T>>;

#[inline]
pub fn new_gc_cell_ptr<'gc, T: 'gc + Collect<'gc>>(mc: &MutationContext<'gc>, value: T) -> GcPtr<'gc, T> {
    Gc::new(mc, GcCell::new(value))
}

mod value;
pub use value::*;

mod descriptor;
pub use descriptor::*;

mod property_key;
pub use property_key::*;

pub(crate) mod number;

mod object;
pub use object::*;

mod function;
pub use function::*;

mod args;
pub use args::*;

pub mod js_error;
pub use js_error::*;

mod environment;
pub use environment::*;

mod reference;
pub use reference::*;

mod realm;
pub use realm::*;

mod conversion;

mod operators;

#[derive(Collect)]
#[collect(no_drop)]
pub struct JsRoot<'gc> {
    pub realm: Realm<'gc>,
}

pub type JsArena = gc_arena::Arena<gc_arena::Rootable!['gc => JsRoot<'gc>]>;

impl<'gc> JsRoot<'gc> {
    pub fn new(mc: &MutationContext<'gc>, options: RealmOptions) -> Self {
        JsRoot {
            realm: Realm::new(mc, options),
        }
    }

    pub fn with_defaults(mc: &MutationContext<'gc>) -> Self {
        Self::new(mc, RealmOptions::default())
    }

    /// Entry point for every operation performed inside `arena.mutate`.
    pub fn context(&'gc self, mc: &'gc MutationContext<'gc>) -> JsContext<'gc> {
        JsContext { mc, realm: &self.realm }
    }
}

/// The execution context threaded through the core: the mutation handle for allocating in the
/// arena plus the realm whose intrinsics back ToObject and error construction.
#[derive(Clone, Copy)]
pub struct JsContext<'gc> {
    mc: &'gc MutationContext<'gc>,
    realm: &'gc Realm<'gc>,
}

impl<'gc> JsContext<'gc> {
    pub fn mc(&self) -> &'gc MutationContext<'gc> {
        self.mc
    }

    pub fn realm(&self) -> &'gc Realm<'gc> {
        self.realm
    }

    pub fn is_strict(&self) -> bool {
        self.realm.options().strict
    }

    pub fn global_object(&self) -> JSObject<'gc> {
        self.realm.global_object()
    }

    /// A fresh ordinary object inheriting from `Object.prototype`.
    pub fn new_object(&self) -> JSObject<'gc> {
        JSObject::new(self.mc, Some(self.realm.object_prototype()), "Object")
    }

    /// Build an error object of `kind` and wrap it for the language throw channel.
    pub fn throw_error(&self, kind: ErrorKind, message: &str) -> EvalError<'gc> {
        EvalError::Throw(RuntimeException::new(Value::Object(create_error(self, kind, message))))
    }
}
