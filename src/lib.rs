pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod js_boolean;
pub(crate) mod js_function;
pub(crate) mod js_number;
pub(crate) mod js_object;
pub(crate) mod js_string;
pub mod unicode;

pub use crate::core::{
    Args, Attributes, Binding, EnvironmentRecord, ErrorIntrinsics, ErrorKind, EvalError, JSObject, JsArena, JsContext, JsResult, JsRoot,
    LexicalEnvironment, NativeCall, NativeConstruct, NativeFunction, NativeMember, ObjectBuilder, ObjectKind, PreferredType, Property,
    PropertyDescriptor, PropertyKey, PropertySlot, Realm, RealmOptions, Reference, ReferenceBase, RuntimeException, Type, Value,
    construct_error, create_error, create_native_function, initialize_members, new_declarative_environment, new_global_environment,
    new_object_environment, same_value, strict_equals,
};
pub use crate::core::number::{number_to_string, string_to_number, to_int32, to_integer, to_uint16, to_uint32};
pub use error::JSError;
pub use js_function::MAX_APPLY_ARGUMENTS;
