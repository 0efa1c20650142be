use crate::core::{
    Args, Collect, ErrorKind, Gc, GcPtr, GcTrace, JsContext, JsResult, MutationContext, NativeFunction, PreferredType, Property,
    PropertyDescriptor, PropertyKey, PropertySlot, Value, new_gc_cell_ptr, same_value,
};
use crate::raise_type_error;
use std::collections::HashSet;

/// Internal slots that distinguish exotic objects from ordinary ones.
#[derive(Clone)]
pub enum ObjectKind<'gc> {
    Ordinary,
    /// Boolean, Number and String objects created by ToObject; holds the wrapped primitive.
    PrimitiveWrapper(Value<'gc>),
    Error(ErrorKind),
    NativeFunction(NativeFunction),
    ErrorConstructor(ErrorKind),
}

unsafe impl<'gc> Collect<'gc> for ObjectKind<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        if let ObjectKind::PrimitiveWrapper(value) = self {
            value.trace(cc);
        }
    }
}

pub struct ObjectData<'gc> {
    properties: indexmap::IndexMap<PropertyKey, Property<'gc>>,
    prototype: Option<JSObject<'gc>>,
    extensible: bool,
    class: &'static str,
    kind: ObjectKind<'gc>,
}

unsafe impl<'gc> Collect<'gc> for ObjectData<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        for prop in self.properties.values() {
            prop.trace(cc);
        }
        self.prototype.trace(cc);
        self.kind.trace(cc);
    }
}

/// Writable / enumerable / configurable triple used when installing properties without
/// DefineOwnProperty validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attributes {
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Attributes {
    pub const fn new(writable: bool, enumerable: bool, configurable: bool) -> Self {
        Attributes {
            writable,
            enumerable,
            configurable,
        }
    }

    /// Default for built-in methods: writable, configurable, not enumerable.
    pub const METHOD: Attributes = Attributes::new(true, false, true);
    pub const ALL: Attributes = Attributes::new(true, true, true);
    pub const NONE: Attributes = Attributes::new(false, false, false);
}

/// Handle to a heap object. Copies share the same object; equality is identity.
#[derive(Clone, Copy, Collect)]
#[collect(no_drop)]
pub struct JSObject<'gc>(GcPtr<'gc, ObjectData<'gc>>);

impl<'gc> JSObject<'gc> {
    pub fn new(mc: &MutationContext<'gc>, prototype: Option<JSObject<'gc>>, class: &'static str) -> Self {
        Self::with_kind(mc, prototype, class, ObjectKind::Ordinary)
    }

    pub fn with_kind(mc: &MutationContext<'gc>, prototype: Option<JSObject<'gc>>, class: &'static str, kind: ObjectKind<'gc>) -> Self {
        JSObject(new_gc_cell_ptr(
            mc,
            ObjectData {
                properties: indexmap::IndexMap::new(),
                prototype,
                extensible: true,
                class,
                kind,
            },
        ))
    }

    pub fn ptr_eq(a: JSObject<'gc>, b: JSObject<'gc>) -> bool {
        Gc::ptr_eq(a.0, b.0)
    }

    fn addr(&self) -> usize {
        Gc::as_ptr(self.0) as usize
    }

    pub fn prototype(&self) -> Option<JSObject<'gc>> {
        self.0.borrow().prototype
    }

    pub fn set_prototype(&self, mc: &MutationContext<'gc>, prototype: Option<JSObject<'gc>>) {
        self.0.borrow_mut(mc).prototype = prototype;
    }

    pub fn class(&self) -> &'static str {
        self.0.borrow().class
    }

    pub fn is_extensible(&self) -> bool {
        self.0.borrow().extensible
    }

    pub fn prevent_extensions(&self, mc: &MutationContext<'gc>) {
        self.0.borrow_mut(mc).extensible = false;
    }

    pub fn kind(&self) -> ObjectKind<'gc> {
        self.0.borrow().kind.clone()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.0.borrow().kind {
            ObjectKind::Error(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn primitive_value(&self) -> Option<Value<'gc>> {
        match &self.0.borrow().kind {
            ObjectKind::PrimitiveWrapper(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Install a property as-is, bypassing DefineOwnProperty. Replaces any existing entry in place.
    pub fn insert_property(&self, mc: &MutationContext<'gc>, key: &str, property: Property<'gc>) {
        self.0.borrow_mut(mc).properties.insert(PropertyKey::from(key), property);
    }

    /// Own property as stored, including the read-only index properties of String objects.
    fn own_property(&self, key: &str) -> Option<Property<'gc>> {
        let data = self.0.borrow();
        if let Some(prop) = data.properties.get(key) {
            return Some(prop.clone());
        }
        if let ObjectKind::PrimitiveWrapper(Value::String(units)) = &data.kind
            && let Some(index) = PropertyKey::from(key).as_array_index()
            && let Some(unit) = units.get(index as usize)
        {
            return Some(Property::data(Value::String(vec![*unit]), false, true, false));
        }
        None
    }

    /// Own properties in enumeration order: String object indices first, then insertion order.
    fn own_entries(&self) -> Vec<(PropertyKey, Property<'gc>)> {
        let data = self.0.borrow();
        let mut entries = Vec::with_capacity(data.properties.len());
        if let ObjectKind::PrimitiveWrapper(Value::String(units)) = &data.kind {
            for (index, unit) in units.iter().enumerate() {
                entries.push((PropertyKey::from(index.to_string()), Property::data(Value::String(vec![*unit]), false, true, false)));
            }
        }
        entries.extend(data.properties.iter().map(|(k, p)| (k.clone(), p.clone())));
        entries
    }

    /// First property named `key` along the prototype chain, starting at `self`.
    fn find_property(&self, key: &str) -> Option<Property<'gc>> {
        let mut visited = HashSet::new();
        let mut current = Some(*self);
        while let Some(obj) = current {
            if !visited.insert(obj.addr()) {
                log::warn!("prototype cycle detected while looking up '{key}'");
                return None;
            }
            if let Some(prop) = obj.own_property(key) {
                log::trace!("found '{key}' on {obj:?}");
                return Some(prop);
            }
            current = obj.prototype();
        }
        None
    }

    /// Whether `self` is on the prototype chain of `other`, excluding `other` itself.
    pub fn is_prototype_of(&self, other: JSObject<'gc>) -> bool {
        let mut visited = HashSet::new();
        let mut current = other.prototype();
        while let Some(obj) = current {
            if JSObject::ptr_eq(obj, *self) {
                return true;
            }
            if !visited.insert(obj.addr()) {
                log::warn!("prototype cycle detected while walking the chain of {other:?}");
                return false;
            }
            current = obj.prototype();
        }
        false
    }

    /// [[GetOwnProperty]]
    pub fn get_own_property(&self, key: &str) -> Option<PropertyDescriptor<'gc>> {
        self.own_property(key).map(|p| p.to_descriptor())
    }

    /// [[GetProperty]]
    pub fn get_property(&self, key: &str) -> Option<PropertyDescriptor<'gc>> {
        self.find_property(key).map(|p| p.to_descriptor())
    }

    /// [[Get]]
    pub fn get(&self, cx: &JsContext<'gc>, key: &str) -> JsResult<'gc, Value<'gc>> {
        self.get_with_receiver(cx, key, Value::Object(*self))
    }

    /// [[Get]] with an explicit `this` for getters, as used for property reads on primitive bases.
    pub fn get_with_receiver(&self, cx: &JsContext<'gc>, key: &str, receiver: Value<'gc>) -> JsResult<'gc, Value<'gc>> {
        match self.find_property(key).map(|p| p.slot) {
            None => Ok(Value::Undefined),
            Some(PropertySlot::Data { value, .. }) => Ok(value),
            Some(PropertySlot::Accessor { get: Value::Object(getter), .. }) => {
                log::trace!("invoking getter for '{key}'");
                getter.call(cx, receiver, &Args::default())
            }
            Some(PropertySlot::Accessor { .. }) => Ok(Value::Undefined),
        }
    }

    /// [[CanPut]]
    pub fn can_put(&self, key: &str) -> bool {
        if let Some(own) = self.own_property(key) {
            return match own.slot {
                PropertySlot::Accessor { set, .. } => !set.is_undefined(),
                PropertySlot::Data { writable, .. } => writable,
            };
        }
        let extensible = self.is_extensible();
        let Some(inherited) = self.prototype().and_then(|proto| proto.find_property(key)) else {
            return extensible;
        };
        match inherited.slot {
            PropertySlot::Accessor { set, .. } => !set.is_undefined(),
            PropertySlot::Data { writable, .. } => extensible && writable,
        }
    }

    /// [[Put]]
    pub fn put(&self, cx: &JsContext<'gc>, key: &str, value: Value<'gc>, throw: bool) -> JsResult<'gc, ()> {
        if !self.can_put(key) {
            if throw {
                return Err(raise_type_error!(cx, "Cannot assign to read only property '{key}' of {}", self.class()));
            }
            return Ok(());
        }
        if let Some(own) = self.own_property(key)
            && own.is_data()
        {
            self.define_own_property(cx, key, PropertyDescriptor::value_only(value), throw)?;
            return Ok(());
        }
        if let Some(Property {
            slot: PropertySlot::Accessor {
                set: Value::Object(setter), ..
            },
            ..
        }) = self.find_property(key)
        {
            log::trace!("invoking setter for '{key}'");
            setter.call(cx, Value::Object(*self), &Args::from(vec![value]))?;
            return Ok(());
        }
        self.define_own_property(cx, key, PropertyDescriptor::new_data(value, true, true, true), throw)?;
        Ok(())
    }

    /// [[HasProperty]], prototype chain inclusive.
    pub fn has_property(&self, key: &str) -> bool {
        self.find_property(key).is_some()
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        self.own_property(key).is_some()
    }

    /// [[Delete]]
    pub fn delete(&self, cx: &JsContext<'gc>, key: &str, throw: bool) -> JsResult<'gc, bool> {
        match self.own_property(key) {
            None => Ok(true),
            Some(prop) if prop.configurable => {
                self.0.borrow_mut(cx.mc()).properties.shift_remove(key);
                Ok(true)
            }
            Some(_) => {
                if throw {
                    return Err(raise_type_error!(cx, "Cannot delete property '{key}' of {}", self.class()));
                }
                Ok(false)
            }
        }
    }

    /// [[DefaultValue]]
    pub fn default_value(&self, cx: &JsContext<'gc>, hint: PreferredType) -> JsResult<'gc, Value<'gc>> {
        let order = match hint {
            PreferredType::String => ["toString", "valueOf"],
            PreferredType::Number => ["valueOf", "toString"],
        };
        for name in order {
            log::trace!("DefaultValue({hint:?}) trying {name}");
            if let Value::Object(func) = self.get(cx, name)?
                && func.is_callable()
            {
                let result = func.call(cx, Value::Object(*self), &Args::default())?;
                if result.is_primitive() {
                    return Ok(result);
                }
            }
        }
        Err(raise_type_error!(cx, "Cannot convert object to primitive value"))
    }

    /// [[DefineOwnProperty]]
    pub fn define_own_property(&self, cx: &JsContext<'gc>, key: &str, desc: PropertyDescriptor<'gc>, throw: bool) -> JsResult<'gc, bool> {
        let Some(mut current) = self.own_property(key) else {
            if !self.is_extensible() {
                return reject(cx, key, "object is not extensible", throw);
            }
            self.insert_property(cx.mc(), key, Property::from_descriptor(&desc));
            return Ok(true);
        };
        if desc.is_empty() || current.satisfies(&desc) {
            return Ok(true);
        }
        if !current.configurable {
            if desc.configurable == Some(true) {
                return reject(cx, key, "cannot make a non-configurable property configurable", throw);
            }
            if desc.enumerable.is_some_and(|e| e != current.enumerable) {
                return reject(cx, key, "cannot change enumerability of a non-configurable property", throw);
            }
        }
        if desc.is_generic_descriptor() {
            // only enumerable/configurable change
        } else if current.is_data() != desc.is_data_descriptor() {
            if !current.configurable {
                return reject(cx, key, "cannot change the kind of a non-configurable property", throw);
            }
            current.slot = if current.is_data() {
                PropertySlot::Accessor {
                    get: Value::Undefined,
                    set: Value::Undefined,
                }
            } else {
                PropertySlot::Data {
                    value: Value::Undefined,
                    writable: false,
                }
            };
        } else if !current.configurable {
            match &current.slot {
                PropertySlot::Data { value, writable } => {
                    if !*writable {
                        if desc.writable == Some(true) {
                            return reject(cx, key, "cannot make a non-configurable property writable", throw);
                        }
                        if desc.value.as_ref().is_some_and(|v| !same_value(v, value)) {
                            return reject(cx, key, "cannot change the value of a read-only property", throw);
                        }
                    }
                }
                PropertySlot::Accessor { get, set } => {
                    if desc.get.as_ref().is_some_and(|g| !same_value(g, get)) || desc.set.as_ref().is_some_and(|s| !same_value(s, set)) {
                        return reject(cx, key, "cannot replace accessors of a non-configurable property", throw);
                    }
                }
            }
        }
        current.merge(&desc);
        self.insert_property(cx.mc(), key, current);
        Ok(true)
    }

    /// All own property names.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.own_entries().into_iter().map(|(k, _)| k).collect()
    }

    /// Names visited by for-in: own enumerable keys first, then each prototype's, skipping names
    /// already seen on a nearer object (enumerable or not).
    pub fn enumerable_keys(&self) -> Vec<PropertyKey> {
        let mut seen = HashSet::new();
        let mut visited = HashSet::new();
        let mut keys = Vec::new();
        let mut current = Some(*self);
        while let Some(obj) = current {
            if !visited.insert(obj.addr()) {
                log::warn!("prototype cycle detected during enumeration");
                break;
            }
            for (key, prop) in obj.own_entries() {
                if seen.insert(key.clone()) && prop.enumerable {
                    keys.push(key);
                }
            }
            current = obj.prototype();
        }
        keys
    }

    /// String content of a data property found along the chain, without running any code.
    pub fn peek_data_string(&self, key: &str) -> Option<String> {
        match self.find_property(key)?.slot {
            PropertySlot::Data {
                value: Value::String(s), ..
            } => Some(crate::unicode::utf16_to_utf8(&s)),
            _ => None,
        }
    }
}

fn reject<'gc>(cx: &JsContext<'gc>, key: &str, reason: &str, throw: bool) -> JsResult<'gc, bool> {
    log::debug!("DefineOwnProperty('{key}') rejected: {reason}");
    if throw {
        return Err(raise_type_error!(cx, "Cannot redefine property: {key} ({reason})"));
    }
    Ok(false)
}

impl std::fmt::Debug for JSObject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = self.0.try_borrow().map(|d| d.class).unwrap_or("<borrowed>");
        write!(f, "JSObject({class} @ {:p})", Gc::as_ptr(self.0))
    }
}

/// Appends properties with a selected attribute triple, without DefineOwnProperty checks.
pub struct ObjectBuilder<'a, 'gc> {
    mc: &'a MutationContext<'gc>,
    object: JSObject<'gc>,
    attributes: Attributes,
}

impl<'a, 'gc> ObjectBuilder<'a, 'gc> {
    pub fn new(mc: &'a MutationContext<'gc>, object: JSObject<'gc>) -> Self {
        ObjectBuilder {
            mc,
            object,
            attributes: Attributes::ALL,
        }
    }

    pub fn set_attributes(mut self, writable: bool, enumerable: bool, configurable: bool) -> Self {
        self.attributes = Attributes::new(writable, enumerable, configurable);
        self
    }

    pub fn data(self, name: &str, value: impl Into<Value<'gc>>) -> Self {
        let Attributes {
            writable,
            enumerable,
            configurable,
        } = self.attributes;
        self.object.insert_property(self.mc, name, Property::data(value.into(), writable, enumerable, configurable));
        self
    }

    /// Accessor properties have no writable attribute; the selected one is ignored.
    pub fn accessor(self, name: &str, get: Value<'gc>, set: Value<'gc>) -> Self {
        let Attributes { enumerable, configurable, .. } = self.attributes;
        self.object.insert_property(self.mc, name, Property::accessor(get, set, enumerable, configurable));
        self
    }

    pub fn build(self) -> JSObject<'gc> {
        self.object
    }
}
