use crate::core::{Collect, JsContext, JSObject, JsResult, Value, same_value};
use crate::raise_type_error;

/// A Rust representation of a property descriptor used by the engine.
/// Supports both data descriptors (`value` + `writable`) and accessor descriptors (`get`/`set`).
/// Fields are optional to support "partial" descriptors (as accepted by DefineOwnProperty):
/// `None` means "leave unchanged", which is distinct from `Some(false)` or `Some(Undefined)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyDescriptor<'gc> {
    // Data fields
    pub value: Option<Value<'gc>>,
    pub writable: Option<bool>,
    // Accessor fields
    pub get: Option<Value<'gc>>,
    pub set: Option<Value<'gc>>,
    // Common flags
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

/// Storage half of a stored property. A stored property is always exactly one of the two shapes.
#[derive(Clone, Debug, Collect)]
#[collect(no_drop)]
pub enum PropertySlot<'gc> {
    Data { value: Value<'gc>, writable: bool },
    Accessor { get: Value<'gc>, set: Value<'gc> },
}

/// A property as stored in an object's property table.
#[derive(Clone, Debug, Collect)]
#[collect(no_drop)]
pub struct Property<'gc> {
    pub slot: PropertySlot<'gc>,
    pub enumerable: bool,
    pub configurable: bool,
}

impl<'gc> PropertyDescriptor<'gc> {
    /// Construct a full data descriptor from explicit values
    pub fn new_data(value: Value<'gc>, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor {
            value: Some(value),
            writable: Some(writable),
            get: None,
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// Construct an accessor descriptor
    pub fn new_accessor(get: Option<Value<'gc>>, set: Option<Value<'gc>>, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor {
            value: None,
            writable: None,
            get,
            set,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// A partial descriptor that only carries a new value.
    pub fn value_only(value: Value<'gc>) -> Self {
        PropertyDescriptor {
            value: Some(value),
            ..PropertyDescriptor::default()
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_data_descriptor() && !self.is_accessor_descriptor()
    }

    pub fn is_empty(&self) -> bool {
        self.is_generic_descriptor() && self.enumerable.is_none() && self.configurable.is_none()
    }

    /// ToPropertyDescriptor: read a descriptor object, including inherited fields.
    pub fn from_object(cx: &JsContext<'gc>, obj: JSObject<'gc>) -> JsResult<'gc, Self> {
        let mut desc = PropertyDescriptor::default();
        if obj.has_property("enumerable") {
            desc.enumerable = Some(obj.get(cx, "enumerable")?.to_boolean());
        }
        if obj.has_property("configurable") {
            desc.configurable = Some(obj.get(cx, "configurable")?.to_boolean());
        }
        if obj.has_property("value") {
            desc.value = Some(obj.get(cx, "value")?);
        }
        if obj.has_property("writable") {
            desc.writable = Some(obj.get(cx, "writable")?.to_boolean());
        }
        if obj.has_property("get") {
            let getter = obj.get(cx, "get")?;
            if !getter.is_undefined() && !getter.is_callable() {
                return Err(raise_type_error!(cx, "Getter must be a function"));
            }
            desc.get = Some(getter);
        }
        if obj.has_property("set") {
            let setter = obj.get(cx, "set")?;
            if !setter.is_undefined() && !setter.is_callable() {
                return Err(raise_type_error!(cx, "Setter must be a function"));
            }
            desc.set = Some(setter);
        }
        if desc.is_data_descriptor() && desc.is_accessor_descriptor() {
            return Err(raise_type_error!(
                cx,
                "Invalid property descriptor. Cannot both specify accessors and a value or writable attribute"
            ));
        }
        Ok(desc)
    }

    /// FromPropertyDescriptor: produce a plain object describing a complete descriptor.
    pub fn to_object(&self, cx: &JsContext<'gc>) -> JsResult<'gc, JSObject<'gc>> {
        let obj = cx.new_object();
        if self.is_accessor_descriptor() {
            obj.put(cx, "get", self.get.clone().unwrap_or(Value::Undefined), true)?;
            obj.put(cx, "set", self.set.clone().unwrap_or(Value::Undefined), true)?;
        } else {
            obj.put(cx, "value", self.value.clone().unwrap_or(Value::Undefined), true)?;
            obj.put(cx, "writable", Value::Boolean(self.writable.unwrap_or(false)), true)?;
        }
        obj.put(cx, "enumerable", Value::Boolean(self.enumerable.unwrap_or(false)), true)?;
        obj.put(cx, "configurable", Value::Boolean(self.configurable.unwrap_or(false)), true)?;
        Ok(obj)
    }
}

impl<'gc> Property<'gc> {
    pub fn data(value: Value<'gc>, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Property {
            slot: PropertySlot::Data { value, writable },
            enumerable,
            configurable,
        }
    }

    pub fn accessor(get: Value<'gc>, set: Value<'gc>, enumerable: bool, configurable: bool) -> Self {
        Property {
            slot: PropertySlot::Accessor { get, set },
            enumerable,
            configurable,
        }
    }

    /// Materialize a brand-new property from a (possibly partial) descriptor; absent fields
    /// take their default values.
    pub fn from_descriptor(desc: &PropertyDescriptor<'gc>) -> Self {
        let enumerable = desc.enumerable.unwrap_or(false);
        let configurable = desc.configurable.unwrap_or(false);
        if desc.is_accessor_descriptor() {
            Property::accessor(
                desc.get.clone().unwrap_or(Value::Undefined),
                desc.set.clone().unwrap_or(Value::Undefined),
                enumerable,
                configurable,
            )
        } else {
            Property::data(
                desc.value.clone().unwrap_or(Value::Undefined),
                desc.writable.unwrap_or(false),
                enumerable,
                configurable,
            )
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self.slot, PropertySlot::Data { .. })
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.slot, PropertySlot::Accessor { .. })
    }

    /// Whether every field present in `desc` already holds the same value here.
    pub fn satisfies(&self, desc: &PropertyDescriptor<'gc>) -> bool {
        if desc.enumerable.is_some_and(|e| e != self.enumerable) || desc.configurable.is_some_and(|c| c != self.configurable) {
            return false;
        }
        match &self.slot {
            PropertySlot::Data { value, writable } => {
                if desc.is_accessor_descriptor() {
                    return false;
                }
                desc.value.as_ref().is_none_or(|v| same_value(v, value)) && desc.writable.is_none_or(|w| w == *writable)
            }
            PropertySlot::Accessor { get, set } => {
                if desc.is_data_descriptor() {
                    return false;
                }
                desc.get.as_ref().is_none_or(|g| same_value(g, get)) && desc.set.as_ref().is_none_or(|s| same_value(s, set))
            }
        }
    }

    /// Overwrite the fields present in `desc`, leaving absent ones untouched. The caller has
    /// already converted the slot shape if `desc` asks for the other one.
    pub fn merge(&mut self, desc: &PropertyDescriptor<'gc>) {
        match &mut self.slot {
            PropertySlot::Data { value, writable } => {
                if let Some(v) = &desc.value {
                    *value = v.clone();
                }
                if let Some(w) = desc.writable {
                    *writable = w;
                }
            }
            PropertySlot::Accessor { get, set } => {
                if let Some(g) = &desc.get {
                    *get = g.clone();
                }
                if let Some(s) = &desc.set {
                    *set = s.clone();
                }
            }
        }
        if let Some(e) = desc.enumerable {
            self.enumerable = e;
        }
        if let Some(c) = desc.configurable {
            self.configurable = c;
        }
    }

    /// Complete descriptor view of this property.
    pub fn to_descriptor(&self) -> PropertyDescriptor<'gc> {
        match &self.slot {
            PropertySlot::Data { value, writable } => PropertyDescriptor::new_data(value.clone(), *writable, self.enumerable, self.configurable),
            PropertySlot::Accessor { get, set } => {
                PropertyDescriptor::new_accessor(Some(get.clone()), Some(set.clone()), self.enumerable, self.configurable)
            }
        }
    }
}
