use crate::core::Value;

/// Positional arguments of a call. Reading past the end yields `Undefined`.
#[derive(Clone, Debug, Default)]
pub struct Args<'gc> {
    items: Vec<Value<'gc>>,
}

impl<'gc> Args<'gc> {
    pub fn new(items: Vec<Value<'gc>>) -> Self {
        Args { items }
    }

    pub fn get(&self, index: usize) -> Value<'gc> {
        self.items.get(index).cloned().unwrap_or(Value::Undefined)
    }

    /// Whether an argument was actually passed at `index`, as opposed to defaulting to `Undefined`.
    pub fn is_present(&self, index: usize) -> bool {
        index < self.items.len()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value<'gc>> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value<'gc>] {
        &self.items
    }
}

impl<'gc> From<Vec<Value<'gc>>> for Args<'gc> {
    fn from(items: Vec<Value<'gc>>) -> Self {
        Args { items }
    }
}

impl<'gc, const N: usize> From<[Value<'gc>; N]> for Args<'gc> {
    fn from(items: [Value<'gc>; N]) -> Self {
        Args { items: items.into() }
    }
}

impl<'a, 'gc> IntoIterator for &'a Args<'gc> {
    type Item = &'a Value<'gc>;
    type IntoIter = std::slice::Iter<'a, Value<'gc>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
