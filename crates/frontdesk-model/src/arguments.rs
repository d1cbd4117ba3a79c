//! Positional arguments bound for an operation call.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Ordered argument values, one per declared parameter.
///
/// Names are not retained; position `i` corresponds to the `i`-th declared
/// parameter of the operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundArguments(Vec<Value>);

impl BoundArguments {
    /// Wrap an already ordered list of values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Number of bound values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no values are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// The value at `index` as a string slice, when it is a JSON string.
    #[must_use]
    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_str)
    }

    /// Deserialize the value at `index` into `T`.
    ///
    /// A missing position deserializes from `null`, so `Option<T>` targets
    /// yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when the value does not have the shape `T` expects.
    pub fn parse<T: DeserializeOwned>(&self, index: usize) -> Result<T, serde_json::Error> {
        let value = self.get(index).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value)
    }

    /// Iterate over the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Consume into the underlying values.
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for BoundArguments {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl<'a> IntoIterator for &'a BoundArguments {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
