//! Operation and parameter metadata.
//!
//! Controllers describe their operations up front with a [`ControllerDescriptor`]
//! instead of being inspected at runtime. The dispatcher uses the descriptor to
//! find the requested operation, check that it is callable from a route, and
//! bind query parameters to its declared parameters in order.

use serde_json::Value;

/// A declared parameter of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Parameter name, matched against query keys.
    pub name: String,
    /// Whether the parameter expects a sequence.
    pub is_array: bool,
    /// Default used when the query does not carry the parameter.
    ///
    /// `Some(Value::Null)` is a declared `null` default, which differs from no
    /// default at all only for array parameters.
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A scalar parameter without a default.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
            default: None,
        }
    }

    /// A scalar parameter with a default value.
    #[must_use]
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
            default: Some(default.into()),
        }
    }

    /// A sequence parameter without a default.
    #[must_use]
    pub fn array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: true,
            default: None,
        }
    }

    /// Attach a default to this parameter.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether a default value was declared.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Access level of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Reachable from a route.
    #[default]
    Public,
    /// Declared but not routable.
    Protected,
    /// Declared but not routable.
    Private,
}

/// Whether an operation runs on a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Receiver {
    /// Runs on the instance created for the request.
    #[default]
    Instance,
    /// Associated with the controller type; never routable.
    Static,
}

/// A named operation a controller exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSpec {
    /// Operation name as addressed from a route.
    pub name: String,
    /// Access level.
    pub visibility: Visibility,
    /// Instance or static.
    pub receiver: Receiver,
    /// Declared parameters, in declaration order.
    pub params: Vec<ParamSpec>,
}

impl OperationSpec {
    /// A public instance operation with no parameters.
    #[must_use]
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            receiver: Receiver::Instance,
            params: Vec::new(),
        }
    }

    /// Set the visibility.
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the operation as static.
    #[must_use]
    pub fn static_receiver(mut self) -> Self {
        self.receiver = Receiver::Static;
        self
    }

    /// Append a declared parameter.
    #[must_use]
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Whether a route may invoke this operation: public and bound to an instance.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        self.visibility == Visibility::Public && self.receiver == Receiver::Instance
    }
}

/// Metadata describing a controller type and its operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerDescriptor {
    /// Registered type name, e.g. `DefaultPage`.
    pub name: String,
    /// Operations in declaration order.
    pub operations: Vec<OperationSpec>,
}

impl ControllerDescriptor {
    /// Start a descriptor for the named controller.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    /// Append an operation.
    #[must_use]
    pub fn operation(mut self, operation: OperationSpec) -> Self {
        self.operations.push(operation);
        self
    }

    /// Find an operation by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&OperationSpec> {
        self.operations
            .iter()
            .find(|op| op.name.eq_ignore_ascii_case(name))
    }

    /// Find a routable operation by name, ignoring ASCII case.
    ///
    /// Hidden operations whose names differ only in case are skipped.
    #[must_use]
    pub fn find_routable(&self, name: &str) -> Option<&OperationSpec> {
        self.operations
            .iter()
            .find(|op| op.is_routable() && op.name.eq_ignore_ascii_case(name))
    }

    /// Whether the controller exposes a routable `index` operation.
    ///
    /// Every controller must, since `/` and bare controller URIs land on it.
    #[must_use]
    pub fn has_index(&self) -> bool {
        self.find_routable("index").is_some()
    }
}
