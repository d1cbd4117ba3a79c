//! Controller discovery and instantiation.
//!
//! Controllers are registered up front with an explicit [`ControllerDescriptor`]
//! and a factory. The dispatcher asks a [`HandlerRegistry`] for a controller by
//! its qualified name (`<namespace>::<Name>`) and receives a fresh instance for
//! every request.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use frontdesk_model::{BoundArguments, ControllerDescriptor, OperationSpec, Reply};

use crate::context::RequestContext;

/// Separator between namespace and controller name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// A controller instance that can run its operations.
pub trait Controller: Send {
    /// Run `operation` with positional `args`.
    ///
    /// The operation has already been checked against the controller's
    /// descriptor; `args` holds one value per declared parameter.
    ///
    /// # Errors
    ///
    /// Any error the operation raises. The dispatcher reports it as external.
    fn invoke(
        &mut self,
        operation: &OperationSpec,
        args: BoundArguments,
        ctx: &RequestContext,
    ) -> anyhow::Result<Reply>;
}

/// A controller type that describes itself, so it can be registered by type.
pub trait Routable: Controller + Default + 'static {
    /// The controller's name and operations.
    fn descriptor() -> ControllerDescriptor;
}

/// Creates a new controller instance.
pub type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// A freshly created controller together with its metadata.
pub struct LoadedController {
    /// Metadata for the loaded controller.
    pub descriptor: Arc<ControllerDescriptor>,
    /// The new instance.
    pub instance: Box<dyn Controller>,
}

impl fmt::Debug for LoadedController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedController")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Why a controller could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Nothing is registered under the name.
    #[error("no controller registered as \"{0}\"")]
    NotFound(String),
    /// Something is registered but it does not satisfy the controller contract.
    #[error("\"{0}\" is not a controller")]
    NotAController(String),
}

/// Resolves qualified controller names to instances.
pub trait HandlerRegistry: Send + Sync {
    /// The namespace controller names are qualified with, without edge separators.
    fn namespace(&self) -> &str;

    /// Load a fresh controller instance by qualified name.
    ///
    /// # Errors
    ///
    /// [`LoadError::NotFound`] when nothing is registered under the name,
    /// [`LoadError::NotAController`] when the entry fails the controller contract.
    fn load(&self, qualified_name: &str) -> Result<LoadedController, LoadError>;

    /// Qualify a cased controller name with the namespace.
    fn qualify(&self, name: &str) -> String {
        let namespace = self.namespace();
        if namespace.is_empty() {
            name.to_owned()
        } else {
            format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
        }
    }
}

struct Entry {
    descriptor: Arc<ControllerDescriptor>,
    factory: ControllerFactory,
}

/// In-memory [`HandlerRegistry`] populated at startup.
///
/// # Examples
///
/// ```
/// use frontdesk_core::registry::{ControllerRegistry, HandlerRegistry};
///
/// let registry = ControllerRegistry::new("::app::controllers::");
/// assert_eq!(registry.namespace(), "app::controllers");
/// assert_eq!(registry.qualify("DefaultPage"), "app::controllers::DefaultPage");
/// ```
pub struct ControllerRegistry {
    namespace: String,
    entries: HashMap<String, Entry>,
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("ControllerRegistry")
            .field("namespace", &self.namespace)
            .field("controllers", &names)
            .finish()
    }
}

impl ControllerRegistry {
    /// Create an empty registry for `namespace`.
    ///
    /// Leading and trailing `::` separators are stripped.
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: normalize_namespace(namespace),
            entries: HashMap::new(),
        }
    }

    /// Register a controller under `name` within the registry namespace.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, descriptor: ControllerDescriptor, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        let qualified = self.qualify(name);
        tracing::debug!(controller = %qualified, operations = descriptor.operations.len(), "registering controller");
        self.entries.insert(
            qualified,
            Entry {
                descriptor: Arc::new(descriptor),
                factory: Box::new(factory),
            },
        );
        self
    }

    /// Register a self-describing controller type under its descriptor name.
    pub fn register_type<C: Routable>(&mut self) -> &mut Self {
        let descriptor = C::descriptor();
        let name = descriptor.name.clone();
        self.register(&name, descriptor, || Box::new(C::default()))
    }

    /// Number of registered controllers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no controllers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a controller is registered under the qualified name.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.entries.contains_key(qualified_name)
    }
}

impl HandlerRegistry for ControllerRegistry {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn load(&self, qualified_name: &str) -> Result<LoadedController, LoadError> {
        let entry = self
            .entries
            .get(qualified_name)
            .ok_or_else(|| LoadError::NotFound(qualified_name.to_owned()))?;
        if !entry.descriptor.has_index() {
            return Err(LoadError::NotAController(qualified_name.to_owned()));
        }
        Ok(LoadedController {
            descriptor: Arc::clone(&entry.descriptor),
            instance: (entry.factory)(),
        })
    }
}

fn normalize_namespace(namespace: &str) -> String {
    namespace
        .trim()
        .trim_start_matches(NAMESPACE_SEPARATOR)
        .trim_end_matches(NAMESPACE_SEPARATOR)
        .to_owned()
}
