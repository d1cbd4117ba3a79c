//! Shared data model for the Frontdesk front-controller router.
//!
//! This crate holds the types that flow between the routing core and the HTTP
//! layer:
//!
//! - **Routes** ([`route`]): [`ResolvedRoute`] produced by URI resolution and the
//!   [`RedirectDecision`] produced by the canonical URI check.
//! - **Operation metadata** ([`operation`]): explicit parameter and operation
//!   descriptors registered alongside each controller, used for lookup and
//!   argument binding.
//! - **Arguments** ([`arguments`]): the positional [`BoundArguments`] handed to an
//!   operation.
//! - **Replies** ([`reply`]): what an operation returns on success.
//! - **Errors** ([`error`]): the [`RouteError`] taxonomy.

pub mod arguments;
pub mod error;
pub mod operation;
pub mod reply;
pub mod route;

pub use arguments::BoundArguments;
pub use error::{InvalidNameError, RouteError, RouteResult, UriToken};
pub use operation::{ControllerDescriptor, OperationSpec, ParamSpec, Receiver, Visibility};
pub use reply::Reply;
pub use route::{RedirectDecision, ResolvedRoute};
