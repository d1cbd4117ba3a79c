//! Routing core for Frontdesk, a front-controller URI router.
//!
//! Given a request URI of the form `/controller/method?query`, this crate picks
//! the controller and operation to run, enforces one canonical URI per route,
//! and binds query parameters to the operation's declared parameters.
//!
//! # Architecture
//!
//! ```text
//! RequestContext
//!        |
//!        v
//!   Dispatcher ---- resolver (URI -> route)
//!        |     ---- canonical (redirect or accept)
//!        |     ---- caser + HandlerRegistry (route name -> controller)
//!        |     ---- binder (query -> positional arguments)
//!        v
//!   Outcome (Invoked | Redirected | Errored)
//! ```
//!
//! Redirect and error heads are staged on a [`HeaderTransport`]; the host turns
//! them into a real response.

pub mod binder;
pub mod canonical;
pub mod caser;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod query;
pub mod registry;
pub mod reporter;
pub mod resolver;
pub mod transport;
pub mod validation;

pub use caser::{CaseStrategy, CaseTransformer};
pub use config::RouterConfig;
pub use context::RequestContext;
pub use dispatcher::{Dispatcher, Outcome, Stage};
pub use registry::{Controller, ControllerRegistry, HandlerRegistry, LoadError, LoadedController, Routable};
pub use reporter::{DefaultErrorReporter, ErrorReporter};
pub use transport::{HeaderTransport, HttpVersion};
