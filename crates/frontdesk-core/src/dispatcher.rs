//! Request dispatch.
//!
//! The [`Dispatcher`] runs one request through these stages:
//!
//! ```text
//! Start -> Resolved -> Canonicalized -> HandlerLoaded -> Bound -> Invoked -> Done
//! ```
//!
//! A non-canonical URI stops after `Resolved` with a redirect. Any failure stops
//! the run and is handed to the [`ErrorReporter`].

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use frontdesk_model::{ResolvedRoute, Reply, RouteError, RouteResult};
use http::header::{CACHE_CONTROL, HeaderValue, LOCATION};

use crate::binder;
use crate::canonical;
use crate::caser::CaseTransformer;
use crate::config::RouterConfig;
use crate::context::RequestContext;
use crate::registry::{HandlerRegistry, LoadError};
use crate::reporter::{DefaultErrorReporter, ErrorReporter};
use crate::resolver;
use crate::transport::{HeaderTransport, HttpVersion};

/// Where a request is in the dispatch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has run yet.
    Start,
    /// Controller, method, and query string are known.
    Resolved,
    /// The request URI is canonical.
    Canonicalized,
    /// A controller instance exists.
    HandlerLoaded,
    /// Arguments are bound to the operation's parameters.
    Bound,
    /// The operation returned.
    Invoked,
    /// The request is finished.
    Done,
}

impl Stage {
    /// Stage name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Resolved => "Resolved",
            Self::Canonicalized => "Canonicalized",
            Self::HandlerLoaded => "HandlerLoaded",
            Self::Bound => "Bound",
            Self::Invoked => "Invoked",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a request ended.
#[derive(Debug)]
pub enum Outcome {
    /// The operation ran and produced a reply.
    Invoked(Reply),
    /// The request URI was not canonical. The redirect head is on the transport.
    Redirected {
        /// Canonical URI the client is sent to.
        target: String,
        /// 301, 303, or 307.
        status: http::StatusCode,
    },
    /// Routing or the operation failed. The error head is on the transport.
    Errored {
        /// What went wrong.
        error: RouteError,
        /// `true` when the router raised the error, `false` for operation errors.
        internal: bool,
        /// Page body produced by the error reporter.
        page: Bytes,
    },
}

impl Outcome {
    /// Whether the operation was invoked successfully.
    #[must_use]
    pub fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked(_))
    }

    /// Whether the request was redirected.
    #[must_use]
    pub fn is_redirected(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }

    /// The error, if dispatch failed.
    #[must_use]
    pub fn error(&self) -> Option<&RouteError> {
        match self {
            Self::Errored { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Routes requests to controller operations.
///
/// Holds only startup state and never mutates it, so one dispatcher serves any
/// number of concurrent requests.
pub struct Dispatcher {
    config: RouterConfig,
    registry: Arc<dyn HandlerRegistry>,
    caser: Box<dyn CaseTransformer>,
    reporter: Arc<dyn ErrorReporter>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("namespace", &self.registry.namespace())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher using the configured case strategy and the default
    /// error reporter.
    #[must_use]
    pub fn new(config: RouterConfig, registry: Arc<dyn HandlerRegistry>) -> Self {
        let caser = Box::new(config.case_strategy);
        Self {
            config,
            registry,
            caser,
            reporter: Arc::new(DefaultErrorReporter),
        }
    }

    /// Replace the case transformer.
    #[must_use]
    pub fn with_caser(mut self, caser: impl CaseTransformer + 'static) -> Self {
        self.caser = Box::new(caser);
        self
    }

    /// Replace the error reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The configuration the dispatcher was built with.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Dispatch one request.
    ///
    /// Redirect and error heads are staged on `transport`. An invoked operation's
    /// reply is returned as-is and leaves `transport` untouched.
    pub fn handle(&self, ctx: &RequestContext, transport: &mut HeaderTransport) -> Outcome {
        tracing::debug!(uri = %ctx.request_uri(), method = %ctx.method(), "dispatching request");

        let mut stage = Stage::Start;
        match self.run(ctx, transport, &mut stage) {
            Ok(outcome) => {
                advance(&mut stage, Stage::Done);
                outcome
            }
            Err(error) => {
                let internal = error.is_internal();
                tracing::debug!(%stage, kind = error.kind(), internal, "dispatch errored");
                let page = self.reporter.report(&error, internal, transport);
                Outcome::Errored {
                    error,
                    internal,
                    page,
                }
            }
        }
    }

    fn run(
        &self,
        ctx: &RequestContext,
        transport: &mut HeaderTransport,
        stage: &mut Stage,
    ) -> RouteResult<Outcome> {
        let default_controller = self.config.default_controller.as_str();

        let route = resolver::resolve(ctx.request_uri(), default_controller)?;
        advance(stage, Stage::Resolved);

        let decision = canonical::decide(
            ctx.request_uri(),
            &route,
            default_controller,
            self.config.redirect_status,
            ctx.has_form_data(),
        );
        if decision.should_redirect {
            let status = decision.status_code;
            redirect(transport, &decision.target, status)?;
            tracing::info!(uri = %ctx.request_uri(), target = %decision.target, status = status.as_u16(), "redirecting to canonical URI");
            return Ok(Outcome::Redirected {
                target: decision.target,
                status,
            });
        }
        advance(stage, Stage::Canonicalized);

        let cased = self.caser.transform(&route.controller)?;
        let qualified = self.registry.qualify(&cased);
        let mut loaded = self.registry.load(&qualified).map_err(|e| match e {
            LoadError::NotFound(name) => RouteError::page_not_found(format!("no controller \"{name}\"")),
            LoadError::NotAController(name) => RouteError::controller(name),
        })?;
        advance(stage, Stage::HandlerLoaded);

        let descriptor = Arc::clone(&loaded.descriptor);
        let operation = descriptor
            .find_routable(&route.method)
            .ok_or_else(|| not_routable(&qualified, &route))?;
        let args = binder::bind(&operation.params, &ctx.params());
        advance(stage, Stage::Bound);

        tracing::info!(controller = %qualified, operation = %operation.name, args = args.len(), "invoking operation");
        let reply = loaded
            .instance
            .invoke(operation, args, ctx)
            .map_err(RouteError::Operation)?;
        advance(stage, Stage::Invoked);

        Ok(Outcome::Invoked(reply))
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::trace!(from = %stage, to = %next, "dispatch stage");
    *stage = next;
}

fn not_routable(qualified: &str, route: &ResolvedRoute) -> RouteError {
    RouteError::page_not_found(format!(
        "no routable operation \"{}\" on \"{qualified}\"",
        route.method
    ))
}

/// Stage a redirect head on `transport` and mark it sent.
fn redirect(transport: &mut HeaderTransport, target: &str, status: http::StatusCode) -> RouteResult<()> {
    let (label, version) = match status {
        http::StatusCode::MOVED_PERMANENTLY => ("Moved Permanently", HttpVersion::Http10),
        http::StatusCode::SEE_OTHER => ("See Other", HttpVersion::Http11),
        _ => ("Temporary Redirect", HttpVersion::Http11),
    };
    let location = HeaderValue::from_str(target).map_err(|_| RouteError::malformed_uri(target))?;

    transport.set_status(status, label, version);
    transport.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    transport.insert(LOCATION, location);
    transport.send();
    Ok(())
}
