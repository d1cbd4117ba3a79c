//! Integration tests for the Frontdesk HTTP adapter.
//!
//! Requests are driven in-process through
//! [`FrontdeskService::handle_request`] with in-memory bodies, so no server or
//! network is needed.

use std::sync::{Arc, Once};

use bytes::Bytes;
use frontdesk_core::{Controller, ControllerRegistry, Dispatcher, RequestContext, Routable, RouterConfig};
use frontdesk_http::{FrontdeskHttpConfig, FrontdeskService};
use frontdesk_model::{
    BoundArguments, ControllerDescriptor, OperationSpec, ParamSpec, Reply, Visibility,
};
use http_body_util::{BodyExt, Full};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Default controller for the test site. Echoes the operation and its
/// arguments as JSON.
#[derive(Debug, Default)]
pub struct Home;

impl Routable for Home {
    fn descriptor() -> ControllerDescriptor {
        ControllerDescriptor::new("Home")
            .operation(OperationSpec::public("index"))
            .operation(
                OperationSpec::public("methodWithParams")
                    .param(ParamSpec::required("userId"))
                    .param(ParamSpec::array("data"))
                    .param(ParamSpec::optional("withDefault", 123)),
            )
            .operation(OperationSpec::public("throwException"))
            .operation(OperationSpec::public("privateMethod").visibility(Visibility::Private))
            .operation(OperationSpec::public("protectedMethod").visibility(Visibility::Protected))
            .operation(OperationSpec::public("staticMethod").static_receiver())
    }
}

impl Controller for Home {
    fn invoke(
        &mut self,
        operation: &OperationSpec,
        args: BoundArguments,
        ctx: &RequestContext,
    ) -> anyhow::Result<Reply> {
        if operation.name == "throwException" {
            anyhow::bail!("Just an error...");
        }
        echo(operation, args, ctx)
    }
}

/// A non-default controller with a two-word route name (`user_accounts`).
#[derive(Debug, Default)]
pub struct UserAccounts;

impl Routable for UserAccounts {
    fn descriptor() -> ControllerDescriptor {
        ControllerDescriptor::new("UserAccounts")
            .operation(OperationSpec::public("index"))
            .operation(OperationSpec::public("show").param(ParamSpec::required("id")))
    }
}

impl Controller for UserAccounts {
    fn invoke(
        &mut self,
        operation: &OperationSpec,
        args: BoundArguments,
        ctx: &RequestContext,
    ) -> anyhow::Result<Reply> {
        echo(operation, args, ctx)
    }
}

fn echo(operation: &OperationSpec, args: BoundArguments, ctx: &RequestContext) -> anyhow::Result<Reply> {
    let body = serde_json::json!({
        "operation": operation.name,
        "method": ctx.method().as_str(),
        "args": args.into_inner(),
    });
    Reply::json(&body).map_err(Into::into)
}

/// Build a service for the test site with the given redirect status.
#[must_use]
pub fn service_with_redirect(redirect_status: u16) -> FrontdeskService {
    init_tracing();

    let config = RouterConfig::builder()
        .default_controller("home".into())
        .controller_namespace("site::controllers".into())
        .redirect_status(redirect_status)
        .build();
    let mut registry = ControllerRegistry::new(&config.controller_namespace);
    registry.register_type::<Home>().register_type::<UserAccounts>();
    registry.register(
        "Broken",
        ControllerDescriptor::new("Broken").operation(OperationSpec::public("show")),
        || Box::new(Home),
    );

    let dispatcher = Dispatcher::new(config, Arc::new(registry));
    FrontdeskService::new(Arc::new(dispatcher), FrontdeskHttpConfig::default())
}

/// Build a service for the test site with default settings.
#[must_use]
pub fn service() -> FrontdeskService {
    service_with_redirect(301)
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    /// Response status.
    pub status: http::StatusCode,
    /// Response headers.
    pub headers: http::HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl TestResponse {
    /// A header value as a string, or `""` when absent.
    #[must_use]
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// The body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

/// Send a `GET` request.
pub async fn get(service: &FrontdeskService, uri: &str) -> TestResponse {
    send(service, http::Method::GET, uri, None).await
}

/// Send a form `POST` request.
pub async fn post_form(service: &FrontdeskService, uri: &str, form: &str) -> TestResponse {
    send(service, http::Method::POST, uri, Some(form)).await
}

async fn send(
    service: &FrontdeskService,
    method: http::Method,
    uri: &str,
    form: Option<&str>,
) -> TestResponse {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if form.is_some() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    }
    let body = Full::new(Bytes::from(form.unwrap_or_default().to_owned()));
    let request = builder.body(body).expect("valid request");

    let response = service.handle_request(request).await;
    let (parts, body) = response.into_parts();
    let body = body.collect().await.expect("collect body").to_bytes();
    TestResponse {
        status: parts.status,
        headers: parts.headers,
        body,
    }
}

mod test_binding;
mod test_errors;
mod test_redirect;
mod test_routing;
