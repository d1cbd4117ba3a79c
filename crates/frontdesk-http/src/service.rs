//! Frontdesk HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use frontdesk_core::query::{QueryParams, parse_query};
use frontdesk_core::{Dispatcher, HeaderTransport, RequestContext};
use http_body_util::{BodyExt, Limited};
use hyper::body::Incoming;

use crate::body::FrontdeskResponseBody;
use crate::response::{outcome_to_response, plain_response};

/// Content type of form posts whose fields are merged into the request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for the HTTP adapter.
#[derive(Debug, Clone)]
pub struct FrontdeskHttpConfig {
    /// Largest form body read into memory, in bytes.
    pub max_form_size: usize,
}

impl Default for FrontdeskHttpConfig {
    fn default() -> Self {
        Self {
            max_form_size: 1024 * 1024,
        }
    }
}

/// Hyper `Service` implementation for Frontdesk.
///
/// Converts each request into a [`RequestContext`], runs the [`Dispatcher`],
/// and converts the outcome back into a response.
#[derive(Debug, Clone)]
pub struct FrontdeskService {
    dispatcher: Arc<Dispatcher>,
    config: Arc<FrontdeskHttpConfig>,
}

impl FrontdeskService {
    /// Create a new `FrontdeskService`.
    pub fn new(dispatcher: Arc<Dispatcher>, config: FrontdeskHttpConfig) -> Self {
        Self {
            dispatcher,
            config: Arc::new(config),
        }
    }

    /// Handle one request with any body type.
    ///
    /// Every response carries an `x-request-id` and a `server` header.
    pub async fn handle_request<B>(&self, req: http::Request<B>) -> http::Response<FrontdeskResponseBody>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let response = self.process_request(req, &request_id).await;
        add_common_headers(response, &request_id)
    }

    async fn process_request<B>(
        &self,
        req: http::Request<B>,
        request_id: &str,
    ) -> http::Response<FrontdeskResponseBody>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();
        let request_uri = parts
            .uri
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str);

        tracing::debug!(
            request_id,
            method = %parts.method,
            uri = %request_uri,
            "processing request",
        );

        let mut ctx = RequestContext::new(request_uri).with_method(parts.method.clone());
        if is_form_post(&parts) {
            match collect_form(body, self.config.max_form_size).await {
                Ok(form) => ctx = ctx.with_form(form),
                Err(message) => {
                    tracing::warn!(request_id, error = %message, "failed to read form body");
                    return plain_response(http::StatusCode::BAD_REQUEST, &message);
                }
            }
        }

        let mut transport = HeaderTransport::new();
        let outcome = self.dispatcher.handle(&ctx, &mut transport);
        let response = outcome_to_response(outcome, &transport);

        tracing::info!(
            request_id,
            uri = %request_uri,
            status = response.status().as_u16(),
            "request complete",
        );
        response
    }
}

impl hyper::service::Service<http::Request<Incoming>> for FrontdeskService {
    type Response = http::Response<FrontdeskResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { Ok(service.handle_request(req).await) })
    }
}

fn is_form_post(parts: &http::request::Parts) -> bool {
    parts.method == http::Method::POST
        && parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| {
                v.split(';')
                    .next()
                    .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
            })
}

/// Collect a form body, refusing anything larger than `limit` bytes.
async fn collect_form<B>(body: B, limit: usize) -> Result<QueryParams, String>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let bytes = Limited::new(body, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| format!("Failed to read request body: {e}"))?;
    let raw = std::str::from_utf8(&bytes).map_err(|_| "Form body is not valid UTF-8".to_owned())?;
    Ok(parse_query(raw))
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<FrontdeskResponseBody>,
    request_id: &str,
) -> http::Response<FrontdeskResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }
    headers.insert(http::header::SERVER, http::HeaderValue::from_static("Frontdesk"));

    response
}
