//! Turning dispatch outcomes into HTTP responses.

use bytes::Bytes;
use frontdesk_core::{HeaderTransport, Outcome};
use frontdesk_model::Reply;

use crate::body::FrontdeskResponseBody;

/// Build the HTTP response for a finished dispatch.
///
/// Invoked operations answer with their reply. Redirects and errors answer with
/// the head staged on `transport`.
#[must_use]
pub fn outcome_to_response(
    outcome: Outcome,
    transport: &HeaderTransport,
) -> http::Response<FrontdeskResponseBody> {
    match outcome {
        Outcome::Invoked(reply) => reply_to_response(reply),
        Outcome::Redirected { status, .. } => staged_response(transport, status, Bytes::new()),
        Outcome::Errored { error, page, .. } => {
            staged_response(transport, error.status_code(), page)
        }
    }
}

fn reply_to_response(reply: Reply) -> http::Response<FrontdeskResponseBody> {
    let mut response = http::Response::new(FrontdeskResponseBody::from_bytes(reply.body));
    *response.status_mut() = reply.status;
    *response.headers_mut() = reply.headers;
    response
}

/// Use the transport's head when it was sent, or `fallback` when it was not.
fn staged_response(
    transport: &HeaderTransport,
    fallback: http::StatusCode,
    body: Bytes,
) -> http::Response<FrontdeskResponseBody> {
    let mut response = http::Response::new(FrontdeskResponseBody::from_bytes(body));
    if transport.should_emit() {
        *response.status_mut() = transport.status();
        *response.headers_mut() = transport.headers().clone();
    } else {
        *response.status_mut() = fallback;
    }
    response
}

/// Plain-text response for failures before dispatch, such as unreadable bodies.
#[must_use]
pub fn plain_response(status: http::StatusCode, message: &str) -> http::Response<FrontdeskResponseBody> {
    let mut response = http::Response::new(FrontdeskResponseBody::from_bytes(message.to_owned()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
