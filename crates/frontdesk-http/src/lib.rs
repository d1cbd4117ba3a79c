//! HTTP service layer for Frontdesk.
//!
//! - **Service**: hyper `Service` that builds a request context, runs the
//!   dispatcher, and tags responses with a request id
//! - **Response helpers**: dispatch outcome to HTTP response conversion
//! - **Body**: buffered or empty response body

pub mod body;
pub mod response;
pub mod service;

pub use body::FrontdeskResponseBody;
pub use service::{FrontdeskHttpConfig, FrontdeskService};
