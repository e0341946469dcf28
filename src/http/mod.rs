//! Resilient request client: timeout, retry with backoff, uniform outcome.
/// Client and attempt loop
mod client;
/// Request options and retry policy
mod options;
/// Outcome shape returned to callers
mod outcome;
/// Transport seam
mod transport;

pub use client::{
    RequestClient,
    RequestError,
};
pub use options::{
    RequestOptions,
    RetryPolicy,
};
pub use outcome::{
    GENERIC_ERROR,
    Outcome,
    OutcomeShapeError,
};
pub use transport::{
    HttpRequest,
    HttpResponse,
    ReqwestTransport,
    Transport,
    TransportError,
};
