//! Retry and backoff policy for catalog transport.
//!
//! Only the HTTP collaborator retries. Errors are classified (timeouts,
//! throttling, connection failures, 5xx) and retried with exponential
//! backoff; the final failure is surfaced unchanged to the engine.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
