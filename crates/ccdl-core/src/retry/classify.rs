//! Classify HTTP status and curl errors into retry policy error kinds.

use crate::error::CatalogError;
use crate::retry::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a catalog error. Only transport failures and server-side
/// statuses are retryable; every request-level rejection is final.
pub fn classify(e: &CatalogError) -> ErrorKind {
    match e {
        CatalogError::Transport(ce) => classify_curl_error(ce),
        CatalogError::ServerError => ErrorKind::Http5xx(500),
        CatalogError::UnexpectedStatus(code) => classify_http_status(*code),
        _ => ErrorKind::Other,
    }
}
