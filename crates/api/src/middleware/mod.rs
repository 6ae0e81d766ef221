//! HTTP middleware stack for the shop API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (one `http_request` span per request)
//! 3. Request ID (recorded on that span, echoed in the response)

pub mod request_id;
pub mod trace;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use trace::trace_layer;
