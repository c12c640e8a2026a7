/*!
 * Monitoring
 * Logging setup and request tracing
 */

mod tracer;

pub use tracer::{generate_trace_id, init_tracing, span_request, RequestSpan};
