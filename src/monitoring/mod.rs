/*!
 * Monitoring
 * Structured tracing setup
 */

mod tracer;

pub use tracer::{init_tracing, init_tracing_with, span_pass, LogFile, TracingOptions, ENV_TRACE_JSON};
