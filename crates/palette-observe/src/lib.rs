//! Observability setup for Palette: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
