pub mod errors;
pub mod telemetry;

pub use errors::*;
pub use telemetry::init_tracing;
