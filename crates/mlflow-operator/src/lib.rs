pub mod context;
pub mod reconciler;
pub mod telemetry;
