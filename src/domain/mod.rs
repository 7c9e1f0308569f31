// Domain layer - Battery and telemetry models
pub mod battery;
pub mod telemetry;
