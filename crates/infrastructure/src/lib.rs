//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the Met.no adapter, configuration loading, logging setup and the
//! refresh scheduler.

pub mod adapters;
pub mod config;
pub mod scheduled_tasks;
pub mod scheduler;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigValidationError, LocationConfig, LoggingAppConfig, MetNoAppConfig,
    UpdateAppConfig,
};
pub use scheduled_tasks::{FORECAST_REFRESH_TASK, create_forecast_refresh_task};
pub use scheduler::{SchedulerConfig, SchedulerError, TaskEvent, TaskScheduler, TaskStats};
pub use telemetry::{TelemetryError, init_logging};
