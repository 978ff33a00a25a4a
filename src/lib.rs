pub use chrono;
pub use chrono::NaiveDate;
pub use log;

pub mod config;
pub mod filters;
pub mod model_builder;
pub mod response;
pub mod time;
pub mod transit_data;

mod engine;

pub use config::RequestParams;
pub use engine::raptor::Raptor;
pub use filters::Filters;
pub use response::{Path, PathItem, PathItemKind};
pub use time::DateTime;
pub use transit_data::{
    ConnectionKind, ModelError, RouteIdx, StopAreaIdx, StopPointIdx, TransitData,
    VehicleJourneyIdx,
};

/// Walking speed used to convert access and egress distances into
/// durations, in meters per second.
pub const WALKING_SPEED: f64 = 1.38;

/// Minimum time needed to change vehicles within one stop point,
/// in seconds.
pub const MIN_TRANSFER_DURATION: u32 = 120;
