mod auth;
mod client;
mod diff;
mod error;
mod gateway;
mod logger;
mod planner;
mod protocol;
mod types;

pub use client::{DaikinClient, DaikinClientBuilder};
pub use error::{Error, Result, ValidationError};
pub use logger::MessageLogMode;
pub use planner::{
    plan as plan_setpoints, resolve as resolve_setpoints, validate as validate_setpoints,
};
pub use types::*;
