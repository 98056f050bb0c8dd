//! Read-only client for the PVOutput service: current status, history, day statistics and
//! aggregate statistics of a solar system.

pub mod api;
pub mod model;

pub use api::response::DecodeError;
pub use api::{api, get_statistic, get_status, Error, StatisticQuery, StatusQuery, StatusShape};
