use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

/// Energy in watt-hours.
pub type Wh = i64;
/// Power in watts.
pub type W = i64;

pub type SystemId = u64;

pub const DEFAULT_HOST: &str = "https://pvoutput.org";

/// Identity of a single PVOutput system and the client used to reach the service.
#[derive(Clone)]
pub struct Api {
    pub host: String,
    pub system_id: SystemId,
    pub api_key: String,
    pub client: reqwest::Client,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("host", &self.host)
            .field("system_id", &self.system_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Values appended after the standard fields. Their number depends on which
/// extended channels the account has configured.
pub type ExtendedValues = Vec<Option<String>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentStatus {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub energy_generation: Wh,
    pub power_generation: W,
    pub energy_consumption: Option<Wh>,
    pub power_consumption: Option<W>,
    pub normalised_output: f64,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub extended_values: ExtendedValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub energy_generation: Wh,
    pub energy_efficiency: f64,
    /// Instantaneous power at the time of the reading.
    pub power_generation: W,
    pub average_power: W,
    pub normalised_output: f64,
    pub energy_consumption: Option<Wh>,
    pub power_consumption: Option<W>,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub extended_values: ExtendedValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatisticsStandard {
    pub energy_generation: Wh,
    pub power_generation: W,
    pub peak_power: W,
    pub peak_power_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatisticsOwner {
    pub energy_consumption: Wh,
    pub power_consumption: W,
    pub standby_power: W,
    pub standby_power_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatisticsTemperature {
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatistics {
    pub standard: DayStatisticsStandard,
    pub owner: Option<DayStatisticsOwner>,
    pub temperature: Option<DayStatisticsTemperature>,
}

/// Decoded `getstatus` response. The variant follows the flags the request was made with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum Status {
    Current(CurrentStatus),
    History(Vec<HistoryEntry>),
    DayStatistics(DayStatistics),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionAndImport {
    pub energy_consumed: Wh,
    pub peak_energy_import: Wh,
    pub off_peak_energy_import: Wh,
    pub shoulder_energy_import: Wh,
    pub high_shoulder_energy_import: Wh,
    pub average_consumption: Wh,
    pub minimum_consumption: Wh,
    pub maximum_consumption: Wh,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditsDebits {
    pub credit_amount: f64,
    pub debit_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStatistic {
    pub energy_generated: Wh,
    pub energy_exported: Wh,
    pub average_generation: Wh,
    pub minimum_generation: Wh,
    pub maximum_generation: Wh,
    pub average_efficiency: f64,
    pub outputs: u32,
    /// First date the service actually included, which may differ from the requested one.
    pub actual_date_from: NaiveDate,
    pub actual_date_to: NaiveDate,
    pub record_efficiency: f64,
    pub record_date: NaiveDate,
    pub consumption_and_import: Option<ConsumptionAndImport>,
    pub credits_debits: Option<CreditsDebits>,
}
