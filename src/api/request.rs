use crate::api::response::statistic::Blocks;
use crate::api::wire;
use crate::model::SystemId;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

const FLAG_SET: &str = "1";

pub type Params = HashMap<&'static str, String>;

/// Parameters of a `getstatus` request. Unset values are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusQuery {
    /// Defaults to today on the service side.
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub history: bool,
    pub ascending: bool,
    pub limit: Option<u32>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub extended_data: bool,
    pub system_id: Option<SystemId>,
    pub day_statistics: bool,
}

/// Response shape of a `getstatus` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusShape {
    Current,
    History,
    DayStatistics,
}

impl StatusQuery {
    /// Day statistics take precedence when history is requested as well.
    pub fn shape(&self) -> StatusShape {
        if self.day_statistics {
            StatusShape::DayStatistics
        } else if self.history {
            StatusShape::History
        } else {
            StatusShape::Current
        }
    }

    pub fn params(&self) -> Params {
        let mut params = Params::new();
        insert_date(&mut params, "d", self.date);
        insert_time(&mut params, "t", self.time);
        insert_flag(&mut params, "h", self.history);
        insert_flag(&mut params, "asc", self.ascending);
        insert_number(&mut params, "limit", self.limit);
        insert_time(&mut params, "from", self.time_from);
        insert_time(&mut params, "to", self.time_to);
        insert_flag(&mut params, "ext", self.extended_data);
        insert_number(&mut params, "sid1", self.system_id);
        insert_flag(&mut params, "stats", self.day_statistics);
        params
    }
}

/// Parameters of a `getstatistic` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub consumption_and_import: bool,
    pub credits_debits: bool,
    pub system_id: Option<SystemId>,
}

impl StatisticQuery {
    pub fn blocks(&self) -> Blocks {
        Blocks {
            consumption_and_import: self.consumption_and_import,
            credits_debits: self.credits_debits,
        }
    }

    pub fn params(&self) -> Params {
        let mut params = Params::new();
        insert_date(&mut params, "df", self.date_from);
        insert_date(&mut params, "dt", self.date_to);
        insert_flag(&mut params, "c", self.consumption_and_import);
        insert_flag(&mut params, "crdr", self.credits_debits);
        insert_number(&mut params, "sid1", self.system_id);
        params
    }
}

fn insert_date(params: &mut Params, key: &'static str, value: Option<NaiveDate>) {
    if let Some(date) = value {
        params.insert(key, wire::to_date(date));
    }
}

fn insert_time(params: &mut Params, key: &'static str, value: Option<NaiveTime>) {
    if let Some(time) = value {
        params.insert(key, wire::to_time(time));
    }
}

fn insert_flag(params: &mut Params, key: &'static str, value: bool) {
    if value {
        params.insert(key, FLAG_SET.to_string());
    }
}

fn insert_number<T: ToString>(params: &mut Params, key: &'static str, value: Option<T>) {
    if let Some(number) = value {
        params.insert(key, number.to_string());
    }
}
