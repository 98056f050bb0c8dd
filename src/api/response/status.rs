use super::{DecodeError, Record};
use crate::model::CurrentStatus;

/// date, time, energy generation, power generation, energy consumption, power consumption,
/// normalised output, temperature, voltage
pub const STANDARD_FIELDS: usize = 9;

pub fn parse(body: &str) -> Result<CurrentStatus, DecodeError> {
    let record = Record::split(body.trim());
    record.expect_at_least(STANDARD_FIELDS)?;

    Ok(CurrentStatus {
        date: record.date(0)?,
        time: record.time(1)?,
        energy_generation: record.number(2)?,
        power_generation: record.number(3)?,
        energy_consumption: record.optional_number(4)?,
        power_consumption: record.optional_number(5)?,
        normalised_output: record.number(6)?,
        temperature: record.optional_number(7)?,
        voltage: record.optional_number(8)?,
        extended_values: record.tail(STANDARD_FIELDS),
    })
}
