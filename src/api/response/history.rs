use super::{segments, DecodeError, Record};
use crate::model::HistoryEntry;

/// date, time, energy generation, energy efficiency, instantaneous power, average power,
/// normalised output, energy consumption, power consumption, temperature, voltage
pub const STANDARD_FIELDS: usize = 11;

fn parse_row(row: &str) -> Result<HistoryEntry, DecodeError> {
    let record = Record::split(row);
    record.expect_at_least(STANDARD_FIELDS)?;

    Ok(HistoryEntry {
        date: record.date(0)?,
        time: record.time(1)?,
        energy_generation: record.number(2)?,
        energy_efficiency: record.number(3)?,
        power_generation: record.number(4)?,
        average_power: record.number(5)?,
        normalised_output: record.number(6)?,
        energy_consumption: record.optional_number(7)?,
        power_consumption: record.optional_number(8)?,
        temperature: record.optional_number(9)?,
        voltage: record.optional_number(10)?,
        extended_values: record.tail(STANDARD_FIELDS),
    })
}

/// Decodes one entry per row, in the order the service returned them.
pub fn parse(body: &str) -> Result<Vec<HistoryEntry>, DecodeError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    segments(body).into_iter().map(parse_row).collect()
}
