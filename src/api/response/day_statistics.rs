use super::{segments, DecodeError, Record};
use crate::model::{
    DayStatistics, DayStatisticsOwner, DayStatisticsStandard, DayStatisticsTemperature,
};

const STANDARD_FIELDS: usize = 4;
const OWNER_FIELDS: usize = 4;
const TEMPERATURE_FIELDS: usize = 3;
const MAX_SEGMENTS: usize = 3;

fn parse_standard(record: &Record) -> Result<DayStatisticsStandard, DecodeError> {
    record.expect_exactly(STANDARD_FIELDS)?;
    Ok(DayStatisticsStandard {
        energy_generation: record.number(0)?,
        power_generation: record.number(1)?,
        peak_power: record.number(2)?,
        peak_power_time: record.time(3)?,
    })
}

fn parse_owner(record: &Record) -> Result<DayStatisticsOwner, DecodeError> {
    record.expect_exactly(OWNER_FIELDS)?;
    Ok(DayStatisticsOwner {
        energy_consumption: record.number(0)?,
        power_consumption: record.number(1)?,
        standby_power: record.number(2)?,
        standby_power_time: record.time(3)?,
    })
}

fn parse_temperature(record: &Record) -> Result<DayStatisticsTemperature, DecodeError> {
    record.expect_exactly(TEMPERATURE_FIELDS)?;
    Ok(DayStatisticsTemperature {
        minimum: record.number(0)?,
        maximum: record.number(1)?,
        average: record.number(2)?,
    })
}

/// Decodes the standard segment plus the optional owner and temperature segments.
///
/// With two segments the second one is told apart by its width: four fields are owner
/// (consumption) data, anything else must be the three temperature fields.
pub fn parse(body: &str) -> Result<DayStatistics, DecodeError> {
    let records: Vec<Record> = segments(body).into_iter().map(Record::split).collect();

    let (standard, owner, temperature) = match records.as_slice() {
        [standard] => (standard, None, None),
        [standard, second] if second.len() == OWNER_FIELDS => (standard, Some(second), None),
        [standard, second] => (standard, None, Some(second)),
        [standard, owner, temperature] => (standard, Some(owner), Some(temperature)),
        _ => {
            return Err(DecodeError::SegmentCount {
                expected: MAX_SEGMENTS,
                actual: records.len(),
            })
        }
    };

    Ok(DayStatistics {
        standard: parse_standard(standard)?,
        owner: owner.map(parse_owner).transpose()?,
        temperature: temperature.map(parse_temperature).transpose()?,
    })
}
