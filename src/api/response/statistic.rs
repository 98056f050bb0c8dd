use super::{DecodeError, Record};
use crate::model::{AggregateStatistic, ConsumptionAndImport, CreditsDebits};

const STANDARD_FIELDS: usize = 11;
const CONSUMPTION_AND_IMPORT_FIELDS: usize = 8;
const CREDITS_DEBITS_FIELDS: usize = 2;

/// Optional blocks requested from `getstatistic`. The service omits unrequested blocks
/// entirely, so they decide how the record is sliced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocks {
    pub consumption_and_import: bool,
    pub credits_debits: bool,
}

impl Blocks {
    fn expected_fields(&self) -> usize {
        let mut fields = STANDARD_FIELDS;
        if self.consumption_and_import {
            fields += CONSUMPTION_AND_IMPORT_FIELDS;
        }
        if self.credits_debits {
            fields += CREDITS_DEBITS_FIELDS;
        }
        fields
    }
}

fn parse_consumption_and_import(
    record: &Record,
    offset: usize,
) -> Result<ConsumptionAndImport, DecodeError> {
    Ok(ConsumptionAndImport {
        energy_consumed: record.number(offset)?,
        peak_energy_import: record.number(offset + 1)?,
        off_peak_energy_import: record.number(offset + 2)?,
        shoulder_energy_import: record.number(offset + 3)?,
        high_shoulder_energy_import: record.number(offset + 4)?,
        average_consumption: record.number(offset + 5)?,
        minimum_consumption: record.number(offset + 6)?,
        maximum_consumption: record.number(offset + 7)?,
    })
}

fn parse_credits_debits(record: &Record, offset: usize) -> Result<CreditsDebits, DecodeError> {
    Ok(CreditsDebits {
        credit_amount: record.number(offset)?,
        debit_amount: record.number(offset + 1)?,
    })
}

pub fn parse(body: &str, blocks: Blocks) -> Result<AggregateStatistic, DecodeError> {
    let record = Record::split(body.trim());
    record.expect_exactly(blocks.expected_fields())?;

    let mut offset = STANDARD_FIELDS;
    let consumption_and_import = if blocks.consumption_and_import {
        let block = parse_consumption_and_import(&record, offset)?;
        offset += CONSUMPTION_AND_IMPORT_FIELDS;
        Some(block)
    } else {
        None
    };
    let credits_debits = if blocks.credits_debits {
        Some(parse_credits_debits(&record, offset)?)
    } else {
        None
    };

    Ok(AggregateStatistic {
        energy_generated: record.number(0)?,
        energy_exported: record.number(1)?,
        average_generation: record.number(2)?,
        minimum_generation: record.number(3)?,
        maximum_generation: record.number(4)?,
        average_efficiency: record.number(5)?,
        outputs: record.number(6)?,
        actual_date_from: record.date(7)?,
        actual_date_to: record.date(8)?,
        record_efficiency: record.number(9)?,
        record_date: record.date(10)?,
        consumption_and_import,
        credits_debits,
    })
}
