pub mod day_statistics;
pub mod history;
pub mod statistic;
pub mod status;

use crate::api::wire;
use chrono::{NaiveDate, NaiveTime};
use num_traits::Num;
use thiserror::Error;

/// Reasons a successful (HTTP 200) body could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("expected at least {expected} fields, got {actual}")]
    TooFewFields { expected: usize, actual: usize },

    #[error("expected at most {expected} segments, got {actual}")]
    SegmentCount { expected: usize, actual: usize },

    #[error("field {index} is not a valid {kind}: `{raw}`")]
    InvalidField {
        index: usize,
        kind: &'static str,
        raw: String,
    },

    #[error("field {index} is required but reported as `NaN`")]
    MissingValue { index: usize },
}

/// One comma-delimited record of a response body.
///
/// Fields are addressed by position since the service sends no field names.
pub struct Record<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn split(line: &'a str) -> Self {
        Record {
            fields: line.split(wire::FIELD_DELIMITER).map(str::trim).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn expect_exactly(&self, expected: usize) -> Result<(), DecodeError> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(DecodeError::FieldCount {
                expected,
                actual: self.len(),
            })
        }
    }

    pub fn expect_at_least(&self, expected: usize) -> Result<(), DecodeError> {
        if self.len() >= expected {
            Ok(())
        } else {
            Err(DecodeError::TooFewFields {
                expected,
                actual: self.len(),
            })
        }
    }

    /// Raw text of field `index`, `None` for the `NaN` sentinel.
    fn raw(&self, index: usize) -> Result<Option<&'a str>, DecodeError> {
        let raw = self
            .fields
            .get(index)
            .copied()
            .ok_or_else(|| DecodeError::TooFewFields {
                expected: index + 1,
                actual: self.len(),
            })?;
        Ok(if raw == wire::NAN { None } else { Some(raw) })
    }

    fn required(&self, index: usize) -> Result<&'a str, DecodeError> {
        self.raw(index)?.ok_or(DecodeError::MissingValue { index })
    }

    pub fn date(&self, index: usize) -> Result<NaiveDate, DecodeError> {
        let raw = self.required(index)?;
        wire::from_date(raw).map_err(|_| invalid(index, "date", raw))
    }

    pub fn time(&self, index: usize) -> Result<NaiveTime, DecodeError> {
        let raw = self.required(index)?;
        wire::from_time(raw).map_err(|_| invalid(index, "time", raw))
    }

    pub fn number<T: Num>(&self, index: usize) -> Result<T, DecodeError> {
        let raw = self.required(index)?;
        parse_number(index, raw)
    }

    pub fn optional_number<T: Num>(&self, index: usize) -> Result<Option<T>, DecodeError> {
        self.raw(index)?
            .map(|raw| parse_number(index, raw))
            .transpose()
    }

    /// Every field from `from` onwards, keeping their order.
    pub fn tail(&self, from: usize) -> Vec<Option<String>> {
        self.fields
            .iter()
            .skip(from)
            .map(|&raw| {
                if raw == wire::NAN {
                    None
                } else {
                    Some(raw.to_owned())
                }
            })
            .collect()
    }
}

fn invalid(index: usize, kind: &'static str, raw: &str) -> DecodeError {
    DecodeError::InvalidField {
        index,
        kind,
        raw: raw.to_owned(),
    }
}

/// Plain decimal text only. Float parsing would otherwise accept `nan`, `inf` and `infinity`.
fn is_decimal(raw: &str) -> bool {
    raw.bytes()
        .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+')
}

/* The `NaN` sentinel must be filtered out before this point */
fn parse_number<T: Num>(index: usize, raw: &str) -> Result<T, DecodeError> {
    if !is_decimal(raw) {
        return Err(invalid(index, "number", raw));
    }
    T::from_str_radix(raw, 10).map_err(|_| invalid(index, "number", raw))
}

/// Splits a body into its semicolon-delimited segments.
pub fn segments(body: &str) -> Vec<&str> {
    body.trim().split(wire::RECORD_DELIMITER).collect()
}

#[cfg(test)]
pub(crate) fn read_resource(filename: &str) -> String {
    use std::fs;
    use std::path::PathBuf;

    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push(format!("resources/test/{}", filename));
    fs::read_to_string(d.as_path()).unwrap()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nan_is_absent_for_optional_fields() {
        let record = Record::split("NaN,12");
        assert_eq!(None, record.optional_number::<i64>(0).unwrap());
        assert_eq!(Some(12), record.optional_number::<i64>(1).unwrap());
        assert_eq!(None, record.optional_number::<f64>(0).unwrap());
    }

    #[test]
    fn nan_is_rejected_for_required_fields() {
        let record = Record::split("NaN");
        assert_eq!(
            Err(DecodeError::MissingValue { index: 0 }),
            record.number::<f64>(0)
        );
    }

    #[test]
    fn non_numeric_text_is_invalid() {
        let record = Record::split("12a,1.5");
        assert!(matches!(
            record.number::<i64>(0),
            Err(DecodeError::InvalidField { index: 0, .. })
        ));
        assert!(record.number::<i64>(1).is_err());
        assert_eq!(1.5, record.number::<f64>(1).unwrap());
    }

    #[test]
    fn non_finite_text_is_invalid() {
        let record = Record::split("nan,inf,-inf,infinity,NAN,1e3");
        for index in 0..record.len() {
            assert!(matches!(
                record.optional_number::<f64>(index),
                Err(DecodeError::InvalidField { .. })
            ));
            assert!(record.number::<f64>(index).is_err());
        }
    }

    #[test]
    fn signed_numbers_are_accepted() {
        let record = Record::split("-12,-3.5,+4");
        assert_eq!(-12, record.number::<i64>(0).unwrap());
        assert_eq!(-3.5, record.number::<f64>(1).unwrap());
        assert_eq!(4, record.number::<i64>(2).unwrap());
    }

    #[test]
    fn missing_field_is_too_few_fields() {
        let record = Record::split("1,2");
        assert_eq!(
            Err(DecodeError::TooFewFields {
                expected: 4,
                actual: 2
            }),
            record.number::<i64>(3)
        );
    }

    #[test]
    fn tail_keeps_order_and_absence() {
        let record = Record::split("a,b,1,NaN,3");
        assert_eq!(
            vec![Some("1".to_string()), None, Some("3".to_string())],
            record.tail(2)
        );
        assert!(record.tail(5).is_empty());
    }

    #[test]
    fn segments_ignore_surrounding_whitespace() {
        assert_eq!(vec!["1,2", "3"], segments("1,2;3\n"));
    }
}
