//! Text formats used on the wire by the PVOutput service.

use chrono::{NaiveDate, NaiveTime};

/// Marks an absent numeric value in a response.
pub const NAN: &str = "NaN";
/// Separates fields within a record.
pub const FIELD_DELIMITER: char = ',';
/// Separates records (history) or segments (day statistics).
pub const RECORD_DELIMITER: char = ';';

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H:%M";

pub fn to_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn from_date(date: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
}

pub fn to_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn from_time(time: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(time, TIME_FORMAT)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!("20230601", to_date(date));
        assert_eq!(date, from_date(&to_date(date)).unwrap());
    }

    #[test]
    fn time_round_trip() {
        let time = NaiveTime::from_hms_opt(7, 5, 0).unwrap();
        assert_eq!("07:05", to_time(time));
        assert_eq!(time, from_time(&to_time(time)).unwrap());
    }

    #[test]
    fn time_is_24_hour() {
        let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!("23:59", to_time(time));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(from_date("2023-06-01").is_err());
        assert!(from_date("NaN").is_err());
        assert!(from_time("2:30 PM").is_err());
    }
}
