//! DB-API tick constructors.
//!
//! `TimeFromTicks`, `DateFromTicks` and `TimestampFromTicks` turn seconds
//! since the Unix epoch into local calendar values. Ticks may be integers
//! or floats; any other value is a usage error.

use crate::core::{OdbcError, Result, Value};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

fn ticks_value(function: &'static str, value: &Value) -> Result<f64> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(x) => Ok(*x),
        _ => Err(OdbcError::TicksNotNumeric { function }),
    }
}

fn local_at(secs: i64, nanos: u32, ticks: f64) -> Result<DateTime<Local>> {
    Local
        .timestamp_opt(secs, nanos)
        .single()
        .ok_or(OdbcError::TicksOutOfRange { ticks })
}

/// Splits fractional ticks into whole seconds and microsecond-rounded nanos.
fn split_ticks(ticks: f64) -> Result<(i64, u32)> {
    if !ticks.is_finite() || ticks.abs() >= i64::MAX as f64 {
        return Err(OdbcError::TicksOutOfRange { ticks });
    }
    let mut secs = ticks.floor() as i64;
    let mut micros = ((ticks - ticks.floor()) * 1_000_000.0).round() as u32;
    if micros >= 1_000_000 {
        secs += 1;
        micros -= 1_000_000;
    }
    Ok((secs, micros * 1_000))
}

/// Local wall-clock time for `ticks`. Fractional seconds are truncated.
pub fn time_from_ticks(ticks: &Value) -> Result<NaiveTime> {
    let secs = match ticks {
        Value::Int(i) => *i,
        _ => {
            let x = ticks_value("TimeFromTicks", ticks)?;
            if !x.is_finite() || x.abs() >= i64::MAX as f64 {
                return Err(OdbcError::TicksOutOfRange { ticks: x });
            }
            x.trunc() as i64
        }
    };
    Ok(local_at(secs, 0, secs as f64)?.time())
}

/// Local calendar date for `ticks`.
pub fn date_from_ticks(ticks: &Value) -> Result<NaiveDate> {
    let x = ticks_value("DateFromTicks", ticks)?;
    let (secs, nanos) = split_ticks(x)?;
    Ok(local_at(secs, nanos, x)?.date_naive())
}

/// Local date and time for `ticks`, keeping microseconds.
pub fn timestamp_from_ticks(ticks: &Value) -> Result<NaiveDateTime> {
    let x = ticks_value("TimestampFromTicks", ticks)?;
    let (secs, nanos) = split_ticks(x)?;
    Ok(local_at(secs, nanos, x)?.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExceptionKind;
    use chrono::Timelike;

    const TICKS: i64 = 1_700_000_000;

    #[test]
    fn test_integer_and_float_agree() {
        let from_int = timestamp_from_ticks(&Value::from(TICKS)).unwrap();
        let from_float = timestamp_from_ticks(&Value::from(TICKS as f64)).unwrap();
        assert_eq!(from_int, from_float);
    }

    #[test]
    fn test_components_match_timestamp() {
        let ticks = Value::from(TICKS);
        let ts = timestamp_from_ticks(&ticks).unwrap();
        assert_eq!(date_from_ticks(&ticks).unwrap(), ts.date());
        assert_eq!(time_from_ticks(&ticks).unwrap(), ts.time());
    }

    #[test]
    fn test_timestamp_matches_chrono_local() {
        let expected = Local.timestamp_opt(TICKS, 0).unwrap().naive_local();
        assert_eq!(timestamp_from_ticks(&Value::from(TICKS)).unwrap(), expected);
    }

    #[test]
    fn test_fractional_ticks() {
        let ts = timestamp_from_ticks(&Value::from(TICKS as f64 + 0.25)).unwrap();
        assert_eq!(ts.nanosecond(), 250_000_000);

        let time = time_from_ticks(&Value::from(TICKS as f64 + 0.75)).unwrap();
        assert_eq!(time.nanosecond(), 0);
        assert_eq!(time, time_from_ticks(&Value::from(TICKS)).unwrap());
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = time_from_ticks(&Value::from("noon")).unwrap_err();
        assert_eq!(err.to_string(), "TimeFromTicks requires a number");
        assert_eq!(err.kind(), ExceptionKind::ProgrammingError);

        assert!(matches!(
            date_from_ticks(&Value::Null),
            Err(OdbcError::TicksNotNumeric { function: "DateFromTicks" })
        ));
        assert!(matches!(
            timestamp_from_ticks(&Value::from(true)),
            Err(OdbcError::TicksNotNumeric { function: "TimestampFromTicks" })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            timestamp_from_ticks(&Value::from(f64::NAN)),
            Err(OdbcError::TicksOutOfRange { .. })
        ));
        assert!(matches!(
            date_from_ticks(&Value::from(1e300)),
            Err(OdbcError::TicksOutOfRange { .. })
        ));
    }
}
