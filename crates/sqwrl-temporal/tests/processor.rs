//! Datetime String Processor Tests
//!
//! Tests for: strip, pad, normalize, express_at_granularity,
//! finest_specified_granularity, component getters, granule counts

use pretty_assertions::assert_eq;
use rstest::rstest;
use sqwrl_temporal::{DatetimeStringProcessor, Granularity, TemporalError};

fn xsd() -> DatetimeStringProcessor {
    DatetimeStringProcessor::xsd()
}

fn jdbc() -> DatetimeStringProcessor {
    DatetimeStringProcessor::jdbc()
}

// ============================================================================
// Stripping and padding
// ============================================================================

#[rstest]
#[case("1988-02-01T12:01:22.000", Granularity::Years, "1988")]
#[case("1988-02-01T12:01:22.000", Granularity::Months, "1988-02")]
#[case("1988-02-01T12:01:22.000", Granularity::Hours, "1988-02-01T12")]
#[case("1988-02-01T12:01:22.000", Granularity::Milliseconds, "1988-02-01T12:01:22.000")]
#[case("1999-02-01", Granularity::Minutes, "1999-02-01")]
fn test_strip(#[case] input: &str, #[case] granularity: Granularity, #[case] expected: &str) {
    assert_eq!(xsd().strip(input, granularity).unwrap(), expected);
}

#[rstest]
#[case("1988", false, "1988-01-01T00:00:00.000")]
#[case("1988", true, "1988-12-31T23:59:59.999")]
#[case("1988-02", false, "1988-02-01T00:00:00.000")]
#[case("1988-02", true, "1988-02-29T23:59:59.999")]
#[case("1989-02", true, "1989-02-28T23:59:59.999")]
#[case("1988-04", true, "1988-04-30T23:59:59.999")]
#[case("1988-10-10T12", true, "1988-10-10T12:59:59.999")]
#[case("1988-10-10T12", false, "1988-10-10T12:00:00.000")]
#[case("1988-10-10T12:30:15", true, "1988-10-10T12:30:15.999")]
fn test_pad_xsd(#[case] input: &str, #[case] round_up: bool, #[case] expected: &str) {
    assert_eq!(xsd().pad(input, round_up).unwrap(), expected);
}

#[test]
fn test_pad_jdbc() {
    assert_eq!(jdbc().pad("1988-1-1 12:10", true).unwrap(), "1988-1-1 12:10:59.999");
    assert_eq!(jdbc().pad("1988-10-10 12", false).unwrap(), "1988-10-10 12:00:00.000");
}

#[test]
fn test_pad_rejects_bad_month() {
    let err = xsd().pad("1988-13", true).unwrap_err();
    assert_eq!(err, TemporalError::InvalidMonth { month: 13 });
}

#[test]
fn test_pad_rejects_empty() {
    assert!(xsd().pad("  ", false).is_err());
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_express_at_granularity() {
    let expressed = jdbc()
        .express_at_granularity("1988-02-03 10:10:11.433", Granularity::Months, false)
        .unwrap();
    assert_eq!(expressed, "1988-02-01 00:00:00.000");
}

#[test]
fn test_normalize_rounds() {
    let p = xsd();
    assert_eq!(
        p.normalize("1988-02", Granularity::Days, false).unwrap(),
        "1988-02-01T00:00:00.000"
    );
    assert_eq!(
        p.normalize(" 2000-02-10T08:15 ", Granularity::Hours, true).unwrap(),
        "2000-02-10T08:59:59.999"
    );
}

#[test]
fn test_normalize_rejects_impossible_dates() {
    let err = xsd()
        .normalize("1988-02-30", Granularity::Days, false)
        .unwrap_err();
    assert!(matches!(err, TemporalError::InvalidDatetime { .. }));
}

// ============================================================================
// Components
// ============================================================================

#[rstest]
#[case("1999", Granularity::Years)]
#[case("1999-02", Granularity::Months)]
#[case("1999-02-03T04", Granularity::Hours)]
#[case("1999-02-03T04:05:06.007", Granularity::Milliseconds)]
fn test_finest_specified_granularity(#[case] input: &str, #[case] expected: Granularity) {
    assert_eq!(xsd().finest_specified_granularity(input).unwrap(), expected);
}

#[test]
fn test_component_getters() {
    let p = xsd();
    let value = "1999-02-03T04:05:06.007";
    assert_eq!(p.years(value).unwrap(), 1999);
    assert_eq!(p.months(value).unwrap(), 2);
    assert_eq!(p.days(value).unwrap(), 3);
    assert_eq!(p.hours(value).unwrap(), 4);
    assert_eq!(p.minutes(value).unwrap(), 5);
    assert_eq!(p.seconds(value).unwrap(), 6);
    assert_eq!(p.milliseconds(value).unwrap(), 7);
}

#[test]
fn test_component_of_incomplete_datetime() {
    let err = xsd().hours("1999-02").unwrap_err();
    assert!(matches!(
        err,
        TemporalError::IncompleteDatetime {
            granularity: Granularity::Hours,
            ..
        }
    ));
}

// ============================================================================
// Granule counts
// ============================================================================

#[rstest]
#[case(0, Granularity::Days, "0001-01-01T00:00:00.000")]
#[case(31, Granularity::Days, "0001-02-01T00:00:00.000")]
#[case(25, Granularity::Hours, "0001-01-02T01:00:00.000")]
#[case(1999, Granularity::Years, "2000-01-01T00:00:00.000")]
#[case(13, Granularity::Months, "0002-02-01T00:00:00.000")]
#[case(1500, Granularity::Milliseconds, "0001-01-01T00:00:01.500")]
fn test_granule_count(#[case] count: i64, #[case] granularity: Granularity, #[case] expected: &str) {
    assert_eq!(
        xsd().granule_count_to_datetime_string(count, granularity).unwrap(),
        expected
    );
}

#[test]
fn test_negative_calendar_count_is_out_of_range() {
    let err = xsd()
        .granule_count_to_datetime_string(-1, Granularity::Years)
        .unwrap_err();
    assert!(matches!(err, TemporalError::OutOfRange { .. }));
}
