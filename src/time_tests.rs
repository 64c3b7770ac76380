use super::*;

#[test]
fn roundtrips() {
    let dates = ["1979-05-27", "2000-01-01", "9999-12-31", "0000-01-01", "2024-02-29"];
    for input in dates {
        assert_eq!(Date::parse(input).unwrap().to_string(), input);
    }

    let times = [
        "07:32:00",
        "00:00:00",
        "23:59:59",
        "00:32:00.5",
        "00:32:00.999999",
        "12:30:45.123456789",
        "00:00:00.001",
        "00:00:00.100",
    ];
    for input in times {
        assert_eq!(Time::parse(input).unwrap().to_string(), input);
    }

    let offsets = [
        "1979-05-27T07:32:00Z",
        "1979-05-27T07:32:00+00:00",
        "1979-05-27T00:32:00-07:00",
        "1979-05-27T00:32:00.999999-07:00",
        "9999-12-31T23:59:59.999999999+23:59",
    ];
    for input in offsets {
        assert_eq!(OffsetDateTime::parse(input).unwrap().to_string(), input);
    }

    let locals = ["1979-05-27T07:32:00", "1979-05-27T00:32:00.999999"];
    for input in locals {
        assert_eq!(LocalDateTime::parse(input).unwrap().to_string(), input);
    }
}

#[test]
fn normalizing_roundtrips() {
    let cases: &[(&str, &str)] = &[
        ("1979-05-27 07:32:00Z", "1979-05-27T07:32:00Z"),
        ("1987-07-05t17:45:00z", "1987-07-05T17:45:00Z"),
        ("1979-05-27 07:32:00", "1979-05-27T07:32:00"),
        ("1979-05-27T07:32:00-00:00", "1979-05-27T07:32:00+00:00"),
        ("1979-05-27T07:32:00.1234567891Z", "1979-05-27T07:32:00.123456789Z"),
    ];
    for (input, expected) in cases {
        let text = match OffsetDateTime::parse(input) {
            Some(value) => value.to_string(),
            None => LocalDateTime::parse(input).unwrap().to_string(),
        };
        assert_eq!(&text, expected, "{input}");
    }
}

#[test]
fn calendar_validation() {
    assert!(Date::parse("2024-02-29").is_some());
    assert!(Date::parse("2000-02-29").is_some());
    assert!(Date::parse("2023-02-29").is_none());
    assert!(Date::parse("1900-02-29").is_none());
    assert!(Date::parse("1979-00-27").is_none());
    assert!(Date::parse("1979-13-27").is_none());
    assert!(Date::parse("1979-04-31").is_none());
    assert!(Date::parse("1979-05-00").is_none());
    assert!(Date::parse("1979-5-27").is_none());
    assert!(Date::parse("1979-05-2").is_none());
    assert!(Date::parse("1979/05/27").is_none());

    for month in 1..=12u8 {
        let last = days_in_month(2023, month);
        let text = format!("2023-{month:02}-{last:02}");
        assert!(Date::parse(&text).is_some(), "{text}");
        let text = format!("2023-{month:02}-{:02}", last + 1);
        assert!(Date::parse(&text).is_none(), "{text}");
    }
}

#[test]
fn clock_validation() {
    assert!(Time::parse("24:00:00").is_none());
    assert!(Time::parse("23:60:00").is_none());
    assert!(Time::parse("23:59:60").is_none());
    assert!(Time::parse("99:99:99").is_none());
    assert!(Time::parse("07:32").is_none());
    assert!(Time::parse("07:32:00.").is_none());
    assert!(Time::parse("07:32:00.1a").is_none());
    assert!(Time::parse("7:32:00").is_none());
    assert!(Time::parse("07:32:00Z").is_none());

    assert!(TimeOffset::parse("+24:00").is_none());
    assert!(TimeOffset::parse("+00:60").is_none());
    assert!(TimeOffset::parse("+0000").is_none());
    assert_eq!(TimeOffset::parse("z"), Some(TimeOffset::Z));
    assert_eq!(
        TimeOffset::parse("-07:30"),
        Some(TimeOffset::Custom { minutes: -450 })
    );

    assert!(OffsetDateTime::parse("1979-00-27T07:32:00.123Z").is_none());
    assert!(OffsetDateTime::parse("1979-05-27T07:32:00").is_none());
    assert!(LocalDateTime::parse("1979-05-27X07:32:00").is_none());
    assert!(LocalDateTime::parse("1979-05-27").is_none());
}

#[test]
fn fraction_precision() {
    let t = Time::parse("12:00:00.5").unwrap();
    assert_eq!(t.nanosecond, 500_000_000);
    assert_eq!(t.subsecond_precision(), 1);

    let t = Time::parse("12:00:00.000000001").unwrap();
    assert_eq!(t.nanosecond, 1);
    assert_eq!(t.subsecond_precision(), 9);

    let t = Time::parse("12:00:00.1234567899").unwrap();
    assert_eq!(t.nanosecond, 123_456_789);
    assert_eq!(t.subsecond_precision(), 9);

    let t = Time::parse("12:00:00").unwrap();
    assert_eq!(t.subsecond_precision(), 0);
}

#[test]
fn leap_year_known_values() {
    for year in [0u16, 4, 400, 1600, 2000, 2024] {
        assert!(is_leap_year(year), "{year}");
    }
    for year in [1u16, 100, 1900, 2100, 2023] {
        assert!(!is_leap_year(year), "{year}");
    }
}
