//! End-to-end streaming scenarios, anchored to the RFC 5545 §3.3.10
//! examples (date-only, floating, and zoned anchors).

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;

use super::core::RuleErrorKind;
use super::parse;

const NEW_YORK: Tz = chrono_tz::America::New_York;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn nyc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Tz> {
    NEW_YORK.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
}

fn stream_dates(text: &str, anchor: NaiveDate, limit: usize) -> Vec<NaiveDate> {
    parse(text).unwrap().stream(anchor).take(limit).collect()
}

fn stream_nyc(text: &str, anchor: DateTime<Tz>, limit: usize) -> Vec<DateTime<Tz>> {
    parse(text).unwrap().stream(anchor).take(limit).collect()
}

#[test_log::test]
fn daily_count() {
    let out = stream_nyc("FREQ=DAILY;COUNT=10", nyc(1997, 9, 2, 9), 100);
    assert_eq!(out.len(), 10);
    assert_eq!(out[0], nyc(1997, 9, 2, 9));
    assert_eq!(out[9], nyc(1997, 9, 11, 9));
    for (i, occurrence) in out.iter().enumerate() {
        assert_eq!(
            *occurrence,
            nyc(1997, 9, 2 + u32::try_from(i).unwrap(), 9)
        );
    }
}

#[test_log::test]
fn daily_until() {
    let out = stream_nyc("FREQ=DAILY;UNTIL=19971224T000000Z", nyc(1997, 9, 2, 9), 1000);
    // Sep 2 through Dec 23: the Dec 24 occurrence reads 14:00 UTC,
    // past the bound.
    assert_eq!(out.len(), 113);
    assert_eq!(out[0], nyc(1997, 9, 2, 9));
    assert_eq!(out[112], nyc(1997, 12, 23, 9));
}

#[test_log::test]
fn daily_interval() {
    let out = stream_nyc("RRULE:FREQ=DAILY;INTERVAL=2", nyc(1997, 9, 2, 9), 5);
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 2, 9),
            nyc(1997, 9, 4, 9),
            nyc(1997, 9, 6, 9),
            nyc(1997, 9, 8, 9),
            nyc(1997, 9, 10, 9),
        ]
    );
}

#[test_log::test]
fn daily_interval_with_count() {
    let out = stream_nyc("FREQ=DAILY;INTERVAL=10;COUNT=5", nyc(1997, 9, 2, 9), 100);
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 2, 9),
            nyc(1997, 9, 12, 9),
            nyc(1997, 9, 22, 9),
            nyc(1997, 10, 2, 9),
            nyc(1997, 10, 12, 9),
        ]
    );
}

#[test_log::test]
fn every_day_in_january_two_spellings() {
    // YEARLY expanding January, and DAILY limited to January, walk the
    // same 93 mornings (the UNTIL instant is the last one, inclusive).
    let yearly = stream_nyc(
        "FREQ=YEARLY;UNTIL=20000131T140000Z;BYDAY=SU,MO,TU,WE,TH,FR,SA;BYMONTH=1",
        nyc(1998, 1, 1, 9),
        1000,
    );
    let daily = stream_nyc(
        "FREQ=DAILY;UNTIL=20000131T140000Z;BYMONTH=1",
        nyc(1998, 1, 1, 9),
        1000,
    );
    assert_eq!(yearly.len(), 93);
    assert_eq!(yearly, daily);
    assert_eq!(yearly[30], nyc(1998, 1, 31, 9));
    assert_eq!(yearly[31], nyc(1999, 1, 1, 9));
    assert_eq!(yearly[92], nyc(2000, 1, 31, 9));
}

#[test_log::test]
fn weekly_count() {
    let out = stream_nyc("FREQ=WEEKLY;COUNT=10", nyc(1997, 9, 2, 9), 100);
    assert_eq!(out.len(), 10);
    assert_eq!(out[1], nyc(1997, 9, 9, 9));
    assert_eq!(out[9], nyc(1997, 11, 4, 9));
}

#[test_log::test]
fn weekly_until() {
    let out = stream_nyc("FREQ=WEEKLY;UNTIL=19971224T000000Z", nyc(1997, 9, 2, 9), 100);
    assert_eq!(out.len(), 17);
    assert_eq!(out[16], nyc(1997, 12, 23, 9));
}

#[test_log::test]
fn weekly_tuesday_thursday() {
    let expected = vec![
        nyc(1997, 9, 2, 9),
        nyc(1997, 9, 4, 9),
        nyc(1997, 9, 9, 9),
        nyc(1997, 9, 11, 9),
        nyc(1997, 9, 16, 9),
        nyc(1997, 9, 18, 9),
        nyc(1997, 9, 23, 9),
        nyc(1997, 9, 25, 9),
        nyc(1997, 9, 30, 9),
        nyc(1997, 10, 2, 9),
    ];
    let until = stream_nyc(
        "FREQ=WEEKLY;UNTIL=19971007T000000Z;WKST=SU;BYDAY=TU,TH",
        nyc(1997, 9, 2, 9),
        100,
    );
    assert_eq!(until, expected);
    // COUNT spelling of the same schedule.
    let count = stream_nyc(
        "FREQ=WEEKLY;COUNT=10;WKST=SU;BYDAY=TU,TH",
        nyc(1997, 9, 2, 9),
        100,
    );
    assert_eq!(count, expected);
}

#[test_log::test]
fn biweekly_monday_wednesday_friday() {
    let out = stream_nyc(
        "FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;WKST=SU;BYDAY=MO,WE,FR",
        nyc(1997, 9, 1, 9),
        100,
    );
    assert_eq!(out.len(), 25);
    assert_eq!(out[0], nyc(1997, 9, 1, 9));
    assert_eq!(out[1], nyc(1997, 9, 3, 9));
    assert_eq!(out[2], nyc(1997, 9, 5, 9));
    // The off week is skipped entirely.
    assert_eq!(out[3], nyc(1997, 9, 15, 9));
    assert_eq!(out[24], nyc(1997, 12, 22, 9));
}

#[test_log::test]
fn biweekly_tuesday_thursday_count() {
    let out = stream_nyc(
        "FREQ=WEEKLY;INTERVAL=2;COUNT=8;WKST=SU;BYDAY=TU,TH",
        nyc(1997, 9, 2, 9),
        100,
    );
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 2, 9),
            nyc(1997, 9, 4, 9),
            nyc(1997, 9, 16, 9),
            nyc(1997, 9, 18, 9),
            nyc(1997, 9, 30, 9),
            nyc(1997, 10, 2, 9),
            nyc(1997, 10, 14, 9),
            nyc(1997, 10, 16, 9),
        ]
    );
}

#[test_log::test]
fn first_friday_of_month() {
    let out = stream_nyc("FREQ=MONTHLY;COUNT=10;BYDAY=1FR", nyc(1997, 9, 5, 9), 100);
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 5, 9),
            nyc(1997, 10, 3, 9),
            nyc(1997, 11, 7, 9),
            nyc(1997, 12, 5, 9),
            nyc(1998, 1, 2, 9),
            nyc(1998, 2, 6, 9),
            nyc(1998, 3, 6, 9),
            nyc(1998, 4, 3, 9),
            nyc(1998, 5, 1, 9),
            nyc(1998, 6, 5, 9),
        ]
    );
}

#[test_log::test]
fn first_friday_until() {
    let out = stream_nyc(
        "FREQ=MONTHLY;UNTIL=19971224T000000Z;BYDAY=1FR",
        nyc(1997, 9, 5, 9),
        100,
    );
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 5, 9),
            nyc(1997, 10, 3, 9),
            nyc(1997, 11, 7, 9),
            nyc(1997, 12, 5, 9),
        ]
    );
}

#[test_log::test]
fn first_and_last_sunday_every_other_month() {
    let out = stream_nyc(
        "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=1SU,-1SU",
        nyc(1997, 9, 7, 9),
        100,
    );
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 7, 9),
            nyc(1997, 9, 28, 9),
            nyc(1997, 11, 2, 9),
            nyc(1997, 11, 30, 9),
            nyc(1998, 1, 4, 9),
            nyc(1998, 1, 25, 9),
            nyc(1998, 3, 1, 9),
            nyc(1998, 3, 29, 9),
            nyc(1998, 5, 3, 9),
            nyc(1998, 5, 31, 9),
        ]
    );
}

#[test_log::test]
fn second_to_last_monday() {
    let out = stream_nyc("FREQ=MONTHLY;COUNT=6;BYDAY=-2MO", nyc(1997, 9, 22, 9), 100);
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 22, 9),
            nyc(1997, 10, 20, 9),
            nyc(1997, 11, 17, 9),
            nyc(1997, 12, 22, 9),
            nyc(1998, 1, 19, 9),
            nyc(1998, 2, 16, 9),
        ]
    );
}

#[test_log::test]
fn third_to_last_day_of_month() {
    let out = stream_nyc("FREQ=MONTHLY;BYMONTHDAY=-3", nyc(1997, 9, 28, 9), 6);
    assert_eq!(
        out,
        vec![
            nyc(1997, 9, 28, 9),
            nyc(1997, 10, 29, 9),
            nyc(1997, 11, 28, 9),
            nyc(1997, 12, 29, 9),
            nyc(1998, 1, 29, 9),
            nyc(1998, 2, 26, 9),
        ]
    );
}

#[test_log::test]
fn saturday_following_first_sunday() {
    // Date-only anchor: the Saturday falling on day 7 through 13.
    let out = stream_dates(
        "FREQ=MONTHLY;BYMONTHDAY=7,8,9,10,11,12,13;BYDAY=SA",
        date(2016, 6, 11),
        5,
    );
    assert_eq!(
        out,
        vec![
            date(2016, 6, 11),
            date(2016, 7, 9),
            date(2016, 8, 13),
            date(2016, 9, 10),
            date(2016, 10, 8),
        ]
    );
}

#[test_log::test]
fn last_workday_of_month() {
    let out = stream_dates(
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
        date(2016, 6, 30),
        5,
    );
    assert_eq!(
        out,
        vec![
            date(2016, 6, 30),
            date(2016, 7, 29),
            date(2016, 8, 31),
            date(2016, 9, 30),
            date(2016, 10, 31),
        ]
    );
}

#[test_log::test]
fn floating_anchor_keeps_wall_clock() {
    let anchor = date(1997, 9, 2).and_hms_opt(9, 0, 0).unwrap();
    let out: Vec<_> = parse("FREQ=WEEKLY;COUNT=3")
        .unwrap()
        .stream(anchor)
        .collect();
    assert_eq!(
        out,
        vec![
            anchor,
            date(1997, 9, 9).and_hms_opt(9, 0, 0).unwrap(),
            date(1997, 9, 16).and_hms_opt(9, 0, 0).unwrap(),
        ]
    );
}

#[test_log::test]
fn daily_stream_crosses_dst_transition() {
    // US clocks fell back on 1997-10-26; the 09:00 wall-clock reading
    // holds across the transition.
    let out = stream_nyc("FREQ=DAILY;COUNT=3", nyc(1997, 10, 25, 9), 100);
    assert_eq!(out[1], nyc(1997, 10, 26, 9));
    assert_eq!(out[2], nyc(1997, 10, 27, 9));
    // The fall-back day is 25 hours long; the next is back to 24.
    assert_eq!((out[1] - out[0]).num_hours(), 25);
    assert_eq!((out[2] - out[1]).num_hours(), 24);
}

#[test_log::test]
fn minutely_interval_count() {
    let anchor = date(1997, 9, 2).and_hms_opt(9, 0, 0).unwrap();
    let out: Vec<_> = parse("FREQ=MINUTELY;INTERVAL=15;COUNT=6")
        .unwrap()
        .stream(anchor)
        .collect();
    assert_eq!(out.len(), 6);
    assert_eq!(out[1], date(1997, 9, 2).and_hms_opt(9, 15, 0).unwrap());
    assert_eq!(out[5], date(1997, 9, 2).and_hms_opt(10, 15, 0).unwrap());
}

#[test_log::test]
fn hourly_until() {
    let anchor = date(1997, 9, 2).and_hms_opt(9, 0, 0).unwrap();
    let out: Vec<_> = parse("FREQ=HOURLY;INTERVAL=3;UNTIL=19970902T170000Z")
        .unwrap()
        .stream(anchor)
        .collect();
    assert_eq!(
        out,
        vec![
            anchor,
            date(1997, 9, 2).and_hms_opt(12, 0, 0).unwrap(),
            date(1997, 9, 2).and_hms_opt(15, 0, 0).unwrap(),
        ]
    );
}

#[test_log::test]
fn first_occurrence_is_always_the_anchor() {
    for text in [
        "FREQ=DAILY",
        "FREQ=WEEKLY;BYDAY=MO",
        "FREQ=MONTHLY;BYMONTHDAY=15",
        "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=29",
    ] {
        let anchor = date(1997, 9, 2);
        assert_eq!(
            parse(text).unwrap().stream(anchor).next(),
            Some(anchor),
            "{text}"
        );
    }
}

#[test_log::test]
fn count_is_exact() {
    for count in [1_u32, 2, 7, 40] {
        let text = format!("FREQ=DAILY;COUNT={count}");
        let out: Vec<_> = parse(&text).unwrap().stream(date(1997, 9, 2)).collect();
        assert_eq!(out.len(), usize::try_from(count).unwrap(), "{text}");
    }
}

#[test_log::test]
fn streams_ascend_strictly() {
    let rule = parse("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=1,-1").unwrap();
    let out: Vec<_> = rule.stream(date(1997, 9, 2)).take(20).collect();
    assert_eq!(out.len(), 20);
    assert!(out.windows(2).all(|w| w[0] < w[1]));
}

#[test_log::test]
fn round_trip_through_display() {
    let texts = [
        "FREQ=DAILY;COUNT=10",
        "FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;WKST=SU;BYDAY=MO,WE,FR",
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
        "FREQ=YEARLY;BYDAY=20MO",
    ];
    for text in texts {
        let rule: super::RecurrenceRule = text.parse().unwrap();
        assert_eq!(rule.to_string(), text);
    }
}

#[test_log::test]
fn yearly_last_week_of_year() {
    // 1997 and 1999 have 52 ISO weeks, 1998 has 53; BYWEEKNO=-1 tracks
    // whichever week is last.
    let out = stream_dates("FREQ=YEARLY;BYWEEKNO=-1", date(1997, 12, 22), 3);
    assert_eq!(
        out,
        vec![date(1997, 12, 22), date(1998, 12, 28), date(1999, 12, 27)]
    );
}

#[test_log::test]
fn week_start_changes_biweekly_bucketing() {
    // The RFC's WKST example: an August 1997 biweekly TU,SU rule
    // produces different sequences depending on which day weeks begin.
    let monday = stream_dates(
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=MO",
        date(1997, 8, 5),
        10,
    );
    assert_eq!(
        monday,
        vec![date(1997, 8, 5), date(1997, 8, 10), date(1997, 8, 19), date(1997, 8, 24)]
    );

    let sunday = stream_dates(
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=SU",
        date(1997, 8, 5),
        10,
    );
    assert_eq!(
        sunday,
        vec![date(1997, 8, 5), date(1997, 8, 17), date(1997, 8, 19), date(1997, 8, 31)]
    );
}

#[test_log::test]
fn count_until_conflict_is_rejected() {
    let err = parse("FREQ=DAILY;COUNT=10;UNTIL=19971224T000000Z").unwrap_err();
    assert_eq!(err.kind(), RuleErrorKind::CountUntilConflict);
}
