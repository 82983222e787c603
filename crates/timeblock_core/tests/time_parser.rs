use timeblock_core::{infer_hour, parse_time, CanonicalTime};

fn parsed(token: &str, infer: bool) -> Option<String> {
    parse_time(token, infer).map(|time| time.to_string())
}

#[test]
fn bare_hours_follow_inference_policy() {
    assert_eq!(parsed("3", true).as_deref(), Some("15:00"));
    assert_eq!(parsed("7", true).as_deref(), Some("19:00"));
    assert_eq!(parsed("10", true).as_deref(), Some("10:00"));
    assert_eq!(parsed("12", true).as_deref(), Some("12:00"));
    assert_eq!(parsed("0", true).as_deref(), Some("00:00"));
}

#[test]
fn bare_hours_without_inference_are_literal() {
    assert_eq!(parsed("3", false).as_deref(), Some("03:00"));
    assert_eq!(parsed("7", false).as_deref(), Some("07:00"));
}

#[test]
fn bare_hours_above_twelve_are_taken_as_24_hour_values() {
    assert_eq!(parsed("23", true).as_deref(), Some("23:00"));
    assert_eq!(parsed("13", true).as_deref(), Some("13:00"));
    assert_eq!(parsed("24", true), None);
    assert_eq!(parsed("99", false), None);
}

#[test]
fn explicit_meridiem_wins_over_inference() {
    assert_eq!(parsed("3pm", true).as_deref(), Some("15:00"));
    assert_eq!(parsed("3am", true).as_deref(), Some("03:00"));
    assert_eq!(parsed("7 a", true).as_deref(), Some("07:00"));
    assert_eq!(parsed("12pm", true).as_deref(), Some("12:00"));
    assert_eq!(parsed("12am", true).as_deref(), Some("00:00"));
    assert_eq!(parsed("4:30P", false).as_deref(), Some("16:30"));
    assert_eq!(parsed("11:59 PM", false).as_deref(), Some("23:59"));
}

#[test]
fn compact_and_colon_shapes() {
    assert_eq!(parsed("1400", true).as_deref(), Some("14:00"));
    assert_eq!(parsed("915", true).as_deref(), Some("09:15"));
    assert_eq!(parsed("9:15", false).as_deref(), Some("09:15"));
    assert_eq!(parsed("19:45", true).as_deref(), Some("19:45"));
}

#[test]
fn unrecognized_tokens_fail() {
    for token in ["", "noon", "9h", "12345", "1:5", "3:60pm", "25:00", "9:30xm"] {
        assert_eq!(parse_time(token, true), None, "token `{token}` should fail");
    }
}

#[test]
fn every_produced_time_is_in_range() {
    let mut tokens: Vec<String> = (0..=2500).map(|value| value.to_string()).collect();
    for hour in 0..=30 {
        for minute in [0, 5, 30, 59, 60, 99] {
            tokens.push(format!("{hour}:{minute:02}"));
            tokens.push(format!("{hour}:{minute:02}am"));
            tokens.push(format!("{hour}:{minute:02} pm"));
        }
        tokens.push(format!("{hour}p"));
        tokens.push(format!("{hour}a"));
    }

    for token in &tokens {
        for infer in [true, false] {
            if let Some(time) = parse_time(token, infer) {
                assert!(time.hour() <= 23, "hour out of range for `{token}`");
                assert!(time.minute() <= 59, "minute out of range for `{token}`");
                let text = time.to_string();
                assert_eq!(text.len(), 5, "not zero-padded for `{token}`: {text}");
            }
        }
    }
}

#[test]
fn inference_only_touches_one_through_eight() {
    for hour in 0..=23 {
        let inferred = infer_hour(hour);
        if (1..=8).contains(&hour) {
            assert_eq!(inferred, hour + 12);
        } else {
            assert_eq!(inferred, hour);
        }
        assert!(CanonicalTime::new(inferred, 0).is_some());
    }
}
