/// Format a second count as `MM:SS`, both fields zero-padded to two
/// digits. Minutes are unbounded: 6000 seconds renders as `100:00`.
pub fn format_time(secs: u64) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn whole_minutes() {
        assert_eq!(format_time(3000), "50:00");
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_time(65), "01:05");
    }

    #[test]
    fn minutes_exceed_two_digits() {
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn sub_minute() {
        assert_eq!(format_time(9), "00:09");
    }
}
