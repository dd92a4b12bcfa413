use chrono::{Datelike, NaiveDate};

/// Format a date the way the portal displays it, e.g. `26 Jan 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Indian financial year (April to March) containing `date`, e.g. `2024-25`.
pub fn financial_year(date: NaiveDate) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1) % 100)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_financial_year() {
        assert_eq!(financial_year(date(2025, 3, 31)), "2024-25");
        assert_eq!(financial_year(date(2025, 4, 1)), "2025-26");
        assert_eq!(financial_year(date(1999, 12, 1)), "1999-00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2025, 1, 26)), "26 Jan 2025");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("ग्राम पंचायत", 4), "ग...");
    }
}
