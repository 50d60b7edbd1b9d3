//! 时间工具函数
//!
//! 日期/时间字符串校验在 API handler 层完成，
//! repository 层只接收校验过的值和 `i64` Unix millis。

use chrono::{NaiveDate, NaiveTime, Utc};

use shared::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时间字符串 (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// 验证日期不在过去 (UTC 自然日)
pub fn validate_not_past(date: NaiveDate) -> AppResult<()> {
    let today = Utc::now().date_naive();
    if date < today {
        return Err(AppError::validation(format!(
            "Date {} is in the past (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// N 天前零点的 Unix millis (统计窗口起点)
pub fn days_ago_millis(days: i64) -> i64 {
    let start = Utc::now().date_naive() - chrono::Duration::days(days.max(0));
    start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-10-01").is_ok());
        assert!(parse_date("01/10/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert!(parse_time("18:30").is_ok());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("6pm").is_err());
    }

    #[test]
    fn test_validate_not_past() {
        let tomorrow = Utc::now().date_naive() + chrono::Duration::days(1);
        assert!(validate_not_past(tomorrow).is_ok());
        let yesterday = Utc::now().date_naive() - chrono::Duration::days(1);
        assert!(validate_not_past(yesterday).is_err());
    }
}
