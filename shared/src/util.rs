/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 毫秒时间戳 → "YYYY-MM-DD HH:MM" (UTC)
///
/// 用于 CSV 导出和后台列表展示。无效时间戳返回空串。
pub fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis() {
        // 2024-01-01 00:00:00 UTC
        assert_eq!(format_millis(1_704_067_200_000), "2024-01-01 00:00");
        assert_eq!(format_millis(i64::MIN), "");
    }
}
