//! 时间工具函数 — 业务时区转换
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 当前时间 Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 00:00:00 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
fn midnight_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    midnight_millis(date, tz)
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    midnight_millis(next_day, tz)
}

/// Unix millis → 业务时区日历日
pub fn business_date(millis: i64, tz: Tz) -> NaiveDate {
    tz.timestamp_millis_opt(millis)
        .earliest()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| {
            Utc.timestamp_millis_opt(millis)
                .earliest()
                .map(|dt| dt.date_naive())
                .unwrap_or_default()
        })
}
