// ==========================================
// Excel 记录转换 - 日期序列号工具
// ==========================================
// 职责: NaiveDateTime <-> Excel 序列号 (1900 日期系统)
// 职责: 数字格式代码的日期识别
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// 日期时间文本格式（对应 yyyy-MM-dd HH:mm:ss）
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// 日期单元格的数字格式代码
pub const DATE_TIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

const SECONDS_PER_DAY: f64 = 86_400.0;

// 序列号 1 = 1899-12-31 + 1 天 = 1900-01-01
// 序列号 60 = 1900-02-29（Excel 虚构的闰日）
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or(NaiveDate::MIN)
}

fn phantom_leap_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 3, 1).unwrap_or(NaiveDate::MIN)
}

/// 日期时间 → Excel 序列号（精确到秒）
///
/// # 返回
/// - None: 早于 1899-12-31，序列号为负，无法以日期单元格表示
pub fn datetime_to_serial(dt: &NaiveDateTime) -> Option<f64> {
    if dt.date() < excel_epoch() {
        return None;
    }

    let days = (dt.date() - excel_epoch()).num_days();
    let serial_days = if dt.date() >= phantom_leap_cutoff() {
        days + 1
    } else {
        days
    };

    let secs_in_day = dt.time().num_seconds_from_midnight() as f64;
    Some(serial_days as f64 + secs_in_day / SECONDS_PER_DAY)
}

/// Excel 序列号 → 日期时间
///
/// # 返回
/// - Some: 合法序列号（四舍五入到整秒）
/// - None: 负数、非有限值或超出 chrono 表示范围
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let total_secs = (serial * SECONDS_PER_DAY).round();
    if total_secs > i64::MAX as f64 {
        return None;
    }
    let total_secs = total_secs as i64;
    let days = total_secs.div_euclid(86_400);
    let secs_of_day = total_secs.rem_euclid(86_400) as u32;

    let date = if days == 60 {
        NaiveDate::from_ymd_opt(1900, 2, 28)?
    } else {
        let offset = if days < 60 { days } else { days - 1 };
        excel_epoch().checked_add_signed(Duration::try_days(offset)?)?
    };

    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs_of_day, 0)?;
    Some(date.and_time(time))
}

/// 判断数字格式代码是否为日期/时间格式
///
/// 去掉引号文本、转义字符与方括号段（`[h]`/`[mm]`/`[ss]` 耗时格式除外）后，
/// 出现 y/m/d/h/s 任一占位符即视为日期格式。
pub fn is_date_format(format_code: &str) -> bool {
    let mut in_quote = false;
    let mut escaped = false;
    let mut bracket = String::new();
    let mut in_bracket = false;

    for ch in format_code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if in_quote {
            if ch == '"' {
                in_quote = false;
            }
            continue;
        }
        if in_bracket {
            if ch == ']' {
                in_bracket = false;
                let elapsed = bracket.to_ascii_lowercase();
                if !elapsed.is_empty() && elapsed.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                    return true;
                }
                bracket.clear();
            } else {
                bracket.push(ch);
            }
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '"' => in_quote = true,
            '[' => in_bracket = true,
            'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => return true,
            _ => {}
        }
    }

    false
}
