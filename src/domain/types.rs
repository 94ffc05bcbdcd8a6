// ==========================================
// Excel 记录转换 - 领域类型定义
// ==========================================
// 职责: 字段语义类型 (FieldKind) 与字段取值 (Value)
// ==========================================

use crate::domain::date::DATE_TIME_PATTERN;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 字段语义类型 (Field Kind)
// ==========================================
// 决定单元格读写规则的分派
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Text,     // 文本
    Int,      // 32 位整数
    Long,     // 64 位整数
    Float,    // 单精度浮点
    Double,   // 双精度浮点
    Bool,     // 布尔
    DateTime, // 日期时间
    Other,    // 其他类型（写入字符串形式，读取时忽略）
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "TEXT"),
            FieldKind::Int => write!(f, "INT"),
            FieldKind::Long => write!(f, "LONG"),
            FieldKind::Float => write!(f, "FLOAT"),
            FieldKind::Double => write!(f, "DOUBLE"),
            FieldKind::Bool => write!(f, "BOOL"),
            FieldKind::DateTime => write!(f, "DATE_TIME"),
            FieldKind::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 字段取值 (Value)
// ==========================================
// 记录字段与单元格之间的中间表示
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Other(String),
}

/// 默认字符串形式（格式化映射的键、未知类型的写入值）
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(v) => f.write_str(v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v.format(DATE_TIME_PATTERN)),
            Value::Other(v) => f.write_str(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Long(42).to_string(), "42");
        assert_eq!(Value::Double(1.0).to_string(), "1");
        assert_eq!(Value::Null.to_string(), "");

        let dt = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2024-05-06 07:08:09");
    }
}
