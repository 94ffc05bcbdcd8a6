// ==========================================
// Excel 记录转换 - 单元格编解码规则
// ==========================================
// 写入: 字段值 → 单元格（按语义类型 + 格式化映射）
// 读取: 单元格 → 原始值 → 字段值（按字段语义类型解析）
// 失败策略: 整个解码过程有界重试，耗尽后报错
// ==========================================

use crate::domain::date::DATE_TIME_PATTERN;
use crate::domain::field::Field;
use crate::domain::sheet::{Cell, CellValue};
use crate::domain::types::{FieldKind, Value};
use crate::engine::error::{MarshalError, MarshalResult};
use crate::engine::format_map::FormatMap;
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;
use tracing::warn;

// ==========================================
// 写入方向
// ==========================================

/// 字段值 → 单元格
///
/// # 参数
/// - value: 字段取值
/// - field: 字段名（格式化映射的键）
/// - format_map: 格式化映射
///
/// # 返回
/// - 待写入的单元格；Null 返回空白单元格（仍占位）
pub fn encode(value: &Value, field: &str, format_map: &FormatMap) -> Cell {
    match value {
        Value::Null => Cell::blank(),
        Value::DateTime(v) => Cell::date_time(v),
        Value::Float(v) => Cell::number(f64::from(*v)),
        Value::Double(v) => Cell::number(*v),
        Value::Bool(v) => substituted(value, field, format_map).unwrap_or(Cell::boolean(*v)),
        Value::Int(v) => {
            substituted(value, field, format_map).unwrap_or(Cell::number(f64::from(*v)))
        }
        Value::Long(v) => substituted(value, field, format_map).unwrap_or_else(|| long_cell(*v)),
        Value::Text(v) => Cell::text(v.as_str()),
        Value::Other(v) => Cell::text(v.as_str()),
    }
}

/// f64 可精确表示的最大整数 (2^53)
const MAX_EXACT_INTEGER: u64 = 1 << 53;

// 超出 f64 精度的 i64 写为文本
fn long_cell(v: i64) -> Cell {
    if v.unsigned_abs() <= MAX_EXACT_INTEGER {
        Cell::number(v as f64)
    } else {
        Cell::text(v.to_string())
    }
}

fn substituted(value: &Value, field: &str, format_map: &FormatMap) -> Option<Cell> {
    format_map
        .lookup_for_write(field, &value.to_string())
        .map(Cell::text)
}

// ==========================================
// 读取方向 - 第一步: 原始值提取
// ==========================================

/// 单元格原始值
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

/// 原始值的默认字符串形式
impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(v) => write!(f, "{}", v),
            RawValue::Number(v) => write!(f, "{}", v),
            RawValue::DateTime(v) => write!(f, "{}", v.format(DATE_TIME_PATTERN)),
            RawValue::Text(v) => f.write_str(v),
        }
    }
}

/// 按单元格类型提取原始值
///
/// # 返回
/// - None: 单元格不存在或为空白，字段保持零值
pub fn extract(cell: Option<&Cell>) -> Option<RawValue> {
    let cell = cell?;
    if let Some(dt) = cell.date_time_value() {
        return Some(RawValue::DateTime(dt));
    }

    match cell.value() {
        CellValue::Blank => None,
        CellValue::Boolean(v) => Some(RawValue::Bool(*v)),
        CellValue::Number(v) => Some(RawValue::Number(*v)),
        CellValue::Text(v) => Some(RawValue::Text(v.clone())),
        CellValue::Error(code) => Some(RawValue::Text(code.clone())),
        CellValue::Formula(source) => Some(RawValue::Text(source.clone())),
    }
}

// ==========================================
// 读取方向 - 第二步: 按字段类型解析
// ==========================================

/// 类型转换错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    #[error("无法解析为整数: {value} ({message})")]
    InvalidInteger { value: String, message: String },

    #[error("无法解析为浮点数: {value} ({message})")]
    InvalidFloat { value: String, message: String },

    #[error("无法解析为日期时间: {value}（期望 yyyy-MM-dd HH:mm:ss）")]
    InvalidDateTime { value: String },

    #[error("字段类型 {kind} 不接受值: {value}")]
    KindMismatch { kind: FieldKind, value: String },
}

/// 原始值 → 字段值
///
/// # 参数
/// - kind: 目标字段语义类型
/// - raw: 提取出的原始值
/// - field: 字段名（格式化映射的键）
/// - format_map: 格式化映射（仅整数、布尔参与反向替换）
///
/// # 返回
/// - Ok(Some): 解析成功
/// - Ok(None): 不支持的类型，不赋值
/// - Err: 解析失败
pub fn parse(
    kind: FieldKind,
    raw: &RawValue,
    field: &str,
    format_map: &FormatMap,
) -> Result<Option<Value>, CoerceError> {
    let value = match (kind, raw) {
        (FieldKind::DateTime, RawValue::DateTime(v)) => Value::DateTime(*v),
        (FieldKind::DateTime, other) => {
            let text = other.to_string();
            let parsed = NaiveDateTime::parse_from_str(&text, DATE_TIME_PATTERN)
                .map_err(|_| CoerceError::InvalidDateTime { value: text.clone() })?;
            Value::DateTime(parsed)
        }

        (FieldKind::Text, RawValue::Text(v)) => Value::Text(v.clone()),
        (FieldKind::Text, other) => Value::Text(other.to_string()),

        (FieldKind::Int | FieldKind::Long, other) => {
            let text = reverse_substitute(other, field, format_map);
            parse_integer(kind, &text)?
        }

        (FieldKind::Bool, RawValue::Bool(v)) => Value::Bool(*v),
        (FieldKind::Bool, other) => {
            let text = reverse_substitute(other, field, format_map);
            Value::Bool(text.eq_ignore_ascii_case("true"))
        }

        (FieldKind::Double, RawValue::Number(v)) => Value::Double(*v),
        (FieldKind::Double, other) => Value::Double(parse_float::<f64>(other)?),
        (FieldKind::Float, other) => Value::Float(parse_float::<f32>(other)?),

        (FieldKind::Other, _) => return Ok(None),
    };

    Ok(Some(value))
}

/// 显示值 → 原值字符串（未命中时为原始值的字符串形式）
fn reverse_substitute(raw: &RawValue, field: &str, format_map: &FormatMap) -> String {
    let text = raw.to_string();
    match format_map.lookup_for_read(field, &text) {
        Some(substitute) => substitute.to_string(),
        None => text,
    }
}

fn parse_integer(kind: FieldKind, text: &str) -> Result<Value, CoerceError> {
    let invalid = |message: String| CoerceError::InvalidInteger {
        value: text.to_string(),
        message,
    };
    match kind {
        FieldKind::Int => text
            .parse::<i32>()
            .map(Value::Int)
            .map_err(|e| invalid(e.to_string())),
        _ => text
            .parse::<i64>()
            .map(Value::Long)
            .map_err(|e| invalid(e.to_string())),
    }
}

fn parse_float<F>(raw: &RawValue) -> Result<F, CoerceError>
where
    F: std::str::FromStr,
    F::Err: fmt::Display,
{
    let text = raw.to_string();
    text.parse::<F>().map_err(|e| CoerceError::InvalidFloat {
        value: text.clone(),
        message: e.to_string(),
    })
}

// ==========================================
// 读取方向 - 第三步: 有界重试
// ==========================================

/// 重试耗尽
#[derive(Debug, Clone, PartialEq)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// 最多执行 max_attempts 次（至少 1 次），首次成功即返回
///
/// 闭包参数为当前尝试序号（从 1 开始）。
pub fn retry_bounded<T, E, F>(max_attempts: u32, mut op: F) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Result<T, E>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error: err,
                })
            }
            Err(_) => attempt += 1,
        }
    }
}

/// 单元格解码上下文
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    pub row: u32,
    pub column: u16,
    pub format_map: &'a FormatMap,
    pub max_attempts: u32,
}

/// 解码单元格并写入记录字段
///
/// 单元格缺失或空白时字段保持零值。
///
/// # 返回
/// - Ok(()): 已赋值或无需赋值
/// - Err(CellDecodeExhausted): 重试耗尽
pub fn decode_cell<T>(
    field: &Field<T>,
    record: &mut T,
    cell: Option<&Cell>,
    ctx: DecodeContext<'_>,
) -> MarshalResult<()> {
    let result = retry_bounded(ctx.max_attempts, |attempt| {
        let Some(raw) = extract(cell) else {
            return Ok(());
        };

        let decoded = parse(field.kind(), &raw, field.name(), ctx.format_map).and_then(|value| {
            match value {
                Some(value) => {
                    if field.set(record, value) {
                        Ok(())
                    } else {
                        Err(CoerceError::KindMismatch {
                            kind: field.kind(),
                            value: raw.to_string(),
                        })
                    }
                }
                None => Ok(()),
            }
        });

        if let Err(e) = &decoded {
            warn!(
                row = ctx.row,
                column = ctx.column,
                field = field.name(),
                attempt,
                error = %e,
                "单元格解码失败"
            );
        }
        decoded
    });

    result.map_err(|exhausted| MarshalError::CellDecodeExhausted {
        row: ctx.row,
        column: ctx.column,
        field: field.name().to_string(),
        attempts: exhausted.attempts,
        message: exhausted.last_error.to_string(),
    })
}
