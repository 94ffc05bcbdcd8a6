// ==========================================
// Excel 记录转换 - 格式化映射
// ==========================================
// 职责: 字段值替换表（写入: 原值 → 显示值，读取: 显示值 → 原值）
// 格式: { "字段名": { "原值": "显示值" } }
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatMap {
    fields: HashMap<String, BTreeMap<String, String>>,
}

impl FormatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条替换规则
    pub fn with_entry(
        mut self,
        field: impl Into<String>,
        raw: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        self.insert(field, raw, display);
        self
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        raw: impl Into<String>,
        display: impl Into<String>,
    ) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(raw.into(), display.into());
    }

    /// 写入方向: 原值字符串 → 显示值
    pub fn lookup_for_write(&self, field: &str, raw: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|table| table.get(raw))
            .map(String::as_str)
    }

    /// 读取方向: 显示值 → 原值字符串
    ///
    /// 多个原值对应同一显示值时，取原值排序最小者。
    pub fn lookup_for_read(&self, field: &str, display: &str) -> Option<&str> {
        self.fields.get(field).and_then(|table| {
            table
                .iter()
                .find(|(_, shown)| shown.as_str() == display)
                .map(|(raw, _)| raw.as_str())
        })
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }
}
