// ==========================================
// Excel 记录转换 - 导入导出配置
// ==========================================
// 职责: 工作表名、序号列标题、解码重试上限、网格列宽
// 来源: 默认值 / JSON 配置文件
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 工作表名最大长度
pub const SHEET_NAME_MAX_LEN: usize = 31;
/// 工作表名禁止字符
pub const SHEET_NAME_ILLEGAL_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// 单元格解码总尝试次数（首次 + 7 次重试）
pub const DEFAULT_MAX_DECODE_ATTEMPTS: u32 = 8;
/// 序号列标题
pub const DEFAULT_SEQUENCE_TITLE: &str = "序号";
/// 默认工作表名
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
/// 网格写出的默认列宽
pub const DEFAULT_GRID_COLUMN_WIDTH: u16 = 18;

// ==========================================
// ExcelOptions - 导入导出配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcelOptions {
    /// 记录导出的工作表名
    pub sheet_name: String,

    /// 首列（行序号）标题
    pub sequence_title: String,

    /// 单元格解码总尝试次数
    pub max_decode_attempts: u32,

    /// 网格写出时每列的列宽
    pub grid_column_width: u16,
}

impl Default for ExcelOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            sequence_title: DEFAULT_SEQUENCE_TITLE.to_string(),
            max_decode_attempts: DEFAULT_MAX_DECODE_ATTEMPTS,
            grid_column_width: DEFAULT_GRID_COLUMN_WIDTH,
        }
    }
}

impl ExcelOptions {
    /// 从 JSON 文本加载（缺省字段取默认值）
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let options: ExcelOptions =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        validate_sheet_name(&self.sheet_name)?;

        if self.max_decode_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_decode_attempts".to_string(),
                value: self.max_decode_attempts.to_string(),
                message: "至少为 1".to_string(),
            });
        }

        if self.grid_column_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grid_column_width".to_string(),
                value: self.grid_column_width.to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_sequence_title(mut self, title: impl Into<String>) -> Self {
        self.sequence_title = title.into();
        self
    }

    pub fn with_max_decode_attempts(mut self, attempts: u32) -> Self {
        self.max_decode_attempts = attempts;
        self
    }
}

/// 校验工作表名（非空、长度、禁止字符）
pub fn validate_sheet_name(name: &str) -> ConfigResult<()> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        key: "sheet_name".to_string(),
        value: name.to_string(),
        message: message.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("不能为空"));
    }
    if name.chars().count() > SHEET_NAME_MAX_LEN {
        return Err(invalid("长度超过 31 个字符"));
    }
    if name.contains(SHEET_NAME_ILLEGAL_CHARS) {
        return Err(invalid("包含非法字符 []:*?/\\"));
    }
    Ok(())
}
