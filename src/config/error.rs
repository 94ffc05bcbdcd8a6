// ==========================================
// Excel 记录转换 - 配置错误类型
// ==========================================

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
