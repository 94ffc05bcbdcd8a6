// ==========================================
// Excel 记录转换 - 转换引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::codec::CodecError;
use crate::config::ConfigError;
use thiserror::Error;

/// 记录转换错误类型
#[derive(Error, Debug)]
pub enum MarshalError {
    // ===== 单元格解码错误 =====
    #[error(
        "单元格解码失败 (行 {row}, 列 {column}, 字段 {field}): 重试 {attempts} 次后放弃: {message}"
    )]
    CellDecodeExhausted {
        row: u32,
        column: u16,
        field: String,
        attempts: u32,
        message: String,
    },

    // ===== 写入错误 =====
    #[error("没有可写入的工作表")]
    EmptyGrid,

    #[error("输出写入失败: {0}")]
    SinkError(String),

    // ===== 下层错误 =====
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for MarshalError {
    fn from(err: std::io::Error) -> Self {
        MarshalError::SinkError(err.to_string())
    }
}

/// Result 类型别名
pub type MarshalResult<T> = Result<T, MarshalError>;
