// ==========================================
// Excel 记录转换 - 编解码错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 文件编解码错误类型
#[derive(Error, Debug)]
pub enum CodecError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读写失败: {0}")]
    FileReadError(String),

    // ===== 格式解析错误 =====
    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 写入失败: {0}")]
    ExcelWriteError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作簿无工作表")]
    NoWorksheet,

    #[error("{axis}索引溢出: {value}")]
    IndexOverflow { axis: &'static str, value: usize },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for CodecError {
    fn from(err: csv::Error) -> Self {
        CodecError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for CodecError {
    fn from(err: calamine::XlsxError) -> Self {
        CodecError::ExcelParseError(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for CodecError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        CodecError::ExcelWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type CodecResult<T> = Result<T, CodecError>;

pub(crate) fn cast_row_num(value: usize) -> CodecResult<u32> {
    u32::try_from(value).map_err(|_| CodecError::IndexOverflow { axis: "行", value })
}

pub(crate) fn cast_col_num(value: usize) -> CodecResult<u16> {
    u16::try_from(value).map_err(|_| CodecError::IndexOverflow { axis: "列", value })
}
