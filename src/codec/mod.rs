// ==========================================
// Excel 记录转换 - 文件编解码层
// ==========================================
// 职责: 工作簿内存模型 <-> 文件字节
// 支持: Excel (.xlsx) / CSV (.csv)
// ==========================================

pub mod csv;
pub mod error;
pub mod xlsx;

pub use self::csv::CsvCodec;
pub use error::{CodecError, CodecResult};
pub use xlsx::XlsxCodec;

use crate::domain::sheet::Workbook;
use std::path::Path;

// ==========================================
// WorkbookCodec Trait
// ==========================================
// 用途: 文件格式编解码接口
// 实现者: XlsxCodec, CsvCodec
pub trait WorkbookCodec: Send + Sync {
    /// 解析文件字节为工作簿
    ///
    /// # 参数
    /// - bytes: 完整文件内容
    ///
    /// # 返回
    /// - Ok(Workbook): 至少包含一个工作表
    /// - Err: 格式错误
    fn read_workbook(&self, bytes: &[u8]) -> CodecResult<Workbook>;

    /// 序列化工作簿为文件字节
    fn write_workbook(&self, workbook: &Workbook) -> CodecResult<Vec<u8>>;

    /// 文件 MIME 类型
    fn content_type(&self) -> &'static str;
}

// ==========================================
// 根据扩展名选择编解码器
// ==========================================
pub fn codec_for_path<P: AsRef<Path>>(path: P) -> CodecResult<Box<dyn WorkbookCodec>> {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" => Ok(Box::new(XlsxCodec)),
        "csv" => Ok(Box::new(CsvCodec)),
        _ => Err(CodecError::UnsupportedFormat(ext)),
    }
}
