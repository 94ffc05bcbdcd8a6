// ==========================================
// Excel 记录转换 - 核心库
// ==========================================
// 职责: 记录集合 ↔ 电子表格 双向转换
// 格式: .xlsx（calamine 读取 / rust_xlsxwriter 写入）、.csv
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录、字段、工作簿模型
pub mod domain;

// 配置层 - 导入导出配置
pub mod config;

// 编解码层 - 文件格式
pub mod codec;

// 引擎层 - 字段映射与类型转换
pub mod engine;

// API 层 - 导入导出接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Cell, CellValue, ExcelField, Field, FieldKind, FieldType, Record, Row, Sheet, Value, Workbook,
};

// 配置
pub use config::{ConfigError, ExcelOptions};

// 编解码
pub use codec::{codec_for_path, CodecError, CsvCodec, WorkbookCodec, XlsxCodec};

// 引擎
pub use engine::{
    FieldCatalog, FormatMap, GridSheet, GridWriter, MarshalError, MarshalResult, RecordReader,
    RecordWriter,
};

// API
pub use api::{Attachment, ExcelApi};

// ==========================================
// 常量定义
// ==========================================

// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
