// ==========================================
// Excel 记录转换 - 转换引擎层
// ==========================================
// 职责: 字段目录、格式化映射、单元格编解码、记录读写
// 红线: 不做文件 I/O，只操作工作簿内存模型
// ==========================================

pub mod cell_codec;
pub mod error;
pub mod field_catalog;
pub mod format_map;
pub mod grid_writer;
pub mod record_reader;
pub mod record_writer;

// 重导出核心引擎
pub use cell_codec::{CoerceError, DecodeContext, RawValue, RetryExhausted};
pub use error::{MarshalError, MarshalResult};
pub use field_catalog::{FieldCatalog, FieldDescriptor};
pub use format_map::FormatMap;
pub use grid_writer::{GridSheet, GridWriter};
pub use record_reader::RecordReader;
pub use record_writer::RecordWriter;
