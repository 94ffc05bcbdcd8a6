// ==========================================
// Excel 记录转换 - 领域模型层
// ==========================================
// 职责: 记录/字段描述、字段取值、工作簿内存模型、日期序列号
// 红线: 不含文件编解码,不含转换规则
// ==========================================

pub mod date;
pub mod field;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use date::{DATE_TIME_NUM_FORMAT, DATE_TIME_PATTERN};
pub use field::{ExcelField, Field, FieldType, Record, DEFAULT_COLUMN_WIDTH};
pub use sheet::{Cell, CellValue, Row, Sheet, Workbook};
pub use types::{FieldKind, Value};
