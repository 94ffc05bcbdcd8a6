// ==========================================
// Excel 记录转换 - API 层
// ==========================================
// 职责: 对外导入导出接口
// ==========================================

pub mod excel_api;

// 重导出核心类型
pub use excel_api::{Attachment, ExcelApi};
