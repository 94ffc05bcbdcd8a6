// ==========================================
// Excel 记录转换 - 配置层
// ==========================================
// 职责: 导入导出配置加载与校验
// 存储: JSON 文件 / 代码默认值
// ==========================================

pub mod error;
pub mod excel_options;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use excel_options::{validate_sheet_name, ExcelOptions};
