// ==========================================
// Excel 记录转换 - 记录读取器
// ==========================================
// 职责: 工作表 → 记录集合
// 流程: 表头行 → 列/字段索引 → 逐行逐单元格解码
// 结束: 第一个缺失行
// ==========================================

use crate::config::ExcelOptions;
use crate::domain::field::{Field, Record};
use crate::domain::sheet::Sheet;
use crate::engine::cell_codec::{self, DecodeContext};
use crate::engine::error::MarshalResult;
use crate::engine::field_catalog::FieldCatalog;
use crate::engine::format_map::FormatMap;
use tracing::{debug, info, instrument};

pub struct RecordReader<'a> {
    options: &'a ExcelOptions,
}

impl<'a> RecordReader<'a> {
    pub fn new(options: &'a ExcelOptions) -> Self {
        Self { options }
    }

    /// 读取记录集合
    ///
    /// # 参数
    /// - sheet: 第 0 行为表头的工作表
    /// - format_map: 格式化映射
    ///
    /// # 返回
    /// - Ok(Vec<T>): 按行顺序的记录；无表头时为空
    /// - Err(CellDecodeExhausted): 某单元格重试耗尽
    #[instrument(skip(self, sheet, format_map), fields(
        record_type = std::any::type_name::<T>(),
        sheet = %sheet.name()
    ))]
    pub fn read<T: Record>(&self, sheet: &Sheet, format_map: &FormatMap) -> MarshalResult<Vec<T>> {
        let catalog = FieldCatalog::<T>::resolve();

        let Some(header) = sheet.row(0) else {
            debug!("工作表无表头行");
            return Ok(Vec::new());
        };

        // ===== 表头 → 列/字段索引 =====
        let titles = catalog.title_index();
        let mut columns: Vec<(u16, &Field<T>)> = Vec::new();
        for (column, cell) in header.cells() {
            let title = cell.to_string();
            match titles.get(title.as_str()).and_then(|d| catalog.field(d)) {
                Some(field) => columns.push((column, field)),
                None if title == self.options.sequence_title || title.is_empty() => {}
                None => debug!(column, title = %title, "表头无对应字段，忽略该列"),
            }
        }

        // ===== 数据行 =====
        let mut records = Vec::new();
        let mut row_idx = 1u32;
        while let Some(row) = sheet.row(row_idx) {
            let mut record = T::default();
            for (column, field) in &columns {
                let ctx = DecodeContext {
                    row: row_idx,
                    column: *column,
                    format_map,
                    max_attempts: self.options.max_decode_attempts,
                };
                cell_codec::decode_cell(*field, &mut record, row.cell(*column), ctx)?;
            }
            records.push(record);

            row_idx = match row_idx.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }

        info!(
            columns = columns.len(),
            count = records.len(),
            "记录读取完成"
        );
        Ok(records)
    }
}
