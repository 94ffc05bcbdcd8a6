// ==========================================
// Excel 记录转换 - CSV 编解码器
// ==========================================
// 读取: 所有非空字段为文本单元格，空字段为空白单元格
// 写入: 仅第一个工作表，单元格按展示文本写出
// ==========================================

use crate::codec::error::{cast_col_num, cast_row_num, CodecError, CodecResult};
use crate::codec::WorkbookCodec;
use crate::domain::sheet::{Cell, Sheet, Workbook};
use ::csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=UTF-8";

/// CSV 读入时的工作表名
pub const CSV_SHEET_NAME: &str = "Sheet1";

pub struct CsvCodec;

impl WorkbookCodec for CsvCodec {
    fn read_workbook(&self, bytes: &[u8]) -> CodecResult<Workbook> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut sheet = Sheet::new(CSV_SHEET_NAME);
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;

            // 完全空白的行不建模（读取时视为数据结束）
            if record.iter().all(|v| v.is_empty()) {
                continue;
            }

            let row = sheet.create_row(cast_row_num(row_idx)?);
            for (col_idx, value) in record.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                row.set_cell(cast_col_num(col_idx)?, Cell::text(value));
            }
        }

        debug!(rows = sheet.row_count(), "CSV 解析完成");
        Ok(Workbook::with_sheet(sheet))
    }

    fn write_workbook(&self, workbook: &Workbook) -> CodecResult<Vec<u8>> {
        if workbook.sheets().len() > 1 {
            warn!(
                sheets = workbook.sheets().len(),
                "CSV 仅支持单个工作表，其余工作表被忽略"
            );
        }

        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

        if let Some(sheet) = workbook.first_sheet() {
            // 缺失行写为空行，保持行号对齐
            let mut next_row = 0u32;
            for (row_idx, row) in sheet.rows() {
                while next_row < row_idx {
                    writer.write_record([""])?;
                    next_row += 1;
                }

                let fields: Vec<String> = (0..row.width())
                    .map(|col| row.cell(col).map(ToString::to_string).unwrap_or_default())
                    .collect();
                writer.write_record(&fields)?;
                next_row = row_idx.saturating_add(1);
            }
        }

        writer
            .into_inner()
            .map_err(|e| CodecError::FileReadError(e.to_string()))
    }

    fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }
}
