// ==========================================
// Excel 记录转换 - 记录写入器
// ==========================================
// 职责: 记录集合 → 工作表（表头行 + 每条记录一行）
// 第 0 列: 序号（从 1 开始）
// ==========================================

use crate::codec::error::{cast_col_num, cast_row_num};
use crate::config::ExcelOptions;
use crate::domain::field::Record;
use crate::domain::sheet::{Cell, Sheet};
use crate::engine::cell_codec;
use crate::engine::error::MarshalResult;
use crate::engine::field_catalog::FieldCatalog;
use crate::engine::format_map::FormatMap;
use tracing::{debug, instrument};

pub struct RecordWriter<'a> {
    options: &'a ExcelOptions,
}

impl<'a> RecordWriter<'a> {
    pub fn new(options: &'a ExcelOptions) -> Self {
        Self { options }
    }

    /// 写入记录集合
    ///
    /// # 参数
    /// - records: 记录（只读）
    /// - format_map: 格式化映射
    ///
    /// # 返回
    /// - 工作表；空集合仅含表头行
    #[instrument(skip(self, records, format_map), fields(
        record_type = std::any::type_name::<T>(),
        count = records.len()
    ))]
    pub fn write<T: Record>(&self, records: &[T], format_map: &FormatMap) -> MarshalResult<Sheet> {
        let catalog = FieldCatalog::<T>::resolve();
        let mut sheet = Sheet::new(self.options.sheet_name.as_str());

        // ===== 表头 =====
        let header = sheet.create_row(0);
        header.set_cell(0, Cell::text(self.options.sequence_title.as_str()));

        let mut columns = Vec::new();
        for (offset, descriptor) in catalog.exported().enumerate() {
            let column = cast_col_num(offset + 1)?;
            header.set_cell(column, Cell::text(descriptor.display_name.as_str()));
            columns.push((column, descriptor));
        }

        for (column, descriptor) in &columns {
            sheet.set_column_width(*column, f64::from(descriptor.column_width));
        }

        // ===== 数据行 =====
        for (idx, record) in records.iter().enumerate() {
            let row_idx = cast_row_num(idx + 1)?;
            let row = sheet.create_row(row_idx);
            row.set_cell(0, Cell::number(f64::from(row_idx)));

            for (column, descriptor) in &columns {
                let Some(field) = catalog.field(descriptor) else {
                    continue;
                };
                let cell = cell_codec::encode(&field.get(record), field.name(), format_map);
                row.set_cell(*column, cell);
            }
        }

        debug!(columns = columns.len(), rows = records.len(), "记录写入完成");
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::{ExcelField, Field};
    use crate::domain::sheet::CellValue;
    use crate::excel_field;

    #[derive(Debug, Default)]
    struct Roll {
        roll_no: String,
        diameter: Option<f64>,
        active: bool,
        secret: String,
    }

    impl Record for Roll {
        fn fields() -> Vec<Field<Self>> {
            vec![
                excel_field!(Roll, roll_no: String).excel(ExcelField::named("辊号").width(10)),
                excel_field!(Roll, diameter: Option<f64>).excel(ExcelField::named("直径")),
                excel_field!(Roll, active: bool).excel(ExcelField::new()),
                excel_field!(Roll, secret: String).excel(ExcelField::new().skip()),
            ]
        }
    }

    fn header_titles(sheet: &Sheet) -> Vec<String> {
        let header = sheet.row(0).unwrap();
        (0..header.width())
            .map(|c| header.cell(c).map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_write_header_and_rows() {
        let options = ExcelOptions::default();
        let records = vec![
            Roll {
                roll_no: "R1".to_string(),
                diameter: Some(620.5),
                active: true,
                secret: "x".to_string(),
            },
            Roll {
                roll_no: "R2".to_string(),
                diameter: None,
                active: false,
                secret: "y".to_string(),
            },
        ];

        let sheet = RecordWriter::new(&options)
            .write(&records, &FormatMap::new())
            .unwrap();

        assert_eq!(sheet.name(), "Sheet1");
        assert_eq!(header_titles(&sheet), vec!["序号", "辊号", "直径", "active"]);
        assert_eq!(sheet.row_count(), 3);

        assert_eq!(sheet.cell(1, 0), Some(&Cell::number(1.0)));
        assert_eq!(sheet.cell(1, 1), Some(&Cell::text("R1")));
        assert_eq!(sheet.cell(1, 2), Some(&Cell::number(620.5)));
        assert_eq!(sheet.cell(1, 3), Some(&Cell::boolean(true)));

        // None 写为空白单元格（单元格仍存在）
        assert_eq!(sheet.cell(2, 0), Some(&Cell::number(2.0)));
        assert_eq!(sheet.cell(2, 2).map(Cell::value), Some(&CellValue::Blank));
        assert!(sheet.cell(2, 4).is_none());
    }

    #[test]
    fn test_write_column_widths() {
        let options = ExcelOptions::default();
        let sheet = RecordWriter::new(&options)
            .write::<Roll>(&[], &FormatMap::new())
            .unwrap();

        assert_eq!(sheet.column_width(0), None);
        assert_eq!(sheet.column_width(1), Some(10.0));
        assert_eq!(sheet.column_width(2), Some(20.0));
        assert_eq!(sheet.column_width(4), None);
    }

    #[test]
    fn test_write_empty_input_keeps_header() {
        let options = ExcelOptions::default()
            .with_sheet_name("轧辊")
            .with_sequence_title("No.");
        let sheet = RecordWriter::new(&options)
            .write::<Roll>(&[], &FormatMap::new())
            .unwrap();

        assert_eq!(sheet.name(), "轧辊");
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(header_titles(&sheet), vec!["No.", "辊号", "直径", "active"]);
    }

    #[test]
    fn test_write_with_format_map() {
        let options = ExcelOptions::default();
        let format_map = FormatMap::new().with_entry("active", "true", "在用");
        let records = vec![
            Roll {
                active: true,
                ..Roll::default()
            },
            Roll::default(),
        ];

        let sheet = RecordWriter::new(&options)
            .write(&records, &format_map)
            .unwrap();

        assert_eq!(sheet.cell(1, 3), Some(&Cell::text("在用")));
        // 映射未命中时按原类型写入
        assert_eq!(sheet.cell(2, 3), Some(&Cell::boolean(false)));
    }
}
