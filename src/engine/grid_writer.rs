// ==========================================
// Excel 记录转换 - 字符串表格写入器
// ==========================================
// 职责: 预先格式化的字符串矩阵 → 多工作表工作簿
// 说明: 不经过字段目录与类型转换，所有单元格为文本
// ==========================================

use crate::codec::error::{cast_col_num, cast_row_num};
use crate::config::{validate_sheet_name, ExcelOptions};
use crate::domain::sheet::{Cell, Sheet, Workbook};
use crate::engine::error::{MarshalError, MarshalResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 单个工作表的表格数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSheet {
    /// 工作表名（为空时按序号命名）
    pub name: String,
    /// 标题行（可选）
    #[serde(default)]
    pub title: Option<Vec<String>>,
    /// 数据行
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl GridSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_title<I, S>(mut self, title: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title = Some(title.into_iter().map(Into::into).collect());
        self
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }
}

pub struct GridWriter<'a> {
    options: &'a ExcelOptions,
}

impl<'a> GridWriter<'a> {
    pub fn new(options: &'a ExcelOptions) -> Self {
        Self { options }
    }

    /// 写入多个表格
    ///
    /// # 返回
    /// - Ok(Workbook): 每个表格一个工作表
    /// - Err(EmptyGrid): 没有表格
    /// - Err(Config): 工作表名不合法
    #[instrument(skip(self, grids), fields(sheets = grids.len()))]
    pub fn write(&self, grids: &[GridSheet]) -> MarshalResult<Workbook> {
        if grids.is_empty() {
            return Err(MarshalError::EmptyGrid);
        }

        let mut workbook = Workbook::new();
        for (idx, grid) in grids.iter().enumerate() {
            let name = if grid.name.is_empty() {
                format!("Sheet{}", idx + 1)
            } else {
                validate_sheet_name(&grid.name)?;
                grid.name.clone()
            };

            workbook.push_sheet(self.write_sheet(name, grid)?);
        }

        Ok(workbook)
    }

    fn write_sheet(&self, name: String, grid: &GridSheet) -> MarshalResult<Sheet> {
        let mut sheet = Sheet::new(name);

        // 有标题行时数据从第 1 行开始
        let offset = match &grid.title {
            Some(title) => {
                write_text_row(&mut sheet, 0, title)?;
                1
            }
            None => 0,
        };

        for (idx, values) in grid.rows.iter().enumerate() {
            write_text_row(&mut sheet, cast_row_num(idx + offset)?, values)?;
        }

        let used_columns = grid
            .title
            .iter()
            .chain(grid.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let width = f64::from(self.options.grid_column_width);
        for column in 0..used_columns {
            sheet.set_column_width(cast_col_num(column)?, width);
        }

        debug!(
            sheet = %sheet.name(),
            rows = sheet.row_count(),
            columns = used_columns,
            "表格写入完成"
        );
        Ok(sheet)
    }
}

fn write_text_row(sheet: &mut Sheet, row_idx: u32, values: &[String]) -> MarshalResult<()> {
    let row = sheet.create_row(row_idx);
    for (column, value) in values.iter().enumerate() {
        row.set_cell(cast_col_num(column)?, Cell::text(value.as_str()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_grid_with_title() {
        let mut grid = GridSheet::new("统计").with_title(["机组", "吨位"]);
        grid.push_row(["H032", "120.5"]);
        grid.push_row(["H033", "98", "备注"]);

        let options = ExcelOptions::default();
        let workbook = GridWriter::new(&options).write(&[grid]).unwrap();

        let sheet = workbook.first_sheet().unwrap();
        assert_eq!(sheet.name(), "统计");
        assert_eq!(sheet.cell(0, 0), Some(&Cell::text("机组")));
        assert_eq!(sheet.cell(1, 1), Some(&Cell::text("120.5")));
        assert_eq!(sheet.cell(2, 2), Some(&Cell::text("备注")));
        assert_eq!(sheet.column_width(2), Some(18.0));
        assert_eq!(sheet.column_width(3), None);
    }

    #[test]
    fn test_grid_without_title_starts_at_row_zero() {
        let mut grid = GridSheet::new("");
        grid.push_row(["a"]);

        let options = ExcelOptions::default();
        let workbook = GridWriter::new(&options)
            .write(&[GridSheet::new("first"), grid])
            .unwrap();

        assert_eq!(workbook.sheets().len(), 2);
        let sheet = &workbook.sheets()[1];
        assert_eq!(sheet.name(), "Sheet2");
        assert_eq!(sheet.cell(0, 0), Some(&Cell::text("a")));
    }

    #[test]
    fn test_grid_errors() {
        let options = ExcelOptions::default();
        let writer = GridWriter::new(&options);

        assert!(matches!(writer.write(&[]), Err(MarshalError::EmptyGrid)));
        assert!(matches!(
            writer.write(&[GridSheet::new("a/b")]),
            Err(MarshalError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
