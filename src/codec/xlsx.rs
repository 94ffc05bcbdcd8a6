// ==========================================
// Excel 记录转换 - XLSX 编解码器
// ==========================================
// 读取: calamine
// 写入: rust_xlsxwriter
// ==========================================

use crate::codec::error::{cast_col_num, cast_row_num, CodecError, CodecResult};
use crate::codec::WorkbookCodec;
use crate::domain::date::DATE_TIME_NUM_FORMAT;
use crate::domain::sheet::{Cell, CellValue, Sheet, Workbook};
use calamine::{Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct XlsxCodec;

impl WorkbookCodec for XlsxCodec {
    fn read_workbook(&self, bytes: &[u8]) -> CodecResult<Workbook> {
        let mut book: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        let sheet_names = book.sheet_names();
        if sheet_names.is_empty() {
            return Err(CodecError::NoWorksheet);
        }

        let mut workbook = Workbook::new();
        for name in sheet_names {
            let range = book.worksheet_range(&name)?;
            let mut sheet = sheet_from_range(&name, &range)?;

            // 公式单元格以公式源文本为准
            match book.worksheet_formula(&name) {
                Ok(formulas) => overlay_formulas(&mut sheet, &formulas)?,
                Err(e) => debug!(sheet = %name, error = %e, "公式读取失败，按单元格值处理"),
            }

            debug!(sheet = %name, rows = sheet.row_count(), "工作表解析完成");
            workbook.push_sheet(sheet);
        }

        Ok(workbook)
    }

    fn write_workbook(&self, workbook: &Workbook) -> CodecResult<Vec<u8>> {
        let mut book = XlsxWorkbook::new();
        let mut formats = FormatCache::default();

        if workbook.sheets().is_empty() {
            book.add_worksheet();
        }

        for sheet in workbook.sheets() {
            let worksheet = book.add_worksheet();
            if !sheet.name().is_empty() {
                worksheet.set_name(sheet.name())?;
            }

            for (column, width) in sheet.column_widths() {
                worksheet.set_column_width(column, width)?;
            }

            for (row_idx, row) in sheet.rows() {
                for (col_idx, cell) in row.cells() {
                    write_cell(worksheet, row_idx, col_idx, cell, &mut formats)?;
                }
            }
        }

        Ok(book.save_to_buffer()?)
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }
}

// ==========================================
// 读取: calamine Range → Sheet
// ==========================================
fn sheet_from_range(name: &str, range: &Range<Data>) -> CodecResult<Sheet> {
    let mut sheet = Sheet::new(name);
    let (row_start, col_start) = range.start().unwrap_or((0, 0));

    for (row_offset, col_offset, data) in range.cells() {
        let cell = match data {
            // 空单元格不建模，全空行即为缺失行
            Data::Empty => continue,
            Data::Int(v) => Cell::number(*v as f64),
            Data::Float(v) => Cell::number(*v),
            Data::String(v) => Cell::text(v.clone()),
            Data::Bool(v) => Cell::boolean(*v),
            Data::DateTime(v) => Cell::number(v.as_f64()).with_num_format(DATE_TIME_NUM_FORMAT),
            Data::DateTimeIso(v) => Cell::text(v.clone()),
            Data::DurationIso(v) => Cell::text(v.clone()),
            Data::Error(e) => Cell::error(e.to_string()),
        };

        let row_idx = cast_row_num(row_start as usize + row_offset)?;
        let col_idx = cast_col_num(col_start as usize + col_offset)?;
        sheet.ensure_row(row_idx).set_cell(col_idx, cell);
    }

    Ok(sheet)
}

fn overlay_formulas(sheet: &mut Sheet, formulas: &Range<String>) -> CodecResult<()> {
    let (row_start, col_start) = formulas.start().unwrap_or((0, 0));

    for (row_offset, col_offset, source) in formulas.cells() {
        if source.is_empty() {
            continue;
        }
        let row_idx = cast_row_num(row_start as usize + row_offset)?;
        let col_idx = cast_col_num(col_start as usize + col_offset)?;
        let source = source.strip_prefix('=').unwrap_or(source);
        sheet
            .ensure_row(row_idx)
            .set_cell(col_idx, Cell::formula(source));
    }

    Ok(())
}

// ==========================================
// 写入: Sheet → rust_xlsxwriter Worksheet
// ==========================================
#[derive(Default)]
struct FormatCache {
    by_code: HashMap<String, Format>,
}

impl FormatCache {
    fn num_format(&mut self, code: &str) -> &Format {
        self.by_code
            .entry(code.to_string())
            .or_insert_with(|| Format::new().set_num_format(code))
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &mut FormatCache,
) -> CodecResult<()> {
    match cell.value() {
        // 空白单元格不写出
        CellValue::Blank => {}
        CellValue::Boolean(v) => {
            worksheet.write_boolean(row, col, *v)?;
        }
        CellValue::Number(v) => match cell.num_format() {
            Some(code) => {
                worksheet.write_number_with_format(row, col, *v, formats.num_format(code))?;
            }
            None => {
                worksheet.write_number(row, col, *v)?;
            }
        },
        CellValue::Text(v) => {
            worksheet.write_string(row, col, v)?;
        }
        CellValue::Error(v) => {
            worksheet.write_string(row, col, v)?;
        }
        CellValue::Formula(v) => {
            worksheet.write_formula(row, col, v.as_str())?;
        }
    }
    Ok(())
}
