// ==========================================
// Excel 记录转换 - 工作簿内存模型
// ==========================================
// 职责: 工作簿 / 工作表 / 行 / 单元格
// 说明: 与文件格式无关，由 codec 层负责序列化
// ==========================================

use crate::domain::date::{
    datetime_to_serial, is_date_format, serial_to_datetime, DATE_TIME_NUM_FORMAT,
    DATE_TIME_PATTERN,
};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// CellValue - 单元格运行时类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Blank,
    Boolean(bool),
    Number(f64),
    Text(String),
    Error(String),   // 错误码文本，如 "#DIV/0!"
    Formula(String), // 公式源文本（不含计算结果）
}

// ==========================================
// Cell - 单元格
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    value: CellValue,
    num_format: Option<String>,
}

impl Cell {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_value(CellValue::Boolean(value))
    }

    pub fn number(value: f64) -> Self {
        Self::from_value(CellValue::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::from_value(CellValue::Text(value.into()))
    }

    pub fn error(code: impl Into<String>) -> Self {
        Self::from_value(CellValue::Error(code.into()))
    }

    pub fn formula(source: impl Into<String>) -> Self {
        Self::from_value(CellValue::Formula(source.into()))
    }

    /// 日期单元格：序列号 + 日期数字格式
    ///
    /// 早于 1899-12-31 的日期没有序列号，写为 yyyy-MM-dd HH:mm:ss 文本。
    pub fn date_time(value: &NaiveDateTime) -> Self {
        match datetime_to_serial(value) {
            Some(serial) => Self::number(serial).with_num_format(DATE_TIME_NUM_FORMAT),
            None => Self::text(value.format(DATE_TIME_PATTERN).to_string()),
        }
    }

    pub fn from_value(value: CellValue) -> Self {
        Self {
            value,
            num_format: None,
        }
    }

    pub fn with_num_format(mut self, format_code: impl Into<String>) -> Self {
        self.num_format = Some(format_code.into());
        self
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn set_value(&mut self, value: CellValue) {
        self.value = value;
    }

    pub fn num_format(&self) -> Option<&str> {
        self.num_format.as_deref()
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.value, CellValue::Blank)
    }

    /// 数字单元格且数字格式为日期格式
    pub fn is_date_formatted(&self) -> bool {
        matches!(self.value, CellValue::Number(_))
            && self.num_format.as_deref().is_some_and(is_date_format)
    }

    /// 日期格式单元格的日期值
    pub fn date_time_value(&self) -> Option<NaiveDateTime> {
        match self.value {
            CellValue::Number(serial) if self.is_date_formatted() => serial_to_datetime(serial),
            _ => None,
        }
    }
}

/// 单元格的展示文本（CSV 写出、调试输出）
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dt) = self.date_time_value() {
            return write!(f, "{}", dt.format(DATE_TIME_PATTERN));
        }
        match &self.value {
            CellValue::Blank => Ok(()),
            CellValue::Boolean(v) => write!(f, "{}", v),
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Error(v) => f.write_str(v),
            CellValue::Formula(v) => write!(f, "={}", v),
        }
    }
}

// ==========================================
// Row - 行（稀疏列）
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: BTreeMap<u16, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建（或覆盖为）空白单元格
    pub fn create_cell(&mut self, index: u16) -> &mut Cell {
        let cell = self.cells.entry(index).or_default();
        *cell = Cell::blank();
        cell
    }

    pub fn set_cell(&mut self, index: u16, cell: Cell) {
        self.cells.insert(index, cell);
    }

    pub fn cell(&self, index: u16) -> Option<&Cell> {
        self.cells.get(&index)
    }

    /// 最大列号 + 1（无单元格时为 0）
    pub fn width(&self) -> u16 {
        self.cells
            .keys()
            .next_back()
            .map(|last| last.saturating_add(1))
            .unwrap_or(0)
    }

    pub fn cells(&self) -> impl Iterator<Item = (u16, &Cell)> {
        self.cells.iter().map(|(idx, cell)| (*idx, cell))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ==========================================
// Sheet - 工作表（稀疏行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, Row>,
    column_widths: BTreeMap<u16, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 创建（或覆盖为）空行
    pub fn create_row(&mut self, index: u32) -> &mut Row {
        let row = self.rows.entry(index).or_default();
        *row = Row::new();
        row
    }

    /// 取行，不存在时创建（保留已有单元格）
    pub fn ensure_row(&mut self, index: u32) -> &mut Row {
        self.rows.entry(index).or_default()
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(&index)
    }

    pub fn rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.iter().map(|(idx, row)| (*idx, row))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn last_row_index(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    /// 设置列宽（字符数）
    pub fn set_column_width(&mut self, column: u16, width: f64) {
        self.column_widths.insert(column, width);
    }

    pub fn column_width(&self, column: u16) -> Option<f64> {
        self.column_widths.get(&column).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(col, width)| (*col, *width))
    }

    /// 取单元格（行或列不存在时为 None）
    pub fn cell(&self, row: u32, column: u16) -> Option<&Cell> {
        self.row(row).and_then(|r| r.cell(column))
    }
}

// ==========================================
// Workbook - 工作簿
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }
}
