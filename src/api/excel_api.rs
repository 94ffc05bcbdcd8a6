// ==========================================
// Excel 记录转换 - 导入导出 API
// ==========================================
// 职责: 记录 ↔ 文件字节 / 文件 / 下载附件
// 流程: RecordWriter / RecordReader + WorkbookCodec
// ==========================================

use crate::codec::{codec_for_path, CodecError, WorkbookCodec, XlsxCodec};
use crate::config::ExcelOptions;
use crate::domain::field::Record;
use crate::domain::sheet::{Sheet, Workbook};
use crate::engine::error::MarshalResult;
use crate::engine::format_map::FormatMap;
use crate::engine::grid_writer::{GridSheet, GridWriter};
use crate::engine::record_reader::RecordReader;
use crate::engine::record_writer::RecordWriter;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, instrument};

// ==========================================
// Attachment - 下载附件
// ==========================================

/// HTTP 下载响应所需的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    /// Content-Type 头
    pub content_type: String,
    /// Content-Disposition 头
    pub content_disposition: String,
    pub body: Vec<u8>,
}

// ==========================================
// ExcelApi
// ==========================================

/// 导入导出 API
///
/// 职责：
/// 1. 记录导出（字节、Writer、文件、下载附件）
/// 2. 记录导入（字节、Reader、文件）
/// 3. 字符串表格导出
#[derive(Debug, Clone, Default)]
pub struct ExcelApi {
    options: ExcelOptions,
}

impl ExcelApi {
    /// 以校验后的配置创建
    pub fn new(options: ExcelOptions) -> MarshalResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ExcelOptions {
        &self.options
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 记录 → 单工作表工作簿
    pub fn build_workbook<T: Record>(
        &self,
        records: &[T],
        format_map: &FormatMap,
    ) -> MarshalResult<Workbook> {
        let sheet = RecordWriter::new(&self.options).write(records, format_map)?;
        Ok(Workbook::with_sheet(sheet))
    }

    /// 导出为 xlsx 字节
    #[instrument(skip(self, records, format_map), fields(count = records.len()))]
    pub fn export_to_bytes<T: Record>(
        &self,
        records: &[T],
        format_map: &FormatMap,
    ) -> MarshalResult<Vec<u8>> {
        let workbook = self.build_workbook(records, format_map)?;
        Ok(XlsxCodec.write_workbook(&workbook)?)
    }

    /// 导出为 xlsx 并写入任意输出
    pub fn export_to_writer<T: Record, W: Write>(
        &self,
        records: &[T],
        format_map: &FormatMap,
        mut writer: W,
    ) -> MarshalResult<()> {
        let bytes = self.export_to_bytes(records, format_map)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// 导出到文件（按扩展名选择 .xlsx / .csv）
    #[instrument(skip(self, records, format_map, path), fields(path = %path.as_ref().display(), count = records.len()))]
    pub fn export_to_file<T: Record, P: AsRef<Path>>(
        &self,
        records: &[T],
        format_map: &FormatMap,
        path: P,
    ) -> MarshalResult<()> {
        let codec = codec_for_path(path.as_ref())?;
        let workbook = self.build_workbook(records, format_map)?;
        let bytes = codec.write_workbook(&workbook)?;
        fs::write(path.as_ref(), &bytes)?;

        info!(bytes = bytes.len(), "导出文件完成");
        Ok(())
    }

    /// 导出为下载附件
    ///
    /// # 参数
    /// - file_name: 下载文件名（扩展名决定格式）
    pub fn export_attachment<T: Record>(
        &self,
        records: &[T],
        format_map: &FormatMap,
        file_name: &str,
    ) -> MarshalResult<Attachment> {
        let codec = codec_for_path(file_name)?;
        let workbook = self.build_workbook(records, format_map)?;
        let body = codec.write_workbook(&workbook)?;

        Ok(Attachment {
            file_name: file_name.to_string(),
            content_type: codec.content_type().to_string(),
            content_disposition: format!("attachment;filename={}", file_name),
            body,
        })
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 从工作表读取记录
    pub fn read_sheet<T: Record>(
        &self,
        sheet: &Sheet,
        format_map: &FormatMap,
    ) -> MarshalResult<Vec<T>> {
        RecordReader::new(&self.options).read(sheet, format_map)
    }

    /// 从 xlsx 字节导入（读取第一个工作表）
    #[instrument(skip(self, bytes, format_map), fields(size = bytes.len()))]
    pub fn import_from_bytes<T: Record>(
        &self,
        bytes: &[u8],
        format_map: &FormatMap,
    ) -> MarshalResult<Vec<T>> {
        self.import_with_codec(&XlsxCodec, bytes, format_map)
    }

    /// 从 xlsx 输入流导入
    pub fn import_from_reader<T: Record, R: Read>(
        &self,
        mut reader: R,
        format_map: &FormatMap,
    ) -> MarshalResult<Vec<T>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(CodecError::from)?;
        self.import_from_bytes(&bytes, format_map)
    }

    /// 从文件导入（按扩展名选择 .xlsx / .csv）
    #[instrument(skip(self, path, format_map), fields(path = %path.as_ref().display()))]
    pub fn import_from_file<T: Record, P: AsRef<Path>>(
        &self,
        path: P,
        format_map: &FormatMap,
    ) -> MarshalResult<Vec<T>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CodecError::FileNotFound(path.display().to_string()).into());
        }

        let codec = codec_for_path(path)?;
        let bytes = fs::read(path).map_err(CodecError::from)?;
        self.import_with_codec(codec.as_ref(), &bytes, format_map)
    }

    fn import_with_codec<T: Record>(
        &self,
        codec: &dyn WorkbookCodec,
        bytes: &[u8],
        format_map: &FormatMap,
    ) -> MarshalResult<Vec<T>> {
        let workbook = codec.read_workbook(bytes)?;
        let sheet = workbook.first_sheet().ok_or(CodecError::NoWorksheet)?;

        let records = self.read_sheet(sheet, format_map)?;
        info!(sheet = %sheet.name(), count = records.len(), "导入完成");
        Ok(records)
    }

    // ==========================================
    // 字符串表格导出
    // ==========================================

    /// 表格导出为 xlsx 字节
    pub fn write_grid_to_bytes(&self, grids: &[GridSheet]) -> MarshalResult<Vec<u8>> {
        let workbook = GridWriter::new(&self.options).write(grids)?;
        Ok(XlsxCodec.write_workbook(&workbook)?)
    }

    /// 表格导出到文件（按扩展名选择格式，CSV 仅第一个表格）
    #[instrument(skip(self, grids, path), fields(path = %path.as_ref().display(), sheets = grids.len()))]
    pub fn write_grid_to_file<P: AsRef<Path>>(
        &self,
        grids: &[GridSheet],
        path: P,
    ) -> MarshalResult<()> {
        let codec = codec_for_path(path.as_ref())?;
        let workbook = GridWriter::new(&self.options).write(grids)?;
        fs::write(path.as_ref(), codec.write_workbook(&workbook)?)?;
        Ok(())
    }
}
