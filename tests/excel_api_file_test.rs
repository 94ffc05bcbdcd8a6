// ==========================================
// ExcelApi 文件导入导出集成测试
// ==========================================
// 测试目标: 文件、配置文件、格式化映射文件、表格导出
// ==========================================


use excel_record::codec::{CsvCodec, WorkbookCodec, XlsxCodec};
use excel_record::{
    logging, CodecError, ExcelApi, ExcelOptions, FormatMap, GridSheet, MarshalError,
};
use std::fs;
use tempfile::tempdir;
use test_helpers::{
    active_format_map, coil_format_map, row_texts, sample_accounts, sample_coils, Account,
    CoilRecord,
};

#[test]
fn test_export_and_import_xlsx_file() {
    logging::init_test();

    let dir = tempdir().unwrap();
    let path = dir.path().join("coils.xlsx");

    let api = ExcelApi::default();
    api.export_to_file(&sample_coils(), &coil_format_map(), &path)
        .unwrap();
    assert!(path.exists());

    let coils: Vec<CoilRecord> = api.import_from_file(&path, &coil_format_map()).unwrap();
    assert_eq!(coils, sample_coils());
}

#[test]
fn test_export_and_import_csv_file() {
    logging::init_test();

    let dir = tempdir().unwrap();
    let path = dir.path().join("accounts.csv");

    let api = ExcelApi::default();
    api.export_to_file(&sample_accounts(), &active_format_map(), &path)
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "序号,id,name,active\n1,1,A,启用\n2,2,B,禁用\n"
    );

    let accounts: Vec<Account> = api.import_from_file(&path, &active_format_map()).unwrap();
    assert_eq!(accounts, sample_accounts());
}

#[test]
fn test_import_file_errors() {
    let dir = tempdir().unwrap();
    let api = ExcelApi::default();

    let missing = dir.path().join("missing.xlsx");
    let result: Result<Vec<Account>, _> = api.import_from_file(&missing, &FormatMap::new());
    assert!(matches!(
        result,
        Err(MarshalError::Codec(CodecError::FileNotFound(_)))
    ));

    let unsupported = dir.path().join("accounts.txt");
    fs::write(&unsupported, "id,name\n").unwrap();
    let result: Result<Vec<Account>, _> = api.import_from_file(&unsupported, &FormatMap::new());
    assert!(matches!(
        result,
        Err(MarshalError::Codec(CodecError::UnsupportedFormat(_)))
    ));

    let broken = dir.path().join("broken.xlsx");
    fs::write(&broken, "not an xlsx file").unwrap();
    let result: Result<Vec<Account>, _> = api.import_from_file(&broken, &FormatMap::new());
    assert!(matches!(
        result,
        Err(MarshalError::Codec(CodecError::ExcelParseError(_)))
    ));
}

#[test]
fn test_options_and_format_map_from_json_files() {
    let dir = tempdir().unwrap();

    let options_path = dir.path().join("options.json");
    fs::write(
        &options_path,
        r#"{"sheet_name": "账户列表", "sequence_title": "行号"}"#,
    )
    .unwrap();
    let map_path = dir.path().join("format.json");
    fs::write(
        &map_path,
        r#"{"active": {"true": "启用", "false": "禁用"}}"#,
    )
    .unwrap();

    let options = ExcelOptions::from_json_file(&options_path).unwrap();
    assert_eq!(options.max_decode_attempts, 8);
    let format_map = FormatMap::from_json_file(&map_path).unwrap();

    let api = ExcelApi::new(options).unwrap();
    let bytes = api.export_to_bytes(&sample_accounts(), &format_map).unwrap();

    let workbook = XlsxCodec.read_workbook(&bytes).unwrap();
    let sheet = workbook.sheet_by_name("账户列表").unwrap();
    assert_eq!(row_texts(sheet, 0), vec!["行号", "id", "name", "active"]);
    assert_eq!(row_texts(sheet, 2), vec!["2", "2", "B", "禁用"]);

    let accounts: Vec<Account> = api.import_from_bytes(&bytes, &format_map).unwrap();
    assert_eq!(accounts, sample_accounts());
}

#[test]
fn test_attachment_for_csv_download() {
    let api = ExcelApi::default();
    let attachment = api
        .export_attachment(&sample_accounts(), &active_format_map(), "accounts.csv")
        .unwrap();

    assert!(attachment.content_type.starts_with("text/csv"));
    assert_eq!(
        attachment.content_disposition,
        "attachment;filename=accounts.csv"
    );

    let workbook = CsvCodec.read_workbook(&attachment.body).unwrap();
    assert_eq!(
        row_texts(workbook.first_sheet().unwrap(), 1),
        vec!["1", "1", "A", "启用"]
    );
}

#[test]
fn test_grid_export_multiple_sheets() {
    logging::init_test();

    let mut summary = GridSheet::new("汇总").with_title(["机组", "吨位"]);
    summary.push_row(["H031", "120.5"]);
    summary.push_row(["H032", "98"]);

    let mut detail = GridSheet::new("明细");
    detail.push_row(["C001", "H031", "23.5"]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    let api = ExcelApi::default();
    api.write_grid_to_file(&[summary, detail], &path).unwrap();

    let workbook = XlsxCodec.read_workbook(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(workbook.sheets().len(), 2);

    let summary = workbook.sheet_by_name("汇总").unwrap();
    assert_eq!(row_texts(summary, 0), vec!["机组", "吨位"]);
    assert_eq!(row_texts(summary, 1), vec!["H031", "120.5"]);

    // 无标题行时数据从第 0 行开始，数字字符串仍为文本
    let detail = workbook.sheet_by_name("明细").unwrap();
    assert_eq!(row_texts(detail, 0), vec!["C001", "H031", "23.5"]);
    assert_eq!(
        detail.cell(0, 2),
        Some(&excel_record::Cell::text("23.5"))
    );

    assert!(matches!(
        api.write_grid_to_bytes(&[]),
        Err(MarshalError::EmptyGrid)
    ));
}
