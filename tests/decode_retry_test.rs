// ==========================================
// 单元格解码重试集成测试
// ==========================================
// 测试目标: 解析失败时的有界重试与错误上下文
// ==========================================


use excel_record::engine::cell_codec::{decode_cell, retry_bounded, DecodeContext};
use excel_record::{
    logging, Cell, ExcelOptions, FormatMap, MarshalError, Record, RecordReader,
};
use test_helpers::{text_sheet, Account, CoilRecord};

#[test]
fn test_default_budget_is_eight_attempts() {
    logging::init_test();

    let options = ExcelOptions::default();
    let sheet = text_sheet(&[&["序号", "id", "name"], &["1", "1", "A"], &["2", "abc", "B"]]);

    let result: Result<Vec<Account>, _> =
        RecordReader::new(&options).read(&sheet, &FormatMap::new());

    match result {
        Err(MarshalError::CellDecodeExhausted {
            row,
            column,
            field,
            attempts,
            message,
        }) => {
            assert_eq!(row, 2);
            assert_eq!(column, 1);
            assert_eq!(field, "id");
            assert_eq!(attempts, 8);
            assert!(message.contains("abc"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_date_field_default_budget() {
    logging::init_test();

    let options = ExcelOptions::default();
    let sheet = text_sheet(&[
        &["序号", "卷号", "生产时间"],
        &["1", "C1", "2024-03-01 08:15:00"],
        &["2", "C2", "下周一"],
    ]);

    let result: Result<Vec<CoilRecord>, _> =
        RecordReader::new(&options).read(&sheet, &FormatMap::new());

    match result {
        Err(MarshalError::CellDecodeExhausted {
            row,
            column,
            field,
            attempts,
            message,
        }) => {
            assert_eq!(row, 2);
            assert_eq!(column, 2);
            assert_eq!(field, "produced_at");
            assert_eq!(attempts, 8);
            assert!(message.contains("下周一"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_retry_runs_exactly_budget_times() {
    let mut calls = 0u32;
    let result: Result<(), _> = retry_bounded(8, |attempt| {
        calls += 1;
        Err(format!("attempt {}", attempt))
    });

    assert_eq!(calls, 8);
    let exhausted = result.unwrap_err();
    assert_eq!(exhausted.attempts, 8);
    assert_eq!(exhausted.last_error, "attempt 8");
}

#[test]
fn test_decode_cell_error_context() {
    let fields = CoilRecord::fields();
    let produced_at = fields.iter().find(|f| f.name() == "produced_at").unwrap();

    let mut coil = CoilRecord::default();
    let format_map = FormatMap::new();
    let cell = Cell::text("2024/01/01");
    let ctx = DecodeContext {
        row: 5,
        column: 7,
        format_map: &format_map,
        max_attempts: 2,
    };

    let err = decode_cell(produced_at, &mut coil, Some(&cell), ctx).unwrap_err();
    assert!(matches!(
        err,
        MarshalError::CellDecodeExhausted { row: 5, column: 7, attempts: 2, .. }
    ));
    assert_eq!(coil.produced_at, None);

    // 空白与缺失单元格不触发重试
    assert!(decode_cell(produced_at, &mut coil, None, ctx).is_ok());
    assert!(decode_cell(produced_at, &mut coil, Some(&Cell::blank()), ctx).is_ok());
}

#[test]
fn test_configured_budget() {
    let options = ExcelOptions::from_json_str(r#"{"max_decode_attempts": 3}"#).unwrap();
    let sheet = text_sheet(&[&["序号", "宽度"], &["1", "1.5"]]);

    let result: Result<Vec<CoilRecord>, _> =
        RecordReader::new(&options).read(&sheet, &FormatMap::new());
    assert!(matches!(
        result,
        Err(MarshalError::CellDecodeExhausted { attempts: 3, .. })
    ));
}
