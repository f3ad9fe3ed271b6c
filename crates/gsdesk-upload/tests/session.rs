//! End-to-end upload flows through `UploadSession`.

use chrono::NaiveDate;
use gsdesk_core::{PriceIndex, ProductRow, UploadFormats, UploadMode};
use gsdesk_upload::{read_path, CellValue, UploadError, UploadSession};

fn catalog() -> PriceIndex {
    PriceIndex::from_products(&[
        ProductRow {
            code: "A1".into(),
            online: 12_345.0,
            ..ProductRow::default()
        },
        ProductRow {
            code: "B2".into(),
            deal: 90_000.0,
            ..ProductRow::default()
        },
    ])
}

#[test]
fn price_upload_flow_exports_rounded_prices() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = UploadSession::new(UploadMode::Price, &UploadFormats::default());

    session
        .load(
            "SKU,상품명,판매가\nA1,작업대,0\nB2,싱크대,0\nZZ,단종,5000\n".as_bytes(),
            "playauto.csv",
            Some("text/csv"),
        )
        .unwrap();
    assert_eq!(session.source_name(), Some("playauto.csv"));
    assert_eq!(session.stale_skus(&catalog()).unwrap(), 1);

    let (updated, skipped) = session.apply(&catalog()).unwrap();
    assert_eq!((updated, skipped), (2, 1));
    assert!(session.issues().is_empty());

    let now = NaiveDate::from_ymd_opt(2024, 11, 2)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let path = session.export(dir.path(), now).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("price_upload_2024-11-02T14-30-00.xlsx")
    );

    let exported = read_path(&path).unwrap();
    assert_eq!(exported.headers, vec!["SKU", "상품명", "판매가"]);
    assert_eq!(exported.cell(0, "판매가"), Some(&CellValue::Number(12_300.0)));
    assert_eq!(exported.cell(1, "판매가"), Some(&CellValue::Number(90_000.0)));
    assert_eq!(exported.cell(2, "판매가"), Some(&CellValue::from("5000")));
}

#[test]
fn option_upload_flow_rounds_surcharges() {
    let mut session = UploadSession::new(UploadMode::Option, &UploadFormats::default());
    session
        .load("SKU,옵션가\nA1,\"￦1,250\"\nA2,￦1250\n".as_bytes(), "option.csv", None)
        .unwrap();

    session.apply(&PriceIndex::default()).unwrap();

    let table = session.table().unwrap();
    // Quotes are literal, so the first value was split at its comma.
    assert_eq!(table.cell(0, "옵션가"), Some(&CellValue::Number(0.0)));
    assert_eq!(table.cell(1, "옵션가"), Some(&CellValue::Number(1_300.0)));
}

#[test]
fn steps_before_load_fail_with_no_table() {
    let mut session = UploadSession::new(UploadMode::Price, &UploadFormats::default());
    let dir = tempfile::tempdir().unwrap();
    let now = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    assert!(matches!(session.apply(&catalog()), Err(UploadError::NoTableLoaded)));
    assert!(matches!(session.validate(), Err(UploadError::NoTableLoaded)));
    assert!(matches!(session.stale_skus(&catalog()), Err(UploadError::NoTableLoaded)));
    assert!(matches!(session.export(dir.path(), now), Err(UploadError::NoTableLoaded)));
}

#[test]
fn failed_load_keeps_previous_table() {
    let mut session = UploadSession::new(UploadMode::Price, &UploadFormats::default());
    session.load("SKU,판매가\nA1,1\n".as_bytes(), "first.csv", None).unwrap();

    let err = session.load(b"", "empty.csv", None).unwrap_err();

    assert!(matches!(err, UploadError::EmptyFile { .. }));
    assert_eq!(session.source_name(), Some("first.csv"));
    assert_eq!(session.table().unwrap().len(), 1);
}

#[test]
fn failed_apply_keeps_previous_table() {
    let mut session = UploadSession::new(UploadMode::Price, &UploadFormats::default());
    session.load(b"code,price\nA1,1\n", "wrong-form.csv", None).unwrap();
    let before = session.table().cloned();

    let err = session.apply(&catalog()).unwrap_err();

    assert!(matches!(err, UploadError::HeaderNotFound { .. }));
    assert_eq!(session.table().cloned(), before);
}

#[test]
fn validate_flags_blank_sku_only() {
    let mut session = UploadSession::new(UploadMode::Price, &UploadFormats::default());
    session.load("SKU,판매가\n,100\n".as_bytes(), "one.csv", None).unwrap();

    let issues = session.validate().unwrap();

    assert_eq!(issues.len(), 1);
    assert!(issues.contains(1, "SKU"));
}
