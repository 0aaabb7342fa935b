use chrono::NaiveDate;
use resep_core::core::FormController;
use resep_core::storage::{columns, RowStore, StoreConnector, WorkbookConnector, WorkbookStore};
use tempfile::TempDir;

fn session_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

fn fill_valid_draft(controller: &mut FormController, prescription: &str) {
    let draft = controller.draft_mut();
    draft.patient_name = "PANCA WISANTA".into();
    draft.medical_record_number = "123456".into();
    draft.sep_number = "1234567890123456789".into();
    draft.prescription_number = prescription.into();
}

#[test]
fn submissions_persist_across_store_handles() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("workbooks").join("resep.json");
    let connector = WorkbookConnector::new(path.clone());

    let mut controller = FormController::new(session_date());
    fill_valid_draft(&mut controller, "12345678901234");
    assert_eq!(controller.submit(&connector).unwrap(), 1);

    controller.apply_pending_resets();
    controller.draft_mut().prescription_number = "98765432109876".into();
    assert_eq!(controller.submit(&connector).unwrap(), 2);

    // A fresh handle over the same file sees both records.
    let store = WorkbookStore::new(path);
    assert_eq!(
        store.read_column(columns::PRESCRIPTION_NUMBER).unwrap(),
        vec!["12345678901234", "98765432109876"]
    );
}

#[test]
fn duplicates_are_detected_across_sessions() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("resep.json");
    let connector = WorkbookConnector::new(path);

    let mut first_session = FormController::new(session_date());
    fill_valid_draft(&mut first_session, "12345678901234");
    first_session.submit(&connector).expect("first save");

    let mut second_session = FormController::new(session_date());
    fill_valid_draft(&mut second_session, "12345678901234");
    assert!(second_session.submit(&connector).is_err());

    let store = connector.connect().expect("connect");
    assert_eq!(store.read_column(columns::IDENTIFIER).unwrap().len(), 1);
}

#[test]
fn workbook_file_is_pretty_json_with_a_schema_version() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("resep.json");
    let connector = WorkbookConnector::new(path.clone());

    let mut controller = FormController::new(session_date());
    fill_valid_draft(&mut controller, "12345678901234");
    controller.submit(&connector).expect("save");

    let data = std::fs::read_to_string(&path).expect("read workbook");
    assert!(data.contains("\"schema_version\": 1"));
    assert!(data.contains("PANCA WISANTA"));
    // No stray tmp file is left behind after the atomic rewrite.
    assert!(!path.with_extension("json.tmp").exists());
}
