//! Tests for the week store against a local directory.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::TempDir;
use tillbook_shared::types::WeekId;

use super::{StoreError, StoreProvider, WeekStore};
use crate::closing::Day;
use crate::loans::LoanType;

fn write(root: &Path, week: i64, file: &str, value: &serde_json::Value) {
    let dir = root.join("weeks").join(week.to_string());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), serde_json::to_vec(value).unwrap()).unwrap();
}

fn store(dir: &TempDir) -> WeekStore {
    WeekStore::new(&StoreProvider::local_fs(dir.path())).unwrap()
}

#[tokio::test]
async fn test_load_full_week() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        7,
        "week.json",
        &json!({ "id": 7, "nombre_semana": "Semana 7", "fecha": "2024-05-04", "mes": "Mayo" }),
    );
    write(
        dir.path(),
        7,
        "closings.json",
        &json!([{ "dia": "Sabado", "numero_caja": 1, "total_efectivo": "500000", "base": 100000 }]),
    );
    write(
        dir.path(),
        7,
        "products.json",
        &json!([{ "nombre": "Costilla", "precio_unitario": 12000, "libras": 10, "gasto": 5000 }]),
    );
    write(
        dir.path(),
        7,
        "other_expenses.json",
        &json!([{ "fecha": "2024-05-05", "concepto": "Luz", "monto": "45000" }]),
    );
    write(
        dir.path(),
        7,
        "loans.json",
        &json!([{ "persona": "Ana", "tipo": "Prestamo", "concepto": "x", "monto": 100 }]),
    );

    let records = store(&dir).load_week(WeekId::new(7)).await.unwrap();

    assert_eq!(records.week.name, "Semana 7");
    assert_eq!(records.week.date, NaiveDate::from_ymd_opt(2024, 5, 4));
    assert_eq!(records.closings[0].day, Day::Saturday);
    assert_eq!(records.closings[0].total_cash, dec!(500000));
    assert_eq!(records.products[0].gross_total(), dec!(120000));
    assert_eq!(records.other_expenses[0].amount, dec!(45000));
    assert_eq!(records.loans[0].kind, LoanType::Loan);
    assert_eq!(records.record_count(), 4);
}

#[tokio::test]
async fn test_missing_files_are_empty() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), 3, "closings.json", &json!([]));

    let records = store(&dir).load_week(WeekId::new(3)).await.unwrap();

    assert_eq!(records.week.id, WeekId::new(3));
    assert!(records.week.name.is_empty());
    assert_eq!(records.record_count(), 0);
}

#[tokio::test]
async fn test_week_header_without_id_takes_folder_id() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), 5, "week.json", &json!({ "nombre_semana": "Cinco" }));

    let records = store(&dir).load_week(WeekId::new(5)).await.unwrap();
    assert_eq!(records.week.id, WeekId::new(5));
    assert_eq!(records.week.name, "Cinco");
}

#[tokio::test]
async fn test_spanish_and_english_keys_load_alike() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        1,
        "loans.json",
        &json!([{ "persona": "Ana", "tipo": "Gasto", "concepto": "Hielo", "monto": "300" }]),
    );
    write(
        dir.path(),
        2,
        "loans.json",
        &json!([{ "person": "Ana", "kind": "Expense", "concept": "Hielo", "amount": 300 }]),
    );

    let store = store(&dir);
    let spanish = store.load_week(WeekId::new(1)).await.unwrap();
    let english = store.load_week(WeekId::new(2)).await.unwrap();
    assert_eq!(spanish.loans, english.loans);
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let week_dir = dir.path().join("weeks").join("9");
    std::fs::create_dir_all(&week_dir).unwrap();
    std::fs::write(week_dir.join("products.json"), b"{not json").unwrap();

    let err = store(&dir).load_week(WeekId::new(9)).await.unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}

#[tokio::test]
async fn test_non_array_collection_is_decode_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), 4, "loans.json", &json!({ "persona": "Ana" }));

    let err = store(&dir).load_week(WeekId::new(4)).await.unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}

#[tokio::test]
async fn test_unreadable_records_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        6,
        "products.json",
        &json!([42, { "nombre": "Good", "libras": 1 }, "Bad"]),
    );

    let records = store(&dir).load_week(WeekId::new(6)).await.unwrap();
    assert_eq!(records.products.len(), 1);
    assert_eq!(records.products[0].name, "Good");
}

#[tokio::test]
async fn test_loaded_week_is_cached() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), 8, "other_expenses.json", &json!([{ "concepto": "Gas", "monto": 1 }]));

    let store = store(&dir);
    let first = store.load_week(WeekId::new(8)).await.unwrap();
    write(dir.path(), 8, "other_expenses.json", &json!([]));
    let second = store.load_week(WeekId::new(8)).await.unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(store.cached_weeks(), 1);

    store.invalidate(WeekId::new(8));
    let third = store.load_week(WeekId::new(8)).await.unwrap();
    assert!(third.other_expenses.is_empty());
}

#[tokio::test]
async fn test_list_week_ids() {
    let dir = TempDir::new().unwrap();
    for week in [12, 3, 7] {
        write(dir.path(), week, "closings.json", &json!([]));
    }
    std::fs::create_dir_all(dir.path().join("weeks").join("drafts")).unwrap();

    let ids = store(&dir).list_week_ids().await.unwrap();
    assert_eq!(ids, vec![WeekId::new(3), WeekId::new(7), WeekId::new(12)]);
}

#[tokio::test]
async fn test_list_without_weeks_folder_is_empty() {
    let dir = TempDir::new().unwrap();
    let ids = store(&dir).list_week_ids().await.unwrap();
    assert!(ids.is_empty());
}

#[test]
fn test_week_key_layout() {
    assert_eq!(
        WeekStore::week_key(WeekId::new(42), "loans.json"),
        "weeks/42/loans.json"
    );
}
