//! Database tests

use chrono::{Duration, TimeZone, Utc};
use rusqlite::params;

use super::*;
use crate::models::{Category, NewExpense};

fn expense(description: &str, amount: f64, category: Category) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount,
        category,
    }
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_expenses_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('expenses') WHERE name IN ('id', 'description', 'amount', 'category', 'date')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 5, "expenses table should have 5 expected columns");
}

#[test]
fn test_insert_assigns_timestamp() {
    let db = Database::in_memory().unwrap();
    let before = Utc::now() - Duration::seconds(1);

    let stored = db
        .insert_expense(&expense("Farmácia", 50.0, Category::Health))
        .unwrap();

    assert!(stored.id > 0);
    assert_eq!(stored.category, "Saúde");
    assert!(stored.date >= before);
    assert!(stored.date <= Utc::now());
    assert_eq!(db.count_expenses().unwrap(), 1);
}

#[test]
fn test_identical_inserts_are_not_deduplicated() {
    let db = Database::in_memory().unwrap();
    let e = expense("Uber", 12.5, Category::Transport);

    let first = db.insert_expense(&e).unwrap();
    let second = db.insert_expense(&e).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(db.count_expenses().unwrap(), 2);
}

#[test]
fn test_non_positive_amount_rejected_by_schema() {
    let db = Database::in_memory().unwrap();
    let result = db.insert_expense(&expense("Nada", 0.0, Category::Other));
    assert!(result.is_err());
    assert!(result.unwrap_err().is_storage());
}

#[test]
fn test_list_expenses_between_filters_window() {
    let db = Database::in_memory().unwrap();
    let start = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    db.insert_expense_at(&expense("Setembro", 10.0, Category::Food), start - Duration::milliseconds(1))
        .unwrap();
    db.insert_expense_at(&expense("Primeiro dia", 20.0, Category::Food), start)
        .unwrap();
    db.insert_expense_at(&expense("Agora", 30.0, Category::Food), end)
        .unwrap();
    db.insert_expense_at(&expense("Futuro", 40.0, Category::Food), end + Duration::milliseconds(1))
        .unwrap();

    let found = db.list_expenses_between(start, end).unwrap();
    let descriptions: Vec<&str> = found.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Primeiro dia", "Agora"]);
}

#[test]
fn test_list_expenses_ordered_by_category_then_insertion() {
    let db = Database::in_memory().unwrap();
    let day = Utc.with_ymd_and_hms(2026, 10, 5, 12, 0, 0).unwrap();

    db.insert_expense_at(&expense("Ônibus", 5.0, Category::Transport), day).unwrap();
    db.insert_expense_at(&expense("Cinema", 30.0, Category::Leisure), day).unwrap();
    db.insert_expense_at(&expense("Almoço", 25.0, Category::Food), day).unwrap();
    db.insert_expense_at(&expense("Uber", 18.0, Category::Transport), day).unwrap();
    db.insert_expense_at(&expense("Curso", 99.0, Category::Education), day).unwrap();

    let found = db
        .list_expenses_between(day - Duration::days(1), day + Duration::days(1))
        .unwrap();
    let rows: Vec<(&str, &str)> = found
        .iter()
        .map(|e| (e.category.as_str(), e.description.as_str()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Alimentação", "Almoço"),
            ("Educação", "Curso"),
            ("Lazer", "Cinema"),
            ("Transporte", "Ônibus"),
            ("Transporte", "Uber"),
        ]
    );
}

#[test]
fn test_stored_date_is_iso_8601() {
    let db = Database::in_memory().unwrap();
    let day = Utc.with_ymd_and_hms(2026, 10, 5, 8, 30, 0).unwrap();
    db.insert_expense_at(&expense("Pão", 7.5, Category::Food), day).unwrap();

    let conn = db.conn().unwrap();
    let raw: String = conn
        .query_row("SELECT date FROM expenses", [], |row| row.get(0))
        .unwrap();
    assert_eq!(raw, "2026-10-05T08:30:00.000Z");

    let found = db
        .list_expenses_between(day, day + Duration::seconds(1))
        .unwrap();
    assert_eq!(found[0].date, day);
}

#[test]
fn test_legacy_category_labels_are_read_back_verbatim() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();
    conn.execute(
        "INSERT INTO expenses (description, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
        params!["Ração", 40.0, "Pets", "2026-10-02T10:00:00.000Z"],
    )
    .unwrap();

    let found = db
        .list_expenses_between(
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category, "Pets");
}

#[test]
fn test_encrypted_database_reopens_with_same_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enc.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_with_key(path, Some("senha secreta")).unwrap();
        db.insert_expense(&expense("Padaria", 8.5, Category::Food))
            .unwrap();
    }

    let db = Database::new_with_key(path, Some("senha secreta")).unwrap();
    assert_eq!(db.count_expenses().unwrap(), 1);
    assert_eq!(db.path(), path);
}

#[test]
fn test_encrypted_database_rejects_wrong_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enc.db");
    let path = path.to_str().unwrap();

    Database::new_with_key(path, Some("certa"))
        .unwrap()
        .insert_expense(&expense("Padaria", 8.5, Category::Food))
        .unwrap();

    assert!(Database::new_with_key(path, Some("errada")).is_err());
    assert!(Database::new_unencrypted(path).is_err());
}

#[test]
fn test_derive_key_is_deterministic() {
    let a = derive_key("passphrase").unwrap();
    let b = derive_key("passphrase").unwrap();
    let c = derive_key("other").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn test_unreadable_stored_date_is_skipped() {
    let db = Database::in_memory().unwrap();
    db.insert_expense_at(
        &expense("Farmácia", 50.0, Category::Health),
        Utc.with_ymd_and_hms(2026, 10, 3, 12, 0, 0).unwrap(),
    )
    .unwrap();
    db.conn()
        .unwrap()
        .execute(
            "INSERT INTO expenses (description, amount, category, date) VALUES ('x', 1.0, 'Outros', '2026-10-02 garbage')",
            [],
        )
        .unwrap();

    let expenses = db
        .list_expenses_between(
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();

    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "Farmácia");
    assert_eq!(db.count_expenses().unwrap(), 2);
}

#[test]
fn test_in_memory_files_removed_on_drop() {
    let db = Database::in_memory().unwrap();
    db.insert_expense(&expense("Cinema", 30.0, Category::Leisure))
        .unwrap();

    let path = std::path::PathBuf::from(db.path());
    let dir = path.parent().unwrap().to_path_buf();
    assert!(path.exists());

    let clone = db.clone();
    drop(db);
    assert!(path.exists());

    drop(clone);
    assert!(!dir.exists());
}
