//! Expense persistence

use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::warn;

use super::{format_timestamp, parse_timestamp, Database};
use crate::error::Result;
use crate::models::{Expense, NewExpense};

impl Database {
    /// Append an expense, stamping it with the current time
    ///
    /// No deduplication: sending the same text twice stores two records.
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<Expense> {
        self.insert_expense_at(expense, Utc::now())
    }

    pub(crate) fn insert_expense_at(
        &self,
        expense: &NewExpense,
        date: DateTime<Utc>,
    ) -> Result<Expense> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (description, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
            params![
                expense.description,
                expense.amount,
                expense.category.as_str(),
                format_timestamp(date),
            ],
        )?;

        Ok(Expense {
            id: conn.last_insert_rowid(),
            description: expense.description.clone(),
            amount: expense.amount,
            category: expense.category.as_str().to_string(),
            date,
        })
    }

    /// Expenses with `from <= date <= to`, ordered by category label
    ///
    /// Rows whose stored date cannot be parsed are logged and skipped.
    ///
    /// Within a category, records keep insertion order. The upper bound is
    /// inclusive because stored timestamps are truncated to milliseconds: a
    /// record written in the same millisecond as the query still counts.
    pub fn list_expenses_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, description, amount, category, date
            FROM expenses
            WHERE date >= ?1 AND date <= ?2
            ORDER BY category ASC, id ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![format_timestamp(from), format_timestamp(to)], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let expenses = rows
            .into_iter()
            .filter_map(|(id, description, amount, category, date)| {
                match parse_timestamp(&date) {
                    Ok(date) => Some(Expense {
                        id,
                        description,
                        amount,
                        category,
                        date,
                    }),
                    Err(e) => {
                        warn!(id, date = %date, error = %e, "Skipping expense with unreadable date");
                        None
                    }
                }
            })
            .collect();

        Ok(expenses)
    }

    /// Total number of stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}
