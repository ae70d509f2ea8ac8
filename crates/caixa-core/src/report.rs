//! Monthly spending report
//!
//! Recomputed from the store on every request and never persisted. Category
//! blocks follow the order of the query result, which is sorted by the stored
//! category label (plain string order, not a semantic one).

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Category, Expense};

/// Reply when the window holds no expenses
pub const NO_EXPENSES_MESSAGE: &str = "Não encontrei nenhum gasto registrado neste mês.";

pub const REPORT_TITLE: &str = "📊 *Relatório de Gastos do Mês*";

/// Glyph for categories without a mapped emoji
pub const DEFAULT_EMOJI: &str = "📝";

/// Emoji for a stored category label
pub fn emoji_for(label: &str) -> &'static str {
    Category::from_label(label)
        .map(|c| c.emoji())
        .unwrap_or(DEFAULT_EMOJI)
}

/// Format a monetary value with exactly two decimals
pub fn format_amount(amount: f64) -> String {
    format!("R$ {:.2}", amount)
}

/// Spending within one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub categories: Vec<CategoryTotal>,
    pub total: f64,
}

impl MonthlyReport {
    /// Group expenses by category, keeping first-seen order
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        let mut categories: Vec<CategoryTotal> = Vec::new();
        let mut total = 0.0;

        for expense in expenses {
            total += expense.amount;
            match categories
                .iter_mut()
                .find(|c| c.category == expense.category)
            {
                Some(group) => {
                    group.total += expense.amount;
                    group.expenses.push(expense);
                }
                None => categories.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                    expenses: vec![expense],
                }),
            }
        }

        Self { categories, total }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Render as chat text
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_EXPENSES_MESSAGE.to_string();
        }

        let mut report = format!("{}\n\n", REPORT_TITLE);

        for group in &self.categories {
            report.push_str(&format!(
                "{} *{}*: {}\n",
                emoji_for(&group.category),
                group.category,
                format_amount(group.total)
            ));
            for expense in &group.expenses {
                report.push_str(&format!(
                    "  • {}: {}\n",
                    expense.description,
                    format_amount(expense.amount)
                ));
            }
            report.push('\n');
        }

        report.push_str(&format!("\n💰 *Total Geral: {}*", format_amount(self.total)));
        report
    }
}

/// First instant of the calendar month containing `now`, in `now`'s time zone
pub fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let first_day = now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive());
    let midnight = first_day
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_local());

    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        // Midnight skipped by a DST change; fall back to reading it as UTC
        None => midnight.and_utc(),
    }
}

/// Build the report for the month containing `now`
pub fn monthly_report_at<Tz: TimeZone>(db: &Database, now: &DateTime<Tz>) -> Result<MonthlyReport> {
    let from = month_start(now);
    let to = now.with_timezone(&Utc);
    info!("Fetching expenses since {}", from.to_rfc3339());

    let expenses = db.list_expenses_between(from, to)?;
    Ok(MonthlyReport::from_expenses(expenses))
}

/// Rendered report for the current local month
pub fn generate_monthly_report(db: &Database) -> Result<String> {
    generate_monthly_report_at(db, &Local::now())
}

/// Rendered report for the month containing `now`
pub fn generate_monthly_report_at<Tz: TimeZone>(db: &Database, now: &DateTime<Tz>) -> Result<String> {
    Ok(monthly_report_at(db, now)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::{Duration, FixedOffset};

    fn stored(id: i64, description: &str, amount: f64, category: &str) -> Expense {
        Expense {
            id,
            description: description.to_string(),
            amount,
            category: category.to_string(),
            date: Utc.with_ymd_and_hms(2026, 10, 10, 12, 0, 0).unwrap(),
        }
    }

    fn fixed_dataset() -> Vec<Expense> {
        vec![
            stored(1, "Almoço", 10.00, "Alimentação"),
            stored(2, "Café", 5.50, "Alimentação"),
            stored(3, "Pão", 2.25, "Alimentação"),
            stored(4, "Uber", 20.00, "Transporte"),
        ]
    }

    #[test]
    fn test_totals_for_fixed_dataset() {
        let report = MonthlyReport::from_expenses(fixed_dataset());

        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].category, "Alimentação");
        assert!((report.categories[0].total - 17.75).abs() < 1e-9);
        assert_eq!(report.categories[0].expenses.len(), 3);
        assert_eq!(report.categories[1].category, "Transporte");
        assert!((report.categories[1].total - 20.00).abs() < 1e-9);
        assert!((report.total - 37.75).abs() < 1e-9);
    }

    #[test]
    fn test_render_fixed_dataset() {
        let text = MonthlyReport::from_expenses(fixed_dataset()).render();

        let expected = "📊 *Relatório de Gastos do Mês*\n\n\
            🍔 *Alimentação*: R$ 17.75\n\
            \x20 • Almoço: R$ 10.00\n\
            \x20 • Café: R$ 5.50\n\
            \x20 • Pão: R$ 2.25\n\
            \n\
            🚗 *Transporte*: R$ 20.00\n\
            \x20 • Uber: R$ 20.00\n\
            \n\
            \n💰 *Total Geral: R$ 37.75*";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_every_amount_has_two_decimals() {
        let text = MonthlyReport::from_expenses(vec![
            stored(1, "Chiclete", 1.0, "Outros"),
            stored(2, "Bala", 0.333, "Outros"),
        ])
        .render();

        assert!(text.contains("  • Chiclete: R$ 1.00"));
        assert!(text.contains("  • Bala: R$ 0.33"));
        assert!(text.contains("📝 *Outros*: R$ 1.33"));
        assert!(text.contains("Total Geral: R$ 1.33"));
    }

    #[test]
    fn test_unknown_category_uses_default_emoji() {
        assert_eq!(emoji_for("Pets"), DEFAULT_EMOJI);
        assert_eq!(emoji_for("Saúde"), "💊");

        let text = MonthlyReport::from_expenses(vec![stored(1, "Ração", 40.0, "Pets")]).render();
        assert!(text.contains("📝 *Pets*: R$ 40.00"));
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let report = MonthlyReport::from_expenses(vec![
            stored(1, "b", 1.0, "Transporte"),
            stored(2, "a", 1.0, "Alimentação"),
            stored(3, "c", 1.0, "Transporte"),
        ]);
        let order: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Transporte", "Alimentação"]);
        assert_eq!(report.categories[0].expenses[1].description, "c");
    }

    #[test]
    fn test_empty_report_message() {
        let report = MonthlyReport::from_expenses(vec![]);
        assert!(report.is_empty());
        assert_eq!(report.render(), NO_EXPENSES_MESSAGE);
    }

    #[test]
    fn test_month_start_uses_local_calendar() {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 19, 15, 30, 0).unwrap();
        assert_eq!(
            month_start(&now),
            Utc.with_ymd_and_hms(2026, 10, 1, 3, 0, 0).unwrap()
        );

        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(month_start(&now), now);
    }

    #[test]
    fn test_report_from_database_is_lexically_ordered() {
        let db = Database::in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let day = now - Duration::days(3);

        for (description, amount, category) in [
            ("Uber", 20.00, Category::Transport),
            ("Almoço", 10.00, Category::Food),
            ("Remédio", 8.00, Category::Health),
            ("Café", 5.50, Category::Food),
            ("Livro", 45.00, Category::Education),
        ] {
            db.insert_expense_at(
                &NewExpense {
                    description: description.to_string(),
                    amount,
                    category,
                },
                day,
            )
            .unwrap();
        }
        // Last month, outside the window
        db.insert_expense_at(
            &NewExpense {
                description: "Aluguel".to_string(),
                amount: 1500.0,
                category: Category::Housing,
            },
            Utc.with_ymd_and_hms(2026, 9, 30, 12, 0, 0).unwrap(),
        )
        .unwrap();

        let report = monthly_report_at(&db, &now).unwrap();
        let order: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Alimentação", "Educação", "Saúde", "Transporte"]);
        assert!((report.total - 88.50).abs() < 1e-9);

        let text = generate_monthly_report_at(&db, &now).unwrap();
        assert!(!text.contains("Aluguel"));
        assert!(text.ends_with("💰 *Total Geral: R$ 88.50*"));
    }

    #[test]
    fn test_report_from_empty_database() {
        let db = Database::in_memory().unwrap();
        assert_eq!(generate_monthly_report(&db).unwrap(), NO_EXPENSES_MESSAGE);
    }
}
