//! CSV export of expenses

use std::collections::HashMap;
use std::io::Write;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::services::expense::sort_newest_first;
use crate::storage::Storage;

/// Write every expense as one CSV row, newest first
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> MoneyTrackResult<()> {
    let category_names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut expenses = storage.expenses.get_all()?;
    sort_newest_first(&mut expenses);

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Description", "Category", "Amount", "Notes"])
        .map_err(export_error)?;

    for expense in &expenses {
        let category = category_names
            .get(&expense.category_id)
            .cloned()
            .unwrap_or_default();
        csv.write_record([
            expense.id.as_uuid().to_string(),
            expense.date.to_string(),
            expense.description.clone(),
            category,
            expense.amount.to_string(),
            expense.notes.clone().unwrap_or_default(),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(|e| MoneyTrackError::Export(e.to_string()))
}

fn export_error(err: csv::Error) -> MoneyTrackError {
    MoneyTrackError::Export(err.to_string())
}
