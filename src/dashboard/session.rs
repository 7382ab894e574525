//! The records the dashboard last loaded, and the operations that replace them.

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use time::Date;

use crate::{
    Error,
    dashboard::aggregation::{ChartWindow, DashboardSummary, aggregate},
    records::{CATEGORIES_KEY, Category, DEPOSITS_KEY, Deposit, EXPENSES_KEY, Expense, RECORD_KEYS},
    store::{get_records, remove_values},
};

/// The most recently loaded copy of each record collection.
///
/// A collection only changes when a load finds a value for its key, so a
/// missing or unreadable key leaves whatever was loaded before in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSnapshot {
    /// The records stored under [CATEGORIES_KEY].
    pub categories: Vec<Category>,
    /// The records stored under [EXPENSES_KEY].
    pub expenses: Vec<Expense>,
    /// The records stored under [DEPOSITS_KEY].
    pub deposits: Vec<Deposit>,
}

/// The outcome of [RecordSnapshot::load].
#[derive(Debug, Default, PartialEq)]
pub struct LoadReport {
    /// The keys whose values were found and replaced the previous records.
    pub loaded_keys: Vec<&'static str>,
    /// The keys that could not be read or decoded.
    pub failed_keys: Vec<&'static str>,
}

impl LoadReport {
    /// Whether every key was read without error.
    pub fn is_clean(&self) -> bool {
        self.failed_keys.is_empty()
    }
}

impl RecordSnapshot {
    /// Refresh the snapshot from the store.
    ///
    /// All three keys are read inside one read transaction so they come from
    /// the same version of the database. Each key is handled on its own: an
    /// absent key keeps the previous records, and a failed read is logged and
    /// also keeps the previous records.
    pub fn load(&mut self, connection: &Connection) -> LoadReport {
        let transaction = connection
            .unchecked_transaction()
            .inspect_err(|error| {
                tracing::warn!("could not start read transaction, loading without one: {error}")
            })
            .ok();

        let mut report = LoadReport::default();
        load_into(CATEGORIES_KEY, &mut self.categories, connection, &mut report);
        load_into(EXPENSES_KEY, &mut self.expenses, connection, &mut report);
        load_into(DEPOSITS_KEY, &mut self.deposits, connection, &mut report);

        if let Some(Err(error)) = transaction.map(|transaction| transaction.commit()) {
            tracing::warn!("could not end read transaction: {error}");
        }

        if !report.is_clean() {
            tracing::warn!(
                "dashboard loaded with stale records for {:?}",
                report.failed_keys
            );
        }

        report
    }

    /// Delete every stored record and empty the snapshot.
    ///
    /// # Errors
    /// Returns [Error::ResetFailed] if the records could not be deleted, in
    /// which case neither the store nor the snapshot has changed.
    pub fn reset(&mut self, connection: &Connection) -> Result<(), Error> {
        remove_values(&RECORD_KEYS, connection).map_err(|error| {
            tracing::error!("could not clear stored records: {error}");
            Error::ResetFailed
        })?;

        *self = Self::default();
        tracing::info!("cleared all dashboard records");

        Ok(())
    }

    /// Whether the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.expenses.is_empty() && self.deposits.is_empty()
    }

    /// Aggregate the snapshot for display.
    pub fn summarize(&self, window: ChartWindow, today: Date) -> DashboardSummary {
        aggregate(
            &self.categories,
            &self.expenses,
            &self.deposits,
            window,
            today,
        )
    }
}

fn load_into<T: DeserializeOwned>(
    key: &'static str,
    records: &mut Vec<T>,
    connection: &Connection,
    report: &mut LoadReport,
) {
    match get_records(key, connection) {
        Ok(Some(loaded)) => {
            *records = loaded;
            report.loaded_keys.push(key);
        }
        Ok(None) => {
            tracing::debug!(
                "nothing stored under \"{key}\", keeping {} previous records",
                records.len()
            );
        }
        Err(error) => {
            tracing::warn!("could not load \"{key}\": {error}");
            report.failed_keys.push(key);
        }
    }
}
