//! FILENAME: report/src/page.rs
//! Page assembly: every table on a page is fetched and pivoted in parallel.
//!
//! One worker thread runs per data source. Workers share nothing except the
//! results map, which each writes exactly once. `build_page` returns after
//! every worker has finished; a failed or panicking source is recorded as a
//! failed entry and does not stop the others.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::thread;

use pivot_engine::PivotTable;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::response::{unparseable_cells, ApiResponse};
use crate::{log_debug, log_enter_info, log_exit_info, log_warn};

/// Somewhere an API response for one table comes from.
pub trait DataSource: Send + Sync {
    /// Name of the table on the page.
    fn name(&self) -> &str;

    /// Name of the preset used to turn the response into a table.
    fn preset(&self) -> &str;

    fn fetch(&self) -> Result<ApiResponse>;
}

/// Outcome for one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageEntry {
    Ready {
        table: PivotTable,
        /// Body keys in display order.
        order: Vec<String>,
    },
    Failed {
        error: String,
    },
}

impl PageEntry {
    fn ready(table: PivotTable) -> Self {
        let order = table
            .sorted_rows()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect();
        PageEntry::Ready { table, order }
    }

    pub fn table(&self) -> Option<&PivotTable> {
        match self {
            PageEntry::Ready { table, .. } => Some(table),
            PageEntry::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageEntry::Ready { .. } => None,
            PageEntry::Failed { error } => Some(error),
        }
    }
}

/// Every table on a page, by source name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageTables {
    entries: BTreeMap<String, PageEntry>,
}

impl PageTables {
    pub fn get(&self, name: &str) -> Option<&PageEntry> {
        self.entries.get(name)
    }

    pub fn table(&self, name: &str) -> Option<&PivotTable> {
        self.get(name).and_then(PageEntry::table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Sources that failed, with their error text.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|(name, entry)| entry.error().map(|error| (name, error)))
    }

    /// Whether every source produced a table.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Fetches one source and pivots its response with the source's preset.
pub fn build_table(source: &dyn DataSource, config: &ReportConfig) -> Result<PivotTable> {
    let preset = config.preset(source.preset())?;
    let response = source.fetch()?;
    let table = response.to_table(preset)?;

    let unparseable = unparseable_cells(&table, &preset.empty_cell);
    if unparseable > 0 {
        log_warn!(
            "PAGE",
            "{}: {} unparseable value(s) counted as zero",
            source.name(),
            unparseable
        );
    }
    Ok(table)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Builds every table concurrently and waits for all of them.
/// Sources sharing a name overwrite each other's entry.
pub fn build_page(sources: &[Box<dyn DataSource>], config: &ReportConfig) -> PageTables {
    log_enter_info!("PAGE", "build_page", "sources={}", sources.len());

    let results: Mutex<BTreeMap<String, PageEntry>> = Mutex::new(BTreeMap::new());

    let shared = &results;

    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let handle = scope.spawn(move || {
                    let name = source.name();
                    let entry = match build_table(&**source, config) {
                        Ok(table) => {
                            log_debug!("PAGE", "{} ready rows={}", name, table.row_count());
                            PageEntry::ready(table)
                        }
                        Err(e) => {
                            log_warn!("PAGE", "{} failed: {}", name, e);
                            PageEntry::Failed {
                                error: e.to_string(),
                            }
                        }
                    };

                    shared
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .insert(name.to_string(), entry);
                });
                (source.name(), handle)
            })
            .collect();

        // Joined here so a panicking worker never unwinds out of the scope.
        for (name, handle) in handles {
            if let Err(payload) = handle.join() {
                let error = format!("source panicked: {}", panic_message(payload.as_ref()));
                log_warn!("PAGE", "{} failed: {}", name, error);
                shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(name.to_string(), PageEntry::Failed { error });
            }
        }
    });

    let page = PageTables {
        entries: results.into_inner().unwrap_or_else(PoisonError::into_inner),
    };

    log_exit_info!(
        "PAGE",
        "build_page",
        "tables={} failed={}",
        page.len(),
        page.failures().count()
    );
    page
}
