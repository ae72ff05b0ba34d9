//! Windowed scan over the partner's task history.
//!
//! The partner offers no "created since" filter, so recent tasks are found by
//! walking `/tasks` page by page. Pages are assumed to be ordered newest
//! first; nothing here verifies that.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::PartnerError;
use super::models::task_created_after;

pub const DAY_IN_MS: i64 = 1000 * 60 * 60 * 24;

/// `now_ms` shifted back by whole days. Plain arithmetic, no calendar rules.
pub fn minus_days(now_ms: i64, days: u32) -> i64 {
    now_ms - i64::from(days) * DAY_IN_MS
}

/// Source of 1-based task pages. Tasks are the partner's raw JSON objects.
#[async_trait]
pub trait TaskPages: Send + Sync {
    async fn tasks_page(&self, page: u32) -> Result<Vec<Value>, PartnerError>;
}

/// When the scan stops fetching pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRule {
    /// Stop at the first page with no tasks at all.
    #[default]
    EmptyPage,
    /// Stop at the first page with no task newer than the cutoff.
    NoRecentTasks,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub stop_rule: StopRule,
    /// Upper bound on pages fetched. `None` scans until the stop rule fires.
    pub max_pages: Option<u32>,
}

/// Collect tasks created strictly after `cutoff_ms` that satisfy
/// `predicate`, in page order then in-page order.
///
/// Pages are fetched one at a time. Duplicates across pages are kept. A
/// later page is never consulted once the stop rule fires, even if it would
/// hold matches.
pub async fn tasks_since<S, P>(
    source: &S,
    cutoff_ms: i64,
    predicate: P,
    options: ScanOptions,
) -> Result<Vec<Value>, PartnerError>
where
    S: TaskPages + ?Sized,
    P: Fn(&Value) -> bool + Send,
{
    let mut matched = Vec::new();
    let mut page: u32 = 1;

    loop {
        if let Some(max_pages) = options.max_pages
            && page > max_pages
        {
            warn!(max_pages, "Task history scan hit page limit");
            return Err(PartnerError::PageLimitExceeded(max_pages));
        }

        let tasks = source.tasks_page(page).await?;
        let fetched = tasks.len();
        let recent: Vec<Value> = tasks
            .into_iter()
            .filter(|task| task_created_after(task, cutoff_ms))
            .collect();
        let recent_count = recent.len();
        matched.extend(recent.into_iter().filter(|task| predicate(task)));

        debug!(page, fetched, recent = recent_count, matched = matched.len(), "Scanned task page");

        let done = match options.stop_rule {
            StopRule::EmptyPage => fetched == 0,
            StopRule::NoRecentTasks => recent_count == 0,
        };
        if done {
            break;
        }
        page += 1;
    }

    Ok(matched)
}
