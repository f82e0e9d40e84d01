//! Action log and analytics index
//!
//! Every enforcement action is appended to the durable store and mirrored
//! into in-memory indices (full list, by actor, by target, by type). The
//! store is the record of truth; `hydrate` rebuilds the indices from it at
//! startup. Reads never touch the store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{error, instrument};

use warden_core::{Action, ActionRepository, ActionType, Snowflake};

use super::error::ServiceResult;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Query dimension for action reads
#[derive(Debug, Clone, Copy)]
pub enum QueryDimension {
    All,
    ByActor(Snowflake),
    ByTarget(Snowflake),
    ByType(ActionType),
}

/// Append-only enforcement record with multi-index reads
pub struct ActionLog {
    store: Arc<dyn ActionRepository>,
    all: RwLock<Vec<Action>>,
    by_actor: DashMap<Snowflake, Vec<Action>>,
    by_target: DashMap<Snowflake, Vec<Action>>,
    by_type: DashMap<ActionType, Vec<Action>>,
}

impl ActionLog {
    /// Create an empty log over the store
    pub fn new(store: Arc<dyn ActionRepository>) -> Self {
        Self {
            store,
            all: RwLock::new(Vec::new()),
            by_actor: DashMap::new(),
            by_target: DashMap::new(),
            by_type: DashMap::new(),
        }
    }

    /// Load every persisted action into the indices. Run once at startup,
    /// before any recording.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) -> ServiceResult<usize> {
        let actions = self.store.all().await?;
        let count = actions.len();
        for action in actions {
            self.index(action);
        }
        Ok(count)
    }

    /// Record one action: append to the store, then mirror into the
    /// indices.
    ///
    /// The index update happens even when the store append fails, so the
    /// running process keeps an accurate picture; the error is still
    /// surfaced for the caller to report. Enforcement callers treat it as
    /// non-fatal.
    #[instrument(skip(self, action), fields(action_type = %action.action_type))]
    pub async fn record(&self, action: Action) -> ServiceResult<()> {
        let stored = self.store.append(&action).await;
        self.index(action);

        if let Err(e) = &stored {
            error!(error = %e, "action append failed; index updated, store record lost");
        }
        stored.map_err(Into::into)
    }

    fn index(&self, action: Action) {
        self.by_actor
            .entry(action.actor_id)
            .or_default()
            .push(action.clone());
        if let Some(target) = action.target {
            self.by_target.entry(target).or_default().push(action.clone());
        }
        self.by_type
            .entry(action.action_type)
            .or_default()
            .push(action.clone());
        self.all.write().push(action);
    }

    /// Actions in one dimension, insertion order, filtered to the trailing
    /// window. `window_days <= 0` means all time.
    pub fn query(&self, dimension: QueryDimension, window_days: i64) -> Vec<Action> {
        let cutoff = cutoff_millis(window_days);

        match dimension {
            QueryDimension::All => filter_window(&self.all.read(), cutoff),
            QueryDimension::ByActor(id) => self
                .by_actor
                .get(&id)
                .map_or_else(Vec::new, |v| filter_window(&v, cutoff)),
            QueryDimension::ByTarget(id) => self
                .by_target
                .get(&id)
                .map_or_else(Vec::new, |v| filter_window(&v, cutoff)),
            QueryDimension::ByType(t) => self
                .by_type
                .get(&t)
                .map_or_else(Vec::new, |v| filter_window(&v, cutoff)),
        }
    }

    /// Per-moderator action counts over the window, highest first. Ties
    /// keep first-seen order; truncated to `limit`.
    pub fn top_moderators(&self, window_days: i64, limit: usize) -> Vec<(String, usize)> {
        self.top_by(window_days, limit, |action| {
            Some(action.actor_name.clone())
        })
    }

    /// Per-target action counts over the window, highest first. Actions
    /// without a target are excluded.
    pub fn top_moderated_users(&self, window_days: i64, limit: usize) -> Vec<(String, usize)> {
        self.top_by(window_days, limit, |action| {
            action.target.map(|_| action.target_name.clone())
        })
    }

    fn top_by(
        &self,
        window_days: i64,
        limit: usize,
        key: impl Fn(&Action) -> Option<String>,
    ) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for action in self.query(QueryDimension::All, window_days) {
            let Some(name) = key(&action) else { continue };
            if !counts.contains_key(&name) {
                first_seen.push(name.clone());
            }
            *counts.entry(name).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = first_seen
            .into_iter()
            .map(|name| {
                let count = counts[&name];
                (name, count)
            })
            .collect();
        // Stable sort keeps first-seen order among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Action counts per type over the window
    pub fn counts_by_type(&self, window_days: i64) -> HashMap<ActionType, usize> {
        let mut counts = HashMap::new();
        for action in self.query(QueryDimension::All, window_days) {
            *counts.entry(action.action_type).or_insert(0) += 1;
        }
        counts
    }

    /// Action counts per calendar day over the window, ascending by date
    pub fn counts_by_day(&self, window_days: i64) -> BTreeMap<NaiveDate, usize> {
        let mut counts = BTreeMap::new();
        for action in self.query(QueryDimension::All, window_days) {
            *counts.entry(action.date()).or_insert(0) += 1;
        }
        counts
    }
}

fn filter_window(actions: &[Action], cutoff: Option<i64>) -> Vec<Action> {
    actions
        .iter()
        .filter(|a| cutoff.is_none_or(|c| a.occurred_at >= c))
        .cloned()
        .collect()
}

fn cutoff_millis(window_days: i64) -> Option<i64> {
    if window_days <= 0 {
        None
    } else {
        Some(Utc::now().timestamp_millis() - window_days * MILLIS_PER_DAY)
    }
}
