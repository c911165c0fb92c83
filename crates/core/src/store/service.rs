//! Week loading through Apache OpenDAL.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use opendal::{ErrorKind, Operator, services};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tillbook_shared::config::StoreConfig;
use tillbook_shared::types::WeekId;
use tracing::{debug, info, warn};

use super::config::StoreProvider;
use super::error::StoreError;
use crate::week::{Week, WeekRecords};

/// Folder holding one sub-folder per week.
const WEEKS_DIR: &str = "weeks/";

/// Default cache capacity (weeks).
const DEFAULT_CACHE_CAPACITY: u64 = 32;

/// Default time-to-live for cached weeks (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Reads week records from an object store and keeps recent weeks in memory.
///
/// Layout under the store root:
///
/// ```text
/// weeks/{id}/week.json            week header (object)
/// weeks/{id}/closings.json        register closings (array)
/// weeks/{id}/products.json        product rows (array)
/// weeks/{id}/other_expenses.json  other expenses (array)
/// weeks/{id}/loans.json           personal loans and expenses (array)
/// ```
#[derive(Clone)]
pub struct WeekStore {
    operator: Operator,
    provider: &'static str,
    cache: Cache<WeekId, Arc<WeekRecords>>,
}

impl WeekStore {
    /// Creates a store from the `store` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let provider = StoreProvider::from_config(config)?;
        Self::with_cache(&provider, config.cache_capacity, config.cache_ttl_secs)
    }

    /// Creates a store with the default cache settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn new(provider: &StoreProvider) -> Result<Self, StoreError> {
        Self::with_cache(provider, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a store with explicit cache settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn with_cache(
        provider: &StoreProvider,
        max_capacity: u64,
        ttl_secs: u64,
    ) -> Result<Self, StoreError> {
        let operator = Self::create_operator(provider)?;
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        info!(provider = provider.name(), "Record store ready");
        Ok(Self {
            operator,
            provider: provider.name(),
            cache,
        })
    }

    fn create_operator(provider: &StoreProvider) -> Result<Operator, StoreError> {
        match provider {
            StoreProvider::S3 {
                endpoint,
                bucket,
                region,
                access_key_id,
                secret_access_key,
                root,
            } => {
                let mut builder = services::S3::default().bucket(bucket).root(root);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }
                if let Some(region) = region {
                    builder = builder.region(region);
                }
                if let Some(key) = access_key_id {
                    builder = builder.access_key_id(key);
                }
                if let Some(secret) = secret_access_key {
                    builder = builder.secret_access_key(secret);
                }

                Operator::new(builder)
                    .map_err(|e| StoreError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StoreProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StoreError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StoreError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Store key of a week file.
    #[must_use]
    pub fn week_key(week_id: WeekId, file: &str) -> String {
        format!("{WEEKS_DIR}{week_id}/{file}")
    }

    /// Loads every record of a week, from cache when possible.
    ///
    /// Missing collection files are empty collections and a missing header
    /// gives a week known only by its id. Records that cannot be read are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but is not JSON of the expected
    /// shape, or if the store cannot be reached.
    pub async fn load_week(&self, week_id: WeekId) -> Result<Arc<WeekRecords>, StoreError> {
        if let Some(cached) = self.cache.get(&week_id) {
            debug!(%week_id, "Week served from cache");
            return Ok(cached);
        }

        let (week, closings, products, other_expenses, loans) = tokio::try_join!(
            self.read_week(week_id),
            self.read_collection(week_id, "closings.json"),
            self.read_collection(week_id, "products.json"),
            self.read_collection(week_id, "other_expenses.json"),
            self.read_collection(week_id, "loans.json"),
        )?;

        let records = Arc::new(WeekRecords {
            week,
            closings,
            products,
            other_expenses,
            loans,
        });
        info!(
            %week_id,
            provider = self.provider,
            records = records.record_count(),
            "Week loaded"
        );

        self.cache.insert(week_id, Arc::clone(&records));
        Ok(records)
    }

    /// Loads several weeks, in the order given.
    ///
    /// # Errors
    ///
    /// Returns the first error met.
    pub async fn load_weeks(
        &self,
        week_ids: &[WeekId],
    ) -> Result<Vec<Arc<WeekRecords>>, StoreError> {
        let mut weeks = Vec::with_capacity(week_ids.len());
        for &week_id in week_ids {
            weeks.push(self.load_week(week_id).await?);
        }
        Ok(weeks)
    }

    /// Ids of every week folder in the store, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    pub async fn list_week_ids(&self) -> Result<Vec<WeekId>, StoreError> {
        let entries = match self.operator.list(WEEKS_DIR).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids: Vec<WeekId> = entries
            .iter()
            .filter_map(|entry| entry.name().trim_end_matches('/').parse().ok())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Drops a week from the cache so the next load reads the store again.
    pub fn invalidate(&self, week_id: WeekId) {
        self.cache.invalidate(&week_id);
    }

    /// Number of weeks currently cached.
    #[must_use]
    pub fn cached_weeks(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Reads a file, `None` when it does not exist.
    async fn read_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let buffer = match self.operator.read(key).await {
            Ok(buffer) => buffer,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "Store file missing");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&buffer.to_vec())
            .map(Some)
            .map_err(|e| StoreError::decode(key, &e))
    }

    async fn read_week(&self, week_id: WeekId) -> Result<Week, StoreError> {
        let key = Self::week_key(week_id, "week.json");
        let Some(mut value) = self.read_json(&key).await? else {
            return Ok(Week::with_id(week_id));
        };

        if let Value::Object(fields) = &mut value {
            fields
                .entry("id")
                .or_insert_with(|| Value::from(week_id.into_inner()));
        }
        serde_json::from_value(value).map_err(|e| StoreError::decode(key, &e))
    }

    async fn read_collection<T>(&self, week_id: WeekId, file: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let key = Self::week_key(week_id, file);
        let items = match self.read_json(&key).await? {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(StoreError::Decode {
                    key,
                    message: format!("expected an array, found {}", kind_of(&other)),
                });
            }
        };

        let total = items.len();
        let records: Vec<T> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(key = %key, index, error = %e, "Skipping unreadable record");
                    None
                }
            })
            .collect();

        debug!(key = %key, loaded = records.len(), total, "Collection read");
        Ok(records)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
