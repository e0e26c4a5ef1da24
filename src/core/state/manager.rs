//! Remembered export options
//!
//! The options of the last export are stored under fixed keys so the next
//! run can start from them (`texport export --reuse-last`).

use super::store::MetadataStore;
use crate::core::builder::ExportOptions;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub const CHANNEL_RANGES_KEY: &str = "channel_ranges";
pub const FORCE_EIGHT_BIT_KEY: &str = "force_eight_bit";
pub const CONVERT_AFTER_KEY: &str = "convert_after";
pub const COLOR_CORRECT_KEY: &str = "color_correct";
pub const COMBINED_MESHMAP_KEY: &str = "combined_meshmap";
pub const UPDATED_AT_KEY: &str = "updated_at";

/// Options of the last export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RememberedOptions {
    pub channel_ranges: String,
    pub force_eight_bit: bool,
    pub convert_after: bool,
    pub color_correct: bool,
    pub combined_meshmap: bool,

    /// When the options were last saved; `None` if never
    pub updated_at: Option<DateTime<Utc>>,
}

impl RememberedOptions {
    /// Export options equivalent to these remembered options
    pub fn to_export_options(&self) -> ExportOptions {
        ExportOptions {
            force_eight_bit: self.force_eight_bit,
            convert_after: self.convert_after,
            color_correct: self.color_correct,
            scope_expression: Some(self.channel_ranges.clone())
                .filter(|ranges| !ranges.trim().is_empty()),
        }
    }

    /// Remembered form of export options
    pub fn from_export_options(options: &ExportOptions, combined_meshmap: bool) -> Self {
        Self {
            channel_ranges: options.scope_expression.clone().unwrap_or_default(),
            force_eight_bit: options.force_eight_bit,
            convert_after: options.convert_after,
            color_correct: options.color_correct,
            combined_meshmap,
            updated_at: None,
        }
    }
}

/// Loads and saves [`RememberedOptions`] through a [`MetadataStore`]
pub struct StateManager {
    store: Arc<dyn MetadataStore>,
}

impl StateManager {
    pub fn new_with_store(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// Loads the remembered options
    ///
    /// Missing keys take their default. Values of the wrong type are
    /// reported and also defaulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub async fn load_options(&self) -> Result<RememberedOptions> {
        Ok(RememberedOptions {
            channel_ranges: self.load_key(CHANNEL_RANGES_KEY).await?,
            force_eight_bit: self.load_key(FORCE_EIGHT_BIT_KEY).await?,
            convert_after: self.load_key(CONVERT_AFTER_KEY).await?,
            color_correct: self.load_key(COLOR_CORRECT_KEY).await?,
            combined_meshmap: self.load_key(COMBINED_MESHMAP_KEY).await?,
            updated_at: self.load_key(UPDATED_AT_KEY).await?,
        })
    }

    /// Saves options and stamps them with the current time
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written
    pub async fn save_options(&self, options: &RememberedOptions) -> Result<RememberedOptions> {
        let updated_at = Utc::now();

        self.store
            .set(CHANNEL_RANGES_KEY, Value::from(options.channel_ranges.clone()))
            .await?;
        self.store
            .set(FORCE_EIGHT_BIT_KEY, Value::from(options.force_eight_bit))
            .await?;
        self.store
            .set(CONVERT_AFTER_KEY, Value::from(options.convert_after))
            .await?;
        self.store
            .set(COLOR_CORRECT_KEY, Value::from(options.color_correct))
            .await?;
        self.store
            .set(COMBINED_MESHMAP_KEY, Value::from(options.combined_meshmap))
            .await?;
        self.store
            .set(UPDATED_AT_KEY, Value::from(updated_at.to_rfc3339()))
            .await?;

        tracing::debug!(updated_at = %updated_at, "Remembered options saved");

        Ok(RememberedOptions {
            updated_at: Some(updated_at),
            ..options.clone()
        })
    }

    async fn load_key<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_value(value) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Ignoring unreadable remembered option");
                Ok(T::default())
            }
        }
    }
}
