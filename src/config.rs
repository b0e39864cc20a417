//! Settings for building reports, loaded from a JSON file.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{CategoryKey, CategoryLimit, Currency, Error};

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// Report settings. Every field is optional in the JSON form.
///
/// ```json
/// {
///     "currency": "EUR",
///     "categoryKey": "label",
///     "timezone": "Pacific/Auckland",
///     "limits": [{ "category": "🛒 Groceries", "amount": 400 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// The currency amounts are displayed in.
    pub currency: Currency,
    /// Whether reports group by full label or by emoji-stripped name.
    pub category_key: CategoryKey,
    /// The canonical timezone name used to decide what "this month" is.
    pub timezone: String,
    /// Monthly spending limits, in display order.
    pub limits: Vec<CategoryLimit>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            category_key: CategoryKey::default(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
            limits: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Load and validate a config from the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Io] if the file cannot be opened, [Error::Json] if it
    /// is not valid config JSON and [Error::InvalidConfig] if a value is out
    /// of range.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {} with {} limits",
            path.as_ref().display(),
            config.limits.len()
        );

        Ok(config)
    }

    /// Parse and validate a config from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [Error::Json] if `text` is not valid config JSON and
    /// [Error::InvalidConfig] if a value is out of range.
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Check that limits are non-negative and name a category.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidConfig] describing the first bad value.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timezone.trim().is_empty() {
            return Err(Error::InvalidConfig("timezone must not be empty".to_owned()));
        }

        for limit in &self.limits {
            if limit.category.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "limit category must not be empty".to_owned(),
                ));
            }

            if !limit.amount.is_finite() || limit.amount < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "limit for {} must be a non-negative number, got {}",
                    limit.category, limit.amount
                )));
            }
        }

        Ok(())
    }
}
