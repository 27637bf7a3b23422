//! Work item dates as accepted by the tracker (epoch milliseconds).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use youtrack_mcp_core::{AppError, AppResult};

/// Date of a work item, stored as UTC epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkDate(i64);

impl WorkDate {
    /// Wraps an epoch millisecond timestamp.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Parses either an integer timestamp or an ISO `YYYY-MM-DD` date.
    ///
    /// Calendar dates resolve to UTC midnight.
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Ok(Self(millis));
        }

        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|error| {
            AppError::Validation(format!(
                "date must be epoch milliseconds or YYYY-MM-DD, got '{value}': {error}"
            ))
        })?;
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            AppError::Validation(format!("date '{value}' has no valid midnight"))
        })?;

        Ok(Self(midnight.and_utc().timestamp_millis()))
    }

    /// Returns the timestamp in epoch milliseconds.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for WorkDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawWorkDate {
            Millis(i64),
            Text(String),
        }

        match RawWorkDate::deserialize(deserializer)? {
            RawWorkDate::Millis(millis) => Ok(Self(millis)),
            RawWorkDate::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}
