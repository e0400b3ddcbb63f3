//! GP practice models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::directory::normalize_code;

/// Smallest list size accepted for a manually entered practice.
pub const MIN_MANUAL_LIST_SIZE: u32 = 100;

/// Largest list size accepted for a manually entered practice.
pub const MAX_MANUAL_LIST_SIZE: u32 = 100_000;

/// Longest practice name accepted for manual entry, in characters.
pub const MAX_PRACTICE_NAME_LEN: usize = 100;

/// A single GP practice in the reference directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PracticeRecord {
    /// ODS code - unique, uppercase alphanumeric
    pub code: String,
    /// Practice display name
    pub name: String,
    /// Registered patients
    pub list_size: u32,
    /// Locality (e.g., "London")
    pub address: Option<String>,
}

impl PracticeRecord {
    /// Create a new practice record. The code is trimmed and uppercased.
    pub fn new(code: &str, name: impl Into<String>, list_size: u32) -> Self {
        Self {
            code: normalize_code(code),
            name: name.into(),
            list_size,
            address: None,
        }
    }

    /// Attach a locality.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Case-insensitive substring match against code or name.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.code.to_lowercase().contains(query_lower)
            || self.name.to_lowercase().contains(query_lower)
    }
}

/// Manual entry validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Practice name is required")]
    EmptyName,

    #[error("Practice name must be at most {max} characters (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("List size must be between {min} and {max} (got {value})")]
    ListSizeOutOfRange { value: i64, min: u32, max: u32 },
}

/// Practice details entered by hand when no ODS code is available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualPractice {
    pub name: String,
    pub list_size: i64,
}

impl ManualPractice {
    pub fn new(name: impl Into<String>, list_size: i64) -> Self {
        Self {
            name: name.into(),
            list_size,
        }
    }

    /// Check the entry against the manual-entry rules.
    ///
    /// Returns the trimmed name and list size ready for the ROI engine.
    pub fn validate(&self) -> Result<(String, u32), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_PRACTICE_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                len,
                max: MAX_PRACTICE_NAME_LEN,
            });
        }

        let in_range = self.list_size >= i64::from(MIN_MANUAL_LIST_SIZE)
            && self.list_size <= i64::from(MAX_MANUAL_LIST_SIZE);
        if !in_range {
            return Err(ValidationError::ListSizeOutOfRange {
                value: self.list_size,
                min: MIN_MANUAL_LIST_SIZE,
                max: MAX_MANUAL_LIST_SIZE,
            });
        }

        Ok((name.to_string(), self.list_size as u32))
    }
}
