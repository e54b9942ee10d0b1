//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Offset-based pagination for `GET /api/bookmarks`.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Validates the window and fills in defaults.
    ///
    /// # Defaults
    ///
    /// - `offset`: 0
    /// - `limit`: 10
    ///
    /// # Validation
    ///
    /// - Offset must be >= 0
    /// - Limit must be between 1 and 100
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if offset < 0 {
            return Err("Offset must not be negative".to_string());
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("Limit must be between 1 and {MAX_LIMIT}"));
        }

        Ok((offset, limit))
    }
}
