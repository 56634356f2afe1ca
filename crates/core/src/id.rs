//! Normalized article identifiers.
//!
//! Catalog spreadsheets store GTINs inconsistently: as text, as integers, or as
//! floating point numbers that later come back with a `.0` suffix. Everything
//! that compares identifiers goes through [`normalize`] first.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::DomainError;

/// Identifier of an article (normalized GTIN or article number).
///
/// Ordering is plain lexicographic string ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Normalize a raw cell into an [`ArticleId`].
///
/// Returns `None` when the cell carries no identifier (empty, blank, non-finite
/// number); such rows are dropped by the caller. The function is idempotent:
/// feeding the text of a returned id back in yields the same id.
pub fn normalize(raw: &CellValue) -> Option<ArticleId> {
    let text = match raw {
        CellValue::Empty => return None,
        CellValue::Float(f) if !f.is_finite() => return None,
        CellValue::Text(s) => return canonical_text(s).map(ArticleId),
        other => other.to_plain_string(),
    };
    canonical_text(&text).map(ArticleId)
}

fn canonical_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(strip_float_artifact(trimmed).to_string())
}

// "4006381333931.0" -> "4006381333931"; only when everything before the dot is
// digits, so stripping never applies twice.
fn strip_float_artifact(s: &str) -> &str {
    match s.split_once('.') {
        Some((int, frac))
            if !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b == b'0') =>
        {
            int
        }
        _ => s,
    }
}

impl core::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ArticleId> for String {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl FromStr for ArticleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canonical_text(s)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_id(format!("ArticleId: empty input {s:?}")))
    }
}
