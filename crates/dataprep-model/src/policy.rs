//! Missing-value policy selection.
//!
//! Two near-duplicate variants of the recruitment transform exist in the
//! wild: one preserves missing values as nulls, the other fills them with
//! sentinel strings. The two are not interchangeable (a rating of 0 is a
//! valid value, distinct from "unrated"), so the choice is an explicit
//! parameter rather than a silent merge.

use serde::{Deserialize, Serialize};

/// Strategy for values that remain missing after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingValuePolicy {
    /// Keep missing values as nulls (policy A).
    #[default]
    Preserve,
    /// Fill missing values with sentinels: "Not Specified" for derived
    /// text fields, "-" for categorical fields, 0 for numerics (policy B).
    Sentinel,
}

impl MissingValuePolicy {
    /// Sentinel used for derived free-text fields (skills, benefits, ...).
    pub fn text_sentinel(self) -> Option<&'static str> {
        match self {
            Self::Preserve => None,
            Self::Sentinel => Some("Not Specified"),
        }
    }

    /// Sentinel used for categorical company fields.
    pub fn category_sentinel(self) -> Option<&'static str> {
        match self {
            Self::Preserve => None,
            Self::Sentinel => Some("-"),
        }
    }

    /// Whether missing numerics should be forced to zero.
    pub fn zero_fills_numeric(self) -> bool {
        matches!(self, Self::Sentinel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserve_has_no_sentinels() {
        let policy = MissingValuePolicy::Preserve;
        assert_eq!(policy.text_sentinel(), None);
        assert_eq!(policy.category_sentinel(), None);
        assert!(!policy.zero_fills_numeric());
    }

    #[test]
    fn sentinel_fills_everything() {
        let policy = MissingValuePolicy::Sentinel;
        assert_eq!(policy.text_sentinel(), Some("Not Specified"));
        assert_eq!(policy.category_sentinel(), Some("-"));
        assert!(policy.zero_fills_numeric());
    }
}
