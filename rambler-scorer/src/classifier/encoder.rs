//! Categorical label encoding.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Maps category strings to dense indices in sorted order.
///
/// Values never seen during fitting encode to index `0`, which stands in for
/// an unknown category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the distinct values of a column.
    #[must_use]
    pub fn fit<'v>(values: impl IntoIterator<Item = &'v str>) -> Self {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        Self {
            classes: distinct.into_iter().map(str::to_owned).collect(),
        }
    }

    /// Index of `value`, or `0` when it was not seen during fitting.
    #[must_use]
    pub fn encode(&self, value: &str) -> usize {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .unwrap_or(0)
    }

    /// Value stored at `index`.
    #[must_use]
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// Known values in index order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of known values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Report whether nothing was fitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
