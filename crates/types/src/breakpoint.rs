//! Threshold-to-label tables used for icon selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`BreakpointTable`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreakpointError {
    #[error("band {index} bound {bound} is not above the previous bound {previous}")]
    Unsorted { index: usize, bound: f64, previous: f64 },
    #[error("band {index} has a non-finite bound")]
    NotFinite { index: usize },
}

/// One band: values strictly below `below` select `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub below: f64,
    pub label: String,
}

impl Band {
    pub fn new(below: f64, label: impl Into<String>) -> Self {
        Self {
            below,
            label: label.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    bands: Vec<Band>,
    fallback: String,
}

/// Ordered value-range to label mapping.
///
/// The first band whose bound is strictly greater than the value wins;
/// values at or above the last bound get the fallback label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct BreakpointTable {
    bands: Vec<Band>,
    fallback: String,
}

impl TryFrom<RawTable> for BreakpointTable {
    type Error = BreakpointError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::new(raw.bands, raw.fallback)
    }
}

impl BreakpointTable {
    /// Build a table, rejecting bounds that are not strictly ascending
    pub fn new(bands: Vec<Band>, fallback: impl Into<String>) -> Result<Self, BreakpointError> {
        for (index, band) in bands.iter().enumerate() {
            if !band.below.is_finite() {
                return Err(BreakpointError::NotFinite { index });
            }
            if index > 0 {
                let previous = bands[index - 1].below;
                if band.below <= previous {
                    return Err(BreakpointError::Unsorted {
                        index,
                        bound: band.below,
                        previous,
                    });
                }
            }
        }
        Ok(Self {
            bands,
            fallback: fallback.into(),
        })
    }

    /// Build a table from bands in any order.
    ///
    /// Non-finite bounds are dropped and duplicate bounds keep the first label.
    pub fn sorted(mut bands: Vec<Band>, fallback: impl Into<String>) -> Self {
        bands.retain(|band| band.below.is_finite());
        bands.sort_by(|a, b| a.below.total_cmp(&b.below));
        bands.dedup_by(|later, earlier| later.below == earlier.below);
        Self {
            bands,
            fallback: fallback.into(),
        }
    }

    /// A table that always yields `label`
    pub fn constant(label: impl Into<String>) -> Self {
        Self {
            bands: Vec::new(),
            fallback: label.into(),
        }
    }

    /// Convenience constructor from `(bound, label)` pairs
    pub fn from_pairs(pairs: &[(f64, &str)], fallback: &str) -> Result<Self, BreakpointError> {
        let bands = pairs
            .iter()
            .map(|(below, label)| Band::new(*below, *label))
            .collect();
        Self::new(bands, fallback)
    }

    pub fn select(&self, value: f64) -> &str {
        self.bands
            .iter()
            .find(|band| value < band.below)
            .map(|band| band.label.as_str())
            .unwrap_or(&self.fallback)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Position of the selected label in band order (fallback is last)
    pub fn band_index(&self, value: f64) -> usize {
        self.bands
            .iter()
            .position(|band| value < band.below)
            .unwrap_or(self.bands.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wifi() -> BreakpointTable {
        BreakpointTable::from_pairs(
            &[(10.0, "w0"), (25.0, "w1"), (50.0, "w2"), (75.0, "w3"), (90.0, "w4")],
            "w5",
        )
        .unwrap()
    }

    #[test]
    fn test_select_uses_strict_less_than() {
        let table = wifi();
        assert_eq!(table.select(0.0), "w0");
        assert_eq!(table.select(9.99), "w0");
        assert_eq!(table.select(10.0), "w1");
        assert_eq!(table.select(89.0), "w4");
        assert_eq!(table.select(90.0), "w5");
        assert_eq!(table.select(1000.0), "w5");
        assert_eq!(table.select(-5.0), "w0");
    }

    #[test]
    fn test_selection_is_monotonic() {
        let table = wifi();
        let mut last = 0;
        for step in -20..=240 {
            let index = table.band_index(step as f64 * 0.5);
            assert!(index >= last, "band index decreased at {}", step);
            last = index;
        }
    }

    #[test]
    fn test_new_rejects_unsorted_and_non_finite() {
        let err = BreakpointTable::from_pairs(&[(50.0, "a"), (10.0, "b")], "c").unwrap_err();
        assert!(matches!(err, BreakpointError::Unsorted { index: 1, .. }));

        let err = BreakpointTable::from_pairs(&[(10.0, "a"), (10.0, "b")], "c").unwrap_err();
        assert!(matches!(err, BreakpointError::Unsorted { index: 1, .. }));

        let err = BreakpointTable::from_pairs(&[(f64::NAN, "a")], "c").unwrap_err();
        assert_eq!(err, BreakpointError::NotFinite { index: 0 });
    }

    #[test]
    fn test_sorted_orders_bands() {
        let table = BreakpointTable::sorted(
            vec![Band::new(66.0, "medium"), Band::new(33.0, "low")],
            "high",
        );
        assert_eq!(table.select(10.0), "low");
        assert_eq!(table.select(50.0), "medium");
        assert_eq!(table.select(70.0), "high");
    }

    #[test]
    fn test_constant_table() {
        let table = BreakpointTable::constant("bolt");
        assert_eq!(table.select(0.0), "bolt");
        assert_eq!(table.select(100.0), "bolt");
    }

    #[test]
    fn test_deserialize_rejects_unsorted() {
        let ok: BreakpointTable = serde_json::from_str(
            r#"{ "bands": [{ "below": 33, "label": "low" }], "fallback": "high" }"#,
        )
        .unwrap();
        assert_eq!(ok.select(40.0), "high");

        let bad = serde_json::from_str::<BreakpointTable>(
            r#"{ "bands": [{ "below": 33, "label": "a" }, { "below": 5, "label": "b" }], "fallback": "c" }"#,
        );
        assert!(bad.is_err());
    }
}
