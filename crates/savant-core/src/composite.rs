// Synthetic composite score ("Synthetic xwOBA"): a fixed linear blend of
// BB%, K%, Max EV and Contact%.

use crate::cleaning::clean_column;
use crate::dataset::Dataset;
use crate::mapping::ColumnMapping;
use crate::metrics::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Max EV anchor: `(Max EV - 75) / 35` maps typical values onto roughly 0-1.
pub const MAX_EV_FLOOR: f64 = 75.0;
pub const MAX_EV_SPAN: f64 = 35.0;

/// Contact% anchor: `(Contact% - 70) / 30`.
pub const CONTACT_FLOOR: f64 = 70.0;
pub const CONTACT_SPAN: f64 = 30.0;

/// The raw metrics the composite reads, in display order.
pub const COMPONENT_METRICS: [Metric; 4] = [
    Metric::WalkPct,
    Metric::StrikeoutPct,
    Metric::MaxExitVelocity,
    Metric::ContactPct,
];

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Coefficients of the composite formula.
///
/// Every field is required when deserialized: a record missing a field is a
/// contract violation, not something to paper over with a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeWeights {
    pub w_bb: f64,
    pub w_k: f64,
    pub w_power: f64,
    pub w_contact: f64,
    pub base_woba: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            w_bb: 0.7,
            w_k: 0.7,
            w_power: 0.25,
            w_contact: 0.2,
            base_woba: 0.280,
        }
    }
}

/// One named field of [`CompositeWeights`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightField {
    Bb,
    K,
    Power,
    Contact,
    BaseWoba,
}

impl WeightField {
    pub const ALL: [WeightField; 5] = [
        WeightField::Bb,
        WeightField::K,
        WeightField::Power,
        WeightField::Contact,
        WeightField::BaseWoba,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WeightField::Bb => "w_bb",
            WeightField::K => "w_k",
            WeightField::Power => "w_power",
            WeightField::Contact => "w_contact",
            WeightField::BaseWoba => "base_woba",
        }
    }
}

impl fmt::Display for WeightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weight field `{0}` (expected one of w_bb, w_k, w_power, w_contact, base_woba)")]
pub struct WeightFieldError(pub String);

impl FromStr for WeightField {
    type Err = WeightFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightField::ALL
            .into_iter()
            .find(|f| f.key() == s.trim())
            .ok_or_else(|| WeightFieldError(s.to_string()))
    }
}

/// A rejected override: the field kept its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for {field}; keeping previous value")]
pub struct InvalidWeight {
    pub field: WeightField,
    pub value: String,
}

impl CompositeWeights {
    pub fn get(&self, field: WeightField) -> f64 {
        match field {
            WeightField::Bb => self.w_bb,
            WeightField::K => self.w_k,
            WeightField::Power => self.w_power,
            WeightField::Contact => self.w_contact,
            WeightField::BaseWoba => self.base_woba,
        }
    }

    fn slot(&mut self, field: WeightField) -> &mut f64 {
        match field {
            WeightField::Bb => &mut self.w_bb,
            WeightField::K => &mut self.w_k,
            WeightField::Power => &mut self.w_power,
            WeightField::Contact => &mut self.w_contact,
            WeightField::BaseWoba => &mut self.base_woba,
        }
    }

    /// Parse `raw` into `field`. Non-numeric or non-finite input is rejected
    /// and the field keeps its previous value.
    pub fn apply_override(&mut self, field: WeightField, raw: &str) -> Result<(), InvalidWeight> {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => {
                *self.slot(field) = v;
                Ok(())
            }
            _ => Err(InvalidWeight {
                field,
                value: raw.to_string(),
            }),
        }
    }

    /// Apply each override independently; returns every rejection.
    pub fn apply_overrides<'a, I>(&mut self, overrides: I) -> Vec<InvalidWeight>
    where
        I: IntoIterator<Item = (WeightField, &'a str)>,
    {
        let mut rejected = Vec::new();
        for (field, raw) in overrides {
            if let Err(e) = self.apply_override(field, raw) {
                warn!("{e}");
                rejected.push(e);
            }
        }
        rejected
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Cleaned raw inputs for one row. `None` marks an unmapped or missing value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositeInputs {
    pub bb_pct: Option<f64>,
    pub k_pct: Option<f64>,
    pub max_ev: Option<f64>,
    pub contact_pct: Option<f64>,
}

/// Score one row.
///
/// ```text
/// base_woba + (BB%/100)·w_bb − (K%/100)·w_k
///           + ((MaxEV − 75)/35)·w_power + ((Contact% − 70)/30)·w_contact
/// ```
///
/// No clamping. A missing input contributes nothing, so the score is always
/// defined and equals `base_woba` when every input is missing.
pub fn composite_score(inputs: &CompositeInputs, weights: &CompositeWeights) -> f64 {
    let bb = inputs.bb_pct.map_or(0.0, |v| v / 100.0 * weights.w_bb);
    let k = inputs.k_pct.map_or(0.0, |v| v / 100.0 * weights.w_k);
    let power = inputs
        .max_ev
        .map_or(0.0, |v| (v - MAX_EV_FLOOR) / MAX_EV_SPAN * weights.w_power);
    let contact = inputs
        .contact_pct
        .map_or(0.0, |v| (v - CONTACT_FLOOR) / CONTACT_SPAN * weights.w_contact);

    weights.base_woba + bb - k + power + contact
}

/// Cleaned values of one mapped metric, or all-missing when unmapped.
pub(crate) fn cleaned_metric(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    metric: Metric,
) -> Vec<Option<f64>> {
    mapping
        .column_for(dataset, metric)
        .map_or_else(|| vec![None; dataset.row_count()], |c| clean_column(&c.cells))
}

/// Per-row composite inputs gathered from the dataset.
pub fn composite_inputs(dataset: &Dataset, mapping: &ColumnMapping) -> Vec<CompositeInputs> {
    let bb = cleaned_metric(dataset, mapping, Metric::WalkPct);
    let k = cleaned_metric(dataset, mapping, Metric::StrikeoutPct);
    let ev = cleaned_metric(dataset, mapping, Metric::MaxExitVelocity);
    let contact = cleaned_metric(dataset, mapping, Metric::ContactPct);

    (0..dataset.row_count())
        .map(|row| CompositeInputs {
            bb_pct: bb[row],
            k_pct: k[row],
            max_ev: ev[row],
            contact_pct: contact[row],
        })
        .collect()
}

/// One composite score per dataset row.
pub fn compute_composite(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    weights: &CompositeWeights,
) -> Vec<f64> {
    composite_inputs(dataset, mapping)
        .iter()
        .map(|inputs| composite_score(inputs, weights))
        .collect()
}
