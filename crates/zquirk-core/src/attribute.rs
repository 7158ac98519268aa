//! Output attribute model for emulated clusters.
//!
//! An emulated cluster exposes its state to the host platform as a set of
//! numbered attributes. The cluster writes values into an [`AttributeCache`]
//! and the host's generic read/report path serves them back out. Entries are
//! created lazily on first write and the last write always wins; there is no
//! eviction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Value stored in an emulated cluster's attribute cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Integer attribute (identifiers, scaling constants, rounded totals).
    Int(i64),
    /// Floating-point attribute (measurement readings).
    Float(f64),
}

impl AttributeValue {
    /// Numeric view of the value, widening integers.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }

    /// Integer view of the value, truncating floats.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            Self::Float(v) => *v as i64,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Lazily-populated cache of output attribute values, keyed by attribute id.
#[derive(Debug, Clone, Default)]
pub struct AttributeCache {
    values: HashMap<u16, AttributeValue>,
}

impl AttributeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an attribute value, overwriting any previous entry.
    pub fn update(&mut self, id: u16, value: impl Into<AttributeValue>) {
        let value = value.into();
        trace!(attribute = id, ?value, "attribute updated");
        self.values.insert(id, value);
    }

    /// Last value written for the attribute, if any.
    pub fn get(&self, id: u16) -> Option<AttributeValue> {
        self.values.get(&id).copied()
    }

    /// Number of attributes written so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalize a raw measurement for display.
///
/// Applies the platform's presentation contract: `value × multiplier ÷
/// divisor`, rounded to `decimals` decimal places. Cached raw values stay
/// unscaled; this runs only on the read/display path.
pub fn normalize(value: f64, multiplier: i64, divisor: i64, decimals: u32) -> f64 {
    let scaled = value * multiplier as f64 / divisor as f64;
    let factor = 10f64.powi(decimals as i32);
    (scaled * factor).round() / factor
}
