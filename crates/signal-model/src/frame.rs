//! Per-tick coefficient snapshots.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::expression::ExpressionKey;

/// Coefficient readings for one tracking update.
///
/// Each key is either present with an intensity (nominally `[0.0, 1.0]`)
/// or absent because the tracker produced no estimate this tick. Absence
/// is not the same as zero.
///
/// Serialized as a JSON object keyed by tracker names. On input, `null`
/// values are treated as absent and names outside the known set are
/// ignored.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<f32>>")]
pub struct SignalFrame {
    values: [Option<f32>; ExpressionKey::COUNT],
}

impl SignalFrame {
    /// A frame with no readings.
    pub fn new() -> Self {
        Self {
            values: [None; ExpressionKey::COUNT],
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: ExpressionKey, value: f32) -> Self {
        self.insert(key, value);
        self
    }

    /// Build a frame from tracker names, skipping names outside the known set.
    pub fn from_named<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        let mut frame = Self::new();
        for (name, value) in entries {
            if let Some(key) = ExpressionKey::from_name(name.as_ref()) {
                frame.insert(key, value);
            }
        }
        frame
    }

    /// Reading for `key`, if the tracker produced one.
    pub fn get(&self, key: ExpressionKey) -> Option<f32> {
        self.values[key.index()]
    }

    pub fn contains(&self, key: ExpressionKey) -> bool {
        self.values[key.index()].is_some()
    }

    /// Set the reading for `key`, returning the previous one.
    pub fn insert(&mut self, key: ExpressionKey, value: f32) -> Option<f32> {
        self.values[key.index()].replace(value)
    }

    /// Mark `key` as absent, returning the previous reading.
    pub fn remove(&mut self, key: ExpressionKey) -> Option<f32> {
        self.values[key.index()].take()
    }

    /// Number of present readings.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Present readings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ExpressionKey, f32)> + '_ {
        ExpressionKey::ALL
            .iter()
            .zip(self.values.iter())
            .filter_map(|(key, value)| value.map(|v| (*key, v)))
    }
}

impl Default for SignalFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignalFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k.as_str(), v)))
            .finish()
    }
}

impl FromIterator<(ExpressionKey, f32)> for SignalFrame {
    fn from_iter<T: IntoIterator<Item = (ExpressionKey, f32)>>(iter: T) -> Self {
        let mut frame = Self::new();
        for (key, value) in iter {
            frame.insert(key, value);
        }
        frame
    }
}

impl From<BTreeMap<String, Option<f32>>> for SignalFrame {
    fn from(raw: BTreeMap<String, Option<f32>>) -> Self {
        Self::from_named(
            raw.into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
    }
}

impl Serialize for SignalFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), &value)?;
        }
        map.end()
    }
}
