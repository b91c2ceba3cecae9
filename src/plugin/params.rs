//! Plugin parameters
//!
//! The parameter store is shared between the audio thread and the editor or
//! automation side. Values are stored as f32 bits in atomics, so reads from the
//! audio thread never block or allocate.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{DryWetError, Result};

/// Key of the pre-gain parameter
pub const PREGAIN_ID: &str = "PREGAIN";

/// Key of the mix parameter
pub const MIX_ID: &str = "MIX";

/// Static description of a float parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatParamInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub unit: &'static str,
}

impl FloatParamInfo {
    /// Clamp a plain value into range
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Map a plain value to [0, 1]
    pub fn normalize(&self, value: f32) -> f32 {
        (self.clamp(value) - self.min) / (self.max - self.min)
    }

    /// Map a [0, 1] value back to the plain range
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Pre-gain in decibels, applied before the waveshaper
pub const PREGAIN: FloatParamInfo = FloatParamInfo {
    id: PREGAIN_ID,
    name: "PreGain",
    min: -96.0,
    max: 48.0,
    default: 0.0,
    unit: "dB",
};

/// Dry/wet mix, 0 = fully dry
pub const MIX: FloatParamInfo = FloatParamInfo {
    id: MIX_ID,
    name: "Mix",
    min: 0.0,
    max: 1.0,
    default: 0.0,
    unit: "",
};

/// Every parameter the plugin exposes, in host order
pub const PARAMETERS: [FloatParamInfo; 2] = [PREGAIN, MIX];

/// Look up a parameter description by key
pub fn param_info(key: &str) -> Result<&'static FloatParamInfo> {
    PARAMETERS
        .iter()
        .find(|p| p.id == key)
        .ok_or_else(|| DryWetError::UnknownParameter {
            key: key.to_string(),
        })
}

/// Lock-free f32 cell
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Parameter values read once per block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSnapshot {
    pub pre_gain_db: f32,
    pub mix: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            pre_gain_db: PREGAIN.default,
            mix: MIX.default,
        }
    }
}

/// Current parameter values, keyed by `"PREGAIN"` and `"MIX"`
#[derive(Debug)]
pub struct ParameterStore {
    pre_gain_db: AtomicF32,
    mix: AtomicF32,
}

impl ParameterStore {
    /// Create a store holding the default values
    pub fn new() -> Self {
        Self {
            pre_gain_db: AtomicF32::new(PREGAIN.default),
            mix: AtomicF32::new(MIX.default),
        }
    }

    fn cell(&self, key: &str) -> Result<(&AtomicF32, &'static FloatParamInfo)> {
        let info = param_info(key)?;
        let cell = match info.id {
            PREGAIN_ID => &self.pre_gain_db,
            _ => &self.mix,
        };
        Ok((cell, info))
    }

    /// Read the current value of a parameter
    pub fn get(&self, key: &str) -> Result<f32> {
        self.cell(key).map(|(cell, _)| cell.load())
    }

    /// Write a parameter, clamped to its range
    ///
    /// Returns the value actually stored.
    ///
    /// # Errors
    /// `UnknownParameter` for an unrecognised key, `InvalidParameterValue`
    /// for NaN or infinite input.
    pub fn set(&self, key: &str, value: f32) -> Result<f32> {
        let (cell, info) = self.cell(key)?;
        if !value.is_finite() {
            return Err(DryWetError::InvalidParameterValue {
                key: key.to_string(),
                value,
            });
        }
        let clamped = info.clamp(value);
        cell.store(clamped);
        Ok(clamped)
    }

    /// Current pre-gain in dB
    pub fn pre_gain_db(&self) -> f32 {
        self.pre_gain_db.load()
    }

    /// Current mix ratio
    pub fn mix(&self) -> f32 {
        self.mix.load()
    }

    /// Read both values for one processing block
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            pre_gain_db: self.pre_gain_db.load(),
            mix: self.mix.load(),
        }
    }

    /// Write every value of a snapshot
    pub fn apply(&self, snapshot: &ParamSnapshot) -> Result<()> {
        self.set(PREGAIN_ID, snapshot.pre_gain_db)?;
        self.set(MIX_ID, snapshot.mix)?;
        Ok(())
    }

    /// Restore every parameter to its default
    pub fn reset_to_defaults(&self) {
        self.pre_gain_db.store(PREGAIN.default);
        self.mix.store(MIX.default);
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_defaults() {
        let store = ParameterStore::new();
        assert_eq!(store.pre_gain_db(), 0.0);
        assert_eq!(store.mix(), 0.0);
        assert_eq!(store.snapshot(), ParamSnapshot::default());
    }

    #[test]
    fn test_set_clamps_to_range() {
        let store = ParameterStore::new();
        assert_eq!(store.set(PREGAIN_ID, 100.0).unwrap(), 48.0);
        assert_eq!(store.set(PREGAIN_ID, -500.0).unwrap(), -96.0);
        assert_eq!(store.set(MIX_ID, 1.5).unwrap(), 1.0);
        assert_eq!(store.set(MIX_ID, 0.3).unwrap(), 0.3);
        assert_eq!(store.get(MIX_ID).unwrap(), 0.3);
    }

    #[test]
    fn test_set_rejects_non_finite() {
        let store = ParameterStore::new();
        store.set(MIX_ID, 0.4).unwrap();

        let err = store.set(MIX_ID, f32::NAN).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER_VALUE");
        assert_eq!(store.mix(), 0.4);
    }

    #[test]
    fn test_unknown_key() {
        let store = ParameterStore::new();
        assert_eq!(
            store.get("DRIVE").unwrap_err().error_code(),
            "UNKNOWN_PARAMETER"
        );
        assert!(store.set("pregain", 1.0).is_err());
        assert!(param_info("MIX").is_ok());
    }

    #[test]
    fn test_normalize_roundtrip() {
        assert_eq!(PREGAIN.normalize(-96.0), 0.0);
        assert_eq!(PREGAIN.normalize(48.0), 1.0);
        assert!(PREGAIN.denormalize(PREGAIN.normalize(0.0)).abs() < 1e-4);
        assert_eq!(MIX.denormalize(0.25), 0.25);
        assert_eq!(MIX.denormalize(4.0), 1.0);
    }

    #[test]
    fn test_apply_and_reset() {
        let store = ParameterStore::new();
        store
            .apply(&ParamSnapshot {
                pre_gain_db: -12.0,
                mix: 0.75,
            })
            .unwrap();
        assert_eq!(store.pre_gain_db(), -12.0);
        assert_eq!(store.mix(), 0.75);

        store.reset_to_defaults();
        assert_eq!(store.snapshot(), ParamSnapshot::default());
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot: ParamSnapshot = serde_json::from_str(r#"{"mix": 0.5}"#).unwrap();
        assert_eq!(snapshot.mix, 0.5);
        assert_eq!(snapshot.pre_gain_db, 0.0);

        let json = serde_json::to_value(PREGAIN).unwrap();
        assert_eq!(json["id"], "PREGAIN");
        assert_eq!(json["max"], 48.0);
    }

    #[test]
    fn test_concurrent_writer_never_tears_values() {
        let store = Arc::new(ParameterStore::new());
        let writer_store = Arc::clone(&store);

        let writer = thread::spawn(move || {
            for i in 0..10_000 {
                let value = if i % 2 == 0 { -96.0 } else { 48.0 };
                writer_store.set(PREGAIN_ID, value).unwrap();
            }
        });

        for _ in 0..10_000 {
            let value = store.pre_gain_db();
            assert!(value == 0.0 || value == -96.0 || value == 48.0);
        }

        writer.join().unwrap();
    }
}
