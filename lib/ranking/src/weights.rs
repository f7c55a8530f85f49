//! Per-signal weights
//!
//! Weights blend the similarity spaces into one score. They do not need to
//! sum to 1.0; call [`SignalWeights::normalized`] when they should.

use collrec_core::{Error, Result, Signal};
use serde::{Deserialize, Serialize};

/// Weight of each signal in the blended score.
///
/// Deserializes from a partial object: missing signals fall back to their
/// default weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalWeights {
    pub description: f32,
    #[serde(rename = "type")]
    pub tag_type: f32,
    pub tag: f32,
    pub activities: f32,
    pub collection_type: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            description: 0.2,
            tag_type: 0.4,
            tag: 0.2,
            activities: 0.2,
            collection_type: 0.0,
        }
    }
}

impl SignalWeights {
    /// All weights zero
    pub fn zero() -> Self {
        Self {
            description: 0.0,
            tag_type: 0.0,
            tag: 0.0,
            activities: 0.0,
            collection_type: 0.0,
        }
    }

    /// Builder-style override of one signal
    #[must_use]
    pub fn with(mut self, signal: Signal, weight: f32) -> Self {
        *self.slot(signal) = weight;
        self
    }

    #[inline]
    pub fn get(&self, signal: Signal) -> f32 {
        match signal {
            Signal::Description => self.description,
            Signal::Type => self.tag_type,
            Signal::Tag => self.tag,
            Signal::Activities => self.activities,
            Signal::CollectionType => self.collection_type,
        }
    }

    fn slot(&mut self, signal: Signal) -> &mut f32 {
        match signal {
            Signal::Description => &mut self.description,
            Signal::Type => &mut self.tag_type,
            Signal::Tag => &mut self.tag,
            Signal::Activities => &mut self.activities,
            Signal::CollectionType => &mut self.collection_type,
        }
    }

    /// Signals with a non-zero weight
    pub fn active(&self) -> impl Iterator<Item = (Signal, f32)> + '_ {
        Signal::ALL
            .into_iter()
            .map(|s| (s, self.get(s)))
            .filter(|&(_, w)| w != 0.0)
    }

    pub fn total(&self) -> f32 {
        Signal::ALL.iter().map(|&s| self.get(s)).sum()
    }

    /// Reject negative and non-finite weights
    pub fn validate(&self) -> Result<()> {
        for signal in Signal::ALL {
            let weight = self.get(signal);
            if !weight.is_finite() {
                return Err(Error::InvalidWeights(format!(
                    "weight for '{signal}' is not finite"
                )));
            }
            if weight < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "weight for '{signal}' is negative: {weight}"
                )));
            }
        }
        Ok(())
    }

    /// Copy scaled so the weights sum to 1.0. All-zero weights stay zero.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        let total = self.total();
        if total <= 0.0 {
            return Ok(*self);
        }
        let mut out = *self;
        for signal in Signal::ALL {
            *out.slot(signal) /= total;
        }
        Ok(out)
    }
}
