// ABOUTME: Health metric record, client override record, and categorical metric enums
// ABOUTME: Defines the nine-field health_data payload shared by synthesis, prompting, and responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Simulated personal-health metrics
//!
//! A [`HealthMetrics`] record is built fresh for every request. Each field is either
//! copied from the client's [`MetricOverrides`] or drawn at random from the plausible
//! ranges in [`pulse_core::constants::metrics`].

mod synthesizer;

pub use synthesizer::{synthesize, synthesize_with_rng};

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Subjective sleep quality rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepQuality {
    /// Restless or interrupted sleep
    Poor,
    /// Typical night
    Average,
    /// Restful night
    Good,
    /// Exceptionally restful night
    Excellent,
}

impl SleepQuality {
    /// All ratings, in ascending order
    pub const ALL: [Self; 4] = [Self::Poor, Self::Average, Self::Good, Self::Excellent];
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => write!(f, "Poor"),
            Self::Average => write!(f, "Average"),
            Self::Good => write!(f, "Good"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}

/// How regular the user's bedtime has been
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedtimeConsistency {
    /// Bedtime varies widely
    Irregular,
    /// Bedtime varies somewhat
    Moderate,
    /// Bedtime is stable
    Consistent,
}

impl BedtimeConsistency {
    /// All consistency levels, least to most regular
    pub const ALL: [Self; 3] = [Self::Irregular, Self::Moderate, Self::Consistent];
}

impl fmt::Display for BedtimeConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irregular => write!(f, "Irregular"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Consistent => write!(f, "Consistent"),
        }
    }
}

/// One snapshot of simulated health metrics, serialized as `health_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Heart rate in beats per minute
    pub continuous_heart_rate: u32,
    /// Last night's sleep in hours
    pub sleep_duration_hours: Number,
    /// Sleep quality rating
    pub sleep_quality: SleepQuality,
    /// Bedtime regularity
    pub bedtime_consistency: BedtimeConsistency,
    /// Blood oxygen saturation percentage
    pub spo2: u32,
    /// Body temperature in Celsius
    pub body_temperature_c: Number,
    /// Step count
    pub steps: u32,
    /// Distance covered in kilometres
    pub distance_km: Number,
    /// Calories burned
    pub calories_burned: u32,
}

/// Client-supplied values that take precedence over synthesis
///
/// Absent and `null` fields both deserialize to `None`. Unknown keys are ignored.
/// Values of the right JSON type are accepted as-is, even outside the plausible range.
/// Real-valued fields keep the client's number literally, so `7` is echoed as `7`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricOverrides {
    /// Heart rate override
    #[serde(default)]
    pub continuous_heart_rate: Option<u32>,
    /// Sleep duration override
    #[serde(default)]
    pub sleep_duration_hours: Option<Number>,
    /// Sleep quality override
    #[serde(default)]
    pub sleep_quality: Option<SleepQuality>,
    /// Bedtime consistency override
    #[serde(default)]
    pub bedtime_consistency: Option<BedtimeConsistency>,
    /// Blood oxygen override
    #[serde(default)]
    pub spo2: Option<u32>,
    /// Body temperature override
    #[serde(default)]
    pub body_temperature_c: Option<Number>,
    /// Step count override
    #[serde(default)]
    pub steps: Option<u32>,
    /// Distance override
    #[serde(default)]
    pub distance_km: Option<Number>,
    /// Calories override
    #[serde(default)]
    pub calories_burned: Option<u32>,
}

impl MetricOverrides {
    /// Number of fields the client supplied
    #[must_use]
    pub fn supplied_count(&self) -> usize {
        [
            self.continuous_heart_rate.is_some(),
            self.sleep_duration_hours.is_some(),
            self.sleep_quality.is_some(),
            self.bedtime_consistency.is_some(),
            self.spo2.is_some(),
            self.body_temperature_c.is_some(),
            self.steps.is_some(),
            self.distance_km.is_some(),
            self.calories_burned.is_some(),
        ]
        .into_iter()
        .filter(|supplied| *supplied)
        .count()
    }

    /// True when no field was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supplied_count() == 0
    }
}
