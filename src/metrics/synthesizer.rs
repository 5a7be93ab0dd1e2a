// ABOUTME: Random synthesis of health metrics with per-field client overrides
// ABOUTME: Pure function of the override record plus a random source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{BedtimeConsistency, HealthMetrics, MetricOverrides, SleepQuality};
use pulse_core::constants::metrics::{
    BODY_TEMPERATURE_C, CALORIES_BURNED, DISTANCE_KM, HEART_RATE_BPM, REAL_VALUE_DECIMALS,
    SLEEP_DURATION_HOURS, SPO2_PERCENT, STEPS,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Number;
use std::ops::RangeInclusive;

/// Build a metrics record using the thread-local random source
#[must_use]
pub fn synthesize(overrides: &MetricOverrides) -> HealthMetrics {
    synthesize_with_rng(overrides, &mut rand::thread_rng())
}

/// Build a metrics record, drawing every field the client did not supply from `rng`
pub fn synthesize_with_rng<R: Rng>(overrides: &MetricOverrides, rng: &mut R) -> HealthMetrics {
    HealthMetrics {
        continuous_heart_rate: overrides
            .continuous_heart_rate
            .unwrap_or_else(|| rng.gen_range(HEART_RATE_BPM)),
        sleep_duration_hours: overrides
            .sleep_duration_hours
            .clone()
            .unwrap_or_else(|| uniform_rounded(rng, SLEEP_DURATION_HOURS)),
        sleep_quality: overrides
            .sleep_quality
            .unwrap_or_else(|| pick(rng, &SleepQuality::ALL, SleepQuality::Average)),
        bedtime_consistency: overrides.bedtime_consistency.unwrap_or_else(|| {
            pick(rng, &BedtimeConsistency::ALL, BedtimeConsistency::Moderate)
        }),
        spo2: overrides.spo2.unwrap_or_else(|| rng.gen_range(SPO2_PERCENT)),
        body_temperature_c: overrides
            .body_temperature_c
            .clone()
            .unwrap_or_else(|| uniform_rounded(rng, BODY_TEMPERATURE_C)),
        steps: overrides.steps.unwrap_or_else(|| rng.gen_range(STEPS)),
        distance_km: overrides
            .distance_km
            .clone()
            .unwrap_or_else(|| uniform_rounded(rng, DISTANCE_KM)),
        calories_burned: overrides
            .calories_burned
            .unwrap_or_else(|| rng.gen_range(CALORIES_BURNED)),
    }
}

fn uniform_rounded<R: Rng>(rng: &mut R, range: RangeInclusive<f64>) -> Number {
    let scale = 10_f64.powi(REAL_VALUE_DECIMALS);
    let value = (rng.gen_range(range.clone()) * scale).round() / scale;
    // Rounding can nudge a draw just past either bound
    let value = value.clamp(*range.start(), *range.end());
    // Draws from a finite range are always finite
    Number::from_f64(value).unwrap_or_else(|| Number::from(0_u8))
}

fn pick<R: Rng, T: Copy>(rng: &mut R, choices: &[T], default: T) -> T {
    choices.choose(rng).copied().unwrap_or(default)
}
