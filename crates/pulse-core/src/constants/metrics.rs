// ABOUTME: Plausible value ranges and enumerations for simulated health metrics
// ABOUTME: Shared by the synthesizer and by tests that assert generated values stay in range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::ops::RangeInclusive;

/// Resting heart rate, beats per minute
pub const HEART_RATE_BPM: RangeInclusive<u32> = 60..=100;
/// Sleep duration, hours
pub const SLEEP_DURATION_HOURS: RangeInclusive<f64> = 5.0..=9.0;
/// Blood oxygen saturation, percent
pub const SPO2_PERCENT: RangeInclusive<u32> = 94..=100;
/// Body temperature, degrees Celsius
pub const BODY_TEMPERATURE_C: RangeInclusive<f64> = 36.2..=37.5;
/// Daily step count
pub const STEPS: RangeInclusive<u32> = 2000..=12000;
/// Daily distance, kilometres
pub const DISTANCE_KM: RangeInclusive<f64> = 1.0..=8.0;
/// Daily calories burned, kcal
pub const CALORIES_BURNED: RangeInclusive<u32> = 1500..=3000;

/// Decimal places kept on synthesized real-valued metrics
pub const REAL_VALUE_DECIMALS: i32 = 1;

/// Wire names of the nine `health_data` fields, in response order
pub const FIELD_NAMES: [&str; 9] = [
    "continuous_heart_rate",
    "sleep_duration_hours",
    "sleep_quality",
    "bedtime_consistency",
    "spo2",
    "body_temperature_c",
    "steps",
    "distance_km",
    "calories_burned",
];
