// ABOUTME: Workout plan models and the (user id, date) key of a workout log row
// ABOUTME: Defines Metric, ExerciseEntry, WorkoutPlan, WorkoutKey, and the seed plan for new users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::user::UserId;
use crate::constants::limits::DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::btree_map::{self, BTreeMap};

/// Unit of the weight recorded for an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Metric {
    /// Kilograms
    Kgs,
    /// Pounds
    Lbs,
    /// Bodyweight movement; weight is a relative load
    Bodyweight,
}

impl Metric {
    /// Accepted wire values, in schema order
    pub const WIRE_VALUES: &'static [&'static str] = &["KGS", "LBS", "BODYWEIGHT"];

    /// Convert to wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kgs => "KGS",
            Self::Lbs => "LBS",
            Self::Bodyweight => "BODYWEIGHT",
        }
    }

    /// Parse the exact wire representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "KGS" => Some(Self::Kgs),
            "LBS" => Some(Self::Lbs),
            "BODYWEIGHT" => Some(Self::Bodyweight),
            _ => None,
        }
    }
}

/// Load prescription for one exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Weight per repetition, strictly positive
    #[serde(serialize_with = "serialize_json_number")]
    pub weight: f64,
    /// Repetitions per set, strictly positive
    #[serde(serialize_with = "serialize_json_number")]
    pub reps: f64,
    /// Number of sets, strictly positive
    #[serde(serialize_with = "serialize_json_number")]
    pub sets: f64,
    /// Unit of `weight`
    pub metric: Metric,
}

impl ExerciseEntry {
    /// Create an entry from its four components
    #[must_use]
    pub const fn new(weight: f64, reps: f64, sets: f64, metric: Metric) -> Self {
        Self {
            weight,
            reps,
            sets,
            metric,
        }
    }
}

/// Integral values go out as JSON integers so echoed plans match their input
#[allow(clippy::float_cmp)]
fn serialize_json_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Mapping from exercise name to its load prescription
///
/// Replaced as a whole on every write; there is no per-exercise merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutPlan(BTreeMap<String, ExerciseEntry>);

impl WorkoutPlan {
    /// Create an empty plan
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan written for every newly created user
    #[must_use]
    pub fn starter() -> Self {
        [
            ("Bench Press", ExerciseEntry::new(40.0, 10.0, 3.0, Metric::Kgs)),
            ("Deadlift", ExerciseEntry::new(60.0, 5.0, 3.0, Metric::Kgs)),
            ("Plank", ExerciseEntry::new(1.0, 1.0, 3.0, Metric::Bodyweight)),
            ("Pull Up", ExerciseEntry::new(1.0, 8.0, 3.0, Metric::Bodyweight)),
            ("Squat", ExerciseEntry::new(50.0, 8.0, 3.0, Metric::Kgs)),
        ]
        .into_iter()
        .map(|(name, entry)| (name.to_owned(), entry))
        .collect()
    }

    /// Insert or replace one exercise
    pub fn insert(&mut self, exercise: impl Into<String>, entry: ExerciseEntry) {
        self.0.insert(exercise.into(), entry);
    }

    /// Look up one exercise
    #[must_use]
    pub fn get(&self, exercise: &str) -> Option<&ExerciseEntry> {
        self.0.get(exercise)
    }

    /// Number of exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the plan has no exercises
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate exercises ordered by name
    pub fn iter(&self) -> btree_map::Iter<'_, String, ExerciseEntry> {
        self.0.iter()
    }
}

impl FromIterator<(String, ExerciseEntry)> for WorkoutPlan {
    fn from_iter<I: IntoIterator<Item = (String, ExerciseEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WorkoutPlan {
    type Item = (&'a String, &'a ExerciseEntry);
    type IntoIter = btree_map::Iter<'a, String, ExerciseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Primary key of a workout log row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkoutKey {
    /// Partition key
    pub user_id: UserId,
    /// Sort key
    pub date: NaiveDate,
}

impl WorkoutKey {
    /// Create a key
    #[must_use]
    pub const fn new(user_id: UserId, date: NaiveDate) -> Self {
        Self { user_id, date }
    }

    /// Sort key in its `YYYY-MM-DD` storage form
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Validated input of the workout plan upsert
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutUpsert {
    /// Row to write
    pub key: WorkoutKey,
    /// Plan replacing whatever the row held
    pub plan: WorkoutPlan,
}
