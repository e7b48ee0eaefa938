// ABOUTME: Per-operation request schemas for user creation, user ids, row keys, and plan upserts
// ABOUTME: Each schema turns untyped JSON into a typed model or an ordered list of field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    check_exact_length, check_min_length, date_field, enum_field, expect_object, join_path,
    positive_number_field, string_field, ValidationErrors,
};
use crate::constants::fields;
use crate::constants::limits::{MIN_EXERCISE_NAME_LENGTH, MIN_FULL_NAME_LENGTH, USER_ID_LENGTH};
use crate::models::{
    ExerciseEntry, Gender, Metric, UserId, UserProfile, WorkoutKey, WorkoutPlan, WorkoutUpsert,
};
use serde_json::{Map, Value};

/// Validate the body of a user creation request
///
/// Rules: `fullName` string of at least 3 characters, `gender` one of
/// `M`/`F`/`O`, `dob` a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns every violated rule in field order.
pub fn validate_new_user(input: &Value) -> Result<UserProfile, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(object) = expect_object(input, "", &mut errors) else {
        return Err(errors);
    };

    let full_name = string_field(object, "", fields::FULL_NAME, &mut errors).filter(|name| {
        check_min_length(
            name,
            MIN_FULL_NAME_LENGTH,
            fields::FULL_NAME.to_owned(),
            &mut errors,
        )
    });
    let gender = enum_field(
        object,
        "",
        fields::GENDER,
        Gender::WIRE_VALUES,
        Gender::parse,
        &mut errors,
    );
    let date_of_birth = date_field(object, "", fields::DOB, &mut errors);

    errors.into_result(|| {
        Some(UserProfile {
            full_name: full_name?.to_owned(),
            gender: gender?,
            date_of_birth: date_of_birth?,
        })
    })
}

/// Validate a record carrying only a user id
///
/// # Errors
///
/// Returns the violation when `id` is absent, not a string, or not exactly
/// 8 characters long.
pub fn validate_user_id(input: &Value) -> Result<UserId, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(object) = expect_object(input, "", &mut errors) else {
        return Err(errors);
    };
    let user_id = user_id_field(object, &mut errors);
    errors.into_result(|| user_id)
}

/// Validate a record carrying a user id and a workout date
///
/// # Errors
///
/// Returns every violated rule in field order.
pub fn validate_workout_key(input: &Value) -> Result<WorkoutKey, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(object) = expect_object(input, "", &mut errors) else {
        return Err(errors);
    };
    let key = workout_key_fields(object, &mut errors);
    errors.into_result(|| key)
}

/// Validate a workout plan upsert: row key plus the replacement plan
///
/// # Errors
///
/// Returns every violated rule: key fields first, then plan entries by
/// exercise name.
pub fn validate_workout_upsert(input: &Value) -> Result<WorkoutUpsert, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(object) = expect_object(input, "", &mut errors) else {
        return Err(errors);
    };

    let key = workout_key_fields(object, &mut errors);
    let plan = match object.get(fields::WORKOUT_PLAN) {
        None => {
            errors.push(fields::WORKOUT_PLAN, "Required");
            None
        }
        Some(value) => workout_plan(value, &mut errors),
    };

    errors.into_result(|| Some(WorkoutUpsert { key: key?, plan: plan? }))
}

fn user_id_field(object: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<UserId> {
    string_field(object, "", fields::ID, errors)
        .filter(|id| check_exact_length(id, USER_ID_LENGTH, fields::ID.to_owned(), errors))
        .and_then(UserId::new)
}

fn workout_key_fields(
    object: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<WorkoutKey> {
    let user_id = user_id_field(object, errors);
    let date = date_field(object, "", fields::DATE, errors);
    Some(WorkoutKey::new(user_id?, date?))
}

fn workout_plan(value: &Value, errors: &mut ValidationErrors) -> Option<WorkoutPlan> {
    let entries = expect_object(value, fields::WORKOUT_PLAN, errors)?;
    let before = errors.len();
    let mut plan = WorkoutPlan::new();

    for (name, raw_entry) in entries {
        let path = join_path(fields::WORKOUT_PLAN, name);
        let name_ok = check_min_length(name, MIN_EXERCISE_NAME_LENGTH, path.clone(), errors);
        let entry = exercise_entry(raw_entry, &path, errors);
        if let (true, Some(entry)) = (name_ok, entry) {
            plan.insert(name.clone(), entry);
        }
    }

    (errors.len() == before).then_some(plan)
}

fn exercise_entry(value: &Value, path: &str, errors: &mut ValidationErrors) -> Option<ExerciseEntry> {
    let object = expect_object(value, path, errors)?;
    let weight = positive_number_field(object, path, fields::WEIGHT, errors);
    let reps = positive_number_field(object, path, fields::REPS, errors);
    let sets = positive_number_field(object, path, fields::SETS, errors);
    let metric = enum_field(
        object,
        path,
        fields::METRIC,
        Metric::WIRE_VALUES,
        Metric::parse,
        errors,
    );
    Some(ExerciseEntry::new(weight?, reps?, sets?, metric?))
}
