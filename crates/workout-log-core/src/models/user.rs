// ABOUTME: User identity and profile models for the workout log service
// ABOUTME: Defines the 8-character UserId, the Gender enumeration, and UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::USER_ID_LENGTH;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identifier, always exactly [`USER_ID_LENGTH`] characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap `value` if it has the required length
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (value.chars().count() == USER_ID_LENGTH).then_some(Self(value))
    }

    /// Borrow the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Gender as recorded on the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    #[serde(rename = "M")]
    Male,
    /// Female
    #[serde(rename = "F")]
    Female,
    /// Other
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Accepted wire values, in schema order
    pub const WIRE_VALUES: &'static [&'static str] = &["M", "F", "O"];

    /// Convert to wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }

    /// Parse the exact wire representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            "O" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Profile attributes captured when a user is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Full name, at least three characters
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Gender
    pub gender: Gender,
    /// Date of birth
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
}
