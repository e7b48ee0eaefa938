// ABOUTME: User id generation for newly created workout log users
// ABOUTME: Random 8-character ids drawn from a URL-safe alphabet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use rand::Rng;
use workout_log_core::constants::limits::USER_ID_LENGTH;
use workout_log_core::models::UserId;

/// URL-safe id alphabet
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of user ids
///
/// No uniqueness is checked against the store; a collision overwrites the
/// colliding user's first row.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh id
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the produced value is not a valid id
    fn generate(&self) -> AppResult<UserId>;
}

/// Thread-local RNG backed generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> AppResult<UserId> {
        let mut rng = rand::thread_rng();
        let id: String = (0..USER_ID_LENGTH)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect();
        UserId::new(id).ok_or_else(|| AppError::internal("Generated user id has the wrong length"))
    }
}
