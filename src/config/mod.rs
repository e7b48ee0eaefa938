// ABOUTME: Configuration management module for server settings
// ABOUTME: Groups environment-driven configuration for the HTTP server, store, and bulk deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the workout log server
//!
//! All settings come from environment variables; see
//! [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;
