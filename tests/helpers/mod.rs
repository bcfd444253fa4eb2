//! Test helpers module
//!
//! This module provides utilities and helpers for testing the SignMeUp crate.
//! It includes a mock API server, database helpers, and test data builders.

#![allow(dead_code)]

pub mod api_mock;
pub mod database_helper;
pub mod test_data;

pub use api_mock::*;
pub use database_helper::*;
pub use test_data::*;
