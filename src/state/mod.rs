//! State management module
//!
//! This module handles all application state, including:
//! - Shared data structures (data.rs)
//! - Embedded catalog loading and validation (catalog.rs)
//! - The tag index and letter buckets (index.rs)
//! - Search, tag and letter filtering (filter.rs)
//! - Persisted preferences (preferences.rs)

pub mod catalog;
pub mod data;
pub mod filter;
pub mod index;
pub mod preferences;
