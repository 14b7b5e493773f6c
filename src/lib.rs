//! Portfolio showcase
//!
//! A desktop showcase of a developer's projects. The project catalog is
//! embedded at build time, validated once at startup, and browsed through
//! a search/tag/letter filter.

pub mod config;
pub mod error;
pub mod state;
pub mod ui;

pub use ui::Message;
