//! This module defines the core data structures and types used across the hotel indexer.

pub mod geo;
pub mod hotel;
pub mod job;
pub mod location;
pub mod query;
