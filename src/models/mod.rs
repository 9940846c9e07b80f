//! Domain models
//!
//! This module contains all domain models representing game entities
//! and concepts. Models are pure data structures with minimal logic.

pub mod constants;
pub mod position;
pub mod errors;
pub mod station;
pub mod dimension;
pub mod warp;
pub mod player;
pub mod world;
