//! Game services
//!
//! This module contains business logic for game operations including
//! travel, docking, scanning, station menus and the interactive session.

pub mod docking;
pub mod game;
pub mod scan;
pub mod station_menu;
pub mod travel;
