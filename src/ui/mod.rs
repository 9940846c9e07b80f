//! User interface and presentation
//!
//! Presenters format scans, station menus, captain reports and help text.
//! Services decide what happens; presenters only decide how it reads.

pub mod presenters;
