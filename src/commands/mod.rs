//! Player command language
//!
//! The registry resolves the first token of a line to a [`Command`],
//! checks its context requirements and runs it.

pub mod context;
pub mod definitions;
pub mod registry;

pub use context::{CommandContext, PlaytimeClock, Session};
pub use registry::{
    AliasConflict, Command, CommandRegistry, CommandSpec, DispatchOutcome, Requirement,
};
