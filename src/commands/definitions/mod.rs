//! Built-in commands
//!
//! `builtin_commands` is the static catalog the registry loads from. Adding
//! a command means adding its constructor here.

mod docking;
mod player;
mod scan;
mod system;
mod travel;

use std::rc::Rc;

use super::registry::Command;

pub use docking::{DockCommand, LandCommand, LaunchCommand};
pub use player::{
    ChangeNameCommand, DiscoveriesCommand, PlayerInfoCommand, RestartCommand, SelfDestructCommand,
};
pub use scan::{ScanCommand, ScanCoordsCommand};
pub use system::{CreditsCommand, ExitCommand, HelpCommand, LogoutCommand, ReloadCommand};
pub use travel::{DimensionsCommand, JumpCommand, MoveCommand, WhereAmICommand};

/// One handler per built-in command.
pub fn builtin_commands() -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(MoveCommand::default()),
        Rc::new(JumpCommand::default()),
        Rc::new(DimensionsCommand::default()),
        Rc::new(WhereAmICommand::default()),
        Rc::new(DockCommand::default()),
        Rc::new(LandCommand::default()),
        Rc::new(LaunchCommand::default()),
        Rc::new(ScanCommand::default()),
        Rc::new(ScanCoordsCommand::default()),
        Rc::new(PlayerInfoCommand::default()),
        Rc::new(DiscoveriesCommand::default()),
        Rc::new(ChangeNameCommand::default()),
        Rc::new(SelfDestructCommand::default()),
        Rc::new(RestartCommand::default()),
        Rc::new(HelpCommand::default()),
        Rc::new(CreditsCommand::default()),
        Rc::new(ReloadCommand::default()),
        Rc::new(LogoutCommand::default()),
        Rc::new(ExitCommand::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for command in builtin_commands() {
            assert!(seen.insert(command.name().to_string()), "duplicate {}", command.name());
            for alias in command.aliases() {
                assert!(seen.insert(alias.clone()), "duplicate alias {}", alias);
            }
        }
    }

    #[test]
    fn names_are_lower_case() {
        for command in builtin_commands() {
            assert_eq!(command.name(), command.name().to_lowercase());
        }
    }
}
