use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

use super::registry::CommandRegistry;
use crate::config::GameConfig;
use crate::io::{InputReader, OutputWriter};
use crate::models::player::Player;
use crate::models::world::World;
use crate::persistence::SaveStore;

/// Wall-clock time spent in the current login session.
#[derive(Debug, Clone, Copy)]
pub struct PlaytimeClock {
    started: DateTime<Utc>,
}

impl Default for PlaytimeClock {
    fn default() -> Self {
        Self::start()
    }
}

impl PlaytimeClock {
    pub fn start() -> Self {
        PlaytimeClock { started: Utc::now() }
    }

    pub fn started_at(started: DateTime<Utc>) -> Self {
        PlaytimeClock { started }
    }

    /// Move the time elapsed since the last flush onto the player's total.
    pub fn flush(&mut self, player: &mut Player) -> u64 {
        let now = Utc::now();
        let elapsed = (now - self.started).num_seconds().max(0) as u64;
        player.playtime += elapsed;
        self.started = now;
        elapsed
    }
}

/// Collaborators a turn works with. Built by the engine for every turn.
pub struct Session<'a> {
    pub world: &'a mut World,
    pub saves: &'a mut dyn SaveStore,
    pub input: &'a mut dyn InputReader,
    pub output: &'a mut dyn OutputWriter,
    pub rng: &'a mut StdRng,
    pub config: &'a GameConfig,
    pub clock: &'a mut PlaytimeClock,
}

/// What a command handler can reach while it executes.
pub struct CommandContext<'a> {
    pub world: &'a mut World,
    pub saves: &'a mut dyn SaveStore,
    pub input: &'a mut dyn InputReader,
    pub output: &'a mut dyn OutputWriter,
    pub rng: &'a mut StdRng,
    pub config: &'a GameConfig,
    pub clock: &'a mut PlaytimeClock,
    /// The registry that dispatched this command.
    pub registry: &'a CommandRegistry,
    reload_requested: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(session: &'a mut Session<'_>, registry: &'a CommandRegistry) -> Self {
        CommandContext {
            world: &mut *session.world,
            saves: &mut *session.saves,
            input: &mut *session.input,
            output: &mut *session.output,
            rng: &mut *session.rng,
            config: session.config,
            clock: &mut *session.clock,
            registry,
            reload_requested: false,
        }
    }

    /// Ask the dispatcher to rebuild the registry once this command returns.
    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }
}
