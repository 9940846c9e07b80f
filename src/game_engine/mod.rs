//! Game state machine
//!
//! Runs one turn at a time for a logged-in captain: death gate, station or
//! surface interception, command dispatch, then a save. The engine owns the
//! world cache, the command registry, the save store and the RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::commands::registry::split_command;
use crate::commands::{CommandRegistry, DispatchOutcome, PlaytimeClock, Session};
use crate::config::GameConfig;
use crate::io::{InputReader, OutputWriter};
use crate::models::player::{Location, Player};
use crate::models::warp::WarpGraph;
use crate::models::world::World;
use crate::persistence::{SaveStore, WorldDataSource};
use crate::services::docking;
use crate::services::station_menu::{self, Interception};
use crate::ui::presenters::GamePresenter;

/// Core game engine that runs turns for one captain at a time
pub struct GameEngine {
    world: World,
    registry: CommandRegistry,
    saves: Box<dyn SaveStore>,
    rng: StdRng,
    config: GameConfig,
    clock: PlaytimeClock,
    state: SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    AwaitingRestart,
    Stopped,
}

impl GameEngine {
    /// Creates an engine with the built-in commands loaded.
    ///
    /// # Arguments
    ///
    /// * `config` - Game configuration; its seed drives surface exploration
    /// * `source` - Where dimension definitions are loaded from
    /// * `saves` - Where captains are persisted
    pub fn new(config: GameConfig, source: Box<dyn WorldDataSource>, saves: Box<dyn SaveStore>) -> Self {
        Self::with_registry(config, source, saves, CommandRegistry::with_builtins())
    }

    /// Creates an engine around an explicitly built registry.
    pub fn with_registry(
        config: GameConfig,
        source: Box<dyn WorldDataSource>,
        saves: Box<dyn SaveStore>,
        registry: CommandRegistry,
    ) -> Self {
        let world = World::new(source, WarpGraph::new(config.warp_paths.clone()));
        Self {
            world,
            registry,
            saves,
            rng: StdRng::seed_from_u64(config.seed),
            clock: PlaytimeClock::start(),
            state: SessionState::Stopped,
            config,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn saves(&self) -> &dyn SaveStore {
        self.saves.as_ref()
    }

    pub fn saves_mut(&mut self) -> &mut dyn SaveStore {
        self.saves.as_mut()
    }

    /// Start playing as `player`.
    pub fn begin_session(&mut self, player: &Player) {
        self.clock = PlaytimeClock::start();
        self.state = if player.is_dead {
            SessionState::AwaitingRestart
        } else {
            SessionState::Running
        };
        info!(player = %player.name, id = %player.id, "session started");
    }

    /// Add the session's playtime and save. Leaves the engine stopped.
    pub fn end_session(&mut self, player: &mut Player, output: &mut dyn OutputWriter) {
        self.clock.flush(player);
        self.persist(player, output);
        self.state = SessionState::Stopped;
        info!(player = %player.name, playtime = player.playtime, "session ended");
    }

    /// Process one line of input for `player`.
    pub fn process_turn(
        &mut self,
        player: &mut Player,
        raw_input: &str,
        input: &mut dyn InputReader,
        output: &mut dyn OutputWriter,
    ) -> DispatchOutcome {
        if player.is_dead {
            self.state = SessionState::AwaitingRestart;
            let token = split_command(raw_input).map(|(token, _)| token);
            if token.as_deref() != Some("restart") {
                GamePresenter::show_death(output);
                return DispatchOutcome::Continue;
            }
        }

        let outcome = {
            let mut session = Session {
                world: &mut self.world,
                saves: self.saves.as_mut(),
                input: &mut *input,
                output: &mut *output,
                rng: &mut self.rng,
                config: &self.config,
                clock: &mut self.clock,
            };

            let intercepted = if player.is_dead {
                Interception::PassThrough
            } else if player.is_docked() {
                station_menu::handle_docked(player, raw_input, &mut session)
            } else if player.is_landed() {
                station_menu::handle_landed(player, raw_input, &mut session)
            } else {
                Interception::PassThrough
            };

            match intercepted {
                Interception::Handled => DispatchOutcome::Continue,
                Interception::PassThrough => self.registry.dispatch(player, raw_input, &mut session),
            }
        };

        self.state = match outcome {
            DispatchOutcome::Continue if player.is_dead => SessionState::AwaitingRestart,
            DispatchOutcome::Continue => SessionState::Running,
            DispatchOutcome::Terminate | DispatchOutcome::Relogin => SessionState::Stopped,
        };
        if outcome != DispatchOutcome::Continue {
            self.clock.flush(player);
        }
        self.persist(player, output);
        outcome
    }

    /// Save the player. Failures are logged and reported, never fatal.
    pub fn persist(&mut self, player: &Player, output: &mut dyn OutputWriter) -> bool {
        match self.saves.save(player) {
            Ok(()) => true,
            Err(err) => {
                error!(player = %player.name, %err, "failed to save game");
                output.writeln(&format!("Warning: failed to save game: {}", err));
                false
            }
        }
    }

    /// Prompt line, e.g. `[A01:10,10] Vega > ` or `[ISS] Vega > `.
    pub fn prompt(&mut self, player: &Player) -> String {
        if player.is_dead {
            return format!("[DECEASED] {} > ", player.name);
        }
        match &player.location {
            Location::InSpace => format!(
                "[{}:{},{}] {} > ",
                player.dimension, player.position.x, player.position.y, player.name
            ),
            Location::Docked { station_id } => {
                let name = self
                    .world
                    .dimension(&player.dimension)
                    .ok()
                    .and_then(|d| d.station(station_id))
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| station_id.clone());
                format!("[{}] {} > ", name, player.name)
            }
            Location::Landed { site, .. } => format!("[{}] {} > ", site, player.name),
        }
    }

    /// Location text for banners and reports.
    pub fn describe_location(&mut self, player: &Player) -> String {
        docking::describe_location(player, &mut self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StartConfig;
    use crate::io::test_utils::{MockInput, MockOutput};
    use crate::models::position::Coordinates;
    use crate::persistence::{JsonWorldSource, MemorySaveStore};

    fn space_config() -> GameConfig {
        GameConfig {
            start: StartConfig {
                dimension: "A01".to_string(),
                x: 0,
                y: 0,
                landed: None,
            },
            ..GameConfig::default()
        }
    }

    fn engine() -> GameEngine {
        GameEngine::new(
            space_config(),
            Box::new(JsonWorldSource::builtin()),
            Box::new(MemorySaveStore::new()),
        )
    }

    fn turn(engine: &mut GameEngine, player: &mut Player, line: &str) -> (DispatchOutcome, MockOutput) {
        let mut input = MockInput::new(vec![]);
        let mut output = MockOutput::new();
        let outcome = engine.process_turn(player, line, &mut input, &mut output);
        (outcome, output)
    }

    #[test]
    fn every_turn_is_saved() {
        let mut engine = engine();
        let mut player = Player::new("Saver", &engine.config().start.clone());
        engine.begin_session(&player);
        turn(&mut engine, &mut player, "move 5 5");
        let saved = engine.saves().load_by_id(player.id).unwrap().unwrap();
        assert_eq!(saved.position, Coordinates::new(5, 5));
    }

    #[test]
    fn dead_player_only_restarts() {
        let mut engine = engine();
        let mut player = Player::new("Ghost", &engine.config().start.clone());
        player.kill();
        engine.begin_session(&player);
        assert_eq!(engine.state(), SessionState::AwaitingRestart);

        let (outcome, output) = turn(&mut engine, &mut player, "move 1 1");
        assert_eq!(outcome, DispatchOutcome::Continue);
        assert!(output.contains("deceased"));
        assert_eq!(player.position, Coordinates::new(0, 0));

        turn(&mut engine, &mut player, "RESTART");
        assert!(!player.is_dead);
        assert_eq!(engine.state(), SessionState::Running);
    }

    #[test]
    fn dead_player_cannot_exit_through_commands() {
        let mut engine = engine();
        let mut player = Player::new("Ghost", &engine.config().start.clone());
        player.kill();
        let (outcome, _) = turn(&mut engine, &mut player, "exit");
        assert_eq!(outcome, DispatchOutcome::Continue);
    }

    #[test]
    fn self_destruct_moves_to_awaiting_restart() {
        let mut engine = engine();
        let mut player = Player::new("Brave", &engine.config().start.clone());
        engine.begin_session(&player);
        let mut input = MockInput::new(vec!["CONFIRM"]);
        let mut output = MockOutput::new();
        engine.process_turn(&mut player, "sd", &mut input, &mut output);
        assert!(player.is_dead);
        assert_eq!(engine.state(), SessionState::AwaitingRestart);
    }

    #[test]
    fn self_destruct_needs_exact_confirmation() {
        let mut engine = engine();
        let mut player = Player::new("Careful", &engine.config().start.clone());
        let mut input = MockInput::new(vec!["confirm"]);
        let mut output = MockOutput::new();
        engine.process_turn(&mut player, "self-destruct", &mut input, &mut output);
        assert!(!player.is_dead);
        assert!(output.contains("aborted"));
    }

    #[test]
    fn exit_and_logout_stop_the_session() {
        let mut engine = engine();
        let mut player = Player::new("Leaver", &engine.config().start.clone());
        engine.begin_session(&player);
        assert_eq!(turn(&mut engine, &mut player, "quit").0, DispatchOutcome::Terminate);
        assert_eq!(engine.state(), SessionState::Stopped);
        engine.begin_session(&player);
        assert_eq!(turn(&mut engine, &mut player, "signout").0, DispatchOutcome::Relogin);
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let mut store = MemorySaveStore::new();
        store.fail_saves(true);
        let mut engine = GameEngine::new(
            space_config(),
            Box::new(JsonWorldSource::builtin()),
            Box::new(store),
        );
        let mut player = Player::new("Unlucky", &engine.config().start.clone());
        let (outcome, output) = turn(&mut engine, &mut player, "move 3 3");
        assert_eq!(outcome, DispatchOutcome::Continue);
        assert!(output.contains("failed to save"));
        assert_eq!(player.position, Coordinates::new(3, 3));
    }

    #[test]
    fn prompt_reflects_location() {
        let mut engine = engine();
        let mut player = Player::new("Vega", &engine.config().start.clone());
        assert_eq!(engine.prompt(&player), "[A01:0,0] Vega > ");
        player.location = Location::Docked {
            station_id: "a01_earth_iss".to_string(),
        };
        assert_eq!(engine.prompt(&player), "[ISS] Vega > ");
    }

    #[test]
    fn reload_keeps_the_catalog() {
        let mut engine = engine();
        let mut player = Player::new("Tinker", &engine.config().start.clone());
        let before = engine.registry().len();
        let (_, output) = turn(&mut engine, &mut player, "reload");
        assert_eq!(engine.registry().len(), before);
        assert!(output.contains(&format!("Reloaded {} commands.", before)));
    }

    #[test]
    fn docked_players_reach_the_station_menu_first() {
        let mut engine = engine();
        let mut player = Player::new("Trader", &engine.config().start.clone());
        player.position = Coordinates::new(61, -59);
        turn(&mut engine, &mut player, "dock");
        assert!(player.is_docked());
        let (_, output) = turn(&mut engine, &mut player, "trade");
        assert!(output.contains("traders of ISS"));
        turn(&mut engine, &mut player, "launch");
        assert!(player.in_space());
    }
}
