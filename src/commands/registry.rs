//! Command registry and dispatcher
//!
//! Commands are bound by canonical name and by alias. Canonical names win
//! over aliases during resolution. An alias already bound to a different
//! command is refused and recorded as a conflict; the earlier binding stays.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::{error, info, warn};

use super::context::{CommandContext, Session};
use super::definitions::builtin_commands;
use crate::models::errors::{GameError, GameResult};
use crate::models::player::Player;

/// Result of dispatching one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    Terminate,
    Relogin,
}

/// Precondition tag checked before a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Requirement {
    NotDocked,
    NotLanded,
    NotDead,
    DockedOrLanded,
}

impl Requirement {
    pub fn tag(&self) -> &'static str {
        match self {
            Requirement::NotDocked => "not_docked",
            Requirement::NotLanded => "not_landed",
            Requirement::NotDead => "not_dead",
            Requirement::DockedOrLanded => "docked_or_landed",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Requirement::NotDocked => "Cannot execute while docked at a station",
            Requirement::NotLanded => "Cannot execute while on planetary surface",
            Requirement::NotDead => "You are deceased. Game over.",
            Requirement::DockedOrLanded => "This command can only be used while docked or landed",
        }
    }

    pub fn is_met(&self, player: &Player) -> bool {
        match self {
            Requirement::NotDocked => !player.is_docked(),
            Requirement::NotLanded => !player.is_landed(),
            Requirement::NotDead => !player.is_dead,
            Requirement::DockedOrLanded => player.is_docked() || player.is_landed(),
        }
    }
}

/// Static description of a command: names, help text and preconditions.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub usage: Option<String>,
    pub requirements: Vec<Requirement>,
    pub messages: BTreeMap<Requirement, String>,
}

impl CommandSpec {
    pub fn new(name: &str, description: &str) -> Self {
        CommandSpec {
            name: name.to_lowercase(),
            aliases: Vec::new(),
            description: description.to_string(),
            usage: None,
            requirements: Vec::new(),
            messages: BTreeMap::new(),
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_lowercase()).collect();
        self
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Requirements are checked in the order given.
    pub fn requires(mut self, requirements: &[Requirement]) -> Self {
        self.requirements = requirements.to_vec();
        self
    }

    pub fn message(mut self, requirement: Requirement, message: &str) -> Self {
        self.messages.insert(requirement, message.to_string());
        self
    }

    /// First unmet requirement, rendered as its message.
    pub fn check(&self, player: &Player) -> Result<(), String> {
        match self.requirements.iter().find(|r| !r.is_met(player)) {
            Some(req) => Err(self
                .messages
                .get(req)
                .cloned()
                .unwrap_or_else(|| req.default_message().to_string())),
            None => Ok(()),
        }
    }
}

/// A player command.
pub trait Command {
    fn spec(&self) -> &CommandSpec;

    /// Run the command. Context requirements have already been checked.
    fn execute(
        &self,
        player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome>;

    fn name(&self) -> &str {
        &self.spec().name
    }

    fn aliases(&self) -> &[String] {
        &self.spec().aliases
    }
}

/// An alias that could not be bound because another command holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub alias: String,
    pub bound_to: String,
    pub rejected: String,
}

impl fmt::Display for AliasConflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "alias '{}' of '{}' is already bound to '{}'",
            self.alias, self.rejected, self.bound_to
        )
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Rc<dyn Command>>,
    aliases: HashMap<String, String>,
    conflicts: Vec<AliasConflict>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in command loaded.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.load_all();
        registry
    }

    pub fn register(&mut self, command: Rc<dyn Command>) {
        let name = command.name().to_lowercase();
        for alias in command.aliases() {
            let alias = alias.to_lowercase();
            let holder = self
                .aliases
                .get(&alias)
                .cloned()
                .or_else(|| (alias != name && self.commands.contains_key(&alias)).then(|| alias.clone()));
            match holder {
                Some(existing) if existing != name => {
                    let conflict = AliasConflict {
                        alias,
                        bound_to: existing,
                        rejected: name.clone(),
                    };
                    warn!(%conflict, "alias conflict");
                    self.conflicts.push(conflict);
                }
                Some(_) => {}
                None => {
                    self.aliases.insert(alias, name.clone());
                }
            }
        }
        self.commands.insert(name, command);
    }

    /// Canonical name first, then alias.
    pub fn resolve(&self, token: &str) -> Option<Rc<dyn Command>> {
        let token = token.to_lowercase();
        self.commands
            .get(&token)
            .or_else(|| self.aliases.get(&token).and_then(|n| self.commands.get(n)))
            .cloned()
    }

    /// Register the built-in catalog. Returns how many commands it holds.
    pub fn load_all(&mut self) -> usize {
        let catalog = builtin_commands();
        let count = catalog.len();
        for command in catalog {
            self.register(command);
        }
        info!(count, "commands loaded");
        count
    }

    /// Clear every table and load the catalog again.
    pub fn reload(&mut self) -> usize {
        self.commands.clear();
        self.aliases.clear();
        self.conflicts.clear();
        self.load_all()
    }

    pub fn conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Which canonical name an alias is bound to.
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(&alias.to_lowercase()).map(String::as_str)
    }

    /// Specs of every command, sorted by name.
    pub fn specs(&self) -> Vec<&CommandSpec> {
        let mut specs: Vec<&CommandSpec> = self.commands.values().map(|c| c.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Resolve and run one line of input.
    pub fn dispatch(
        &mut self,
        player: &mut Player,
        raw_input: &str,
        session: &mut Session<'_>,
    ) -> DispatchOutcome {
        let Some((token, args)) = split_command(raw_input) else {
            return DispatchOutcome::Continue;
        };

        let Some(command) = self.resolve(&token) else {
            session.output.writeln(&format!(
                "Unknown command: '{}'. Type 'help' for a list of commands.",
                token
            ));
            return DispatchOutcome::Continue;
        };

        if let Err(message) = command.spec().check(player) {
            session.output.writeln(&message);
            return DispatchOutcome::Continue;
        }

        let (result, reload) = {
            let mut ctx = CommandContext::new(session, self);
            let result = command.execute(player, args, &mut ctx);
            (result, ctx.reload_requested())
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                report_error(&err, session);
                DispatchOutcome::Continue
            }
        };

        if reload {
            let count = self.reload();
            session
                .output
                .writeln(&format!("Reloaded {} commands.", count));
        }
        outcome
    }
}

/// Lower-cased command token and the untouched remainder.
pub fn split_command(raw_input: &str) -> Option<(String, &str)> {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (token, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (trimmed, ""),
    };
    Some((token.to_lowercase(), rest))
}

fn report_error(err: &GameError, session: &mut Session<'_>) {
    match err {
        GameError::Io(_) | GameError::Save(_) | GameError::Serialization(_) => {
            error!(%err, "command failed");
            session.output.writeln(&format!("Error: {}", err));
        }
        _ => session.output.writeln(&err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, StartConfig};
    use crate::io::test_utils::{MockInput, MockOutput};
    use crate::models::player::Location;
    use crate::models::warp::WarpGraph;
    use crate::models::world::World;
    use crate::persistence::{JsonWorldSource, MemorySaveStore};
    use super::super::context::PlaytimeClock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    struct Recorder {
        spec: CommandSpec,
        runs: Rc<Cell<u32>>,
    }

    impl Recorder {
        fn new(name: &str, aliases: &[&str], runs: Rc<Cell<u32>>) -> Self {
            Recorder {
                spec: CommandSpec::new(name, "test recorder")
                    .aliases(aliases)
                    .requires(&[Requirement::NotDocked, Requirement::NotDead])
                    .message(Requirement::NotDocked, "Recorder cannot run while docked"),
                runs,
            }
        }
    }

    impl Command for Recorder {
        fn spec(&self) -> &CommandSpec {
            &self.spec
        }

        fn execute(
            &self,
            _player: &mut Player,
            args: &str,
            ctx: &mut CommandContext<'_>,
        ) -> GameResult<DispatchOutcome> {
            self.runs.set(self.runs.get() + 1);
            if args == "fail" {
                return Err(GameError::InvalidInput("recorder failed".to_string()));
            }
            ctx.output.writeln(&format!("recorder args={}", args));
            Ok(DispatchOutcome::Continue)
        }
    }

    struct Fixture {
        world: World,
        saves: MemorySaveStore,
        input: MockInput,
        output: MockOutput,
        rng: StdRng,
        config: GameConfig,
        clock: PlaytimeClock,
    }

    impl Fixture {
        fn new() -> Self {
            let config = GameConfig::default();
            Fixture {
                world: World::new(
                    Box::new(JsonWorldSource::builtin()),
                    WarpGraph::new(config.warp_paths.clone()),
                ),
                saves: MemorySaveStore::new(),
                input: MockInput::new(vec![]),
                output: MockOutput::new(),
                rng: StdRng::seed_from_u64(1),
                config,
                clock: PlaytimeClock::start(),
            }
        }

        fn dispatch(&mut self, registry: &mut CommandRegistry, player: &mut Player, line: &str) -> DispatchOutcome {
            let mut session = Session {
                world: &mut self.world,
                saves: &mut self.saves,
                input: &mut self.input,
                output: &mut self.output,
                rng: &mut self.rng,
                config: &self.config,
                clock: &mut self.clock,
            };
            registry.dispatch(player, line, &mut session)
        }
    }

    fn player() -> Player {
        Player::new(
            "Tester",
            &StartConfig {
                dimension: "A01".to_string(),
                x: 0,
                y: 0,
                landed: None,
            },
        )
    }

    #[test]
    fn split_lowercases_token_and_keeps_argument_case() {
        assert_eq!(split_command("  MoVe 10 -3 "), Some(("move".to_string(), "10 -3")));
        assert_eq!(split_command("changename NewName"), Some(("changename".to_string(), "NewName")));
        assert_eq!(split_command("help"), Some(("help".to_string(), "")));
        assert_eq!(split_command("   "), None);
    }

    #[test]
    fn first_alias_binding_wins() {
        let runs = Rc::new(Cell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register(Rc::new(Recorder::new("alpha", &["x"], runs.clone())));
        registry.register(Rc::new(Recorder::new("beta", &["x"], runs)));

        assert_eq!(registry.alias_target("x"), Some("alpha"));
        assert_eq!(registry.conflicts().len(), 1);
        assert_eq!(registry.conflicts()[0].rejected, "beta");
        assert!(registry.resolve("beta").is_some());
    }

    #[test]
    fn rebinding_alias_to_same_command_is_quiet() {
        let runs = Rc::new(Cell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register(Rc::new(Recorder::new("alpha", &["a"], runs.clone())));
        registry.register(Rc::new(Recorder::new("alpha", &["a"], runs)));
        assert!(registry.conflicts().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn canonical_name_beats_alias() {
        let runs = Rc::new(Cell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register(Rc::new(Recorder::new("alpha", &[], runs.clone())));
        registry.register(Rc::new(Recorder::new("beta", &["alpha"], runs)));
        assert_eq!(registry.resolve("ALPHA").unwrap().name(), "alpha");
        assert_eq!(registry.conflicts().len(), 1);
    }

    #[test]
    fn load_all_is_idempotent() {
        let mut registry = CommandRegistry::new();
        let first = registry.load_all();
        let bound = registry.len();
        let second = registry.load_all();
        assert_eq!(first, second);
        assert_eq!(registry.len(), bound);
        assert!(registry.conflicts().is_empty());
        assert_eq!(registry.reload(), first);
    }

    #[test]
    fn builtin_aliases_resolve() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(registry.resolve("goto").unwrap().name(), "move");
        assert_eq!(registry.resolve("?").unwrap().name(), "help");
        assert_eq!(registry.resolve("q").unwrap().name(), "exit");
        assert!(registry.resolve("teleport").is_none());
    }

    #[test]
    fn unmet_requirement_uses_custom_message_and_skips_handler() {
        let runs = Rc::new(Cell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register(Rc::new(Recorder::new("recorder", &[], runs.clone())));
        let mut fx = Fixture::new();
        let mut p = player();
        p.location = Location::Docked {
            station_id: "a01_earth_iss".to_string(),
        };
        let before = p.clone();

        let outcome = fx.dispatch(&mut registry, &mut p, "recorder go");
        assert_eq!(outcome, DispatchOutcome::Continue);
        assert_eq!(runs.get(), 0);
        assert_eq!(p, before);
        assert!(fx.output.contains("Recorder cannot run while docked"));
    }

    #[test]
    fn default_message_is_used_without_override() {
        let runs = Rc::new(Cell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register(Rc::new(Recorder::new("recorder", &[], runs.clone())));
        let mut fx = Fixture::new();
        let mut p = player();
        p.kill();

        fx.dispatch(&mut registry, &mut p, "recorder");
        assert_eq!(runs.get(), 0);
        assert!(fx.output.contains("You are deceased. Game over."));
    }

    #[test]
    fn handler_errors_are_reported_and_continue() {
        let runs = Rc::new(Cell::new(0));
        let mut registry = CommandRegistry::new();
        registry.register(Rc::new(Recorder::new("recorder", &["p"], runs.clone())));
        let mut fx = Fixture::new();
        let mut p = player();

        assert_eq!(fx.dispatch(&mut registry, &mut p, "P fail"), DispatchOutcome::Continue);
        assert_eq!(runs.get(), 1);
        assert!(fx.output.contains("recorder failed"));
    }

    #[test]
    fn unknown_and_empty_input() {
        let mut registry = CommandRegistry::with_builtins();
        let mut fx = Fixture::new();
        let mut p = player();

        assert_eq!(fx.dispatch(&mut registry, &mut p, ""), DispatchOutcome::Continue);
        assert!(fx.output.messages.is_empty());
        assert_eq!(fx.dispatch(&mut registry, &mut p, "warpspeed"), DispatchOutcome::Continue);
        assert!(fx.output.contains("Unknown command: 'warpspeed'"));
    }
}
