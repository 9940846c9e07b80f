use tracing::info;

use crate::commands::registry::{Command, CommandSpec, DispatchOutcome, Requirement};
use crate::commands::CommandContext;
use crate::models::constants::SELF_DESTRUCT_CONFIRMATION;
use crate::models::errors::{GameError, GameResult};
use crate::models::player::Player;
use crate::services::docking;
use crate::ui::presenters::PlayerPresenter;

pub struct PlayerInfoCommand {
    spec: CommandSpec,
}

impl Default for PlayerInfoCommand {
    fn default() -> Self {
        PlayerInfoCommand {
            spec: CommandSpec::new("playerinfo", "Show your captain's record, or another's")
                .aliases(&["pi", "stats"])
                .usage("playerinfo [name]"),
        }
    }
}

impl Command for PlayerInfoCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        if args.is_empty() || args.eq_ignore_ascii_case(&player.name) {
            ctx.clock.flush(player);
            let location = docking::describe_location(player, ctx.world);
            PlayerPresenter::show_info(player, &location, &*ctx.saves, ctx.output);
            return Ok(DispatchOutcome::Continue);
        }

        let other = ctx
            .saves
            .load(args)?
            .ok_or_else(|| GameError::UnknownCaptain(args.to_string()))?;
        PlayerPresenter::show_public(&other, &*ctx.saves, ctx.output);
        Ok(DispatchOutcome::Continue)
    }
}

pub struct DiscoveriesCommand {
    spec: CommandSpec,
}

impl Default for DiscoveriesCommand {
    fn default() -> Self {
        DiscoveriesCommand {
            spec: CommandSpec::new("discoveries", "List catalogued dimensions and bodies")
                .aliases(&["disc", "found", "log"]),
        }
    }
}

impl Command for DiscoveriesCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        PlayerPresenter::show_discoveries(player, ctx.output);
        Ok(DispatchOutcome::Continue)
    }
}

pub struct ChangeNameCommand {
    spec: CommandSpec,
}

impl Default for ChangeNameCommand {
    fn default() -> Self {
        ChangeNameCommand {
            spec: CommandSpec::new("changename", "Change your captain's name")
                .aliases(&["rename"])
                .usage("changename <new name>")
                .requires(&[Requirement::NotDead]),
        }
    }
}

impl Command for ChangeNameCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        if args.is_empty() {
            return Err(GameError::InvalidInput(
                "Please specify a new name. Usage: changename <new name>".to_string(),
            ));
        }
        let old_name = player.name.clone();
        ctx.saves.change_name(player, args)?;
        info!(from = %old_name, to = %player.name, id = %player.id, "captain renamed");
        ctx.output.writeln(&format!(
            "Name changed from {} to {}. Your UUID remains {}.",
            old_name, player.name, player.id
        ));
        Ok(DispatchOutcome::Continue)
    }
}

pub struct SelfDestructCommand {
    spec: CommandSpec,
}

impl Default for SelfDestructCommand {
    fn default() -> Self {
        SelfDestructCommand {
            spec: CommandSpec::new("self-destruct", "Destroy your ship (asks for confirmation)")
                .aliases(&["selfdestruct", "sd"])
                .requires(&[Requirement::NotDead]),
        }
    }
}

impl Command for SelfDestructCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        ctx.output.writeln("WARNING: this will destroy your ship and end your career.");
        let answer = ctx
            .input
            .read_line(&format!("Type {} to proceed: ", SELF_DESTRUCT_CONFIRMATION))
            .unwrap_or_default();
        if answer.trim() != SELF_DESTRUCT_CONFIRMATION {
            ctx.output.writeln("Self-destruct sequence aborted.");
            return Ok(DispatchOutcome::Continue);
        }

        player.kill();
        info!(player = %player.name, "self-destruct");
        ctx.output.writeln("Self-destruct sequence complete. Your ship is lost.");
        ctx.output.writeln("Type 'restart' to begin again.");
        Ok(DispatchOutcome::Continue)
    }
}

pub struct RestartCommand {
    spec: CommandSpec,
}

impl Default for RestartCommand {
    fn default() -> Self {
        RestartCommand {
            spec: CommandSpec::new("restart", "Begin again after your ship was destroyed"),
        }
    }
}

impl Command for RestartCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        if !player.is_dead {
            ctx.output
                .writeln("Restart is only available after your ship has been destroyed.");
            return Ok(DispatchOutcome::Continue);
        }
        player.reset_progress(&ctx.config.start);
        info!(player = %player.name, "restarted");
        ctx.output.writeln(&format!(
            "A new ship awaits, Captain {}. You are in {} at {}.",
            player.name, player.dimension, player.position
        ));
        Ok(DispatchOutcome::Continue)
    }
}
