use crate::commands::registry::{Command, CommandSpec, DispatchOutcome};
use crate::commands::CommandContext;
use crate::models::errors::GameResult;
use crate::models::player::Player;
use crate::ui::presenters::{GamePresenter, HelpPresenter};

pub struct HelpCommand {
    spec: CommandSpec,
}

impl Default for HelpCommand {
    fn default() -> Self {
        HelpCommand {
            spec: CommandSpec::new("help", "List commands, or describe one")
                .aliases(&["h", "?"])
                .usage("help [command]"),
        }
    }
}

impl Command for HelpCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        _player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        if args.is_empty() {
            HelpPresenter::show_overview(&ctx.registry.specs(), ctx.output);
            return Ok(DispatchOutcome::Continue);
        }
        match ctx.registry.resolve(args) {
            Some(command) => HelpPresenter::show_command(command.spec(), ctx.output),
            None => ctx
                .output
                .writeln(&format!("No help available for '{}'.", args)),
        }
        Ok(DispatchOutcome::Continue)
    }
}

pub struct CreditsCommand {
    spec: CommandSpec,
}

impl Default for CreditsCommand {
    fn default() -> Self {
        CreditsCommand {
            spec: CommandSpec::new("credits", "About this game").aliases(&["about"]),
        }
    }
}

impl Command for CreditsCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        _player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        GamePresenter::show_credits(ctx.output);
        Ok(DispatchOutcome::Continue)
    }
}

pub struct ReloadCommand {
    spec: CommandSpec,
}

impl Default for ReloadCommand {
    fn default() -> Self {
        ReloadCommand {
            spec: CommandSpec::new("reload", "Rebuild the command table"),
        }
    }
}

impl Command for ReloadCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        _player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        ctx.output.writeln("Reloading commands...");
        ctx.request_reload();
        Ok(DispatchOutcome::Continue)
    }
}

pub struct LogoutCommand {
    spec: CommandSpec,
}

impl Default for LogoutCommand {
    fn default() -> Self {
        LogoutCommand {
            spec: CommandSpec::new("logout", "Save and return to captain selection")
                .aliases(&["signout"]),
        }
    }
}

impl Command for LogoutCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        ctx.output
            .writeln(&format!("Logging out. Fair winds, Captain {}.", player.name));
        Ok(DispatchOutcome::Relogin)
    }
}

pub struct ExitCommand {
    spec: CommandSpec,
}

impl Default for ExitCommand {
    fn default() -> Self {
        ExitCommand {
            spec: CommandSpec::new("exit", "Save and quit the game").aliases(&["quit", "q"]),
        }
    }
}

impl Command for ExitCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        _player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        ctx.output.writeln("Saving and exiting...");
        Ok(DispatchOutcome::Terminate)
    }
}
