use crate::commands::registry::{Command, CommandSpec, DispatchOutcome, Requirement};
use crate::commands::CommandContext;
use crate::models::errors::GameResult;
use crate::models::player::Player;
use crate::services::docking;

pub struct DockCommand {
    spec: CommandSpec,
}

impl Default for DockCommand {
    fn default() -> Self {
        DockCommand {
            spec: CommandSpec::new("dock", "Dock with a station at your coordinates")
                .aliases(&["board"])
                .requires(&[
                    Requirement::NotDocked,
                    Requirement::NotLanded,
                    Requirement::NotDead,
                ])
                .message(Requirement::NotDocked, "You are already docked.")
                .message(
                    Requirement::NotLanded,
                    "Cannot dock while on a planetary surface. Use 'launch' first.",
                ),
        }
    }
}

impl Command for DockCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        docking::dock(player, ctx.world, ctx.output)?;
        Ok(DispatchOutcome::Continue)
    }
}

pub struct LandCommand {
    spec: CommandSpec,
}

impl Default for LandCommand {
    fn default() -> Self {
        LandCommand {
            spec: CommandSpec::new("land", "Land at a city on the body below you")
                .aliases(&["touchdown"])
                .requires(&[
                    Requirement::NotDocked,
                    Requirement::NotLanded,
                    Requirement::NotDead,
                ])
                .message(
                    Requirement::NotDocked,
                    "Cannot land while docked. Use 'launch' first.",
                )
                .message(Requirement::NotLanded, "You have already landed."),
        }
    }
}

impl Command for LandCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        docking::land(player, ctx.world, ctx.output)?;
        Ok(DispatchOutcome::Continue)
    }
}

pub struct LaunchCommand {
    spec: CommandSpec,
}

impl Default for LaunchCommand {
    fn default() -> Self {
        LaunchCommand {
            spec: CommandSpec::new("launch", "Leave a station or surface for open space")
                .aliases(&["undock", "takeoff"])
                .requires(&[Requirement::NotDead]),
        }
    }
}

impl Command for LaunchCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        docking::launch(player, ctx.world, ctx.output);
        Ok(DispatchOutcome::Continue)
    }
}
