use crate::commands::registry::{Command, CommandSpec, DispatchOutcome, Requirement};
use crate::commands::CommandContext;
use crate::models::errors::GameResult;
use crate::models::player::Player;
use crate::services::{docking, travel};
use crate::ui::presenters::LocationPresenter;

const IN_SPACE_ALIVE: [Requirement; 3] = [
    Requirement::NotDocked,
    Requirement::NotLanded,
    Requirement::NotDead,
];

pub struct MoveCommand {
    spec: CommandSpec,
}

impl Default for MoveCommand {
    fn default() -> Self {
        MoveCommand {
            spec: CommandSpec::new("move", "Navigate to coordinates in the current system")
                .aliases(&["goto", "nav"])
                .usage("move <x> <y>")
                .requires(&IN_SPACE_ALIVE)
                .message(
                    Requirement::NotDocked,
                    "Cannot navigate while docked. Use 'launch' first.",
                )
                .message(
                    Requirement::NotLanded,
                    "Cannot navigate while on a planetary surface. Use 'launch' first.",
                ),
        }
    }
}

impl Command for MoveCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        let target = travel::parse_coordinates(args, "move <x> <y>")?;
        travel::move_player(player, target, ctx.world, ctx.output)?;
        Ok(DispatchOutcome::Continue)
    }
}

pub struct JumpCommand {
    spec: CommandSpec,
}

impl Default for JumpCommand {
    fn default() -> Self {
        JumpCommand {
            spec: CommandSpec::new("jump", "Warp to another dimension")
                .aliases(&["warp"])
                .usage("jump <dimension code>")
                .requires(&IN_SPACE_ALIVE)
                .message(
                    Requirement::NotDocked,
                    "Cannot initiate a warp jump while docked. Use 'launch' first.",
                )
                .message(
                    Requirement::NotLanded,
                    "Cannot initiate a warp jump from a planetary surface. Use 'launch' first.",
                ),
        }
    }
}

impl Command for JumpCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        travel::jump(player, args, ctx.world, ctx.config.arrival, ctx.output)?;
        Ok(DispatchOutcome::Continue)
    }
}

pub struct DimensionsCommand {
    spec: CommandSpec,
}

impl Default for DimensionsCommand {
    fn default() -> Self {
        DimensionsCommand {
            spec: CommandSpec::new("dimensions", "List warp destinations and known dimensions")
                .aliases(&["dims", "systems"])
                .requires(&[Requirement::NotDead]),
        }
    }
}

impl Command for DimensionsCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        travel::list_dimensions(player, ctx.world, ctx.output)?;
        Ok(DispatchOutcome::Continue)
    }
}

pub struct WhereAmICommand {
    spec: CommandSpec,
}

impl Default for WhereAmICommand {
    fn default() -> Self {
        WhereAmICommand {
            spec: CommandSpec::new("whereami", "Show your current dimension and coordinates")
                .aliases(&["location", "pos", "position"]),
        }
    }
}

impl Command for WhereAmICommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        _args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        let title = ctx.world.dimension(&player.dimension)?.title().to_string();
        let location = docking::describe_location(player, ctx.world);
        LocationPresenter::show_whereami(player, &title, &location, ctx.output);
        Ok(DispatchOutcome::Continue)
    }
}
