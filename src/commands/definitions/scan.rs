use crate::commands::registry::{Command, CommandSpec, DispatchOutcome, Requirement};
use crate::commands::CommandContext;
use crate::models::errors::GameResult;
use crate::models::player::Player;
use crate::services::{scan, travel};

pub struct ScanCommand {
    spec: CommandSpec,
}

impl Default for ScanCommand {
    fn default() -> Self {
        ScanCommand {
            spec: CommandSpec::new("scan", "Scan the system, or one catalogued body in detail")
                .aliases(&["s"])
                .usage("scan [body]")
                .requires(&[
                    Requirement::NotDocked,
                    Requirement::NotLanded,
                    Requirement::NotDead,
                ])
                .message(
                    Requirement::NotDocked,
                    "Long-range sensors are offline while docked. Use 'scancoords' instead.",
                )
                .message(
                    Requirement::NotLanded,
                    "Long-range sensors are offline on the surface. Use 'scancoords' instead.",
                ),
        }
    }
}

impl Command for ScanCommand {
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
            scan::system_scan(player, ctx.world, ctx.config, ctx.output)?;
        } else {
            scan::body_scan(player, args, ctx.world, ctx.output)?;
        }
        Ok(DispatchOutcome::Continue)
    }
}

pub struct ScanCoordsCommand {
    spec: CommandSpec,
}

impl Default for ScanCoordsCommand {
    fn default() -> Self {
        ScanCoordsCommand {
            spec: CommandSpec::new("scancoords", "Scan one coordinate and catalogue what is there")
                .aliases(&["sc"])
                .usage("scancoords <x> <y>")
                .requires(&[Requirement::NotDead, Requirement::DockedOrLanded])
                .message(
                    Requirement::DockedOrLanded,
                    "Coordinate scans need a station or surface sensor array. Dock or land first.",
                ),
        }
    }
}

impl Command for ScanCoordsCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(
        &self,
        player: &mut Player,
        args: &str,
        ctx: &mut CommandContext<'_>,
    ) -> GameResult<DispatchOutcome> {
        let target = travel::parse_coordinates(args, "scancoords <x> <y>")?;
        scan::coordinate_scan(player, target, ctx.world, ctx.config, ctx.output)?;
        Ok(DispatchOutcome::Continue)
    }
}
