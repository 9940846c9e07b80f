use std::collections::BTreeMap;

use crate::commands::CommandSpec;
use crate::io::OutputWriter;
use crate::models::constants::{StationOption, SurfaceAction, GAME_TITLE};
use crate::models::dimension::{BodyRecord, Contact, MoonRecord};
use crate::models::player::{Location, Player};
use crate::models::position::Coordinates;
use crate::models::station::Station;
use crate::persistence::SaveStore;
use crate::services::scan::ScanEntry;

pub struct ScanPresenter;

impl ScanPresenter {
    pub fn show_system_scan(
        code: &str,
        title: &str,
        position: Coordinates,
        entries: &[ScanEntry],
        output: &mut dyn OutputWriter,
    ) {
        output.writeln(&format!("=== SYSTEM SCAN: {} ({}) ===", title, code));
        output.writeln(&format!("Scanning from {}", position));
        output.writeln(&format!(
            "{:<20} {:<14} {:<16} {:>8} {:>8}",
            "NAME", "TYPE", "COORDINATES", "DISTANCE", "SIGNALS"
        ));
        for entry in entries {
            if entry.identified {
                output.writeln(&format!(
                    "{:<20} {:<14} {:<16} {:>8} {:>8}",
                    entry.name,
                    entry.body_type,
                    entry.coordinates.to_string(),
                    entry.distance,
                    entry.signals
                ));
            } else {
                output.writeln(&format!(
                    "{:<20} {:<14} {:<16} {:>8} {:>8}",
                    "Unknown",
                    "?",
                    entry.coordinates.to_string(),
                    entry.distance,
                    "?"
                ));
            }
        }
        let hidden = entries.iter().filter(|e| !e.identified).count();
        if hidden > 0 {
            output.writeln(&format!(
                "{} object(s) out of sensor range. Move closer to identify them.",
                hidden
            ));
        }
    }

    pub fn show_body(
        name: &str,
        body: &BodyRecord,
        distance: i64,
        stations: &[Station],
        output: &mut dyn OutputWriter,
    ) {
        output.writeln(&format!("=== {} ({}) ===", name, body.body_type));
        output.writeln(&format!("Coordinates: {}  Distance: {}", body.coordinates, distance));
        if let Some(description) = &body.description {
            output.writeln(description);
        }
        if !body.moons.is_empty() {
            output.writeln("Moons:");
            for (moon, record) in &body.moons {
                output.writeln(&format!("  {} at {}", moon, record.coordinates));
            }
        }
        let attached: Vec<&Station> = stations.iter().filter(|s| s.parent_body == name).collect();
        if !attached.is_empty() {
            output.writeln("Stations:");
            for station in attached {
                output.writeln(&format!(
                    "  {} ({}) at {} on {}",
                    station.name,
                    station.type_label,
                    station.coordinates,
                    station.attached_to()
                ));
            }
        }
    }

    pub fn show_moon(
        name: &str,
        parent: &str,
        moon: &MoonRecord,
        distance: i64,
        output: &mut dyn OutputWriter,
    ) {
        output.writeln(&format!("=== {} ({} of {}) ===", name, moon.body_type, parent));
        output.writeln(&format!("Coordinates: {}  Distance: {}", moon.coordinates, distance));
        if let Some(description) = &moon.description {
            output.writeln(description);
        }
        for station in moon.stations.keys() {
            output.writeln(&format!("  Station: {}", station));
        }
    }

    /// `new_flags[i]` tells whether `contacts[i]` was just catalogued.
    pub fn show_coordinate_scan(
        target: Coordinates,
        contacts: &[Contact],
        new_flags: &[bool],
        output: &mut dyn OutputWriter,
    ) {
        output.writeln(&format!("Scanning coordinates {}...", target));
        if contacts.is_empty() {
            output.writeln("Nothing detected at these coordinates.");
            return;
        }
        for (contact, is_new) in contacts.iter().zip(new_flags) {
            let relation = match (&contact.parent, &contact.grandparent) {
                (Some(parent), Some(grandparent)) => {
                    format!(" on {}, Moon of {}", parent, grandparent)
                }
                (Some(parent), None) if contact.kind == "Moon" => format!(" orbiting {}", parent),
                (Some(parent), None) => format!(" on {}", parent),
                _ => String::new(),
            };
            output.writeln(&format!("  {} ({}){}", contact.name, contact.kind, relation));
            output.writeln(&format!("    {}", contact.description));
            if *is_new {
                output.writeln(&format!("    New discovery: {} added to your log.", contact.name));
            }
        }
    }
}

pub struct StationPresenter;

impl StationPresenter {
    pub fn show_menu(station: &Station, output: &mut dyn OutputWriter) {
        output.writeln(&format!("=== {} ===", station.name));
        output.writeln("Available options:");
        for option in station.options() {
            output.writeln(&format!("  {:<8} - {}", option.keyword(), option.label()));
        }
        output.writeln("Other commands such as 'scancoords' or 'playerinfo' still work.");
        output.writeln("Type 'help <command>' for details on any command.");
    }

    pub fn show_info(station: &Station, output: &mut dyn OutputWriter) {
        output.writeln(&format!("=== {} ({}) ===", station.name, station.type_label));
        output.writeln(&station.description);
        output.writeln(&format!(
            "Location: {} in {}, attached to {}",
            station.coordinates,
            station.dimension,
            station.attached_to()
        ));
        let keywords: Vec<&str> = StationOption::ALL.iter().map(|o| o.keyword()).collect();
        output.writeln(&format!("Services: {}", keywords.join(", ")));
    }
}

pub struct SurfacePresenter;

impl SurfacePresenter {
    pub fn show_menu(site: &str, output: &mut dyn OutputWriter) {
        output.writeln(&format!("=== {} ===", site));
        output.writeln("Surface commands:");
        for action in SurfaceAction::ALL {
            output.writeln(&format!("  {:<8} - {}", action.keyword(), action.label()));
        }
        output.writeln("General commands:");
        output.writeln("  help <command> - Details for any command, e.g. 'help scancoords'");
        output.writeln("  logout         - Save and return to the login screen");
        output.writeln("  exit/quit      - Save and leave the game");
    }

    pub fn show_info(site: &str, label: &str, description: Option<&str>, output: &mut dyn OutputWriter) {
        output.writeln(&format!("=== {} on {} ===", site, label));
        output.writeln(description.unwrap_or("No further information is available."));
    }

    pub fn show_analysis(label: &str, composition: &BTreeMap<String, f64>, output: &mut dyn OutputWriter) {
        if composition.is_empty() {
            output.writeln(&format!("No composition data available for {}.", label));
            return;
        }
        output.writeln(&format!("Surface composition of {}:", label));
        let mut parts: Vec<(&String, &f64)> = composition.iter().collect();
        parts.sort_by(|a, b| b.1.total_cmp(a.1));
        for (element, percent) in parts {
            output.writeln(&format!("  {:<16} {:>5.1}%", element, percent));
        }
    }
}

pub struct PlayerPresenter;

impl PlayerPresenter {
    pub fn show_info(
        player: &Player,
        location: &str,
        saves: &dyn SaveStore,
        output: &mut dyn OutputWriter,
    ) {
        output.writeln(&format!("=== CAPTAIN {} ===", player.name));
        output.writeln(&format!("UUID:        {}", player.id));
        output.writeln(&format!(
            "Status:      {}",
            if player.is_dead { "DECEASED" } else { "Active" }
        ));
        output.writeln(&format!("Dimension:   {}", player.dimension));
        output.writeln(&format!("Position:    {}", player.position));
        output.writeln(&format!("Location:    {}", location));
        output.writeln(&format!("Dimensions:  {} discovered", player.known_dimensions.len()));
        output.writeln(&format!("Bodies:      {} catalogued", player.discovery_count()));
        output.writeln(&format!("Playtime:    {}", saves.format_playtime(player.playtime)));
        output.writeln(&format!("Created:     {}", saves.format_date(&player.created_at)));
    }

    /// What other captains may see about `player`.
    pub fn show_public(player: &Player, saves: &dyn SaveStore, output: &mut dyn OutputWriter) {
        output.writeln(&format!("=== CAPTAIN {} ===", player.name));
        output.writeln(&format!(
            "Status:      {}",
            if player.is_dead { "DECEASED" } else { "Active" }
        ));
        output.writeln(&format!("Dimension:   {}", player.dimension));
        output.writeln(&format!("Dimensions:  {} discovered", player.known_dimensions.len()));
        output.writeln(&format!("Bodies:      {} catalogued", player.discovery_count()));
        output.writeln(&format!("Playtime:    {}", saves.format_playtime(player.playtime)));
        output.writeln(&format!("Created:     {}", saves.format_date(&player.created_at)));
        if let Some(last) = &player.last_login {
            output.writeln(&format!("Last seen:   {}", saves.format_date(last)));
        }
    }

    pub fn show_discoveries(player: &Player, output: &mut dyn OutputWriter) {
        output.writeln("=== DISCOVERY LOG ===");
        output.writeln(&format!(
            "Known dimensions: {}",
            player.known_dimensions.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
        if player.discovery_count() == 0 {
            output.writeln("No celestial bodies catalogued yet. Try 'scancoords' from a station.");
            return;
        }
        for (dimension, bodies) in &player.known_bodies {
            output.writeln(&format!("{} ({}):", dimension, bodies.len()));
            for body in bodies {
                output.writeln(&format!("  - {}", body));
            }
        }
    }
}

pub struct LocationPresenter;

impl LocationPresenter {
    /// "In space", "Docked at ISS" or "Landed at Wiesbaden on Earth".
    pub fn describe(location: &Location, station_name: Option<&str>) -> String {
        match location {
            Location::InSpace => "In space".to_string(),
            Location::Docked { station_id } => {
                format!("Docked at {}", station_name.unwrap_or(station_id))
            }
            Location::Landed { site, .. } => format!(
                "Landed at {} on {}",
                site,
                location.surface_label().unwrap_or_default()
            ),
        }
    }

    pub fn show_whereami(player: &Player, title: &str, location: &str, output: &mut dyn OutputWriter) {
        output.writeln(&format!("Dimension:   {} ({})", player.dimension, title));
        output.writeln(&format!("Coordinates: {}", player.position));
        output.writeln(&format!("Status:      {}", location));
    }

    /// `systems` holds (code, title, discovered) for every known code.
    pub fn show_dimensions(
        current: &str,
        destinations: &[String],
        systems: &[(String, String, bool)],
        output: &mut dyn OutputWriter,
    ) {
        if destinations.is_empty() {
            output.writeln(&format!("No warp paths lead out of {}.", current));
        } else {
            output.writeln(&format!(
                "Warp destinations from {}: {}",
                current,
                destinations.join(", ")
            ));
        }
        output.writeln("Dimensions:");
        for (code, title, discovered) in systems {
            let marker = if code == current { " <- current" } else { "" };
            let status = if *discovered { "DISCOVERED" } else { "UNDISCOVERED" };
            let title = if *discovered { title.as_str() } else { "???" };
            output.writeln(&format!("  {:<5} {:<24} {}{}", code, title, status, marker));
        }
    }
}

pub struct HelpPresenter;

impl HelpPresenter {
    pub fn show_overview(specs: &[&CommandSpec], output: &mut dyn OutputWriter) {
        output.writeln("Available commands:");
        for spec in specs {
            let aliases = if spec.aliases.is_empty() {
                String::new()
            } else {
                format!(" ({})", spec.aliases.join(", "))
            };
            output.writeln(&format!("  {:<14} {}{}", spec.name, spec.description, aliases));
        }
        output.writeln("Type 'help <command>' for details.");
    }

    pub fn show_command(spec: &CommandSpec, output: &mut dyn OutputWriter) {
        output.writeln(&format!("{} - {}", spec.name, spec.description));
        if let Some(usage) = &spec.usage {
            output.writeln(&format!("Usage: {}", usage));
        }
        if !spec.aliases.is_empty() {
            output.writeln(&format!("Aliases: {}", spec.aliases.join(", ")));
        }
        if !spec.requirements.is_empty() {
            let tags: Vec<&str> = spec.requirements.iter().map(|r| r.tag()).collect();
            output.writeln(&format!("Requires: {}", tags.join(", ")));
        }
    }
}

pub struct GamePresenter;

impl GamePresenter {
    pub fn show_title(output: &mut dyn OutputWriter) {
        output.writeln(&format!("*** {} ***", GAME_TITLE));
        output.writeln("");
    }

    pub fn show_roster(names: &[String], output: &mut dyn OutputWriter) {
        if names.is_empty() {
            output.writeln("No captains on record.");
        } else {
            output.writeln("Captains on record:");
            for name in names {
                output.writeln(&format!("  {}", name));
            }
        }
        output.writeln("Enter a captain's name to continue, 'new' to enlist, or 'exit' to quit.");
    }

    pub fn show_welcome(player: &Player, location: &str, output: &mut dyn OutputWriter) {
        output.writeln("");
        output.writeln(&format!("Welcome aboard, Captain {}.", player.name));
        output.writeln(&format!(
            "You are in {} at {}. {}.",
            player.dimension, player.position, location
        ));
        output.writeln("Type 'help' for a list of commands.");
    }

    pub fn show_death(output: &mut dyn OutputWriter) {
        output.writeln("You are deceased. Game over.");
        output.writeln("Type 'restart' to begin again with a new ship.");
    }

    pub fn show_credits(output: &mut dyn OutputWriter) {
        output.writeln(GAME_TITLE);
        output.writeln("A text adventure among the stars.");
        output.writeln("Navigation, docking and scanning systems built for lonely captains.");
    }
}
