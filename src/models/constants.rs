pub const DEFAULT_START_DIMENSION: &str = "A01";
pub const DEFAULT_START_X: i32 = 60;
pub const DEFAULT_START_Y: i32 = -59;
pub const DEFAULT_START_CITY: &str = "Wiesbaden";
pub const DEFAULT_START_BODY: &str = "Earth";

/// Maximum Chebyshev distance at which a system scan identifies a body.
pub const DEFAULT_SCAN_RANGE: i32 = 60;
/// Hidden signals only show up on a system scan this close.
pub const HIDDEN_SIGNAL_RANGE: i32 = 10;
/// Stations within this Euclidean distance are suggested when docking fails.
pub const DOCKING_HINT_RANGE: f64 = 5.0;

pub const ARRIVAL_X: i32 = 10;
pub const ARRIVAL_Y: i32 = 10;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 15;
pub const RESERVED_NAMES: [&str; 5] = ["new", "exit", "quit", "logout", "help"];

/// Body types that get a minimum 5x5 footprint on coordinate scans.
pub const DANGEROUS_BODY_TYPES: [&str; 3] = ["Star", "Black Hole", "Pulsar"];
pub const DANGEROUS_MIN_SIZE: i32 = 5;

pub const SELF_DESTRUCT_CONFIRMATION: &str = "CONFIRM";

pub const GAME_TITLE: &str = "SPACER - EXPLORE AND DIE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StationKind {
    Station,
    City,
    Beacon,
    Other,
}

impl StationKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Station" => StationKind::Station,
            "City" => StationKind::City,
            "Beacon" => StationKind::Beacon,
            _ => StationKind::Other,
        }
    }

    pub fn is_dockable(&self) -> bool {
        matches!(self, StationKind::Station)
    }

    pub fn is_landing_site(&self) -> bool {
        matches!(self, StationKind::City)
    }
}

/// Interaction options offered by every station menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationOption {
    Launch,
    Quests,
    Trade,
    Repair,
    Info,
}

impl StationOption {
    pub fn keyword(&self) -> &'static str {
        match self {
            StationOption::Launch => "launch",
            StationOption::Quests => "quests",
            StationOption::Trade => "trade",
            StationOption::Repair => "repair",
            StationOption::Info => "info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StationOption::Launch => "Return to space",
            StationOption::Quests => "View available missions",
            StationOption::Trade => "Trade resources",
            StationOption::Repair => "Repair your ship",
            StationOption::Info => "Station information",
        }
    }

    pub fn parse(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.keyword() == keyword)
    }

    pub const ALL: [StationOption; 5] = [
        StationOption::Launch,
        StationOption::Quests,
        StationOption::Trade,
        StationOption::Repair,
        StationOption::Info,
    ];
}

/// Commands available on a planetary surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    Explore,
    Launch,
    Analyze,
    Info,
}

impl SurfaceAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            SurfaceAction::Explore => "explore",
            SurfaceAction::Launch => "launch",
            SurfaceAction::Analyze => "analyze",
            SurfaceAction::Info => "info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SurfaceAction::Explore => "Explore the surroundings",
            SurfaceAction::Launch => "Return to orbit",
            SurfaceAction::Analyze => "Analyze surface composition",
            SurfaceAction::Info => "Show detailed information about this location",
        }
    }

    pub fn parse(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.keyword() == keyword)
    }

    pub const ALL: [SurfaceAction; 4] = [
        SurfaceAction::Explore,
        SurfaceAction::Launch,
        SurfaceAction::Analyze,
        SurfaceAction::Info,
    ];
}

pub const EXPLORATION_FINDINGS: [&str; 5] = [
    "Found some interesting geological formations.",
    "Discovered traces of ancient structures.",
    "Mapped an unusual terrain pattern.",
    "Found nothing of interest this time.",
    "Detected unusual energy readings from nearby.",
];
