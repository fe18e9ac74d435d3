use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "TOURNAMENT_STORE_PATH";
const DEFAULT_STORE_PATH: &str = "tournaments.json";

pub struct StoreSettings {
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let path = std::env::var(STORE_PATH_ENV).unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        Self {
            path: PathBuf::from(path),
        }
    }
}

pub struct PairingSettings {
    /// Skill given to players entered without one (bulk and manual entry)
    pub default_skill: u8,
    pub list_separator: char,
    pub pair_separator: char,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            default_skill: 5,
            list_separator: ',',
            pair_separator: '/',
        }
    }
}

pub struct StandingsSettings {
    pub win_points: u32,
    pub draw_points: u32,
    pub loss_points: u32,
    /// Pairs that always advance from a group before tie extension
    pub min_advancing: usize,
}

impl Default for StandingsSettings {
    fn default() -> Self {
        Self {
            win_points: 3,
            draw_points: 1,
            loss_points: 0,
            min_advancing: 2,
        }
    }
}

pub struct AppConfig {
    pub store: StoreSettings,
    pub pairing: PairingSettings,
    pub standings: StandingsSettings,
    /// Fixed seed for reproducible pairings and groupings
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            store: StoreSettings::default(),
            pairing: PairingSettings::default(),
            standings: StandingsSettings::default(),
            seed: None,
        }
    }

    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store.path = path;
        }
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
