//! Game configuration and its persistence
//!
//! Loads [`GameConfig`] from a JSON file. The file is optional: when it does
//! not exist the defaults are used, but a file that exists and fails to parse
//! is an error so a typo never silently changes how rounds resolve.
//!
//! # File Location
//!
//! An explicit path wins. Otherwise `config.json` in the user's configuration
//! directory is used, falling back to the current directory when no config
//! directory can be resolved.
//!
//! # Example File
//!
//! ```json
//! {
//!   "turn_length_secs": 10,
//!   "selection_policy": "most_votes",
//!   "reset_scope": "position_and_votes",
//!   "rng_seed": null
//! }
//! ```

use crate::core::error::{CoreError, CoreResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Config filename
const CONFIG_FILENAME: &str = "config.json";

/// Default round length in seconds
pub const DEFAULT_TURN_LENGTH_SECS: u64 = 20;

/// Shortest round the server will run
pub const MIN_TURN_LENGTH_SECS: u64 = 3;

/// How the winning move is picked from the ledger at round end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Highest weight wins; ties go to the candidate that appeared first
    MostVotes,
    /// Roulette-wheel draw, win chance proportional to vote share
    #[default]
    Probability,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::MostVotes => write!(f, "most_votes"),
            SelectionPolicy::Probability => write!(f, "probability"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "most_votes" | "mostvotes" => Ok(SelectionPolicy::MostVotes),
            "probability" | "weighted" => Ok(SelectionPolicy::Probability),
            other => Err(CoreError::InvalidConfig {
                message: format!("unknown selection policy {other:?}"),
            }),
        }
    }
}

/// What an administrative reset throws away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetScope {
    /// Only the position goes back to the start; votes already cast stay in
    /// the ledger but can no longer win
    Position,
    /// Position goes back to the start and the ledger is emptied
    #[default]
    PositionAndVotes,
}

impl FromStr for ResetScope {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "position" => Ok(ResetScope::Position),
            "position_and_votes" => Ok(ResetScope::PositionAndVotes),
            other => Err(CoreError::InvalidConfig {
                message: format!("unknown reset scope {other:?}"),
            }),
        }
    }
}

/// Runtime configuration of the voting game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of one voting round in seconds
    pub turn_length_secs: u64,
    /// Winner selection algorithm
    pub selection_policy: SelectionPolicy,
    /// Scope of the administrative reset
    pub reset_scope: ResetScope,
    /// Fixed seed for the selection RNG; `None` seeds from the OS
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turn_length_secs: DEFAULT_TURN_LENGTH_SECS,
            selection_policy: SelectionPolicy::default(),
            reset_scope: ResetScope::default(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Round length as a [`Duration`]
    pub fn turn_length(&self) -> Duration {
        Duration::from_secs(self.turn_length_secs)
    }

    /// Reject values the scheduler cannot run with
    pub fn validate(&self) -> CoreResult<()> {
        if self.turn_length_secs < MIN_TURN_LENGTH_SECS {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "turn length too short, must be {} or more seconds (got {})",
                    MIN_TURN_LENGTH_SECS, self.turn_length_secs
                ),
            });
        }
        Ok(())
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        info!("[CONFIG] Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from `path` (or the default location), using defaults when the
    /// file does not exist
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

        if !path.exists() {
            warn!("[CONFIG] No config file found at {:?}. Using defaults.", path);
            return Ok(Self::default());
        }

        Self::load(&path)
    }
}

/// Helper to resolve the config file path
///
/// Returns `config.json` in the user's configuration directory, or in the
/// current directory if the system config dir cannot be found.
pub fn default_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "community-chess", "CommunityChess") {
        proj_dirs.config_dir().join(CONFIG_FILENAME)
    } else {
        PathBuf::from(CONFIG_FILENAME)
    }
}
