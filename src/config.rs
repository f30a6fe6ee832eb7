//! Engine configuration, loadable from TOML
//!
//! Everything tunable lives here: search depth and breadth, the time budget,
//! thread count, and the evaluation weight table. The engine itself holds no
//! hidden mutable state: a config value is threaded through every call.

use std::path::Path;

use crate::error::ConfigError;
use crate::eval::EvalWeights;

/// Search tuning knobs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimax search depth in plies
    pub depth: u8,
    /// Maximum candidates considered at the root
    pub root_breadth: usize,
    /// Maximum candidates considered at interior nodes
    pub branch_breadth: usize,
    /// Wall-clock budget per move, in milliseconds. Checked between
    /// root candidates; an overrun degrades move quality, never the result.
    pub time_budget_ms: u64,
    /// Worker threads for root-level parallel search.
    /// 1 = single-threaded (the default), 0 = one per CPU core.
    pub threads: usize,
    /// When set, search one ply deeper once the board carries 20+ stones
    /// (narrower candidate sets make deeper search affordable late-game).
    pub adaptive_depth: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            root_breadth: 20,
            branch_breadth: 10,
            time_budget_ms: 500,
            threads: 1,
            adaptive_depth: false,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub weights: EvalWeights,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::Validation("search.depth must be >= 1".into()));
        }
        if self.search.root_breadth == 0 {
            return Err(ConfigError::Validation(
                "search.root_breadth must be >= 1".into(),
            ));
        }
        if self.search.branch_breadth == 0 {
            return Err(ConfigError::Validation(
                "search.branch_breadth must be >= 1".into(),
            ));
        }
        if self.search.time_budget_ms == 0 {
            return Err(ConfigError::Validation(
                "search.time_budget_ms must be >= 1".into(),
            ));
        }
        if self.weights.defense_pct < 50 || self.weights.defense_pct > 150 {
            return Err(ConfigError::Validation(
                "weights.defense_pct must be in [50, 150]".into(),
            ));
        }
        let w = &self.weights;
        let descending = [
            w.five,
            w.open_four,
            w.closed_four,
            w.open_three,
            w.closed_three,
            w.open_two,
            w.closed_two,
            w.stone,
        ];
        if descending.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::Validation(
                "weights must be strictly decreasing from five to stone".into(),
            ));
        }
        Ok(())
    }
}
