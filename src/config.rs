use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use smallvec::SmallVec;

pub const DEFAULT_INPUT_FILE: &str = "hks_scores.xlsx";
pub const DEFAULT_TABLE_FILE: &str = "ranking.xlsx";
pub const DEFAULT_JSON_FILE: &str = "rankings.json";

/// Quizzes whose name contains one of these belong to the primary track.
pub const PRIMARY_TRACK_IDENTIFIERS: [&str; 2] = ["12x7", "Hrvatskih 100"];
pub const DEFAULT_PRIMARY_TOP_N: usize = 5;
pub const DEFAULT_OTHER_DROP_COUNT: usize = 3;

/// Known alternate spellings and the canonical player name they map to.
pub const PLAYER_NAME_MAPPING: [(&str, &str); 1] =
    [("Krešimir Sučević Međeral", "Krešimir Sučević-Međeral")];

/// The tunable policy of the ranking: track membership, how many scores
/// count per track and which player names are merged.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    pub primary_identifiers: SmallVec<[String; 2]>,
    pub primary_top_n: usize,
    pub other_drop_count: usize,
    pub name_mapping: HashMap<String, String>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            primary_identifiers: PRIMARY_TRACK_IDENTIFIERS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            primary_top_n: DEFAULT_PRIMARY_TOP_N,
            other_drop_count: DEFAULT_OTHER_DROP_COUNT,
            name_mapping: PLAYER_NAME_MAPPING
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
        }
    }
}

impl ScoringPolicy {
    pub fn canonical_name<'a>(&'a self, player: &'a str) -> &'a str {
        self.name_mapping
            .get(player)
            .map(String::as_str)
            .unwrap_or(player)
    }

    pub fn is_primary(&self, quiz_name: &str) -> bool {
        self.primary_identifiers
            .iter()
            .any(|id| quiz_name.contains(id.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub table_file: String,
    pub json_file: String,
    pub policy: ScoringPolicy,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_path = PathBuf::from(
            lookup("RANKINGS_INPUT").unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string()),
        );
        let output_dir = match lookup("RANKINGS_OUTPUT_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => input_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let mut policy = ScoringPolicy::default();
        if let Some(value) = lookup("RANKINGS_OTHER_DROP_COUNT") {
            policy.other_drop_count = parse_count("RANKINGS_OTHER_DROP_COUNT", &value)?;
        }
        if let Some(value) = lookup("RANKINGS_PRIMARY_TOP_N") {
            policy.primary_top_n = parse_count("RANKINGS_PRIMARY_TOP_N", &value)?;
        }

        Ok(Config {
            input_path,
            output_dir,
            table_file: lookup("RANKINGS_TABLE_FILE")
                .unwrap_or_else(|| DEFAULT_TABLE_FILE.to_string()),
            json_file: lookup("RANKINGS_JSON_FILE")
                .unwrap_or_else(|| DEFAULT_JSON_FILE.to_string()),
            policy,
        })
    }

    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(&self.table_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_file)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {}: '{}' is not a non-negative integer", key, value))
}

pub fn load_config() -> Result<Config> {
    Config::new()
}
