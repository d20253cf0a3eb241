//! Engine configuration: alias tables, weights, tokenizer policy and limits.
//!
//! Every knob the engine reads lives here so one binary can serve legal codes,
//! traffic violations and situational playbooks without code changes. A
//! configuration is either a [`RecordKind`] preset or a TOML file layered on
//! top of one.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use toml::{Table, Value};

/// Default cap on returned results.
pub const DEFAULT_LIMIT: usize = 200;

/// How query text is split into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// Every run outside `[a-z0-9]` separates tokens. Suited to free-text scenarios.
    Strict,
    /// Whitespace-only splitting; punctuation such as `2.10.6` survives.
    #[default]
    Loose,
}

/// Ordered alias keys consulted for each canonical field. First present key wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasTable {
    pub id: Vec<String>,
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub category: Vec<String>,
    pub keywords: Vec<String>,
    pub fine: Vec<String>,
    pub jail_minutes: Vec<String>,
    pub stars: Vec<String>,
    pub notes: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            id: keys(&["id", "code", "section", "pcid", "number"]),
            title: keys(&["title", "name", "offense", "charge", "label"]),
            description: keys(&["description", "details", "desc", "summary"]),
            category: keys(&["category", "type", "class", "level"]),
            keywords: keys(&["keywords", "tags", "categories", "aliases"]),
            fine: keys(&["fine", "amount", "fee", "ticket", "money"]),
            jail_minutes: keys(&["jail", "time", "minutes", "detention"]),
            stars: keys(&["stars", "star", "wanted", "heat"]),
            notes: keys(&["notes", "note", "remarks", "steps", "procedure", "charges"]),
        }
    }
}

impl AliasTable {
    /// Field name paired with its alias list, for validation and diagnostics.
    pub fn fields(&self) -> [(&'static str, &[String]); 9] {
        [
            ("id", &self.id),
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("keywords", &self.keywords),
            ("fine", &self.fine),
            ("jail_minutes", &self.jail_minutes),
            ("stars", &self.stars),
            ("notes", &self.notes),
        ]
    }
}

/// Additive relevance weights. Every applicable signal is summed over all tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub exact_code: u32,
    pub title_exact: u32,
    pub title_substring: u32,
    pub keyword_exact: u32,
    pub keyword_partial: u32,
    pub category_substring: u32,
    pub code_partial: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            exact_code: 100,
            title_exact: 40,
            title_substring: 12,
            keyword_exact: 18,
            keyword_partial: 6,
            category_substring: 6,
            code_partial: 10,
        }
    }
}

/// Which zero-scored records may still appear in ranked output.
///
/// A record with a positive score is always included. With
/// `require_positive_score = false` every record qualifies; otherwise a
/// zero-scored record is included only through the substring fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionPolicy {
    pub require_positive_score: bool,
    pub fallback_substring: bool,
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self {
            require_positive_score: true,
            fallback_substring: true,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Object keys checked, in order, for a wrapped record array.
    pub wrapper_keys: Vec<String>,
    pub aliases: AliasTable,
    pub weights: Weights,
    pub tokenizer: TokenizerMode,
    /// Result cap used when the caller does not pass one.
    pub limit: usize,
    pub inclusion: InclusionPolicy,
    /// Joins haystack parts.
    pub haystack_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wrapper_keys: keys(&["items", "data", "sections", "situations"]),
            aliases: AliasTable::default(),
            weights: Weights::default(),
            tokenizer: TokenizerMode::default(),
            limit: DEFAULT_LIMIT,
            inclusion: InclusionPolicy::default(),
            haystack_separator: " | ".to_string(),
        }
    }
}

/// Known dataset flavours, each with a tuned preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    LegalCode,
    Violation,
    Situation,
}

impl RecordKind {
    /// Preset configuration for this record kind.
    pub fn config(self) -> EngineConfig {
        match self {
            Self::LegalCode => EngineConfig::default(),
            Self::Violation => EngineConfig {
                wrapper_keys: keys(&["items", "data", "violations"]),
                ..EngineConfig::default()
            },
            Self::Situation => EngineConfig {
                wrapper_keys: keys(&["situations", "data", "items"]),
                tokenizer: TokenizerMode::Strict,
                limit: 80,
                ..EngineConfig::default()
            },
        }
    }
}

/// Load a TOML configuration file over the defaults.
pub fn load(path: &Path) -> Result<EngineConfig, ConfigError> {
    load_over(path, &EngineConfig::default())
}

/// Load a TOML configuration file layered over `base` (typically a
/// [`RecordKind`] preset). Keys absent from the file keep `base`'s values.
pub fn load_over(path: &Path, base: &EngineConfig) -> Result<EngineConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = parse_over(&raw, base).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate(&cfg)?;

    tracing::debug!("Loaded engine config from {}", path.display());
    Ok(cfg)
}

/// Parse TOML text over the defaults without validating it.
pub fn parse(raw: &str) -> Result<EngineConfig, toml::de::Error> {
    toml::from_str(raw)
}

/// Parse TOML text layered over `base` without validating it.
///
/// Tables merge key by key; any other value in the overlay replaces the base value.
pub fn parse_over(raw: &str, base: &EngineConfig) -> Result<EngineConfig, toml::de::Error> {
    let overlay: Table = toml::from_str(raw)?;
    let Ok(Value::Table(mut merged)) = Value::try_from(base) else {
        // The config types only hold strings, integers, booleans, arrays and tables.
        return toml::from_str(raw);
    };
    merge_tables(&mut merged, overlay);
    Value::Table(merged).try_into()
}

fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(nested)) => merge_tables(existing, nested),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

pub fn validate(cfg: &EngineConfig) -> Result<(), ConfigError> {
    for (field, aliases) in cfg.aliases.fields() {
        if aliases.is_empty() {
            return Err(ConfigError::Validation {
                message: format!("aliases.{field} must list at least one key."),
            });
        }
        if aliases.iter().any(|key| key.trim().is_empty()) {
            return Err(ConfigError::Validation {
                message: format!("aliases.{field} must not contain blank keys."),
            });
        }
    }
    if cfg.wrapper_keys.iter().any(|key| key.trim().is_empty()) {
        return Err(ConfigError::Validation {
            message: "wrapper_keys must not contain blank keys.".to_string(),
        });
    }
    if cfg.limit == 0 {
        return Err(ConfigError::Validation {
            message: "limit must be greater than zero.".to_string(),
        });
    }
    if !cfg.inclusion.require_positive_score && cfg.inclusion.fallback_substring {
        tracing::debug!("inclusion.fallback_substring has no effect when every record qualifies");
    }

    Ok(())
}
