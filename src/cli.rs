use crate::config::{self, EngineConfig, RecordKind};
use crate::error::ConfigError;
use crate::search::SortMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "penal-search")]
#[command(about = "Ranked lookup of penal codes, violations and situations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the MCP server over stdio (default)
    Serve {
        /// JSON dataset to load at startup
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Run one search and print the results
    Search {
        query: String,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long, value_enum, default_value_t)]
        sort: SortMode,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Only records whose category or a keyword equals this tag
        #[arg(short, long)]
        category: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the record with an exact code
    Lookup {
        code: String,
        #[arg(short, long)]
        data: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Options shared by every subcommand that builds an engine.
#[derive(Debug, Clone, Default, Args)]
pub struct EngineArgs {
    /// Record kind preset
    #[arg(short, long, value_enum, default_value_t)]
    pub kind: RecordKind,
    /// TOML file layered over the preset
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl EngineArgs {
    pub fn resolve(&self) -> Result<EngineConfig, ConfigError> {
        let preset = self.kind.config();
        match &self.config {
            Some(path) => config::load_over(path, &preset),
            None => Ok(preset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenizerMode;
    use assert2::check;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_search_command() {
        let cli = Cli::try_parse_from([
            "penal-search",
            "search",
            "evading",
            "--data",
            "codes.json",
            "--sort",
            "fine_desc",
            "-n",
            "5",
            "--kind",
            "situation",
        ])
        .unwrap();

        let Some(Commands::Search {
            query,
            sort,
            limit,
            engine,
            json,
            ..
        }) = cli.command
        else {
            panic!("expected search command");
        };
        check!(query == "evading");
        check!(sort == SortMode::FineDesc);
        check!(limit == Some(5));
        check!(engine.kind == RecordKind::Situation);
        check!(!json);
    }

    #[rstest]
    #[case("fine_desc", SortMode::FineDesc)]
    #[case("fine-desc", SortMode::FineDesc)]
    #[case("stars_desc", SortMode::StarsDesc)]
    #[case("stars-desc", SortMode::StarsDesc)]
    #[case("code", SortMode::Code)]
    fn sort_accepts_snake_and_kebab_names(#[case] name: &str, #[case] expected: SortMode) {
        let cli = Cli::try_parse_from(["penal-search", "search", "x", "--data", "d.json", "--sort", name])
            .unwrap();
        let Some(Commands::Search { sort, .. }) = cli.command else {
            panic!("expected search command");
        };
        check!(sort == expected);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["penal-search"]).unwrap();
        check!(cli.command.is_none());
    }

    #[test]
    fn config_file_layers_over_kind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "limit = 7\n").unwrap();

        let args = EngineArgs {
            kind: RecordKind::Situation,
            config: Some(path),
        };
        let cfg = args.resolve().unwrap();
        check!(cfg.limit == 7);
        check!(cfg.tokenizer == TokenizerMode::Strict);
    }
}
