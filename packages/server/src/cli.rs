//! Command-line arguments and the configuration derived from them.

use std::path::PathBuf;
use std::time::Duration;

use actors::OrchestratorConfig;
use clap::{ArgAction, Args, Parser, Subcommand};
use db::DbConfig;
use keyword_core::DEFAULT_TOP_N;
use nlp::PipelineConfig;

#[derive(Debug, Parser)]
#[command(name = "keywordd")]
#[command(author, version, about = "Extracts ranked keywords from documents into a graph")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub db: DbArgs,

    /// Options for `run` when no subcommand is given
    #[command(flatten)]
    pub run: RunArgs,

    /// Keywords kept per word class
    #[arg(long, env = "KEYWORDS_TOP_N", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct DbArgs {
    /// Database endpoint: mem://, rocksdb://path or ws://host:port
    #[arg(long = "db", env = "KEYWORDS_DB_ENDPOINT", default_value = "mem://")]
    pub endpoint: String,

    #[arg(long, env = "KEYWORDS_DB_NAMESPACE", default_value = "keywords")]
    pub namespace: String,

    #[arg(long, env = "KEYWORDS_DB_DATABASE", default_value = "graph")]
    pub database: String,

    #[arg(long, env = "KEYWORDS_DB_USER")]
    pub user: Option<String>,

    #[arg(long, env = "KEYWORDS_DB_PASS", hide_env_values = true)]
    pub pass: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the orchestrator until interrupted (default)
    Run(RunArgs),

    /// Queue every unannotated document and drain once
    Refresh,

    /// Queue the given documents and drain once
    Annotate {
        /// Document ids, processed in order
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Print the keywords a document would get, without writing them
    Preview { id: String },

    /// Print the keywords of the built-in sample text
    Sample,

    /// Print the keyword edges stored for a document
    Keywords { id: String },

    /// Load documents from a JSON lines file of {"id", "text"} objects
    Load { path: PathBuf },
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Refresh and drain the backlog every N seconds
    #[arg(long, env = "KEYWORDS_REFRESH_SECS")]
    pub refresh_secs: Option<u64>,

    /// Start draining immediately instead of waiting paused
    #[arg(long, env = "KEYWORDS_AUTOSTART", default_value_t = true, action = ArgAction::Set)]
    pub autostart: bool,

    /// Load documents from a JSON lines file before starting
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

impl DbArgs {
    pub fn config(&self) -> DbConfig {
        let config = DbConfig {
            endpoint: self.endpoint.clone(),
            ..DbConfig::default()
        }
        .with_namespace(&self.namespace)
        .with_database(&self.database);
        match (&self.user, &self.pass) {
            (Some(user), Some(pass)) => config.with_credentials(user, pass),
            _ => config,
        }
    }
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default().with_top_n(self.top_n)
    }

    /// The subcommand to execute, `run` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Run(self.run.clone()))
    }
}

impl RunArgs {
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        let config = OrchestratorConfig::default().with_autostart(self.autostart);
        match self.refresh_secs {
            Some(secs) if secs > 0 => config.with_refresh_interval(Duration::from_secs(secs)),
            _ => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_memory_store() {
        let cli = Cli::try_parse_from(["keywordd"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.command.is_none());
        assert_eq!(cli.top_n, 20);
        let Command::Run(run) = cli.command() else {
            panic!("expected run command");
        };
        assert!(run.autostart);

        let config = cli.db.config();
        assert_eq!(config.endpoint, "mem://");
        assert_eq!(config.namespace, "keywords");
        assert!(config.credentials.is_none());
    }

    #[test]
    fn run_options() {
        let cli = Cli::try_parse_from([
            "keywordd",
            "--top-n",
            "5",
            "run",
            "--refresh-secs",
            "60",
            "--autostart",
            "false",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(cli.pipeline_config().top_n, 5);
        let Some(Command::Run(run)) = cli.command else {
            panic!("expected run command");
        };
        let config = run.orchestrator_config();
        assert!(!config.autostart);
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(60)));
    }

    #[test]
    fn credentials_need_both_parts() {
        let cli = Cli::try_parse_from(["keywordd", "--user", "root", "--pass", "secret", "sample"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            cli.db.config().credentials,
            Some(("root".to_string(), "secret".to_string()))
        );

        let cli = Cli::try_parse_from(["keywordd", "--user", "root", "sample"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.db.config().credentials.is_none());
    }
}
