pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod repl;
pub mod search;
pub mod session;
pub mod sources;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use config::Config;
use grid::SheetFile;
use session::{SearchOutcome, SearchSession};

/// Default number of companies to ask for.
pub const DEFAULT_COUNT: u32 = 10;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "company-search",
    version,
    about = "Find companies matching free-text criteria and append the new ones to a sheet"
)]
pub struct Cli {
    /// Sheet document whose first column holds the known companies
    #[arg(long, default_value = "companies.json")]
    pub sheet: PathBuf,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Completion API key; without one the built-in sample lists are used
    #[arg(long, env = "COMPANY_SEARCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search and print the new companies
    Search {
        /// Free-text description of the companies to find
        #[arg(required = true, num_args = 1..)]
        criteria: Vec<String>,

        /// How many companies to ask for (1-50)
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: u32,

        /// Append the new companies to the sheet right away
        #[arg(long, default_value_t = false)]
        commit: bool,

        /// Print the session snapshot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Interactive session: search, review, then commit or clear
    Session,
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            ref criteria,
            count,
            commit,
            json,
        } => {
            let cfg = load_config(&cli)?;
            run_search(cfg, cli.sheet.clone(), &criteria.join(" "), count, commit, json).await
        }
        Commands::Session => {
            let cfg = load_config(&cli)?;
            let session = SearchSession::new(SheetFile::new(cli.sheet.clone()), cfg);
            repl::run_repl(session).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "company-search", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(key) = cli.api_key.as_ref().filter(|key| !key.trim().is_empty()) {
        cfg.api_key = Some(key.clone());
    }
    Ok(cfg)
}

async fn run_search(
    cfg: Config,
    sheet: PathBuf,
    criteria: &str,
    count: u32,
    commit: bool,
    json: bool,
) -> Result<()> {
    let credential = cfg.credential().map(str::to_string);
    let mut session = SearchSession::new(SheetFile::new(sheet), cfg);

    let outcome = session
        .search(criteria, count, credential.as_deref())
        .await
        .context("search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else {
        match outcome {
            SearchOutcome::Found(_) => {
                for name in session.results() {
                    println!("{}", name.display().green().bold());
                }
            }
            SearchOutcome::NoNewResults => {
                println!("{}", session::STATUS_NO_NEW.yellow());
            }
        }
    }

    if commit && matches!(outcome, SearchOutcome::Found(_)) {
        let added = session.commit().await.context("writing to the sheet failed")?;
        if !json {
            eprintln!("{}", format!("Added {added} companies").dimmed());
        }
    }
    Ok(())
}
