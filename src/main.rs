use anyhow::{Context, Result};
use cbboc::competitors::build_competitor;
use cbboc::config::{ConfigManager, StrategyKind};
use cbboc::engines::competition::{CompetitionOrchestrator, ResultStats};
use cbboc::problem::{InstanceFormat, ProblemInstance};
use cbboc::types::TrainingCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cbboc")]
#[command(about = "Budgeted black-box optimisation competition harness")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a baseline competitor on a problem class
    Run {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Resources directory holding the problem classes
        #[arg(long)]
        resources: Option<PathBuf>,

        /// Problem class folder (default: first token of classFolder.txt)
        #[arg(long)]
        class: Option<String>,

        /// random, nahc or sahh
        #[arg(long)]
        strategy: Option<String>,

        /// NONE, SHORT or LONG
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        /// Instance file format: current or legacy2015
        #[arg(long)]
        format: Option<String>,

        /// Print summary statistics of the testing results
        #[arg(long)]
        stats: bool,

        /// Do not write the results file
        #[arg(long)]
        no_results_file: bool,
    },

    /// Write a default configuration file
    #[command(name = "init-config")]
    InitConfig {
        #[arg(default_value = "cbboc.toml")]
        output: PathBuf,
    },

    /// Load an instance file and print its header
    Inspect {
        path: PathBuf,

        #[arg(long, default_value = "current")]
        format: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            resources,
            class,
            strategy,
            category,
            seed,
            format,
            stats,
            no_results_file,
        } => {
            let manager = ConfigManager::new();
            if let Some(path) = &config {
                manager.load_from_file(path)?;
            }

            let strategy = strategy.map(|s| s.parse::<StrategyKind>()).transpose()?;
            let category = category.map(|c| c.parse::<TrainingCategory>()).transpose()?;
            let format = format.map(|f| f.parse::<InstanceFormat>()).transpose()?;

            manager.update(|c| {
                if let Some(resources) = resources {
                    c.competition.resources_root = resources;
                }
                if class.is_some() {
                    c.competition.problem_class = class;
                }
                if let Some(format) = format {
                    c.competition.instance_format = format;
                }
                if no_results_file {
                    c.competition.write_results_file = false;
                }
                if let Some(strategy) = strategy {
                    c.competitor.strategy = strategy;
                }
                if let Some(category) = category {
                    c.competitor.training_category = category;
                }
                if seed.is_some() {
                    c.competitor.seed = seed;
                }
            })?;

            let app_config = manager.get();
            let mut competitor = build_competitor(&app_config.competitor)?;
            let orchestrator = CompetitionOrchestrator::new(app_config.competition);
            let report = orchestrator
                .run(competitor.as_mut())
                .context("competition run failed")?;

            if stats {
                if let Some(summary) = ResultStats::from_results(&report.testing_results) {
                    println!("{}", summary);
                }
            }
            log::info!("All done.");
        }
        Commands::InitConfig { output } => {
            ConfigManager::new().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
        Commands::Inspect { path, format } => {
            let format: InstanceFormat = format.parse()?;
            let instance = ProblemInstance::from_file(&path, format)
                .with_context(|| format!("failed to load {}", path.display()))?;
            println!("{}", instance);
        }
    }

    Ok(())
}
