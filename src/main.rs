use clap::{Parser, Subcommand};
use shackles::config::RunnerConfig;
use shackles::imaging::formats;
use shackles::{ChainBuilder, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Flags for commands that read a rule-set document.
#[derive(clap::Args, Clone)]
struct RulesArgs {
    /// Rule-set document (JSON array of {"rule", "settings"})
    #[arg(long)]
    rules: PathBuf,
}

#[derive(Parser)]
#[command(name = "shackles")]
#[command(about = "Run chains of image rules and name the results")]
#[command(long_about = "\
Run chains of image rules and name the results

A rule-set document lists rules in the order they run:

  [
    {\"rule\": \"duplicate\", \"settings\": {}},
    {\"rule\": \"crop\", \"settings\": {\"width\": 200, \"height\": 100}},
    {\"rule\": \"grayscale\", \"settings\": {}}
  ]

After the chain the image is renamed with the naming template:

  {NAME}    source file name without extension
  {####}    one random A-Z/0-9 character per #
  {W} {H}   reserved, currently empty

Run 'shackles rules' to list the available rules.")]
#[command(version)]
struct Cli {
    /// Directory holding the images
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Naming template for processed images
    #[arg(long, global = true)]
    format: Option<String>,

    /// JPG output quality (1-100)
    #[arg(long, global = true)]
    quality: Option<u32>,

    /// TOML file with source/format/quality; flags take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a rule-set document against images in the source directory
    Run {
        #[command(flatten)]
        rules: RulesArgs,
        /// File names relative to the source directory
        files: Vec<String>,
        /// Process every supported image in the source directory
        #[arg(long, conflicts_with = "files")]
        all: bool,
    },
    /// Parse a rule-set document and print the chain it describes
    Check(RulesArgs),
    /// List the registered rules
    Rules,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let builder = ChainBuilder::new();

    match &cli.command {
        Command::Run { rules, files, all } => {
            let config = resolve_config(&cli)?;
            let chain = builder.convert(&std::fs::read_to_string(&rules.rules)?)?;
            let mut runner = builder.new_runner(&config)?;

            let files = match (*all, runner.base_directory()) {
                (true, Some(base)) => list_images(base)?,
                _ => files.clone(),
            };

            let mut failed = 0;
            for file in &files {
                let outcome = runner
                    .process(file, 0)
                    .and_then(|r| r.run(&chain))
                    .map(|image| image.name.clone());
                if outcome.is_err() {
                    failed += 1;
                }
                println!(
                    "{}",
                    output::format_run_line(file, outcome.as_ref().map(String::as_str))
                );
            }
            println!();
            println!("{}", output::format_run_summary(files.len() - failed, failed));

            if failed > 0 {
                return Err(format!("{failed} of {} images failed", files.len()).into());
            }
        }
        Command::Check(rules) => {
            let chain = builder.convert(&std::fs::read_to_string(&rules.rules)?)?;
            output::print_chain(&chain);
            println!("==> Rule set is valid");
        }
        Command::Rules => {
            output::print_rules(builder.registry());
        }
    }

    Ok(())
}

/// File values first, command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<RunnerConfig, Box<dyn std::error::Error>> {
    let file = match &cli.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    let flags = RunnerConfig {
        source: cli.source.clone(),
        format: cli.format.clone(),
        quality: cli.quality,
    };
    Ok(file.merge(flags))
}

/// Supported images directly inside `dir`, sorted by name.
fn list_images(dir: &Path) -> Result<Vec<String>, walkdir::Error> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && formats::is_supported_path(entry.path()) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
