//! Resume screener: experience and education screening against job descriptions

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::batch::screen_directory;
use resume_screener::cli::{self, Cli, Commands, ConfigAction, DOCUMENT_EXTENSIONS};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::InputManager;
use resume_screener::output::{save_report_to_file, ReportGenerator};
use resume_screener::reference::ReferenceData;
use resume_screener::{ScreenerError, Screener};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, cli.config, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: Option<PathBuf>, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Screen {
            resume,
            job,
            output,
            detailed,
            save,
        } => {
            info!("Starting resume screening");
            validate_inputs(&resume, &job)?;
            let output_format = cli::resolve_output_format(output.as_deref(), config.output.format)
                .map_err(ScreenerError::InvalidInput)?;

            let (resume_text, job_text) = read_pair(&resume, &job).await?;
            let screener = build_screener(&config)?;
            let report = screener
                .screen(&resume_text, &job_text)
                .with_paths(resume.display().to_string(), job.display().to_string());

            // Files never carry terminal color codes
            let use_colors = config.output.color_output && save.is_none();
            let generator =
                ReportGenerator::with_options(use_colors, detailed || config.output.detailed, true, true);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Experience { resume, job } => {
            validate_inputs(&resume, &job)?;
            let (resume_text, job_text) = read_pair(&resume, &job).await?;
            let verdict = build_screener(&config)?.extract_experience(&resume_text, &job_text);
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }

        Commands::Education { resume, job } => {
            validate_inputs(&resume, &job)?;
            let (resume_text, job_text) = read_pair(&resume, &job).await?;
            let verdict = build_screener(&config)?.extract_education(&resume_text, &job_text);
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }

        Commands::ScreenBatch { resumes, job, output } => {
            if !resumes.is_dir() {
                anyhow::bail!(ScreenerError::InvalidInput(format!(
                    "Not a directory: {}",
                    resumes.display()
                )));
            }
            cli::validate_file_extension(&job, DOCUMENT_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
            let output_format = cli::resolve_output_format(output.as_deref(), config.output.format)
                .map_err(ScreenerError::InvalidInput)?;

            let job_text = InputManager::new()
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;
            let screener = Arc::new(build_screener(&config)?);

            let progress = ProgressBar::new(0);
            let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} resumes")
                .map_err(|e| ScreenerError::Processing(format!("Invalid progress template: {}", e)))?;
            progress.set_style(style.progress_chars("=> "));

            let outcome = screen_directory(screener, &resumes, &job, Arc::from(job_text), progress)
                .await
                .with_context(|| format!("Failed to screen {}", resumes.display()))?;

            let generator = ReportGenerator::with_options(config.output.color_output, false, true, true);
            println!("{}", generator.generate_batch_report(&outcome.reports, output_format)?);

            if !outcome.failures.is_empty() && output_format == OutputFormat::Console {
                println!("⚠️  {} file(s) could not be read:", outcome.failures.len());
                for (path, reason) in &outcome.failures {
                    println!("  • {}: {}", path.display(), reason);
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = toml::to_string_pretty(&config)
                        .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", rendered);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn validate_inputs(resume: &Path, job: &Path) -> anyhow::Result<()> {
    cli::validate_file_extension(resume, DOCUMENT_EXTENSIONS)
        .map_err(ScreenerError::InvalidInput)
        .context("Resume file")?;
    cli::validate_file_extension(job, DOCUMENT_EXTENSIONS)
        .map_err(ScreenerError::InvalidInput)
        .context("Job description file")?;
    Ok(())
}

async fn read_pair(resume: &Path, job: &Path) -> anyhow::Result<(String, String)> {
    let mut input_manager = InputManager::new();
    let resume_text = input_manager
        .extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let job_text = input_manager
        .extract_text(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;
    info!(
        "Extracted {} resume characters and {} job description characters",
        resume_text.len(),
        job_text.len()
    );
    Ok((resume_text, job_text))
}

fn build_screener(config: &Config) -> anyhow::Result<Screener> {
    let reference = ReferenceData::load(&config.reference).context("Failed to load reference data")?;
    Ok(Screener::new(reference, &config.experience)?)
}
