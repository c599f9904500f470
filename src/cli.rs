// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::insights::SafeInsights;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::onboarding::IndustryCatalog;
use crate::resume_checker::report::render_report;
use crate::resume_checker::{CheckerSession, ResumeChecker, RunOutcome};
use crate::types::ResumeDocument;
use crate::utils::read_file_content;

#[derive(Parser)]
#[command(name = "career-insights")]
#[command(about = "Resume ATS checks and industry insights")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a PDF resume against a job description
    Check {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
        job_description: Option<String>,
        #[arg(long)]
        job_file: Option<PathBuf>,
        /// Seed for the offline mock analysis
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the simulated upload pause
        #[arg(long)]
        no_delay: bool,
    },
    /// List industries and their specializations
    Industries,
    /// Summarize an industry insights JSON payload
    Insights { path: PathBuf },
}

pub async fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Check {
            resume,
            job_description,
            job_file,
            seed,
            no_delay,
        } => {
            let job_description = match (job_description, job_file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_file_content(&path).await?,
                (None, None) => anyhow::bail!("Provide --job-description or --job-file"),
            };
            check_resume(resume, job_description, seed, no_delay).await
        }
        Command::Industries => {
            for industry in IndustryCatalog::builtin().industries() {
                println!("{} ({})", industry.name, industry.id);
                for specialization in &industry.sub_industries {
                    println!("  - {}", specialization);
                }
            }
            Ok(())
        }
        Command::Insights { path } => {
            let content = read_file_content(&path).await?;
            let payload: serde_json::Value =
                serde_json::from_str(&content).context("Failed to parse insights JSON")?;
            print_insights(&payload);
            Ok(())
        }
    }
}

async fn check_resume(
    resume: PathBuf,
    job_description: String,
    seed: Option<u64>,
    no_delay: bool,
) -> Result<()> {
    let mut config = AppConfig::load()?;
    if no_delay {
        config.upload_delay = Duration::ZERO;
    }
    info!("ATS service: {}", config.ats.base_url);

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let checker = ResumeChecker::from_config(&config, notifier.clone())?;

    let document = ResumeDocument::from_path(&resume).await?;
    let session = match CheckerSession::new().select_file(document) {
        Ok(session) => session.with_job_description(job_description),
        Err(e) => {
            notifier.error(e.message());
            anyhow::bail!(e);
        }
    };
    let session = Arc::new(Mutex::new(session));

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match checker.submit(&session, &mut rng).await {
        RunOutcome::Completed { analysis, source } => {
            println!("{}", render_report(&analysis, source));
            Ok(())
        }
        RunOutcome::Rejected(e) => Err(e.into()),
        RunOutcome::Failed(e) => Err(e.into()),
        RunOutcome::Abandoned => anyhow::bail!("Analysis was abandoned"),
    }
}

fn print_insights(payload: &serde_json::Value) {
    let Some(insights) = SafeInsights::coerce(payload) else {
        println!("No insights available");
        return;
    };

    let (last_updated, next_update) = insights.update_labels(chrono::Utc::now());
    println!("Last updated: {}", last_updated);
    println!(
        "Market outlook: {} (next update {})",
        insights.market_outlook, next_update
    );
    println!("Industry growth: {}", insights.growth_label());
    println!("Demand level: {}", insights.demand_level);

    if !insights.top_skills.is_empty() {
        println!("Top skills: {}", insights.top_skills.join(", "));
    }

    let chart = insights.salary_chart();
    if chart.is_empty() {
        println!("No salary data available");
    } else {
        println!("Salary ranges (K):");
        for point in chart {
            println!(
                "  {}: min {} / median {} / max {}",
                point.name, point.min, point.median, point.max
            );
        }
    }

    if insights.key_trends.is_empty() {
        println!("No trends available");
    } else {
        println!("Key trends:");
        for trend in &insights.key_trends {
            println!("  - {}", trend);
        }
    }

    if insights.recommended_skills.is_empty() {
        println!("No recommended skills available");
    } else {
        println!(
            "Recommended skills: {}",
            insights.recommended_skills.join(", ")
        );
    }
}
