// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Arguments are parsed
// with `clap`; all work is delegated to Layer 2 (application).
// This is the only layer that prints to stdout.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DirArgs, EpisodeArgs, SplitArgs};

use crate::application::diagnose_use_case::{FindBadUseCase, PcmStatsUseCase};
use crate::application::episode_use_case::EpisodeUseCase;
use crate::application::split_use_case::SplitUseCase;
use crate::data::reader::PcmReader;

#[derive(Parser, Debug)]
#[command(
    name = "audioset-meta",
    version,
    about = "Class splitting, episode sampling and audio checks for AudioSet meta-learning."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split(args)    => run_split(args),
            Commands::Episodes(args) => run_episodes(args),
            Commands::FindBad(args)  => run_find_bad(args),
            Commands::PcmStats(args) => run_pcm_stats(args),
        }
    }
}

fn run_split(args: SplitArgs) -> Result<()> {
    tracing::info!("Splitting classes from: {}", args.data);
    let report = SplitUseCase::new(args.into()).execute()?;

    println!(
        "{} training / {} evaluation labels, {} of {} samples dropped (started at {}).",
        report.num_train_labels,
        report.num_eval_labels,
        report.dropped,
        report.num_samples,
        report.initial_dropped
    );
    Ok(())
}

fn run_episodes(args: EpisodeArgs) -> Result<()> {
    let records = EpisodeUseCase::new(args.into()).execute()?;

    for (i, record) in records.iter().enumerate() {
        match record.time_steps {
            Some(t) => println!(
                "episode {}: {} steps, {} classes, {} time steps",
                i,
                record.steps.len(),
                record.classes.len(),
                t
            ),
            None => println!(
                "episode {}: {} steps, {} classes",
                i,
                record.steps.len(),
                record.classes.len()
            ),
        }
    }
    Ok(())
}

fn run_find_bad(args: DirArgs) -> Result<()> {
    let reader = PcmReader::new();
    FindBadUseCase::new(&args.dir, &reader).execute(|path| println!("{}", path.display()))?;
    Ok(())
}

fn run_pcm_stats(args: DirArgs) -> Result<()> {
    let reader = PcmReader::new();
    let stats = PcmStatsUseCase::new(&args.dir, &reader).execute(|s| {
        println!("mean={} variance={}", s.mean(), s.variance())
    })?;

    println!("final: mean={} variance={} over {} samples", stats.mean(), stats.variance(), stats.count);
    Ok(())
}
