// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags:
//
//   split     — label-disjoint class split of a segment manifest
//   episodes  — draw (and optionally fetch) meta-learning episodes
//   find-bad  — list audio files that fail to decode
//   pcm-stats — running mean / variance over all audio files
//
// Every *Args struct converts into its application-layer config
// via `From`, so Layer 2 never sees clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::episode_use_case::EpisodeConfig;
use crate::application::split_use_case::SplitConfig;
use crate::domain::partition::Side;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split classes into training and evaluation sets
    Split(SplitArgs),

    /// Sample meta-learning episodes from one side of a split
    Episodes(EpisodeArgs),

    /// Print every audio file that fails to decode
    FindBad(DirArgs),

    /// Print running PCM mean and variance over a directory
    PcmStats(DirArgs),
}

// ─── split ────────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Segment manifest (YTID, start, end, "label,label,...")
    #[arg(long)]
    pub data: String,

    /// Number of classes on the evaluation side
    #[arg(long, default_value_t = 50)]
    pub num_eval: usize,

    /// Hill-climbing iterations
    #[arg(long, default_value_t = 10_000)]
    pub iters: usize,

    #[arg(long, default_value = "train.txt")]
    pub train_out: String,

    #[arg(long, default_value = "eval.txt")]
    pub eval_out: String,

    /// Also write a JSON summary of the search here
    #[arg(long)]
    pub report: Option<String>,

    /// Seed for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<SplitArgs> for SplitConfig {
    fn from(a: SplitArgs) -> Self {
        SplitConfig {
            data_path:  a.data,
            num_eval:   a.num_eval,
            iterations: a.iters,
            train_out:  a.train_out,
            eval_out:   a.eval_out,
            report_out: a.report,
            seed:       a.seed,
        }
    }
}

// ─── episodes ─────────────────────────────────────────────────────────────────
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideArg {
    Train,
    Eval,
}

impl From<SideArg> for Side {
    fn from(s: SideArg) -> Self {
        match s {
            SideArg::Train => Side::Training,
            SideArg::Eval => Side::Evaluation,
        }
    }
}

#[derive(Args, Debug)]
pub struct EpisodeArgs {
    /// Directory of downloaded <id>_<start>.wav[.gz] clips
    #[arg(long)]
    pub dir: String,

    /// Segment manifest the clips were downloaded from
    #[arg(long)]
    pub manifest: String,

    /// Evaluation label list written by `split`
    #[arg(long, default_value = "eval.txt")]
    pub eval_labels: String,

    #[arg(long, value_enum, default_value_t = SideArg::Train)]
    pub side: SideArg,

    /// Classes per episode
    #[arg(long, default_value_t = 5)]
    pub classes: usize,

    /// Samples per episode
    #[arg(long, default_value_t = 20)]
    pub steps: usize,

    /// Number of episodes to draw
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Samples per time step; when non-zero the audio is read and chunked
    #[arg(long, default_value_t = 0)]
    pub chunk_size: usize,

    /// Apply time-stretch + noise augmentation when reading audio
    #[arg(long)]
    pub augment: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the sampled episodes as JSON
    #[arg(long)]
    pub out: Option<String>,
}

impl From<EpisodeArgs> for EpisodeConfig {
    fn from(a: EpisodeArgs) -> Self {
        EpisodeConfig {
            audio_dir:   a.dir,
            manifest:    a.manifest,
            eval_labels: a.eval_labels,
            side:        a.side.into(),
            num_classes: a.classes,
            num_steps:   a.steps,
            count:       a.count,
            chunk_size:  a.chunk_size,
            augment:     a.augment,
            seed:        a.seed,
            out:         a.out,
        }
    }
}

// ─── find-bad / pcm-stats ─────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct DirArgs {
    /// Directory of .wav / .wav.gz files
    #[arg(long)]
    pub dir: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_split_defaults() {
        let cli = Cli::try_parse_from(["audioset-meta", "split", "--data", "segments.csv"]).unwrap();
        let Commands::Split(args) = cli.command else {
            panic!("expected split");
        };
        let config = SplitConfig::from(args);
        assert_eq!(config.num_eval, 50);
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.train_out, "train.txt");
        assert_eq!(config.eval_out, "eval.txt");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_episodes_side_flag() {
        let cli = Cli::try_parse_from([
            "audioset-meta",
            "episodes",
            "--dir",
            "clips",
            "--manifest",
            "segments.csv",
            "--side",
            "eval",
            "--chunk-size",
            "400",
        ])
        .unwrap();
        let Commands::Episodes(args) = cli.command else {
            panic!("expected episodes");
        };
        let config = EpisodeConfig::from(args);
        assert_eq!(config.side, Side::Evaluation);
        assert_eq!(config.chunk_size, 400);
        assert_eq!(config.num_classes, 5);
        assert_eq!(config.num_steps, 20);
    }

    #[test]
    fn test_missing_required_flag() {
        assert!(Cli::try_parse_from(["audioset-meta", "find-bad"]).is_err());
    }
}
