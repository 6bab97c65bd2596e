#![deny(unsafe_code)]
//! CLI binary for hue-sort.
//!
//! Subcommands:
//! - `sort --src <DIR>` — file images into color folders (dry run by default)
//! - `classify <FILE>...` — print label, hue and reason per image
//! - `labels` — print the hue range table

mod error;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use error::CliError;
use hue_sort_core::{label, ClassifierConfig, ColorLabel, HUE_RANGES};
use hue_sort_sorter::organize::default_dest;
use hue_sort_sorter::report::ranked_counts;
use hue_sort_sorter::{
    analyze_batch, sort_folder, tally_labels, SortOptions, SortSummary, TransferMode,
};
use tracing::Level;

#[derive(Parser)]
#[command(name = "hue-sort", about = "Sort images into folders by dominant color")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log detail. Only warnings are shown by default; -v adds the
    /// per-file `[action] file -> color` lines, -vv adds diagnostics.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file with classifier settings (min_sat, min_val, bins, sample_width, sample_height).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Classifier overrides; each one replaces the value from defaults or `--config`.
#[derive(Args, Default)]
struct Thresholds {
    /// Minimum saturation for a pixel to vote (0-1, default 0.15).
    #[arg(long)]
    min_sat: Option<f64>,

    /// Minimum value for a pixel to vote (0-1, default 0.15).
    #[arg(long)]
    min_val: Option<f64>,

    /// Number of hue histogram bins (default 36).
    #[arg(long)]
    bins: Option<usize>,

    /// Sample size images are resized to before analysis (default 50 50).
    #[arg(long, num_args = 2, value_names = ["W", "H"])]
    resize: Option<Vec<u32>>,
}

#[derive(Subcommand)]
enum Command {
    /// Sort images directly inside a folder (non-recursive) into color folders.
    Sort {
        /// Source folder.
        #[arg(long)]
        src: PathBuf,

        /// Destination root [default: <src>/sorted_by_color].
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Move files (default).
        #[arg(long = "move")]
        move_files: bool,

        /// Copy files instead of moving them.
        #[arg(long)]
        copy: bool,

        /// Only plan and log (default).
        #[arg(long, overrides_with = "no_dry_run")]
        dry_run: bool,

        /// Actually move or copy files.
        #[arg(long, overrides_with = "dry_run")]
        no_dry_run: bool,

        /// Put images that fail to decode in `unreadable/` instead of `neutral/`.
        #[arg(long)]
        separate_errors: bool,

        #[command(flatten)]
        thresholds: Thresholds,
    },
    /// Classify images and print their labels without moving anything.
    Classify {
        /// Image files to classify.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        thresholds: Thresholds,
    },
    /// Print the hue ranges behind each color label.
    Labels,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Starts from defaults or `--config`, applies flag overrides, and validates.
fn resolve_config(path: Option<&Path>, t: &Thresholds) -> Result<ClassifierConfig, CliError> {
    let mut config = match path {
        Some(p) => ClassifierConfig::from_json_file(p).map_err(|e| CliError::config(p, e))?,
        None => ClassifierConfig::default(),
    };
    if let Some(v) = t.min_sat {
        config.min_sat = v;
    }
    if let Some(v) = t.min_val {
        config.min_val = v;
    }
    if let Some(v) = t.bins {
        config.bins = v;
    }
    if let Some(&[w, h]) = t.resize.as_deref() {
        config.sample_width = w;
        config.sample_height = h;
    }
    config.validate().map_err(CliError::from_validation)?;
    Ok(config)
}

/// `--copy` wins when both transfer flags are given; neither means move.
fn transfer_mode(move_files: bool, copy: bool) -> TransferMode {
    match (move_files, copy) {
        (_, true) => TransferMode::Copy,
        (true, false) | (false, false) => TransferMode::Move,
    }
}

fn print_summary(summary: &SortSummary) {
    println!();
    if summary.dry_run {
        println!("=== Summary (dry run) ===");
    } else {
        println!("=== Summary ===");
    }
    println!("Total files encountered: {}", summary.total);
    println!("Images processed: {}", summary.processed);
    println!("Skipped (non-image): {}", summary.skipped);
    println!("Errors: {}", summary.errors);
    println!("Assigned counts by color:");
    for c in &summary.counts {
        println!("  {}: {}", c.bucket, c.count);
    }
    match &summary.log_path {
        Some(path) => println!("Log written to: {}", path.display()),
        None => println!("Log not written (see warnings above)"),
    }
}

fn format_ranges(ranges: &[hue_sort_core::HueRange]) -> String {
    ranges
        .iter()
        .map(|r| format!("[{}, {})", r.start, r.end))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Sort {
            src,
            dest,
            move_files,
            copy,
            dry_run: _,
            no_dry_run,
            separate_errors,
            thresholds,
        } => {
            let classifier = resolve_config(config_path, &thresholds)?;
            let dest = dest.unwrap_or_else(|| default_dest(&src));
            let options = SortOptions {
                src,
                dest,
                mode: transfer_mode(move_files, copy),
                dry_run: !no_dry_run,
                separate_errors,
                classifier,
            };

            let summary = sort_folder(&options)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Command::Classify { files, thresholds } => {
            let config = resolve_config(config_path, &thresholds)?;
            let results = analyze_batch(&files, &config);

            if cli.json {
                let rows: Vec<serde_json::Value> = files
                    .iter()
                    .zip(&results)
                    .map(|(file, r)| {
                        serde_json::json!({
                            "file": file.display().to_string(),
                            "label": label(r.hue, &r.reason),
                            "hue": r.hue,
                            "reason": r.reason,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (file, r) in files.iter().zip(&results) {
                    let hue = r
                        .hue
                        .map(|h| format!("{h:.1}"))
                        .unwrap_or_else(|| "N/A".to_string());
                    println!(
                        "{}: {} (hue={hue}, reason={})",
                        file.display(),
                        label(r.hue, &r.reason),
                        r.reason
                    );
                }
                if files.len() > 1 {
                    let counts = ranked_counts(&tally_labels(&results, false));
                    let line = counts
                        .iter()
                        .map(|c| format!("{} {}", c.bucket, c.count))
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("Counts: {line}");
                }
            }
        }
        Command::Labels => {
            if cli.json {
                let ranges: Vec<serde_json::Value> = HUE_RANGES
                    .iter()
                    .map(|(l, rs)| {
                        serde_json::json!({
                            "label": l,
                            "ranges": rs.iter().map(|r| [r.start, r.end]).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                let info = serde_json::json!({
                    "ranges": ranges,
                    "dark": "no pixel passed the gate and mean value < 0.12",
                    "neutral": "no dominant hue (gray, filtered out, or unreadable)",
                    "other": "hue outside every range",
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Hue ranges (degrees, [start, end)):");
                for (l, rs) in HUE_RANGES {
                    println!("  {:<8}{}", l.as_str(), format_ranges(rs));
                }
                println!("Fallback labels:");
                for l in [ColorLabel::Dark, ColorLabel::Neutral, ColorLabel::Other] {
                    println!("  {l}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use hue_sort_core::SortError;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sort_defaults_to_dry_run_move() {
        let cli = parse(&["hue-sort", "sort", "--src", "/walls"]);
        match cli.command {
            Command::Sort {
                copy,
                no_dry_run,
                dest,
                ..
            } => {
                assert!(!copy);
                assert!(!no_dry_run);
                assert!(dest.is_none());
            }
            _ => panic!("expected sort"),
        }
    }

    #[test]
    fn last_dry_run_flag_wins() {
        let cli = parse(&["hue-sort", "sort", "--src", "/w", "--dry-run", "--no-dry-run"]);
        let Command::Sort { no_dry_run, .. } = cli.command else {
            panic!("expected sort");
        };
        assert!(no_dry_run);

        let cli = parse(&["hue-sort", "sort", "--src", "/w", "--no-dry-run", "--dry-run"]);
        let Command::Sort { no_dry_run, .. } = cli.command else {
            panic!("expected sort");
        };
        assert!(!no_dry_run);
    }

    #[test]
    fn resize_takes_two_values() {
        let cli = parse(&["hue-sort", "classify", "a.png", "--resize", "64", "32"]);
        let Command::Classify { thresholds, .. } = cli.command else {
            panic!("expected classify");
        };
        let config = resolve_config(None, &thresholds).unwrap();
        assert_eq!((config.sample_width, config.sample_height), (64, 32));
    }

    #[test]
    fn classify_requires_files() {
        assert!(Cli::try_parse_from(["hue-sort", "classify"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_sat": 0.3, "bins": 12}}"#).unwrap();
        let thresholds = Thresholds {
            bins: Some(72),
            ..Default::default()
        };
        let config = resolve_config(Some(file.path()), &thresholds).unwrap();
        assert_eq!(config.min_sat, 0.3);
        assert_eq!(config.bins, 72);
    }

    #[test]
    fn out_of_range_flag_names_the_flag() {
        let thresholds = Thresholds {
            min_val: Some(2.0),
            ..Default::default()
        };
        let err = resolve_config(None, &thresholds).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(matches!(err, CliError::InvalidFlag { flag: "min-val", .. }));
    }

    #[test]
    fn unreadable_config_reports_its_path() {
        let path = Path::new("/nonexistent/cfg.json");
        let err = resolve_config(Some(path), &Thresholds::default()).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        match err {
            CliError::Config { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, SortError::Io(_)));
            }
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_config_value_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_val": 3.0}}"#).unwrap();
        let err = resolve_config(Some(file.path()), &Thresholds::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config {
                source: SortError::InvalidParameter { .. },
                ..
            }
        ));
    }

    #[test]
    fn zero_resize_names_the_resize_flag() {
        let cli = parse(&["hue-sort", "classify", "a.png", "--resize", "0", "40"]);
        let Command::Classify { thresholds, .. } = cli.command else {
            panic!("expected classify");
        };
        let err = resolve_config(None, &thresholds).unwrap_err();
        assert!(matches!(err, CliError::InvalidFlag { flag: "resize", .. }));
    }

    fn sort_mode(args: &[&str]) -> TransferMode {
        let mut argv = vec!["hue-sort", "sort", "--src", "/w"];
        argv.extend_from_slice(args);
        let Command::Sort {
            move_files, copy, ..
        } = parse(&argv).command
        else {
            panic!("expected sort");
        };
        transfer_mode(move_files, copy)
    }

    #[test]
    fn transfer_flags_resolve_with_copy_winning() {
        assert_eq!(sort_mode(&[]), TransferMode::Move);
        assert_eq!(sort_mode(&["--move"]), TransferMode::Move);
        assert_eq!(sort_mode(&["--copy"]), TransferMode::Copy);
        assert_eq!(sort_mode(&["--move", "--copy"]), TransferMode::Copy);
        assert_eq!(sort_mode(&["--copy", "--move"]), TransferMode::Copy);
    }

    #[test]
    fn format_ranges_joins_wrapping_parts() {
        let (_, red) = HUE_RANGES[0];
        assert_eq!(format_ranges(red), "[345, 360) + [0, 15)");
    }
}
