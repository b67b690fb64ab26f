use clap::{Parser, Subcommand};
use projdiff_common::{
    load_config, AppConfig, ComparisonReport, DifferenceKind, ProjDiffError, ProjectSnapshot,
    SectionOutcome,
};
use projdiff_core::{
    all_available_comparators, default_comparators, filter_snapshot, load_snapshot,
    ComparatorIdentity, ComparisonEngine, DefaultSystem, System,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 30;

const EXIT_CLEAN: i32 = 0;
const EXIT_DIFFERENCES: i32 = 1;
const EXIT_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(name = "projdiff")]
#[command(author = "ProjDiff Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Structural comparison utility for project build descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two project snapshots
    Compare {
        /// Left (before) snapshot path, JSON or YAML
        left: PathBuf,

        /// Right (after) snapshot path, JSON or YAML
        right: PathBuf,

        /// Run only the named comparators (can be specified multiple times)
        #[arg(short = 'o', long = "only")]
        only: Vec<String>,

        /// Run every comparator, including resolved_settings
        #[arg(short = 'a', long, conflicts_with = "only")]
        all: bool,

        /// Restrict comparison to the named targets (can be repeated)
        #[arg(short = 't', long = "target")]
        targets: Vec<String>,

        /// Restrict comparison to the named configurations (can be repeated)
        #[arg(short = 'c', long = "configuration")]
        configurations: Vec<String>,

        /// Command used to resolve effective build settings
        #[arg(long)]
        resolver: Option<String>,

        /// Timeout for the resolver command in seconds
        #[arg(long)]
        resolver_timeout: Option<u64>,

        /// Run comparators in parallel
        #[arg(short = 'p', long)]
        parallel: bool,

        /// Show only sections with differences or failures
        #[arg(short = 'd', long)]
        diff_only: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Disable ANSI colors in output
        #[arg(long)]
        no_color: bool,
    },

    /// List the built-in comparators
    List {
        /// Output the list as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing to stderr (so JSON output can go cleanly to stdout)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Compare {
            left,
            right,
            only,
            all,
            targets,
            configurations,
            resolver,
            resolver_timeout,
            parallel,
            diff_only,
            json,
            no_color,
        } => {
            match run_compare(CompareArgs {
                left,
                right,
                only,
                all,
                targets,
                configurations,
                resolver,
                resolver_timeout,
                parallel,
                diff_only,
                json,
                no_color,
            }) {
                Ok(code) => code,
                Err(e) => {
                    error!("Comparison failed: {}", e);
                    EXIT_FAILURE
                }
            }
        }
        Commands::List { json } => match run_list(json) {
            Ok(()) => EXIT_CLEAN,
            Err(e) => {
                error!("Listing failed: {}", e);
                EXIT_FAILURE
            }
        },
    };

    std::process::exit(exit_code);
}

struct CompareArgs {
    left: PathBuf,
    right: PathBuf,
    only: Vec<String>,
    all: bool,
    targets: Vec<String>,
    configurations: Vec<String>,
    resolver: Option<String>,
    resolver_timeout: Option<u64>,
    parallel: bool,
    diff_only: bool,
    json: bool,
    no_color: bool,
}

fn run_compare(args: CompareArgs) -> anyhow::Result<i32> {
    let loaded = load_config(false)?;
    let config = loaded.config;

    let selection = build_selection(&args.only, args.all, &config)?;
    info!("Selected {} comparators", selection.len());

    let left = load_snapshot(&args.left)?;
    let right = load_snapshot(&args.right)?;
    info!("Comparing '{}' with '{}'", left.name, right.name);

    let target_filter = build_filter(&args.targets);
    let configuration_filter = build_filter(&args.configurations);
    validate_filters(&left, &right, &args.targets, &args.configurations)?;

    let left = filter_snapshot(&left, target_filter.as_ref(), configuration_filter.as_ref());
    let right = filter_snapshot(&right, target_filter.as_ref(), configuration_filter.as_ref());

    let system = build_system(&args.resolver, args.resolver_timeout, &config);
    let engine = ComparisonEngine::new(selection)
        .with_system(system)
        .with_parallel(args.parallel);

    let report = engine.compare(&left, &right)?;

    if args.json {
        let output = serde_json::to_string_pretty(&JsonReport {
            left: &args.left,
            right: &args.right,
            difference_count: report.difference_count(),
            failed: report.has_failures(),
            report: &report,
        })?;
        println!("{output}");
    } else {
        let use_color = !args.no_color && std::io::stdout().is_terminal();
        render_text(&report, use_color, args.diff_only);
    }

    if report.has_failures() {
        Ok(EXIT_FAILURE)
    } else if report.has_differences() {
        Ok(EXIT_DIFFERENCES)
    } else {
        Ok(EXIT_CLEAN)
    }
}

fn run_list(json: bool) -> anyhow::Result<()> {
    let default_tags: Vec<String> = default_comparators().iter().map(|i| i.tag()).collect();

    if json {
        let entries: Vec<JsonCatalogEntry> = all_available_comparators()
            .iter()
            .map(|identity| {
                let tag = identity.tag();
                JsonCatalogEntry {
                    default: default_tags.contains(&tag),
                    tag,
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for identity in all_available_comparators() {
        let tag = identity.tag();
        if default_tags.contains(&tag) {
            println!("{tag}");
        } else {
            println!("{tag} (not in default set)");
        }
    }
    Ok(())
}

/// Selection precedence: explicit --only tags, then --all, then the config
/// file's default tags, then the built-in default set.
fn build_selection(
    only: &[String],
    all: bool,
    config: &AppConfig,
) -> Result<Vec<ComparatorIdentity>, ProjDiffError> {
    if !only.is_empty() {
        return tags_to_identities(only);
    }
    if all {
        return Ok(all_available_comparators());
    }
    if !config.default_tags.is_empty() {
        return tags_to_identities(&config.default_tags);
    }
    Ok(default_comparators())
}

fn tags_to_identities(tags: &[String]) -> Result<Vec<ComparatorIdentity>, ProjDiffError> {
    tags.iter()
        .map(|tag| {
            ComparatorIdentity::from_tag(tag).ok_or_else(|| ProjDiffError::UnknownTag(tag.clone()))
        })
        .collect()
}

fn build_filter(names: &[String]) -> Option<BTreeSet<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names.iter().cloned().collect())
    }
}

/// A requested target or configuration that neither snapshot knows is a
/// configuration error, not an empty comparison.
fn validate_filters(
    left: &ProjectSnapshot,
    right: &ProjectSnapshot,
    targets: &[String],
    configurations: &[String],
) -> Result<(), ProjDiffError> {
    for name in targets {
        if left.target(name).is_none() && right.target(name).is_none() {
            return Err(ProjDiffError::Config(format!(
                "Target '{name}' not found in either snapshot"
            )));
        }
    }
    for name in configurations {
        let in_left = left.configuration(name).is_some()
            || left.targets.iter().any(|t| t.configuration(name).is_some());
        let in_right = right.configuration(name).is_some()
            || right.targets.iter().any(|t| t.configuration(name).is_some());
        if !in_left && !in_right {
            return Err(ProjDiffError::Config(format!(
                "Configuration '{name}' not found in either snapshot"
            )));
        }
    }
    Ok(())
}

fn build_system(
    resolver: &Option<String>,
    resolver_timeout: Option<u64>,
    config: &AppConfig,
) -> Arc<dyn System> {
    let command = resolver.clone().or_else(|| config.resolver_command.clone());
    let timeout = resolver_timeout
        .or(config.resolver_timeout_secs)
        .unwrap_or(DEFAULT_RESOLVER_TIMEOUT_SECS);

    let system = match command {
        Some(command) => DefaultSystem::new(command),
        None => DefaultSystem::from_env(),
    };
    Arc::new(system.with_timeout(Duration::from_secs(timeout)))
}

fn render_text(report: &ComparisonReport, use_color: bool, diff_only: bool) {
    let (green, red, yellow, reset) = if use_color {
        ("\x1b[32m", "\x1b[31m", "\x1b[33m", "\x1b[0m")
    } else {
        ("", "", "", "")
    };

    for section in &report.sections {
        match &section.outcome {
            SectionOutcome::Differences(diffs) if diffs.is_empty() => {
                if !diff_only {
                    println!("{green}OK{reset} {}", section.tag.to_uppercase());
                }
            }
            SectionOutcome::Differences(diffs) => {
                println!("{red}DIFF{reset} {}", section.tag.to_uppercase());
                for diff in diffs {
                    let location = if diff.context.is_empty() {
                        String::new()
                    } else {
                        format!("{}: ", diff.context.join(" > "))
                    };
                    match diff.kind {
                        DifferenceKind::OnlyInLeft => {
                            println!("  - {location}{}", diff.entity);
                        }
                        DifferenceKind::OnlyInRight => {
                            println!("  + {location}{}", diff.entity);
                        }
                        DifferenceKind::ValueDifferent => {
                            println!(
                                "  ~ {location}{}: {} -> {}",
                                diff.entity,
                                diff.left_value.as_deref().unwrap_or_default(),
                                diff.right_value.as_deref().unwrap_or_default()
                            );
                        }
                    }
                }
            }
            SectionOutcome::Failed(failure) => {
                println!(
                    "{yellow}FAILED{reset} {} ({})",
                    section.tag.to_uppercase(),
                    failure.message
                );
            }
        }
    }

    let summary = format!(
        "{} differences across {} comparators",
        report.difference_count(),
        report.sections.len()
    );
    println!("\n{summary}");
}

#[derive(Serialize)]
struct JsonReport<'a> {
    left: &'a PathBuf,
    right: &'a PathBuf,
    difference_count: usize,
    failed: bool,
    report: &'a ComparisonReport,
}

#[derive(Serialize)]
struct JsonCatalogEntry {
    tag: String,
    default: bool,
}
