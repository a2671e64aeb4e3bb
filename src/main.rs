use std::path::Path;

use anyhow::Result;
use clap::Parser;

use autover::changelog;
use autover::config;
use autover::engine::{ComputeEngine, ComputeResult, NoReleaseReason};
use autover::git::{GitRepository, Vcs};
use autover::manifest::CargoManifest;
use autover::notes::{self, GhCli, PullRequestSource};
use autover::ui;

#[derive(clap::Parser)]
#[command(
    name = "autover",
    about = "Compute the next semantic version from conventional commits"
)]
struct Args {
    #[arg(long, help = "Emit the full compute result as formatted JSON")]
    json: bool,

    #[arg(long, help = "Reserved for CI pipelines; no behavior change")]
    ci: bool,

    #[arg(long, help = "Preview what would be written without touching files")]
    preview: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Update the changelog with the section for the next version
    Changelog {
        #[arg(short, long, help = "Custom configuration file path")]
        config: Option<String>,
    },
    /// Render release notes from merged pull requests since the last tag
    Notes {
        #[arg(short, long, help = "Custom configuration file path")]
        config: Option<String>,
    },
}

const EXIT_NO_COMMITS: i32 = 2;
const EXIT_NO_BUMP: i32 = 10;

fn main() {
    let args = Args::parse();

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            1
        }
    };

    std::process::exit(code);
}

fn run(args: Args) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let vcs = GitRepository::discover(&cwd);
    let manifest = CargoManifest::new(&cwd);
    let engine = ComputeEngine::new(args.preview);

    // --ci is reserved: accepted for pipeline wrappers, no behavior change.
    let _ = args.ci;

    let result = engine.compute(&vcs, &manifest);

    match args.command {
        None => run_compute(args.json, &result),
        Some(Command::Changelog { config }) => {
            run_changelog(config.as_deref(), &engine, &vcs, &result)
        }
        Some(Command::Notes { config }) => run_notes(config.as_deref(), &engine, &vcs, &result),
    }
}

fn no_release_exit(reason: NoReleaseReason) -> i32 {
    match reason {
        NoReleaseReason::NoCommits => EXIT_NO_COMMITS,
        NoReleaseReason::NoBumpDetected => EXIT_NO_BUMP,
    }
}

fn reason_text(reason: NoReleaseReason) -> &'static str {
    match reason {
        NoReleaseReason::NoCommits => "No commits since the last release",
        NoReleaseReason::NoBumpDetected => "No version bump detected in the analyzed commits",
    }
}

fn run_compute(json: bool, result: &ComputeResult) -> Result<i32> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(match result {
            ComputeResult::Release { .. } => 0,
            ComputeResult::NoRelease { reason, .. } => no_release_exit(*reason),
        });
    }

    match result {
        ComputeResult::Release { next_version, .. } => {
            println!("{}", next_version);
            Ok(0)
        }
        ComputeResult::NoRelease {
            reason,
            base_version,
            ..
        } => {
            ui::display_no_release(reason_text(*reason), base_version);
            Ok(no_release_exit(*reason))
        }
    }
}

fn run_changelog(
    config_path: Option<&str>,
    engine: &ComputeEngine,
    vcs: &GitRepository,
    result: &ComputeResult,
) -> Result<i32> {
    let config = config::load_config(config_path)?;

    match result {
        ComputeResult::Release { next_version, .. } => {
            let commits = engine.commits(vcs);

            if engine.preview() {
                print!("{}", changelog::render_section(next_version, &commits));
                ui::display_status(&format!(
                    "Preview only; {} not modified",
                    config.changelog.path
                ));
            } else {
                changelog::apply_to_file(
                    Path::new(&config.changelog.path),
                    &config.changelog.title,
                    next_version,
                    &commits,
                )?;
                ui::display_success(&format!(
                    "Updated {} for version {}",
                    config.changelog.path, next_version
                ));
            }
            Ok(0)
        }
        ComputeResult::NoRelease {
            reason,
            base_version,
            ..
        } => {
            ui::display_no_release(reason_text(*reason), base_version);
            Ok(no_release_exit(*reason))
        }
    }
}

fn run_notes(
    config_path: Option<&str>,
    engine: &ComputeEngine,
    vcs: &GitRepository,
    result: &ComputeResult,
) -> Result<i32> {
    let config = config::load_config(config_path)?;

    match result {
        ComputeResult::Release {
            base_version,
            next_version,
            ..
        } => {
            let since = vcs.last_tag().and_then(|tag| vcs.tag_date(&tag));
            let cwd = std::env::current_dir()?;
            let pull_requests = GhCli::new(cwd).merged_since(since.as_deref());

            let compare = notes::compare_link(
                config.project.repository.as_deref(),
                &config.project.tag_prefix,
                base_version,
                next_version,
            );
            let content = notes::render(next_version, &pull_requests, compare.as_deref());

            if engine.preview() {
                print!("{}", content);
                ui::display_status(&format!("Preview only; {} not written", config.notes.path));
            } else {
                notes::write_to_file(Path::new(&config.notes.path), &content)?;
                ui::display_success(&format!(
                    "Wrote {} for version {}",
                    config.notes.path, next_version
                ));
            }
            Ok(0)
        }
        ComputeResult::NoRelease {
            reason,
            base_version,
            ..
        } => {
            ui::display_no_release(reason_text(*reason), base_version);
            Ok(no_release_exit(*reason))
        }
    }
}
