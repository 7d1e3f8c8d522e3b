use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use semversioner::config::{self, Config};
use semversioner::git::{Backend, Git2Repository, GitCli, History, SnapshotSource};
use semversioner::{logging, render_version, ui, ReleaseType, VersionAnalyzer, Versioner};

#[derive(clap::Parser)]
#[command(
    name = "semversioner",
    version,
    about = "Determine the next semantic version from conventional commits"
)]
struct Args {
    #[arg(short, long, default_value = ".", help = "Working directory of a git repository")]
    directory: PathBuf,

    #[arg(short = 't', long = "type", value_enum, help = "The release type")]
    release_type: Option<ReleaseType>,

    #[arg(short, long, help = "The name of the pre-release (ie. alpha, rc)")]
    prerelease: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, value_enum, help = "History backend")]
    backend: Option<Backend>,

    #[arg(long, help = "Print the commit analysis to stderr")]
    explain: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match config::load_config_in(args.config.as_deref(), &args.directory) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let outcome = match args.backend.unwrap_or(config.git.backend) {
        Backend::Cli => {
            let git = GitCli::new(args.directory.clone()).with_binary(config.git.binary.clone());
            if !git.is_valid_git_dir() {
                ui::display_error(&format!(
                    "No valid git repository for working directory: {}",
                    git.work_dir().display()
                ));
                std::process::exit(1);
            }
            run(&git, &args, &config)
        }
        Backend::Libgit2 => {
            let repo = match Git2Repository::open(&args.directory) {
                Ok(repo) => repo,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            };
            run(&repo, &args, &config)
        }
    };

    match outcome {
        Ok(version) => {
            println!("{}", version);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Could not determine the next version: {}", e));
            std::process::exit(1);
        }
    }
}

fn run<H>(history: &H, args: &Args, config: &Config) -> semversioner::Result<String>
where
    H: History + SnapshotSource,
{
    let analyzer = VersionAnalyzer::new(&config.versioning)?;
    let release_type = args.release_type.unwrap_or(config.release.release_type);
    let prerelease = args
        .prerelease
        .as_deref()
        .or(config.release.prerelease.as_deref());

    let release = Versioner::new(history, analyzer).next_version(release_type, prerelease)?;

    if args.explain {
        if let Some(analysis) = &release.analysis {
            ui::display_analysis(analysis, &config.versioning.tag_prefix);
        }
    }

    Ok(render_version(&release.version, &config.versioning.tag_prefix))
}
