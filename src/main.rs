use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rego::cli::run_release;
use rego::config::{Config, ConfigOverrides};
use rego::ui;
use rego::version::BuildInfo;

#[derive(clap::Parser)]
#[command(
    name = "rego",
    about = "Build and install a Go program from its Git repository with embedded release information",
    long_about = "Builds and installs a binary release of a Go source tree while embedding its release \
information (GitCommit, BuildTimestamp, ReleaseVersion, GoVersion) through public string variables \
of a package. All source files must be committed before running; the selected commit is checked \
out and left checked out.",
    disable_version_flag = true
)]
struct Args {
    #[arg(
        short = 'w',
        long = "work-directory",
        env = "REGO_WORK_DIR",
        help = "Directory containing the project and its Git repository [default: current directory]"
    )]
    work_directory: Option<PathBuf>,

    #[arg(
        short,
        long,
        env = "REGO_BRANCH",
        help = "Branch whose most recent commit is released [default: develop]"
    )]
    branch: Option<String>,

    #[arg(
        short,
        long,
        env = "REGO_COMMIT",
        help = "Commit hash to release, overrides --branch"
    )]
    commit: Option<String>,

    #[arg(
        short,
        long,
        env = "REGO_TAG",
        help = "Tag to release, overrides --branch and --commit"
    )]
    tag: Option<String>,

    #[arg(
        short,
        long,
        env = "REGO_RELEASE",
        help = "Release version to embed [default: tag name, or SNAPSHOT]"
    )]
    release: Option<String>,

    #[arg(
        short,
        long,
        env = "REGO_PACKAGE",
        help = "Package declaring GitCommit, BuildTimestamp, ReleaseVersion and GoVersion [default: main]"
    )]
    package: Option<String>,

    #[arg(
        short,
        long,
        env = "REGO_IGNORE_TAG_PREFIX",
        help = "Prefix trimmed off the tag name when deriving the release version"
    )]
    ignore_tag_prefix: Option<String>,

    #[arg(long, env = "REGO_CONFIG", help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Show more verbose output")]
    verbose: bool,

    #[arg(short = 'v', long, help = "Print version information and exit")]
    version: bool,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            config_path: args.config,
            work_dir: args.work_directory,
            tag: args.tag,
            commit: args.commit,
            branch: args.branch,
            release: args.release,
            ignore_tag_prefix: args.ignore_tag_prefix,
            package: args.package,
            verbose: args.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        ui::display_report(&ui::version_report(&BuildInfo::current()));
        return Ok(());
    }

    init_logging(args.verbose);

    let config = match Config::from_overrides(args.into()) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if config.verbose {
        ui::display_report(&ui::input_report(&config));
    }

    match run_release(&config) {
        Ok(outcome) => {
            ui::display_success(&format!(
                "Installed release {} from commit {}",
                outcome.target.release(),
                outcome.target.commit()
            ));
            Ok(())
        }
        Err(e) => {
            log::debug!("release aborted with {:?} error", e.kind());
            ui::display_error(&e.into_chain().render());
            std::process::exit(1);
        }
    }
}
