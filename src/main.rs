use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, Command};
use setup_eclipse::{
    api::{self, SetupOptions},
    config::Config,
};
use std::path::{Path, PathBuf};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML file overriding the bazel executable, targets and jar paths"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Query bazel and show the files that would be written, without building")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("project_name")
                .value_name("PROJECT_NAME")
                .help("Name shown for the project when it is imported into eclipse"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = Config::load(
        matches.get_one::<PathBuf>("config").map(PathBuf::as_path),
        Path::new("."),
    )?;

    let options = SetupOptions {
        project_name: matches.get_one::<String>("project_name").cloned(),
        dry_run: matches.get_flag("dry-run"),
    };

    api::setup(&config, &options)?;

    Ok(())
}

fn init_logging(is_verbose: bool) {
    let default_level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    log::debug!("executing in verbose mode");
}
