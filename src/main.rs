use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use hostmon::commands::{self, monitor::MonitorOptions};
use hostmon::core::config::default_settings_path;

fn cli() -> Command {
    Command::new("hostmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Host telemetry monitor: CPU, memory, disk, battery and GPU")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("FILE")
                .help("Path to the settings JSON file")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("monitor")
                .about("Live metrics dashboard (default)")
                .arg(
                    Arg::new("interval-ms")
                        .short('i')
                        .long("interval-ms")
                        .value_name("MS")
                        .help("Refresh interval in milliseconds")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("compact")
                        .short('c')
                        .long("compact")
                        .help("Start in the compact view")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Print one poll of metrics and exit")
                .arg(
                    Arg::new("compact")
                        .short('c')
                        .long("compact")
                        .help("Print the compact summary only")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print both views and the raw readings as JSON")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("compact"),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Manage the settings file (use 'hostmon settings --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the effective settings"))
                .subcommand(Command::new("reset").about("Overwrite the settings file with defaults"))
                .subcommand(
                    Command::new("check")
                        .about("Create or repair the settings file and report whether it holds defaults"),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    hostmon::init_logging();

    let matches = cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    let settings_path = matches
        .get_one::<PathBuf>("settings")
        .cloned()
        .unwrap_or_else(default_settings_path);

    match matches.subcommand() {
        Some(("monitor", sub_matches)) => commands::monitor(sub_matches, &settings_path),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches, &settings_path),
        Some(("settings", sub_matches)) => commands::settings(sub_matches, &settings_path),
        Some(("version", _)) => commands::version(),
        _ => commands::monitor::run(MonitorOptions::default(), &settings_path),
    }
}
