// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use shelfmate_config::{Config, ConfigManager};
use std::path::PathBuf;

mod commands;

fn books_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn build_cli() -> Command {
    Command::new("shelfmate")
        .version("0.1.0")
        .author("Shelfmate Developers")
        .about("Personal book collection tracker")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding config.toml")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output regardless of the configured level")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List books after filtering and sorting")
                .arg(books_arg("books", "JSON file with the book collection"))
                .arg(Arg::new("query").short('q').long("query").value_name("TEXT").help("Match title or author"))
                .arg(Arg::new("state").short('s').long("state").value_name("STATE").help("new, pending, reading or read"))
                .arg(Arg::new("format").short('f').long("format").value_name("FORMAT").help("Exact format tag"))
                .arg(Arg::new("author").short('a').long("author").value_name("NAME").help("Author name contains"))
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_name("YEAR")
                        .value_parser(value_parser!(i32))
                        .help("Read in this year"),
                )
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_name("MONTH")
                        .value_parser(value_parser!(u32).range(1..=12))
                        .help("Read in this month (1-12)"),
                )
                .arg(Arg::new("sort").long("sort").value_name("KEY").help("Sort key (defaults to the configured key)"))
                .arg(Arg::new("desc").short('d').long("desc").help("Sort descending").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("stats")
                .about("Show reading statistics")
                .arg(books_arg("books", "JSON file with the book collection")),
        )
        .subcommand(
            Command::new("queue")
                .about("Show or reorder the pending queue")
                .arg(books_arg("books", "JSON file with the book collection"))
                .arg(
                    Arg::new("add")
                        .long("add")
                        .value_name("BOOK_ID")
                        .help("Append a book to the end of the queue")
                        .conflicts_with("move"),
                )
                .arg(
                    Arg::new("move")
                        .long("move")
                        .value_name("BOOK_ID")
                        .help("Pending book to move")
                        .requires("to"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("POSITION")
                        .value_parser(value_parser!(usize))
                        .help("New queue position, starting at 0"),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Make the remote collection match the local one")
                .arg(books_arg("local", "Local (authoritative) collection"))
                .arg(books_arg("remote", "Remote collection snapshot, rewritten in place"))
                .arg(
                    Arg::new("dry-run")
                        .short('n')
                        .long("dry-run")
                        .help("Show planned changes without writing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand(Command::new("init").about("Write a default config file if none exists"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("validate").about("Check the config file for problems"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(
                    Command::new("reset")
                        .about("Overwrite the config file with defaults")
                        .arg(Arg::new("force").short('f').long("force").help("Skip confirmation prompt").action(ArgAction::SetTrue)),
                ),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new(),
    }
    .context("Failed to resolve config directory")
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    let (config, load_error) = match manager.load_with_env_overrides() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let level = if matches.get_flag("verbose") {
        "debug".to_string()
    } else {
        config.app.log_level.to_string()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}, using defaults", e);
    }
    if !config.app.color_output {
        console::set_colors_enabled(false);
    }

    let data_dir = manager.data_dir(&config);

    match matches.subcommand() {
        Some(("list", sub_matches)) => commands::list_books(sub_matches, &config, &data_dir),
        Some(("stats", sub_matches)) => commands::show_stats(sub_matches, &config, &data_dir),
        Some(("queue", sub_matches)) => commands::manage_queue(sub_matches, &data_dir),
        Some(("sync", sub_matches)) => commands::sync_books(sub_matches, &config, &data_dir),
        Some(("config", sub_matches)) => commands::manage_config(&manager, sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
