use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    Command,
};

use sure_core::{DEFAULT_IPCR_COLUMN, DEFAULT_LIBRARY_COLUMN, DEFAULT_NORM_PREFIX};
use utils::{init_log, LogLevel};

use crate::config::*;

/// Set up definition of command options for clap
fn cli_model() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .author(crate_authors!())
        .arg(
            Arg::new("timestamp")
                .short('X')
                .long("timestamp")
                .value_parser(value_parser!(stderrlog::Timestamp))
                .value_name("GRANULARITY")
                .default_value("none")
                .help("Prepend log entries with a timestamp"),
        )
        .arg(
            Arg::new("loglevel")
                .short('l')
                .long("loglevel")
                .value_name("LOGLEVEL")
                .value_parser(value_parser!(LogLevel))
                .ignore_case(true)
                .default_value("warn")
                .help("Set log level"),
        )
        .arg(
            Arg::new("quiet")
                .action(ArgAction::SetTrue)
                .long("quiet")
                .conflicts_with("loglevel")
                .help("Silence all output"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("SuRE count file for one chromosome"),
        )
        .arg(
            Arg::new("total_counts")
                .short('T')
                .long("total-counts")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Total count file for the library (output of sure_totals)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Output file (gzip compressed)"),
        )
        .arg(
            Arg::new("library")
                .short('L')
                .long("library")
                .value_parser(value_parser!(String))
                .value_name("STRING")
                .required(true)
                .help("Name of the library being processed"),
        )
        .arg(
            Arg::new("ipcr_col")
                .short('I')
                .long("ipcr-col")
                .value_parser(value_parser!(String))
                .value_name("COLUMN")
                .default_value(DEFAULT_IPCR_COLUMN)
                .help("Name of the iPCR (integration) count column"),
        )
        .arg(
            Arg::new("norm_prefix")
                .long("norm-prefix")
                .value_parser(value_parser!(String))
                .value_name("STRING")
                .default_value(DEFAULT_NORM_PREFIX)
                .help("Prefix for normalized cDNA column names"),
        )
        .arg(
            Arg::new("lib_col")
                .long("lib-col")
                .value_parser(value_parser!(String))
                .value_name("COLUMN")
                .default_value(DEFAULT_LIBRARY_COLUMN)
                .help("Name of the library column"),
        )
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    let get_path = |s: &str| {
        m.get_one::<PathBuf>(s)
            .expect("Missing required path")
            .to_owned()
    };
    let get_string = |s: &str| {
        m.get_one::<String>(s)
            .expect("Missing required or default value")
            .clone()
    };

    let mut cfg = Config::new(
        get_path("input"),
        get_path("total_counts"),
        get_path("output"),
        get_string("library"),
    );
    cfg.set_ipcr_column(get_string("ipcr_col"));
    cfg.set_norm_prefix(get_string("norm_prefix"));
    cfg.set_library_column(get_string("lib_col"));

    Ok(cfg)
}
