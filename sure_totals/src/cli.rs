use std::{collections::HashSet, num::NonZeroUsize, path::PathBuf};

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    Command,
};

use anyhow::Context;

use sure_core::DEFAULT_IPCR_COLUMN;
use utils::{init_log, LogLevel};

use crate::{config::*, inputs::*};

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
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_parser(value_parser!(NonZeroUsize))
                .value_name("INT")
                .help("Set number of threads used to read input files [default: available cores]"),
        )
        .arg(
            Arg::new("cols")
                .short('c')
                .long("cols")
                .value_parser(value_parser!(String))
                .value_name("COLUMN[,COLUMN...]")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .required(true)
                .help("cDNA count columns to total (the iPCR column is added if not listed)"),
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
            Arg::new("input_prefix")
                .short('P')
                .long("input-prefix")
                .value_parser(value_parser!(String))
                .value_name("STRING")
                .help("Collect input files <prefix>_<chrom>.txt[.gz] from the input directory"),
        )
        .arg(
            Arg::new("input_dir")
                .short('D')
                .long("input-dir")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .requires("input_prefix")
                .help("Set input directory [default: current directory]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Output file for total counts"),
        )
        .arg(
            Arg::new("input")
                .value_parser(value_parser!(PathBuf))
                .value_name("COUNT_FILE")
                .num_args(0..)
                .help("SuRE count files for all chromosomes of one library"),
        )
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    let nt = m
        .get_one::<NonZeroUsize>("threads")
        .map(|x| usize::from(*x))
        .unwrap_or_else(num_cpus::get);

    let ipcr_column = m
        .get_one::<String>("ipcr_col")
        .expect("Missing default iPCR column")
        .clone();

    let mut columns: Vec<String> = m
        .get_many::<String>("cols")
        .expect("Missing count columns")
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();
    // Each column is only totalled once
    let mut seen = HashSet::new();
    columns.retain(|c| seen.insert(c.clone()));
    if !columns.contains(&ipcr_column) {
        columns.push(ipcr_column.clone())
    }
    debug!("Count columns: {:?}", columns);

    let mut input_files: Vec<PathBuf> = m
        .get_many::<PathBuf>("input")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if let Some(prefix) = m.get_one::<String>("input_prefix") {
        let found = collect_count_files(m.get_one::<PathBuf>("input_dir"), prefix)
            .with_context(|| "Error collecting input files")?;
        input_files.extend(found)
    }

    if input_files.is_empty() {
        return Err(anyhow!("No input files specified"));
    }
    debug!("Number of input files: {}", input_files.len());

    let output = m
        .get_one::<PathBuf>("output")
        .expect("Missing output file")
        .to_owned();

    let mut cfg = Config::new(input_files, columns, ipcr_column, output);
    cfg.set_threads(nt);

    Ok(cfg)
}
