use std::*;
use process;

use simple_logger::SimpleLogger;

use crate::config::Config;
use crate::session::AnalysisSession;
use crate::trace::TraceReplayer;

mod config;
mod diagnostic;
mod listing;
mod occurrences;
mod semantic;
mod session;
mod tables;
mod trace;

const HOST_ERROR_EXIT_CODE: i32 = 2;

fn main() {
    let config = Config::try_parse().unwrap_or_else(|err| {
        eprintln!("Something went wrong parsing the configuration: {:#}", err);
        process::exit(HOST_ERROR_EXIT_CODE);
    });

    if let Err(err) = SimpleLogger::new().with_level(config.log_level).init() {
        eprintln!("Cannot install logger: {}", err);
    }

    let trace = fs::read_to_string(&config.trace).unwrap_or_else(|err| {
        log::error!("cannot read {}: {}", config.trace.display(), err);
        eprintln!("Something went wrong reading the trace file: {}", err);
        process::exit(HOST_ERROR_EXIT_CODE);
    });

    let mut session = AnalysisSession::new(config.source_name.as_str());
    log::info!("analysing {}", session.source_name());
    TraceReplayer::default().run(&mut session, &trace).unwrap_or_else(|err| {
        log::error!("{:#}", err);
        eprintln!("Semantic analysis aborted: {:#}", err);
        process::exit(HOST_ERROR_EXIT_CODE);
    });

    for diagnostic in session.diagnostics() {
        println!("\n{}", diagnostic);
    }

    if !config.no_tables {
        match &config.output_dir {
            Some(dir) => listing::write_listings(&session, dir).unwrap_or_else(|err| {
                eprintln!("Something went wrong writing the tables: {:#}", err);
                process::exit(HOST_ERROR_EXIT_CODE);
            }),
            None => {
                println!();
                print!("{}", listing::token_table_listing(session.tokens()));
                println!();
                print!("{}", listing::symbol_table_listing(session.symbols()));
                println!();
                print!("{}", listing::constant_table_listing(session.constants()));
            }
        }
    }

    if session.has_error() {
        log::info!("{} diagnostics", session.diagnostics().len());
        process::exit(1);
    }
}
