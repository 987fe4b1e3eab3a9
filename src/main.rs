use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use c3check::{
    ast::ast::Unit,
    display_error,
    errors::errors::Error,
    parser::parser::parse_unit,
    type_checker::{diagnostics::Diagnostics, type_checker::type_check},
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "c3check", bin_name = "c3check")]
#[command(about = "Type checker for c3 module sources")]
struct Args {
    /// Module sources making up one compilation unit
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Log every function and diagnostic
    #[arg(short, long)]
    verbose: bool,

    /// Print function signatures after a clean check
    #[arg(long)]
    print_types: bool,
}

/// A loaded source file, keyed by the name used in error positions.
struct Source {
    name: String,
    text: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut sources = Vec::with_capacity(args.files.len());
    for path in args.files.iter() {
        match read_to_string(path) {
            Ok(text) => sources.push(Source {
                name: path.to_string_lossy().into_owned(),
                text,
            }),
            Err(err) => {
                error!(file = %path.display(), "failed to read source: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut unit = match parse_unit(
        sources
            .iter()
            .map(|source| (source.name.as_str(), source.text.as_str())),
    ) {
        Ok(unit) => unit,
        Err(err) => {
            report(&err, &sources);
            return ExitCode::FAILURE;
        }
    };
    info!(modules = unit.modules.len(), "parsed unit");

    let mut diagnostics = Diagnostics::new();
    let result = type_check(&mut unit, &mut diagnostics);

    for err in diagnostics.errors() {
        report(err, &sources);
    }

    match result {
        Ok(_) => {
            if args.print_types {
                print_signatures(&unit);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            // The rollup only counts what was already reported above.
            if err.get_error_name() != "SemanticErrors" {
                report(&err, &sources);
            }
            eprintln!(
                "{}: {} error(s)",
                err.get_error_name(),
                diagnostics.len().max(1)
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(err: &Error, sources: &[Source]) {
    let file = err.get_position().1.as_str();
    match sources.iter().find(|source| source.name == file) {
        Some(source) => display_error(err, &source.name, &source.text),
        None => display_error(err, file, ""),
    }
}

fn print_signatures(unit: &Unit) {
    for module in unit.modules.iter() {
        for function in module.functions.iter() {
            let parameters = function
                .parameters
                .iter()
                .map(|parameter| parameter.typ.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            println!(
                "{}({}) -> {}",
                function.qualified_name(),
                parameters,
                function.return_type
            );
        }
    }
}
