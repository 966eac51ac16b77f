use ariadne::Source;
use calculus_compute::symbolic::{derivative, relation::rules::default_relations, simplify_with_steps};
use calculus_error::Error;
use calculus_parser::parse;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{env, process::ExitCode};

/// Prints the error, with a report pointing into `source` if the error has spans.
fn report(err: &Error, source: &str) {
    if err.spans.is_empty() {
        eprintln!("error: {}", err);
    } else if let Err(io_err) = err.build_report("input").eprint(("input", Source::from(source))) {
        eprintln!("error: {} ({})", err, io_err);
    }
}

fn main() -> ExitCode {
    let verbose = env::var_os("CALCULUS_LOG").is_some();
    let level = if verbose { LevelFilter::Trace } else { LevelFilter::Info };
    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("could not set up logging: {}", err);
    }

    let mut args = env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "x^2 + x*y^3 + 2".to_string());
    let var = args.next().unwrap_or_else(|| "x".to_string());

    let node = match parse(&source) {
        Ok(node) => node,
        Err(err) => {
            report(&err, &source);
            return ExitCode::FAILURE;
        },
    };
    println!("{}", node);

    let result = derivative(&node, &var)
        .and_then(|d| {
            println!("d/d{} = {}", var, d);
            simplify_with_steps(&d, default_relations())
        });

    match result {
        Ok((simplified, steps)) => {
            println!("simplified in {} steps: {}", steps.len(), simplified);
            ExitCode::SUCCESS
        },
        Err(err) => {
            report(&err, &source);
            ExitCode::FAILURE
        },
    }
}
