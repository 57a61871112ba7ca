//! Arbiter CLI entry point.
//!
//! Exit codes: 0 `SUCCESS`, 1 `FAILED`, 2 `ACTIVE`, 3 error.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use arbiter_engine::{EngineConfig, RunReport, Status, VariableResolution};
use arbiter_language::Dialect;
use arbiter_runtime::{Repl, Session, init_logging, render_error, render_report};

const EXIT_ERROR: u8 = 3;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    scripts: Vec<PathBuf>,
    data: Option<PathBuf>,
    registry: Option<PathBuf>,
    variables: Option<VariableResolution>,
    extended: bool,
    interactive: bool,
    trace: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(status) => ExitCode::from(exit_code(status)),
        Err(e) => {
            eprintln!("\x1b[31m{e}\x1b[0m");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

const fn exit_code(status: Status) -> u8 {
    match status {
        Status::Success => 0,
        Status::Failed => 1,
        Status::Active => 2,
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-i" | "--interactive" => config.interactive = true,
            "--trace" => config.trace = true,
            "--extended" => config.extended = true,
            "--lenient" => config.variables = Some(VariableResolution::Lenient),
            "--strict" => config.variables = Some(VariableResolution::Strict),
            "-d" | "--data" => {
                let path = args.next().ok_or("--data requires a file")?;
                config.data = Some(PathBuf::from(path));
            }
            "-c" | "--config" => {
                let path = args.next().ok_or("--config requires a file")?;
                config.registry = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option: {flag}").into());
            }
            path => config.scripts.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn engine_config(cli: &CliConfig) -> EngineConfig {
    let dialect = if cli.extended {
        Dialect::Extended
    } else {
        Dialect::Standard
    };
    let config = EngineConfig::for_dialect(dialect);
    match cli.variables {
        Some(variables) => config.with_variables(variables),
        None => config,
    }
}

fn run(args: Vec<String>) -> Result<Status, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(Status::Success);
    }

    if cli.show_version {
        println!("arbiter {}", env!("CARGO_PKG_VERSION"));
        return Ok(Status::Success);
    }

    init_logging(if cli.trace { "debug" } else { "warn" });

    let mut session = Session::new().with_config(engine_config(&cli));
    if let Some(path) = &cli.data {
        session
            .load_document(path)
            .map_err(|e| render_error(&e))?;
    }
    if let Some(path) = &cli.registry {
        session
            .load_registry(path)
            .map_err(|e| render_error(&e))?;
    }

    // Scripts run in order as one implicit `seq`.
    let mut status = Status::Success;
    for script in &cli.scripts {
        let report = session
            .eval_file(script)
            .map_err(|e| render_error(&e))?;
        print_report(&report);
        status = report.status;
        if !status.is_success() {
            break;
        }
    }

    if cli.interactive || cli.scripts.is_empty() {
        let mut repl = Repl::new(session).map_err(|e| render_error(&e))?;
        if !cli.scripts.is_empty() {
            repl = repl.without_banner();
        }
        repl.run().map_err(|e| render_error(&e))?;
    }

    Ok(status)
}

fn print_report(report: &RunReport) {
    println!("{}", render_report(report));
}

fn print_help() {
    println!(
        "\x1b[1mArbiter\x1b[0m - Rule scripts for validating documents

\x1b[1mUSAGE:\x1b[0m
    arbiter [OPTIONS] [SCRIPTS...]

\x1b[1mARGUMENTS:\x1b[0m
    [SCRIPTS...]    Scripts to run in order; stops at the first that does
                    not succeed

\x1b[1mOPTIONS:\x1b[0m
    -h, --help              Print help information
    -V, --version           Print version information
    -d, --data <FILE>       JSON document to validate (default: null)
    -c, --config <FILE>     JSON registry configuration
    -i, --interactive       Start the REPL after running scripts
        --extended          Accept #numeric variables
        --strict            Unbound variables are errors (standard default)
        --lenient           Unbound variables are null (extended default)
        --trace             Log statement execution (ARBITER_LOG overrides)

\x1b[1mEXIT STATUS:\x1b[0m
    0 SUCCESS, 1 FAILED, 2 ACTIVE, 3 error

\x1b[1mEXAMPLES:\x1b[0m
    arbiter                               Start interactive REPL
    arbiter -d order.json order.rules     Validate order.json
    arbiter -d order.json -i order.rules  Validate, then explore in the REPL
    arbiter -c modules.json -d a.json r   Use custom module bindings"
    );
}
