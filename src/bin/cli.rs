//! Command-line definition and dispatch for `logctl`.
//!
//! `logctl` installs the global logger from `--log.*` flags and writes one
//! record, which makes it a process-boundary harness for the escalating
//! severities: `panic` unwinds out of `main` and `fatal` exits with status 1.

use std::process::ExitCode;

use clap::Parser;
use logfacade::{Logger, Options, Severity, Value};

/// Write one structured record through the process-wide logger.
#[derive(Parser, Debug)]
#[command(name = "logctl")]
#[command(about = "Write one structured record through the process-wide logger")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub log: Options,

    /// Name given to the logger, dotted for nesting.
    #[arg(long)]
    pub name: Option<String>,

    /// Severity: debug, info, warn, error, panic or fatal.
    pub severity: Severity,

    /// Record message.
    pub message: String,

    /// Attributes as `key=value`; a bare `key` is passed without a value.
    pub pairs: Vec<String>,
}

/// Installs the logger and writes the record.
pub fn run(cli: Cli) -> ExitCode {
    logfacade::init(cli.log);

    let logger = match cli.name.as_deref() {
        Some(name) => logfacade::with_name(name),
        None => logfacade::logger(),
    };
    let pairs = keys_and_values(&cli.pairs);
    emit(&logger, cli.severity, &cli.message, &pairs);
    logger.flush();
    ExitCode::SUCCESS
}

fn emit(logger: &Logger, severity: Severity, message: &str, pairs: &[Value]) {
    match severity {
        Severity::Debug => logger.debugw(message, pairs),
        Severity::Info => logger.infow(message, pairs),
        Severity::Warn => logger.warnw(message, pairs),
        Severity::Error => logger.errorw(message, pairs),
        Severity::Panic => logger.log_and_panicw(message, pairs),
        Severity::Fatal => logger.log_and_exitw(message, pairs),
    }
}

/// Flattens `key=value` arguments into an alternating slice.
fn keys_and_values(arguments: &[String]) -> Vec<Value> {
    let mut values = Vec::with_capacity(arguments.len() * 2);
    for argument in arguments {
        match argument.split_once('=') {
            Some((key, value)) => values.extend([Value::from(key), parse_value(value)]),
            None => values.push(Value::from(argument.as_str())),
        }
    }
    values
}

fn parse_value(text: &str) -> Value {
    if let Ok(number) = text.parse::<i64>() {
        Value::I64(number)
    } else if let Ok(number) = text.parse::<f64>() {
        Value::F64(number)
    } else if let Ok(flag) = text.parse::<bool>() {
        Value::Bool(flag)
    } else {
        Value::from(text)
    }
}
