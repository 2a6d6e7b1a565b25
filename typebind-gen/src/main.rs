//! CLI entrypoint for `typebind-gen`.

use std::error::Error as _;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use typebind_gen::cli::{self, Args};
use typebind_gen::error::TypebindError;
use typebind_gen::logging;

fn main() -> ExitCode {
    let args = Args::parse();
    let outcome = logging::init(args.verbose)
        .and_then(|()| cli::run(&args, &mut io::stdout().lock()));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing further can be reported if stderr itself is closed.
            drop(write_failure(&mut io::stderr().lock(), &err));
            ExitCode::from(cli::exit_code(&err))
        }
    }
}

fn write_failure(out: &mut dyn Write, err: &TypebindError) -> io::Result<()> {
    writeln!(out, "typebind-gen: generation failed")?;
    writeln!(out, "error: {err}")?;
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {cause}")?;
        source = cause.source();
    }
    if let TypebindError::OutputDirectoryMissing {
        attempted,
        resolved,
    } = err
    {
        writeln!(out, "  attempted: {attempted}")?;
        writeln!(out, "  resolved:  {resolved}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", Args::command().render_usage())
}
