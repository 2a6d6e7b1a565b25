//! Command-line front end for `typebind-gen`.
//!
//! [`run`] drives one invocation: resolve settings, check the output root,
//! then either sign the existing tree (`--sign`) or render, optionally write
//! and sign the registries. The report goes to the supplied writer; the
//! binary maps errors to exit codes with [`exit_code`].

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Args as ClapArgs, Parser};
use tracing::{info, warn};

use crate::artifact::{SourceCodeContainer, build_artifacts};
use crate::config::{CliOverrides, Settings};
use crate::error::TypebindError;
use crate::fs_helpers;
use crate::generator::SourceCodeGenerator;
use crate::registry::{build_operators, build_types};
use crate::signature::{self, SignatureResult};

/// Exit status of a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status of an unclassified failure.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for usage and configuration errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit status when the output directory does not exist.
pub const EXIT_OUTPUT_MISSING: u8 = 3;
/// Exit status when `--check` finds drift.
pub const EXIT_DRIFT: u8 = 4;

/// Parsed CLI arguments for `typebind-gen`.
#[derive(Debug, Parser)]
#[command(name = "typebind-gen")]
#[command(about = "Render typed binders and validators from the type and operator registries")]
#[command(version)]
pub struct Args {
    /// Working directory anchoring templates and outputs.
    #[arg(long, env = "TYPEBIND_CWD", value_name = "path")]
    pub cwd: Option<Utf8PathBuf>,
    /// Template directory, relative to the working directory.
    #[arg(long, value_name = "path")]
    pub templates: Option<Utf8PathBuf>,
    /// What the run does.
    #[command(flatten)]
    pub mode: ModeArgs,
    /// How the run reports.
    #[command(flatten)]
    pub report: ReportArgs,
    /// Raise log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Flags selecting what a run does.
#[derive(Debug, ClapArgs, Clone, Copy)]
pub struct ModeArgs {
    /// Generate into the test tree instead of the source tree.
    #[arg(long = "test")]
    pub is_test: bool,
    /// Persist rendered artifacts; without it the run is a dry run.
    #[arg(long = "write")]
    pub should_write: bool,
    /// Skip generation and sign the artifacts already on disk.
    #[arg(long = "sign", conflicts_with = "should_write")]
    pub is_sign_only: bool,
}

/// Flags shaping the report.
#[derive(Debug, ClapArgs, Clone, Copy)]
pub struct ReportArgs {
    /// Fail when the on-disk artifacts differ from the rendered ones.
    #[arg(long = "check", conflicts_with = "is_sign_only")]
    pub should_check: bool,
    /// Print the signature as JSON.
    #[arg(long = "json")]
    pub is_json: bool,
}

impl Args {
    /// Returns the settings given explicitly on the command line.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            templates: self.templates.clone(),
            test: self.mode.is_test.then_some(true),
            write: self.mode.should_write.then_some(true),
            check: self.report.should_check.then_some(true),
            json: self.report.is_json.then_some(true),
        }
    }
}

/// Maps `err` to the process exit status.
#[must_use]
pub const fn exit_code(err: &TypebindError) -> u8 {
    match err {
        TypebindError::MissingWorkingDirectory
        | TypebindError::NonUtf8Path(_)
        | TypebindError::Config(_) => EXIT_USAGE,
        TypebindError::OutputDirectoryMissing { .. } => EXIT_OUTPUT_MISSING,
        TypebindError::SignatureDrift { .. } => EXIT_DRIFT,
        _ => EXIT_FAILURE,
    }
}

/// Runs one invocation, writing the report to `out`.
///
/// # Errors
///
/// Returns the first configuration, template, render, write or parse
/// failure, [`TypebindError::SignatureDrift`] when `--check` finds drift
/// (after the report is written), or [`TypebindError::Report`] when `out`
/// fails.
pub fn run(args: &Args, out: &mut dyn Write) -> Result<(), TypebindError> {
    let cwd = resolve_cwd(args.cwd.as_deref())?;
    let settings = Settings::load(&cwd, &args.overrides())?;
    let output_root = settings.output_root(&cwd);
    ensure_output_root(args.cwd.as_deref(), &settings, &output_root)?;

    let container = build_artifacts();
    let result = if args.mode.is_sign_only {
        info!(root = %output_root, "signing artifacts on disk");
        signature::from_filesystem(&output_root, &container)?
    } else {
        generate(&cwd, &settings, &output_root, &container)?
    };

    write_report(out, &result, settings.json)?;

    if settings.check && !args.mode.is_sign_only {
        check_drift(&result, &output_root, &container)?;
        info!("on-disk artifacts match");
    }
    Ok(())
}

fn generate(
    cwd: &Utf8Path,
    settings: &Settings,
    output_root: &Utf8Path,
    container: &SourceCodeContainer,
) -> Result<SignatureResult, TypebindError> {
    if container.any_missing(output_root)? {
        for path in container.missing_outputs(output_root)? {
            warn!(path = %output_root.join(&path), "generated artifact missing");
        }
    }

    let templates = container.resolve_templates(cwd, Some(&settings.templates))?;
    let types = build_types();
    let operators = build_operators();
    let generator =
        SourceCodeGenerator::new(container, &templates, &types, &operators, output_root);
    generator.run(settings.write)
}

fn check_drift(
    generated: &SignatureResult,
    output_root: &Utf8Path,
    container: &SourceCodeContainer,
) -> Result<(), TypebindError> {
    let on_disk = signature::from_filesystem(output_root, container)?;
    if on_disk.hash == generated.hash {
        Ok(())
    } else {
        Err(TypebindError::SignatureDrift {
            generated: generated.hash.clone(),
            on_disk: on_disk.hash,
        })
    }
}

fn resolve_cwd(cwd: Option<&Utf8Path>) -> Result<Utf8PathBuf, TypebindError> {
    let given = cwd.ok_or(TypebindError::MissingWorkingDirectory)?;
    absolute(given)
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, TypebindError> {
    let resolved = std::path::absolute(path).map_err(|err| TypebindError::io(path, err))?;
    Utf8PathBuf::from_path_buf(resolved)
        .map_err(|non_utf8| TypebindError::NonUtf8Path(non_utf8.display().to_string()))
}

fn ensure_output_root(
    given_cwd: Option<&Utf8Path>,
    settings: &Settings,
    output_root: &Utf8Path,
) -> Result<(), TypebindError> {
    if fs_helpers::open_optional_dir(output_root)?.is_some() {
        return Ok(());
    }
    let base = given_cwd.unwrap_or(output_root);
    let attempted = if settings.test {
        base.join(&settings.test_dir)
    } else {
        base.to_path_buf()
    };
    Err(TypebindError::OutputDirectoryMissing {
        attempted,
        resolved: output_root.to_path_buf(),
    })
}

fn write_report(
    out: &mut dyn Write,
    result: &SignatureResult,
    as_json: bool,
) -> Result<(), TypebindError> {
    if as_json {
        let json = serde_json::to_string_pretty(result)?;
        return writeln!(out, "{json}").map_err(TypebindError::Report);
    }

    if result.is_empty() {
        return writeln!(out, "no artifacts signed").map_err(TypebindError::Report);
    }
    write!(out, "{}", result.output).map_err(TypebindError::Report)?;
    writeln!(out, "{}", signature::compare_baseline(&result.hash)).map_err(TypebindError::Report)
}
