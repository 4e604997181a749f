use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use snapline_sdk::{
    compare_text, match_snapshot, MismatchError, SnapshotConfig, SnapshotError, Snapshotter,
    Verdict,
};

use crate::cli::*;

/// Exit code for a check or comparison that found differences.
const EXIT_MISMATCH: u8 = 1;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Check(args) => cmd_check(args, cli.format),
        Command::Compare(args) => cmd_compare(args, cli.format),
        Command::Show(args) => cmd_show(args),
    }
}

fn cmd_check(args: CheckArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let mut config = resolve_config(&args.store)?;
    config.always_overwrite |= args.update;
    let input = read_input(args.input.as_deref())?;

    match match_snapshot(&args.id, &input, &config) {
        Ok(verdict) => {
            match format {
                OutputFormat::Json => println!("{}", verdict_json(&args.id, verdict)),
                OutputFormat::Text => println!("{} {}: {}", "✓".green().bold(), args.id.bold(), verdict),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(SnapshotError::Mismatch(mismatch)) => {
            match format {
                OutputFormat::Json => println!("{}", mismatch_json(Some(&args.id), &mismatch)),
                OutputFormat::Text => print_mismatch(&args.id, &mismatch),
            }
            Ok(ExitCode::from(EXIT_MISMATCH))
        }
        Err(err) => Err(err).with_context(|| format!("checking snapshot `{}`", args.id)),
    }
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let reference = read_file(&args.reference)?;
    let received = read_file(&args.received)?;

    let Some(mismatch) = compare_text(&reference, &received).into_mismatch() else {
        match format {
            OutputFormat::Json => println!("{}", json!({ "matched": true })),
            OutputFormat::Text => println!("{} Files match.", "✓".green().bold()),
        }
        return Ok(ExitCode::SUCCESS);
    };

    let mismatch = MismatchError::from(mismatch);
    match format {
        OutputFormat::Json => println!("{}", mismatch_json(None, &mismatch)),
        OutputFormat::Text => print_mismatch(&args.received.display().to_string(), &mismatch),
    }
    Ok(ExitCode::from(EXIT_MISMATCH))
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&args.store)?;
    let snapshotter = Snapshotter::from_config(config);
    match snapshotter.recorded(&args.id)? {
        Some(text) => {
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No snapshot recorded for {}.", args.id.yellow());
            Ok(ExitCode::from(EXIT_MISMATCH))
        }
    }
}

/// Configuration file (if any) with command-line overrides applied.
fn resolve_config(store: &StoreArgs) -> anyhow::Result<SnapshotConfig> {
    let mut config = match &store.config {
        Some(path) => SnapshotConfig::load(path)?,
        None => SnapshotConfig::default(),
    };
    if let Some(dir) = &store.dir {
        config.storage_location = dir.clone();
    }
    if let Some(extension) = &store.extension {
        config.extension = extension.clone();
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => read_file(path),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading received text from stdin")?;
            Ok(input)
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_mismatch(subject: &str, mismatch: &MismatchError) {
    println!("{} {}: {}", "✗".red().bold(), subject.bold(), mismatch);
    println!();
    println!("{}", "expected (snapshot):".yellow());
    println!("{}", mismatch.expected_report);
    println!();
    println!("{}", "received:".yellow());
    println!("{}", mismatch.received_report);
}

fn verdict_json(id: &str, verdict: Verdict) -> serde_json::Value {
    json!({ "id": id, "matched": true, "verdict": verdict })
}

fn mismatch_json(id: Option<&str>, mismatch: &MismatchError) -> serde_json::Value {
    let mut value = json!({ "matched": false, "mismatch": mismatch });
    if let Some(id) = id {
        value["id"] = json!(id);
    }
    value
}
