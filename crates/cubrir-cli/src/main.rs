//! Cubridor: command-line set algebra over saved coverage files
//!
//! ## Usage
//!
//! ```bash
//! cubridor merge run1.cov run2.cov -o corpus.cov   # cumulative map
//! cubridor diff corpus.cov candidate.cov           # what's new
//! cubridor contains corpus.cov candidate.cov       # redundancy check
//! cubridor export corpus.cov -o corpus.txt         # human-readable dump
//! ```

mod commands;
mod error;

use clap::Parser;
use commands::{
    Cli, Commands, ContainsArgs, DiffArgs, ExportArgs, MergeArgs, PairArgs, ShowArgs,
};
use console::style;
use cubrir::coverage::{load_binary, save_binary, save_text, write_text};
use cubrir::Coverage;
use error::CliResult;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Merge(args) => run_merge(&args, quiet),
        Commands::Diff(args) => run_diff(&args, quiet),
        Commands::Intersect(args) => run_intersect(&args, quiet),
        Commands::Symdiff(args) => run_symdiff(&args, quiet),
        Commands::Contains(args) => run_contains(&args, quiet),
        Commands::Export(args) => run_export(&args, quiet),
        Commands::Show(args) => run_show(&args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> CliResult<Coverage> {
    debug!(path = %path.display(), "loading coverage file");
    Ok(load_binary(path)?)
}

/// Write an operation result either as a binary file or as text on stdout.
fn emit(result: &Coverage, output: Option<&Path>, label: &str, quiet: bool) -> CliResult<()> {
    match output {
        Some(path) => {
            save_binary(result, path)?;
            if !quiet {
                println!(
                    "{} {} modules, {} offsets -> {}",
                    style(label).green().bold(),
                    result.module_count(),
                    result.offset_count(),
                    path.display()
                );
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_text(result, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_merge(args: &MergeArgs, quiet: bool) -> CliResult<ExitCode> {
    let mut merged = Coverage::new();
    for input in &args.inputs {
        merged = merged.merge(&load(input)?);
    }
    save_binary(&merged, &args.output)?;
    if !quiet {
        println!(
            "{} {} files: {} modules, {} offsets -> {}",
            style("merged").green().bold(),
            args.inputs.len(),
            merged.module_count(),
            merged.offset_count(),
            args.output.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_diff(args: &DiffArgs, quiet: bool) -> CliResult<ExitCode> {
    let baseline = load(&args.baseline)?;
    let current = load(&args.current)?;
    let fresh = current.difference(&baseline);
    emit(&fresh, args.output.as_deref(), "diff", quiet)?;
    Ok(ExitCode::SUCCESS)
}

fn run_intersect(args: &PairArgs, quiet: bool) -> CliResult<ExitCode> {
    let first = load(&args.first)?;
    let second = load(&args.second)?;
    let shared = first.intersect(&second);
    emit(&shared, args.output.as_deref(), "intersect", quiet)?;
    Ok(ExitCode::SUCCESS)
}

fn run_symdiff(args: &PairArgs, quiet: bool) -> CliResult<ExitCode> {
    let first = load(&args.first)?;
    let second = load(&args.second)?;
    let delta = first.symmetric_difference(&second);
    emit(&delta, args.output.as_deref(), "symdiff", quiet)?;
    Ok(ExitCode::SUCCESS)
}

fn run_contains(args: &ContainsArgs, quiet: bool) -> CliResult<ExitCode> {
    let haystack = load(&args.haystack)?;
    let needle = load(&args.needle)?;

    if haystack.contains(&needle) {
        if !quiet {
            println!("{}", style("contained").green().bold());
        }
        Ok(ExitCode::SUCCESS)
    } else {
        if !quiet {
            println!("{}", style("not contained").red().bold());
        }
        Ok(ExitCode::FAILURE)
    }
}

fn run_export(args: &ExportArgs, quiet: bool) -> CliResult<ExitCode> {
    let coverage = load(&args.input)?;
    match args.output.as_deref() {
        Some(path) => {
            save_text(&coverage, path)?;
            if !quiet {
                println!(
                    "{} {} offsets -> {}",
                    style("exported").green().bold(),
                    coverage.offset_count() - coverage.special_count(),
                    path.display()
                );
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_text(&coverage, &mut stdout)?;
            stdout.flush()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_show(args: &ShowArgs) -> CliResult<ExitCode> {
    let coverage = load(&args.input)?;

    if args.json {
        println!("{}", coverage.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    if args.full {
        print!("{coverage}");
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", style(args.input.display()).bold());
    for module in coverage.modules() {
        println!("  {:<40} {:>10}", module.name(), module.len());
    }
    println!(
        "{} modules, {} offsets ({} special)",
        coverage.module_count(),
        coverage.offset_count(),
        coverage.special_count()
    );
    Ok(ExitCode::SUCCESS)
}
