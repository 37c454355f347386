use std::{
    error::Error as _,
    io::{self, Write},
};

mod build;
mod config;
mod diagnostics;
mod error;
mod href;
mod manifest;
mod matcher;
mod normalize;
mod pool;
mod scan;
mod survey;

use config::Args;
use error::Result;
use build::Build;

fn main() {
    let args = Args::parse();
    init_logger(args.quiet);

    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn init_logger(quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let survey = args.survey()?;
    let build = build::build(args.path(), &survey, &args.options())?;

    if args.dry_run {
        pretty_print_build(&build)?;
    } else {
        let output = args.output();
        build.manifest.write(&output)?;
        log::info!(
            "manifest written: {} ({} questions)",
            output.display(),
            build.manifest.questions.len()
        );
    }

    let warnings = build.diagnostics.warnings().count();
    if warnings > 0 {
        log::info!("finished with {warnings} warning(s)");
    }

    // An empty manifest is still written so the client can show that nothing is ready.
    build.manifest.ensure_questions()
}

fn pretty_print_build(build: &Build) -> io::Result<()> {
    let manifest = &build.manifest;
    let mut handle = io::stdout().lock();
    let mut count = 0;

    for question in &manifest.questions {
        count += question.candidates.len();

        writeln!(
            handle,
            "{}\n================================================================",
            question.id,
        )?;

        match &question.input {
            Some(input) => writeln!(handle, "input: {input}")?,
            None => writeln!(handle, "input: (none)")?,
        }

        for candidate in &question.candidates {
            writeln!(handle, "{:<16} {}", candidate.id, candidate.src)?;
        }
        writeln!(handle)?;
    }

    for diagnostic in build.diagnostics.messages() {
        writeln!(handle, "{diagnostic}")?;
    }

    writeln!(
        handle,
        "{} questions, {count} candidates",
        manifest.questions.len()
    )?;
    Ok(())
}
