//! drupal-make CLI - Generate drush make files from a Drupal site

use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use drupal_make::util::config::{global_config_path, load_config, project_config_path};
use drupal_make::util::shell::{format_duration, Shell, Status};
use drupal_make::{generate, Config};

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for the manifest
    let default_filter = if cli.verbose {
        "drupal_make=debug"
    } else if cli.quiet {
        "drupal_make=error"
    } else {
        "drupal_make=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.no_color);

    // Layer configuration: global, project, --config, then flags
    let cwd = std::env::current_dir()?;
    let mut config = load_config(global_config_path().as_deref(), &project_config_path(&cwd));
    if let Some(path) = &cli.config {
        config.merge(Config::load(path)?);
    }
    cli.apply_to(&mut config);
    let opts = config.resolve()?;

    shell.verbose(
        Status::Scanning,
        format!("{} ({} format)", opts.docroot.display(), opts.format),
    );

    let start = Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = generate(&opts, &mut out)?;
    out.flush()?;

    for (name, reason) in &summary.skipped {
        shell.verbose(Status::Skipped, format!("{} ({})", name, reason));
    }

    shell.status(
        Status::Finished,
        format!(
            "{} manifest: core {} and {} module(s) in {}",
            opts.format,
            summary.core_version.as_deref().unwrap_or("(unknown)"),
            summary.modules.len(),
            format_duration(start.elapsed())
        ),
    );

    Ok(())
}
