// src/main.rs

mod cli;
mod colors;
mod commands;
mod db;
mod error;
mod filter;
mod models;
mod render;
mod settings;

use clap::Parser;
use cli::{Cli, Commands, MessageArgs};
use error::Result;
use models::Tag;
use render::Renderer;
use settings::Settings;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load()?;
    let renderer = Renderer::new(settings.color && !cli.no_color);
    tracing::debug!(?settings, "settings loaded");

    let add = |tag: Tag, args: &MessageArgs| commands::handle_add(tag, &args.words, &settings, &renderer);

    match &cli.command {
        Commands::New => commands::handle_new(),
        Commands::Delete { yes } => commands::handle_delete(*yes),
        Commands::View { filters } => commands::handle_view(filters, &renderer),
        Commands::Tags => commands::handle_tags(&renderer),
        Commands::Ranges => commands::handle_ranges(),
        Commands::Win(args) => add(Tag::Win, args),
        Commands::Note(args) => add(Tag::Note, args),
        Commands::Fix(args) => add(Tag::Fix, args),
        Commands::Task(args) => add(Tag::Task, args),
        Commands::Url(args) => add(Tag::Url, args),
        Commands::Work(args) => add(Tag::Work, args),
    }
}
