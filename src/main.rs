#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use pacemap::{app::App, cli, database::SqliteStorage, error::WorkoutError, render, utils};
use std::fs;

#[macro_use]
extern crate pacemap;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let db_path = cli.db.unwrap_or_else(utils::default_db_path);
    dlog!("db={}", db_path.display());
    let storage = SqliteStorage::open(&db_path)?;
    let mut app = App::start(storage);

    match cli.cmd {
        Some(cli::Cmd::Add(add)) => {
            let w = app.new_workout(add.into_input()).map_err(user_facing)?;
            println!("{}", render::marker_label(w));
            println!("{}", render::card(w));
        }
        Some(cli::Cmd::Show { id }) => {
            let w = app.select(&id).map_err(user_facing)?;
            println!("{}", render::card(w));
            println!("{}", render::map_view(w));
        }
        Some(cli::Cmd::Import { path }) => {
            let blob = fs::read_to_string(&path)
                .with_context(|| format!("reading export: {}", path.display()))?;
            let added = app.import(&blob)?;
            if added == 0 {
                anyhow::bail!("No workouts found in {}.", path.display());
            }
            println!("imported {added} workouts");
        }
        Some(cli::Cmd::Export) => {
            println!("{}", app.export()?);
        }
        Some(cli::Cmd::Reset) => {
            app.reset_all()?;
            println!("all workouts deleted");
        }
        Some(cli::Cmd::List) | None => {
            if app.workouts().is_empty() {
                println!("No workouts yet. Add one with `pacemap add running|cycling`.");
            }
            print!("{}", render::workout_list(app.workouts()));
        }
    }

    Ok(())
}

/// Input problems are reported as a plain message, everything else with context.
fn user_facing(e: WorkoutError) -> anyhow::Error {
    if e.is_user_error() {
        anyhow::anyhow!("{e}")
    } else {
        anyhow::Error::new(e).context("Saving workouts")
    }
}
