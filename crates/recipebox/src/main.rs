//! `recipebox` - CLI for the recipe list
//!
//! Each invocation loads the stored recipes, runs one action through the
//! controller, and prints the resulting view.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use recipebox::cli::{Cli, Command, ConfigCommand, OutputFormat};
use recipebox::{
    init_logging, Config, Controller, DirectoryDownloader, KeyValueStore, ListView, RecipeForm,
    RecipeStore, SqliteStore, StoreOptions,
};

type App = Controller<SqliteStore, DirectoryDownloader>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = cli.verbosity();
    init_logging(verbosity);

    // Loaded per command, so that `config` can still locate and validate a
    // broken file.
    let load_config = || Config::load_from(cli.config.clone()).context("loading configuration");
    let out = Output {
        messages: verbosity.shows_messages(),
    };

    match cli.command {
        Command::Add(cmd) => {
            let mut app = open_app(&load_config()?, None)?;
            *app.form_mut() = RecipeForm::new(cmd.name, cmd.ingredients, cmd.method);
            let result = app.on_submit();
            out.notifications(&mut app);
            let index = result?;
            out.message(format_args!("Added as recipe {index}."));
            Ok(())
        }
        Command::List(cmd) => {
            let app = open_app(&load_config()?, None)?;
            print_view(app.view(), cmd.format)
        }
        Command::Search(cmd) => {
            let mut app = open_app(&load_config()?, None)?;
            let view = app.on_search_input(&cmd.query).clone();
            print_view(&view, cmd.format)
        }
        Command::Delete(cmd) => {
            let mut app = open_app(&load_config()?, None)?;
            let result = app.on_delete(cmd.index);
            out.notifications(&mut app);
            let removed = result?;
            out.message(format_args!("Deleted \"{}\".\n", removed.name));
            print_view(app.view(), OutputFormat::Plain)
        }
        Command::Export(cmd) => {
            let mut app = open_app(&load_config()?, cmd.dir)?;
            let result = app.on_save_as_file(cmd.index);
            out.notifications(&mut app);
            result?;
            Ok(())
        }
        Command::Status(cmd) => handle_status(&load_config()?, cmd.json),
        Command::Config(config_cmd) => handle_config(cli.config.clone(), config_cmd),
    }
}

/// Status output on stdout, silenced by `--quiet`.
#[derive(Debug, Clone, Copy)]
struct Output {
    messages: bool,
}

impl Output {
    fn message(self, message: impl std::fmt::Display) {
        if self.messages {
            println!("{message}");
        }
    }

    /// Print success notifications. Failures surface through the returned error.
    fn notifications(self, app: &mut App) {
        for notification in app.take_notifications() {
            if !notification.is_error() {
                self.message(notification);
            }
        }
    }
}

fn open_app(config: &Config, export_dir: Option<PathBuf>) -> Result<App> {
    let db_path = config.database_path();
    let kv = SqliteStore::open(&db_path)
        .with_context(|| format!("opening recipe storage at {}", db_path.display()))?;
    let store = RecipeStore::load_with(kv, StoreOptions::from(config))?;
    let downloader = DirectoryDownloader::new(export_dir.unwrap_or_else(|| config.export_dir()));
    Ok(Controller::new(store, downloader))
}

fn print_view(view: &ListView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => print!("{view}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let app = open_app(config, None)?;
    let store = app.store();
    let stats = store.backend().stats()?;
    let last_saved = store.backend().updated_at(&store.options().key)?;

    if json {
        let status = serde_json::json!({
            "database_path": store.backend().path(),
            "storage_key": store.options().key,
            "recipes": store.len(),
            "last_saved": last_saved.map(|t| t.to_rfc3339()),
            "database_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("recipebox status");
        println!("----------------");
        println!("Database:      {}", store.backend().path().display());
        println!("Storage key:   {}", store.options().key);
        println!("Recipes:       {}", store.len());
        match last_saved {
            Some(t) => println!("Last saved:    {}", t.to_rfc3339()),
            None => println!("Last saved:    never"),
        }
        println!("Database size: {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path).context("loading configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key:                {}", config.storage.key);
                println!();
                println!("[Export]");
                println!("  Directory:          {}", config.export_dir().display());
                println!();
                println!("[Recipes]");
                println!(
                    "  Reject empty names: {}",
                    config.recipes.reject_empty_name
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
