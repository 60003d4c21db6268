mod app;
mod commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mnemo",
    about = "Spaced repetition for plain-text notes, reviewed in vim",
    version
)]
struct Cli {
    /// Note file to review, or directory to show due counts for
    /// (default: the configured note root)
    path: Option<PathBuf>,

    /// Review every chunk in FILE regardless of due dates, leaving the
    /// schedule untouched
    #[arg(short = 'c', long, value_name = "FILE", conflicts_with = "path")]
    cram: Option<PathBuf>,

    /// Reset every chunk in FILE to due-now by deleting its schedule records
    #[arg(long, value_name = "FILE", conflicts_with_all = ["path", "cram"])]
    forget: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "plain")]
    format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new()?;

    if let Some(file) = cli.forget {
        commands::forget::run(&app, &file)?;
    } else if let Some(file) = cli.cram {
        commands::cram::run(&app, &file)?;
    } else {
        match cli.path {
            Some(path) if path.is_file() => commands::review::run(&app, &path)?,
            Some(path) => commands::overview::run(&app, &path, &cli.format)?,
            None => {
                let root = app.config.root.clone();
                commands::overview::run(&app, &root, &cli.format)?;
            }
        }
    }

    Ok(())
}
