use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{debug, info};

use promptvault::cli::{Cli, Command};
use promptvault::config::Config;
use promptvault::{Catalog, Repl, Session, StdoutClipboard};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => s
            .parse::<log::LevelFilter>()
            .map_err(|_| eyre::eyre!("Unknown log level: {}", s))?,
        None => log::LevelFilter::Warn,
    };

    env_logger::Builder::from_default_env().filter_level(level).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("promptvault starting");
    debug!("config: {:?}", config);

    let catalog = Catalog::builtin();

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let session = Session::new(catalog, StdoutClipboard).with_category(config.default_category.clone());
            let mut repl = Repl::new(session, config.export_dir.clone());
            repl.run()?;
        }
        Command::Catalog { query, category } => {
            let templates = catalog.filter(&query, &category);
            if templates.is_empty() {
                println!("No templates found");
            } else {
                for t in templates {
                    println!(
                        "{} {} {}",
                        format!("[{}]", t.id).yellow(),
                        t.title.bold(),
                        format!("({})", t.category).dimmed()
                    );
                    println!("    {}", t.description);
                }
            }
        }
        Command::Categories => {
            for category in catalog.categories() {
                println!("{}", category);
            }
        }
        Command::Show { id } => {
            let template = catalog
                .get(&id)
                .ok_or_else(|| eyre::eyre!("Template not found: {}", id))?;
            println!("{} {}", template.title.bold(), format!("({})", template.category).dimmed());
            println!();
            println!("{}", template.body);
        }
        Command::InitConfig { path, force } => {
            let path = path
                .or_else(Config::default_path)
                .ok_or_else(|| eyre::eyre!("No config directory on this platform; pass a path"))?;
            Config::write_default(&path, force)?;
            println!("{} {}", "Wrote config:".green(), path.display());
        }
    }

    Ok(())
}
