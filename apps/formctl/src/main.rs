use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use form_client::{AppContext, Notice};
use form_store::FormStore;
use tracing::{info, warn};

mod config;
mod script;

use config::load_settings;
use script::{apply, parse_script};

const DEMO_SCRIPT: &str = include_str!("../demo/team_lunch.json");

#[derive(Parser, Debug)]
#[command(name = "formctl", about = "Build forms, publish them and collect responses in memory")]
struct Cli {
    /// Config file; defaults to ./formctl.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    share_base_url: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the actions in a JSON script.
    Run {
        script: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Walk through building, sharing, answering and deleting a form.
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct OutputArgs {
    /// Print the final store state as JSON.
    #[arg(long)]
    dump_state: bool,
    /// Print admin statistics as JSON.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.share_base_url {
        settings.share_base_url = url;
    }
    if let Some(filter) = cli.log_filter {
        settings.log_filter = filter;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let (raw, source, output) = match cli.command {
        Command::Run { script, output } => {
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script '{}'", script.display()))?;
            (raw, script.display().to_string(), output)
        }
        Command::Demo { output } => (DEMO_SCRIPT.to_string(), "demo".to_string(), output),
    };

    let mut ctx = AppContext::new(FormStore::new(), &settings.share_base_url)?;
    let steps = parse_script(&raw).with_context(|| format!("script '{source}' is not a JSON array"))?;
    info!(script = %source, steps = steps.len(), "running script");

    for (index, step) in steps.into_iter().enumerate() {
        let action = match step {
            Ok(action) => action,
            Err(err) => {
                warn!(step = index, error = %err, "skipping unrecognized action");
                println!("[{index}] skipped: {err}");
                continue;
            }
        };
        let name = action.name();
        match apply(&mut ctx, action) {
            Ok(report) => {
                let mut line = format!("[{index}] {name}");
                if let Some(notice) = &report.notice {
                    line.push_str(&format!(": {}", render(notice)));
                }
                if let Some(detail) = &report.detail {
                    line.push_str(&format!(" ({detail})"));
                }
                println!("{line}");
            }
            Err(err) => println!("[{index}] {name}: {}", render(&Notice::from(&err))),
        }
    }

    if output.stats {
        println!("{}", serde_json::to_string_pretty(&ctx.stats())?);
    }
    if output.dump_state {
        println!("{}", serde_json::to_string_pretty(ctx.state())?);
    }

    Ok(())
}

fn render(notice: &Notice) -> String {
    format!("{:?} {}: {}", notice.level, notice.title, notice.message)
}
