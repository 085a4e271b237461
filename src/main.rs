// src/main.rs - headless Ophelia CI console
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ophelia_console::handlers::Console;
use ophelia_console::models::{ModalTrigger, Outcome, Settled};
use ophelia_console::services::{HeadlessNavigator, HttpTransport};
use ophelia_console::templates::{render_page, Modal};
use ophelia_console::ui::{Page, DATA_ID, REPOSITORY_SECTION_ID};
use ophelia_console::Config;

#[derive(Parser)]
#[command(name = "ophelia-console", about = "Drive the Ophelia CI repository console without a browser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a modal and press its submit button
    Submit {
        /// Modal trigger, e.g. repository-create or repository-update
        trigger: String,
        /// Field value as id=value; repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Repository id exposed by the repository page
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a repository
    Delete { id: String, name: String },
    /// Print the page markup for a modal
    Render { trigger: String },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected id=value, got {}", raw))
}

fn report(settled: &Settled) -> anyhow::Result<()> {
    match &settled.outcome {
        Outcome::Succeeded => {
            tracing::info!("✓ {} settled with {:?}", settled.operation, settled.effect);
            Ok(())
        }
        Outcome::Failed(e) => bail!("{} failed: {}", settled.operation, e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Render { trigger } => {
            let trigger: ModalTrigger = trigger.parse()?;
            let modal = Modal::for_trigger(trigger);
            println!("{}", render_page(&modal.title, &modal.render(), ""));
            Ok(())
        }
        Command::Submit { trigger, fields, id } => {
            let trigger: ModalTrigger = trigger.parse()?;

            let mut page = Page::new();
            let section = page.element("section").id(REPOSITORY_SECTION_ID).finish();
            if let Some(id) = &id {
                page.set_attribute(section, DATA_ID, id);
            }
            Modal::for_trigger(trigger).mount(&mut page, Some(section));

            for (field, value) in &fields {
                if !page.fill(field, value) {
                    bail!("{} has no field {}", trigger, field);
                }
            }

            tracing::info!("Submitting {} to {}", trigger, config.console_url);
            let transport = HttpTransport::from_config(&config).context("building http transport")?;
            let console = Console::new(config, transport, HeadlessNavigator::new());
            let settled = console.submit_modal(&page, trigger).await?;
            report(&settled)
        }
        Command::Delete { id, name } => {
            tracing::info!("Deleting repository {} from {}", name, config.console_url);
            let transport = HttpTransport::from_config(&config).context("building http transport")?;
            let console = Console::new(config, transport, HeadlessNavigator::new());
            let settled = console.delete_repository(&id, &name).await?;
            report(&settled)
        }
    }
}
