//! tasqe CLI application
//!
//! Command-line interface that turns a description of your week into saved
//! to-do lists, plus an MCP server over the same lists.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TasqeMcpServer};
use renderer::TerminalRenderer;
use tasqe_core::{ClientConfig, OrganizerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        api_base,
        model,
        command,
    } = Args::parse();

    let organizer = OrganizerBuilder::new()
        .with_database_path(database_file)
        .with_client_config(
            ClientConfig::new()
                .with_api_base(api_base)
                .with_model(model),
        )
        .build()
        .await
        .context("Failed to initialize tasqe")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(organizer.clone(), renderer);

    info!("tasqe started");

    match command {
        Some(Generate(args)) => cli.generate(args).await,
        Some(History) => cli.history().await,
        Some(List { command }) => cli.handle_list_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Upcoming(args)) => cli.upcoming(args).await,
        Some(Export { file }) => cli.export(file).await,
        Some(Import { file }) => cli.import(file).await,
        Some(Config { command }) => cli.handle_config_command(command).await,
        Some(Serve) => {
            info!("Starting tasqe MCP server");
            run_stdio_server(TasqeMcpServer::new(organizer))
                .await
                .context("MCP server failed")
        }
        None => cli.list_lists().await,
    }
}
