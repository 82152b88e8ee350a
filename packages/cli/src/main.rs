mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, delete, init, move_node, rename, set, set_published, show, view, AddArgs, Context,
    DeleteArgs, InitArgs, MoveArgs, PageArgs, RenameArgs, SetArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagesmith CLI - Build and publish landing pages from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a page with the starter content
    Init(InitArgs),

    /// Print a page's component tree
    Show(PageArgs),

    /// Add a component
    Add(AddArgs),

    /// Delete a component and everything inside it
    Delete(DeleteArgs),

    /// Move a component
    Move(MoveArgs),

    /// Merge props into a component
    Set(SetArgs),

    /// Rename a page
    Rename(RenameArgs),

    /// Make a page publicly visible
    Publish(PageArgs),

    /// Take a page offline
    Unpublish(PageArgs),

    /// Show a page as a visitor sees it
    View(PageArgs),
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("PAGESMITH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = Context::load(&cwd)?;

    match command {
        Command::Init(args) => init(args, &ctx).await,
        Command::Show(args) => show(args, &ctx).await,
        Command::Add(args) => add(args, &ctx).await,
        Command::Delete(args) => delete(args, &ctx).await,
        Command::Move(args) => move_node(args, &ctx).await,
        Command::Set(args) => set(args, &ctx).await,
        Command::Rename(args) => rename(args, &ctx).await,
        Command::Publish(args) => set_published(args, &ctx, true).await,
        Command::Unpublish(args) => set_published(args, &ctx, false).await,
        Command::View(args) => view(args, &ctx).await,
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
