use super::Context;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Id of the page to create
    pub page_id: String,

    /// Owner of the page (defaults to the configured user)
    #[arg(short, long)]
    pub user: Option<String>,
}

pub async fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    println!("{}", "📝 Initializing Pagesmith page...".bright_blue().bold());

    let config_path = ctx.cwd.join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        let config_json = serde_json::to_string_pretty(&Config {
            user_id: args.user.clone().unwrap_or_else(|| ctx.config.user_id.clone()),
            ..ctx.config.clone()
        })?;
        fs::write(&config_path, config_json)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    let user_id = args.user.as_deref().unwrap_or(&ctx.config.user_id);
    let page = ctx.sync().create_default_page(&args.page_id, user_id).await?;

    println!(
        "  {} Created page {} ({} components)",
        "✓".green(),
        page.id.bright_white(),
        page.node_count()
    );
    println!();
    println!("{}", "✅ Page ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagesmith show {}", page.id);
    println!("  2. Run: pagesmith add {} Button --parent <section-id>", page.id);
    println!("  3. Run: pagesmith publish {}", page.id);

    Ok(())
}
