use super::{Context, PlacementArgs};
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{ComponentType, Mutation, MutationResult, Props};
use tracing::debug;

#[derive(Debug, Args)]
pub struct PageArgs {
    pub page_id: String,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub page_id: String,

    /// Component type (Section, Columns, Heading, Text, Button, Image, ...)
    pub component_type: String,

    #[command(flatten)]
    pub placement: PlacementArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub page_id: String,

    pub node_id: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    pub page_id: String,

    pub node_id: String,

    #[command(flatten)]
    pub placement: PlacementArgs,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    pub page_id: String,

    pub node_id: String,

    /// Props to merge, as a JSON object (e.g. '{"text": "Hello"}')
    pub props: String,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub page_id: String,

    pub name: String,
}

/// Load the page, apply one mutation, save if anything changed
async fn apply(ctx: &Context, page_id: &str, mutation: Mutation) -> Result<MutationResult> {
    let sync = ctx.sync();
    let mut session = sync
        .open_session(page_id, &ctx.config.user_id, "cli")
        .await?
        .with_undo_levels(ctx.config.undo_levels);

    let label = mutation.label();
    let result = session.apply(mutation)?;

    if result.changed {
        sync.save_session(&mut session).await?;
        println!("{} {} on {}", "✓".green(), label, page_id.bright_white());
    } else {
        println!("{} {} changed nothing", "•".yellow(), label);
    }

    debug!(page_id, version = result.version, "cli mutation done");
    Ok(result)
}

pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let component_type: ComponentType = args.component_type.parse()?;

    let result = apply(
        ctx,
        &args.page_id,
        Mutation::AddComponent {
            component_type,
            placement: args.placement.to_placement(),
        },
    )
    .await?;

    if let Some(id) = result.selected_id {
        println!("  New {} id: {}", component_type, id.bright_white());
    }
    Ok(())
}

pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    apply(
        ctx,
        &args.page_id,
        Mutation::DeleteComponent {
            node_id: args.node_id,
        },
    )
    .await?;
    Ok(())
}

pub async fn move_node(args: MoveArgs, ctx: &Context) -> Result<()> {
    apply(
        ctx,
        &args.page_id,
        Mutation::MoveComponent {
            node_id: args.node_id,
            placement: args.placement.to_placement(),
        },
    )
    .await?;
    Ok(())
}

pub async fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let props: Props =
        serde_json::from_str(&args.props).context("props must be a JSON object")?;

    apply(
        ctx,
        &args.page_id,
        Mutation::UpdateProps {
            node_id: args.node_id,
            props,
        },
    )
    .await?;
    Ok(())
}

pub async fn rename(args: RenameArgs, ctx: &Context) -> Result<()> {
    apply(ctx, &args.page_id, Mutation::RenamePage { name: args.name }).await?;
    Ok(())
}

pub async fn set_published(args: PageArgs, ctx: &Context, published: bool) -> Result<()> {
    apply(ctx, &args.page_id, Mutation::SetPublished { published }).await?;

    if published {
        println!("  Public at: pagesmith view {}", args.page_id);
    }
    Ok(())
}
