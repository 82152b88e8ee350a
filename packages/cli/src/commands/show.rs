use super::Context;
use super::edit::PageArgs;
use anyhow::Result;
use colored::Colorize;
use pagesmith_editor::Node;
use pagesmith_workspace::PublicView;

/// Print the owner's view of a page, ids included
pub async fn show(args: PageArgs, ctx: &Context) -> Result<()> {
    let page = ctx
        .sync()
        .load_for_editing(&args.page_id, &ctx.config.user_id)
        .await?;

    let status = if page.published {
        "published".green()
    } else {
        "draft".yellow()
    };

    println!("{} [{}]", page.page_name.bold(), status);
    println!(
        "   id: {}  background: {}  updated: {}",
        page.id,
        page.page_background_color,
        page.last_updated.format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    for node in &page.content {
        print_node(node, 1, true);
    }
    Ok(())
}

/// Print the public view of a page, as a visitor would see it
pub async fn view(args: PageArgs, ctx: &Context) -> Result<()> {
    match ctx.public_view().resolve(&args.page_id).await? {
        PublicView::Found(page) => {
            println!("{}", page.page_name.bold());
            println!();
            for node in &page.content {
                print_node(node, 1, false);
            }
        }
        PublicView::NotFound => {
            println!("{} Page not found", "404".red().bold());
        }
    }
    Ok(())
}

fn print_node(node: &Node, depth: usize, with_ids: bool) {
    let indent = "  ".repeat(depth);
    let summary = ["text", "logoText", "src", "url"]
        .iter()
        .find_map(|key| node.prop_str(key))
        .map(|value| format!(" \"{}\"", value))
        .unwrap_or_default();

    if with_ids {
        println!(
            "{}{} {}{}",
            indent,
            node.component_type.to_string().cyan(),
            node.id.dimmed(),
            summary
        );
    } else {
        println!("{}{}{}", indent, node.component_type.to_string().cyan(), summary);
    }

    for (slot, children) in node.child_lists() {
        let depth = match slot.column_index() {
            Some(index) => {
                println!("{}  {}", indent, format!("column {}", index).dimmed());
                depth + 2
            }
            None => depth + 1,
        };
        for child in children {
            print_node(child, depth, with_ids);
        }
    }
}
