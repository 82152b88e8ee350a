//! Session helpers that call external services.
//!
//! Each helper checks the target node first, waits for the service, then
//! applies the result as a single `UpdateProps`. A failed call returns
//! before any mutation, so the tree and dirty flag are untouched.

use crate::services::{ContentGenerator, ImageStorage, ServiceError};
use pagesmith_editor::{
    ComponentType, EditSession, EditorError, Mutation, MutationResult, Node, Props,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AssistError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("Node {node_id} is not a {expected} component")]
    WrongComponent {
        node_id: String,
        expected: ComponentType,
    },
}

/// Look up a node and check its type
fn expect_node<'a>(
    session: &'a EditSession,
    node_id: &str,
    expected: ComponentType,
) -> Result<&'a Node, AssistError> {
    let node = session
        .page()
        .find(node_id)
        .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;

    if node.component_type != expected {
        return Err(AssistError::WrongComponent {
            node_id: node_id.to_string(),
            expected,
        });
    }

    Ok(node)
}

fn set_prop(
    session: &mut EditSession,
    node_id: &str,
    key: &str,
    value: String,
) -> Result<MutationResult, AssistError> {
    let mut props = Props::new();
    props.insert(key.to_string(), Value::String(value));

    Ok(session.apply(Mutation::UpdateProps {
        node_id: node_id.to_string(),
        props,
    })?)
}

/// Ask for alternatives to a heading's text. Does not change the page.
pub async fn suggest_headlines(
    session: &EditSession,
    generator: &dyn ContentGenerator,
    heading_id: &str,
) -> Result<Vec<String>, AssistError> {
    let existing = expect_node(session, heading_id, ComponentType::Heading)?
        .prop_str("text")
        .unwrap_or_default()
        .to_string();

    let headlines = generator
        .alternative_headlines(&existing)
        .await
        .inspect_err(|e| warn!(heading_id, error = %e, "headline generation failed"))?;

    debug!(heading_id, count = headlines.len(), "generated headlines");
    Ok(headlines)
}

/// Replace a heading's text with a chosen suggestion
pub fn apply_headline(
    session: &mut EditSession,
    heading_id: &str,
    headline: &str,
) -> Result<MutationResult, AssistError> {
    expect_node(session, heading_id, ComponentType::Heading)?;
    set_prop(session, heading_id, "text", headline.to_string())
}

/// Generate copy about `topic` into a Text node
pub async fn fill_text(
    session: &mut EditSession,
    generator: &dyn ContentGenerator,
    text_id: &str,
    topic: &str,
) -> Result<MutationResult, AssistError> {
    expect_node(session, text_id, ComponentType::Text)?;

    let text = generator
        .text_block(topic)
        .await
        .inspect_err(|e| warn!(text_id, error = %e, "text generation failed"))?;

    set_prop(session, text_id, "text", text)
}

/// Upload an image file and point an Image node at it
pub async fn upload_image(
    session: &mut EditSession,
    storage: &dyn ImageStorage,
    image_id: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<MutationResult, AssistError> {
    expect_node(session, image_id, ComponentType::Image)?;

    let url = storage
        .upload(file_name, bytes)
        .await
        .inspect_err(|e| warn!(image_id, error = %e, "image upload failed"))?;

    set_prop(session, image_id, "src", url)
}
