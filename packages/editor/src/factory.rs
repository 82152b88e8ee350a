//! # Node Factory
//!
//! Builds fully-defaulted nodes for every [`ComponentType`]. A node coming
//! out of the factory always has a fresh id and every prop its type
//! requires; Columns nodes come with `numberOfColumns` empty columns.

use crate::id_generator::{IdSource, SequentialIds, SessionIds};
use crate::mutations::MutationError;
use crate::node::{Column, ComponentType, Node, NodeBody, Props, Tree};
use serde_json::{json, Value};

/// Column count of a freshly created Columns node
pub const DEFAULT_COLUMN_COUNT: usize = 2;

/// Heading text of the page every new account starts with
pub const WELCOME_HEADING: &str = "Welcome to Your New Page";

#[derive(Debug)]
pub struct NodeFactory {
    ids: Box<dyn IdSource>,
}

impl NodeFactory {
    pub fn new(ids: impl IdSource + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    /// Factory with session-scoped ids for a page
    pub fn for_page(page_id: &str) -> Self {
        Self::new(SessionIds::new(page_id))
    }

    /// Factory with deterministic `<seed>-<n>` ids
    pub fn sequential(seed: impl Into<String>) -> Self {
        Self::new(SequentialIds::from_seed(seed))
    }

    pub fn next_id(&mut self, prefix: &str) -> String {
        self.ids.next_id(prefix)
    }

    /// Create a new node of the given type
    pub fn create(&mut self, component_type: ComponentType) -> Node {
        let prefix = component_type.name().to_ascii_lowercase();
        let id = self.ids.next_id(&prefix);
        let node = Node::new(id, component_type, Self::default_props(component_type));

        if component_type == ComponentType::Columns {
            let columns = (0..DEFAULT_COLUMN_COUNT).map(|_| self.new_column()).collect();
            node.with_columns(columns)
        } else {
            node
        }
    }

    /// Create a node from a type name, rejecting names outside the enumeration
    pub fn create_named(&mut self, type_name: &str) -> Result<Node, MutationError> {
        let component_type = type_name.parse::<ComponentType>()?;
        Ok(self.create(component_type))
    }

    pub fn new_column(&mut self) -> Column {
        Column::new(self.ids.next_id("column"))
    }

    /// Give a subtree fresh ids (nodes and columns)
    pub fn reassign_ids(&mut self, node: &mut Node) {
        node.id = self.ids.next_id(&node.component_type.name().to_ascii_lowercase());

        if let NodeBody::Columns(columns) = &mut node.body {
            for column in columns.iter_mut() {
                column.id = self.ids.next_id("column");
            }
        }

        for (_, list) in node.child_lists_mut() {
            for child in list.iter_mut() {
                self.reassign_ids(child);
            }
        }
    }

    /// Content of the page created at signup
    pub fn welcome_content(&mut self) -> Tree {
        let mut heading = self.create(ComponentType::Heading);
        heading.props.insert("text".into(), json!(WELCOME_HEADING));
        heading.props.insert("level".into(), json!("h1"));
        heading.props.insert("align".into(), json!("center"));

        let mut text = self.create(ComponentType::Text);
        text.props.insert(
            "text".into(),
            json!(
                "This is your landing page. \
                 Drag components in from the sidebar to start building."
            ),
        );
        text.props.insert("align".into(), json!("center"));

        let mut button = self.create(ComponentType::Button);
        button.props.insert("text".into(), json!("Get Started"));
        button.props.insert("align".into(), json!("center"));

        let mut section = self.create(ComponentType::Section);
        section.props.insert("alignItems".into(), json!("center"));
        vec![section.with_children(vec![heading, text, button])]
    }

    /// Complete default props for a type
    pub fn default_props(component_type: ComponentType) -> Props {
        let value = match component_type {
            ComponentType::Section => json!({
                "backgroundColor": "#ffffff",
                "padding": "40px 20px",
                "flexDirection": "column",
                "justifyContent": "flex-start",
                "alignItems": "stretch",
                "gap": "16px",
            }),
            ComponentType::Columns => json!({
                "numberOfColumns": DEFAULT_COLUMN_COUNT,
                "gap": "20px",
            }),
            ComponentType::Heading => json!({
                "text": "New Heading",
                "level": "h2",
                "align": "left",
                "color": "#111827",
            }),
            ComponentType::Text => json!({
                "text": "Add your text here",
                "align": "left",
                "color": "#374151",
                "fontSize": "16px",
            }),
            ComponentType::Button => json!({
                "text": "Click Me",
                "link": "#",
                "backgroundColor": "#2563eb",
                "textColor": "#ffffff",
                "align": "left",
            }),
            ComponentType::Image => json!({
                "src": "https://placehold.co/600x400?text=Image",
                "alt": "Image",
                "width": "100%",
                "align": "center",
            }),
            ComponentType::Navbar => json!({
                "logoText": "Brand",
                "links": [
                    { "label": "Home", "url": "#" },
                    { "label": "Features", "url": "#features" },
                    { "label": "Contact", "url": "#contact" },
                ],
                "backgroundColor": "#ffffff",
                "textColor": "#111827",
            }),
            ComponentType::Footer => json!({
                "text": "© Your Company. All rights reserved.",
                "backgroundColor": "#111827",
                "textColor": "#ffffff",
            }),
            ComponentType::Video => json!({
                "url": "",
                "autoplay": false,
                "controls": true,
                "width": "100%",
            }),
            ComponentType::Form => json!({
                "fields": [
                    { "name": "name", "label": "Name", "type": "text", "required": true },
                    { "name": "email", "label": "Email", "type": "email", "required": true },
                ],
                "submitText": "Submit",
                "successMessage": "Thanks! We'll be in touch.",
            }),
        };

        match value {
            Value::Object(map) => map,
            _ => Props::new(),
        }
    }
}
