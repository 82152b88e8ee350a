//! # Component Tree Model
//!
//! A page is an ordered list of [`Node`]s. Each node carries a
//! [`ComponentType`], a flat props object, and a body that says whether it
//! can hold children:
//!
//! - `Leaf` for content components (Heading, Text, Button, ...)
//! - `Children` for Section
//! - `Columns` for Columns, one child list per column
//!
//! Leaf types cannot hold children by construction. Traversal code never
//! matches on the body directly; it goes through [`Node::child_lists`] so
//! Section children and column children are walked by the same algorithm.

use crate::mutations::MutationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Props of a node (flat JSON object, shape depends on the type)
pub type Props = Map<String, Value>;

/// Ordered top-level content of a page
pub type Tree = Vec<Node>;

/// Supported component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Section,
    Columns,
    Heading,
    Text,
    Button,
    Image,
    Navbar,
    Footer,
    Video,
    Form,
}

impl ComponentType {
    pub const ALL: [ComponentType; 10] = [
        ComponentType::Section,
        ComponentType::Columns,
        ComponentType::Heading,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Navbar,
        ComponentType::Footer,
        ComponentType::Video,
        ComponentType::Form,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComponentType::Section => "Section",
            ComponentType::Columns => "Columns",
            ComponentType::Heading => "Heading",
            ComponentType::Text => "Text",
            ComponentType::Button => "Button",
            ComponentType::Image => "Image",
            ComponentType::Navbar => "Navbar",
            ComponentType::Footer => "Footer",
            ComponentType::Video => "Video",
            ComponentType::Form => "Form",
        }
    }

    /// Whether nodes of this type hold child lists
    pub fn is_container(&self) -> bool {
        matches!(self, ComponentType::Section | ComponentType::Columns)
    }

    /// Props every node of this type must carry
    pub fn required_props(&self) -> &'static [&'static str] {
        match self {
            ComponentType::Section => &[
                "backgroundColor",
                "padding",
                "flexDirection",
                "justifyContent",
                "alignItems",
                "gap",
            ],
            ComponentType::Columns => &["numberOfColumns", "gap"],
            ComponentType::Heading => &["text", "level", "align", "color"],
            ComponentType::Text => &["text", "align", "color", "fontSize"],
            ComponentType::Button => &["text", "link", "backgroundColor", "textColor", "align"],
            ComponentType::Image => &["src", "alt", "width", "align"],
            ComponentType::Navbar => &["logoText", "links", "backgroundColor", "textColor"],
            ComponentType::Footer => &["text", "backgroundColor", "textColor"],
            ComponentType::Video => &["url", "autoplay", "controls", "width"],
            ComponentType::Form => &["fields", "submitText", "successMessage"],
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentType {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MutationError::UnsupportedComponent(s.to_string()))
    }
}

/// A count given as a JSON number or a numeric string
pub(crate) fn parse_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
}

/// One slot of a Columns node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,

    #[serde(default)]
    pub children: Vec<Node>,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }
}

/// What a node can hold
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    Leaf,
    Children(Vec<Node>),
    Columns(Vec<Column>),
}

/// Which child list of a container a node lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Children,
    Column(usize),
}

impl Slot {
    pub fn column_index(self) -> Option<usize> {
        match self {
            Slot::Children => None,
            Slot::Column(index) => Some(index),
        }
    }
}

/// One visual component instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    pub id: String,
    pub component_type: ComponentType,
    pub props: Props,
    pub body: NodeBody,
}

impl Node {
    /// Build a node with an empty body matching its type
    pub fn new(id: impl Into<String>, component_type: ComponentType, props: Props) -> Self {
        let body = match component_type {
            ComponentType::Section => NodeBody::Children(Vec::new()),
            ComponentType::Columns => NodeBody::Columns(Vec::new()),
            _ => NodeBody::Leaf,
        };

        Self {
            id: id.into(),
            component_type,
            props,
            body,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        if let NodeBody::Children(existing) = &mut self.body {
            *existing = children;
        }
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        if let NodeBody::Columns(existing) = &mut self.body {
            *existing = columns;
        }
        self
    }

    /// Section children (None for every other type)
    pub fn children(&self) -> Option<&[Node]> {
        match &self.body {
            NodeBody::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Columns of a Columns node (None for every other type)
    pub fn columns(&self) -> Option<&[Column]> {
        match &self.body {
            NodeBody::Columns(columns) => Some(columns),
            _ => None,
        }
    }

    /// Every child list of this node, tagged with the slot it represents
    pub fn child_lists(&self) -> Vec<(Slot, &Vec<Node>)> {
        match &self.body {
            NodeBody::Leaf => Vec::new(),
            NodeBody::Children(children) => vec![(Slot::Children, children)],
            NodeBody::Columns(columns) => columns
                .iter()
                .enumerate()
                .map(|(index, column)| (Slot::Column(index), &column.children))
                .collect(),
        }
    }

    pub fn child_lists_mut(&mut self) -> Vec<(Slot, &mut Vec<Node>)> {
        match &mut self.body {
            NodeBody::Leaf => Vec::new(),
            NodeBody::Children(children) => vec![(Slot::Children, children)],
            NodeBody::Columns(columns) => columns
                .iter_mut()
                .enumerate()
                .map(|(index, column)| (Slot::Column(index), &mut column.children))
                .collect(),
        }
    }

    /// Child list that new content lands in.
    ///
    /// Section → its children. Columns → the requested column, clamped to the
    /// last one, or the first column when no index is given. Leaves and
    /// Columns with no columns have nowhere to put content.
    pub fn insertion_list_mut(&mut self, column_index: Option<usize>) -> Option<&mut Vec<Node>> {
        match &mut self.body {
            NodeBody::Leaf => None,
            NodeBody::Children(children) => Some(children),
            NodeBody::Columns(columns) => {
                let last = columns.len().checked_sub(1)?;
                let index = column_index.unwrap_or(0).min(last);
                columns.get_mut(index).map(|column| &mut column.children)
            }
        }
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Declared column count of a Columns node
    pub fn number_of_columns(&self) -> Option<usize> {
        self.props.get("numberOfColumns").and_then(parse_count)
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self
            .child_lists()
            .into_iter()
            .map(|(_, list)| list.iter().map(Node::subtree_len).sum::<usize>())
            .sum::<usize>()
    }

    /// Required props this node is missing
    pub fn missing_props(&self) -> Vec<&'static str> {
        self.component_type
            .required_props()
            .iter()
            .copied()
            .filter(|key| !self.props.contains_key(*key))
            .collect()
    }
}

/// Wire shape: `{ id, type, props, children?, columns? }`
#[derive(Serialize, Deserialize)]
struct RawNode {
    id: String,

    #[serde(rename = "type")]
    component_type: ComponentType,

    #[serde(default)]
    props: Props,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<Column>>,
}

impl TryFrom<RawNode> for Node {
    type Error = MutationError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let body = match raw.component_type {
            ComponentType::Section => {
                if raw.columns.is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "Section {} cannot have columns",
                        raw.id
                    )));
                }
                NodeBody::Children(raw.children.unwrap_or_default())
            }
            ComponentType::Columns => {
                if raw.children.as_ref().is_some_and(|c| !c.is_empty()) {
                    return Err(MutationError::InvalidStructure(format!(
                        "Columns {} holds content in columns, not children",
                        raw.id
                    )));
                }
                NodeBody::Columns(raw.columns.unwrap_or_default())
            }
            leaf => {
                let has_children = raw.children.as_ref().is_some_and(|c| !c.is_empty());
                if has_children || raw.columns.is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "{} {} cannot have children",
                        leaf, raw.id
                    )));
                }
                NodeBody::Leaf
            }
        };

        Ok(Node {
            id: raw.id,
            component_type: raw.component_type,
            props: raw.props,
            body,
        })
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let (children, columns) = match node.body {
            NodeBody::Leaf => (None, None),
            NodeBody::Children(children) => (Some(children), None),
            NodeBody::Columns(columns) => (None, Some(columns)),
        };

        RawNode {
            id: node.id,
            component_type: node.component_type,
            props: node.props,
            children,
            columns,
        }
    }
}
