//! # Tree Mutation Engine
//!
//! Pure operations over a page's component tree. Every operation takes the
//! current tree by reference and returns a new one; the input is never
//! modified.
//!
//! ## Placement rules
//!
//! New or moved content is placed by a [`Placement`]:
//!
//! - No parent: top level of the page
//! - Parent is a Section: its children
//! - Parent is Columns: the column at `column_index` (first column if none,
//!   last column if the index is past the end)
//!
//! Inside the chosen list the node goes immediately before (`Top`) or after
//! (`Bottom`) `target_id`, or at the end when there is no target.
//!
//! Nothing that fails to resolve is an error. A missing target appends to
//! the end of the list, and a missing or leaf parent appends to the top
//! level. Content is never dropped.

use crate::factory::NodeFactory;
use crate::mutations::MutationError;
use crate::node::{parse_count, ComponentType, Node, NodeBody, Props, Tree};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Upper bound on `numberOfColumns`
pub const MAX_COLUMNS: usize = 12;

/// Side of the target node a drop lands on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Top,
    #[default]
    Bottom,
}

/// Where new or moved content goes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub target_id: Option<String>,

    #[serde(default)]
    pub position: DropPosition,

    #[serde(default)]
    pub column_index: Option<usize>,
}

impl Placement {
    /// Append at the top level of the page
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Append to a container (Section, or column 0 of a Columns node)
    pub fn inside(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    /// Append to one column of a Columns node
    pub fn in_column(parent_id: impl Into<String>, column_index: usize) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            column_index: Some(column_index),
            ..Self::default()
        }
    }

    /// Place relative to a sibling
    pub fn relative_to(mut self, target_id: impl Into<String>, position: DropPosition) -> Self {
        self.target_id = Some(target_id.into());
        self.position = position;
        self
    }

    pub fn before(self, target_id: impl Into<String>) -> Self {
        self.relative_to(target_id, DropPosition::Top)
    }

    pub fn after(self, target_id: impl Into<String>) -> Self {
        self.relative_to(target_id, DropPosition::Bottom)
    }
}

/// Where an existing node lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Containing node (None at top level)
    pub parent_id: Option<String>,

    /// Column within the parent, for Columns parents
    pub column_index: Option<usize>,

    /// Index inside the containing list
    pub index: usize,
}

impl Location {
    /// Placement that puts new content right after this location's node
    pub fn placement_after(&self, node_id: &str) -> Placement {
        Placement {
            parent_id: self.parent_id.clone(),
            target_id: Some(node_id.to_string()),
            position: DropPosition::Bottom,
            column_index: self.column_index,
        }
    }
}

/// Find a node anywhere in the tree
pub fn find<'a>(tree: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        for (_, list) in node.child_lists() {
            if let Some(found) = find(list, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_mut<'a>(tree: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in tree.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        for (_, list) in node.child_lists_mut() {
            if let Some(found) = find_mut(list, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains(tree: &[Node], id: &str) -> bool {
    find(tree, id).is_some()
}

/// Locate the list a node lives in
pub fn locate(tree: &[Node], id: &str) -> Option<Location> {
    locate_in(tree, id, None, None)
}

fn locate_in(
    list: &[Node],
    id: &str,
    parent_id: Option<&str>,
    column_index: Option<usize>,
) -> Option<Location> {
    if let Some(index) = list.iter().position(|node| node.id == id) {
        return Some(Location {
            parent_id: parent_id.map(str::to_string),
            column_index,
            index,
        });
    }

    for node in list {
        for (slot, children) in node.child_lists() {
            let parent = Some(node.id.as_str());
            if let Some(found) = locate_in(children, id, parent, slot.column_index()) {
                return Some(found);
            }
        }
    }
    None
}

/// Ids of the containing nodes, outermost first
pub fn ancestors(tree: &[Node], id: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = id.to_string();

    while let Some(parent_id) = locate(tree, &current).and_then(|loc| loc.parent_id) {
        path.push(parent_id.clone());
        current = parent_id;
    }

    path.reverse();
    path
}

/// Every node id in pre-order (column ids excluded)
pub fn node_ids(tree: &[Node]) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids(tree, &mut ids);
    ids
}

fn collect_ids(list: &[Node], ids: &mut Vec<String>) {
    for node in list {
        ids.push(node.id.clone());
        for (_, children) in node.child_lists() {
            collect_ids(children, ids);
        }
    }
}

/// Merge `partial` into a node's props.
///
/// Later keys win. Changing `numberOfColumns` on a Columns node resizes its
/// columns: retained columns keep their content, new columns start empty,
/// dropped columns lose theirs. An unknown id returns the tree unchanged.
pub fn update_props(
    tree: &[Node],
    id: &str,
    partial: &Props,
    factory: &mut NodeFactory,
) -> Result<Tree, MutationError> {
    let mut next = tree.to_vec();

    let Some(node) = find_mut(&mut next, id) else {
        debug!(node_id = id, "update_props: node not found, tree unchanged");
        return Ok(next);
    };

    let mut partial = partial.clone();
    if node.component_type == ComponentType::Columns {
        if let Some(requested) = partial.get("numberOfColumns") {
            let count = column_count(requested)?;
            partial.insert("numberOfColumns".into(), Value::from(count));
            resize_columns(node, count, factory);
        }
    }

    for (key, value) in partial {
        node.props.insert(key, value);
    }

    Ok(next)
}

fn column_count(value: &Value) -> Result<usize, MutationError> {
    match parse_count(value) {
        Some(n) if (1..=MAX_COLUMNS).contains(&n) => Ok(n),
        _ => Err(MutationError::InvalidProps(format!(
            "numberOfColumns must be an integer between 1 and {}, got {}",
            MAX_COLUMNS, value
        ))),
    }
}

fn resize_columns(node: &mut Node, count: usize, factory: &mut NodeFactory) {
    if let NodeBody::Columns(columns) = &mut node.body {
        if count < columns.len() {
            let dropped: usize = columns[count..]
                .iter()
                .map(|c| c.children.iter().map(Node::subtree_len).sum::<usize>())
                .sum();
            if dropped > 0 {
                debug!(node_id = %node.id, dropped, "column resize discards content");
            }
            columns.truncate(count);
        }
        while columns.len() < count {
            columns.push(factory.new_column());
        }
    }
}

/// Create a node of `component_type` and insert it per `placement`.
///
/// Returns the new tree and the id of the created node.
pub fn add(
    tree: &[Node],
    factory: &mut NodeFactory,
    component_type: ComponentType,
    placement: &Placement,
) -> (Tree, String) {
    let mut node = factory.create(component_type);
    ensure_fresh_ids(tree, &mut node, factory);

    let id = node.id.clone();
    let mut next = tree.to_vec();
    insert(&mut next, node, placement);
    (next, id)
}

/// Regenerate ids until none of them collide with the tree
fn ensure_fresh_ids(tree: &[Node], node: &mut Node, factory: &mut NodeFactory) {
    let existing: HashSet<String> = all_ids(tree).into_iter().collect();
    while all_ids(std::slice::from_ref(&*node))
        .iter()
        .any(|id| existing.contains(id))
    {
        warn!(node_id = %node.id, "generated id collides with page content, regenerating");
        factory.reassign_ids(node);
    }
}

/// Node and column ids
fn all_ids(tree: &[Node]) -> Vec<String> {
    let mut ids = Vec::new();
    for node in tree {
        ids.push(node.id.clone());
        if let Some(columns) = node.columns() {
            ids.extend(columns.iter().map(|c| c.id.clone()));
        }
        for (_, list) in node.child_lists() {
            ids.extend(all_ids(list));
        }
    }
    ids
}

/// Insert an existing node per `placement`
pub fn insert_node(tree: &[Node], node: Node, placement: &Placement) -> Tree {
    let mut next = tree.to_vec();
    insert(&mut next, node, placement);
    next
}

fn insert(tree: &mut Vec<Node>, node: Node, placement: &Placement) {
    if let Some(parent_id) = placement.parent_id.as_deref() {
        let list = find_mut(tree, parent_id)
            .and_then(|parent| parent.insertion_list_mut(placement.column_index));

        if let Some(list) = list {
            insert_into(list, node, placement);
            return;
        }

        warn!(parent_id, node_id = %node.id, "parent not resolvable, appending at top level");
        tree.push(node);
        return;
    }

    insert_into(tree, node, placement);
}

fn insert_into(list: &mut Vec<Node>, node: Node, placement: &Placement) {
    let target = placement
        .target_id
        .as_deref()
        .map(|target_id| (target_id, list.iter().position(|n| n.id == target_id)));

    let index = match target {
        Some((_, Some(index))) => match placement.position {
            DropPosition::Top => index,
            DropPosition::Bottom => index + 1,
        },
        Some((target_id, None)) => {
            debug!(target_id, "drop target not in container, appending");
            list.len()
        }
        None => list.len(),
    };

    list.insert(index, node);
}

/// Remove a node (and its subtree), returning it alongside the new tree
pub fn take(tree: &[Node], id: &str) -> (Tree, Option<Node>) {
    let mut next = tree.to_vec();
    let removed = remove(&mut next, id);
    (next, removed)
}

/// Remove a node and its subtree from wherever it lives
pub fn delete(tree: &[Node], id: &str) -> Tree {
    take(tree, id).0
}

fn remove(list: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(index) = list.iter().position(|node| node.id == id) {
        return Some(list.remove(index));
    }

    for node in list.iter_mut() {
        for (_, children) in node.child_lists_mut() {
            if let Some(removed) = remove(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Move a node (with its subtree) to a new placement.
///
/// Dropping a node onto itself, or moving an id that isn't in the tree,
/// returns the tree unchanged. Moving a node into its own subtree is
/// rejected.
pub fn move_node(
    tree: &[Node],
    dragged_id: &str,
    placement: &Placement,
) -> Result<Tree, MutationError> {
    if placement.target_id.as_deref() == Some(dragged_id) {
        return Ok(tree.to_vec());
    }

    let Some(dragged) = find(tree, dragged_id) else {
        debug!(node_id = dragged_id, "move: dragged node not found, tree unchanged");
        return Ok(tree.to_vec());
    };

    if let Some(parent_id) = placement.parent_id.as_deref() {
        if contains(std::slice::from_ref(dragged), parent_id) {
            return Err(MutationError::CycleDetected);
        }
    }

    let (mut next, removed) = take(tree, dragged_id);
    if let Some(node) = removed {
        insert(&mut next, node, placement);
    }
    Ok(next)
}

/// Copy a node's subtree with fresh ids, right after the original
pub fn duplicate(tree: &[Node], id: &str, factory: &mut NodeFactory) -> (Tree, Option<String>) {
    let (Some(original), Some(location)) = (find(tree, id), locate(tree, id)) else {
        return (tree.to_vec(), None);
    };

    let mut copy = original.clone();
    factory.reassign_ids(&mut copy);
    ensure_fresh_ids(tree, &mut copy, factory);

    let copy_id = copy.id.clone();
    let next = insert_node(tree, copy, &location.placement_after(id));
    (next, Some(copy_id))
}

/// Check the structural invariants of a tree
pub fn validate(tree: &[Node]) -> Result<(), MutationError> {
    let mut seen = HashSet::new();
    for id in all_ids(tree) {
        if !seen.insert(id.clone()) {
            return Err(MutationError::DuplicateId(id));
        }
    }
    validate_nodes(tree)
}

fn validate_nodes(list: &[Node]) -> Result<(), MutationError> {
    for node in list {
        let missing = node.missing_props();
        if !missing.is_empty() {
            return Err(MutationError::InvalidProps(format!(
                "{} {} is missing {}",
                node.component_type,
                node.id,
                missing.join(", ")
            )));
        }

        if let Some(columns) = node.columns() {
            if node.number_of_columns() != Some(columns.len()) {
                return Err(MutationError::InvalidStructure(format!(
                    "Columns {} declares {:?} columns but has {}",
                    node.id,
                    node.number_of_columns(),
                    columns.len()
                )));
            }
        }

        for (_, children) in node.child_lists() {
            validate_nodes(children)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => Props::new(),
        }
    }

    /// Section[Heading, Text, Button] with ids n-1..n-4
    fn welcome(factory: &mut NodeFactory) -> Tree {
        factory.welcome_content()
    }

    fn child_ids(tree: &[Node], parent: &str) -> Vec<String> {
        find(tree, parent)
            .and_then(Node::children)
            .map(|c| c.iter().map(|n| n.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_find_reaches_columns() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let (tree, cols) = add(
            &tree,
            &mut factory,
            ComponentType::Columns,
            &Placement::top_level(),
        );
        let (tree, image) = add(
            &tree,
            &mut factory,
            ComponentType::Image,
            &Placement::in_column(&cols, 1),
        );

        assert_eq!(find(&tree, &image).unwrap().component_type, ComponentType::Image);
        assert!(find(&tree, "missing").is_none());

        let location = locate(&tree, &image).unwrap();
        assert_eq!(location.parent_id.as_deref(), Some(cols.as_str()));
        assert_eq!(location.column_index, Some(1));
    }

    #[test]
    fn test_add_after_target_in_section() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();
        let heading = tree[0].children().unwrap()[0].id.clone();

        let (next, text) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::inside(&section).after(&heading),
        );

        let ids = child_ids(&next, &section);
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], heading);
        assert_eq!(ids[1], text);

        // input untouched
        assert_eq!(child_ids(&tree, &section).len(), 3);
    }

    #[test]
    fn test_add_before_target_at_top_level() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();

        let (next, navbar) = add(
            &tree,
            &mut factory,
            ComponentType::Navbar,
            &Placement::top_level().before(&section),
        );

        assert_eq!(next[0].id, navbar);
        assert_eq!(next[1].id, section);
    }

    #[test]
    fn test_add_falls_back_to_append() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();
        let heading = tree[0].children().unwrap()[0].id.clone();

        // unknown target inside a known parent
        let (next, id) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::inside(&section).after("ghost"),
        );
        assert_eq!(child_ids(&next, &section).last(), Some(&id));

        // unknown parent
        let (next, id) = add(
            &tree,
            &mut factory,
            ComponentType::Footer,
            &Placement::inside("ghost"),
        );
        assert_eq!(next.last().map(|n| n.id.clone()), Some(id));

        // leaf parent
        let (next, id) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::inside(&heading),
        );
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id, id);
    }

    #[test]
    fn test_add_then_delete_restores_tree() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();

        let (added, id) = add(
            &tree,
            &mut factory,
            ComponentType::Form,
            &Placement::inside(&section),
        );
        assert_ne!(added, tree);

        assert_eq!(delete(&added, &id), tree);
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();
        let heading = tree[0].children().unwrap()[0].id.clone();

        let next = delete(&tree, &heading);
        let remaining: Vec<_> = next[0]
            .children()
            .unwrap()
            .iter()
            .map(|n| n.component_type)
            .collect();
        assert_eq!(remaining, vec![ComponentType::Text, ComponentType::Button]);

        let next = delete(&tree, &section);
        assert!(next.is_empty());
        assert!(node_ids(&next).is_empty());
    }

    #[test]
    fn test_delete_inside_column() {
        let mut factory = NodeFactory::sequential("n");
        let (tree, cols) = add(&[], &mut factory, ComponentType::Columns, &Placement::top_level());
        let (tree, text) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::in_column(&cols, 0),
        );

        let next = delete(&tree, &text);
        assert!(find(&next, &text).is_none());
        assert!(next[0].columns().unwrap()[0].children.is_empty());
    }

    #[test]
    fn test_update_props_merges() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let heading = tree[0].children().unwrap()[0].id.clone();

        let next = update_props(
            &tree,
            &heading,
            &props(json!({ "text": "Hi" })),
            &mut factory,
        )
        .unwrap();
        let node = find(&next, &heading).unwrap();

        assert_eq!(node.prop_str("text"), Some("Hi"));
        assert_eq!(node.prop_str("level"), Some("h1"));
        assert!(node.missing_props().is_empty());
    }

    #[test]
    fn test_update_props_unknown_id_is_noop() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);

        let next = update_props(
            &tree,
            "ghost",
            &props(json!({ "text": "Hi" })),
            &mut factory,
        )
        .unwrap();
        assert_eq!(next, tree);
    }

    #[test]
    fn test_columns_grow_preserves_content() {
        let mut factory = NodeFactory::sequential("n");
        let (tree, cols) = add(&[], &mut factory, ComponentType::Columns, &Placement::top_level());
        let (tree, _) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::in_column(&cols, 0),
        );
        let (tree, _) = add(
            &tree,
            &mut factory,
            ComponentType::Image,
            &Placement::in_column(&cols, 1),
        );
        let before = tree[0].columns().unwrap().to_vec();

        let next = update_props(
            &tree,
            &cols,
            &props(json!({ "numberOfColumns": 4 })),
            &mut factory,
        )
        .unwrap();
        let columns = next[0].columns().unwrap();

        assert_eq!(columns.len(), 4);
        assert_eq!(&columns[..2], &before[..]);
        assert!(columns[2].children.is_empty());
        assert!(columns[3].children.is_empty());
        assert_eq!(next[0].number_of_columns(), Some(4));
        assert!(validate(&next).is_ok());
    }

    #[test]
    fn test_columns_shrink_truncates() {
        let mut factory = NodeFactory::sequential("n");
        let (tree, cols) = add(&[], &mut factory, ComponentType::Columns, &Placement::top_level());
        let tree = update_props(
            &tree,
            &cols,
            &props(json!({ "numberOfColumns": 3 })),
            &mut factory,
        )
        .unwrap();
        let (tree, kept) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::in_column(&cols, 0),
        );
        let (tree, lost) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::in_column(&cols, 2),
        );

        let next = update_props(
            &tree,
            &cols,
            &props(json!({ "numberOfColumns": "1" })),
            &mut factory,
        )
        .unwrap();

        assert_eq!(next[0].columns().unwrap().len(), 1);
        assert_eq!(next[0].number_of_columns(), Some(1));
        assert!(contains(&next, &kept));
        assert!(!contains(&next, &lost));
    }

    #[test]
    fn test_invalid_column_count_rejected() {
        let mut factory = NodeFactory::sequential("n");
        let (tree, cols) = add(&[], &mut factory, ComponentType::Columns, &Placement::top_level());

        for bad in [json!(0), json!(-2), json!("three"), json!(MAX_COLUMNS + 1)] {
            let result = update_props(
                &tree,
                &cols,
                &props(json!({ "numberOfColumns": bad })),
                &mut factory,
            );
            assert!(matches!(result, Err(MutationError::InvalidProps(_))));
        }
    }

    #[test]
    fn test_move_onto_self_is_noop() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let heading = tree[0].children().unwrap()[0].id.clone();

        let placement = Placement::inside(&tree[0].id).after(&heading);
        assert_eq!(move_node(&tree, &heading, &placement).unwrap(), tree);
        assert_eq!(move_node(&tree, "ghost", &Placement::top_level()).unwrap(), tree);
    }

    #[test]
    fn test_move_within_section() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();
        let ids = child_ids(&tree, &section);

        let next = move_node(&tree, &ids[2], &Placement::inside(&section).before(&ids[0])).unwrap();
        assert_eq!(
            child_ids(&next, &section),
            vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]
        );
    }

    #[test]
    fn test_move_into_column_and_back() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();
        let button = tree[0].children().unwrap()[2].id.clone();
        let (tree, cols) = add(
            &tree,
            &mut factory,
            ComponentType::Columns,
            &Placement::top_level(),
        );

        let next = move_node(&tree, &button, &Placement::in_column(&cols, 1)).unwrap();
        assert_eq!(locate(&next, &button).unwrap().column_index, Some(1));
        assert_eq!(child_ids(&next, &section).len(), 2);

        let back = move_node(&next, &button, &Placement::inside(&section)).unwrap();
        assert_eq!(child_ids(&back, &section).last(), Some(&button));
        assert_eq!(node_ids(&back).len(), node_ids(&tree).len());
    }

    #[test]
    fn test_move_into_own_subtree_rejected() {
        let mut factory = NodeFactory::sequential("n");
        let (tree, cols) = add(&[], &mut factory, ComponentType::Columns, &Placement::top_level());

        let result = move_node(&tree, &cols, &Placement::in_column(&cols, 0));
        assert_eq!(result, Err(MutationError::CycleDetected));
    }

    #[test]
    fn test_move_to_missing_parent_keeps_content() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let heading = tree[0].children().unwrap()[0].id.clone();

        let next = move_node(&tree, &heading, &Placement::inside("ghost")).unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id, heading);
    }

    #[test]
    fn test_duplicate_inserts_copy_after_original() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();

        let (next, copy) = duplicate(&tree, &section, &mut factory);
        let copy = copy.unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id, copy);
        assert_eq!(next[1].subtree_len(), tree[0].subtree_len());
        assert!(validate(&next).is_ok());
    }

    #[test]
    fn test_validate_detects_duplicate_ids() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let mut broken = tree.clone();
        broken.push(tree[0].clone());

        assert!(matches!(validate(&broken), Err(MutationError::DuplicateId(_))));
    }

    #[test]
    fn test_ancestors() {
        let mut factory = NodeFactory::sequential("n");
        let tree = welcome(&mut factory);
        let section = tree[0].id.clone();
        let (tree, cols) = add(
            &tree,
            &mut factory,
            ComponentType::Columns,
            &Placement::inside(&section),
        );
        let (tree, text) = add(
            &tree,
            &mut factory,
            ComponentType::Text,
            &Placement::in_column(&cols, 0),
        );

        assert_eq!(ancestors(&tree, &text), vec![section, cols]);
    }
}
