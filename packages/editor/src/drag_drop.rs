//! # Drag and Drop
//!
//! Turns a sequence of drag events into at most one [`Mutation`].
//!
//! ```text
//!            drag_start               drag_over
//!   Idle ───────────────→ Dragging ─────────────→ Over { target, position }
//!    ↑                      ↑   │                    │        │
//!    │                      └───┼──── drag_leave ────┘        │
//!    └──── drag_end / drop ─────┴──────────── drop ───────────┘
//!                                          (emits Add / Move)
//! ```
//!
//! The controller knows nothing about the UI event system. Hosts feed it
//! pointer coordinates and target descriptors; `drag_over` never touches the
//! tree. Only a drop while over a target produces a mutation. Every other way
//! out of a drag returns to `Idle` with no mutation.

use crate::mutations::{Mutation, MutationResult};
use crate::node::ComponentType;
use crate::session::EditSession;
use crate::tree::{DropPosition, Placement};
use crate::EditorError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragPayload {
    /// A new component from the palette
    #[serde(rename_all = "camelCase")]
    NewComponent { component_type: ComponentType },

    /// An existing component on the canvas
    #[serde(rename_all = "camelCase")]
    MoveComponent { node_id: String },
}

impl DragPayload {
    pub fn new_component(component_type: ComponentType) -> Self {
        DragPayload::NewComponent { component_type }
    }

    pub fn move_component(node_id: impl Into<String>) -> Self {
        DragPayload::MoveComponent {
            node_id: node_id.into(),
        }
    }
}

/// How a target accepts drops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropMode {
    /// Drop lands above or below the target node
    Positional,

    /// Container that only appends; no top/bottom indicator
    AppendOnly,
}

/// A candidate drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// Node the pointer is over (positional targets)
    pub node_id: Option<String>,

    /// Container the drop lands in (None = page top level)
    pub parent_id: Option<String>,

    /// Column within a Columns parent
    pub column_index: Option<usize>,

    pub mode: DropMode,
}

impl DropTarget {
    /// A node that content can be dropped above or below
    pub fn node(
        node_id: impl Into<String>,
        parent_id: Option<String>,
        column_index: Option<usize>,
    ) -> Self {
        Self {
            node_id: Some(node_id.into()),
            parent_id,
            column_index,
            mode: DropMode::Positional,
        }
    }

    /// A container body (Section, or one column of a Columns node)
    pub fn container(parent_id: impl Into<String>, column_index: Option<usize>) -> Self {
        Self {
            node_id: None,
            parent_id: Some(parent_id.into()),
            column_index,
            mode: DropMode::AppendOnly,
        }
    }

    /// Empty canvas area: append at the page's top level
    pub fn canvas() -> Self {
        Self {
            node_id: None,
            parent_id: None,
            column_index: None,
            mode: DropMode::AppendOnly,
        }
    }

    fn placement(&self, position: Option<DropPosition>) -> Placement {
        match (self.mode, &self.node_id, position) {
            (DropMode::Positional, Some(node_id), Some(position)) => Placement {
                parent_id: self.parent_id.clone(),
                target_id: Some(node_id.clone()),
                position,
                column_index: self.column_index,
            },
            _ => Placement {
                parent_id: self.parent_id.clone(),
                target_id: None,
                position: DropPosition::Bottom,
                column_index: self.column_index,
            },
        }
    }
}

/// Vertical extent of a target on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Top half → `Top`, bottom half (midpoint included) → `Bottom`
    pub fn position_of(&self, pointer_y: f64) -> DropPosition {
        if pointer_y < self.top + self.height / 2.0 {
            DropPosition::Top
        } else {
            DropPosition::Bottom
        }
    }
}

/// Drag state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,

    /// Payload picked up, not over any target
    Dragging { payload: DragPayload },

    /// Over a target; `position` is None for append-only targets
    Over {
        payload: DragPayload,
        target: DropTarget,
        position: Option<DropPosition>,
    },
}

/// What the UI should draw for the current hover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndicator {
    pub node_id: Option<String>,
    pub parent_id: Option<String>,
    pub position: Option<DropPosition>,
}

/// Drag state machine
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Pick up a payload. Starting a new drag replaces any unfinished one.
    pub fn drag_start(&mut self, payload: DragPayload) {
        debug!(?payload, "drag start");
        self.state = DragState::Dragging { payload };
    }

    /// Pointer moved over a target. Returns false when no drag is active.
    pub fn drag_over(&mut self, target: DropTarget, pointer_y: f64, bounds: Bounds) -> bool {
        let payload = match std::mem::take(&mut self.state) {
            DragState::Idle => return false,
            DragState::Dragging { payload } | DragState::Over { payload, .. } => payload,
        };

        let position = match target.mode {
            DropMode::Positional => Some(bounds.position_of(pointer_y)),
            DropMode::AppendOnly => None,
        };

        self.state = DragState::Over {
            payload,
            target,
            position,
        };
        true
    }

    /// Pointer left the current target
    pub fn drag_leave(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Over { payload, .. } => DragState::Dragging { payload },
            other => other,
        };
    }

    /// Drag finished without a drop (released outside, or cancelled)
    pub fn drag_end(&mut self) {
        if self.is_dragging() {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Release over the current target. Returns the mutation to apply, if any.
    pub fn drop(&mut self) -> Option<Mutation> {
        let DragState::Over {
            payload,
            target,
            position,
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        let placement = target.placement(position);
        let mutation = match payload {
            DragPayload::NewComponent { component_type } => Mutation::AddComponent {
                component_type,
                placement,
            },
            DragPayload::MoveComponent { node_id } => {
                if placement.target_id.as_deref() == Some(node_id.as_str()) {
                    debug!(node_id = %node_id, "dropped onto itself");
                    return None;
                }
                Mutation::MoveComponent { node_id, placement }
            }
        };

        Some(mutation)
    }

    /// Drop and apply the resulting mutation to a session
    pub fn drop_on(
        &mut self,
        session: &mut EditSession,
    ) -> Result<Option<MutationResult>, EditorError> {
        match self.drop() {
            Some(mutation) => session.apply(mutation).map(Some),
            None => Ok(None),
        }
    }

    /// Indicator for the hovered target
    pub fn indicator(&self) -> Option<DropIndicator> {
        match &self.state {
            DragState::Over {
                target, position, ..
            } => Some(DropIndicator {
                node_id: target.node_id.clone(),
                parent_id: target.parent_id.clone(),
                position: *position,
            }),
            _ => None,
        }
    }
}
