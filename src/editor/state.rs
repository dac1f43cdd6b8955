//! Modal editor state as a tagged union, so illegal combinations (the
//! palette swallowing shortcuts mid-save, a config panel bound to no
//! node) are unrepresentable.

/// What the editor is currently doing.
///
/// Exactly one variant holds at a time. Multi-selection for deletion is
/// tracked on the nodes and edges themselves; `NodeSelected` is the node
/// the configuration panel binds to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    /// The step palette is open.
    PaletteOpen,
    /// A node is selected and the side configuration panel binds to it.
    NodeSelected { node_id: String },
    /// A palette token of the given task kind is mid-drag over the canvas.
    Dragging { kind: String },
    /// A save request is in flight. Editing stays possible; only a second
    /// save is refused.
    Saving,
}

impl EditorState {
    /// The node the configuration panel is bound to, if any.
    pub fn selected_node(&self) -> Option<&str> {
        match self {
            EditorState::NodeSelected { node_id } => Some(node_id),
            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, EditorState::Saving)
    }
}
