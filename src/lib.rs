//! # Flowcanvas - Workflow Graph Editor Core
//!
//! **Flowcanvas** is the model and interaction core of a workflow canvas
//! editor: the component that lets a user visually assemble a directed
//! graph of automation steps. It is UI-framework-agnostic (rendering,
//! HTTP, and authentication live in the host application) and covers:
//!
//! - the bidirectional mapping between the backend's ordered step list
//!   and the visual node/edge graph ([`graph`]),
//! - a bounded, snapshot-based undo/redo engine ([`history`]),
//! - the proximity heuristic that auto-wires a freshly dropped step to
//!   its nearest predecessor ([`editor::autoconnect`]),
//! - the selection/drag/keyboard state machine with dirty-state tracking
//!   that gates persistence ([`editor::controller`]),
//! - the persistence boundary as a trait the host wires a transport into
//!   ([`persistence`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use flowcanvas::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Open an editor over a (here: empty) workflow definition. In the
//! // real application the definition comes from `PersistenceAdapter::load`.
//! let mut editor = InteractionController::open(
//!     "wf-1",
//!     "Lead enrichment",
//!     "Scrape, enrich, notify",
//!     WorkflowDefinition::default(),
//! )?;
//!
//! // Drop two steps onto the canvas in reading order. The second lands
//! // close below the first, so the auto-connector wires them up.
//! let scrape = editor.add_node("web_scrape", Some(Position::new(250.0, 50.0)));
//! let notify = editor.add_node("send_email", Some(Position::new(250.0, 170.0)));
//! assert!(editor.graph().has_edge_between(&scrape, &notify));
//! assert!(editor.is_dirty());
//!
//! // Every mutation is one undo level.
//! editor.undo();
//! assert!(editor.graph().node(&notify).is_none());
//! # Ok(())
//! # }
//! ```
//!
//! Saving serializes the graph back to the step list via
//! [`graph::graph_to_steps`] and hands a point-in-time
//! [`persistence::SaveRequest`] to the adapter; a failed save leaves the
//! in-memory state and the dirty flag untouched.

pub mod editor;
pub mod error;
pub mod graph;
pub mod history;
pub mod persistence;
pub mod prelude;
pub mod step;
