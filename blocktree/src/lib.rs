//! Headless block tree for the page builder sidebar.
//!
//! This crate owns everything the sidebar tree needs that does not depend on
//! a particular UI toolkit: the block document, the editor store contract,
//! the per-tree interaction state (expansion, drag, rename), and the
//! translation of user gestures on a row into typed events that bubble to a
//! single root handler. The host UI renders the rows produced by
//! [`render::render_tree`] and feeds gestures back through
//! [`engine::TreeEngine::dispatch`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`block`] | Block document types and subtree queries |
//! | [`store`] | `EditorStore` contract, store commands, in-memory `DocumentStore` |
//! | [`catalog`] | Icon and label lookup per block type |
//! | [`picker`] | Insertion picker modes and offered block types |
//! | [`state`] | Expansion set, drag slot, rename slot |
//! | [`event`] | Gestures, tree events, and node context |
//! | [`engine`] | Root-owned `TreeEngine`: gesture → event → store command |
//! | [`render`] | Configurable row renderer |
//! | [`consts`] | Shared constants (indent sizes) |

pub mod block;
pub mod catalog;
pub mod consts;
pub mod engine;
pub mod event;
pub mod picker;
pub mod render;
pub mod state;
pub mod store;

pub use block::{Block, BlockId, BlockKind};
pub use engine::{Action, TreeEngine};
pub use event::{Gesture, NodeContext, SlotPosition, TreeEvent};
pub use render::{Indentation, RowItem, TreeConfig, render_tree};
pub use state::TreeState;
pub use store::{DocumentStore, EditorStore, Interaction, StoreCommand, TreeError};
