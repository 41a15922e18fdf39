//! Component tree store for the mini-program page builder.
//!
//! [`EditorStore`] owns the project being edited, the editor's
//! selection/hover pointers and the drag state. Hosting UIs call its
//! operations instead of touching the tree directly; at export time they
//! hand [`EditorStore::project`] to the code generator.
//!
//! # Example
//!
//! ```
//! use miniapp_core::{ComponentKind, ComponentTemplate, PageDraft};
//! use miniapp_store::EditorStore;
//!
//! let mut store = EditorStore::default();
//! store.add_page(PageDraft::default());
//! let id = store
//!     .add_component(ComponentTemplate::new(ComponentKind::Text), None)
//!     .map(|c| c.id.clone())
//!     .unwrap();
//! assert!(store.find_component(&id).is_some());
//! ```

pub mod config;
pub mod error;
mod index;
pub mod state;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use state::{DragKind, DragState, EditorState};
pub use store::{find_component, ComponentPatch, EditorStore};
