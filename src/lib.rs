//! Window-management policy engine for a Wayland compositor.
//!
//! This crate holds the policy half of window management: which views
//! exist, which one has focus, which workspace is current, and where a
//! newly mapped window should go. It deliberately knows nothing about
//! rendering, input hardware or the Wayland protocol; the compositor
//! plugs in through the [`ViewBackend`] and [`OutputBackend`] traits and
//! drives a [`PolicyEngine`] from its event loop.
//!
//! The engine is single threaded and synchronous. Every operation is
//! total: stale view handles and out-of-range workspace indices are
//! ignored rather than reported, so a confused caller cannot crash the
//! session.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use slatewm_policy::{PolicyEngine, Rect, ViewBackend};
//!
//! struct Window;
//!
//! impl ViewBackend for Window {
//!     fn frame_box(&self) -> Option<Rect> {
//!         Some(Rect::new(0, 0, 640, 480))
//!     }
//! }
//!
//! let mut engine = PolicyEngine::new();
//! let id = engine.register_view(Rc::new(Window));
//! engine.map_view(id);
//! engine.focus_view(id);
//! assert_eq!(engine.focused(), Some(id));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod placement;
pub mod types;
pub mod view;

mod registry;
mod workspaces;

pub use config::{PolicyConfig, MAX_WORKSPACES};
pub use engine::PolicyEngine;
pub use error::ConfigError;
pub use output::{placement_area, OutputBackend};
pub use placement::{ColDirection, PlacementStrategy, RowDirection, CASCADE_STEP};
pub use types::{Point, Rect, Size};
pub use view::{ViewBackend, ViewId};
