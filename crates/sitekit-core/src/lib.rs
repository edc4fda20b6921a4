//! **sitekit-core**: the foundation of the terminal site renderer.
//!
//! Geometry, styled cells, a shared-buffer grid, input messages, the
//! Elm-architecture application loop, and the retained [`Document`] that
//! gives interactive elements stable identities, focus, and document-level
//! listeners.

pub mod app;
pub mod dom;
pub mod error;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, cmd};
pub use dom::{Document, ElementId, ElementSpec, Mounted, Role};
pub use error::{Error, Result};
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid};
pub use messages::{Key, ModMask, MouseAction, Msg};
pub use style::{AttrMask, Cell, Color, Style};
