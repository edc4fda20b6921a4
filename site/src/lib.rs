//! The DeanWaringDev marketing site, rendered in the terminal.
//!
//! [`SiteModel`] owns the document, the sticky header with its disclosure
//! menu, the page content, and the footer. `main.rs` wires it to the
//! crossterm driver.

pub mod colors;
pub mod config;
pub mod content;
pub mod footer;
pub mod header;
pub mod home;
pub mod logging;
pub mod model;
pub mod router;

pub use config::{Cli, ConfigError, SiteConfig};
pub use model::{CopyrightYear, MAIN_DOM_ID, SiteModel};
pub use router::{Page, Router};
