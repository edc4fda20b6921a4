//! Widgets for the terminal site renderer: styled text, navigation items,
//! and the disclosure menu.

mod disclosure;
mod nav;
mod styled_text;

pub use disclosure::{
    Cause, DisclosureConfig, DisclosureMenu, DisclosureStyle, MenuAction, MenuEffect, PANEL_DOM_ID,
    PANEL_LABEL, Phase, Transition, TriggerView, trigger_view,
};
pub use nav::{NavItem, Navigator, Route, primary_nav};
pub use styled_text::StyledText;
