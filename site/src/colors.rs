//! Brand palette.

use sitekit_core::{AttrMask, Color, Style};

/// Header, footer, and hero background.
pub const NAVY: Color = Color::from_hex(0x0B1D39);
pub const NAVY_LIGHT: Color = Color::from_hex(0x1A3354);
pub const ACCENT: Color = Color::from_hex(0xF97A20);
pub const CREAM: Color = Color::from_hex(0xEFE9E1);
pub const SLATE: Color = Color::from_hex(0x5A6872);
pub const WHITE: Color = Color::from_hex(0xFFFFFF);

// -- Composite styles --

pub const HEADER: Style = Style {
    fg: WHITE,
    bg: NAVY,
    attrs: AttrMask::NONE,
};
pub const HEADER_ACCENT: Style = HEADER.with_fg(ACCENT);
pub const CTA_BUTTON: Style = Style {
    fg: WHITE,
    bg: ACCENT,
    attrs: AttrMask::BOLD,
};
pub const PAGE: Style = Style {
    fg: NAVY,
    bg: WHITE,
    attrs: AttrMask::NONE,
};
pub const PAGE_TEXT: Style = PAGE.with_fg(SLATE);
pub const PAGE_HEADING: Style = PAGE.with_attrs(AttrMask::BOLD);
pub const PAGE_LINK: Style = Style {
    fg: ACCENT,
    bg: WHITE,
    attrs: AttrMask::BOLD,
};
pub const CARD: Style = Style {
    fg: NAVY,
    bg: CREAM,
    attrs: AttrMask::NONE,
};
pub const HERO: Style = HEADER.with_bg(NAVY_LIGHT);
pub const FOOTER: Style = HEADER.with_fg(CREAM);

/// Added to whichever element has keyboard focus.
pub const FOCUS: AttrMask = AttrMask::REVERSE;
