//! The sticky site header: logo, desktop navigation, and the disclosure
//! menu used on narrow screens.

use sitekit_core::{
    AttrMask, Cell, Document, ElementId, ElementSpec, Grid, Mounted, Point, Range, Role,
};
use sitekit_ui::{
    DisclosureConfig, DisclosureMenu, DisclosureStyle, NavItem, StyledText, primary_nav,
};

use crate::colors::{self, CTA_BUTTON, HEADER, HEADER_ACCENT};
use crate::content::{MARGIN, highlight};

/// Rows of the header bar itself, without the open menu panel.
pub const HEADER_ROWS: i32 = 3;

const LOGO: &str = "DeanWaring@Dev";
/// Gap between desktop links.
const LINK_GAP: i32 = 3;

#[derive(Debug)]
pub struct Header {
    menu: DisclosureMenu,
    banner: Mounted,
    doc: Document,
    logo: ElementId,
    desktop_nav: ElementId,
    desktop_links: Vec<(ElementId, NavItem)>,
    width: i32,
    compact: bool,
}

impl Header {
    pub fn mount(doc: &Document, parent: ElementId) -> Self {
        let banner = doc.mount(parent, ElementSpec::new(Role::Banner));
        let logo = doc.create(
            banner.id(),
            ElementSpec::new(Role::Link)
                .label("DeanWaringDev home")
                .href("/"),
        );
        let desktop_nav = doc.create(
            banner.id(),
            ElementSpec::new(Role::Navigation).label("Main navigation"),
        );
        let desktop_links = primary_nav()
            .into_iter()
            .map(|item| {
                let id = doc.create(
                    desktop_nav,
                    ElementSpec::new(Role::Link)
                        .label(item.label.clone())
                        .href(item.route.as_str()),
                );
                (id, item)
            })
            .collect();
        let menu = DisclosureMenu::mount(
            doc,
            banner.id(),
            DisclosureConfig {
                items: primary_nav(),
                style: DisclosureStyle {
                    trigger: HEADER,
                    panel: HEADER,
                    item: HEADER,
                    call_to_action: CTA_BUTTON,
                    focus: colors::FOCUS,
                },
            },
        );
        Self {
            menu,
            banner,
            doc: doc.clone(),
            logo,
            desktop_nav,
            desktop_links,
            width: 0,
            compact: true,
        }
    }

    pub fn banner(&self) -> ElementId {
        self.banner.id()
    }

    pub fn logo(&self) -> ElementId {
        self.logo
    }

    pub fn desktop_links(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.desktop_links.iter().map(|(id, _)| *id)
    }

    pub fn menu(&self) -> &DisclosureMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut DisclosureMenu {
        &mut self.menu
    }

    /// Narrow layout: menu button instead of the link row.
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Rows taken from the top of the screen, the open panel included.
    pub fn height(&self) -> i32 {
        if self.menu.is_open() && !self.menu.is_hidden() {
            HEADER_ROWS + self.menu.panel_height()
        } else {
            HEADER_ROWS
        }
    }

    /// Lay the header out for a screen `width` columns wide. The menu keeps
    /// its state across layout switches; it is only hidden.
    pub fn layout(&mut self, width: i32, breakpoint: i32) {
        self.width = width;
        self.compact = width < breakpoint;
        self.doc.set_hidden(self.desktop_nav, self.compact);
        self.menu.set_hidden(!self.compact);

        let logo_width = StyledText::text(LOGO).with_markup('@', HEADER).size().x;
        self.doc.set_bounds(
            self.logo,
            Range::new(MARGIN, 1, MARGIN + logo_width, 2),
        );

        // Desktop links are right-aligned on the middle row.
        let mut right = width - MARGIN;
        for (id, item) in self.desktop_links.iter().rev() {
            let w = desktop_text(item).chars().count() as i32;
            self.doc.set_bounds(*id, Range::new(right - w, 1, right, 2));
            right -= w + LINK_GAP;
        }
        self.doc.set_bounds(
            self.desktop_nav,
            Range::new(right + LINK_GAP, 1, width - MARGIN, 2),
        );

        self.menu.set_layout(
            Range::new(width - MARGIN - 4, 0, width - MARGIN, HEADER_ROWS),
            Point::new(0, HEADER_ROWS),
            width,
        );
        self.refresh();
    }

    /// Resize the banner to the current height. Call after the menu opened
    /// or closed.
    pub fn refresh(&self) {
        self.doc
            .set_bounds(self.banner.id(), Range::new(0, 0, self.width, self.height()));
    }

    pub fn draw(&self, grid: &Grid) {
        grid.slice(Range::new(0, 0, self.width, HEADER_ROWS))
            .fill(Cell::new(' ', HEADER));

        let logo_area = self.doc.bounds(self.logo);
        StyledText::new(LOGO, HEADER.add_attrs(AttrMask::BOLD))
            .with_markup('@', HEADER_ACCENT.add_attrs(AttrMask::BOLD))
            .draw(&grid.slice(logo_area));
        if self.doc.is_focused(self.logo) {
            highlight(grid, logo_area);
        }

        if !self.compact {
            for (id, item) in &self.desktop_links {
                let area = self.doc.bounds(*id);
                let style = if item.call_to_action { CTA_BUTTON } else { HEADER };
                grid.print(area.min, &desktop_text(item), style);
                if self.doc.is_focused(*id) {
                    highlight(grid, area);
                }
            }
        }

        self.menu.draw(grid);
    }
}

fn desktop_text(item: &NavItem) -> String {
    if item.call_to_action {
        format!("[ {} ]", item.label)
    } else {
        item.label.clone()
    }
}
