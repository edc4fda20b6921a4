//! The site model: the document, the header, the page content, and input
//! handling.

use chrono::{Datelike, Local};
use sitekit_core::dom::GlobalEvent;
use sitekit_core::{
    Cell, Document, Effect, ElementId, ElementSpec, Grid, Key, ModMask, Model, MouseAction, Msg,
    Point, Range, Role, cmd,
};
use sitekit_ui::{Navigator, Route};

use crate::colors::{self, CTA_BUTTON};
use crate::content::{Flow, FlowLink, MARGIN, highlight};
use crate::footer::footer;
use crate::header::Header;
use crate::home::{home, not_found};
use crate::router::{Page, Router};

/// Id of the main landmark, the target of the skip link.
pub const MAIN_DOM_ID: &str = "main-content";
pub const SKIP_LABEL: &str = "Skip to main content";

const WHEEL_STEP: i32 = 3;

/// The local calendar year, delivered by the startup command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CopyrightYear(pub i32);

#[derive(Debug)]
struct ContentLink {
    id: ElementId,
    link: FlowLink,
}

pub struct SiteModel {
    header: Header,
    doc: Document,
    skip_link: ElementId,
    main: ElementId,
    footer: ElementId,
    router: Router,
    breakpoint: i32,
    width: i32,
    height: i32,
    scroll: i32,
    year: Option<i32>,
    flow: Flow,
    footer_start: usize,
    links: Vec<ContentLink>,
    revision: u64,
}

impl SiteModel {
    pub fn new(breakpoint: i32, width: i32, height: i32) -> Self {
        let doc = Document::new();
        let skip_link = doc.create(
            doc.root(),
            ElementSpec::new(Role::Link)
                .label(SKIP_LABEL)
                .href(format!("#{MAIN_DOM_ID}"))
                .bounds(Range::new(MARGIN, 0, MARGIN + SKIP_LABEL.len() as i32 + 2, 1)),
        );
        let header = Header::mount(&doc, doc.root());
        let main = doc.create(
            doc.root(),
            ElementSpec::new(Role::Main)
                .dom_id(MAIN_DOM_ID)
                .label("Main content")
                .programmatic_focus(),
        );
        let footer = doc.create(doc.root(), ElementSpec::new(Role::ContentInfo));

        let mut model = Self {
            header,
            doc,
            skip_link,
            main,
            footer,
            router: Router::new(),
            breakpoint,
            width,
            height,
            scroll: 0,
            year: None,
            flow: Flow::new(width),
            footer_start: 0,
            links: Vec::new(),
            revision: 0,
        };
        model.resize(width, height);
        model
    }

    // -- Accessors --

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn scroll(&self) -> i32 {
        self.scroll
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn skip_link(&self) -> ElementId {
        self.skip_link
    }

    pub fn main(&self) -> ElementId {
        self.main
    }

    pub fn footer(&self) -> ElementId {
        self.footer
    }

    /// Elements of the links in the page content and the footer, in
    /// reading order.
    pub fn content_links(&self) -> Vec<ElementId> {
        self.links.iter().map(|l| l.id).collect()
    }

    /// First content link with the accessible name `label`.
    pub fn find_link(&self, label: &str) -> Option<ElementId> {
        self.links
            .iter()
            .find(|l| l.link.label == label)
            .map(|l| l.id)
    }

    /// The part of the screen below the header.
    pub fn viewport(&self) -> Range {
        Range::new(0, self.header.height(), self.width, self.height)
    }

    // -- Layout --

    fn resize(&mut self, width: i32, height: i32) {
        log::debug!("layout for {width}x{height}");
        self.width = width;
        self.height = height;
        self.header.layout(width, self.breakpoint);
        self.rebuild_content();
    }

    /// Recreate the flow and its link elements for the current page, width,
    /// and year. A focused content link keeps focus by position.
    fn rebuild_content(&mut self) {
        let focused = self
            .doc
            .focused()
            .and_then(|f| self.links.iter().position(|l| l.id == f));

        self.doc.clear_children(self.main);
        self.doc.clear_children(self.footer);

        let mut flow = match self.router.page() {
            Page::Home => home(self.width),
            Page::NotFound(path) => not_found(&path, self.width),
        };
        self.footer_start = flow.len();
        flow.append(footer(self.width, self.year));

        self.links = flow
            .links()
            .into_iter()
            .map(|link| {
                let parent = if link.line < self.footer_start {
                    self.main
                } else {
                    self.footer
                };
                let id = self.doc.create(
                    parent,
                    ElementSpec::new(Role::Link)
                        .label(link.label.clone())
                        .href(link.route.as_str()),
                );
                ContentLink { id, link }
            })
            .collect();
        self.flow = flow;

        if let Some(link) = focused.and_then(|i| self.links.get(i)) {
            self.doc.focus(link.id);
        }
        self.place_content();
    }

    fn max_scroll(&self) -> i32 {
        (self.flow.len() as i32 - self.viewport().height()).max(0)
    }

    /// Give the landmarks and links their on-screen bounds, clipped to the
    /// viewport so that scrolled-away content cannot be hit.
    fn place_content(&self) {
        let view = self.viewport();
        let top = view.min.y - self.scroll;
        let split = top + self.footer_start as i32;
        let end = top + self.flow.len() as i32;
        self.doc
            .set_bounds(self.main, Range::new(0, top, self.width, split).intersect(view));
        self.doc
            .set_bounds(self.footer, Range::new(0, split, self.width, end).intersect(view));
        for ContentLink { id, link } in &self.links {
            let y = top + link.line as i32;
            let bounds = Range::new(link.x, y, link.x + link.width, y + 1).intersect(view);
            self.doc.set_bounds(*id, bounds);
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        self.scroll = (self.scroll + delta).clamp(0, self.max_scroll());
    }

    /// Scroll so that the focused content link is on screen.
    fn reveal_focus(&mut self) {
        let Some(focused) = self.doc.focused() else {
            return;
        };
        let Some(line) = self
            .links
            .iter()
            .find(|l| l.id == focused)
            .map(|l| l.link.line as i32)
        else {
            return;
        };
        let rows = self.viewport().height();
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + rows {
            self.scroll = line - rows + 1;
        }
    }

    /// Bring the layout in line with the menu and router state after an
    /// update.
    fn settle(&mut self) {
        self.header.refresh();
        if self.router.revision() != self.revision {
            self.revision = self.router.revision();
            self.scroll = 0;
            self.doc.blur();
            self.rebuild_content();
        }
        self.scroll = self.scroll.clamp(0, self.max_scroll());
        self.place_content();
    }

    // -- Input --

    fn dispatch(&mut self, event: GlobalEvent) {
        for delivery in self.doc.dispatch(&event) {
            self.header.menu_mut().handle_global(&delivery);
        }
    }

    fn mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::WheelUp => self.scroll_by(-WHEEL_STEP),
            MouseAction::WheelDown => self.scroll_by(WHEEL_STEP),
            action if action.is_press() => {
                let target = self.doc.hit_test(pos);
                self.dispatch(GlobalEvent::PointerDown {
                    target,
                    pos,
                    action,
                });
                if action == MouseAction::Main {
                    self.activate(target);
                }
            }
            _ => {}
        }
    }

    fn key(&mut self, key: Key, modifiers: ModMask) -> Option<Effect> {
        if key == Key::Char('c') && modifiers.contains(ModMask::CTRL) {
            return Some(Effect::End);
        }
        self.dispatch(GlobalEvent::KeyDown {
            key: key.clone(),
            modifiers,
        });

        let page = (self.viewport().height() - 1).max(1);
        match key {
            Key::Tab => {
                self.doc.focus_next();
                self.reveal_focus();
            }
            Key::BackTab => {
                self.doc.focus_prev();
                self.reveal_focus();
            }
            Key::Enter => {
                if let Some(focused) = self.doc.focused() {
                    self.activate(focused);
                }
            }
            Key::Space => match self.doc.focused() {
                Some(focused) if self.doc.role(focused) == Some(Role::Button) => {
                    self.activate(focused)
                }
                _ => self.scroll_by(page),
            },
            Key::ArrowUp => self.scroll_by(-1),
            Key::ArrowDown => self.scroll_by(1),
            Key::PageUp => self.scroll_by(-page),
            Key::PageDown => self.scroll_by(page),
            Key::Home => self.scroll = 0,
            Key::End => self.scroll = self.max_scroll(),
            Key::Backspace => {
                self.router.back();
            }
            Key::Char('q') if !self.header.menu().is_open() => return Some(Effect::End),
            _ => {}
        }
        None
    }

    /// Activate `target` the way a click or Enter does.
    fn activate(&mut self, target: ElementId) {
        if self.header.menu().owns(target) {
            self.header.menu_mut().activate(target, &mut self.router);
            return;
        }
        let mut current = Some(target);
        while let Some(id) = current {
            if let Some(href) = self.doc.href(id) {
                self.follow(&Route::new(href));
                return;
            }
            current = self.doc.parent(id);
        }
    }

    fn follow(&mut self, route: &Route) {
        if !route.path().is_empty() {
            self.router.navigate(route);
            return;
        }
        let Some(fragment) = route.fragment() else {
            return;
        };
        match self.doc.find_by_dom_id(fragment) {
            Some(target) => {
                self.doc.focus(target);
            }
            None => log::debug!("no element with id {fragment:?}"),
        }
    }
}

impl Model for SiteModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        if let Some(&CopyrightYear(year)) = msg.downcast_ref::<CopyrightYear>() {
            self.year = Some(year);
            self.rebuild_content();
            return None;
        }

        let effect = match msg {
            Msg::Init => Some(cmd(|| Some(Msg::custom(CopyrightYear(Local::now().year()))))),
            Msg::Screen { width, height, .. } => {
                self.resize(width, height);
                None
            }
            Msg::Mouse { action, pos, .. } => {
                self.mouse(action, pos);
                None
            }
            Msg::KeyDown { key, modifiers, .. } => self.key(key, modifiers),
            Msg::Quit | Msg::Custom(_) => None,
        };
        self.settle();
        effect
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::new(' ', colors::PAGE));

        let view = self.viewport();
        for y in view.min.y..view.max.y {
            let line = (self.scroll + y - view.min.y) as usize;
            self.flow.draw_line(line, grid, y);
        }
        let focused_link = self
            .doc
            .focused()
            .and_then(|f| self.links.iter().find(|l| l.id == f));
        if let Some(link) = focused_link {
            highlight(grid, self.doc.bounds(link.id));
        }

        self.header.draw(grid);

        if self.doc.is_focused(self.skip_link) {
            grid.print(
                Point::new(MARGIN, 0),
                &format!(" {SKIP_LABEL} "),
                CTA_BUTTON.add_attrs(colors::FOCUS),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SiteModel {
        let mut m = SiteModel::new(100, 80, 24);
        m.update(Msg::custom(CopyrightYear(2030)));
        m
    }

    #[test]
    fn content_links_sit_inside_the_viewport() {
        let m = model();
        let view = m.viewport();
        assert_eq!(view, Range::new(0, 3, 80, 24));
        for id in m.content_links() {
            let bounds = m.document().bounds(id);
            assert!(bounds.is_empty() || view.intersect(bounds) == bounds);
        }
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut m = model();
        m.update(Msg::key(Key::ArrowUp));
        assert_eq!(m.scroll(), 0);
        m.update(Msg::key(Key::End));
        let bottom = m.scroll();
        assert!(bottom > 0);
        m.update(Msg::key(Key::PageDown));
        assert_eq!(m.scroll(), bottom);
        m.update(Msg::key(Key::Home));
        assert_eq!(m.scroll(), 0);
    }

    #[test]
    fn tab_scrolls_the_focused_link_into_view() {
        let mut m = model();
        let email = m.find_link("hello@deanwaringdev.com").unwrap();
        // Tab through everything up to the footer e-mail link.
        while !m.document().is_focused(email) {
            m.update(Msg::key(Key::Tab));
        }
        let bounds = m.document().bounds(email);
        assert!(!bounds.is_empty());
        assert!(m.viewport().intersect(bounds) == bounds);
    }

    #[test]
    fn resize_keeps_focus_on_the_same_link() {
        let mut m = model();
        let first = m.content_links()[0];
        assert!(m.document().focus(first));
        m.update(Msg::screen(90, 30));
        let first = m.content_links()[0];
        assert!(m.document().is_focused(first));
    }

    #[test]
    fn backspace_goes_back() {
        let mut m = model();
        let start = m.find_link("[ Start Your Project ]").unwrap();
        m.document().focus(start);
        m.update(Msg::key(Key::Enter));
        assert_eq!(m.router().page(), Page::NotFound("/contact".to_string()));
        m.update(Msg::key(Key::Backspace));
        assert_eq!(m.router().page(), Page::Home);
    }
}
