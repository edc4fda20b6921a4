//! End-to-end behaviour of the site model, driven through messages.

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use chrono::{Datelike, Local};
use pretty_assertions::assert_eq;

use deanwaringdev_lib::footer::copyright;
use deanwaringdev_lib::{CopyrightYear, MAIN_DOM_ID, Page, SiteModel};
use sitekit_core::dom::ListenerKind;
use sitekit_core::{
    App, AppConfig, Context, Driver, Effect, Error, Frame, Grid, Key, ModMask, Model, MouseAction,
    Msg, Point, Range,
};
use sitekit_ui::PANEL_DOM_ID;

/// A model that went through startup, the year command included.
fn site(width: i32, height: i32) -> SiteModel {
    let mut model = SiteModel::new(100, width, height);
    if let Some(Effect::Cmd(f)) = model.update(Msg::Init) {
        if let Some(msg) = f() {
            model.update(msg);
        }
    }
    model
}

fn center(r: Range) -> Point {
    Point::new(r.min.x + r.width() / 2, r.min.y + r.height() / 2)
}

fn click(model: &mut SiteModel, p: Point) {
    model.update(Msg::mouse(MouseAction::Main, p));
}

fn click_trigger(model: &mut SiteModel) {
    let trigger = model.header().menu().trigger();
    let p = center(model.document().bounds(trigger));
    click(model, p);
}

fn listener_count(model: &SiteModel) -> usize {
    let doc = model.document();
    doc.listener_count(ListenerKind::PointerDown) + doc.listener_count(ListenerKind::KeyDown)
}

fn render(model: &SiteModel, width: i32, height: i32) -> Grid {
    let mut grid = Grid::new(width, height);
    model.draw(&mut grid);
    grid
}

#[test]
fn open_then_escape_returns_focus_to_the_trigger() {
    let mut site = site(80, 24);
    let trigger = site.header().menu().trigger();
    assert!(!site.header().menu().is_open());
    assert_eq!(site.document().find_by_dom_id(PANEL_DOM_ID), None);

    click_trigger(&mut site);
    let doc = site.document();
    assert!(site.header().menu().is_open());
    assert_eq!(doc.attr(trigger, "aria-expanded").as_deref(), Some("true"));
    let panel = doc.find_by_dom_id(PANEL_DOM_ID).unwrap();
    let labels: Vec<String> = doc
        .children(panel)
        .into_iter()
        .filter_map(|id| doc.label(id))
        .collect();
    assert_eq!(labels, ["Home", "Services", "Portfolio", "About", "Get Started"]);
    assert_eq!(listener_count(&site), 2);

    site.update(Msg::key(Key::Escape));
    let doc = site.document();
    assert!(!site.header().menu().is_open());
    assert!(doc.is_focused(trigger));
    assert_eq!(doc.find_by_dom_id(PANEL_DOM_ID), None);
    assert_eq!(doc.attr(trigger, "aria-expanded").as_deref(), Some("false"));
    assert_eq!(listener_count(&site), 0);
}

#[test]
fn open_menu_pushes_the_page_down() {
    let mut site = site(80, 24);
    assert_eq!(site.viewport(), Range::new(0, 3, 80, 24));
    click_trigger(&mut site);
    assert_eq!(site.viewport(), Range::new(0, 10, 80, 24));

    let grid = render(&site, 80, 24);
    assert_eq!(grid.at(Point::new(76, 1)).ch, '✕');
    assert!(grid.row_text(3).starts_with("  Home"));
    assert!(grid.row_text(6).starts_with("  About"));
    assert!(grid.row_text(8).contains("Get Started"));
}

#[test]
fn click_outside_closes_without_focus_change() {
    let mut site = site(80, 24);
    click_trigger(&mut site);
    click(&mut site, Point::new(0, 20));
    assert!(!site.header().menu().is_open());
    assert_eq!(site.document().focused(), None);
    assert_eq!(site.router().page(), Page::Home);
    assert_eq!(listener_count(&site), 0);
}

#[test]
fn click_inside_the_panel_keeps_it_open() {
    let mut site = site(80, 24);
    click_trigger(&mut site);
    // Spacer row between the links and the call to action.
    click(&mut site, Point::new(40, 7));
    assert!(site.header().menu().is_open());
}

#[test]
fn trigger_click_while_open_closes_once() {
    let mut site = site(80, 24);
    click_trigger(&mut site);
    click_trigger(&mut site);
    assert!(!site.header().menu().is_open());
    assert_eq!(listener_count(&site), 0);
    click_trigger(&mut site);
    assert!(site.header().menu().is_open());
}

#[test]
fn menu_item_navigates_once_and_closes() {
    let mut site = site(80, 24);
    click_trigger(&mut site);
    let about = site.header().menu().item_elements()[3];
    let p = center(site.document().bounds(about));
    click(&mut site, p);

    assert!(!site.header().menu().is_open());
    assert_eq!(site.router().current().as_str(), "/about");
    assert_eq!(site.router().history().len(), 1);
    assert_eq!(site.router().page(), Page::NotFound("/about".to_string()));
    assert_eq!(listener_count(&site), 0);
    assert_eq!(site.scroll(), 0);
}

#[test]
fn keyboard_only_round_trip() {
    let mut site = site(80, 24);
    let trigger = site.header().menu().trigger();
    // Skip link, logo, then the menu button.
    for _ in 0..3 {
        site.update(Msg::key(Key::Tab));
    }
    assert!(site.document().is_focused(trigger));

    site.update(Msg::key(Key::Enter));
    assert!(site.header().menu().is_open());
    site.update(Msg::key(Key::Tab));
    let home = site.header().menu().item_elements()[0];
    assert!(site.document().is_focused(home));

    site.update(Msg::key(Key::Space));
    assert!(site.header().menu().is_open(), "Space does not follow links");

    site.update(Msg::key(Key::Escape));
    assert!(site.document().is_focused(trigger));
    site.update(Msg::key(Key::Space));
    assert!(site.header().menu().is_open());
}

#[test]
fn wide_screens_use_the_link_row() {
    let mut site = site(120, 30);
    assert!(!site.header().is_compact());
    let trigger = site.header().menu().trigger();
    assert!(!site.document().is_rendered(trigger));

    // Where the menu button would be, the call to action sits instead.
    click(&mut site, Point::new(116, 1));
    assert_eq!(site.router().current().as_str(), "/contact");
    assert!(!site.header().menu().is_open());
}

#[test]
fn layout_switch_keeps_the_menu_state() {
    let mut site = site(80, 24);
    click_trigger(&mut site);
    site.update(Msg::screen(120, 24));
    assert!(site.header().menu().is_open());
    assert_eq!(site.viewport(), Range::new(0, 3, 120, 24));

    site.update(Msg::screen(80, 24));
    assert!(site.header().menu().is_open());
    assert_eq!(site.viewport(), Range::new(0, 10, 80, 24));

    site.update(Msg::key(Key::Escape));
    assert!(!site.header().menu().is_open());
}

#[test]
fn skip_link_focuses_main() {
    let mut site = site(80, 24);
    site.update(Msg::key(Key::Tab));
    assert!(site.document().is_focused(site.skip_link()));
    let grid = render(&site, 80, 24);
    assert!(grid.row_text(0).contains("Skip to main content"));

    site.update(Msg::key(Key::Enter));
    let main = site.document().find_by_dom_id(MAIN_DOM_ID).unwrap();
    assert_eq!(main, site.main());
    assert!(site.document().is_focused(main));
    assert_eq!(site.router().page(), Page::Home);
}

#[test]
fn footer_shows_the_current_year() {
    let mut site = site(80, 24);
    let year = Local::now().year();
    assert_eq!(site.year(), Some(year));

    site.update(Msg::key(Key::End));
    let grid = render(&site, 80, 24);
    let notice = copyright(Some(year));
    assert!((0..24).any(|y| grid.row_text(y).contains(&notice)));
}

#[test]
fn external_links_are_recorded_only() {
    let mut site = site(80, 24);
    site.update(Msg::custom(CopyrightYear(2030)));
    let github = site
        .find_link("Visit DeanWaringDev on GitHub (opens in new tab)")
        .unwrap();
    assert!(site.document().contains(site.footer(), github));
    site.document().focus(github);
    site.update(Msg::key(Key::Enter));
    assert_eq!(site.router().page(), Page::Home);
    assert_eq!(
        site.router().external()[0].as_str(),
        "https://github.com/DeanWaringDev"
    );
}

#[test]
fn scrolled_away_links_cannot_be_clicked() {
    let mut site = site(80, 24);
    let start = site.find_link("[ Start Your Project ]").unwrap();
    let p = center(site.document().bounds(start));
    site.update(Msg::key(Key::PageDown));
    assert!(site.scroll() > 0);
    assert!(site.document().bounds(start).is_empty());
    assert_ne!(site.document().hit_test(p), start);
}

#[test]
fn q_quits_only_while_closed_and_ctrl_c_always() {
    let mut site = site(80, 24);
    click_trigger(&mut site);
    assert!(site.update(Msg::key(Key::Char('q'))).is_none());
    assert!(site.header().menu().is_open());
    assert!(matches!(
        site.update(Msg::key_mod(Key::Char('c'), ModMask::CTRL)),
        Some(Effect::End)
    ));

    site.update(Msg::key(Key::Escape));
    assert!(matches!(site.update(Msg::key(Key::Char('q'))), Some(Effect::End)));
    assert!(site.update(Msg::key(Key::Escape)).is_none());
}

/// Feeds a fixed script, then quits.
struct Script {
    msgs: VecDeque<Msg>,
    frames: usize,
}

impl Driver for &mut Script {
    fn init(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn poll_msgs(&mut self, _ctx: &Context, tx: &Sender<Msg>) -> Result<(), Error> {
        let msg = self.msgs.pop_front().unwrap_or(Msg::Quit);
        tx.send(msg).map_err(|_| Error::Disconnected)
    }

    fn flush(&mut self, _frame: Frame) -> Result<(), Error> {
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) {}
}

#[test]
fn runs_under_the_application_loop() {
    let mut script = Script {
        msgs: VecDeque::from([
            Msg::screen(80, 24),
            Msg::mouse(MouseAction::Main, Point::new(76, 1)),
            Msg::key(Key::Escape),
        ]),
        frames: 0,
    };
    let mut app = App::new(AppConfig {
        model: SiteModel::new(100, 80, 24),
        driver: &mut script,
        width: 80,
        height: 24,
    });
    app.run().unwrap();

    let site = app.model();
    assert_eq!(site.year(), Some(Local::now().year()));
    assert!(!site.header().menu().is_open());
    assert!(site.document().is_focused(site.header().menu().trigger()));
    drop(app);
    assert!(script.frames >= 3);
}
