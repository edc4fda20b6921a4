//! The disclosure menu: a trigger button that shows and hides a panel of
//! navigation links.
//!
//! The menu is either [`Phase::Closed`] or [`Phase::Open`]. Everything that
//! only exists while open (the panel subtree in the document and the two
//! document-level listeners for pointer presses and key presses) is owned
//! by the `Open` state itself, so leaving that state by any path, or
//! dropping the menu, releases all of it.
//!
//! Transitions are computed by the pure [`Phase::step`]; side effects hang
//! off the resulting [`Transition`] via [`Transition::effect`] and are run
//! afterwards:
//!
//! | from   | cause             | to     | effect               |
//! |--------|-------------------|--------|----------------------|
//! | Closed | trigger           | Open   |                      |
//! | Open   | trigger           | Closed |                      |
//! | Open   | outside press     | Closed |                      |
//! | Open   | Escape            | Closed | focus the trigger    |
//! | Open   | item activated    | Closed | navigate to the item |

use sitekit_core::dom::{Delivery, GlobalEvent, ListenerKind, ListenerOwner, Subscription};
use sitekit_core::{
    AttrMask, Cell, Document, ElementId, ElementSpec, Grid, Key, Mounted, Point, Range, Role,
    Style,
};

use crate::nav::{NavItem, Navigator};

/// Id attribute of the panel, referenced by the trigger's `aria-controls`.
pub const PANEL_DOM_ID: &str = "mobile-menu";
/// Accessible name of the panel.
pub const PANEL_LABEL: &str = "Mobile navigation";

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Closed,
    Open,
}

/// What asked for a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cause {
    /// The trigger button was activated.
    Trigger,
    /// A pointer went down outside both the trigger and the panel.
    OutsidePointer,
    /// Escape was pressed, wherever the focus was.
    Escape,
    /// The panel item with this index was activated.
    Item(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub cause: Cause,
}

/// Side effects attached to transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuEffect {
    /// Move keyboard focus back to the trigger.
    FocusTrigger,
    /// Request navigation to the item with this index.
    Navigate(usize),
}

impl Phase {
    /// The transition `cause` produces from this phase; `None` when the
    /// cause does not apply (only the trigger can open the menu).
    pub fn step(self, cause: Cause) -> Option<Transition> {
        let to = match (self, cause) {
            (Phase::Closed, Cause::Trigger) => Phase::Open,
            (Phase::Closed, _) => return None,
            (Phase::Open, _) => Phase::Closed,
        };
        Some(Transition {
            from: self,
            to,
            cause,
        })
    }
}

impl Transition {
    pub fn effect(&self) -> Option<MenuEffect> {
        match (self.from, self.to, self.cause) {
            (Phase::Open, Phase::Closed, Cause::Escape) => Some(MenuEffect::FocusTrigger),
            (Phase::Open, Phase::Closed, Cause::Item(index)) => Some(MenuEffect::Navigate(index)),
            _ => None,
        }
    }
}

/// How the trigger presents itself in a given phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TriggerView {
    /// Value of `aria-expanded`.
    pub expanded: &'static str,
    pub label: &'static str,
    pub icon: char,
}

pub fn trigger_view(phase: Phase) -> TriggerView {
    match phase {
        Phase::Closed => TriggerView {
            expanded: "false",
            label: "Open navigation menu",
            icon: '☰',
        },
        Phase::Open => TriggerView {
            expanded: "true",
            label: "Close navigation menu",
            icon: '✕',
        },
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Visual style of the menu.
#[derive(Debug, Clone)]
pub struct DisclosureStyle {
    pub trigger: Style,
    pub panel: Style,
    pub item: Style,
    pub call_to_action: Style,
    /// Added to the style of whichever part has keyboard focus.
    pub focus: AttrMask,
}

impl Default for DisclosureStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default(),
            panel: Style::default(),
            item: Style::default(),
            call_to_action: Style::default().with_attrs(AttrMask::BOLD),
            focus: AttrMask::REVERSE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisclosureConfig {
    pub items: Vec<NavItem>,
    pub style: DisclosureStyle,
}

/// Outcome of feeding an interaction to the menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Nothing changed.
    Pass,
    Opened,
    Closed(Cause),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Resources held only while the menu is open.
#[derive(Debug)]
struct OpenScope {
    panel: Mounted,
    items: Vec<ElementId>,
    _pointer_down: Subscription,
    _key_down: Subscription,
}

#[derive(Debug)]
enum MenuState {
    Closed,
    Open(OpenScope),
}

/// The disclosure menu controller.
#[derive(Debug)]
pub struct DisclosureMenu {
    state: MenuState,
    trigger: Mounted,
    doc: Document,
    parent: ElementId,
    owner: ListenerOwner,
    items: Vec<NavItem>,
    style: DisclosureStyle,
    panel_origin: Point,
    panel_width: i32,
    hidden: bool,
}

impl DisclosureMenu {
    /// Create the trigger under `parent`. The menu starts closed; the panel
    /// will be created under the same parent, after the trigger.
    pub fn mount(doc: &Document, parent: ElementId, config: DisclosureConfig) -> Self {
        let trigger = doc.mount(parent, ElementSpec::new(Role::Button));
        let menu = Self {
            state: MenuState::Closed,
            trigger,
            doc: doc.clone(),
            parent,
            owner: doc.listeners().allocate_owner(),
            items: config.items,
            style: config.style,
            panel_origin: Point::ZERO,
            panel_width: 0,
            hidden: false,
        };
        menu.sync_trigger();
        menu
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            MenuState::Closed => Phase::Closed,
            MenuState::Open(_) => Phase::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase() == Phase::Open
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger.id()
    }

    /// The panel element, present only while open.
    pub fn panel(&self) -> Option<ElementId> {
        match &self.state {
            MenuState::Open(scope) => Some(scope.panel.id()),
            MenuState::Closed => None,
        }
    }

    /// Elements of the panel items, empty while closed.
    pub fn item_elements(&self) -> &[ElementId] {
        match &self.state {
            MenuState::Open(scope) => &scope.items,
            MenuState::Closed => &[],
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn owner(&self) -> ListenerOwner {
        self.owner
    }

    /// Rows the panel occupies: one per link, a spacer plus a row for the
    /// call to action, and a bottom padding row.
    pub fn panel_height(&self) -> i32 {
        let links = self.items.iter().filter(|i| !i.call_to_action).count();
        let ctas = self.items.len() - links;
        (links + 2 * ctas + 1) as i32
    }

    // -- Interaction --

    /// The trigger was activated (click, Enter, or Space).
    pub fn activate_trigger(&mut self) -> MenuAction {
        self.run(Cause::Trigger, None)
    }

    /// Panel item `index` was activated. Closes the menu and sends exactly
    /// one navigation request to `navigator`.
    pub fn activate_item(&mut self, index: usize, navigator: &mut dyn Navigator) -> MenuAction {
        if index >= self.items.len() {
            return MenuAction::Pass;
        }
        self.run(Cause::Item(index), Some(navigator))
    }

    /// Route an activation of `target` (an element inside the trigger or
    /// a panel item) to the matching handler.
    pub fn activate(&mut self, target: ElementId, navigator: &mut dyn Navigator) -> MenuAction {
        if self.doc.contains(self.trigger.id(), target) {
            self.activate_trigger()
        } else if let Some(index) = self.item_index(target) {
            self.activate_item(index, navigator)
        } else {
            MenuAction::Pass
        }
    }

    /// Handle a document-level event delivered to this menu.
    pub fn handle_global(&mut self, delivery: &Delivery) -> MenuAction {
        if delivery.owner != self.owner {
            return MenuAction::Pass;
        }
        let cause = match &delivery.event {
            GlobalEvent::PointerDown { target, .. } if self.is_outside(*target) => Cause::OutsidePointer,
            GlobalEvent::KeyDown {
                key: Key::Escape, ..
            } => Cause::Escape,
            _ => return MenuAction::Pass,
        };
        self.run(cause, None)
    }

    /// Whether `target` belongs to the trigger or the panel.
    pub fn owns(&self, target: ElementId) -> bool {
        !self.is_outside(target)
    }

    /// Index of the panel item containing `target`.
    pub fn item_index(&self, target: ElementId) -> Option<usize> {
        self.item_elements()
            .iter()
            .position(|&item| self.doc.contains(item, target))
    }

    // -- Layout --

    /// Place the trigger and the panel (used now if open, otherwise the next
    /// time the menu opens).
    pub fn set_layout(&mut self, trigger: Range, panel_origin: Point, panel_width: i32) {
        self.doc.set_bounds(self.trigger.id(), trigger);
        self.panel_origin = panel_origin;
        self.panel_width = panel_width;
        if let MenuState::Open(scope) = &self.state {
            self.place_panel(scope.panel.id(), &scope.items);
        }
    }

    /// Hide or show the trigger and the panel without touching the phase.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.doc.set_hidden(self.trigger.id(), hidden);
        if let Some(panel) = self.panel() {
            self.doc.set_hidden(panel, hidden);
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    // -- Drawing --

    pub fn draw(&self, grid: &Grid) {
        if self.hidden {
            return;
        }
        let view = trigger_view(self.phase());
        let bounds = self.doc.bounds(self.trigger.id());
        let style = self.focus_style(self.trigger.id(), self.style.trigger);
        grid.slice(bounds).fill(Cell::new(' ', style));
        let center = Point::new(
            bounds.min.x + bounds.width() / 2,
            bounds.min.y + bounds.height() / 2,
        );
        grid.set(center, Cell::new(view.icon, style));

        let MenuState::Open(scope) = &self.state else {
            return;
        };
        grid.slice(self.doc.bounds(scope.panel.id()))
            .fill(Cell::new(' ', self.style.panel));
        for (item, &id) in self.items.iter().zip(&scope.items) {
            let row = self.doc.bounds(id);
            if item.call_to_action {
                let style = self.focus_style(id, self.style.call_to_action);
                grid.slice(row).fill(Cell::new(' ', style));
                let width = item.label.chars().count() as i32;
                let x = row.min.x + (row.width() - width).max(0) / 2;
                grid.print(Point::new(x, row.min.y), &item.label, style);
            } else {
                let style = self.focus_style(id, self.style.item);
                grid.print(row.min.shift(2, 0), &item.label, style);
            }
        }
    }

    // -- Internals --

    fn run(&mut self, cause: Cause, navigator: Option<&mut dyn Navigator>) -> MenuAction {
        let Some(transition) = self.phase().step(cause) else {
            return MenuAction::Pass;
        };
        // Replacing the state drops the previous scope, releasing the panel
        // and both listeners when leaving `Open`.
        self.state = match transition.to {
            Phase::Open => MenuState::Open(self.open_scope()),
            Phase::Closed => MenuState::Closed,
        };
        self.sync_trigger();
        log::debug!(
            "disclosure menu {:?} -> {:?} ({:?})",
            transition.from,
            transition.to,
            transition.cause
        );

        if let Some(effect) = transition.effect() {
            self.perform(effect, navigator);
        }
        match transition.to {
            Phase::Open => MenuAction::Opened,
            Phase::Closed => MenuAction::Closed(cause),
        }
    }

    fn perform(&self, effect: MenuEffect, navigator: Option<&mut dyn Navigator>) {
        match effect {
            MenuEffect::FocusTrigger => {
                if !self.doc.focus(self.trigger.id()) {
                    log::warn!("menu trigger is not focusable any more, focus left unchanged");
                }
            }
            MenuEffect::Navigate(index) => match (self.items.get(index), navigator) {
                (Some(item), Some(navigator)) => {
                    log::debug!("menu item {:?} -> {}", item.label, item.route);
                    navigator.navigate(&item.route);
                }
                _ => log::warn!("menu item {index} activated without a navigator"),
            },
        }
    }

    fn open_scope(&self) -> OpenScope {
        let panel = self.doc.mount(
            self.parent,
            ElementSpec::new(Role::Navigation)
                .dom_id(PANEL_DOM_ID)
                .label(PANEL_LABEL)
                .hidden(self.hidden),
        );
        let items: Vec<ElementId> = self
            .items
            .iter()
            .map(|item| {
                self.doc.create(
                    panel.id(),
                    ElementSpec::new(Role::Link)
                        .label(item.label.clone())
                        .href(item.route.as_str()),
                )
            })
            .collect();
        self.place_panel(panel.id(), &items);

        let listeners = self.doc.listeners();
        OpenScope {
            _pointer_down: listeners.subscribe(ListenerKind::PointerDown, self.owner),
            _key_down: listeners.subscribe(ListenerKind::KeyDown, self.owner),
            panel,
            items,
        }
    }

    fn place_panel(&self, panel: ElementId, items: &[ElementId]) {
        let origin = self.panel_origin;
        let width = self.panel_width;
        self.doc
            .set_bounds(panel, Range::sized(origin, width, self.panel_height()));
        let mut y = origin.y;
        for (item, &id) in self.items.iter().zip(items) {
            if item.call_to_action {
                y += 1;
            }
            self.doc.set_bounds(id, Range::sized(Point::new(origin.x, y), width, 1));
            y += 1;
        }
    }

    fn sync_trigger(&self) {
        let view = trigger_view(self.phase());
        let trigger = self.trigger.id();
        self.doc.set_attr(trigger, "aria-expanded", view.expanded);
        self.doc.set_attr(trigger, "aria-controls", PANEL_DOM_ID);
        self.doc.set_label(trigger, view.label);
    }

    fn is_outside(&self, target: ElementId) -> bool {
        !self.doc.contains(self.trigger.id(), target)
            && self
                .panel()
                .is_none_or(|panel| !self.doc.contains(panel, target))
    }

    fn focus_style(&self, id: ElementId, style: Style) -> Style {
        if self.doc.is_focused(id) {
            style.add_attrs(self.style.focus)
        } else {
            style
        }
    }
}

#[cfg(test)]
mod tests {
    use sitekit_core::{ModMask, MouseAction};

    use super::*;
    use crate::nav::{Route, primary_nav};

    #[derive(Default)]
    struct Recorder(Vec<Route>);

    impl Navigator for Recorder {
        fn navigate(&mut self, route: &Route) {
            self.0.push(route.clone());
        }
    }

    struct Fixture {
        doc: Document,
        menu: DisclosureMenu,
        elsewhere: ElementId,
        nav: Recorder,
    }

    fn fixture() -> Fixture {
        let doc = Document::new();
        let header = doc.create(doc.root(), ElementSpec::new(Role::Banner));
        let elsewhere = doc.create(doc.root(), ElementSpec::new(Role::Main));
        let mut menu = DisclosureMenu::mount(
            &doc,
            header,
            DisclosureConfig {
                items: primary_nav(),
                style: DisclosureStyle::default(),
            },
        );
        menu.set_layout(Range::new(36, 0, 40, 3), Point::new(0, 3), 40);
        Fixture {
            doc,
            menu,
            elsewhere,
            nav: Recorder::default(),
        }
    }

    impl Fixture {
        /// A pointer press the way the host delivers it: document listeners
        /// first, then activation of the pressed element.
        fn press(&mut self, target: ElementId) -> Vec<MenuAction> {
            let event = GlobalEvent::PointerDown {
                target,
                pos: Point::ZERO,
                action: MouseAction::Main,
            };
            let mut actions: Vec<_> = self
                .doc
                .dispatch(&event)
                .iter()
                .map(|d| self.menu.handle_global(d))
                .collect();
            actions.push(self.menu.activate(target, &mut self.nav));
            actions
        }

        fn key(&mut self, key: Key) -> Vec<MenuAction> {
            let event = GlobalEvent::KeyDown {
                key,
                modifiers: ModMask::NONE,
            };
            self.doc
                .dispatch(&event)
                .iter()
                .map(|d| self.menu.handle_global(d))
                .collect()
        }

        fn listener_count(&self) -> usize {
            let l = self.doc.listeners();
            l.count(ListenerKind::PointerDown) + l.count(ListenerKind::KeyDown)
        }
    }

    #[test]
    fn transition_table() {
        use Cause::*;
        assert_eq!(Phase::Closed.step(Trigger).map(|t| t.to), Some(Phase::Open));
        for cause in [OutsidePointer, Escape, Item(0)] {
            assert_eq!(Phase::Closed.step(cause), None);
        }
        for cause in [Trigger, OutsidePointer, Escape, Item(3)] {
            assert_eq!(Phase::Open.step(cause).map(|t| t.to), Some(Phase::Closed));
        }
    }

    #[test]
    fn effect_table() {
        let effect = |cause| Phase::Open.step(cause).and_then(|t| t.effect());
        assert_eq!(effect(Cause::Escape), Some(MenuEffect::FocusTrigger));
        assert_eq!(effect(Cause::Item(2)), Some(MenuEffect::Navigate(2)));
        assert_eq!(effect(Cause::OutsidePointer), None);
        assert_eq!(effect(Cause::Trigger), None);
        assert_eq!(Phase::Closed.step(Cause::Trigger).and_then(|t| t.effect()), None);
    }

    #[test]
    fn starts_closed_without_panel_or_listeners() {
        let f = fixture();
        assert!(!f.menu.is_open());
        assert_eq!(f.menu.panel(), None);
        assert_eq!(f.doc.find_by_dom_id(PANEL_DOM_ID), None);
        assert_eq!(f.listener_count(), 0);
        let trigger = f.menu.trigger();
        assert_eq!(f.doc.attr(trigger, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(f.doc.attr(trigger, "aria-controls").as_deref(), Some(PANEL_DOM_ID));
        assert_eq!(f.doc.label(trigger).as_deref(), Some("Open navigation menu"));
    }

    #[test]
    fn opening_renders_the_panel_and_registers_one_listener_each() {
        let mut f = fixture();
        assert_eq!(f.menu.activate_trigger(), MenuAction::Opened);

        let panel = f.menu.panel().unwrap();
        assert_eq!(f.doc.find_by_dom_id(PANEL_DOM_ID), Some(panel));
        assert_eq!(f.doc.role(panel), Some(Role::Navigation));
        assert_eq!(f.doc.label(panel).as_deref(), Some(PANEL_LABEL));
        let labels: Vec<_> = f
            .doc
            .children(panel)
            .into_iter()
            .filter_map(|id| f.doc.label(id))
            .collect();
        assert_eq!(labels, ["Home", "Services", "Portfolio", "About", "Get Started"]);

        let l = f.doc.listeners();
        assert_eq!(l.count(ListenerKind::PointerDown), 1);
        assert_eq!(l.count(ListenerKind::KeyDown), 1);
        assert_eq!(f.doc.attr(f.menu.trigger(), "aria-expanded").as_deref(), Some("true"));
        assert_eq!(f.doc.label(f.menu.trigger()).as_deref(), Some("Close navigation menu"));
    }

    #[test]
    fn toggling_twice_restores_everything() {
        let mut f = fixture();
        let trigger = f.menu.trigger();
        let before = (f.doc.len(), f.doc.attr(trigger, "aria-expanded"), f.doc.label(trigger));

        for _ in 0..3 {
            f.menu.activate_trigger();
            f.menu.activate_trigger();
        }

        assert!(!f.menu.is_open());
        assert_eq!(
            (f.doc.len(), f.doc.attr(trigger, "aria-expanded"), f.doc.label(trigger)),
            before
        );
        assert_eq!(f.listener_count(), 0);
    }

    #[test]
    fn outside_press_closes_without_moving_focus() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let actions = f.press(f.elsewhere);
        assert_eq!(actions, [MenuAction::Closed(Cause::OutsidePointer), MenuAction::Pass]);
        assert!(!f.menu.is_open());
        assert_eq!(f.doc.focused(), None);
        assert_eq!(f.listener_count(), 0);
    }

    #[test]
    fn press_inside_the_panel_keeps_it_open() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let panel = f.menu.panel().unwrap();
        assert_eq!(f.press(panel), [MenuAction::Pass, MenuAction::Pass]);
        assert!(f.menu.is_open());
    }

    #[test]
    fn pressing_the_trigger_while_open_closes_exactly_once() {
        let mut f = fixture();
        let trigger = f.menu.trigger();
        assert_eq!(f.press(trigger), [MenuAction::Opened]);
        assert_eq!(f.press(trigger), [MenuAction::Pass, MenuAction::Closed(Cause::Trigger)]);
        assert!(!f.menu.is_open());
        assert_eq!(f.listener_count(), 0);
    }

    #[test]
    fn escape_closes_and_focuses_the_trigger() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let first_item = f.menu.item_elements()[0];
        assert!(f.doc.focus(first_item));

        assert_eq!(f.key(Key::Escape), [MenuAction::Closed(Cause::Escape)]);
        assert!(!f.menu.is_open());
        assert!(f.doc.is_focused(f.menu.trigger()));
        assert_eq!(f.doc.find_by_dom_id(PANEL_DOM_ID), None);
    }

    #[test]
    fn other_keys_and_closed_escape_are_ignored() {
        let mut f = fixture();
        assert!(f.key(Key::Escape).is_empty());
        f.menu.activate_trigger();
        assert_eq!(f.key(Key::Enter), [MenuAction::Pass]);
        assert!(f.menu.is_open());
    }

    #[test]
    fn item_activation_navigates_exactly_once() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let about = f.menu.item_elements()[3];

        let actions = f.press(about);
        assert_eq!(actions, [MenuAction::Pass, MenuAction::Closed(Cause::Item(3))]);
        assert_eq!(f.nav.0, [Route::new("/about")]);
        assert_eq!(f.doc.focused(), None);
        assert_eq!(f.listener_count(), 0);

        // A stale item id no longer maps to anything.
        assert_eq!(f.menu.activate(about, &mut f.nav), MenuAction::Pass);
        assert_eq!(f.nav.0.len(), 1);
    }

    #[test]
    fn no_effects_after_any_close_path() {
        let closers: [fn(&mut Fixture); 4] = [
            |f| {
                f.menu.activate_trigger();
            },
            |f| {
                f.press(f.elsewhere);
            },
            |f| {
                f.key(Key::Escape);
            },
            |f| {
                let item = f.menu.item_elements()[0];
                f.press(item);
            },
        ];
        for close in closers {
            let mut f = fixture();
            f.menu.activate_trigger();
            close(&mut f);
            assert!(!f.menu.is_open());
            assert_eq!(f.listener_count(), 0);

            f.doc.blur();
            assert!(f.key(Key::Escape).is_empty());
            assert_eq!(f.press(f.elsewhere), [MenuAction::Pass]);
            assert_eq!(f.doc.focused(), None);
            assert!(!f.menu.is_open());
        }
    }

    #[test]
    fn unmounting_while_open_releases_everything() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let trigger = f.menu.trigger();
        let owner = f.menu.owner();
        let Fixture { doc, menu, .. } = f;

        drop(menu);
        assert_eq!(doc.listeners().count_for(owner), 0);
        assert_eq!(doc.find_by_dom_id(PANEL_DOM_ID), None);
        assert!(!doc.exists(trigger));
        assert!(doc.dispatch(&GlobalEvent::KeyDown {
            key: Key::Escape,
            modifiers: ModMask::NONE,
        })
        .is_empty());
    }

    #[test]
    fn escape_with_a_vanished_trigger_does_not_panic() {
        let mut f = fixture();
        f.menu.activate_trigger();
        f.doc.remove(f.menu.trigger());
        assert_eq!(f.key(Key::Escape), [MenuAction::Closed(Cause::Escape)]);
        assert_eq!(f.doc.focused(), None);
    }

    #[test]
    fn deliveries_for_other_owners_are_ignored() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let stranger = f.doc.listeners().allocate_owner();
        let delivery = Delivery {
            owner: stranger,
            event: GlobalEvent::KeyDown {
                key: Key::Escape,
                modifiers: ModMask::NONE,
            },
        };
        assert_eq!(f.menu.handle_global(&delivery), MenuAction::Pass);
        assert!(f.menu.is_open());
    }

    #[test]
    fn panel_rows_leave_a_gap_before_the_call_to_action() {
        let mut f = fixture();
        f.menu.activate_trigger();
        let rows: Vec<i32> = f
            .menu
            .item_elements()
            .iter()
            .map(|&id| f.doc.bounds(id).min.y)
            .collect();
        assert_eq!(rows, [3, 4, 5, 6, 8]);
        assert_eq!(f.menu.panel_height(), 7);
        assert_eq!(
            f.doc.bounds(f.menu.panel().unwrap()),
            Range::new(0, 3, 40, 10)
        );
    }

    #[test]
    fn hiding_keeps_the_phase() {
        let mut f = fixture();
        f.menu.activate_trigger();
        f.menu.set_hidden(true);
        assert!(f.menu.is_open());
        assert!(!f.doc.is_rendered(f.menu.panel().unwrap()));
        assert_eq!(f.key(Key::Escape), [MenuAction::Closed(Cause::Escape)]);

        // Opening while hidden creates a hidden panel.
        f.menu.activate_trigger();
        assert!(!f.doc.is_rendered(f.menu.panel().unwrap()));
    }

    #[test]
    fn icon_follows_the_phase() {
        let mut f = fixture();
        let grid = Grid::new(40, 12);
        f.menu.draw(&grid);
        assert_eq!(grid.at(Point::new(38, 1)).ch, '☰');

        f.menu.activate_trigger();
        f.menu.draw(&grid);
        assert_eq!(grid.at(Point::new(38, 1)).ch, '✕');
        assert!(grid.row_text(3).starts_with("  Home"));
        assert!(grid.row_text(8).contains("Get Started"));
    }
}
