//! Client-side routing: the current page and the visit history.

use sitekit_ui::{Navigator, Route};

/// What the main region shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    NotFound(String),
}

#[derive(Debug)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
    external: Vec<Route>,
    revision: u64,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// A router on the home page.
    pub fn new() -> Self {
        Self {
            current: Route::new("/"),
            history: Vec::new(),
            external: Vec::new(),
            revision: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn page(&self) -> Page {
        match self.current.path() {
            "/" | "" => Page::Home,
            path => Page::NotFound(path.to_string()),
        }
    }

    /// Routes visited before the current one, oldest first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// External destinations that were requested, in order. They are
    /// recorded only; the site never leaves its own pages.
    pub fn external(&self) -> &[Route] {
        &self.external
    }

    /// Incremented on every page change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Return to the previous route. `false` when there is none.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        log::info!("back to {previous}");
        self.current = previous;
        self.revision += 1;
        true
    }
}

impl Navigator for Router {
    fn navigate(&mut self, route: &Route) {
        if route.is_external() {
            log::info!("external link {route}");
            self.external.push(route.clone());
            return;
        }
        log::info!("navigate {} -> {route}", self.current);
        let previous = std::mem::replace(&mut self.current, route.clone());
        self.history.push(previous);
        self.revision += 1;
    }
}
