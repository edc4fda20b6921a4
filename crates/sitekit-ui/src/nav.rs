//! Navigation destinations and the [`Navigator`] seam.

use std::fmt;

/// A navigation destination: a site path (`/about`), an in-page fragment
/// (`#main-content`), or an external URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leaves the site (another origin or a `mailto:` link).
    pub fn is_external(&self) -> bool {
        self.0.contains("://") || self.0.starts_with("mailto:")
    }

    /// The fragment of an in-page link, without the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.0.split_once('#').map(|(_, frag)| frag)
    }

    /// The path component: `/services#web` → `/services`, `#top` → `""`.
    pub fn path(&self) -> &str {
        self.0.split_once('#').map_or(self.0.as_str(), |(path, _)| path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A labelled destination shown in a navigation list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub route: Route,
    /// Rendered as the call-to-action button rather than a plain link.
    pub call_to_action: bool,
}

impl NavItem {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            route: Route::new(href),
            call_to_action: false,
        }
    }

    pub fn call_to_action(label: &str, href: &str) -> Self {
        Self {
            call_to_action: true,
            ..Self::link(label, href)
        }
    }
}

/// The site's primary navigation, in display order.
pub fn primary_nav() -> Vec<NavItem> {
    vec![
        NavItem::link("Home", "/"),
        NavItem::link("Services", "/services"),
        NavItem::link("Portfolio", "/portfolio"),
        NavItem::link("About", "/about"),
        NavItem::call_to_action("Get Started", "/contact"),
    ]
}

/// Receives navigation requests. Resolving and validating the route is
/// entirely the implementor's business.
pub trait Navigator {
    fn navigate(&mut self, route: &Route);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_parts() {
        let r = Route::new("/services#mobile");
        assert_eq!(r.path(), "/services");
        assert_eq!(r.fragment(), Some("mobile"));
        assert!(!r.is_external());

        let skip = Route::new("#main-content");
        assert_eq!(skip.path(), "");
        assert_eq!(skip.fragment(), Some("main-content"));

        assert!(Route::new("https://github.com/DeanWaringDev").is_external());
        assert!(Route::new("mailto:hello@deanwaringdev.com").is_external());
        assert_eq!(Route::new("/about").fragment(), None);
    }

    #[test]
    fn primary_nav_ends_with_the_call_to_action() {
        let items = primary_nav();
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Home", "Services", "Portfolio", "About", "Get Started"]);
        assert!(items.iter().take(4).all(|i| !i.call_to_action));
        assert!(items[4].call_to_action);
        assert_eq!(items[4].route.as_str(), "/contact");
    }
}
