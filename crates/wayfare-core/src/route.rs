//! Route trees and deep-link path patterns.
//!
//! Each subtree is an immutable, ordered set of named screens; the first
//! screen is the subtree's default entry. Dispatch from [`SubtreeKey`] to a
//! tree is an exhaustive match, so the mapping is total by construction.

use crate::role::SubtreeKey;

/// How a screen's module is resolved when the subtree mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Resolved as soon as the subtree mounts.
    Eager,
    /// Resolved on first navigation to the screen. An unmounted subtree's
    /// lazy screens are never resolved.
    Lazy,
}

/// Parameters extracted from a deep-link path or carried by a navigation
/// request.
pub type NavParams = Vec<(String, String)>;

/// A named screen inside one subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Screen name, unique within its subtree.
    pub name: &'static str,
    /// Module resolution strategy.
    pub load: LoadStrategy,
    /// Deep-link path pattern, e.g. `"requests/:id"`. `None` if the screen is
    /// not deep-linkable.
    pub path: Option<&'static str>,
}

impl Screen {
    /// Eagerly loaded screen without a deep-link path.
    pub const fn eager(name: &'static str) -> Self {
        Self { name, load: LoadStrategy::Eager, path: None }
    }

    /// Lazily loaded screen without a deep-link path.
    pub const fn lazy(name: &'static str) -> Self {
        Self { name, load: LoadStrategy::Lazy, path: None }
    }

    /// Attach a deep-link path pattern.
    pub const fn with_path(mut self, path: &'static str) -> Self {
        self.path = Some(path);
        self
    }

    /// Match a concrete deep-link path against this screen's pattern.
    ///
    /// Pattern segments starting with `:` bind the corresponding path segment
    /// as a parameter. Returns `None` on segment-count or literal mismatch,
    /// or when the screen has no pattern.
    pub fn match_path(&self, path: &str) -> Option<NavParams> {
        let pattern = self.path?;
        let mut params = NavParams::new();

        let mut pattern_segments = pattern.split('/');
        let mut path_segments = path.split('/');

        loop {
            match (pattern_segments.next(), path_segments.next()) {
                (None, None) => return Some(params),
                (Some(pat), Some(seg)) => {
                    if let Some(key) = pat.strip_prefix(':') {
                        if seg.is_empty() {
                            return None;
                        }
                        params.push((key.to_string(), seg.to_string()));
                    } else if pat != seg {
                        return None;
                    }
                },
                _ => return None,
            }
        }
    }
}

/// Ordered set of screens belonging to one subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTree {
    screens: Vec<Screen>,
}

impl RouteTree {
    /// Build a tree from its screens. The first screen is the default entry.
    pub fn new(screens: Vec<Screen>) -> Self {
        debug_assert!(!screens.is_empty(), "a subtree needs at least one screen");
        Self { screens }
    }

    /// Default entry screen (navigation history resets to it on mount).
    pub fn default_screen(&self) -> &Screen {
        self.screens.first().unwrap_or(&FALLBACK_SCREEN)
    }

    /// All screens, in order.
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Look up a screen by name.
    pub fn screen(&self, name: &str) -> Option<&Screen> {
        self.screens.iter().find(|s| s.name == name)
    }

    /// Whether the tree contains a screen with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.screen(name).is_some()
    }

    /// Resolve a deep-link path against this tree's patterns.
    ///
    /// Returns the matching screen and its extracted parameters.
    pub fn resolve_path(&self, path: &str) -> Option<(&Screen, NavParams)> {
        self.screens.iter().find_map(|s| s.match_path(path).map(|params| (s, params)))
    }
}

/// Fallback for the unreachable empty-tree case.
static FALLBACK_SCREEN: Screen = Screen::eager("sign-in");

/// Total, exclusive mapping from subtree key to route tree.
#[derive(Debug, Clone)]
pub struct RouteTable {
    unauthenticated: RouteTree,
    client: RouteTree,
    agent: RouteTree,
    company: RouteTree,
    admin: RouteTree,
}

impl RouteTable {
    /// Build a table from the five subtrees.
    pub fn new(
        unauthenticated: RouteTree,
        client: RouteTree,
        agent: RouteTree,
        company: RouteTree,
        admin: RouteTree,
    ) -> Self {
        Self { unauthenticated, client, agent, company, admin }
    }

    /// The travel-marketplace route table.
    pub fn marketplace() -> Self {
        Self::new(
            RouteTree::new(vec![
                Screen::eager("sign-in"),
                Screen::lazy("register"),
                Screen::lazy("reset-password").with_path("reset-password"),
            ]),
            RouteTree::new(vec![
                Screen::eager("home"),
                Screen::lazy("my-requests").with_path("requests"),
                Screen::lazy("request-detail").with_path("requests/:id"),
                Screen::lazy("new-request"),
                Screen::lazy("offer-detail").with_path("offers/:id"),
                Screen::lazy("profile"),
            ]),
            RouteTree::new(vec![
                Screen::eager("open-requests"),
                Screen::lazy("request-detail").with_path("requests/:id"),
                Screen::lazy("my-offers").with_path("offers"),
                Screen::lazy("profile"),
            ]),
            RouteTree::new(vec![
                Screen::eager("dashboard"),
                Screen::lazy("agents").with_path("agents"),
                Screen::lazy("agent-detail").with_path("agents/:id"),
                Screen::lazy("profile"),
            ]),
            RouteTree::new(vec![
                Screen::eager("companies"),
                Screen::lazy("company-detail").with_path("companies/:id"),
                Screen::lazy("settings"),
            ]),
        )
    }

    /// Resolve the subtree for a key. Total by exhaustive match.
    pub fn subtree(&self, key: SubtreeKey) -> &RouteTree {
        match key {
            SubtreeKey::Unauthenticated => &self.unauthenticated,
            SubtreeKey::Client => &self.client,
            SubtreeKey::Agent => &self.agent,
            SubtreeKey::Company => &self.company,
            SubtreeKey::Admin => &self.admin,
        }
    }
}
