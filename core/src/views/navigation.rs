//! Navigation Shell
//!
//! Tracks the active page and whether a component is bound to it. Pages
//! without one render a "coming soon" placeholder.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Donations,
    Collections,
    Expenses,
    FixedExpenses,
    Flats,
}

impl Page {
    /// Menu order
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Donations,
        Page::Collections,
        Page::Expenses,
        Page::FixedExpenses,
        Page::Flats,
    ];

    /// Page id, which doubles as the localizer key of its label
    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Donations => "donations",
            Page::Collections => "collections",
            Page::Expenses => "expenses",
            Page::FixedExpenses => "fixed_expenses",
            Page::Flats => "flats",
        }
    }

    pub fn parse(id: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.id() == id)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What the content area shows for the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContent {
    Bound(Page),
    ComingSoon(Page),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationShell {
    current: Page,
    bound: HashSet<Page>,
}

impl NavigationShell {
    /// Shell starting on the dashboard, with components for `bound`
    pub fn new(bound: impl IntoIterator<Item = Page>) -> Self {
        Self {
            current: Page::default(),
            bound: bound.into_iter().collect(),
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn select(&mut self, page: Page) {
        debug!(%page, "select page");
        self.current = page;
    }

    /// Switch by page id; an unknown id leaves the current page as is
    pub fn select_page(&mut self, id: &str) -> DomainResult<Page> {
        let page = Page::parse(id)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown page: {}", id)))?;
        self.select(page);
        Ok(page)
    }

    pub fn is_bound(&self, page: Page) -> bool {
        self.bound.contains(&page)
    }

    pub fn content(&self) -> PageContent {
        if self.is_bound(self.current) {
            PageContent::Bound(self.current)
        } else {
            PageContent::ComingSoon(self.current)
        }
    }
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new(Page::ALL)
    }
}
