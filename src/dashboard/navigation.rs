// Page navigation
// Exactly one page is visible at a time; switching never touches the network.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::UnknownPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Overview,
    General,
    Welcome,
    Moderation,
    Tickets,
    Roles,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::General,
        Page::Welcome,
        Page::Moderation,
        Page::Tickets,
        Page::Roles,
    ];

    /// Identifier carried by the navigation control
    pub fn key(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::General => "general",
            Page::Welcome => "welcome",
            Page::Moderation => "moderation",
            Page::Tickets => "tickets",
            Page::Roles => "roles",
        }
    }

    /// Page title label
    pub fn display_name(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::General => "General",
            Page::Welcome => "Welcome",
            Page::Moderation => "Moderation",
            Page::Tickets => "Tickets",
            Page::Roles => "Roles",
        }
    }

    /// Element id of the page panel
    pub fn panel_id(self) -> &'static str {
        match self {
            Page::Overview => "overviewPage",
            Page::General => "generalPage",
            Page::Welcome => "welcomePage",
            Page::Moderation => "moderationPage",
            Page::Tickets => "ticketsPage",
            Page::Roles => "rolesPage",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Page::ALL
            .into_iter()
            .find(|page| page.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub page: Page,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControlState {
    pub page: Page,
    pub active: bool,
}

/// Which page is current; panels, title and controls derive from it
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Page,
}

impl Navigator {
    pub fn current(&self) -> Page {
        self.current
    }

    /// Switch to `page`. Always allowed, whatever is loading.
    pub fn activate(&mut self, page: Page) {
        debug!("navigate {} -> {}", self.current, page);
        self.current = page;
    }

    pub fn title(&self) -> &'static str {
        self.current.display_name()
    }

    pub fn panels(&self) -> [PanelState; 6] {
        Page::ALL.map(|page| PanelState {
            page,
            visible: page == self.current,
        })
    }

    pub fn controls(&self) -> [NavControlState; 6] {
        Page::ALL.map(|page| NavControlState {
            page,
            active: page == self.current,
        })
    }
}
