//! Navigation chrome around every admin page: the sidebar, its collapsible
//! sections, and the active-link highlight derived from the page path.

use slate_common::{master_title, KNOWN_MASTERS};

/// A navigation link, either top-level or inside a section.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    active: bool,
}

impl NavLink {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A collapsible group of links.
#[derive(Debug, Clone)]
pub struct NavSection {
    pub label: String,
    expanded: bool,
    links: Vec<NavLink>,
}

impl NavSection {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }
}

/// Sidebar state. Highlighting only ever adds; a link once marked active
/// stays active for the life of the page, exactly as served markup would.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    sidebar_open: bool,
    links: Vec<NavLink>,
    sections: Vec<NavSection>,
}

impl Chrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, href: &str, label: &str) -> Self {
        self.links.push(NavLink {
            href: href.to_string(),
            label: label.to_string(),
            active: false,
        });
        self
    }

    pub fn with_section(mut self, label: &str, links: &[(&str, &str)]) -> Self {
        self.sections.push(NavSection {
            label: label.to_string(),
            expanded: false,
            links: links
                .iter()
                .map(|(href, text)| NavLink {
                    href: href.to_string(),
                    label: text.to_string(),
                    active: false,
                })
                .collect(),
        });
        self
    }

    /// Standard "Masters" section with one page per known category.
    pub fn with_masters_menu(self) -> Self {
        let links: Vec<(String, String)> = KNOWN_MASTERS
            .iter()
            .map(|c| (format!("/master/{c}"), master_title(c)))
            .collect();
        let borrowed: Vec<(&str, &str)> = links
            .iter()
            .map(|(h, l)| (h.as_str(), l.as_str()))
            .collect();
        self.with_section("Masters", &borrowed)
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Flip the mobile sidebar. Returns the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    /// Flip one section by label. Returns the new state, or `None` for an
    /// unknown label.
    pub fn toggle_section(&mut self, label: &str) -> Option<bool> {
        let section = self.sections.iter_mut().find(|s| s.label == label)?;
        section.expanded = !section.expanded;
        Some(section.expanded)
    }

    /// Mark every link whose href equals `path` active, and expand any
    /// section containing one.
    pub fn highlight_active(&mut self, path: &str) {
        for link in &mut self.links {
            if link.href == path {
                link.active = true;
            }
        }
        for section in &mut self.sections {
            let mut hit = false;
            for link in &mut section.links {
                if link.href == path {
                    link.active = true;
                    hit = true;
                }
            }
            if hit {
                section.expanded = true;
            }
        }
    }
}
