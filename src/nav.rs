//! Navigation
//!
//! Sidebar links and the route → summary panel lookup.

use crate::pages::Section;
use crate::summary::SummaryPanel;

/// Sidebar heading
pub const APP_TITLE: &str = "💰 Finance App";

/// A sidebar link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub section: Section,
}

/// Sidebar links, one per section
pub fn links() -> Vec<NavLink> {
    Section::ALL
        .iter()
        .map(|section| NavLink {
            href: section.route(),
            label: section.label(),
            section: *section,
        })
        .collect()
}

/// Section whose page is mounted at a path
pub fn section_for_path(path: &str) -> Option<Section> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    Section::ALL
        .into_iter()
        .find(|section| section.route() == normalized)
}

/// Summary panel to show in the sidebar for the current path
pub fn summary_panel_for_path(path: &str) -> Option<SummaryPanel> {
    section_for_path(path).and_then(Section::summary_panel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_cover_sections() {
        let links = links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].href, "/");
        assert_eq!(links[1].label, "Allocation Matrix");
        assert_eq!(links[2].section, Section::CashflowAnalytics);
    }

    #[test]
    fn test_panel_lookup() {
        assert_eq!(summary_panel_for_path("/"), Some(SummaryPanel::CommandCenter));
        assert_eq!(summary_panel_for_path(""), Some(SummaryPanel::CommandCenter));
        assert_eq!(
            summary_panel_for_path("/allocation/?tab=1"),
            Some(SummaryPanel::AllocationMatrix)
        );
        assert_eq!(summary_panel_for_path("/cashflow"), None);
        assert_eq!(
            summary_panel_for_path("/allocation_matrix/liquidity_horizon/details"),
            None
        );
    }
}
