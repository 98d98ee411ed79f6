//! Page catalog domain.
//!
//! The hub advertises a fixed set of tool pages. Most of them run entirely in
//! the browser; a few post to the computation API. The catalog answers which
//! pages exist and which of them have a server-side tool. Rendering the pages
//! is left to the front end.

use serde::Serialize;

use crate::domains::tools::ToolRegistry;

/// Tool page slugs, in the order they are shown on the index page.
const PAGES: &[&str] = &[
    "gpa-calculator",
    "study-planner",
    "assignment-tracker",
    "grade-tracker",
    "timetable-generator",
    "exam-countdown",
    "course-credit-calculator",
    "pomodoro-timer",
    "habit-tracker",
    "goal-setter",
    "daily-planner",
    "focus-mode",
    "mind-map-creator",
    "pdf-toolkit",
    "image-editor",
    "qr-code-generator",
    "password-manager",
    "unit-converter",
    "file-organizer",
    "citation-generator",
    "plagiarism-detector",
    "word-counter",
    "grammar-checker",
    "bibliography-manager",
    "research-organizer",
];

/// Description of one tool page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// URL slug of the page.
    pub slug: &'static str,

    /// Template the front end renders for this page.
    pub template: String,

    /// Whether the page has a computation tool behind it.
    pub has_api: bool,
}

/// All page slugs.
pub fn pages() -> &'static [&'static str] {
    PAGES
}

/// Whether `slug` names a known page.
pub fn is_known(slug: &str) -> bool {
    PAGES.contains(&slug)
}

/// Describe a page, or `None` for an unknown slug.
pub fn describe(slug: &str, registry: &ToolRegistry) -> Option<PageInfo> {
    let slug = PAGES.iter().find(|p| **p == slug)?;
    Some(PageInfo {
        slug,
        template: format!("tools/{}.html", slug),
        has_api: registry.contains(slug),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ToolsConfig;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::with_default_tools(&ToolsConfig::default())
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(pages().len(), 25);
        assert!(is_known("word-counter"));
        assert!(!is_known("admin"));
    }

    #[test]
    fn test_every_registered_tool_has_a_page() {
        for name in test_registry().tool_names() {
            assert!(is_known(name), "{name} has no page");
        }
    }

    #[test]
    fn test_describe() {
        let registry = test_registry();

        let gpa = describe("gpa-calculator", &registry).unwrap();
        assert_eq!(gpa.template, "tools/gpa-calculator.html");
        assert!(gpa.has_api);

        let notes = describe("word-counter", &registry).unwrap();
        assert!(!notes.has_api);

        assert!(describe("../etc/passwd", &registry).is_none());
    }
}
