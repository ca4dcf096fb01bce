//! Provider page extraction: resource names from the navigation sidebar.

use scraper::{ElementRef, Html};
use tfdoc_shared::ProviderRecord;
use tracing::debug;

use crate::layout::{PageLayout, element_text};

pub(crate) fn extract_provider(doc: &Html, layout: &PageLayout, name: &str) -> ProviderRecord {
    let mut record = ProviderRecord {
        name: name.to_string(),
        ..Default::default()
    };

    for sidebar in doc.select(&layout.sidebar) {
        for section in sidebar.children().filter_map(ElementRef::wrap) {
            let text = element_text(&section);
            if let Some(marker) = layout.excluded_marker(&text) {
                debug!(marker, "skipping sidebar section");
                continue;
            }

            let before = record.resource_names.len();
            record.resource_names.extend(
                section
                    .select(&layout.sidebar_item)
                    .map(|item| element_text(&item).trim().to_string()),
            );
            debug!(
                count = record.resource_names.len() - before,
                "collected sidebar section"
            );
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ProviderRecord {
        let doc = Html::parse_document(html);
        extract_provider(&doc, &PageLayout::legacy(), "test")
    }

    #[test]
    fn only_resource_sections_are_collected() {
        let record = extract(
            r#"<ul class="docs-sidenav">
<li><a>Guides</a><ul class="nav-visible"><li>Upgrading</li></ul></li>
<li><a>Test Provider</a></li>
<li><a>Data Sources</a><ul class="nav-visible"><li>test_thing</li></ul></li>
<li><a>Resources</a><ul class="nav-visible"><li> test_a </li><li>test_b</li></ul></li>
</ul>"#,
        );
        assert_eq!(record.name, "test");
        assert_eq!(record.resource_names, ["test_a", "test_b"]);
    }

    #[test]
    fn multiple_sections_keep_traversal_order() {
        let record = extract(
            r#"<ul class="docs-sidenav">
<li><a>Compute Resources</a><ul class="nav-visible"><li>test_vm</li><li>test_disk</li></ul></li>
<li><a>Network Resources</a><ul class="nav-visible"><li>test_net</li><li>test_vm</li></ul></li>
</ul>"#,
        );
        assert_eq!(
            record.resource_names,
            ["test_vm", "test_disk", "test_net", "test_vm"]
        );
    }

    #[test]
    fn hidden_nested_lists_are_ignored() {
        let record = extract(
            r#"<ul class="docs-sidenav">
<li><a>Resources</a><ul class="nav"><li>collapsed</li></ul></li>
</ul>"#,
        );
        assert!(record.resource_names.is_empty());
    }

    #[test]
    fn missing_sidebar_yields_empty_record() {
        let record = extract("<html><body><p>No navigation here.</p></body></html>");
        assert!(record.resource_names.is_empty());
    }
}
