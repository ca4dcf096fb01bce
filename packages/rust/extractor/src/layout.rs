//! Compiled page-layout rules.
//!
//! Every structural assumption about the documentation pages lives here, so a
//! change in the page markup only touches [`LayoutConfig`] defaults.

use scraper::{ElementRef, Selector};
use tfdoc_shared::{LayoutConfig, Result, TfDocError};

/// [`LayoutConfig`] with every selector parsed.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub(crate) content_region: Selector,
    pub(crate) description: Selector,
    pub(crate) argument_list: Selector,
    pub(crate) list_item: Selector,
    pub(crate) emphasis: Selector,
    pub(crate) sidebar: Selector,
    pub(crate) sidebar_item: Selector,
    pub(crate) excluded_sections: Vec<String>,
}

impl PageLayout {
    /// Compile a layout, failing with a config error on the first bad selector.
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        Ok(Self {
            content_region: compile("content_region", &config.content_region)?,
            description: compile("description", &config.description)?,
            argument_list: compile("argument_list", &config.argument_list)?,
            list_item: compile("list_item", &config.list_item)?,
            emphasis: compile("emphasis", &config.emphasis)?,
            sidebar: compile("sidebar", &config.sidebar)?,
            sidebar_item: compile("sidebar_item", &config.sidebar_item)?,
            excluded_sections: config.excluded_sections.clone(),
        })
    }

    /// The layout of the legacy terraform.io documentation pages.
    pub fn legacy() -> Self {
        Self::from_config(&LayoutConfig::default()).expect("default layout selectors are valid")
    }

    /// The sidebar marker that excludes a section with this text, if any.
    pub(crate) fn excluded_marker(&self, section_text: &str) -> Option<&str> {
        self.excluded_sections
            .iter()
            .map(String::as_str)
            .find(|marker| section_text.contains(marker))
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::legacy()
    }
}

fn compile(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        TfDocError::config(format!("layout.{field}: invalid selector '{selector}': {e}"))
    })
}

/// Direct element children of `parent` that match `selector`, in document order.
pub(crate) fn direct_children<'a>(
    parent: ElementRef<'a>,
    selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| selector.matches(el))
}

/// All descendant text of an element, concatenated as-is.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Trim and drop embedded newlines.
pub(crate) fn squash(text: &str) -> String {
    text.trim().replace('\n', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn legacy_layout_compiles() {
        let layout = PageLayout::legacy();
        assert_eq!(layout.excluded_sections.len(), 3);
    }

    #[test]
    fn invalid_selector_is_config_error() {
        let config = LayoutConfig {
            argument_list: "ul[".into(),
            ..LayoutConfig::default()
        };
        let err = PageLayout::from_config(&config).unwrap_err();
        assert!(matches!(err, TfDocError::Config { .. }));
        assert!(err.to_string().contains("layout.argument_list"));
    }

    #[test]
    fn excluded_marker_is_substring_match() {
        let layout = PageLayout::legacy();
        assert_eq!(layout.excluded_marker("AWS Provider"), Some("Provider"));
        assert_eq!(layout.excluded_marker("  Data Sources\n aws_ami"), Some("Data Sources"));
        assert_eq!(layout.excluded_marker("Resources"), None);
    }

    #[test]
    fn direct_children_skips_grandchildren() {
        let doc = Html::parse_document(
            "<div id=\"inner\"><ul><li>a</li></ul><div><ul><li>b</li></ul></div><ul></ul></div>",
        );
        let layout = PageLayout::legacy();
        let region = doc.select(&layout.content_region).next().unwrap();
        assert_eq!(direct_children(region, &layout.argument_list).count(), 2);
    }

    #[test]
    fn squash_removes_newlines() {
        assert_eq!(squash("  one\ntwo \n"), "onetwo");
    }
}
