//! Resource page extraction: description and (nested) argument lists.
//!
//! Inside the content region the first paragraph is the description, the first
//! bullet list holds the top-level arguments, and every later list documents
//! the block of one top-level argument. A later list is assigned to the
//! argument whose name appears as emphasized/code text in the element right
//! before it.
//!
//! Nesting is one level deep: lists are only ever matched against top-level
//! argument names, so a block inside a block cannot be represented.

use scraper::{ElementRef, Html};
use tfdoc_shared::{ArgumentRecord, ResourceRecord};
use tracing::debug;

use crate::layout::{PageLayout, direct_children, element_text, squash};

/// Token (0-based, split on single spaces) that carries the `(Required)` marker.
const REQUIRED_TOKEN_INDEX: usize = 2;

/// Marker that flags a required argument. Anything else is optional.
const REQUIRED_MARKER: &str = "Required";

pub(crate) fn extract_resource(doc: &Html, layout: &PageLayout, name: &str) -> ResourceRecord {
    let mut record = ResourceRecord {
        name: name.to_string(),
        ..Default::default()
    };

    let Some(region) = doc.select(&layout.content_region).next() else {
        debug!("content region not found, returning empty record");
        return record;
    };

    if let Some(paragraph) = direct_children(region, &layout.description).next() {
        record.description = squash(&element_text(&paragraph));
    }

    for (index, list) in direct_children(region, &layout.argument_list).enumerate() {
        if index == 0 {
            record.args = parse_items(list, layout);
            debug!(count = record.args.len(), "parsed top-level arguments");
            continue;
        }

        let owner = block_owner(list, layout);
        if owner.is_empty() {
            debug!(list = index, "list has no owner, dropped");
            continue;
        }

        let mut matched = false;
        for arg in record.args.iter_mut().filter(|arg| arg.name == owner) {
            arg.nested_fields.extend(parse_items(list, layout));
            matched = true;
        }

        if matched {
            debug!(list = index, %owner, "attached nested fields");
        } else {
            debug!(list = index, %owner, "no argument named like list owner, dropped");
        }
    }

    record
}

/// Parse every item of an argument list, in order.
fn parse_items(list: ElementRef<'_>, layout: &PageLayout) -> Vec<ArgumentRecord> {
    direct_children(list, &layout.list_item)
        .map(|item| parse_item(item, layout))
        .collect()
}

/// One list item of the form `name - (Required|Optional) description`.
pub(crate) fn parse_item(item: ElementRef<'_>, layout: &PageLayout) -> ArgumentRecord {
    let text = element_text(&item);

    let name = item
        .select(&layout.emphasis)
        .next()
        .map(|el| element_text(&el).trim().to_string())
        .unwrap_or_default();

    // Items without a dash do not follow the format; keep them with no description.
    let description = text
        .split_once('-')
        .map(|(_, rest)| squash(rest))
        .unwrap_or_default();

    let required = text
        .trim_start()
        .splitn(REQUIRED_TOKEN_INDEX + 2, ' ')
        .nth(REQUIRED_TOKEN_INDEX)
        .is_some_and(|token| token.contains(REQUIRED_MARKER));

    ArgumentRecord {
        name,
        description,
        required,
        nested_fields: Vec::new(),
    }
}

/// Emphasized text of the element immediately preceding `list`.
///
/// Matches nested inside another match (`<strong><code>x</code></strong>`)
/// are counted once.
fn block_owner(list: ElementRef<'_>, layout: &PageLayout) -> String {
    let Some(prev) = list.prev_siblings().find_map(ElementRef::wrap) else {
        return String::new();
    };

    let owner: String = prev
        .select(&layout.emphasis)
        .filter(|el| {
            !el.ancestors()
                .take_while(|node| node.id() != prev.id())
                .filter_map(ElementRef::wrap)
                .any(|ancestor| layout.emphasis.matches(&ancestor))
        })
        .map(|el| element_text(&el))
        .collect();

    owner.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ResourceRecord {
        let doc = Html::parse_document(html);
        extract_resource(&doc, &PageLayout::legacy(), "test_resource")
    }

    fn item(html: &str) -> ArgumentRecord {
        let doc = Html::parse_fragment(&format!("<ul>{html}</ul>"));
        let layout = PageLayout::legacy();
        let li = doc.select(&layout.list_item).next().expect("li");
        parse_item(li, &layout)
    }

    #[test]
    fn item_required() {
        let arg = item(r##"<li><a href="#ami"><code>ami</code></a> - (Required) The AMI to use.</li>"##);
        assert_eq!(arg.name, "ami");
        assert_eq!(arg.description, "(Required) The AMI to use.");
        assert!(arg.required);
        assert!(arg.nested_fields.is_empty());
    }

    #[test]
    fn item_optional() {
        let arg = item(r##"<li><a href="#tags"><code>tags</code></a> - (Optional) A mapping of tags.</li>"##);
        assert_eq!(arg.name, "tags");
        assert!(!arg.required);
    }

    #[test]
    fn item_without_marker_is_optional() {
        let arg = item("<li><code>device_name</code> - The name of the device.</li>");
        assert!(!arg.required);
        assert_eq!(arg.description, "The name of the device.");
    }

    #[test]
    fn item_without_dash_has_empty_description() {
        let arg = item("<li><code>odd</code> (Required) no dash here</li>");
        assert_eq!(arg.name, "odd");
        assert_eq!(arg.description, "");
        // The marker is the second token here, not the third.
        assert!(!arg.required);
    }

    #[test]
    fn item_splits_on_first_dash_only() {
        let arg = item("<li><code>cidr</code> - (Optional) A /16-/28 range - inclusive.</li>");
        assert_eq!(arg.description, "(Optional) A /16-/28 range - inclusive.");
    }

    #[test]
    fn item_description_drops_newlines() {
        let arg = item("<li><code>x</code> - (Optional) first line\nsecond line</li>");
        assert_eq!(arg.description, "(Optional) first linesecond line");
    }

    #[test]
    fn description_is_first_direct_paragraph() {
        let record = extract(
            r#"<div id="inner"><div><p>nested</p></div><p>
  First
paragraph.  </p><p>Second.</p></div>"#,
        );
        assert_eq!(record.name, "test_resource");
        assert_eq!(record.description, "Firstparagraph.");
    }

    #[test]
    fn unmatched_nested_list_is_dropped() {
        let record = extract(
            r#"<div id="inner">
<ul><li><code>a</code> - (Required) A.</li></ul>
<p>The <code>b</code> block supports:</p>
<ul><li><code>c</code> - (Optional) C.</li></ul>
<p>Attributes:</p>
<ul><li><code>id</code> - The ID.</li></ul>
</div>"#,
        );
        assert_eq!(record.args.len(), 1);
        assert!(record.args[0].nested_fields.is_empty());
    }

    #[test]
    fn nested_list_attaches_to_owner() {
        let record = extract(
            r#"<div id="inner">
<ul>
<li><code>a</code> - (Required) A.</li>
<li><code>block</code> - (Optional) A block.</li>
</ul>
<p><strong>block</strong> supports:</p>
<ul>
<li><code>x</code> - (Required) X.</li>
<li><code>y</code> - (Optional) Y.</li>
</ul>
</div>"#,
        );
        assert_eq!(record.args.len(), 2);
        assert!(record.args[0].nested_fields.is_empty());
        let nested: Vec<&str> = record.args[1]
            .nested_fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(nested, ["x", "y"]);
        assert!(record.args[1].nested_fields[0].required);
    }

    #[test]
    fn nested_owner_counts_wrapped_emphasis_once() {
        let record = extract(
            r#"<div id="inner">
<ul><li><code>block</code> - (Optional) A block.</li></ul>
<p><strong><code>block</code></strong> supports:</p>
<ul><li><code>x</code> - (Required) X.</li></ul>
</div>"#,
        );
        assert_eq!(record.args[0].nested_fields.len(), 1);
    }

    #[test]
    fn nested_lists_do_not_nest_further() {
        let record = extract(
            r#"<div id="inner">
<ul><li><code>outer</code> - (Optional) Outer.</li></ul>
<p><code>outer</code> supports:</p>
<ul><li><code>inner</code> - (Optional) Inner.</li></ul>
<p><code>inner</code> supports:</p>
<ul><li><code>leaf</code> - (Optional) Leaf.</li></ul>
</div>"#,
        );
        assert_eq!(record.args.len(), 1);
        let outer = &record.args[0];
        assert_eq!(outer.nested_fields.len(), 1);
        assert!(outer.nested_fields[0].nested_fields.is_empty());
    }

    #[test]
    fn missing_content_region_yields_empty_record() {
        let record = extract("<html><body><ul><li><code>a</code> - (Required) A.</li></ul></body></html>");
        assert_eq!(record.description, "");
        assert!(record.args.is_empty());
    }

    #[test]
    fn lists_outside_region_children_are_ignored() {
        let record = extract(
            r#"<div id="inner"><p>Desc.</p><div><ul><li><code>hidden</code> - (Required) H.</li></ul></div></div>"#,
        );
        assert!(record.args.is_empty());
    }
}
