//! Extraction of artist/title pairs from show page markup.
//!
//! The structural marker that identifies a segment changes whenever the source
//! site updates its template, so it lives in a [`SegmentLayout`] supplied by
//! the caller. The default layout matches the BBC iPlayer/Sounds template.

use scraper::{ElementRef, Html, Selector};

use crate::{error::ConfigError, types::ShowEntry};

pub const DEFAULT_SEGMENT_SELECTOR: &str = "div.segment__track";
pub const DEFAULT_FIELD_SELECTOR: &str = "span";

/// Where segments and their two fields live in a page.
#[derive(Debug, Clone)]
pub struct SegmentLayout {
    container: Selector,
    field: Selector,
    attribute: Option<String>,
}

impl SegmentLayout {
    /// Builds a layout from CSS selectors.
    ///
    /// `attribute` switches field extraction from element text to the value
    /// of the named attribute.
    pub fn new(
        container: &str,
        field: &str,
        attribute: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            container: parse_selector(container)?,
            field: parse_selector(field)?,
            attribute: attribute.filter(|a| !a.trim().is_empty()),
        })
    }

    fn field_value(&self, element: ElementRef<'_>) -> String {
        match &self.attribute {
            Some(name) => element
                .value()
                .attr(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            None => element.text().collect::<String>().trim().to_string(),
        }
    }
}

impl Default for SegmentLayout {
    fn default() -> Self {
        Self {
            container: Selector::parse(DEFAULT_SEGMENT_SELECTOR)
                .expect("default segment selector is valid"),
            field: Selector::parse(DEFAULT_FIELD_SELECTOR)
                .expect("default field selector is valid"),
            attribute: None,
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Returns every segment in document order.
///
/// A container must hold exactly two fields, artist first and title second.
/// Containers with any other shape are skipped.
pub fn parse(markup: &str, layout: &SegmentLayout) -> Vec<ShowEntry> {
    let document = Html::parse_document(markup);

    document
        .select(&layout.container)
        .filter_map(|container| {
            let fields: Vec<ElementRef<'_>> = container.select(&layout.field).collect();
            if fields.len() != 2 {
                return None;
            }
            Some(ShowEntry {
                artist: layout.field_value(fields[0]),
                title: layout.field_value(fields[1]),
            })
        })
        .collect()
}
