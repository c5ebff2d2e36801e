//! Style identifier → icon label map and split-label reconstruction.
//!
//! Arrival-time products draw labels such as "Wed 8 AM" as three icon
//! placemarks styled `styleNa`, `styleNb` and `styleNc`, where each icon file
//! name carries one fragment (`wed.png`, `eight.png`, `am.png`). The map has
//! to be complete before any label is reconstructed, since `Style` elements
//! may appear after the placemarks that reference them.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::classify::{classify_label, LabelKind, LabelPart};
use crate::markup::MarkupElement;

fn label_style_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^style(\d+)([abc])?$").expect("label style regex is valid"))
}

/// A style identifier split into its label group and slot letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyleId {
    pub group: u32,
    pub suffix: Option<char>,
}

impl LabelStyleId {
    pub fn parse(style_id: &str) -> Option<Self> {
        let captures = label_style_regex().captures(strip_hash(style_id))?;
        let group = captures.get(1)?.as_str().parse().ok()?;
        let suffix = captures
            .get(2)
            .and_then(|m| m.as_str().chars().next())
            .map(|c| c.to_ascii_lowercase());
        Some(Self { group, suffix })
    }
}

/// One fragment of a split label, as attached to a label point feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelComponent {
    pub group: u32,
    pub kind: Option<LabelKind>,
    /// Normalized fragment text, or the raw icon label when unclassified.
    pub text: Option<String>,
}

/// Style id → display label, built once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    labels: BTreeMap<String, String>,
    /// KML `StyleMap` id → the `normal` style it points at.
    aliases: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `Style` (and `StyleMap` alias) anywhere in the document.
    pub fn from_document(root: &MarkupElement) -> Self {
        let mut map = Self::new();

        for style in root.descendants("Style") {
            let Some(id) = style.attr("id") else {
                continue;
            };
            let label = style
                .path(&["IconStyle", "Icon", "href"])
                .and_then(MarkupElement::text)
                .and_then(icon_stem);
            if let Some(label) = label {
                map.insert(id, label);
            }
        }

        for style_map in root.descendants("StyleMap") {
            let Some(id) = style_map.attr("id") else {
                continue;
            };
            let normal = style_map
                .children("Pair")
                .iter()
                .find(|pair| pair.child_text("key") == Some("normal"))
                .and_then(|pair| pair.child_text("styleUrl"));
            if let Some(target) = normal {
                map.aliases
                    .insert(id.to_string(), strip_hash(target).to_string());
            }
        }

        trace!(styles = map.labels.len(), aliases = map.aliases.len(), "Built style map");
        map
    }

    pub fn insert(&mut self, style_id: &str, label: impl Into<String>) {
        self.labels
            .insert(strip_hash(style_id).to_string(), label.into());
    }

    /// Follow a `StyleMap` alias to the concrete style id.
    pub fn resolve<'a>(&'a self, style_id: &'a str) -> &'a str {
        let id = strip_hash(style_id);
        self.aliases.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Raw label of a style.
    pub fn get(&self, style_id: &str) -> Option<&str> {
        self.labels.get(self.resolve(style_id)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The fragment a single label point contributes.
    pub fn label_component(&self, style_id: &str) -> Option<LabelComponent> {
        let id = self.resolve(style_id);
        let parsed = LabelStyleId::parse(id)?;
        let raw = self.labels.get(id);
        let part = raw.and_then(|text| classify_label(text));

        Some(LabelComponent {
            group: parsed.group,
            kind: part
                .as_ref()
                .map(|p| p.kind)
                .or_else(|| parsed.suffix.and_then(LabelKind::from_suffix)),
            text: part.map(|p| p.text).or_else(|| raw.cloned()),
        })
    }

    /// Rebuild the full label ("Wed 8 AM") for any style of a label group.
    ///
    /// Falls back to the raw label of `style_id` when no fragment of the
    /// group can be classified.
    pub fn reconstruct_label(&self, style_id: &str) -> Option<String> {
        let id = self.resolve(style_id);
        let fallback = || self.labels.get(id).cloned();

        let Some(wanted) = LabelStyleId::parse(id) else {
            return fallback();
        };

        let mut day: Option<LabelPart> = None;
        let mut hour: Option<LabelPart> = None;
        let mut period: Option<LabelPart> = None;

        let siblings = self.labels.iter().filter(|(sibling, _)| {
            LabelStyleId::parse(sibling).is_some_and(|s| s.group == wanted.group)
        });
        for (_, text) in siblings {
            let Some(part) = classify_label(text) else {
                continue;
            };
            let slot = match part.kind {
                LabelKind::Day => &mut day,
                LabelKind::Hour => &mut hour,
                LabelKind::Period => &mut period,
            };
            slot.get_or_insert(part);
        }

        let joined = [day, hour, period]
            .into_iter()
            .flatten()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            fallback()
        } else {
            Some(joined)
        }
    }
}

/// Last path segment of an icon reference with its extension removed.
pub fn icon_stem(href: &str) -> Option<String> {
    let href = href.trim();
    let href = href.split(['?', '#']).next().unwrap_or(href);
    let file = href.rsplit(['/', '\\']).next().unwrap_or(href);
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    (!stem.is_empty()).then(|| stem.to_string())
}

fn strip_hash(style_id: &str) -> &str {
    style_id.trim().trim_start_matches('#')
}
