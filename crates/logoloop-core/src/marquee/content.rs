//! Content shown on the marquee track

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for a linked item that carries no accessible text of its own
pub const FALLBACK_LINK_LABEL: &str = "logo link";

/// One entry of the content sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MarqueeItem {
    /// An image reference (local path or remote URL)
    Media(MediaItem),
    /// Arbitrary inline content
    Inline(InlineItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Intrinsic width hint; with `height` it skips image probing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl MarqueeItem {
    pub fn media(src: impl Into<String>) -> Self {
        MarqueeItem::Media(MediaItem {
            src: src.into(),
            alt: None,
            title: None,
            width: None,
            height: None,
            href: None,
        })
    }

    pub fn inline(text: impl Into<String>) -> Self {
        MarqueeItem::Inline(InlineItem {
            text: text.into(),
            aria_label: None,
            title: None,
            href: None,
        })
    }

    /// Set alt text (media) or the accessible label (inline)
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        match &mut self {
            MarqueeItem::Media(m) => m.alt = Some(alt.into()),
            MarqueeItem::Inline(i) => i.aria_label = Some(alt.into()),
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        match &mut self {
            MarqueeItem::Media(m) => m.title = Some(title.into()),
            MarqueeItem::Inline(i) => i.title = Some(title.into()),
        }
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        match &mut self {
            MarqueeItem::Media(m) => m.href = Some(href.into()),
            MarqueeItem::Inline(i) => i.href = Some(href.into()),
        }
        self
    }

    /// Intrinsic pixel size hint for media items
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        if let MarqueeItem::Media(m) = &mut self {
            m.width = Some(width);
            m.height = Some(height);
        }
        self
    }

    pub fn is_media(&self) -> bool {
        matches!(self, MarqueeItem::Media(_))
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            MarqueeItem::Media(m) => m.href.as_deref(),
            MarqueeItem::Inline(i) => i.href.as_deref(),
        }
    }

    /// Accessible name: `aria_label` or `title` for inline content,
    /// `alt` or `title` for media
    pub fn accessible_label(&self) -> Option<&str> {
        let label = match self {
            MarqueeItem::Media(m) => m.alt.as_deref().or(m.title.as_deref()),
            MarqueeItem::Inline(i) => i.aria_label.as_deref().or(i.title.as_deref()),
        };
        label.filter(|l| !l.is_empty())
    }

    /// Label announced for the item's link, if it has one
    pub fn link_label(&self) -> Option<&str> {
        self.href()?;
        Some(self.accessible_label().unwrap_or(FALLBACK_LINK_LABEL))
    }

    /// Text of the floating label shown while the item is hovered
    pub fn tooltip(&self) -> Option<&str> {
        self.accessible_label()
    }

    /// Text drawn on the track
    pub fn display_text(&self) -> &str {
        match self {
            MarqueeItem::Media(m) => m
                .alt
                .as_deref()
                .or(m.title.as_deref())
                .filter(|l| !l.is_empty())
                .unwrap_or("img"),
            MarqueeItem::Inline(i) => &i.text,
        }
    }

    /// Intrinsic size known without loading the image
    pub fn intrinsic_size(&self) -> Option<(u32, u32)> {
        match self {
            MarqueeItem::Media(MediaItem {
                width: Some(w),
                height: Some(h),
                ..
            }) if *w > 0 && *h > 0 => Some((*w, *h)),
            _ => None,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if let Some(href) = self.href() {
            url::Url::parse(href).map_err(|e| {
                crate::Error::Config(format!("invalid link '{}' on item '{}': {}", href, self, e))
            })?;
        }
        if let MarqueeItem::Media(m) = self {
            if m.src.trim().is_empty() {
                return Err(crate::Error::Config("media item without src".into()));
            }
        }
        Ok(())
    }
}

/// Labels announced for a sequence
///
/// Only the first copy is exposed to assistive technology, so this is the
/// full list a screen reader hears.
pub fn accessible_labels(items: &[MarqueeItem]) -> Vec<&str> {
    items
        .iter()
        .filter_map(|item| item.link_label().or(item.accessible_label()))
        .collect()
}

impl fmt::Display for MarqueeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}
