//! Track planning for the render driver
//!
//! Copies of the sequence sit side by side on a horizontal track; the track
//! is shifted by the current transform and only the items intersecting the
//! viewport are handed to the renderer.

use std::fmt;

/// Horizontal translation applied to the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// No width measured yet; the track is left where it is
    Untransformed,
    /// Shift by `x` units (negative moves content left)
    Translate(f64),
}

impl Transform {
    /// Neutral transform used while motion is reduced
    pub const NEUTRAL: Transform = Transform::Translate(0.0);

    #[inline]
    pub fn translate_x(&self) -> f64 {
        match self {
            Transform::Untransformed => 0.0,
            Transform::Translate(x) => *x,
        }
    }
}

/// Identifies one rendered item: copy index and item index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub copy: usize,
    pub item: usize,
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.copy, self.item)
    }
}

/// An item positioned relative to the left edge of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedItem {
    pub key: ItemKey,
    /// Left edge in columns; negative when partially scrolled out
    pub x: i32,
    pub width: u16,
    /// Every copy but the first is hidden from assistive technology
    pub aria_hidden: bool,
}

impl PlacedItem {
    /// Whether viewport column `col` falls on this item
    #[inline]
    pub fn contains(&self, col: i32) -> bool {
        col >= self.x && col < self.x + self.width as i32
    }

    /// Visible column range `[start, end)` clipped to `viewport`
    pub fn visible_span(&self, viewport: u16) -> Option<(u16, u16)> {
        let start = self.x.max(0);
        let end = (self.x + self.width as i32).min(viewport as i32);
        if start >= end {
            return None;
        }
        Some((start as u16, end as u16))
    }
}

/// Widths of the items in one sequence plus the gap after each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackPlan {
    item_widths: Vec<u16>,
    gap: u16,
}

impl TrackPlan {
    pub fn new(item_widths: Vec<u16>, gap: u16) -> Self {
        Self { item_widths, gap }
    }

    #[inline]
    pub fn item_widths(&self) -> &[u16] {
        &self.item_widths
    }

    #[inline]
    pub fn gap(&self) -> u16 {
        self.gap
    }

    /// Width of one copy, trailing gap included
    pub fn sequence_width(&self) -> u32 {
        self.item_widths
            .iter()
            .map(|w| *w as u32 + self.gap as u32)
            .sum()
    }

    /// Items of the first `copy_count` copies visible in `viewport` columns
    pub fn place(&self, copy_count: usize, transform: Transform, viewport: u16) -> Vec<PlacedItem> {
        let seq = self.sequence_width() as i64;
        if seq == 0 || viewport == 0 {
            return Vec::new();
        }

        let shift = transform.translate_x().round() as i64;
        let viewport = viewport as i64;
        let mut placed = Vec::new();

        for copy in 0..copy_count {
            let copy_start = copy as i64 * seq + shift;
            if copy_start >= viewport {
                break;
            }
            if copy_start + seq <= 0 {
                continue;
            }

            let mut x = copy_start;
            for (item, width) in self.item_widths.iter().enumerate() {
                let w = *width as i64;
                if w > 0 && x + w > 0 && x < viewport {
                    placed.push(PlacedItem {
                        key: ItemKey { copy, item },
                        x: x as i32,
                        width: *width,
                        aria_hidden: copy > 0,
                    });
                }
                x += w + self.gap as i64;
            }
        }

        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> TrackPlan {
        // sequence: [5][gap 2][3][gap 2] = 12 columns
        TrackPlan::new(vec![5, 3], 2)
    }

    #[test]
    fn test_sequence_width_includes_gaps() {
        assert_eq!(plan().sequence_width(), 12);
        assert_eq!(TrackPlan::new(vec![], 4).sequence_width(), 0);
    }

    #[test]
    fn test_place_without_shift() {
        let placed = plan().place(2, Transform::Untransformed, 20);
        let xs: Vec<(String, i32)> = placed.iter().map(|p| (p.key.to_string(), p.x)).collect();
        assert_eq!(
            xs,
            vec![
                ("0-0".to_string(), 0),
                ("0-1".to_string(), 7),
                ("1-0".to_string(), 12),
                ("1-1".to_string(), 19),
            ]
        );
        assert!(!placed[0].aria_hidden);
        assert!(placed[2].aria_hidden);
    }

    #[test]
    fn test_place_with_shift_clips_left() {
        let placed = plan().place(3, Transform::Translate(-6.0), 12);
        assert_eq!(placed[0].key, ItemKey { copy: 0, item: 1 });
        assert_eq!(placed[0].x, 1);
        assert_eq!(placed[1].key, ItemKey { copy: 1, item: 0 });
        assert_eq!(placed[1].x, 6);
    }

    #[test]
    fn test_copies_beyond_count_are_blank() {
        let placed = plan().place(1, Transform::Untransformed, 40);
        assert!(placed.iter().all(|p| p.key.copy == 0));
    }

    #[test]
    fn test_visible_span_and_contains() {
        let item = PlacedItem {
            key: ItemKey { copy: 0, item: 0 },
            x: -2,
            width: 5,
            aria_hidden: false,
        };
        assert_eq!(item.visible_span(10), Some((0, 3)));
        assert!(item.contains(2));
        assert!(!item.contains(3));
    }
}
