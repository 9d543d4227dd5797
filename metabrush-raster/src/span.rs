//! Horizontal pixel spans.

use metabrush_graphics::types::Color;

/// A horizontal run of pixels on one scanline, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x_start: i32,
    pub x_end: i32,
    pub y: i32,
    pub color: Color,
}

/// An ordered collection of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanList {
    pub spans: Vec<Span>,
}

impl SpanList {
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Add a span, dropping inverted ones (`x_start > x_end`).
    pub fn push(&mut self, span: Span) {
        if span.x_start <= span.x_end {
            self.spans.push(span);
        }
    }

    /// Sort by scanline then start, and merge runs on the same scanline
    /// that overlap or touch. The earlier span's color wins for merged
    /// runs.
    pub fn merge(&mut self) {
        if self.spans.len() <= 1 {
            return;
        }
        self.spans.sort_unstable_by_key(|s| (s.y, s.x_start));

        let mut write = 0;
        for read in 1..self.spans.len() {
            let next = self.spans[read];
            let current = &mut self.spans[write];

            if current.y == next.y && current.x_end >= next.x_start - 1 {
                current.x_end = current.x_end.max(next.x_end);
            } else {
                write += 1;
                self.spans[write] = next;
            }
        }
        self.spans.truncate(write + 1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn span(x_start: i32, x_end: i32, y: i32) -> Span {
        Span {
            x_start,
            x_end,
            y,
            color: Color::BLACK,
        }
    }

    #[test]
    fn push_drops_inverted() {
        let mut list = SpanList::new();
        list.push(span(5, 3, 0));
        assert!(list.is_empty());
        list.push(span(3, 3, 0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn merge_joins_overlapping_spans() {
        let mut list = SpanList::new();
        list.push(span(0, 4, 1));
        list.push(span(3, 8, 1));
        list.merge();
        assert_eq!(list.spans, vec![span(0, 8, 1)]);
    }

    #[test]
    fn merge_joins_touching_spans() {
        let mut list = SpanList::new();
        list.push(span(5, 6, 0));
        list.push(span(0, 4, 0));
        list.merge();
        assert_eq!(list.spans, vec![span(0, 6, 0)]);
    }

    #[test]
    fn merge_keeps_separate_scanlines() {
        let mut list = SpanList::new();
        list.push(span(0, 4, 1));
        list.push(span(0, 4, 0));
        list.merge();
        assert_eq!(list.spans, vec![span(0, 4, 0), span(0, 4, 1)]);
    }

    #[test]
    fn merge_keeps_gapped_spans() {
        let mut list = SpanList::new();
        list.push(span(0, 2, 0));
        list.push(span(4, 6, 0));
        list.merge();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn merge_contained_span() {
        let mut list = SpanList::new();
        list.push(span(0, 10, 0));
        list.push(span(2, 5, 0));
        list.merge();
        assert_eq!(list.spans, vec![span(0, 10, 0)]);
    }
}
