//! Block segmentation: merging contiguous same-label intervals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::interval::LogInterval;

/// Maximal run of depth-contiguous intervals sharing one label in one log.
///
/// Adjacent blocks in the same log never share a label across a continuous
/// depth boundary; they would have merged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoricalBlock {
    pub log: String,
    pub start: f64,
    pub end: f64,
    pub label: String,
}

impl CategoricalBlock {
    /// Depth extent of the block.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the block is tall enough (and meaningfully labeled) to carry
    /// a centered text label. Thin slivers, blank labels, and the undefined
    /// sentinel stay untitled.
    pub fn shows_label(&self, min_label_height: f64, undefined_sentinel: &str) -> bool {
        let label = self.label.trim();
        self.span() >= min_label_height
            && !label.is_empty()
            && !label.eq_ignore_ascii_case(undefined_sentinel)
    }
}

/// Merges a sorted interval sequence into maximal contiguous blocks.
///
/// Scan left to right: extend the open block while the next interval carries
/// the same label and its start equals the block end exactly; any gap or
/// label change closes the block. Degenerate intervals (non-finite bounds or
/// `start >= end`) never open or extend a block.
pub fn segment_blocks(log: &str, intervals: &[LogInterval]) -> Vec<CategoricalBlock> {
    let mut blocks: Vec<CategoricalBlock> = Vec::new();
    for iv in intervals {
        if !iv.start.is_finite() || !iv.end.is_finite() || iv.start >= iv.end {
            continue;
        }
        match blocks.last_mut() {
            Some(open) if open.label == iv.label && open.end == iv.start => {
                open.end = iv.end;
            }
            _ => blocks.push(CategoricalBlock {
                log: log.to_string(),
                start: iv.start,
                end: iv.end,
                label: iv.label.clone(),
            }),
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: f64, end: f64, label: &str) -> LogInterval {
        LogInterval {
            start,
            end,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_contiguous_same_label_merges() {
        let blocks = segment_blocks("Lithology", &[iv(0.0, 3.0, "A"), iv(3.0, 7.0, "A")]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, 0.0);
        assert_eq!(blocks[0].end, 7.0);
    }

    #[test]
    fn test_gap_splits_block() {
        let blocks = segment_blocks(
            "Lithology",
            &[iv(0.0, 3.0, "A"), iv(3.0, 7.0, "A"), iv(8.0, 10.0, "A")],
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].start, blocks[0].end), (0.0, 7.0));
        assert_eq!((blocks[1].start, blocks[1].end), (8.0, 10.0));
    }

    #[test]
    fn test_label_change_splits_block() {
        let blocks = segment_blocks("Lithology", &[iv(0.0, 3.0, "A"), iv(3.0, 5.0, "B")]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].label, "A");
        assert_eq!(blocks[1].label, "B");
    }

    #[test]
    fn test_zero_length_interval_never_merges() {
        let blocks = segment_blocks(
            "Lithology",
            &[iv(0.0, 5.0, "Granite"), iv(5.0, 5.0, "Granite")],
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].end, 5.0);
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(segment_blocks("Lithology", &[]).is_empty());
    }

    #[test]
    fn test_segmentation_is_idempotent_and_span_preserving() {
        let input = [
            iv(0.0, 1.5, "A"),
            iv(1.5, 2.0, "A"),
            iv(2.0, 4.0, "B"),
            iv(4.5, 6.0, "B"),
            iv(6.0, 6.0, "B"),
        ];
        let first = segment_blocks("L", &input);
        let second = segment_blocks("L", &input);
        assert_eq!(first, second);

        // Blocks are ordered, non-overlapping, and cover exactly the union of
        // the valid input spans.
        let valid_span: f64 = input
            .iter()
            .filter(|iv| iv.start < iv.end)
            .map(|iv| iv.end - iv.start)
            .sum();
        let block_span: f64 = first.iter().map(CategoricalBlock::span).sum();
        assert!((valid_span - block_span).abs() < f64::EPSILON);
        for pair in first.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_label_visibility_threshold() {
        let tall = CategoricalBlock {
            log: "L".into(),
            start: 0.0,
            end: 2.0,
            label: "Basalt".into(),
        };
        let thin = CategoricalBlock {
            end: 0.4,
            ..tall.clone()
        };
        let sentinel = CategoricalBlock {
            label: "Undefined".into(),
            ..tall.clone()
        };
        assert!(tall.shows_label(1.0, "undefined"));
        assert!(!thin.shows_label(1.0, "undefined"));
        assert!(!sentinel.shows_label(1.0, "undefined"));
    }
}
