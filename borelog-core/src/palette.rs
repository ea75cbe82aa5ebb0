//! Deterministic solid-color assignment for categorical bands.
//!
//! Color is a pure function of the log's sorted-unique-label set, so the same
//! label always fills with the same color within one run and tests can assert
//! assignments without any UI state.

use crate::interval::LogInterval;

/// Fixed band fill palette (RGB). Cycles once exhausted.
pub const BAND_PALETTE: [[u8; 3]; 12] = [
    [0x8d, 0x6e, 0x63], // brown
    [0xff, 0xb7, 0x4d], // amber
    [0x90, 0xa4, 0xae], // blue-grey
    [0xa5, 0xd6, 0xa7], // pale green
    [0xce, 0x93, 0xd8], // lilac
    [0xff, 0x8a, 0x65], // terracotta
    [0x81, 0xd4, 0xfa], // sky
    [0xbc, 0xaa, 0xa4], // taupe
    [0xff, 0xf1, 0x76], // straw
    [0x80, 0xcb, 0xc4], // teal
    [0xef, 0x9a, 0x9a], // rose
    [0xc5, 0xe1, 0xa5], // olive
];

/// Sorted, de-duplicated label set for one log's intervals.
pub fn sorted_unique_labels(intervals: &[LogInterval]) -> Vec<String> {
    let mut labels: Vec<String> = intervals.iter().map(|iv| iv.label.clone()).collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Deterministic fill color for `label` within its log's label set.
///
/// The palette index is the label's position in the sorted-unique set, modulo
/// the palette length. Labels absent from the set fall back to index zero.
pub fn band_color(sorted_labels: &[String], label: &str) -> [u8; 3] {
    let index = sorted_labels
        .binary_search_by(|l| l.as_str().cmp(label))
        .unwrap_or(0);
    BAND_PALETTE[index % BAND_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(label: &str) -> LogInterval {
        LogInterval {
            start: 0.0,
            end: 1.0,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_labels_sorted_and_unique() {
        let labels = sorted_unique_labels(&[iv("Shale"), iv("Basalt"), iv("Shale")]);
        assert_eq!(labels, vec!["Basalt".to_string(), "Shale".to_string()]);
    }

    #[test]
    fn test_color_is_stable_per_label() {
        let labels = vec!["Basalt".to_string(), "Granite".to_string(), "Shale".to_string()];
        assert_eq!(band_color(&labels, "Basalt"), BAND_PALETTE[0]);
        assert_eq!(band_color(&labels, "Granite"), BAND_PALETTE[1]);
        assert_eq!(band_color(&labels, "Shale"), BAND_PALETTE[2]);
        // Repeat lookups never drift.
        assert_eq!(band_color(&labels, "Shale"), band_color(&labels, "Shale"));
    }

    #[test]
    fn test_palette_cycles_on_exhaustion() {
        let labels: Vec<String> = (0..BAND_PALETTE.len() + 2)
            .map(|i| format!("L{i:02}"))
            .collect();
        assert_eq!(band_color(&labels, "L12"), BAND_PALETTE[0]);
        assert_eq!(band_color(&labels, "L13"), BAND_PALETTE[1]);
    }
}
