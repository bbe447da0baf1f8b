//! crates/protocol/src/label.rs
//!
//! Compact textual labels for state sequences, suitable for use inside file
//! names.

use std::fmt::Write as _;

/// Label length beyond which the remaining codes are summarised.
pub const LABEL_LIMIT: usize = 150;

/// Renders `codes` as a dash-separated decimal label.
///
/// Every code is followed by `-` except the final element of the sequence. A
/// code equal to both of its predecessors is skipped, so runs of repeated
/// states collapse to two entries. Once the label grows past
/// [`LABEL_LIMIT`] characters while codes remain, `end-at-<last code>` is
/// appended and rendering stops.
///
/// When the final element itself is skipped the label keeps the dash left by
/// the previous entry. An empty slice renders as an empty string.
///
/// # Examples
///
/// ```
/// use protocol::state_sequence_to_label;
///
/// assert_eq!(state_sequence_to_label(&[0, 220, 331, 230]), "0-220-331-230");
/// assert_eq!(state_sequence_to_label(&[0, 5, 5, 5, 5, 7]), "0-5-5-7");
/// ```
#[must_use]
pub fn state_sequence_to_label(codes: &[u32]) -> String {
    let mut label = String::new();
    let Some(&last) = codes.last() else {
        return label;
    };
    let final_index = codes.len() - 1;

    for (index, &code) in codes.iter().enumerate() {
        if index >= 2 && code == codes[index - 1] && code == codes[index - 2] {
            continue;
        }

        // Writing into a String cannot fail.
        let _ = if index == final_index {
            write!(label, "{code}")
        } else {
            write!(label, "{code}-")
        };

        if label.len() > LABEL_LIMIT && index < final_index {
            let _ = write!(label, "end-at-{last}");
            break;
        }
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_codes_with_dashes() {
        assert_eq!(state_sequence_to_label(&[0, 230]), "0-230");
        assert_eq!(state_sequence_to_label(&[0]), "0");
    }

    #[test]
    fn empty_sequence_is_empty_label() {
        assert_eq!(state_sequence_to_label(&[]), "");
    }

    #[test]
    fn runs_collapse_to_two_entries() {
        assert_eq!(state_sequence_to_label(&[0, 5, 5, 5, 5, 7]), "0-5-5-7");
        assert_eq!(state_sequence_to_label(&[1, 1, 1, 2]), "1-1-2");
    }

    #[test]
    fn skipped_final_code_keeps_trailing_dash() {
        assert_eq!(state_sequence_to_label(&[0, 3, 3, 3]), "0-3-3-");
    }

    #[test]
    fn long_sequences_are_truncated_with_last_code() {
        let codes: Vec<u32> = (1000..1100).collect();
        let label = state_sequence_to_label(&codes);

        assert!(label.ends_with("end-at-1099"));
        let cut = label.len() - "end-at-1099".len();
        assert!(cut > LABEL_LIMIT);
        // Each rendered element is "NNNN-", so the cut lands right after the
        // first element that crossed the limit.
        assert_eq!(cut, 155);
        assert!(label[..cut].ends_with('-'));
    }

    #[test]
    fn sequence_ending_exactly_at_limit_is_not_truncated() {
        // 31 four-digit codes: 30 * 5 + 4 = 154 characters, but the limit is
        // only checked while codes remain.
        let codes: Vec<u32> = (1000..1031).collect();
        let label = state_sequence_to_label(&codes);
        assert!(!label.contains("end-at"));
        assert!(label.ends_with("1030"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let codes = [0, 200, 200, 404, 404, 404, 500];
        assert_eq!(
            state_sequence_to_label(&codes),
            state_sequence_to_label(&codes)
        );
        assert_eq!(state_sequence_to_label(&codes), "0-200-200-404-404-500");
    }
}
