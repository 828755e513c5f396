use super::grammar::{actual_payload, expected_payload};
use super::model::MismatchPair;

/// Best-effort extraction of the `actual: ` / `expected: ` pair from a block.
///
/// Returns `None` when either marker is missing; the caller keeps the block's message.
pub fn extract_mismatch(block: &str) -> Option<MismatchPair> {
    let actual = actual_payload(block)?;
    let expected = expected_payload(block)?;
    Some(MismatchPair {
        actual: actual.to_string(),
        expected: expected.to_string(),
    })
}

/// Index of the first differing char within the overlapping range of both strings.
///
/// When the overlap holds no difference the result is `len(actual) - 1`, which is `-1` for an
/// empty `actual`. Callers must not read that value as "identical".
pub fn divergence_index(actual: &str, expected: &str) -> isize {
    actual
        .chars()
        .zip(expected.chars())
        .position(|(a, e)| a != e)
        .map(|i| i as isize)
        .unwrap_or_else(|| actual.chars().count() as isize - 1)
}

impl MismatchPair {
    pub fn divergence(&self) -> isize {
        divergence_index(&self.actual, &self.expected)
    }
}
