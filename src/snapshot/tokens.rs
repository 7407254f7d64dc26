//! Rough language-model token counts for display.
//!
//! English text and source code average about four characters per token with
//! the common BPE vocabularies, which is close enough for a size hint.

const CHARS_PER_TOKEN: u64 = 4;

/// Texts larger than this are not counted; the response omits estimates.
pub const MAX_ESTIMATED_BYTES: usize = 256 * 1024 * 1024;

/// Approximate token count, or `None` if the text is too large to count.
pub fn estimate(text: &str) -> Option<u64> {
    estimate_within(text, MAX_ESTIMATED_BYTES)
}

pub fn estimate_within(text: &str, max_bytes: usize) -> Option<u64> {
    if text.len() > max_bytes {
        return None;
    }
    let chars = u64::try_from(text.chars().count()).ok()?;
    Some(chars.div_ceil(CHARS_PER_TOKEN))
}
