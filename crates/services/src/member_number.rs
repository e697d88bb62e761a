//! Member number codec.
//!
//! A member number is `initials + order + zero_pad(sequence, 3)`, e.g.
//! `"AB3007"` for initials `AB`, collector order 3, sequence 7. There are no
//! separators, so the string is write-only: it cannot be parsed back into its
//! components unambiguously and nothing in the system attempts to.
//!
//! Uniqueness holds only within a single (initials, order) pair at the moment
//! of generation; no global check is performed.

/// Fallback initials for members without an assigned collector.
pub const UNASSIGNED_INITIALS: &str = "UN";

/// Highest sequence that still fits the fixed 3-digit segment.
pub const MAX_FIXED_WIDTH_SEQUENCE: u32 = 999;

/// Generate a member number. Pure and deterministic.
///
/// Sequences above 999 widen the final segment instead of truncating:
/// `generate("AB", 3, 1000)` is `"AB31000"`. Callers that care about the
/// fixed-width capacity should check [`exceeds_capacity`] and warn; the
/// output itself never loses digits.
pub fn generate(initials: &str, order: u32, sequence: u32) -> String {
    format!("{initials}{order}{sequence:03}")
}

/// True when `sequence` no longer fits the 3-digit segment, making the
/// generated number longer than `initials.len() + digits(order) + 3`.
pub fn exceeds_capacity(sequence: u32) -> bool {
    sequence > MAX_FIXED_WIDTH_SEQUENCE
}

/// Derive collector initials from a free-form name or email: first two
/// characters, uppercased. Empty input falls back to [`UNASSIGNED_INITIALS`].
pub fn initials_from_name(name: &str) -> String {
    let initials: String = name.chars().take(2).collect::<String>().to_uppercase();
    if initials.is_empty() {
        UNASSIGNED_INITIALS.to_string()
    } else {
        initials
    }
}
