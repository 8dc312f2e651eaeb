//! Text comparison helpers

use std::cmp::Ordering;

/// Order two display strings the way a human-facing listing expects
///
/// Case is ignored first; the raw comparison only breaks ties so the
/// ordering stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}
