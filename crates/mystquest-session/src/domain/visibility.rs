//! The visibility resolver.
//!
//! Pure functions computing which content a player may see at a given
//! moment. A content item is visible when it is tagged with a round in
//! scope AND is either public or bound to the player's character. Content
//! with no round tag is catalog-level and never served here; future rounds
//! never leak. No I/O, no mutation; safe to call concurrently.

use std::collections::HashSet;

use mystquest_catalog::domain::models::{Content, Round};
use uuid::Uuid;

/// Round ids in scope for the "all revealed so far" mode: every round whose
/// `number` is at or below `current_number`.
#[must_use]
pub fn rounds_up_to(rounds: &[Round], current_number: i32) -> HashSet<Uuid> {
    rounds
        .iter()
        .filter(|r| r.number <= current_number)
        .map(|r| r.id)
        .collect()
}

/// Resolves the visible subset of `contents` for a player bound to
/// `character_id` (or unbound), given the rounds in scope.
///
/// The result is the union of public round-tagged content and the player's
/// character-tagged content, ordered by `display_order` ascending with ties
/// keeping input order.
#[must_use]
pub fn resolve<'a>(
    contents: &'a [Content],
    rounds_in_scope: &HashSet<Uuid>,
    character_id: Option<Uuid>,
) -> Vec<&'a Content> {
    let mut visible: Vec<&Content> = contents
        .iter()
        .filter(|c| {
            c.round_id
                .is_some_and(|round_id| rounds_in_scope.contains(&round_id))
        })
        .filter(|c| c.is_public || (c.character_id.is_some() && c.character_id == character_id))
        .collect();
    visible.sort_by_key(|c| c.display_order);
    visible
}
