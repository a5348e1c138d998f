use serde::Serialize;

use crate::segment::flood::Slot;

/// What a slot gets filled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "photo", rename_all = "snake_case")]
pub enum SlotFill {
    /// Photo at this index of the request's photo list.
    Photo(usize),
    /// Neutral placeholder color.
    Placeholder,
}

/// Pairing of one slot with its fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    /// Slot discovery index.
    pub slot: usize,
    /// Fill for that slot.
    pub fill: SlotFill,
}

/// Pair slot `i` with photo `i` while both exist; remaining slots become placeholders and
/// excess photos are ignored.
pub fn assign_photos(slots: &[Slot], photo_count: usize) -> Vec<SlotAssignment> {
    slots
        .iter()
        .map(|slot| SlotAssignment {
            slot: slot.index,
            fill: if slot.index < photo_count {
                SlotFill::Photo(slot.index)
            } else {
                SlotFill::Placeholder
            },
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/assign.rs"]
mod tests;
