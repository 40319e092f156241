//! PPE-to-person association.
//!
//! A protective-equipment detection counts as worn by a person when the
//! center of the equipment's bounding box falls inside the person's box
//! (boundary inclusive). This is a containment heuristic: a helmet or
//! harness is detected with its center roughly over the wearer's torso.
//! It is an existence test, not an assignment — the first match in input
//! order satisfies it, there is no proximity or confidence tie-break, and
//! one equipment detection may satisfy several overlapping persons.

use crate::detect::Detection;
use crate::geometry::BBox;

/// True when at least one equipment detection's bbox center lies inside
/// the person's bbox. Brute force over the equipment list; per-cycle
/// detection counts are small, so O(P×E) is acceptable.
pub fn is_wearing(person: &BBox, equipment: &[Detection]) -> bool {
    equipment.iter().any(|item| person.contains(item.bbox.center()))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
