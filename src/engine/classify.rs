//! Priority-ordered event classification.

use crate::event::EventType;
use crate::geometry::BBox;

/// Per-person state derived within one cycle. Never persisted and never
/// carried across cycles; there is no cross-frame identity.
#[derive(Clone, Copy, Debug)]
pub struct PersonState {
    pub bbox: BBox,
    pub has_helmet: bool,
    pub has_harness: bool,
    pub in_perimeter: bool,
}

impl PersonState {
    fn ppe_compliant(&self) -> bool {
        self.has_helmet && self.has_harness
    }
}

/// Classifies one person's cycle state, first matching branch wins:
///
/// 1. in perimeter, PPE incomplete → `CriticalViolation`
/// 2. in perimeter, PPE complete → `PerimeterIntrusion`
/// 3. outside, PPE incomplete → `EpiMissing`
/// 4. outside, PPE complete → no event
///
/// Total and deterministic over the three flags; the branches are
/// exhaustive and mutually exclusive. Stateless: a person still in
/// violation next cycle produces a fresh event (debouncing, if wanted, is
/// a layer above the engine).
pub fn classify(state: &PersonState) -> Option<EventType> {
    if state.in_perimeter && !state.ppe_compliant() {
        Some(EventType::CriticalViolation)
    } else if state.in_perimeter {
        Some(EventType::PerimeterIntrusion)
    } else if !state.ppe_compliant() {
        Some(EventType::EpiMissing)
    } else {
        None
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn state(in_perimeter: bool, has_helmet: bool, has_harness: bool) -> PersonState {
        PersonState {
            bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
            has_helmet,
            has_harness,
            in_perimeter,
        }
    }

    #[test]
    fn truth_table_covers_all_eight_combinations() {
        use EventType::*;
        let expected = [
            // (in_perimeter, has_helmet, has_harness) -> outcome
            (false, false, false, Some(EpiMissing)),
            (false, false, true, Some(EpiMissing)),
            (false, true, false, Some(EpiMissing)),
            (false, true, true, None),
            (true, false, false, Some(CriticalViolation)),
            (true, false, true, Some(CriticalViolation)),
            (true, true, false, Some(CriticalViolation)),
            (true, true, true, Some(PerimeterIntrusion)),
        ];
        for (inside, helmet, harness, outcome) in expected {
            assert_eq!(
                classify(&state(inside, helmet, harness)),
                outcome,
                "in_perimeter={} has_helmet={} has_harness={}",
                inside,
                helmet,
                harness
            );
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let s = state(true, true, false);
        assert_eq!(classify(&s), classify(&s));
    }
}
