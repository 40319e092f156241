//! Confidence filtering and class partitioning of a raw detection batch.

use crate::detect::{Detection, DetectionBatch};

/// Maps model class ids onto the three roles the engine cares about.
///
/// The mapping is deployment configuration, not a constant: custom-trained
/// models assign ids in whatever order the training labels used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassMap {
    pub person: i64,
    pub helmet: i64,
    pub harness: i64,
}

impl Default for ClassMap {
    fn default() -> Self {
        Self {
            person: 0,
            helmet: 1,
            harness: 2,
        }
    }
}

/// A detection batch partitioned into the three recognized groups.
///
/// Derived fresh every cycle. Each kept detection lands in exactly one
/// group; detections below the confidence floor or with an unrecognized
/// class id appear in none. Input order is preserved within each group.
#[derive(Clone, Debug, Default)]
pub struct ClassifiedDetections {
    pub persons: Vec<Detection>,
    pub helmets: Vec<Detection>,
    pub harnesses: Vec<Detection>,
}

impl ClassifiedDetections {
    /// Applies the strict confidence floor `score >= min_conf` and splits
    /// the survivors by class. The input batch is not mutated. An empty
    /// result is a valid outcome that simply yields zero events downstream.
    pub fn partition(batch: &DetectionBatch, min_conf: f32, classes: ClassMap) -> Self {
        let mut out = Self::default();
        for det in &batch.detections {
            if det.score < min_conf {
                continue;
            }
            if det.class_id == classes.person {
                out.persons.push(*det);
            } else if det.class_id == classes.helmet {
                out.helmets.push(*det);
            } else if det.class_id == classes.harness {
                out.harnesses.push(*det);
            }
            // Any other class id is silently dropped.
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.helmets.is_empty() && self.harnesses.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    fn det(class_id: i64, score: f32) -> Detection {
        Detection {
            bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
            score,
            class_id,
        }
    }

    #[test]
    fn filter_is_a_strict_confidence_floor() {
        let batch = DetectionBatch {
            detections: vec![det(0, 0.49), det(0, 0.5), det(0, 0.51)],
        };
        let parts = ClassifiedDetections::partition(&batch, 0.5, ClassMap::default());
        let scores: Vec<f32> = parts.persons.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.5, 0.51]);
    }

    #[test]
    fn partition_routes_each_detection_to_one_group() {
        let batch = DetectionBatch {
            detections: vec![det(1, 0.9), det(0, 0.9), det(2, 0.9), det(0, 0.8)],
        };
        let parts = ClassifiedDetections::partition(&batch, 0.5, ClassMap::default());
        assert_eq!(parts.persons.len(), 2);
        assert_eq!(parts.helmets.len(), 1);
        assert_eq!(parts.harnesses.len(), 1);
    }

    #[test]
    fn partition_preserves_input_order() {
        let batch = DetectionBatch {
            detections: vec![det(0, 0.7), det(0, 0.9), det(0, 0.6)],
        };
        let parts = ClassifiedDetections::partition(&batch, 0.5, ClassMap::default());
        let scores: Vec<f32> = parts.persons.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.7, 0.9, 0.6]);
    }

    #[test]
    fn unrecognized_class_ids_are_dropped() {
        let batch = DetectionBatch {
            detections: vec![det(7, 0.99), det(-1, 0.99)],
        };
        let parts = ClassifiedDetections::partition(&batch, 0.5, ClassMap::default());
        assert!(parts.is_empty());
    }

    #[test]
    fn custom_class_map_is_honored() {
        let classes = ClassMap {
            person: 5,
            helmet: 3,
            harness: 9,
        };
        let batch = DetectionBatch {
            detections: vec![det(5, 0.9), det(3, 0.9), det(9, 0.9), det(0, 0.9)],
        };
        let parts = ClassifiedDetections::partition(&batch, 0.5, classes);
        assert_eq!(parts.persons.len(), 1);
        assert_eq!(parts.helmets.len(), 1);
        assert_eq!(parts.harnesses.len(), 1);
    }

    #[test]
    fn empty_batch_partitions_to_empty() {
        let parts =
            ClassifiedDetections::partition(&DetectionBatch::default(), 0.5, ClassMap::default());
        assert!(parts.is_empty());
    }
}
