use crate::types::coord_distance;

/// Drops polylines that retrace an edge already kept from the other side.
///
/// The first point of every kept line becomes a marker. A later line with any
/// point closer than `epsilon` to a marker is treated as a duplicate.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    epsilon: f64,
    markers: Vec<[f64; 2]>,
    removed: usize,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Deduplicator {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            markers: Vec::new(),
            removed: 0,
        }
    }

    /// Returns `true` and records a marker when `line` should be kept.
    pub fn admit(&mut self, line: &[[f64; 2]]) -> bool {
        let Some(first) = line.first() else {
            return false;
        };
        let duplicate = line.iter().any(|point| {
            self.markers
                .iter()
                .any(|marker| coord_distance(point, marker) < self.epsilon)
        });
        if duplicate {
            self.removed += 1;
            return false;
        }
        self.markers.push(*first);
        true
    }

    /// Lines rejected so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn markers(&self) -> &[[f64; 2]] {
        &self.markers
    }
}
