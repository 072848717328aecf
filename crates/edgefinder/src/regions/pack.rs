use crate::error::Result;

use super::{RegionId, RegionLabeler};

impl RegionLabeler {
    /// Rebuild the labeling with contiguous canonical ids.
    ///
    /// Pixels are visited row-major; each canonical region receives a fresh id
    /// in the order it is first seen. Member counts and neighbour sets are
    /// recomputed from scratch by the new table.
    pub fn pack_areas(&self) -> Result<RegionLabeler> {
        let mut packed = RegionLabeler::new(self.width(), self.height());
        let mut index_map: Vec<Option<RegionId>> = vec![None; self.area_count()];

        for y in 0..self.height() {
            for x in 0..self.width() {
                let resolved = self.get_area(x, y)?;
                let id = match index_map[resolved as usize] {
                    Some(id) => id,
                    None => {
                        let id = packed.add_area();
                        index_map[resolved as usize] = Some(id);
                        id
                    }
                };
                packed.set_area(x, y, id)?;
            }
        }
        Ok(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;
    use proptest::prelude::*;

    fn snapshot(labeler: &RegionLabeler) -> (Vec<RegionId>, Vec<usize>, Vec<Vec<RegionId>>) {
        let mut ids = Vec::new();
        for y in 0..labeler.height() {
            for x in 0..labeler.width() {
                ids.push(labeler.get_area(x, y).expect("Every pixel is set"));
            }
        }
        let neighbours = labeler
            .canonical_ids()
            .map(|id| labeler.neighbours(id).expect("allocated"))
            .collect();
        (ids, labeler.region_sizes(), neighbours)
    }

    #[test]
    fn test_pack_renumbers_in_first_seen_order() {
        let grid = Grid::from_rows(&["#.#", "#.#", "###"]).expect("Should parse");
        let labeler = RegionLabeler::from_grid(&grid).expect("Should label");
        let packed = labeler.pack_areas().expect("Should pack");

        assert_eq!(packed.area_count(), 2);
        assert_eq!(packed.get_area(0, 0).expect("set"), 0);
        assert_eq!(packed.get_area(1, 0).expect("set"), 1);
        assert_eq!(packed.get_area(2, 0).expect("set"), 0);
        assert_eq!(packed.region_sizes(), vec![7, 2]);
    }

    #[test]
    fn test_uniform_grid_packs_to_single_region() {
        let grid = Grid::from_fn(7, 4, |_, _| true).expect("Should build grid");
        let packed = RegionLabeler::from_grid(&grid)
            .and_then(|labeler| labeler.pack_areas())
            .expect("Should pack");
        assert_eq!(packed.area_count(), 1);
        assert_eq!(packed.member_count(0).expect("allocated"), 28);
        assert!(packed.neighbours(0).expect("allocated").is_empty());
    }

    #[test]
    fn test_three_row_grid_packs_to_two_regions() {
        let width = 5;
        let grid = Grid::from_fn(width, 3, |_, y| y == 0).expect("Should build grid");
        let packed = RegionLabeler::from_grid(&grid)
            .and_then(|labeler| labeler.pack_areas())
            .expect("Should pack");
        assert_eq!(packed.region_sizes(), vec![width, 2 * width]);
    }

    proptest! {
        #[test]
        fn prop_pack_is_idempotent(cells in proptest::collection::vec(any::<bool>(), 48)) {
            let grid = Grid::new(8, 6, cells).expect("Should build grid");
            let packed = RegionLabeler::from_grid(&grid)
                .and_then(|labeler| labeler.pack_areas())
                .expect("Should pack");
            let repacked = packed.pack_areas().expect("Should repack");
            prop_assert_eq!(packed.area_count(), packed.canonical_ids().count());
            prop_assert_eq!(snapshot(&packed), snapshot(&repacked));
        }
    }
}
