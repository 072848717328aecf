use std::collections::BTreeSet;

use crate::{
    error::{EdgeError, Result},
    types::Grid,
};

use super::RegionId;

/// Per-region attributes, stored in one arena indexed by [`RegionId`].
#[derive(Debug, Clone)]
struct RegionSlot {
    /// Merge target; equal to the slot's own id while the region is canonical
    parent: RegionId,
    /// Pixels assigned to this region and every region merged into it
    members: usize,
    /// Regions seen across a left/top edge, possibly stale after merges
    neighbours: BTreeSet<RegionId>,
}

/// Incremental union-merge labeler over a `width x height` pixel raster.
///
/// Pixels are assigned region ids as the raster is scanned. Adjacent regions
/// can be merged at any time; merged-away ids keep resolving to the region
/// that absorbed them.
#[derive(Debug, Clone)]
pub struct RegionLabeler {
    width: usize,
    height: usize,
    pixels: Vec<Option<RegionId>>,
    regions: Vec<RegionSlot>,
}

impl RegionLabeler {
    /// Create an empty labeler with no regions and no assigned pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
            regions: Vec::new(),
        }
    }

    /// Label a classified grid.
    ///
    /// Scans row-major. A pixel joins its left or top neighbour when they
    /// share its classification. When both match but belong to different
    /// regions, the top region is merged into the left one first.
    pub fn from_grid(grid: &Grid) -> Result<Self> {
        let mut labeler = Self::new(grid.width(), grid.height());
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let value = grid.get(x, y);
                let has_left = x > 0 && grid.get(x - 1, y) == value;
                let has_top = y > 0 && grid.get(x, y - 1) == value;

                let area = match (has_left, has_top) {
                    (true, true) => {
                        let top = labeler.get_area(x, y - 1)?;
                        let left = labeler.get_area(x - 1, y)?;
                        if top == left {
                            left
                        } else {
                            labeler.merge_areas(top, left)?
                        }
                    }
                    (true, false) => labeler.get_area(x - 1, y)?,
                    (false, true) => labeler.get_area(x, y - 1)?,
                    (false, false) => labeler.add_area(),
                };
                labeler.set_area(x, y, area)?;
            }
        }
        Ok(labeler)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of region ids ever allocated, merged-away ones included.
    pub fn area_count(&self) -> usize {
        self.regions.len()
    }

    /// Allocate a fresh canonical region with no members and no neighbours.
    pub fn add_area(&mut self) -> RegionId {
        let id = self.regions.len() as RegionId;
        self.regions.push(RegionSlot {
            parent: id,
            members: 0,
            neighbours: BTreeSet::new(),
        });
        id
    }

    /// Assign pixel `(x, y)` to the canonical region `id`.
    ///
    /// Any already-assigned pixel above or to the left that resolves to a
    /// different region is recorded as a neighbour, in both directions.
    pub fn set_area(&mut self, x: usize, y: usize, id: RegionId) -> Result<()> {
        let index = self.index(x, y)?;
        self.check_id(id)?;
        if self.regions[id as usize].parent != id {
            return Err(EdgeError::StaleIdReuse { id });
        }
        self.pixels[index] = Some(id);

        let above = (y > 0).then(|| self.pixels[index - self.width]).flatten();
        let left = (x > 0).then(|| self.pixels[index - 1]).flatten();
        for raw in [above, left].into_iter().flatten() {
            let other = self.find(raw);
            if other != id {
                self.regions[id as usize].neighbours.insert(other);
                self.regions[other as usize].neighbours.insert(id);
            }
        }

        self.regions[id as usize].members += 1;
        Ok(())
    }

    /// Canonical region of pixel `(x, y)`.
    pub fn get_area(&self, x: usize, y: usize) -> Result<RegionId> {
        let index = self.index(x, y)?;
        match self.pixels[index] {
            Some(raw) => Ok(self.find(raw)),
            None => Err(EdgeError::UnsetAccess { x, y }),
        }
    }

    /// Follow the merge chain of `id` to its canonical region.
    pub fn resolve(&self, id: RegionId) -> Result<RegionId> {
        self.check_id(id)?;
        Ok(self.find(id))
    }

    /// Merge region `from` into region `into` and return the receiving region.
    ///
    /// Member counts and neighbour sets of `from` are folded into `into`.
    /// Afterwards `from`, and anything that resolved to it, resolves to
    /// `into`'s canonical region.
    pub fn merge_areas(&mut self, from: RegionId, into: RegionId) -> Result<RegionId> {
        self.check_id(from)?;
        self.check_id(into)?;
        let source = self.compress(from);
        let target = self.compress(into);
        if source == target {
            return Ok(target);
        }

        let moved = std::mem::take(&mut self.regions[source as usize].neighbours);
        let members = std::mem::take(&mut self.regions[source as usize].members);
        let slot = &mut self.regions[target as usize];
        slot.members += members;
        slot.neighbours.extend(moved);
        self.regions[source as usize].parent = target;
        Ok(target)
    }

    /// Member count of the canonical region `id` resolves to.
    pub fn member_count(&self, id: RegionId) -> Result<usize> {
        let root = self.resolve(id)?;
        Ok(self.regions[root as usize].members)
    }

    /// Canonical neighbours of `id`, sorted and excluding `id`'s own region.
    pub fn neighbours(&self, id: RegionId) -> Result<Vec<RegionId>> {
        let root = self.resolve(id)?;
        let resolved: BTreeSet<RegionId> = self.regions[root as usize]
            .neighbours
            .iter()
            .map(|&n| self.find(n))
            .filter(|&n| n != root)
            .collect();
        Ok(resolved.into_iter().collect())
    }

    /// Neighbour with the most members, `None` if `id` has no neighbours.
    ///
    /// Ties go to the lowest canonical id.
    pub fn get_largest_neighbour_area(&self, id: RegionId) -> Result<Option<RegionId>> {
        let mut best: Option<(RegionId, usize)> = None;
        for neighbour in self.neighbours(id)? {
            let members = self.regions[neighbour as usize].members;
            // neighbours are ascending, so strict comparison keeps the lowest id on ties
            if best.is_none_or(|(_, size)| members > size) {
                best = Some((neighbour, members));
            }
        }
        Ok(best.map(|(neighbour, _)| neighbour))
    }

    /// Whether `id` has not been merged into another region.
    pub fn is_canonical(&self, id: RegionId) -> bool {
        self.regions
            .get(id as usize)
            .is_some_and(|slot| slot.parent == id)
    }

    /// Ids that have not been merged away, in ascending order.
    pub fn canonical_ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter(|(id, slot)| slot.parent as usize == *id)
            .map(|(_, slot)| slot.parent)
    }

    /// Member counts indexed by region id; zero for merged-away ids.
    pub fn region_sizes(&self) -> Vec<usize> {
        self.regions
            .iter()
            .enumerate()
            .map(|(id, slot)| if slot.parent as usize == id { slot.members } else { 0 })
            .collect()
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(EdgeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    fn check_id(&self, id: RegionId) -> Result<()> {
        if id as usize >= self.regions.len() {
            return Err(EdgeError::StructuralDesync {
                id,
                region_count: self.regions.len(),
            });
        }
        Ok(())
    }

    fn find(&self, mut id: RegionId) -> RegionId {
        while self.regions[id as usize].parent != id {
            id = self.regions[id as usize].parent;
        }
        id
    }

    /// `find` that repoints every id on the walked chain straight at the root.
    fn compress(&mut self, id: RegionId) -> RegionId {
        let root = self.find(id);
        let mut current = id;
        while current != root {
            let next = self.regions[current as usize].parent;
            self.regions[current as usize].parent = root;
            current = next;
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_area_is_dense_and_canonical() {
        let mut labeler = RegionLabeler::new(2, 2);
        assert_eq!(labeler.add_area(), 0);
        assert_eq!(labeler.add_area(), 1);
        assert_eq!(labeler.area_count(), 2);
        assert!(labeler.is_canonical(1));
        assert_eq!(labeler.member_count(1).expect("allocated"), 0);
        assert!(labeler.neighbours(1).expect("allocated").is_empty());
    }

    #[test]
    fn test_get_area_before_set_fails() {
        let labeler = RegionLabeler::new(2, 2);
        let err = labeler.get_area(1, 1).expect_err("Unset pixel must fail");
        assert!(matches!(err, EdgeError::UnsetAccess { x: 1, y: 1 }));
    }

    #[test]
    fn test_set_area_with_merged_id_fails() {
        let mut labeler = RegionLabeler::new(2, 1);
        let a = labeler.add_area();
        let b = labeler.add_area();
        labeler.merge_areas(a, b).expect("Should merge");
        let err = labeler.set_area(0, 0, a).expect_err("Stale id must fail");
        assert!(matches!(err, EdgeError::StaleIdReuse { id } if id == a));
    }

    #[test]
    fn test_unknown_id_is_structural_desync() {
        let labeler = RegionLabeler::new(1, 1);
        assert!(matches!(
            labeler.resolve(3),
            Err(EdgeError::StructuralDesync { id: 3, region_count: 0 })
        ));
    }

    #[test]
    fn test_set_area_records_neighbours_both_ways() {
        let mut labeler = RegionLabeler::new(2, 1);
        let a = labeler.add_area();
        let b = labeler.add_area();
        labeler.set_area(0, 0, a).expect("Should set");
        labeler.set_area(1, 0, b).expect("Should set");
        assert_eq!(labeler.neighbours(a).expect("allocated"), vec![b]);
        assert_eq!(labeler.neighbours(b).expect("allocated"), vec![a]);
    }

    #[test]
    fn test_merge_is_transitive() {
        let mut labeler = RegionLabeler::new(3, 1);
        let a = labeler.add_area();
        let b = labeler.add_area();
        let c = labeler.add_area();
        labeler.set_area(0, 0, a).expect("Should set");
        labeler.set_area(1, 0, b).expect("Should set");
        labeler.set_area(2, 0, c).expect("Should set");

        assert_eq!(labeler.merge_areas(a, b).expect("Should merge"), b);
        assert_eq!(labeler.resolve(a).expect("allocated"), b);
        labeler.merge_areas(b, c).expect("Should merge");
        assert_eq!(labeler.resolve(a).expect("allocated"), c);
        assert_eq!(labeler.get_area(0, 0).expect("set"), c);
        assert_eq!(labeler.member_count(c).expect("allocated"), 3);
        assert_eq!(labeler.canonical_ids().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn test_largest_neighbour_prefers_lowest_id_on_tie() {
        // two equally sized regions on either side of a single pixel
        let grid = Grid::from_rows(&["##.##"]).expect("Should parse");
        let labeler = RegionLabeler::from_grid(&grid).expect("Should label");
        let middle = labeler.get_area(2, 0).expect("set");
        let left = labeler.get_area(0, 0).expect("set");
        assert_eq!(
            labeler.get_largest_neighbour_area(middle).expect("allocated"),
            Some(left)
        );
    }

    #[test]
    fn test_ring_and_centre_are_mutual_neighbours() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]).expect("Should parse");
        let labeler = RegionLabeler::from_grid(&grid).expect("Should label");
        let ring = labeler.get_area(0, 0).expect("set");
        let centre = labeler.get_area(1, 1).expect("set");
        assert_ne!(ring, centre);
        assert_eq!(labeler.member_count(ring).expect("allocated"), 8);
        assert_eq!(labeler.member_count(centre).expect("allocated"), 1);
        assert_eq!(labeler.neighbours(ring).expect("allocated"), vec![centre]);
        assert_eq!(labeler.neighbours(centre).expect("allocated"), vec![ring]);
        assert_eq!(labeler.get_largest_neighbour_area(ring).expect("allocated"), Some(centre));
        assert_eq!(labeler.get_largest_neighbour_area(centre).expect("allocated"), Some(ring));
    }

    #[test]
    fn test_u_shape_merges_during_scan() {
        // the two arms start as separate regions and join on the bottom row
        let grid = Grid::from_rows(&["#.#", "#.#", "###"]).expect("Should parse");
        let labeler = RegionLabeler::from_grid(&grid).expect("Should label");
        assert_eq!(labeler.area_count(), 3);
        assert_eq!(labeler.canonical_ids().count(), 2);
        let arm = labeler.get_area(0, 0).expect("set");
        assert_eq!(labeler.get_area(2, 0).expect("set"), arm);
        assert_eq!(labeler.member_count(arm).expect("allocated"), 7);
    }

    proptest! {
        #[test]
        fn prop_merge_resolves_to_receiver(
            merges in proptest::collection::vec((0u32..12, 0u32..12), 0..30),
        ) {
            let mut labeler = RegionLabeler::new(12, 1);
            for x in 0..12 {
                let id = labeler.add_area();
                labeler.set_area(x, 0, id).expect("Should set");
            }
            for (a, b) in merges {
                let expected = labeler.resolve(b).expect("allocated");
                let target = labeler.merge_areas(a, b).expect("Should merge");
                prop_assert_eq!(target, expected);
                prop_assert_eq!(labeler.resolve(a).expect("allocated"), expected);
            }
            let total: usize = labeler
                .canonical_ids()
                .map(|id| labeler.member_count(id).expect("allocated"))
                .sum();
            prop_assert_eq!(total, 12);
        }

        #[test]
        fn prop_every_pixel_resolves_and_counts_match(
            cells in proptest::collection::vec(any::<bool>(), 30),
        ) {
            let grid = Grid::new(6, 5, cells).expect("Should build grid");
            let labeler = RegionLabeler::from_grid(&grid).expect("Should label");
            let mut counts = vec![0usize; labeler.area_count()];
            for y in 0..5 {
                for x in 0..6 {
                    let id = labeler.get_area(x, y).expect("Every pixel is set");
                    prop_assert!(labeler.is_canonical(id));
                    counts[id as usize] += 1;
                }
            }
            prop_assert_eq!(counts, labeler.region_sizes());
        }
    }
}
