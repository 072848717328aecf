use std::collections::BTreeSet;

use crate::{error::Result, regions::RegionLabeler, types::Point};

/// Boundary points of one region, ordered by [`Point`]'s `x`-then-`y` order.
pub type BoundaryPointSet = BTreeSet<Point>;

/// Collects, per region, the pixels that sit on a transition to another region.
///
/// Only left and top neighbours are compared, matching the adjacency the
/// labeling scan uses. Each side of a transition records its own pixel.
#[derive(Debug, Clone, Default)]
pub struct BoundaryExtractor;

impl BoundaryExtractor {
    /// Boundary sets indexed by region id of a packed labeling.
    pub fn extract(&self, regions: &RegionLabeler) -> Result<Vec<BoundaryPointSet>> {
        let mut boundaries = vec![BoundaryPointSet::new(); regions.area_count()];

        for y in 0..regions.height() {
            for x in 0..regions.width() {
                let own = regions.get_area(x, y)?;
                let here = Point::new(x as i32, y as i32);

                if x > 0 {
                    let left = regions.get_area(x - 1, y)?;
                    if left != own {
                        boundaries[own as usize].insert(here);
                        boundaries[left as usize].insert(Point::new(x as i32 - 1, y as i32));
                    }
                }
                if y > 0 {
                    let top = regions.get_area(x, y - 1)?;
                    if top != own {
                        boundaries[own as usize].insert(here);
                        boundaries[top as usize].insert(Point::new(x as i32, y as i32 - 1));
                    }
                }
            }
        }
        Ok(boundaries)
    }
}
