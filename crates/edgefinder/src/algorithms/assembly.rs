use std::collections::VecDeque;

use tracing::{debug, info};

use crate::{
    error::{EdgeError, Result},
    types::{Point, Polyline},
};

use super::boundary::BoundaryPointSet;

/// Neighbour offsets probed from every point: left, top, right, bottom,
/// then the diagonals clockwise from top-left.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (1, -1),
    (1, 1),
    (-1, 1),
];

/// Point sequence that can be reversed in O(1).
#[derive(Debug, Default)]
struct Strand {
    points: VecDeque<Point>,
    reversed: bool,
}

impl Strand {
    fn single(point: Point) -> Self {
        Self {
            points: VecDeque::from([point]),
            reversed: false,
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    /// Head and tail, `None` for an empty strand.
    fn ends(&self) -> Option<(Point, Point)> {
        let (first, last) = (*self.points.front()?, *self.points.back()?);
        Some(if self.reversed { (last, first) } else { (first, last) })
    }

    fn reverse(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    fn push_head(&mut self, point: Point) {
        if self.reversed {
            self.points.push_back(point);
        } else {
            self.points.push_front(point);
        }
    }

    fn push_tail(&mut self, point: Point) {
        if self.reversed {
            self.points.push_front(point);
        } else {
            self.points.push_back(point);
        }
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = Point> + '_> {
        if self.reversed {
            Box::new(self.points.iter().rev().copied())
        } else {
            Box::new(self.points.iter().copied())
        }
    }

    /// `front` followed by `back`, copying whichever strand is shorter.
    fn concat(mut front: Strand, mut back: Strand) -> Strand {
        if front.len() >= back.len() {
            for point in back.iter() {
                front.push_tail(point);
            }
            front
        } else {
            for point in front.iter().rev() {
                back.push_head(point);
            }
            back
        }
    }

    /// Join `child` onto `parent` across the closest pair of endpoints.
    ///
    /// Pairings are tried as (parent tail, child head), (parent tail, child
    /// tail), (parent head, child tail), (parent head, child head); the first
    /// minimum wins.
    fn stitch(parent: Strand, child: Strand) -> Strand {
        let (Some((parent_head, parent_tail)), Some((child_head, child_tail))) =
            (parent.ends(), child.ends())
        else {
            return Strand::concat(parent, child);
        };
        let candidates = [
            parent_tail.distance(&child_head),
            parent_tail.distance(&child_tail),
            parent_head.distance(&child_tail),
            parent_head.distance(&child_head),
        ];
        let mut choice = 0;
        for (i, distance) in candidates.iter().enumerate().skip(1) {
            if *distance < candidates[choice] {
                choice = i;
            }
        }

        match choice {
            0 => Strand::concat(parent, child),
            1 => Strand::concat(parent, child.reverse()),
            2 => Strand::concat(child, parent),
            _ => Strand::concat(child.reverse(), parent),
        }
    }

    fn into_polyline(self) -> Polyline {
        self.iter().map(Point::to_array).collect()
    }
}

/// One level of the explicit traversal stack.
struct Frame {
    strand: Strand,
    candidates: [Point; 8],
    next: usize,
}

impl Frame {
    fn new(origin: Point) -> Self {
        Self {
            strand: Strand::single(origin),
            candidates: NEIGHBOUR_OFFSETS.map(|(dx, dy)| Point::new(origin.x + dx, origin.y + dy)),
            next: 0,
        }
    }

    fn next_candidate(&mut self) -> Option<Point> {
        let candidate = self.candidates.get(self.next).copied();
        self.next += 1;
        candidate
    }
}

/// Boundary polylines of every region, plus traversal bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct AssembledContours {
    /// Polylines indexed by region id, each covering part of that region's boundary
    pub lines_per_region: Vec<Vec<Polyline>>,
    /// Deepest explicit stack reached by any traversal
    pub max_stack_depth: usize,
}

/// Orders each region's boundary points into polylines.
#[derive(Debug, Clone, Default)]
pub struct ContourAssembler;

impl ContourAssembler {
    /// Consume the boundary sets and trace every point into exactly one polyline.
    pub fn assemble(&self, boundaries: Vec<BoundaryPointSet>) -> Result<AssembledContours> {
        let mut max_stack_depth = 0;
        let mut lines_per_region = Vec::with_capacity(boundaries.len());

        for (region, mut points) in boundaries.into_iter().enumerate() {
            let mut lines = Vec::new();
            while let Some(start) = points.pop_first() {
                lines.push(self.trace_line(start, &mut points, &mut max_stack_depth)?);
            }
            debug!("Region {region} traced into {} lines", lines.len());
            lines_per_region.push(lines);
        }

        info!("Maximum stack depth was {max_stack_depth}");
        Ok(AssembledContours {
            lines_per_region,
            max_stack_depth,
        })
    }

    /// Trace the polyline grown from `start` through 8-connected `remaining` points.
    ///
    /// Every point reached is removed from `remaining`. The traversal is
    /// depth-first over an explicit stack; a finished frame is stitched onto
    /// its parent at the nearest pair of endpoints.
    pub fn trace_line(
        &self,
        start: Point,
        remaining: &mut BoundaryPointSet,
        max_stack_depth: &mut usize,
    ) -> Result<Polyline> {
        remaining.remove(&start);
        let mut stack = vec![Frame::new(start)];

        loop {
            *max_stack_depth = (*max_stack_depth).max(stack.len());
            let Some(frame) = stack.last_mut() else { break };

            if let Some(candidate) = frame.next_candidate() {
                if remaining.remove(&candidate) {
                    stack.push(Frame::new(candidate));
                }
                continue;
            }

            let Some(finished) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => {
                    let strand = std::mem::take(&mut parent.strand);
                    parent.strand = Strand::stitch(strand, finished.strand);
                }
                None => return Ok(finished.strand.into_polyline()),
            }
        }

        Err(EdgeError::TraversalExhaustion { start })
    }
}
