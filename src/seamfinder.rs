// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam in a mesh.
//!
//! This is forward relaxation over the mesh, one row at a time, top to
//! bottom.  Each row gets a map from its pixels to the cheapest path
//! that reaches them from the top.  Every pixel in the row offers its
//! path to the three pixels below it (down-left, down, down-right),
//! and each of those keeps whichever offer is cheapest.  When we step
//! off the bottom of the mesh, the last map holds the cheapest path to
//! every pixel in the bottom row, and the cheapest of those is the
//! seam.
//!
//! The maps are keyed by `NodeId` in a `BTreeMap`.  Ids are handed out
//! in row-major order and carving never reorders a row, so iterating a
//! map walks its row left to right.  Offers only replace a standing
//! offer when they are strictly cheaper, so among equally cheap
//! choices the leftmost always wins: the leftmost predecessor while
//! relaxing, and the leftmost bottom pixel when picking the seam.

use crate::energy::energy;
use crate::mesh::Mesh;
use crate::node::{Direction, NodeId};
use crate::seampath::SeamPath;
use log::trace;
use std::collections::BTreeMap;

type RowSeams = BTreeMap<NodeId, SeamPath>;

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// finders.
pub trait SeamFinder {
    /// The cheapest top-to-bottom seam, or `None` if there's nothing
    /// left to carve.
    fn vertical_seam(&self) -> Option<SeamPath>;
}

impl SeamFinder for Mesh {
    fn vertical_seam(&self) -> Option<SeamPath> {
        find_vertical_seam(self)
    }
}

pub fn find_vertical_seam(mesh: &Mesh) -> Option<SeamPath> {
    if mesh.is_empty() {
        return None;
    }

    let mut row_start = mesh.corner();
    let mut seams = RowSeams::new();
    let mut row = 0;
    // Each row's results are handed whole to the next row.  We stop
    // when the row below is the bottom of the sentinel ring.
    loop {
        seams = relax_row(mesh, row_start, seams);
        trace!("relaxed row {}: {} candidate seams", row, seams.len());
        row_start = mesh.neighbor(row_start, Direction::Down);
        if mesh.is_sentinel(row_start) {
            break;
        }
        row += 1;
    }

    seams.values().fold(None, |best: Option<&SeamPath>, path| match best {
        Some(b) if b.weight() <= path.weight() => Some(b),
        _ => Some(path),
    })
    .cloned()
}

// Offer every pixel's best path in this row to the row below, and
// return the row below's results.  Pixels in the top row have no
// offers waiting for them, so they start a path of their own.
fn relax_row(mesh: &Mesh, row_start: NodeId, mut above: RowSeams) -> RowSeams {
    let mut below = RowSeams::new();
    for pixel in mesh.row_from(row_start) {
        let best = above
            .entry(pixel)
            .or_insert_with(|| SeamPath::start(pixel, energy(mesh, pixel)))
            .clone();
        for &direction in Direction::BELOW.iter() {
            offer(mesh, &mut below, mesh.neighbor(pixel, direction), &best);
        }
    }
    below
}

fn offer(mesh: &Mesh, below: &mut RowSeams, target: NodeId, best: &SeamPath) {
    // Below the bottom row there's nothing to extend into.  File the
    // path unchanged under its own last pixel, so the final row's map
    // ends up holding each bottom pixel's own best path.
    if mesh.is_sentinel(target) {
        below.insert(best.pixel(), best.clone());
        return;
    }

    let weight = best.weight() + energy(mesh, target);
    let cheaper = below
        .get(&target)
        .map_or(true, |standing| weight < standing.weight());
    if cheaper {
        below.insert(target, best.extend(target, weight));
    }
}
