// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::node::{Direction, NodeId};
use failure::Fail;

/// Everything that can go wrong between a raster coming in and a
/// carved raster going out.  An exhausted mesh is not on this list;
/// running out of columns is how carving ends, not how it fails.
#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    #[fail(display = "cannot build a mesh from a {}x{} raster", width, height)]
    MalformedRaster { width: u32, height: u32 },

    #[fail(
        display = "row {} has {} pixels, but the first row has {}",
        row, actual, expected
    )]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[fail(
        display = "seamcarve cannot upscale an image: {} columns requested, {} available",
        requested, current
    )]
    CannotUpscale { current: u32, requested: u32 },

    #[fail(display = "cannot carve an image down to zero columns")]
    ZeroWidth,

    #[fail(display = "unrecognized color: {:?}", _0)]
    InvalidColor(String),

    #[fail(display = "mesh link {:?} of node {:?} is inconsistent", direction, node)]
    BrokenLink { node: NodeId, direction: Direction },

    #[fail(display = "node {:?} is not where the mesh says it is", node)]
    MisplacedNode { node: NodeId },
}
