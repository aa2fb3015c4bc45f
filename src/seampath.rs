// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A seam, as the finder builds it: a chain of pixels, each one
//! pointing back at the path that reached it from the row above.
//! Chains share their upper halves freely, which is what makes it
//! cheap for every pixel in a row to carry its own best path.

use crate::node::NodeId;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct SeamPath(Rc<SeamStep>);

#[derive(Debug)]
struct SeamStep {
    pixel: NodeId,
    weight: f64,
    came_from: Option<SeamPath>,
}

impl SeamPath {
    /// A path that begins (in the top row) at `pixel`.
    pub fn start(pixel: NodeId, energy: f64) -> Self {
        SeamPath(Rc::new(SeamStep {
            pixel,
            weight: energy,
            came_from: None,
        }))
    }

    /// This path, carried one step further down to `pixel`, with the
    /// total weight of the longer path.
    pub fn extend(&self, pixel: NodeId, weight: f64) -> Self {
        SeamPath(Rc::new(SeamStep {
            pixel,
            weight,
            came_from: Some(self.clone()),
        }))
    }

    /// The last (lowest) pixel on the path.
    pub fn pixel(&self) -> NodeId {
        self.0.pixel
    }

    /// The summed energy of every pixel on the path.
    pub fn weight(&self) -> f64 {
        self.0.weight
    }

    pub fn came_from(&self) -> Option<&SeamPath> {
        self.0.came_from.as_ref()
    }

    /// Pixels from the bottom of the path to the top.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(self), |path| path.came_from()).map(SeamPath::pixel)
    }

    /// Pixels from the top of the path to the bottom.
    pub fn pixels(&self) -> Vec<NodeId> {
        let mut pixels: Vec<NodeId> = self.iter().collect();
        pixels.reverse();
        pixels
    }

    // A path always holds at least its starting pixel, so there's no
    // `is_empty` to go with this.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

// A tall image makes for a long chain, and the default drop would
// recurse once per row.  Unwind it by hand instead, stopping at the
// first step that some other path still holds.
impl Drop for SeamStep {
    fn drop(&mut self) {
        let mut next = self.came_from.take();
        while let Some(path) = next {
            next = match Rc::try_unwrap(path.0) {
                Ok(mut step) => step.came_from.take(),
                Err(_) => None,
            };
        }
    }
}
