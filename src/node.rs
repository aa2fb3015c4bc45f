// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The link-bearing unit of the mesh.
//!
//! Every node, whether it carries image data or is one of the
//! sentinels in the border ring, has exactly eight links.  Rather
//! than pointers, which are generally not accepted in Rust, links are
//! indexes into the mesh's node arena.  `NodeId::NONE` stands in for
//! "nothing over there," and only ever appears on the outside face of
//! the sentinel ring.

use image::Rgb;

/// An index into the mesh's node arena.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The link value for "no neighbor."
    pub const NONE: NodeId = NodeId(usize::MAX);

    pub(crate) fn new(value: usize) -> Self {
        NodeId(value)
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

/// The eight compass points of a node, clockwise from the top left.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    TopLeft,
    Up,
    TopRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Up,
        Direction::TopRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
    ];

    /// The three directions a vertical seam may step in.
    pub const BELOW: [Direction; 3] = [Direction::DownLeft, Direction::Down, Direction::DownRight];

    /// The direction pointing back the way this one came.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::TopLeft => Direction::DownRight,
            Direction::Up => Direction::Down,
            Direction::TopRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::TopLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::TopRight,
            Direction::Left => Direction::Right,
        }
    }

    /// The (row, column) step this direction takes on the grid.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::TopLeft => (-1, -1),
            Direction::Up => (-1, 0),
            Direction::TopRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

/// The image data held by a live pixel.  The coordinates are tracked
/// separately from the link topology so that a carved mesh can still
/// say where each survivor belongs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel {
    pub color: Rgb<u8>,
    pub col: u32,
    pub row: u32,
}

impl Pixel {
    /// The mean of the three channels, normalized to [0, 1].
    pub fn brightness(&self) -> f64 {
        let [r, g, b] = self.color.0;
        (f64::from(r) + f64::from(g) + f64::from(b)) / (255.0 * 3.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NodeKind {
    Sentinel,
    Pixel(Pixel),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) links: [NodeId; 8],
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn sentinel() -> Self {
        Node {
            links: [NodeId::NONE; 8],
            kind: NodeKind::Sentinel,
        }
    }

    pub(crate) fn pixel(color: Rgb<u8>, col: u32, row: u32) -> Self {
        Node {
            links: [NodeId::NONE; 8],
            kind: NodeKind::Pixel(Pixel { color, col, row }),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn link(&self, direction: Direction) -> NodeId {
        self.links[direction.slot()]
    }

    pub fn is_sentinel(&self) -> bool {
        match self.kind {
            NodeKind::Sentinel => true,
            NodeKind::Pixel(_) => false,
        }
    }

    pub fn as_pixel(&self) -> Option<&Pixel> {
        match &self.kind {
            NodeKind::Pixel(pixel) => Some(pixel),
            NodeKind::Sentinel => None,
        }
    }

    /// Sentinels are defined to be black.
    pub fn brightness(&self) -> f64 {
        match &self.kind {
            NodeKind::Pixel(pixel) => pixel.brightness(),
            NodeKind::Sentinel => 0.0,
        }
    }
}
