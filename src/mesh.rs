// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel mesh
//!
//! Defines a two-dimensional image as a concretized *graph* of points
//! in which every point knows all eight of its neighbors.  In lieu of
//! pointers we keep one arena of nodes, one per pixel plus a ring of
//! sentinels around the outside, and links are indexes into that
//! arena.  Every interior lookup is therefore always defined, and
//! nobody has to check for the edge of the image: the edge of the
//! image is a sentinel, and sentinels are black.
//!
//! After construction nothing is reached by index.  Starting from the
//! anchor (the top-left sentinel) we can find the first row by
//! traversing rightward and the first column by traversing downward,
//! and that remains true however many seams have been cut out.

use crate::cq;
use crate::error::CarveError;
use crate::node::{Direction, Node, NodeId, NodeKind, Pixel};
use crate::raster::RasterSource;
use itertools::iproduct;
use log::info;

#[derive(Debug, Clone)]
pub struct Mesh {
    nodes: Vec<Node>,
    anchor: NodeId,
}

impl Mesh {
    /// Read a raster into a fresh mesh.  The raster is consumed once,
    /// here, and never consulted again.
    pub fn new<R: RasterSource + ?Sized>(source: &R) -> Result<Self, CarveError> {
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(CarveError::MalformedRaster { width, height });
        }
        source.check_shape()?;

        // The padded grid: one ring of sentinels on every side.
        let (cols, rows) = (width as usize + 2, height as usize + 2);
        let nodes = iproduct!(0..rows, 0..cols)
            .map(|(r, c)| {
                let border = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
                cq!(border, Node::sentinel(), {
                    let (col, row) = (c as u32 - 1, r as u32 - 1);
                    Node::pixel(source.color_at(col, row), col, row)
                })
            })
            .collect();

        let mut mesh = Mesh {
            nodes,
            anchor: NodeId::new(0),
        };

        // Every node wires itself to the four neighbors that come
        // after it in row-major order; link() supplies the other four.
        let at = |r: usize, c: usize| NodeId::new(r * cols + c);
        for (r, c) in iproduct!(0..rows, 0..cols) {
            let here = at(r, c);
            if c + 1 < cols {
                mesh.link(here, Direction::Right, at(r, c + 1));
            }
            if r + 1 < rows {
                mesh.link(here, Direction::Down, at(r + 1, c));
                if c + 1 < cols {
                    mesh.link(here, Direction::DownRight, at(r + 1, c + 1));
                }
                if c > 0 {
                    mesh.link(here, Direction::DownLeft, at(r + 1, c - 1));
                }
            }
        }

        info!("built a {}x{} mesh", width, height);
        Ok(mesh)
    }

    /// The top-left sentinel.  It never moves and is never excised.
    pub fn anchor(&self) -> NodeId {
        self.anchor
    }

    /// The top-left pixel, or a sentinel if the mesh has been carved
    /// down to nothing.
    pub fn corner(&self) -> NodeId {
        self.neighbor(self.anchor, Direction::DownRight)
    }

    /// True once no live pixels remain.
    pub fn is_empty(&self) -> bool {
        self.is_sentinel(self.corner())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn neighbor(&self, id: NodeId, direction: Direction) -> NodeId {
        self.node(id)
            .map_or(NodeId::NONE, |node| node.link(direction))
    }

    /// `NONE` counts as a sentinel: it is the far side of the ring.
    pub fn is_sentinel(&self, id: NodeId) -> bool {
        self.node(id).map_or(true, Node::is_sentinel)
    }

    pub fn pixel(&self, id: NodeId) -> Option<&Pixel> {
        self.node(id).and_then(Node::as_pixel)
    }

    pub(crate) fn pixel_mut(&mut self, id: NodeId) -> Option<&mut Pixel> {
        match self.nodes.get_mut(id.index()).map(|node| &mut node.kind) {
            Some(NodeKind::Pixel(pixel)) => Some(pixel),
            _ => None,
        }
    }

    pub fn brightness(&self, id: NodeId) -> f64 {
        self.node(id).map_or(0.0, Node::brightness)
    }

    /// Join `a` to `b` in `direction`, and `b` to `a` in the opposite
    /// direction.  This is the only way links change, so a link is
    /// never one-sided.  If either write displaces an old neighbor
    /// that still points back at the written node, that back-link is
    /// cut to `NONE`.
    pub fn link(&mut self, a: NodeId, direction: Direction, b: NodeId) {
        self.set_slot(a, direction, b);
        self.set_slot(b, direction.opposite(), a);
    }

    fn set_slot(&mut self, node: NodeId, direction: Direction, target: NodeId) {
        if node.is_none() {
            return;
        }
        let back = direction.opposite();
        let old = self.neighbor(node, direction);
        if !old.is_none() && old != target && self.neighbor(old, back) == node {
            self.nodes[old.index()].links[back.slot()] = NodeId::NONE;
        }
        self.nodes[node.index()].links[direction.slot()] = target;
    }

    /// Every node from `start` onward in `direction`, stopping only
    /// when the links run out.  Sentinels included.
    pub fn walk(&self, start: NodeId, direction: Direction) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(start), move |&id| Some(self.neighbor(id, direction)))
            .take_while(|id| !id.is_none())
    }

    /// The live pixels of a row, left to right, starting at `start`.
    pub fn row_from(&self, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.walk(start, Direction::Right)
            .take_while(move |&id| !self.is_sentinel(id))
    }

    /// The leading sentinel of every pixel row, top to bottom.
    fn row_heads(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.walk(self.neighbor(self.anchor, Direction::Down), Direction::Down)
            .filter(move |&id| !self.neighbor(id, Direction::Down).is_none())
    }

    /// Current width in pixels, counted along the top of the ring.
    pub fn width(&self) -> u32 {
        self.walk(self.neighbor(self.anchor, Direction::Right), Direction::Right)
            .filter(|&id| !self.neighbor(id, Direction::Right).is_none())
            .count() as u32
    }

    /// Current height in pixels, counted down the left of the ring.
    /// Carving never changes it.
    pub fn height(&self) -> u32 {
        self.row_heads().count() as u32
    }

    /// Live pixel ids, row by row.  An exhausted mesh still has its
    /// rows; they are just empty.
    pub fn pixel_rows(&self) -> Vec<Vec<NodeId>> {
        self.row_heads()
            .map(|head| self.row_from(self.neighbor(head, Direction::Right)).collect())
            .collect()
    }

    /// Walk the whole padded grid and confirm that every link points
    /// at the node that sits in that direction, that every pixel knows
    /// its own coordinates, and that only the outer ring is sentinels.
    pub fn verify(&self) -> Result<(), CarveError> {
        let grid: Vec<Vec<NodeId>> = self
            .walk(self.anchor, Direction::Down)
            .map(|head| self.walk(head, Direction::Right).collect())
            .collect();
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);

        let at = |r: isize, c: isize| -> NodeId {
            if r < 0 || c < 0 || r as usize >= rows || c as usize >= cols {
                NodeId::NONE
            } else {
                grid[r as usize].get(c as usize).copied().unwrap_or(NodeId::NONE)
            }
        };

        for (r, row) in grid.iter().enumerate() {
            if row.len() != cols {
                let last = row.last().copied().unwrap_or(NodeId::NONE);
                return Err(CarveError::BrokenLink {
                    node: last,
                    direction: Direction::Right,
                });
            }
            for (c, &id) in row.iter().enumerate() {
                for &direction in Direction::ALL.iter() {
                    let (dr, dc) = direction.offset();
                    let expected = at(r as isize + dr, c as isize + dc);
                    if self.neighbor(id, direction) != expected {
                        return Err(CarveError::BrokenLink { node: id, direction });
                    }
                }

                let border = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
                let placed = match self.pixel(id) {
                    Some(pixel) => {
                        !border && pixel.col as usize == c - 1 && pixel.row as usize == r - 1
                    }
                    None => border,
                };
                if !placed {
                    return Err(CarveError::MisplacedNode { node: id });
                }
            }
        }
        Ok(())
    }
}
