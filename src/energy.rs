// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel
//!
//! The energy of a pixel is the magnitude of the brightness gradient
//! across its eight neighbors, weighted Sobel-fashion so that the
//! neighbors sharing an edge with the pixel count double.  Written
//! out, with each letter standing for the brightness of the neighbor
//! in that direction:
//!
//! ```text
//!   vertical   = (TL + 2·U + TR) − (DL + 2·D + DR)
//!   horizontal = (TL + 2·L + DL) − (TR + 2·R + DR)
//!   e(x,y)     = √(vertical² + horizontal²)
//! ```
//!
//! Note that the pixel's own brightness plays no part.  Sentinels are
//! black, so a pixel on the edge of the mesh looks like it sits next
//! to a dark frame.
//!
//! Energy is never cached.  Every carve changes who some pixels'
//! neighbors are, and recalculating is cheaper than tracking which
//! ones.

use crate::mesh::Mesh;
use crate::node::{Direction, NodeId};

/// The energy of the node at `id`.  Sentinels have no energy.
///
/// ```
/// use image::Rgb;
/// use meshseam::{energy, Mesh};
///
/// // Two white pixels: each sees the other on one side, and the
/// // black frame everywhere else.
/// let mesh = Mesh::new(&vec![vec![Rgb([255, 255, 255]); 2]]).unwrap();
/// assert!((energy(&mesh, mesh.corner()) - 2.0).abs() < 1e-9);
/// ```
pub fn energy(mesh: &Mesh, id: NodeId) -> f64 {
    if mesh.is_sentinel(id) {
        return 0.0;
    }
    let b = |direction| mesh.brightness(mesh.neighbor(id, direction));

    let (tl, up, tr) = (b(Direction::TopLeft), b(Direction::Up), b(Direction::TopRight));
    let (left, right) = (b(Direction::Left), b(Direction::Right));
    let (dl, down, dr) = (b(Direction::DownLeft), b(Direction::Down), b(Direction::DownRight));

    let vertical = (tl + 2.0 * up + tr) - (dl + 2.0 * down + dr);
    let horizontal = (tl + 2.0 * left + dl) - (tr + 2.0 * right + dr);
    vertical.hypot(horizontal)
}
