// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning a mesh back into pixels.
//!
//! Rendering walks the mesh the way a reader would: along each row
//! via `right`, and from row to row via `down`, starting at the
//! top-left pixel.  Each pixel is written at the coordinates it
//! carries rather than at the position the walk has reached; they're
//! the same thing in a healthy mesh, and the coordinates are what the
//! seam overlay uses too.

use crate::energy::energy;
use crate::mesh::Mesh;
use crate::node::Direction;
use crate::raster::RasterSink;
use crate::seampath::SeamPath;
use image::{GrayImage, Luma, Rgb};
use itertools::Itertools;
use num_traits::NumCast;

/// Paint every live pixel of the mesh into the sink.
pub fn paint<S: RasterSink + ?Sized>(mesh: &Mesh, sink: &mut S) {
    let heads = mesh.walk(mesh.corner(), Direction::Down);
    for head in heads.take_while(|&id| !mesh.is_sentinel(id)) {
        for id in mesh.row_from(head) {
            if let Some(pixel) = mesh.pixel(id) {
                sink.set_color(pixel.col, pixel.row, pixel.color);
            }
        }
    }
}

/// Mark every pixel of a seam that has been found, but not yet
/// removed.
pub fn draw_seam<S: RasterSink + ?Sized>(mesh: &Mesh, seam: &SeamPath, sink: &mut S, color: Rgb<u8>) {
    for pixel in seam.iter().filter_map(|id| mesh.pixel(id)) {
        sink.set_color(pixel.col, pixel.row, color);
    }
}

/// Render the current energy of every live pixel as a grayscale
/// image the size of the mesh, scaled so that the most energetic
/// pixel is white.  A perfectly flat mesh renders black.
pub fn energy_image(mesh: &Mesh) -> GrayImage {
    let mut out = GrayImage::new(mesh.width(), mesh.height());
    let energies = mesh
        .pixel_rows()
        .into_iter()
        .flatten()
        .filter_map(|id| mesh.pixel(id).map(|p| (p.col, p.row, energy(mesh, id))))
        .collect_vec();

    let factor = energies.iter().map(|e| e.2).fold(0.0, f64::max);
    for (col, row, e) in energies {
        let scaled = if factor > 0.0 { e * 255.0 / factor } else { 0.0 };
        let level: u8 = NumCast::from(scaled.round().max(0.0).min(255.0)).unwrap_or(0);
        out.put_pixel(col, row, Luma([level]));
    }
    out
}
