// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main routine
//!
//! Removing a seam from the mesh, and the carver that drives the
//! find-paint-remove loop.
//!
//! Removal never copies the image.  Each row loses one node: the
//! node is excised by joining its left neighbor directly to its right
//! one, and then every node to its right is dragged one column to the
//! left, picking up new vertical and diagonal neighbors as it goes.
//! The sentinel rows above and below the image lose a node too, the
//! ones directly above and below the seam, so the padded grid stays
//! rectangular.
//!
//! Rows are processed top to bottom.  When a row is dragged, the row
//! above it is already in its final shape, and the row below is still
//! in its original shape; the drag links to both as they stand, and
//! the row below fixes its own side of the links when its turn comes.

use crate::config::CarveConfig;
use crate::error::CarveError;
use crate::mesh::Mesh;
use crate::node::{Direction, NodeId};
use crate::raster::RasterSource;
use crate::render::{draw_seam, paint};
use crate::seamfinder::SeamFinder;
use crate::seampath::SeamPath;
use image::RgbImage;
use log::{debug, info};

/// Cut a seam out of the mesh, shrinking every row by one column.
pub fn remove_vertical_seam(mesh: &mut Mesh, seam: &SeamPath) {
    let pixels = seam.pixels();
    let (first, last) = match (pixels.first(), pixels.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return,
    };

    // Capture every target before touching anything; the drags
    // rewrite the vertical links these lookups depend on.
    let above = mesh.neighbor(first, Direction::Up);
    let below = mesh.neighbor(last, Direction::Down);
    let targets = std::iter::once(above)
        .chain(pixels.into_iter())
        .chain(std::iter::once(below));

    for target in targets {
        excise(mesh, target);
    }
}

// Take `target` out of its row, and close the gap.
fn excise(mesh: &mut Mesh, target: NodeId) {
    let left = mesh.neighbor(target, Direction::Left);
    let right = mesh.neighbor(target, Direction::Right);
    let up = mesh.neighbor(target, Direction::Up);
    let down = mesh.neighbor(target, Direction::Down);

    mesh.link(left, Direction::Right, right);
    drag_left(mesh, right, up, down);
}

// Move `start` and everything to its right one column to the left.
// `up` and `down` are the nodes that will sit directly above and
// below `start` once it has moved.  The walk ends with the row's
// trailing sentinel, the only node with nothing to its right.
fn drag_left(mesh: &mut Mesh, start: NodeId, mut up: NodeId, mut down: NodeId) {
    let mut node = start;
    while !node.is_none() {
        if let Some(pixel) = mesh.pixel_mut(node) {
            pixel.col -= 1;
        }

        mesh.link(up, Direction::Down, node);
        mesh.link(down, Direction::Up, node);
        mesh.link(node, Direction::TopLeft, mesh.neighbor(up, Direction::Left));
        mesh.link(node, Direction::TopRight, mesh.neighbor(up, Direction::Right));
        mesh.link(node, Direction::DownLeft, mesh.neighbor(down, Direction::Left));
        mesh.link(node, Direction::DownRight, mesh.neighbor(down, Direction::Right));

        up = mesh.neighbor(node, Direction::TopRight);
        down = mesh.neighbor(node, Direction::DownRight);
        node = mesh.neighbor(node, Direction::Right);
    }
}

// It isn't necessary at this point to be using a struct-based
// implementation, but it keeps the original dimensions and the
// configuration together with the mesh they describe.

/// A mesh being carved, one seam per frame.
pub struct SeamCarver {
    mesh: Mesh,
    width: u32,
    height: u32,
    config: CarveConfig,
    removed: u32,
}

impl SeamCarver {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new<R: RasterSource + ?Sized>(source: &R, config: CarveConfig) -> Result<Self, CarveError> {
        let mesh = Mesh::new(source)?;
        Ok(SeamCarver {
            width: source.width(),
            height: source.height(),
            mesh,
            config,
            removed: 0,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// The size of the image the mesh was built from.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn seams_removed(&self) -> u32 {
        self.removed
    }

    pub fn is_done(&self) -> bool {
        self.mesh.is_empty()
    }

    /// One tick of the animation.  Find the next seam, paint the mesh
    /// with the seam marked on it, and then cut the seam out.  The
    /// frame is always the original size; once the mesh is exhausted
    /// it's just background.
    pub fn frame(&mut self) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, self.config.background);
        if let Some(seam) = self.mesh.vertical_seam() {
            paint(&self.mesh, &mut img);
            draw_seam(&self.mesh, &seam, &mut img, self.config.highlight);
            self.remove(&seam);
        }
        img
    }

    /// Find and remove one seam without rendering anything.  Returns
    /// the seam's weight, or `None` if there was nothing left.
    pub fn step(&mut self) -> Option<f64> {
        let seam = self.mesh.vertical_seam()?;
        self.remove(&seam);
        Some(seam.weight())
    }

    fn remove(&mut self, seam: &SeamPath) {
        let start = seam
            .pixels()
            .first()
            .and_then(|&id| self.mesh.pixel(id))
            .map_or(0, |p| p.col);
        remove_vertical_seam(&mut self.mesh, seam);
        self.removed += 1;
        debug!(
            "removed seam {} (weight {:.4}, starting at column {})",
            self.removed,
            seam.weight(),
            start
        );
        debug_assert_eq!(self.mesh.verify(), Ok(()));
    }

    /// The mesh as it stands, as an image exactly its current size.
    pub fn current_image(&self) -> Result<RgbImage, CarveError> {
        let width = self.mesh.width();
        if width == 0 {
            return Err(CarveError::ZeroWidth);
        }
        let mut img = RgbImage::from_pixel(width, self.height, self.config.background);
        paint(&self.mesh, &mut img);
        Ok(img)
    }

    /// Carve seams until the image is `new_width` columns wide, and
    /// return the result.
    pub fn carve(&mut self, new_width: u32) -> Result<RgbImage, CarveError> {
        let current = self.mesh.width();
        if new_width > current {
            return Err(CarveError::CannotUpscale {
                current,
                requested: new_width,
            });
        }
        if new_width == 0 {
            return Err(CarveError::ZeroWidth);
        }

        for _ in new_width..current {
            if self.step().is_none() {
                break;
            }
        }
        info!(
            "carved {}x{} down to {}x{}",
            self.width,
            self.height,
            self.mesh.width(),
            self.height
        );

        self.current_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::checkerboard;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const PINK: Rgb<u8> = Rgb([255, 175, 175]);

    fn fixture() -> Vec<Vec<Rgb<u8>>> {
        vec![
            vec![RED, YELLOW, BLUE],
            vec![GREEN, BLUE, GREEN],
            vec![PINK, RED, GREEN],
        ]
    }

    // Hand-picked seam through the mesh by column, top to bottom.
    fn seam_at(mesh: &Mesh, cols: &[usize]) -> SeamPath {
        let rows = mesh.pixel_rows();
        let mut path = SeamPath::start(rows[0][cols[0]], 0.0);
        for (r, &c) in cols.iter().enumerate().skip(1) {
            path = path.extend(rows[r][c], 0.0);
        }
        path
    }

    fn colors(mesh: &Mesh) -> Vec<Vec<Rgb<u8>>> {
        mesh.pixel_rows()
            .iter()
            .map(|row| row.iter().map(|&id| mesh.pixel(id).unwrap().color).collect())
            .collect()
    }

    #[test]
    fn removal_closes_the_gap() {
        let mut mesh = Mesh::new(&fixture()).unwrap();
        let seam = seam_at(&mesh, &[0, 1, 2]);
        remove_vertical_seam(&mut mesh, &seam);
        assert_eq!(mesh.verify(), Ok(()));
        assert_eq!(
            colors(&mesh),
            vec![vec![YELLOW, BLUE], vec![GREEN, GREEN], vec![PINK, RED]]
        );
        assert_eq!((mesh.width(), mesh.height()), (2, 3));
    }

    #[test]
    fn every_shape_of_seam_keeps_the_mesh_whole() {
        // Zig-zags, edges, and straight drops on a 4x5 mesh.
        let seams: [[usize; 5]; 6] = [
            [0, 0, 0, 0, 0],
            [3, 3, 3, 3, 3],
            [0, 1, 2, 3, 2],
            [3, 2, 1, 0, 1],
            [1, 2, 1, 2, 1],
            [2, 3, 3, 2, 1],
        ];
        for cols in seams.iter() {
            let mut mesh = Mesh::new(&checkerboard(4, 5)).unwrap();
            let before = mesh.pixel_rows().iter().map(Vec::len).sum::<usize>();
            let seam = seam_at(&mesh, cols);
            remove_vertical_seam(&mut mesh, &seam);
            assert_eq!(mesh.verify(), Ok(()), "seam {:?}", cols);
            assert_eq!(mesh.height(), 5);
            assert!(mesh.pixel_rows().iter().all(|row| row.len() == 3));
            let after = mesh.pixel_rows().iter().map(Vec::len).sum::<usize>();
            assert_eq!(before - after, 5);
        }
    }

    #[test]
    fn repeated_removals_stay_consistent() {
        let mut mesh = Mesh::new(&checkerboard(7, 6)).unwrap();
        for width in (0..7).rev() {
            let seam = mesh.vertical_seam().unwrap();
            remove_vertical_seam(&mut mesh, &seam);
            assert_eq!(mesh.verify(), Ok(()));
            assert_eq!(mesh.width(), width);
            assert_eq!(mesh.height(), 6);
        }
        assert!(mesh.is_empty());
        assert!(mesh.vertical_seam().is_none());
    }

    #[test]
    fn one_column_empties_in_one_removal() {
        let mut mesh = Mesh::new(&checkerboard(1, 3)).unwrap();
        let seam = mesh.vertical_seam().unwrap();
        remove_vertical_seam(&mut mesh, &seam);
        assert!(mesh.is_empty());
        assert_eq!(mesh.verify(), Ok(()));
        assert!(mesh.pixel_rows().iter().all(Vec::is_empty));
    }

    #[test]
    fn fixture_loses_its_cheapest_seam() {
        let mut mesh = Mesh::new(&fixture()).unwrap();
        let seam = mesh.vertical_seam().unwrap();
        let doomed = seam.pixels();
        remove_vertical_seam(&mut mesh, &seam);
        let survivors: Vec<NodeId> = mesh.pixel_rows().into_iter().flatten().collect();
        assert_eq!(survivors.len(), 6);
        assert!(doomed.iter().all(|id| !survivors.contains(id)));
        assert!(mesh.pixel_rows().iter().all(|row| row.len() == 2));
    }

    #[test]
    fn frames_mark_the_seam_then_remove_it() {
        let mut carver = SeamCarver::new(&fixture(), CarveConfig::default()).unwrap();
        let seam = carver.mesh().vertical_seam().unwrap();
        let marked: Vec<(u32, u32)> = seam
            .pixels()
            .iter()
            .map(|&id| {
                let p = carver.mesh().pixel(id).unwrap();
                (p.col, p.row)
            })
            .collect();

        let frame = carver.frame();
        assert_eq!(frame.dimensions(), (3, 3));
        for &(col, row) in marked.iter() {
            assert_eq!(*frame.get_pixel(col, row), RED);
        }
        assert_eq!(carver.seams_removed(), 1);
        assert_eq!(carver.mesh().width(), 2);

        // The exhausted mesh still produces frames; they're blank.
        while !carver.is_done() {
            carver.frame();
        }
        assert_eq!(carver.seams_removed(), 3);
        let blank = carver.frame();
        assert!(blank.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn frames_fill_the_uncovered_edge() {
        let config = CarveConfig {
            highlight: Rgb([1, 2, 3]),
            background: Rgb([9, 9, 9]),
        };
        let mut carver = SeamCarver::new(&checkerboard(4, 2), config).unwrap();
        assert_eq!(*carver.config(), config);
        carver.frame();
        let second = carver.frame();
        assert_eq!(*second.get_pixel(3, 0), Rgb([9, 9, 9]));
        assert_eq!(*second.get_pixel(3, 1), Rgb([9, 9, 9]));
    }

    #[test]
    fn carving_to_a_width() {
        let mut carver = SeamCarver::new(&checkerboard(6, 4), CarveConfig::default()).unwrap();
        let img = carver.carve(4).unwrap();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(carver.seams_removed(), 2);
        assert_eq!(carver.current_image().unwrap(), img);
        assert_eq!(carver.dimensions(), (6, 4));
    }

    #[test]
    fn carving_refuses_to_grow_or_vanish() {
        let mut carver = SeamCarver::new(&checkerboard(3, 3), CarveConfig::default()).unwrap();
        assert_eq!(
            carver.carve(5).unwrap_err(),
            CarveError::CannotUpscale {
                current: 3,
                requested: 5
            }
        );
        assert_eq!(carver.carve(0).unwrap_err(), CarveError::ZeroWidth);
        assert_eq!(carver.seams_removed(), 0);
    }

    #[test]
    fn stepping_reports_weights_until_exhausted() {
        let mut carver = SeamCarver::new(&checkerboard(2, 2), CarveConfig::default()).unwrap();
        assert!(carver.step().is_some());
        assert!(carver.step().is_some());
        assert!(carver.step().is_none());
        assert_eq!(carver.current_image().unwrap_err(), CarveError::ZeroWidth);
    }
}
