// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The boundary between the mesh and the outside world.  A mesh is
//! read out of a `RasterSource` exactly once, and painted into a
//! `RasterSink` as often as anyone cares to look at it.

use crate::error::CarveError;
use image::{Rgb, RgbImage};

/// Anything with a width, a height, and a color at every coordinate.
pub trait RasterSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn color_at(&self, col: u32, row: u32) -> Rgb<u8>;

    /// Sources that can be malformed in ways other than their size get
    /// a chance to say so before the mesh reads them.
    fn check_shape(&self) -> Result<(), CarveError> {
        Ok(())
    }
}

/// Anything that will accept a color at a coordinate.
pub trait RasterSink {
    fn set_color(&mut self, col: u32, row: u32, color: Rgb<u8>);
}

impl RasterSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn color_at(&self, col: u32, row: u32) -> Rgb<u8> {
        *self.get_pixel(col, row)
    }
}

impl RasterSink for RgbImage {
    fn set_color(&mut self, col: u32, row: u32, color: Rgb<u8>) {
        self.put_pixel(col, row, color);
    }
}

// Rows of colors, outermost vector top to bottom.  Mostly for
// building small meshes by hand.
impl RasterSource for Vec<Vec<Rgb<u8>>> {
    fn width(&self) -> u32 {
        self.first().map_or(0, |row| row.len() as u32)
    }

    fn height(&self) -> u32 {
        self.len() as u32
    }

    fn color_at(&self, col: u32, row: u32) -> Rgb<u8> {
        self[row as usize][col as usize]
    }

    fn check_shape(&self) -> Result<(), CarveError> {
        let expected = self.first().map_or(0, Vec::len);
        match self.iter().position(|row| row.len() != expected) {
            Some(row) => Err(CarveError::RaggedRows {
                row,
                expected,
                actual: self[row].len(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_buffers_read_and_write() {
        let mut img = RgbImage::new(3, 2);
        img.set_color(2, 1, Rgb([1, 2, 3]));
        assert_eq!(RasterSource::width(&img), 3);
        assert_eq!(RasterSource::height(&img), 2);
        assert_eq!(img.color_at(2, 1), Rgb([1, 2, 3]));
        assert_eq!(img.color_at(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn nested_rows_report_their_shape() {
        let rows = vec![vec![Rgb([9, 9, 9]); 4]; 2];
        assert_eq!(rows.width(), 4);
        assert_eq!(rows.height(), 2);
        let empty: Vec<Vec<Rgb<u8>>> = vec![];
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![Rgb([0, 0, 0]); 3], vec![Rgb([0, 0, 0]); 2]];
        assert_eq!(
            rows.check_shape(),
            Err(CarveError::RaggedRows {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(vec![vec![Rgb([0, 0, 0]); 3]; 2].check_shape(), Ok(()));
    }
}
