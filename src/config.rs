// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs on the carver.  There aren't many: what color to mark
//! the next seam with, and what color to fill the part of a frame the
//! carved image no longer covers.

use crate::error::CarveError;
use image::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarveConfig {
    pub highlight: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            highlight: Rgb([255, 0, 0]),
            background: Rgb([0, 0, 0]),
        }
    }
}

/// Read a color as `#rrggbb`, `rrggbb`, or `r,g,b`.
pub fn parse_color(text: &str) -> Result<Rgb<u8>, CarveError> {
    let invalid = || CarveError::InvalidColor(text.to_string());
    let trimmed = text.trim();

    if trimmed.contains(',') {
        let channels = trimmed
            .split(',')
            .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>, CarveError>>()?;
        return match channels.as_slice() {
            [r, g, b] => Ok(Rgb([*r, *g, *b])),
            _ => Err(invalid()),
        };
    }

    let hex = trimmed.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mark_seams_in_red() {
        let config = CarveConfig::default();
        assert_eq!(config.highlight, Rgb([255, 0, 0]));
        assert_eq!(config.background, Rgb([0, 0, 0]));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_color("#ff8000"), Ok(Rgb([255, 128, 0])));
        assert_eq!(parse_color("00FF7f"), Ok(Rgb([0, 255, 127])));
    }

    #[test]
    fn decimal_triples() {
        assert_eq!(parse_color("12, 34,56"), Ok(Rgb([12, 34, 56])));
    }

    #[test]
    fn nonsense_is_rejected() {
        for text in ["", "#ff80", "red", "1,2", "1,2,3,4", "256,0,0", "#gg0000"].iter() {
            assert_eq!(
                parse_color(text),
                Err(CarveError::InvalidColor(text.to_string()))
            );
        }
    }
}
