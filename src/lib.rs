// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving on a linked pixel mesh.
//!
//! An image is read once into a mesh of nodes, each linked to its
//! eight neighbors.  Carving repeatedly finds the cheapest connected
//! top-to-bottom path through the mesh and cuts it out by relinking
//! the nodes around it; nothing is ever re-copied or re-indexed.

// #![deny(missing_docs)]

mod ternary;

pub mod config;
pub mod energy;
pub mod error;
pub mod mesh;
pub mod node;
pub mod raster;
pub mod render;
pub mod seamcarver;
pub mod seamfinder;
pub mod seampath;

pub use config::{parse_color, CarveConfig};
pub use energy::energy;
pub use error::CarveError;
pub use mesh::Mesh;
pub use node::{Direction, Node, NodeId, NodeKind, Pixel};
pub use raster::{RasterSink, RasterSource};
pub use render::{draw_seam, energy_image, paint};
pub use seamcarver::{remove_vertical_seam, SeamCarver};
pub use seamfinder::{find_vertical_seam, SeamFinder};
pub use seampath::SeamPath;
