// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use meshseam::{find_vertical_seam, remove_vertical_seam, Mesh};

fn diagonal_bands(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let band = ((x + 2 * y) / 7 % 3) as u8;
        Rgb([band * 90, 255 - band * 60, (x ^ y) as u8])
    })
}

fn bench_find_seam(c: &mut Criterion) {
    let mesh = Mesh::new(&diagonal_bands(160, 120)).expect("valid image");
    c.bench_function("find_vertical_seam_160x120", move |b| {
        b.iter(|| black_box(find_vertical_seam(black_box(&mesh))))
    });
}

fn bench_remove_seam(c: &mut Criterion) {
    let img = diagonal_bands(160, 120);
    c.bench_function("find_and_remove_seam_160x120", move |b| {
        b.iter_with_setup(
            || Mesh::new(&img).expect("valid image"),
            |mut mesh| {
                if let Some(seam) = find_vertical_seam(&mesh) {
                    remove_vertical_seam(&mut mesh, &seam);
                }
                mesh
            },
        )
    });
}

fn bench_build_mesh(c: &mut Criterion) {
    let img = diagonal_bands(320, 240);
    c.bench_function("build_mesh_320x240", move |b| {
        b.iter(|| black_box(Mesh::new(black_box(&img))))
    });
}

criterion_group!(benches, bench_build_mesh, bench_find_seam, bench_remove_seam);
criterion_main!(benches);
