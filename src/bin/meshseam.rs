// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;
use std::path::Path;
use std::process;

use clap::{value_t, App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::info;
use meshseam::{energy_image, parse_color, CarveConfig, CarveError, Mesh, SeamCarver};

fn main() {
    if let Err(err) = run() {
        eprintln!("meshseam: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let matches = App::new("meshseam")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Seam carving for narrowing images")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result; the format follows the extension")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .short("w")
                .takes_value(true)
                .value_name("COLUMNS")
                .conflicts_with("seams")
                .help("Carve the image down to this many columns"),
        )
        .arg(
            Arg::with_name("seams")
                .long("seams")
                .short("s")
                .takes_value(true)
                .value_name("COUNT")
                .help("Remove this many seams"),
        )
        .arg(
            Arg::with_name("frames")
                .long("frames")
                .takes_value(true)
                .value_name("DIR")
                .help("Write every step, with its seam marked, to this directory"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .conflicts_with_all(&["width", "seams", "frames"])
                .help("Write the energy map of the input instead of carving it"),
        )
        .arg(
            Arg::with_name("highlight")
                .long("highlight")
                .takes_value(true)
                .value_name("COLOR")
                .help("Color used to mark seams in frames [default: #ff0000]"),
        )
        .arg(
            Arg::with_name("background")
                .long("background")
                .takes_value(true)
                .value_name("COLOR")
                .help("Color behind the carved image in frames [default: #000000]"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more still"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();
    let image = image::open(input)?.to_rgb8();
    info!("read {} ({}x{})", input, image.width(), image.height());

    if matches.is_present("energy") {
        let mesh = Mesh::new(&image)?;
        energy_image(&mesh).save(output)?;
        return Ok(());
    }

    let config = config_from(&matches)?;
    let mut carver = SeamCarver::new(&image, config)?;
    let target = target_width(&matches, image.width())?;

    if let Some(dir) = matches.value_of("frames") {
        write_frames(&mut carver, image.width() - target, Path::new(dir))?;
    }
    carver.carve(target)?.save(output)?;
    info!("wrote {} ({}x{})", output, target, image.height());
    Ok(())
}

fn config_from(matches: &ArgMatches) -> Result<CarveConfig, Error> {
    let mut config = CarveConfig::default();
    if let Some(color) = matches.value_of("highlight") {
        config.highlight = parse_color(color)?;
    }
    if let Some(color) = matches.value_of("background") {
        config.background = parse_color(color)?;
    }
    Ok(config)
}

// The carver would refuse these too, but only after the frames had
// been written.
fn target_width(matches: &ArgMatches, width: u32) -> Result<u32, Error> {
    let target = if matches.is_present("width") {
        value_t!(matches, "width", u32)?
    } else if matches.is_present("seams") {
        let seams = value_t!(matches, "seams", u32)?;
        width
            .checked_sub(seams)
            .ok_or_else(|| format_err!("cannot remove {} seams from {} columns", seams, width))?
    } else {
        return Err(format_err!("one of --width, --seams, or --energy is required"));
    };

    if target > width {
        return Err(CarveError::CannotUpscale {
            current: width,
            requested: target,
        }
        .into());
    }
    if target == 0 {
        return Err(CarveError::ZeroWidth.into());
    }
    Ok(target)
}

fn write_frames(carver: &mut SeamCarver, count: u32, dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    for i in 0..count {
        let path = dir.join(format!("frame{:05}.png", i));
        carver.frame().save(&path)?;
    }
    info!("wrote {} frames to {}", count, dir.display());
    Ok(())
}
