// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg, ArgMatches};
use log::info;
use std::process;
use std::str::FromStr;

use mandelzoom::config::{
    parse_pair, validate_pair, validate_positive, validate_range, validate_size, Palette,
};
use mandelzoom::{Error, Explorer, ImageFile, ViewTransform};

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ZOOM: &str = "zoom";
const OFFSET: &str = "offset";
const CLICK: &str = "click";
const PALETTE: &str = "palette";
const THREADS: &str = "threads";
const FRAMES: &str = "frames";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot click-to-zoom renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.png, or .ppm for a binary pixmap)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| {
                    validate_size(
                        &s,
                        "Could not parse output image size, expected WxH with both sides positive",
                    )
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_positive(&s, "Zoom level must be a positive number"))
                .help("Starting zoom level"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .required(false)
                .long(OFFSET)
                .short("f")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse offset"))
                .help("Starting pan offset, in pixels at zoom 1"),
        )
        .arg(
            Arg::with_name(CLICK)
                .required(false)
                .long(CLICK)
                .short("c")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse click position"))
                .help("Click at X,Y to zoom in; may be repeated"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .possible_values(Palette::NAMES)
                .default_value("offset")
                .help("Colour palette"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in renderer"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .help("Write every frame as a numbered file instead of only the last"),
        )
        .get_matches()
}

fn pair_arg<T: FromStr>(matches: &ArgMatches, name: &str, separator: char) -> (T, T) {
    match matches.value_of(name).and_then(|s| parse_pair(s, separator)) {
        Some(pair) => pair,
        None => {
            eprintln!("Error parsing {}", name);
            process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height): (usize, usize) = pair_arg(matches, SIZE, 'x');
    let (offset_x, offset_y): (f64, f64) = pair_arg(matches, OFFSET, ',');
    let zoom = value_t!(matches, ZOOM, f64).unwrap_or_else(|e| e.exit());
    let palette = value_t!(matches, PALETTE, Palette).unwrap_or_else(|e| e.exit());
    let threads = value_t!(matches, THREADS, usize).unwrap_or_else(|e| e.exit());
    let output = matches.value_of(OUTPUT).unwrap_or_default();

    let view = ViewTransform::new(zoom, offset_x, offset_y)?;
    let mut explorer = Explorer::new(width, height)?
        .with_view(view)
        .with_palette(palette.colour_map())
        .with_threads(threads);

    let clicks: Vec<(f64, f64)> = match matches.values_of(CLICK) {
        Some(values) => values.filter_map(|s| parse_pair(s, ',')).collect(),
        None => vec![],
    };

    let mut surface = if matches.is_present(FRAMES) {
        ImageFile::numbered(output)
    } else {
        ImageFile::new(output)
    };

    // Without --frames only the final view is worth writing.
    if matches.is_present(FRAMES) || clicks.is_empty() {
        explorer.draw(&mut surface)?;
    }
    for (i, &(x, y)) in clicks.iter().enumerate() {
        let last = i + 1 == clicks.len();
        if matches.is_present(FRAMES) || last {
            explorer.click(x, y, &mut surface)?;
        } else {
            let next = explorer.view().zoom_at(x, y, width, height);
            explorer = explorer.with_view(next);
        }
    }

    info!(
        "wrote {} frame(s), final view {:?}",
        surface.presented(),
        explorer.view()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        process::exit(1);
    }
}
