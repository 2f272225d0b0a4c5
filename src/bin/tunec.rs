// tunesmith -- a chiptune synthesizer for tiny tunes
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `tunec` - pronounced *tune-c*, is the compiler for melody files to wav files.

use std::io;
use std::path::PathBuf;

use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use structopt::StructOpt;

use tunesmith::melody;
use tunesmith::note::Tune;
use tunesmith::output::wav::WavFileSink;
use tunesmith::output::PcmSink;
use tunesmith::synth::{RenderConfig, Renderer};
use tunesmith::tunes;

#[derive(Debug, StructOpt)]
#[structopt(name = "tunec", about = "Rendering note tables into chiptunes")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// A melody file to render.
    #[structopt(parse(from_os_str), required_unless = "demo", conflicts_with = "demo")]
    source: Option<PathBuf>,

    /// Render one of the built-in tunes instead of a melody file.
    #[structopt(long, possible_values = &tunes::NAMES)]
    demo: Option<String>,

    /// Output wav file. Defaults to `tune.wav`.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Seed for the noise generator.
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Duration of every note, in samples.
    #[structopt(long)]
    samples_per_note: Option<usize>,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let tune = load_tune(&opt)?;

    let mut config = RenderConfig::default();
    if let Some(samples) = opt.samples_per_note {
        config.samples_per_note = samples;
    }

    let renderer = Renderer::new(config);
    let samples = renderer
        .render_pcm(&tune, &mut Pcg32::seed_from_u64(opt.seed))
        .map_err(invalid_input)?;

    let output = opt.output.unwrap_or_else(|| PathBuf::from("tune.wav"));
    info!(
        "writing {} samples ({:.2} seconds) to {}",
        samples.len(),
        samples.len() as f64 / f64::from(config.sample_rate),
        output.display()
    );
    WavFileSink::new(output).emit(&samples, config.sample_rate)
}

fn load_tune(opt: &Opt) -> io::Result<Tune> {
    if let Some(source) = &opt.source {
        let text = std::fs::read_to_string(source)?;
        melody::parse_tune(&text).map_err(invalid_input)
    } else if let Some(name) = &opt.demo {
        tunes::by_name(name)
            .ok_or_else(|| invalid_input(format!("there is no built-in tune named '{}'", name)))
    } else {
        Err(invalid_input("pass a melody file or pick a --demo tune"))
    }
}

fn invalid_input<E: std::fmt::Display>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}
