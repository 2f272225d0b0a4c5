// tunesmith -- a chiptune synthesizer for tiny tunes
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A couple of built-in tunes.

use crate::note::{Effect, Note, PitchName, Tune, Volume, Waveform};

/// Names accepted by [`by_name`](by_name).
pub const NAMES: [&str; 2] = ["repair", "showcase"];

/// Look up a built-in tune by name.
pub fn by_name(name: &str) -> Option<Tune> {
    match name {
        "repair" => Some(repair_jingle()),
        "showcase" => Some(showcase()),
        _ => None,
    }
}

/// A transcription of the repair jingle from an old game jam entry: four
/// bars of a bouncy triangle figure, the third bar filling its rests with
/// extra bass notes.
pub fn repair_jingle() -> Tune {
    fn triangle(pitch: PitchName, octave: i32, volume: u8) -> Note {
        Note::new(pitch, octave, Waveform::Triangle, Volume::new(volume))
    }

    let mut notes = Vec::with_capacity(32);
    for bar in 0..4 {
        let busy_bar = bar == 2;
        notes.push(triangle(PitchName::DSharp, 2, 7));
        notes.push(triangle(PitchName::DSharp, 1, 7));
        notes.push(triangle(PitchName::ASharp, 1, 6));
        notes.push(triangle(PitchName::DSharp, 1, 7));
        notes.push(triangle(PitchName::FSharp, 2, 5));
        notes.push(if busy_bar {
            triangle(PitchName::DSharp, 1, 7)
        } else {
            Note::rest()
        });
        notes.push(triangle(PitchName::FSharp, 2, 3));
        notes.push(if busy_bar {
            triangle(PitchName::DSharp, 1, 7)
        } else {
            Note::rest()
        });
    }
    Tune::new(notes)
}

/// A little tour through every waveform and effect.
pub fn showcase() -> Tune {
    let triangle = |pitch, octave| Note::new(pitch, octave, Waveform::Triangle, Volume::new(7));
    let organ = |pitch, octave| Note::new(pitch, octave, Waveform::Organ, Volume::new(6));
    let noise = |pitch, octave| Note::new(pitch, octave, Waveform::Noise, Volume::new(5));

    Tune::new(vec![
        triangle(PitchName::C, 3),
        triangle(PitchName::C, 3).with_effect(Effect::Vibrato),
        organ(PitchName::D, 3),
        organ(PitchName::E, 3).with_effect(Effect::Slide),
        triangle(PitchName::G, 3).with_effect(Effect::Drop),
        Note::rest(),
        noise(PitchName::C, 2),
        noise(PitchName::C, 2).with_effect(Effect::FadeOut),
        organ(PitchName::A, 3).with_effect(Effect::FadeIn),
        organ(PitchName::A, 3).with_effect(Effect::FadeOut),
    ])
}
