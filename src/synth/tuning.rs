// tunesmith -- a chiptune synthesizer for tiny tunes
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::note::PitchName;

use super::SynthError;

/// Maps pitch names and octaves to playback periods at a fixed sample rate.
///
/// All twelve names carry their equal-tempered frequency at octave 4, other
/// octaves double or halve from there.
///
/// # Examples
///
/// ```
/// use tunesmith::note::PitchName;
/// use tunesmith::synth::tuning::Tuning;
///
/// let tuning = Tuning::new(22050);
/// assert_eq!(tuning.frequency(PitchName::A, 4), 440.0);
/// assert_eq!(tuning.frequency(PitchName::A, 5), 880.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    sample_rate: u32,
}

impl Tuning {
    pub fn new(sample_rate: u32) -> Tuning {
        Tuning { sample_rate }
    }

    /// The frequency in Hertz of a pitch name at octave 4.
    pub fn reference_frequency(pitch: PitchName) -> f64 {
        match pitch {
            PitchName::A => 440.00,
            PitchName::ASharp => 466.16,
            PitchName::B => 493.88,
            PitchName::C => 523.25,
            PitchName::CSharp => 554.37,
            PitchName::D => 587.33,
            PitchName::DSharp => 622.25,
            PitchName::E => 659.25,
            PitchName::F => 698.46,
            PitchName::FSharp => 739.99,
            PitchName::G => 783.99,
            PitchName::GSharp => 830.61,
        }
    }

    /// The frequency in Hertz of a pitch in an arbitrary octave.
    pub fn frequency(&self, pitch: PitchName, octave: i32) -> f64 {
        Self::reference_frequency(pitch) * 2.0f64.powi(octave - 4)
    }

    /// The fundamental period of a pitch, in samples.
    ///
    /// Extreme octaves overflow or underflow the floating point range and
    /// are rejected, a usable period is always finite and positive.
    pub fn period(&self, pitch: PitchName, octave: i32) -> Result<f64, SynthError> {
        let period = f64::from(self.sample_rate) / self.frequency(pitch, octave);
        if period.is_finite() && period > 0.0 {
            Ok(period)
        } else {
            Err(SynthError::InvalidPitch { pitch, octave })
        }
    }
}
