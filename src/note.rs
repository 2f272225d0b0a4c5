// tunesmith -- a chiptune synthesizer for tiny tunes
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a chip note is.

/// The twelve pitch names of the chromatic scale.
/// Each name is bound to a reference frequency at octave 4 (see
/// `synth::tuning`), all other octaves are derived by doubling or halving.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PitchName {
    A,
    ASharp,
    B,
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
}

impl PitchName {
    /// Parse a pitch name like `A` or `d#`, case-insensitively.
    /// Only the twelve sharp-based spellings are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunesmith::note::PitchName;
    ///
    /// assert_eq!(PitchName::parse("d#"), Some(PitchName::DSharp));
    /// assert_eq!(PitchName::parse("g"), Some(PitchName::G));
    /// assert_eq!(PitchName::parse("e#"), None);
    /// ```
    pub fn parse(name: &str) -> Option<PitchName> {
        match name.to_ascii_uppercase().as_str() {
            "A" => Some(PitchName::A),
            "A#" => Some(PitchName::ASharp),
            "B" => Some(PitchName::B),
            "C" => Some(PitchName::C),
            "C#" => Some(PitchName::CSharp),
            "D" => Some(PitchName::D),
            "D#" => Some(PitchName::DSharp),
            "E" => Some(PitchName::E),
            "F" => Some(PitchName::F),
            "F#" => Some(PitchName::FSharp),
            "G" => Some(PitchName::G),
            "G#" => Some(PitchName::GSharp),
            _ => None,
        }
    }
}

/// Loudest representable volume level.
pub const MAX_VOLUME: u8 = 7;

/// The loudness of a note, an integer between 0 and `MAX_VOLUME` inclusive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(MAX_VOLUME);
    pub const MIN: Volume = Volume(0);

    /// Convert a raw level to a volume.
    ///
    /// # Panics
    ///
    /// This function panics if `level` is greater than `MAX_VOLUME`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunesmith::note::Volume;
    ///
    /// assert_eq!(Volume::new(7), Volume::MAX);
    /// ```
    pub fn new(level: u8) -> Volume {
        if let Some(v) = Self::try_new(level) {
            v
        } else {
            panic!("volume {} out of range", level);
        }
    }

    pub fn try_new(level: u8) -> Option<Volume> {
        if level <= MAX_VOLUME {
            Some(Volume(level))
        } else {
            None
        }
    }

    /// The raw level between 0 and `MAX_VOLUME`.
    pub fn level(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

/// The shape of the single-cycle wave a note is played with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Waveform {
    /// Plain triangle cycle, the bread-and-butter chip voice.
    Triangle,
    /// A single zero sample. Rests render through this.
    Silence,
    /// Triangle layered with a half-amplitude copy of itself, a rough choir.
    Organ,
    /// Triangle read at randomly jittered positions, perceived as noise.
    Noise,
}

/// Per-note modulation of the pitch or volume envelope.
/// Exactly one effect applies to a note.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    None,
    /// Glide pitch and volume from wherever the previous note ended.
    Slide,
    /// Slow bounded wobble of the playback period.
    Vibrato,
    /// Pitch falls by one octave over the course of the note.
    Drop,
    /// Volume rises from zero to the authored level.
    FadeIn,
    /// Volume falls from the authored level to zero.
    FadeOut,
}

/// A single entry of a tune.
///
/// Rests are notes without a pitch; their octave and waveform are ignored
/// and the silence table is substituted while rendering.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Note {
    pub pitch: Option<PitchName>,
    pub octave: i32,
    pub waveform: Waveform,
    pub volume: Volume,
    pub effect: Effect,
}

impl Note {
    /// A sounding note without any effect.
    pub fn new(pitch: PitchName, octave: i32, waveform: Waveform, volume: Volume) -> Note {
        Note {
            pitch: Some(pitch),
            octave,
            waveform,
            volume,
            effect: Effect::None,
        }
    }

    /// A rest spanning the usual note duration.
    pub fn rest() -> Note {
        Note {
            pitch: None,
            octave: 0,
            waveform: Waveform::Silence,
            volume: Volume::MIN,
            effect: Effect::None,
        }
    }

    /// The same note with `effect` applied.
    pub fn with_effect(self, effect: Effect) -> Note {
        Note { effect, ..self }
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }

    /// The waveform actually used for rendering. Rests always sound through
    /// the silence table, no matter which waveform they carry.
    pub fn rendered_waveform(&self) -> Waveform {
        if self.is_rest() {
            Waveform::Silence
        } else {
            self.waveform
        }
    }
}

/// An ordered sequence of notes, rendered back to back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tune {
    notes: Vec<Note>,
    samples_per_note: Option<usize>,
}

impl Tune {
    pub fn new(notes: Vec<Note>) -> Tune {
        Tune {
            notes,
            samples_per_note: None,
        }
    }

    /// Override the renderer's per-note duration for this tune only.
    pub fn with_samples_per_note(mut self, samples: usize) -> Tune {
        self.samples_per_note = Some(samples);
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn samples_per_note(&self) -> Option<usize> {
        self.samples_per_note
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
