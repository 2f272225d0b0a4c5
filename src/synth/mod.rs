//! This namespace contains all the parts converting from note data to wave data.

pub mod envelope;
pub mod oscillator;
pub mod tuning;

use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use snafu::Snafu;

use crate::note::{Note, PitchName, Tune};
use crate::wavetable::Tables;

use envelope::{NoteEnvelope, NoteTail};
use oscillator::Oscillator;
use tuning::Tuning;

/// Sample rate rendered tunes are meant to be played back at.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Default duration of a note, 7.5 notes per second at the default rate.
pub const DEFAULT_SAMPLES_PER_NOTE: usize = 2940;

/// Default length of the blending window at both edges of every note.
pub const DEFAULT_RAMP_SAMPLES: usize = 16;

/// Gain that lifts raw chip samples into the 16 bit output range.
pub const OUTPUT_GAIN: i16 = 64;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum SynthError {
    #[snafu(display(
        "pitch {:?} in octave {} does not resolve to a positive period",
        pitch,
        octave
    ))]
    InvalidPitch { pitch: PitchName, octave: i32 },

    #[snafu(display("notes must span at least one sample"))]
    ZeroNoteSpan,

    #[snafu(display(
        "ramp window of {} samples does not fit into notes of {} samples",
        ramp_samples,
        samples_per_note
    ))]
    RampExceedsNote {
        ramp_samples: usize,
        samples_per_note: usize,
    },

    #[snafu(display("cannot render an empty tune"))]
    EmptyTune,
}

/// Settings shared by all notes of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub sample_rate: u32,
    pub samples_per_note: usize,
    pub ramp_samples: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            samples_per_note: DEFAULT_SAMPLES_PER_NOTE,
            ramp_samples: DEFAULT_RAMP_SAMPLES,
        }
    }
}

/// State carried across the note loop. The oscillator phase and the tail of
/// the last note are the only memory one note has of another.
#[derive(Debug)]
struct RenderState {
    oscillator: Oscillator,
    previous: Option<NoteTail>,
}

/// Renders tunes into raw chip samples.
///
/// # Examples
///
/// ```
/// use tunesmith::note::{Note, PitchName, Tune, Volume, Waveform};
/// use tunesmith::synth::Renderer;
///
/// let tune = Tune::new(vec![Note::new(
///     PitchName::A,
///     4,
///     Waveform::Triangle,
///     Volume::MAX,
/// )])
/// .with_samples_per_note(200);
///
/// let renderer = Renderer::default();
/// let samples = renderer.render_seeded(&tune, 0).unwrap();
/// assert_eq!(samples.len(), 200);
/// ```
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    tables: Tables,
    tuning: Tuning,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Renderer {
        Renderer {
            config,
            tables: Tables::new(),
            tuning: Tuning::new(config.sample_rate),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a tune into raw chip samples in `[-128, 128)`.
    ///
    /// The random source only feeds noise notes; tunes without noise render
    /// identically no matter which generator is passed.
    pub fn render<R: Rng>(&self, tune: &Tune, rng: &mut R) -> Result<Vec<i16>, SynthError> {
        let samples_per_note = tune
            .samples_per_note()
            .unwrap_or(self.config.samples_per_note);
        self.check(tune, samples_per_note)?;

        info!(
            "rendering {} notes at {} samples per note",
            tune.len(),
            samples_per_note
        );
        if tune.samples_per_note().is_some() {
            debug!("tune overrides note duration to {} samples", samples_per_note);
        }

        let mut samples = Vec::with_capacity(samples_per_note * tune.len());
        let mut state = RenderState {
            oscillator: Oscillator::new(),
            previous: None,
        };

        let notes = tune.notes();
        for (index, note) in notes.iter().enumerate() {
            let waveform = note.rendered_waveform();
            let period = self.period_of(note)?;
            let next_waveform = notes.get(index + 1).map(Note::rendered_waveform);
            let envelope = NoteEnvelope::for_note(
                note,
                period,
                state.previous.as_ref(),
                next_waveform,
                samples_per_note,
                self.config.ramp_samples,
            );
            trace!(
                "note {}: {:?} period {:.2} -> {:.2}, volume {:.1} -> {:.1}",
                index,
                waveform,
                envelope.period_start,
                envelope.period_end,
                envelope.volume_start,
                envelope.volume_end
            );

            state.oscillator.render_note(
                self.tables.table(waveform),
                &envelope,
                waveform,
                note.effect,
                rng,
                &mut samples,
            );
            state.previous = Some(envelope.tail(waveform));
        }
        Ok(samples)
    }

    /// Render with a generator seeded from `seed`, for reproducible output.
    pub fn render_seeded(&self, tune: &Tune, seed: u64) -> Result<Vec<i16>, SynthError> {
        self.render(tune, &mut Pcg32::seed_from_u64(seed))
    }

    /// Render and scale into the 16 bit PCM range.
    pub fn render_pcm<R: Rng>(&self, tune: &Tune, rng: &mut R) -> Result<Vec<i16>, SynthError> {
        let raw = self.render(tune, rng)?;
        Ok(raw.iter().map(|s| s * OUTPUT_GAIN).collect())
    }

    /// The playback period of a note. Rests read the one-entry silence
    /// table, any positive period works for them; using one sample keeps
    /// the carried phase unchanged modulo the table.
    fn period_of(&self, note: &Note) -> Result<f64, SynthError> {
        match note.pitch {
            Some(pitch) => self.tuning.period(pitch, note.octave),
            None => Ok(1.0),
        }
    }

    fn check(&self, tune: &Tune, samples_per_note: usize) -> Result<(), SynthError> {
        if tune.is_empty() {
            return Err(SynthError::EmptyTune);
        }
        if samples_per_note == 0 {
            return Err(SynthError::ZeroNoteSpan);
        }
        if self.config.ramp_samples >= samples_per_note {
            return Err(SynthError::RampExceedsNote {
                ramp_samples: self.config.ramp_samples,
                samples_per_note,
            });
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(RenderConfig::default())
    }
}
