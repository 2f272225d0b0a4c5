use rand::Rng;

use crate::note::{Effect, Volume, Waveform};
use crate::wavetable::WaveTable;

use super::envelope::NoteEnvelope;

/// Vibrato flips direction once the period offset leaves this band (percent).
const VIBRATO_DEPTH: f64 = 2.0;

/// A single noise jitter step covers at most an eighth of the table.
const JITTER_STEP: f64 = 8.0;

/// An oscillator reading a wave table through a fractional phase accumulator.
///
/// The read phase is the one piece of state that survives from note to
/// note: it is only ever advanced, never reset, so that neighbouring notes
/// of the same waveform join without a discontinuity and slides stay
/// seamless. Vibrato and noise state is local to each note.
#[derive(Debug)]
pub struct Oscillator {
    phase: f64,
}

impl Oscillator {
    pub fn new() -> Oscillator {
        Oscillator { phase: 0.0 }
    }

    /// The current read position, in table entries.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Render one note span into `out`.
    ///
    /// Each sample reads the table at the current phase, then advances the
    /// phase by `table.len() / period` so that one cycle of the table spans
    /// one fundamental period. Vibrato stretches the period by a slowly
    /// oscillating factor, noise displaces the read position by a random
    /// offset accumulated per sample.
    pub fn render_note<R: Rng>(
        &mut self,
        table: &WaveTable,
        envelope: &NoteEnvelope,
        waveform: Waveform,
        effect: Effect,
        rng: &mut R,
        out: &mut Vec<i16>,
    ) {
        let len = table.len() as f64;
        let mut vibrato_offset = 0.0;
        let mut vibrato_direction = 1.0;
        let mut jitter = 0.0;

        out.reserve(envelope.span);
        for n in 0..envelope.span {
            let period = envelope.period_at(n);
            let volume = envelope.volume_at(n);

            let read_phase = match waveform {
                Waveform::Noise => self.phase + jitter,
                _ => self.phase,
            };
            out.push(scale(table.at(read_phase), volume));

            if let Effect::Vibrato = effect {
                vibrato_offset += vibrato_direction / (12.0 * period);
                if vibrato_offset.abs() > VIBRATO_DEPTH {
                    vibrato_direction = -vibrato_direction;
                }
            }

            self.phase += len / (period * (1.0 + vibrato_offset / 100.0));
            self.phase %= len;

            if let Waveform::Noise = waveform {
                jitter += rng.gen_range(-0.5..0.5) * (len / JITTER_STEP);
                jitter = jitter.rem_euclid(len);
            }
        }
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Oscillator::new()
    }
}

/// Scale a table sample by a volume between 0 and `MAX_VOLUME`, truncating
/// towards zero like the integer hardware this emulates.
fn scale(sample: i16, volume: f64) -> i16 {
    (f64::from(sample) * volume / Volume::MAX.as_f64()) as i16
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::note::{Note, PitchName};
    use crate::wavetable::{Tables, MAX_LEVEL, MIN_LEVEL};

    fn fixed_envelope(period: f64, volume: f64, span: usize) -> NoteEnvelope {
        NoteEnvelope {
            period_start: period,
            period_end: period,
            volume_start: volume,
            volume_end: volume,
            ramp_up_anchor: volume,
            ramp_dn_anchor: volume,
            span,
            ramp: 0,
        }
    }

    fn render(
        oscillator: &mut Oscillator,
        waveform: Waveform,
        effect: Effect,
        envelope: &NoteEnvelope,
        seed: u64,
    ) -> Vec<i16> {
        let tables = Tables::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut out = Vec::new();
        oscillator.render_note(
            tables.table(waveform),
            envelope,
            waveform,
            effect,
            &mut rng,
            &mut out,
        );
        out
    }

    #[test]
    fn full_volume_walks_the_table() {
        let mut oscillator = Oscillator::new();
        // A period of 102 samples advances the 510-entry triangle by exactly
        // 5 entries per sample, so expected read positions stay exact.
        let envelope = fixed_envelope(102.0, 7.0, 400);
        let out = render(&mut oscillator, Waveform::Triangle, Effect::None, &envelope, 0);

        let tables = Tables::new();
        let triangle = tables.table(Waveform::Triangle);
        let increment = triangle.len() as f64 / 102.0;
        assert_eq!(increment, 5.0);
        for (n, sample) in out.iter().enumerate() {
            assert_eq!(*sample, triangle.at(n as f64 * increment));
        }
    }

    #[test]
    fn samples_stay_within_the_channel_range() {
        let mut oscillator = Oscillator::new();
        let envelope = fixed_envelope(3.7, 7.0, 2000);
        let out = render(&mut oscillator, Waveform::Noise, Effect::None, &envelope, 99);
        for sample in out {
            assert!(sample >= MIN_LEVEL && sample <= MAX_LEVEL);
        }
    }

    #[test]
    fn phase_survives_between_notes() {
        let envelope = fixed_envelope(84.28, 7.0, 500);
        let long_envelope = fixed_envelope(84.28, 7.0, 1000);

        let mut split = Oscillator::new();
        let mut first = render(&mut split, Waveform::Triangle, Effect::None, &envelope, 0);
        let second = render(&mut split, Waveform::Triangle, Effect::None, &envelope, 0);
        first.extend(second);

        let mut joined = Oscillator::new();
        let whole = render(
            &mut joined,
            Waveform::Triangle,
            Effect::None,
            &long_envelope,
            0,
        );

        assert_eq!(first, whole);
        assert_eq!(split.phase(), joined.phase());
    }

    #[test]
    fn phase_stays_in_table_bounds() {
        let mut oscillator = Oscillator::new();
        let envelope = fixed_envelope(1.0, 7.0, 300);
        render(&mut oscillator, Waveform::Organ, Effect::None, &envelope, 0);
        let len = Tables::new().table(Waveform::Organ).len() as f64;
        assert!(oscillator.phase() >= 0.0 && oscillator.phase() < len);
    }

    #[test]
    fn vibrato_bends_the_pitch() {
        let envelope = fixed_envelope(50.0, 7.0, 2000);

        let mut straight = Oscillator::new();
        let plain = render(
            &mut straight,
            Waveform::Triangle,
            Effect::None,
            &envelope,
            0,
        );
        let mut bent = Oscillator::new();
        let wobbly = render(
            &mut bent,
            Waveform::Triangle,
            Effect::Vibrato,
            &envelope,
            0,
        );

        assert_ne!(plain, wobbly);
        // The wobble drifts the phase, but never out of bounds.
        let len = Tables::new().table(Waveform::Triangle).len() as f64;
        assert!(bent.phase() >= 0.0 && bent.phase() < len);
    }

    #[test]
    fn noise_is_reproducible_per_seed() {
        let envelope = fixed_envelope(84.28, 5.0, 1000);
        let note = Note::new(PitchName::C, 3, Waveform::Noise, Volume::new(5));
        assert_eq!(note.rendered_waveform(), Waveform::Noise);

        let mut a = Oscillator::new();
        let mut b = Oscillator::new();
        let mut c = Oscillator::new();
        let first = render(&mut a, Waveform::Noise, Effect::None, &envelope, 42);
        let again = render(&mut b, Waveform::Noise, Effect::None, &envelope, 42);
        let other = render(&mut c, Waveform::Noise, Effect::None, &envelope, 43);

        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn zero_volume_is_silent() {
        let mut oscillator = Oscillator::new();
        let envelope = fixed_envelope(84.28, 0.0, 200);
        let out = render(&mut oscillator, Waveform::Triangle, Effect::None, &envelope, 0);
        assert!(out.iter().all(|s| *s == 0));
    }
}
