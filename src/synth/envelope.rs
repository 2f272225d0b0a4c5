//! Per-note pitch and volume trajectories.
//!
//! Before a note is rendered, its effect is resolved into plain
//! interpolation endpoints. The oscillator then only ever asks "what is the
//! period and volume at sample `n`", all effect still happening at that
//! point is linear interpolation.

use crate::note::{Effect, Note, Waveform};

/// What a note leaves behind for its successor: the period and volume it
/// ended on, and the waveform it sounded with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteTail {
    pub period: f64,
    pub volume: f64,
    pub waveform: Waveform,
}

/// Interpolation endpoints for a single note span.
///
/// # Examples
///
/// ```
/// use tunesmith::note::{Effect, Note, PitchName, Volume, Waveform};
/// use tunesmith::synth::envelope::NoteEnvelope;
///
/// let note = Note::new(PitchName::A, 4, Waveform::Triangle, Volume::new(6))
///     .with_effect(Effect::FadeOut);
/// let env = NoteEnvelope::for_note(&note, 50.0, None, None, 100, 16);
///
/// // The pitch stays put while the volume fades towards zero.
/// assert_eq!(env.period_at(50), 50.0);
/// assert_eq!(env.volume_at(50), 3.0);
/// // The first note of a tune additionally ramps up from silence.
/// assert_eq!(env.volume_at(0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEnvelope {
    pub period_start: f64,
    pub period_end: f64,
    pub volume_start: f64,
    pub volume_end: f64,
    /// Volume the first samples are blended from.
    pub ramp_up_anchor: f64,
    /// Volume the last samples are blended towards.
    pub ramp_dn_anchor: f64,
    /// Length of the note in samples.
    pub span: usize,
    /// Length of the edge blending windows, already clamped to the span.
    pub ramp: usize,
}

impl NoteEnvelope {
    /// Resolve a note into interpolation endpoints.
    ///
    /// `period` is the note's fundamental period, `previous` the tail of the
    /// note rendered before it (if any) and `next_waveform` the waveform of
    /// the note following it (if any).
    pub fn for_note(
        note: &Note,
        period: f64,
        previous: Option<&NoteTail>,
        next_waveform: Option<Waveform>,
        span: usize,
        ramp_samples: usize,
    ) -> NoteEnvelope {
        let volume = note.volume.as_f64();
        let (period_start, period_end, volume_start, volume_end) =
            match (note.effect, previous) {
                (Effect::Slide, Some(tail)) => (tail.period, period, tail.volume, volume),
                // A slide at the start of a tune has nothing to glide from.
                (Effect::Slide, None) => (period, period, volume, volume),
                (Effect::Drop, _) => (period, 2.0 * period, volume, volume),
                (Effect::FadeIn, _) => (period, period, 0.0, volume),
                (Effect::FadeOut, _) => (period, period, volume, 0.0),
                (Effect::None, _) | (Effect::Vibrato, _) => (period, period, volume, volume),
            };

        let waveform = note.rendered_waveform();
        let ramp_up_anchor = match previous {
            Some(tail) if tail.waveform == waveform => tail.volume,
            _ => 0.0,
        };
        let ramp_dn_anchor = match next_waveform {
            Some(next) if next == waveform => volume_end,
            _ => 0.0,
        };

        NoteEnvelope {
            period_start,
            period_end,
            volume_start,
            volume_end,
            ramp_up_anchor,
            ramp_dn_anchor,
            span,
            // Overlapping ramp windows would blend twice, so both are
            // clamped to half the span.
            ramp: ramp_samples.min(span / 2),
        }
    }

    /// The tail this note leaves behind for its successor.
    pub fn tail(&self, waveform: Waveform) -> NoteTail {
        NoteTail {
            period: self.period_end,
            volume: self.volume_end,
            waveform,
        }
    }

    /// Playback period at sample `n` of the span.
    pub fn period_at(&self, n: usize) -> f64 {
        lerp(
            self.period_start,
            self.period_end,
            n as f64 / self.span as f64,
        )
    }

    /// Volume at sample `n` of the span, including the edge ramps.
    pub fn volume_at(&self, n: usize) -> f64 {
        let mut volume = lerp(
            self.volume_start,
            self.volume_end,
            n as f64 / self.span as f64,
        );
        if self.ramp > 0 {
            if n < self.ramp {
                volume = lerp(self.ramp_up_anchor, volume, n as f64 / self.ramp as f64);
            }
            let from_end = self.span - 1 - n;
            if from_end < self.ramp {
                volume = lerp(
                    self.ramp_dn_anchor,
                    volume,
                    from_end as f64 / self.ramp as f64,
                );
            }
        }
        volume
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::note::{PitchName, Volume};

    fn plain(volume: u8) -> Note {
        Note::new(PitchName::C, 3, Waveform::Triangle, Volume::new(volume))
    }

    #[test]
    fn plain_notes_hold_their_endpoints() {
        let env = NoteEnvelope::for_note(&plain(5), 84.0, None, None, 100, 16);
        assert_eq!(env.period_start, 84.0);
        assert_eq!(env.period_end, 84.0);
        assert_eq!(env.volume_start, 5.0);
        assert_eq!(env.volume_end, 5.0);
        assert_eq!(env.period_at(0), env.period_at(99));
    }

    #[test]
    fn drop_falls_an_octave() {
        let note = plain(5).with_effect(Effect::Drop);
        let env = NoteEnvelope::for_note(&note, 84.0, None, None, 100, 16);
        assert_eq!(env.period_start, 84.0);
        assert_eq!(env.period_end, 168.0);
        // Halfway through, the pitch sits halfway down.
        assert_eq!(env.period_at(50), 126.0);
    }

    #[test]
    fn slide_picks_up_the_previous_tail() {
        let tail = NoteTail {
            period: 60.0,
            volume: 3.0,
            waveform: Waveform::Triangle,
        };
        let note = plain(7).with_effect(Effect::Slide);
        let env = NoteEnvelope::for_note(&note, 84.0, Some(&tail), None, 100, 16);
        assert_eq!(env.period_start, 60.0);
        assert_eq!(env.period_end, 84.0);
        assert_eq!(env.volume_start, 3.0);
        assert_eq!(env.volume_end, 7.0);
    }

    #[test]
    fn slide_without_predecessor_stays_put() {
        let note = plain(7).with_effect(Effect::Slide);
        let env = NoteEnvelope::for_note(&note, 84.0, None, None, 100, 16);
        assert_eq!(env.period_start, 84.0);
        assert_eq!(env.period_end, 84.0);
        assert_eq!(env.volume_start, 7.0);
    }

    #[test]
    fn fades_touch_zero() {
        let fade_in = plain(6).with_effect(Effect::FadeIn);
        let env = NoteEnvelope::for_note(&fade_in, 84.0, None, None, 100, 16);
        assert_eq!(env.volume_start, 0.0);
        assert_eq!(env.volume_end, 6.0);

        let fade_out = plain(6).with_effect(Effect::FadeOut);
        let env = NoteEnvelope::for_note(&fade_out, 84.0, None, None, 100, 16);
        assert_eq!(env.volume_start, 6.0);
        assert_eq!(env.volume_end, 0.0);
    }

    #[test]
    fn ramps_anchor_to_matching_neighbours() {
        let tail = NoteTail {
            period: 60.0,
            volume: 4.0,
            waveform: Waveform::Triangle,
        };
        let env = NoteEnvelope::for_note(
            &plain(7),
            84.0,
            Some(&tail),
            Some(Waveform::Triangle),
            100,
            16,
        );
        assert_eq!(env.ramp_up_anchor, 4.0);
        assert_eq!(env.ramp_dn_anchor, 7.0);
    }

    #[test]
    fn ramps_anchor_to_silence_at_waveform_changes() {
        let tail = NoteTail {
            period: 60.0,
            volume: 4.0,
            waveform: Waveform::Organ,
        };
        let env = NoteEnvelope::for_note(
            &plain(7),
            84.0,
            Some(&tail),
            Some(Waveform::Noise),
            100,
            16,
        );
        assert_eq!(env.ramp_up_anchor, 0.0);
        assert_eq!(env.ramp_dn_anchor, 0.0);
    }

    #[test]
    fn lone_notes_ramp_from_and_to_silence() {
        let env = NoteEnvelope::for_note(&plain(7), 84.0, None, None, 100, 16);
        for n in 0..16 {
            assert_eq!(env.volume_at(n), 7.0 * n as f64 / 16.0);
        }
        for n in 16..84 {
            assert_eq!(env.volume_at(n), 7.0);
        }
        for n in 84..100 {
            assert_eq!(env.volume_at(n), 7.0 * (99 - n) as f64 / 16.0);
        }
    }

    #[test]
    fn matching_anchors_make_ramps_invisible() {
        let tail = NoteTail {
            period: 84.0,
            volume: 5.0,
            waveform: Waveform::Triangle,
        };
        let env = NoteEnvelope::for_note(
            &plain(5),
            84.0,
            Some(&tail),
            Some(Waveform::Triangle),
            100,
            16,
        );
        for n in 0..100 {
            assert_eq!(env.volume_at(n), 5.0);
        }
    }

    #[test]
    fn ramp_windows_clamp_to_short_spans() {
        let env = NoteEnvelope::for_note(&plain(7), 84.0, None, None, 8, 16);
        assert_eq!(env.ramp, 4);
        // Rising through the first half, falling through the second.
        assert_eq!(env.volume_at(0), 0.0);
        assert_eq!(env.volume_at(3), 7.0 * 3.0 / 4.0);
        assert_eq!(env.volume_at(4), 7.0 * 3.0 / 4.0);
        assert_eq!(env.volume_at(7), 0.0);
    }

    #[test]
    fn single_sample_spans_skip_the_ramps() {
        let env = NoteEnvelope::for_note(&plain(7), 84.0, None, None, 1, 16);
        assert_eq!(env.ramp, 0);
        assert_eq!(env.volume_at(0), 7.0);
    }
}
