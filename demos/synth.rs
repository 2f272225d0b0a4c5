//! Example demonstrating how to use the low-level synthesis interface.

use std::io;
use std::path::Path;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use tunesmith::note::{Effect, Note, PitchName, Tune, Volume, Waveform};
use tunesmith::output::wav;
use tunesmith::synth::{RenderConfig, Renderer};

fn main() -> io::Result<()> {
    // A rising organ arpeggio, sliding back onto the root at the end.
    let organ = |pitch, octave| Note::new(pitch, octave, Waveform::Organ, Volume::new(6));

    let mut notes = vec![
        organ(PitchName::C, 3),
        organ(PitchName::E, 3),
        organ(PitchName::G, 3),
        organ(PitchName::C, 4),
    ];
    notes.push(organ(PitchName::C, 3).with_effect(Effect::Slide));
    notes.push(organ(PitchName::C, 3).with_effect(Effect::FadeOut));

    let config = RenderConfig::default();
    let renderer = Renderer::new(config);
    let samples = renderer
        .render_pcm(&Tune::new(notes), &mut Pcg32::seed_from_u64(1))
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    wav::write_wav(
        Path::new("arpeggio.wav"),
        &samples,
        config.sample_rate,
        1,
    )
}
