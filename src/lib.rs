pub mod melody;
pub mod note;
pub mod output;
pub mod synth;
pub mod tunes;
pub mod wavetable;
