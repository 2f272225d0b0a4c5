//! Pre-rendered single-cycle wave tables.
//!
//! Every voice of the synthesizer reads one of the tables in this module
//! over and over at a varying rate. The tables hold raw chip samples in
//! the half-open interval `[-CHANNEL_RANGE / 2, CHANNEL_RANGE / 2)`.

use crate::note::Waveform;

/// Number of representable sample levels.
pub const CHANNEL_RANGE: i32 = 256;

/// Smallest representable sample level.
pub const MIN_LEVEL: i16 = -(CHANNEL_RANGE as i16 / 2);

/// Largest representable sample level.
pub const MAX_LEVEL: i16 = CHANNEL_RANGE as i16 / 2 - 1;

/// One cycle of a waveform, sampled into chip levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveTable {
    samples: Vec<i16>,
}

impl WaveTable {
    fn new(samples: Vec<i16>) -> WaveTable {
        debug_assert!(!samples.is_empty());
        WaveTable { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read the table at a fractional phase.
    ///
    /// The phase is truncated to a whole index and wrapped into the table,
    /// so any finite phase is a valid read position.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunesmith::wavetable::Tables;
    /// use tunesmith::note::Waveform;
    ///
    /// let tables = Tables::new();
    /// let triangle = tables.table(Waveform::Triangle);
    /// let len = triangle.len() as f64;
    /// assert_eq!(triangle.at(0.25), triangle.at(len + 0.25));
    /// ```
    pub fn at(&self, phase: f64) -> i16 {
        let len = self.samples.len() as i64;
        let index = (phase.floor() as i64).rem_euclid(len) as usize;
        self.samples[index]
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }
}

/// The bank of tables shared by all notes of a render.
#[derive(Debug, Clone)]
pub struct Tables {
    triangle: WaveTable,
    organ: WaveTable,
    silence: WaveTable,
}

impl Tables {
    pub fn new() -> Tables {
        let triangle = triangle();
        let organ = organ(&triangle);
        Tables {
            triangle,
            organ,
            silence: WaveTable::new(vec![0]),
        }
    }

    /// The table a waveform reads from. Noise shares the triangle table,
    /// its character comes entirely from jittered read positions.
    pub fn table(&self, waveform: Waveform) -> &WaveTable {
        match waveform {
            Waveform::Triangle | Waveform::Noise => &self.triangle,
            Waveform::Organ => &self.organ,
            Waveform::Silence => &self.silence,
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Tables::new()
    }
}

/// Full-range triangle: up from the bottom level to the top, then back down,
/// such that consecutive entries (wrapping around) always differ by one.
fn triangle() -> WaveTable {
    let mut samples = Vec::with_capacity(2 * (CHANNEL_RANGE as usize - 1));
    samples.extend(MIN_LEVEL..MAX_LEVEL);
    samples.extend((MIN_LEVEL + 1..=MAX_LEVEL).rev());
    WaveTable::new(samples)
}

/// The triangle followed by a half-amplitude copy of itself. Alternating
/// loud and soft cycles approximate a 2:1 overtone mix.
fn organ(triangle: &WaveTable) -> WaveTable {
    let mut samples = Vec::with_capacity(2 * triangle.len());
    samples.extend_from_slice(triangle.samples());
    samples.extend(triangle.samples().iter().map(|s| s / 2));
    WaveTable::new(samples)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn triangle_covers_full_range() {
        let tables = Tables::new();
        let triangle = tables.table(Waveform::Triangle);
        assert_eq!(triangle.len(), 510);
        assert_eq!(triangle.samples().iter().min(), Some(&MIN_LEVEL));
        assert_eq!(triangle.samples().iter().max(), Some(&MAX_LEVEL));
    }

    #[test]
    fn triangle_steps_by_one() {
        let tables = Tables::new();
        let samples = tables.table(Waveform::Triangle).samples();
        for window in samples.windows(2) {
            assert_eq!((window[1] - window[0]).abs(), 1);
        }
        // The cycle also closes smoothly.
        let first = samples[0];
        let last = samples[samples.len() - 1];
        assert_eq!((first - last).abs(), 1);
    }

    #[test]
    fn organ_is_triangle_with_soft_echo() {
        let tables = Tables::new();
        let triangle = tables.table(Waveform::Triangle).samples();
        let organ = tables.table(Waveform::Organ).samples();
        assert_eq!(organ.len(), 2 * triangle.len());
        assert_eq!(&organ[..triangle.len()], triangle);
        for (loud, soft) in triangle.iter().zip(&organ[triangle.len()..]) {
            assert_eq!(loud / 2, *soft);
        }
    }

    #[test]
    fn noise_reads_the_triangle() {
        let tables = Tables::new();
        assert_eq!(
            tables.table(Waveform::Noise).samples(),
            tables.table(Waveform::Triangle).samples()
        );
    }

    #[test]
    fn silence_is_a_single_zero() {
        let tables = Tables::new();
        let silence = tables.table(Waveform::Silence);
        assert_eq!(silence.samples(), &[0]);
        // Any phase reads the same zero.
        assert_eq!(silence.at(0.0), 0);
        assert_eq!(silence.at(1234.5), 0);
    }

    #[test]
    fn reads_wrap_around() {
        let tables = Tables::new();
        let triangle = tables.table(Waveform::Triangle);
        let len = triangle.len() as f64;
        assert_eq!(triangle.at(0.9), triangle.at(len + 0.9));
        assert_eq!(triangle.at(3.2), triangle.at(3.7));
        assert_eq!(triangle.at(-1.0), triangle.at(len - 1.0));
    }
}
