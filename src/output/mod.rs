pub mod wav;

use std::io;

/// Where finished PCM samples end up.
///
/// The renderer itself only ever produces sample vectors, sinks turn them
/// into something lasting. Keeping this behind a trait lets tests capture
/// the output in memory instead of touching the file system.
pub trait PcmSink {
    /// Persist a block of mono 16 bit samples recorded at `sample_rate`.
    fn emit(&mut self, samples: &[i16], sample_rate: u32) -> io::Result<()>;
}

/// A sink collecting everything it is given, for inspection in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub samples: Vec<i16>,
    pub sample_rate: Option<u32>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }
}

impl PcmSink for MemorySink {
    fn emit(&mut self, samples: &[i16], sample_rate: u32) -> io::Result<()> {
        self.samples.extend_from_slice(samples);
        self.sample_rate = Some(sample_rate);
        Ok(())
    }
}
