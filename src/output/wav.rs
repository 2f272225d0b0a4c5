// tunesmith -- a chiptune synthesizer for tiny tunes
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Writing rendered tunes as uncompressed 16 bit PCM wav files.

use std::io;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

use super::PcmSink;

/// Write `samples` to a wav file at `path`.
///
/// Multi-channel data is expected interleaved, the way it also ends up in
/// the file.
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32, channels: u16) -> io::Result<()> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).map_err(to_io)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(to_io)?;
    }
    writer.finalize().map_err(to_io)
}

fn to_io(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(io) => io,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

/// A `PcmSink` writing each emitted block as a mono wav file.
#[derive(Debug)]
pub struct WavFileSink {
    path: PathBuf,
}

impl WavFileSink {
    pub fn new(path: impl Into<PathBuf>) -> WavFileSink {
        WavFileSink { path: path.into() }
    }
}

impl PcmSink for WavFileSink {
    fn emit(&mut self, samples: &[i16], sample_rate: u32) -> io::Result<()> {
        write_wav(&self.path, samples, sample_rate, 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hound::WavReader;

    fn temp_wav(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tunesmith-{}-{}.wav", name, std::process::id()))
    }

    #[test]
    fn files_read_back_unchanged() {
        let path = temp_wav("roundtrip");
        let samples: Vec<i16> = vec![0, 64, -8192, 8128, i16::max_value()];
        write_wav(&path, &samples, 22050, 1).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);

        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn sink_writes_the_file() {
        let path = temp_wav("sink");
        let mut sink = WavFileSink::new(&path);
        sink.emit(&[1, 2, 3], 22050).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 3);

        std::fs::remove_file(&path).unwrap();
    }
}
