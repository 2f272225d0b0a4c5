//! A compact textual format for writing chip tunes.
//!
//! A tune is a whitespace separated list of notes. Every note starts with a
//! pitch name (letter plus optional `#`) and one octave digit, optionally
//! preceded by a minus sign. After that, in this order, a note may carry a
//! waveform letter (`t`riangle, `o`rgan, `n`oise), a volume digit between 0
//! and 7, and an effect symbol:
//!
//! | symbol | effect   |
//! |--------|----------|
//! | `/`    | slide    |
//! | `~`    | vibrato  |
//! | `\`    | drop     |
//! | `<`    | fade in  |
//! | `>`    | fade out |
//!
//! A bare `r` is a rest. Waveform and volume default to a full volume
//! triangle, so the shortest note is just pitch and octave:
//!
//! ```text
//! d#2 d#1 a#1t6 d#1 f#2t5 r f#2t3 r
//! ```

use snafu::Snafu;

use crate::note::{Effect, Note, PitchName, Tune, Volume, Waveform};

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseError {
    #[snafu(display("unexpected symbol '{}' at {}", symbol, position))]
    UnknownSymbol { symbol: char, position: usize },

    #[snafu(display("no pitch is named '{}' (at {})", name, position))]
    UnknownPitch { name: String, position: usize },

    #[snafu(display("the note at {} is missing its octave digit", position))]
    MissingOctave { position: usize },

    #[snafu(display("the volume digit at {} must be between 0 and 7", position))]
    VolumeOutOfRange { position: usize },

    #[snafu(display("stray '{}' at {} after a complete note", symbol, position))]
    TrailingGarbage { symbol: char, position: usize },

    #[snafu(display("unexpected end of input"))]
    UnexpectedEnd,
}

/// Parse a tune from its textual form.
///
/// # Examples
///
/// ```
/// use tunesmith::melody::parse_tune;
///
/// let tune = parse_tune("d#2 d#1 a#1t6 r").unwrap();
/// assert_eq!(tune.len(), 4);
/// assert!(tune.notes()[3].is_rest());
/// ```
pub fn parse_tune(input: &str) -> Result<Tune, ParseError> {
    let mut p = Parser::new(input);
    p.parse_sequence().map(Tune::new)
}

struct Parser<'a> {
    stream: Scan<'a>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut stream = Scan::new(input);
        stream.skip_whitespace();
        Self { stream }
    }

    fn is_eof(&mut self) -> bool {
        self.stream.is_eof()
    }

    fn parse_sequence(&mut self) -> Result<Vec<Note>, ParseError> {
        let mut notes = Vec::new();
        while !self.is_eof() {
            notes.push(self.parse_sym()?);
        }
        Ok(notes)
    }

    fn parse_sym(&mut self) -> Result<Note, ParseError> {
        let (position, symbol) = self.stream.current().ok_or(ParseError::UnexpectedEnd)?;
        let note = match symbol {
            'r' | 'R' => {
                self.stream.advance();
                Note::rest()
            }
            'a'..='g' | 'A'..='G' => self.parse_note()?,
            _ => return Err(ParseError::UnknownSymbol { symbol, position }),
        };
        self.boundary()?;
        self.stream.skip_whitespace();
        Ok(note)
    }

    fn parse_note(&mut self) -> Result<Note, ParseError> {
        // First comes the name, with an optional sharp sign.
        let (start, name) = self.stream.next().ok_or(ParseError::UnexpectedEnd)?;
        let mut pitch_name = name.to_string();
        if let Some((_, '#')) = self.stream.current() {
            self.stream.advance();
            pitch_name.push('#');
        }
        let pitch = match PitchName::parse(&pitch_name) {
            Some(pitch) => pitch,
            None => {
                return Err(ParseError::UnknownPitch {
                    name: pitch_name,
                    position: start,
                })
            }
        };

        // Then the octave: a single digit, possibly negated.
        let negative = self.eat('-');
        let octave = match self.stream.current() {
            Some((_, ch)) if ch.is_ascii_digit() => {
                self.stream.advance();
                let digit = ch.to_digit(10).unwrap() as i32;
                if negative {
                    -digit
                } else {
                    digit
                }
            }
            _ => return Err(ParseError::MissingOctave { position: start }),
        };

        // Then the optional waveform letter,
        let waveform = if self.eat('t') {
            Waveform::Triangle
        } else if self.eat('o') {
            Waveform::Organ
        } else if self.eat('n') {
            Waveform::Noise
        } else {
            Waveform::Triangle
        };

        // the optional volume digit,
        let volume = match self.stream.current() {
            Some((position, ch)) if ch.is_ascii_digit() => {
                self.stream.advance();
                let level = ch.to_digit(10).unwrap() as u8;
                Volume::try_new(level).ok_or(ParseError::VolumeOutOfRange { position })?
            }
            _ => Volume::MAX,
        };

        // and the optional effect symbol.
        let effect = if self.eat('/') {
            Effect::Slide
        } else if self.eat('~') {
            Effect::Vibrato
        } else if self.eat('\\') {
            Effect::Drop
        } else if self.eat('<') {
            Effect::FadeIn
        } else if self.eat('>') {
            Effect::FadeOut
        } else {
            Effect::None
        };

        Ok(Note::new(pitch, octave, waveform, volume).with_effect(effect))
    }

    /// A finished note must be followed by whitespace or the end of input.
    fn boundary(&mut self) -> Result<(), ParseError> {
        match self.stream.current() {
            None => Ok(()),
            Some((_, ch)) if ch.is_whitespace() => Ok(()),
            Some((position, symbol)) => Err(ParseError::TrailingGarbage { symbol, position }),
        }
    }

    /// Consume the next character if it matches, ignoring ASCII case.
    fn eat(&mut self, expected: char) -> bool {
        match self.stream.current() {
            Some((_, ch)) if ch.eq_ignore_ascii_case(&expected) => {
                self.stream.advance();
                true
            }
            _ => false,
        }
    }
}

struct Scan<'a> {
    stream: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Scan<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            stream: input.char_indices().peekable(),
        }
    }

    fn is_eof(&mut self) -> bool {
        self.current().is_none()
    }

    fn current(&mut self) -> Option<(usize, char)> {
        self.stream.peek().cloned()
    }

    fn next(&mut self) -> Option<(usize, char)> {
        self.stream.next()
    }

    fn advance(&mut self) {
        self.stream.next();
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, ch)) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
