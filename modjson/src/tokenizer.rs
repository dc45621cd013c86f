// SPDX-License-Identifier: Apache-2.0

//! Event-driven, depth-bounded JSON tokenizer.
//!
//! The tokenizer walks the input byte by byte through a small state machine
//! and reports everything it finds through an [`EventSink`]. It keeps no
//! document in memory: string and key events borrow spans of the input, still
//! in escaped form. Depth is bounded up front, with separate ceilings for
//! object and array nesting, so malicious input cannot recurse the consumer.
//!
//! The accepted grammar is JSON with opt-in relaxations ([`TokenOptions`]):
//! comments, single-quoted strings, unquoted object keys, and a raw quote
//! scan that skips escape validation. Only objects and arrays may appear at
//! the root.

use log::debug;

use crate::escape::char2hex;
use crate::number::{self, Number};

/// Default nesting ceiling, for objects and arrays each.
pub const DEFAULT_DEPTH: usize = 32;

/// Tokenizing options: syntax relaxations and depth ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenOptions {
    /// Allow `//` line and `/* */` block comments between tokens.
    pub comments: bool,
    /// Allow single-quoted strings and keys.
    pub single_quotes: bool,
    /// Allow unquoted object keys, terminated by `:` or whitespace.
    pub simple_keys: bool,
    /// Scan strings for the bare closing quote without validating escapes.
    pub unstrict: bool,
    /// Object nesting ceiling; `0` means [`DEFAULT_DEPTH`].
    pub object_depth: usize,
    /// Array nesting ceiling; `0` means [`DEFAULT_DEPTH`].
    pub array_depth: usize,
}

impl Default for TokenOptions {
    fn default() -> Self {
        TokenOptions {
            comments: false,
            single_quotes: false,
            simple_keys: false,
            unstrict: false,
            object_depth: DEFAULT_DEPTH,
            array_depth: DEFAULT_DEPTH,
        }
    }
}

impl TokenOptions {
    pub fn new() -> Self {
        TokenOptions::default()
    }

    pub fn comments(mut self, on: bool) -> Self {
        self.comments = on;
        self
    }

    pub fn single_quotes(mut self, on: bool) -> Self {
        self.single_quotes = on;
        self
    }

    pub fn simple_keys(mut self, on: bool) -> Self {
        self.simple_keys = on;
        self
    }

    pub fn unstrict(mut self, on: bool) -> Self {
        self.unstrict = on;
        self
    }

    pub fn object_depth(mut self, depth: usize) -> Self {
        self.object_depth = depth;
        self
    }

    pub fn array_depth(mut self, depth: usize) -> Self {
        self.array_depth = depth;
        self
    }
}

/// What went wrong, in terms of the construct being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input held no document at all.
    Empty,
    /// The root was not an object or array.
    Start,
    /// A nesting ceiling was exceeded.
    Depth,
    /// The input ended inside a document.
    Trunc,
    /// A string never closed, or held a bad escape or control byte.
    Quote,
    /// A malformed object key, or no `:` after one.
    Key,
    /// A malformed value.
    Value,
    /// A malformed byte after an object closed.
    Object,
    /// A malformed byte after an array closed.
    Array,
    /// The sink stopped the tokenizer.
    Break,
    /// The state machine was driven while already failed.
    State,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Empty => "empty input",
            ErrorKind::Start => "document must start with an object or array",
            ErrorKind::Depth => "nesting too deep",
            ErrorKind::Trunc => "input truncated",
            ErrorKind::Quote => "bad string literal",
            ErrorKind::Key => "bad object key",
            ErrorKind::Value => "bad value",
            ErrorKind::Object => "bad byte after object",
            ErrorKind::Array => "bad byte after array",
            ErrorKind::Break => "stopped by the event sink",
            ErrorKind::State => "tokenizer in a failed state",
        }
    }
}

/// A tokenizing error: what failed, on which byte, and where.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    byte: Option<u8>,
    position: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, byte: Option<u8>, position: usize) -> Self {
        Error {
            kind,
            byte,
            position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The offending byte, or `None` at end of input.
    pub fn byte(&self) -> Option<u8> {
        self.byte
    }

    /// Byte offset of the offending position.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("byte", &self.byte.map(|b| b as char))
            .field("position", &self.position)
            .finish()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.byte {
            Some(b) => write!(
                f,
                "{} at byte {:?}, offset {}",
                self.kind.as_str(),
                b as char,
                self.position
            ),
            None => write!(
                f,
                "{} at end of input, offset {}",
                self.kind.as_str(),
                self.position
            ),
        }
    }
}

impl std::error::Error for Error {}

/// One tokenizing event.
///
/// `Field` and `String` spans borrow the input and are still escaped; decode
/// them with [`JsonString::decode`](crate::JsonString::decode) when the raw
/// text is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    /// An object key.
    Field(&'a [u8]),
    String(&'a [u8]),
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

/// Receiver for tokenizing events.
///
/// `depth` is the nesting level the event belongs to: a container's begin and
/// end both report the depth outside it. Returning `false` stops the
/// tokenizer with [`ErrorKind::Break`].
pub trait EventSink {
    fn event(&mut self, depth: usize, event: Event<'_>) -> bool;
}

impl<F> EventSink for F
where
    F: FnMut(usize, Event<'_>) -> bool,
{
    fn event(&mut self, depth: usize, event: Event<'_>) -> bool {
        self(depth, event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Start,
    ObjectStart,
    ObjectKey,
    ObjectValue,
    ObjectFinish,
    ArrayStart,
    ArrayHalf,
    ArrayFinish,
    Finish,
    Failed,
}

/// `Ok(Some(at))`: continue from `at`. `Ok(None)`: document complete.
type Step = Result<Option<usize>, Error>;

/// The tokenizer state machine.
///
/// A tokenizer is single-shot: [`Tokenizer::parse`] runs one document to
/// completion or error, and [`Tokenizer::reset`] readies it for the next.
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    options: TokenOptions,
    object_max: usize,
    array_max: usize,
    object_depth: usize,
    array_depth: usize,
    tags: Vec<Tag>,
    last_error: Option<Error>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new(TokenOptions::default())
    }
}

impl Tokenizer {
    pub fn new(options: TokenOptions) -> Self {
        let object_max = if options.object_depth > 0 {
            options.object_depth
        } else {
            DEFAULT_DEPTH
        };
        let array_max = if options.array_depth > 0 {
            options.array_depth
        } else {
            DEFAULT_DEPTH
        };
        Tokenizer {
            state: State::Pending,
            options,
            object_max,
            array_max,
            object_depth: 0,
            array_depth: 0,
            tags: Vec::with_capacity(object_max + array_max),
            last_error: None,
        }
    }

    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// Current object nesting level.
    pub fn object_depth(&self) -> usize {
        self.object_depth
    }

    /// Current array nesting level.
    pub fn array_depth(&self) -> usize {
        self.array_depth
    }

    /// Current combined nesting level.
    pub fn depth(&self) -> usize {
        self.object_depth + self.array_depth
    }

    pub fn max_object_depth(&self) -> usize {
        self.object_max
    }

    pub fn max_array_depth(&self) -> usize {
        self.array_max
    }

    pub fn max_depth(&self) -> usize {
        self.object_max + self.array_max
    }

    /// Whether the last parse ran a document to completion.
    pub fn is_finished(&self) -> bool {
        self.state == State::Finish
    }

    /// The error that failed the last parse, if any.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Readies the tokenizer for another document.
    pub fn reset(&mut self) {
        self.state = State::Pending;
        self.object_depth = 0;
        self.array_depth = 0;
        self.tags.clear();
        self.last_error = None;
    }

    /// Tokenizes one whole document, reporting every construct to `sink`.
    pub fn parse<S: EventSink>(
        &mut self,
        input: impl AsRef<[u8]>,
        sink: &mut S,
    ) -> Result<(), Error> {
        let input = input.as_ref();
        let mut at = 0;
        loop {
            let step = match self.state {
                State::Pending => self.pending(input, at),
                State::Start => self.start(input, at),
                State::ObjectStart => self.object_start(input, at, sink),
                State::ObjectKey => self.object_key(input, at, sink),
                State::ObjectValue => self.object_value(input, at, sink),
                State::ObjectFinish => self.object_finish(input, at, sink),
                State::ArrayStart => self.array_start(input, at, sink),
                State::ArrayHalf => self.array_half(input, at, sink),
                State::ArrayFinish => self.array_finish(input, at, sink),
                State::Finish => return Ok(()),
                State::Failed => {
                    Err(Error::new(ErrorKind::State, input.get(at).copied(), at))
                }
            };
            match step {
                Ok(Some(next)) => at = next,
                Ok(None) => return Ok(()),
                Err(err) => {
                    debug!("tokenizer failed: {} (state {:?})", err, self.state);
                    self.state = State::Failed;
                    self.last_error = Some(err);
                    return Err(err);
                }
            }
        }
    }

    fn pending(&mut self, input: &[u8], at: usize) -> Step {
        if input.is_empty() {
            return Err(Error::new(ErrorKind::Empty, None, at));
        }
        self.state = State::Start;
        Ok(Some(at))
    }

    fn start(&mut self, input: &[u8], at: usize) -> Step {
        let at = self.skip(input, at);
        match input.get(at) {
            Some(b'{') => {
                self.state = State::ObjectStart;
                Ok(Some(at + 1))
            }
            Some(b'[') => {
                self.state = State::ArrayStart;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Empty, None, at)),
            Some(&c) => Err(Error::new(ErrorKind::Start, Some(c), at)),
        }
    }

    fn object_start<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        if self.object_depth >= self.object_max {
            return Err(Error::new(ErrorKind::Depth, input.get(at).copied(), at));
        }
        self.emit(input, at, sink, Event::ObjectBegin)?;
        self.object_depth += 1;
        self.tags.push(Tag::Object);

        let at = self.skip(input, at);
        match input.get(at) {
            Some(b'}') => {
                self.state = State::ObjectFinish;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(_) => {
                self.state = State::ObjectKey;
                Ok(Some(at))
            }
        }
    }

    fn object_key<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        let at = self.skip(input, at);
        match input.get(at) {
            Some(b',') => {
                self.state = State::ObjectKey;
                Ok(Some(at + 1))
            }
            Some(b'}') => {
                self.state = State::ObjectFinish;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(b'"') => self.quoted_key(input, at, b'"', sink),
            Some(b'\'') if self.options.single_quotes => self.quoted_key(input, at, b'\'', sink),
            Some(&c) => {
                if self.options.simple_keys {
                    self.simple_key(input, at, sink)
                } else {
                    Err(Error::new(ErrorKind::Quote, Some(c), at))
                }
            }
        }
    }

    fn quoted_key<S: EventSink>(
        &mut self,
        input: &[u8],
        at: usize,
        quo: u8,
        sink: &mut S,
    ) -> Step {
        let start = at + 1;
        let end = self
            .find_quote(input, start, quo)
            .ok_or_else(|| Error::new(ErrorKind::Quote, input.get(start).copied(), start))?;
        self.emit(input, start, sink, Event::Field(&input[start..end]))?;
        self.key_separator(input, end + 1)
    }

    fn simple_key<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        let end = self.find_key_end(input, at);
        if end == at {
            return Err(Error::new(ErrorKind::Key, input.get(at).copied(), at));
        }
        self.emit(input, at, sink, Event::Field(&input[at..end]))?;
        self.key_separator(input, end)
    }

    fn key_separator(&mut self, input: &[u8], at: usize) -> Step {
        let at = self.skip(input, at);
        match input.get(at) {
            Some(b':') => {
                self.state = State::ObjectValue;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(&c) => Err(Error::new(ErrorKind::Key, Some(c), at)),
        }
    }

    fn object_value<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        let at = self.skip(input, at);
        let at = match input.get(at) {
            Some(b'{') => {
                self.state = State::ObjectStart;
                return Ok(Some(at + 1));
            }
            Some(b'[') => {
                self.state = State::ArrayStart;
                return Ok(Some(at + 1));
            }
            Some(b',') => {
                self.state = State::ObjectKey;
                return Ok(Some(at + 1));
            }
            Some(b'}') => {
                self.state = State::ObjectFinish;
                return Ok(Some(at + 1));
            }
            None => return Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(_) => self.scalar(input, at, sink)?,
        };

        let at = self.skip(input, at);
        match input.get(at) {
            Some(b',') => {
                self.state = State::ObjectKey;
                Ok(Some(at + 1))
            }
            Some(b'}') => {
                self.state = State::ObjectFinish;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(&c) => Err(Error::new(ErrorKind::Value, Some(c), at)),
        }
    }

    fn object_finish<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        if self.object_depth == 0 {
            return Err(Error::new(ErrorKind::Depth, input.get(at).copied(), at));
        }
        self.object_depth -= 1;
        self.tags.pop();
        self.emit(input, at, sink, Event::ObjectEnd)?;
        self.container_end(input, at, ErrorKind::Object)
    }

    fn array_start<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        if self.array_depth >= self.array_max {
            return Err(Error::new(ErrorKind::Depth, input.get(at).copied(), at));
        }
        self.emit(input, at, sink, Event::ArrayBegin)?;
        self.array_depth += 1;
        self.tags.push(Tag::Array);

        let at = self.skip(input, at);
        match input.get(at) {
            Some(b'[') => {
                self.state = State::ArrayStart;
                Ok(Some(at + 1))
            }
            Some(b']') => {
                self.state = State::ArrayFinish;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(_) => {
                self.state = State::ArrayHalf;
                Ok(Some(at))
            }
        }
    }

    fn array_half<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        let at = self.skip(input, at);
        let at = match input.get(at) {
            Some(b',') => {
                self.state = State::ArrayHalf;
                return Ok(Some(at + 1));
            }
            Some(b'[') => {
                self.state = State::ArrayStart;
                return Ok(Some(at + 1));
            }
            Some(b']') => {
                self.state = State::ArrayFinish;
                return Ok(Some(at + 1));
            }
            Some(b'{') => {
                self.state = State::ObjectStart;
                return Ok(Some(at + 1));
            }
            None => return Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(_) => self.scalar(input, at, sink)?,
        };

        let at = self.skip(input, at);
        match input.get(at) {
            Some(b',') => {
                self.state = State::ArrayHalf;
                Ok(Some(at + 1))
            }
            Some(b']') => {
                self.state = State::ArrayFinish;
                Ok(Some(at + 1))
            }
            None => Err(Error::new(ErrorKind::Trunc, None, at)),
            Some(&c) => Err(Error::new(ErrorKind::Value, Some(c), at)),
        }
    }

    fn array_finish<S: EventSink>(&mut self, input: &[u8], at: usize, sink: &mut S) -> Step {
        if self.array_depth == 0 {
            return Err(Error::new(ErrorKind::Depth, input.get(at).copied(), at));
        }
        self.array_depth -= 1;
        self.tags.pop();
        self.emit(input, at, sink, Event::ArrayEnd)?;
        self.container_end(input, at, ErrorKind::Array)
    }

    /// Dispatch after a container closed: another closer, a separator back
    /// into the enclosing container, or end of document at depth zero.
    fn container_end(&mut self, input: &[u8], at: usize, kind: ErrorKind) -> Step {
        let at = self.skip(input, at);
        match input.get(at) {
            Some(b']') => {
                self.state = State::ArrayFinish;
                Ok(Some(at + 1))
            }
            Some(b'}') => {
                self.state = State::ObjectFinish;
                Ok(Some(at + 1))
            }
            None => {
                if self.depth() != 0 {
                    Err(Error::new(ErrorKind::Trunc, None, at))
                } else {
                    self.state = State::Finish;
                    Ok(None)
                }
            }
            Some(b',') => match self.tags.last() {
                Some(Tag::Object) => {
                    self.state = State::ObjectKey;
                    Ok(Some(at + 1))
                }
                Some(Tag::Array) => {
                    self.state = State::ArrayHalf;
                    Ok(Some(at + 1))
                }
                None => Err(Error::new(kind, Some(b','), at)),
            },
            Some(&c) => Err(Error::new(kind, Some(c), at)),
        }
    }

    /// One scalar value in a container. Returns the offset past it.
    fn scalar<S: EventSink>(
        &mut self,
        input: &[u8],
        at: usize,
        sink: &mut S,
    ) -> Result<usize, Error> {
        match input[at] {
            b't' | b'T' => self.literal(input, at, b"true", sink, Event::Boolean(true)),
            b'f' | b'F' => self.literal(input, at, b"false", sink, Event::Boolean(false)),
            b'n' | b'N' => self.literal(input, at, b"null", sink, Event::Null),
            b'0'..=b'9' | b'+' | b'-' => self.number(input, at, sink),
            b'"' => self.string(input, at, b'"', sink),
            b'\'' if self.options.single_quotes => self.string(input, at, b'\'', sink),
            c => Err(Error::new(ErrorKind::Value, Some(c), at)),
        }
    }

    /// Case-insensitive keyword match.
    fn literal<S: EventSink>(
        &mut self,
        input: &[u8],
        at: usize,
        word: &[u8],
        sink: &mut S,
        event: Event<'_>,
    ) -> Result<usize, Error> {
        let matched = word.iter().enumerate().skip(1).all(|(k, c)| {
            input
                .get(at + k)
                .is_some_and(|b| b.eq_ignore_ascii_case(c))
        });
        if !matched {
            return Err(Error::new(ErrorKind::Value, input.get(at).copied(), at));
        }
        self.emit(input, at, sink, event)?;
        Ok(at + word.len())
    }

    fn number<S: EventSink>(
        &mut self,
        input: &[u8],
        at: usize,
        sink: &mut S,
    ) -> Result<usize, Error> {
        match number::scan(input, at) {
            Ok((Number::Integer(n), end)) => {
                self.emit(input, at, sink, Event::Integer(n))?;
                Ok(end)
            }
            Ok((Number::Float(f), end)) => {
                self.emit(input, at, sink, Event::Float(f))?;
                Ok(end)
            }
            Err(pos) => Err(Error::new(ErrorKind::Value, input.get(pos).copied(), pos)),
        }
    }

    fn string<S: EventSink>(
        &mut self,
        input: &[u8],
        at: usize,
        quo: u8,
        sink: &mut S,
    ) -> Result<usize, Error> {
        let start = at + 1;
        let end = self
            .find_quote(input, start, quo)
            .ok_or_else(|| Error::new(ErrorKind::Quote, input.get(start).copied(), start))?;
        self.emit(input, start, sink, Event::String(&input[start..end]))?;
        Ok(end + 1)
    }

    fn emit<S: EventSink>(
        &mut self,
        input: &[u8],
        at: usize,
        sink: &mut S,
        event: Event<'_>,
    ) -> Result<(), Error> {
        let depth = self.depth();
        debug!("event at depth {}: {:?}", depth, event);
        if sink.event(depth, event) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::Break, input.get(at).copied(), at))
        }
    }

    fn skip(&self, input: &[u8], at: usize) -> usize {
        if self.options.comments {
            skip_ws(input, at)
        } else {
            skip_blanks(input, at)
        }
    }

    fn find_quote(&self, input: &[u8], at: usize, quo: u8) -> Option<usize> {
        if self.options.unstrict {
            find_quote_raw(input, at, quo)
        } else {
            find_quote_strict(input, at, quo)
        }
    }

    /// End of an unquoted key: stops at `:` or whitespace, and before a
    /// comment opener when comments are enabled.
    fn find_key_end(&self, input: &[u8], mut at: usize) -> usize {
        while let Some(&c) = input.get(at) {
            match c {
                b':' | b' ' | b'\t' | b'\r' | b'\n' | b'\x0b' | b'\x0c' => return at,
                b'/' if self.options.comments
                    && matches!(input.get(at + 1), Some(b'/' | b'*')) =>
                {
                    return at
                }
                _ => at += 1,
            }
        }
        at
    }
}

fn skip_blanks(input: &[u8], mut at: usize) -> usize {
    while let Some(b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r') = input.get(at) {
        at += 1;
    }
    at
}

fn skip_ws(input: &[u8], at: usize) -> usize {
    let mut at = skip_blanks(input, at);
    while input.get(at) == Some(&b'/') {
        match input.get(at + 1) {
            Some(b'/') => {
                let mut i = at + 2;
                loop {
                    match input.get(i) {
                        None => return i,
                        Some(b'\r' | b'\n') => {
                            at = skip_blanks(input, i + 1);
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            Some(b'*') => {
                let mut i = at + 2;
                loop {
                    match input.get(i) {
                        None => return i,
                        Some(b'*') if input.get(i + 1) == Some(&b'/') => {
                            at = skip_blanks(input, i + 2);
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            _ => break,
        }
    }
    at
}

/// Finds the closing quote, validating escapes along the way.
fn find_quote_strict(input: &[u8], mut at: usize, quo: u8) -> Option<usize> {
    loop {
        let c = *input.get(at)?;
        if c == quo {
            return Some(at);
        }
        if c <= 0x1f {
            return None;
        }
        if c == b'\\' {
            at += 1;
            match input.get(at)? {
                b'"' | b'/' | b'b' | b'f' | b'\\' | b'n' | b'r' | b't' => {}
                b'u' => {
                    for k in 1..=4 {
                        char2hex(*input.get(at + k)?)?;
                    }
                    at += 4;
                }
                _ => return None,
            }
        }
        at += 1;
    }
}

/// Finds the closing quote, only honoring backslash pairs.
fn find_quote_raw(input: &[u8], mut at: usize, quo: u8) -> Option<usize> {
    while let Some(&c) = input.get(at) {
        if c == quo {
            return Some(at);
        }
        if c == b'\\' {
            at += 1;
            input.get(at)?;
        }
        at += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, options: TokenOptions) -> Result<Vec<String>, Error> {
        let mut tok = Tokenizer::new(options);
        let mut out = Vec::new();
        let mut sink = |depth: usize, event: Event<'_>| {
            out.push(match event {
                Event::Field(s) => {
                    format!("{}:field {}", depth, String::from_utf8_lossy(s))
                }
                Event::String(s) => {
                    format!("{}:string {}", depth, String::from_utf8_lossy(s))
                }
                other => format!("{}:{:?}", depth, other),
            });
            true
        };
        tok.parse(text, &mut sink)?;
        Ok(out)
    }

    fn events(text: &str) -> Vec<String> {
        record(text, TokenOptions::default()).unwrap()
    }

    fn error(text: &str) -> Error {
        record(text, TokenOptions::default()).unwrap_err()
    }

    #[test]
    fn object_document() {
        assert_eq!(
            events(r#"{"a": 1, "b": [true, false, null]}"#),
            [
                "0:ObjectBegin",
                "1:field a",
                "1:Integer(1)",
                "1:field b",
                "1:ArrayBegin",
                "2:Boolean(true)",
                "2:Boolean(false)",
                "2:Null",
                "1:ArrayEnd",
                "0:ObjectEnd",
            ]
        );
    }

    #[test]
    fn nested_containers_report_outer_depth() {
        assert_eq!(
            events("[[], {}]"),
            [
                "0:ArrayBegin",
                "1:ArrayBegin",
                "1:ArrayEnd",
                "1:ObjectBegin",
                "1:ObjectEnd",
                "0:ArrayEnd",
            ]
        );
    }

    #[test]
    fn strings_stay_escaped() {
        assert_eq!(
            events(r#"["a\nbA"]"#),
            ["0:ArrayBegin", r"1:string a\nbA", "0:ArrayEnd"]
        );
    }

    #[test]
    fn case_insensitive_keywords() {
        assert_eq!(
            events("[True, FALSE, Null]"),
            [
                "0:ArrayBegin",
                "1:Boolean(true)",
                "1:Boolean(false)",
                "1:Null",
                "0:ArrayEnd",
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(error("").kind(), ErrorKind::Empty);
        assert_eq!(error("   \t\n").kind(), ErrorKind::Empty);
    }

    #[test]
    fn scalar_root_is_rejected() {
        let err = error("42");
        assert_eq!(err.kind(), ErrorKind::Start);
        assert_eq!(err.byte(), Some(b'4'));
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn truncated_document() {
        assert_eq!(error(r#"{"a": 1"#).kind(), ErrorKind::Trunc);
        assert_eq!(error("[1, 2").kind(), ErrorKind::Trunc);
        assert_eq!(error("[[1], ").kind(), ErrorKind::Trunc);
    }

    #[test]
    fn trailing_garbage_after_root() {
        assert_eq!(error("[1] x").kind(), ErrorKind::Array);
        assert_eq!(error("{} ,").kind(), ErrorKind::Object);
    }

    #[test]
    fn bad_literals() {
        assert_eq!(error("[tru]").kind(), ErrorKind::Value);
        assert_eq!(error("[nul]").kind(), ErrorKind::Value);
        assert_eq!(error("[1.]").kind(), ErrorKind::Value);
        assert_eq!(error("[1e309]").kind(), ErrorKind::Value);
    }

    #[test]
    fn unquoted_key_requires_option() {
        assert_eq!(error("{a: 1}").kind(), ErrorKind::Quote);
        let out = record("{a: 1}", TokenOptions::new().simple_keys(true)).unwrap();
        assert_eq!(out, ["0:ObjectBegin", "1:field a", "1:Integer(1)", "0:ObjectEnd"]);
    }

    #[test]
    fn single_quotes_require_option() {
        assert_eq!(error("['x']").kind(), ErrorKind::Value);
        let out = record("['x']", TokenOptions::new().single_quotes(true)).unwrap();
        assert_eq!(out, ["0:ArrayBegin", "1:string x", "0:ArrayEnd"]);
    }

    #[test]
    fn comments_require_option() {
        let text = "[1, // one\n 2 /* two */ ]";
        assert_eq!(error(text).kind(), ErrorKind::Value);
        let out = record(text, TokenOptions::new().comments(true)).unwrap();
        assert_eq!(
            out,
            ["0:ArrayBegin", "1:Integer(1)", "1:Integer(2)", "0:ArrayEnd"]
        );
    }

    #[test]
    fn unstrict_passes_bad_escapes_through() {
        assert_eq!(error(r#"["\q"]"#).kind(), ErrorKind::Quote);
        let out = record(r#"["\q"]"#, TokenOptions::new().unstrict(true)).unwrap();
        assert_eq!(out, ["0:ArrayBegin", r"1:string \q", "0:ArrayEnd"]);
    }

    #[test]
    fn control_byte_in_string() {
        assert_eq!(error("[\"a\tb\"]").kind(), ErrorKind::Quote);
    }

    #[test]
    fn array_depth_ceiling() {
        let deep = "[".repeat(33);
        let err = record(&deep, TokenOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Depth);

        let mut ok = "[".repeat(32);
        ok.push_str(&"]".repeat(32));
        assert!(record(&ok, TokenOptions::default()).is_ok());
    }

    #[test]
    fn object_and_array_ceilings_are_separate() {
        // 3 objects and 3 arrays interleaved fit under a ceiling of 3 each.
        let options = TokenOptions::new().object_depth(3).array_depth(3);
        let text = r#"{"a": [{"b": [{"c": [1]}]}]}"#;
        assert!(record(text, options).is_ok());
        let err = record(r#"[[[[1]]]]"#, options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Depth);
    }

    #[test]
    fn sink_can_stop_the_parse() {
        let mut tok = Tokenizer::default();
        let mut seen = 0;
        let mut sink = |_depth: usize, _event: Event<'_>| {
            seen += 1;
            seen < 3
        };
        let err = tok.parse("[1, 2, 3, 4]", &mut sink).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Break);
        assert_eq!(seen, 3);
    }

    #[test]
    fn reset_allows_reuse() {
        let mut tok = Tokenizer::default();
        let mut sink = |_: usize, _: Event<'_>| true;
        tok.parse("[1]", &mut sink).unwrap();
        assert!(tok.is_finished());
        tok.reset();
        tok.parse(r#"{"a": 2}"#, &mut sink).unwrap();
        assert!(tok.is_finished());
    }

    #[test]
    fn failed_tokenizer_stays_failed() {
        let mut tok = Tokenizer::default();
        let mut sink = |_: usize, _: Event<'_>| true;
        assert!(tok.parse("oops", &mut sink).is_err());
        assert_eq!(tok.last_error().map(Error::kind), Some(ErrorKind::Start));
        let err = tok.parse("[1]", &mut sink).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        tok.reset();
        assert!(tok.last_error().is_none());
    }

    #[test]
    fn leading_comma_in_object_is_tolerated() {
        // The key scanner treats a stray comma as an empty member slot.
        assert_eq!(
            events(r#"{, "a": 1}"#),
            ["0:ObjectBegin", "1:field a", "1:Integer(1)", "0:ObjectEnd"]
        );
    }
}
