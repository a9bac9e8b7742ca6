use crate::ent::block::{parse_block, Stop};
use crate::ent::Entity;

/// Things the lexer runs into, in text order.  Line numbers start at 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// `//` comment
    Comment { line: usize },
    /// `;` or `#` comment, not valid in the format but tolerated
    BadComment { line: usize, marker: u8 },
    Entity { line: usize, entity: Entity },
    /// Rest of the preceding entity's pairs were dropped
    PairDropped { line: usize, stop: Stop },
}

/// Single pass over entity text yielding [`Event`]s
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    text: &'a [u8],
    cursor: usize,
    line: usize,
    pending: Option<Event>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            cursor: 0,
            line: 1,
            pending: None,
        }
    }

    /// Current line, one more than the newlines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    fn skip_line(&mut self) {
        match self.text[self.cursor..].iter().position(|&b| b == b'\n') {
            Some(pos) => {
                self.cursor += pos + 1;
                self.line += 1;
            }
            None => self.cursor = self.text.len(),
        }
    }

    fn lex_block(&mut self) -> Event {
        let start = self.cursor;
        let line = self.line;
        let block = parse_block(self.text, start);

        if let Some(stop) = block.stop {
            let stop_line = line + newlines(&self.text[start..stop.offset()]);
            self.pending = Some(Event::PairDropped {
                line: stop_line,
                stop,
            });
        }

        self.line += newlines(&self.text[start..block.resume]);
        self.cursor = block.resume;

        Event::Entity {
            line,
            entity: block.entity,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        while let Some(&byte) = self.text.get(self.cursor) {
            let line = self.line;

            match byte {
                b'/' if self.text.get(self.cursor + 1) == Some(&b'/') => {
                    self.skip_line();
                    return Some(Event::Comment { line });
                }
                b';' | b'#' => {
                    self.skip_line();
                    return Some(Event::BadComment { line, marker: byte });
                }
                b'{' => return Some(self.lex_block()),
                b'\n' => {
                    self.line += 1;
                    self.cursor += 1;
                }
                _ => self.cursor += 1,
            }
        }

        None
    }
}

fn newlines(text: &[u8]) -> usize {
    text.iter().filter(|&&b| b == b'\n').count()
}
