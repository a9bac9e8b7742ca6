use crate::ent::{Entity, Property};
use std::ops::Range;

/// Why a block stopped yielding properties before its close marker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stop {
    /// A key's quotes, or the value after it, did not complete in the block
    Truncated { at: usize },
    /// A complete pair with an empty key or value
    EmptyPair { at: usize },
}

impl Stop {
    pub fn offset(&self) -> usize {
        match *self {
            Stop::Truncated { at } | Stop::EmptyPair { at } => at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub entity: Entity,
    /// Just past the close marker, or the end of the text if there is none
    pub resume: usize,
    pub stop: Option<Stop>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PairState {
    ScanningKey,
    ScanningValue { key: Range<usize> },
    Complete { key: Range<usize>, value: Range<usize> },
}

/// Parse the block opening at or before `start`.  The block ends at the
/// first `}`; braces are not counted, so a `{` inside the block is plain
/// content.
pub fn parse_block(text: &[u8], start: usize) -> Block {
    let close = find_byte(text, b'}', start, text.len());
    let span_end = close.unwrap_or(text.len());
    let resume = close.map_or(text.len(), |pos| pos + 1);

    let mut entity = Entity::new();
    let mut cursor = start;
    let mut state = PairState::ScanningKey;

    let stop = loop {
        state = match state {
            PairState::ScanningKey => {
                match find_byte(text, b'"', cursor, span_end) {
                    Some(open) => match quoted(text, open, span_end) {
                        Some(key) => {
                            cursor = key.end + 1;
                            PairState::ScanningValue { key }
                        }
                        None => break Some(Stop::Truncated { at: open }),
                    },
                    None => break None,
                }
            }
            PairState::ScanningValue { key } => {
                let value = find_byte(text, b'"', cursor, span_end)
                    .and_then(|open| quoted(text, open, span_end));

                match value {
                    Some(value) => {
                        cursor = value.end + 1;
                        PairState::Complete { key, value }
                    }
                    None => {
                        break Some(Stop::Truncated { at: key.start - 1 })
                    }
                }
            }
            PairState::Complete { key, value } => {
                if key.is_empty() || value.is_empty() {
                    break Some(Stop::EmptyPair { at: key.start - 1 });
                }

                entity
                    .properties
                    .push(Property::new(&text[key], &text[value]));
                PairState::ScanningKey
            }
        };
    };

    Block {
        entity,
        resume,
        stop,
    }
}

// Contents of the quoted run whose opening quote is at `open`
fn quoted(text: &[u8], open: usize, end: usize) -> Option<Range<usize>> {
    let close = find_byte(text, b'"', open + 1, end)?;
    Some(open + 1..close)
}

fn find_byte(text: &[u8], byte: u8, from: usize, end: usize) -> Option<usize> {
    let end = end.min(text.len());

    if from >= end {
        return None;
    }

    text[from..end]
        .iter()
        .position(|&b| b == byte)
        .map(|pos| from + pos)
}
