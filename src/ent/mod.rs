mod block;
mod lexer;
mod loader;
mod repr;

pub use block::Stop;
pub use lexer::{Event, Lexer};
pub use loader::{Loader, Truncation, CHUNK_SIZE};
pub use repr::{sanitize, Entities, Entity, Property, Writes};

use tracing::{debug, info, trace, warn};





/// Parse all of `text`
pub fn parse(text: Vec<u8>) -> Entities {
    let length = text.len();
    parse_prefix(text, length)
}

/// Parse the first `length` bytes of `text`.  The whole of `text` is kept as
/// the raw lump text.
pub fn parse_prefix(text: Vec<u8>, length: usize) -> Entities {
    let length = length.min(text.len());
    let mut entities = Vec::new();

    info!("Parsing {length} bytes of entities");

    for event in Lexer::new(&text[..length]) {
        match event {
            Event::Comment { line } => debug!("Comment at line {line}"),
            Event::BadComment { line, marker } => {
                warn!("Bad comment `{}` at line {line}", char::from(marker))
            }
            Event::Entity { line, entity } => {
                debug!(
                    "Entity found at line {line} with {} properties",
                    entity.len()
                );
                entities.push(entity);
            }
            Event::PairDropped { line, stop } => match stop {
                Stop::Truncated { .. } => {
                    warn!("Key without value at line {line}, rest of entity dropped")
                }
                Stop::EmptyPair { .. } => {
                    warn!("Empty key or value at line {line}, rest of entity dropped")
                }
            },
        }
    }

    trace!(entities = entities.len(), "Finished parsing");

    Entities::from_parts(text, entities)
}
