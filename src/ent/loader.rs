use crate::{BinParseError, BinParseResult};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

pub const CHUNK_SIZE: usize = 1024;

// Upper bound on the up-front reservation, lengths come from file headers
const MAX_RESERVE: u64 = 1 << 24;

/// What to do when a source ends before the requested length
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Truncation {
    /// Keep whatever was read
    #[default]
    Allow,
    Deny,
}

/// Reads entity text out of a source in [`CHUNK_SIZE`] chunks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Loader {
    truncation: Truncation,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn truncation_policy(&self) -> Truncation {
        self.truncation
    }

    /// Read `length` bytes starting at absolute position `offset`
    pub fn load(
        &self,
        source: &mut (impl Read + Seek),
        offset: u64,
        length: u64,
    ) -> BinParseResult<Vec<u8>> {
        source.seek(SeekFrom::Start(offset))?;

        let mut text = Vec::with_capacity(length.min(MAX_RESERVE) as usize);
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut remaining = length;
        let mut chunks = 0usize;

        while remaining > 0 {
            let want = remaining.min(CHUNK_SIZE as u64) as usize;
            let position = offset.saturating_add(length - remaining);

            let got = fill_chunk(source, &mut chunk[..want])
                .map_err(|err| BinParseError::Chunk {
                    position,
                    source: err,
                })?;

            text.extend_from_slice(&chunk[..got]);
            remaining -= got as u64;
            chunks += 1;

            if got < want {
                break;
            }
        }

        debug!(chunks, bytes = text.len(), offset, "Loaded entity text");

        let actual = text.len() as u64;

        if actual < length {
            match self.truncation {
                Truncation::Allow => {
                    warn!(expected = length, actual, "Entity text cut short");
                }
                Truncation::Deny => {
                    return Err(BinParseError::Truncated {
                        expected: length,
                        actual,
                    });
                }
            }
        }

        Ok(text)
    }

    /// Read a whole standalone entity file
    pub fn load_file(&self, path: impl AsRef<Path>) -> BinParseResult<Vec<u8>> {
        let path = path.as_ref();
        let open_err = |source| BinParseError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(open_err)?;
        let length = file.metadata().map_err(open_err)?.len();

        self.load(&mut file, 0, length)
    }
}

// Fill `chunk` unless the source ends first, returning the byte count
fn fill_chunk(source: &mut impl Read, chunk: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < chunk.len() {
        match source.read(&mut chunk[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
