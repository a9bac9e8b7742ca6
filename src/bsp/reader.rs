use super::{Entry, Head, LumpIndex, HEAD_SIZE};
use crate::ent::{self, Entities, Loader};
use crate::{BinParseError, BinParseResult};
use std::io::{Read, Seek, SeekFrom};

#[derive(Debug)]
pub struct Reader<'a, R: Seek + Read> {
    cursor: &'a mut R,
    start: u64,
    header: Head,
}

impl<'a, R: Seek + Read> Reader<'a, R> {
    pub fn new(cursor: &'a mut R) -> BinParseResult<Self> {
        let start = cursor.stream_position()?;
        let mut header_bytes = [0u8; HEAD_SIZE];
        cursor.read_exact(&mut header_bytes[..])?;
        let header = Head::from(header_bytes);

        Ok(Self {
            cursor,
            start,
            header,
        })
    }

    pub fn header(&self) -> &Head {
        &self.header
    }

    pub fn lump_reader(
        &mut self,
        index: LumpIndex,
    ) -> BinParseResult<std::io::Take<&mut R>> {
        let (abs_offset, length) = self.lump_span(index)?;
        self.cursor.seek(SeekFrom::Start(abs_offset))?;

        Ok(self.cursor.by_ref().take(length))
    }

    pub fn lump_empty(&self, index: LumpIndex) -> bool {
        let length = self.header.entry(index).length;
        length == 0
    }

    /// Load the entity lump text as stored, terminator included
    pub fn load_entities(
        &mut self,
        loader: &Loader,
    ) -> BinParseResult<Vec<u8>> {
        if self.lump_empty(LumpIndex::Entities) {
            return Ok(Vec::new());
        }

        let (abs_offset, length) = self.lump_span(LumpIndex::Entities)?;
        loader.load(self.cursor, abs_offset, length)
    }

    /// Load the entity lump and parse it
    pub fn read_entities(
        &mut self,
        loader: &Loader,
    ) -> BinParseResult<Entities> {
        let text = self.load_entities(loader)?;
        Ok(ent::parse(text))
    }

    fn lump_span(&self, index: LumpIndex) -> BinParseResult<(u64, u64)> {
        let Entry { offset, length } = self.header.entry(index);

        let abs_offset = self
            .start
            .checked_add(offset.into())
            .ok_or(BinParseError::Parse(String::from("Bad offset")))?;

        Ok((abs_offset, length.into()))
    }
}
