use std::array;
use std::mem::size_of;

pub const IBSP_MAGIC: u32 = u32::from_le_bytes(*b"IBSP");
pub const IBSP_VERSION: u32 = 38;
pub const LUMP_COUNT: usize = 19;
pub const HEAD_SIZE: usize = size_of::<Head>();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum LumpIndex {
    Entities = 0,
    Planes,
    Vertices,
    Visibility,
    Nodes,
    TexInfo,
    Faces,
    Lighting,
    Leaves,
    LeafFaces,
    LeafBrushes,
    Edges,
    SurfEdges,
    Models,
    Brushes,
    BrushSides,
    Pop,
    Areas,
    AreaPortals,
}

impl LumpIndex {
    pub const ALL: [LumpIndex; LUMP_COUNT] = [
        LumpIndex::Entities,
        LumpIndex::Planes,
        LumpIndex::Vertices,
        LumpIndex::Visibility,
        LumpIndex::Nodes,
        LumpIndex::TexInfo,
        LumpIndex::Faces,
        LumpIndex::Lighting,
        LumpIndex::Leaves,
        LumpIndex::LeafFaces,
        LumpIndex::LeafBrushes,
        LumpIndex::Edges,
        LumpIndex::SurfEdges,
        LumpIndex::Models,
        LumpIndex::Brushes,
        LumpIndex::BrushSides,
        LumpIndex::Pop,
        LumpIndex::Areas,
        LumpIndex::AreaPortals,
    ];
}

impl From<LumpIndex> for usize {
    fn from(index: LumpIndex) -> Self {
        index as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct Entry {
    pub offset: u32,
    pub length: u32,
}

/// Container header: magic, version and the lump table.  Decoding never
/// rejects a header, the entity lump is still worth a look in files from
/// other toolchains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct Head {
    magic: u32,
    version: u32,
    entries: [Entry; LUMP_COUNT],
}

impl Head {
    pub fn entry(&self, index: LumpIndex) -> Entry {
        let idx: usize = index.into();
        self.entries[idx]
    }

    pub fn entries(&self) -> [Entry; LUMP_COUNT] {
        self.entries
    }

    pub fn magic(&self) -> u32 {
        self.magic
    }

    /// Magic number as the four bytes stored in the file
    pub fn magic_text(&self) -> String {
        let magic = self.magic;
        String::from_utf8_lossy(&magic.to_le_bytes()).into_owned()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_ibsp(&self) -> bool {
        let (magic, version) = (self.magic, self.version);
        magic == IBSP_MAGIC && version == IBSP_VERSION
    }
}

impl From<[u8; HEAD_SIZE]> for Head {
    fn from(bytes: [u8; HEAD_SIZE]) -> Head {
        let word = |at: usize| {
            u32::from_le_bytes([
                bytes[at],
                bytes[at + 1],
                bytes[at + 2],
                bytes[at + 3],
            ])
        };

        let entries = array::from_fn(|idx| {
            let at = 8 + idx * size_of::<Entry>();

            Entry {
                offset: word(at),
                length: word(at + 4),
            }
        });

        Head {
            magic: word(0),
            version: word(4),
            entries,
        }
    }
}
