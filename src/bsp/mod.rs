mod repr;

mod reader;

pub use repr::{
    Entry, Head, LumpIndex, HEAD_SIZE, IBSP_MAGIC, IBSP_VERSION, LUMP_COUNT,
};

pub use reader::Reader;


#[cfg(test)]
mod reader_test;
