//! Extract and parse the entity lump of BSP map files.
//!
//! Entity text is loaded with an [`ent::Loader`], either out of a BSP
//! container through a [`bsp::Reader`] or from a standalone `.ent` file, then
//! scanned by [`ent::parse`] into ordered [`ent::Entity`] records.

pub mod bsp;
pub mod ent;

mod error;

pub use error::BinParse as BinParseError;
pub use error::BinParseResult;
