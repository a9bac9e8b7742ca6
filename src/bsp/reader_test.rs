use crate::{bsp, BinParseError};
use bsp::{LumpIndex, HEAD_SIZE, IBSP_VERSION};
use crate::ent::{Loader, Property, Truncation};
use std::io::{Cursor, Read};

const ENTITIES: &str = r#"
{
    "classname" "func_door"
    "model" "*37"
}"#;
const ENTITIES_LEN: usize = ENTITIES.len() + 1;
const MODELS_LEN: usize = 123;

fn bsp_bytes(prefix: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; prefix + HEAD_SIZE + ENTITIES_LEN + MODELS_LEN];
    let head = &mut bytes[prefix..];
    let entities_offset = HEAD_SIZE as u32;
    let models_offset = entities_offset + ENTITIES_LEN as u32;
    let models_at = 8 + 8 * usize::from(LumpIndex::Models);

    head[0..4].copy_from_slice(b"IBSP");
    head[4..8].copy_from_slice(&IBSP_VERSION.to_le_bytes());
    head[8..12].copy_from_slice(&(entities_offset).to_le_bytes());
    head[12..16].copy_from_slice(&(ENTITIES_LEN as u32).to_le_bytes());
    head[models_at..(models_at + 4)]
        .copy_from_slice(&(models_offset).to_le_bytes());
    head[(models_at + 4)..(models_at + 8)]
        .copy_from_slice(&(MODELS_LEN as u32).to_le_bytes());
    head[HEAD_SIZE..(HEAD_SIZE + ENTITIES_LEN - 1)]
        .copy_from_slice(ENTITIES.as_bytes());

    bytes
}

#[test]
fn parse_good_bsp() {
    let mut cursor = Cursor::new(bsp_bytes(0));
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();

    {
        let lump_reader = reader.lump_reader(LumpIndex::Models).unwrap();
        assert_eq!(lump_reader.limit(), MODELS_LEN as u64);
    }

    assert!(!reader.lump_empty(LumpIndex::Entities));
    assert!(reader.lump_empty(LumpIndex::Nodes));
    assert!(reader.header().is_ibsp());

    let entities = reader.read_entities(&Loader::new()).unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(
        entities.entities()[0].properties,
        vec![
            Property::new("classname", "func_door"),
            Property::new("model", "*37"),
        ]
    );
    assert_eq!(entities.text().len(), ENTITIES_LEN);
    assert_eq!(entities.text().last(), Some(&0u8));
    assert_eq!(entities.sanitized(), ENTITIES.as_bytes());
}

#[test]
fn lump_reader_reads_lump_bytes() {
    let mut cursor = Cursor::new(bsp_bytes(0));
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();
    let mut text = Vec::new();

    reader
        .lump_reader(LumpIndex::Entities)
        .unwrap()
        .read_to_end(&mut text)
        .unwrap();

    assert_eq!(&text[..ENTITIES_LEN - 1], ENTITIES.as_bytes());
}

#[test]
fn offsets_relative_to_start() {
    const PREFIX: usize = 17;
    let mut cursor = Cursor::new(bsp_bytes(PREFIX));
    cursor.set_position(PREFIX as u64);
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();

    let entities = reader.read_entities(&Loader::new()).unwrap();

    assert_eq!(
        entities.entities()[0].classname(),
        Some(&b"func_door"[..])
    );
}

#[test]
fn parse_empty_entities() {
    let mut bytes = [0u8; HEAD_SIZE];
    bytes[0..4].copy_from_slice(b"IBSP");
    bytes[8..12].copy_from_slice(&(HEAD_SIZE as u32).to_le_bytes());

    let mut cursor = Cursor::new(bytes);
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();

    let entities = reader.read_entities(&Loader::new()).unwrap();

    assert!(entities.is_empty());
    assert!(entities.text().is_empty());
}

#[test]
fn short_entities_lump() {
    let mut bytes = bsp_bytes(0);
    bytes.truncate(HEAD_SIZE + 20);

    let mut cursor = Cursor::new(bytes.clone());
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();
    let entities = reader.read_entities(&Loader::new()).unwrap();
    assert_eq!(entities.text().len(), 20);

    let mut cursor = Cursor::new(bytes);
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();
    let strict = Loader::new().truncation(Truncation::Deny);
    let err = reader.read_entities(&strict).unwrap_err();
    assert!(matches!(
        err,
        BinParseError::Truncated {
            expected,
            actual: 20,
        } if expected == ENTITIES_LEN as u64
    ));
}

#[test]
fn short_header() {
    let bytes = [0u8; HEAD_SIZE - 1];
    let mut cursor = Cursor::new(bytes);
    let err = bsp::Reader::new(&mut cursor).unwrap_err();

    assert!(matches!(err, BinParseError::Io(_)));
}

#[test]
fn load_entities_as_stored() {
    let mut cursor = Cursor::new(bsp_bytes(0));
    let mut reader = bsp::Reader::new(&mut cursor).unwrap();
    let text = reader.load_entities(&Loader::new()).unwrap();

    assert_eq!(text.len(), ENTITIES_LEN);
    assert_eq!(&text[..ENTITIES_LEN - 1], ENTITIES.as_bytes());
    assert_eq!(text.last(), Some(&0u8));
}

#[test]
fn empty_entities_lump_skips_load() {
    let mut bytes = [0u8; HEAD_SIZE];
    bytes[0..4].copy_from_slice(b"IBSP");
    bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());

    let mut cursor = Cursor::new(bytes);

    {
        let mut reader = bsp::Reader::new(&mut cursor).unwrap();
        assert!(reader.lump_empty(LumpIndex::Entities));

        let text = reader.load_entities(&Loader::new()).unwrap();
        assert!(text.is_empty());
    }

    assert_eq!(cursor.position(), HEAD_SIZE as u64);
}
