use std::borrow::Cow;
use std::io;

pub trait Writes<W: io::Write> {
    fn write_to(&self, writer: &mut W) -> io::Result<()>;
}

/// Strip exactly one trailing null byte, if there is one
pub fn sanitize(text: &[u8]) -> &[u8] {
    match text.split_last() {
        Some((&0, rest)) => rest,
        _ => text,
    }
}

/// A quoted name/value pair, kept byte-for-byte as it appeared between the
/// quotes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl Property {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn value_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

impl<W: io::Write> Writes<W> for Property {
    fn write_to(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"  \"")?;
        writer.write_all(&self.name)?;
        writer.write_all(b"\" \"")?;
        writer.write_all(&self.value)?;
        writer.write_all(b"\"\n")
    }
}

/// Properties of one `{ ... }` block in source order.  Names may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    pub properties: Vec<Property>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first property called `name`
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.properties
            .iter()
            .find(|prop| prop.name == name)
            .map(|prop| &prop.value[..])
    }

    pub fn classname(&self) -> Option<&[u8]> {
        self.get(b"classname")
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<W: io::Write> Writes<W> for Entity {
    fn write_to(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"{\n")?;

        for prop in &self.properties {
            prop.write_to(writer)?;
        }

        writer.write_all(b"}\n")
    }
}

/// Entity lump text together with the entities parsed out of it.  Both are
/// fixed once built by [`parse`](crate::ent::parse).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entities {
    text: Vec<u8>,
    entities: Vec<Entity>,
}

impl Entities {
    pub(crate) fn from_parts(text: Vec<u8>, entities: Vec<Entity>) -> Self {
        Self { text, entities }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Lump text without the null terminator compilers usually leave behind
    pub fn sanitized(&self) -> &[u8] {
        sanitize(&self.text)
    }

    pub fn write_raw<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.sanitized())
    }
}

impl<W: io::Write> Writes<W> for Entities {
    fn write_to(&self, writer: &mut W) -> io::Result<()> {
        for ent in &self.entities {
            ent.write_to(writer)?;
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Entities {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
