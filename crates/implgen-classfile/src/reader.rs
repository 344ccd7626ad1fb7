//! Low-level class file reading: big-endian cursor and constant pool.

/// Errors while decoding a class file.
#[derive(Debug, thiserror::Error)]
pub enum ClassParseError {
    /// The data ended in the middle of a structure.
    #[error("unexpected end of class file")]
    UnexpectedEof,
    /// The data does not start with `0xCAFEBABE`.
    #[error("invalid class file magic header")]
    InvalidMagic,
    /// The constant pool holds an unknown tag.
    #[error("unsupported constant pool tag {tag}")]
    UnsupportedConstant {
        /// The tag byte.
        tag: u8,
    },
    /// A constant pool index is out of range or of the wrong kind.
    #[error("invalid constant pool index {index}")]
    InvalidConstantIndex {
        /// The offending index.
        index: u16,
    },
    /// A `CONSTANT_Utf8` entry is not valid modified UTF-8.
    #[error("invalid modified UTF-8 string in constant pool")]
    Utf8Decode,
    /// A field or method descriptor is malformed.
    #[error("malformed descriptor: {0}")]
    InvalidDescriptor(String),
    /// A name in the class file is not a valid binary name.
    #[error("invalid class name: {0}")]
    InvalidName(#[from] implgen_core::ModelError),
}

/// Big-endian cursor over class file bytes.
pub(crate) struct ClassReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ClassReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn expect_magic(&mut self) -> Result<(), ClassParseError> {
        const MAGIC: u32 = 0xCAFE_BABE;
        if self.read_u4()? != MAGIC {
            return Err(ClassParseError::InvalidMagic);
        }
        Ok(())
    }

    pub(crate) fn read_u1(&mut self) -> Result<u8, ClassParseError> {
        Ok(self.read_slice(1)?[0])
    }

    pub(crate) fn read_u2(&mut self) -> Result<u16, ClassParseError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u4(&mut self) -> Result<u32, ClassParseError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ClassParseError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ClassParseError::UnexpectedEof)?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), ClassParseError> {
        self.read_slice(len).map(|_| ())
    }

    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Class { name_index: u16 },
    Other,
    Unusable,
}

/// The parts of the constant pool needed to read member signatures.
pub(crate) struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    pub(crate) fn parse(reader: &mut ClassReader<'_>) -> Result<Self, ClassParseError> {
        let count = usize::from(reader.read_u2()?);
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable); // index 0 unused

        while entries.len() < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let length = usize::from(reader.read_u2()?);
                    Constant::Utf8(decode_modified_utf8(reader.read_slice(length)?)?)
                }
                7 => Constant::Class {
                    name_index: reader.read_u2()?,
                },
                // Integer, Float, Fieldref, Methodref, InterfaceMethodref,
                // NameAndType, Dynamic, InvokeDynamic
                3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                // Long and Double take two slots.
                5 | 6 => {
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    Constant::Unusable
                }
                // String, MethodType, Module, Package
                8 | 16 | 19 | 20 => {
                    reader.skip(2)?;
                    Constant::Other
                }
                15 => {
                    reader.skip(3)?;
                    Constant::Other
                }
                other => return Err(ClassParseError::UnsupportedConstant { tag: other }),
            };
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, ClassParseError> {
        self.entries
            .get(usize::from(index))
            .ok_or(ClassParseError::InvalidConstantIndex { index })
    }

    pub(crate) fn utf8(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Utf8(value) => Ok(value.as_str()),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    /// Internal name of a `CONSTANT_Class` entry, `java/lang/Object`.
    pub(crate) fn class_name(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }
}

/// Decodes the JVM's modified UTF-8: every UTF-16 unit is stored as one to
/// three bytes, and NUL uses the two-byte form.
fn decode_modified_utf8(bytes: &[u8]) -> Result<String, ClassParseError> {
    if bytes.is_ascii() {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let unit = if b & 0x80 == 0 {
            i += 1;
            u16::from(b)
        } else if b & 0xE0 == 0xC0 {
            i += 2;
            (u16::from(b & 0x1F) << 6) | continuation_at(bytes, i - 1)?
        } else if b & 0xF0 == 0xE0 {
            i += 3;
            (u16::from(b & 0x0F) << 12)
                | (continuation_at(bytes, i - 2)? << 6)
                | continuation_at(bytes, i - 1)?
        } else {
            return Err(ClassParseError::Utf8Decode);
        };
        units.push(unit);
    }
    String::from_utf16(&units).map_err(|_| ClassParseError::Utf8Decode)
}

fn continuation_at(bytes: &[u8], index: usize) -> Result<u16, ClassParseError> {
    match bytes.get(index) {
        Some(b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
        _ => Err(ClassParseError::Utf8Decode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_reports_eof() {
        let mut reader = ClassReader::new(&[0x00, 0x01, 0x02]);
        assert_eq!(reader.read_u2().unwrap(), 1);
        assert!(matches!(reader.read_u2(), Err(ClassParseError::UnexpectedEof)));
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut reader = ClassReader::new(&[0xCA, 0xFE, 0xD0, 0x0D]);
        assert!(matches!(reader.expect_magic(), Err(ClassParseError::InvalidMagic)));
    }

    #[test]
    fn modified_utf8_decodes_nul_and_surrogates() {
        assert_eq!(decode_modified_utf8(b"plain").unwrap(), "plain");
        assert_eq!(decode_modified_utf8(&[0xC0, 0x80]).unwrap(), "\0");
        assert_eq!(decode_modified_utf8(&[0x63, 0xC3, 0xA9]).unwrap(), "c\u{e9}");
        // U+1F600 as a surrogate pair, each unit in three bytes.
        let emoji = [0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80];
        assert_eq!(decode_modified_utf8(&emoji).unwrap(), "\u{1F600}");
        assert!(decode_modified_utf8(&[0xC3]).is_err());
    }

    #[test]
    fn long_constants_take_two_slots() {
        // count = 4: Long (slots 1-2), Utf8 "A" (slot 3)
        let bytes = [
            0x00, 0x04, //
            5, 0, 0, 0, 0, 0, 0, 0, 42, //
            1, 0x00, 0x01, b'A',
        ];
        let mut reader = ClassReader::new(&bytes);
        let pool = ConstantPool::parse(&mut reader).unwrap();
        assert_eq!(pool.utf8(3).unwrap(), "A");
        assert!(pool.utf8(2).is_err());
        assert_eq!(reader.remaining(), 0);
    }
}
