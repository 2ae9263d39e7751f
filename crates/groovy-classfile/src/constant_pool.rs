use crate::error::{Error, Result};
use crate::reader::Reader;

#[derive(Debug, Clone)]
enum Entry {
    /// Index 0 and the second slot of `long`/`double` constants.
    Unusable,
    Utf8(String),
    Class { name_index: u16 },
    /// Numeric constants, member references, method handles and friends. The engine never reads
    /// them, so only their kind is recorded.
    #[allow(dead_code)]
    Other(&'static str),
}

#[derive(Debug, Clone)]
pub(crate) struct ConstantPool {
    entries: Vec<Entry>,
}

impl ConstantPool {
    pub(crate) fn parse(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u2()?;
        let mut entries = Vec::with_capacity(count as usize);
        entries.push(Entry::Unusable);

        while entries.len() < count as usize {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let len = reader.read_u2()? as usize;
                    Entry::Utf8(decode_modified_utf8(reader.read_bytes(len)?)?)
                }
                3 | 4 => {
                    reader.skip(4)?;
                    Entry::Other(if tag == 3 { "Integer" } else { "Float" })
                }
                5 | 6 => {
                    reader.skip(8)?;
                    entries.push(Entry::Other(if tag == 5 { "Long" } else { "Double" }));
                    Entry::Unusable
                }
                7 => Entry::Class {
                    name_index: reader.read_u2()?,
                },
                8 => {
                    reader.skip(2)?;
                    Entry::Other("String")
                }
                9..=12 => {
                    reader.skip(4)?;
                    Entry::Other("MemberRef")
                }
                15 => {
                    reader.skip(3)?;
                    Entry::Other("MethodHandle")
                }
                16 => {
                    reader.skip(2)?;
                    Entry::Other("MethodType")
                }
                17 | 18 => {
                    reader.skip(4)?;
                    Entry::Other("Dynamic")
                }
                19 | 20 => {
                    reader.skip(2)?;
                    Entry::Other(if tag == 19 { "Module" } else { "Package" })
                }
                other => return Err(Error::InvalidConstantPoolTag(other)),
            };
            entries.push(entry);
        }

        // A trailing 8-byte constant may push one slot past `count`.
        entries.truncate(count as usize);
        Ok(Self { entries })
    }

    fn entry(&self, index: u16) -> Result<&Entry> {
        match self.entries.get(index as usize) {
            None | Some(Entry::Unusable) => Err(Error::InvalidConstantPoolIndex(index)),
            Some(entry) => Ok(entry),
        }
    }

    pub(crate) fn get_utf8(&self, index: u16) -> Result<&str> {
        match self.entry(index)? {
            Entry::Utf8(value) => Ok(value),
            _ => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Internal name (`java/lang/String`) of a `CONSTANT_Class` entry.
    pub(crate) fn get_class_name(&self, index: u16) -> Result<String> {
        match self.entry(index)? {
            Entry::Class { name_index } => Ok(self.get_utf8(*name_index)?.to_string()),
            _ => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Class",
            }),
        }
    }

    pub(crate) fn get_optional_class_name(&self, index: u16) -> Result<Option<String>> {
        if index == 0 {
            return Ok(None);
        }
        self.get_class_name(index).map(Some)
    }
}

/// Decodes the JVM's modified UTF-8: `NUL` is two bytes and supplementary characters are encoded
/// as surrogate pairs of three bytes each.
fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        if !s.contains('\0') {
            return Ok(s.to_string());
        }
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i] as u16;
        if b0 & 0x80 == 0 {
            if b0 == 0 {
                return Err(Error::InvalidModifiedUtf8);
            }
            units.push(b0);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = continuation(bytes, i + 1)?;
            units.push(((b0 & 0x1F) << 6) | b1);
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            let b1 = continuation(bytes, i + 1)?;
            let b2 = continuation(bytes, i + 2)?;
            units.push(((b0 & 0x0F) << 12) | (b1 << 6) | b2);
            i += 3;
        } else {
            return Err(Error::InvalidModifiedUtf8);
        }
    }
    String::from_utf16(&units).map_err(|_| Error::InvalidModifiedUtf8)
}

fn continuation(bytes: &[u8], idx: usize) -> Result<u16> {
    match bytes.get(idx) {
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        _ => Err(Error::InvalidModifiedUtf8),
    }
}
