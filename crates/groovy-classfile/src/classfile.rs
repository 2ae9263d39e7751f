use crate::constant_pool::ConstantPool;
use crate::error::{Error, Result};
use crate::reader::Reader;

const MAGIC: u32 = 0xCAFE_BABE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access_flags: u16,
    /// Internal name, e.g. `java/util/Map$Entry`.
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<ClassMember>,
    pub methods: Vec<ClassMember>,
    pub signature: Option<String>,
    pub inner_classes: Vec<InnerClassInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
}

impl ClassMember {
    #[must_use]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.access_flags & flag != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassInfo {
    pub inner_class: String,
    pub outer_class: Option<String>,
    pub inner_name: Option<String>,
    pub access_flags: u16,
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let magic = reader.read_u4()?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }
        let minor_version = reader.read_u2()?;
        let major_version = reader.read_u2()?;
        let pool = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.read_u2()?;
        let this_class = pool.get_class_name(reader.read_u2()?)?;
        let super_class = pool.get_optional_class_name(reader.read_u2()?)?;

        let interface_count = reader.read_u2()?;
        let interfaces = (0..interface_count)
            .map(|_| pool.get_class_name(reader.read_u2()?))
            .collect::<Result<Vec<_>>>()?;

        let fields = read_members(&mut reader, &pool)?;
        let methods = read_members(&mut reader, &pool)?;
        let attrs = read_attributes(&mut reader, &pool)?;
        reader.ensure_empty()?;

        Ok(Self {
            minor_version,
            major_version,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            signature: attrs.signature,
            inner_classes: attrs.inner_classes,
        })
    }

    #[must_use]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.access_flags & flag != 0
    }
}

fn read_members(reader: &mut Reader<'_>, pool: &ConstantPool) -> Result<Vec<ClassMember>> {
    let count = reader.read_u2()?;
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let access_flags = reader.read_u2()?;
        let name = pool.get_utf8(reader.read_u2()?)?.to_string();
        let descriptor = pool.get_utf8(reader.read_u2()?)?.to_string();
        let attrs = read_attributes(reader, pool)?;
        members.push(ClassMember {
            access_flags,
            name,
            descriptor,
            signature: attrs.signature,
        });
    }
    Ok(members)
}

#[derive(Default)]
struct Attributes {
    signature: Option<String>,
    inner_classes: Vec<InnerClassInfo>,
}

fn read_attributes(reader: &mut Reader<'_>, pool: &ConstantPool) -> Result<Attributes> {
    let count = reader.read_u2()?;
    let mut attrs = Attributes::default();
    for _ in 0..count {
        let name = pool.get_utf8(reader.read_u2()?)?;
        let len = reader.read_u4()? as usize;
        let mut body = Reader::new(reader.read_bytes(len)?);
        match name {
            "Signature" => {
                attrs.signature = Some(pool.get_utf8(body.read_u2()?)?.to_string());
                body.ensure_empty()
                    .map_err(|_| Error::MalformedAttribute("Signature"))?;
            }
            "InnerClasses" => {
                let entries = body.read_u2()?;
                for _ in 0..entries {
                    let inner_class = pool.get_class_name(body.read_u2()?)?;
                    let outer_class = pool.get_optional_class_name(body.read_u2()?)?;
                    let inner_name = match body.read_u2()? {
                        0 => None,
                        idx => Some(pool.get_utf8(idx)?.to_string()),
                    };
                    let access_flags = body.read_u2()?;
                    attrs.inner_classes.push(InnerClassInfo {
                        inner_class,
                        outer_class,
                        inner_name,
                        access_flags,
                    });
                }
                body.ensure_empty()
                    .map_err(|_| Error::MalformedAttribute("InnerClasses"))?;
            }
            // Code, annotations, stack maps etc. carry nothing the engine needs.
            _ => {}
        }
    }
    Ok(attrs)
}
