use std::collections::HashMap;

const ACC_PUBLIC: u16 = 0x0001;
const ACC_STATIC: u16 = 0x0008;
const ACC_FINAL: u16 = 0x0010;
const ACC_SUPER: u16 = 0x0020;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;
const ACC_ENUM: u16 = 0x4000;

#[derive(Debug, Clone)]
struct MemberSpec {
    access_flags: u16,
    name: String,
    descriptor: String,
    signature: Option<String>,
}

/// Builds minimal, valid classfile bytes (no code attributes).
///
/// Names are given in binary form (`java.util.Map$Entry`); the builder converts them to the
/// internal form the classfile format uses.
#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    access_flags: u16,
    name: String,
    super_class: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<MemberSpec>,
    methods: Vec<MemberSpec>,
    signature: Option<String>,
    inner_classes: Vec<(String, Option<String>, Option<String>, u16)>,
}

impl ClassFileBuilder {
    pub fn class(binary_name: &str) -> Self {
        Self {
            access_flags: ACC_PUBLIC | ACC_SUPER,
            name: internal(binary_name),
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            signature: None,
            inner_classes: Vec::new(),
        }
    }

    pub fn interface(binary_name: &str) -> Self {
        Self {
            access_flags: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
            ..Self::class(binary_name)
        }
    }

    /// An enum with one `public static final` field per constant.
    pub fn enumeration(binary_name: &str, constants: &[&str]) -> Self {
        let mut builder = Self {
            access_flags: ACC_PUBLIC | ACC_FINAL | ACC_SUPER | ACC_ENUM,
            super_class: Some("java/lang/Enum".to_string()),
            ..Self::class(binary_name)
        };
        let descriptor = format!("L{};", builder.name);
        for constant in constants {
            builder = builder.field_with_flags(
                constant,
                &descriptor,
                ACC_PUBLIC | ACC_STATIC | ACC_FINAL | ACC_ENUM,
            );
        }
        builder
    }

    pub fn extends(mut self, binary_name: &str) -> Self {
        self.super_class = Some(internal(binary_name));
        self
    }

    /// Only `java.lang.Object` itself has no superclass.
    pub fn without_super_class(mut self) -> Self {
        self.super_class = None;
        self
    }

    pub fn implements(mut self, binary_name: &str) -> Self {
        self.interfaces.push(internal(binary_name));
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    pub fn field(self, name: &str, descriptor: &str) -> Self {
        self.field_with_flags(name, descriptor, ACC_PUBLIC)
    }

    pub fn static_field(self, name: &str, descriptor: &str) -> Self {
        self.field_with_flags(name, descriptor, ACC_PUBLIC | ACC_STATIC)
    }

    pub fn field_with_flags(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.fields.push(MemberSpec {
            access_flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: None,
        });
        self
    }

    pub fn method(self, name: &str, descriptor: &str) -> Self {
        self.method_with_flags(name, descriptor, ACC_PUBLIC)
    }

    pub fn static_method(self, name: &str, descriptor: &str) -> Self {
        self.method_with_flags(name, descriptor, ACC_PUBLIC | ACC_STATIC)
    }

    pub fn method_with_flags(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.methods.push(MemberSpec {
            access_flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: None,
        });
        self
    }

    /// Records an `InnerClasses` entry naming `inner` as a member of `outer`.
    pub fn inner_class(mut self, inner: &str, outer: &str, simple_name: &str) -> Self {
        self.inner_classes.push((
            internal(inner),
            Some(internal(outer)),
            Some(simple_name.to_string()),
            ACC_PUBLIC | ACC_STATIC,
        ));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = PoolWriter::default();
        let this_class = pool.class(&self.name);
        let super_class = self.super_class.as_deref().map_or(0, |name| pool.class(name));
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();

        let mut body = Vec::new();
        push_u2(&mut body, self.access_flags);
        push_u2(&mut body, this_class);
        push_u2(&mut body, super_class);
        push_u2(&mut body, interfaces.len() as u16);
        for idx in interfaces {
            push_u2(&mut body, idx);
        }
        for members in [&self.fields, &self.methods] {
            push_u2(&mut body, members.len() as u16);
            for member in members {
                push_u2(&mut body, member.access_flags);
                push_u2(&mut body, pool.utf8(&member.name));
                push_u2(&mut body, pool.utf8(&member.descriptor));
                match &member.signature {
                    Some(sig) => {
                        push_u2(&mut body, 1);
                        pool.signature_attribute(&mut body, sig);
                    }
                    None => push_u2(&mut body, 0),
                }
            }
        }

        let attr_count =
            u16::from(self.signature.is_some()) + u16::from(!self.inner_classes.is_empty());
        push_u2(&mut body, attr_count);
        if let Some(sig) = &self.signature {
            pool.signature_attribute(&mut body, sig);
        }
        if !self.inner_classes.is_empty() {
            let name = pool.utf8("InnerClasses");
            let mut attr = Vec::new();
            push_u2(&mut attr, self.inner_classes.len() as u16);
            for (inner, outer, simple, flags) in &self.inner_classes {
                let inner = pool.class(inner);
                push_u2(&mut attr, inner);
                let outer = outer.as_deref().map_or(0, |o| pool.class(o));
                push_u2(&mut attr, outer);
                let simple = simple.as_deref().map_or(0, |s| pool.utf8(s));
                push_u2(&mut attr, simple);
                push_u2(&mut attr, *flags);
            }
            push_u2(&mut body, name);
            push_u4(&mut body, attr.len() as u32);
            body.extend(attr);
        }

        let mut out = Vec::new();
        push_u4(&mut out, 0xCAFE_BABE);
        push_u2(&mut out, 0);
        push_u2(&mut out, 52);
        push_u2(&mut out, pool.count());
        out.extend(pool.bytes);
        out.extend(body);
        out
    }
}

#[derive(Default)]
struct PoolWriter {
    bytes: Vec<u8>,
    next: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl PoolWriter {
    fn count(&self) -> u16 {
        self.next.max(1)
    }

    fn alloc(&mut self) -> u16 {
        if self.next == 0 {
            self.next = 1;
        }
        let idx = self.next;
        self.next += 1;
        idx
    }

    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(&idx) = self.utf8.get(value) {
            return idx;
        }
        let idx = self.alloc();
        self.bytes.push(1);
        push_u2(&mut self.bytes, value.len() as u16);
        self.bytes.extend_from_slice(value.as_bytes());
        self.utf8.insert(value.to_string(), idx);
        idx
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(&idx) = self.classes.get(internal_name) {
            return idx;
        }
        let name = self.utf8(internal_name);
        let idx = self.alloc();
        self.bytes.push(7);
        push_u2(&mut self.bytes, name);
        self.classes.insert(internal_name.to_string(), idx);
        idx
    }

    fn signature_attribute(&mut self, out: &mut Vec<u8>, signature: &str) {
        let name = self.utf8("Signature");
        let value = self.utf8(signature);
        push_u2(out, name);
        push_u4(out, 2);
        push_u2(out, value);
    }
}

fn internal(binary_name: &str) -> String {
    binary_name.replace('.', "/")
}

fn push_u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
