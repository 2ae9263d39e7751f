use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Base(BaseType),
    /// Internal name of a class, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let mut cursor = Cursor::new(desc);
    let ty = cursor.field_type()?;
    cursor.finish()?;
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let mut cursor = Cursor::new(desc);
    cursor.expect('(')?;
    let mut params = Vec::new();
    while cursor.peek() != Some(')') {
        params.push(cursor.field_type()?);
    }
    cursor.expect(')')?;
    let return_type = if cursor.eat('V') {
        ReturnType::Void
    } else {
        ReturnType::Type(cursor.field_type()?)
    };
    cursor.finish()?;
    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

struct Cursor<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, rest: input }
    }

    fn error(&self) -> Error {
        Error::InvalidDescriptor(self.input.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn finish(&self) -> Result<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn field_type(&mut self) -> Result<FieldType> {
        let c = self.peek().ok_or_else(|| self.error())?;
        self.rest = &self.rest[c.len_utf8()..];
        let base = match c {
            'Z' => BaseType::Boolean,
            'B' => BaseType::Byte,
            'C' => BaseType::Char,
            'S' => BaseType::Short,
            'I' => BaseType::Int,
            'J' => BaseType::Long,
            'F' => BaseType::Float,
            'D' => BaseType::Double,
            'L' => {
                let end = self.rest.find(';').ok_or_else(|| self.error())?;
                let name = &self.rest[..end];
                if name.is_empty() {
                    return Err(self.error());
                }
                self.rest = &self.rest[end + 1..];
                return Ok(FieldType::Object(name.to_string()));
            }
            '[' => return Ok(FieldType::Array(Box::new(self.field_type()?))),
            _ => return Err(self.error()),
        };
        Ok(FieldType::Base(base))
    }
}
