use std::collections::HashMap;

use groovy_classfile::ClassFile;

use crate::{ClassLoader, ClassStub, ClasspathError};

/// Serves classfile bytes held in memory, keyed by binary name.
///
/// Bytes are parsed on every load; callers are expected to cache the resulting declarations.
#[derive(Debug, Default, Clone)]
pub struct InMemoryClassLoader {
    classes: HashMap<String, Vec<u8>>,
}

impl InMemoryClassLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, binary_name: impl Into<String>, bytes: Vec<u8>) {
        self.classes.insert(binary_name.into(), bytes);
    }

    #[must_use]
    pub fn with_class(mut self, binary_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(binary_name, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLoader for InMemoryClassLoader {
    fn load_class(&self, binary_name: &str) -> Result<Option<ClassStub>, ClasspathError> {
        let Some(bytes) = self.classes.get(binary_name) else {
            return Ok(None);
        };
        let class = ClassFile::parse(bytes).map_err(|source| ClasspathError::ClassFile {
            class: binary_name.to_string(),
            source,
        })?;
        ClassStub::from_classfile(class).map(Some)
    }
}
