//! Class loading without a host runtime.
//!
//! A [`ClassLoader`] turns a binary class name into a [`ClassStub`] by locating the classfile and
//! parsing it with `groovy-classfile`. [`Classpath`] reads class directories and jars lazily;
//! [`InMemoryClassLoader`] serves classfile bytes held in memory.

mod classpath;
mod memory;
mod stub;

pub use classpath::Classpath;
pub use memory::InMemoryClassLoader;
pub use stub::{ClassStub, FieldStub, MethodStub};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClasspathError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("classfile error in {class}: {source}")]
    ClassFile {
        class: String,
        #[source]
        source: groovy_classfile::Error,
    },
}

/// Loads classes by binary name (`java.util.Map$Entry`).
///
/// `Ok(None)` means the class does not exist; `Err` means it exists but could not be read.
pub trait ClassLoader: Send + Sync {
    fn load_class(&self, binary_name: &str) -> Result<Option<ClassStub>, ClasspathError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClasspathEntry {
    ClassDir(PathBuf),
    Jar(PathBuf),
}

impl ClasspathEntry {
    /// `.jar` and `.zip` files are archives; anything else is treated as a class directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_archive = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"));
        if is_archive {
            ClasspathEntry::Jar(path)
        } else {
            ClasspathEntry::ClassDir(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ClasspathEntry::ClassDir(p) | ClasspathEntry::Jar(p) => p,
        }
    }
}

fn class_file_path(binary_name: &str) -> String {
    format!("{}.class", groovy_core::binary_to_internal(binary_name))
}

fn is_ignored_class(internal_name: &str) -> bool {
    internal_name == "module-info"
        || internal_name == "package-info"
        || internal_name.ends_with("/package-info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_kind_follows_extension() {
        assert_eq!(
            ClasspathEntry::from_path("/libs/groovy.JAR"),
            ClasspathEntry::Jar("/libs/groovy.JAR".into())
        );
        assert_eq!(
            ClasspathEntry::from_path("/build/classes"),
            ClasspathEntry::ClassDir("/build/classes".into())
        );
    }

    #[test]
    fn package_info_is_not_a_class() {
        assert!(is_ignored_class("com/example/package-info"));
        assert!(is_ignored_class("module-info"));
        assert!(!is_ignored_class("com/example/Info"));
    }
}
