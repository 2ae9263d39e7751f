use std::collections::{BTreeSet, HashMap};
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use groovy_classfile::ClassFile;
use groovy_core::internal_to_binary;
use parking_lot::Mutex;

use crate::{
    class_file_path, is_ignored_class, ClassLoader, ClassStub, ClasspathEntry, ClasspathError,
};

/// A lazily read classpath.
///
/// Classes are located and parsed only when requested. When several entries define the same
/// class, the first entry wins. Jar archives are opened once and kept open for subsequent
/// lookups.
pub struct Classpath {
    entries: Vec<ClasspathEntry>,
    archives: Mutex<HashMap<PathBuf, Option<zip::ZipArchive<File>>>>,
    names: OnceLock<Names>,
}

#[derive(Default)]
struct Names {
    binary_names_sorted: Vec<String>,
    packages_sorted: Vec<String>,
}

impl std::fmt::Debug for Classpath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classpath")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl Classpath {
    pub fn new(entries: Vec<ClasspathEntry>) -> Self {
        Self {
            entries,
            archives: Mutex::new(HashMap::new()),
            names: OnceLock::new(),
        }
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    fn read_class_bytes(&self, binary_name: &str) -> Result<Option<Vec<u8>>, ClasspathError> {
        let rel = class_file_path(binary_name);
        for entry in &self.entries {
            match entry {
                ClasspathEntry::ClassDir(dir) => {
                    let path = dir.join(&rel);
                    if path.is_file() {
                        return Ok(Some(std::fs::read(path)?));
                    }
                }
                ClasspathEntry::Jar(jar) => {
                    let mut archives = self.archives.lock();
                    let archive = archives
                        .entry(jar.clone())
                        .or_insert_with(|| open_archive(jar));
                    let Some(archive) = archive.as_mut() else {
                        continue;
                    };
                    let mut file = match archive.by_name(&rel) {
                        Ok(file) => file,
                        Err(zip::result::ZipError::FileNotFound) => continue,
                        Err(err) => return Err(err.into()),
                    };
                    let mut bytes = Vec::with_capacity(file.size() as usize);
                    file.read_to_end(&mut bytes)?;
                    return Ok(Some(bytes));
                }
            }
        }
        Ok(None)
    }

    fn names(&self) -> &Names {
        self.names.get_or_init(|| {
            let mut binary_names = BTreeSet::new();
            for entry in &self.entries {
                for internal in enumerate_entry(entry) {
                    if !is_ignored_class(&internal) {
                        binary_names.insert(internal_to_binary(&internal));
                    }
                }
            }
            let packages: BTreeSet<String> = binary_names
                .iter()
                .filter_map(|name| name.rsplit_once('.').map(|(pkg, _)| pkg.to_string()))
                .collect();
            Names {
                binary_names_sorted: binary_names.into_iter().collect(),
                packages_sorted: packages.into_iter().collect(),
            }
        })
    }

    /// Binary names of all classes starting with `prefix`, in sorted order.
    ///
    /// The name listing is built on first use by enumerating entries; classfiles are not parsed.
    pub fn class_names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let names = &self.names().binary_names_sorted;
        let start = names.partition_point(|name| name.as_str() < prefix);
        names[start..]
            .iter()
            .take_while(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn package_exists(&self, package: &str) -> bool {
        self.names()
            .packages_sorted
            .binary_search_by(|pkg| pkg.as_str().cmp(package))
            .is_ok()
    }
}

impl ClassLoader for Classpath {
    fn load_class(&self, binary_name: &str) -> Result<Option<ClassStub>, ClasspathError> {
        let Some(bytes) = self.read_class_bytes(binary_name)? else {
            return Ok(None);
        };
        let class = ClassFile::parse(&bytes).map_err(|source| ClasspathError::ClassFile {
            class: binary_name.to_string(),
            source,
        })?;
        ClassStub::from_classfile(class).map(Some)
    }
}

fn open_archive(path: &Path) -> Option<zip::ZipArchive<File>> {
    let opened = File::open(path)
        .map_err(ClasspathError::from)
        .and_then(|file| zip::ZipArchive::new(file).map_err(ClasspathError::from));
    match opened {
        Ok(archive) => Some(archive),
        Err(err) => {
            tracing::warn!(
                jar = %path.display(),
                error = %err,
                "skipping unreadable classpath archive"
            );
            None
        }
    }
}

/// Internal names (`a/b/C`) of every classfile in `entry`.
fn enumerate_entry(entry: &ClasspathEntry) -> Vec<String> {
    match entry {
        ClasspathEntry::ClassDir(dir) => walkdir::WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension() == Some(OsStr::new("class")))
            .filter_map(|e| {
                let rel = e.path().strip_prefix(dir).ok()?.with_extension("");
                let parts: Vec<_> = rel.iter().map(|p| p.to_string_lossy().into_owned()).collect();
                Some(parts.join("/"))
            })
            .collect(),
        ClasspathEntry::Jar(jar) => {
            let Some(archive) = open_archive(jar) else {
                return Vec::new();
            };
            archive
                .file_names()
                .filter(|name| !name.starts_with("META-INF/"))
                .filter_map(|name| name.strip_suffix(".class"))
                .map(str::to_string)
                .collect()
        }
    }
}
