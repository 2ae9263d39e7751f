//! Utilities shared by the engine's tests.
//!
//! - [`ClassFileBuilder`] emits real classfile bytes so classpath tests exercise the actual
//!   reader instead of hand-written stubs.
//! - [`write_jar`] / [`write_class_dir`] lay those bytes out on disk.
//! - [`init_tracing`] routes `tracing` output through the test harness.

mod classfile;

pub use classfile::ClassFileBuilder;

use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a jar containing `classes` (binary name → classfile bytes) plus a minimal manifest.
pub fn write_jar(path: &Path, classes: &[(&str, Vec<u8>)]) {
    let file = std::fs::File::create(path).expect("create jar");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();

    zip.start_file("META-INF/MANIFEST.MF", options)
        .expect("start manifest");
    zip.write_all(b"Manifest-Version: 1.0\n")
        .expect("write manifest");

    for (binary_name, bytes) in classes {
        zip.start_file(class_entry_path(binary_name), options)
            .expect("start class entry");
        zip.write_all(bytes).expect("write class entry");
    }
    zip.finish().expect("finish jar");
}

/// Writes `classes` below `root` using the usual `a/b/C.class` layout.
pub fn write_class_dir(root: &Path, classes: &[(&str, Vec<u8>)]) -> Vec<PathBuf> {
    classes
        .iter()
        .map(|(binary_name, bytes)| {
            let path = root.join(class_entry_path(binary_name));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create package dirs");
            }
            std::fs::write(&path, bytes).expect("write class file");
            path
        })
        .collect()
}

fn class_entry_path(binary_name: &str) -> String {
    format!("{}.class", binary_name.replace('.', "/"))
}

/// Installs a test-writer subscriber once per test binary. Honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
