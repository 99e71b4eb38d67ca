use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SAMPLE_FILES: &[(&str, &str)] = &[
    (
        "sample_document.txt",
        "This is a sample document.\n\nIt contains some text that can be used for testing email attachments.\nYou can replace this with any file you want to attach.",
    ),
    (
        "sample_file.txt",
        "This is another sample file.\n\nIt demonstrates how to attach multiple files to an email.",
    ),
];

/// Sample attachment files generated in the OS temp dir.
/// Removed on drop, so cleanup runs on every exit path once the send
/// attempt has finished.
pub struct SampleFiles {
    paths: Vec<PathBuf>,
}

impl SampleFiles {
    pub fn create() -> io::Result<Self> {
        Self::create_in(&std::env::temp_dir())
    }

    fn create_in(dir: &Path) -> io::Result<Self> {
        let mut files = Self { paths: Vec::new() };

        for (name, content) in SAMPLE_FILES {
            let path = dir.join(name);
            fs::write(&path, content)?;

            println!("Created sample file: {}", path.display());
            files.paths.push(path);
        }

        Ok(files)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for SampleFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            if let Err(e) = fs::remove_file(path) {
                log::warn!("Failed to remove sample file {:?}: {}", path, e);
            }
        }
    }
}
