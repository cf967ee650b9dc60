use crate::tokenizer::{count_tokens, tokenize};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Where document text comes from. The index only ever asks for whole documents by name.
pub trait DocumentSource {
    fn read_document(&self, filename: &str) -> Result<String>;

    /// Normalized words of `filename`, in order.
    fn tokens(&self, filename: &str) -> Result<Vec<String>> {
        Ok(tokenize(&self.read_document(filename)?))
    }

    fn total_token_count(&self, filename: &str) -> Result<usize> {
        Ok(count_tokens(&self.read_document(filename)?))
    }
}

/// Documents stored as files under `root`.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub root: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn path(&self, filename: &str) -> PathBuf { self.root.join(filename) }
}

impl DocumentSource for FileSource {
    fn read_document(&self, filename: &str) -> Result<String> {
        let path = self.path(filename);
        fs::read_to_string(&path).with_context(|| format!("reading document {}", path.display()))
    }
}

/// Whitespace-separated filenames, first occurrence wins.
pub fn parse_manifest(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading collection {}", path.display()))?;
    Ok(parse_manifest(&text))
}

/// A manifest together with the directory its filenames are relative to.
#[derive(Debug, Clone)]
pub struct Collection {
    pub source: FileSource,
    pub filenames: Vec<String>,
}

impl Collection {
    pub fn open<P: AsRef<Path>>(manifest: P) -> Result<Self> {
        let manifest = manifest.as_ref();
        let filenames = read_manifest(manifest)?;
        let root = manifest.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { source: FileSource { root }, filenames })
    }

    pub fn from_files<P: AsRef<Path>>(root: P, filenames: Vec<String>) -> Self {
        Self { source: FileSource::new(root), filenames }
    }

    pub fn len(&self) -> usize { self.filenames.len() }

    pub fn is_empty(&self) -> bool { self.filenames.is_empty() }
}
