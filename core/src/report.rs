use crate::score::ScoreList;
use crate::tree::WordIndexTree;
use anyhow::{Context, Result};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One line per word, ascending: the word followed by its filenames, ascending.
pub fn write_inverted_index<W: Write>(tree: &WordIndexTree, mut out: W) -> Result<()> {
    for (word, docs) in tree {
        write!(out, "{word}")?;
        for filename in docs.filenames() {
            write!(out, " {filename}")?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// One line per result: score to six decimals, two spaces, filename.
pub fn write_score_list<W: Write>(list: &ScoreList, mut out: W) -> Result<()> {
    for r in list {
        writeln!(out, "{:.6}  {}", r.score, r.filename)?;
    }
    out.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(f))
}

pub fn save_inverted_index<P: AsRef<Path>>(tree: &WordIndexTree, path: P) -> Result<()> {
    write_inverted_index(tree, create(path.as_ref())?)
}

pub fn save_score_list<P: AsRef<Path>>(list: &ScoreList, path: P) -> Result<()> {
    write_score_list(list, create(path.as_ref())?)
}
