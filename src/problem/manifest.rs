use crate::error::{CbbocError, Result};
use std::path::Path;

pub const TRAINING_MANIFEST: &str = "trainingFiles.txt";
pub const TESTING_MANIFEST: &str = "testingFiles.txt";
pub const CLASS_FOLDER_FILE: &str = "classFolder.txt";

/// Reads an instance-list manifest and returns its file names in order.
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = read_text(path)?;
    parse_manifest(&text).map_err(|e| match e {
        CbbocError::ManifestFormat(msg) => {
            CbbocError::ManifestFormat(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Token 0 is the instance count `N`; exactly `N` file names must follow.
pub fn parse_manifest(text: &str) -> Result<Vec<String>> {
    let mut tokens = text.split_whitespace();

    let count_token = tokens
        .next()
        .ok_or_else(|| CbbocError::ManifestFormat("empty manifest".to_string()))?;
    let count: usize = count_token.parse().map_err(|_| {
        CbbocError::ManifestFormat(format!("invalid instance count '{}'", count_token))
    })?;

    let files: Vec<String> = tokens.map(str::to_string).collect();
    if files.len() != count {
        return Err(CbbocError::ManifestFormat(format!(
            "declared {} instances but listed {}",
            count,
            files.len()
        )));
    }

    Ok(files)
}

/// The problem class name is the first token of `classFolder.txt`.
pub fn read_class_folder<P: AsRef<Path>>(resources_root: P) -> Result<String> {
    let path = resources_root.as_ref().join(CLASS_FOLDER_FILE);
    let text = read_text(&path)?;
    text.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| {
            CbbocError::ManifestFormat(format!("bad format for {}", path.display()))
        })
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CbbocError::Read {
        path: path.to_path_buf(),
        source,
    })
}
