use std::io::ErrorKind;
use std::path::Path;

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::SourceError;

/// Reads the identifier cache. A missing file yields `Ok(None)`.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read as UTF-8.
pub async fn read_cache(path: &Path) -> Result<Option<Vec<String>>, SourceError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(SourceError::ReadCache {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let identifiers = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    Ok(Some(identifiers))
}

/// Writes one identifier per line with a trailing newline, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub async fn write_cache(path: &Path, identifiers: &[String]) -> Result<(), SourceError> {
    let write_error = |err: std::io::Error| SourceError::WriteCache {
        path: path.to_path_buf(),
        source: err,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let file = tokio::fs::File::create(path).await.map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for identifier in identifiers {
        writer
            .write_all(identifier.as_bytes())
            .await
            .map_err(write_error)?;
        writer.write_all(b"\n").await.map_err(write_error)?;
    }
    writer.flush().await.map_err(write_error)?;
    Ok(())
}
