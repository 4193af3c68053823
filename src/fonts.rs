use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use resvg::usvg::fontdb;

/// Font files expected under the configured fonts directory, one per text
/// role: title, body, author.
pub const FONT_FILES: [&str; 3] = ["clash-display.ttf", "satoshi.ttf", "aloe-vera.ttf"];

/// Read the three card fonts concurrently and build a font database for a
/// single render. Reads are not cached; every render sees the files as they
/// currently are on disk.
pub async fn load(dir: &Path) -> Result<Arc<fontdb::Database>> {
    let read = |name: &'static str| {
        let path = dir.join(name);
        async move {
            tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read font {}", path.display()))
        }
    };
    let (title, body, author) =
        tokio::try_join!(read(FONT_FILES[0]), read(FONT_FILES[1]), read(FONT_FILES[2]))?;
    let mut db = fontdb::Database::new();
    db.load_font_data(title);
    db.load_font_data(body);
    db.load_font_data(author);
    Ok(Arc::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        for name in FONT_FILES {
            std::fs::write(dir.path().join(name), b"not a real font").unwrap();
        }
        // Unparseable data is skipped by the database, but the reads succeed.
        let db = load(dir.path()).await.unwrap();
        assert_eq!(db.len(), 0);
    }

    #[tokio::test]
    async fn test_load_missing_font() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FONT_FILES[0]), b"x").unwrap();
        let err = load(dir.path()).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to read font"), "{message}");
    }
}
