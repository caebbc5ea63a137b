use andaman_planner::{DataSource, Dataset, LoadError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads each dataset from `<dir>/<dataset file name>`.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    dir: PathBuf,
}

impl FileDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(dataset.file_name())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait::async_trait]
impl DataSource for FileDataSource {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, LoadError> {
        let path = self.path_for(dataset);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                dataset,
                path: path.clone(),
                source,
            })?;
        log::debug!("read {} bytes from {}", raw.len(), path.display());
        serde_json::from_str(&raw).map_err(|source| LoadError::Json { dataset, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use andaman_planner::load_reference_data;
    use std::time::Duration;

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "andaman-source-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn missing_and_malformed_files_are_errors() {
        let dir = temp_dir("errors");
        std::fs::write(dir.join("activities.json"), "{ nope").unwrap();
        let source = FileDataSource::new(&dir);

        let missing = source.fetch(Dataset::Locations).await.unwrap_err();
        assert!(matches!(missing, LoadError::Io { .. }));
        let malformed = source.fetch(Dataset::Activities).await.unwrap_err();
        assert!(matches!(malformed, LoadError::Json { .. }));

        let data = load_reference_data(&source, Duration::from_secs(2)).await;
        assert!(data.locations.is_empty());
        assert!(data.activities.is_empty());
    }

    #[tokio::test]
    async fn reads_json_files() {
        let dir = temp_dir("ok");
        std::fs::write(
            dir.join("locations.json"),
            r#"[{ "id": "x", "name": "Jolly Buoy", "island": "Port Blair" }]"#,
        )
        .unwrap();
        let source = FileDataSource::new(&dir);
        assert_eq!(source.dir(), dir.as_path());
        let data = load_reference_data(&source, Duration::from_secs(2)).await;
        assert_eq!(data.locations.len(), 1);
        assert_eq!(data.locations[0].name, "Jolly Buoy");
    }
}
