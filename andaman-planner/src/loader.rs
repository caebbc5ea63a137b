//! Concurrent, timeboxed loading of the four reference datasets.
//!
//! Each dataset is fetched independently; a failed or slow fetch degrades to an
//! empty collection instead of failing the whole load.
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::ReferenceData;

/// The reference collections a planner needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Locations,
    Activities,
    LocationActivities,
    Ferries,
}

impl Dataset {
    pub const ALL: [Self; 4] = [
        Self::Locations,
        Self::Activities,
        Self::LocationActivities,
        Self::Ferries,
    ];

    /// File name under a data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Locations => "locations.json",
            Self::Activities => "activities.json",
            Self::LocationActivities => "location_adventures.json",
            Self::Ferries => "ferries.json",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {dataset} from {path}: {source}", path = path.display())]
    Io {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{dataset} is not valid JSON: {source}")]
    Json {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },
    #[error("{dataset} did not arrive within {timeout:?}")]
    Timeout { dataset: Dataset, timeout: Duration },
    #[error("{dataset} unavailable: {reason}")]
    Unavailable { dataset: Dataset, reason: String },
}

/// Anything that can produce raw JSON for a dataset.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, LoadError>;
}

async fn fetch_timeboxed<S>(source: &S, dataset: Dataset, timeout: Duration) -> Value
where
    S: DataSource + ?Sized,
{
    let result = match tokio::time::timeout(timeout, source.fetch(dataset)).await {
        Ok(result) => result,
        Err(_) => Err(LoadError::Timeout { dataset, timeout }),
    };
    match result {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{err}; continuing with an empty collection");
            Value::Array(Vec::new())
        }
    }
}

/// Fetch every dataset concurrently, each bounded by `timeout`.
pub async fn load_reference_data<S>(source: &S, timeout: Duration) -> ReferenceData
where
    S: DataSource + ?Sized,
{
    let (locations, activities, location_activities, ferries) = tokio::join!(
        fetch_timeboxed(source, Dataset::Locations, timeout),
        fetch_timeboxed(source, Dataset::Activities, timeout),
        fetch_timeboxed(source, Dataset::LocationActivities, timeout),
        fetch_timeboxed(source, Dataset::Ferries, timeout),
    );
    ReferenceData::from_values(&locations, &activities, &location_activities, &ferries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticSource;

    #[async_trait::async_trait]
    impl DataSource for StaticSource {
        async fn fetch(&self, dataset: Dataset) -> Result<Value, LoadError> {
            match dataset {
                Dataset::Locations => Ok(json!([
                    { "id": "a", "name": "Corbyn's Cove", "island": "Port Blair" }
                ])),
                Dataset::Activities => Err(LoadError::Unavailable {
                    dataset,
                    reason: "HTTP 503".into(),
                }),
                Dataset::LocationActivities => Ok(json!({ "not": "an array" })),
                Dataset::Ferries => Ok(json!([{ "route": "PB-HL" }])),
            }
        }
    }

    struct SlowSource;

    #[async_trait::async_trait]
    impl DataSource for SlowSource {
        async fn fetch(&self, dataset: Dataset) -> Result<Value, LoadError> {
            if dataset == Dataset::Locations {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Ok(json!([{ "id": "x", "name": "Spot" }]))
        }
    }

    #[tokio::test]
    async fn failures_degrade_per_dataset() {
        let data = load_reference_data(&StaticSource, Duration::from_secs(1)).await;
        assert_eq!(data.locations.len(), 1);
        assert!(data.activities.is_empty());
        assert!(data.location_activities.is_empty());
        assert_eq!(data.ferries.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_dataset_times_out_alone() {
        let data = load_reference_data(&SlowSource, Duration::from_millis(500)).await;
        assert!(data.locations.is_empty());
        assert_eq!(data.activities.len(), 1);
    }

    #[test]
    fn file_names_match_data_layout() {
        let names: Vec<&str> = Dataset::ALL.iter().map(|d| d.file_name()).collect();
        assert_eq!(
            names,
            [
                "locations.json",
                "activities.json",
                "location_adventures.json",
                "ferries.json"
            ]
        );
    }
}
