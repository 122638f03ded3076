use crate::adapters::csv_codec;
use crate::core::{aggregator, classifier};
use crate::core::{Classification, ConfigProvider, GradeRecord, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use std::path::Path;

pub struct GradePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

fn join_path(dir: &str, name: &str) -> String {
    Path::new(dir).join(name).to_string_lossy().into_owned()
}

impl<S: Storage, C: ConfigProvider> GradePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Input paths in processing order: the explicit list when one is
    /// configured, otherwise every file of the input directory by name.
    pub async fn resolve_sources(&self) -> Result<Vec<String>> {
        let input_dir = self.config.input_dir();

        let names = if self.config.input_files().is_empty() {
            self.storage
                .list_files(input_dir)
                .await
                .map_err(|e| match e {
                    EtlError::IoError(source) => EtlError::SourceOpenError {
                        path: input_dir.to_string(),
                        source,
                    },
                    other => other,
                })?
        } else {
            self.config.input_files().to_vec()
        };

        Ok(names
            .iter()
            .map(|name| join_path(input_dir, name))
            .collect())
    }

    async fn read_source(&self, path: &str) -> Result<Vec<GradeRecord>> {
        let data = self.storage.read_file(path).await.map_err(|e| match e {
            EtlError::IoError(source) => EtlError::SourceOpenError {
                path: path.to_string(),
                source,
            },
            other => other,
        })?;

        csv_codec::parse_grades(path, &data)
    }

    async fn write_reports(&self, reports: &[(&str, &[u8])]) -> Result<()> {
        let output_dir = self.config.output_dir();
        self.storage
            .write_files(reports)
            .await
            .map_err(|e| match e {
                EtlError::IoError(source) => EtlError::SinkWriteError {
                    path: output_dir.to_string(),
                    source,
                },
                other => other,
            })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GradePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<GradeRecord>> {
        let sources = self.resolve_sources().await?;
        if sources.is_empty() {
            tracing::warn!("No input files found in {}", self.config.input_dir());
        }

        let mut records = Vec::new();
        // One source at a time: each is fully read and released before the next is opened.
        for source in &sources {
            let source_records = self.read_source(source).await?;
            if source_records.is_empty() {
                tracing::warn!("{} contains no grade rows", source);
            }
            tracing::debug!("Read {} rows from {}", source_records.len(), source);
            records.extend(source_records);
        }

        tracing::info!(
            "Loaded {} grade rows from {} files",
            records.len(),
            sources.len()
        );
        Ok(records)
    }

    async fn transform(&self, records: Vec<GradeRecord>) -> Result<Classification> {
        let entries = aggregator::aggregate(&records);
        Ok(classifier::classify(&entries))
    }

    async fn load(&self, classification: Classification) -> Result<String> {
        let output_dir = self.config.output_dir();
        let approved_path = join_path(output_dir, self.config.approved_filename());
        let denied_path = join_path(output_dir, self.config.denied_filename());

        // Encode both reports before touching the filesystem
        let approved = csv_codec::write_approved(&classification.approved)?;
        let denied = csv_codec::write_denied(&classification.denied)?;

        tracing::debug!(
            "Writing {} bytes to {} and {} bytes to {}",
            approved.len(),
            approved_path,
            denied.len(),
            denied_path
        );
        self.write_reports(&[
            (approved_path.as_str(), approved.as_slice()),
            (denied_path.as_str(), denied.as_slice()),
        ])
        .await?;

        tracing::info!(
            "Wrote {} approval rows to {} and {} denials to {}",
            classification.approved.len(),
            approved_path,
            classification.denied.len(),
            denied_path
        );
        Ok(output_dir.to_string())
    }
}
