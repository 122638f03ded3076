use crate::domain::model::{Classification, GradeRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Names of the regular files directly under `dir`, sorted by name.
    fn list_files(&self, dir: &str)
        -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Replaces every `(path, data)` pair. All files are staged before any is
    /// renamed into place, so a staging failure leaves the old files untouched.
    fn write_files(
        &self,
        files: &[(&str, &[u8])],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_dir(&self) -> &str;
    /// Explicit, ordered source list. Empty means every file in `input_dir`.
    fn input_files(&self) -> &[String];
    fn output_dir(&self) -> &str;
    fn approved_filename(&self) -> &str;
    fn denied_filename(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<GradeRecord>>;
    async fn transform(&self, records: Vec<GradeRecord>) -> Result<Classification>;
    async fn load(&self, classification: Classification) -> Result<String>;
}
