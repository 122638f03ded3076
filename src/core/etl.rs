use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load once. The first error aborts the run.
    pub async fn run(&mut self) -> Result<String> {
        tracing::info!("Starting grade processing");
        self.monitor.log_stats("Start");

        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} grade records", records.len());
        self.monitor.log_stats("Extract");

        let classification = self.pipeline.transform(records).await?;
        tracing::info!(
            "Classified students: {} approval rows, {} denied",
            classification.approved.len(),
            classification.denied.len()
        );
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(classification).await?;
        tracing::info!("Reports saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
