use crate::core::pipeline::UniqueIntPipeline;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use crate::utils::monitor::SystemMonitor;
use std::time::{Duration, Instant};

/// 批次中某個 job 失敗後的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 回報錯誤並停止，後續 job 不再執行（預設）
    #[default]
    Halt,
    /// 記錄失敗並繼續執行剩餘 job
    Continue,
}

impl FailurePolicy {
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "halt" => Some(Self::Halt),
            "continue" => Some(Self::Continue),
            _ => None,
        }
    }
}

/// 單一 job 的執行結果
#[derive(Debug, Clone)]
pub struct JobResult {
    pub input_path: String,
    pub output_path: String,
    pub unique_values: usize,
    pub duration: Duration,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub completed: Vec<JobResult>,
    pub failed: Vec<(String, EtlError)>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_values(&self) -> usize {
        self.completed.iter().map(|job| job.unique_values).sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.completed.iter().map(|job| job.duration).sum()
    }
}

/// 依序執行多組 (input, output) job，每個 job 使用獨立的集合實例
pub struct JobSequence<S: Storage + Clone> {
    storage: S,
    policy: FailurePolicy,
    monitor: SystemMonitor,
}

impl<S: Storage + Clone> JobSequence<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            policy: FailurePolicy::default(),
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 啟用或禁用系統監控
    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn execute_all<C>(&self, jobs: &[C]) -> Result<BatchSummary>
    where
        C: ConfigProvider + Clone,
    {
        let mut summary = BatchSummary::default();

        for (index, job) in jobs.iter().enumerate() {
            tracing::info!(
                "▶️ Job {}/{}: {} -> {}",
                index + 1,
                jobs.len(),
                job.input_path(),
                job.output_path()
            );

            match self.execute_job(job) {
                Ok(result) => {
                    tracing::info!(
                        "✅ Job completed: {} ({} unique integers, {:?})",
                        result.output_path,
                        result.unique_values,
                        result.duration
                    );
                    summary.completed.push(result);
                }
                Err(e) => match self.policy {
                    FailurePolicy::Halt => {
                        tracing::error!("❌ Job failed: {}: {}", job.input_path(), e);
                        tracing::error!(
                            "⏹️ Halting batch; {} job(s) not attempted",
                            jobs.len() - index - 1
                        );
                        return Err(e);
                    }
                    FailurePolicy::Continue => {
                        tracing::warn!(
                            "⚠️ Job failed: {}: {} (continuing)",
                            job.input_path(),
                            e
                        );
                        summary.failed.push((job.input_path().to_string(), e));
                    }
                },
            }

            self.monitor.log_stats(&format!("Job {}", index + 1));
        }

        self.monitor.log_final_stats();
        Ok(summary)
    }

    fn execute_job<C>(&self, job: &C) -> Result<JobResult>
    where
        C: ConfigProvider + Clone,
    {
        let start_time = Instant::now();
        let pipeline = UniqueIntPipeline::new(self.storage.clone(), job.clone());

        // Extract
        let lines = pipeline.extract()?;
        tracing::debug!("📥 Extracted {} lines", lines.len());

        // Transform
        let transform_result = pipeline.transform(lines)?;
        let unique_values = transform_result.values.len();
        tracing::debug!("🔄 Retained {} unique integers", unique_values);

        // Load
        let output_path = pipeline.load(transform_result)?;
        tracing::debug!("💾 Loaded data to: {}", output_path);

        Ok(JobResult {
            input_path: job.input_path().to_string(),
            output_path,
            unique_values,
            duration: start_time.elapsed(),
        })
    }
}
