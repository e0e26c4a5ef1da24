//! Bounded pool of external converter processes

use super::job::{needs_color_correct, ConversionJob, PathRemapper};
use crate::config::{ConverterConfig, TexportConfig};
use crate::core::builder::ensure_directory;
use crate::domain::{Result, TexportError};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Lifecycle of a conversion batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Scheduled,
    Running,
    /// Every job succeeded
    Completed,
    /// At least one job failed
    PartialFailure,
}

/// Invocation of the external converter
#[derive(Debug, Clone)]
pub struct ConverterCommand {
    program: String,
    options: Vec<String>,
    color_convert: Vec<String>,
}

impl ConverterCommand {
    pub fn new(
        program: impl Into<String>,
        options: Vec<String>,
        color_convert: Vec<String>,
    ) -> Self {
        Self {
            program: program.into(),
            options,
            color_convert,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(
            config.path.clone(),
            config.options.clone(),
            config.color_convert.clone(),
        )
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one job: `<options> [color-convert] -o <dest> <src>`
    pub fn args(&self, job: &ConversionJob) -> Vec<String> {
        let mut args = self.options.clone();
        if job.needs_color_correct {
            args.extend(self.color_convert.iter().cloned());
        }
        args.push("-o".to_string());
        args.push(job.dest_path.to_string_lossy().into_owned());
        args.push(job.source_path.to_string_lossy().into_owned());
        args
    }

    /// Runs the converter for one job and waits for it
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the process cannot be started or
    /// exits unsuccessfully
    pub async fn run(&self, job: &ConversionJob) -> Result<()> {
        let output = tokio::process::Command::new(&self.program)
            .args(self.args(job))
            .output()
            .await
            .map_err(|e| {
                TexportError::Conversion(format!("Failed to start {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TexportError::Conversion(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Jobs ready to run, plus the sources that were skipped
#[derive(Debug, Clone)]
pub struct ConversionBatch {
    state: BatchState,
    jobs: Vec<ConversionJob>,
    skipped: Vec<PathBuf>,
}

impl ConversionBatch {
    pub fn new() -> Self {
        Self {
            state: BatchState::Idle,
            jobs: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn jobs(&self) -> &[ConversionJob] {
        &self.jobs
    }

    /// Sources that did not exist when scheduling
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }
}

impl Default for ConversionBatch {
    fn default() -> Self {
        Self::new()
    }
}

/// A job that did not convert
#[derive(Debug, Clone)]
pub struct JobFailure {
    pub job: ConversionJob,
    pub error: String,
}

/// Outcome of running a batch
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub state: BatchState,
    pub scheduled: Vec<ConversionJob>,
    pub skipped: Vec<PathBuf>,
    pub succeeded: Vec<ConversionJob>,
    pub failed: Vec<JobFailure>,
    pub duration: Duration,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.state == BatchState::Completed
    }
}

/// Schedules exported files and converts them in parallel
#[derive(Debug, Clone)]
pub struct ConversionPipeline {
    remapper: PathRemapper,
    converter: Arc<ConverterCommand>,
    workers: usize,
}

impl ConversionPipeline {
    pub fn new(remapper: PathRemapper, converter: ConverterCommand, workers: usize) -> Self {
        Self {
            remapper,
            converter: Arc::new(converter),
            workers: workers.max(1),
        }
    }

    pub fn from_config(config: &TexportConfig) -> Self {
        Self::new(
            PathRemapper::from_config(config),
            ConverterCommand::from_config(&config.converter),
            config.converter.worker_count(),
        )
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Builds jobs for exported files
    ///
    /// Missing sources, and sources whose destination would be the source
    /// itself, are skipped with a warning. Destination directories
    /// are created here.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error when a destination directory cannot be
    /// created
    pub fn schedule<S: AsRef<str>>(
        &self,
        files: &[S],
        color_correct_channels: &[String],
    ) -> Result<ConversionBatch> {
        let mut batch = ConversionBatch::new();

        for file in files {
            let source = PathBuf::from(file.as_ref());
            if !source.exists() {
                tracing::warn!(file = %source.display(), "Exported file not found, skipping conversion");
                batch.skipped.push(source);
                continue;
            }

            let dest = PathBuf::from(self.remapper.destination(file.as_ref()));
            if dest == source {
                tracing::warn!(
                    file = %source.display(),
                    "No export directory or format token in path, skipping conversion"
                );
                batch.skipped.push(source);
                continue;
            }

            if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_directory(parent)?;
            }

            let color_correct = needs_color_correct(&source, color_correct_channels);
            batch
                .jobs
                .push(ConversionJob::new(source, dest, color_correct));
        }

        batch.state = BatchState::Scheduled;
        tracing::debug!(
            scheduled = batch.jobs.len(),
            skipped = batch.skipped.len(),
            "Conversion batch scheduled"
        );
        Ok(batch)
    }

    /// Runs every job of a batch, at most `workers` at a time
    ///
    /// The batch always drains; failures are collected in the report.
    pub async fn run(&self, mut batch: ConversionBatch) -> ConversionReport {
        let start = Instant::now();
        batch.state = BatchState::Running;
        let total = batch.jobs.len();

        tracing::info!(jobs = total, workers = self.workers, "Starting conversion");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut pending: FuturesUnordered<_> = batch
            .jobs
            .iter()
            .cloned()
            .map(|job| {
                let semaphore = Arc::clone(&semaphore);
                let converter = Arc::clone(&self.converter);
                let task_job = job.clone();
                let handle = tokio::spawn(async move {
                    match semaphore.acquire_owned().await {
                        Ok(_permit) => converter.run(&task_job).await,
                        Err(e) => Err(TexportError::Conversion(format!(
                            "Worker pool closed: {e}"
                        ))),
                    }
                });
                async move { (job, handle.await) }
            })
            .collect();

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        while let Some((job, outcome)) = pending.next().await {
            let result = outcome
                .map_err(|e| TexportError::Conversion(format!("Conversion task failed: {e}")))
                .and_then(|result| result);

            match result {
                Ok(()) => {
                    tracing::debug!(file = %job.dest_path.display(), "Converted");
                    succeeded.push(job);
                }
                Err(e) => {
                    tracing::error!(
                        file = %job.source_path.display(),
                        error = %e,
                        "Conversion failed"
                    );
                    failed.push(JobFailure {
                        job,
                        error: e.to_string(),
                    });
                }
            }
            crate::log_batch_progress!(succeeded.len() + failed.len(), total);
        }

        let state = if failed.is_empty() {
            BatchState::Completed
        } else {
            BatchState::PartialFailure
        };

        tracing::info!(
            succeeded = succeeded.len(),
            failed = failed.len(),
            skipped = batch.skipped.len(),
            "Conversion finished"
        );

        ConversionReport {
            state,
            scheduled: batch.jobs,
            skipped: batch.skipped,
            succeeded,
            failed,
            duration: start.elapsed(),
        }
    }

    /// Schedules and runs a batch
    pub async fn convert<S: AsRef<str>>(
        &self,
        files: &[S],
        color_correct_channels: &[String],
    ) -> Result<ConversionReport> {
        let batch = self.schedule(files, color_correct_channels)?;
        Ok(self.run(batch).await)
    }
}

/// True when a converter program can be found on disk or on `PATH`
pub fn converter_available(program: &str) -> bool {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| {
                let path = dir.join(program);
                path.is_file() || path.with_extension("exe").is_file()
            })
        })
        .unwrap_or(false)
}
