//! Export coordinator - main orchestrator for the export process
//!
//! This module coordinates the export workflow: it checks the open project,
//! builds one export spec per texture set, hands it to the host, and converts
//! the files the host wrote.

use crate::adapters::host::{ExportResult, ExportStatus, HostService, TextureSetInfo};
use crate::config::TexportConfig;
use crate::core::builder::{ExportOptions, ExportSpecBuilder, MeshMapMode};
use crate::core::conversion::{ConversionPipeline, ConversionReport};
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary, TexturePreview};
use crate::core::naming::{NamingPolicy, ProjectStatus};
use crate::domain::ids::TextureSetName;
use crate::domain::spec::ExportSpec;
use crate::domain::{HostError, Result, TexportError};
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    config: TexportConfig,
    host: Arc<dyn HostService>,
    pipeline: ConversionPipeline,
}

/// What happened to one texture set's host export
enum HostOutcome {
    /// Files written; conversion may run
    Exported(ExportResult),
    /// Nothing usable was written
    Stopped,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(config: TexportConfig, host: Arc<dyn HostService>) -> Self {
        let pipeline = ConversionPipeline::from_config(&config);
        Self {
            config,
            host,
            pipeline,
        }
    }

    /// Replace the conversion pipeline
    pub fn with_pipeline(mut self, pipeline: ConversionPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &TexportConfig {
        &self.config
    }

    /// Status of the project the host has open
    pub async fn project_status(&self) -> Result<ProjectStatus> {
        let naming = NamingPolicy::from_config(&self.config)?;
        let info = self.host.project_info().await?;
        Ok(naming.project_status(info.file_path.as_deref()))
    }

    /// Checks the open project and creates a spec builder for it
    ///
    /// # Errors
    ///
    /// Fails when no project is open or its file name does not match the
    /// naming rule
    pub async fn open_project(&self) -> Result<ExportSpecBuilder> {
        let naming = NamingPolicy::from_config(&self.config)?;
        let info = self.host.project_info().await?;
        let Some(project_file) = info.file_path else {
            return Err(HostError::ProjectNotOpened.into());
        };

        match naming.project_status(Some(&project_file)) {
            ProjectStatus::Ready { title } => {
                let directories = naming.directories(&project_file);
                tracing::debug!(
                    title = %title,
                    export = %directories.export,
                    "Project ready"
                );
                ExportSpecBuilder::new(&self.config, title, directories)
            }
            ProjectStatus::NameIsNotCorrect => Err(TexportError::Validation(format!(
                "The project name is incorrect: {project_file}"
            ))),
            ProjectStatus::ProjectNotOpened => Err(HostError::ProjectNotOpened.into()),
        }
    }

    /// Texture sets to process, in host order
    ///
    /// An empty selection means every texture set.
    pub async fn select_texture_sets(&self, selection: &[String]) -> Result<Vec<TextureSetInfo>> {
        let available = self.host.texture_sets().await?;
        if selection.is_empty() {
            return Ok(available);
        }

        if let Some(unknown) = selection
            .iter()
            .find(|name| !available.iter().any(|set| &set.name == *name))
        {
            return Err(HostError::TextureSetNotFound(unknown.clone()).into());
        }

        Ok(available
            .into_iter()
            .filter(|set| selection.contains(&set.name))
            .collect())
    }

    /// Execute the channel export
    ///
    /// Each texture set is exported with its own spec, one host call at a
    /// time. Per-set failures are collected in the summary; configuration
    /// errors abort the run.
    pub async fn execute_export(
        &self,
        selection: &[String],
        options: &ExportOptions,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(run_id = %summary.run_id, "Starting export process");

        let builder = self.open_project().await?;
        let texture_sets = self.select_texture_sets(selection).await?;
        summary.total_texture_sets = texture_sets.len();

        for info in &texture_sets {
            let texture_set = texture_set_name(&info.name)?;
            crate::log_export_start!(&texture_set, &builder.directories().export);

            let native_channels = match self.host.channels(&texture_set).await {
                Ok(channels) => channels,
                Err(e) => {
                    record_error(&mut summary, ExportErrorType::Host, &texture_set, &e);
                    continue;
                }
            };

            let prepared = builder.prepare(&texture_set, &native_channels, options)?;
            if prepared.is_empty() {
                tracing::warn!(texture_set = %texture_set, "No exportable channels, skipping");
                summary.skipped_texture_sets += 1;
                continue;
            }

            if let Err(e) = builder.ensure_export_directories(options.convert_after) {
                record_error(&mut summary, ExportErrorType::Filesystem, &texture_set, &e);
                continue;
            }

            let outcome = self
                .run_host_export(&texture_set, &prepared.spec, &mut summary)
                .await;
            let result = match outcome {
                HostOutcome::Exported(result) => result,
                HostOutcome::Stopped => continue,
            };

            let files = result.files();
            summary.exported_texture_sets += 1;
            summary.exported_files += files.len();

            if options.convert_after {
                match self
                    .pipeline
                    .convert(&files, &prepared.color_correct_channels)
                    .await
                {
                    Ok(report) => summary.add_conversion(&report),
                    Err(e) => {
                        record_error(&mut summary, ExportErrorType::Filesystem, &texture_set, &e)
                    }
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Export mesh maps of the selected texture sets
    pub async fn export_meshmaps(
        &self,
        selection: &[String],
        mode: MeshMapMode,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(run_id = %summary.run_id, mode = ?mode, "Starting mesh-map export");

        let builder = self.open_project().await?;
        let texture_sets = self.select_texture_sets(selection).await?;
        summary.total_texture_sets = texture_sets.len();

        for info in &texture_sets {
            let texture_set = texture_set_name(&info.name)?;
            crate::log_export_start!(&texture_set, &builder.directories().meshmap);

            let spec = builder.build_meshmap_spec(&texture_set, mode)?;
            if let Err(e) = builder.ensure_meshmap_directory() {
                record_error(&mut summary, ExportErrorType::Filesystem, &texture_set, &e);
                continue;
            }

            if let HostOutcome::Exported(result) =
                self.run_host_export(&texture_set, &spec, &mut summary).await
            {
                summary.exported_texture_sets += 1;
                summary.exported_files += result.files().len();
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// List the files an export would produce, without writing anything
    pub async fn preview(
        &self,
        selection: &[String],
        options: &ExportOptions,
    ) -> Result<Vec<TexturePreview>> {
        let builder = self.open_project().await?;
        let texture_sets = self.select_texture_sets(selection).await?;
        let mut previews = Vec::with_capacity(texture_sets.len());

        for info in &texture_sets {
            let texture_set = texture_set_name(&info.name)?;
            let native_channels = self.host.channels(&texture_set).await?;
            let prepared = builder.prepare(&texture_set, &native_channels, options)?;

            let files = if prepared.is_empty() {
                Vec::new()
            } else {
                self.host.dry_run(&prepared.spec).await?.files()
            };

            if files.is_empty() {
                tracing::info!("Texture Set - {} : Nothing", texture_set);
            } else {
                tracing::info!("Texture Set - {} : {}", texture_set, files.join(", "));
            }

            previews.push(TexturePreview {
                name_preview: builder.naming().texture_name_preview(
                    builder.title(),
                    &texture_set,
                    info.label.as_deref(),
                ),
                texture_set: info.name.clone(),
                files,
            });
        }

        Ok(previews)
    }

    /// Convert already exported files
    pub async fn convert_files(
        &self,
        files: &[String],
        color_correct_channels: &[String],
    ) -> Result<ConversionReport> {
        self.pipeline.convert(files, color_correct_channels).await
    }

    /// Runs one host export and surfaces its status
    async fn run_host_export(
        &self,
        texture_set: &TextureSetName,
        spec: &ExportSpec,
        summary: &mut ExportSummary,
    ) -> HostOutcome {
        let result = match self.host.execute(spec).await {
            Ok(result) => result,
            Err(e) => {
                record_error(summary, ExportErrorType::Host, texture_set, &e);
                return HostOutcome::Stopped;
            }
        };

        match result.status {
            ExportStatus::Success => {
                tracing::info!(
                    texture_set = %texture_set,
                    files = result.files().len(),
                    "Export succeeded"
                );
            }
            ExportStatus::Warning => {
                tracing::warn!(
                    texture_set = %texture_set,
                    message = %result.message,
                    "Export finished with warnings"
                );
            }
            ExportStatus::Error => {
                tracing::error!(
                    texture_set = %texture_set,
                    message = %result.message,
                    "Export failed"
                );
                summary.add_error(
                    ExportError::new(ExportErrorType::Host, result.message.clone())
                        .with_context(format!("texture_set={texture_set}")),
                );
            }
            ExportStatus::Cancelled => {
                tracing::info!(texture_set = %texture_set, "Export cancelled");
                summary.cancelled_texture_sets += 1;
            }
        }

        if result.status.allows_conversion() {
            HostOutcome::Exported(result)
        } else {
            HostOutcome::Stopped
        }
    }
}

fn texture_set_name(name: &str) -> Result<TextureSetName> {
    TextureSetName::new(name).map_err(TexportError::Validation)
}

fn record_error(
    summary: &mut ExportSummary,
    error_type: ExportErrorType,
    texture_set: &TextureSetName,
    error: &TexportError,
) {
    let context = format!("texture_set={texture_set}");
    crate::log_error_with_context!(error, context.as_str());
    summary.add_error(ExportError::new(error_type, error.to_string()).with_context(context));
}
