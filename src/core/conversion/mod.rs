//! Conversion of exported files into the delivery format
//!
//! Exported paths are remapped into the convert directory, classified for
//! color correction, and handed to a bounded pool of converter processes.
//!
//! # Example
//!
//! ```rust,no_run
//! use texport::config::load_config;
//! use texport::core::conversion::ConversionPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("texport.toml")?;
//! let pipeline = ConversionPipeline::from_config(&config);
//!
//! let files = ["/proj/TIF/Hero_Body_Color.1001.tif"];
//! let report = pipeline.convert(&files, &["Color".to_string()]).await?;
//! println!("Converted: {}", report.succeeded.len());
//! # Ok(())
//! # }
//! ```

pub mod job;
pub mod pool;

pub use job::{needs_color_correct, ConversionJob, PathRemapper};
pub use pool::{
    converter_available, BatchState, ConversionBatch, ConversionPipeline, ConversionReport,
    ConverterCommand, JobFailure,
};
