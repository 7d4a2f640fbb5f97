//! Common utilities and shared types for realty-rs.
//!
//! This crate provides foundational components used across all realty-rs crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Pinning client**: Content-addressed image storage via [`PinningClient`]
//!
//! # Example
//!
//! ```no_run
//! use realty_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod pinning;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use pinning::{
    ImageUpload, PinMetadata, PinnedAsset, PinningClient, UploadError, UploadOutcome,
};
