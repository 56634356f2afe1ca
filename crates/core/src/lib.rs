//! `sortiment-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! spreadsheet cell values, the normalized article identifier and the shared
//! error model.

pub mod cell;
pub mod entity;
pub mod error;
pub mod id;

pub use cell::CellValue;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ArticleId, normalize};
