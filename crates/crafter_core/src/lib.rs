//! Core data types for the Crafter avatar generation library.
//!
//! This crate provides the foundation data types shared by the transform
//! client, the history store, and the batch orchestrator.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod art;
mod ids;
mod image;
mod params;
mod status;

pub use art::GeneratedArt;
pub use ids::{BatchId, TaskId};
pub use image::ImageData;
pub use params::{
    Accessory, AvatarStyle, Background, Clothing, GenerationParams, GenerationParamsBuilder,
};
pub use status::TaskStatus;
