//! Angleshot: one photo, many camera angles
//!
//! Picks camera-angle descriptors from a fixed catalog and, for each, asks a generative
//! model for a scene prompt and then for a re-rendered image of the source photo. All
//! pipelines of a run execute concurrently; results come back in selection order or the
//! run fails as a whole.

pub mod angle;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod source;
