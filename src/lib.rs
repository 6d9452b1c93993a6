pub mod cli;
pub mod configuration;
pub mod domain;
pub mod downloader;
pub mod error;
pub mod provider;
pub mod telemetry;
pub mod youtube;
