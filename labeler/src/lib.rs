//! Brother QL-700 product label printer.
//!
//! Reads product names from a CSV catalog, renders name+QR label
//! images, and streams them to the printer as single labels, grid
//! labels, or resumable batches. An optional local web UI handles
//! upload and preview.

pub mod app;
pub mod batch;
pub mod catalog;
pub mod checkpoint;
pub mod config;
pub mod printjob;
pub mod prompt;
pub mod server;
pub mod services;
