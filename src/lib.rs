//! casepack - Joins case study data sources into encrypted artifacts
//!
//! This library implements the batch pipeline behind the static case study
//! viewer. It joins the ranked mechanisms table with the raw posts table,
//! the view time series, and the exploration analytics into self-contained
//! per-case documents, then encrypts them under a password into an envelope
//! the deployed browser decryptor can open.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and cipher parameter persistence
//! - `error`: Custom error types
//! - `models`: Source rows and assembled case documents
//! - `storage`: CSV/JSON loading and atomic artifact writes
//! - `services`: Relevance filtering, case assembly, and the run pipeline
//! - `canonical`: Deterministic JSON normalization before encryption
//! - `crypto`: PBKDF2 key derivation and AES-CBC envelopes
//!
//! # Example
//!
//! ```rust,ignore
//! use casepack::config::DataPaths;
//! use casepack::crypto::SecureString;
//! use casepack::services::{run_conversion, ConvertOptions};
//!
//! let paths = DataPaths::new("data", "site/public/data");
//! let password = SecureString::new("hunter2");
//! let summary = run_conversion(&paths, &password, &ConvertOptions::default())?;
//! println!("encrypted {} cases", summary.case_count);
//! ```

pub mod canonical;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::CasepackError;
