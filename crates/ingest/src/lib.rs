//! Signature scanning layer.
//!
//! This is where files enter the duplicate-detection pipeline. We take a
//! worklist of paths, read and leniently decode each file, run it through
//! the canonical and perceptual stages, and hand back one [`FileSignature`]
//! per included file.
//!
//! ## What we do here
//!
//! - **Read and decode** - Raw bytes, decoded leniently; invalid sequences
//!   never fail a file, they just contribute nothing to its tokens.
//! - **Fingerprint** - Collapse whitespace, tokenize, shingle. The shingle
//!   set plus the token count is the entire signature.
//! - **Skip, don't abort** - A file that vanished or cannot be read is
//!   excluded with a logged reason. One bad file never aborts a scan.
//! - **Fan out** - An explicit worker count selects between a sequential
//!   pass and a fixed-size thread pool. Workers share nothing; the worker
//!   count changes throughput, never the result.
//!
//! ## Main entry point
//!
//! Call [`scan`] with a path list and a [`ScanConfig`], get back the
//! signatures of every readable file meeting the minimum token count.

mod scan;
mod signature;

pub use crate::scan::{scan, ScanConfig, ScanError, DEFAULT_SHINGLE_K};
pub use crate::signature::{compute_signature, FileSignature, SkipReason};
