// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Error taxonomy for the fitting engine
//!
//! Only genuinely fatal conditions live here. A ray cast that hits nothing
//! returns `None`, and a single mesh instance with a singular world transform
//! is skipped during casting rather than failing the whole query.

use nalgebra::Vector3;
use thiserror::Error;

/// Result type for fitting-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the hosting environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An outline with fewer than 3 points cannot classify anything.
    #[error("outline needs at least 3 points, got {count}")]
    DegenerateOutline {
        /// Number of points supplied.
        count: usize,
    },

    /// A coordinate or measurement was NaN or infinite.
    #[error("non-finite coordinate in input")]
    NonFiniteInput,

    /// A per-vertex attribute column does not match the mesh's vertex count.
    #[error("attribute column length {got} does not match vertex count {expected}")]
    AttributeLength {
        /// Vertex count of the target mesh.
        expected: usize,
        /// Length of the supplied column.
        got: usize,
    },

    /// The source bounding box has a zero or negative extent, so no finite
    /// scale can map it onto the target dimensions.
    #[error("source bounding box has non-positive extent {extent:?}")]
    DegenerateSource {
        /// Component-wise extent of the offending box.
        extent: Vector3<f32>,
    },

    /// One or more requested catalog objects are absent from the library.
    #[error("missing catalog objects: {}", .names.join(", "))]
    MissingAssets {
        /// Every requested name that could not be found.
        names: Vec<String>,
    },

    /// A catalog manifest could not be parsed.
    #[error("invalid catalog manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
