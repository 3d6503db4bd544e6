// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Orthofit Fitting Engine
//!
//! Geometric core for procedurally fitting orthopaedic device meshes (foot
//! splints, prosthesis cosmetics, protective pads, toe boxes) onto a
//! 3D-scanned body part. Four pure computations:
//!
//! - outline classification: turn a sketched screen-space outline into a
//!   per-vertex selection mask ([`Outline`]);
//! - scene ray casting: closest hit across world-transformed mesh instances
//!   ([`cast`], [`cast_parallel`]);
//! - weight fields: smooth per-vertex influence around a deformation pivot
//!   ([`compute_weights`]);
//! - fit composition: affine scale/translate onto measured dimensions, or
//!   surface-snap placement from a hit ([`fit_to_measurements`],
//!   [`fit_to_surface_hit`]).
//!
//! The hosting 3D environment owns all scene data and session state; every
//! entry point here is a pure function of its inputs and returns derived
//! results for the host to apply back. The only stateful piece is the
//! explicit [`placement::PlacementFlow`] state machine driving interactive
//! surface-snap placement, one event at a time.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod placement;

pub use catalog::{Asset, AssetLibrary, CatalogManifest, GeneratedKind, GeneratedTag};
pub use error::{Error, Result};
pub use geometry::{
    cast, cast_parallel, compute_weights, fit_to_measurements, fit_to_surface_hit, AffineFit,
    Axis, BoundingBox, InstanceId, Mesh, MeshInstance, Outline, SurfaceHit, SurfacePlacement,
    Triangle, Vertex, WeightField, WeightPolicy,
};
pub use placement::{EventDisposition, PlacementEvent, PlacementFlow, PlacementState};
