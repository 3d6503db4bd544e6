// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Geometry module - classification, casting, weighting and fitting

mod bbox;
mod fit;
mod mesh;
mod outline;
mod raycast;
mod weights;

pub use bbox::BoundingBox;
pub use fit::{fit_to_measurements, fit_to_surface_hit, AffineFit, SurfacePlacement};
pub use mesh::{Mesh, Triangle, Vertex};
pub use outline::Outline;
pub use raycast::{cast, cast_parallel, InstanceId, MeshInstance, SurfaceHit};
pub use weights::{compute_weights, Axis, WeightField, WeightPolicy};
