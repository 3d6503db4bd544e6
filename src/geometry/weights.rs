// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Pivot-relative deformation weight fields
//!
//! Given a pivot (usually a ray-cast hit on the scanned limb) and a mesh's
//! vertex positions, produce one influence weight per vertex for the host's
//! deformation rig. The field is total: every vertex receives an explicit
//! weight in [0, 1], so downstream rigging never has to distinguish "unset"
//! from zero.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Coordinate axis naming a policy's hinge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn component(self, v: &Vector3<f32>) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// `v` projected onto the plane perpendicular to this axis.
    pub fn in_plane(self, v: &Vector3<f32>) -> Vector3<f32> {
        let mut planar = *v;
        match self {
            Axis::X => planar.x = 0.0,
            Axis::Y => planar.y = 0.0,
            Axis::Z => planar.z = 0.0,
        }
        planar
    }
}

/// Selectable weighting strategy. Policies are plain data so the host can
/// persist a configured policy alongside its tool settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum WeightPolicy {
    /// Quadratic falloff disk around the pivot, projected onto the plane
    /// perpendicular to the hinge axis.
    ///
    /// Vertices past `rigid_limit` along the hinge axis stay rigid (0);
    /// vertices whose in-plane offset reaches `lateral_limit` are fully
    /// influenced (1); everything in between falls off as
    /// `1 - (d / radius)^2`. A non-positive `radius` collapses the
    /// transition zone to rigid.
    RadialZone {
        hinge_axis: Axis,
        rigid_limit: f32,
        lateral_limit: f32,
        radius: f32,
    },

    /// Linear blend from the pivot into the deformation zone.
    ///
    /// Vertices strictly behind the pivot along the hinge axis move as a
    /// rigid unit with it (1); vertices ahead of it blend linearly from 1 at
    /// the pivot down to 0 at `zone_depth`. A non-positive `zone_depth`
    /// leaves only the rigid side moving.
    LinearZone { hinge_axis: Axis, zone_depth: f32 },
}

/// Total per-vertex weight column, index-aligned with the vertex list it was
/// computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightField {
    weights: Vec<f32>,
}

impl WeightField {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    pub fn values(&self) -> &[f32] {
        &self.weights
    }

    pub fn into_values(self) -> Vec<f32> {
        self.weights
    }
}

/// Compute one weight per vertex for the given pivot and policy.
///
/// Pure over the full vertex set; every output is clamped to [0, 1] before
/// it is returned.
pub fn compute_weights(
    vertices: &[Point3<f32>],
    pivot: &Point3<f32>,
    policy: &WeightPolicy,
) -> WeightField {
    let weights = vertices
        .iter()
        .map(|vertex| {
            let diff = vertex - pivot;
            let raw = match *policy {
                WeightPolicy::RadialZone {
                    hinge_axis,
                    rigid_limit,
                    lateral_limit,
                    radius,
                } => {
                    let along = hinge_axis.component(&diff);
                    let planar_norm = hinge_axis.in_plane(&diff).norm();
                    if along >= rigid_limit {
                        0.0
                    } else if planar_norm >= lateral_limit {
                        1.0
                    } else if radius > 0.0 {
                        1.0 - (planar_norm / radius).powi(2)
                    } else {
                        0.0
                    }
                }
                WeightPolicy::LinearZone {
                    hinge_axis,
                    zone_depth,
                } => {
                    let along = hinge_axis.component(&diff);
                    if along < 0.0 {
                        1.0
                    } else if zone_depth > 0.0 {
                        1.0 - along / zone_depth
                    } else {
                        0.0
                    }
                }
            };
            raw.clamp(0.0, 1.0)
        })
        .collect();
    WeightField { weights }
}
