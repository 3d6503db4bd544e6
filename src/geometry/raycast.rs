// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Closest-hit ray casting across transformed mesh instances
//!
//! The low-level ray/triangle work is delegated to parry3d; this module owns
//! the selection policy across multiple candidate instances. Hit point and
//! normal stay in the winning instance's local object space, never
//! pre-multiplied into world space; the host transforms them as needed.

use super::Mesh;
use ahash::AHashSet;
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::FeatureId;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::warn;

/// Identifier the scene collaborator assigns to each renderable instance.
pub type InstanceId = u64;

/// A mesh paired with its world placement, as seen at cast time. Multiple
/// instances may borrow the same mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshInstance<'a> {
    pub id: InstanceId,
    pub mesh: &'a Mesh,
    pub world_from_local: Matrix4<f32>,
}

/// Closest-hit record. `point` and `normal` are expressed in the hit
/// instance's local object space.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub instance: InstanceId,
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
    pub face_index: u32,
    /// Squared distance from the instance's local ray origin to the hit,
    /// measured in that instance's local space.
    pub distance_sq: f32,
}

fn cast_instance(
    origin_world: Point3<f32>,
    direction_world: Vector3<f32>,
    instance: &MeshInstance<'_>,
) -> Option<SurfaceHit> {
    let Some(local_from_world) = instance.world_from_local.try_inverse() else {
        // Recoverable: one bad instance must not block the rest of the scene.
        warn!(
            instance = instance.id,
            "skipping instance with non-invertible world transform"
        );
        return None;
    };

    let shape = instance.mesh.to_trimesh()?;
    let local_origin = local_from_world.transform_point(&origin_world);
    let local_direction = local_from_world.transform_vector(&direction_world);
    let ray = Ray::new(local_origin, local_direction);

    let hit = shape.cast_ray_and_get_normal(&Isometry3::identity(), &ray, f32::MAX, true)?;
    let face_index = match hit.feature {
        FeatureId::Face(index) => index,
        _ => return None,
    };
    let point = ray.point_at(hit.time_of_impact);

    Some(SurfaceHit {
        instance: instance.id,
        point,
        normal: hit.normal,
        face_index,
        distance_sq: (point - local_origin).norm_squared(),
    })
}

/// Cast a world-space ray through `instances` and return the closest hit, or
/// `None` if nothing intersects (a normal outcome, not an error).
///
/// Each candidate's hit distance is measured in its own local space, so under
/// non-uniform instance scale the comparison is not a world-space metric.
/// Ties keep the instance that appears earlier in the slice; iteration order
/// is the slice order and therefore stable.
pub fn cast(
    origin_world: Point3<f32>,
    direction_world: Vector3<f32>,
    instances: &[MeshInstance<'_>],
    exclude: &AHashSet<InstanceId>,
) -> Option<SurfaceHit> {
    let mut best: Option<SurfaceHit> = None;
    for instance in instances {
        if exclude.contains(&instance.id) {
            continue;
        }
        if let Some(hit) = cast_instance(origin_world, direction_world, instance) {
            // Strict comparison keeps the earlier instance on ties.
            if best
                .as_ref()
                .map_or(true, |b| hit.distance_sq < b.distance_sq)
            {
                best = Some(hit);
            }
        }
    }
    best
}

/// Parallel variant of [`cast`] for large scenes. The reduction orders by
/// (distance, slice index), so the result is identical to the sequential
/// cast, including tie-breaks.
pub fn cast_parallel(
    origin_world: Point3<f32>,
    direction_world: Vector3<f32>,
    instances: &[MeshInstance<'_>],
    exclude: &AHashSet<InstanceId>,
) -> Option<SurfaceHit> {
    instances
        .par_iter()
        .enumerate()
        .filter(|(_, instance)| !exclude.contains(&instance.id))
        .filter_map(|(index, instance)| {
            cast_instance(origin_world, direction_world, instance).map(|hit| (index, hit))
        })
        .min_by(|(index_a, a), (index_b, b)| {
            a.distance_sq
                .partial_cmp(&b.distance_sq)
                .unwrap_or(Ordering::Equal)
                .then(index_a.cmp(index_b))
        })
        .map(|(_, hit)| hit)
}
