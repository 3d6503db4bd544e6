// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Fit and placement composition
//!
//! Maps a library asset's bounding box onto measured target dimensions, or
//! snaps an asset onto a ray-cast surface hit. Every result is one composed
//! 4x4 matrix so the host applies it as a single atomic transform write; a
//! sequential scale-then-move would expose half-updated states to anything
//! watching the scene.

use super::BoundingBox;
use crate::error::{Error, Result};
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned scale plus translation, no rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AffineFit {
    pub scale: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl AffineFit {
    /// Compose scale and translation into a single 4x4 matrix.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let mut matrix = Matrix4::new_nonuniform_scaling(&self.scale);
        matrix.m14 = self.translation.x;
        matrix.m24 = self.translation.y;
        matrix.m34 = self.translation.z;
        matrix
    }

    /// Apply the fit to a point in the source asset's local space.
    pub fn apply_point(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.scale.component_mul(&point.coords) + self.translation)
    }
}

/// Rigid placement snapping an asset onto a surface point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfacePlacement {
    pub rotation: UnitQuaternion<f32>,
    pub translation: Vector3<f32>,
}

impl SurfacePlacement {
    /// Compose rotation and translation into a single 4x4 matrix.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
            .to_homogeneous()
    }
}

/// Compute the scale and translation that map `source_bbox` onto
/// `target_dimensions`, landing the scaled local anchor exactly on
/// `anchor_world`.
///
/// Fails with [`Error::DegenerateSource`] when any source extent is zero or
/// negative, and with [`Error::NonFiniteInput`] for NaN/infinite
/// measurements. Never retried internally: the same input cannot succeed.
pub fn fit_to_measurements(
    source_bbox: &BoundingBox,
    target_dimensions: &Vector3<f32>,
    anchor_world: &Point3<f32>,
    anchor_local_offset: &Vector3<f32>,
) -> Result<AffineFit> {
    let extent = source_bbox.size();
    if source_bbox.is_degenerate() {
        return Err(Error::DegenerateSource { extent });
    }
    let finite = target_dimensions.iter().all(|c| c.is_finite())
        && anchor_world.iter().all(|c| c.is_finite())
        && anchor_local_offset.iter().all(|c| c.is_finite());
    if !finite {
        return Err(Error::NonFiniteInput);
    }

    let scale = target_dimensions.component_div(&extent);
    let translation = anchor_world.coords - scale.component_mul(anchor_local_offset);
    Ok(AffineFit { scale, translation })
}

/// Compose a placement that puts an asset's local origin at `point_world`
/// with its local +Z taken onto the surface normal.
///
/// The rotation is the minimal one between +Z and the normal; when the two
/// are exactly opposite it falls back to a half turn about +X, the fixed
/// secondary reference axis. Twist about the normal is left free by this
/// convention.
pub fn fit_to_surface_hit(
    point_world: &Point3<f32>,
    normal_world: &Vector3<f32>,
) -> SurfacePlacement {
    let normal = if normal_world.norm_squared() > 0.0 {
        normal_world.normalize()
    } else {
        Vector3::z()
    };
    let rotation = UnitQuaternion::rotation_between(&Vector3::z(), &normal).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI)
    });

    SurfacePlacement {
        rotation,
        translation: point_world.coords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_to_measurements() {
        let bbox = BoundingBox::new(Point3::origin(), Point3::new(2.0, 2.0, 1.0));
        let fit = fit_to_measurements(
            &bbox,
            &Vector3::new(4.0, 4.0, 1.0),
            &Point3::origin(),
            &Vector3::new(1.0, 1.0, 0.5),
        )
        .unwrap();

        assert_eq!(fit.scale, Vector3::new(2.0, 2.0, 1.0));
        assert_eq!(fit.translation, Vector3::new(-2.0, -2.0, -0.5));
    }

    #[test]
    fn test_anchor_round_trip() {
        let bbox = BoundingBox::new(Point3::new(-3.0, 1.0, 0.0), Point3::new(5.0, 4.0, 2.5));
        let anchor_world = Point3::new(10.0, -7.0, 3.0);
        let anchor_local = Vector3::new(1.0, 2.5, 2.0);

        let fit = fit_to_measurements(
            &bbox,
            &Vector3::new(16.0, 6.0, 5.0),
            &anchor_world,
            &anchor_local,
        )
        .unwrap();

        let mapped = fit.to_matrix().transform_point(&Point3::from(anchor_local));
        assert_relative_eq!(mapped.x, anchor_world.x, epsilon = 1e-4);
        assert_relative_eq!(mapped.y, anchor_world.y, epsilon = 1e-4);
        assert_relative_eq!(mapped.z, anchor_world.z, epsilon = 1e-4);

        // apply_point must agree with the composed matrix.
        let direct = fit.apply_point(&Point3::from(anchor_local));
        assert_relative_eq!((mapped - direct).norm(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_source_rejected() {
        let flat = BoundingBox::new(Point3::origin(), Point3::new(2.0, 0.0, 1.0));
        let result = fit_to_measurements(
            &flat,
            &Vector3::new(1.0, 1.0, 1.0),
            &Point3::origin(),
            &Vector3::zeros(),
        );
        assert!(matches!(result, Err(Error::DegenerateSource { .. })));

        let empty = BoundingBox::empty();
        let result = fit_to_measurements(
            &empty,
            &Vector3::new(1.0, 1.0, 1.0),
            &Point3::origin(),
            &Vector3::zeros(),
        );
        assert!(matches!(result, Err(Error::DegenerateSource { .. })));
    }

    #[test]
    fn test_non_finite_measurement_rejected() {
        let bbox = BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let result = fit_to_measurements(
            &bbox,
            &Vector3::new(f32::NAN, 1.0, 1.0),
            &Point3::origin(),
            &Vector3::zeros(),
        );
        assert!(matches!(result, Err(Error::NonFiniteInput)));
    }

    #[test]
    fn test_surface_snap_aligns_z_to_normal() {
        let placement = fit_to_surface_hit(
            &Point3::new(1.0, 2.0, 3.0),
            &Vector3::new(0.0, 3.0, 0.0),
        );
        let aligned = placement.rotation * Vector3::z();
        assert_relative_eq!((aligned - Vector3::y()).norm(), 0.0, epsilon = 1e-5);
        assert_eq!(placement.translation, Vector3::new(1.0, 2.0, 3.0));

        // Matrix maps the local origin onto the hit point.
        let origin = placement.to_matrix().transform_point(&Point3::origin());
        assert_relative_eq!((origin - Point3::new(1.0, 2.0, 3.0)).norm(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_surface_snap_antiparallel_normal() {
        let placement = fit_to_surface_hit(&Point3::origin(), &Vector3::new(0.0, 0.0, -1.0));
        let aligned = placement.rotation * Vector3::z();
        assert_relative_eq!((aligned - Vector3::new(0.0, 0.0, -1.0)).norm(), 0.0, epsilon = 1e-5);
    }
}
