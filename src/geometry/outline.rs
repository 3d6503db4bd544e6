// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Sketched outlines and even-odd point classification

use crate::error::{Error, Result};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A closed 2D outline, e.g. sketched by the user over the viewport to mark
/// a mesh region. The outline is implicitly closed: the last point connects
/// back to the first. Self-intersecting outlines are neither assumed nor
/// rejected; membership then follows the even-odd rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outline {
    points: Vec<Point2<f32>>,
}

impl Outline {
    /// Build an outline from an ordered point list.
    ///
    /// Fails with [`Error::DegenerateOutline`] for fewer than 3 points and
    /// with [`Error::NonFiniteInput`] for NaN/infinite coordinates, before
    /// any classification can run against it.
    pub fn new(points: Vec<Point2<f32>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::DegenerateOutline {
                count: points.len(),
            });
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::NonFiniteInput);
        }
        Ok(Self { points })
    }

    /// The outline's points in order, without the implicit closing point.
    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    /// Even-odd membership test: casts a horizontal ray from `point` in +X
    /// and toggles on every edge crossing, including the implicit closing
    /// edge.
    ///
    /// Points exactly on a vertex or edge have implementation-defined
    /// membership; that ambiguity is inherent to the ray-casting method and
    /// is not special-cased.
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        let mut inside = false;
        let n = self.points.len();
        for i in 0..n {
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % n];

            // Horizontal edges never change the crossing parity, and
            // filtering them out keeps the interpolation below division-safe.
            if p1.y == p2.y {
                continue;
            }

            let (y_min, y_max) = if p1.y < p2.y {
                (p1.y, p2.y)
            } else {
                (p2.y, p1.y)
            };
            // The ray cannot reach this edge.
            if point.y < y_min || point.y > y_max || point.x >= p1.x.max(p2.x) {
                continue;
            }

            let x_cross = p1.x + (p2.x - p1.x) * (point.y - p1.y) / (p2.y - p1.y);
            if point.x <= x_cross {
                inside = !inside;
            }
        }
        inside
    }

    /// Classify a batch of projected vertex positions into a selection mask,
    /// one entry per input point. The host projects mesh vertices to screen
    /// space and applies the mask back with [`crate::Mesh::apply_selection`].
    pub fn select(&self, projected: &[Point2<f32>]) -> Vec<bool> {
        projected.iter().map(|p| self.contains(p)).collect()
    }
}
