// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Shared fixtures for integration tests

use nalgebra::{Point3, Vector3};
use orthofit::{Mesh, Triangle, Vertex};

/// Axis-aligned cube spanning [-1, 1] on every axis, outward winding.
pub fn unit_cube() -> Mesh {
    let mut mesh = Mesh::new();
    for z in [-1.0f32, 1.0] {
        for y in [-1.0f32, 1.0] {
            for x in [-1.0f32, 1.0] {
                let position = Point3::new(x, y, z);
                mesh.add_vertex(Vertex::new(position, position.coords.normalize()));
            }
        }
    }
    let faces: [[usize; 4]; 6] = [
        [0, 2, 3, 1], // z = -1
        [4, 5, 7, 6], // z = +1
        [0, 1, 5, 4], // y = -1
        [2, 6, 7, 3], // y = +1
        [0, 4, 6, 2], // x = -1
        [1, 3, 7, 5], // x = +1
    ];
    for [a, b, c, d] in faces {
        mesh.add_triangle(Triangle::new([a, b, c]));
        mesh.add_triangle(Triangle::new([a, c, d]));
    }
    mesh
}

/// Flat rectangular patch in the z = 0 plane, a stand-in for a small scanned
/// surface region.
pub fn flat_patch(half_extent: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let n = Vector3::new(0.0, 0.0, 1.0);
    mesh.add_vertex(Vertex::new(Point3::new(-half_extent, -half_extent, 0.0), n));
    mesh.add_vertex(Vertex::new(Point3::new(half_extent, -half_extent, 0.0), n));
    mesh.add_vertex(Vertex::new(Point3::new(half_extent, half_extent, 0.0), n));
    mesh.add_vertex(Vertex::new(Point3::new(-half_extent, half_extent, 0.0), n));
    mesh.add_triangle(Triangle::new([0, 1, 2]));
    mesh.add_triangle(Triangle::new([0, 2, 3]));
    mesh
}
