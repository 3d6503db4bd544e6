// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Mesh representation and per-vertex attributes
//!
//! The engine never edits topology. It reads vertex positions and writes the
//! two derived attribute columns: the boolean selection mask produced by
//! outline classification and the deformation weight column.

use super::{BoundingBox, WeightField};
use crate::error::{Error, Result};
use nalgebra::{Matrix4, Point3, Vector3};
use parry3d::shape::TriMesh;
use serde::{Deserialize, Serialize};

/// Vertex with position and normal, both in mesh-local space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }

    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        self.position = matrix.transform_point(&self.position);
        // Transform normal (use inverse transpose for normals)
        let normal_matrix = matrix
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or(*matrix);
        self.normal = normal_matrix.transform_vector(&self.normal).normalize();
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Indexed triangular mesh in mesh-local space, with optional per-vertex
/// selection and weight columns. Attribute columns are empty until first
/// written and always match the vertex count afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    selection: Vec<bool>,
    weights: Vec<f32>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            selection: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            selection: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Vertex positions in index order.
    pub fn positions(&self) -> Vec<Point3<f32>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Store an outline-derived selection mask, one flag per vertex.
    pub fn apply_selection(&mut self, mask: &[bool]) -> Result<()> {
        if mask.len() != self.vertices.len() {
            return Err(Error::AttributeLength {
                expected: self.vertices.len(),
                got: mask.len(),
            });
        }
        self.selection = mask.to_vec();
        Ok(())
    }

    /// Store a deformation weight column, one weight per vertex.
    pub fn apply_weights(&mut self, field: &WeightField) -> Result<()> {
        if field.len() != self.vertices.len() {
            return Err(Error::AttributeLength {
                expected: self.vertices.len(),
                got: field.len(),
            });
        }
        self.weights = field.values().to_vec();
        Ok(())
    }

    /// Current selection mask; empty if never applied.
    pub fn selection(&self) -> &[bool] {
        &self.selection
    }

    /// Current weight column; empty if never applied.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Convert to a parry3d `TriMesh` for ray queries. `None` when the mesh
    /// has no triangles (parry rejects shapeless meshes).
    pub fn to_trimesh(&self) -> Option<TriMesh> {
        if self.triangles.is_empty() {
            return None;
        }
        let vertices: Vec<Point3<f32>> = self.positions();
        let indices: Vec<[u32; 3]> = self
            .triangles
            .iter()
            .map(|t| {
                [
                    t.indices[0] as u32,
                    t.indices[1] as u32,
                    t.indices[2] as u32,
                ]
            })
            .collect();
        Some(TriMesh::new(vertices, indices))
    }
}
