// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Asset catalog lookup
//!
//! Device assets (splint shells, toe boxes, cosmetics, pads) ship in named
//! catalogs. The host loads the actual 3D data; this module owns the lookup
//! contract: a fetch either returns every requested object or fails with the
//! complete list of missing names, so a half-loaded tool never appears in
//! the scene.

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use ahash::AHashMap;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Index of a shipped catalog: its name plus the object names it is
/// expected to provide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub name: String,
    pub objects: Vec<String>,
}

impl CatalogManifest {
    /// Parse a manifest from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What produced an auto-generated scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedKind {
    WeightField,
    Armature,
    Asset,
}

/// Ownership record the host attaches to objects this tooling generates,
/// replacing ad hoc string markers on scene objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTag {
    pub kind: GeneratedKind,
    /// Name of the operation that created the object.
    pub generator: String,
}

/// A catalog object: mesh data plus its authored placement.
#[derive(Debug, Clone)]
pub struct Asset {
    pub mesh: Mesh,
    pub world_from_local: Matrix4<f32>,
    pub tag: Option<GeneratedTag>,
}

/// In-memory view of one loaded catalog, keyed by object name.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    name: String,
    entries: AHashMap<String, Asset>,
}

impl AssetLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: AHashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, name: impl Into<String>, asset: Asset) {
        self.entries.insert(name.into(), asset);
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch the named objects in request order. All-or-nothing: if any name
    /// is absent the call fails with [`Error::MissingAssets`] listing every
    /// missing name at once.
    pub fn fetch(&self, names: &[&str]) -> Result<Vec<&Asset>> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.entries.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingAssets { names: missing });
        }
        Ok(names.iter().filter_map(|name| self.entries.get(*name)).collect())
    }
}
