// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Orthofit Team

//! Modal surface-snap placement flow
//!
//! The interactive flow the host drives while the user slides an asset over
//! the scan: one serialized input event at a time, a synchronous cast and
//! preview per pointer move, and two terminal states. The flow holds no
//! host-visible state of its own, so cancelling needs no rollback here; any
//! preview the host already drew is the host's to discard.

use crate::geometry::{
    cast, fit_to_surface_hit, InstanceId, MeshInstance, SurfaceHit, SurfacePlacement,
};
use ahash::AHashSet;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// One input event, as serialized by the host's event loop.
#[derive(Debug, Clone, Copy)]
pub enum PlacementEvent {
    /// Pointer moved; the host has already converted the screen position to
    /// a world-space ray.
    PointerMove {
        origin: Point3<f32>,
        direction: Vector3<f32>,
    },
    /// Confirming click.
    Confirm,
    /// Cancel key or secondary button.
    Cancel,
    /// Viewport navigation (orbit, pan, zoom); never touches the core.
    Navigate,
}

/// Flow state. `Committed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy)]
pub enum PlacementState {
    AwaitingInput,
    Previewing {
        hit: SurfaceHit,
        placement: SurfacePlacement,
    },
    Committed {
        placement: SurfacePlacement,
    },
    Cancelled,
}

/// Whether the flow consumed an event or the host should handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Consumed,
    PassThrough,
}

/// Single-event-at-a-time placement state machine. `handle` never blocks,
/// never spawns work, and is strictly sequential through `&mut self`; there
/// is no timeout, the flow waits for input indefinitely.
#[derive(Debug)]
pub struct PlacementFlow<'a> {
    instances: &'a [MeshInstance<'a>],
    exclude: AHashSet<InstanceId>,
    state: PlacementState,
}

impl<'a> PlacementFlow<'a> {
    /// Start a flow over the current scene snapshot. `exclude` names the
    /// instances the cast must ignore, typically the asset being placed.
    pub fn new(instances: &'a [MeshInstance<'a>], exclude: AHashSet<InstanceId>) -> Self {
        Self {
            instances,
            exclude,
            state: PlacementState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            PlacementState::Committed { .. } | PlacementState::Cancelled
        )
    }

    /// Feed one event through the transition function.
    ///
    /// Navigation events and anything arriving after a terminal state pass
    /// through to the host. A pointer move that hits nothing keeps the
    /// current preview; hunting over empty space is a silent outcome, not an
    /// error.
    pub fn handle(&mut self, event: PlacementEvent) -> EventDisposition {
        if self.is_terminal() {
            return EventDisposition::PassThrough;
        }
        match event {
            PlacementEvent::Navigate => EventDisposition::PassThrough,
            PlacementEvent::PointerMove { origin, direction } => {
                if let Some(hit) = cast(origin, direction, self.instances, &self.exclude) {
                    if let Some(placement) = self.compose_placement(&hit) {
                        self.state = PlacementState::Previewing { hit, placement };
                    }
                } else {
                    debug!("pointer ray missed the scene");
                }
                EventDisposition::Consumed
            }
            PlacementEvent::Confirm => {
                if let PlacementState::Previewing { placement, .. } = self.state {
                    self.state = PlacementState::Committed { placement };
                }
                // A confirm with nothing previewed has nothing to commit.
                EventDisposition::Consumed
            }
            PlacementEvent::Cancel => {
                self.state = PlacementState::Cancelled;
                EventDisposition::Consumed
            }
        }
    }

    /// Lift the local-space hit into world space and compose the snap
    /// placement. Normals transform by the inverse transpose.
    fn compose_placement(&self, hit: &SurfaceHit) -> Option<SurfacePlacement> {
        let instance = self.instances.iter().find(|i| i.id == hit.instance)?;
        let world_point = instance.world_from_local.transform_point(&hit.point);
        let normal_matrix = instance
            .world_from_local
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or(instance.world_from_local);
        let world_normal = normal_matrix.transform_vector(&hit.normal);
        Some(fit_to_surface_hit(&world_point, &world_normal))
    }
}
