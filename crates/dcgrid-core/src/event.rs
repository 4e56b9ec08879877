//! Layout events emitted by the designer.
//!
//! Events accumulate in an [`EventLog`] until the caller drains them. Kinds
//! can be suppressed, in which case they are never recorded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::{GridPosition, Rotation};
use crate::id::InstanceId;
use crate::placement::PlacementError;

/// Something that happened to the layout. Each event carries the layout
/// revision current after it was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    ItemPlaced {
        id: InstanceId,
        at: GridPosition,
        revision: u64,
    },
    ItemMoved {
        id: InstanceId,
        from: GridPosition,
        to: GridPosition,
        revision: u64,
    },
    ItemRemoved {
        id: InstanceId,
        revision: u64,
    },
    ItemRotated {
        id: InstanceId,
        rotation: Rotation,
        revision: u64,
    },
    PlacementRejected {
        id: Option<InstanceId>,
        reason: PlacementError,
        revision: u64,
    },
    /// A recompute changed the derived status of this item.
    StatusChanged {
        id: InstanceId,
        revision: u64,
    },
}

/// Discriminant tag for layout events, used for suppression and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutEventKind {
    ItemPlaced,
    ItemMoved,
    ItemRemoved,
    ItemRotated,
    PlacementRejected,
    StatusChanged,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::ItemPlaced { .. } => LayoutEventKind::ItemPlaced,
            LayoutEvent::ItemMoved { .. } => LayoutEventKind::ItemMoved,
            LayoutEvent::ItemRemoved { .. } => LayoutEventKind::ItemRemoved,
            LayoutEvent::ItemRotated { .. } => LayoutEventKind::ItemRotated,
            LayoutEvent::PlacementRejected { .. } => LayoutEventKind::PlacementRejected,
            LayoutEvent::StatusChanged { .. } => LayoutEventKind::StatusChanged,
        }
    }

    pub fn revision(&self) -> u64 {
        match self {
            LayoutEvent::ItemPlaced { revision, .. }
            | LayoutEvent::ItemMoved { revision, .. }
            | LayoutEvent::ItemRemoved { revision, .. }
            | LayoutEvent::ItemRotated { revision, .. }
            | LayoutEvent::PlacementRejected { revision, .. }
            | LayoutEvent::StatusChanged { revision, .. } => *revision,
        }
    }
}

/// Pending events awaiting delivery.
#[derive(Debug, Default)]
pub struct EventLog {
    pending: Vec<LayoutEvent>,
    suppressed: HashSet<LayoutEventKind>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event unless its kind is suppressed.
    pub fn push(&mut self, event: LayoutEvent) {
        if !self.suppressed.contains(&event.kind()) {
            self.pending.push(event);
        }
    }

    /// Stop recording `kind`. Already-recorded events are kept.
    pub fn suppress(&mut self, kind: LayoutEventKind) {
        self.suppressed.insert(kind);
    }

    pub fn is_suppressed(&self, kind: LayoutEventKind) -> bool {
        self.suppressed.contains(&kind)
    }

    /// Take all pending events in emission order.
    pub fn drain(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ModuleId;

    fn wire_id() -> InstanceId {
        InstanceId::new(ModuleId::from("power-wire"), 1)
    }

    #[test]
    fn drain_returns_in_order_and_empties() {
        let mut log = EventLog::new();
        log.push(LayoutEvent::ItemPlaced {
            id: wire_id(),
            at: GridPosition::new(0, 0),
            revision: 1,
        });
        log.push(LayoutEvent::StatusChanged {
            id: wire_id(),
            revision: 1,
        });

        let events = log.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), LayoutEventKind::ItemPlaced);
        assert_eq!(events[1].revision(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn suppressed_kinds_are_dropped() {
        let mut log = EventLog::new();
        log.suppress(LayoutEventKind::StatusChanged);
        log.push(LayoutEvent::StatusChanged {
            id: wire_id(),
            revision: 3,
        });
        log.push(LayoutEvent::ItemRemoved {
            id: wire_id(),
            revision: 3,
        });
        assert!(log.is_suppressed(LayoutEventKind::StatusChanged));
        assert_eq!(log.len(), 1);
    }
}
