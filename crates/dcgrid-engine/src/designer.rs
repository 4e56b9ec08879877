//! The layout designer: owns the placed items and re-runs the simulation
//! after every structural change.

use dcgrid_core::event::{EventLog, LayoutEvent, LayoutEventKind};
use dcgrid_core::grid::{GridDimensions, GridPosition};
use dcgrid_core::id::{InstanceId, ModuleId};
use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::{ModuleCatalog, Network};
use dcgrid_core::placement::{self, PlacementError};
use dcgrid_core::template::Palette;
use dcgrid_stats::{AggregateStats, Inspection};

use crate::config::DesignerConfig;

/// Result of an accepted intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The item the intent acted on.
    pub id: InstanceId,
    /// Whether the follow-up simulation run changed any derived status.
    pub status_changed: bool,
}

/// Counts from one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeSummary {
    pub powered: usize,
    pub watered: usize,
    pub changed: Vec<InstanceId>,
}

/// Owns the layout and serialises all mutations through intent methods.
///
/// Every accepted structural intent (place, move, remove) runs one full
/// simulation: power trace, water trace, then the effect passes. Statuses are
/// committed only when the run produced something different.
#[derive(Debug)]
pub struct Designer {
    config: DesignerConfig,
    palette: Palette,
    catalog: ModuleCatalog,
    items: Vec<PlacedItem>,
    next_seq: u64,
    revision: u64,
    selected: Option<InstanceId>,
    events: EventLog,
}

impl Designer {
    pub fn new(config: DesignerConfig, palette: Palette, catalog: ModuleCatalog) -> Self {
        Self {
            config,
            palette,
            catalog,
            items: Vec::new(),
            next_seq: 1,
            revision: 0,
            selected: None,
            events: EventLog::new(),
        }
    }

    // -- Intents --

    /// Drop a new copy of `template` with its top-left corner at `(row, col)`.
    pub fn place(
        &mut self,
        template: &ModuleId,
        row: i32,
        col: i32,
    ) -> Result<Outcome, PlacementError> {
        let Some(template) = self.palette.get(template).cloned() else {
            return Err(self.reject(None, PlacementError::UnknownTemplate(template.clone())));
        };
        let at = GridPosition::new(row, col);
        if let Err(e) = placement::validate_reserved(
            at,
            template.footprint,
            &self.items,
            None,
            self.config.grid,
        ) {
            return Err(self.reject(None, e));
        }

        let id = InstanceId::new(template.id.clone(), self.next_seq);
        self.next_seq += 1;
        self.items.push(PlacedItem::new(id.clone(), template).at(at));
        self.revision += 1;
        self.events.push(LayoutEvent::ItemPlaced {
            id: id.clone(),
            at,
            revision: self.revision,
        });
        tracing::debug!(target: "dcgrid::engine", %id, row, col, "intent.place");

        let status_changed = !self.recompute().changed.is_empty();
        Ok(Outcome { id, status_changed })
    }

    /// Move a placed item so its top-left corner sits at `(row, col)`.
    ///
    /// On rejection the item keeps its old position and its drag state is
    /// cleared.
    pub fn move_item(
        &mut self,
        id: &InstanceId,
        row: i32,
        col: i32,
    ) -> Result<Outcome, PlacementError> {
        let idx = self.index_of(id)?;
        let Some(from) = self.items[idx].position else {
            return Err(self.reject(Some(id), PlacementError::NotPlaced(id.clone())));
        };
        let to = GridPosition::new(row, col);
        let footprint = self.items[idx].footprint();

        if let Err(e) =
            placement::validate_reserved(to, footprint, &self.items, Some(id), self.config.grid)
        {
            self.items[idx].dragging = false;
            return Err(self.reject(Some(id), e));
        }

        let item = &mut self.items[idx];
        item.position = Some(to);
        item.dragging = false;
        self.revision += 1;
        self.events.push(LayoutEvent::ItemMoved {
            id: id.clone(),
            from,
            to,
            revision: self.revision,
        });
        tracing::debug!(target: "dcgrid::engine", %id, row, col, "intent.move");

        let status_changed = !self.recompute().changed.is_empty();
        Ok(Outcome {
            id: id.clone(),
            status_changed,
        })
    }

    /// Delete a placed item.
    pub fn remove(&mut self, id: &InstanceId) -> Result<Outcome, PlacementError> {
        let idx = self.index_of(id)?;
        self.items.remove(idx);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.revision += 1;
        self.events.push(LayoutEvent::ItemRemoved {
            id: id.clone(),
            revision: self.revision,
        });
        tracing::debug!(target: "dcgrid::engine", %id, "intent.remove");

        let status_changed = !self.recompute().changed.is_empty();
        Ok(Outcome {
            id: id.clone(),
            status_changed,
        })
    }

    /// Turn a 1x1 item 90 degrees clockwise. Cosmetic; no simulation run.
    pub fn rotate(&mut self, id: &InstanceId) -> Result<Outcome, PlacementError> {
        let idx = self.index_of(id)?;
        let footprint = self.items[idx].footprint();
        if !footprint.is_single() {
            return Err(self.reject(
                Some(id),
                PlacementError::NotRotatable {
                    id: id.clone(),
                    width: footprint.width,
                    height: footprint.height,
                },
            ));
        }

        let item = &mut self.items[idx];
        item.rotation = item.rotation.rotate_cw();
        let rotation = item.rotation;
        self.revision += 1;
        self.events.push(LayoutEvent::ItemRotated {
            id: id.clone(),
            rotation,
            revision: self.revision,
        });
        tracing::debug!(
            target: "dcgrid::engine",
            %id,
            degrees = rotation.degrees(),
            "intent.rotate"
        );
        Ok(Outcome {
            id: id.clone(),
            status_changed: false,
        })
    }

    /// Lift a placed item. While lifted it drops out of the simulation but
    /// keeps its cells reserved until the drag ends.
    pub fn begin_drag(&mut self, id: &InstanceId) -> Result<(), PlacementError> {
        let idx = self.index_of(id)?;
        self.items[idx].dragging = true;
        Ok(())
    }

    /// Put a lifted item back where it was.
    pub fn cancel_drag(&mut self, id: &InstanceId) -> Result<(), PlacementError> {
        let idx = self.index_of(id)?;
        self.items[idx].dragging = false;
        Ok(())
    }

    pub fn select(&mut self, id: &InstanceId) -> Result<(), PlacementError> {
        self.index_of(id)?;
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove the selected item, if any.
    pub fn delete_selected(&mut self) -> Result<Option<Outcome>, PlacementError> {
        match self.selected.take() {
            Some(id) => self.remove(&id).map(Some),
            None => Ok(None),
        }
    }

    /// Enlarge the canvas to at least `dims`. Never shrinks, so every
    /// placed item stays in bounds.
    pub fn grow_to(&mut self, dims: GridDimensions) {
        let grid = &mut self.config.grid;
        grid.rows = grid.rows.max(dims.rows);
        grid.cols = grid.cols.max(dims.cols);
    }

    /// Grow the canvas to cover a viewport of `width_px` x `height_px` with
    /// square cells of `cell_px`.
    pub fn fit_viewport(&mut self, width_px: u32, height_px: u32, cell_px: u32) {
        self.grow_to(GridDimensions::for_viewport(width_px, height_px, cell_px));
    }

    /// Stop recording events of `kind`.
    pub fn suppress_events(&mut self, kind: LayoutEventKind) {
        self.events.suppress(kind);
    }

    // -- Simulation --

    /// Run power, water and effects over a copy of the layout and commit the
    /// statuses if any differ. Intents call this themselves.
    pub fn recompute(&mut self) -> RecomputeSummary {
        let mut next = self.items.clone();
        dcgrid_network::trace_and_apply(Network::Power, &mut next);
        dcgrid_network::trace_and_apply(Network::Water, &mut next);
        let report = dcgrid_effects::resolve(&mut next, &self.catalog, &self.config.effects);

        let changed: Vec<InstanceId> = next
            .iter()
            .zip(&self.items)
            .filter(|(after, before)| after.status != before.status)
            .map(|(after, _)| after.id.clone())
            .collect();
        let summary = RecomputeSummary {
            powered: next.iter().filter(|i| i.status.is_powered()).count(),
            watered: next.iter().filter(|i| i.status.is_watered()).count(),
            changed,
        };

        if summary.changed.is_empty() {
            tracing::debug!(target: "dcgrid::engine", revision = self.revision, "recompute.unchanged");
            return summary;
        }

        self.items = next;
        self.revision += 1;
        for id in &summary.changed {
            self.events.push(LayoutEvent::StatusChanged {
                id: id.clone(),
                revision: self.revision,
            });
        }
        tracing::debug!(
            target: "dcgrid::engine",
            revision = self.revision,
            powered = summary.powered,
            watered = summary.watered,
            effects = report.total_changed(),
            changed = summary.changed.len(),
            "recompute.committed"
        );
        summary
    }

    fn index_of(&mut self, id: &InstanceId) -> Result<usize, PlacementError> {
        match self.items.iter().position(|i| &i.id == id) {
            Some(idx) => Ok(idx),
            None => Err(self.reject(Some(id), PlacementError::UnknownInstance(id.clone()))),
        }
    }

    fn reject(&mut self, id: Option<&InstanceId>, reason: PlacementError) -> PlacementError {
        tracing::debug!(target: "dcgrid::engine", reason = %reason, "intent.rejected");
        self.events.push(LayoutEvent::PlacementRejected {
            id: id.cloned(),
            reason: reason.clone(),
            revision: self.revision,
        });
        reason
    }

    // -- Queries --

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn item(&self, id: &InstanceId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn aggregate_stats(&self) -> AggregateStats {
        dcgrid_stats::aggregate(&self.items, &self.catalog)
    }

    pub fn inspect(&self, id: &InstanceId) -> Option<Inspection> {
        self.item(id)
            .map(|item| dcgrid_stats::inspect(item, &self.catalog))
    }

    /// Bumped by every accepted intent and every committed status change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn drain_events(&mut self) -> Vec<LayoutEvent> {
        self.events.drain()
    }

    pub fn selected(&self) -> Option<&InstanceId> {
        self.selected.as_ref()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.config.grid
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }
}
