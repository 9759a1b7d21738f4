use crate::InputSource;

/// Presentational state of the drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropZoneState {
    #[default]
    Idle,
    DragHover,
    Loaded,
}

/// Tracks only whether a drag is hovering. Everything else is projected
/// from the input source, so the zone can never disagree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropTarget {
    hovering: bool,
}

impl DropTarget {
    pub fn drag_entered(&mut self) {
        self.hovering = true;
    }

    /// Drag-leave and drop both end the hover.
    pub fn drag_ended(&mut self) {
        self.hovering = false;
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn state(&self, input: &InputSource) -> DropZoneState {
        project(self.hovering, input.file().is_some())
    }
}

fn project(hovering: bool, file_present: bool) -> DropZoneState {
    match (hovering, file_present) {
        (true, _) => DropZoneState::DragHover,
        (false, true) => DropZoneState::Loaded,
        (false, false) => DropZoneState::Idle,
    }
}
