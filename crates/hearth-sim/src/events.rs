use std::collections::VecDeque;

/// Input from the host page, queued by event handlers and applied between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A mode button was pressed: "midnight", "morning", "twilight" or "cycle".
    SetMode(String),
    /// The window changed size. `document_height` is the full scrollable height.
    Resize {
        width: f64,
        height: f64,
        document_height: f64,
    },
}

/// FIFO of pending host events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    /// Remove and yield every queued event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
