use kappa::{Curvature, Direction};
use serde::{Deserialize, Serialize};

/// What a scripted key or mouse event does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Holds a movement direction until the next `Move`. `Move(None)` releases.
    Move(Direction),
    /// Mouse drag in normalised device units.
    Pan(f32, f32),
    SetCurvature(Curvature),
}

/// An action delivered before frame `frame` is simulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub frame: u32,
    pub action: Action,
}

/// Replays a script of events in frame order.
#[derive(Debug, Default)]
pub struct InputScript {
    events: Vec<InputEvent>,
    next: usize,
}

impl InputScript {
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self { events, next: 0 }
    }

    /// Events scheduled for `frame` or earlier that have not been handed out.
    pub fn drain_until(&mut self, frame: u32) -> &[InputEvent] {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].frame <= frame {
            self.next += 1;
        }
        &self.events[start..self.next]
    }

    pub fn is_finished(&self) -> bool {
        self.next == self.events.len()
    }
}
