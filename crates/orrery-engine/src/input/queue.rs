/// Pointer button codes, matching `MouseEvent.button` in the browser.
pub mod button {
    pub const PRIMARY: u8 = 0;
    pub const MIDDLE: u8 = 1;
    pub const SECONDARY: u8 = 2;
}

/// Everything the page forwards to the game between two ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press at canvas pixel (x, y).
    PointerDown { x: f32, y: f32, button: u8 },
    PointerUp { x: f32, y: f32, button: u8 },
    /// Absolute canvas position, not a delta.
    PointerMove { x: f32, y: f32 },
    /// Positive zooms out.
    Wheel { delta: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// CSS pixels.
    Resize { width: f32, height: f32 },
    /// Page controls (buttons, slider). `kind` is game-defined.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Pending input for the next simulation step.
///
/// Browsers fire moves and wheel ticks far faster than the frame rate. Runs of
/// them are folded on push: consecutive moves keep only the latest position and
/// consecutive wheel deltas are summed. Anything in between (a press, a key)
/// breaks the run, so ordering relative to buttons is preserved.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { pending: Vec::with_capacity(16) }
    }

    pub fn push(&mut self, event: InputEvent) {
        match (self.pending.last_mut(), event) {
            (Some(InputEvent::PointerMove { x, y }), InputEvent::PointerMove { x: nx, y: ny }) => {
                *x = nx;
                *y = ny;
            }
            (Some(InputEvent::Wheel { delta }), InputEvent::Wheel { delta: more }) => {
                *delta += more;
            }
            _ => self.pending.push(event),
        }
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputEvent> {
        self.pending.iter()
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

    #[test]
    fn moves_collapse_to_latest() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 5.0, y: 7.0 });
        assert_eq!(q.drain(), vec![InputEvent::PointerMove { x: 5.0, y: 7.0 }]);
        assert!(q.is_empty());
    }

    #[test]
    fn wheel_deltas_sum() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Wheel { delta: 100.0 });
        q.push(InputEvent::Wheel { delta: -40.0 });
        assert_eq!(q.drain(), vec![InputEvent::Wheel { delta: 60.0 }]);
    }

    #[test]
    fn presses_break_a_run() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerDown { x: 1.0, y: 1.0, button: button::MIDDLE });
        q.push(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        q.push(InputEvent::Custom { kind: 2, a: 1.5, b: 0.0, c: 0.0 });
        assert_eq!(q.len(), 4);
        assert_eq!(q.iter().nth(3), Some(&InputEvent::Custom { kind: 2, a: 1.5, b: 0.0, c: 0.0 }));
    }
}
