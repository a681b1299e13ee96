//! Player input handling.
//!
//! This module converts raw per-frame device state (keys, mouse) into the
//! semantic [`InputEvent`]s pawns consume.

use pawnmotion_physics::InputEvent;
use serde::{Deserialize, Serialize};

/// Raw device state for a single frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInput {
    /// Movement keys held.
    pub movement: MovementKeys,

    /// Mouse delta this frame (pixels).
    pub mouse_delta: (f32, f32),

    /// Jump button held.
    pub jump: bool,

    /// Sprint button held.
    pub sprint: bool,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
}

/// Which actions are bound, and how the mouse maps to look.
///
/// Unbound actions produce no events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBindings {
    /// Planar movement keys.
    pub move_axes: bool,
    /// Ascend/descend keys; moves are sent as 3D axes when bound.
    pub vertical_axis: bool,
    pub look: bool,
    pub jump: bool,
    pub sprint: bool,
    /// Degrees of look per pixel of mouse travel.
    pub mouse_sensitivity: f32,
    /// Mouse up looks down.
    pub invert_pitch: bool,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::character()
    }
}

impl InputBindings {
    /// Walk, look, jump and sprint.
    pub fn character() -> Self {
        Self {
            move_axes: true,
            vertical_axis: false,
            look: true,
            jump: true,
            sprint: true,
            mouse_sensitivity: 0.1,
            invert_pitch: false,
        }
    }

    /// Lean, climb/descend and look.
    pub fn drone() -> Self {
        Self {
            vertical_axis: true,
            jump: false,
            sprint: false,
            ..Self::character()
        }
    }

    pub fn with_mouse(mut self, sensitivity: f32, invert_pitch: bool) -> Self {
        self.mouse_sensitivity = sensitivity;
        self.invert_pitch = invert_pitch;
        self
    }
}

/// Turns raw frames into events, edge-detecting jump and sprint.
#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    bindings: InputBindings,
    jump_held: bool,
    sprint_held: bool,
}

impl InputTranslator {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            jump_held: false,
            sprint_held: false,
        }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Swap bindings. Held buttons are forgotten so they fire again if still down.
    pub fn set_bindings(&mut self, bindings: InputBindings) {
        self.bindings = bindings;
        self.jump_held = false;
        self.sprint_held = false;
    }

    /// Translate one frame of device state.
    pub fn translate(&mut self, input: &RawInput) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let bindings = &self.bindings;

        if bindings.move_axes || bindings.vertical_axis {
            let keys = input.movement;
            let (mut x, mut y) = if bindings.move_axes {
                (axis(keys.forward, keys.backward), axis(keys.right, keys.left))
            } else {
                (0.0, 0.0)
            };

            // Normalize diagonal movement
            let magnitude = (x * x + y * y).sqrt();
            if magnitude > 1.0 {
                x /= magnitude;
                y /= magnitude;
            }

            if bindings.vertical_axis {
                let z = axis(keys.ascend, keys.descend);
                if x != 0.0 || y != 0.0 || z != 0.0 {
                    events.push(InputEvent::MoveAxis3D { x, y, z });
                }
            } else if x != 0.0 || y != 0.0 {
                events.push(InputEvent::MoveAxis2D { x, y });
            }
        }

        if bindings.look {
            let (dx, dy) = input.mouse_delta;
            if dx != 0.0 || dy != 0.0 {
                let yaw = dx * bindings.mouse_sensitivity;
                // Screen Y grows downward
                let mut pitch = -dy * bindings.mouse_sensitivity;
                if bindings.invert_pitch {
                    pitch = -pitch;
                }
                events.push(InputEvent::LookAxis2D { yaw, pitch });
            }
        }

        if bindings.jump && input.jump && !self.jump_held {
            events.push(InputEvent::JumpPressed);
        }

        if bindings.sprint {
            match (self.sprint_held, input.sprint) {
                (false, true) => events.push(InputEvent::SprintStarted),
                (true, false) => events.push(InputEvent::SprintEnded),
                _ => {}
            }
        }

        self.jump_held = input.jump;
        self.sprint_held = input.sprint;
        events
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
