//! Capabilities the host drives a body through.
//!
//! The host calls [`Tickable::tick`] once per frame and forwards input
//! through [`InputReceiver`] between frames. Both run on the host's dispatch
//! thread, so bodies need no synchronization.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionProbe;

/// Semantic input delivered by the host's input translator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Planar move axes: x forward, y right.
    MoveAxis2D { x: f32, y: f32 },
    /// Move axes with a vertical component in z.
    MoveAxis3D { x: f32, y: f32, z: f32 },
    /// Look deltas in degrees.
    LookAxis2D { yaw: f32, pitch: f32 },
    JumpPressed,
    SprintStarted,
    SprintEnded,
}

/// Named input handlers.
///
/// Every handler defaults to doing nothing, so a body that has no use for an
/// event simply ignores it.
pub trait InputReceiver {
    fn on_move_axis_2d(&mut self, _x: f32, _y: f32) {}

    fn on_move_axis_3d(&mut self, _x: f32, _y: f32, _z: f32) {}

    fn on_look_axis_2d(&mut self, _yaw: f32, _pitch: f32) {}

    fn on_jump_pressed(&mut self) {}

    fn on_sprint_start(&mut self) {}

    fn on_sprint_end(&mut self) {}

    /// Route an event to its handler.
    fn receive(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveAxis2D { x, y } => self.on_move_axis_2d(x, y),
            InputEvent::MoveAxis3D { x, y, z } => self.on_move_axis_3d(x, y, z),
            InputEvent::LookAxis2D { yaw, pitch } => self.on_look_axis_2d(yaw, pitch),
            InputEvent::JumpPressed => self.on_jump_pressed(),
            InputEvent::SprintStarted => self.on_sprint_start(),
            InputEvent::SprintEnded => self.on_sprint_end(),
        }
    }
}

/// A body advanced once per host frame.
pub trait Tickable {
    /// Advance by `delta_time` seconds, probing `probe` for contacts.
    fn tick(&mut self, probe: &dyn CollisionProbe, delta_time: f32);
}
