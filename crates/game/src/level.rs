//! Level geometry and spawn points.

use glam::Vec3;
use pawnmotion_physics::{CapsuleShape, CollisionWorld};
use serde::{Deserialize, Serialize};

/// A level: collision geometry plus where pawns start.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world the pawns probe.
    pub collision: CollisionWorld,

    /// Pawn spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Where a pawn starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Capsule center in world space.
    pub position: Vec3,

    /// Initial heading (yaw in degrees).
    pub facing: f32,

    /// Which pawn uses this spawn point.
    pub kind: SpawnKind,
}

/// Types of spawn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Character,
    Drone,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// A walled 40m square with a pillar and a ramp.
    ///
    /// The floor top is at z=0. The character spawns sunk 1cm into the floor
    /// so its first ground check succeeds.
    pub fn test_arena() -> Self {
        let mut level = Self::new("test_arena", "Test Arena");

        let arena_size = 2000.0;
        let wall_height = 500.0;
        let wall_thickness = 25.0;

        // Floor
        level
            .collision
            .add_box(Vec3::new(0.0, 0.0, -50.0), Vec3::new(arena_size, arena_size, 50.0));

        // North wall
        level.collision.add_box(
            Vec3::new(0.0, arena_size + wall_thickness, wall_height / 2.0),
            Vec3::new(arena_size, wall_thickness, wall_height / 2.0),
        );

        // South wall
        level.collision.add_box(
            Vec3::new(0.0, -arena_size - wall_thickness, wall_height / 2.0),
            Vec3::new(arena_size, wall_thickness, wall_height / 2.0),
        );

        // East wall
        level.collision.add_box(
            Vec3::new(arena_size + wall_thickness, 0.0, wall_height / 2.0),
            Vec3::new(wall_thickness, arena_size, wall_height / 2.0),
        );

        // West wall
        level.collision.add_box(
            Vec3::new(-arena_size - wall_thickness, 0.0, wall_height / 2.0),
            Vec3::new(wall_thickness, arena_size, wall_height / 2.0),
        );

        // Pillar
        level
            .collision
            .add_box(Vec3::new(600.0, 600.0, 150.0), Vec3::new(100.0, 100.0, 150.0));

        // Ramp rising toward -X, about 20 degrees
        level.collision.add_convex_hull(&[
            Vec3::new(-800.0, -200.0, 0.0),
            Vec3::new(-800.0, 200.0, 0.0),
            Vec3::new(-1200.0, -200.0, 0.0),
            Vec3::new(-1200.0, 200.0, 0.0),
            Vec3::new(-1200.0, -200.0, 150.0),
            Vec3::new(-1200.0, 200.0, 150.0),
        ]);

        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(0.0, 0.0, CapsuleShape::CHARACTER.half_height - 1.0),
            facing: 0.0,
            kind: SpawnKind::Character,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-400.0, 400.0, 300.0),
            facing: 90.0,
            kind: SpawnKind::Drone,
        });

        level
    }

    /// Get the `index`-th spawn point of a kind.
    pub fn get_spawn(&self, kind: SpawnKind, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.iter().filter(|s| s.kind == kind).nth(index)
    }

    /// Get the number of spawn points of a kind.
    pub fn spawn_count(&self, kind: SpawnKind) -> usize {
        self.spawn_points.iter().filter(|s| s.kind == kind).count()
    }
}
