//! Collision world backed by parry3d.
//!
//! Stores static brushes and actor proxies and answers [`CollisionProbe`]
//! queries against them.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::na::{Translation3, UnitQuaternion};
use parry3d::query::{closest_points, ClosestPoints, PointQuery, Ray};
use parry3d::shape::{Segment, SharedShape};

use crate::rotator::Rotator;

use super::probe::{ActorId, CapsuleShape, CollisionProbe, Contact, SweepQuery};

/// Upper bound on overlap samples taken along a moving query.
const MAX_SWEEP_SAMPLES: usize = 64;

/// Separations shorter than this carry no usable direction.
const SEPARATION_EPSILON: Real = 1.0e-4;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Actor this brush belongs to, if any.
    pub owner: Option<ActorId>,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("translation", &self.transform.translation.vector)
            .field("owner", &self.owner)
            .finish()
    }
}

/// Result of a raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

/// The collision world containing all geometry.
///
/// Boxes, convex hulls and capsules are supported. Brushes can be tagged
/// with an owning actor so that actor's own probes skip them.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    fn push(&mut self, shape: SharedShape, transform: Isometry<Real>, owner: Option<ActorId>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            owner,
        });
        id
    }

    /// Add an axis-aligned box.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        self.push(shape, isometry(center, UnitQuaternion::identity()), None)
    }

    /// Add a convex hull. Returns `None` if the points are degenerate.
    pub fn add_convex_hull(&mut self, points: &[Vec3]) -> Option<u32> {
        let parry_points: Vec<Point<Real>> = points.iter().map(|p| Point::new(p.x, p.y, p.z)).collect();
        let shape = SharedShape::convex_hull(&parry_points)?;
        Some(self.push(shape, Isometry::identity(), None))
    }

    /// Add a triangle mesh. Returns `None` for an empty mesh.
    ///
    /// Meshes are treated as thin surfaces; use hulls or boxes for solids.
    pub fn add_trimesh(&mut self, vertices: &[Vec3], indices: Vec<[u32; 3]>) -> Option<u32> {
        if vertices.is_empty() || indices.is_empty() {
            return None;
        }
        let points: Vec<Point<Real>> = vertices.iter().map(|v| Point::new(v.x, v.y, v.z)).collect();
        let shape = SharedShape::trimesh(points, indices);
        Some(self.push(shape, Isometry::identity(), None))
    }

    /// Add an upright capsule owned by `owner`, e.g. a stand-in for an actor body.
    pub fn add_capsule(&mut self, center: Vec3, capsule: CapsuleShape, owner: Option<ActorId>) -> u32 {
        let shape = SharedShape::capsule_z(capsule.cylinder_half_height(), capsule.radius);
        self.push(shape, isometry(center, UnitQuaternion::identity()), owner)
    }

    /// Tag a brush with its owning actor.
    pub fn set_owner(&mut self, id: u32, owner: Option<ActorId>) -> bool {
        match self.brushes.iter_mut().find(|b| b.id == id) {
            Some(brush) => {
                brush.owner = owner;
                true
            }
            None => false,
        }
    }

    /// Move a brush, keeping its rotation.
    pub fn set_position(&mut self, id: u32, center: Vec3) -> bool {
        match self.brushes.iter_mut().find(|b| b.id == id) {
            Some(brush) => {
                brush.transform.translation = Translation3::new(center.x, center.y, center.z);
                true
            }
            None => false,
        }
    }

    /// Remove a brush.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.brushes.len();
        self.brushes.retain(|b| b.id != id);
        self.brushes.len() != before
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Cast a ray and return the closest hit.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<RayHit> = None;
        for brush in &self.brushes {
            let Some(distance) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) else {
                continue;
            };
            if closest.map_or(true, |hit| distance < hit.distance) {
                let normal = brush
                    .shape
                    .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)
                    .map(|i| Vec3::new(i.normal.x, i.normal.y, i.normal.z))
                    .unwrap_or(-dir);
                closest = Some(RayHit {
                    distance,
                    point: origin + dir * distance,
                    normal,
                });
            }
        }
        closest
    }

    /// Check a capsule against one brush at a fixed placement.
    ///
    /// The capsule is reduced to its axis segment: it touches the brush when
    /// the segment comes within `radius` of it. The normal points from the
    /// nearest brush point towards the axis.
    fn overlap(
        &self,
        brush: &CollisionBrush,
        axis: &Segment,
        radius: Real,
        placement: &Isometry<Real>,
    ) -> Option<Contact> {
        let nearest =
            closest_points(placement, axis, &brush.transform, brush.shape.as_ref(), radius).ok()?;
        let (normal, point) = match nearest {
            ClosestPoints::Disjoint => return None,
            ClosestPoints::WithinMargin(on_axis, on_brush) => {
                match (on_axis - on_brush).try_normalize(SEPARATION_EPSILON) {
                    Some(normal) => (normal, on_brush),
                    None => push_out(brush, placement),
                }
            }
            ClosestPoints::Intersecting => push_out(brush, placement),
        };
        Some(Contact::new(
            Vec3::new(normal.x, normal.y, normal.z),
            Vec3::new(point.x, point.y, point.z),
        ))
    }
}

/// Direction out of a brush the capsule axis has reached, and the surface
/// point it leaves through.
///
/// Uses the brush surface point nearest the capsule center.
fn push_out(brush: &CollisionBrush, placement: &Isometry<Real>) -> (Vector<Real>, Point<Real>) {
    let center = Point::from(placement.translation.vector);
    let projection = brush.shape.project_point(&brush.transform, &center, false);
    let away = if projection.is_inside {
        projection.point - center
    } else {
        center - projection.point
    };
    let normal = away
        .try_normalize(SEPARATION_EPSILON)
        .or_else(|| {
            let brush_center = Point::from(brush.transform.translation.vector);
            (center - brush_center).try_normalize(SEPARATION_EPSILON)
        })
        .unwrap_or_else(Vector::<Real>::z);
    (normal, projection.point)
}

/// Number of steps a moving query is split into. Zero for a stationary one.
fn sweep_samples(query: &SweepQuery) -> usize {
    if query.is_stationary() {
        return 0;
    }
    let step = (query.shape.radius * 0.5).max(1.0e-3);
    let wanted = ((query.to - query.from).length() / step).ceil() as usize;
    if wanted > MAX_SWEEP_SAMPLES {
        log::trace!(
            "sweep {:?} -> {:?} capped at {} samples ({} wanted)",
            query.from,
            query.to,
            MAX_SWEEP_SAMPLES,
            wanted
        );
    }
    wanted.clamp(1, MAX_SWEEP_SAMPLES)
}

impl CollisionProbe for CollisionWorld {
    /// Overlap-test the capsule along `from -> to`.
    ///
    /// A stationary query is a single overlap test. A moving query samples
    /// positions half a radius apart, up to `MAX_SWEEP_SAMPLES` steps, and
    /// reports each brush's first overlapping contact along the path.
    fn sweep(&self, query: &SweepQuery) -> Vec<Contact> {
        let half = query.shape.cylinder_half_height();
        let axis = Segment::new(Point::new(0.0, 0.0, -half), Point::new(0.0, 0.0, half));
        let rotation = rotator_to_quat(query.orientation);

        let delta = query.to - query.from;
        let samples = sweep_samples(query);

        let placements: Vec<Isometry<Real>> = (0..=samples)
            .map(|i| {
                let t = if samples == 0 { 0.0 } else { i as f32 / samples as f32 };
                isometry(query.from + delta * t, rotation)
            })
            .collect();

        let mut contacts = Vec::new();
        for brush in &self.brushes {
            if brush.owner.is_some() && brush.owner == query.ignore {
                continue;
            }
            let first = placements
                .iter()
                .find_map(|p| self.overlap(brush, &axis, query.shape.radius, p));
            if let Some(hit) = first {
                contacts.push(hit);
            }
        }

        log::trace!(
            "sweep {:?} -> {:?}: {} contact(s)",
            query.from,
            query.to,
            contacts.len()
        );
        contacts
    }
}

fn isometry(center: Vec3, rotation: UnitQuaternion<Real>) -> Isometry<Real> {
    Isometry::from_parts(Translation3::new(center.x, center.y, center.z), rotation)
}

/// Rotation taking +Z onto the rotator's up axis.
///
/// Capsules are symmetric about their axis, so aligning the axis is enough.
fn rotator_to_quat(rotation: Rotator) -> UnitQuaternion<Real> {
    let up = rotation.up();
    let target = Vector::new(up.x, up.y, up.z);
    UnitQuaternion::rotation_between(&Vector::<Real>::z(), &target)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector::<Real>::x_axis(), std::f32::consts::PI))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top at z=0
        world.add_box(Vec3::new(0.0, 0.0, -50.0), Vec3::new(5000.0, 5000.0, 50.0));

        // Wall face at x=1000
        world.add_box(Vec3::new(1050.0, 0.0, 250.0), Vec3::new(50.0, 1000.0, 250.0));

        world
    }

    #[test]
    fn test_resting_capsule_touches_floor() {
        let world = create_test_world();
        let shape = CapsuleShape::CHARACTER;

        // Sunk 1cm into the floor
        let at = Vec3::new(0.0, 0.0, shape.half_height - 1.0);
        let contacts = world.sweep(&SweepQuery::overlap(shape, at, Rotator::ZERO));

        assert_eq!(contacts.len(), 1);
        let normal = contacts[0].normal;
        assert!(normal.dot(Vec3::Z) > 0.99, "floor normal should point up, got {:?}", normal);
        assert!(contacts[0].point.z.abs() < 1.0);
    }

    #[test]
    fn test_floor_normal_points_up_for_any_floor_size() {
        for half_size in [500.0, 2000.0, 5000.0] {
            let mut world = CollisionWorld::new();
            world.add_box(Vec3::new(0.0, 0.0, -50.0), Vec3::new(half_size, half_size, 50.0));

            for shape in [CapsuleShape::CHARACTER, CapsuleShape::DRONE] {
                for sink in [0.5, 1.0, 2.0] {
                    let at = Vec3::new(0.0, 0.0, shape.half_height - sink);
                    let contacts = world.sweep(&SweepQuery::overlap(shape, at, Rotator::ZERO));

                    assert_eq!(contacts.len(), 1, "floor {} shape {:?}", half_size, shape);
                    let normal = contacts[0].normal;
                    assert!(
                        normal.z > 0.99,
                        "floor {} shape {:?} sunk {}: normal {:?}",
                        half_size,
                        shape,
                        sink,
                        normal
                    );
                    assert!(contacts[0].point.z.abs() < 0.01);
                }
            }
        }
    }

    #[test]
    fn test_deeply_sunk_capsule_is_pushed_up() {
        let world = create_test_world();
        let shape = CapsuleShape::CHARACTER;

        // Axis bottom well below the floor top
        let at = Vec3::new(20.0, -30.0, 40.0);
        let contacts = world.sweep(&SweepQuery::overlap(shape, at, Rotator::ZERO));

        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].normal.z > 0.99, "got {:?}", contacts[0].normal);
    }

    #[test]
    fn test_capsule_in_open_air_has_no_contacts() {
        let world = create_test_world();
        let at = Vec3::new(0.0, 0.0, 500.0);
        let contacts = world.sweep(&SweepQuery::overlap(CapsuleShape::CHARACTER, at, Rotator::ZERO));
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_wall_normal_faces_body() {
        let world = create_test_world();
        let shape = CapsuleShape::DRONE;
        let at = Vec3::new(1000.0 - shape.radius + 2.0, 0.0, 300.0);
        let contacts = world.sweep(&SweepQuery::overlap(shape, at, Rotator::ZERO));

        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].normal.dot(-Vec3::X) > 0.99, "got {:?}", contacts[0].normal);
    }

    #[test]
    fn test_moving_query_finds_wall_ahead() {
        let world = create_test_world();
        let shape = CapsuleShape::DRONE;
        let from = Vec3::new(900.0, 0.0, 300.0);
        let to = Vec3::new(1100.0, 0.0, 300.0);

        let stationary = world.sweep(&SweepQuery::overlap(shape, from, Rotator::ZERO));
        assert!(stationary.is_empty());

        let moving = SweepQuery {
            shape,
            from,
            to,
            orientation: Rotator::ZERO,
            ignore: None,
        };
        assert_eq!(world.sweep(&moving).len(), 1);
    }

    #[test]
    fn test_long_path_sampling_is_capped() {
        let shape = CapsuleShape::DRONE;
        assert_eq!(sweep_samples(&SweepQuery::overlap(shape, Vec3::ZERO, Rotator::ZERO)), 0);

        let short = SweepQuery {
            shape,
            from: Vec3::ZERO,
            to: Vec3::new(45.0, 0.0, 0.0),
            orientation: Rotator::ZERO,
            ignore: None,
        };
        assert_eq!(sweep_samples(&short), 3);

        let long = SweepQuery {
            to: Vec3::new(100_000.0, 0.0, 0.0),
            ..short
        };
        assert_eq!(sweep_samples(&long), MAX_SWEEP_SAMPLES);
    }

    #[test]
    fn test_ignored_actor_geometry_is_skipped() {
        let mut world = CollisionWorld::new();
        let shape = CapsuleShape::CHARACTER;
        let id = world.add_capsule(Vec3::new(0.0, 0.0, 100.0), shape, Some(3));

        let query = SweepQuery::overlap(shape, Vec3::new(0.0, 0.0, 100.0), Rotator::ZERO);
        assert_eq!(world.sweep(&query).len(), 1);
        assert!(world.sweep(&query.ignoring(Some(3))).is_empty());
        // other actors still see it
        assert_eq!(world.sweep(&query.ignoring(Some(4))).len(), 1);

        assert!(world.set_position(id, Vec3::new(0.0, 0.0, 1000.0)));
        assert!(world.sweep(&query).is_empty());
    }

    #[test]
    fn test_tilted_capsule_reaches_sideways() {
        let mut world = CollisionWorld::new();
        // Thin post at x=60
        world.add_box(Vec3::new(60.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 5.0));

        let shape = CapsuleShape::new(10.0, 80.0);
        let upright = SweepQuery::overlap(shape, Vec3::ZERO, Rotator::ZERO);
        assert!(world.sweep(&upright).is_empty());

        // Pitched 90 degrees the capsule axis lies along X
        let lying = SweepQuery::overlap(shape, Vec3::ZERO, Rotator::new(90.0, 0.0, 0.0));
        assert_eq!(world.sweep(&lying).len(), 1);
    }

    #[test]
    fn test_trimesh_surface_is_touched() {
        let mut world = CollisionWorld::new();
        let id = world.add_trimesh(
            &[
                Vec3::new(-500.0, -500.0, 0.0),
                Vec3::new(500.0, -500.0, 0.0),
                Vec3::new(500.0, 500.0, 0.0),
                Vec3::new(-500.0, 500.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        assert!(id.is_some());
        assert!(world.add_trimesh(&[], Vec::new()).is_none());

        let shape = CapsuleShape::DRONE;
        let touching = SweepQuery::overlap(shape, Vec3::new(0.0, 0.0, shape.half_height - 2.0), Rotator::ZERO);
        let contacts = world.sweep(&touching);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].normal.z.abs() > 0.99, "got {:?}", contacts[0].normal);

        let clear = SweepQuery::overlap(shape, Vec3::new(0.0, 0.0, 200.0), Rotator::ZERO);
        assert!(world.sweep(&clear).is_empty());
    }

    #[test]
    fn test_raycast_hit_and_miss() {
        let world = create_test_world();

        let hit = world
            .raycast(Vec3::new(0.0, 0.0, 100.0), Vec3::X, 5000.0)
            .expect("should hit wall");
        assert!((hit.point.x - 1000.0).abs() < 0.1);
        assert!(hit.normal.dot(-Vec3::X) > 0.99);

        assert!(world.raycast(Vec3::new(0.0, 0.0, 100.0), -Vec3::X, 500.0).is_none());
        assert!(world.raycast(Vec3::ZERO, Vec3::ZERO, 100.0).is_none());
    }

    #[test]
    fn test_brush_bookkeeping() {
        let mut world = create_test_world();
        assert_eq!(world.brush_count(), 2);

        let ramp = world.add_convex_hull(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(100.0, 100.0, 0.0),
            Vec3::new(100.0, 0.0, 50.0),
            Vec3::new(100.0, 100.0, 50.0),
        ]);
        assert!(ramp.is_some());
        assert_eq!(world.brush_count(), 3);

        assert!(world.remove(0));
        assert!(!world.remove(0));
        assert!(!world.set_owner(0, Some(1)));
        world.clear();
        assert_eq!(world.brush_count(), 0);
    }
}
