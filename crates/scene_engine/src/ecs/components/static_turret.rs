//! Static turret component

use log::debug;

use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentContext, ComponentKind, GameObjectId};
use crate::editor::Inspector;
use crate::foundation::math::{directions, utils, Quat, Vec3};
use crate::serialization::{PropertyTable, SerializedObject};

/// Yaws toward the nearest target within a limited arc
///
/// Targets are gameobject handles (typically helicopters). Handles whose
/// gameobject no longer exists are dropped on the next update. The rest
/// orientation is the owner's rotation at the first update.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticTurret {
    /// Maximum yaw either side of rest, in degrees
    rotation_cap: f32,
    /// Degrees per second
    rotation_speed: f32,

    targets: Vec<GameObjectId>,
    aim_angle: f32,
    base_rotation: Option<Quat>,
}

impl Default for StaticTurret {
    fn default() -> Self {
        Self {
            rotation_cap: 45.0,
            rotation_speed: 90.0,
            targets: Vec::new(),
            aim_angle: 0.0,
            base_rotation: None,
        }
    }
}

impl StaticTurret {
    /// Track another gameobject
    pub fn add_target(&mut self, target: GameObjectId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    /// Stop tracking a gameobject
    pub fn remove_target(&mut self, target: GameObjectId) {
        self.targets.retain(|t| *t != target);
    }

    /// Tracked gameobjects
    pub fn targets(&self) -> &[GameObjectId] {
        &self.targets
    }

    /// Current yaw away from rest, in degrees
    pub fn aim_angle(&self) -> f32 {
        self.aim_angle
    }

    /// Yaw limit in degrees
    pub fn rotation_cap(&self) -> f32 {
        self.rotation_cap
    }

    /// Turn rate in degrees per second
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Set the yaw limit and turn rate, clamped to the editor ranges
    pub fn set_rotation_limits(&mut self, cap: f32, speed: f32) {
        self.rotation_cap = cap.clamp(0.0, 180.0);
        self.rotation_speed = speed.clamp(0.0, 720.0);
    }
}

impl SerializedObject for StaticTurret {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("rotation_cap", &mut self.rotation_cap, 45.0);
        table.property("rotation_speed", &mut self.rotation_speed, 90.0);
    }
}

impl Component for StaticTurret {
    const KIND: ComponentKind = ComponentKind::StaticTurret;

    fn update(&mut self, delta_time: f32, ctx: &mut ComponentContext<'_>) {
        let scene = ctx.scene();
        let before = self.targets.len();
        self.targets.retain(|target| scene.contains(*target));
        if self.targets.len() < before {
            debug!("Turret dropped {} stale target(s)", before - self.targets.len());
        }

        let owner_position = ctx.owner().and_then(|owner| scene.position(owner));
        let Some(transform) = ctx.transform_mut() else {
            return;
        };
        let origin = owner_position.unwrap_or_else(|| transform.position_local());
        let base = *self.base_rotation.get_or_insert_with(|| transform.rotation_local());

        let nearest = self
            .targets
            .iter()
            .filter_map(|target| scene.position(*target))
            .min_by(|a, b| {
                (a - origin)
                    .norm_squared()
                    .total_cmp(&(b - origin).norm_squared())
            });

        let desired = match nearest {
            Some(target) => {
                let local: Vec3 = base.inverse() * (target - origin);
                if local.x.abs() + local.z.abs() > f32::EPSILON {
                    utils::rad_to_deg((-local.x).atan2(-local.z))
                } else {
                    self.aim_angle
                }
            }
            None => 0.0,
        };

        let desired = desired.clamp(-self.rotation_cap, self.rotation_cap);
        self.aim_angle = utils::move_towards(self.aim_angle, desired, self.rotation_speed * delta_time);
        transform.set_rotation_local(base * utils::axis_angle(directions::up(), utils::deg_to_rad(self.aim_angle)));
    }

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        ui.drag_f32("Rotation Cap", &mut self.rotation_cap, 0.5, 0.0, 180.0);
        ui.drag_f32("Rotation Speed", &mut self.rotation_speed, 0.5, 0.0, 720.0);
        ui.text(&format!("Targets: {}", self.targets.len()));
    }

    component_variant!(StaticTurret);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Transform;
    use crate::ecs::SceneSnapshot;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    struct Fixture {
        ids: SlotMap<GameObjectId, ()>,
        scene: SceneSnapshot,
    }

    impl Fixture {
        fn new() -> Self {
            Self { ids: SlotMap::with_key(), scene: SceneSnapshot::new() }
        }

        fn spawn(&mut self, position: Vec3) -> GameObjectId {
            let id = self.ids.insert(());
            self.scene.insert(id, position);
            id
        }
    }

    fn run(turret: &mut StaticTurret, transform: &mut Transform, fixture: &Fixture, seconds: f32) {
        let steps = (seconds / 0.1).round() as usize;
        for _ in 0..steps {
            turret.update(0.1, &mut ComponentContext::new(None, Some(&mut *transform), &fixture.scene));
        }
    }

    #[test]
    fn test_turns_toward_target_within_cap() {
        let mut fixture = Fixture::new();
        // 30 degrees to the left of -Z
        let angle = utils::deg_to_rad(30.0);
        let target = fixture.spawn(Vec3::new(-angle.sin(), 0.0, -angle.cos()) * 100.0);

        let mut turret = StaticTurret::default();
        turret.add_target(target);
        let mut transform = Transform::default();

        run(&mut turret, &mut transform, &fixture, 0.2);
        assert_relative_eq!(turret.aim_angle(), 18.0, epsilon = 1e-3);

        run(&mut turret, &mut transform, &fixture, 1.0);
        assert_relative_eq!(turret.aim_angle(), 30.0, epsilon = 1e-3);
        let expected = Vec3::new(-angle.sin(), 0.0, -angle.cos());
        assert_relative_eq!(transform.forwards(), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_clamped_to_cap() {
        let mut fixture = Fixture::new();
        let target = fixture.spawn(Vec3::new(100.0, 0.0, 0.0));

        let mut turret = StaticTurret::default();
        turret.add_target(target);
        let mut transform = Transform::default();

        run(&mut turret, &mut transform, &fixture, 2.0);
        assert_relative_eq!(turret.aim_angle(), -45.0, epsilon = 1e-3);
    }

    #[test]
    fn test_nearest_target_wins() {
        let mut fixture = Fixture::new();
        let far = fixture.spawn(Vec3::new(-100.0, 0.0, -100.0));
        let near = fixture.spawn(Vec3::new(10.0, 0.0, -10.0));

        let mut turret = StaticTurret::default();
        turret.add_target(far);
        turret.add_target(near);
        let mut transform = Transform::default();

        run(&mut turret, &mut transform, &fixture, 2.0);
        assert!(turret.aim_angle() < 0.0);
    }

    #[test]
    fn test_stale_targets_pruned() {
        let mut fixture = Fixture::new();
        let live = fixture.spawn(Vec3::new(0.0, 0.0, -10.0));
        let gone = fixture.ids.insert(());

        let mut turret = StaticTurret::default();
        turret.add_target(live);
        turret.add_target(gone);
        turret.add_target(live);
        let mut transform = Transform::default();

        run(&mut turret, &mut transform, &fixture, 0.1);
        assert_eq!(turret.targets(), &[live]);
    }

    #[test]
    fn test_returns_to_rest_without_targets() {
        let fixture = Fixture::new();
        let mut turret = StaticTurret::default();
        turret.aim_angle = 20.0;
        let mut transform = Transform::default();

        run(&mut turret, &mut transform, &fixture, 1.0);
        assert_relative_eq!(turret.aim_angle(), 0.0);
    }
}
