//! Scene and prefab documents on disk

use std::fs;
use std::path::Path;

use crate::assets::{Prefab, ResourceManager, Scene};
use crate::ecs::components::{Camera, Terrain};
use crate::ecs::SceneManager;
use crate::foundation::math::Vec3;

const CAMERA_PREFAB: &str = r#"{
    "gameobject": Table({
        "name": String("Camera"),
        "prefab": Null,
        "components": Table({
            "Transform": Table({
                "Position": Vec3((0.0, 20.0, 60.0)),
                "Rotation": Vec4((0.0, 0.0, 0.0, 1.0)),
                "Scale": Vec3((1.0, 1.0, 1.0)),
            }),
            "Camera": Table({
                "near_plane": Float(0.5),
                "fov": Int(75),
            }),
        }),
    }),
}"#;

fn write_document(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hand_written_prefab() {
        let dir = tempfile::tempdir().unwrap();
        write_document(dir.path(), "Prefabs/Camera.prefab", CAMERA_PREFAB);

        let mut resources = ResourceManager::with_root(dir.path());
        let prefab = resources.load::<Prefab>("Prefabs/Camera.prefab").unwrap();
        let mut scene = SceneManager::new();
        scene.create_game_object_from_prefab(&prefab, &mut resources).unwrap();

        let entry = scene.main_camera().unwrap();
        assert_relative_eq!(entry.component.near_plane(), 0.5);
        assert_relative_eq!(entry.component.fov(), 75.0);
        assert_relative_eq!(entry.component.far_plane(), 10000.0);
        assert_relative_eq!(entry.transform().position_local(), Vec3::new(0.0, 20.0, 60.0));
    }

    #[test]
    fn test_scene_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = ResourceManager::with_root(dir.path());

        let mut live = SceneManager::new();
        let root = live.create_game_object("World", None);
        let cam = live.create_game_object_with("Camera", "Camera", Some(root)).unwrap();
        live.create_game_object_with("Island", "Terrain", None).unwrap();
        live.get_mut(cam)
            .unwrap()
            .find_component_mut::<Camera>()
            .unwrap()
            .set_fov(90.0);

        let document = resources.create_resource::<Scene>("Scenes/session.scene").unwrap();
        live.capture_scene(&mut document.borrow_mut());
        resources.save(&document).unwrap();

        let mut fresh = ResourceManager::with_root(dir.path());
        let loaded = fresh.load::<Scene>("Scenes/session.scene").unwrap();
        let mut restored = SceneManager::new();
        let ids = restored.load_scene(&loaded.borrow(), &mut fresh).unwrap();

        assert_eq!(ids.len(), 3);
        let names: Vec<_> = restored.iter().map(|(_, go)| go.name().to_string()).collect();
        assert_eq!(names, vec!["World", "Camera", "Island"]);
        assert_relative_eq!(restored.main_camera().unwrap().component.fov(), 90.0);
        assert_eq!(restored.terrains().len(), 1);
        assert!(restored.components::<Terrain>()[0].component.needs_regeneration());
        // Parent links are runtime only
        assert!(restored.get(ids[1]).unwrap().transform().parent().is_none());
    }

    #[test]
    fn test_load_scene_replaces_live_set() {
        let mut resources = ResourceManager::with_root(".");
        let mut scene = SceneManager::new();
        let stale = scene.create_game_object("Old", None);

        let document = resources.create_resource::<Scene>("Scenes/empty.scene").unwrap();
        scene.load_scene(&document.borrow(), &mut resources).unwrap();

        assert!(scene.is_empty());
        assert!(!scene.contains(stale));
    }
}
