//! Cloning gameobjects into prefabs and stamping instances out of them

use crate::assets::{Material, Prefab, ResourceId, ResourceManager};
use crate::core::config::SceneConfig;
use crate::ecs::components::{Camera, Helicopter, StaticMesh};
use crate::ecs::{GameObject, SceneManager};
use crate::foundation::math::Vec3;

fn heli_source(resources: &mut ResourceManager) -> GameObject {
    let mut go = GameObject::new("Helicopter");
    go.transform_mut().set_position_local(Vec3::new(0.0, 50.0, 0.0));
    go.create_component::<Helicopter>();
    let material = resources
        .create_resource::<Material>("Materials/heli.material")
        .ok();
    let mesh = go.create_component::<StaticMesh>();
    mesh.set_material(material);
    go
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    #[test]
    fn test_clone_is_independent_of_source() {
        let mut resources = ResourceManager::with_root(".");
        let mut source = heli_source(&mut resources);
        let prefab = resources.create_resource::<Prefab>("Prefabs/Heli.prefab").unwrap();

        prefab.borrow_mut().clone_game_object(&source, &mut resources).unwrap();
        source.find_component_mut::<StaticMesh>().unwrap().set_visible(false);
        source.transform_mut().set_position_local(Vec3::zeros());

        let prefab = prefab.borrow();
        let template = prefab.template();
        assert!(template.find_component::<StaticMesh>().unwrap().is_visible());
        assert_relative_eq!(template.transform().position_local(), Vec3::new(0.0, 50.0, 0.0));
        // Shared resources stay shared; components do not
        assert_eq!(
            template.find_component::<StaticMesh>().unwrap().material(),
            source.find_component::<StaticMesh>().unwrap().material()
        );
    }

    #[test]
    fn test_clone_replaces_prior_template() {
        let mut resources = ResourceManager::with_root(".");
        let prefab = resources.create_resource::<Prefab>("Prefabs/Thing.prefab").unwrap();

        let heli = heli_source(&mut resources);
        prefab.borrow_mut().clone_game_object(&heli, &mut resources).unwrap();

        let mut camera = GameObject::new("Camera");
        camera.create_component::<Camera>();
        prefab.borrow_mut().clone_game_object(&camera, &mut resources).unwrap();

        let prefab = prefab.borrow();
        assert_eq!(prefab.template().name(), "Camera");
        assert_eq!(prefab.template().component_tags(), vec!["Transform", "Camera"]);
    }

    #[test]
    fn test_template_never_links_or_joins_live_set() {
        let mut resources = ResourceManager::with_root(".");
        let mut scene = SceneManager::new();
        let prefab = resources.create_resource::<Prefab>("Prefabs/Heli.prefab").unwrap();

        let id = scene.create_game_object("Live", None);
        let live = scene.get_mut(id).unwrap();
        live.set_prefab(Some(ResourceId::new("Prefabs/Other.prefab")));
        prefab.borrow_mut().clone_game_object(live, &mut resources).unwrap();

        let prefab = prefab.borrow();
        assert!(prefab.template().id().is_none());
        assert!(prefab.template().prefab().is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_instances_are_equal_but_distinct() {
        let mut resources = ResourceManager::with_root(".");
        let mut scene = SceneManager::new();
        let prefab = resources.create_resource::<Prefab>("Prefabs/Heli.prefab").unwrap();
        let source = heli_source(&mut resources);
        prefab.borrow_mut().clone_game_object(&source, &mut resources).unwrap();

        let a = scene.create_game_object_from_prefab(&prefab, &mut resources).unwrap();
        let b = scene.create_game_object_from_prefab(&prefab, &mut resources).unwrap();
        assert_ne!(a, b);

        let (first, second) = (scene.get(a).unwrap(), scene.get(b).unwrap());
        assert_eq!(first.components(), second.components());
        assert_eq!(first.prefab(), Some(prefab.id()));

        scene.get_mut(a).unwrap().transform_mut().set_position_local(Vec3::new(9.0, 9.0, 9.0));
        assert_relative_eq!(
            scene.get(b).unwrap().transform().position_local(),
            Vec3::new(0.0, 50.0, 0.0)
        );
        assert_relative_eq!(
            prefab.borrow().template().transform().position_local(),
            Vec3::new(0.0, 50.0, 0.0)
        );
    }

    #[test]
    fn test_later_template_edits_do_not_reach_instances() {
        let mut resources = ResourceManager::with_root(".");
        let prefab = resources.create_resource::<Prefab>("Prefabs/Heli.prefab").unwrap();
        let mut source = heli_source(&mut resources);
        prefab.borrow_mut().clone_game_object(&source, &mut resources).unwrap();

        let instance = prefab.borrow().instantiate(&mut resources).unwrap();

        source.create_component::<Camera>();
        prefab.borrow_mut().clone_game_object(&source, &mut resources).unwrap();

        assert!(!instance.has_component::<Camera>());
        assert!(prefab.borrow().template().has_component::<Camera>());
    }

    #[test]
    fn test_break_prefab_link_keeps_components() {
        let mut resources = ResourceManager::with_root(".");
        let prefab = resources.create_resource::<Prefab>("Prefabs/Heli.prefab").unwrap();
        let source = heli_source(&mut resources);
        prefab.borrow_mut().clone_game_object(&source, &mut resources).unwrap();

        let mut instance = prefab.borrow().instantiate(&mut resources).unwrap();
        let tags = instance.component_tags();
        instance.break_prefab_link();

        assert!(instance.prefab().is_none());
        assert_eq!(instance.component_tags(), tags);
    }

    #[test]
    fn test_prefab_saved_and_spawned_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = ResourceManager::with_root(dir.path());
        let prefab = resources.create_resource::<Prefab>("Prefabs/Heli.prefab").unwrap();
        let source = heli_source(&mut resources);
        prefab.borrow_mut().clone_game_object(&source, &mut resources).unwrap();
        resources.save(&prefab).unwrap();
        assert!(fs::read_to_string(dir.path().join("Prefabs/Heli.prefab"))
            .unwrap()
            .contains("\"gameobject\""));

        let mut fresh = ResourceManager::with_root(dir.path());
        let config = SceneConfig::new().with_default_prefabs(["Prefabs/Heli.prefab", "Prefabs/Missing.prefab"]);
        let mut scene = SceneManager::with_config(config);
        let spawned = scene.spawn_default_objects(&mut fresh);

        assert_eq!(spawned.len(), 1);
        let heli = scene.get(spawned[0]).unwrap();
        assert_eq!(heli.name(), "Helicopter");
        assert_eq!(heli.component_tags(), vec!["Transform", "Helicopter", "StaticMesh"]);
        assert_eq!(heli.prefab(), Some(&ResourceId::new("Prefabs/Heli.prefab")));
        // The material document was never saved, so the reference resolves to nothing
        assert!(heli.find_component::<StaticMesh>().unwrap().material().is_none());
    }
}
