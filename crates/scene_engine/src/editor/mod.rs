//! Editor-facing interfaces

pub mod inspector;

pub use inspector::Inspector;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Prefab, Resource, ResourceId, ResourceManager, Scene};
    use crate::ecs::components::{Camera, Terrain};
    use crate::ecs::{Component, GameObject};
    use crate::foundation::math::{Vec2, Vec3, Vec4};
    use approx::assert_relative_eq;

    /// Records every widget label and presses the buttons it is told to
    #[derive(Default)]
    struct ScriptedInspector {
        labels: Vec<String>,
        texts: Vec<String>,
        press: Vec<&'static str>,
        set_floats: Vec<(&'static str, f32)>,
    }

    impl Inspector for ScriptedInspector {
        fn drag_f32(&mut self, label: &str, value: &mut f32, _speed: f32, min: f32, max: f32) -> bool {
            self.labels.push(label.to_string());
            match self.set_floats.iter().find(|(l, _)| *l == label) {
                Some((_, v)) => {
                    *value = v.clamp(min, max);
                    true
                }
                None => false,
            }
        }

        fn drag_i32(&mut self, label: &str, _value: &mut i32, _speed: f32) -> bool {
            self.labels.push(label.to_string());
            false
        }

        fn drag_vec2(&mut self, label: &str, _value: &mut Vec2, _speed: f32) -> bool {
            self.labels.push(label.to_string());
            false
        }

        fn drag_vec3(&mut self, label: &str, _value: &mut Vec3, _speed: f32) -> bool {
            self.labels.push(label.to_string());
            false
        }

        fn drag_vec4(&mut self, label: &str, _value: &mut Vec4, _speed: f32, _min: f32, _max: f32) -> bool {
            self.labels.push(label.to_string());
            false
        }

        fn checkbox(&mut self, label: &str, _value: &mut bool) -> bool {
            self.labels.push(label.to_string());
            false
        }

        fn edit_text(&mut self, label: &str, _value: &mut String) -> bool {
            self.labels.push(label.to_string());
            false
        }

        fn button(&mut self, label: &str) -> bool {
            self.labels.push(label.to_string());
            self.press.iter().any(|pressed| *pressed == label)
        }

        fn text(&mut self, text: &str) {
            self.texts.push(text.to_string());
        }

        fn collapsing_header(&mut self, label: &str) -> bool {
            self.labels.push(label.to_string());
            true
        }
    }

    #[test]
    fn test_gameobject_draws_every_component() {
        let mut go = GameObject::new("Cam");
        go.create_component::<Camera>();
        let mut ui = ScriptedInspector::default();

        go.draw_properties(&mut ui);

        for label in ["Name", "Transform", "Position", "Rotation", "Scale", "Camera", "FOV"] {
            assert!(ui.labels.iter().any(|l| l == label), "missing widget {label}");
        }
        assert!(!ui.labels.iter().any(|l| l == "Remove Transform"));
    }

    #[test]
    fn test_edits_are_applied_and_clamped() {
        let mut camera = Camera::default();
        let mut ui = ScriptedInspector {
            set_floats: vec![("FOV", 500.0)],
            ..Default::default()
        };

        camera.draw_properties(&mut ui);
        assert_relative_eq!(camera.fov(), 179.0);
    }

    #[test]
    fn test_remove_button_removes_component() {
        let mut go = GameObject::new("Cam");
        go.create_component::<Camera>();
        let mut ui = ScriptedInspector {
            press: vec!["Remove Camera"],
            ..Default::default()
        };

        go.draw_properties(&mut ui);
        assert_eq!(go.component_tags(), vec!["Transform"]);
    }

    #[test]
    fn test_terrain_regenerate_button() {
        let mut terrain = Terrain::default();
        terrain.set_heights(2, vec![0.0; 4]);
        let mut ui = ScriptedInspector {
            press: vec!["Regenerate"],
            ..Default::default()
        };

        terrain.draw_properties(&mut ui);
        assert!(terrain.needs_regeneration());
    }

    #[test]
    fn test_scene_panel_reports_gameobject_count() {
        let mut scene = Scene::new(ResourceId::new("Scenes/a.scene"));
        scene.set_game_objects(vec![GameObject::new("A"), GameObject::new("B")]);
        let mut ui = ScriptedInspector::default();

        scene.draw_editor(&mut ui);
        assert_eq!(ui.texts, vec!["Scene contains 2 gameobjects"]);
    }

    #[test]
    fn test_prefab_panel_edits_template() {
        let mut resources = ResourceManager::with_root(".");
        let mut source = GameObject::new("Cam");
        source.create_component::<Camera>();
        let mut prefab = Prefab::new(ResourceId::new("Prefabs/Cam.prefab"));
        prefab.clone_game_object(&source, &mut resources).unwrap();
        let mut ui = ScriptedInspector {
            set_floats: vec![("FOV", 85.0)],
            ..Default::default()
        };

        prefab.draw_editor(&mut ui);

        assert_eq!(ui.texts[0], "Prefab: Prefabs/Cam.prefab");
        assert!(!ui.labels.iter().any(|l| l == "Break Prefab Link"));
        let template_camera = prefab.template().find_component::<Camera>().unwrap();
        assert_relative_eq!(template_camera.fov(), 85.0);
        assert_relative_eq!(source.find_component::<Camera>().unwrap().fov(), 60.0);
    }
}
