//! Headless editor session
//!
//! Loads `editor.toml`, spawns the default prefabs, drives a fixed number of
//! frames and saves the live set as the session scene.

use std::error::Error;
use std::time::Duration;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;

const CONFIG_PATH: &str = "editor.toml";

fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    let config = ApplicationConfig::load_or_default(&config_path)?;
    config.validate()?;
    logging::init_with_level(&config.engine.log_level);

    log::info!("Starting headless editor session ({config_path})");

    let result = run(&config);
    match &result {
        Ok(()) => log::info!("Editor session completed successfully"),
        Err(e) => log::error!("Editor session failed: {e}"),
    }
    result
}

fn run(config: &ApplicationConfig) -> Result<(), Box<dyn Error>> {
    let mut resources = ResourceManager::new(&config.assets);
    let mut scene = SceneManager::with_config(config.scene.clone());
    scene.spawn_default_objects(&mut resources);

    let helicopter = scene.components::<Helicopter>().first().map(|entry| entry.id);
    match helicopter {
        Some(id) => {
            if let Some(heli) = scene.get_mut(id).and_then(GameObject::find_component_mut::<Helicopter>) {
                heli.set_throttle(1.0);
                heli.set_steering(0.25);
            }

            let turret = scene.create_game_object_with("Turret", "StaticTurret", None)?;
            if let Some(aim) = scene.get_mut(turret).and_then(GameObject::find_component_mut::<StaticTurret>) {
                aim.add_target(id);
            }
        }
        None => log::warn!("No helicopter in the default prefabs, nothing to track"),
    }

    let frame_budget = config.engine.target_fps.map(|fps| Duration::from_secs_f32(1.0 / fps as f32));
    let mut timer = Timer::new();
    for _ in 0..config.engine.headless_frames {
        let stopwatch = Stopwatch::start_new();
        match config.engine.fixed_delta_time {
            Some(step) => timer.advance(step),
            None => timer.update(),
        }
        scene.frame_start(timer.delta_time());

        if let Some(budget) = frame_budget {
            if let Some(remaining) = budget.checked_sub(stopwatch.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    let stats = scene.stats();
    log::info!(
        "Ran {} frame(s) over {:.2}s: {} gameobject(s), {} component(s), last update {}us",
        stats.frame_count,
        timer.total_time(),
        stats.game_object_count,
        stats.component_count,
        stats.update_time_us
    );
    for entry in scene.components::<StaticTurret>() {
        log::info!(
            "'{}' aimed {:.1} degrees off rest",
            entry.game_object.name(),
            entry.component.aim_angle()
        );
    }

    let session = resources.create_resource::<Scene>(config.scene.session_scene.as_str())?;
    scene.capture_scene(&mut session.borrow_mut());
    resources.save(&session)?;
    log::info!("Saved session scene to {}", resources.path_of(session.id()).display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn shipped_resources() -> ResourceManager {
        ResourceManager::with_root(Path::new(env!("CARGO_MANIFEST_DIR")).join("resources"))
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CONFIG_PATH);
        let config = ApplicationConfig::load_from_file(path).unwrap();
        config.validate().unwrap();
        assert_eq!(config.scene.default_prefabs.len(), 3);
    }

    #[test]
    fn test_shipped_prefabs_spawn() {
        let mut resources = shipped_resources();
        let mut scene = SceneManager::new();

        let spawned = scene.spawn_default_objects(&mut resources);
        assert_eq!(spawned.len(), 3);

        assert!(scene.main_camera().is_some());
        assert_eq!(scene.terrains()[0].component.layers().len(), 2);
        assert!(scene.static_meshes()[0].component.is_renderable());
        // Materials are shared between the prefab template and its instance
        assert!(resources.contains(&ResourceId::new("Materials/helicopter.material")));
    }

    #[test]
    fn test_turret_tracks_flying_helicopter() {
        let mut resources = shipped_resources();
        let mut scene = SceneManager::new();
        scene.spawn_default_objects(&mut resources);

        let heli = scene.find_by_name("Helicopter").unwrap();
        scene
            .get_mut(heli)
            .and_then(GameObject::find_component_mut::<Helicopter>)
            .unwrap()
            .set_throttle(1.0);
        let turret = scene.create_game_object_with("Turret", "StaticTurret", None).unwrap();
        scene
            .get_mut(turret)
            .and_then(GameObject::find_component_mut::<StaticTurret>)
            .unwrap()
            .add_target(heli);

        for _ in 0..120 {
            scene.frame_start(1.0 / 60.0);
        }

        assert_eq!(scene.stats().frame_count, 120);
        let heli_pos = scene.get(heli).unwrap().transform().position_local();
        assert!(heli_pos.z < 0.0, "helicopter should fly forwards, got {heli_pos}");
    }
}
