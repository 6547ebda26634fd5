use crate::core::data::scene::SceneTable;

/// One line per scene: name, center and zoom.
pub fn scene_listing(scenes: &SceneTable) -> Vec<String> {
    scenes
        .iter()
        .map(|scene| {
            format!(
                "{:<12} center ({}, {})  zoom {}",
                scene.name, scene.center_x, scene.center_y, scene.zoom
            )
        })
        .collect()
}
