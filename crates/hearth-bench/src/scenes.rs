use hearth_core::types::ViewportMetrics;

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub document_height: f64,
    /// Mode to switch to before the first tick.
    pub mode: &'static str,
}

impl SceneConfig {
    pub fn viewport(&self) -> ViewportMetrics {
        ViewportMetrics::new(self.width, self.height, self.document_height)
    }
}

/// Return the standard suite of benchmark scenes, from a short desktop page
/// to a zero-size hidden tab.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "desktop",
            width: 1920.0,
            height: 1080.0,
            document_height: 1000.0,
            mode: "cycle",
        },
        SceneConfig {
            name: "desktop-long",
            width: 1920.0,
            height: 1080.0,
            document_height: 8000.0,
            mode: "cycle",
        },
        SceneConfig {
            name: "mobile",
            width: 390.0,
            height: 844.0,
            document_height: 3000.0,
            mode: "twilight",
        },
        SceneConfig {
            name: "4k",
            width: 3840.0,
            height: 2160.0,
            document_height: 2160.0,
            mode: "midnight",
        },
        SceneConfig {
            name: "hidden",
            width: 0.0,
            height: 0.0,
            document_height: 0.0,
            mode: "cycle",
        },
    ]
}

/// Look up scenes by name. Unknown names are returned in the error.
pub fn select_scenes(names: &[String]) -> Result<Vec<SceneConfig>, String> {
    if names.is_empty() {
        return Ok(standard_scenes());
    }
    let mut all = standard_scenes();
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let Some(pos) = all.iter().position(|s| s.name == name) else {
            return Err(name.clone());
        };
        selected.push(all.swap_remove(pos));
    }
    Ok(selected)
}
