/// Startup parameters. There is no config file; the defaults are the
/// deployed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Id of the canvas to render into. Created and appended to `<body>` when
    /// the page doesn't already have one.
    pub canvas_id: String,
    pub image_uri: String,
    pub offsets_uri: String,
    pub vertex_shader_uri: String,
    pub fragment_shader_uri: String,
    pub log_level: log::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_id: "c".to_string(),
            image_uri: "/static/faces/1.jpg".to_string(),
            // Same asset: the shader reads displacement from the photo itself.
            offsets_uri: "/static/faces/1.jpg".to_string(),
            vertex_shader_uri: "vertex.glsl".to_string(),
            fragment_shader_uri: "fragment.glsl".to_string(),
            log_level: log::Level::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_uris_match_the_served_layout() {
        // The dev server serves the crate root (dist/ mirrors it), with the page
        // under /static/; shader URIs are relative to the page.
        let config = Config::default();
        let site = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
        assert!(site.join("index.html").exists());
        assert!(site.join(&config.vertex_shader_uri).exists());
        assert!(site.join(&config.fragment_shader_uri).exists());
        assert!(config.image_uri.starts_with("/static/"));
        assert!(config.offsets_uri.starts_with("/static/"));
    }
}
