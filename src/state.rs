/// Cross-component page state, owned by the app and passed by reference to
/// whoever needs to read it. Everything a component used to reach for out of
/// band lives here instead.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AppState {
    /// Smoothed document scroll position in pixels.
    pub scroll: f64,
    /// `scroll / scroll_limit`, clamped to 0..1.
    pub scroll_progress: f64,
    /// Id of the section currently owning the viewport.
    pub active_section: Option<String>,
    /// All background frames finished loading (failures included).
    pub images_ready: bool,
    /// The loading screen has fully left the stage.
    pub loading_done: bool,
    pub modal_open: bool,
    /// A text input has focus; keyboard navigation stands down.
    pub typing: bool,
}

impl AppState {
    pub fn section_is(&self, id: &str) -> bool {
        self.active_section.as_deref() == Some(id)
    }
}
