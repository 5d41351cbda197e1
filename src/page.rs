use crate::error::{StradaError, StradaResult};

/// Declarative description of the page: the section stack, the backdrop
/// frame sequence, and the navigation order. Everything downstream (layout,
/// choreography, rendering) is derived from this plus a viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    pub sections: Vec<Section>,
    pub frames: FrameSequence,
    /// Section ids reachable from the navbar and keyboard, in order.
    pub nav: Vec<String>,
}

/// One vertical slab of the page. `pin_px` > 0 holds the section fixed in the
/// viewport for that many pixels of scroll while its timeline scrubs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub id: String,
    pub height_vh: f64,
    pub pin_px: f64,
}

/// An ordered image sequence standing in for video, scrubbed by scroll.
/// Files are numbered 1-based with zero padding: `dir/prefix0421.ext`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSequence {
    pub count: usize,
    pub directory: String,
    pub prefix: String,
    pub digits: usize,
    pub extension: String,
    /// Scroll distance over which the sequence plays, in viewport-height
    /// units (400 = four viewports).
    pub window_vh: f64,
}

impl FrameSequence {
    /// Relative path for the 0-based frame `index`.
    pub fn path(&self, index: usize) -> String {
        format!(
            "{}/{}{:0width$}.{}",
            self.directory,
            self.prefix,
            index + 1,
            self.extension,
            width = self.digits
        )
    }

    pub fn validate(&self) -> StradaResult<()> {
        if self.count == 0 {
            return Err(StradaError::validation("FrameSequence count must be > 0"));
        }
        if self.digits == 0 {
            return Err(StradaError::validation("FrameSequence digits must be > 0"));
        }
        if !(self.window_vh > 0.0) {
            return Err(StradaError::validation(
                "FrameSequence window_vh must be > 0",
            ));
        }
        Ok(())
    }
}

impl Page {
    pub fn validate(&self) -> StradaResult<()> {
        if self.sections.is_empty() {
            return Err(StradaError::validation("Page must have at least one section"));
        }
        let mut seen = std::collections::BTreeSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(StradaError::validation("Section id must be non-empty"));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(StradaError::validation(format!(
                    "duplicate section id: {}",
                    section.id
                )));
            }
            if !(section.height_vh > 0.0) {
                return Err(StradaError::validation(format!(
                    "section {}: height_vh must be > 0",
                    section.id
                )));
            }
            if section.pin_px < 0.0 {
                return Err(StradaError::validation(format!(
                    "section {}: pin_px must be >= 0",
                    section.id
                )));
            }
        }
        for id in &self.nav {
            if !seen.contains(id.as_str()) {
                return Err(StradaError::validation(format!(
                    "nav references unknown section: {id}"
                )));
            }
        }
        self.frames.validate()
    }

    pub fn from_json(json: &str) -> StradaResult<Self> {
        let page: Page =
            serde_json::from_str(json).map_err(|e| StradaError::serde(e.to_string()))?;
        page.validate()?;
        Ok(page)
    }

    pub fn to_json(&self) -> StradaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StradaError::serde(e.to_string()))
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// The built-in showcase page: a 500vh hero over the frame sequence, two
/// pinned sections, and a short footer.
pub fn showcase_page() -> Page {
    Page {
        sections: vec![
            Section {
                id: "hero".to_string(),
                height_vh: 500.0,
                pin_px: 0.0,
            },
            Section {
                id: "history".to_string(),
                height_vh: 100.0,
                pin_px: 3000.0,
            },
            Section {
                id: "racing".to_string(),
                height_vh: 100.0,
                pin_px: 0.0,
            },
            Section {
                id: "models".to_string(),
                height_vh: 100.0,
                pin_px: 3000.0,
            },
            Section {
                id: "footer".to_string(),
                height_vh: 20.0,
                pin_px: 0.0,
            },
        ],
        frames: FrameSequence {
            count: 192,
            directory: "frames".to_string(),
            prefix: "frame-".to_string(),
            digits: 3,
            extension: "jpg".to_string(),
            window_vh: 400.0,
        },
        nav: vec![
            "hero".to_string(),
            "history".to_string(),
            "racing".to_string(),
            "models".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showcase_page_validates() {
        showcase_page().validate().unwrap();
    }

    #[test]
    fn frame_paths_are_one_based_and_padded() {
        let frames = showcase_page().frames;
        assert_eq!(frames.path(0), "frames/frame-001.jpg");
        assert_eq!(frames.path(9), "frames/frame-010.jpg");
        assert_eq!(frames.path(191), "frames/frame-192.jpg");
    }

    #[test]
    fn duplicate_section_ids_are_rejected() {
        let mut page = showcase_page();
        page.sections[1].id = "hero".to_string();
        assert!(page.validate().is_err());
    }

    #[test]
    fn nav_must_reference_known_sections() {
        let mut page = showcase_page();
        page.nav.push("garage".to_string());
        assert!(page.validate().is_err());
    }

    #[test]
    fn json_roundtrip() {
        let page = showcase_page();
        let json = page.to_json().unwrap();
        let back = Page::from_json(&json).unwrap();
        assert_eq!(page, back);
    }
}
