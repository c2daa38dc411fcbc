use swatch_core::{Bounds, Color};

const DOCUMENTATION: &str = r##"# Swatch settings. You may edit this file, but be aware that formatting and comments will not
# be preserved.

# `left`, `top`, `width` and `height` give the picker surface, in logical pixels.
# `colors` are laid out in rows of `columns`, written "#RRGGBB" or "#AARRGGBB".
# `initial` optionally preselects a color, which need not be one of `colors`.

"##;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

/// A [`Color`] stored as its hex string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Color);
impl TryFrom<String> for HexColor {
    type Error = swatch_core::color::ColorParseError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(Self)
    }
}
impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub columns: usize,
    pub colors: Vec<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<HexColor>,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
            columns: 4,
            colors: crate::grid::STANDARD_COLORS
                .into_iter()
                .map(|rgb| HexColor(Color::from_rgb(rgb)))
                .collect(),
            initial: None,
        }
    }
}
impl Settings {
    const FILENAME: &'static str = "settings.toml";
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.left + self.width, self.top + self.height)
    }
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().map(|c| c.0)
    }
    /// Read from the user's preferences, or defaults if that is unavailable for any reason.
    #[must_use]
    pub fn from_default_file() -> Self {
        let Some(mut path) = preferences_dir() else {
            log::warn!("No preferences dir found, using default settings.");
            return Self::default();
        };
        path.push(Self::FILENAME);
        Self::load_or_default(&path)
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Settings at {path:?} weren't available, defaulting. {err}");
                Self::default()
            }
        }
    }
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let settings: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let settings: Self = toml::from_str(&string)?;
            Ok(settings)
        };
        let settings = settings?;
        log::debug!("Loaded settings from {path:?}");
        Ok(settings)
    }
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let mut string = toml::ser::to_string_pretty(self)?;
        // Prefix some documentation.
        string = DOCUMENTATION.to_owned() + &string;
        std::fs::write(path, string)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{HexColor, Settings};
    use swatch_core::{Bounds, Color};

    #[test]
    fn partial_file() {
        let settings: Settings = toml::from_str(
            r##"
            left = 10.0
            width = 50.0
            colors = ["#FF0000", "80000000"]
            initial = "#00FF00"
            "##,
        )
        .unwrap();
        assert_eq!(settings.bounds(), Bounds::new(10.0, 0.0, 60.0, 100.0));
        assert_eq!(settings.columns, 4);
        assert_eq!(
            settings.colors().collect::<Vec<_>>(),
            [Color::from_rgb(0xFF0000), Color::from_argb(0x8000_0000)]
        );
        assert_eq!(settings.initial, Some(HexColor(Color::from_rgb(0x00FF00))));
    }
    #[test]
    fn bad_color() {
        let err = toml::from_str::<Settings>(r##"colors = ["#FF"]"##).unwrap_err();
        assert!(err.to_string().contains("hex digits"), "{err}");
    }
    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("swatch-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");

        let settings = Settings {
            columns: 2,
            initial: Some(HexColor(Color::WHITE)),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);

        std::fs::remove_dir_all(&dir).unwrap();
        // Missing file falls back.
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
