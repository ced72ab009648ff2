use livemark_engine::{ColorParseError, EditorOptions, Palette, Rgb, Role, StyleRegistry};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid {palette} color for {role:?}: {source}")]
    InvalidColor {
        palette: &'static str,
        role: Role,
        source: ColorParseError,
    },
}

/// Contents of `config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub theme: ThemeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub debounce_ms: u64,
    pub bullet_glyph: char,
    pub carry_indent: bool,
    pub list_indent: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            debounce_ms: u64::try_from(options.debounce.as_millis()).unwrap_or(250),
            bullet_glyph: options.bullet_glyph,
            carry_indent: options.carry_indent,
            list_indent: options.list_indent,
        }
    }
}

impl EditorSettings {
    pub fn to_options(&self) -> EditorOptions {
        EditorOptions {
            debounce: Duration::from_millis(self.debounce_ms),
            bullet_glyph: self.bullet_glyph,
            carry_indent: self.carry_indent,
            list_indent: self.list_indent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Start with the dark palette.
    pub dark: bool,
    pub colors: PaletteOverrides,
}

/// `[theme.colors.dark]` and `[theme.colors.light]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    pub dark: ColorOverrides,
    pub light: ColorOverrides,
}

/// Optional `"#rrggbb"` replacement per role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoiler_cover: Option<String>,
}

impl ColorOverrides {
    fn get(&self, role: Role) -> Option<&str> {
        let value = match role {
            Role::Text => &self.text,
            Role::Muted => &self.muted,
            Role::Link => &self.link,
            Role::Marker => &self.marker,
            Role::Code => &self.code,
            Role::SpoilerCover => &self.spoiler_cover,
        };
        value.as_deref()
    }

    fn apply(&self, palette: &mut Palette, name: &'static str) -> Result<(), ConfigError> {
        for role in Role::ALL {
            let Some(hex) = self.get(role) else {
                continue;
            };
            let color = Rgb::from_hex(hex).map_err(|source| ConfigError::InvalidColor {
                palette: name,
                role,
                source,
            })?;
            palette.set(role, color);
        }
        Ok(())
    }
}

impl ThemeSettings {
    /// Builds the style registry: built-in palettes with overrides applied and
    /// the configured theme selected.
    pub fn registry(&self) -> Result<StyleRegistry, ConfigError> {
        let mut registry = StyleRegistry::default();
        self.colors.dark.apply(registry.palette_mut(true), "dark")?;
        self.colors.light.apply(registry.palette_mut(false), "light")?;
        registry.set_dark(self.dark);
        Ok(registry)
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/livemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/livemark/config.toml"));
    }

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = Config::default();
        assert_eq!(config.editor.to_options(), EditorOptions::default());
        assert!(!config.theme.dark);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let mut test_config = Config::default();
        test_config.editor.debounce_ms = 120;
        test_config.editor.bullet_glyph = '◦';
        test_config.theme.dark = true;
        test_config.theme.colors.light.link = Some("#112233".to_string());

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[editor]
list_indent = 4
"#,
        )
        .unwrap();

        assert_eq!(config.editor.list_indent, 4);
        assert_eq!(config.editor.debounce_ms, 250);
        assert_eq!(config.editor.bullet_glyph, '•');
        assert!(config.editor.carry_indent);
        assert_eq!(config.theme, ThemeSettings::default());
    }

    #[test]
    fn test_parse_error_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[editor\ndebounce_ms = ").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_color_overrides_apply_to_the_right_palette() {
        let config: Config = toml::from_str(
            r##"
[theme]
dark = true

[theme.colors.dark]
link = "#ff0000"

[theme.colors.light]
text = "#000000"
"##,
        )
        .unwrap();

        let registry = config.theme.registry().unwrap();

        assert!(registry.is_dark());
        assert_eq!(registry.color(Role::Link), Rgb::new(255, 0, 0));
        assert_eq!(registry.color(Role::Text), Palette::dark().text);

        let mut light = registry.clone();
        light.set_dark(false);
        assert_eq!(light.color(Role::Text), Rgb::new(0, 0, 0));
        assert_eq!(light.color(Role::Link), Palette::light().link);
    }

    #[test]
    fn test_bad_color_is_reported() {
        let mut theme = ThemeSettings::default();
        theme.colors.light.marker = Some("purple".to_string());

        let err = theme.registry().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidColor {
                palette: "light",
                role: Role::Marker,
                source: ColorParseError::MissingHash(_),
            }
        ));
    }

    #[test]
    fn test_unset_overrides_are_not_written() {
        let content = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!content.contains("link"));
        assert!(content.contains("debounce_ms = 250"));
    }
}
