use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::marquee::MarqueeItem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
    /// Content shown in the marquee, in order
    #[serde(default = "default_items")]
    pub items: Vec<MarqueeItem>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            marquee: MarqueeConfig::default(),
            ui: UiConfig::default(),
            keymap: KeymapConfig::default(),
            items: default_items(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Scroll direction of the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Content travels towards the left edge
    #[default]
    Left,
    /// Content travels towards the right edge
    Right,
}

impl Direction {
    /// Sign applied to the configured speed
    #[inline]
    pub fn multiplier(self) -> f64 {
        match self {
            Direction::Left => 1.0,
            Direction::Right => -1.0,
        }
    }

    /// Signed velocity for a configured speed: `|speed| * direction * sign(speed)`
    pub fn signed_speed(self, speed: f64) -> f64 {
        let speed_sign = if speed < 0.0 { -1.0 } else { 1.0 };
        speed.abs() * self.multiplier() * speed_sign
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Width of the marquee container: a fixed column count or a percentage
/// of the space available to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerWidth {
    Columns(u16),
    Percent(f32),
}

impl Default for ContainerWidth {
    fn default() -> Self {
        ContainerWidth::Percent(100.0)
    }
}

impl ContainerWidth {
    /// Parse `"100%"`, `"80"` or `"80px"`
    pub fn parse(value: &str) -> crate::Result<Self> {
        let value = value.trim();
        if let Some(pct) = value.strip_suffix('%') {
            let pct: f32 = pct
                .trim()
                .parse()
                .map_err(|_| crate::Error::InvalidLength(value.to_string()))?;
            if !pct.is_finite() || pct < 0.0 {
                return Err(crate::Error::InvalidLength(value.to_string()));
            }
            return Ok(ContainerWidth::Percent(pct));
        }

        let digits = value.strip_suffix("px").unwrap_or(value).trim();
        digits
            .parse::<u16>()
            .map(ContainerWidth::Columns)
            .map_err(|_| crate::Error::InvalidLength(value.to_string()))
    }

    /// Resolve against the available width, never exceeding it
    pub fn resolve(&self, available: u16) -> u16 {
        match *self {
            ContainerWidth::Columns(cols) => cols.min(available),
            ContainerWidth::Percent(pct) => {
                let cols = (available as f32 * pct / 100.0).round();
                (cols.max(0.0) as u16).min(available)
            }
        }
    }
}

impl fmt::Display for ContainerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerWidth::Columns(cols) => write!(f, "{}", cols),
            ContainerWidth::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

impl Serialize for ContainerWidth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// Accept either a bare number of columns or a length string
impl<'de> Deserialize<'de> for ContainerWidth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ContainerWidthVisitor;

        impl<'de> Visitor<'de> for ContainerWidthVisitor {
            type Value = ContainerWidth;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a column count or a length string such as \"100%\"")
            }

            fn visit_u64<E>(self, value: u64) -> Result<ContainerWidth, E>
            where
                E: de::Error,
            {
                u16::try_from(value)
                    .map(ContainerWidth::Columns)
                    .map_err(|_| E::custom(format!("width {} out of range", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<ContainerWidth, E>
            where
                E: de::Error,
            {
                u16::try_from(value)
                    .map(ContainerWidth::Columns)
                    .map_err(|_| E::custom(format!("width {} out of range", value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<ContainerWidth, E>
            where
                E: de::Error,
            {
                ContainerWidth::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ContainerWidthVisitor)
    }
}

/// Marquee behaviour and appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Signed base speed in columns per second
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub width: ContainerWidth,
    /// Rows used by one item
    #[serde(default = "default_item_height")]
    pub item_height: u16,
    /// Columns between items
    #[serde(default = "default_gap")]
    pub gap: u16,
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    /// Blend the left and right edges into the fade colour
    #[serde(default)]
    pub fade_out: bool,
    /// Hex colour for the edge fade; follows the theme mode when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_out_color: Option<String>,
    /// Emphasise the item under the pointer
    #[serde(default)]
    pub scale_on_hover: bool,
    /// Accessible name of the marquee region
    #[serde(default = "default_aria_label")]
    pub aria_label: String,
    #[serde(default = "default_min_copies")]
    pub min_copies: usize,
    /// Extra copies beyond what the container needs
    #[serde(default = "default_copy_headroom")]
    pub copy_headroom: usize,
    /// Velocity smoothing time constant in seconds
    #[serde(default = "default_smoothing_tau")]
    pub smoothing_tau: f64,
    /// Keep the strip static
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            direction: Direction::default(),
            width: ContainerWidth::default(),
            item_height: default_item_height(),
            gap: default_gap(),
            pause_on_hover: default_true(),
            fade_out: false,
            fade_out_color: None,
            scale_on_hover: false,
            aria_label: default_aria_label(),
            min_copies: default_min_copies(),
            copy_headroom: default_copy_headroom(),
            smoothing_tau: default_smoothing_tau(),
            reduced_motion: false,
        }
    }
}

/// Tallest item the terminal front end will lay out
pub const MAX_ITEM_HEIGHT: u16 = 64;

impl MarqueeConfig {
    /// Steady-state velocity the integrator smooths towards when not paused
    pub fn target_velocity(&self) -> f64 {
        self.direction.signed_speed(self.speed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval when no animation is running
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate of the animation loop
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Measure on container/sequence width changes; when off, only
    /// terminal resize events trigger a measurement
    #[serde(default = "default_true")]
    pub observe_resize: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            observe_resize: true,
            theme: ThemeConfig::default(),
        }
    }
}

/// Light or dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme family) or as a map with a mode
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme family (e.g., "gruvbox", "solarized")
    pub name: String,
    /// Initial light/dark mode
    pub mode: ThemeMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            mode: ThemeMode::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'mode'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    mode: ThemeMode::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut mode: Option<ThemeMode> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "mode" => mode = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    mode: mode.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox".to_string()
}

/// Keymap configuration using Vim-style notation
/// Format: "t", "<C-c>", "<Space>", "<CR>", "+"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Flip between light and dark mode
    #[serde(default = "default_key_toggle_theme")]
    pub toggle_theme: String,
    /// Hold the strip as if hovered
    #[serde(default = "default_key_toggle_pause")]
    pub toggle_pause: String,
    /// Switch reduced motion on or off
    #[serde(default = "default_key_toggle_reduced_motion")]
    pub toggle_reduced_motion: String,
    /// Swap left/right direction
    #[serde(default = "default_key_reverse_direction")]
    pub reverse_direction: String,
    #[serde(default = "default_key_speed_up")]
    pub speed_up: String,
    #[serde(default = "default_key_speed_down")]
    pub speed_down: String,
    /// Open the hovered item's link in the browser
    #[serde(default = "default_key_open_link")]
    pub open_link: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            toggle_theme: default_key_toggle_theme(),
            toggle_pause: default_key_toggle_pause(),
            toggle_reduced_motion: default_key_toggle_reduced_motion(),
            reverse_direction: default_key_reverse_direction(),
            speed_up: default_key_speed_up(),
            speed_down: default_key_speed_down(),
            open_link: default_key_open_link(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_toggle_theme() -> String { "t".to_string() }
fn default_key_toggle_pause() -> String { "<Space>".to_string() }
fn default_key_toggle_reduced_motion() -> String { "m".to_string() }
fn default_key_reverse_direction() -> String { "r".to_string() }
fn default_key_speed_up() -> String { "+".to_string() }
fn default_key_speed_down() -> String { "-".to_string() }
fn default_key_open_link() -> String { "<CR>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logoloop")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_speed() -> f64 {
    120.0
}

fn default_item_height() -> u16 {
    1
}

fn default_gap() -> u16 {
    4
}

fn default_aria_label() -> String {
    "Partner logos".to_string()
}

fn default_min_copies() -> usize {
    2
}

fn default_copy_headroom() -> usize {
    2
}

fn default_smoothing_tau() -> f64 {
    0.25
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

const SKILL_ICONS: &[(&str, &str)] = &[
    ("react", "React"),
    ("nextjs", "Next.js"),
    ("angular", "Angular"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("js", "JavaScript"),
    ("tailwind", "Tailwind"),
    ("bootstrap", "Bootstrap"),
    ("nodejs", "Node.js"),
    ("php", "PHP"),
    ("laravel", "Laravel"),
    ("dotnet", ".NET"),
    ("cs", "C#"),
    ("mongodb", "MongoDB"),
    ("mysql", "MySQL"),
    ("c", "C"),
    ("cpp", "C++"),
    ("java", "Java"),
    ("azure", "Azure"),
    ("figma", "Figma"),
];

fn default_items() -> Vec<MarqueeItem> {
    SKILL_ICONS
        .iter()
        .map(|(icon, name)| {
            MarqueeItem::media(format!("https://skillicons.dev/icons?i={}&theme=dark", icon))
                .with_alt(*name)
                .with_title(*name)
        })
        .collect()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let m = &self.marquee;
        if m.min_copies < 1 {
            return Err(crate::Error::Config("marquee.min_copies must be at least 1".into()));
        }
        if !(m.smoothing_tau.is_finite() && m.smoothing_tau > 0.0) {
            return Err(crate::Error::Config(format!(
                "marquee.smoothing_tau must be a positive number, got {}",
                m.smoothing_tau
            )));
        }
        if !m.speed.is_finite() {
            return Err(crate::Error::Config("marquee.speed must be finite".into()));
        }
        if m.item_height > MAX_ITEM_HEIGHT {
            return Err(crate::Error::Config(format!(
                "marquee.item_height must be at most {}, got {}",
                MAX_ITEM_HEIGHT, m.item_height
            )));
        }
        if let Some(ref color) = m.fade_out_color {
            let hex = color.trim().trim_start_matches('#');
            let is_hex = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
            if !is_hex {
                return Err(crate::Error::Config(format!(
                    "marquee.fade_out_color is not a hex colour: {}",
                    color
                )));
            }
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/logoloop/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("logoloop")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("logoloop.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
