//! Application configuration structures.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{DataCentre, Role, RoleCategory, SlotCategory};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listings page to scrape
    pub url: String,

    /// Discord bot token
    pub token: String,

    /// Seconds to sleep between refresh cycles
    #[serde(default = "defaults::period")]
    pub period_secs: u64,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Message rendering settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Listings kept up to date in Discord
    #[serde(default)]
    pub listings: Vec<TrackedListing>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Write configuration to a TOML file, replacing it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Look up a tracked listing by its unique name.
    pub fn listing(&self, name: &str) -> Option<&TrackedListing> {
        self.listings.iter().find(|l| l.name == name)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(AppError::validation("url is empty"));
        }
        url::Url::parse(&self.url)?;
        if self.token.trim().is_empty() {
            return Err(AppError::validation("token is empty"));
        }
        if self.period_secs == 0 {
            return Err(AppError::validation("period_secs must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        self.display.glyphs.validate()?;

        let mut names = HashSet::new();
        for listing in &self.listings {
            listing.validate()?;
            if !names.insert(listing.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate listing name '{}'",
                    listing.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: defaults::url(),
            token: defaults::token(),
            period_secs: defaults::period(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            display: DisplayConfig::default(),
            listings: Vec::new(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// A (duty, data centre) filter bound to a Discord message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedListing {
    /// Unique, not shown anywhere (e.g. `ChaosM4S`)
    pub name: String,

    /// Exact duty name to match
    pub duty_name: String,

    pub data_centre: DataCentre,

    pub channel_id: u64,

    /// Message kept up to date; 0 until one has been posted
    #[serde(default)]
    pub message_id: u64,
}

impl TrackedListing {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("listing name is empty"));
        }
        if self.duty_name.trim().is_empty() {
            return Err(AppError::validation(format!(
                "listing '{}' has an empty duty_name",
                self.name
            )));
        }
        if self.channel_id == 0 {
            return Err(AppError::validation(format!(
                "listing '{}' has no channel_id",
                self.name
            )));
        }
        Ok(())
    }
}

/// Message rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Accent color of the posted embed
    pub color: u32,

    /// Shown when no listing matches
    pub empty_message: String,

    /// Prefix of the "last updated" stamp
    pub updated_glyph: String,

    /// Prefix of the "expires" stamp
    pub expires_glyph: String,

    pub glyphs: GlyphConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: defaults::color(),
            empty_message: defaults::empty_message(),
            updated_glyph: "🕑".to_string(),
            expires_glyph: "⏳".to_string(),
            glyphs: GlyphConfig::default(),
        }
    }
}

/// Glyphs used to draw a party roster.
///
/// Every table is required except `roles`, which only overrides jobs that
/// deserve their own glyph. Custom Discord emoji (`<:name:id>`) work as well
/// as plain unicode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphConfig {
    /// Open slot accepting dps, healers and tanks alike
    pub any: String,

    /// Catch-all for anything that cannot be classified
    pub other: String,

    /// Keyed by exact job code (`WHM`, `PCT`, ...)
    #[serde(default)]
    pub roles: BTreeMap<String, String>,

    pub role_categories: RoleCategoryGlyphs,

    pub slot_categories: SlotCategoryGlyphs,

    pub pairs: PairGlyphs,
}

impl GlyphConfig {
    /// Glyph configured for this exact job, if any.
    pub fn role(&self, role: &Role) -> Option<&str> {
        self.roles.get(role.as_str()).map(String::as_str)
    }

    pub fn role_category(&self, category: RoleCategory) -> Option<&str> {
        let g = &self.role_categories;
        let glyph = match category {
            RoleCategory::Tank => &g.tank,
            RoleCategory::RegenHealer => &g.regen_healer,
            RoleCategory::ShieldHealer => &g.shield_healer,
            RoleCategory::MeleeDps => &g.melee_dps,
            RoleCategory::RangedDps => &g.ranged_dps,
            RoleCategory::MagicalDps => &g.magical_dps,
            RoleCategory::Other => return None,
        };
        Some(glyph.as_str())
    }

    pub fn slot_category(&self, category: SlotCategory) -> Option<&str> {
        let g = &self.slot_categories;
        let glyph = match category {
            SlotCategory::Dps => &g.dps,
            SlotCategory::Healer => &g.healer,
            SlotCategory::Tank => &g.tank,
            SlotCategory::Other => return None,
        };
        Some(glyph.as_str())
    }

    /// Glyph for an unordered pair of distinct slot categories.
    pub fn pair(&self, a: SlotCategory, b: SlotCategory) -> Option<&str> {
        use SlotCategory::{Dps, Healer, Tank};

        let g = &self.pairs;
        let glyph = match (a.min(b), a.max(b)) {
            (Dps, Healer) => &g.dps_healer,
            (Dps, Tank) => &g.dps_tank,
            (Healer, Tank) => &g.healer_tank,
            _ => return None,
        };
        Some(glyph.as_str())
    }

    fn validate(&self) -> Result<()> {
        let rc = &self.role_categories;
        let sc = &self.slot_categories;
        let p = &self.pairs;
        let required = [
            ("any", &self.any),
            ("other", &self.other),
            ("role_categories.tank", &rc.tank),
            ("role_categories.regen_healer", &rc.regen_healer),
            ("role_categories.shield_healer", &rc.shield_healer),
            ("role_categories.melee_dps", &rc.melee_dps),
            ("role_categories.ranged_dps", &rc.ranged_dps),
            ("role_categories.magical_dps", &rc.magical_dps),
            ("slot_categories.dps", &sc.dps),
            ("slot_categories.healer", &sc.healer),
            ("slot_categories.tank", &sc.tank),
            ("pairs.dps_healer", &p.dps_healer),
            ("pairs.dps_tank", &p.dps_tank),
            ("pairs.healer_tank", &p.healer_tank),
        ];
        for (key, glyph) in required {
            if glyph.trim().is_empty() {
                return Err(AppError::validation(format!("display.glyphs.{key} is empty")));
            }
        }
        for (job, glyph) in &self.roles {
            if glyph.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "display.glyphs.roles.{job} is empty"
                )));
            }
        }
        Ok(())
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            any: "🤍".to_string(),
            other: "🩶".to_string(),
            roles: defaults::role_glyphs(),
            role_categories: RoleCategoryGlyphs {
                tank: "💙".to_string(),
                regen_healer: "💚".to_string(),
                shield_healer: "💛".to_string(),
                melee_dps: "❤️".to_string(),
                ranged_dps: "🧡".to_string(),
                magical_dps: "💜".to_string(),
            },
            slot_categories: SlotCategoryGlyphs {
                dps: "❤️".to_string(),
                healer: "💚".to_string(),
                tank: "💙".to_string(),
            },
            pairs: PairGlyphs {
                dps_healer: "🤎".to_string(),
                dps_tank: "🩷".to_string(),
                healer_tank: "🩵".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCategoryGlyphs {
    pub tank: String,
    pub regen_healer: String,
    pub shield_healer: String,
    pub melee_dps: String,
    pub ranged_dps: String,
    pub magical_dps: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCategoryGlyphs {
    pub dps: String,
    pub healer: String,
    pub tank: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairGlyphs {
    pub dps_healer: String,
    pub dps_tank: String,
    pub healer_tank: String,
}

mod defaults {
    use std::collections::BTreeMap;

    use crate::models::{Job, KnownValue, Role, SlotCategory, slot_category};

    pub fn url() -> String {
        "https://xivpf.com/listings".into()
    }
    pub fn token() -> String {
        "ENTER THE BOT TOKEN HERE".into()
    }
    pub fn period() -> u64 {
        30
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; pfwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn log_level() -> String {
        "info".into()
    }

    // Display defaults
    pub fn color() -> u32 {
        0xB7406A
    }
    pub fn empty_message() -> String {
        "No party finders! Please, open one! 😡".into()
    }

    /// Every combat job drawn as a pink heart until real emoji are configured.
    pub fn role_glyphs() -> BTreeMap<String, String> {
        Job::ALL
            .iter()
            .filter(|job| slot_category(&Role::Known(**job)) != SlotCategory::Other)
            .map(|job| (job.as_str().to_string(), "💖".to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked(name: &str) -> TrackedListing {
        TrackedListing {
            name: name.to_string(),
            duty_name: "AAC Light-heavyweight M4 (Savage)".to_string(),
            data_centre: DataCentre::Chaos,
            channel_id: 946078742357364786,
            message_id: 0,
        }
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_period() {
        let mut config = Config::default();
        config.period_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = Config::default();
        config.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let mut config = Config::default();
        config.listings = vec![tracked("a"), tracked("a")];
        assert!(config.validate().is_err());

        config.listings = vec![tracked("a"), tracked("b")];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_channel() {
        let mut config = Config::default();
        let mut listing = tracked("a");
        listing.channel_id = 0;
        config.listings.push(listing);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_glyph() {
        let mut config = Config::default();
        config.display.glyphs.pairs.dps_tank = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pair_lookup_is_symmetric() {
        let glyphs = GlyphConfig::default();
        assert_eq!(
            glyphs.pair(SlotCategory::Tank, SlotCategory::Dps),
            glyphs.pair(SlotCategory::Dps, SlotCategory::Tank)
        );
        assert_eq!(glyphs.pair(SlotCategory::Dps, SlotCategory::Tank), Some("🩷"));
        assert_eq!(glyphs.pair(SlotCategory::Dps, SlotCategory::Other), None);
        assert_eq!(glyphs.pair(SlotCategory::Dps, SlotCategory::Dps), None);
    }

    #[test]
    fn test_default_role_glyphs_skip_crafters() {
        let glyphs = GlyphConfig::default();
        assert!(glyphs.roles.contains_key("WHM"));
        assert!(!glyphs.roles.contains_key("CUL"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.listings.push(tracked("ChaosM4S"));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.listings, config.listings);
        assert_eq!(loaded.display.color, 0xB7406A);
        assert_eq!(loaded.display.glyphs.roles, config.display.glyphs.roles);
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            url = "https://example.com/listings"
            token = "secret"

            [[listings]]
            name = "a"
            duty_name = "Raid"
            data_centre = "Crystal"
            channel_id = 12345
            message_id = 67890
            "#,
        )
        .unwrap();
        assert_eq!(config.period_secs, 30);
        assert_eq!(config.listings[0].data_centre, DataCentre::Crystal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_data_centre_rejected() {
        let result: std::result::Result<TrackedListing, _> = toml::from_str(
            r#"
            name = "a"
            duty_name = "Raid"
            data_centre = "Nowhere"
            channel_id = 1
            "#,
        );
        assert!(result.is_err());
    }
}
