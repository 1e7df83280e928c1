//! Page wiring knobs.
//!
//! Every field has a default matching the movie site's templates, so an absent
//! or partial config block behaves like no config at all.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound for `max_stars`. Keeps `Rating` arithmetic comfortably in range.
pub const MAX_STARS_LIMIT: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WidgetConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_input_id"))]
    pub input_id: String,
    /// Class on the input that means "this page builds its own widget".
    #[cfg_attr(feature = "serde", serde(default = "default_manual_marker_class"))]
    pub manual_marker_class: String,
    #[cfg_attr(feature = "serde", serde(default = "default_dedicated_container_ids"))]
    pub dedicated_container_ids: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stars"))]
    pub max_stars: u8,
    #[cfg_attr(feature = "serde", serde(default = "default_container_class"))]
    pub container_class: String,
    #[cfg_attr(feature = "serde", serde(default = "default_star_class"))]
    pub star_class: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_username_field_id"))]
    pub username_field_id: String,
    #[cfg_attr(feature = "serde", serde(default = "default_csrf_meta_name"))]
    pub csrf_meta_name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_login_endpoint"))]
    pub login_endpoint: String,
    #[cfg_attr(feature = "serde", serde(default = "default_register_endpoint"))]
    pub register_endpoint: String,
    /// Abort a submission that has not answered after this long.
    #[cfg_attr(feature = "serde", serde(default = "default_timeout_ms"))]
    pub timeout_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClientConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub widget: WidgetConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub auth: AuthConfig,
}

fn default_input_id() -> String {
    "rating".to_string()
}

fn default_manual_marker_class() -> String {
    "form-input-hidden".to_string()
}

fn default_dedicated_container_ids() -> Vec<String> {
    vec![
        "star-rating-interactive".to_string(),
        "interactive-star-rating-widget".to_string(),
    ]
}

fn default_max_stars() -> u8 {
    5
}

fn default_container_class() -> String {
    "star-rating".to_string()
}

fn default_star_class() -> String {
    "star".to_string()
}

fn default_username_field_id() -> String {
    "username".to_string()
}

fn default_csrf_meta_name() -> String {
    "csrf-token".to_string()
}

fn default_login_endpoint() -> String {
    "/login".to_string()
}

fn default_register_endpoint() -> String {
    "/register".to_string()
}

fn default_timeout_ms() -> u32 {
    10_000
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            input_id: default_input_id(),
            manual_marker_class: default_manual_marker_class(),
            dedicated_container_ids: default_dedicated_container_ids(),
            max_stars: default_max_stars(),
            container_class: default_container_class(),
            star_class: default_star_class(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username_field_id: default_username_field_id(),
            csrf_meta_name: default_csrf_meta_name(),
            login_endpoint: default_login_endpoint(),
            register_endpoint: default_register_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientConfig {
    #[cfg(feature = "serde")]
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ClientConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.widget;
        if w.max_stars == 0 || w.max_stars > MAX_STARS_LIMIT {
            return Err(ConfigError::MaxStarsOutOfRange {
                got: w.max_stars,
                max: MAX_STARS_LIMIT,
            });
        }

        if self.auth.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let required = [
            ("widget.input_id", &w.input_id),
            ("widget.star_class", &w.star_class),
            ("widget.container_class", &w.container_class),
            ("auth.username_field_id", &self.auth.username_field_id),
            ("auth.csrf_meta_name", &self.auth.csrf_meta_name),
            ("auth.login_endpoint", &self.auth.login_endpoint),
            ("auth.register_endpoint", &self.auth.register_endpoint),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_templates() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.widget.input_id, "rating");
        assert_eq!(cfg.widget.manual_marker_class, "form-input-hidden");
        assert_eq!(
            cfg.widget.dedicated_container_ids,
            ["star-rating-interactive", "interactive-star-rating-widget"]
        );
        assert_eq!(cfg.widget.max_stars, 5);
        assert_eq!(cfg.auth.login_endpoint, "/login");
        assert_eq!(cfg.auth.register_endpoint, "/register");
        assert_eq!(cfg.auth.csrf_meta_name, "csrf-token");
        assert!(cfg.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg =
            ClientConfig::from_json(r#"{"widget":{"max_stars":10},"auth":{"timeout_ms":2500}}"#)
                .expect("valid config");
        assert_eq!(cfg.widget.max_stars, 10);
        assert_eq!(cfg.widget.input_id, "rating");
        assert_eq!(cfg.auth.timeout_ms, 2500);
        assert_eq!(cfg.auth.username_field_id, "username");

        let empty = ClientConfig::from_json("{}").expect("empty object is valid");
        assert_eq!(empty, ClientConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_bad_config() {
        assert!(matches!(
            ClientConfig::from_json(r#"{"widget":{"max_stars":0}}"#),
            Err(ConfigError::MaxStarsOutOfRange { got: 0, .. })
        ));
        assert!(matches!(
            ClientConfig::from_json(r#"{"widget":{"max_stars":11}}"#),
            Err(ConfigError::MaxStarsOutOfRange { got: 11, .. })
        ));
        assert!(matches!(
            ClientConfig::from_json(r#"{"auth":{"login_endpoint":"  "}}"#),
            Err(ConfigError::EmptyField { field: "auth.login_endpoint" })
        ));
        assert_eq!(
            ClientConfig::from_json(r#"{"auth":{"timeout_ms":0}}"#),
            Err(ConfigError::ZeroTimeout)
        );
        assert!(matches!(
            ClientConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
