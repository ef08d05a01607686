//! Page configuration: markup contract (element ids, selectors, class names) and
//! presentation tuning values. Everything has a default matching the stock page
//! markup, so `PageConfig::default()` is what `start_page()` uses.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::background::BlobSpec;

/// Configuration errors
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Config text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A field holds a value outside its allowed range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<ConfigError> for wasm_bindgen::JsValue {
    fn from(err: ConfigError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Markup hooks plus tuning for all four page behaviors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    pub progress_id: String,
    pub canvas_id: String,
    pub menu_toggle_id: String,
    pub menu_id: String,
    pub nav_selector: String,
    pub nav_target_attr: String,
    pub reveal_selector: String,
    pub visible_class: String,
    pub hidden_class: String,
    /// Fraction of an element's area that must be on screen before it is revealed.
    pub reveal_threshold: f64,
    /// Amount the animation clock advances per rendered frame.
    pub clock_step: f64,
    /// Background blobs in draw order (later ones composite over earlier ones).
    pub blobs: Vec<BlobSpec>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            progress_id: "progress".into(),
            canvas_id: "auroraCanvas".into(),
            menu_toggle_id: "mobile-toggle".into(),
            menu_id: "mobile-menu".into(),
            nav_selector: "[data-target]".into(),
            nav_target_attr: "data-target".into(),
            reveal_selector: ".reveal".into(),
            visible_class: "visible".into(),
            hidden_class: "hidden".into(),
            reveal_threshold: 0.12,
            clock_step: 0.002,
            blobs: BlobSpec::aurora_defaults().to_vec(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON config; absent fields fall back to their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal_threshold",
                reason: format!("{} is outside 0..=1", self.reveal_threshold),
            });
        }
        if !self.clock_step.is_finite() || self.clock_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "clock_step",
                reason: format!("{} must be a positive finite number", self.clock_step),
            });
        }
        let names: [(&'static str, &str); 9] = [
            ("progress_id", &self.progress_id),
            ("canvas_id", &self.canvas_id),
            ("menu_toggle_id", &self.menu_toggle_id),
            ("menu_id", &self.menu_id),
            ("nav_selector", &self.nav_selector),
            ("nav_target_attr", &self.nav_target_attr),
            ("reveal_selector", &self.reveal_selector),
            ("visible_class", &self.visible_class),
            ("hidden_class", &self.hidden_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid { field, reason: "must not be empty".into() });
            }
        }
        for blob in &self.blobs {
            if !(blob.radius_factor.is_finite() && blob.radius_factor > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "blobs",
                    reason: format!("radius_factor {} must be positive", blob.radius_factor),
                });
            }
            if !(0.0..=1.0).contains(&blob.alpha) {
                return Err(ConfigError::Invalid {
                    field: "blobs",
                    reason: format!("alpha {} is outside 0..=1", blob.alpha),
                });
            }
        }
        Ok(())
    }
}
