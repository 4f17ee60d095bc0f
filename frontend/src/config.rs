use serde::Deserialize;
use web_sys::Document;

use crate::error::EffectError;
use crate::terminal::machine::{CommandStep, TypingTiming};

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "islandbytes-effects";

/// Every tunable constant used by the landing effects.
///
/// All fields fall back to their defaults, so a page only has to spell out
/// what it wants to change.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub typing: TypingConfig,
    pub parallax: ParallaxConfig,
    pub touch: TouchConfig,
    pub counter: CounterConfig,
    pub reveal: RevealConfig,
    pub easter_egg: EasterEggConfig,
    pub fallback: FallbackConfig,
    pub scroll: ScrollConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub text_selector: String,
    pub output_selector: String,
    pub start_delay_ms: u32,
    pub timing: TypingTiming,
    pub steps: Vec<CommandStep>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            text_selector: ".typed-text".to_string(),
            output_selector: ".terminal-output".to_string(),
            start_delay_ms: 1000,
            timing: TypingTiming::default(),
            steps: vec![
                CommandStep::new(
                    "npm install @islandbytes/core",
                    "✓ Package installed successfully",
                    1000,
                ),
                CommandStep::new(
                    "islandbytes init --template modern",
                    "✓ Project initialized\n✓ Dependencies resolved\n✓ Ready to build",
                    2000,
                ),
                CommandStep::new(
                    "npm run dev",
                    "🌴 IslandBytes v2.0.0\n⚡ Server running at http://localhost:3000\n✨ Ready in 127ms",
                    2500,
                ),
            ],
        }
    }
}

/// One group of elements moved together by pointer parallax.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParallaxLayer {
    pub selector: String,
    pub speed: f64,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub keep_rotation: bool,
}

impl ParallaxLayer {
    pub fn new(selector: &str, speed: f64) -> Self {
        Self {
            selector: selector.to_string(),
            speed,
            reversed: false,
            keep_rotation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub layers: Vec<ParallaxLayer>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                ParallaxLayer {
                    keep_rotation: true,
                    ..ParallaxLayer::new(".palm-leaf", 5.0)
                },
                ParallaxLayer::new(".gradient-orb", 8.0),
                ParallaxLayer {
                    reversed: true,
                    ..ParallaxLayer::new(".code-float", 3.0)
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TouchLayer {
    pub selector: String,
    pub speed: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub layers: Vec<TouchLayer>,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            layers: vec![TouchLayer {
                selector: ".code-float".to_string(),
                speed: 2.0,
                scale: 30.0,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub grid_selector: String,
    pub value_selector: String,
    pub threshold: f64,
    pub duration_ms: u32,
    pub interval_ms: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            grid_selector: ".stats-grid".to_string(),
            value_selector: ".stat-value".to_string(),
            threshold: 0.5,
            duration_ms: 2000,
            interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: String,
    pub class_name: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".feature-card, .terminal-section, .logo-section, .hero-section, .contact-section, .footer"
                .to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            class_name: "visible".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EasterEggConfig {
    pub logo_ids: Vec<String>,
    pub target_selector: String,
    pub clicks: u32,
    pub reset_ms: u32,
    pub stagger_ms: u32,
    pub animation: String,
    pub animation_ms: u32,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        Self {
            logo_ids: vec!["nav-logo".to_string(), "logo".to_string()],
            target_selector: ".code-float".to_string(),
            clicks: 5,
            reset_ms: 2000,
            stagger_ms: 100,
            animation: "spin 1s ease-in-out".to_string(),
            animation_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub selector: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            selector: "#nav-logo, #logo, img.logo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub grid_selector: String,
    pub grid_factor: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            grid_selector: ".grid-overlay".to_string(),
            grid_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub min_cores: u32,
    pub selector: String,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            min_cores: 4,
            selector: ".gradient-orb, .code-float".to_string(),
        }
    }
}

/// Parses an override document. Blank input means "use the defaults".
pub fn parse(json: &str) -> Result<EffectsConfig, EffectError> {
    if json.trim().is_empty() {
        return Ok(EffectsConfig::default());
    }
    Ok(serde_json::from_str(json)?)
}

/// Reads the page's override element, falling back to defaults when it is
/// missing or malformed.
pub fn from_document(document: &Document) -> EffectsConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return EffectsConfig::default();
    };

    match parse(&raw) {
        Ok(config) => {
            log::info!("Loaded effects config overrides from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(e) => {
            log::warn!("Ignoring effects config overrides: {}", e);
            EffectsConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_yields_defaults() {
        assert_eq!(parse("").unwrap(), EffectsConfig::default());
        assert_eq!(parse("  \n ").unwrap(), EffectsConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse(r#"{"typing": {"start_delay_ms": 250}, "counter": {"duration_ms": 500}}"#)
            .unwrap();
        assert_eq!(config.typing.start_delay_ms, 250);
        assert_eq!(config.typing.steps.len(), 3);
        assert_eq!(config.typing.timing, TypingTiming::default());
        assert_eq!(config.counter.duration_ms, 500);
        assert_eq!(config.counter.interval_ms, 16);
        assert_eq!(config.parallax, ParallaxConfig::default());
    }

    #[test]
    fn steps_can_be_replaced() {
        let config = parse(
            r#"{"typing": {"steps": [{"command": "ls", "output": "a b", "post_output_delay_ms": 10}]}}"#,
        )
        .unwrap();
        assert_eq!(config.typing.steps, vec![CommandStep::new("ls", "a b", 10)]);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = parse("{ typing: ").unwrap_err();
        assert!(matches!(err, EffectError::Config(_)));
    }

    #[test]
    fn default_layers_match_landing_page() {
        let layers = ParallaxConfig::default().layers;
        assert_eq!(layers.len(), 3);
        assert!(layers[0].keep_rotation);
        assert_eq!(layers[1].speed, 8.0);
        assert!(layers[2].reversed);
    }
}
