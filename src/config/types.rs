//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Touch-to-mouse gesture settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Translate touches into mouse input. When off, a real pointer (if the
    /// platform has one) is forwarded as-is
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How far a touch may drift from where it started before a pending
    /// press-and-hold is abandoned (valid range: 1.0 - 200.0)
    #[serde(default = "default_position_change_threshold")]
    pub position_change_threshold: f64,

    /// Milliseconds a touch must stay put to become a held left button
    /// (valid range: 100 - 5000)
    #[serde(default = "default_mouse_hold_interval_ms")]
    pub mouse_hold_interval_ms: u64,

    /// Fire haptic feedback when a hold engages
    #[serde(default = "default_haptic_feedback")]
    pub haptic_feedback: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            position_change_threshold: default_position_change_threshold(),
            mouse_hold_interval_ms: default_mouse_hold_interval_ms(),
            haptic_feedback: default_haptic_feedback(),
        }
    }
}

/// On-screen keyboard settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyboardConfig {
    /// Show the keyboard as soon as input starts
    #[serde(default = "default_show_on_start")]
    pub show_on_start: bool,

    /// Open on the digits/function-key keyset instead of letters
    #[serde(default)]
    pub start_with_alternate: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            show_on_start: default_show_on_start(),
            start_with_alternate: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_position_change_threshold() -> f64 {
    20.0
}

fn default_mouse_hold_interval_ms() -> u64 {
    1000
}

fn default_haptic_feedback() -> bool {
    true
}

fn default_show_on_start() -> bool {
    true
}
