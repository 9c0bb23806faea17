//! Scripted input replay.
//!
//! A script is a TOML list of timestamped platform events. Replaying it drives
//! an [`InputBridge`] on a virtual clock and records every sink call with the
//! millisecond it happened at, including timer-driven holds and releases that
//! fall between steps.
//!
//! ```toml
//! [[step]]
//! at_ms = 0
//! event = "touches_began"
//! touches = [{ id = 1, x = 100.0, y = 100.0 }]
//!
//! [[step]]
//! at_ms = 80
//! event = "touches_ended"
//! touches = [{ id = 1, x = 100.0, y = 100.0, taps = 1 }]
//! ```

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::input::{
    ClickKind, InputBridge, InputEvent, KeyboardSink, MouseSink, Point, RecordingSink, SinkEvent,
    TouchSample,
};
use crate::util;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("step at {at_ms}ms presses unknown key code {code}")]
    UnknownKey { at_ms: u64, code: u32 },

    #[error("step at {at_ms}ms comes after a step at {previous_ms}ms")]
    OutOfOrder { at_ms: u64, previous_ms: u64 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptTouch {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub taps: u32,
}

impl From<&ScriptTouch> for TouchSample {
    fn from(touch: &ScriptTouch) -> Self {
        TouchSample::new(touch.id, touch.x, touch.y).with_taps(touch.taps)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptAction {
    TouchesBegan { touches: Vec<ScriptTouch> },
    TouchesMoved { touches: Vec<ScriptTouch> },
    TouchesEnded { touches: Vec<ScriptTouch> },
    TouchesCancelled { touches: Vec<ScriptTouch> },
    PointerButton { button: ClickKind, pressed: bool },
    PointerMoved { x: f64, y: f64 },
    SetMouseEnabled { enabled: bool },
    KeyPressed { code: u32 },
    KeyReleased { code: u32 },
    ShowKeyboard,
    HideKeyboard,
}

fn samples(touches: &[ScriptTouch]) -> Vec<TouchSample> {
    touches.iter().map(TouchSample::from).collect()
}

impl ScriptStep {
    /// Resolves the step into a bridge event, looking key codes up in the
    /// bridge's layout.
    fn to_event<M, K>(&self, bridge: &InputBridge<M, K>) -> Result<InputEvent, ScriptError>
    where
        M: MouseSink,
        K: KeyboardSink,
    {
        let find_key = |code: u32| {
            bridge
                .keyboard()
                .layout()
                .find(code)
                .cloned()
                .ok_or(ScriptError::UnknownKey {
                    at_ms: self.at_ms,
                    code,
                })
        };

        Ok(match &self.action {
            ScriptAction::TouchesBegan { touches } => InputEvent::TouchesBegan(samples(touches)),
            ScriptAction::TouchesMoved { touches } => InputEvent::TouchesMoved(samples(touches)),
            ScriptAction::TouchesEnded { touches } => InputEvent::TouchesEnded(samples(touches)),
            ScriptAction::TouchesCancelled { touches } => {
                InputEvent::TouchesCancelled(samples(touches))
            }
            ScriptAction::PointerButton { button, pressed } => InputEvent::PointerButton {
                kind: *button,
                pressed: *pressed,
            },
            ScriptAction::PointerMoved { x, y } => InputEvent::PointerMoved(Point::new(*x, *y)),
            ScriptAction::SetMouseEnabled { enabled } => InputEvent::SetMouseEnabled(*enabled),
            ScriptAction::KeyPressed { code } => InputEvent::KeyPressed(find_key(*code)?),
            ScriptAction::KeyReleased { code } => InputEvent::KeyReleased(find_key(*code)?),
            ScriptAction::ShowKeyboard => InputEvent::ShowKeyboard,
            ScriptAction::HideKeyboard => InputEvent::HideKeyboard,
        })
    }
}

impl Script {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse input script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input script {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid input script {}", path.display()))
    }
}

/// One sink call and when it happened, relative to the start of the script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: SinkEvent,
}

/// Runs a script against a freshly built bridge.
///
/// After the last step, remaining timers are allowed to fire so every queued
/// press gets its release in the transcript.
pub fn run(script: &Script, config: &Config) -> Result<Vec<TranscriptEntry>, ScriptError> {
    let recorder = RecordingSink::new();
    let mut bridge = InputBridge::from_config(
        config,
        recorder.clone(),
        recorder.clone(),
        Some(Box::new(recorder.clone())),
    );
    let start = Instant::now();
    let mut transcript = Vec::new();
    let mut previous_ms = 0;

    for step in &script.steps {
        if step.at_ms < previous_ms {
            return Err(ScriptError::OutOfOrder {
                at_ms: step.at_ms,
                previous_ms,
            });
        }
        previous_ms = step.at_ms;

        let now = util::at_ms(start, step.at_ms);
        fire_timers(&mut bridge, &recorder, start, Some(now), &mut transcript);

        let event = step.to_event(&bridge)?;
        debug!("Replaying {:?} at {}ms", step.action, step.at_ms);
        bridge.handle(event, now);
        record(&recorder, step.at_ms, &mut transcript);
    }

    fire_timers(&mut bridge, &recorder, start, None, &mut transcript);
    Ok(transcript)
}

/// Fires timers one deadline at a time so each firing is stamped with its own
/// deadline. `until = None` drains everything.
fn fire_timers<M, K>(
    bridge: &mut InputBridge<M, K>,
    recorder: &RecordingSink,
    start: Instant,
    until: Option<Instant>,
    transcript: &mut Vec<TranscriptEntry>,
) where
    M: MouseSink,
    K: KeyboardSink,
{
    while let Some(deadline) = bridge
        .next_deadline()
        .filter(|deadline| until.is_none_or(|until| *deadline <= until))
    {
        bridge.poll(deadline);
        record(recorder, util::elapsed_ms(start, deadline), transcript);
    }
}

fn record(recorder: &RecordingSink, at_ms: u64, transcript: &mut Vec<TranscriptEntry>) {
    transcript.extend(
        recorder
            .take()
            .into_iter()
            .map(|event| TranscriptEntry { at_ms, event }),
    );
}
