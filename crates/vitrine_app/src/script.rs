//! Demo scroll scripts
//!
//! The demo binary drives the app from a JSON script instead of live
//! input: a list of frame-stamped events applied while the loop runs.
//! Pointer coordinates are viewport pixels; wheel deltas are document
//! pixels, positive scrolling down.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One scripted input event
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScriptEvent {
    /// Frame index at which the event applies
    pub frame: u32,
    /// Wheel delta to feed the scroll controller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheel: Option<f32>,
    /// Glide to this section index through the nav
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<usize>,
    /// Move the pointer to `[x, y]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<(f32, f32)>,
    /// Clear the pointer, as if it left the window
    pub pointer_leave: bool,
}

/// A full demo run
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollScript {
    /// Total frames to run; defaults to one second past the last event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<u32>,
    pub events: Vec<ScriptEvent>,
}

impl ScrollScript {
    /// Load a script from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let script = serde_json::from_str(&content)?;
        Ok(script)
    }

    /// Events due at `frame`, in file order
    pub fn events_at(&self, frame: u32) -> impl Iterator<Item = &ScriptEvent> {
        self.events.iter().filter(move |event| event.frame == frame)
    }

    /// Number of frames the run should cover
    pub fn frame_count(&self, fallback: u32) -> u32 {
        match self.frames {
            Some(frames) => frames,
            None => self
                .events
                .iter()
                .map(|event| event.frame)
                .max()
                .map(|last| last + 60)
                .unwrap_or(fallback),
        }
    }
}
