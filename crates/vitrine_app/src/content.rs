//! Content records
//!
//! Immutable copy for the five page sections. Records are plain data:
//! the stage builder turns them into nodes and node counts, and the
//! choreographers never read them directly. A small fictional sample
//! set ships for the demo binary and for tests.

use serde::{Deserialize, Serialize};
use vitrine_core::Color;

/// One role on the horizontally scrubbed experience track
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExperienceRecord {
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub tech: Vec<String>,
}

/// One belief card in the grid
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BeliefRecord {
    pub title: String,
    pub body: String,
}

/// One full-viewport installation panel
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InstallationRecord {
    pub title: String,
    pub description: String,
    /// Full-bleed plate shown behind the panel while it holds the viewport
    pub backdrop: Color,
    /// Bright artwork; the nav inverts its ink while this panel is focused
    pub light_bg: bool,
}

/// Demo roles, newest first
pub fn sample_experiences() -> Vec<ExperienceRecord> {
    vec![
        ExperienceRecord {
            company: "Lumen Labs".into(),
            role: "Principal Engineer".into(),
            period: "2024 - Present".into(),
            description: "Realtime rendering infrastructure for collaborative design tools.".into(),
            achievements: vec![
                "Shipped the shared-canvas engine to general availability".into(),
                "Cut frame budget overruns by an order of magnitude".into(),
                "Grew the platform team from two to nine".into(),
            ],
            tech: vec!["Rust".into(), "WebGPU".into(), "CRDTs".into(), "WASM".into()],
        },
        ExperienceRecord {
            company: "Helios Robotics".into(),
            role: "Staff Engineer".into(),
            period: "2021 - 2024".into(),
            description: "Perception pipelines for warehouse automation at fleet scale.".into(),
            achievements: vec![
                "Scaled from 3 to 40 production deployments".into(),
                "Built the on-robot telemetry and replay stack".into(),
                "Held 99.9% uptime through two hardware revisions".into(),
            ],
            tech: vec![
                "Computer Vision".into(),
                "gRPC".into(),
                "CUDA".into(),
                "Kubernetes".into(),
            ],
        },
        ExperienceRecord {
            company: "Driftworks".into(),
            role: "Senior Engineer".into(),
            period: "2018 - 2021".into(),
            description: "Creative tooling for generative artists and live performances.".into(),
            achievements: vec![
                "Launched the node-based compositor used in 200+ shows".into(),
                "Wrote the timeline engine powering every export".into(),
                "Open-sourced the shader graph runtime".into(),
            ],
            tech: vec![
                "TypeScript".into(),
                "GLSL".into(),
                "Electron".into(),
                "FFmpeg".into(),
            ],
        },
        ExperienceRecord {
            company: "Nocturne Audio".into(),
            role: "Engineer".into(),
            period: "2015 - 2018".into(),
            description: "Low-latency audio engines for embedded stage hardware.".into(),
            achievements: vec![
                "Shipped the DSP core in three flagship mixers".into(),
                "Brought round-trip latency under 3 ms".into(),
                "Built the hardware-in-the-loop test rig".into(),
            ],
            tech: vec!["C++".into(), "DSP".into(), "RTOS".into(), "ALSA".into()],
        },
    ]
}

/// Demo belief cards
pub fn sample_beliefs() -> Vec<BeliefRecord> {
    vec![
        BeliefRecord {
            title: "Fast is a feature".into(),
            body: "Latency is the one quality every user notices. Budget it like money.".into(),
        },
        BeliefRecord {
            title: "Boring infrastructure wins".into(),
            body: "Novelty belongs in the product. The platform under it should be dull, proven, and replaceable."
                .into(),
        },
        BeliefRecord {
            title: "Measure before you optimize".into(),
            body: "A profile is worth a thousand hunches. Ship the instrumentation first.".into(),
        },
        BeliefRecord {
            title: "Ship small, ship often".into(),
            body: "Large launches hide large risks. Ten small releases teach more than one big one."
                .into(),
        },
    ]
}

/// Demo installations; the middle piece is bright enough to need dark ink
pub fn sample_installations() -> Vec<InstallationRecord> {
    vec![
        InstallationRecord {
            title: "Tideline".into(),
            description: "Four hundred suspended lamps tracing the harbor's tide in light.".into(),
            backdrop: Color::from_hex(0x0B1E3D),
            light_bg: false,
        },
        InstallationRecord {
            title: "Sungate".into(),
            description: "A walk-through arch of mirrored petals, open from dawn to noon.".into(),
            backdrop: Color::from_hex(0xF5E6C8),
            light_bg: true,
        },
        InstallationRecord {
            title: "Afterglow".into(),
            description: "Ember-colored columns that dim as visitors settle around them.".into(),
            backdrop: Color::from_hex(0x2B0F12),
            light_bg: false,
        },
    ]
}
