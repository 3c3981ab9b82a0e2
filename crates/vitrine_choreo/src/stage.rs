//! Visual node stage
//!
//! The stage is the render target of the choreography layer: a slotmap of
//! [`VisualNode`]s whose properties choreographers write every frame and
//! embedders or tests read back. Nothing here draws; a renderer walks the
//! stage after the sync pass and paints whatever it finds.
//!
//! Choreographers hold typed [`NodeId`]s handed out when the embedder
//! builds the stage, so there is no selector string anywhere to fall out
//! of sync with the markup.
//!
//! The stage is a leaf lock: stage methods never take another lock, so
//! callers are free to hold it while reading plain data. Choreographers
//! still sample their animation state first and lock the stage only for
//! the final writes.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

use vitrine_core::{Color, Point, Rect, Vec2};
use vitrine_scroll::TargetBounds;

new_key_type! {
    /// Identifies a visual node on the stage
    pub struct NodeId;
}

/// A single visual element driven by choreography
///
/// `bounds` is the document-space layout position; `translate`, `scale`,
/// and `rotation` are the animated transform applied on top of it.
#[derive(Clone, Debug, Serialize)]
pub struct VisualNode {
    /// Human-readable label, stable across frames; snapshots sort by it
    pub label: String,
    /// Document-space layout bounds, before any transform
    pub bounds: Rect,
    pub opacity: f32,
    pub translate: Vec2,
    pub scale: Vec2,
    /// Degrees, positive clockwise
    pub rotation: f32,
    pub color: Color,
    /// Whether the node participates in hit-testing
    pub pointer_events: bool,
}

impl VisualNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bounds: Rect::ZERO,
            opacity: 1.0,
            translate: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            color: Color::WHITE,
            pointer_events: true,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Decorative nodes opt out of hit-testing
    pub fn decorative(mut self) -> Self {
        self.pointer_events = false;
        self
    }

    /// Layout bounds shifted by the current translation
    pub fn visual_bounds(&self) -> Rect {
        self.bounds.offset(self.translate.x, self.translate.y)
    }

    /// True if the point lands on this node and it accepts pointer input
    pub fn hit_test(&self, point: Point) -> bool {
        self.pointer_events && self.opacity > 0.0 && self.visual_bounds().contains(point)
    }
}

/// Property sheet for every visual node in the document
#[derive(Default)]
pub struct Stage {
    nodes: SlotMap<NodeId, VisualNode>,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn shared() -> SharedStage {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn insert(&mut self, node: VisualNode) -> NodeId {
        self.nodes.insert(node)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<VisualNode> {
        self.nodes.remove(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Property writes
    //
    // Missing nodes are ignored: a choreographer may outlive a node the
    // embedder removed, and a stale write must not panic mid-frame.
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.opacity = opacity;
        }
    }

    pub fn set_translate(&mut self, id: NodeId, translate: Vec2) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.translate = translate;
        }
    }

    pub fn set_translate_x(&mut self, id: NodeId, x: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.translate.x = x;
        }
    }

    pub fn set_translate_y(&mut self, id: NodeId, y: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.translate.y = y;
        }
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.scale = scale;
        }
    }

    pub fn set_uniform_scale(&mut self, id: NodeId, scale: f32) {
        self.set_scale(id, Vec2::new(scale, scale));
    }

    pub fn set_rotation(&mut self, id: NodeId, degrees: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rotation = degrees;
        }
    }

    pub fn set_color(&mut self, id: NodeId, color: Color) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.color = color;
        }
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = bounds;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Property reads
    // ─────────────────────────────────────────────────────────────────────

    pub fn opacity(&self, id: NodeId) -> Option<f32> {
        self.nodes.get(id).map(|n| n.opacity)
    }

    pub fn translate(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(id).map(|n| n.translate)
    }

    pub fn scale(&self, id: NodeId) -> Option<Vec2> {
        self.nodes.get(id).map(|n| n.scale)
    }

    pub fn rotation(&self, id: NodeId) -> Option<f32> {
        self.nodes.get(id).map(|n| n.rotation)
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.nodes.get(id).map(|n| n.color)
    }

    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    /// Vertical trigger bounds of a node, for scroll-trigger registration
    pub fn trigger_bounds(&self, id: NodeId) -> Option<TargetBounds> {
        self.nodes
            .get(id)
            .map(|n| TargetBounds::new(n.bounds.y(), n.bounds.height()))
    }

    /// Vertical trigger bounds covering a group of nodes
    pub fn group_trigger_bounds(&self, ids: &[NodeId]) -> Option<TargetBounds> {
        let mut rects = ids.iter().filter_map(|id| self.bounds(*id));
        let first = rects.next()?;
        let union = rects.fold(first, |acc, r| acc.union(&r));
        Some(TargetBounds::new(union.y(), union.height()))
    }

    /// Topmost node accepting pointer input at a point
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.hit_test(point))
            .map(|(id, _)| id)
            .last()
    }

    /// Clone of every node, sorted by label for stable output
    pub fn snapshot(&self) -> Vec<VisualNode> {
        let mut nodes: Vec<VisualNode> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.label.cmp(&b.label));
        nodes
    }
}

/// Shared stage, one per document
pub type SharedStage = Arc<Mutex<Stage>>;
