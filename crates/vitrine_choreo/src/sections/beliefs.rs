//! Beliefs section
//!
//! The calm one: a header reveal and one staggered reveal over the
//! principle list, both one-shot.

use vitrine_core::RevealState;

use crate::primitives::{
    staggers, ChoreoContext, RevealConfig, RevealHandle, StaggerRevealConfig,
};
use crate::sections::{FrameState, Section};
use crate::stage::{NodeId, SharedStage};

/// Stage nodes the beliefs section choreographs
#[derive(Clone, Debug)]
pub struct BeliefsNodes {
    pub header: NodeId,
    pub items: Vec<NodeId>,
}

pub struct BeliefsSection {
    stage: SharedStage,
    nodes: BeliefsNodes,
    header_reveal: Option<RevealHandle>,
    items_reveal: Option<RevealHandle>,
}

impl BeliefsSection {
    pub fn new(ctx: &ChoreoContext, nodes: BeliefsNodes) -> Self {
        let header_reveal = ctx.reveal_on_scroll(nodes.header, RevealConfig::default());
        let items_reveal = ctx.staggered_reveal(
            &nodes.items,
            StaggerRevealConfig {
                offset_y: 60.0,
                stagger_s: staggers::LOOSE,
                duration_s: 0.8,
                trigger_viewport: 0.75,
                ..Default::default()
            },
        );
        Self {
            stage: ctx.stage(),
            nodes,
            header_reveal,
            items_reveal,
        }
    }

    pub fn items_state(&self) -> Option<RevealState> {
        self.items_reveal.as_ref().and_then(|r| r.state())
    }
}

impl Section for BeliefsSection {
    fn name(&self) -> &'static str {
        "beliefs"
    }

    fn sync(&mut self, _frame: &FrameState) {
        if let Some(reveal) = &mut self.header_reveal {
            reveal.sync();
        }
        if let Some(reveal) = &mut self.items_reveal {
            reveal.sync();
        }
    }

    fn refresh(&mut self) {
        let (header_bounds, items_bounds) = {
            let stage = self.stage.lock().unwrap();
            (
                stage.trigger_bounds(self.nodes.header),
                stage.group_trigger_bounds(&self.nodes.items),
            )
        };
        if let (Some(reveal), Some(bounds)) = (&self.header_reveal, header_bounds) {
            reveal.trigger().update_bounds(bounds);
        }
        if let (Some(reveal), Some(bounds)) = (&self.items_reveal, items_bounds) {
            reveal.trigger().update_bounds(bounds);
        }
    }
}
