//! Application shell
//!
//! Owns the whole runtime: the animation scheduler, the smooth-scroll
//! controller, the stage, one boundary per section, the progress nav,
//! and the decorative backdrop. The embedder feeds it input events and
//! calls [`VitrineApp::advance`] once per frame; everything else runs
//! off that tick.
//!
//! The stage is laid out here, in document space, from the content
//! records. Section choreographers receive typed node handles and never
//! see the records themselves.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use vitrine_animation::{AnimationScheduler, SchedulerHandle, SharedScheduler};
use vitrine_choreo::{
    Backdrop, BackdropConfig, ChoreoContext, FrameState, NavNodes, NodeId,
    ScrollProgressNav, Section, SharedStage, Stage, VisualNode,
};
use vitrine_choreo::sections::{
    BeliefsNodes, BeliefsSection, ContactNodes, ContactSection, CreativeNodes,
    CreativePanel, CreativeSection, ExperienceNodes, ExperiencePanel,
    ExperienceSection, HeroNodes, HeroSection,
};
use vitrine_core::{MotionPreference, Point, Rect, Size};
use vitrine_scroll::SmoothScrollController;

use crate::boundary::{ReloadPolicy, SectionBoundary};
use crate::config::VitrineConfig;
use crate::content::{
    sample_beliefs, sample_experiences, sample_installations, BeliefRecord,
    ExperienceRecord, InstallationRecord,
};
use crate::loader::SectionLoader;

/// Section labels in document order
pub const SECTION_LABELS: [&str; 5] = ["hero", "experience", "beliefs", "creative", "contact"];

/// Contact headline; one stage node per visible character
pub const CONTACT_TITLE: &str = "Let's talk";

/// Height of the creative section's header strip, in viewport heights
const CREATIVE_HEADER_SPAN: f32 = 0.2;

/// Everything the page renders, bundled for the stage builder
#[derive(Debug, Clone)]
pub struct PageContent {
    pub experiences: Vec<ExperienceRecord>,
    pub beliefs: Vec<BeliefRecord>,
    pub installations: Vec<InstallationRecord>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            experiences: sample_experiences(),
            beliefs: sample_beliefs(),
            installations: sample_installations(),
        }
    }
}

/// Stage nodes for the whole page, plus the label index
///
/// Bounds live in document space and are recomputed by
/// [`StageLayout::place`] whenever the viewport changes. The nav rail
/// and the creative background plates are viewport-fixed; everything
/// else scrolls.
pub struct StageLayout {
    hero_root: NodeId,
    hero: HeroNodes,
    experience: ExperienceNodes,
    beliefs_root: NodeId,
    beliefs: BeliefsNodes,
    creative: CreativeNodes,
    contact: ContactNodes,
    nav: NavNodes,
    labels: FxHashMap<String, NodeId>,
}

fn insert_node(
    stage: &mut Stage,
    labels: &mut FxHashMap<String, NodeId>,
    node: VisualNode,
) -> NodeId {
    let label = node.label.clone();
    let id = stage.insert(node);
    labels.insert(label, id);
    id
}

impl StageLayout {
    /// Insert every node and place it for `viewport`
    pub fn build(
        stage: &SharedStage,
        content: &PageContent,
        viewport: Size,
        motion: MotionPreference,
    ) -> (Self, f32) {
        let mut layout = {
            let mut guard = stage.lock().unwrap();
            let stage = &mut *guard;
            let mut labels = FxHashMap::default();

            let hero_root = insert_node(stage, &mut labels, VisualNode::new("hero"));
            let hero = HeroNodes {
                title: insert_node(stage, &mut labels, VisualNode::new("hero-title")),
                subtitle: insert_node(stage, &mut labels, VisualNode::new("hero-subtitle")),
                cta: insert_node(stage, &mut labels, VisualNode::new("hero-cta")),
                hint: insert_node(stage, &mut labels, VisualNode::new("hero-hint").decorative()),
            };

            let experience = ExperienceNodes {
                header: insert_node(stage, &mut labels, VisualNode::new("experience-header")),
                section: insert_node(stage, &mut labels, VisualNode::new("experience")),
                track: insert_node(
                    stage,
                    &mut labels,
                    VisualNode::new("experience-track").decorative(),
                ),
                panels: content
                    .experiences
                    .iter()
                    .enumerate()
                    .map(|(i, record)| ExperiencePanel {
                        root: insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("experience-panel-{i}")),
                        ),
                        company: insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("experience-panel-{i}-company")),
                        ),
                        details: record
                            .achievements
                            .iter()
                            .enumerate()
                            .map(|(j, _)| {
                                insert_node(
                                    stage,
                                    &mut labels,
                                    VisualNode::new(format!("experience-panel-{i}-detail-{j}")),
                                )
                            })
                            .collect::<SmallVec<[NodeId; 4]>>(),
                    })
                    .collect(),
            };

            let beliefs_root = insert_node(stage, &mut labels, VisualNode::new("beliefs"));
            let beliefs = BeliefsNodes {
                header: insert_node(stage, &mut labels, VisualNode::new("beliefs-header")),
                items: content
                    .beliefs
                    .iter()
                    .enumerate()
                    .map(|(i, _)| {
                        insert_node(stage, &mut labels, VisualNode::new(format!("belief-{i}")))
                    })
                    .collect(),
            };

            let creative = CreativeNodes {
                header: insert_node(stage, &mut labels, VisualNode::new("creative-header")),
                section: insert_node(stage, &mut labels, VisualNode::new("creative")),
                panels: content
                    .installations
                    .iter()
                    .enumerate()
                    .map(|(i, record)| CreativePanel {
                        root: insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("installation-{i}")),
                        ),
                        background: insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("installation-{i}-background"))
                                .with_color(record.backdrop)
                                .with_opacity(0.0)
                                .decorative(),
                        ),
                        backdrop: insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("installation-{i}-plate")).decorative(),
                        ),
                        texts: ["label", "title", "description", "meta"]
                            .iter()
                            .map(|part| {
                                insert_node(
                                    stage,
                                    &mut labels,
                                    VisualNode::new(format!("installation-{i}-{part}")),
                                )
                            })
                            .collect::<SmallVec<[NodeId; 4]>>(),
                        light_bg: record.light_bg,
                    })
                    .collect(),
            };

            let contact = ContactNodes {
                section: insert_node(stage, &mut labels, VisualNode::new("contact")),
                label: insert_node(stage, &mut labels, VisualNode::new("contact-label")),
                title_chars: CONTACT_TITLE
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .enumerate()
                    .map(|(i, _)| {
                        insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("contact-char-{i}")),
                        )
                    })
                    .collect(),
                description: insert_node(
                    stage,
                    &mut labels,
                    VisualNode::new("contact-description"),
                ),
                cta: insert_node(stage, &mut labels, VisualNode::new("contact-cta")),
                social: (0..3)
                    .map(|i| {
                        insert_node(
                            stage,
                            &mut labels,
                            VisualNode::new(format!("contact-social-{i}")),
                        )
                    })
                    .collect(),
            };

            let nav = NavNodes {
                root: insert_node(stage, &mut labels, VisualNode::new("nav")),
                bar: insert_node(stage, &mut labels, VisualNode::new("nav-bar").decorative()),
                dots: (0..SECTION_LABELS.len())
                    .map(|i| {
                        insert_node(stage, &mut labels, VisualNode::new(format!("nav-dot-{i}")))
                    })
                    .collect(),
            };

            Self {
                hero_root,
                hero,
                experience,
                beliefs_root,
                beliefs,
                creative,
                contact,
                nav,
                labels,
            }
        };

        let content_height = layout.place(stage, viewport, motion);
        (layout, content_height)
    }

    /// Set every node's bounds for `viewport`; returns the document height
    ///
    /// Under reduced motion the experience panels stack vertically
    /// instead of forming the horizontal track.
    pub fn place(&mut self, stage: &SharedStage, viewport: Size, motion: MotionPreference) -> f32 {
        let vw = viewport.width;
        let vh = viewport.height;
        let mut stage = stage.lock().unwrap();
        let mut top = 0.0;

        // Hero
        stage.set_bounds(self.hero_root, Rect::new(0.0, top, vw, vh));
        stage.set_bounds(self.hero.title, Rect::new(vw * 0.2, top + vh * 0.30, vw * 0.6, 120.0));
        stage.set_bounds(self.hero.subtitle, Rect::new(vw * 0.25, top + vh * 0.48, vw * 0.5, 44.0));
        stage.set_bounds(self.hero.cta, Rect::new(vw * 0.5 - 90.0, top + vh * 0.60, 180.0, 56.0));
        stage.set_bounds(self.hero.hint, Rect::new(vw * 0.5 - 12.0, top + vh * 0.88, 24.0, 40.0));
        top += vh;

        // Experience: pinned horizontal track, or a vertical stack when
        // motion is reduced. The pin runs 1.2x the track's scroll
        // distance, plus the viewport that scrolls the section away.
        let panels = self.experience.panels.len() as f32;
        let track_width = panels * vw;
        let scroll_distance = (track_width - vw).max(0.0);
        let exp_height = if motion.is_reduced() {
            panels * vh
        } else {
            vh + scroll_distance * 1.2
        };
        stage.set_bounds(self.experience.section, Rect::new(0.0, top, vw, exp_height));
        stage.set_bounds(
            self.experience.header,
            Rect::new(vw * 0.08, top + vh * 0.08, vw * 0.4, 80.0),
        );
        if motion.is_reduced() {
            stage.set_bounds(self.experience.track, Rect::new(0.0, top, vw, exp_height));
            for (i, panel) in self.experience.panels.iter().enumerate() {
                let py = top + i as f32 * vh;
                stage.set_bounds(panel.root, Rect::new(0.0, py, vw, vh));
                stage.set_bounds(
                    panel.company,
                    Rect::new(vw * 0.08, py + vh * 0.30, vw * 0.5, 96.0),
                );
                for (j, detail) in panel.details.iter().enumerate() {
                    let dy = py + vh * 0.48 + j as f32 * 44.0;
                    stage.set_bounds(*detail, Rect::new(vw * 0.08, dy, vw * 0.4, 36.0));
                }
            }
        } else {
            stage.set_bounds(self.experience.track, Rect::new(0.0, top, track_width, vh));
            for (i, panel) in self.experience.panels.iter().enumerate() {
                let px = i as f32 * vw;
                stage.set_bounds(panel.root, Rect::new(px, top, vw, vh));
                stage.set_bounds(
                    panel.company,
                    Rect::new(px + vw * 0.08, top + vh * 0.30, vw * 0.5, 96.0),
                );
                for (j, detail) in panel.details.iter().enumerate() {
                    let dy = top + vh * 0.48 + j as f32 * 44.0;
                    stage.set_bounds(*detail, Rect::new(px + vw * 0.08, dy, vw * 0.4, 36.0));
                }
            }
        }
        top += exp_height;

        // Beliefs: header plus a two-column card grid
        stage.set_bounds(self.beliefs_root, Rect::new(0.0, top, vw, vh));
        stage.set_bounds(
            self.beliefs.header,
            Rect::new(vw * 0.08, top + vh * 0.10, vw * 0.4, 80.0),
        );
        for (i, item) in self.beliefs.items.iter().enumerate() {
            let cx = vw * (0.08 + (i % 2) as f32 * 0.46);
            let cy = top + vh * (0.32 + (i / 2) as f32 * 0.34);
            stage.set_bounds(*item, Rect::new(cx, cy, vw * 0.38, vh * 0.26));
        }
        top += vh;

        // Creative: header strip, then one full-viewport panel per
        // installation. Background plates are viewport-fixed.
        let installs = self.creative.panels.len() as f32;
        let creative_height = vh * (CREATIVE_HEADER_SPAN + installs);
        stage.set_bounds(self.creative.section, Rect::new(0.0, top, vw, creative_height));
        stage.set_bounds(
            self.creative.header,
            Rect::new(vw * 0.08, top + vh * 0.05, vw * 0.4, 80.0),
        );
        for (i, panel) in self.creative.panels.iter().enumerate() {
            let py = top + vh * CREATIVE_HEADER_SPAN + i as f32 * vh;
            stage.set_bounds(panel.root, Rect::new(0.0, py, vw, vh));
            stage.set_bounds(panel.background, Rect::new(0.0, 0.0, vw, vh));
            stage.set_bounds(
                panel.backdrop,
                Rect::new(vw * 0.25, py + vh * 0.30, vw * 0.5, vh * 0.40),
            );
            for (j, text) in panel.texts.iter().enumerate() {
                stage.set_bounds(
                    *text,
                    Rect::new(vw * 0.30, py + vh * (0.34 + j as f32 * 0.08), vw * 0.40, vh * 0.06),
                );
            }
        }
        top += creative_height;

        // Contact
        stage.set_bounds(self.contact.section, Rect::new(0.0, top, vw, vh));
        stage.set_bounds(
            self.contact.label,
            Rect::new(vw * 0.5 - 60.0, top + vh * 0.22, 120.0, 28.0),
        );
        let char_w = 44.0;
        let row_w = self.contact.title_chars.len() as f32 * char_w;
        for (i, ch) in self.contact.title_chars.iter().enumerate() {
            stage.set_bounds(
                *ch,
                Rect::new((vw - row_w) * 0.5 + i as f32 * char_w, top + vh * 0.32, char_w, 96.0),
            );
        }
        stage.set_bounds(
            self.contact.description,
            Rect::new(vw * 0.30, top + vh * 0.50, vw * 0.40, 60.0),
        );
        stage.set_bounds(
            self.contact.cta,
            Rect::new(vw * 0.5 - 110.0, top + vh * 0.62, 220.0, 56.0),
        );
        for (i, social) in self.contact.social.iter().enumerate() {
            stage.set_bounds(
                *social,
                Rect::new(vw * 0.5 - 70.0 + i as f32 * 48.0, top + vh * 0.76, 40.0, 40.0),
            );
        }
        top += vh;

        // Nav rail, viewport-fixed on the right edge
        stage.set_bounds(self.nav.root, Rect::new(vw - 56.0, vh * 0.30, 40.0, vh * 0.40));
        stage.set_bounds(self.nav.bar, Rect::new(vw - 48.0, vh * 0.30, 4.0, vh * 0.40));
        let spacing = vh * 0.40 / self.nav.dots.len() as f32;
        for (i, dot) in self.nav.dots.iter().enumerate() {
            stage.set_bounds(
                *dot,
                Rect::new(vw - 34.0, vh * 0.30 + spacing * (i as f32 + 0.5) - 6.0, 12.0, 12.0),
            );
        }

        top
    }

    /// One root node per section, in document order; the nav's targets
    pub fn section_roots(&self) -> Vec<NodeId> {
        vec![
            self.hero_root,
            self.experience.section,
            self.beliefs_root,
            self.creative.section,
            self.contact.section,
        ]
    }

    /// Look a node up by its label
    pub fn node(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }
}

/// The assembled page
///
/// Dropping the app tears everything down in a safe order: boundaries
/// release their sections' trigger and animation handles, then the
/// controller detaches its ticker before the engine goes away.
pub struct VitrineApp {
    scheduler: SharedScheduler,
    controller: SmoothScrollController,
    ctx: ChoreoContext,
    stage: SharedStage,
    layout: StageLayout,
    sections: IndexMap<&'static str, SectionBoundary>,
    nav: ScrollProgressNav,
    backdrop: Backdrop,
    policy: ReloadPolicy,
    viewport: Size,
    content_height: f32,
    pointer: Option<Point>,
    motion: MotionPreference,
}

impl VitrineApp {
    /// Build the app with the shipped sample content
    pub fn new(config: &VitrineConfig) -> Self {
        Self::with_content(config, PageContent::default())
    }

    pub fn with_content(config: &VitrineConfig, content: PageContent) -> Self {
        let motion = config.motion();
        let viewport = config.viewport.size();

        let scheduler = AnimationScheduler::shared();
        let handle = SchedulerHandle::new(&scheduler);
        let controller = SmoothScrollController::new(handle.clone(), motion);
        let stage = Stage::shared();
        let ctx = ChoreoContext::new(Arc::clone(&stage), handle, controller.triggers(), motion);

        let (layout, content_height) = StageLayout::build(&stage, &content, viewport, motion);
        controller.set_viewport_height(viewport.height);
        controller.set_content_height(content_height);

        let policy = ReloadPolicy::new();
        let sections = Self::boundaries(&ctx, &layout, viewport, &policy);
        let nav = ScrollProgressNav::new(&ctx, layout.nav.clone(), layout.section_roots());
        let backdrop = Backdrop::new(
            &ctx,
            BackdropConfig {
                viewport,
                seed: config.seed,
                pointer: true,
            },
        );

        tracing::debug!(
            sections = sections.len(),
            content_height,
            reduced = motion.is_reduced(),
            "app assembled"
        );

        Self {
            scheduler,
            controller,
            ctx,
            stage,
            layout,
            sections,
            nav,
            backdrop,
            policy,
            viewport,
            content_height,
            pointer: None,
            motion,
        }
    }

    /// One boundary per section, each with a loader that builds the
    /// choreographer from the shared context and its node bundle
    fn boundaries(
        ctx: &ChoreoContext,
        layout: &StageLayout,
        viewport: Size,
        policy: &ReloadPolicy,
    ) -> IndexMap<&'static str, SectionBoundary> {
        let mut sections = IndexMap::new();

        let hero: SectionLoader = {
            let ctx = ctx.clone();
            let nodes = layout.hero;
            Box::new(move || Ok(Box::new(HeroSection::new(&ctx, nodes)) as Box<dyn Section>))
        };
        sections.insert("hero", SectionBoundary::new("hero", hero, policy.clone()));

        let experience: SectionLoader = {
            let ctx = ctx.clone();
            let nodes = layout.experience.clone();
            let width = viewport.width;
            Box::new(move || {
                Ok(Box::new(ExperienceSection::new(&ctx, nodes.clone(), width)) as Box<dyn Section>)
            })
        };
        sections.insert(
            "experience",
            SectionBoundary::new("experience", experience, policy.clone()),
        );

        let beliefs: SectionLoader = {
            let ctx = ctx.clone();
            let nodes = layout.beliefs.clone();
            Box::new(move || {
                Ok(Box::new(BeliefsSection::new(&ctx, nodes.clone())) as Box<dyn Section>)
            })
        };
        sections.insert("beliefs", SectionBoundary::new("beliefs", beliefs, policy.clone()));

        let creative: SectionLoader = {
            let ctx = ctx.clone();
            let nodes = layout.creative.clone();
            Box::new(move || {
                Ok(Box::new(CreativeSection::new(&ctx, nodes.clone())) as Box<dyn Section>)
            })
        };
        sections.insert("creative", SectionBoundary::new("creative", creative, policy.clone()));

        let contact: SectionLoader = {
            let ctx = ctx.clone();
            let nodes = layout.contact.clone();
            Box::new(move || {
                Ok(Box::new(ContactSection::new(&ctx, nodes.clone())) as Box<dyn Section>)
            })
        };
        sections.insert("contact", SectionBoundary::new("contact", contact, policy.clone()));

        debug_assert_eq!(
            sections.keys().copied().collect::<Vec<_>>(),
            SECTION_LABELS.to_vec()
        );
        sections
    }

    /// Advance the whole app by one frame
    ///
    /// Order per frame: animation tick, trigger dispatch, boundary
    /// polling, then section, nav, and backdrop writes.
    pub fn advance(&mut self, dt: f32) {
        self.scheduler.lock().unwrap().tick(dt);
        self.controller.dispatch(dt);

        for boundary in self.sections.values_mut() {
            boundary.poll(dt);
        }

        let frame = self.frame_state(dt);
        for boundary in self.sections.values_mut() {
            boundary.sync(&frame);
        }
        self.nav.sync(&frame);
        self.backdrop.sync(&frame);
    }

    fn frame_state(&self, dt: f32) -> FrameState {
        FrameState {
            offset: self.controller.offset(),
            progress: self.controller.progress(),
            viewport: self.viewport,
            pointer: self.pointer,
            dt,
        }
    }

    /// Feed a wheel delta (positive = scroll down)
    pub fn wheel(&self, delta: f32) {
        self.controller.wheel(delta);
    }

    /// Glide to an absolute document offset
    pub fn scroll_to(&self, offset: f32) {
        self.controller.scroll_to(offset);
    }

    /// Glide to a section through the nav, honoring its scroll offset
    pub fn scroll_to_section(&self, index: usize) {
        self.nav.click(index, &self.controller);
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);
        self.backdrop.pointer_move(point);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        self.backdrop.pointer_leave();
    }

    /// Re-lay the document out for a new viewport
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.content_height = self.layout.place(&self.stage, viewport, self.motion);
        self.controller.set_viewport_height(viewport.height);
        self.controller.set_content_height(self.content_height);
        self.backdrop.resize(viewport);
        for boundary in self.sections.values_mut() {
            boundary.refresh();
        }
        self.nav.refresh();
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            content_height = self.content_height,
            "relayout"
        );
    }

    /// True when a boundary asked for a full reload; the embedder
    /// performs it
    pub fn reload_requested(&self) -> bool {
        self.policy.take_pending()
    }

    pub fn offset(&self) -> f32 {
        self.controller.offset()
    }

    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    /// Index of the section currently holding the viewport midpoint
    pub fn active_section(&self) -> usize {
        self.nav.active_index()
    }

    pub fn section_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.keys().copied()
    }

    pub fn boundary(&self, label: &str) -> Option<&SectionBoundary> {
        self.sections.get(label)
    }

    pub fn boundary_mut(&mut self, label: &str) -> Option<&mut SectionBoundary> {
        self.sections.get_mut(label)
    }

    /// Look a stage node up by its label
    pub fn node(&self, label: &str) -> Option<NodeId> {
        self.layout.node(label)
    }

    pub fn stage(&self) -> SharedStage {
        Arc::clone(&self.stage)
    }

    /// Context handle for embedders extending the page
    pub fn context(&self) -> &ChoreoContext {
        &self.ctx
    }
}
