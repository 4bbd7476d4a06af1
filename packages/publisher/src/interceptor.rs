//! # Template Interception
//!
//! Swaps every node's serializer for a template-aware wrapper for the
//! duration of one publish cycle, then puts the originals back.
//!
//! ## States
//!
//! ```text
//!            begin()                 end()
//!   Idle ──────────────▶ Intercepting ──────────▶ Idle
//!                         │    ▲
//!                         └────┘ begin(): captured nodes are skipped
//! ```
//!
//! The saved originals live in a side map owned by the interceptor, never
//! on the nodes. A node is captured at most once per cycle, so a second
//! `begin` can never save a wrapper as the "original".
//!
//! Nodes attached after `begin` keep their own serializer and publish
//! without their template until the next cycle.

use crate::assembly::{assemble, NodeSnapshot};
use sitecraft_model::{NodeId, Serializer, Tree};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Serializer installed on a node while publishing
///
/// Tag name, classes and attributes come from the snapshot taken at
/// interception time; the template and the children are read live.
#[derive(Debug)]
pub struct TemplateSerializer {
    original: Arc<dyn Serializer>,
    snapshot: NodeSnapshot,
}

impl TemplateSerializer {
    pub fn new(original: Arc<dyn Serializer>, snapshot: NodeSnapshot) -> Self {
        Self { original, snapshot }
    }

    pub fn original(&self) -> &Arc<dyn Serializer> {
        &self.original
    }
}

impl Serializer for TemplateSerializer {
    fn serialize(&self, tree: &Tree, id: NodeId) -> String {
        match tree.template(id) {
            Some(template) => assemble(&self.snapshot, template, || tree.inner_html(id)),
            None => self.original.serialize(tree, id),
        }
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterceptorState {
    #[default]
    Idle,
    Intercepting,
}

/// Outcome of [`TemplateInterceptor::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterceptionReport {
    /// Nodes wrapped by this call
    pub captured: usize,
    /// Nodes already wrapped earlier in the cycle
    pub skipped: usize,
}

/// Outcome of [`TemplateInterceptor::end`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestorationReport {
    pub restored: usize,
    /// Saved originals of nodes deleted during the cycle
    pub dropped: usize,
}

#[derive(Debug, Default)]
pub struct TemplateInterceptor {
    state: InterceptorState,
    saved: HashMap<NodeId, Arc<dyn Serializer>>,
}

impl TemplateInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InterceptorState {
        self.state
    }

    pub fn is_intercepting(&self) -> bool {
        self.state == InterceptorState::Intercepting
    }

    /// True if `id` is wrapped in the current cycle
    pub fn is_captured(&self, id: NodeId) -> bool {
        self.saved.contains_key(&id)
    }

    pub fn captured_count(&self) -> usize {
        self.saved.len()
    }

    /// Install the template wrapper on every node reachable from the roots
    #[instrument(skip_all)]
    pub fn begin(&mut self, tree: &mut Tree) -> InterceptionReport {
        let mut report = InterceptionReport::default();

        for id in tree.walk() {
            if self.saved.contains_key(&id) {
                report.skipped += 1;
                continue;
            }

            let Some(node) = tree.node(id) else {
                continue;
            };
            let wrapper = TemplateSerializer::new(node.serializer().clone(), NodeSnapshot::of(node));

            match tree.set_serializer(id, Arc::new(wrapper)) {
                Ok(original) => {
                    debug!(node_id = %id, original = original.name(), "Captured serializer");
                    self.saved.insert(id, original);
                    report.captured += 1;
                }
                Err(err) => warn!(node_id = %id, error = %err, "Could not wrap serializer"),
            }
        }

        if self.state == InterceptorState::Intercepting {
            debug!(skipped = report.skipped, "Interception already active");
        }
        self.state = InterceptorState::Intercepting;

        info!(
            captured = report.captured,
            skipped = report.skipped,
            "Template interception installed"
        );
        report
    }

    /// Restore every saved serializer and forget them
    #[instrument(skip_all)]
    pub fn end(&mut self, tree: &mut Tree) -> RestorationReport {
        let mut report = RestorationReport::default();

        if self.state == InterceptorState::Idle {
            debug!("Interception not active, nothing to restore");
            return report;
        }

        for (id, original) in self.saved.drain() {
            match tree.set_serializer(id, original) {
                Ok(_) => report.restored += 1,
                Err(_) => {
                    warn!(node_id = %id, "Node removed during publish, dropping its serializer");
                    report.dropped += 1;
                }
            }
        }
        self.state = InterceptorState::Idle;

        info!(
            restored = report.restored,
            dropped = report.dropped,
            "Template interception removed"
        );
        report
    }
}
