//! # Editor Plugins
//!
//! Plugins listen to the editor's lifecycle events. Each event is delivered
//! to every plugin in registration order, together with the edit session,
//! before trait views are refreshed.

pub mod template;

use crate::EditSession;
use std::fmt;

/// Lifecycle event listener
pub trait Plugin: fmt::Debug {
    /// Get a debug name for this plugin
    fn name(&self) -> &'static str;

    /// React to the event named `event`
    fn on_event(&mut self, event: &str, session: &mut EditSession);
}
