//! # Sitecraft Publisher
//!
//! Publish-time template injection.
//!
//! ```text
//! publish begins ──▶ TemplateInterceptor::begin   (wrap every serializer)
//!                    Tree::to_html(page root)      (wrappers call assemble)
//! publish ends   ──▶ TemplateInterceptor::end     (restore originals)
//! ```
//!
//! Templates stay on the nodes between cycles; only serializers are swapped.

mod assembly;
mod interceptor;

pub use assembly::{assemble, NodeSnapshot};
pub use interceptor::{
    InterceptionReport, InterceptorState, RestorationReport, TemplateInterceptor,
    TemplateSerializer,
};
