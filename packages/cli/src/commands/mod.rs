pub mod overrides;
pub mod publish;

pub use overrides::{overrides, OverridesArgs};
pub use publish::{publish, PublishArgs};
