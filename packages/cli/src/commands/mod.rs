pub mod outline;
pub mod render;
pub mod repl;

pub use outline::{outline, OutlineArgs};
pub use render::{render, RenderArgs};
pub use repl::{repl, ReplArgs};
