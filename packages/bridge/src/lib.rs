//! # menukit-bridge
//!
//! The JSON message protocol between the host application and the editor
//! frame, plus both endpoints: the frame-side [`MessageChannel`] that feeds
//! the runtime, and the host-side [`HostMirror`] that tracks its output.

pub mod channel;
pub mod host;
pub mod messages;

pub use channel::MessageChannel;
pub use host::{ClickedElement, HostMirror, ImageEditRequest};
pub use messages::{EditorMessage, HostMessage};
