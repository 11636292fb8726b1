//! Events the runtime reports to the host.
//!
//! Every mutation that changes serialized markup is followed by a
//! [`Event::DocumentResynced`] carrying the whole document — the host's
//! mirror is a best-effort copy and is always overwritten wholesale, never
//! patched.

use menukit_dom::{NodePath, OutlineNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The outline was rebuilt after a structural change (or on request).
    OutlineUpdated(Vec<OutlineNode>),

    /// Full-document snapshot after a mutation.
    DocumentResynced(String),

    /// Debounced content height report for host-side frame sizing.
    ContentHeightChanged(f64),

    /// A click landed on a content element (after walking up through inline
    /// formatting tags); the host uses this for contextual actions.
    ElementClicked {
        path: NodePath,
        html: String,
        tag_name: String,
        snippet: String,
    },

    /// Answer to a GetElementHtml command.
    ElementHtmlResponse {
        path: NodePath,
        html: String,
        tag_name: String,
        snippet: String,
    },

    /// The user asked for an AI edit of an image; the capability lives
    /// entirely in the host.
    ImageEditRequested { prompt: String, src: String },
}
