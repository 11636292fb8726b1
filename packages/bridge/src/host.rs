//! # Host Mirror
//!
//! The host application's view of the editor frame: the latest markup
//! snapshot, outline, and content height. The mirror is write-only from the
//! frame's perspective — every sync overwrites it wholesale, so it can lag
//! but never diverge permanently.

use menukit_dom::{NodePath, OutlineNode};

use crate::messages::EditorMessage;

/// Details of the most recently clicked content element.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickedElement {
    pub path: NodePath,
    pub html: String,
    pub tag_name: String,
    pub snippet: String,
}

/// Pending AI image edit request surfaced to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEditRequest {
    pub prompt: String,
    pub src: String,
}

#[derive(Debug, Clone, Default)]
pub struct HostMirror {
    html: Option<String>,
    outline: Vec<OutlineNode>,
    content_height: f64,
    last_clicked: Option<ClickedElement>,
    pending_image_edits: Vec<ImageEditRequest>,
}

impl HostMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame message into the mirror.
    pub fn apply(&mut self, message: EditorMessage) {
        match message {
            EditorMessage::TreeData { tree } => self.outline = tree,
            EditorMessage::HtmlSync { html } => self.html = Some(html),
            EditorMessage::ContentHeight { height } => self.content_height = height,
            EditorMessage::ElementClicked {
                path,
                html,
                tag_name,
                snippet,
            }
            | EditorMessage::ElementHtmlResponse {
                path,
                html,
                tag_name,
                snippet,
            } => {
                self.last_clicked = Some(ClickedElement {
                    path,
                    html,
                    tag_name,
                    snippet,
                });
            }
            EditorMessage::AiImageEdit { prompt, src } => {
                self.pending_image_edits
                    .push(ImageEditRequest { prompt, src });
            }
        }
    }

    /// Latest full-document snapshot, once one has arrived.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn outline(&self) -> &[OutlineNode] {
        &self.outline
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn last_clicked(&self) -> Option<&ClickedElement> {
        self.last_clicked.as_ref()
    }

    /// Hand off queued AI edit requests for processing.
    pub fn take_image_edits(&mut self) -> Vec<ImageEditRequest> {
        std::mem::take(&mut self.pending_image_edits)
    }
}
