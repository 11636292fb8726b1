//! # Wire Messages
//!
//! The JSON protocol between the host application and the editor frame.
//! Messages are tagged objects (`{"type": "...", ...}`) with SCREAMING_CASE
//! type names and camelCase fields; these names are the protocol's public
//! surface and never change with internal refactors.

use menukit_dom::{NodePath, OutlineNode};
use menukit_editor::{Command, Direction, Event, InsertPosition};
use serde::{Deserialize, Serialize};

/// Messages the host sends into the editor frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "GET_TREE")]
    GetTree,

    #[serde(rename = "SELECT_ELEMENT")]
    SelectElement { path: NodePath },

    #[serde(rename = "DELETE_ELEMENT")]
    DeleteElement { path: NodePath },

    #[serde(rename = "MOVE_ELEMENT")]
    MoveElement {
        path: NodePath,
        direction: Direction,
    },

    #[serde(rename = "INSERT_ELEMENT")]
    InsertElement {
        html: String,
        position: InsertPosition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor: Option<NodePath>,
    },

    #[serde(rename = "EDIT_ELEMENT")]
    EditElement { path: NodePath, html: String },

    #[serde(rename = "GET_ELEMENT_HTML")]
    GetElementHtml { path: NodePath },
}

/// Messages the editor frame sends back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditorMessage {
    #[serde(rename = "TREE_DATA")]
    TreeData { tree: Vec<OutlineNode> },

    #[serde(rename = "HTML_SYNC")]
    HtmlSync { html: String },

    #[serde(rename = "CONTENT_HEIGHT")]
    ContentHeight { height: f64 },

    #[serde(rename = "ELEMENT_CLICKED")]
    ElementClicked {
        path: NodePath,
        html: String,
        #[serde(rename = "tagName")]
        tag_name: String,
        snippet: String,
    },

    #[serde(rename = "ELEMENT_HTML_RESPONSE")]
    ElementHtmlResponse {
        path: NodePath,
        html: String,
        #[serde(rename = "tagName")]
        tag_name: String,
        snippet: String,
    },

    #[serde(rename = "AI_IMAGE_EDIT")]
    AiImageEdit { prompt: String, src: String },
}

impl From<HostMessage> for Command {
    fn from(message: HostMessage) -> Self {
        match message {
            HostMessage::GetTree => Command::RequestOutline,
            HostMessage::SelectElement { path } => Command::Select { path },
            HostMessage::DeleteElement { path } => Command::Delete { path },
            HostMessage::MoveElement { path, direction } => Command::Move { path, direction },
            HostMessage::InsertElement {
                html,
                position,
                anchor,
            } => Command::Insert {
                html,
                position,
                anchor,
            },
            HostMessage::EditElement { path, html } => Command::Replace { path, html },
            HostMessage::GetElementHtml { path } => Command::GetElementHtml { path },
        }
    }
}

impl From<Event> for EditorMessage {
    fn from(event: Event) -> Self {
        match event {
            Event::OutlineUpdated(tree) => EditorMessage::TreeData { tree },
            Event::DocumentResynced(html) => EditorMessage::HtmlSync { html },
            Event::ContentHeightChanged(height) => EditorMessage::ContentHeight { height },
            Event::ElementClicked {
                path,
                html,
                tag_name,
                snippet,
            } => EditorMessage::ElementClicked {
                path,
                html,
                tag_name,
                snippet,
            },
            Event::ElementHtmlResponse {
                path,
                html,
                tag_name,
                snippet,
            } => EditorMessage::ElementHtmlResponse {
                path,
                html,
                tag_name,
                snippet,
            },
            Event::ImageEditRequested { prompt, src } => {
                EditorMessage::AiImageEdit { prompt, src }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn host_messages_use_protocol_names() {
        let message: HostMessage = serde_json::from_value(json!({
            "type": "MOVE_ELEMENT",
            "path": [2, 1],
            "direction": "up",
        }))
        .unwrap();
        assert_eq!(
            message,
            HostMessage::MoveElement {
                path: NodePath::new(vec![2, 1]),
                direction: Direction::Up,
            }
        );
    }

    #[test]
    fn insert_anchor_is_optional() {
        let message: HostMessage = serde_json::from_value(json!({
            "type": "INSERT_ELEMENT",
            "html": "<hr>",
            "position": "top",
        }))
        .unwrap();
        assert_eq!(
            message,
            HostMessage::InsertElement {
                html: "<hr>".into(),
                position: InsertPosition::Top,
                anchor: None,
            }
        );
    }

    #[test]
    fn editor_messages_serialize_with_camel_case_fields() {
        let message = EditorMessage::ElementClicked {
            path: NodePath::new(vec![0]),
            html: "<p>Soup</p>".into(),
            tag_name: "P".into(),
            snippet: "Soup".into(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "ELEMENT_CLICKED",
                "path": [0],
                "html": "<p>Soup</p>",
                "tagName": "P",
                "snippet": "Soup",
            })
        );
    }

    #[test]
    fn edit_element_maps_to_replace() {
        let command: Command = HostMessage::EditElement {
            path: NodePath::new(vec![1]),
            html: "<p>new</p>".into(),
        }
        .into();
        assert_eq!(
            command,
            Command::Replace {
                path: NodePath::new(vec![1]),
                html: "<p>new</p>".into(),
            }
        );
    }

    #[test]
    fn unknown_message_type_fails_to_decode() {
        let result: Result<HostMessage, _> = serde_json::from_value(json!({
            "type": "REBOOT_FRAME",
        }));
        assert!(result.is_err());
    }
}
