//! Document shapes delivered by the remote data gateway.
//!
//! These mirror the JSON payloads of the post/project detail endpoints
//! (camelCase fields, `type`-tagged diagrams). The gateway itself is an
//! external collaborator; the view layer only depends on these shapes.

use serde::{Deserialize, Serialize};

/// A blog post detail document. `content` is the rich-text HTML fragment
/// the enhancement pipeline consumes; it may be absent for drafts.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// A project detail document: a rich-text description plus named
/// diagrams rendered into slots after the description is committed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub diagrams: Vec<DiagramSpec>,
}

/// One named diagram in a project document. `name` is unique within the
/// document and derives the DOM slot id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiagramSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The closed set of diagram flavors, dispatched once at the
/// orchestrator boundary. Only [`DiagramKind::Mermaid`] needs the async
/// rendering engine; images and raw embeds are shown directly by the
/// shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Mermaid,
    Image,
    Embed,
}

impl DiagramSpec {
    /// Id of the DOM slot this diagram renders into, present in the
    /// committed fragment: `diagram-` plus the name with whitespace
    /// collapsed to hyphens.
    pub fn slot_id(&self) -> String {
        let mut id = String::with_capacity(self.name.len() + 8);
        id.push_str("diagram-");
        for part in self.name.split_whitespace() {
            if !id.ends_with('-') {
                id.push('-');
            }
            id.push_str(part);
        }
        id
    }
}
