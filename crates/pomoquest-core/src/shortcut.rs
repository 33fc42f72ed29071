//! Quick-access shortcuts: web links and embedded documents.
//!
//! Document content is fixed at creation. Edits may rename any shortcut and
//! re-point a link, nothing else.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationError;
use crate::ids::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    Link,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: EntityId,
    pub name: String,
    pub kind: ShortcutKind,
    /// URL for links, `data:` URL for documents.
    pub content: String,
}

impl Shortcut {
    /// # Errors
    ///
    /// Rejects a blank name or a URL that does not parse as an absolute URL.
    pub fn link(id: EntityId, name: &str, url: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: clean_name(name)?,
            kind: ShortcutKind::Link,
            content: parse_url(url)?,
        })
    }

    /// # Errors
    ///
    /// Rejects a blank name or an empty payload.
    pub fn document(id: EntityId, name: &str, payload: String) -> Result<Self, ValidationError> {
        if payload.is_empty() {
            return Err(ValidationError::Empty { field: "document" });
        }
        Ok(Self {
            id,
            name: clean_name(name)?,
            kind: ShortcutKind::Document,
            content: payload,
        })
    }

    /// Apply `edit`, or `None` when it tries to touch document content.
    pub fn edited(&self, edit: &ShortcutEdit) -> Option<Shortcut> {
        let mut next = self.clone();
        if let Some(name) = &edit.name {
            next.name = name.clone();
        }
        if let Some(url) = &edit.url {
            if self.kind == ShortcutKind::Document {
                return None;
            }
            next.content = url.clone();
        }
        Some(next)
    }
}

/// Validated change to an existing shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ShortcutEdit {
    pub fn rename(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Some(clean_name(name)?),
            url: None,
        })
    }

    pub fn relink(url: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: None,
            url: Some(parse_url(url)?),
        })
    }
}

fn clean_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }
    Ok(name.to_string())
}

fn parse_url(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty { field: "url" });
    }
    Url::parse(input)
        .map(|_| input.to_string())
        .map_err(|e| ValidationError::InvalidUrl {
            input: input.to_string(),
            message: e.to_string(),
        })
}
