use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque descriptor identifying a document element by id and/or class list.
///
/// The core never locates elements itself; a `TargetRef` is handed to the
/// injected [`Environment`](crate::Environment), which resolves it to zero or
/// one live [`Element`](crate::Element). The field names match the serialized
/// script format produced by the surrounding tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "classList", default, skip_serializing_if = "Option::is_none")]
    pub class_list: Option<String>,
}

impl TargetRef {
    /// Target an element by its id attribute.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            class_list: None,
        }
    }

    /// Target an element by its class list (space separated class names).
    pub fn by_class(class_list: impl Into<String>) -> Self {
        Self {
            id: None,
            class_list: Some(class_list.into()),
        }
    }

    /// True when the descriptor carries nothing an environment could match on.
    /// Recorded scripts sometimes hold an empty class string instead of null,
    /// so empty strings count as absent.
    pub fn is_blank(&self) -> bool {
        !self.id.as_deref().is_some_and(|s| !s.is_empty())
            && !self.class_list.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl From<&str> for TargetRef {
    fn from(s: &str) -> Self {
        match s {
            _ if s.starts_with('#') => Self::by_id(&s[1..]),
            _ if s.starts_with("id:") => Self::by_id(&s[3..]),
            _ if s.to_lowercase().starts_with("class:") => Self::by_class(&s["class:".len()..]),
            _ if s.to_lowercase().starts_with("classlist:") => {
                Self::by_class(&s["classlist:".len()..])
            }
            // Bare strings are treated as ids, the most common authored form.
            _ => Self::by_id(s),
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.id.as_deref(), self.class_list.as_deref()) {
            (Some(id), Some(cl)) if !id.is_empty() && !cl.is_empty() => {
                write!(f, "id={id} classList={cl}")
            }
            (Some(id), _) if !id.is_empty() => write!(f, "id={id}"),
            (_, Some(cl)) if !cl.is_empty() => write!(f, "classList={cl}"),
            _ => write!(f, "<blank target>"),
        }
    }
}
