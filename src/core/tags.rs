//! Binder accumulating free-form capability tags.
//!
//! Tags tell apart models that implement the same process and protocol but
//! target different backends or fidelities, e.g. `bit-accurate` versus
//! `floating-pt`. They are additive over subclassing: a subclass sees its
//! parent's tags followed by its own.

use serde::Deserialize;

use crate::core::binder::{Binder, BinderKind};
use crate::core::metadata::{accumulate, ModelRecord};
use crate::core::registry::TypeRegistry;
use crate::core::types::TypeRef;
use crate::core::BindError;

/// One argument of [`Tags`]: a tag or a flat group of tags.
///
/// Groups may only contain plain tags; deeper nesting is representable so
/// that malformed input coming from configuration can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagArg {
    /// Single tag.
    Tag(String),
    /// Group expanded in place.
    Group(Vec<TagArg>),
}

impl From<&str> for TagArg {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_string())
    }
}

impl From<String> for TagArg {
    fn from(tag: String) -> Self {
        Self::Tag(tag)
    }
}

impl From<Vec<&str>> for TagArg {
    fn from(group: Vec<&str>) -> Self {
        Self::Group(group.into_iter().map(Self::from).collect())
    }
}

impl From<Vec<String>> for TagArg {
    fn from(group: Vec<String>) -> Self {
        Self::Group(group.into_iter().map(Self::Tag).collect())
    }
}

impl From<Vec<Self>> for TagArg {
    fn from(group: Vec<Self>) -> Self {
        Self::Group(group)
    }
}

impl<const N: usize> From<[&str; N]> for TagArg {
    fn from(group: [&str; N]) -> Self {
        Self::Group(group.into_iter().map(Self::from).collect())
    }
}

/// Appends tags to a model's `tag_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<String>,
}

impl Tags {
    /// Flatten `items` into one ordered tag list.
    pub fn new<I>(items: I) -> Result<Self, BindError>
    where
        I: IntoIterator,
        I::Item: Into<TagArg>,
    {
        let mut tags = Vec::new();
        for (position, item) in items.into_iter().enumerate() {
            match item.into() {
                TagArg::Tag(tag) => tags.push(tag),
                TagArg::Group(group) => {
                    if group.is_empty() {
                        return Err(invalid(format!("tag group at position {position} is empty")));
                    }
                    for member in group {
                        match member {
                            TagArg::Tag(tag) => tags.push(tag),
                            TagArg::Group(nested) => {
                                return Err(invalid(format!(
                                    "tag group at position {position} nests another group {nested:?}; \
                                     expected strings or a flat list of strings"
                                )));
                            }
                        }
                    }
                }
            }
        }
        Ok(Self { tags })
    }

    /// Flattened tags this binder appends.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

fn invalid(reason: String) -> BindError {
    BindError::InvalidArgument {
        binder: BinderKind::Tags,
        reason,
    }
}

/// Shorthand for [`Tags::new`].
pub fn tags<I>(items: I) -> Result<Tags, BindError>
where
    I: IntoIterator,
    I::Item: Into<TagArg>,
{
    Tags::new(items)
}

impl Binder for Tags {
    fn kind(&self) -> BinderKind {
        BinderKind::Tags
    }

    fn plan(&self, types: &TypeRegistry, target: &TypeRef) -> Result<ModelRecord, BindError> {
        let inherited = types.metadata(target).tag_list;
        Ok(ModelRecord {
            tag_list: Some(accumulate(&inherited, &self.tags)),
            ..ModelRecord::default()
        })
    }
}
