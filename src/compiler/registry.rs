use crate::error::CompileError;
use crate::graph::wire::{RawNode, decode_kind};
use crate::graph::{Node, Subtype};
use ahash::AHashMap;
use tracing::{debug, warn};

/// Resolves subtype names found in editor exports to the built-in [`Subtype`]s.
///
/// Built-in names always resolve to themselves and cannot be aliased. Aliases
/// let an editor keep its own naming (e.g. `"productIdCondition"`) without
/// touching the mapping table.
#[derive(Debug, Clone, Default)]
pub struct SubtypeRegistry {
    aliases: AHashMap<String, Subtype>,
}

impl SubtypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `user_name` as another name for the built-in subtype
    /// `builtin_name`. Returns `false` and registers nothing if the built-in
    /// name is unknown or `user_name` is itself a built-in name.
    pub fn alias(&mut self, user_name: &str, builtin_name: &str) -> bool {
        if Subtype::from_name(user_name).is_some() {
            warn!("Ignoring alias '{}': it is a built-in subtype name", user_name);
            return false;
        }
        match Subtype::from_name(builtin_name) {
            Some(subtype) => {
                self.aliases.insert(user_name.to_string(), subtype);
                true
            }
            None => false,
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Subtype> {
        Subtype::from_name(name).or_else(|| self.aliases.get(name).copied())
    }

    /// Classifies a raw node and decodes its data into a typed [`Node`].
    pub fn classify(&self, raw: &RawNode) -> Result<Node, CompileError> {
        let unknown = || CompileError::UnknownNodeKind {
            node_id: raw.id.clone(),
            kind: raw.kind.clone().unwrap_or_default(),
            subtype: raw.subtype.clone(),
        };

        let subtype = self.resolve(&raw.subtype).ok_or_else(unknown)?;
        if let Some(kind) = &raw.kind {
            if kind != subtype.family().as_str() {
                return Err(unknown());
            }
        }

        debug!("Classified node '{}' as {}", raw.id, subtype);
        let kind = decode_kind(subtype, &raw.id, &raw.data)?;
        Ok(Node::new(raw.id.clone(), kind))
    }
}
