//! Collaborator registries consumed during compilation: node-type subtype
//! lookup and namespace prefix resolution. The compiler only depends on the
//! traits; the in-memory implementations cover embedding and tests.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Blob XML namespace prefix used by the property micro-format.
pub const SV_PREFIX: &str = "sv";

/// Default URI bound to [`SV_PREFIX`].
pub const SV_NAMESPACE_URI: &str = "http://repoql.org/sv/1.0";

/// Repository-internal prefix carrying the pseudo properties.
pub const REPO_PREFIX: &str = "repo";

/// Default URI bound to [`REPO_PREFIX`].
pub const REPO_NAMESPACE_URI: &str = "http://repoql.org/repo/1.0";

lazy_static! {
    /// Prefixes every repository knows about without registration.
    static ref BUILTIN_NAMESPACES: HashMap<String, String> = {
        let mut map = HashMap::new();
        map.insert(SV_PREFIX.to_string(), SV_NAMESPACE_URI.to_string());
        map.insert(REPO_PREFIX.to_string(), REPO_NAMESPACE_URI.to_string());
        map
    };
}

/// Node-type definitions live elsewhere; compilation only needs existence
/// checks and the subtype closure for type-membership filters.
pub trait NodeTypeRegistry {
    fn has_node_type(&self, name: &str) -> bool;

    /// All direct and indirect subtypes of `name`, in registration order,
    /// without duplicates. The named type itself is not included.
    fn subtypes_of(&self, name: &str) -> Vec<String>;
}

/// Prefix → URI lookup for namespaced names in node-name comparisons.
pub trait NamespaceRegistry {
    fn uri_for(&self, prefix: &str) -> Option<String>;
}

impl NamespaceRegistry for HashMap<String, String> {
    fn uri_for(&self, prefix: &str) -> Option<String> {
        self.get(prefix).cloned()
    }
}

/// Registration-ordered node-type store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNodeTypeRegistry {
    /// Types in registration order.
    types: Vec<String>,
    /// Supertype → direct subtypes, each in registration order.
    direct_subtypes: HashMap<String, Vec<String>>,
}

impl InMemoryNodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type under zero or more supertypes. Supertypes do not
    /// have to exist yet; forward references are resolved at lookup time.
    pub fn register_node_type(&mut self, name: &str, supertypes: &[&str]) {
        if !self.types.iter().any(|t| t == name) {
            self.types.push(name.to_string());
        }
        for supertype in supertypes {
            let children = self.direct_subtypes.entry(supertype.to_string()).or_default();
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }
}

impl NodeTypeRegistry for InMemoryNodeTypeRegistry {
    fn has_node_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t == name)
    }

    fn subtypes_of(&self, name: &str) -> Vec<String> {
        let mut closure: Vec<String> = Vec::new();
        let mut queue: Vec<&str> = vec![name];
        while let Some(current) = queue.pop() {
            if let Some(children) = self.direct_subtypes.get(current) {
                for child in children {
                    if child != name && !closure.iter().any(|c| c == child) {
                        closure.push(child.clone());
                        queue.push(child);
                    }
                }
            }
        }
        closure
    }
}

/// Namespace store seeded with the built-in prefixes.
#[derive(Debug, Clone)]
pub struct InMemoryNamespaceRegistry {
    namespaces: HashMap<String, String>,
}

impl Default for InMemoryNamespaceRegistry {
    fn default() -> Self {
        InMemoryNamespaceRegistry {
            namespaces: BUILTIN_NAMESPACES.clone(),
        }
    }
}

impl InMemoryNamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_namespace(&mut self, prefix: &str, uri: &str) {
        self.namespaces.insert(prefix.to_string(), uri.to_string());
    }
}

impl NamespaceRegistry for InMemoryNamespaceRegistry {
    fn uri_for(&self, prefix: &str) -> Option<String> {
        self.namespaces.get(prefix).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_hierarchy() -> InMemoryNodeTypeRegistry {
        let mut registry = InMemoryNodeTypeRegistry::new();
        registry.register_node_type("repo:base", &[]);
        registry.register_node_type("repo:file", &["repo:base"]);
        registry.register_node_type("repo:image", &["repo:file"]);
        registry.register_node_type("repo:video", &["repo:file"]);
        registry
    }

    #[test]
    fn subtype_closure_is_transitive_and_duplicate_free() {
        let registry = registry_with_hierarchy();
        let closure = registry.subtypes_of("repo:base");
        assert_eq!(closure, vec!["repo:file", "repo:image", "repo:video"]);
    }

    #[test]
    fn leaf_types_have_empty_closure() {
        let registry = registry_with_hierarchy();
        assert!(registry.subtypes_of("repo:image").is_empty());
        assert!(registry.subtypes_of("unregistered").is_empty());
    }

    #[test]
    fn diamond_inheritance_reports_each_subtype_once() {
        let mut registry = registry_with_hierarchy();
        // repo:image now hangs off both repo:file and repo:base.
        registry.register_node_type("repo:image", &["repo:base"]);
        let closure = registry.subtypes_of("repo:base");
        assert_eq!(
            closure.iter().filter(|t| t.as_str() == "repo:image").count(),
            1
        );
    }

    #[test]
    fn builtin_prefixes_resolve_without_registration() {
        let registry = InMemoryNamespaceRegistry::new();
        assert_eq!(registry.uri_for("sv"), Some(SV_NAMESPACE_URI.to_string()));
        assert_eq!(registry.uri_for("dc"), None);
    }

    #[test]
    fn hash_map_acts_as_a_namespace_registry() {
        let mut map = HashMap::new();
        map.insert("dc".to_string(), "http://purl.org/dc/elements/1.1/".to_string());
        assert_eq!(
            map.uri_for("dc"),
            Some("http://purl.org/dc/elements/1.1/".to_string())
        );
    }
}
