//! Discovery of extension containers in a compilation's namespace tree.

use crate::classify::ExtensionContainer;
use crate::symbols::{Compilation, NamespaceId};

/// Walk the namespace tree of `comp` and collect every type that
/// qualifies as an extension container.
///
/// The traversal is pre-order over namespaces and read-only; the
/// resulting order carries no meaning and is re-sorted by the report
/// layer. Only direct namespace members are candidates: extension
/// methods cannot live in nested types, so the walk never descends into
/// a type's nested declarations.
pub fn discover_extension_containers(comp: &Compilation) -> Vec<ExtensionContainer<'_>> {
    let mut containers = Vec::new();
    visit_namespace(comp, Compilation::GLOBAL_NAMESPACE, &mut containers);
    containers
}

fn visit_namespace<'a>(
    comp: &'a Compilation,
    ns: NamespaceId,
    containers: &mut Vec<ExtensionContainer<'a>>,
) {
    let namespace = comp.namespace(ns);
    for &type_def in &namespace.types {
        // Cheap shape check first; the per-member scan only runs for
        // static non-generic top-level classes.
        if !comp.type_def(type_def).might_contain_extension_methods() {
            continue;
        }
        if let Some(container) = ExtensionContainer::classify(comp, type_def) {
            containers.push(container);
        }
    }
    for &child in &namespace.children {
        visit_namespace(comp, child, containers);
    }
}
