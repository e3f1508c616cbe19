//! The C# front-end: parse a unit's sources and bind a symbol graph.
//!
//! Binding is two-pass. Pass 1 declares every namespace and type in the
//! unit (nested types included) so pass 2 can resolve names regardless
//! of declaration order across files. Pass 2 binds method signatures:
//! modifiers, type parameters, and parameter lists with their type
//! expressions resolved to interned [`TypeId`]s.
//!
//! Resolution is deliberately compilation-local: a name is looked up
//! against the method's and container's type parameters, the unit's own
//! declarations (walking the enclosing namespace chain outward), the
//! file's `using` imports, and the predefined-type vocabulary. Anything
//! else binds to an *error type*, the same observable state a real
//! compiler reports for a missing reference, which the report's
//! error-type column exists to count.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

use crate::symbols::{
    Accessibility, AssemblyIdentity, Builtin, Compilation, Method, NamedDef, NamespaceId,
    Parameter, PassingMode, TypeDef, TypeDefId, TypeDefKind, TypeId, TypeParamOwner,
    TypeRef,
};

/// One source file of a compilation unit.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: Utf8PathBuf,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to load the C# grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("failed to parse {path}")]
    Parse { path: Utf8PathBuf },
}

/// Parse and bind `sources` into a compilation.
pub fn compile(
    assembly: AssemblyIdentity,
    sources: &[SourceFile],
) -> Result<Compilation, CompileError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_c_sharp::LANGUAGE.into())?;

    let mut parsed: Vec<(&SourceFile, Tree)> = Vec::with_capacity(sources.len());
    for source in sources {
        let tree = parser
            .parse(&source.text, None)
            .ok_or_else(|| CompileError::Parse { path: source.path.clone() })?;
        parsed.push((source, tree));
    }

    let mut binder = Binder::new(assembly);
    for (source, tree) in &parsed {
        binder.declare_scope(
            tree.root_node(),
            &source.text,
            Compilation::GLOBAL_NAMESPACE,
            None,
        );
    }
    for (source, tree) in &parsed {
        let usings = collect_usings(tree.root_node(), &source.text);
        binder.bind_scope(
            tree.root_node(),
            &source.text,
            Compilation::GLOBAL_NAMESPACE,
            None,
            &usings,
        );
    }
    Ok(binder.comp)
}

fn node_text<'a>(node: Node<'_>, src: &'a str) -> &'a str {
    &src[node.byte_range()]
}

/// Node kinds that introduce a type definition.
fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "struct_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "record_struct_declaration"
            | "delegate_declaration"
    )
}

/// Node kinds a parameter or return type expression can take.
fn is_type_expression(kind: &str) -> bool {
    matches!(
        kind,
        "predefined_type"
            | "identifier"
            | "qualified_name"
            | "alias_qualified_name"
            | "generic_name"
            | "array_type"
            | "nullable_type"
            | "pointer_type"
            | "tuple_type"
            | "function_pointer_type"
            | "ref_type"
    )
}

/// Type-body members that are not methods. Comments and preprocessor
/// nodes are not members and must not show up in the member scan.
fn is_non_method_member(kind: &str) -> bool {
    matches!(
        kind,
        "field_declaration"
            | "property_declaration"
            | "event_field_declaration"
            | "event_declaration"
            | "constructor_declaration"
            | "destructor_declaration"
            | "indexer_declaration"
            | "operator_declaration"
            | "conversion_operator_declaration"
    )
}

/// All `using` directive targets in a file, at any nesting depth.
fn collect_usings(root: Node<'_>, src: &str) -> Vec<String> {
    let mut usings = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "using_directive" => {
                    let mut inner = child.walk();
                    if let Some(target) = child.named_children(&mut inner).last() {
                        usings.push(node_text(target, src).to_string());
                    }
                }
                "namespace_declaration" | "file_scoped_namespace_declaration" => {
                    stack.push(child);
                }
                _ => {}
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            stack.push(body);
        }
    }
    usings
}

struct Binder {
    comp: Compilation,
    /// `(fully-qualified name, arity)` of every declared type.
    declared: HashMap<(String, usize), TypeDefId>,
}

/// Name-resolution context for one method's signature.
struct ResolveCtx<'a> {
    usings: &'a [String],
    namespace: NamespaceId,
    containing_type: TypeDefId,
    method_id: crate::symbols::MethodId,
    method_type_params: &'a [String],
}

impl Binder {
    fn new(assembly: AssemblyIdentity) -> Self {
        Self {
            comp: Compilation::new(assembly),
            declared: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Pass 1: declarations
    // ------------------------------------------------------------------

    fn declare_scope(
        &mut self,
        node: Node<'_>,
        src: &str,
        mut ns: NamespaceId,
        parent: Option<TypeDefId>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "namespace_declaration" => {
                    let inner = self.namespace_of(child, src, ns);
                    if let Some(body) = child.child_by_field_name("body") {
                        self.declare_scope(body, src, inner, None);
                    }
                }
                "file_scoped_namespace_declaration" => {
                    // Declarations may be nested inside the node or be
                    // later siblings; cover both.
                    ns = self.namespace_of(child, src, ns);
                    self.declare_scope(child, src, ns, None);
                }
                kind if is_type_declaration(kind) => {
                    self.declare_type(child, src, ns, parent);
                }
                _ => {}
            }
        }
    }

    fn namespace_of(&mut self, node: Node<'_>, src: &str, outer: NamespaceId) -> NamespaceId {
        let name = node.child_by_field_name("name").or_else(|| {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .find(|c| matches!(c.kind(), "qualified_name" | "identifier"))
        });
        let Some(name) = name else {
            return outer;
        };
        let mut current = outer;
        for segment in node_text(name, src).split('.') {
            let segment = segment.trim();
            if !segment.is_empty() {
                current = self.comp.ensure_namespace(current, segment);
            }
        }
        current
    }

    fn declare_type(
        &mut self,
        node: Node<'_>,
        src: &str,
        ns: NamespaceId,
        parent: Option<TypeDefId>,
    ) {
        let Some(name) = type_name(node, src) else {
            return;
        };
        let modifiers = modifier_texts(node, src);
        let modifier_refs: Vec<&str> = modifiers.iter().map(String::as_str).collect();
        let type_params = type_parameter_names(node, src);
        let kind = match node.kind() {
            "class_declaration" => TypeDefKind::Class,
            "struct_declaration" => TypeDefKind::Struct,
            "interface_declaration" => TypeDefKind::Interface,
            "enum_declaration" => TypeDefKind::Enum,
            "delegate_declaration" => TypeDefKind::Delegate,
            "record_struct_declaration" => TypeDefKind::RecordStruct,
            _ => {
                // record_declaration: `record struct` carries a struct
                // keyword child.
                let mut cursor = node.walk();
                if node.children(&mut cursor).any(|c| c.kind() == "struct") {
                    TypeDefKind::RecordStruct
                } else {
                    TypeDefKind::RecordClass
                }
            }
        };
        let default_access = if parent.is_some() {
            Accessibility::Private
        } else {
            Accessibility::Internal
        };
        let arity = type_params.len();
        let id = self.comp.add_type(TypeDef {
            name,
            namespace: ns,
            parent_type: parent,
            kind,
            accessibility: Accessibility::from_modifiers(&modifier_refs, default_access),
            is_static: modifiers.iter().any(|m| m == "static"),
            type_params,
            members: Vec::new(),
            nested_types: Vec::new(),
        });
        self.declared
            .insert((self.comp.qualified_type_name(id), arity), id);

        if let Some(body) = node.child_by_field_name("body") {
            self.declare_scope(body, src, ns, Some(id));
        }
    }

    // ------------------------------------------------------------------
    // Pass 2: member binding
    // ------------------------------------------------------------------

    fn bind_scope(
        &mut self,
        node: Node<'_>,
        src: &str,
        mut ns: NamespaceId,
        parent: Option<TypeDefId>,
        usings: &[String],
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "namespace_declaration" => {
                    let inner = self.namespace_of(child, src, ns);
                    if let Some(body) = child.child_by_field_name("body") {
                        self.bind_scope(body, src, inner, None, usings);
                    }
                }
                "file_scoped_namespace_declaration" => {
                    ns = self.namespace_of(child, src, ns);
                    self.bind_scope(child, src, ns, None, usings);
                }
                kind if is_type_declaration(kind) => {
                    self.bind_type(child, src, ns, parent, usings);
                }
                _ => {}
            }
        }
    }

    fn bind_type(
        &mut self,
        node: Node<'_>,
        src: &str,
        ns: NamespaceId,
        parent: Option<TypeDefId>,
        usings: &[String],
    ) {
        let Some(name) = type_name(node, src) else {
            return;
        };
        let arity = type_parameter_names(node, src).len();
        let key = match parent {
            Some(p) => (format!("{}.{}", self.comp.qualified_type_name(p), name), arity),
            None => {
                let prefix = self.comp.namespace_path(ns);
                let fq = if prefix.is_empty() { name } else { format!("{prefix}.{name}") };
                (fq, arity)
            }
        };
        let Some(&type_id) = self.declared.get(&key) else {
            return;
        };

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            let kind = member.kind();
            if kind == "method_declaration" {
                if !self.bind_method(type_id, member, src, usings) {
                    // Unparseable method shapes still occupy a member
                    // slot.
                    self.comp.add_other_member(type_id);
                }
            } else if is_type_declaration(kind) {
                self.comp.add_other_member(type_id);
                self.bind_type(member, src, ns, Some(type_id), usings);
            } else if is_non_method_member(kind) {
                self.comp.add_other_member(type_id);
            }
        }
    }

    /// Bind one method declaration. Returns false when the declaration
    /// is too malformed to model as a method.
    fn bind_method(
        &mut self,
        containing_type: TypeDefId,
        node: Node<'_>,
        src: &str,
        usings: &[String],
    ) -> bool {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        let Some(param_list_index) =
            children.iter().position(|c| c.kind() == "parameter_list")
        else {
            return false;
        };
        // The name is the identifier closest to the parameter list; a
        // type_parameter_list may sit between them.
        let Some(name_index) = children[..param_list_index]
            .iter()
            .rposition(|c| c.kind() == "identifier")
        else {
            return false;
        };
        let name = node_text(children[name_index], src).to_string();

        let modifiers = modifier_texts(node, src);
        let modifier_refs: Vec<&str> = modifiers.iter().map(String::as_str).collect();
        let return_text = children[..name_index]
            .iter()
            .rev()
            .find(|c| is_type_expression(c.kind()))
            .map(|c| node_text(*c, src).to_string())
            .unwrap_or_else(|| "void".to_string());
        let type_params = type_parameter_names(node, src);
        let constraints_text: Vec<String> = children
            .iter()
            .filter(|c| c.kind() == "type_parameter_constraints_clause")
            .map(|c| node_text(*c, src).to_string())
            .collect();

        let method_id = self.comp.next_method_id();
        let def = self.comp.type_def(containing_type);
        let container_can_hold_extensions = def.might_contain_extension_methods();
        let namespace = def.namespace;
        let method_type_params = type_params.clone();
        let ctx = ResolveCtx {
            usings,
            namespace,
            containing_type,
            method_id,
            method_type_params: &method_type_params,
        };

        let mut params = Vec::new();
        let param_list = children[param_list_index];
        let mut plist_cursor = param_list.walk();
        for param_node in param_list.named_children(&mut plist_cursor) {
            if param_node.kind() != "parameter" {
                continue;
            }
            params.push(self.bind_parameter(param_node, src, &ctx));
        }

        let is_extension_marked =
            container_can_hold_extensions && params.first().is_some_and(|p: &Parameter| p.is_this);

        self.comp.add_method(Method {
            name,
            containing_type,
            accessibility: Accessibility::from_modifiers(&modifier_refs, Accessibility::Private),
            is_static: modifiers.iter().any(|m| m == "static"),
            type_params,
            params,
            is_extension_marked,
            return_text,
            constraints_text,
        });
        true
    }

    fn bind_parameter(&mut self, node: Node<'_>, src: &str, ctx: &ResolveCtx<'_>) -> Parameter {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();

        let name_node = node.child_by_field_name("name").or_else(|| {
            children
                .iter()
                .copied()
                .filter(|c| c.kind() == "identifier")
                .last()
        });
        let type_node = node.child_by_field_name("type").or_else(|| {
            children
                .iter()
                .copied()
                .find(|c| {
                    is_type_expression(c.kind())
                        && name_node.is_none_or(|n| n.byte_range() != c.byte_range())
                })
        });

        // Modifier keywords appear between attributes and the type.
        // Token-split so a wrapper node covering `ref readonly` still
        // yields its parts.
        let type_start = type_node.map_or(usize::MAX, |t| t.start_byte());
        let mut is_this = false;
        let mut mode = PassingMode::Value;
        for child in &children {
            if child.start_byte() >= type_start || child.kind() == "attribute_list" {
                continue;
            }
            for token in node_text(*child, src).split_whitespace() {
                match token {
                    "this" => is_this = true,
                    "ref" => mode = PassingMode::Ref,
                    "out" => mode = PassingMode::Out,
                    "in" => mode = PassingMode::In,
                    _ => {}
                }
            }
        }

        let default_text = children
            .iter()
            .find(|c| c.kind() == "equals_value_clause")
            .map(|c| node_text(*c, src).trim_start_matches('=').trim().to_string());

        let ty = match type_node {
            Some(t) => self.resolve_type(t, src, ctx),
            None => {
                let text = node_text(node, src).to_string();
                self.comp.intern(TypeRef::Named { defn: NamedDef::Error(text), args: vec![] })
            }
        };

        Parameter {
            name: name_node.map_or_else(String::new, |n| node_text(n, src).to_string()),
            ty,
            mode,
            is_this,
            default_text,
        }
    }

    // ------------------------------------------------------------------
    // Type expression resolution
    // ------------------------------------------------------------------

    fn resolve_type(&mut self, node: Node<'_>, src: &str, ctx: &ResolveCtx<'_>) -> TypeId {
        match node.kind() {
            "predefined_type" => {
                let text = node_text(node, src);
                match Builtin::from_keyword(text) {
                    Some(b) => self
                        .comp
                        .intern(TypeRef::Named { defn: NamedDef::Builtin(b), args: vec![] }),
                    None => self.error_type(text, vec![]),
                }
            }
            "identifier" => {
                let text = node_text(node, src).to_string();
                self.resolve_name(&text, vec![], ctx)
            }
            "generic_name" => {
                let (name, args) = self.split_generic(node, src, ctx);
                self.resolve_name(&name, args, ctx)
            }
            "qualified_name" => {
                let (name, args) = self.split_qualified(node, src, ctx);
                self.resolve_name(&name, args, ctx)
            }
            "alias_qualified_name" => {
                // `global::Ns.Type`: strip the alias and resolve the
                // remainder as a qualified name.
                let text = node_text(node, src);
                let stripped = text.split_once("::").map_or(text, |(_, rest)| rest);
                match node.child_by_field_name("name") {
                    Some(name) if name.kind() == "generic_name" => {
                        let (last, args) = self.split_generic(name, src, ctx);
                        let prefix = stripped.rsplit_once('.').map_or("", |(p, _)| p);
                        let full = if prefix.is_empty() {
                            last
                        } else {
                            format!("{prefix}.{last}")
                        };
                        self.resolve_name(&full, args, ctx)
                    }
                    _ => self.resolve_name(stripped, vec![], ctx),
                }
            }
            "array_type" => {
                let element = match node.child_by_field_name("type") {
                    Some(t) => self.resolve_type(t, src, ctx),
                    None => self.error_type(node_text(node, src), vec![]),
                };
                let mut cursor = node.walk();
                let ranks: Vec<u32> = node
                    .children(&mut cursor)
                    .filter(|c| c.kind() == "array_rank_specifier")
                    .map(|c| node_text(c, src).matches(',').count() as u32 + 1)
                    .collect();
                let mut ty = element;
                for &rank in ranks.iter().rev() {
                    ty = self.comp.intern(TypeRef::Array { element: ty, rank });
                }
                if ranks.is_empty() {
                    ty = self.comp.intern(TypeRef::Array { element: ty, rank: 1 });
                }
                ty
            }
            "nullable_type" => {
                let inner = match node
                    .child_by_field_name("type")
                    .or_else(|| first_named_type_child(node))
                {
                    Some(t) => Some(self.resolve_type(t, src, ctx)),
                    None => None,
                };
                match inner {
                    Some(inner) if self.comp.is_value_type(inner) => {
                        self.comp.intern(TypeRef::Named {
                            defn: NamedDef::Builtin(Builtin::Nullable),
                            args: vec![inner],
                        })
                    }
                    // Reference (or unresolved) nullability is an
                    // annotation, not a distinct symbol.
                    Some(inner) => inner,
                    None => self.error_type(node_text(node, src), vec![]),
                }
            }
            "pointer_type" => {
                let pointee = match node
                    .child_by_field_name("type")
                    .or_else(|| first_named_type_child(node))
                {
                    Some(t) => self.resolve_type(t, src, ctx),
                    None => self.error_type(node_text(node, src), vec![]),
                };
                self.comp.intern(TypeRef::Pointer { pointee })
            }
            "tuple_type" => {
                let mut cursor = node.walk();
                let elements: Vec<Node<'_>> = node
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() == "tuple_element")
                    .collect();
                let mut args = Vec::with_capacity(elements.len());
                for element in elements {
                    let arg = match element
                        .child_by_field_name("type")
                        .or_else(|| first_named_type_child(element))
                    {
                        Some(t) => self.resolve_type(t, src, ctx),
                        None => self.error_type(node_text(element, src), vec![]),
                    };
                    args.push(arg);
                }
                self.comp.intern(TypeRef::Named {
                    defn: NamedDef::Builtin(Builtin::ValueTuple),
                    args,
                })
            }
            "function_pointer_type" => {
                let text = node_text(node, src).to_string();
                self.comp.intern(TypeRef::FunctionPointer { text })
            }
            "ref_type" => {
                // `ref` in a type position wraps the underlying type;
                // passing mode is tracked on the parameter.
                match node.child_by_field_name("type").or_else(|| first_named_type_child(node)) {
                    Some(inner) => self.resolve_type(inner, src, ctx),
                    None => self.error_type(node_text(node, src), vec![]),
                }
            }
            _ => self.error_type(node_text(node, src), vec![]),
        }
    }

    fn split_generic(
        &mut self,
        node: Node<'_>,
        src: &str,
        ctx: &ResolveCtx<'_>,
    ) -> (String, Vec<TypeId>) {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "identifier")
            .map(|c| node_text(c, src).to_string())
            .unwrap_or_default();
        let mut args = Vec::new();
        let mut cursor = node.walk();
        if let Some(arg_list) = node
            .children(&mut cursor)
            .find(|c| c.kind() == "type_argument_list")
        {
            let mut arg_cursor = arg_list.walk();
            let arg_nodes: Vec<Node<'_>> = arg_list.named_children(&mut arg_cursor).collect();
            for arg in arg_nodes {
                args.push(self.resolve_type(arg, src, ctx));
            }
        }
        (name, args)
    }

    fn split_qualified(
        &mut self,
        node: Node<'_>,
        src: &str,
        ctx: &ResolveCtx<'_>,
    ) -> (String, Vec<TypeId>) {
        let qualifier = node
            .child_by_field_name("qualifier")
            .map(|q| node_text(q, src).to_string())
            .unwrap_or_default();
        match node.child_by_field_name("name") {
            Some(last) if last.kind() == "generic_name" => {
                let (name, args) = self.split_generic(last, src, ctx);
                let full = if qualifier.is_empty() {
                    name
                } else {
                    format!("{qualifier}.{name}")
                };
                (full, args)
            }
            Some(last) => {
                let name = node_text(last, src);
                let full = if qualifier.is_empty() {
                    name.to_string()
                } else {
                    format!("{qualifier}.{name}")
                };
                (full, vec![])
            }
            None => (node_text(node, src).to_string(), vec![]),
        }
    }

    /// Resolve a (possibly dotted) type name with already-resolved type
    /// arguments.
    fn resolve_name(&mut self, name: &str, args: Vec<TypeId>, ctx: &ResolveCtx<'_>) -> TypeId {
        let arity = args.len();

        // The method's own type parameters shadow everything else.
        if arity == 0 && !name.contains('.') {
            if let Some(index) = ctx.method_type_params.iter().position(|p| p == name) {
                return self.comp.intern(TypeRef::TypeParam {
                    owner: TypeParamOwner::Method(ctx.method_id),
                    index: index as u32,
                    name: name.to_string(),
                });
            }
            // Then the containing type chain's parameters, innermost
            // first.
            let mut current = Some(ctx.containing_type);
            while let Some(def_id) = current {
                let (position, parent) = {
                    let def = self.comp.type_def(def_id);
                    (
                        def.type_params.iter().position(|p| p == name),
                        def.parent_type,
                    )
                };
                if let Some(index) = position {
                    return self.comp.intern(TypeRef::TypeParam {
                        owner: TypeParamOwner::Type(def_id),
                        index: index as u32,
                        name: name.to_string(),
                    });
                }
                current = parent;
            }
        }

        // Sibling nested types of the containing chain.
        if !name.contains('.') {
            let mut current = Some(ctx.containing_type);
            while let Some(def_id) = current {
                let (found, parent) = {
                    let def = self.comp.type_def(def_id);
                    let found = def.nested_types.iter().copied().find(|&n| {
                        let nested = self.comp.type_def(n);
                        nested.name == name && nested.type_params.len() == arity
                    });
                    (found, def.parent_type)
                };
                if let Some(nested) = found {
                    return self
                        .comp
                        .intern(TypeRef::Named { defn: NamedDef::Declared(nested), args });
                }
                current = parent;
            }
        }

        // Enclosing namespace chain, innermost scope first.
        let mut ns = Some(ctx.namespace);
        while let Some(ns_id) = ns {
            let prefix = self.comp.namespace_path(ns_id);
            let candidate = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            if let Some(&def) = self.declared.get(&(candidate, arity)) {
                return self
                    .comp
                    .intern(TypeRef::Named { defn: NamedDef::Declared(def), args });
            }
            ns = self.comp.namespace(ns_id).parent;
        }

        // `using` imports.
        for import in ctx.usings {
            if let Some(&def) = self.declared.get(&(format!("{import}.{name}"), arity)) {
                return self
                    .comp
                    .intern(TypeRef::Named { defn: NamedDef::Declared(def), args });
            }
        }

        // Predefined BCL names, qualified or via `using System`.
        if let Some(builtin) = Builtin::from_qualified(name) {
            return self
                .comp
                .intern(TypeRef::Named { defn: NamedDef::Builtin(builtin), args });
        }
        if !name.contains('.') && ctx.usings.iter().any(|u| u == "System")
            && let Some(builtin) = Builtin::from_qualified(&format!("System.{name}"))
        {
            return self
                .comp
                .intern(TypeRef::Named { defn: NamedDef::Builtin(builtin), args });
        }

        self.error_type_owned(name.to_string(), args)
    }

    fn error_type(&mut self, name: &str, args: Vec<TypeId>) -> TypeId {
        self.error_type_owned(name.to_string(), args)
    }

    fn error_type_owned(&mut self, name: String, args: Vec<TypeId>) -> TypeId {
        self.comp
            .intern(TypeRef::Named { defn: NamedDef::Error(name), args })
    }
}

/// The declared name of a type declaration node.
fn type_name(node: Node<'_>, src: &str) -> Option<String> {
    node.child_by_field_name("name")
        .or_else(|| {
            let mut cursor = node.walk();
            node.children(&mut cursor).find(|c| c.kind() == "identifier")
        })
        .map(|n| node_text(n, src).to_string())
}

fn modifier_texts(node: Node<'_>, src: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == "modifier")
        .map(|c| node_text(c, src).to_string())
        .collect()
}

fn type_parameter_names(node: Node<'_>, src: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let Some(list) = node
        .children(&mut cursor)
        .find(|c| c.kind() == "type_parameter_list")
    else {
        return Vec::new();
    };
    let mut list_cursor = list.walk();
    list.named_children(&mut list_cursor)
        .filter(|c| c.kind() == "type_parameter")
        .filter_map(|p| {
            p.child_by_field_name("name")
                .or_else(|| {
                    let mut pc = p.walk();
                    p.children(&mut pc).filter(|c| c.kind() == "identifier").last()
                })
                .map(|n| node_text(n, src).to_string())
        })
        .collect()
}

fn first_named_type_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| is_type_expression(c.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ExtensionContainer, ExtensionMethod};
    use crate::discover::discover_extension_containers;
    use crate::symbols::Member;

    fn compile_source(src: &str) -> Compilation {
        compile(
            AssemblyIdentity::new("Test", "0.0.0.0"),
            &[SourceFile { path: Utf8PathBuf::from("Test.cs"), text: src.to_string() }],
        )
        .expect("source should compile")
    }

    fn sole_container(comp: &Compilation) -> ExtensionContainer<'_> {
        let mut containers = discover_extension_containers(comp);
        assert_eq!(containers.len(), 1, "expected exactly one container");
        containers.remove(0)
    }

    #[test]
    fn declares_types_across_namespace_styles() {
        let comp = compile_source(
            r#"
            namespace Acme.Util
            {
                public static class Extensions
                {
                    public static int Twice(this int value) => value * 2;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        assert_eq!(container.display_text(), "Acme.Util.Extensions");
        assert!(container.is_public());
    }

    #[test]
    fn file_scoped_namespaces_are_supported() {
        let comp = compile_source(
            r#"
            namespace Acme.Util;

            public static class Extensions
            {
                public static int Twice(this int value) => value * 2;
            }
            "#,
        );
        let container = sole_container(&comp);
        assert_eq!(container.display_text(), "Acme.Util.Extensions");
    }

    #[test]
    fn extension_marking_requires_static_top_level_class() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public class NotStatic
                {
                    public static int Twice(this int value) => value * 2;
                }
                public static class Generic<T>
                {
                }
                public static class Real
                {
                    public static int Twice(this int value) => value * 2;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        assert_eq!(container.display_text(), "Acme.Real");
    }

    #[test]
    fn receiver_flags_for_value_and_reference_types() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public struct Point { public int X; }

                public static class Extensions
                {
                    public static int ToInt(this Point p) => p.X;
                    public static int Len(this string text) => text.Length;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        assert_eq!(methods.len(), 2);

        let by_name = |needle: &str| {
            methods
                .iter()
                .find(|m| m.display_text().contains(needle))
                .unwrap()
        };
        let to_int = by_name("ToInt");
        assert!(to_int.this_parameter_is_value_type());
        assert!(!to_int.this_parameter_is_error_type());
        assert_eq!(comp.display_type(to_int.this_parameter_type()), "Acme.Point");

        let len = by_name("Len");
        assert!(!len.this_parameter_is_value_type());
        assert_eq!(comp.display_type(len.this_parameter_type()), "string");
    }

    #[test]
    fn unresolved_receivers_become_error_types() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    public static int Count(this Widget widget) => 0;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        assert!(methods[0].this_parameter_is_error_type());
        assert!(!methods[0].this_parameter_is_value_type());
        assert_eq!(comp.display_type(methods[0].this_parameter_type()), "Widget");
    }

    #[test]
    fn generic_receiver_uses_method_type_parameter() {
        let comp = compile_source(
            r#"
            using System.Collections.Generic;

            namespace Acme
            {
                public static class Extensions
                {
                    public static T First<T>(this IEnumerable<T> source) => default;
                    public static int Fixed(this IEnumerable<int> source) => 0;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        let first = methods
            .iter()
            .find(|m| m.display_text().contains("First"))
            .unwrap();
        assert!(first.is_generic());
        assert!(first.this_parameter_uses_type_parameter());
        assert!(first.this_parameter_is_generic_type());
        // IEnumerable is not declared in this compilation: generic and
        // unresolved at once.
        assert!(first.this_parameter_is_error_type());

        let fixed = methods
            .iter()
            .find(|m| m.display_text().contains("Fixed"))
            .unwrap();
        assert!(!fixed.is_generic());
        assert!(!fixed.this_parameter_uses_type_parameter());
        assert!(fixed.this_parameter_is_generic_type());
    }

    #[test]
    fn array_and_ref_receivers_are_modeled() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    public static int Sum(this int[] values) => 0;
                    public static void Bump(this ref int value) => value++;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();

        let sum = methods
            .iter()
            .find(|m| m.display_text().contains("Sum"))
            .unwrap();
        assert_eq!(comp.display_type(sum.this_parameter_type()), "int[]");
        assert!(!sum.this_parameter_is_value_type());

        let bump = methods
            .iter()
            .find(|m| m.display_text().contains("Bump"))
            .unwrap();
        assert_eq!(bump.this_parameter_ref_kind(), PassingMode::Ref);
        assert!(bump.this_parameter_is_value_type());
    }

    #[test]
    fn non_extension_members_are_counted() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    private static int s_counter;

                    public static int Twice(this int value) => value * 2;
                }
                public static class Pure
                {
                    public static int Twice(this int value) => value * 2;
                }
            }
            "#,
        );
        let containers = discover_extension_containers(&comp);
        assert_eq!(containers.len(), 2);
        let with_field = containers
            .iter()
            .find(|c| c.display_text().ends_with("Extensions"))
            .unwrap();
        let pure = containers
            .iter()
            .find(|c| c.display_text().ends_with("Pure"))
            .unwrap();
        assert!(with_field.contains_non_extension_members());
        assert!(!pure.contains_non_extension_members());
    }

    #[test]
    fn plain_static_helpers_count_as_non_extension_members() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    public static int Twice(this int value) => value * 2;
                    private static int Helper(int value) => value;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        assert!(container.contains_non_extension_members());
        assert_eq!(container.extension_methods().unwrap().len(), 1);
    }

    #[test]
    fn declared_generic_receivers_resolve_within_the_unit() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public class Box<T> { }

                public static class Extensions
                {
                    public static T Unwrap<T>(this Box<T> box) => default;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        let unwrap = &methods[0];
        assert!(!unwrap.this_parameter_is_error_type());
        assert!(unwrap.this_parameter_is_generic_type());
        assert!(unwrap.this_parameter_uses_type_parameter());
        assert_eq!(
            comp.display_type(unwrap.this_parameter_type()),
            "Acme.Box<T>"
        );
    }

    #[test]
    fn receiver_resolution_spans_files() {
        let comp = compile(
            AssemblyIdentity::new("Test", "0.0.0.0"),
            &[
                SourceFile {
                    path: Utf8PathBuf::from("Point.cs"),
                    text: "namespace Geometry { public struct Point { public int X; } }"
                        .to_string(),
                },
                SourceFile {
                    path: Utf8PathBuf::from("Extensions.cs"),
                    text: r#"
                    using Geometry;
                    namespace Acme
                    {
                        public static class Extensions
                        {
                            public static int Flat(this Point p) => p.X;
                        }
                    }
                    "#
                    .to_string(),
                },
            ],
        )
        .unwrap();
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        assert!(!methods[0].this_parameter_is_error_type());
        assert!(methods[0].this_parameter_is_value_type());
        assert_eq!(
            comp.display_type(methods[0].this_parameter_type()),
            "Geometry.Point"
        );
    }

    #[test]
    fn nullable_value_receiver_desugars_to_nullable() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    public static int OrZero(this int? value) => value ?? 0;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        assert_eq!(comp.display_type(methods[0].this_parameter_type()), "int?");
        assert!(methods[0].this_parameter_is_value_type());
        assert!(methods[0].this_parameter_is_generic_type());
    }

    #[test]
    fn zero_parameter_marked_methods_do_not_create_containers() {
        // `this` with no parameters cannot be written, but a method
        // list without parameters plus the member scan must not panic.
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Empty
                {
                    public static void Nothing() { }
                }
            }
            "#,
        );
        assert!(discover_extension_containers(&comp).is_empty());
    }

    #[test]
    fn method_records_capture_accessibility_and_defaults() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    internal static int Pad(this string text, int width = 4) => width;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let methods = container.extension_methods().unwrap();
        let pad = &methods[0];
        assert!(!pad.is_public());
        assert_eq!(pad.reduced_form_parameter_count(), 1);
        assert!(pad.display_text().contains("width = 4"));
    }

    #[test]
    fn nested_static_classes_never_qualify() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Outer
                {
                    public static class Inner
                    {
                        public static int Twice(this int value) => value * 2;
                    }
                    public static int Once(this int value) => value;
                }
            }
            "#,
        );
        let containers = discover_extension_containers(&comp);
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].display_text(), "Acme.Outer");
        // The nested class is a member of its parent.
        assert!(containers[0].contains_non_extension_members());
    }

    #[test]
    fn members_include_nested_types_and_fields() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public class Holder
                {
                    private int _x;
                    public struct Inner { }
                    public void Touch() { }
                }
            }
            "#,
        );
        let ns = comp.namespace(Compilation::GLOBAL_NAMESPACE);
        let acme = comp.namespace(ns.children[0]);
        let holder = comp.type_def(acme.types[0]);
        let methods = holder.method_members().count();
        let others = holder
            .members
            .iter()
            .filter(|m| matches!(m, Member::Other))
            .count();
        assert_eq!(methods, 1);
        assert_eq!(others, 2);
    }

    #[test]
    fn classification_survives_direct_classify_roundtrip() {
        let comp = compile_source(
            r#"
            namespace Acme
            {
                public static class Extensions
                {
                    public static int Twice(this int value) => value * 2;
                }
            }
            "#,
        );
        let container = sole_container(&comp);
        let method_id = container.extension_methods().unwrap()[0].id();
        let record = ExtensionMethod::classify(&comp, method_id).unwrap();
        assert_eq!(
            record.display_text(),
            "int Acme.Extensions.Twice(this int value)"
        );
    }
}
