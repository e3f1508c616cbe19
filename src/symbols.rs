//! Symbol-graph model for one compilation unit.
//!
//! A [`Compilation`] owns every namespace, type, and method bound from a
//! project's sources, plus an interning arena for type expressions. Type
//! identity is [`TypeId`] equality: structurally equal type expressions
//! intern to the same handle, while expressions that merely *render* the
//! same (say, `List<T>` for the `T` of two different methods) keep
//! distinct handles because the owning symbol participates in the
//! structural key.

use std::collections::HashMap;
use std::fmt;

/// Handle to a namespace in the compilation. Index 0 is the global
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(pub u32);

/// Handle to a type *definition* (`static class StringExtensions`), as
/// opposed to [`TypeId`], which identifies an instantiated type
/// expression (`List<int>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDefId(pub u32);

/// Handle to a method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub u32);

/// Handle to an interned type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// Identity of the assembly a compilation produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyIdentity {
    pub name: String,
    pub version: String,
}

impl AssemblyIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Version={}, Culture=neutral, PublicKeyToken=null",
            self.name, self.version
        )
    }
}

/// Declared accessibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

impl Accessibility {
    /// Resolve a modifier list, falling back to `default` when no
    /// accessibility modifier is present.
    pub fn from_modifiers(modifiers: &[&str], default: Accessibility) -> Self {
        let has = |m: &str| modifiers.contains(&m);
        if has("public") {
            Accessibility::Public
        } else if has("protected") && has("internal") {
            Accessibility::ProtectedInternal
        } else if has("private") && has("protected") {
            Accessibility::PrivateProtected
        } else if has("internal") {
            Accessibility::Internal
        } else if has("protected") {
            Accessibility::Protected
        } else if has("private") {
            Accessibility::Private
        } else {
            default
        }
    }
}

/// What kind of declaration a [`TypeDef`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Class,
    Struct,
    Interface,
    Enum,
    RecordClass,
    RecordStruct,
    Delegate,
}

impl TypeDefKind {
    pub fn is_value_type(self) -> bool {
        matches!(
            self,
            TypeDefKind::Struct | TypeDefKind::Enum | TypeDefKind::RecordStruct
        )
    }
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassingMode {
    Value,
    Ref,
    In,
    Out,
}

impl PassingMode {
    /// Label used in the method report's ref-kind column.
    pub fn label(self) -> &'static str {
        match self {
            PassingMode::Value => "None",
            PassingMode::Ref => "Ref",
            PassingMode::In => "In",
            PassingMode::Out => "Out",
        }
    }

    /// Source-level prefix for signature rendering.
    fn prefix(self) -> &'static str {
        match self {
            PassingMode::Value => "",
            PassingMode::Ref => "ref ",
            PassingMode::In => "in ",
            PassingMode::Out => "out ",
        }
    }
}

/// Predefined C# types, plus the two library types the binder desugars
/// syntax into (`X?` over a value type and tuple types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Bool,
    Byte,
    SByte,
    Char,
    Decimal,
    Double,
    Float,
    Int,
    UInt,
    Long,
    ULong,
    Short,
    UShort,
    NInt,
    NUInt,
    Object,
    String,
    Dynamic,
    Void,
    Nullable,
    ValueTuple,
}

impl Builtin {
    /// Look up a predefined-type keyword as written in source.
    pub fn from_keyword(keyword: &str) -> Option<Builtin> {
        Some(match keyword {
            "bool" => Builtin::Bool,
            "byte" => Builtin::Byte,
            "sbyte" => Builtin::SByte,
            "char" => Builtin::Char,
            "decimal" => Builtin::Decimal,
            "double" => Builtin::Double,
            "float" => Builtin::Float,
            "int" => Builtin::Int,
            "uint" => Builtin::UInt,
            "long" => Builtin::Long,
            "ulong" => Builtin::ULong,
            "short" => Builtin::Short,
            "ushort" => Builtin::UShort,
            "nint" => Builtin::NInt,
            "nuint" => Builtin::NUInt,
            "object" => Builtin::Object,
            "string" => Builtin::String,
            "dynamic" => Builtin::Dynamic,
            "void" => Builtin::Void,
            _ => return None,
        })
    }

    /// Look up a fully-qualified BCL name (`System.Int32` and friends).
    pub fn from_qualified(name: &str) -> Option<Builtin> {
        Some(match name {
            "System.Boolean" => Builtin::Bool,
            "System.Byte" => Builtin::Byte,
            "System.SByte" => Builtin::SByte,
            "System.Char" => Builtin::Char,
            "System.Decimal" => Builtin::Decimal,
            "System.Double" => Builtin::Double,
            "System.Single" => Builtin::Float,
            "System.Int32" => Builtin::Int,
            "System.UInt32" => Builtin::UInt,
            "System.Int64" => Builtin::Long,
            "System.UInt64" => Builtin::ULong,
            "System.Int16" => Builtin::Short,
            "System.UInt16" => Builtin::UShort,
            "System.IntPtr" => Builtin::NInt,
            "System.UIntPtr" => Builtin::NUInt,
            "System.Object" => Builtin::Object,
            "System.String" => Builtin::String,
            "System.Void" => Builtin::Void,
            "System.Nullable" => Builtin::Nullable,
            "System.ValueTuple" => Builtin::ValueTuple,
            _ => return None,
        })
    }

    pub fn is_value_type(self) -> bool {
        !matches!(
            self,
            Builtin::Object | Builtin::String | Builtin::Dynamic | Builtin::Void
        )
    }

    fn keyword(self) -> &'static str {
        match self {
            Builtin::Bool => "bool",
            Builtin::Byte => "byte",
            Builtin::SByte => "sbyte",
            Builtin::Char => "char",
            Builtin::Decimal => "decimal",
            Builtin::Double => "double",
            Builtin::Float => "float",
            Builtin::Int => "int",
            Builtin::UInt => "uint",
            Builtin::Long => "long",
            Builtin::ULong => "ulong",
            Builtin::Short => "short",
            Builtin::UShort => "ushort",
            Builtin::NInt => "nint",
            Builtin::NUInt => "nuint",
            Builtin::Object => "object",
            Builtin::String => "string",
            Builtin::Dynamic => "dynamic",
            Builtin::Void => "void",
            Builtin::Nullable => "System.Nullable",
            Builtin::ValueTuple => "System.ValueTuple",
        }
    }
}

/// What a named type expression resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamedDef {
    /// A type declared in this compilation.
    Declared(TypeDefId),
    /// A predefined C# type.
    Builtin(Builtin),
    /// An unresolved name, kept as written. The error state is part of
    /// the type's identity so unresolved receivers still dedupe
    /// sensibly.
    Error(String),
}

/// Which symbol declared a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeParamOwner {
    Method(MethodId),
    Type(TypeDefId),
}

/// An interned type expression. Structural equality over this enum is
/// the compilation's symbol-identity equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named { defn: NamedDef, args: Vec<TypeId> },
    TypeParam { owner: TypeParamOwner, index: u32, name: String },
    Array { element: TypeId, rank: u32 },
    Pointer { pointee: TypeId },
    /// `delegate*` syntax. Carried through the model verbatim; the
    /// classifier refuses to walk it rather than guess.
    FunctionPointer { text: String },
}

/// A member of a type body. Only methods need full modeling; everything
/// else matters solely for the non-extension-member scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Method(MethodId),
    Other,
}

#[derive(Debug)]
pub struct Namespace {
    pub name: String,
    pub parent: Option<NamespaceId>,
    pub children: Vec<NamespaceId>,
    pub types: Vec<TypeDefId>,
}

#[derive(Debug)]
pub struct TypeDef {
    pub name: String,
    pub namespace: NamespaceId,
    pub parent_type: Option<TypeDefId>,
    pub kind: TypeDefKind,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub type_params: Vec<String>,
    pub members: Vec<Member>,
    pub nested_types: Vec<TypeDefId>,
}

impl TypeDef {
    pub fn is_nested(&self) -> bool {
        self.parent_type.is_some()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Cheap pre-filter: extension methods can only live in a static,
    /// non-generic, non-nested class, so anything else is skipped
    /// before the per-member scan.
    pub fn might_contain_extension_methods(&self) -> bool {
        self.kind == TypeDefKind::Class
            && self.is_static
            && !self.is_generic()
            && !self.is_nested()
    }

    pub fn method_members(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.members.iter().filter_map(|m| match m {
            Member::Method(id) => Some(*id),
            Member::Other => None,
        })
    }
}

#[derive(Debug)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeId,
    pub mode: PassingMode,
    pub is_this: bool,
    pub default_text: Option<String>,
}

#[derive(Debug)]
pub struct Method {
    pub name: String,
    pub containing_type: TypeDefId,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub type_params: Vec<String>,
    pub params: Vec<Parameter>,
    /// The declaration syntax marks this as an extension method: first
    /// parameter carries `this` inside a static, non-generic, non-nested
    /// class. Syntax-only; a marked method may still be malformed (zero
    /// parameters) and is screened out downstream.
    pub is_extension_marked: bool,
    pub return_text: String,
    pub constraints_text: Vec<String>,
}

impl Method {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// The bound symbol graph of one compilation unit.
pub struct Compilation {
    pub assembly: AssemblyIdentity,
    namespaces: Vec<Namespace>,
    types: Vec<TypeDef>,
    methods: Vec<Method>,
    type_refs: Vec<TypeRef>,
    interned: HashMap<TypeRef, TypeId>,
}

impl Compilation {
    pub fn new(assembly: AssemblyIdentity) -> Self {
        Self {
            assembly,
            namespaces: vec![Namespace {
                name: String::new(),
                parent: None,
                children: Vec::new(),
                types: Vec::new(),
            }],
            types: Vec::new(),
            methods: Vec::new(),
            type_refs: Vec::new(),
            interned: HashMap::new(),
        }
    }

    pub const GLOBAL_NAMESPACE: NamespaceId = NamespaceId(0);

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.0 as usize]
    }

    pub fn type_def(&self, id: TypeDefId) -> &TypeDef {
        &self.types[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id.0 as usize]
    }

    pub fn type_ref(&self, id: TypeId) -> &TypeRef {
        &self.type_refs[id.0 as usize]
    }

    /// Find or create the child namespace `name` under `parent`.
    pub fn ensure_namespace(&mut self, parent: NamespaceId, name: &str) -> NamespaceId {
        let existing = self.namespaces[parent.0 as usize]
            .children
            .iter()
            .copied()
            .find(|&c| self.namespaces[c.0 as usize].name == name);
        if let Some(id) = existing {
            return id;
        }
        let id = NamespaceId(self.namespaces.len() as u32);
        self.namespaces.push(Namespace {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            types: Vec::new(),
        });
        self.namespaces[parent.0 as usize].children.push(id);
        id
    }

    /// Walk a dotted namespace path from the global namespace, creating
    /// segments as needed.
    pub fn ensure_namespace_path(&mut self, path: &str) -> NamespaceId {
        let mut current = Self::GLOBAL_NAMESPACE;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = self.ensure_namespace(current, segment);
        }
        current
    }

    pub fn add_type(&mut self, def: TypeDef) -> TypeDefId {
        let id = TypeDefId(self.types.len() as u32);
        match def.parent_type {
            Some(parent) => self.types[parent.0 as usize].nested_types.push(id),
            None => self.namespaces[def.namespace.0 as usize].types.push(id),
        }
        self.types.push(def);
        id
    }

    /// The id the next [`add_method`](Self::add_method) call will
    /// assign. Binding needs it up front: a method's own type-parameter
    /// placeholders are interned against the method's identity before
    /// the method itself is complete.
    pub fn next_method_id(&self) -> MethodId {
        MethodId(self.methods.len() as u32)
    }

    pub fn add_method(&mut self, method: Method) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        let containing = method.containing_type;
        self.methods.push(method);
        self.types[containing.0 as usize].members.push(Member::Method(id));
        id
    }

    pub fn add_other_member(&mut self, ty: TypeDefId) {
        self.types[ty.0 as usize].members.push(Member::Other);
    }

    /// Intern a type expression, returning the canonical handle for its
    /// structure.
    pub fn intern(&mut self, type_ref: TypeRef) -> TypeId {
        if let Some(&id) = self.interned.get(&type_ref) {
            return id;
        }
        let id = TypeId(self.type_refs.len() as u32);
        self.type_refs.push(type_ref.clone());
        self.interned.insert(type_ref, id);
        id
    }

    /// Dotted namespace path of `id`, empty for the global namespace.
    pub fn namespace_path(&self, id: NamespaceId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(ns_id) = current {
            let ns = self.namespace(ns_id);
            if !ns.name.is_empty() {
                parts.push(ns.name.as_str());
            }
            current = ns.parent;
        }
        parts.reverse();
        parts.join(".")
    }

    /// Fully-qualified name of a type definition, nesting chain
    /// included, without generic parameters.
    pub fn qualified_type_name(&self, id: TypeDefId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        let mut namespace = Self::GLOBAL_NAMESPACE;
        while let Some(def_id) = current {
            let def = self.type_def(def_id);
            names.push(def.name.as_str());
            namespace = def.namespace;
            current = def.parent_type;
        }
        names.reverse();
        let ns_path = self.namespace_path(namespace);
        if ns_path.is_empty() {
            names.join(".")
        } else {
            format!("{}.{}", ns_path, names.join("."))
        }
    }

    // ------------------------------------------------------------------
    // Structural queries over interned type expressions
    // ------------------------------------------------------------------

    pub fn is_error_type(&self, id: TypeId) -> bool {
        matches!(
            self.type_ref(id),
            TypeRef::Named { defn: NamedDef::Error(_), .. }
        )
    }

    /// True for a named type with type arguments (a generic
    /// instantiation), unresolved or not.
    pub fn is_generic_named_type(&self, id: TypeId) -> bool {
        matches!(self.type_ref(id), TypeRef::Named { args, .. } if !args.is_empty())
    }

    pub fn is_value_type(&self, id: TypeId) -> bool {
        match self.type_ref(id) {
            TypeRef::Named { defn: NamedDef::Declared(def), .. } => {
                self.type_def(*def).kind.is_value_type()
            }
            TypeRef::Named { defn: NamedDef::Builtin(b), .. } => b.is_value_type(),
            TypeRef::Named { defn: NamedDef::Error(_), .. } => false,
            TypeRef::TypeParam { .. } => false,
            TypeRef::Array { .. } => false,
            TypeRef::Pointer { .. } => false,
            TypeRef::FunctionPointer { .. } => false,
        }
    }

    // ------------------------------------------------------------------
    // Canonical display rendering
    // ------------------------------------------------------------------

    /// Canonical rendering of a type expression: fully qualified for
    /// declared types, keywords for predefined ones, stable across runs.
    pub fn display_type(&self, id: TypeId) -> String {
        match self.type_ref(id) {
            TypeRef::Named { defn: NamedDef::Builtin(Builtin::Nullable), args }
                if args.len() == 1 =>
            {
                format!("{}?", self.display_type(args[0]))
            }
            TypeRef::Named { defn: NamedDef::Builtin(Builtin::ValueTuple), args }
                if args.len() >= 2 =>
            {
                let parts: Vec<_> = args.iter().map(|&a| self.display_type(a)).collect();
                format!("({})", parts.join(", "))
            }
            TypeRef::Named { defn, args } => {
                let base = match defn {
                    NamedDef::Declared(def) => self.qualified_type_name(*def),
                    NamedDef::Builtin(b) => b.keyword().to_string(),
                    NamedDef::Error(name) => name.clone(),
                };
                if args.is_empty() {
                    base
                } else {
                    let parts: Vec<_> = args.iter().map(|&a| self.display_type(a)).collect();
                    format!("{}<{}>", base, parts.join(", "))
                }
            }
            TypeRef::TypeParam { name, .. } => name.clone(),
            TypeRef::Array { element, rank } => {
                let commas = ",".repeat((*rank - 1) as usize);
                format!("{}[{}]", self.display_type(*element), commas)
            }
            TypeRef::Pointer { pointee } => format!("{}*", self.display_type(*pointee)),
            TypeRef::FunctionPointer { text } => text.clone(),
        }
    }

    /// Canonical rendering of a type definition's name, generic
    /// parameters included.
    pub fn display_type_def(&self, id: TypeDefId) -> String {
        let def = self.type_def(id);
        let name = self.qualified_type_name(id);
        if def.type_params.is_empty() {
            name
        } else {
            format!("{}<{}>", name, def.type_params.join(", "))
        }
    }

    /// Canonical method signature: return type, fully-qualified
    /// container, name, generic parameters, and the reduced parameter
    /// list with modifiers, resolved types, names, and defaults.
    pub fn display_method(&self, id: MethodId) -> String {
        let method = self.method(id);
        let mut out = String::new();
        out.push_str(&method.return_text);
        out.push(' ');
        out.push_str(&self.display_type_def(method.containing_type));
        out.push('.');
        out.push_str(&method.name);
        if !method.type_params.is_empty() {
            out.push('<');
            out.push_str(&method.type_params.join(", "));
            out.push('>');
        }
        out.push('(');
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if param.is_this {
                out.push_str("this ");
            }
            out.push_str(param.mode.prefix());
            out.push_str(&self.display_type(param.ty));
            out.push(' ');
            out.push_str(&param.name);
            if let Some(default) = &param.default_text {
                out.push_str(" = ");
                out.push_str(default);
            }
        }
        out.push(')');
        for clause in &method.constraints_text {
            out.push(' ');
            out.push_str(clause);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_compilation() -> Compilation {
        Compilation::new(AssemblyIdentity::new("Test", "0.0.0.0"))
    }

    #[test]
    fn interning_gives_one_id_per_structure() {
        let mut comp = empty_compilation();
        let a = comp.intern(TypeRef::Named {
            defn: NamedDef::Builtin(Builtin::Int),
            args: vec![],
        });
        let b = comp.intern(TypeRef::Named {
            defn: NamedDef::Builtin(Builtin::Int),
            args: vec![],
        });
        assert_eq!(a, b);

        let array = comp.intern(TypeRef::Array { element: a, rank: 1 });
        assert_ne!(a, array);
    }

    #[test]
    fn type_params_of_different_owners_are_distinct() {
        let mut comp = empty_compilation();
        let t1 = comp.intern(TypeRef::TypeParam {
            owner: TypeParamOwner::Method(MethodId(0)),
            index: 0,
            name: "T".to_string(),
        });
        let t2 = comp.intern(TypeRef::TypeParam {
            owner: TypeParamOwner::Method(MethodId(1)),
            index: 0,
            name: "T".to_string(),
        });
        assert_ne!(t1, t2);
        // Both still render the same.
        assert_eq!(comp.display_type(t1), comp.display_type(t2));
    }

    #[test]
    fn display_covers_arrays_pointers_and_generics() {
        let mut comp = empty_compilation();
        let int = comp.intern(TypeRef::Named {
            defn: NamedDef::Builtin(Builtin::Int),
            args: vec![],
        });
        let list = comp.intern(TypeRef::Named {
            defn: NamedDef::Error("List".to_string()),
            args: vec![int],
        });
        let matrix = comp.intern(TypeRef::Array { element: int, rank: 2 });
        let ptr = comp.intern(TypeRef::Pointer { pointee: int });
        let nullable = comp.intern(TypeRef::Named {
            defn: NamedDef::Builtin(Builtin::Nullable),
            args: vec![int],
        });

        assert_eq!(comp.display_type(list), "List<int>");
        assert_eq!(comp.display_type(matrix), "int[,]");
        assert_eq!(comp.display_type(ptr), "int*");
        assert_eq!(comp.display_type(nullable), "int?");
    }

    #[test]
    fn qualified_names_include_namespace_and_nesting() {
        let mut comp = empty_compilation();
        let ns = comp.ensure_namespace_path("Acme.Util");
        let outer = comp.add_type(TypeDef {
            name: "Outer".to_string(),
            namespace: ns,
            parent_type: None,
            kind: TypeDefKind::Class,
            accessibility: Accessibility::Public,
            is_static: false,
            type_params: vec![],
            members: vec![],
            nested_types: vec![],
        });
        let inner = comp.add_type(TypeDef {
            name: "Inner".to_string(),
            namespace: ns,
            parent_type: Some(outer),
            kind: TypeDefKind::Struct,
            accessibility: Accessibility::Private,
            is_static: false,
            type_params: vec![],
            members: vec![],
            nested_types: vec![],
        });

        assert_eq!(comp.qualified_type_name(outer), "Acme.Util.Outer");
        assert_eq!(comp.qualified_type_name(inner), "Acme.Util.Outer.Inner");
        assert!(comp.type_def(inner).is_nested());
    }

    #[test]
    fn might_contain_filter_requires_static_top_level_non_generic_class() {
        let mut comp = empty_compilation();
        let ns = comp.ensure_namespace_path("Acme");
        let mk = |name: &str, kind, is_static, type_params: Vec<String>| TypeDef {
            name: name.to_string(),
            namespace: ns,
            parent_type: None,
            kind,
            accessibility: Accessibility::Public,
            is_static,
            type_params,
            members: vec![],
            nested_types: vec![],
        };
        let yes = comp.add_type(mk("Ext", TypeDefKind::Class, true, vec![]));
        let not_static = comp.add_type(mk("Plain", TypeDefKind::Class, false, vec![]));
        let generic =
            comp.add_type(mk("Gen", TypeDefKind::Class, true, vec!["T".to_string()]));
        let value = comp.add_type(mk("Val", TypeDefKind::Struct, true, vec![]));

        assert!(comp.type_def(yes).might_contain_extension_methods());
        assert!(!comp.type_def(not_static).might_contain_extension_methods());
        assert!(!comp.type_def(generic).might_contain_extension_methods());
        assert!(!comp.type_def(value).might_contain_extension_methods());
    }

    #[test]
    fn assembly_identity_display_matches_report_format() {
        let identity = AssemblyIdentity::new("Acme.Util", "1.2.3.0");
        assert_eq!(
            identity.to_string(),
            "Acme.Util, Version=1.2.3.0, Culture=neutral, PublicKeyToken=null"
        );
    }
}
