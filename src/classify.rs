//! Classification of extension methods and the containers that declare
//! them.
//!
//! [`ExtensionMethod`] captures the attributes of one extension method;
//! [`ExtensionContainer`] aggregates a type's methods and memoizes the
//! derived collections. Both borrow the owning [`Compilation`] and are
//! cheap to construct; the expensive parts (the member scan, the
//! receiver-type walk, signature rendering) run once and are cached.

use std::cell::OnceCell;

use thiserror::Error;

use crate::symbols::{
    Compilation, MethodId, Parameter, PassingMode, TypeDefId, TypeId, TypeParamOwner,
    TypeRef,
};

/// Classification failed because the receiver-type walk reached a type
/// expression shape it does not understand.
///
/// This signals a defect in the classifier's own assumptions, not bad
/// input: guessing here would silently corrupt the report, so the error
/// aborts classification of the affected compilation instead.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unhandled type expression shape `{shape}` while classifying `{method}`")]
    UnhandledTypeShape { method: String, shape: String },
}

/// Whether `method` qualifies as an extension method: the front-end
/// marked it as one *and* it actually has a receiver parameter to
/// classify. A marked zero-parameter declaration is malformed source;
/// it is screened out rather than crashed on.
pub fn is_qualifying_extension_method(comp: &Compilation, method: MethodId) -> bool {
    let m = comp.method(method);
    m.is_extension_marked && !m.params.is_empty()
}

/// One classified extension method.
pub struct ExtensionMethod<'a> {
    comp: &'a Compilation,
    id: MethodId,
    uses_method_type_parameter: bool,
    display: OnceCell<String>,
}

impl std::fmt::Debug for ExtensionMethod<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionMethod")
            .field("id", &self.id)
            .field("uses_method_type_parameter", &self.uses_method_type_parameter)
            .finish_non_exhaustive()
    }
}

impl<'a> ExtensionMethod<'a> {
    /// Classify `method`. Pure: reads symbol metadata, no side effects.
    ///
    /// The receiver walk runs eagerly so an unhandled type shape
    /// surfaces here, before any record with a guessed flag can exist.
    pub fn classify(comp: &'a Compilation, method: MethodId) -> Result<Self, ClassifyError> {
        debug_assert!(is_qualifying_extension_method(comp, method));
        let receiver = comp.method(method).params[0].ty;
        let uses = uses_method_type_parameter(comp, method, receiver)?;
        Ok(Self {
            comp,
            id: method,
            uses_method_type_parameter: uses,
            display: OnceCell::new(),
        })
    }

    pub fn id(&self) -> MethodId {
        self.id
    }

    /// Public method in a public container; anything less accessible
    /// anywhere in the chain makes the method non-public to consumers.
    pub fn is_public(&self) -> bool {
        use crate::symbols::Accessibility::Public;
        let method = self.comp.method(self.id);
        method.accessibility == Public
            && self.comp.type_def(method.containing_type).accessibility == Public
    }

    /// True iff the method declares its own type parameters;
    /// container-level generics do not count.
    pub fn is_generic(&self) -> bool {
        self.comp.method(self.id).is_generic()
    }

    /// Parameter count as seen at a reduced-form call site, where the
    /// receiver is the expression before the dot.
    pub fn reduced_form_parameter_count(&self) -> usize {
        self.comp.method(self.id).params.len() - 1
    }

    pub fn this_parameter(&self) -> &'a Parameter {
        &self.comp.method(self.id).params[0]
    }

    pub fn this_parameter_type(&self) -> TypeId {
        self.this_parameter().ty
    }

    pub fn this_parameter_uses_type_parameter(&self) -> bool {
        self.uses_method_type_parameter
    }

    pub fn this_parameter_is_error_type(&self) -> bool {
        self.comp.is_error_type(self.this_parameter_type())
    }

    pub fn this_parameter_is_generic_type(&self) -> bool {
        self.comp.is_generic_named_type(self.this_parameter_type())
    }

    pub fn this_parameter_is_value_type(&self) -> bool {
        self.comp.is_value_type(self.this_parameter_type())
    }

    pub fn this_parameter_ref_kind(&self) -> PassingMode {
        self.this_parameter().mode
    }

    /// Canonical signature, rendered once and cached.
    pub fn display_text(&self) -> &str {
        self.display
            .get_or_init(|| self.comp.display_method(self.id))
    }
}

/// Recursive structural walk of the receiver's type expression, looking
/// for a placeholder that is one of the method's *own* type parameters.
///
/// Each representable shape is handled explicitly; a shape this match
/// does not know how to decompose is a fatal classification error, never
/// a silent `false`.
fn uses_method_type_parameter(
    comp: &Compilation,
    method: MethodId,
    ty: TypeId,
) -> Result<bool, ClassifyError> {
    match comp.type_ref(ty) {
        TypeRef::Named { args, .. } => {
            for &arg in args {
                if uses_method_type_parameter(comp, method, arg)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        TypeRef::TypeParam { owner, .. } => {
            // Identity check against the declaring method, not merely
            // "is a type parameter": a containing type's placeholder
            // must not count.
            Ok(*owner == TypeParamOwner::Method(method))
        }
        TypeRef::Array { element, .. } => uses_method_type_parameter(comp, method, *element),
        TypeRef::Pointer { pointee } => uses_method_type_parameter(comp, method, *pointee),
        TypeRef::FunctionPointer { text } => Err(ClassifyError::UnhandledTypeShape {
            method: comp.display_method(method),
            shape: text.clone(),
        }),
    }
}

/// A type that declares at least one qualifying extension method,
/// together with lazily computed aggregates over those methods.
pub struct ExtensionContainer<'a> {
    comp: &'a Compilation,
    id: TypeDefId,
    methods: OnceCell<Vec<ExtensionMethod<'a>>>,
    receiver_types: OnceCell<Vec<TypeId>>,
    display: OnceCell<String>,
}

impl<'a> ExtensionContainer<'a> {
    /// Classify `type_def` as an extension container, or `None` if it
    /// declares no qualifying extension method.
    pub fn classify(comp: &'a Compilation, type_def: TypeDefId) -> Option<Self> {
        let def = comp.type_def(type_def);
        let qualifies = def
            .method_members()
            .any(|m| is_qualifying_extension_method(comp, m));
        qualifies.then(|| Self {
            comp,
            id: type_def,
            methods: OnceCell::new(),
            receiver_types: OnceCell::new(),
            display: OnceCell::new(),
        })
    }

    pub fn id(&self) -> TypeDefId {
        self.id
    }

    pub fn is_public(&self) -> bool {
        use crate::symbols::Accessibility::Public;
        self.comp.type_def(self.id).accessibility == Public
    }

    /// The container's qualifying extension methods, classified on
    /// first access and memoized. Repeated calls return the same slice
    /// in the same order.
    pub fn extension_methods(&self) -> Result<&[ExtensionMethod<'a>], ClassifyError> {
        if let Some(methods) = self.methods.get() {
            return Ok(methods);
        }
        let mut computed = Vec::new();
        for method in self.comp.type_def(self.id).method_members() {
            if is_qualifying_extension_method(self.comp, method) {
                computed.push(ExtensionMethod::classify(self.comp, method)?);
            }
        }
        Ok(self.methods.get_or_init(|| computed))
    }

    /// True iff the container declares any member that is not itself a
    /// qualifying extension method. Shape-only: access level never
    /// affects this, so a single private helper field counts.
    pub fn contains_non_extension_members(&self) -> bool {
        use crate::symbols::Member;
        self.comp.type_def(self.id).members.iter().any(|m| match m {
            Member::Method(id) => !is_qualifying_extension_method(self.comp, *id),
            Member::Other => true,
        })
    }

    /// Distinct receiver types across all extension methods, in first
    /// occurrence order. Distinctness is symbol identity ([`TypeId`]
    /// equality), never display-text equality.
    pub fn receiver_types(&self) -> Result<&[TypeId], ClassifyError> {
        if let Some(types) = self.receiver_types.get() {
            return Ok(types);
        }
        let methods = self.extension_methods()?;
        let mut distinct = Vec::new();
        for method in methods {
            let ty = method.this_parameter_type();
            if !distinct.contains(&ty) {
                distinct.push(ty);
            }
        }
        Ok(self.receiver_types.get_or_init(|| distinct))
    }

    pub fn all_extensions_have_same_this_parameter_type(
        &self,
    ) -> Result<bool, ClassifyError> {
        Ok(self.receiver_types()?.len() == 1)
    }

    /// Canonical name of the container type, cached.
    pub fn display_text(&self) -> &str {
        self.display
            .get_or_init(|| self.comp.display_type_def(self.id))
    }
}
