//! Descriptor resolution: linking provider shapes into descriptors.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use super::{builtin, MetadataProvider, ProviderBox, ResolutionError};
use crate::collector::Subtyping;
use crate::identity::MemberIdentityKey;
use crate::model::{ClassName, MemberSignature, TypeDescriptor, TypeKind, TypeRef, TypeShape};

/// Resolves type identifiers into [`TypeDescriptor`]s.
pub struct DescriptorResolver {
    provider: ProviderBox,
}

impl DescriptorResolver {
    /// Creates a resolver over `provider`.
    #[must_use]
    pub fn new<P: MetadataProvider + 'static>(provider: P) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Creates a resolver over an already boxed provider.
    #[must_use]
    pub fn from_box(provider: ProviderBox) -> Self {
        Self { provider }
    }

    /// Resolves a fully-qualified identifier.
    ///
    /// Array and primitive identifiers (`int`, `java.lang.String[]`) resolve
    /// to pseudo-descriptors of kind [`TypeKind::Array`] or
    /// [`TypeKind::Primitive`] without consulting the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed, the type or one of
    /// its supertypes cannot be found, or the inheritance graph is cyclic.
    pub fn resolve(&self, identifier: &str) -> Result<TypeDescriptor, ResolutionError> {
        let identifier = identifier.trim();
        let ty = TypeRef::parse(identifier).map_err(|source| ResolutionError::InvalidIdentifier {
            identifier: identifier.to_string(),
            source,
        })?;

        match ty {
            TypeRef::Void | TypeRef::Primitive(_) => {
                Ok(TypeDescriptor::pseudo(identifier, TypeKind::Primitive))
            }
            TypeRef::Array(_) => Ok(TypeDescriptor::pseudo(identifier, TypeKind::Array)),
            TypeRef::Object(name) => {
                let mut session = Session::new(self.provider.as_ref());
                let descriptor = session.resolve(&name)?;
                debug!(
                    "resolved {} ({} types loaded)",
                    descriptor.name(),
                    session.loaded.len()
                );
                Ok(Arc::try_unwrap(descriptor).unwrap_or_else(|shared| (*shared).clone()))
            }
        }
    }
}

/// Supertypes every array type has besides `java.lang.Object`.
const ARRAY_SUPERTYPES: &[&str] = &["java.lang.Cloneable", "java.io.Serializable"];

impl DescriptorResolver {
    /// Walks the supertypes of `sub` looking for `sup`. Types the provider
    /// cannot supply end their branch of the walk.
    fn extends(&self, sub: &ClassName, sup: &ClassName) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![sub.clone()];
        while let Some(name) = pending.pop() {
            if name == *sup {
                return true;
            }
            if !seen.insert(name.clone()) {
                continue;
            }
            match self.provider.lookup(&name) {
                Ok(Some(shape)) => {
                    pending.extend(shape.superclass);
                    pending.extend(shape.interfaces);
                }
                Ok(None) => {}
                Err(e) => debug!("subtype check skips {name}: {e}"),
            }
        }
        false
    }
}

impl Subtyping for DescriptorResolver {
    fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        match (sub, sup) {
            _ if sub == sup => true,
            (TypeRef::Object(_) | TypeRef::Array(_), TypeRef::Object(sup))
                if sup.as_str() == builtin::OBJECT =>
            {
                true
            }
            (TypeRef::Object(sub), TypeRef::Object(sup)) => self.extends(sub, sup),
            (TypeRef::Array(_), TypeRef::Object(sup)) => ARRAY_SUPERTYPES.contains(&sup.as_str()),
            (TypeRef::Array(sub), TypeRef::Array(sup)) => self.is_subtype(sub, sup),
            _ => false,
        }
    }
}

/// Per-request memo; shared supertypes are loaded once.
struct Session<'a> {
    provider: &'a dyn MetadataProvider,
    loaded: HashMap<ClassName, Arc<TypeDescriptor>>,
    in_progress: HashSet<ClassName>,
}

impl<'a> Session<'a> {
    fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self {
            provider,
            loaded: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn resolve(&mut self, name: &ClassName) -> Result<Arc<TypeDescriptor>, ResolutionError> {
        if let Some(descriptor) = self.loaded.get(name) {
            return Ok(Arc::clone(descriptor));
        }
        if !self.in_progress.insert(name.clone()) {
            return Err(ResolutionError::Cycle {
                name: name.to_string(),
            });
        }

        let shape = self
            .provider
            .lookup(name)?
            .ok_or_else(|| ResolutionError::NotFound {
                name: name.to_string(),
            })?;

        let superclass = match &shape.superclass {
            Some(superclass) if !shape.kind.is_interface() => {
                Some(self.resolve_supertype(&shape, superclass)?)
            }
            _ => None,
        };
        let interfaces = shape
            .interfaces
            .iter()
            .map(|interface| self.resolve_supertype(&shape, interface))
            .collect::<Result<Vec<_>, _>>()?;

        let public_methods = public_methods(&shape, superclass.as_deref(), &interfaces);
        let canonical = shape.name.clone();
        let descriptor = Arc::new(TypeDescriptor::new(shape, superclass, public_methods));

        self.in_progress.remove(name);
        if canonical != *name {
            self.loaded.insert(canonical, Arc::clone(&descriptor));
        }
        self.loaded.insert(name.clone(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    fn resolve_supertype(
        &mut self,
        shape: &TypeShape,
        supertype: &ClassName,
    ) -> Result<Arc<TypeDescriptor>, ResolutionError> {
        self.resolve(supertype).map_err(|err| match err {
            ResolutionError::NotFound { name } => ResolutionError::MissingSupertype {
                name: shape.name.to_string(),
                supertype: name,
            },
            other => other,
        })
    }
}

/// Builds the public method table: own public methods, then the
/// superclass's, then each superinterface's non-static ones. A later entry
/// with an already seen identity is hidden by the earlier; declarations that
/// differ only in return type are all kept.
fn public_methods(
    shape: &TypeShape,
    superclass: Option<&TypeDescriptor>,
    interfaces: &[Arc<TypeDescriptor>],
) -> Vec<MemberSignature> {
    let mut seen = HashSet::new();
    let mut table = Vec::new();
    let mut add = |member: &MemberSignature| {
        if seen.insert(MemberIdentityKey::of(member)) {
            table.push(member.clone());
        }
    };

    let interface = shape.kind.is_interface();
    shape
        .methods
        .iter()
        .filter(|m| m.modifiers.is_public() || (interface && !m.modifiers.is_private()))
        .for_each(&mut add);

    if let Some(superclass) = superclass {
        superclass.public_methods().iter().for_each(&mut add);
    }

    interfaces
        .iter()
        .flat_map(|i| i.public_methods())
        .filter(|m| !m.modifiers.is_static())
        .for_each(&mut add);

    table
}
