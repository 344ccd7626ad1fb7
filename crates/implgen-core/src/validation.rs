//! Target validation: can a subclass of this type be generated at all?

use std::fmt;
use std::path::Path;

use crate::model::{MemberSignature, TypeDescriptor, TypeKind};
use crate::provider::builtin;

/// Why a request or target type was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// No type identifier was given.
    MissingIdentifier,
    /// No output root or archive path was given.
    MissingLocation,
    /// Array types cannot be extended.
    Array,
    /// Primitive types cannot be extended.
    Primitive,
    /// Enums cannot be extended.
    Enum,
    /// Records cannot be extended.
    Record,
    /// The type is `final`.
    Final,
    /// The type is `private`.
    Private,
    /// The class has no constructor a subclass could call.
    NoAccessibleConstructor,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingIdentifier => "no type name given",
            Self::MissingLocation => "no output location given",
            Self::Array => "array types cannot be implemented",
            Self::Primitive => "primitive types cannot be implemented",
            Self::Enum => "enums cannot be extended",
            Self::Record => "records cannot be extended",
            Self::Final => "final classes cannot be extended",
            Self::Private => "private types cannot be extended",
            Self::NoAccessibleConstructor => "the class has no non-private constructor",
        };
        f.write_str(reason)
    }
}

/// A rejected request or target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot implement `{target}`: {reason}")]
pub struct InvalidTargetError {
    /// The identifier as given.
    pub target: String,
    /// Why it was rejected.
    pub reason: InvalidReason,
}

impl InvalidTargetError {
    fn new(target: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            target: target.into(),
            reason,
        }
    }
}

/// A type that passed validation, with the constructors a subclass can call.
#[derive(Debug, Clone)]
pub struct ValidatedTarget {
    descriptor: TypeDescriptor,
    constructors: Vec<MemberSignature>,
}

impl ValidatedTarget {
    /// The validated type.
    #[must_use]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Non-private constructors, in declaration order. Always empty for
    /// interfaces.
    #[must_use]
    pub fn constructors(&self) -> &[MemberSignature] {
        &self.constructors
    }

    /// Unwraps the descriptor.
    #[must_use]
    pub fn into_descriptor(self) -> TypeDescriptor {
        self.descriptor
    }
}

/// Checks that a request names a type and a location.
///
/// # Errors
///
/// Returns an error if either is empty.
pub fn check_request(identifier: &str, location: &Path) -> Result<(), InvalidTargetError> {
    if identifier.trim().is_empty() {
        return Err(InvalidTargetError::new(identifier, InvalidReason::MissingIdentifier));
    }
    if location.as_os_str().is_empty() {
        return Err(InvalidTargetError::new(identifier, InvalidReason::MissingLocation));
    }
    Ok(())
}

/// Validates that `descriptor` can be implemented or extended.
///
/// # Errors
///
/// Returns an error naming the first rule the type breaks.
pub fn validate(descriptor: TypeDescriptor) -> Result<ValidatedTarget, InvalidTargetError> {
    let reject = |reason| Err(InvalidTargetError::new(descriptor.name().as_str(), reason));

    match descriptor.kind() {
        TypeKind::Array => return reject(InvalidReason::Array),
        TypeKind::Primitive => return reject(InvalidReason::Primitive),
        TypeKind::Enum => return reject(InvalidReason::Enum),
        TypeKind::Record => return reject(InvalidReason::Record),
        TypeKind::Class | TypeKind::Interface | TypeKind::Annotation => {}
    }
    match descriptor.name().as_str() {
        builtin::ENUM => return reject(InvalidReason::Enum),
        builtin::RECORD => return reject(InvalidReason::Record),
        _ => {}
    }

    let modifiers = descriptor.modifiers();
    if modifiers.is_final() {
        return reject(InvalidReason::Final);
    }
    if modifiers.is_private() {
        return reject(InvalidReason::Private);
    }

    let constructors: Vec<MemberSignature> = if descriptor.is_interface() {
        Vec::new()
    } else {
        descriptor
            .declared_constructors()
            .iter()
            .filter(|c| !c.modifiers.is_private())
            .cloned()
            .collect()
    };
    if !descriptor.is_interface() && constructors.is_empty() {
        return reject(InvalidReason::NoAccessibleConstructor);
    }

    Ok(ValidatedTarget {
        descriptor,
        constructors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassName, Modifiers, TypeShape};

    fn descriptor(shape: TypeShape) -> TypeDescriptor {
        TypeDescriptor::new(shape, None, Vec::new())
    }

    fn class(name: &str) -> TypeShape {
        TypeShape::new(ClassName::new(name).unwrap(), TypeKind::Class)
            .with_constructor(MemberSignature::constructor().with_modifiers(Modifiers::PUBLIC))
    }

    fn reason(result: Result<ValidatedTarget, InvalidTargetError>) -> InvalidReason {
        result.unwrap_err().reason
    }

    // --- request checks ---

    #[test]
    fn empty_identifier_is_rejected() {
        let err = check_request("  ", Path::new("out")).unwrap_err();
        assert_eq!(err.reason, InvalidReason::MissingIdentifier);
    }

    #[test]
    fn empty_location_is_rejected() {
        let err = check_request("a.A", Path::new("")).unwrap_err();
        assert_eq!(err.reason, InvalidReason::MissingLocation);
    }

    // --- kinds ---

    #[test]
    fn pseudo_types_are_rejected() {
        let array = TypeDescriptor::pseudo("int[]", TypeKind::Array);
        let primitive = TypeDescriptor::pseudo("int", TypeKind::Primitive);
        assert_eq!(reason(validate(array)), InvalidReason::Array);
        assert_eq!(reason(validate(primitive)), InvalidReason::Primitive);
    }

    #[test]
    fn enums_and_records_are_rejected() {
        let color = TypeShape::new(ClassName::new("a.Color").unwrap(), TypeKind::Enum);
        let point = TypeShape::new(ClassName::new("a.Point").unwrap(), TypeKind::Record);
        assert_eq!(reason(validate(descriptor(color))), InvalidReason::Enum);
        assert_eq!(reason(validate(descriptor(point))), InvalidReason::Record);
    }

    #[test]
    fn enum_and_record_base_classes_are_rejected() {
        assert_eq!(
            reason(validate(descriptor(class(builtin::ENUM)))),
            InvalidReason::Enum
        );
        assert_eq!(
            reason(validate(descriptor(class(builtin::RECORD)))),
            InvalidReason::Record
        );
    }

    // --- modifiers ---

    #[test]
    fn final_class_is_rejected() {
        let shape = class("a.Sealed").with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL);
        let err = validate(descriptor(shape)).unwrap_err();
        assert_eq!(err.reason, InvalidReason::Final);
        assert_eq!(err.to_string(), "cannot implement `a.Sealed`: final classes cannot be extended");
    }

    #[test]
    fn private_nested_class_is_rejected() {
        let shape = class("a.Outer$Hidden").with_modifiers(Modifiers::PRIVATE);
        assert_eq!(reason(validate(descriptor(shape))), InvalidReason::Private);
    }

    // --- constructors ---

    #[test]
    fn class_with_only_private_constructors_is_rejected() {
        let shape = TypeShape::new(ClassName::new("a.Singleton").unwrap(), TypeKind::Class)
            .with_constructor(MemberSignature::constructor().with_modifiers(Modifiers::PRIVATE));
        assert_eq!(
            reason(validate(descriptor(shape))),
            InvalidReason::NoAccessibleConstructor
        );
    }

    #[test]
    fn private_constructors_are_filtered_out() {
        let shape = class("a.Widget")
            .with_constructor(MemberSignature::constructor().with_modifiers(Modifiers::PRIVATE));
        let target = validate(descriptor(shape)).unwrap();
        assert_eq!(target.constructors().len(), 1);
    }

    #[test]
    fn interface_needs_no_constructor() {
        let shape = TypeShape::new(ClassName::new("a.Api").unwrap(), TypeKind::Interface)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT);
        let target = validate(descriptor(shape)).unwrap();
        assert!(target.constructors().is_empty());
    }
}
