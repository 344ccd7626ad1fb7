//! Member identity keys.
//!
//! Two abstract members are the same member when their name, return type
//! and ordered parameter types all match. Exceptions and modifiers never
//! take part in identity.

use std::fmt;

use crate::model::{MemberSignature, TypeRef};

/// Identity of a member: name, erased return type and erased parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberIdentityKey {
    name: String,
    return_type: String,
    parameters: Vec<String>,
}

impl MemberIdentityKey {
    /// Derives the key of `member`.
    #[must_use]
    pub fn of(member: &MemberSignature) -> Self {
        Self {
            name: member.name.clone(),
            return_type: member
                .return_type()
                .map_or_else(|| TypeRef::Void.descriptor(), TypeRef::descriptor),
            parameters: member.parameter_descriptors(),
        }
    }

    /// Member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// JVM descriptor of the return type.
    #[must_use]
    pub fn return_descriptor(&self) -> &str {
        &self.return_type
    }

    /// JVM descriptors of the parameter types.
    #[must_use]
    pub fn parameter_descriptors(&self) -> &[String] {
        &self.parameters
    }

    /// Drops the return type, leaving the part overriding matches on.
    #[must_use]
    pub fn signature(&self) -> SignatureKey {
        SignatureKey {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

impl fmt::Display for MemberIdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}){}", self.name, self.parameters.concat(), self.return_type)
    }
}

/// Name plus erased parameter types.
///
/// A subclass method with the same signature overrides the inherited one,
/// even when it narrows the return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureKey {
    name: String,
    parameters: Vec<String>,
}

impl SignatureKey {
    /// Derives the signature key of `member`.
    #[must_use]
    pub fn of(member: &MemberSignature) -> Self {
        Self {
            name: member.name.clone(),
            parameters: member.parameter_descriptors(),
        }
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.concat())
    }
}
