//! Abstract member collection.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::identity::{MemberIdentityKey, SignatureKey};
use crate::model::{MemberSignature, TypeDescriptor, TypeRef};

/// Answers whether one type is assignable to another.
pub trait Subtyping {
    /// Returns true if a value of type `sub` is assignable to `sup`.
    fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool;
}

impl<F> Subtyping for F
where
    F: Fn(&TypeRef, &TypeRef) -> bool,
{
    fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        self(sub, sup)
    }
}

/// Insertion-ordered set of abstract members keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct AbstractMemberSet {
    members: Vec<MemberSignature>,
    identities: HashSet<MemberIdentityKey>,
    signatures: HashMap<SignatureKey, usize>,
}

impl AbstractMemberSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `member` unless an equal identity is already present.
    ///
    /// Members sharing a name and parameter list but not a return type
    /// occupy one slot. The slot holds whichever return type is a subtype of
    /// the other; when neither is, the earlier member stays.
    ///
    /// Returns true if the member was added or replaced the slot's member.
    pub fn insert(&mut self, member: &MemberSignature, subtypes: &dyn Subtyping) -> bool {
        let identity = MemberIdentityKey::of(member);
        if self.identities.contains(&identity) {
            return false;
        }

        let signature = identity.signature();
        let index = match self.signatures.get(&signature).copied() {
            Some(index) => index,
            None => {
                self.signatures.insert(signature, self.members.len());
                self.identities.insert(identity);
                self.members.push(member.clone());
                return true;
            }
        };

        let current = MemberIdentityKey::of(&self.members[index]);
        let narrower = match (member.return_type(), self.members[index].return_type()) {
            (Some(new), Some(old)) => subtypes.is_subtype(new, old),
            _ => false,
        };
        if !narrower {
            debug!("{identity} hidden by {current}");
            return false;
        }
        debug!("{identity} narrows {current}");
        self.identities.remove(&current);
        self.identities.insert(identity);
        self.members[index] = member.clone();
        true
    }

    /// Returns true if a member with this identity is present.
    #[must_use]
    pub fn contains(&self, identity: &MemberIdentityKey) -> bool {
        self.identities.contains(identity)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MemberSignature> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a AbstractMemberSet {
    type Item = &'a MemberSignature;
    type IntoIter = std::slice::Iter<'a, MemberSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects every abstract member `descriptor` requires an implementation of.
///
/// Public members (declared and inherited, including interface members)
/// come first, then abstract members declared at each level of the
/// superclass chain, nearest first. This picks up non-public abstract
/// members that the public scan cannot see.
///
/// Any abstract declaration seen on either path is included, even if some
/// class in the chain also declares a concrete body for it. Overriding that
/// body again is harmless, so no override resolution is attempted. Where
/// declarations differ only in return type, `subtypes` picks the narrowest.
#[must_use]
pub fn collect_abstract_members(
    descriptor: &TypeDescriptor,
    subtypes: &dyn Subtyping,
) -> AbstractMemberSet {
    let mut set = AbstractMemberSet::new();

    let public = descriptor.public_methods().iter();
    let declared = descriptor
        .superclass_chain()
        .flat_map(TypeDescriptor::declared_methods);
    for member in public.chain(declared).filter(|m| m.is_abstract()) {
        set.insert(member, subtypes);
    }

    debug!(
        "{}: {} abstract member(s) to implement",
        descriptor.name(),
        set.len()
    );
    set
}
