//! Built-in shapes for the `java.lang` roots every hierarchy ends in.
//!
//! With these registered last, catalogs and class directories do not need
//! to carry `java.lang.Object` themselves.

use super::CatalogProvider;
use crate::model::{
    ClassName, MemberSignature, Modifiers, Parameter, PrimitiveType, TypeKind, TypeRef, TypeShape,
};

/// `java.lang.Object`
pub const OBJECT: &str = "java.lang.Object";
/// `java.lang.Enum`
pub const ENUM: &str = "java.lang.Enum";
/// `java.lang.Record`
pub const RECORD: &str = "java.lang.Record";

/// Returns a provider for `java.lang.Object`, `java.lang.Enum` and
/// `java.lang.Record`.
#[must_use]
pub fn java_lang() -> CatalogProvider {
    let object = ClassName::unchecked(OBJECT);
    let public_ctor = MemberSignature::constructor().with_modifiers(Modifiers::PUBLIC);
    let protected_ctor = MemberSignature::constructor().with_modifiers(Modifiers::PROTECTED);

    let object_shape = TypeShape::new(object.clone(), TypeKind::Class)
        .with_constructor(public_ctor)
        .with_method(
            MemberSignature::method("hashCode", TypeRef::Primitive(PrimitiveType::Int))
                .with_modifiers(Modifiers::PUBLIC | Modifiers::NATIVE),
        )
        .with_method(
            MemberSignature::method("equals", TypeRef::Primitive(PrimitiveType::Boolean))
                .with_parameter(Parameter::named("obj", TypeRef::Object(object.clone())))
                .with_modifiers(Modifiers::PUBLIC),
        )
        .with_method(
            MemberSignature::method("toString", TypeRef::Object(ClassName::unchecked("java.lang.String")))
                .with_modifiers(Modifiers::PUBLIC),
        );

    let enum_shape = TypeShape::new(ClassName::unchecked(ENUM), TypeKind::Class)
        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
        .with_superclass(object.clone())
        .with_constructor(
            protected_ctor
                .clone()
                .with_parameter(Parameter::named(
                    "name",
                    TypeRef::Object(ClassName::unchecked("java.lang.String")),
                ))
                .with_parameter(Parameter::named(
                    "ordinal",
                    TypeRef::Primitive(PrimitiveType::Int),
                )),
        );

    let record_shape = TypeShape::new(ClassName::unchecked(RECORD), TypeKind::Class)
        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
        .with_superclass(object)
        .with_constructor(protected_ctor);

    CatalogProvider::from_shapes("java.lang", [object_shape, enum_shape, record_shape])
}
