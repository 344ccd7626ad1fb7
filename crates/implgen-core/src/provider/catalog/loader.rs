//! DTO → shape conversion with validation.

use std::collections::HashSet;
use std::path::Path;

use super::dto::{CatalogDto, ConstructorDto, MethodDto, ParamDto, TypeDto};
use crate::model::{
    ClassName, MemberSignature, ModelError, Modifiers, Parameter, TypeKind, TypeRef, TypeShape,
};
use crate::provider::builtin;

/// Errors during DTO → shape conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "types[0].methods[2].returns").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// Unknown type kind string.
    #[error(
        "{context}: unknown type kind `{value}`, expected: class, interface, enum, record, annotation"
    )]
    UnknownKind {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// The same type is declared twice.
    #[error("type `{name}` is declared more than once")]
    DuplicateType {
        /// The duplicated binary name.
        name: String,
    },
}

/// Converts a `CatalogDto` into validated shapes.
///
/// Relative `origin` paths are joined onto `base`, the catalog's directory.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: CatalogDto, base: Option<&Path>) -> Result<Vec<TypeShape>, LoadError> {
    let mut seen = HashSet::new();
    dto.types
        .into_iter()
        .enumerate()
        .map(|(i, ty)| {
            let shape = convert_type(ty, i, base)?;
            if !seen.insert(shape.name.clone()) {
                return Err(LoadError::DuplicateType {
                    name: shape.name.to_string(),
                });
            }
            Ok(shape)
        })
        .collect()
}

fn convert_type(dto: TypeDto, index: usize, base: Option<&Path>) -> Result<TypeShape, LoadError> {
    let ctx = format!("types[{index}]");
    let name = class_name(&dto.name, format!("{ctx}.name"))?;
    let kind = parse_kind(&dto.kind, &ctx)?;

    let mut modifiers = modifiers(&dto.modifiers, format!("{ctx}.modifiers"))?;
    if kind.is_interface() {
        modifiers = modifiers | Modifiers::INTERFACE | Modifiers::ABSTRACT;
    }

    let superclass = match (&dto.superclass, kind) {
        (_, k) if k.is_interface() => None,
        (Some(superclass), _) => Some(class_name(superclass, format!("{ctx}.superclass"))?),
        (None, TypeKind::Enum) => Some(ClassName::unchecked(builtin::ENUM)),
        (None, TypeKind::Record) => Some(ClassName::unchecked(builtin::RECORD)),
        (None, _) if name.as_str() == builtin::OBJECT => None,
        (None, _) => Some(ClassName::unchecked(builtin::OBJECT)),
    };

    let interfaces = dto
        .interfaces
        .iter()
        .enumerate()
        .map(|(j, i)| class_name(i, format!("{ctx}.interfaces[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let methods = dto
        .methods
        .iter()
        .enumerate()
        .map(|(j, m)| convert_method(m, &format!("{ctx}.methods[{j}]"), kind.is_interface()))
        .collect::<Result<Vec<_>, _>>()?;

    let constructors = dto
        .constructors
        .iter()
        .enumerate()
        .map(|(j, c)| convert_constructor(c, &format!("{ctx}.constructors[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let origin = dto.origin.map(|origin| match base {
        Some(base) if origin.is_relative() => base.join(origin),
        _ => origin,
    });

    Ok(TypeShape {
        name,
        kind,
        modifiers,
        superclass,
        interfaces,
        methods,
        constructors,
        origin,
    })
}

fn convert_method(
    dto: &MethodDto,
    ctx: &str,
    in_interface: bool,
) -> Result<MemberSignature, LoadError> {
    let return_type = type_ref(&dto.returns, format!("{ctx}.returns"))?;
    let mut modifiers = modifiers(&dto.modifiers, format!("{ctx}.modifiers"))?;
    // Interface members are implicitly public.
    if in_interface && !modifiers.is_private() {
        modifiers = modifiers | Modifiers::PUBLIC;
    }
    let mut method = MemberSignature::method(dto.name.trim(), return_type).with_modifiers(modifiers);
    method.parameters = parameters(&dto.params, ctx)?;
    method.exceptions = exceptions(&dto.throws, ctx)?;
    Ok(method)
}

fn convert_constructor(dto: &ConstructorDto, ctx: &str) -> Result<MemberSignature, LoadError> {
    let mut constructor = MemberSignature::constructor()
        .with_modifiers(modifiers(&dto.modifiers, format!("{ctx}.modifiers"))?);
    constructor.parameters = parameters(&dto.params, ctx)?;
    constructor.exceptions = exceptions(&dto.throws, ctx)?;
    Ok(constructor)
}

fn parameters(params: &[ParamDto], ctx: &str) -> Result<Vec<Parameter>, LoadError> {
    params
        .iter()
        .enumerate()
        .map(|(k, param)| {
            let context = format!("{ctx}.params[{k}]");
            match param {
                ParamDto::Type(ty) => Ok(Parameter::new(type_ref(ty, context)?)),
                ParamDto::Named { ty, name } => Ok(Parameter {
                    name: name.as_ref().map(|n| n.trim().to_string()),
                    ty: type_ref(ty, context)?,
                }),
            }
        })
        .collect()
}

fn exceptions(throws: &[String], ctx: &str) -> Result<Vec<ClassName>, LoadError> {
    throws
        .iter()
        .enumerate()
        .map(|(k, t)| class_name(t, format!("{ctx}.throws[{k}]")))
        .collect()
}

fn parse_kind(value: &str, ctx: &str) -> Result<TypeKind, LoadError> {
    match value.trim() {
        "class" => Ok(TypeKind::Class),
        "interface" => Ok(TypeKind::Interface),
        "enum" => Ok(TypeKind::Enum),
        "record" => Ok(TypeKind::Record),
        "annotation" => Ok(TypeKind::Annotation),
        other => Err(LoadError::UnknownKind {
            context: format!("{ctx}.kind"),
            value: other.to_string(),
        }),
    }
}

fn class_name(value: &str, context: String) -> Result<ClassName, LoadError> {
    ClassName::new(value).map_err(|source| LoadError::Validation { context, source })
}

fn type_ref(value: &str, context: String) -> Result<TypeRef, LoadError> {
    TypeRef::parse(value).map_err(|source| LoadError::Validation { context, source })
}

fn modifiers(values: &[String], context: String) -> Result<Modifiers, LoadError> {
    Modifiers::parse_keywords(values).map_err(|source| LoadError::Validation { context, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(toml: &str) -> CatalogDto {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn class_defaults_to_object_superclass() {
        let shapes = load(parse("[[types]]\nname = \"a.Shape\"\n"), None).unwrap();
        assert_eq!(shapes[0].kind, TypeKind::Class);
        assert_eq!(shapes[0].modifiers, Modifiers::PUBLIC);
        assert_eq!(
            shapes[0].superclass.as_ref().map(ClassName::as_str),
            Some(builtin::OBJECT)
        );
    }

    #[test]
    fn interface_gets_interface_bits_and_no_superclass() {
        let shapes = load(
            parse(
                r#"
[[types]]
name = "a.Named"
kind = "interface"
superclass = "a.Ignored"

[[types.methods]]
name = "name"
returns = "java.lang.String"
"#,
            ),
            None,
        )
        .unwrap();
        let shape = &shapes[0];
        assert!(shape.modifiers.contains(Modifiers::INTERFACE | Modifiers::ABSTRACT));
        assert!(shape.superclass.is_none());
        assert!(shape.methods[0].is_abstract());
        assert!(shape.methods[0].modifiers.is_public());
    }

    #[test]
    fn interface_methods_are_implicitly_public() {
        let shapes = load(
            parse(
                r#"
[[types]]
name = "a.Counter"
kind = "interface"

[[types.methods]]
name = "count"
returns = "int"
modifiers = ["abstract"]

[[types.methods]]
name = "helper"
returns = "void"
modifiers = ["private"]
"#,
            ),
            None,
        )
        .unwrap();
        let methods = &shapes[0].methods;
        assert_eq!(methods[0].modifiers, Modifiers::PUBLIC | Modifiers::ABSTRACT);
        assert!(!methods[1].modifiers.is_public());
        assert!(methods[1].modifiers.is_private());
    }

    #[test]
    fn class_methods_keep_declared_access() {
        let shapes = load(
            parse(
                r#"
[[types]]
name = "a.Base"
modifiers = ["public", "abstract"]

[[types.methods]]
name = "hook"
returns = "void"
modifiers = ["abstract"]
"#,
            ),
            None,
        )
        .unwrap();
        assert_eq!(shapes[0].methods[0].modifiers, Modifiers::ABSTRACT);
    }

    #[test]
    fn params_accept_bare_and_named_forms() {
        let shapes = load(
            parse(
                r#"
[[types]]
name = "a.Store"
kind = "interface"

[[types.methods]]
name = "put"
params = ["java.lang.String", { type = "byte[]", name = "data" }]
throws = ["java.io.IOException"]
"#,
            ),
            None,
        )
        .unwrap();
        let put = &shapes[0].methods[0];
        assert_eq!(put.parameters[0].name, None);
        assert_eq!(put.parameters[1].name.as_deref(), Some("data"));
        assert_eq!(put.parameters[1].ty.descriptor(), "[B");
        assert_eq!(put.exceptions[0].as_str(), "java.io.IOException");
    }

    #[test]
    fn enum_and_record_default_superclasses() {
        let shapes = load(
            parse(
                r#"
[[types]]
name = "a.Color"
kind = "enum"
modifiers = ["public", "final"]

[[types]]
name = "a.Point"
kind = "record"
"#,
            ),
            None,
        )
        .unwrap();
        assert_eq!(shapes[0].superclass.as_ref().unwrap().as_str(), builtin::ENUM);
        assert_eq!(shapes[1].superclass.as_ref().unwrap().as_str(), builtin::RECORD);
    }

    #[test]
    fn relative_origin_joins_catalog_dir() {
        let shapes = load(
            parse("[[types]]\nname = \"a.A\"\norigin = \"lib/a.jar\"\n"),
            Some(Path::new("/work")),
        )
        .unwrap();
        assert_eq!(shapes[0].origin, Some(PathBuf::from("/work/lib/a.jar")));
    }

    #[test]
    fn error_context_points_at_field() {
        let err = load(
            parse(
                r#"
[[types]]
name = "a.A"

[[types.methods]]
name = "m"
returns = "java.util.List<"
"#,
            ),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("types[0].methods[0].returns:"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = load(parse("[[types]]\nname = \"a.A\"\nkind = \"struct\"\n"), None).unwrap_err();
        assert!(matches!(err, LoadError::UnknownKind { value, .. } if value == "struct"));
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let err = load(parse("[[types]]\nname = \"a.A\"\n[[types]]\nname = \"a.A\"\n"), None)
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateType { name } if name == "a.A"));
    }
}
