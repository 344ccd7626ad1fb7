//! Class file → [`TypeShape`] conversion.

use std::path::Path;

use implgen_core::{
    ClassName, MemberSignature, Modifiers, Parameter, TypeKind, TypeShape,
};

use crate::descriptor::parse_method_descriptor;
use crate::reader::{ClassParseError, ClassReader, ConstantPool};

const ACC_BRIDGE: u16 = 0x0040;
const ACC_SYNTHETIC: u16 = 0x1000;
const ACC_ANNOTATION: u16 = 0x2000;
const ACC_ENUM: u16 = 0x4000;

/// Flags that are modifiers on a class.
const CLASS_MODIFIERS: u16 = 0x0001 | 0x0002 | 0x0004 | 0x0008 | 0x0010 | 0x0200 | 0x0400;
/// Flags that are modifiers on a method. Bits 0x0040 and 0x0080 mean
/// bridge and varargs on methods, not volatile and transient.
const METHOD_MODIFIERS: u16 = 0x0001 | 0x0002 | 0x0004 | 0x0008 | 0x0010 | 0x0020 | 0x0100 | 0x0400 | 0x0800;
/// Flags that are modifiers on a constructor.
const CONSTRUCTOR_MODIFIERS: u16 = 0x0001 | 0x0002 | 0x0004;

const ENUM_BASE: &str = "java/lang/Enum";
const RECORD_BASE: &str = "java/lang/Record";

/// Parses a class file into the shape of the type it declares.
///
/// Synthetic and bridge methods and static initialisers are dropped.
/// Parameter names come from the `MethodParameters` attribute when present.
/// For a nested class, modifiers come from its own `InnerClasses` entry,
/// which is the only place `private`, `protected` and `static` are recorded.
///
/// # Errors
///
/// Returns an error if the bytes are not a well-formed class file.
pub fn parse_class(bytes: &[u8], origin: Option<&Path>) -> Result<TypeShape, ClassParseError> {
    let mut reader = ClassReader::new(bytes);
    reader.expect_magic()?;
    let _minor_version = reader.read_u2()?;
    let _major_version = reader.read_u2()?;
    let pool = ConstantPool::parse(&mut reader)?;

    let access_flags = reader.read_u2()?;
    let this_class = reader.read_u2()?;
    let super_class = reader.read_u2()?;

    let internal_name = pool.class_name(this_class)?;
    let name = ClassName::from_internal(internal_name)?;
    let super_name = match super_class {
        0 => None,
        index => Some(pool.class_name(index)?),
    };

    let interfaces_count = reader.read_u2()?;
    let mut interfaces = Vec::with_capacity(usize::from(interfaces_count));
    for _ in 0..interfaces_count {
        interfaces.push(ClassName::from_internal(pool.class_name(reader.read_u2()?)?)?);
    }

    let fields_count = reader.read_u2()?;
    for _ in 0..fields_count {
        skip_member(&mut reader)?;
    }

    let mut methods = Vec::new();
    let mut constructors = Vec::new();
    let methods_count = reader.read_u2()?;
    for _ in 0..methods_count {
        if let Some(member) = parse_method(&mut reader, &pool)? {
            if member.is_constructor() {
                constructors.push(member);
            } else {
                methods.push(member);
            }
        }
    }

    let mut class_flags = access_flags;
    let attributes_count = reader.read_u2()?;
    for _ in 0..attributes_count {
        let attribute_name = pool.utf8(reader.read_u2()?)?;
        let length = reader.read_u4()? as usize;
        let body = reader.read_slice(length)?;
        if attribute_name == "InnerClasses" {
            if let Some(flags) = inner_class_flags(body, &pool, this_class)? {
                class_flags = flags;
            }
        }
    }

    let kind = type_kind(class_flags, internal_name, super_name);
    let superclass = match super_name {
        Some(super_name) if kind != TypeKind::Interface && kind != TypeKind::Annotation => {
            Some(ClassName::from_internal(super_name)?)
        }
        _ => None,
    };

    Ok(TypeShape {
        name,
        kind,
        modifiers: Modifiers::from_bits(class_flags & CLASS_MODIFIERS),
        superclass,
        interfaces,
        methods,
        constructors,
        origin: origin.map(Path::to_path_buf),
    })
}

fn type_kind(flags: u16, internal_name: &str, super_name: Option<&str>) -> TypeKind {
    if flags & ACC_ANNOTATION != 0 {
        TypeKind::Annotation
    } else if Modifiers::from_bits(flags).contains(Modifiers::INTERFACE) {
        TypeKind::Interface
    } else if flags & ACC_ENUM != 0
        || (super_name == Some(ENUM_BASE) && internal_name != ENUM_BASE)
    {
        TypeKind::Enum
    } else if super_name == Some(RECORD_BASE) {
        TypeKind::Record
    } else {
        TypeKind::Class
    }
}

fn parse_method(
    reader: &mut ClassReader<'_>,
    pool: &ConstantPool,
) -> Result<Option<MemberSignature>, ClassParseError> {
    let access_flags = reader.read_u2()?;
    let name = pool.utf8(reader.read_u2()?)?;
    let descriptor = parse_method_descriptor(pool.utf8(reader.read_u2()?)?)?;

    let mut exceptions = Vec::new();
    let mut parameter_names = Vec::new();
    let attributes_count = reader.read_u2()?;
    for _ in 0..attributes_count {
        let attribute_name = pool.utf8(reader.read_u2()?)?;
        let length = reader.read_u4()? as usize;
        let body = reader.read_slice(length)?;
        match attribute_name {
            "Exceptions" => exceptions = read_exceptions(body, pool)?,
            "MethodParameters" => parameter_names = read_parameter_names(body, pool)?,
            _ => {}
        }
    }

    if access_flags & (ACC_SYNTHETIC | ACC_BRIDGE) != 0 || name == "<clinit>" {
        return Ok(None);
    }

    let (mut member, mask) = if name == MemberSignature::CONSTRUCTOR_NAME {
        (MemberSignature::constructor(), CONSTRUCTOR_MODIFIERS)
    } else {
        (
            MemberSignature::method(name, descriptor.return_type),
            METHOD_MODIFIERS,
        )
    };
    member.modifiers = Modifiers::from_bits(access_flags & mask);
    member.exceptions = exceptions;

    // MethodParameters may omit synthetic leading parameters of inner class
    // constructors; only trust it when the counts line up.
    let names_match = parameter_names.len() == descriptor.parameters.len();
    member.parameters = descriptor
        .parameters
        .into_iter()
        .enumerate()
        .map(|(i, ty)| Parameter {
            name: if names_match {
                parameter_names[i].clone()
            } else {
                None
            },
            ty,
        })
        .collect();

    Ok(Some(member))
}

fn read_exceptions(body: &[u8], pool: &ConstantPool) -> Result<Vec<ClassName>, ClassParseError> {
    let mut reader = ClassReader::new(body);
    let count = reader.read_u2()?;
    (0..count)
        .map(|_| Ok(ClassName::from_internal(pool.class_name(reader.read_u2()?)?)?))
        .collect()
}

fn read_parameter_names(
    body: &[u8],
    pool: &ConstantPool,
) -> Result<Vec<Option<String>>, ClassParseError> {
    let mut reader = ClassReader::new(body);
    let count = reader.read_u1()?;
    (0..count)
        .map(|_| {
            let name_index = reader.read_u2()?;
            let _flags = reader.read_u2()?;
            Ok(match name_index {
                0 => None,
                index => Some(pool.utf8(index)?.to_string()),
            })
        })
        .collect()
}

/// Access flags recorded for `this_class` in an `InnerClasses` attribute.
fn inner_class_flags(
    body: &[u8],
    pool: &ConstantPool,
    this_class: u16,
) -> Result<Option<u16>, ClassParseError> {
    let this_name = pool.class_name(this_class)?;
    let mut reader = ClassReader::new(body);
    let count = reader.read_u2()?;
    for _ in 0..count {
        let inner_class = reader.read_u2()?;
        let _outer_class = reader.read_u2()?;
        let _inner_name = reader.read_u2()?;
        let flags = reader.read_u2()?;
        if inner_class == this_class || pool.class_name(inner_class)? == this_name {
            return Ok(Some(flags));
        }
    }
    Ok(None)
}

fn skip_member(reader: &mut ClassReader<'_>) -> Result<(), ClassParseError> {
    reader.read_u2()?; // access_flags
    reader.read_u2()?; // name_index
    reader.read_u2()?; // descriptor_index
    let attributes_count = reader.read_u2()?;
    for _ in 0..attributes_count {
        reader.read_u2()?; // attribute_name_index
        let length = reader.read_u4()? as usize;
        reader.skip(length)?;
    }
    Ok(())
}
