//! Type descriptor data model.
//!
//! These types describe the shape of a JVM type as seen by a metadata
//! provider. They are plain values: nothing here performs I/O, and a
//! [`TypeDescriptor`] is never mutated once assembled.

use std::fmt;
use std::ops::BitOr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors raised while building model values from raw text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The class name was empty.
    #[error("class name is empty")]
    EmptyClassName,

    /// The class name contains a segment that is not a Java identifier.
    #[error("invalid class name `{name}`")]
    InvalidClassName {
        /// The rejected name.
        name: String,
    },

    /// The type expression could not be parsed.
    #[error("invalid type `{text}`: {reason}")]
    InvalidType {
        /// The rejected type expression.
        text: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A modifier keyword was not recognised.
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
}

// ────────────────────────────────────────────
// Types
// ────────────────────────────────────────────

/// A Java primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
}

impl PrimitiveType {
    /// All primitive types, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    /// Returns the Java keyword for this type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Returns the JVM descriptor character for this type.
    #[must_use]
    pub const fn descriptor(self) -> char {
        match self {
            Self::Boolean => 'Z',
            Self::Byte => 'B',
            Self::Char => 'C',
            Self::Short => 'S',
            Self::Int => 'I',
            Self::Long => 'J',
            Self::Float => 'F',
            Self::Double => 'D',
        }
    }

    /// Looks up a primitive type by its Java keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Looks up a primitive type by its JVM descriptor character.
    #[must_use]
    pub fn from_descriptor(tag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.descriptor() == tag)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A validated binary class name such as `java.util.Map$Entry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    /// Creates a class name from its binary (dotted) form.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or a segment is not a Java
    /// identifier.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyClassName);
        }
        if !name.split('.').all(is_identifier) {
            return Err(ModelError::InvalidClassName {
                name: name.to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Creates a class name from its internal (slashed) form, `java/lang/Object`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`ClassName::new`].
    pub fn from_internal(internal: &str) -> Result<Self, ModelError> {
        Self::new(&internal.replace('/', "."))
    }

    /// Wraps a name known to be valid, or a pseudo-type name such as `int[]`.
    pub(crate) fn unchecked(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the binary name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the internal form used in class files and descriptors.
    #[must_use]
    pub fn internal(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Returns the package, or `None` for the default package.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(package, _)| package)
    }

    /// Returns the last dotted segment, including any `$` nesting.
    #[must_use]
    pub fn binary_simple_name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, s)| s)
    }

    /// Returns the simple name: the innermost nested segment.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let binary = self.binary_simple_name();
        match binary.rsplit_once('$') {
            Some((outer, inner)) if !outer.is_empty() && !inner.is_empty() => inner,
            _ => binary,
        }
    }

    /// Returns the canonical (source) name, `java.util.Map.Entry`.
    ///
    /// Returns `None` for anonymous and local classes, whose nested segment
    /// starts with a digit and which cannot be named in source.
    #[must_use]
    pub fn canonical(&self) -> Option<String> {
        let binary = self.binary_simple_name();
        let mut segments = binary.split('$');
        let outer = segments.next().unwrap_or_default();
        if outer.is_empty() {
            return Some(self.0.clone());
        }

        let mut canonical = match self.package() {
            Some(package) => format!("{package}.{outer}"),
            None => outer.to_string(),
        };
        for nested in segments {
            if nested.is_empty() || nested.starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }
            canonical.push('.');
            canonical.push_str(nested);
        }
        Some(canonical)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `text` is a Java identifier (keywords are not checked).
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// An erased Java type as it appears in a member signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// `void`, only valid as a return type.
    Void,
    /// A primitive type.
    Primitive(PrimitiveType),
    /// A class or interface type, generic arguments erased.
    Object(ClassName),
    /// An array of the element type.
    Array(Box<TypeRef>),
}

impl TypeRef {
    /// Creates an object type from a binary class name.
    ///
    /// # Errors
    ///
    /// Returns an error if the class name is invalid.
    pub fn object(name: &str) -> Result<Self, ModelError> {
        Ok(Self::Object(ClassName::new(name)?))
    }

    /// Wraps `element` in one array dimension.
    #[must_use]
    pub fn array_of(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Parses a source-style type expression.
    ///
    /// Accepts primitive keywords, `void`, binary class names, `[]` array
    /// suffixes and a trailing `...`. Generic arguments are erased, so
    /// `java.util.Map<K, V>[]` parses as an array of `java.util.Map`.
    ///
    /// # Errors
    ///
    /// Returns an error for unbalanced generics, `void[]`, or an invalid
    /// class name.
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let invalid = |reason| ModelError::InvalidType {
            text: text.to_string(),
            reason,
        };

        let erased = erase_generics(text).ok_or_else(|| invalid("unbalanced generic arguments"))?;
        let mut base = erased.trim();
        let mut dimensions = 0usize;
        if let Some(stripped) = base.strip_suffix("...") {
            base = stripped.trim_end();
            dimensions += 1;
        }
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            dimensions += 1;
        }

        let mut ty = if base == "void" {
            if dimensions > 0 {
                return Err(invalid("arrays of void are not allowed"));
            }
            Self::Void
        } else if let Some(primitive) = PrimitiveType::from_keyword(base) {
            Self::Primitive(primitive)
        } else {
            Self::Object(ClassName::new(base)?)
        };

        for _ in 0..dimensions {
            ty = Self::array_of(ty);
        }
        Ok(ty)
    }

    /// Returns the JVM descriptor of this type, `[Ljava/lang/String;`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self {
            Self::Void => "V".to_string(),
            Self::Primitive(p) => p.descriptor().to_string(),
            Self::Object(name) => format!("L{};", name.internal()),
            Self::Array(element) => format!("[{}", element.descriptor()),
        }
    }

    /// Returns the source spelling, or `None` if a class in it has no
    /// canonical name.
    #[must_use]
    pub fn source_name(&self) -> Option<String> {
        match self {
            Self::Void => Some("void".to_string()),
            Self::Primitive(p) => Some(p.keyword().to_string()),
            Self::Object(name) => name.canonical(),
            Self::Array(element) => element.source_name().map(|s| s + "[]"),
        }
    }

    /// Returns true for `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Object(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// Removes `<...>` sections. Returns `None` if the brackets do not balance.
fn erase_generics(text: &str) -> Option<String> {
    let mut depth = 0usize;
    let mut erased = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            _ if depth == 0 => erased.push(c),
            _ => {}
        }
    }
    (depth == 0).then_some(erased)
}

// ────────────────────────────────────────────
// Modifiers
// ────────────────────────────────────────────

/// A set of Java modifiers using the reflection/class-file bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u16);

impl Modifiers {
    /// `public`
    pub const PUBLIC: Self = Self(0x0001);
    /// `private`
    pub const PRIVATE: Self = Self(0x0002);
    /// `protected`
    pub const PROTECTED: Self = Self(0x0004);
    /// `static`
    pub const STATIC: Self = Self(0x0008);
    /// `final`
    pub const FINAL: Self = Self(0x0010);
    /// `synchronized`
    pub const SYNCHRONIZED: Self = Self(0x0020);
    /// `volatile`
    pub const VOLATILE: Self = Self(0x0040);
    /// `transient`
    pub const TRANSIENT: Self = Self(0x0080);
    /// `native`
    pub const NATIVE: Self = Self(0x0100);
    /// `interface`
    pub const INTERFACE: Self = Self(0x0200);
    /// `abstract`
    pub const ABSTRACT: Self = Self(0x0400);
    /// `strictfp`
    pub const STRICT: Self = Self(0x0800);

    /// Keywords in canonical Java display order.
    const KEYWORDS: [(Self, &'static str); 12] = [
        (Self::PUBLIC, "public"),
        (Self::PROTECTED, "protected"),
        (Self::PRIVATE, "private"),
        (Self::ABSTRACT, "abstract"),
        (Self::STATIC, "static"),
        (Self::FINAL, "final"),
        (Self::TRANSIENT, "transient"),
        (Self::VOLATILE, "volatile"),
        (Self::SYNCHRONIZED, "synchronized"),
        (Self::NATIVE, "native"),
        (Self::STRICT, "strictfp"),
        (Self::INTERFACE, "interface"),
    ];

    /// Returns the empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a set from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns true if every modifier in `other` is present.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns this set with every modifier in `other` removed.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `abstract`
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    /// `final`
    #[must_use]
    pub const fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    /// `private`
    #[must_use]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    /// `public`
    #[must_use]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    /// `static`
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Parses a list of modifier keywords.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown keyword.
    pub fn parse_keywords<I, S>(keywords: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keywords.into_iter().try_fold(Self::empty(), |acc, keyword| {
            let keyword = keyword.as_ref().trim();
            Self::KEYWORDS
                .iter()
                .find(|(_, k)| *k == keyword)
                .map(|(m, _)| acc | *m)
                .ok_or_else(|| ModelError::UnknownModifier(keyword.to_string()))
        })
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (modifier, keyword) in Self::KEYWORDS {
            if self.contains(modifier) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(keyword)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ────────────────────────────────────────────
// Members
// ────────────────────────────────────────────

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared name, when the metadata carries one.
    pub name: Option<String>,
    /// Parameter type.
    pub ty: TypeRef,
}

impl Parameter {
    /// Creates an unnamed parameter.
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self { name: None, ty }
    }

    /// Creates a named parameter.
    #[must_use]
    pub fn named(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

/// Whether a member is a method or a constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A method with its return type.
    Method {
        /// Declared return type.
        return_type: TypeRef,
    },
    /// A constructor.
    Constructor,
}

/// Full signature of a method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSignature {
    /// Member name; `<init>` for constructors.
    pub name: String,
    /// Method or constructor.
    pub kind: MemberKind,
    /// Ordered parameters.
    pub parameters: Vec<Parameter>,
    /// Declared exception types.
    pub exceptions: Vec<ClassName>,
    /// Declared modifiers.
    pub modifiers: Modifiers,
}

impl MemberSignature {
    /// Name used for constructors.
    pub const CONSTRUCTOR_NAME: &'static str = "<init>";

    /// Creates a method with no parameters, exceptions or modifiers.
    #[must_use]
    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method { return_type },
            parameters: Vec::new(),
            exceptions: Vec::new(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Creates a constructor with no parameters, exceptions or modifiers.
    #[must_use]
    pub fn constructor() -> Self {
        Self {
            name: Self::CONSTRUCTOR_NAME.to_string(),
            kind: MemberKind::Constructor,
            parameters: Vec::new(),
            exceptions: Vec::new(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Appends a declared exception.
    #[must_use]
    pub fn with_exception(mut self, exception: ClassName) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns true for constructors.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor)
    }

    /// Returns true if the member is declared `abstract`.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    /// Returns the return type of a method; `None` for constructors.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            MemberKind::Method { return_type } => Some(return_type),
            MemberKind::Constructor => None,
        }
    }

    /// Returns the JVM descriptors of the parameter types.
    #[must_use]
    pub fn parameter_descriptors(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.ty.descriptor()).collect()
    }
}

// ────────────────────────────────────────────
// Type shapes and descriptors
// ────────────────────────────────────────────

/// The kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// An ordinary class.
    Class,
    /// An interface.
    Interface,
    /// An enum.
    Enum,
    /// A record.
    Record,
    /// An annotation interface.
    Annotation,
    /// An array type.
    Array,
    /// A primitive type or `void`.
    Primitive,
}

impl TypeKind {
    /// Returns true for interfaces and annotation interfaces.
    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Annotation => "annotation",
            Self::Array => "array",
            Self::Primitive => "primitive",
        };
        f.write_str(name)
    }
}

/// One type's own declaration, as reported by a metadata provider.
///
/// Supertypes are referenced by name; a [`TypeDescriptor`] links them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeShape {
    /// Binary name.
    pub name: ClassName,
    /// Type kind.
    pub kind: TypeKind,
    /// Declared modifiers.
    pub modifiers: Modifiers,
    /// Direct superclass; always `None` for interfaces.
    pub superclass: Option<ClassName>,
    /// Direct superinterfaces.
    pub interfaces: Vec<ClassName>,
    /// Declared methods, any visibility.
    pub methods: Vec<MemberSignature>,
    /// Declared constructors, any visibility.
    pub constructors: Vec<MemberSignature>,
    /// Classpath location the type was loaded from.
    pub origin: Option<PathBuf>,
}

impl TypeShape {
    /// Creates a public shape with no supertypes or members.
    #[must_use]
    pub fn new(name: ClassName, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            modifiers: Modifiers::PUBLIC,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            origin: None,
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the superclass.
    #[must_use]
    pub fn with_superclass(mut self, superclass: ClassName) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Appends a superinterface.
    #[must_use]
    pub fn with_interface(mut self, interface: ClassName) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Appends a declared method.
    #[must_use]
    pub fn with_method(mut self, method: MemberSignature) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends a declared constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: MemberSignature) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// An immutable snapshot of a type and its superclass chain.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    shape: TypeShape,
    superclass: Option<Arc<TypeDescriptor>>,
    public_methods: Vec<MemberSignature>,
}

impl TypeDescriptor {
    /// Assembles a descriptor from a shape, its resolved superclass, and its
    /// public member list.
    #[must_use]
    pub fn new(
        shape: TypeShape,
        superclass: Option<Arc<TypeDescriptor>>,
        public_methods: Vec<MemberSignature>,
    ) -> Self {
        Self {
            shape,
            superclass,
            public_methods,
        }
    }

    /// Creates a descriptor for an array or primitive pseudo-type.
    pub(crate) fn pseudo(identifier: &str, kind: TypeKind) -> Self {
        let shape = TypeShape::new(ClassName::unchecked(identifier), kind)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT | Modifiers::FINAL);
        Self::new(shape, None, Vec::new())
    }

    /// Returns the underlying shape.
    #[must_use]
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Binary name.
    #[must_use]
    pub fn name(&self) -> &ClassName {
        &self.shape.name
    }

    /// Type kind.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.shape.kind
    }

    /// Type modifiers.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.shape.modifiers
    }

    /// Returns true for interfaces and annotation interfaces.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.shape.kind.is_interface()
    }

    /// Resolved superclass.
    #[must_use]
    pub fn superclass(&self) -> Option<&TypeDescriptor> {
        self.superclass.as_deref()
    }

    /// Iterates over this type followed by each superclass.
    pub fn superclass_chain(&self) -> impl Iterator<Item = &TypeDescriptor> {
        std::iter::successors(Some(self), |ty| ty.superclass())
    }

    /// Methods declared by this type itself.
    #[must_use]
    pub fn declared_methods(&self) -> &[MemberSignature] {
        &self.shape.methods
    }

    /// Constructors declared by this type itself.
    #[must_use]
    pub fn declared_constructors(&self) -> &[MemberSignature] {
        &self.shape.constructors
    }

    /// Public methods, declared and inherited.
    #[must_use]
    pub fn public_methods(&self) -> &[MemberSignature] {
        &self.public_methods
    }

    /// Classpath location the type was loaded from.
    #[must_use]
    pub fn origin(&self) -> Option<&Path> {
        self.shape.origin.as_deref()
    }
}
