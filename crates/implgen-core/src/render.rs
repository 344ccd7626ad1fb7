//! Java source rendering.
//!
//! Output is a pure function of the validated target, the collected
//! members and the generator options: the same inputs always produce
//! byte-identical text.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::collector::AbstractMemberSet;
use crate::config::GeneratorConfig;
use crate::encoder::UnicodeEscaper;
use crate::model::{
    is_identifier, ClassName, MemberSignature, Modifiers, Parameter, PrimitiveType, TypeRef,
};
use crate::validation::ValidatedTarget;

/// Java reserved words and literals that cannot name a member or parameter.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "_",
];

/// Modifiers that never appear on a generated member.
const STRIPPED: Modifiers = Modifiers::from_bits(
    Modifiers::ABSTRACT.bits() | Modifiers::TRANSIENT.bits() | Modifiers::NATIVE.bits(),
);

/// Errors while rendering a unit.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A referenced type cannot be written in source.
    #[error("type `{name}` has no canonical name and cannot be referenced from source")]
    UnnamedType {
        /// Binary name of the type.
        name: String,
    },

    /// The class-name suffix is empty or not identifier characters.
    #[error("`{suffix}` is not a valid class-name suffix")]
    InvalidSuffix {
        /// The rejected suffix.
        suffix: String,
    },

    /// A member name is not a legal Java identifier.
    #[error("`{name}` is not a valid Java identifier")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
    },

    /// Formatting into the output buffer failed.
    #[error("failed to format generated source")]
    Format(#[from] std::fmt::Error),
}

/// A rendered compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    package: Option<String>,
    class_name: String,
    source: String,
}

impl GeneratedUnit {
    /// Package of the generated class, `None` for the default package.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Simple name of the generated class, `ShapeImpl`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Escaped source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Package directory relative to an output root, `com/example`.
    #[must_use]
    pub fn package_path(&self) -> PathBuf {
        self.package
            .as_deref()
            .map(|p| p.split('.').collect())
            .unwrap_or_default()
    }

    /// Source path relative to an output root, `com/example/ShapeImpl.java`.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        self.package_path().join(format!("{}.java", self.class_name))
    }

    /// Compiled class path relative to an output root, `com/example/ShapeImpl.class`.
    #[must_use]
    pub fn class_path(&self) -> PathBuf {
        self.package_path().join(format!("{}.class", self.class_name))
    }

    /// Archive entry name of the compiled class, always `/`-separated.
    #[must_use]
    pub fn archive_entry(&self) -> String {
        match &self.package {
            Some(package) => format!("{}/{}.class", package.replace('.', "/"), self.class_name),
            None => format!("{}.class", self.class_name),
        }
    }

    /// Unwraps the source text.
    #[must_use]
    pub fn into_source(self) -> String {
        self.source
    }
}

/// Renders Java compilation units.
#[derive(Debug, Clone)]
pub struct SourceRenderer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> SourceRenderer<'a> {
    /// Creates a renderer with the given options.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Renders the implementation class for `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured suffix is unusable, a referenced
    /// type has no canonical name, or a member name is not a Java
    /// identifier.
    pub fn render(
        &self,
        target: &ValidatedTarget,
        members: &AbstractMemberSet,
    ) -> Result<GeneratedUnit, RenderError> {
        if !self.config.has_valid_suffix() {
            return Err(RenderError::InvalidSuffix {
                suffix: self.config.suffix.clone(),
            });
        }
        let descriptor = target.descriptor();
        let name = descriptor.name();
        let class_name = format!("{}{}", name.simple_name(), self.config.suffix);
        let keyword = if descriptor.is_interface() {
            "implements"
        } else {
            "extends"
        };

        let mut lines = Vec::new();
        if let Some(package) = name.package() {
            lines.push(format!("package {package};"));
            lines.push(String::new());
        }
        lines.push(format!(
            "public class {class_name} {keyword} {} {{",
            canonical(name)?
        ));

        let mut blocks = Vec::new();
        for constructor in target.constructors() {
            blocks.push(self.constructor(&class_name, constructor)?);
        }
        for method in members {
            blocks.push(self.method(method)?);
        }
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(block);
        }
        lines.push("}".to_string());

        let line_ending = self.config.line_ending.as_str();
        let mut out = UnicodeEscaper::new(String::new());
        for line in &lines {
            out.write_str(line)?;
            out.write_str(line_ending)?;
        }

        Ok(GeneratedUnit {
            package: name.package().map(str::to_string),
            class_name,
            source: out.into_inner(),
        })
    }

    fn constructor(
        &self,
        class_name: &str,
        constructor: &MemberSignature,
    ) -> Result<Vec<String>, RenderError> {
        let names = parameter_names(&constructor.parameters);
        let head = format!(
            "{}{class_name}({}){}",
            modifier_prefix(constructor.modifiers),
            parameter_list(&constructor.parameters, &names)?,
            throws_clause(&constructor.exceptions)?
        );
        Ok(self.block(head, format!("super({});", names.join(", "))))
    }

    fn method(&self, method: &MemberSignature) -> Result<Vec<String>, RenderError> {
        if !is_identifier(&method.name) || RESERVED.contains(&method.name.as_str()) {
            return Err(RenderError::InvalidIdentifier {
                name: method.name.clone(),
            });
        }
        let return_type = method.return_type().unwrap_or(&TypeRef::Void);
        let names = parameter_names(&method.parameters);
        let head = format!(
            "{}{} {}({}){}",
            modifier_prefix(method.modifiers),
            source_name(return_type)?,
            method.name,
            parameter_list(&method.parameters, &names)?,
            throws_clause(&method.exceptions)?
        );

        let mut block = self.block(head, String::new());
        match default_value(return_type) {
            Some(value) => block[1] = format!("{}return {value};", self.indent(2)),
            None => {
                block.remove(1);
            }
        }
        Ok(block)
    }

    /// `head {` / `body` / `}` at member depth.
    fn block(&self, head: String, body: String) -> Vec<String> {
        vec![
            format!("{}{head} {{", self.indent(1)),
            format!("{}{body}", self.indent(2)),
            format!("{}}}", self.indent(1)),
        ]
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(self.config.indent * depth)
    }
}

/// Declared modifiers minus `abstract`, `transient` and `native`, followed
/// by a space when non-empty.
fn modifier_prefix(modifiers: Modifiers) -> String {
    let kept = modifiers.without(STRIPPED);
    if kept.is_empty() {
        String::new()
    } else {
        format!("{kept} ")
    }
}

/// Zero value returned by a generated method body; `None` for `void`.
fn default_value(ty: &TypeRef) -> Option<&'static str> {
    match ty {
        TypeRef::Void => None,
        TypeRef::Primitive(PrimitiveType::Boolean) => Some("false"),
        TypeRef::Primitive(_) => Some("0"),
        TypeRef::Object(_) | TypeRef::Array(_) => Some("null"),
    }
}

/// Declared names where usable, `arg{i}` otherwise. Every name is unique
/// within the list.
fn parameter_names(parameters: &[Parameter]) -> Vec<String> {
    let mut used = HashSet::new();
    parameters
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let declared = p
                .name
                .as_deref()
                .filter(|n| is_identifier(n) && !RESERVED.contains(n) && !used.contains(*n));
            let name = match declared {
                Some(name) => name.to_string(),
                None => fallback_name(&used, i),
            };
            used.insert(name.clone());
            name
        })
        .collect()
}

/// `arg{index}`, or `arg{index}_{n}` with the smallest free `n`.
fn fallback_name(used: &HashSet<String>, index: usize) -> String {
    let base = format!("arg{index}");
    if !used.contains(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn parameter_list(parameters: &[Parameter], names: &[String]) -> Result<String, RenderError> {
    let rendered = parameters
        .iter()
        .zip(names)
        .map(|(p, name)| Ok(format!("{} {name}", source_name(&p.ty)?)))
        .collect::<Result<Vec<_>, RenderError>>()?;
    Ok(rendered.join(", "))
}

fn throws_clause(exceptions: &[ClassName]) -> Result<String, RenderError> {
    if exceptions.is_empty() {
        return Ok(String::new());
    }
    let names = exceptions
        .iter()
        .map(canonical)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!(" throws {}", names.join(", ")))
}

fn canonical(name: &ClassName) -> Result<String, RenderError> {
    name.canonical().ok_or_else(|| RenderError::UnnamedType {
        name: name.to_string(),
    })
}

fn source_name(ty: &TypeRef) -> Result<String, RenderError> {
    ty.source_name().ok_or_else(|| RenderError::UnnamedType {
        name: ty.to_string(),
    })
}
