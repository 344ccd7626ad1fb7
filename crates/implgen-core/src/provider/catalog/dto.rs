//! Catalog deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization of TOML and JSON
//! catalogs. They are converted to [`TypeShape`](crate::TypeShape)s by the
//! loader.

use std::path::PathBuf;

use serde::Deserialize;

/// Raw catalog: a list of `[[types]]` entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDto {
    /// Declared types.
    #[serde(default)]
    pub types: Vec<TypeDto>,
}

/// One declared type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDto {
    /// Binary name, `com.example.Shape` or `com.example.Outer$Inner`.
    pub name: String,
    /// `class`, `interface`, `enum`, `record` or `annotation` (default: "class").
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Type modifiers (default: `["public"]`).
    #[serde(default = "default_type_modifiers")]
    pub modifiers: Vec<String>,
    /// Superclass; classes default to `java.lang.Object`.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Direct superinterfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Classpath location to compile against, relative to the catalog file.
    #[serde(default)]
    pub origin: Option<PathBuf>,
    /// Declared methods.
    #[serde(default)]
    pub methods: Vec<MethodDto>,
    /// Declared constructors.
    #[serde(default)]
    pub constructors: Vec<ConstructorDto>,
}

/// One declared method.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodDto {
    /// Method name.
    pub name: String,
    /// Return type (default: "void").
    #[serde(default = "default_return")]
    pub returns: String,
    /// Parameters in order.
    #[serde(default)]
    pub params: Vec<ParamDto>,
    /// Declared exceptions.
    #[serde(default)]
    pub throws: Vec<String>,
    /// Modifiers (default: `["public", "abstract"]`).
    #[serde(default = "default_method_modifiers")]
    pub modifiers: Vec<String>,
}

/// One declared constructor.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstructorDto {
    /// Parameters in order.
    #[serde(default)]
    pub params: Vec<ParamDto>,
    /// Declared exceptions.
    #[serde(default)]
    pub throws: Vec<String>,
    /// Modifiers (default: `["public"]`).
    #[serde(default = "default_type_modifiers")]
    pub modifiers: Vec<String>,
}

/// A parameter: either a bare type or a `{ type, name }` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParamDto {
    /// `"int"`
    Type(String),
    /// `{ type = "int", name = "count" }`
    Named {
        /// Parameter type.
        #[serde(rename = "type")]
        ty: String,
        /// Parameter name.
        #[serde(default)]
        name: Option<String>,
    },
}

fn default_kind() -> String {
    "class".to_string()
}

fn default_return() -> String {
    "void".to_string()
}

fn default_type_modifiers() -> Vec<String> {
    vec!["public".to_string()]
}

fn default_method_modifiers() -> Vec<String> {
    vec!["public".to_string(), "abstract".to_string()]
}
