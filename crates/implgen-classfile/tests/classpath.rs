//! Integration test: class files on disk and in jars → generated source.

mod support;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use implgen_classfile::{ClasspathEntry, ClasspathProvider};
use implgen_core::{ImplError, Implementor, MetadataProvider, ClassName, ResolutionError};
use support::{ClassFileBuilder, MethodSpec};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

const PUBLIC: u16 = 0x0001;
const ABSTRACT: u16 = 0x0400;
const INTERFACE: u16 = 0x0200;

fn greeter() -> Vec<u8> {
    ClassFileBuilder::new("com/example/Greeter")
        .access(PUBLIC | INTERFACE | ABSTRACT)
        .method(
            MethodSpec::new(PUBLIC | ABSTRACT, "greet", "(Ljava/lang/String;)Ljava/lang/String;")
                .parameter_names(&[Some("name")]),
        )
        .build()
}

fn base_task() -> Vec<u8> {
    ClassFileBuilder::new("com/example/BaseTask")
        .access(PUBLIC | ABSTRACT | 0x0020)
        .interface("com/example/Greeter")
        .method(
            MethodSpec::new(0x0004, "<init>", "(I)V")
                .parameter_names(&[Some("priority")])
                .with_code(),
        )
        .method(MethodSpec::new(PUBLIC | ABSTRACT, "run", "()Z").throws("java/io/IOException"))
        .build()
}

fn write_class(root: &Path, internal_name: &str, bytes: &[u8]) {
    let path = root.join(format!("{internal_name}.class"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn write_jar(path: &Path, classes: &[(&str, Vec<u8>)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (internal_name, bytes) in classes {
        zip.start_file(format!("{internal_name}.class"), FileOptions::default())
            .unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}

// ── Directories ──

#[test]
fn interface_from_class_directory() {
    let tmp = TempDir::new().unwrap();
    write_class(tmp.path(), "com/example/Greeter", &greeter());

    let implementor = Implementor::builder()
        .provider(ClasspathProvider::new([tmp.path()]))
        .build();
    let unit = implementor.generate("com.example.Greeter").unwrap();

    assert_eq!(unit.class_name(), "GreeterImpl");
    assert!(unit
        .source()
        .contains("public class GreeterImpl implements com.example.Greeter {"));
    assert!(unit
        .source()
        .contains("public java.lang.String greet(java.lang.String name) {"));
}

#[test]
fn nested_class_found_by_canonical_name() {
    let tmp = TempDir::new().unwrap();
    let nested = ClassFileBuilder::new("com/example/Outer$Listener")
        .access(PUBLIC | INTERFACE | ABSTRACT)
        .inner_class("com/example/Outer$Listener", "com/example/Outer", "Listener", 0x0009 | INTERFACE | ABSTRACT)
        .method(MethodSpec::new(PUBLIC | ABSTRACT, "onEvent", "(J)V"))
        .build();
    write_class(tmp.path(), "com/example/Outer$Listener", &nested);

    let provider = ClasspathProvider::new([tmp.path()]);
    let shape = provider
        .lookup(&ClassName::new("com.example.Outer.Listener").unwrap())
        .unwrap()
        .expect("nested type should be found");
    assert_eq!(shape.name.as_str(), "com.example.Outer$Listener");
    assert_eq!(shape.origin.as_deref(), Some(tmp.path()));

    let unit = Implementor::builder()
        .provider(provider)
        .build()
        .generate("com.example.Outer.Listener")
        .unwrap();
    assert!(unit
        .source()
        .contains("public class ListenerImpl implements com.example.Outer.Listener {"));
}

// ── Jars ──

#[test]
fn abstract_class_from_jar_pulls_interface_members() {
    let tmp = TempDir::new().unwrap();
    let jar = tmp.path().join("api.jar");
    write_jar(
        &jar,
        &[
            ("com/example/Greeter", greeter()),
            ("com/example/BaseTask", base_task()),
        ],
    );

    let implementor = Implementor::builder()
        .provider(ClasspathProvider::new([&jar]))
        .build();
    let descriptor = implementor.resolve("com.example.BaseTask").unwrap();
    assert_eq!(descriptor.origin(), Some(jar.as_path()));

    let unit = implementor.generate_for(descriptor).unwrap();
    let source = unit.source();
    assert!(source.contains("protected BaseTaskImpl(int priority) {"));
    assert!(source.contains("super(priority);"));
    assert!(source.contains("public boolean run() throws java.io.IOException {"));
    assert!(source.contains("public java.lang.String greet(java.lang.String name) {"));
}

#[test]
fn earlier_entries_win() {
    let tmp = TempDir::new().unwrap();
    let first = tmp.path().join("first");
    let second = tmp.path().join("second.jar");
    write_class(&first, "com/example/Greeter", &greeter());
    write_jar(
        &second,
        &[(
            "com/example/Greeter",
            ClassFileBuilder::new("com/example/Greeter")
                .access(PUBLIC | INTERFACE | ABSTRACT)
                .build(),
        )],
    );

    let provider = ClasspathProvider::new([&first, &second]);
    assert_eq!(
        provider.entries(),
        [
            ClasspathEntry::Directory(first.clone()),
            ClasspathEntry::Archive(second.clone()),
        ]
    );
    let shape = provider
        .lookup(&ClassName::new("com.example.Greeter").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(shape.methods.len(), 1);
    assert_eq!(shape.origin, Some(first));
}

#[test]
fn missing_entries_are_not_errors() {
    let tmp = TempDir::new().unwrap();
    let provider = ClasspathProvider::new([tmp.path().join("nope"), tmp.path().join("gone.jar")]);
    let found = provider
        .lookup(&ClassName::new("com.example.Greeter").unwrap())
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn corrupt_class_file_is_a_provider_error() {
    let tmp = TempDir::new().unwrap();
    write_class(tmp.path(), "com/example/Greeter", b"not a class");

    let err = Implementor::builder()
        .provider(ClasspathProvider::new([tmp.path()]))
        .build()
        .generate("com.example.Greeter")
        .unwrap_err();
    match err {
        ImplError::Resolution(ResolutionError::Provider { provider, message, .. }) => {
            assert_eq!(provider, "classpath");
            assert!(message.contains("magic"), "{message}");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[test]
fn path_list_is_split() {
    let joined = std::env::join_paths(["lib/api.jar", "build/classes"]).unwrap();
    let provider = ClasspathProvider::from_path_list(&joined);
    assert_eq!(
        provider.entries(),
        [
            ClasspathEntry::Archive("lib/api.jar".into()),
            ClasspathEntry::Directory("build/classes".into()),
        ]
    );
}
