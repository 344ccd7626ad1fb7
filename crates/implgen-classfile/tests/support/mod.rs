//! Test helper that assembles minimal class files in memory.
#![allow(dead_code)]

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PoolKey {
    Utf8(String),
    Class(String),
}

#[derive(Default)]
struct Pool {
    bytes: Vec<u8>,
    indices: HashMap<PoolKey, u16>,
    next: u16,
}

impl Pool {
    fn new() -> Self {
        Self {
            next: 1,
            ..Self::default()
        }
    }

    fn utf8(&mut self, value: &str) -> u16 {
        let key = PoolKey::Utf8(value.to_string());
        if let Some(&index) = self.indices.get(&key) {
            return index;
        }
        self.bytes.push(1);
        self.bytes.extend_from_slice(&u16::try_from(value.len()).unwrap().to_be_bytes());
        self.bytes.extend_from_slice(value.as_bytes());
        self.insert(key, 1)
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        let key = PoolKey::Class(internal_name.to_string());
        if let Some(&index) = self.indices.get(&key) {
            return index;
        }
        let name_index = self.utf8(internal_name);
        self.bytes.push(7);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        self.insert(key, 1)
    }

    fn long(&mut self, value: i64) {
        self.bytes.push(5);
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self.next += 2;
    }

    fn insert(&mut self, key: PoolKey, slots: u16) -> u16 {
        let index = self.next;
        self.indices.insert(key, index);
        self.next += slots;
        index
    }
}

/// A method to add to a [`ClassFileBuilder`].
#[derive(Debug, Clone)]
pub struct MethodSpec {
    access: u16,
    name: String,
    descriptor: String,
    exceptions: Vec<String>,
    parameter_names: Option<Vec<Option<String>>>,
    code: bool,
}

impl MethodSpec {
    pub fn new(access: u16, name: &str, descriptor: &str) -> Self {
        Self {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            exceptions: Vec::new(),
            parameter_names: None,
            code: false,
        }
    }

    pub fn throws(mut self, internal_name: &str) -> Self {
        self.exceptions.push(internal_name.to_string());
        self
    }

    pub fn parameter_names(mut self, names: &[Option<&str>]) -> Self {
        self.parameter_names = Some(names.iter().map(|n| n.map(str::to_string)).collect());
        self
    }

    /// Adds a trivial `Code` attribute so the reader has to skip it.
    pub fn with_code(mut self) -> Self {
        self.code = true;
        self
    }
}

struct InnerClass {
    inner: String,
    outer: String,
    name: String,
    flags: u16,
}

/// Builds class file bytes for tests.
pub struct ClassFileBuilder {
    name: String,
    access: u16,
    superclass: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<(u16, String, String)>,
    methods: Vec<MethodSpec>,
    inner_classes: Vec<InnerClass>,
    longs: Vec<i64>,
}

impl ClassFileBuilder {
    pub fn new(internal_name: &str) -> Self {
        Self {
            name: internal_name.to_string(),
            access: 0x0021,
            superclass: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
            longs: Vec::new(),
        }
    }

    pub fn access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    pub fn superclass(mut self, internal_name: Option<&str>) -> Self {
        self.superclass = internal_name.map(str::to_string);
        self
    }

    pub fn interface(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn field(mut self, access: u16, name: &str, descriptor: &str) -> Self {
        self.fields
            .push((access, name.to_string(), descriptor.to_string()));
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn inner_class(mut self, inner: &str, outer: &str, name: &str, flags: u16) -> Self {
        self.inner_classes.push(InnerClass {
            inner: inner.to_string(),
            outer: outer.to_string(),
            name: name.to_string(),
            flags,
        });
        self
    }

    /// Adds a two-slot constant to the pool.
    pub fn long_constant(mut self, value: i64) -> Self {
        self.longs.push(value);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut pool = Pool::new();
        for value in &self.longs {
            pool.long(*value);
        }

        let this_class = pool.class(&self.name);
        let super_class = self.superclass.as_deref().map_or(0, |s| pool.class(s));

        let mut body = Vec::new();
        push_u2(&mut body, self.access);
        push_u2(&mut body, this_class);
        push_u2(&mut body, super_class);

        push_u2(&mut body, count(self.interfaces.len()));
        for interface in &self.interfaces {
            push_u2(&mut body, pool.class(interface));
        }

        push_u2(&mut body, count(self.fields.len()));
        for (access, name, descriptor) in &self.fields {
            push_u2(&mut body, *access);
            push_u2(&mut body, pool.utf8(name));
            push_u2(&mut body, pool.utf8(descriptor));
            push_u2(&mut body, 0);
        }

        push_u2(&mut body, count(self.methods.len()));
        for method in &self.methods {
            push_u2(&mut body, method.access);
            push_u2(&mut body, pool.utf8(&method.name));
            push_u2(&mut body, pool.utf8(&method.descriptor));

            let mut attributes: Vec<(u16, Vec<u8>)> = Vec::new();
            if method.code {
                // max_stack, max_locals, code_length = 1, `return`, no
                // exception table, no attributes
                let code = vec![0, 1, 0, 1, 0, 0, 0, 1, 0xB1, 0, 0, 0, 0];
                attributes.push((pool.utf8("Code"), code));
            }
            if !method.exceptions.is_empty() {
                let mut data = Vec::new();
                push_u2(&mut data, count(method.exceptions.len()));
                for exception in &method.exceptions {
                    push_u2(&mut data, pool.class(exception));
                }
                attributes.push((pool.utf8("Exceptions"), data));
            }
            if let Some(names) = &method.parameter_names {
                let mut data = vec![u8::try_from(names.len()).unwrap()];
                for name in names {
                    push_u2(&mut data, name.as_deref().map_or(0, |n| pool.utf8(n)));
                    push_u2(&mut data, 0);
                }
                attributes.push((pool.utf8("MethodParameters"), data));
            }
            write_attributes(&mut body, &attributes);
        }

        let mut attributes = Vec::new();
        if !self.inner_classes.is_empty() {
            let mut data = Vec::new();
            push_u2(&mut data, count(self.inner_classes.len()));
            for inner in &self.inner_classes {
                push_u2(&mut data, pool.class(&inner.inner));
                push_u2(&mut data, pool.class(&inner.outer));
                push_u2(&mut data, pool.utf8(&inner.name));
                push_u2(&mut data, inner.flags);
            }
            attributes.push((pool.utf8("InnerClasses"), data));
        }
        write_attributes(&mut body, &attributes);

        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE];
        push_u2(&mut bytes, 0); // minor
        push_u2(&mut bytes, 61); // major: Java 17
        push_u2(&mut bytes, pool.next);
        bytes.extend_from_slice(&pool.bytes);
        bytes.extend_from_slice(&body);
        bytes
    }
}

fn write_attributes(out: &mut Vec<u8>, attributes: &[(u16, Vec<u8>)]) {
    push_u2(out, count(attributes.len()));
    for (name_index, data) in attributes {
        push_u2(out, *name_index);
        out.extend_from_slice(&u32::try_from(data.len()).unwrap().to_be_bytes());
        out.extend_from_slice(data);
    }
}

fn push_u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn count(len: usize) -> u16 {
    u16::try_from(len).unwrap()
}
