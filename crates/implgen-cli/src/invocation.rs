//! Positional argument shapes.

use std::path::PathBuf;

/// Usage line shown for malformed invocations.
pub const USAGE: &str = "implgen [OPTIONS] <type> <output-root>\n       implgen [OPTIONS] -jar <type> <output-jar>";

const JAR_FLAG: &str = "-jar";

/// What the positional arguments ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Write `<Simple>Impl.java` under `root`.
    Source {
        /// Binary name of the type to implement.
        type_name: String,
        /// Source root directory.
        root: PathBuf,
    },
    /// Compile the implementation and package it into `jar`.
    Jar {
        /// Binary name of the type to implement.
        type_name: String,
        /// Output jar path.
        jar: PathBuf,
    },
}

impl Invocation {
    /// Matches the arguments against the two accepted shapes. Returns `None`
    /// for anything else.
    #[must_use]
    pub fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [flag, type_name, jar] if flag == JAR_FLAG => Some(Self::Jar {
                type_name: type_name.clone(),
                jar: PathBuf::from(jar),
            }),
            [type_name, root] if type_name != JAR_FLAG => Some(Self::Source {
                type_name: type_name.clone(),
                root: PathBuf::from(root),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn two_arguments_generate_source() {
        assert_eq!(
            Invocation::from_args(&args(&["com.example.Shape", "out"])),
            Some(Invocation::Source {
                type_name: "com.example.Shape".into(),
                root: PathBuf::from("out"),
            })
        );
    }

    #[test]
    fn jar_flag_with_two_operands_packages() {
        assert_eq!(
            Invocation::from_args(&args(&["-jar", "com.example.Shape", "out/shape.jar"])),
            Some(Invocation::Jar {
                type_name: "com.example.Shape".into(),
                jar: PathBuf::from("out/shape.jar"),
            })
        );
    }

    #[test]
    fn other_shapes_are_usage_errors() {
        let shapes: [&[&str]; 6] = [
            &[],
            &["com.example.Shape"],
            &["-jar", "com.example.Shape"],
            &["a", "b", "c"],
            &["-Jar", "a", "b"],
            &["-jar", "a", "b", "c"],
        ];
        for shape in shapes {
            assert_eq!(Invocation::from_args(&args(shape)), None, "{shape:?}");
        }
    }
}
