//! Field and method descriptor parsing.

use implgen_core::{ClassName, PrimitiveType, TypeRef};

use crate::reader::ClassParseError;

/// Parameter types and return type of a method descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Parameter types in order.
    pub parameters: Vec<TypeRef>,
    /// Return type; [`TypeRef::Void`] for `V`.
    pub return_type: TypeRef,
}

/// Parses a field descriptor such as `[Ljava/lang/String;`.
///
/// # Errors
///
/// Returns an error if the descriptor is malformed or has trailing data.
pub fn parse_field_descriptor(descriptor: &str) -> Result<TypeRef, ClassParseError> {
    let mut parser = DescriptorParser::new(descriptor);
    let ty = parser.parse_type()?;
    parser.finish()?;
    Ok(ty)
}

/// Parses a method descriptor such as `(ILjava/lang/String;)V`.
///
/// # Errors
///
/// Returns an error if the descriptor is malformed or has trailing data.
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor, ClassParseError> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.expect(b'(')?;
    let mut parameters = Vec::new();
    while parser.peek()? != b')' {
        parameters.push(parser.parse_type()?);
    }
    parser.expect(b')')?;
    let return_type = if parser.peek()? == b'V' {
        parser.pos += 1;
        TypeRef::Void
    } else {
        parser.parse_type()?
    };
    parser.finish()?;

    Ok(MethodDescriptor {
        parameters,
        return_type,
    })
}

struct DescriptorParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn error(&self, what: &str) -> ClassParseError {
        ClassParseError::InvalidDescriptor(format!("{what} at {} in `{}`", self.pos, self.text))
    }

    fn peek(&self) -> Result<u8, ClassParseError> {
        self.text
            .as_bytes()
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error("unexpected end"))
    }

    fn expect(&mut self, byte: u8) -> Result<(), ClassParseError> {
        if self.peek()? != byte {
            return Err(self.error(&format!("expected '{}'", byte as char)));
        }
        self.pos += 1;
        Ok(())
    }

    fn finish(&self) -> Result<(), ClassParseError> {
        if self.pos == self.text.len() {
            Ok(())
        } else {
            Err(self.error("trailing data"))
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef, ClassParseError> {
        let tag = self.peek()?;
        match tag {
            b'L' => self.parse_reference_type(),
            b'[' => {
                self.pos += 1;
                Ok(TypeRef::array_of(self.parse_type()?))
            }
            _ => {
                let primitive = PrimitiveType::from_descriptor(char::from(tag))
                    .ok_or_else(|| self.error(&format!("unexpected tag '{}'", char::from(tag))))?;
                self.pos += 1;
                Ok(TypeRef::Primitive(primitive))
            }
        }
    }

    fn parse_reference_type(&mut self) -> Result<TypeRef, ClassParseError> {
        self.expect(b'L')?;
        let rest = &self.text[self.pos..];
        let end = rest
            .find(';')
            .ok_or_else(|| self.error("unterminated reference"))?;
        let name = ClassName::from_internal(&rest[..end])?;
        self.pos += end + 1;
        Ok(TypeRef::Object(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_descriptors() {
        assert_eq!(
            parse_field_descriptor("I").unwrap(),
            TypeRef::Primitive(PrimitiveType::Int)
        );
        assert_eq!(
            parse_field_descriptor("[[Ljava/util/Map$Entry;").unwrap().to_string(),
            "java.util.Map$Entry[][]"
        );
    }

    #[test]
    fn parses_method_descriptors() {
        let method = parse_method_descriptor("(IJ[Ljava/lang/String;Z)Ljava/lang/Object;").unwrap();
        let params: Vec<String> = method.parameters.iter().map(TypeRef::descriptor).collect();
        assert_eq!(params, ["I", "J", "[Ljava/lang/String;", "Z"]);
        assert_eq!(method.return_type.descriptor(), "Ljava/lang/Object;");

        let void = parse_method_descriptor("()V").unwrap();
        assert!(void.parameters.is_empty());
        assert!(void.return_type.is_void());
    }

    #[test]
    fn rejects_malformed_descriptors() {
        for bad in ["", "Q", "Ljava/lang/String", "I;", "(I", "(V)V", "()VV"] {
            let result = if bad.starts_with('(') {
                parse_method_descriptor(bad).map(|_| ())
            } else {
                parse_field_descriptor(bad).map(|_| ())
            };
            assert!(result.is_err(), "accepted `{bad}`");
        }
    }
}
