use std::fmt;

/// Failure to build a [`ShaderProgram`](super::ShaderProgram) from WGSL source.
///
/// Compile and validation variants carry the full naga diagnostic, rendered
/// against the source.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// The source does not parse.
    Compile(String),
    /// The source parses but fails validation.
    Validate(String),
    /// A required entry point or resource binding is missing or misplaced.
    Link(String),
    /// The vertex entry point has no input with this name.
    MissingAttribute(&'static str),
    /// The uniform block has no member with this name.
    MissingUniform(&'static str),
    /// A uniform member exists but has the wrong type.
    UniformType {
        name: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Compile(log) => write!(f, "error in shader source: {log}"),
            ProgramError::Validate(log) => write!(f, "shader validation failed: {log}"),
            ProgramError::Link(msg) => write!(f, "link error in program: {msg}"),
            ProgramError::MissingAttribute(name) => {
                write!(f, "link error in program: no vertex attribute `{name}`")
            }
            ProgramError::MissingUniform(name) => {
                write!(f, "link error in program: no uniform `{name}`")
            }
            ProgramError::UniformType { name, expected } => {
                write!(f, "link error in program: uniform `{name}` must be {expected}")
            }
        }
    }
}

impl std::error::Error for ProgramError {}
