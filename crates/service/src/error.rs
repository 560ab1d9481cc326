use std::fmt;

/// Everything that can abort a replacement request.
///
/// There is no partial recovery: a failure for any single file discards all
/// work for the request, since an archive with only some files replaced
/// would misrepresent the operation's completeness.
#[derive(Debug)]
pub enum ProcessError {
    /// A required submission field (targets or replacement map) is absent.
    MissingInput(&'static str),
    /// Credential did not match the configured secret.
    Unauthorized,
    /// A workbook payload could not be parsed into the sheet model.
    Decode { file: String, message: String },
    /// A mutated workbook could not be re-serialized.
    Encode { file: String, message: String },
    /// The output archive could not be assembled.
    Bundle(String),
}

impl ProcessError {
    /// HTTP-equivalent status for transport embedders.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingInput(_) => 400,
            Self::Unauthorized => 401,
            Self::Decode { .. } => 422,
            Self::Encode { .. } | Self::Bundle(_) => 500,
        }
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(field) => write!(f, "missing required input: {field}"),
            Self::Unauthorized => write!(f, "unauthorized: invalid credential"),
            Self::Decode { file, message } => {
                write!(f, "cannot decode workbook '{file}': {message}")
            }
            Self::Encode { file, message } => {
                write!(f, "cannot encode workbook '{file}': {message}")
            }
            Self::Bundle(message) => write!(f, "cannot assemble archive: {message}"),
        }
    }
}

impl std::error::Error for ProcessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ProcessError::MissingInput("targets").status(), 400);
        assert_eq!(ProcessError::Unauthorized.status(), 401);
        let decode = ProcessError::Decode {
            file: "a.xlsx".into(),
            message: "bad".into(),
        };
        assert_eq!(decode.status(), 422);
        assert_eq!(ProcessError::Bundle("io".into()).status(), 500);
    }

    #[test]
    fn display_names_the_file() {
        let err = ProcessError::Decode {
            file: "q3.xlsx".into(),
            message: "truncated".into(),
        };
        assert_eq!(err.to_string(), "cannot decode workbook 'q3.xlsx': truncated");
    }
}
