use thiserror::Error;

/// Why a unit could not be analyzed.
///
/// Reported once per unit; a unit that fails here yields no key violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unclosed <{tag}> block starting at line {line}")]
    UnclosedBlock { tag: &'static str, line: usize },

    #[error("unclosed interpolation starting at line {line}")]
    UnclosedInterpolation { line: usize },

    #[error("script syntax error at line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("template expression syntax error at line {line}: {message}")]
    TemplateExpression { line: usize, message: String },

    #[error("failed to read file: {0}")]
    Read(String),
}

impl UnitError {
    /// Line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            UnitError::UnclosedBlock { line, .. }
            | UnitError::UnclosedInterpolation { line }
            | UnitError::Script { line, .. }
            | UnitError::TemplateExpression { line, .. } => Some(*line),
            UnitError::Read(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = UnitError::UnclosedBlock {
            tag: "template",
            line: 2,
        };
        assert_eq!(err.to_string(), "unclosed <template> block starting at line 2");
        assert_eq!(err.line(), Some(2));

        let err = UnitError::Read("permission denied".to_string());
        assert_eq!(err.to_string(), "failed to read file: permission denied");
        assert_eq!(err.line(), None);
    }
}
