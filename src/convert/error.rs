//! Conversion Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Expected a single value for {type_name} but {count} were supplied")]
    Ambiguous { type_name: &'static str, count: usize },

    #[error("No converter registered for {type_name}")]
    NoConverter { type_name: &'static str },

    #[error("Enum conversion is disabled, cannot convert to {type_name}")]
    EnumsDisabled { type_name: &'static str },

    #[error("Cannot convert '{text}' to {type_name}: {reason}")]
    Invalid {
        text: String,
        type_name: &'static str,
        reason: String,
    },

    #[error("Cannot build {type_name} from {count} values")]
    Shape { type_name: &'static str, count: usize },

    #[error("{type_name} cannot be bound from text")]
    Unsupported { type_name: &'static str },
}
