use crate::error::SetupError;

pub fn get_exit_code(error: &SetupError) -> i32 {
    match error {
        SetupError::InvalidConstraint(_)
        | SetupError::InvalidConfig(_)
        | SetupError::ConfigError(_) => 2,

        SetupError::EmptyCatalog | SetupError::NoMatch(_) => 3,

        SetupError::NoMatchingBuild { .. } => 4,

        SetupError::UpstreamUnavailable { .. } | SetupError::MalformedRelease(_) => 20,

        _ => 1,
    }
}
