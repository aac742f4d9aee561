use layers::arcs::ArcError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum GlobeError {
    #[error("globe has been disposed")]
    Disposed,
    #[error("invalid arc options")]
    InvalidArc(#[from] ArcError),
    #[error("invalid globe configuration")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::GlobeError;
    use layers::arcs::ArcError;
    use std::error::Error;

    #[test]
    fn arc_errors_are_chained() {
        let err = GlobeError::from(ArcError::NonFiniteCoordinate {
            field: "start_lat",
            value: f64::NAN,
        });
        assert_eq!(err.to_string(), "invalid arc options");
        let source = err.source().expect("source");
        assert!(source.to_string().contains("start_lat"));
    }
}
