//! Shape checks applied to every vector a provider returns.

use verity_core::errors::EmbeddingError;

/// Ensure `embedding` has `expected` components and all of them are finite.
pub fn validate_embedding(embedding: &[f32], expected: usize) -> Result<(), EmbeddingError> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }
    if let Some(component) = embedding.iter().position(|x| !x.is_finite()) {
        return Err(EmbeddingError::NonFiniteValue { component });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_vector() {
        assert!(validate_embedding(&[0.1, 0.2, 0.3], 3).is_ok());
    }

    #[test]
    fn rejects_wrong_dimension() {
        let err = validate_embedding(&[0.1, 0.2], 3).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn rejects_nan_and_reports_position() {
        let err = validate_embedding(&[0.1, f32::NAN, 0.3], 3).unwrap_err();
        assert!(matches!(err, EmbeddingError::NonFiniteValue { component: 1 }));
    }

    #[test]
    fn rejects_infinity() {
        assert!(validate_embedding(&[f32::INFINITY], 1).is_err());
    }
}
