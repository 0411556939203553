use crate::error::GeocodeError;

/// Best-effort resolution of a free-text address to an administrative area
/// name such as `江宁区` or `沛县`.
///
/// Implementations must not panic; every failure is reported as an error
/// and the classifier treats it as "no verdict".
pub trait Geocoder: Send + Sync {
    /// Resolve `address` (optionally scoped to `city`) to the name of the
    /// district-level area that contains it. `Ok(None)` means the backend
    /// had no answer.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] when the backend is unreachable or answers
    /// with something that cannot be interpreted.
    fn resolve_area(&self, address: &str, city: Option<&str>)
        -> Result<Option<String>, GeocodeError>;
}

/// Geocoder that never has an answer. The classifier default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGeocoder;

impl Geocoder for NoopGeocoder {
    fn resolve_area(
        &self,
        _address: &str,
        _city: Option<&str>,
    ) -> Result<Option<String>, GeocodeError> {
        Ok(None)
    }
}
