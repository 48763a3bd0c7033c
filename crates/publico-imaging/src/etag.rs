//! Cache validator computation.
//!
//! The validator is a digest over the full resolved parameter tuple, so a
//! CDN edge or browser cache revalidates correctly: identical parameters
//! always produce the identical ETag, any parameter change produces a
//! different one.

use crate::transform::ResolvedTransform;
use sha2::{Digest, Sha256};

/// Length of the hex validator inside the quotes.
const VALIDATOR_LEN: usize = 32;

/// Compute the quoted ETag for a path and its resolved transform.
#[must_use]
pub fn compute_validator(path: &str, transform: &ResolvedTransform) -> String {
    let width = transform
        .width
        .map_or_else(|| "orig".to_string(), |w| w.to_string());
    let height = transform
        .height
        .map_or_else(|| "orig".to_string(), |h| h.to_string());

    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    hasher.update(b"|");
    hasher.update(width.as_bytes());
    hasher.update(b"|");
    hasher.update(height.as_bytes());
    hasher.update(b"|");
    hasher.update(transform.format.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(transform.quality.to_string().as_bytes());

    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("\"{}\"", &hex[..VALIDATOR_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::OutputFormat;

    fn transform() -> ResolvedTransform {
        ResolvedTransform {
            width: Some(800),
            height: None,
            format: OutputFormat::Webp,
            quality: 80,
        }
    }

    #[test]
    fn test_identical_parameters_identical_validator() {
        let a = compute_validator("/img/cover.png", &transform());
        let b = compute_validator("/img/cover.png", &transform());
        assert_eq!(a, b);
    }

    #[test]
    fn test_validator_is_quoted() {
        let etag = compute_validator("/img/cover.png", &transform());
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag.len(), VALIDATOR_LEN + 2);
    }

    #[test]
    fn test_any_parameter_change_changes_validator() {
        let base = compute_validator("/img/cover.png", &transform());

        let mut other = transform();
        other.width = Some(801);
        assert_ne!(base, compute_validator("/img/cover.png", &other));

        let mut other = transform();
        other.height = Some(100);
        assert_ne!(base, compute_validator("/img/cover.png", &other));

        let mut other = transform();
        other.format = OutputFormat::Jpeg;
        assert_ne!(base, compute_validator("/img/cover.png", &other));

        let mut other = transform();
        other.quality = 79;
        assert_ne!(base, compute_validator("/img/cover.png", &other));

        assert_ne!(base, compute_validator("/img/other.png", &transform()));
    }

    #[test]
    fn test_missing_dimensions_hash_as_orig_markers() {
        let none = ResolvedTransform {
            width: None,
            height: None,
            format: OutputFormat::Original,
            quality: 80,
        };
        // A literal width of "orig" must not collide with an absent width
        // producing a differently positioned marker
        let a = compute_validator("/a", &none);
        let b = compute_validator("/a", &none);
        assert_eq!(a, b);
    }
}
