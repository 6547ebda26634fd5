use crate::core::data::complex::Complex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_JULIA_CONSTANT: Complex = Complex::new(-0.54, 0.54);

/// Which escape-time family a frame renders.
///
/// Mandelbrot starts every orbit at zero and uses the sampled point as `c`.
/// Julia starts the orbit at the sampled point and keeps `c` fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia { constant: Complex },
}

impl FractalKind {
    #[must_use]
    pub const fn julia_default() -> Self {
        Self::Julia {
            constant: DEFAULT_JULIA_CONSTANT,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }

    /// The Julia constant, if any.
    #[must_use]
    pub const fn constant(self) -> Option<Complex> {
        match self {
            Self::Mandelbrot => None,
            Self::Julia { constant } => Some(constant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julia_default_uses_reference_constant() {
        assert_eq!(
            FractalKind::julia_default().constant(),
            Some(Complex::new(-0.54, 0.54))
        );
        assert_eq!(FractalKind::Mandelbrot.constant(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(FractalKind::Mandelbrot.display_name(), "Mandelbrot");
        assert_eq!(FractalKind::julia_default().display_name(), "Julia");
    }

    #[test]
    fn deserializes_tagged_json() {
        let mandelbrot: FractalKind = serde_json::from_str(r#"{"kind":"mandelbrot"}"#).unwrap();
        let julia: FractalKind = serde_json::from_str(
            r#"{"kind":"julia","constant":{"real":-0.8,"imag":0.156}}"#,
        )
        .unwrap();

        assert_eq!(mandelbrot, FractalKind::Mandelbrot);
        assert_eq!(
            julia,
            FractalKind::Julia {
                constant: Complex::new(-0.8, 0.156)
            }
        );
    }
}
