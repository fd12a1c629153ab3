//! Approximation configuration.
//!
//! [`ChebyshevConfig`] gathers the free parameters of a Chebyshev
//! approximation: polynomial order, quadrature node count, and the default
//! scalar evaluation method. It is serializable via [`serde`] so a tuned
//! setup can be stored next to the graph it was tuned for.
//!
//! # Example
//!
//! ```rust
//! use ruvector_chebyshev::config::ChebyshevConfig;
//!
//! let cfg = ChebyshevConfig::default();
//! cfg.validate().expect("default config is valid");
//!
//! assert_eq!(cfg.order, 30);
//! assert_eq!(cfg.nodes(), 31);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChebyshevError, Result};
use crate::spectral::EvalMethod;

/// Default polynomial order.
pub const DEFAULT_ORDER: usize = 30;

/// Parameters of a Chebyshev approximation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChebyshevConfig {
    /// Polynomial order K; each filter gets K + 1 coefficients. Default: **30**.
    pub order: usize,

    /// Number of Chebyshev nodes sampled per filter.
    ///
    /// `None` samples `order + 1` nodes, the minimum that reproduces
    /// polynomials of degree `order` exactly. Default: **None**.
    pub num_nodes: Option<usize>,

    /// Algorithm for scalar-point evaluation. Default: **recursive**.
    pub method: EvalMethod,
}

impl Default for ChebyshevConfig {
    fn default() -> Self {
        ChebyshevConfig {
            order: DEFAULT_ORDER,
            num_nodes: None,
            method: EvalMethod::Recursive,
        }
    }
}

impl ChebyshevConfig {
    /// Set the polynomial order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the quadrature node count (`None` for `order + 1`)
    pub fn with_num_nodes(mut self, num_nodes: Option<usize>) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    /// Set the default evaluation method
    pub fn with_method(mut self, method: EvalMethod) -> Self {
        self.method = method;
        self
    }

    /// Effective number of quadrature nodes.
    pub fn nodes(&self) -> usize {
        self.num_nodes.unwrap_or(self.order + 1)
    }

    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns [`ChebyshevError::InvalidParameter`] when `num_nodes` is set
    /// below `order + 1`.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_nodes {
            if n < self.order + 1 {
                return Err(ChebyshevError::invalid_parameter(
                    "num_nodes",
                    format!("must be >= order + 1 ({}), got {n}", self.order + 1),
                ));
            }
        }
        Ok(())
    }

    /// Load a [`ChebyshevConfig`] from a JSON file at `path`.
    ///
    /// Missing fields take their defaults. The result is validated.
    pub fn from_json(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ChebyshevError::io(path, source))?;
        let cfg: ChebyshevConfig = serde_json::from_str(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this configuration as pretty-printed JSON to `path`, creating
    /// parent directories if necessary.
    pub fn to_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ChebyshevError::io(parent, source))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ChebyshevError::io(path, source))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_is_valid() {
        let cfg = ChebyshevConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.method, EvalMethod::Recursive);
    }

    #[test]
    fn too_few_nodes_rejected() {
        let cfg = ChebyshevConfig::default().with_order(10).with_num_nodes(Some(10));
        assert!(matches!(
            cfg.validate(),
            Err(ChebyshevError::InvalidParameter { .. })
        ));
        assert!(cfg.with_num_nodes(Some(11)).validate().is_ok());
    }

    #[test]
    fn json_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("cheb.json");

        let cfg = ChebyshevConfig::default()
            .with_order(8)
            .with_num_nodes(Some(32))
            .with_method(EvalMethod::Direct);
        cfg.to_json(&path).unwrap();

        let back = ChebyshevConfig::from_json(&path).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cheb.json");
        std::fs::write(&path, r#"{ "order": 5 }"#).unwrap();

        let cfg = ChebyshevConfig::from_json(&path).unwrap();
        assert_eq!(cfg.order, 5);
        assert_eq!(cfg.num_nodes, None);
        assert_eq!(cfg.method, EvalMethod::Recursive);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempdir().unwrap();
        let err = ChebyshevConfig::from_json(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ChebyshevError::Io { .. }));
    }

    #[test]
    fn invalid_file_contents_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cheb.json");

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ChebyshevConfig::from_json(&path),
            Err(ChebyshevError::Json(_))
        ));

        std::fs::write(&path, r#"{ "order": 4, "num_nodes": 2 }"#).unwrap();
        assert!(matches!(
            ChebyshevConfig::from_json(&path),
            Err(ChebyshevError::InvalidParameter { .. })
        ));
    }
}
