use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("declared size {requested} is smaller than the resolved dataset maximum {resolved}")]
    SizeTooSmall { requested: usize, resolved: usize },
}

/// A loosely-typed hyperparameter value, as handed over by an external
/// configuration collaborator.
///
/// Recognized keys are type- and range-checked during config construction;
/// integers coerce to reals where a real is expected, never the reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl HyperValue {
    fn as_real(&self, key: &'static str) -> Result<f64, ConfigError> {
        match self {
            HyperValue::Real(v) => Ok(*v),
            HyperValue::Int(v) => Ok(*v as f64),
            HyperValue::Text(_) => Err(ConfigError::InvalidValue {
                key,
                reason: "expected a number, got a string".to_string(),
            }),
        }
    }

    fn as_size(&self, key: &'static str) -> Result<usize, ConfigError> {
        match self {
            HyperValue::Int(v) if *v >= 0 => Ok(*v as usize),
            HyperValue::Int(v) => Err(ConfigError::InvalidValue {
                key,
                reason: format!("expected a non-negative integer, got {v}"),
            }),
            _ => Err(ConfigError::InvalidValue {
                key,
                reason: "expected an integer".to_string(),
            }),
        }
    }

    fn as_text(&self, key: &'static str) -> Result<&str, ConfigError> {
        match self {
            HyperValue::Text(v) => Ok(v),
            _ => Err(ConfigError::InvalidValue {
                key,
                reason: "expected a string".to_string(),
            }),
        }
    }
}

/// The sorting algorithm applied to the interaction matrix before packing.
///
/// A closed set selected at construction time; the only algorithm currently
/// defined orders rows (and columns) by descending Euclidean row norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortingAlgorithm {
    #[default]
    RowNorm,
}

impl FromStr for SortingAlgorithm {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "row_norm" | "row-norm" => Ok(SortingAlgorithm::RowNorm),
            _ => Err(()),
        }
    }
}

/// User-supplied hyperparameters of the sorted-Coulomb-matrix variant.
///
/// Immutable once built. The `size` field is optional: when absent, the
/// dataset-wide size is resolved from the data; when present, it is validated
/// against the resolved maximum and never silently clamped (see
/// [`CoulombMatrixConfig::resolve`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoulombMatrixConfig {
    pub sorting_algorithm: SortingAlgorithm,
    pub central_cutoff: f64,
    pub central_decay: f64,
    pub interaction_cutoff: f64,
    pub interaction_decay: f64,
    pub size: Option<usize>,
}

impl CoulombMatrixConfig {
    /// Builds a config from a plain key/value mapping.
    ///
    /// Keys outside the allow-list `{sorting_algorithm, central_cutoff,
    /// central_decay, interaction_cutoff, interaction_decay, size}` are
    /// dropped, not errors; recognized keys are type- and range-checked.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a missing `central_cutoff`, a wrongly
    /// typed value, or an out-of-range value.
    pub fn from_hypers(hypers: &HashMap<String, HyperValue>) -> Result<Self, ConfigError> {
        let mut builder = CoulombMatrixConfigBuilder::new();
        for (key, value) in hypers {
            builder = match key.as_str() {
                "sorting_algorithm" => {
                    let text = value.as_text("sorting_algorithm")?;
                    let algorithm = SortingAlgorithm::from_str(text).map_err(|_| {
                        ConfigError::InvalidValue {
                            key: "sorting_algorithm",
                            reason: format!("unknown algorithm '{text}'"),
                        }
                    })?;
                    builder.sorting_algorithm(algorithm)
                }
                "central_cutoff" => builder.central_cutoff(value.as_real("central_cutoff")?),
                "central_decay" => builder.central_decay(value.as_real("central_decay")?),
                "interaction_cutoff" => {
                    builder.interaction_cutoff(value.as_real("interaction_cutoff")?)
                }
                "interaction_decay" => {
                    builder.interaction_decay(value.as_real("interaction_decay")?)
                }
                "size" => builder.size(value.as_size("size")?),
                _ => builder,
            };
        }
        builder.build()
    }

    /// Produces the resolved configuration for one computation run.
    ///
    /// `resolved_size` is the dataset-wide maximum neighbourhood cardinality
    /// plus one, as computed by the size resolver. A pinned `size` smaller
    /// than that maximum is an error; a larger one is honored (extra slots are
    /// zero-padded).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SizeTooSmall`] if the user pinned a size below
    /// the resolved dataset maximum.
    pub fn resolve(&self, resolved_size: usize) -> Result<ResolvedCoulombMatrixConfig, ConfigError> {
        let size = match self.size {
            Some(pinned) if pinned < resolved_size => {
                return Err(ConfigError::SizeTooSmall {
                    requested: pinned,
                    resolved: resolved_size,
                });
            }
            Some(pinned) => pinned,
            None => resolved_size,
        };
        Ok(ResolvedCoulombMatrixConfig {
            base: self.clone(),
            size,
        })
    }
}

/// A Coulomb-matrix configuration with the feature size fixed.
///
/// Produced exactly once per run by [`CoulombMatrixConfig::resolve`] and
/// threaded explicitly into calculator construction; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCoulombMatrixConfig {
    pub base: CoulombMatrixConfig,
    pub size: usize,
}

impl ResolvedCoulombMatrixConfig {
    /// Length of each packed feature row: the upper triangle of a
    /// `size x size` symmetric matrix, diagonal included.
    pub fn feature_width(&self) -> usize {
        self.size * (self.size + 1) / 2
    }
}

#[derive(Debug, Clone)]
pub struct CoulombMatrixConfigBuilder {
    sorting_algorithm: SortingAlgorithm,
    central_cutoff: Option<f64>,
    central_decay: f64,
    interaction_cutoff: f64,
    interaction_decay: f64,
    size: Option<usize>,
}

impl Default for CoulombMatrixConfigBuilder {
    fn default() -> Self {
        Self {
            sorting_algorithm: SortingAlgorithm::RowNorm,
            central_cutoff: None,
            central_decay: -1.0,
            interaction_cutoff: 10.0,
            interaction_decay: -1.0,
            size: None,
        }
    }
}

impl CoulombMatrixConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorting_algorithm(mut self, algorithm: SortingAlgorithm) -> Self {
        self.sorting_algorithm = algorithm;
        self
    }
    pub fn central_cutoff(mut self, cutoff: f64) -> Self {
        self.central_cutoff = Some(cutoff);
        self
    }
    pub fn central_decay(mut self, decay: f64) -> Self {
        self.central_decay = decay;
        self
    }
    pub fn interaction_cutoff(mut self, cutoff: f64) -> Self {
        self.interaction_cutoff = cutoff;
        self
    }
    pub fn interaction_decay(mut self, decay: f64) -> Self {
        self.interaction_decay = decay;
        self
    }
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn build(self) -> Result<CoulombMatrixConfig, ConfigError> {
        let central_cutoff = self
            .central_cutoff
            .ok_or(ConfigError::MissingParameter("central_cutoff"))?;
        validate_positive("central_cutoff", central_cutoff)?;
        validate_positive("interaction_cutoff", self.interaction_cutoff)?;
        validate_finite("central_decay", self.central_decay)?;
        validate_finite("interaction_decay", self.interaction_decay)?;
        if self.size == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "size",
                reason: "size must be at least 1".to_string(),
            });
        }
        Ok(CoulombMatrixConfig {
            sorting_algorithm: self.sorting_algorithm,
            central_cutoff,
            central_decay: self.central_decay,
            interaction_cutoff: self.interaction_cutoff,
            interaction_decay: self.interaction_decay,
            size: self.size,
        })
    }
}

/// User-supplied hyperparameters of the spherical-expansion variant.
///
/// The feature width `radial_basis_order * (angular_degree + 1)^2` is a closed
/// form of the truncation orders; this variant needs no dataset-wide size
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphericalExpansionConfig {
    pub cutoff: f64,
    pub radial_basis_order: usize,
    pub angular_degree: usize,
    pub smooth_width: f64,
}

impl SphericalExpansionConfig {
    /// Builds a config from a plain key/value mapping.
    ///
    /// Keys outside the allow-list `{cutoff, radial_basis_order,
    /// angular_degree, smooth_width}` are dropped, not errors.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing required keys or wrongly typed or
    /// out-of-range values.
    pub fn from_hypers(hypers: &HashMap<String, HyperValue>) -> Result<Self, ConfigError> {
        let mut builder = SphericalExpansionConfigBuilder::new();
        for (key, value) in hypers {
            builder = match key.as_str() {
                "cutoff" => builder.cutoff(value.as_real("cutoff")?),
                "radial_basis_order" => {
                    builder.radial_basis_order(value.as_size("radial_basis_order")?)
                }
                "angular_degree" => builder.angular_degree(value.as_size("angular_degree")?),
                "smooth_width" => builder.smooth_width(value.as_real("smooth_width")?),
                _ => builder,
            };
        }
        builder.build()
    }

    /// Length of each coefficient row.
    pub fn feature_width(&self) -> usize {
        self.radial_basis_order * (self.angular_degree + 1) * (self.angular_degree + 1)
    }
}

#[derive(Debug, Clone)]
pub struct SphericalExpansionConfigBuilder {
    cutoff: Option<f64>,
    radial_basis_order: Option<usize>,
    angular_degree: Option<usize>,
    smooth_width: f64,
}

impl Default for SphericalExpansionConfigBuilder {
    fn default() -> Self {
        Self {
            cutoff: None,
            radial_basis_order: None,
            angular_degree: None,
            smooth_width: 0.5,
        }
    }
}

impl SphericalExpansionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn radial_basis_order(mut self, order: usize) -> Self {
        self.radial_basis_order = Some(order);
        self
    }
    pub fn angular_degree(mut self, degree: usize) -> Self {
        self.angular_degree = Some(degree);
        self
    }
    pub fn smooth_width(mut self, width: f64) -> Self {
        self.smooth_width = width;
        self
    }

    pub fn build(self) -> Result<SphericalExpansionConfig, ConfigError> {
        let cutoff = self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?;
        let radial_basis_order = self
            .radial_basis_order
            .ok_or(ConfigError::MissingParameter("radial_basis_order"))?;
        let angular_degree = self
            .angular_degree
            .ok_or(ConfigError::MissingParameter("angular_degree"))?;

        validate_positive("cutoff", cutoff)?;
        if radial_basis_order == 0 {
            return Err(ConfigError::InvalidValue {
                key: "radial_basis_order",
                reason: "truncation order must be at least 1".to_string(),
            });
        }
        validate_finite("smooth_width", self.smooth_width)?;
        if self.smooth_width < 0.0 || self.smooth_width >= cutoff {
            return Err(ConfigError::InvalidValue {
                key: "smooth_width",
                reason: format!(
                    "smooth width must lie in [0, cutoff), got {} with cutoff {}",
                    self.smooth_width, cutoff
                ),
            });
        }
        Ok(SphericalExpansionConfig {
            cutoff,
            radial_basis_order,
            angular_degree,
            smooth_width: self.smooth_width,
        })
    }
}

/// The closed set of descriptor variants, selected at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalculatorConfig {
    SortedCoulomb(CoulombMatrixConfig),
    SphericalExpansion(SphericalExpansionConfig),
}

impl CalculatorConfig {
    /// The neighbour-list cutoff this variant requires.
    pub fn cutoff(&self) -> f64 {
        match self {
            CalculatorConfig::SortedCoulomb(config) => config.central_cutoff,
            CalculatorConfig::SphericalExpansion(config) => config.cutoff,
        }
    }
}

fn validate_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            key,
            reason: format!("must be positive and finite, got {value}"),
        });
    }
    Ok(())
}

fn validate_finite(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_nan() {
        return Err(ConfigError::InvalidValue {
            key,
            reason: "must not be NaN".to_string(),
        });
    }
    Ok(())
}
