//! Channel-to-column bindings for a layer.
//!
//! The encoder binds table columns to visual channels and validates the
//! bindings against the layer's schema. It never transforms values; scales
//! are resolved by the compositor and applied by renderers.

use crate::error::{Error, Result};
use crate::table::Table;

/// Scale kind for a positional channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    /// Continuous linear axis.
    Linear,
    /// Continuous log10 axis. Rejects non-positive values at composition.
    Log,
    /// Ordered categorical axis.
    Band,
}

/// A positional channel: a column plus the scale kind it expects.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionChannel {
    /// Column name feeding this axis.
    pub field: String,
    /// Scale kind for the axis.
    pub scale: ScaleKind,
}

/// Declarative channel mapping for one layer.
#[derive(Debug, Clone, Default)]
pub struct Encoding {
    /// X axis binding.
    pub x: Option<PositionChannel>,
    /// Y axis binding.
    pub y: Option<PositionChannel>,
    /// Color channel (categorical column).
    pub color: Option<String>,
    /// Shape channel (categorical column consulted by the mark's shape map).
    pub shape: Option<String>,
    /// Size channel (categorical column consulted by the mark's size map).
    pub size: Option<String>,
    /// Tooltip columns, in display order.
    pub tooltip: Vec<String>,
}

impl Encoding {
    /// Create an empty encoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the x axis to a column.
    #[must_use]
    pub fn x(mut self, field: &str, scale: ScaleKind) -> Self {
        self.x = Some(PositionChannel { field: field.to_string(), scale });
        self
    }

    /// Bind the y axis to a column.
    #[must_use]
    pub fn y(mut self, field: &str, scale: ScaleKind) -> Self {
        self.y = Some(PositionChannel { field: field.to_string(), scale });
        self
    }

    /// Bind color to a column.
    #[must_use]
    pub fn color(mut self, field: &str) -> Self {
        self.color = Some(field.to_string());
        self
    }

    /// Bind shape to a column.
    #[must_use]
    pub fn shape(mut self, field: &str) -> Self {
        self.shape = Some(field.to_string());
        self
    }

    /// Bind size to a column.
    #[must_use]
    pub fn size(mut self, field: &str) -> Self {
        self.size = Some(field.to_string());
        self
    }

    /// Set the tooltip columns.
    #[must_use]
    pub fn tooltip(mut self, fields: &[&str]) -> Self {
        self.tooltip = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Validate every referenced column against a table's schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] naming the first bad binding.
    pub fn validate(&self, table: &Table) -> Result<()> {
        let mut check = |channel: &'static str, column: &str| -> Result<()> {
            if table.has_column(column) {
                Ok(())
            } else {
                Err(Error::UnknownColumn { channel, column: column.to_string() })
            }
        };

        if let Some(x) = &self.x {
            check("x", &x.field)?;
        }
        if let Some(y) = &self.y {
            check("y", &y.field)?;
        }
        if let Some(color) = &self.color {
            check("color", color)?;
        }
        if let Some(shape) = &self.shape {
            check("shape", shape)?;
        }
        if let Some(size) = &self.size {
            check("size", size)?;
        }
        for field in &self.tooltip {
            check("tooltip", field)?;
        }
        Ok(())
    }
}

/// A discrete scale: category label to a fixed value, with a default for
/// labels outside the domain. Drives the shape and size channels.
#[derive(Debug, Clone)]
pub struct DiscreteScale<T> {
    domain: Vec<String>,
    range: Vec<T>,
    default: T,
}

impl<T: Copy> DiscreteScale<T> {
    /// A scale that maps every label to the same value.
    #[must_use]
    pub fn fixed(value: T) -> Self {
        Self { domain: Vec::new(), range: Vec::new(), default: value }
    }

    /// A scale over an explicit domain/range, with a fallback default.
    #[must_use]
    pub fn new(domain: &[&str], range: &[T], default: T) -> Self {
        let n = domain.len().min(range.len());
        Self {
            domain: domain[..n].iter().map(|s| (*s).to_string()).collect(),
            range: range[..n].to_vec(),
            default,
        }
    }

    /// Look up a label.
    #[must_use]
    pub fn get(&self, label: &str) -> T {
        self.domain
            .iter()
            .position(|d| d == label)
            .map_or(self.default, |i| self.range[i])
    }
}
