//! Scatter symbol sizing.
//!
//! A scatter mark with a `size` channel carries a sizing strategy instead of a
//! static value: the renderer calls it once per data tuple. The strategy is kept
//! apart from the serializable option tree so consumers can replace it, or
//! translate it into whatever callback form their renderer binding expects.

use std::fmt;
use std::sync::Arc;

use crate::option::Cell;

/// Maps a data tuple to a symbol size in pixels.
pub trait SymbolSizer: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Identity including parameters. Sizers with equal keys size every datum alike.
    fn key(&self) -> String {
        self.name().to_string()
    }

    fn size(&self, datum: &[Cell]) -> f64;
}

/// `scale * sqrt(datum[dimension])`. Non-numeric or missing cells give `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtSymbolSize {
    pub dimension: usize,
    pub scale: f64,
}

impl Default for SqrtSymbolSize {
    fn default() -> Self {
        Self {
            dimension: 2,
            scale: 2.0,
        }
    }
}

impl SymbolSizer for SqrtSymbolSize {
    fn name(&self) -> &str {
        "sqrt"
    }

    fn key(&self) -> String {
        format!("sqrt(dimension={},scale={})", self.dimension, self.scale)
    }

    fn size(&self, datum: &[Cell]) -> f64 {
        match datum.get(self.dimension).and_then(Cell::as_f64) {
            Some(v) => v.sqrt() * self.scale,
            None => f64::NAN,
        }
    }
}

/// Shared handle to a sizing strategy, as stored on a series.
#[derive(Clone)]
pub struct SymbolSize(Arc<dyn SymbolSizer>);

impl SymbolSize {
    pub fn new(sizer: Arc<dyn SymbolSizer>) -> Self {
        Self(sizer)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn key(&self) -> String {
        self.0.key()
    }

    pub fn size(&self, datum: &[Cell]) -> f64 {
        self.0.size(datum)
    }

    pub fn sizer(&self) -> &dyn SymbolSizer {
        self.0.as_ref()
    }
}

impl Default for SymbolSize {
    fn default() -> Self {
        Self::new(Arc::new(SqrtSymbolSize::default()))
    }
}

impl fmt::Debug for SymbolSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SymbolSize").field(&self.0).finish()
    }
}

impl PartialEq for SymbolSize {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}
