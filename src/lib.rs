// Library exports for chartir

pub mod axis;
pub mod compiler;
pub mod data;
pub mod error;
pub mod grid;
pub mod ir;
pub mod legend;
pub mod option;
pub mod schema;
pub mod series;
pub mod symbol;
pub mod tooltip;
pub mod validate;

pub use compiler::{compile, Compiled, Compiler, Diagnostic};
pub use error::{Issue, ValidationError};
pub use ir::ChartIr;
pub use option::RendererConfig;
pub use symbol::{SqrtSymbolSize, SymbolSize, SymbolSizer};

use serde::Deserialize;

/// Compiler settings. Every field has a default, so a partial JSON object works.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompileOptions {
    /// Fill opacity of an area mark whose style sets none.
    #[serde(default = "default_area_opacity")]
    pub area_opacity: f64,
    /// Multiplier of the default scatter sizer.
    #[serde(default = "default_symbol_size_scale")]
    pub symbol_size_scale: f64,
    /// Tuple index read by the default scatter sizer.
    #[serde(default = "default_symbol_size_dimension")]
    pub symbol_size_dimension: usize,
}

fn default_area_opacity() -> f64 { 0.7 }
fn default_symbol_size_scale() -> f64 { 2.0 }
fn default_symbol_size_dimension() -> usize { 2 }

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            area_opacity: default_area_opacity(),
            symbol_size_scale: default_symbol_size_scale(),
            symbol_size_dimension: default_symbol_size_dimension(),
        }
    }
}
