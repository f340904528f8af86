use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::axis::lower_axes;
use crate::data::lower_dataset;
use crate::grid::lower_grid;
use crate::ir::ChartIr;
use crate::legend::lower_legend;
use crate::option::{RendererConfig, TitleOption};
use crate::series::{find_dataset_index, lower_mark, SeriesDefaults};
use crate::symbol::{SqrtSymbolSize, SymbolSize, SymbolSizer};
use crate::tooltip::lower_tooltip;
use crate::CompileOptions;

/// Something the compiler worked around instead of failing on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The mark names a dataset that does not exist; dataset 0 was used.
    UnresolvedDataset { mark_id: String, dataset_id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedDataset {
                mark_id,
                dataset_id,
            } => write!(
                f,
                "mark '{}' references unknown dataset '{}', using dataset 0",
                mark_id, dataset_id
            ),
        }
    }
}

/// Output of a compile together with the fallbacks it applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub config: RendererConfig,
    pub diagnostics: Vec<Diagnostic>,
}

/// Chart IR → renderer configuration.
///
/// Holds only immutable settings, so one compiler can be shared across threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    options: CompileOptions,
    series: SeriesDefaults,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        let sizer = SqrtSymbolSize {
            dimension: options.symbol_size_dimension,
            scale: options.symbol_size_scale,
        };
        let series = SeriesDefaults {
            area_opacity: options.area_opacity,
            symbol_size: SymbolSize::new(Arc::new(sizer)),
        };
        Self { options, series }
    }

    /// Replace the sizing strategy attached to scatter marks with a size channel.
    pub fn with_symbol_sizer(mut self, sizer: Arc<dyn SymbolSizer>) -> Self {
        self.series.symbol_size = SymbolSize::new(sizer);
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn compile(&self, ir: &ChartIr) -> RendererConfig {
        self.compile_with_diagnostics(ir).config
    }

    /// Compile, also returning every fallback that was applied.
    #[tracing::instrument(skip(self, ir), fields(datasets = ir.datasets.len(), marks = ir.marks.len()))]
    pub fn compile_with_diagnostics(&self, ir: &ChartIr) -> Compiled {
        let mut config = RendererConfig::default();
        let mut diagnostics = Vec::new();

        if let Some(title) = ir.title.as_deref().filter(|t| !t.is_empty()) {
            config.title = Some(TitleOption {
                text: title.to_string(),
            });
        }

        if !ir.datasets.is_empty() {
            config.dataset = Some(ir.datasets.iter().map(lower_dataset).collect());
            debug!(count = ir.datasets.len(), "lowered datasets");
        }

        if !ir.marks.is_empty() {
            for mark in &ir.marks {
                if find_dataset_index(&mark.dataset_id, &ir.datasets).is_none() {
                    warn!(
                        mark = %mark.id,
                        dataset = %mark.dataset_id,
                        "unresolved dataset reference, falling back to dataset 0"
                    );
                    diagnostics.push(Diagnostic::UnresolvedDataset {
                        mark_id: mark.id.clone(),
                        dataset_id: mark.dataset_id.clone(),
                    });
                }
            }
            config.series = Some(
                ir.marks
                    .iter()
                    .map(|mark| lower_mark(mark, &ir.datasets, &self.series))
                    .collect(),
            );
            debug!(count = ir.marks.len(), "lowered series");
        }

        if let Some(axes) = ir.axes.as_deref().filter(|a| !a.is_empty()) {
            let lowered = lower_axes(axes);
            config.x_axis = lowered.x_axis;
            config.y_axis = lowered.y_axis;
            debug!(count = axes.len(), "lowered axes");
        }

        if let Some(legend) = &ir.legend {
            config.legend = Some(lower_legend(legend, &ir.marks));
        }

        if let Some(tooltip) = &ir.tooltip {
            config.tooltip = Some(lower_tooltip(tooltip));
        }

        if let Some(grid) = &ir.grid {
            config.grid = Some(lower_grid(grid));
        }

        Compiled {
            config,
            diagnostics,
        }
    }
}

/// Compile with default options.
pub fn compile(ir: &ChartIr) -> RendererConfig {
    Compiler::default().compile(ir)
}
