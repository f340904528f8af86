use crate::ir::Tooltip;
use crate::option::TooltipOption;

/// Direct copy of the two optional fields.
pub fn lower_tooltip(tooltip: &Tooltip) -> TooltipOption {
    TooltipOption {
        show: tooltip.show,
        trigger: tooltip.trigger,
    }
}
