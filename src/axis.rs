use crate::ir::{Axis, Orientation};
use crate::option::{AxisOption, OneOrMany};

/// Axes split by role. A role with no axes is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoweredAxes {
    pub x_axis: Option<OneOrMany<AxisOption>>,
    pub y_axis: Option<OneOrMany<AxisOption>>,
}

/// Partition axes by orientation and lower each partition.
///
/// A single axis is emitted bare; several are emitted as a list in their
/// original relative order.
pub fn lower_axes(axes: &[Axis]) -> LoweredAxes {
    let (horizontal, vertical): (Vec<&Axis>, Vec<&Axis>) = axes
        .iter()
        .partition(|a| a.position.orientation() == Orientation::Horizontal);

    LoweredAxes {
        x_axis: OneOrMany::from_vec(horizontal.into_iter().map(lower_axis).collect()),
        y_axis: OneOrMany::from_vec(vertical.into_iter().map(lower_axis).collect()),
    }
}

/// Position only decides the partition and is not re-emitted.
pub fn lower_axis(axis: &Axis) -> AxisOption {
    AxisOption {
        axis_type: axis.axis_type,
        name: axis.name.as_ref().filter(|n| !n.is_empty()).cloned(),
        min: axis.min,
        max: axis.max,
    }
}
