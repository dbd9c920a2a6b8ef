use crate::core::trajectory::Trajectory;

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Plot extents, in meters, for drawing one or more trajectories on shared
/// axes with a fixed distance:height ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWindow {
    pub x_span: f64,
    pub y_span: f64,
}

impl AxisWindow {
    /// Pads the farthest and highest points, then widens whichever axis is
    /// short of the distance:height ratio. Spans never drop below 1 m.
    pub fn from_extents(max_x_m: f64, max_y_m: f64) -> Self {
        let x = padded(max_x_m, X_PADDING_RATIO);
        let y = padded(max_y_m, Y_PADDING_RATIO);

        let x_span = x.max(y * DISTANCE_TO_HEIGHT_RATIO);
        Self {
            x_span,
            y_span: x_span / DISTANCE_TO_HEIGHT_RATIO,
        }
    }

    pub fn for_trajectories<'a>(paths: impl IntoIterator<Item = &'a Trajectory>) -> Self {
        let (max_x, max_y) = paths
            .into_iter()
            .filter_map(|path| Some((path.max_x()?, path.max_y()?)))
            .fold((0.0f64, 0.0f64), |(mx, my), (x, y)| {
                (mx.max(f64::from(x)), my.max(f64::from(y)))
            });
        Self::from_extents(max_x, max_y)
    }
}

fn padded(extent_m: f64, ratio: f64) -> f64 {
    (extent_m * (1.0 + ratio)).max(1.0)
}
