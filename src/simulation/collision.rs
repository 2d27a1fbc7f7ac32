use super::{LanderState, Landscape, LandscapeSegment, Rect};

mod defaults {
    pub const HALF_EXTENT: f64 = 15.;
    pub const MAX_ANGLE: f64 = 5.;
    pub const MAX_VERTICAL_SPEED: f64 = 0.5;
    pub const MAX_HORIZONTAL_SPEED: f64 = 0.5;
}

/// Verdict of a touchdown. Anything but `Correct` is a crash; `error_abs` is
/// by how much the limit was exceeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Landing {
    Correct,
    WrongTerrain,
    NotVertical { error_abs: f64 },
    TooFastHorizontal { error_abs: f64 },
    TooFastVertical { error_abs: f64 },
}

impl Landing {
    pub fn is_safe(&self) -> bool {
        matches!(self, Landing::Correct)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionChecker {
    half_extent: f64,
    max_angle: f64,
    max_vertical_speed: f64,
    max_horizontal_speed: f64,
}

impl Default for CollisionChecker {
    fn default() -> Self {
        Self {
            half_extent: defaults::HALF_EXTENT,
            max_angle: defaults::MAX_ANGLE,
            max_vertical_speed: defaults::MAX_VERTICAL_SPEED,
            max_horizontal_speed: defaults::MAX_HORIZONTAL_SPEED,
        }
    }
}

impl CollisionChecker {
    /// Tests the lander's bounding box against the current tile and both
    /// neighbours, the box can straddle a tile seam.
    pub fn check(&self, landscape: &Landscape, lander: &LanderState) -> Option<Landing> {
        let size = self.half_extent * 2.;
        let bounds = Rect::centered(lander.position, size, size);
        let tile = landscape.tile_index(lander.position.x);

        (-1..=1)
            .flat_map(|offset| landscape.segments_at(tile + offset))
            .find(|segment| bounds.clips(segment.p1, segment.p2))
            .map(|segment| self.judge(&segment, lander))
    }

    fn judge(&self, segment: &LandscapeSegment, lander: &LanderState) -> Landing {
        let angle = lander.angle.abs();
        let (vx, vy) = (lander.velocity.x.abs(), lander.velocity.y.abs());
        if !segment.landable {
            Landing::WrongTerrain
        } else if angle > self.max_angle {
            Landing::NotVertical {
                error_abs: angle - self.max_angle,
            }
        } else if vx > self.max_horizontal_speed {
            Landing::TooFastHorizontal {
                error_abs: vx - self.max_horizontal_speed,
            }
        } else if vy > self.max_vertical_speed {
            Landing::TooFastVertical {
                error_abs: vy - self.max_vertical_speed,
            }
        } else {
            Landing::Correct
        }
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn with_half_extent(self, half_extent: f64) -> Self {
        assert!(half_extent > 0.);
        Self {
            half_extent,
            ..self
        }
    }

    pub fn with_max_angle(self, max_angle: f64) -> Self {
        assert!(max_angle >= 0.);
        Self { max_angle, ..self }
    }

    pub fn with_max_vertical_speed(self, max_vertical_speed: f64) -> Self {
        assert!(max_vertical_speed > 0.);
        Self {
            max_vertical_speed,
            ..self
        }
    }

    pub fn with_max_horizontal_speed(self, max_horizontal_speed: f64) -> Self {
        assert!(max_horizontal_speed > 0.);
        Self {
            max_horizontal_speed,
            ..self
        }
    }
}
