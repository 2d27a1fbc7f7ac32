use std::ops::Range;

use super::{Rect, SimulationError, Vec2};

mod defaults {
    pub const LANDSCALE: f64 = 1.5;
    pub const BASE_OFFSET: f64 = 50.;
}

/// Raw design profile of one tile, before scaling.
#[rustfmt::skip]
const DEFAULT_PROFILE: &[(f64, f64)] = &[
    (0.5, 355.55), (5.45, 355.55), (6.45, 359.4), (11.15, 359.4),
    (12.1, 363.65), (14.6, 363.65), (15.95, 375.75), (19.25, 388.),
    (19.25, 391.9), (21.65, 400.), (28.85, 404.25), (30.7, 412.4),
    (33.05, 416.7), (37.9, 420.5), (42.7, 420.5), (47.4, 416.65),
    (51.75, 409.5), (56.55, 404.25), (61.3, 400.), (63.65, 396.15),
    (68., 391.9), (70.3, 388.), (75.1, 386.1), (79.85, 379.95),
    (84.7, 378.95), (89.05, 375.65), (93.75, 375.65), (98.5, 376.55),
    (103.2, 379.95), (104.3, 383.8), (107.55, 388.), (108.95, 391.9),
    (112.4, 396.15), (113.3, 400.), (117.1, 404.25), (121.95, 404.25),
    (125.3, 396.3), (128.6, 394.2), (132.45, 396.15), (135.75, 399.9),
    (138.15, 408.15), (144.7, 412.4), (146.3, 424.8), (149.55, 436.65),
    (149.55, 441.05), (154.35, 444.85), (163.45, 444.85), (168.15, 441.05),
    (172.95, 436.75), (175.45, 432.9), (179.7, 428.6), (181.95, 424.8),
    (186.7, 422.5), (189.15, 412.4), (191.55, 404.35), (196.35, 402.4),
    (200.7, 398.1), (205.45, 391.9), (210.15, 383.8), (212.55, 375.75),
    (216.85, 371.8), (219.3, 367.55), (220.65, 363.65), (224., 359.4),
    (228.8, 359.4), (233.55, 355.55), (237.85, 348.45), (242.65, 343.2),
    (245., 335.15), (247.35, 322.8), (247.3, 314.5), (248.35, 306.55),
    (252.2, 296.5), (256.55, 294.55), (257.95, 290.4), (261.25, 285.95),
    (265.95, 285.95), (267., 290.25), (271.75, 290.25), (273.25, 294.55),
    (275.2, 294.55), (278.95, 296.5), (282.25, 300.3), (284.7, 308.45),
    (291.85, 312.65), (298.55, 330.8), (303.25, 331.8), (308., 335.05),
    (309., 338.9), (312.35, 343.2), (313.8, 347.05), (317.05, 351.4),
    (321.9, 351.4), (322.85, 363.8), (326.6, 375.75), (326.6, 379.95),
    (330.9, 379.95), (332.4, 383.8), (335.8, 388.), (338.1, 396.15),
    (340.45, 400.1), (345.3, 404.25), (346.25, 416.65), (349.6, 428.7),
    (349.6, 432.85), (350.95, 436.75), (354.3, 441.05), (359., 441.05),
    (361.4, 449.1), (363.95, 453.), (368.2, 457.2), (372.9, 461.),
    (410.2, 461.), (412.55, 449.1), (417.4, 441.05), (419.7, 432.9),
    (422.05, 432.9), (425.45, 424.8), (428.8, 422.35), (433.45, 416.65),
    (438.25, 415.15), (442.6, 412.4), (447.4, 412.4), (448.8, 416.65),
    (454.55, 430.55), (455.5, 434.8), (459.25, 438.6), (462.6, 440.9),
    (466., 444.85), (468.35, 452.9), (475.55, 457.3), (484.7, 457.3),
    (494.7, 458.2), (503.75, 461.1), (522.2, 461.1), (524.75, 453.),
    (527.1, 441.05), (527.1, 432.9), (531.9, 432.9), (534.15, 424.8),
    (538.6, 420.5), (540.9, 416.65), (542.35, 412.5), (545.7, 408.),
    (550.45, 408.), (552.85, 398.1), (554.75, 389.95), (559.55, 388.),
    (564.35, 391.9), (573.35, 391.9), (578.1, 388.), (579.55, 379.95),
    (582.9, 369.4), (587.75, 367.55), (588.65, 363.8), (592.05, 359.5),
    (596.85, 355.55),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandscapeSegment {
    pub p1: Vec2,
    pub p2: Vec2,
    pub landable: bool,
}

impl LandscapeSegment {
    fn new(p1: Vec2, p2: Vec2) -> Self {
        Self {
            p1,
            p2,
            landable: p1.y == p2.y,
        }
    }

    pub fn translated(&self, dx: f64) -> Self {
        let offset = Vec2::new(dx, 0.);
        Self {
            p1: self.p1.add(offset),
            p2: self.p2.add(offset),
            landable: self.landable,
        }
    }
}

/// Points describing one tile of terrain, with the transform applied to them
/// when the landscape is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub points: Vec<Vec2>,
    pub landscale: f64,
    pub base_offset: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            points: DEFAULT_PROFILE
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
            landscale: defaults::LANDSCALE,
            base_offset: defaults::BASE_OFFSET,
        }
    }
}

impl Profile {
    /// Unscaled profile, points are used as world coordinates.
    pub fn new(points: Vec<Vec2>) -> Self {
        Self {
            points,
            landscale: 1.,
            base_offset: 0.,
        }
    }

    pub fn with_landscale(self, landscale: f64) -> Self {
        Self { landscale, ..self }
    }

    pub fn with_base_offset(self, base_offset: f64) -> Self {
        Self {
            base_offset,
            ..self
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |reason: &str| Err(SimulationError::InvalidLandscape(reason.to_owned()));
        if self.points.len() < 2 {
            return invalid("profile needs at least two points");
        }
        if !(self.landscale.is_finite() && self.landscale > 0.) {
            return invalid("landscale has to be a positive number");
        }
        if !self.base_offset.is_finite() || !self.points.iter().all(|p| p.is_finite()) {
            return invalid("profile contains non-finite coordinates");
        }
        match self.points.last() {
            Some(last) if last.x > 0. => Ok(()),
            _ => invalid("tile width has to be positive"),
        }
    }
}

/// Horizontally repeating terrain. The same segments are reused at every
/// `tile_index * tile_width` offset.
#[derive(Debug, Clone)]
pub struct Landscape {
    points: Vec<Vec2>,
    segments: Vec<LandscapeSegment>,
    tile_width: f64,
    height: f64,
}

impl Default for Landscape {
    fn default() -> Self {
        Self::build(&Profile::default())
    }
}

impl Landscape {
    pub fn from_profile(profile: &Profile) -> Result<Self, SimulationError> {
        profile.validate()?;
        Ok(Self::build(profile))
    }

    fn build(profile: &Profile) -> Self {
        let Profile {
            points,
            landscale,
            base_offset,
        } = profile;
        let tile_width = points.last().map_or(0., |p| p.x * landscale);
        let points: Vec<_> = points
            .iter()
            .map(|p| Vec2::new(p.x * landscale, (p.y - base_offset) * landscale))
            .collect();
        let segments = points
            .windows(2)
            .map(|pair| LandscapeSegment::new(pair[0], pair[1]))
            .collect();
        let height = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Self {
            points,
            segments,
            tile_width,
            height,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn segments(&self) -> &[LandscapeSegment] {
        &self.segments
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    pub fn width(&self) -> f64 {
        self.tile_width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn tile_index(&self, x: f64) -> i64 {
        (x / self.tile_width).floor() as i64
    }

    pub fn tile_x(&self, x: f64) -> f64 {
        super::wrap(x, self.tile_width)
    }

    /// Segments of the given tile, in world coordinates.
    pub fn segments_at(&self, tile: i64) -> impl Iterator<Item = LandscapeSegment> + '_ {
        let offset = tile as f64 * self.tile_width;
        self.segments.iter().map(move |s| s.translated(offset))
    }

    /// Tiles a renderer has to draw to cover `view`, with one spare tile on
    /// each side.
    pub fn visible_tiles(&self, view: &Rect) -> Range<i64> {
        let start = self.tile_index(view.left) - 1;
        let count = (view.width / self.tile_width).ceil() as i64 + 2;
        start..start + count
    }
}
