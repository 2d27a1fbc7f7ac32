use super::{Landscape, Rect, Vec2};

mod defaults {
    pub const WIDTH: f64 = 1400.;
    pub const HEIGHT: f64 = 900.;
}

/// Viewport into the world, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub rect: Rect,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(defaults::WIDTH, defaults::HEIGHT)
    }
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rect: Rect::new(0., 0., width, height),
        }
    }

    /// Centres on `target`, clamps vertically and wraps horizontally.
    pub fn update(&mut self, target: Vec2, landscape: &Landscape) {
        let rect = &mut self.rect;
        rect.set_center(target);

        if rect.top < 0. {
            rect.top = 0.;
        } else if rect.bottom() > landscape.height() {
            rect.set_bottom(landscape.height());
        }

        if rect.left < 0. {
            rect.left += landscape.width();
        } else if rect.right() > landscape.width() {
            rect.left -= landscape.width();
        }
    }

    /// Changes the viewport size and re-centres it on `target`.
    pub fn resize(&mut self, width: f64, height: f64, target: Vec2, landscape: &Landscape) {
        let rect = &mut self.rect;
        rect.width = width;
        rect.height = height;
        rect.set_center(target);
        rect.top = rect.top.min(landscape.height() - height).max(0.);
        rect.left = super::wrap(rect.left, landscape.width());
    }
}

/// Maps a world position to screen space. `x` always lands in
/// `[0, landscape.width())`.
pub fn world_to_screen(pos: Vec2, camera: &Camera, landscape: &Landscape) -> Vec2 {
    Vec2::new(
        super::wrap(pos.x - camera.rect.left, landscape.width()),
        pos.y - camera.rect.top,
    )
}

#[cfg(test)]
mod camera_tests {
    use super::*;
    use crate::Profile;
    use proptest::prelude::*;

    fn landscape() -> Landscape {
        Landscape::from_profile(&Profile::new(vec![
            Vec2::new(0., 300.),
            Vec2::new(100., 400.),
            Vec2::new(200., 400.),
            Vec2::new(250., 350.),
            Vec2::new(300., 400.),
            Vec2::new(400., 400.),
            Vec2::new(500., 300.),
        ]))
        .unwrap()
    }

    #[test]
    fn centred_on_target() {
        let mut camera = Camera::new(200., 100.);
        camera.update(Vec2::new(250., 200.), &landscape());
        assert_eq!(camera.rect, Rect::new(150., 150., 200., 100.));
    }

    #[test]
    fn clamped_vertically() {
        let mut camera = Camera::new(200., 100.);
        camera.update(Vec2::new(250., 10.), &landscape());
        assert_eq!(camera.rect.top, 0.);

        camera.update(Vec2::new(250., 390.), &landscape());
        assert_eq!(camera.rect.bottom(), 400.);
    }

    #[test]
    fn wrapped_horizontally() {
        let mut camera = Camera::new(200., 100.);
        camera.update(Vec2::new(50., 200.), &landscape());
        assert_eq!(camera.rect.left, 450.);

        camera.update(Vec2::new(450., 200.), &landscape());
        assert_eq!(camera.rect.left, -150.);
    }

    #[test]
    fn screen_coordinates() {
        let mut camera = Camera::new(200., 100.);
        camera.update(Vec2::new(250., 200.), &landscape());
        assert_eq!(
            world_to_screen(Vec2::new(250., 200.), &camera, &landscape()),
            Vec2::new(100., 50.)
        );
    }

    #[test]
    fn screen_coordinates_across_seam() {
        let mut camera = Camera::new(200., 100.);
        camera.update(Vec2::new(20., 200.), &landscape());
        // camera spans 420..620, i.e. 420..500 then 0..120 of the next tile
        assert_eq!(
            world_to_screen(Vec2::new(10., 200.), &camera, &landscape()),
            Vec2::new(90., 50.)
        );
        assert_eq!(
            world_to_screen(Vec2::new(450., 200.), &camera, &landscape()),
            Vec2::new(30., 50.)
        );
    }

    #[test]
    fn resize_keeps_target_in_view() {
        let mut camera = Camera::new(200., 100.);
        camera.resize(300., 200., Vec2::new(20., 390.), &landscape());
        assert_eq!(camera.rect.width, 300.);
        assert_eq!(camera.rect.height, 200.);
        assert_eq!(camera.rect.top, 200.);
        assert_eq!(camera.rect.left, 370.);
    }

    proptest! {
        #[test]
        fn screen_x_in_range(
            x in -1e6f64..1e6,
            left in -1e6f64..1e6,
        ) {
            let landscape = landscape();
            let mut camera = Camera::new(200., 100.);
            camera.rect.left = left;
            let screen = world_to_screen(Vec2::new(x, 0.), &camera, &landscape);
            prop_assert!(screen.x >= 0. && screen.x < landscape.width());
        }

        #[test]
        fn camera_stays_in_band(x in -1e4f64..1e4, y in 0f64..400.) {
            let landscape = landscape();
            let mut camera = Camera::new(200., 100.);
            camera.update(Vec2::new(x, y), &landscape);
            prop_assert!(camera.rect.top >= 0.);
            prop_assert!(camera.rect.bottom() <= landscape.height());
        }
    }
}
