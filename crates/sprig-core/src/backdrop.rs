#![forbid(unsafe_code)]

//! Tiled, optionally scrolling, panel backgrounds.
//!
//! A [`Backdrop`] computes where copies of a background tile land inside its
//! panel; drawing them is delegated to any [`Drawable`]. Neighbouring tiles
//! overlap by half a pixel so that sub-pixel offsets never open seams.

use std::time::Duration;

use crate::drawable::Drawable;
use crate::geometry::{Bounded, Rect};
use crate::panel::Panel;
use crate::sprite::{Velocity, millis_f64};

/// Overlap between neighbouring tiles.
const TILE_OVERLAP: f64 = 0.5;

/// How a background tile fills its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundStyle {
    /// A single tile at the current offset.
    #[default]
    NoRepeat,
    /// One row of tiles across the panel.
    RepeatX,
    /// One column of tiles down the panel.
    RepeatY,
    /// Tiles covering the whole panel.
    Repeat,
    /// The tile stretched over the whole panel.
    Fill,
}

/// A panel with a tiled background that can scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    panel: Panel,
    tile_w: f64,
    tile_h: f64,
    offset: (f64, f64),
    style: BackgroundStyle,
    /// Scroll velocity in pixels per millisecond.
    vx: f64,
    vy: f64,
}

impl Backdrop {
    /// A backdrop over `panel` using tiles of `tile_w` × `tile_h`.
    pub const fn new(panel: Panel, tile_w: f64, tile_h: f64) -> Self {
        Self {
            panel,
            tile_w,
            tile_h,
            offset: (0.0, 0.0),
            style: BackgroundStyle::NoRepeat,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// A repeating backdrop that scrolls at `vx`, `vy` pixels per second.
    pub fn scrolling(panel: Panel, tile_w: f64, tile_h: f64, vx: f64, vy: f64) -> Self {
        let mut backdrop = Self::new(panel, tile_w, tile_h).with_style(BackgroundStyle::Repeat);
        backdrop.set_scroll_velocity(vx, vy);
        backdrop
    }

    /// Set the fill style.
    #[must_use]
    pub fn with_style(mut self, style: BackgroundStyle) -> Self {
        self.style = style;
        self
    }

    /// The panel being filled.
    pub const fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Mutable panel.
    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// The fill style.
    pub const fn style(&self) -> BackgroundStyle {
        self.style
    }

    /// Change the fill style.
    pub fn set_style(&mut self, style: BackgroundStyle) -> &mut Self {
        self.style = style;
        self
    }

    /// Current tile offset, always within one tile of the panel origin.
    pub const fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Move the tile origin, wrapping it to within one tile.
    pub fn set_offset(&mut self, x: f64, y: f64) -> &mut Self {
        self.offset = (wrap(x, self.tile_w), wrap(y, self.tile_h));
        self
    }

    /// Scroll velocity in pixels per second.
    pub fn scroll_velocity(&self) -> Velocity {
        Velocity {
            vx: self.vx * 1000.0,
            vy: self.vy * 1000.0,
        }
    }

    /// Set the scroll velocity in pixels per second.
    pub fn set_scroll_velocity(&mut self, vx: f64, vy: f64) -> &mut Self {
        self.vx = vx / 1000.0;
        self.vy = vy / 1000.0;
        self
    }

    /// Scroll the tile origin by `dt` worth of velocity.
    pub fn update(&mut self, dt: Duration) -> &mut Self {
        let ms = millis_f64(dt);
        let (x, y) = self.offset;
        self.set_offset(x + self.vx * ms, y + self.vy * ms)
    }

    /// Destination rectangles of every tile for the current style and offset.
    ///
    /// Tiles with a non-positive step produce no repeats.
    pub fn tiles(&self) -> Vec<Rect> {
        let area = self.panel.bounds();
        let (ox, oy) = self.offset;
        match self.style {
            BackgroundStyle::NoRepeat => {
                vec![Rect::new(area.x + ox, area.y + oy, self.tile_w, self.tile_h)]
            }
            BackgroundStyle::Fill => vec![area],
            BackgroundStyle::RepeatX => span(ox, self.tile_w, area.w)
                .map(|x| Rect::new(area.x + x, area.y + oy, self.tile_w, self.tile_h))
                .collect(),
            BackgroundStyle::RepeatY => span(oy, self.tile_h, area.h)
                .map(|y| Rect::new(area.x + ox, area.y + y, self.tile_w, self.tile_h))
                .collect(),
            BackgroundStyle::Repeat => {
                let xs: Vec<f64> = span(ox, self.tile_w, area.w).collect();
                span(oy, self.tile_h, area.h)
                    .flat_map(|y| {
                        xs.iter()
                            .map(move |&x| Rect::new(area.x + x, area.y + y, self.tile_w, self.tile_h))
                    })
                    .collect()
            }
        }
    }

    /// Draw `tile` at every tile position if the panel is visible.
    pub fn draw<T, D>(&self, target: &mut T, tile: &D)
    where
        T: ?Sized,
        D: Drawable<T>,
    {
        if !self.panel.visible {
            return;
        }
        for dest in self.tiles() {
            tile.draw(target, dest);
        }
    }
}

impl Bounded for Backdrop {
    fn bounds(&self) -> Rect {
        self.panel.bounds()
    }

    fn bounds_mut(&mut self) -> &mut Rect {
        self.panel.bounds_mut()
    }
}

fn wrap(value: f64, tile: f64) -> f64 {
    if tile > 0.0 { value % tile } else { value }
}

/// Tile positions along one axis, relative to the panel origin.
fn span(offset: f64, tile: f64, extent: f64) -> impl Iterator<Item = f64> {
    let step = tile - TILE_OVERLAP;
    let start = if offset > 0.0 { offset - tile } else { offset };
    std::iter::successors((step > 0.0).then_some(start), move |&pos| Some(pos + step))
        .take_while(move |&pos| pos < extent)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Backdrop, BackgroundStyle};
    use crate::drawable::FnDrawable;
    use crate::geometry::Rect;
    use crate::panel::Panel;

    fn backdrop(style: BackgroundStyle) -> Backdrop {
        Backdrop::new(Panel::from_size(100.0, 50.0), 40.0, 30.0).with_style(style)
    }

    #[test]
    fn no_repeat_draws_one_tile_at_offset() {
        let mut b = backdrop(BackgroundStyle::NoRepeat);
        b.set_offset(5.0, 7.0);
        assert_eq!(b.tiles(), vec![Rect::new(5.0, 7.0, 40.0, 30.0)]);
    }

    #[test]
    fn fill_covers_panel() {
        let b = Backdrop::new(Panel::new(Rect::new(3.0, 4.0, 100.0, 50.0)), 40.0, 30.0)
            .with_style(BackgroundStyle::Fill);
        assert_eq!(b.tiles(), vec![Rect::new(3.0, 4.0, 100.0, 50.0)]);
    }

    #[test]
    fn repeat_overlaps_by_half_pixel() {
        let b = backdrop(BackgroundStyle::Repeat);
        let tiles = b.tiles();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(tiles[1], Rect::new(39.5, 0.0, 40.0, 30.0));
        assert_eq!(tiles[2], Rect::new(79.0, 0.0, 40.0, 30.0));
        assert_eq!(tiles[3], Rect::new(0.0, 29.5, 40.0, 30.0));
    }

    #[test]
    fn positive_offset_starts_one_tile_early() {
        let mut b = backdrop(BackgroundStyle::RepeatX);
        b.set_offset(10.0, 0.0);
        let xs: Vec<f64> = b.tiles().iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![-30.0, 9.5, 49.0, 88.5]);
    }

    #[test]
    fn repeat_y_keeps_column_fixed() {
        let mut b = backdrop(BackgroundStyle::RepeatY);
        b.set_offset(12.0, -5.0);
        let tiles = b.tiles();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.x == 12.0));
        assert_eq!(tiles[0].y, -5.0);
        assert_eq!(tiles[1].y, 24.5);
    }

    #[test]
    fn offset_wraps_within_tile() {
        let mut b = backdrop(BackgroundStyle::Repeat);
        b.set_offset(95.0, -70.0);
        assert_eq!(b.offset(), (15.0, -10.0));
    }

    #[test]
    fn degenerate_tile_produces_no_repeats() {
        let b = Backdrop::new(Panel::from_size(100.0, 50.0), 0.5, 30.0)
            .with_style(BackgroundStyle::Repeat);
        assert!(b.tiles().is_empty());
    }

    #[test]
    fn scrolling_moves_offset() {
        let mut b = Backdrop::scrolling(Panel::from_size(100.0, 50.0), 40.0, 30.0, -20.0, 0.0);
        assert_eq!(b.style(), BackgroundStyle::Repeat);
        assert_eq!(b.scroll_velocity().vx, -20.0);
        b.update(Duration::from_millis(500));
        assert_eq!(b.offset(), (-10.0, 0.0));
        b.update(Duration::from_millis(2000));
        assert_eq!(b.offset(), (-10.0, 0.0));
    }

    #[test]
    fn draw_visits_every_tile_unless_hidden() {
        let mut b = backdrop(BackgroundStyle::Repeat);
        let tile = FnDrawable::new(40.0, 30.0, |calls: &mut Vec<Rect>, dest: Rect| calls.push(dest));
        let mut calls: Vec<Rect> = Vec::new();
        b.draw(&mut calls, &tile);
        assert_eq!(calls, b.tiles());

        b.panel_mut().visible = false;
        calls.clear();
        b.draw(&mut calls, &tile);
        assert!(calls.is_empty());
    }
}
