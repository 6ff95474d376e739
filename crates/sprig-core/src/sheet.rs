#![forbid(unsafe_code)]

//! Sprite sheets, frame grids, and frame-timed animated sprites.
//!
//! A [`SpriteSheet`] wraps a renderer-owned image handle (any `Clone` type: a
//! texture id, an `Rc<Image>`, ...) together with its size. Regions cut from
//! the sheet draw through the target's [`Blit`] implementation.
//!
//! ```
//! use sprig_core::sheet::SpriteSheet;
//!
//! let sheet = SpriteSheet::new("hero.png", 96.0, 64.0);
//! let frames = sheet.frames(32.0, 32.0).build();
//! assert_eq!(frames.len(), 6);
//! ```

use std::time::Duration;

use crate::drawable::{Blit, Drawable};
use crate::geometry::{Bounded, Rect};
use crate::sprite::{Sprite, Uid, millis_f64};

/// An image with a known size that regions and frames are cut from.
#[derive(Debug, Clone)]
pub struct SpriteSheet<I> {
    image: I,
    w: f64,
    h: f64,
}

impl<I: Clone> SpriteSheet<I> {
    /// Wrap `image`, which is `w` × `h` in size.
    pub const fn new(image: I, w: f64, h: f64) -> Self {
        Self { image, w, h }
    }

    /// The whole sheet as one drawable image.
    pub fn image(&self) -> SheetImage<I> {
        self.region(0.0, 0.0, self.w, self.h)
    }

    /// A rectangular region of the sheet.
    pub fn region(&self, x: f64, y: f64, w: f64, h: f64) -> SheetImage<I> {
        SheetImage {
            image: self.image.clone(),
            region: Rect::new(x, y, w, h),
        }
    }

    /// Start describing a grid of equally sized animation frames.
    ///
    /// Without explicit rows and columns the grid covers as many whole frames
    /// as fit in the sheet.
    pub fn frames(&self, frame_w: f64, frame_h: f64) -> FrameGrid<'_, I> {
        FrameGrid {
            sheet: self,
            frame_w,
            frame_h,
            rows: None,
            cols: None,
            offset: (0.0, 0.0),
        }
    }
}

/// Builder for [`AnimationFrames`] laid out in a grid.
#[derive(Debug)]
pub struct FrameGrid<'a, I> {
    sheet: &'a SpriteSheet<I>,
    frame_w: f64,
    frame_h: f64,
    rows: Option<usize>,
    cols: Option<usize>,
    offset: (f64, f64),
}

impl<I: Clone> FrameGrid<'_, I> {
    /// Number of grid rows.
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Number of grid columns.
    #[must_use]
    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Position of the first frame in the sheet.
    #[must_use]
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = (x, y);
        self
    }

    /// Cut the frames, row by row.
    pub fn build(self) -> AnimationFrames<I> {
        let fit = |extent: f64, frame: f64| {
            if frame > 0.0 {
                (extent / frame).floor().max(0.0) as usize
            } else {
                0
            }
        };
        let cols = self
            .cols
            .unwrap_or_else(|| fit(self.sheet.w, self.frame_w));
        let rows = self
            .rows
            .unwrap_or_else(|| fit(self.sheet.h, self.frame_h));
        let (xoff, yoff) = self.offset;

        let mut frames = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                frames.push(Rect::new(
                    c as f64 * self.frame_w + xoff,
                    r as f64 * self.frame_h + yoff,
                    self.frame_w,
                    self.frame_h,
                ));
            }
        }
        AnimationFrames {
            image: self.sheet.image.clone(),
            frames,
            index: 0,
        }
    }
}

/// A single region of a sprite sheet.
#[derive(Debug, Clone)]
pub struct SheetImage<I> {
    image: I,
    region: Rect,
}

impl<I> SheetImage<I> {
    /// Region of the sheet, in sheet coordinates.
    pub const fn region(&self) -> Rect {
        self.region
    }
}

impl<I, B> Drawable<B> for SheetImage<I>
where
    B: Blit<I> + ?Sized,
{
    fn draw(&self, target: &mut B, dest: Rect) {
        target.blit(&self.image, self.region, dest);
    }

    fn width(&self) -> f64 {
        self.region.w
    }

    fn height(&self) -> f64 {
        self.region.h
    }
}

/// A cyclic sequence of frames cut from one image.
#[derive(Debug, Clone)]
pub struct AnimationFrames<I> {
    image: I,
    frames: Vec<Rect>,
    index: usize,
}

impl<I> AnimationFrames<I> {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the current frame.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Region of the current frame.
    pub fn current(&self) -> Option<Rect> {
        self.frames.get(self.index).copied()
    }

    /// Advance one frame, wrapping to the first.
    pub fn next_frame(&mut self) -> &mut Self {
        if !self.frames.is_empty() {
            self.index = (self.index + 1) % self.frames.len();
        }
        self
    }

    /// Step back one frame, wrapping to the last.
    pub fn prev_frame(&mut self) -> &mut Self {
        if !self.frames.is_empty() {
            self.index = self.index.checked_sub(1).unwrap_or(self.frames.len() - 1);
        }
        self
    }

    /// Jump to `frame`, clamped to the last frame.
    pub fn seek(&mut self, frame: usize) -> &mut Self {
        self.index = frame.min(self.frames.len().saturating_sub(1));
        self
    }
}

impl<I, B> Drawable<B> for AnimationFrames<I>
where
    B: Blit<I> + ?Sized,
{
    fn draw(&self, target: &mut B, dest: Rect) {
        if let Some(src) = self.current() {
            target.blit(&self.image, src, dest);
        }
    }

    fn width(&self) -> f64 {
        self.current().map_or(0.0, |frame| frame.w)
    }

    fn height(&self) -> f64 {
        self.current().map_or(0.0, |frame| frame.h)
    }
}

/// A sprite that flips through [`AnimationFrames`] at a fixed rate.
#[derive(Debug)]
pub struct AnimatedSprite<I> {
    sprite: Sprite,
    frames: AnimationFrames<I>,
    ms_per_frame: f64,
    elapsed_ms: f64,
}

impl<I> AnimatedSprite<I> {
    /// Create a sprite sized to the first frame, animating at `fps`.
    pub fn new(uid: Uid, frames: AnimationFrames<I>, fps: f64) -> Self {
        let (w, h) = frames.current().map_or((0.0, 0.0), |frame| (frame.w, frame.h));
        Self {
            sprite: Sprite::new(uid, w, h),
            frames,
            ms_per_frame: 1000.0 / fps,
            elapsed_ms: 0.0,
        }
    }

    /// The frames being animated.
    pub const fn frames(&self) -> &AnimationFrames<I> {
        &self.frames
    }

    /// Mutable frames, e.g. to seek.
    pub fn frames_mut(&mut self) -> &mut AnimationFrames<I> {
        &mut self.frames
    }

    /// Move the sprite and advance the animation if it is active.
    ///
    /// At most one frame is advanced per update. A delta of two frame periods
    /// or more restarts the frame timer instead of carrying the remainder.
    pub fn update(&mut self, dt: Duration) -> &mut Self {
        if !self.sprite.active {
            return self;
        }
        self.sprite.update(dt);
        self.elapsed_ms += millis_f64(dt);
        if self.elapsed_ms >= self.ms_per_frame {
            if self.elapsed_ms >= 2.0 * self.ms_per_frame {
                self.elapsed_ms = 0.0;
            } else {
                self.elapsed_ms -= self.ms_per_frame;
            }
            self.frames.next_frame();
        }
        self
    }

    /// Draw the current frame at the sprite's bounds if it is visible.
    pub fn draw<B>(&self, target: &mut B)
    where
        B: Blit<I> + ?Sized,
    {
        if self.sprite.visible {
            self.frames.draw(target, self.sprite.bounds());
        }
    }
}

impl<I> AsRef<Sprite> for AnimatedSprite<I> {
    fn as_ref(&self) -> &Sprite {
        &self.sprite
    }
}

impl<I> AsMut<Sprite> for AnimatedSprite<I> {
    fn as_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl<I> Bounded for AnimatedSprite<I> {
    fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    fn bounds_mut(&mut self) -> &mut Rect {
        self.sprite.bounds_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{AnimatedSprite, SpriteSheet};
    use crate::drawable::{Blit, Drawable};
    use crate::geometry::Rect;
    use crate::sprite::UidAllocator;

    #[derive(Default)]
    struct Canvas {
        blits: Vec<(&'static str, Rect, Rect)>,
    }

    impl Blit<&'static str> for Canvas {
        fn blit(&mut self, image: &&'static str, src: Rect, dest: Rect) {
            self.blits.push((*image, src, dest));
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn region_draws_through_blit() {
        let sheet = SpriteSheet::new("sheet", 100.0, 100.0);
        let region = sheet.region(10.0, 20.0, 30.0, 40.0);
        let mut canvas = Canvas::default();
        region.draw(&mut canvas, Rect::new(0.0, 0.0, 60.0, 80.0));
        assert_eq!(
            canvas.blits,
            vec![("sheet", Rect::new(10.0, 20.0, 30.0, 40.0), Rect::new(0.0, 0.0, 60.0, 80.0))]
        );
        assert_eq!(Drawable::<Canvas>::width(&region), 30.0);
        assert_eq!(sheet.image().region(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn grid_defaults_to_whole_frames() {
        let sheet = SpriteSheet::new("sheet", 100.0, 70.0);
        let mut frames = sheet.frames(32.0, 32.0).build();
        assert_eq!(frames.len(), 6);
        frames.seek(4);
        assert_eq!(frames.current(), Some(Rect::new(32.0, 32.0, 32.0, 32.0)));
    }

    #[test]
    fn grid_honours_rows_cols_and_offset() {
        let sheet = SpriteSheet::new("sheet", 512.0, 512.0);
        let mut frames = sheet.frames(16.0, 8.0).rows(2).cols(2).offset(4.0, 100.0).build();
        let regions: Vec<Rect> = (0..4)
            .map(|_| {
                let current = frames.current();
                frames.next_frame();
                current.unwrap_or_default()
            })
            .collect();
        assert_eq!(
            regions,
            vec![
                Rect::new(4.0, 100.0, 16.0, 8.0),
                Rect::new(20.0, 100.0, 16.0, 8.0),
                Rect::new(4.0, 108.0, 16.0, 8.0),
                Rect::new(20.0, 108.0, 16.0, 8.0),
            ]
        );
        assert_eq!(frames.index(), 0);
    }

    #[test]
    fn frame_cursor_wraps_and_clamps() {
        let sheet = SpriteSheet::new("sheet", 100.0, 100.0);
        let mut frames = sheet.frames(32.0, 32.0).rows(2).cols(3).build();
        frames.prev_frame();
        assert_eq!(frames.index(), 5);
        frames.next_frame();
        assert_eq!(frames.index(), 0);
        frames.seek(99);
        assert_eq!(frames.index(), 5);
    }

    #[test]
    fn empty_grid_is_inert() {
        let sheet = SpriteSheet::new("sheet", 10.0, 10.0);
        let mut frames = sheet.frames(32.0, 32.0).build();
        assert!(frames.is_empty());
        frames.next_frame().prev_frame().seek(3);
        assert_eq!(frames.index(), 0);
        assert_eq!(frames.current(), None);
        assert_eq!(Drawable::<Canvas>::width(&frames), 0.0);
    }

    #[test]
    fn animated_sprite_frame_timing() {
        let sheet = SpriteSheet::new("sheet", 100.0, 100.0);
        let frames = sheet.frames(32.0, 32.0).rows(2).cols(3).build();
        let mut ids = UidAllocator::new();
        let mut sprite = AnimatedSprite::new(ids.next_uid(), frames, 10.0);
        assert_eq!(sprite.as_ref().w(), 32.0);
        assert_eq!(sprite.frames().index(), 0);

        sprite.update(ms(100));
        assert_eq!(sprite.frames().index(), 1);
        sprite.update(ms(150));
        assert_eq!(sprite.frames().index(), 2);
        sprite.update(ms(150));
        assert_eq!(sprite.frames().index(), 3);
        sprite.update(ms(10));
        assert_eq!(sprite.frames().index(), 3);

        sprite.frames_mut().seek(5);
        assert_eq!(sprite.frames().index(), 5);
        sprite.update(ms(100));
        assert_eq!(sprite.frames().index(), 0);
    }

    #[test]
    fn inactive_animated_sprite_holds_frame() {
        let sheet = SpriteSheet::new("sheet", 64.0, 32.0);
        let frames = sheet.frames(32.0, 32.0).build();
        let mut ids = UidAllocator::new();
        let mut sprite = AnimatedSprite::new(ids.next_uid(), frames, 10.0);
        sprite.as_mut().active = false;
        sprite.update(ms(500));
        assert_eq!(sprite.frames().index(), 0);
    }

    #[test]
    fn animated_sprite_draws_current_frame() {
        let sheet = SpriteSheet::new("sheet", 64.0, 32.0);
        let frames = sheet.frames(32.0, 32.0).build();
        let mut ids = UidAllocator::new();
        let mut sprite = AnimatedSprite::new(ids.next_uid(), frames, 10.0);
        sprite.as_mut().move_to(5.0, 5.0);
        sprite.frames_mut().next_frame();

        let mut canvas = Canvas::default();
        sprite.draw(&mut canvas);
        sprite.as_mut().visible = false;
        sprite.draw(&mut canvas);
        assert_eq!(
            canvas.blits,
            vec![("sheet", Rect::new(32.0, 0.0, 32.0, 32.0), Rect::new(5.0, 5.0, 32.0, 32.0))]
        );
    }
}
