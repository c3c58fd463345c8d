//! Indexed-color sprite sheets and the per-pixel masks derived from them.
//!
//! Every sheet is a palette-indexed bitmap cut into equally sized tiles. The
//! palette value stored at bitmap coordinate `(0, 0)` is the background key:
//! pixels holding that value are transparent for drawing and collision.

use std::f32::consts::TAU;

use face_invaders_core::{Color, PixelRect, Skin, SpriteKey, HIGHLIGHT_COLOR};

/// Number of heading frames in one row of the ship sheet.
pub const SHIP_FRAMES: u32 = 24;

const SHIP_TILE: (u32, u32) = (20, 20);
const LARGE_TILE: (u32, u32) = (40, 48);
const MEDIUM_TILE: (u32, u32) = (30, 36);
const SMALL_TILE: (u32, u32) = (20, 24);

const BACKGROUND: u8 = 0;

/// Rectangular grid of palette indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap with every pixel set to `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    /// Creates a bitmap from row-major pixels, or `None` when the length is wrong.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Palette index stored at the pixel; out-of-range reads yield the background key.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return self.background();
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Stores a palette index; writes outside the bitmap are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = value;
        }
    }

    /// Palette index treated as transparent.
    #[must_use]
    pub fn background(&self) -> u8 {
        self.pixels.first().copied().unwrap_or(BACKGROUND)
    }
}

/// Bitmap cut into fixed-size tiles, with the palette used to draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSheet {
    bitmap: Bitmap,
    tile_width: u32,
    tile_height: u32,
    palette: Vec<Color>,
}

impl SpriteSheet {
    /// Creates a sheet; tiles that do not fit the bitmap are simply absent.
    #[must_use]
    pub fn new(bitmap: Bitmap, tile_width: u32, tile_height: u32, palette: Vec<Color>) -> Self {
        Self {
            bitmap,
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
            palette,
        }
    }

    /// Underlying bitmap.
    #[must_use]
    pub const fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Width of one tile in pixels.
    #[must_use]
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Height of one tile in pixels.
    #[must_use]
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Palette entries indexed by bitmap values.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Number of tiles in one row of the sheet.
    #[must_use]
    pub const fn tiles_per_row(&self) -> u32 {
        let columns = self.bitmap.width / self.tile_width;
        if columns == 0 {
            1
        } else {
            columns
        }
    }

    /// Bitmap coordinate of the top-left corner of a tile.
    #[must_use]
    pub const fn tile_origin(&self, tile: u32) -> (u32, u32) {
        let per_row = self.tiles_per_row();
        (
            (tile % per_row) * self.tile_width,
            (tile / per_row) * self.tile_height,
        )
    }

    /// Palette color of a bitmap value, if the palette defines it.
    #[must_use]
    pub fn color(&self, index: u8) -> Option<Color> {
        self.palette.get(usize::from(index)).copied()
    }
}

/// Sprite sheets for every [`SpriteKey`], owned by the world.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteAtlas {
    ship: SpriteSheet,
    large: SpriteSheet,
    medium: SpriteSheet,
    small: SpriteSheet,
}

impl SpriteAtlas {
    /// Assembles an atlas from explicit sheets.
    #[must_use]
    pub fn new(
        ship: SpriteSheet,
        large: SpriteSheet,
        medium: SpriteSheet,
        small: SpriteSheet,
    ) -> Self {
        Self {
            ship,
            large,
            medium,
            small,
        }
    }

    /// Draws the built-in sheets for the requested skin.
    #[must_use]
    pub fn for_skin(skin: Skin) -> Self {
        let painter: Painter = match skin {
            Skin::FaceInvaders => paint_face,
            Skin::Asteroids => paint_rock,
        };
        let palette = match skin {
            Skin::FaceInvaders => vec![
                Color::from_hex(0x000000),
                Color::from_hex(0xF4C542),
                Color::from_hex(0x6B3E00),
                Color::from_hex(0xFFFFFF),
            ],
            Skin::Asteroids => vec![
                Color::from_hex(0x000000),
                Color::from_hex(0x9A9A9A),
                Color::from_hex(0x5A5A5A),
            ],
        };

        Self::new(
            ship_sheet(),
            body_sheet(LARGE_TILE, palette.clone(), painter),
            body_sheet(MEDIUM_TILE, palette.clone(), painter),
            body_sheet(SMALL_TILE, palette, painter),
        )
    }

    /// Sheet registered for the key.
    #[must_use]
    pub const fn sheet(&self, key: SpriteKey) -> &SpriteSheet {
        match key {
            SpriteKey::Ship => &self.ship,
            SpriteKey::BodyLarge => &self.large,
            SpriteKey::BodyMedium => &self.medium,
            SpriteKey::BodySmall => &self.small,
        }
    }
}

/// Placed grid of tiles drawn from one sprite sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    key: SpriteKey,
    columns: u32,
    rows: u32,
    tiles: Vec<u32>,
    x: i32,
    y: i32,
    flip_x: bool,
    flip_y: bool,
}

impl Sprite {
    /// Creates a single-tile sprite showing tile 0 at the origin.
    #[must_use]
    pub fn new(key: SpriteKey) -> Self {
        Self::grid(key, 1, 1)
    }

    /// Creates a sprite spanning `columns × rows` tiles, all showing tile 0.
    #[must_use]
    pub fn grid(key: SpriteKey, columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            key,
            columns,
            rows,
            tiles: vec![0; (columns * rows) as usize],
            x: 0,
            y: 0,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Sheet the sprite draws from.
    #[must_use]
    pub const fn key(&self) -> SpriteKey {
        self.key
    }

    /// Left edge in display pixels.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge in display pixels.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Whether the sprite is mirrored horizontally.
    #[must_use]
    pub const fn flip_x(&self) -> bool {
        self.flip_x
    }

    /// Sheet tile shown in a grid cell.
    #[must_use]
    pub fn tile_at(&self, column: u32, row: u32) -> u32 {
        self.tiles
            .get((row * self.columns + column) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Shows `tile` in every grid cell.
    pub fn set_tile(&mut self, tile: u32) {
        self.tiles.fill(tile);
    }

    /// Moves the top-left corner.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Sets the mirroring flags.
    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
    }

    /// Display rectangle covered by the whole tile grid.
    #[must_use]
    pub fn bounds(&self, sheet: &SpriteSheet) -> PixelRect {
        PixelRect::from_origin(
            self.x,
            self.y,
            (self.columns * sheet.tile_width()) as i32,
            (self.rows * sheet.tile_height()) as i32,
        )
    }

    /// Palette index shown at a display pixel, honoring flips.
    ///
    /// Returns `None` for pixels outside the sprite.
    #[must_use]
    pub fn sample(&self, sheet: &SpriteSheet, x: i32, y: i32) -> Option<u8> {
        if !self.bounds(sheet).contains(x, y) {
            return None;
        }
        let tile_width = sheet.tile_width() as i32;
        let tile_height = sheet.tile_height() as i32;
        let column = (x - self.x) / tile_width;
        let row = (y - self.y) / tile_height;
        let mut local_x = (x - self.x) % tile_width;
        let mut local_y = (y - self.y) % tile_height;
        if self.flip_x {
            local_x = tile_width - 1 - local_x;
        }
        if self.flip_y {
            local_y = tile_height - 1 - local_y;
        }

        let (origin_x, origin_y) = sheet.tile_origin(self.tile_at(column as u32, row as u32));
        Some(
            sheet
                .bitmap()
                .get(origin_x + local_x as u32, origin_y + local_y as u32),
        )
    }

    /// Appends every opaque display pixel that lies inside `region`.
    pub fn opaque_pixels(&self, sheet: &SpriteSheet, region: PixelRect, out: &mut Vec<(i32, i32)>) {
        let background = sheet.bitmap().background();
        let tile_width = sheet.tile_width() as i32;
        let tile_height = sheet.tile_height() as i32;

        for row in 0..self.rows {
            for column in 0..self.columns {
                let tile = PixelRect::from_origin(
                    self.x + column as i32 * tile_width,
                    self.y + row as i32 * tile_height,
                    tile_width,
                    tile_height,
                );
                let Some(visible) = tile.overlap(&region) else {
                    continue;
                };

                for y in visible.y_min..visible.y_max {
                    for x in visible.x_min..visible.x_max {
                        if self.sample(sheet, x, y) != Some(background) {
                            out.push((x, y));
                        }
                    }
                }
            }
        }
    }
}

fn ship_sheet() -> SpriteSheet {
    let (tile_width, tile_height) = SHIP_TILE;
    let mut bitmap = Bitmap::new(tile_width * SHIP_FRAMES, tile_height * 2, BACKGROUND);

    let hull = [(0.0, -8.0), (-6.0, 6.0), (6.0, 6.0)];
    let flame = [(-3.0, 7.0), (3.0, 7.0), (0.0, 10.0)];

    for frame in 0..SHIP_FRAMES {
        let heading = frame as f32 * TAU / SHIP_FRAMES as f32;
        let hull = rotate(hull, heading);
        let flame = rotate(flame, heading);

        for y in 0..tile_height {
            for x in 0..tile_width {
                let point = (
                    x as f32 + 0.5 - tile_width as f32 / 2.0,
                    y as f32 + 0.5 - tile_height as f32 / 2.0,
                );
                let column = frame * tile_width + x;
                if inside_triangle(point, hull) {
                    bitmap.set(column, y, 1);
                    bitmap.set(column, y + tile_height, 1);
                } else if inside_triangle(point, flame) {
                    bitmap.set(column, y + tile_height, 2);
                }
            }
        }
    }

    SpriteSheet::new(
        bitmap,
        tile_width,
        tile_height,
        vec![
            Color::from_hex(0x000000),
            HIGHLIGHT_COLOR,
            Color::from_hex(0xFF8C1A),
        ],
    )
}

type Painter = fn(f32, f32) -> u8;

fn body_sheet((width, height): (u32, u32), palette: Vec<Color>, painter: Painter) -> SpriteSheet {
    let mut bitmap = Bitmap::new(width, height, BACKGROUND);
    for y in 0..height {
        for x in 0..width {
            // normalized to -1..1 over the tile
            let nx = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
            let ny = (y as f32 + 0.5) / height as f32 * 2.0 - 1.0;
            bitmap.set(x, y, painter(nx, ny));
        }
    }
    SpriteSheet::new(bitmap, width, height, palette)
}

fn paint_face(x: f32, y: f32) -> u8 {
    let radius = x * x + y * y;
    if radius > 0.9 {
        return BACKGROUND;
    }
    let eye = |cx: f32| ((x - cx) / 0.14).powi(2) + ((y + 0.3) / 0.2).powi(2) <= 1.0;
    if eye(-0.35) || eye(0.35) {
        return BACKGROUND;
    }
    let mouth = x.abs() < 0.5 && (y - 0.25 - 0.6 * x * x).abs() < 0.1;
    if mouth {
        return 2;
    }
    if x < -0.3 && y < -0.55 && radius > 0.55 {
        return 3;
    }
    1
}

fn paint_rock(x: f32, y: f32) -> u8 {
    let angle = y.atan2(x);
    let edge = 0.92 - 0.16 * (3.0 * angle).sin().abs() - 0.06 * (7.0 * angle).cos();
    if (x * x + y * y).sqrt() > edge {
        return BACKGROUND;
    }
    let crater = |cx: f32, cy: f32, r: f32| (x - cx).powi(2) + (y - cy).powi(2) <= r * r;
    if crater(-0.3, -0.25, 0.18) || crater(0.3, 0.3, 0.14) {
        return 2;
    }
    1
}

fn rotate(points: [(f32, f32); 3], angle: f32) -> [(f32, f32); 3] {
    let (sin, cos) = angle.sin_cos();
    points.map(|(x, y)| (x * cos - y * sin, x * sin + y * cos))
}

fn inside_triangle(point: (f32, f32), [a, b, c]: [(f32, f32); 3]) -> bool {
    let cross = |p: (f32, f32), q: (f32, f32), r: (f32, f32)| {
        (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
    };
    let d1 = cross(a, b, point);
    let d2 = cross(b, c, point);
    let d3 = cross(c, a, point);
    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped_sheet() -> SpriteSheet {
        // 4×2 tile, opaque only in column 1
        let pixels = vec![0, 1, 0, 0, 0, 1, 0, 0];
        let bitmap = Bitmap::from_pixels(4, 2, pixels).expect("pixel count");
        SpriteSheet::new(bitmap, 4, 2, vec![Color::from_hex(0), Color::from_hex(0xffffff)])
    }

    #[test]
    fn background_key_comes_from_the_first_pixel() {
        let bitmap = Bitmap::from_pixels(2, 1, vec![7, 3]).expect("pixel count");
        assert_eq!(bitmap.background(), 7);
        assert_eq!(Bitmap::from_pixels(2, 2, vec![0; 3]), None);
    }

    #[test]
    fn opaque_pixels_follow_horizontal_flips() {
        let sheet = striped_sheet();
        let mut sprite = Sprite::new(SpriteKey::BodySmall);
        sprite.move_to(10, 20);

        let mut pixels = Vec::new();
        sprite.opaque_pixels(&sheet, sprite.bounds(&sheet), &mut pixels);
        assert_eq!(pixels, vec![(11, 20), (11, 21)]);

        sprite.set_flip(true, false);
        pixels.clear();
        sprite.opaque_pixels(&sheet, sprite.bounds(&sheet), &mut pixels);
        assert_eq!(pixels, vec![(12, 20), (12, 21)]);
    }

    #[test]
    fn opaque_pixels_are_clipped_to_the_region() {
        let sheet = striped_sheet();
        let sprite = Sprite::new(SpriteKey::BodySmall);
        let mut pixels = Vec::new();
        sprite.opaque_pixels(&sheet, PixelRect::new(0, 4, 1, 2), &mut pixels);
        assert_eq!(pixels, vec![(1, 1)]);
    }

    #[test]
    fn built_in_sheets_keep_a_transparent_corner() {
        for skin in [Skin::FaceInvaders, Skin::Asteroids] {
            let atlas = SpriteAtlas::for_skin(skin);
            for key in [
                SpriteKey::Ship,
                SpriteKey::BodyLarge,
                SpriteKey::BodyMedium,
                SpriteKey::BodySmall,
            ] {
                let sheet = atlas.sheet(key);
                assert_eq!(sheet.bitmap().background(), BACKGROUND);
                let mut pixels = Vec::new();
                let sprite = Sprite::new(key);
                sprite.opaque_pixels(sheet, sprite.bounds(sheet), &mut pixels);
                assert!(!pixels.is_empty(), "{key:?} has no opaque pixels");
            }
        }
    }

    #[test]
    fn ship_sheet_has_a_thrust_row_per_heading() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let sheet = atlas.sheet(SpriteKey::Ship);
        assert_eq!(sheet.tiles_per_row(), SHIP_FRAMES);
        assert_eq!(sheet.tile_origin(SHIP_FRAMES + 3), (60, 20));
    }
}
