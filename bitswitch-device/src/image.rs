/// Number of columns of the display.
pub const WIDTH: usize = 5;
/// Number of rows of the display.
pub const HEIGHT: usize = 5;
/// The brightest a pixel can be.
pub const MAX_BRIGHTNESS: u8 = 9;

/// A pixel coordinate outside of the 5×5 grid.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    pub x: usize,
    pub y: usize,
}

/// A frame of the 5×5 LED matrix: one brightness (0-9) per pixel, stored row by row.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Image {
    rows: [[u8; WIDTH]; HEIGHT],
}

impl Image {
    /// All pixels off.
    pub const BLANK: Image = Image::from_rows([[0; WIDTH]; HEIGHT]);

    /// The cross shown when a line could not be decoded.
    pub const NO: Image = Image::from_rows([
        [9, 0, 0, 0, 9],
        [0, 9, 0, 9, 0],
        [0, 0, 9, 0, 0],
        [0, 9, 0, 9, 0],
        [9, 0, 0, 0, 9],
    ]);

    pub const fn from_rows(rows: [[u8; WIDTH]; HEIGHT]) -> Self {
        Self { rows }
    }

    /// Sets the brightness of the pixel at column `x`, row `y` (brightness above 9 is capped).
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> Result<(), OutOfBounds> {
        let pixel = self
            .rows
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(OutOfBounds { x, y })?;
        *pixel = value.min(MAX_BRIGHTNESS);
        Ok(())
    }

    /// Returns the brightness of the pixel at column `x`, row `y`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Turns all pixels off.
    pub fn clear(&mut self) {
        *self = Self::BLANK;
    }

    pub fn rows(&self) -> &[[u8; WIDTH]; HEIGHT] {
        &self.rows
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}
