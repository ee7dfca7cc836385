//! Bitmap surface the snake grid is painted onto.

use crate::game::{GameConfig, GameState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(0xff, 0xff, 0xff);
pub const SNAKE: Rgb = Rgb(0x0f, 0x17, 0x2a);
pub const FOOD: Rgb = Rgb(0xef, 0x44, 0x44);

/// Square RGB pixel buffer, `cell_size` pixels per grid cell
#[derive(Debug, Clone)]
pub struct Canvas {
    size: usize,
    cell_size: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(grid_size: usize, cell_size: usize) -> Self {
        let size = grid_size * cell_size;
        Self {
            size,
            cell_size,
            pixels: vec![BACKGROUND; size * size],
        }
    }

    pub fn for_config(config: &GameConfig) -> Self {
        Self::new(config.grid_size, config.cell_size)
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.pixels[y * self.size + x])
    }

    /// Colour at the centre of a grid cell
    pub fn cell_color(&self, cell: Position) -> Option<Rgb> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let half = self.cell_size / 2;
        self.pixel(
            cell.x as usize * self.cell_size + half,
            cell.y as usize * self.cell_size + half,
        )
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
    }

    /// Repaint the whole surface from `state`: background, snake, then food on top
    pub fn paint(&mut self, state: &GameState) {
        self.clear();
        for &segment in &state.snake.body {
            self.fill_cell(segment, SNAKE);
        }
        self.fill_cell(state.food, FOOD);
    }

    /// Fill the square at `cell * cell_size`, clipped to the surface
    pub fn fill_cell(&mut self, cell: Position, color: Rgb) {
        if cell.x < 0 || cell.y < 0 {
            return;
        }
        let left = cell.x as usize * self.cell_size;
        let top = cell.y as usize * self.cell_size;
        if left >= self.size || top >= self.size {
            return;
        }
        let right = (left + self.cell_size).min(self.size);
        let bottom = (top + self.cell_size).min(self.size);

        for y in top..bottom {
            let row = y * self.size;
            self.pixels[row + left..row + right].fill(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};

    fn state(body: &[(i32, i32)], food: (i32, i32)) -> GameState {
        let body = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
        GameState::new(
            Snake::from_segments(body, Direction::Right).unwrap(),
            Position::new(food.0, food.1),
            15,
        )
    }

    #[test]
    fn test_default_canvas_size() {
        let canvas = Canvas::for_config(&GameConfig::default());
        assert_eq!(canvas.size(), 300);
        assert_eq!(canvas.pixel(299, 299), Some(BACKGROUND));
        assert_eq!(canvas.pixel(300, 0), None);
    }

    #[test]
    fn test_paint_cells_at_cell_size_offsets() {
        let mut canvas = Canvas::new(15, 20);
        canvas.paint(&state(&[(5, 5), (4, 5)], (10, 10)));

        // (5,5) covers pixels 100..120 on both axes
        assert_eq!(canvas.pixel(100, 100), Some(SNAKE));
        assert_eq!(canvas.pixel(119, 119), Some(SNAKE));
        assert_eq!(canvas.pixel(80, 100), Some(SNAKE));
        assert_eq!(canvas.pixel(120, 100), Some(BACKGROUND));
        assert_eq!(canvas.pixel(79, 100), Some(BACKGROUND));

        assert_eq!(canvas.pixel(200, 200), Some(FOOD));
        assert_eq!(canvas.cell_color(Position::new(10, 10)), Some(FOOD));
        assert_eq!(canvas.cell_color(Position::new(0, 0)), Some(BACKGROUND));
    }

    #[test]
    fn test_repaint_clears_previous_frame() {
        let mut canvas = Canvas::new(15, 20);
        canvas.paint(&state(&[(5, 5)], (10, 10)));
        canvas.paint(&state(&[(6, 5)], (1, 1)));

        assert_eq!(canvas.cell_color(Position::new(5, 5)), Some(BACKGROUND));
        assert_eq!(canvas.cell_color(Position::new(6, 5)), Some(SNAKE));
        assert_eq!(canvas.cell_color(Position::new(10, 10)), Some(BACKGROUND));
    }

    #[test]
    fn test_food_drawn_over_snake() {
        let mut canvas = Canvas::new(15, 20);
        canvas.paint(&state(&[(3, 3), (2, 3)], (2, 3)));
        assert_eq!(canvas.cell_color(Position::new(2, 3)), Some(FOOD));
    }

    #[test]
    fn test_out_of_grid_cells_are_clipped() {
        let mut canvas = Canvas::new(15, 20);
        canvas.fill_cell(Position::new(-1, 3), SNAKE);
        canvas.fill_cell(Position::new(15, 3), SNAKE);
        assert!((0..300).all(|x| canvas.pixel(x, 70) == Some(BACKGROUND)));
    }
}
