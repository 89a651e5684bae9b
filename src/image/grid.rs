use crate::error::{Error, Result};
use crate::Float;

/**
 * Row-major `height x width` grid of reals. Flat offsets used by the solver map to
 * `(row, col)` through `position` and back through `offset`.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    data: Vec<Float>
}

impl Grid {

    pub fn zeros(height: usize, width: usize) -> Grid {
        Grid::from_element(height, width, 0.0)
    }

    pub fn from_element(height: usize, width: usize, value: Float) -> Grid {
        Grid { height, width, data: vec![value; height*width] }
    }

    pub fn from_vec(height: usize, width: usize, data: Vec<Float>) -> Result<Grid> {
        match data.len() == height*width {
            true => Ok(Grid { height, width, data }),
            false => Err(Error::invalid_argument(format!("grid buffer holds {} values, expected {}x{}", data.len(), height, width)))
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row*self.width + col
    }

    pub fn position(&self, idx: usize) -> (usize, usize) {
        debug_assert!(idx < self.len());
        (idx / self.width, idx % self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Float {
        self.data[self.offset(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Float) -> () {
        let idx = self.offset(row, col);
        self.data[idx] = value;
    }

    pub fn fill(&mut self, value: Float) -> () {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    pub(crate) fn copy_from_slice(&mut self, values: &[Float]) -> () {
        self.data.copy_from_slice(values);
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Float] {
        &mut self.data
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Float] {
        &mut self.data[row*self.width..(row+1)*self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_position_are_inverse() {
        let grid = Grid::zeros(3, 5);
        for idx in 0..grid.len() {
            let (r, c) = grid.position(idx);
            assert!(r < 3 && c < 5);
            assert_eq!(grid.offset(r, c), idx);
        }
        assert_eq!(grid.position(7), (1, 2));
    }

    #[test]
    fn buffer_length_is_checked() {
        assert!(Grid::from_vec(2, 3, vec![0.0; 5]).is_err());
        assert_eq!(Grid::from_vec(2, 3, vec![1.0; 6]).unwrap(), Grid::from_element(2, 3, 1.0));
    }
}
