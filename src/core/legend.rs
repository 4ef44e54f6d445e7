use serde::{Deserialize, Serialize};

/// Column-major grid of legend entries: a colored swatch plus a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendGrid {
    pub origin_x: f64,
    pub origin_y: f64,
    pub rows_per_column: usize,
    pub column_width: f64,
    pub row_height: f64,
    pub swatch_size: f64,
    /// Label position relative to the swatch's top-left corner.
    pub text_offset_x: f64,
    pub text_offset_y: f64,
}

/// Placement of one legend entry in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntryLayout {
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub text_x: f64,
    pub text_y: f64,
}

impl LegendGrid {
    #[must_use]
    pub fn entry(&self, index: usize) -> LegendEntryLayout {
        let rows = self.rows_per_column.max(1);
        let column = (index / rows) as f64;
        let row = (index % rows) as f64;
        let swatch_x = self.origin_x + self.column_width * column;
        let swatch_y = self.origin_y + self.row_height * row;
        LegendEntryLayout {
            swatch_x,
            swatch_y,
            text_x: swatch_x + self.text_offset_x,
            text_y: swatch_y + self.text_offset_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_columns_before_moving_right() {
        let grid = LegendGrid {
            origin_x: 0.0,
            origin_y: 245.5,
            rows_per_column: 2,
            column_width: 155.0,
            row_height: 30.0,
            swatch_size: 20.0,
            text_offset_x: 30.0,
            text_offset_y: 6.0,
        };

        let third = grid.entry(2);
        assert_eq!(third.swatch_x, 155.0);
        assert_eq!(third.swatch_y, 245.5);
        assert_eq!(third.text_x, 185.0);
        assert_eq!(third.text_y, 251.5);

        let second = grid.entry(1);
        assert_eq!(second.swatch_x, 0.0);
        assert_eq!(second.swatch_y, 275.5);
    }
}
