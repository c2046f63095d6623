/// Viewport-width thresholds mapped to column counts.
///
/// Each entry is `(min_width, columns)`, sorted by `min_width`. A width
/// resolves to the last entry whose `min_width` it reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    table: Vec<(i32, usize)>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            table: vec![(0, 1), (640, 2), (920, 3)],
        }
    }
}

impl Breakpoints {
    #[cfg(test)]
    pub fn new(mut table: Vec<(i32, usize)>) -> Self {
        table.sort_by_key(|(min_width, _)| *min_width);
        Self { table }
    }

    /// Column count for a viewport width in pixels. Never less than 1.
    pub fn columns_for_width(&self, width: i32) -> usize {
        self.table
            .iter()
            .take_while(|(min_width, _)| width >= *min_width)
            .last()
            .map(|(_, columns)| *columns)
            .unwrap_or(1)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let breakpoints = Breakpoints::default();
        for (width, expected) in [(0, 1), (639, 1), (640, 2), (919, 2), (920, 3), (10_000, 3)] {
            assert_eq!(
                breakpoints.columns_for_width(width),
                expected,
                "width {}",
                width
            );
        }
    }

    #[test]
    fn test_negative_width_is_single_column() {
        assert_eq!(Breakpoints::default().columns_for_width(-50), 1);
    }

    #[test]
    fn test_custom_table_is_sorted() {
        let breakpoints = Breakpoints::new(vec![(1200, 4), (0, 1), (600, 2)]);
        assert_eq!(breakpoints.columns_for_width(599), 1);
        assert_eq!(breakpoints.columns_for_width(600), 2);
        assert_eq!(breakpoints.columns_for_width(1199), 2);
        assert_eq!(breakpoints.columns_for_width(1200), 4);
    }

    #[test]
    fn test_table_without_zero_entry_falls_back_to_one() {
        let breakpoints = Breakpoints::new(vec![(500, 2)]);
        assert_eq!(breakpoints.columns_for_width(100), 1);
        assert_eq!(breakpoints.columns_for_width(500), 2);
    }
}
