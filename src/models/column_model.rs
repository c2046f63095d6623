#[derive(Debug, Clone, PartialEq)]
pub struct ColumnItem {
    pub image_id: u32,
    pub url: String,
    pub alt: String,
    pub intrinsic_width: i32,
    pub intrinsic_height: i32,
    /// Height over width; the box height is `column width * aspect_ratio`
    pub aspect_ratio: f32,
}

impl ColumnItem {
    /// The same ratio expressed as a CSS-style bottom padding percentage.
    #[cfg(test)]
    pub fn padding_percent(&self) -> f32 {
        self.aspect_ratio * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnModel {
    pub column_index: usize,
    pub items: Vec<ColumnItem>,
}

impl ColumnModel {
    pub fn new(column_index: usize, items: Vec<ColumnItem>) -> Self {
        Self {
            column_index,
            items,
        }
    }

    #[cfg(test)]
    pub fn image_ids(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.image_id).collect()
    }
}
