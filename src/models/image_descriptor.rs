use crate::placeholder::PlaceholderSpec;

/// One of the fixed placeholder sizes a generated image can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Tall,
    Medium,
    Small,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Tall, ImageSize::Medium, ImageSize::Small];

    pub fn dimensions(self) -> (i32, i32) {
        match self {
            Self::Tall => (400, 600),
            Self::Medium => (400, 300),
            Self::Small => (400, 200),
        }
    }

    #[cfg(test)]
    pub fn from_dimensions(width: i32, height: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.dimensions() == (width, height))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub id: u32,
    pub url: String,
    pub width: i32,
    pub height: i32,
    pub alt: String,
}

impl ImageDescriptor {
    /// Create a descriptor for a generated placeholder of the given size
    pub fn placeholder(id: u32, size: ImageSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            id,
            url: PlaceholderSpec::new(width as u32, height as u32).url(),
            width,
            height,
            alt: format!("Image {}", id),
        }
    }

    /// Height over width, or `None` when either side is not positive.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width <= 0 || self.height <= 0 {
            None
        } else {
            Some(self.height as f32 / self.width as f32)
        }
    }

    #[cfg(test)]
    pub fn size(&self) -> Option<ImageSize> {
        ImageSize::from_dimensions(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_descriptor_fields() {
        let image = ImageDescriptor::placeholder(7, ImageSize::Tall);
        assert_eq!(image.id, 7);
        assert_eq!((image.width, image.height), (400, 600));
        assert_eq!(image.url, "/placeholder.svg?width=400&height=600");
        assert_eq!(image.alt, "Image 7");
        assert_eq!(image.size(), Some(ImageSize::Tall));
    }

    #[test]
    fn test_aspect_ratio() {
        let image = ImageDescriptor::placeholder(0, ImageSize::Small);
        assert!((image.aspect_ratio().unwrap() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_aspect_ratio_rejects_degenerate_sizes() {
        let mut image = ImageDescriptor::placeholder(0, ImageSize::Medium);
        image.width = 0;
        assert_eq!(image.aspect_ratio(), None);
        image.width = -400;
        assert_eq!(image.aspect_ratio(), None);
        image.width = 400;
        image.height = 0;
        assert_eq!(image.aspect_ratio(), None);
    }

    #[test]
    fn test_size_lookup_for_unknown_dimensions() {
        assert_eq!(ImageSize::from_dimensions(400, 300), Some(ImageSize::Medium));
        assert_eq!(ImageSize::from_dimensions(300, 400), None);
    }
}
