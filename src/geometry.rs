use serde::{Deserialize, Serialize};

/// Tile size measured in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions reach `min`.
    pub fn fits_within_floor(&self, min: Size) -> bool {
        self.width >= min.width && self.height >= min.height
    }
}

/// Rectangle expressed in layout units (the presentation's coordinate space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Frame {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_check_requires_both_dimensions() {
        let min = Size::new(2, 2);
        assert!(Size::new(2, 2).fits_within_floor(min));
        assert!(Size::new(4, 3).fits_within_floor(min));
        assert!(!Size::new(1, 4).fits_within_floor(min));
        assert!(!Size::new(4, 1).fits_within_floor(min));
    }

    #[test]
    fn frame_edges() {
        let frame = Frame::new(200, 100, 400, 200);
        assert_eq!(frame.right(), 600);
        assert_eq!(frame.bottom(), 300);
    }
}
