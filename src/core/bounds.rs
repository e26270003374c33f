use crate::core::Vec2;

/// A bounding box with its first cell at 1,1 and a positive extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOneRoot {
    pub extent: Vec2,
}

impl BoundsOneRoot {
    pub fn new(width: i32, height: i32) -> BoundsOneRoot {
        assert!(
            width >= 1 && height >= 1,
            "board must be at least 1x1, got {}x{}",
            width,
            height
        );
        BoundsOneRoot {
            extent: Vec2 { x: width, y: height },
        }
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.x >= 1 && pos.x <= self.extent.x && pos.y >= 1 && pos.y <= self.extent.y
    }

    pub fn area(&self) -> i32 {
        self.extent.x * self.extent.y
    }

    /// Every position in row-major order, top row first.
    pub fn positions(self) -> impl Iterator<Item = Vec2> {
        let width = self.extent.x;
        let height = self.extent.y;
        (1..=height).flat_map(move |y| (1..=width).map(move |x| Vec2 { x, y }))
    }
}
