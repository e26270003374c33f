use crate::core::Vec2;
use crate::core::bounds::BoundsOneRoot;

#[derive(Clone, Debug)]
pub struct BoundedGrid<T> {
    bounds: BoundsOneRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new_with_size(width: i32, height: i32, default: T) -> Self
    where
        T: Clone,
    {
        let bounds = BoundsOneRoot::new(width, height);
        BoundedGrid::new(bounds, default)
    }

    pub fn new(bounds: BoundsOneRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area() as usize];
        BoundedGrid { bounds, cells }
    }

    pub fn size(&self) -> BoundsOneRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.bounds.contains(pos)
    }

    fn offset(&self, pos: &Vec2) -> usize {
        assert!(
            self.bounds.contains(pos),
            "position {} is outside the {}x{} grid",
            pos,
            self.bounds.extent.x,
            self.bounds.extent.y
        );
        ((pos.y - 1) * self.bounds.extent.x + (pos.x - 1)) as usize
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[self.offset(index)]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }
}
