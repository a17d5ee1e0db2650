//! Integer pixel geometry shared by every layer of the runtime.
//!
//! All widget rectangles are in window coordinates; nothing in this module
//! knows about parents or transforms.

use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos<T> {
    pub x: T,
    pub y: T,
}

impl<T> Pos<T> {
    pub const fn new(x: T, y: T) -> Self {
        Pos { x, y }
    }
}

impl<T: Add<Output = T>> Add for Pos<T> {
    type Output = Pos<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Pos<T> {
    type Output = Pos<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }
}

impl Size<u32> {
    /// True when either side is zero; such a surface cannot be composed.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Copy> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Pos<T>, size: Size<T>) -> Self {
        Rect::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn origin(&self) -> Pos<T> {
        Pos::new(self.x, self.y)
    }

    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }
}

impl<T: Copy + PartialOrd + Add<Output = T>> Rect<T> {
    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, pos: Pos<T>) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    pub fn right(&self) -> T {
        self.x + self.width
    }

    pub fn bottom(&self) -> T {
        self.y + self.height
    }
}

impl Rect<i32> {
    /// Shrinks the rect by `dx`/`dy` on each side. Never produces a negative size.
    pub fn inset(&self, dx: i32, dy: i32) -> Rect<i32> {
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2 * dx).max(0),
            (self.height - 2 * dy).max(0),
        )
    }

    /// Converts a window position to coordinates relative to this rect's origin.
    pub fn to_local(&self, pos: Pos<i32>) -> Pos<i32> {
        pos - self.origin()
    }
}
