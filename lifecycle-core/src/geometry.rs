use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Axis-aligned rectangle in screen pixels (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Parses `left,top,width,height`
impl FromStr for Rect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_floats(s)?.as_slice() {
            [l, t, w, h] => Ok(Rect::new(*l, *t, *w, *h)),
            other => Err(format!(
                "expected left,top,width,height but got {} value(s)",
                other.len()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Parses `width,height`
impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_floats(s)?.as_slice() {
            [w, h] => Ok(Size::new(*w, *h)),
            other => Err(format!(
                "expected width,height but got {} value(s)",
                other.len()
            )),
        }
    }
}

fn parse_floats(s: &str) -> Result<Vec<f32>, String> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid number '{}': {}", part.trim(), e))
        })
        .collect()
}
