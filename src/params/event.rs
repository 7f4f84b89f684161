use super::{Query, Size};
use crate::Result;

/// Event image parameters (`/control/event.jpg`). Only the image size is supported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventParams {
    size: Size,
}

impl EventParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: i32, height: i32) -> Result<Self> {
        self.size = Size::new(width, height)?;
        Ok(self)
    }

    pub fn url_params(&self) -> String {
        let mut query = Query::new();
        query.size("size", self.size);
        query.finish()
    }
}
