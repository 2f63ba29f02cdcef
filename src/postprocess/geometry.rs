/// Box placement under "contain" fitting.
///
/// The image is scaled to fit inside the container with its aspect ratio
/// preserved and centered, leaving bars on one axis (the same letterbox the
/// inference side applies, run in the display direction). Boxes arrive as
/// center + size in source pixels and leave as left/top/width/height in
/// container pixels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Center + size box in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterBox {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Box in container pixels, ready for absolute positioning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale and offset of a natural-size image fitted into a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainFit {
    pub display_width: f64,
    pub display_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ContainFit {
    /// Returns `None` until both natural dimensions are known and positive.
    pub fn new(natural: Size, container: Size) -> Option<Self> {
        if !(natural.width > 0.0 && natural.height > 0.0) {
            return None;
        }

        let aspect_ratio = natural.width / natural.height;
        let mut display_width = container.width;
        let mut display_height = display_width / aspect_ratio;

        if display_height > container.height {
            display_height = container.height;
            display_width = display_height * aspect_ratio;
        }

        Some(Self {
            display_width,
            display_height,
            offset_x: (container.width - display_width) / 2.0,
            offset_y: (container.height - display_height) / 2.0,
            scale_x: display_width / natural.width,
            scale_y: display_height / natural.height,
        })
    }

    pub fn map(&self, b: &CenterBox) -> Placement {
        let left_natural = b.center_x - b.width / 2.0;
        let top_natural = b.center_y - b.height / 2.0;

        Placement {
            left: left_natural * self.scale_x + self.offset_x,
            top: top_natural * self.scale_y + self.offset_y,
            width: b.width * self.scale_x,
            height: b.height * self.scale_y,
        }
    }

    /// Inverse of [`ContainFit::map`]. `None` when the container collapsed an axis.
    pub fn unmap(&self, p: &Placement) -> Option<CenterBox> {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return None;
        }

        let width = p.width / self.scale_x;
        let height = p.height / self.scale_y;
        let left_natural = (p.left - self.offset_x) / self.scale_x;
        let top_natural = (p.top - self.offset_y) / self.scale_y;

        Some(CenterBox {
            center_x: left_natural + width / 2.0,
            center_y: top_natural + height / 2.0,
            width,
            height,
        })
    }
}

/// Map one box from source pixels into container pixels.
pub fn map_box(b: &CenterBox, natural: Size, container: Size) -> Option<Placement> {
    ContainFit::new(natural, container).map(|fit| fit.map(b))
}
