//! A surface that records draw calls instead of rasterizing them.

use resvg::tiny_skia::Transform;

use super::{Surface, TransformStack};
use crate::asset::AssetBitmap;
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::path::Path;
use crate::scene::{DropShadow, Paint};

/// One recorded draw call. Geometry is already in device space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        path: Path,
        paint: Paint,
        opacity: f32,
        shadow: Option<DropShadow>,
    },
    Stroke {
        path: Path,
        paint: Paint,
        opacity: f32,
        width: f32,
    },
    Image {
        /// Destination corners: top-left, top-right, bottom-right, bottom-left
        /// of the untransformed rectangle.
        corners: [Point; 4],
        opacity: f32,
        source_size: SurfaceSize,
    },
}

impl DrawCommand {
    /// The device-space path of a fill or stroke.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Records every draw call with the transform in effect at the time.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    transforms: TransformStack,
    max_depth: usize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            transforms: TransformStack::default(),
            max_depth: 0,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last clear.
    pub fn visible(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn transform(&self) -> Transform {
        self.transforms.current()
    }

    /// Saves still open.
    pub fn depth(&self) -> usize {
        self.transforms.depth()
    }

    /// Deepest the save stack has been.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn to_device(&self, p: Point) -> Point {
        let ts = self.transforms.current();
        Point::new(
            ts.sx * p.x + ts.kx * p.y + ts.tx,
            ts.ky * p.x + ts.sy * p.y + ts.ty,
        )
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.transforms.save();
        self.max_depth = self.max_depth.max(self.transforms.depth());
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transforms.translate(dx, dy);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.scale(sx, sy);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint, opacity: f32, shadow: Option<&DropShadow>) {
        self.commands.push(DrawCommand::Fill {
            path: path.transformed(self.transforms.current()),
            paint: paint.clone(),
            opacity,
            shadow: shadow.copied(),
        });
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, opacity: f32, width: f32) {
        self.commands.push(DrawCommand::Stroke {
            path: path.transformed(self.transforms.current()),
            paint: paint.clone(),
            opacity,
            width,
        });
    }

    fn draw_image(&mut self, image: &AssetBitmap, dest: Rect, opacity: f32) {
        let corners = [
            Point::new(dest.x, dest.y),
            Point::new(dest.right(), dest.y),
            Point::new(dest.right(), dest.bottom()),
            Point::new(dest.x, dest.bottom()),
        ]
        .map(|p| self.to_device(p));
        self.commands.push(DrawCommand::Image {
            corners,
            opacity,
            source_size: SurfaceSize::new(image.width(), image.height()),
        });
    }
}
