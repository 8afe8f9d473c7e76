use tracing::debug;

use super::encode::{encode_png, to_png_data_url};
use super::surface::{Point, Surface, STROKE_COLOR, STROKE_WIDTH, SURFACE_HEIGHT};
use crate::error::ApiError;

/// Screen rectangle of the element hosting the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: u32,
}

impl ContainerRect {
    pub fn new(left: f32, top: f32, width: u32) -> Self {
        Self { left, top, width }
    }

    fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Pointer input in client coordinates.
///
/// Touch events carry every active contact; only the first one draws.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    MouseLeave,
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
}

type StateListener = Box<dyn FnMut(bool) + Send>;

/// # Documentation
/// Freehand signature capture.
///
/// - Strokes are painted synchronously inside the input handler, one segment per move event.
/// - `has_content` becomes true on the first contact of any stroke and false on `clear`
///   or when a resize recreates the surface.
/// - Without a mounted surface every operation is a no-op and `snapshot` yields `None`.
pub struct SignaturePad {
    surface: Option<Surface>,
    origin: Point,
    last_point: Option<Point>,
    has_content: bool,
    on_state_change: Option<StateListener>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self {
            surface: None,
            origin: Point::new(0.0, 0.0),
            last_point: None,
            has_content: false,
            on_state_change: None,
        }
    }

    /// Registers the owner callback fired whenever `has_content` flips.
    pub fn with_state_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.on_state_change = Some(Box::new(listener));
        self
    }

    /// Creates the drawing surface sized to the container width.
    pub fn mount(&mut self, container: ContainerRect) {
        self.origin = container.origin();
        self.surface = Some(Surface::new(container.width, SURFACE_HEIGHT));
        self.last_point = None;
    }

    /// Recreates the surface for a new container size. Existing strokes are lost.
    pub fn resize(&mut self, container: ContainerRect) {
        if self.surface.is_none() {
            return;
        }
        if self.has_content {
            debug!(width = container.width, "signature surface resized, discarding strokes");
        }
        self.mount(container);
        self.set_has_content(false);
    }

    pub fn unmount(&mut self) {
        self.surface = None;
        self.last_point = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::MouseDown(p) => self.begin_stroke(p),
            PointerEvent::MouseMove(p) => self.extend_stroke(p),
            PointerEvent::TouchStart(points) => {
                if let Some(p) = points.first() {
                    self.begin_stroke(*p);
                }
            }
            PointerEvent::TouchMove(points) => {
                if let Some(p) = points.first() {
                    self.extend_stroke(*p);
                }
            }
            PointerEvent::MouseUp | PointerEvent::MouseLeave | PointerEvent::TouchEnd => {
                self.end_stroke()
            }
        }
    }

    /// Starts a stroke at a client-space point and paints its first dot.
    pub fn begin_stroke(&mut self, client: Point) {
        let at = client.relative_to(self.origin);
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.stamp(at, STROKE_WIDTH, STROKE_COLOR);
        self.last_point = Some(at);
        self.set_has_content(true);
    }

    /// Extends the active stroke to a client-space point. Ignored when no stroke is active.
    pub fn extend_stroke(&mut self, client: Point) {
        let Some(from) = self.last_point else {
            return;
        };
        let to = client.relative_to(self.origin);
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.stroke_segment(from, to, STROKE_WIDTH, STROKE_COLOR);
        self.last_point = Some(to);
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    pub fn clear(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        self.last_point = None;
        self.set_has_content(false);
    }

    /// Encoded PNG of the current drawing, or `None` when nothing was drawn.
    pub fn snapshot_png(&self) -> Result<Option<Vec<u8>>, ApiError> {
        match self.surface.as_ref() {
            Some(surface) if self.has_content && !surface.is_blank() => {
                encode_png(surface).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Drawing as a PNG data URL, or `None` when nothing was drawn.
    pub fn snapshot(&self) -> Result<Option<String>, ApiError> {
        Ok(self.snapshot_png()?.map(|bytes| to_png_data_url(&bytes)))
    }

    fn set_has_content(&mut self, value: bool) {
        if self.has_content == value {
            return;
        }
        self.has_content = value;
        if let Some(listener) = self.on_state_change.as_mut() {
            listener(value);
        }
    }
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SignaturePad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignaturePad")
            .field("mounted", &self.surface.is_some())
            .field("drawing", &self.last_point.is_some())
            .field("has_content", &self.has_content)
            .finish()
    }
}
