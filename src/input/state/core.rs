//! Drawing state machine and board session state.

use crate::broadcast::{RemoteEvent, RemoteReplay, StrokeChannel};
use crate::config::Config;
use crate::draw::{Color, FontDescriptor, RasterSurface, SurfaceError};
use crate::growth::{Growth, GrowthPolicy};
use crate::history::HistoryStore;
use crate::input::{events::ClientPoint, tool::Tool, viewport::Viewport};
use crate::util::{Point, Size};
use log::{debug, error, warn};

/// Smallest and largest brush size accepted from the toolbar.
const MIN_BRUSH_SIZE: f64 = 1.0;
const MAX_BRUSH_SIZE: f64 = 200.0;

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle, dragging a stroke, panning the viewport, or
/// editing text. State transitions occur based on pointer events and tool changes.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for user input
    Idle,
    /// Pointer held down with the brush or eraser
    Drawing {
        /// Which tool started this stroke
        tool: Tool,
        /// Last pointer position in surface coordinates
        last: Point,
    },
    /// Pointer held down with the hand tool
    Panning {
        /// Last pointer position in client coordinates
        last: ClientPoint,
    },
    /// An open text edit waiting to be committed or cancelled
    TextInput {
        /// Baseline origin of the text in surface coordinates
        position: Point,
        /// Text typed so far (untrimmed)
        content: String,
    },
}

/// Tool selection and parameters supplied by the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Active tool
    pub tool: Tool,
    /// Brush/eraser size in pixels; text size derives from it
    pub brush_size: f64,
    /// Brush and text color
    pub color: Color,
}

/// One drawing session: the board, its history, and everything the input
/// handlers need.
///
/// Replaces free-floating globals; the host owns one of these and forwards
/// pointer, toolbar and text-box events to it.
pub struct InputState {
    /// Current drawing mode state machine
    pub state: DrawingState,
    /// Current tool parameters
    pub tool: ToolState,
    /// Whether the board needs to be repainted by the host
    pub needs_redraw: bool,
    /// Font used for committed text
    pub font: FontDescriptor,
    /// Text pixel size as a multiple of the brush size
    pub text_size_factor: f64,
    pub(crate) surface: RasterSurface,
    pub(crate) history: HistoryStore,
    pub(crate) growth: GrowthPolicy,
    pub(crate) viewport: Box<dyn Viewport>,
    pub(crate) channel: Option<Box<dyn StrokeChannel>>,
    pub(crate) remote: RemoteReplay,
}

impl InputState {
    /// Creates a session with a fresh transparent board sized from `[canvas]`.
    pub fn new(config: &Config, viewport: Box<dyn Viewport>) -> Result<Self, SurfaceError> {
        let surface = RasterSurface::new(config.canvas.initial_width, config.canvas.initial_height)?;
        Ok(Self::with_surface(surface, config, viewport))
    }

    /// Creates a session around an existing surface.
    pub fn with_surface(
        surface: RasterSurface,
        config: &Config,
        mut viewport: Box<dyn Viewport>,
    ) -> Self {
        viewport.content_resized(surface.size());
        let drawing = &config.drawing;

        Self {
            state: DrawingState::Idle,
            tool: ToolState {
                tool: Tool::default(),
                brush_size: drawing.default_size,
                color: drawing.default_color.to_color(),
            },
            needs_redraw: true,
            font: FontDescriptor::new(
                drawing.font_family.clone(),
                drawing.font_weight.clone(),
                drawing.font_style.clone(),
            ),
            text_size_factor: drawing.text_size_factor,
            surface,
            history: HistoryStore::new(config.history.capacity),
            growth: GrowthPolicy::from_config(&config.canvas),
            viewport,
            channel: None,
            remote: RemoteReplay::new(config.broadcast.remote_line_width),
        }
    }

    /// Connects the board to a shared channel. Local brush strokes are published
    /// from now on and [`InputState::sync_remote`] replays incoming ones.
    pub fn attach_channel(&mut self, channel: Box<dyn StrokeChannel>) {
        debug!("Attached shared board as '{}'", channel.participant());
        self.channel = Some(channel);
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Mutable access for pixel read-back.
    pub fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }

    pub fn surface_size(&self) -> Size {
        self.surface.size()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn viewport(&self) -> &dyn Viewport {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> &mut dyn Viewport {
        self.viewport.as_mut()
    }

    /// Switches tools. Leaving the text tool discards an open text edit.
    pub fn select_tool(&mut self, tool: Tool) {
        if tool != Tool::Text && matches!(self.state, DrawingState::TextInput { .. }) {
            self.cancel_text();
        }
        if self.tool.tool != tool {
            debug!("Tool changed: {} -> {}", self.tool.tool, tool);
            self.tool.tool = tool;
        }
    }

    /// Sets the brush size, clamped to 1-200 px.
    pub fn set_brush_size(&mut self, size: f64) {
        let clamped = if size.is_nan() {
            MIN_BRUSH_SIZE
        } else {
            size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
        };
        if clamped != size {
            warn!(
                "Brush size {} out of range, using {} ({}-{})",
                size, clamped, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE
            );
        }
        self.tool.brush_size = clamped;
    }

    pub fn set_color(&mut self, color: Color) {
        self.tool.color = color;
    }

    /// Pixel size used for committed text.
    pub fn text_pixel_size(&self) -> f64 {
        self.tool.brush_size * self.text_size_factor
    }

    /// Applies an in-flight history load before the board is edited, so the edit
    /// lands on the logical state rather than on stale pixels.
    pub(crate) fn settle_pending_load(&mut self) {
        match self.history.finish_pending(&mut self.surface) {
            Ok(true) => self.needs_redraw = true,
            Ok(false) => {}
            Err(err) => error!("Failed to apply pending history load: {}", err),
        }
    }

    /// Records the pre-edit state for undo.
    pub(crate) fn capture_history(&mut self) {
        if let Err(err) = self.history.capture(&self.surface) {
            error!("Failed to capture history snapshot: {}", err);
        }
    }

    /// Proximity growth after a brush or eraser point, with viewport scroll
    /// compensation by the applied increment.
    pub(crate) fn grow_for_point(&mut self, point: Point) {
        if let Some(growth) = self.growth.for_point(point, self.surface.size()) {
            self.apply_growth(growth, true);
        }
    }

    /// Resizes the board and tells the viewport. A failed resize is logged and
    /// the board keeps its size; the edit that triggered it is clipped instead.
    pub(crate) fn apply_growth(&mut self, growth: Growth, compensate_scroll: bool) -> bool {
        match self.surface.resize(growth.size.width, growth.size.height) {
            Ok(()) => {
                debug!(
                    "Board grew to {}x{} (+{}, +{})",
                    growth.size.width, growth.size.height, growth.dx, growth.dy
                );
                self.viewport.content_resized(growth.size);
                if compensate_scroll {
                    self.viewport.scroll_by(growth.dx as f64, growth.dy as f64);
                }
                self.needs_redraw = true;
                true
            }
            Err(err) => {
                error!(
                    "Failed to grow board to {}x{}: {}",
                    growth.size.width, growth.size.height, err
                );
                false
            }
        }
    }

    /// Sends an event to the shared channel, if one is attached.
    pub(crate) fn publish(&mut self, event: RemoteEvent) {
        if let Some(channel) = self.channel.as_mut()
            && let Err(err) = channel.publish(event)
        {
            warn!("Failed to publish to shared board: {}", err);
        }
    }
}
