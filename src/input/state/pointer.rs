use crate::broadcast::RemoteEvent;
use crate::input::events::{PointerInput, to_surface_coords};
use crate::input::tool::Tool;
use log::debug;

use super::{DrawingState, InputState, ToolState};

impl InputState {
    /// Processes a pointer press (mouse down or touch start).
    ///
    /// # Behavior
    /// - Brush/Eraser: records the pre-edit state for undo and starts a stroke
    /// - Text: opens a text edit at the pointer
    /// - Hand: starts panning
    pub fn on_pointer_down(&mut self, input: &PointerInput) {
        let Some(client) = input.client_position() else {
            return;
        };

        match self.tool.tool {
            Tool::Hand => {
                self.state = DrawingState::Panning { last: client };
            }
            Tool::Text => {
                if let Some(point) = to_surface_coords(input, self.viewport.surface_rect()) {
                    self.open_text_edit(point);
                }
            }
            tool @ (Tool::Brush | Tool::Eraser) => {
                let Some(point) = to_surface_coords(input, self.viewport.surface_rect()) else {
                    return;
                };
                self.settle_pending_load();
                self.capture_history();
                if tool == Tool::Brush {
                    let color = self.tool.color.to_hex();
                    self.publish(RemoteEvent::point(point.x, point.y, color));
                }
                self.state = DrawingState::Drawing { tool, last: point };
            }
        }
    }

    /// Processes pointer motion (mouse move or touch move).
    ///
    /// # Behavior
    /// - Brush: strokes a segment from the last point, then checks edge growth
    /// - Eraser: clears a `size × size` square at the point, then checks edge growth
    /// - Hand: scrolls the viewport against the pointer delta
    pub fn on_pointer_move(&mut self, input: &PointerInput) {
        match self.state {
            DrawingState::Drawing { tool, last } => {
                let Some(point) = to_surface_coords(input, self.viewport.surface_rect()) else {
                    return;
                };
                let ToolState { brush_size, color, .. } = self.tool;
                if tool == Tool::Brush {
                    self.surface.stroke_segment(last, point, color, brush_size);
                    self.publish(RemoteEvent::point(point.x, point.y, color.to_hex()));
                } else {
                    self.surface.erase(point, brush_size);
                }
                self.state = DrawingState::Drawing { tool, last: point };
                self.needs_redraw = true;
                self.grow_for_point(point);
            }
            DrawingState::Panning { last } => {
                let Some(client) = input.client_position() else {
                    return;
                };
                self.viewport.scroll_by(-(client.x - last.x), -(client.y - last.y));
                self.state = DrawingState::Panning { last: client };
            }
            DrawingState::Idle | DrawingState::TextInput { .. } => {}
        }
    }

    /// Processes a pointer release (mouse up or touch end). Ends any stroke or pan;
    /// an open text edit stays open.
    pub fn on_pointer_up(&mut self) {
        match self.state {
            DrawingState::Drawing { tool, .. } => {
                if tool == Tool::Brush {
                    self.publish(RemoteEvent::StrokeEnd);
                }
                debug!("{} stroke finished", tool);
                self.state = DrawingState::Idle;
            }
            DrawingState::Panning { .. } => self.state = DrawingState::Idle,
            DrawingState::Idle | DrawingState::TextInput { .. } => {}
        }
    }

    /// The pointer left the board; same as releasing it.
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }
}
