use super::{Envelope, RemoteEvent};
use crate::draw::{BLACK, RasterSurface};
use crate::util::{self, Point};
use log::{debug, warn};
use std::collections::HashMap;

/// Replays other participants' strokes onto the local surface.
///
/// Keeps one pen position per participant so interleaved strokes from several
/// people don't get joined together. Replayed strokes bypass history and never
/// grow the surface; points past the edge are clipped.
#[derive(Debug)]
pub struct RemoteReplay {
    line_width: f64,
    pens: HashMap<String, Point>,
}

impl RemoteReplay {
    pub fn new(line_width: f64) -> Self {
        Self {
            line_width,
            pens: HashMap::new(),
        }
    }

    /// Number of participants currently mid-stroke.
    pub fn active_strokes(&self) -> usize {
        self.pens.len()
    }

    pub fn apply(&mut self, surface: &mut RasterSurface, envelope: &Envelope) {
        match &envelope.event {
            RemoteEvent::Point { x, y, color } => {
                let point = Point::new(*x, *y);
                let color = util::parse_color(color).unwrap_or_else(|| {
                    warn!(
                        "Unknown color '{}' from '{}', using black",
                        color, envelope.participant
                    );
                    BLACK
                });
                // The first point of a stroke only positions the pen
                if let Some(last) = self.pens.insert(envelope.participant.clone(), point) {
                    surface.stroke_segment(last, point, color, self.line_width);
                }
            }
            RemoteEvent::StrokeEnd => {
                self.pens.remove(&envelope.participant);
            }
            RemoteEvent::Clear => {
                debug!("Board cleared by '{}'", envelope.participant);
                self.pens.clear();
                surface.clear();
            }
        }
    }
}
