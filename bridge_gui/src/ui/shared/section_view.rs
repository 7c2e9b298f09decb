//! Scaled cross-section preview rendered with the Canvas widget.
//!
//! Member rectangles are drawn to a common scale with their outlines,
//! the centroidal axis is overlaid as a horizontal line, and declared
//! glue seams show up as short red ticks at their seam height. When the
//! buckling classification is available, each plate panel is filled in
//! the colour of its restraint case.

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::{mouse, Color, Pixels, Point, Rectangle, Renderer, Size, Theme};

use bridge_core::checks::buckling::{BucklingCase, PanelClass};
use bridge_core::checks::GlueJoint;
use bridge_core::geometry::Rect;

use crate::Message;

const MARGIN: f32 = 26.0;

const GLUE_COLOR: Color = Color {
    r: 0.85,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

fn case_color(case: BucklingCase) -> Color {
    match case {
        BucklingCase::One => Color::from_rgb(0.25, 0.45, 0.85),
        BucklingCase::Two => Color::from_rgb(0.2, 0.65, 0.35),
        BucklingCase::Three => Color::from_rgb(0.9, 0.5, 0.15),
        BucklingCase::Four => Color::from_rgb(0.6, 0.35, 0.75),
    }
}

/// Canvas program drawing the member rectangles of one section design.
pub struct SectionView {
    members: Vec<Rect>,
    panels: Vec<PanelClass>,
    glue_joints: Vec<GlueJoint>,
    centroid_y: Option<f64>,
    dark_mode: bool,
}

impl SectionView {
    pub fn new(
        members: Vec<Rect>,
        panels: Vec<PanelClass>,
        glue_joints: Vec<GlueJoint>,
        centroid_y: Option<f64>,
        dark_mode: bool,
    ) -> Self {
        SectionView {
            members,
            panels,
            glue_joints,
            centroid_y,
            dark_mode,
        }
    }

    fn line_color(&self) -> Color {
        if self.dark_mode {
            Color::from_rgb(0.85, 0.85, 0.85)
        } else {
            Color::from_rgb(0.15, 0.15, 0.15)
        }
    }
}

impl canvas::Program<Message> for SectionView {
    type State = ();

    fn draw(
        &self,
        _state: &(),
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        if self.members.is_empty() {
            frame.fill_text(Text {
                content: "No members - add rectangles in the editor".to_string(),
                position: Point::new(MARGIN, bounds.height / 2.0),
                color: self.line_color(),
                size: Pixels(11.0),
                ..Text::default()
            });
            return vec![frame.into_geometry()];
        }

        // Bounding box of the whole section in model space
        let left = self
            .members
            .iter()
            .map(Rect::left)
            .fold(f64::INFINITY, f64::min);
        let right = self
            .members
            .iter()
            .map(Rect::right)
            .fold(f64::NEG_INFINITY, f64::max);
        let bottom = self
            .members
            .iter()
            .map(Rect::bottom)
            .fold(f64::INFINITY, f64::min);
        let top = self
            .members
            .iter()
            .map(Rect::top)
            .fold(f64::NEG_INFINITY, f64::max);

        let model_w = (right - left).max(1e-9) as f32;
        let model_h = (top - bottom).max(1e-9) as f32;
        let scale = ((bounds.width - 2.0 * MARGIN) / model_w)
            .min((bounds.height - 2.0 * MARGIN) / model_h);

        // Center the drawing in the canvas; the y axis flips so that
        // model "up" is screen "up".
        let offset_x = (bounds.width - model_w * scale) / 2.0;
        let offset_y = (bounds.height - model_h * scale) / 2.0;
        let map = |x: f64, y: f64| {
            Point::new(
                offset_x + (x - left) as f32 * scale,
                bounds.height - offset_y - (y - bottom) as f32 * scale,
            )
        };

        let rect_path = |rect: &Rect| {
            let corner = map(rect.left(), rect.top());
            let size = Size::new(rect.w as f32 * scale, rect.h as f32 * scale);
            Path::rectangle(corner, size)
        };

        for member in &self.members {
            let path = rect_path(member);
            frame.fill(&path, Color::from_rgba(0.5, 0.5, 0.5, 0.15));
            frame.stroke(
                &path,
                Stroke::default()
                    .with_color(self.line_color())
                    .with_width(1.5),
            );
        }

        // Restraint-case overlay. Case 4 repeats the whole web, so it is
        // drawn as an outline instead of a fill to keep cases 1-3 visible.
        for panel in &self.panels {
            let color = case_color(panel.case);
            let path = rect_path(&panel.panel);
            match panel.case {
                BucklingCase::Four => {
                    frame.stroke(&path, Stroke::default().with_color(color).with_width(2.0));
                }
                _ => {
                    frame.fill(&path, Color { a: 0.35, ..color });
                }
            }
        }

        if !self.panels.is_empty() {
            for (i, (case, label)) in [
                (BucklingCase::One, "case 1"),
                (BucklingCase::Two, "case 2"),
                (BucklingCase::Three, "case 3"),
                (BucklingCase::Four, "case 4"),
            ]
            .into_iter()
            .enumerate()
            {
                frame.fill_text(Text {
                    content: label.to_string(),
                    position: Point::new(4.0, 4.0 + 12.0 * i as f32),
                    color: case_color(case),
                    size: Pixels(9.0),
                    ..Text::default()
                });
            }
        }

        if let Some(ybar) = self.centroid_y {
            let start = map(left, ybar);
            let end = map(right, ybar);
            let axis = Path::line(start, end);
            frame.stroke(
                &axis,
                Stroke::default()
                    .with_color(self.line_color())
                    .with_width(1.0),
            );
            frame.fill_text(Text {
                content: format!("ybar = {:.2} mm", ybar),
                position: Point::new(end.x + 4.0, end.y - 5.0),
                color: self.line_color(),
                size: Pixels(9.0),
                ..Text::default()
            });
        }

        for joint in &self.glue_joints {
            let y = joint.height_mm;
            let center_x = (left + right) / 2.0;
            let seam = Path::line(
                map(center_x - joint.width_mm / 2.0, y),
                map(center_x + joint.width_mm / 2.0, y),
            );
            frame.stroke(&seam, Stroke::default().with_color(GLUE_COLOR).with_width(2.5));
        }

        vec![frame.into_geometry()]
    }
}
