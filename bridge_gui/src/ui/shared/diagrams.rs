//! Envelope and FOS diagrams rendered with the Canvas widget.
//!
//! [`EnvelopeDiagram`] shows the worst-case band swept out by the moving
//! train: the area between the minimum and maximum envelope curves is
//! filled, and the two bounding curves are stroked on top. Shear
//! occupies the upper half of the canvas, moment the lower half.
//!
//! [`FosProfileDiagram`] plots factor of safety against position on a
//! log scale, one curve per failure mode, with the FOS = 1 line marked.

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::{mouse, Color, Pixels, Point, Rectangle, Renderer, Theme};

use bridge_core::checks::{FailureMode, FOS_CAP};
use bridge_core::loads::Envelope;

use crate::Message;

const MARGIN: f32 = 28.0;

const SHEAR_COLOR: Color = Color {
    r: 0.25,
    g: 0.45,
    b: 0.85,
    a: 1.0,
};

const MOMENT_COLOR: Color = Color {
    r: 0.9,
    g: 0.5,
    b: 0.15,
    a: 1.0,
};

/// Canvas program drawing the SFD/BMD envelope pair.
pub struct EnvelopeDiagram {
    shear_min: Vec<f64>,
    shear_max: Vec<f64>,
    moment_min: Vec<f64>,
    moment_max: Vec<f64>,
    dark_mode: bool,
}

impl EnvelopeDiagram {
    pub fn new(envelope: Option<&Envelope>, dark_mode: bool) -> Self {
        match envelope {
            Some(envelope) => EnvelopeDiagram {
                shear_min: envelope.shear_min_n.clone(),
                shear_max: envelope.shear_max_n.clone(),
                moment_min: envelope.moment_min_nmm.clone(),
                moment_max: envelope.moment_max_nmm.clone(),
                dark_mode,
            },
            None => EnvelopeDiagram {
                shear_min: Vec::new(),
                shear_max: Vec::new(),
                moment_min: Vec::new(),
                moment_max: Vec::new(),
                dark_mode,
            },
        }
    }

    fn axis_color(&self) -> Color {
        if self.dark_mode {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    fn text_color(&self) -> Color {
        if self.dark_mode {
            Color::from_rgb(0.85, 0.85, 0.85)
        } else {
            Color::from_rgb(0.15, 0.15, 0.15)
        }
    }
}

impl canvas::Program<Message> for EnvelopeDiagram {
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

        if self.shear_min.len() < 2 {
            frame.fill_text(Text {
                content: "Run analysis to see envelopes".to_string(),
                position: Point::new(MARGIN, bounds.height / 2.0),
                color: self.axis_color(),
                size: Pixels(11.0),
                ..Text::default()
            });
            return vec![frame.into_geometry()];
        }

        let half = bounds.height / 2.0;
        draw_band(
            &mut frame,
            0.0,
            half,
            bounds.width,
            &self.shear_min,
            &self.shear_max,
            SHEAR_COLOR,
            "Shear envelope (N)",
            self.axis_color(),
            self.text_color(),
        );
        draw_band(
            &mut frame,
            half,
            half,
            bounds.width,
            &self.moment_min,
            &self.moment_max,
            MOMENT_COLOR,
            "Moment envelope (N·mm)",
            self.axis_color(),
            self.text_color(),
        );

        vec![frame.into_geometry()]
    }
}

/// Draw one min/max band into a horizontal strip of the frame.
#[allow(clippy::too_many_arguments)]
fn draw_band(
    frame: &mut Frame,
    top: f32,
    height: f32,
    width: f32,
    min: &[f64],
    max: &[f64],
    color: Color,
    label: &str,
    axis_color: Color,
    text_color: Color,
) {
    let n = min.len().min(max.len());
    if n < 2 {
        return;
    }

    let extent = min
        .iter()
        .chain(max.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(1e-9);

    let plot_width = width - 2.0 * MARGIN;
    let plot_half = height / 2.0 - MARGIN;
    let baseline = top + height / 2.0;
    let map = |i: usize, v: f64| {
        Point::new(
            MARGIN + plot_width * (i as f32) / ((n - 1) as f32),
            baseline - plot_half * (v / extent) as f32,
        )
    };

    // Zero axis
    let axis = Path::line(
        Point::new(MARGIN, baseline),
        Point::new(MARGIN + plot_width, baseline),
    );
    frame.stroke(&axis, Stroke::default().with_color(axis_color).with_width(1.0));

    // Filled band between the two envelope curves
    let band = Path::new(|builder| {
        builder.move_to(map(0, max[0]));
        for (i, v) in max.iter().enumerate().take(n).skip(1) {
            builder.line_to(map(i, *v));
        }
        for (i, v) in min.iter().enumerate().take(n).rev() {
            builder.line_to(map(i, *v));
        }
        builder.close();
    });
    frame.fill(&band, Color { a: 0.25, ..color });

    for curve in [max, min] {
        let path = Path::new(|builder| {
            builder.move_to(map(0, curve[0]));
            for (i, v) in curve.iter().enumerate().take(n).skip(1) {
                builder.line_to(map(i, *v));
            }
        });
        frame.stroke(&path, Stroke::default().with_color(color).with_width(1.5));
    }

    frame.fill_text(Text {
        content: label.to_string(),
        position: Point::new(MARGIN, top + 6.0),
        color: text_color,
        size: Pixels(10.0),
        ..Text::default()
    });
    frame.fill_text(Text {
        content: format!("peak {:.0}", extent),
        position: Point::new(MARGIN + plot_width - 70.0, top + 6.0),
        color: text_color,
        size: Pixels(10.0),
        ..Text::default()
    });
}

/// Ten visually distinct curve colours, one per failure mode.
const MODE_COLORS: [Color; 10] = [
    Color {
        r: 0.25,
        g: 0.45,
        b: 0.85,
        a: 1.0,
    },
    Color {
        r: 0.15,
        g: 0.3,
        b: 0.6,
        a: 1.0,
    },
    Color {
        r: 0.2,
        g: 0.65,
        b: 0.35,
        a: 1.0,
    },
    Color {
        r: 0.1,
        g: 0.45,
        b: 0.25,
        a: 1.0,
    },
    Color {
        r: 0.9,
        g: 0.5,
        b: 0.15,
        a: 1.0,
    },
    Color {
        r: 0.7,
        g: 0.35,
        b: 0.1,
        a: 1.0,
    },
    Color {
        r: 0.6,
        g: 0.35,
        b: 0.75,
        a: 1.0,
    },
    Color {
        r: 0.4,
        g: 0.2,
        b: 0.55,
        a: 1.0,
    },
    Color {
        r: 0.8,
        g: 0.2,
        b: 0.2,
        a: 1.0,
    },
    Color {
        r: 0.5,
        g: 0.5,
        b: 0.2,
        a: 1.0,
    },
];

/// Canvas program plotting FOS vs position on a log10 vertical scale.
pub struct FosProfileDiagram {
    /// `(position_mm, fos per mode in FailureMode::ALL order)` samples
    profile: Vec<(f64, Vec<f64>)>,
    dark_mode: bool,
}

impl FosProfileDiagram {
    pub fn new(profile: Vec<(f64, Vec<f64>)>, dark_mode: bool) -> Self {
        FosProfileDiagram { profile, dark_mode }
    }

    fn axis_color(&self) -> Color {
        if self.dark_mode {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    fn text_color(&self) -> Color {
        if self.dark_mode {
            Color::from_rgb(0.85, 0.85, 0.85)
        } else {
            Color::from_rgb(0.15, 0.15, 0.15)
        }
    }
}

// Vertical range of the log plot: FOS 0.1 up to the cap.
const LOG_MIN: f32 = -1.0;
const LOG_MAX: f32 = 3.0;

impl canvas::Program<Message> for FosProfileDiagram {
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

        if self.profile.len() < 2 {
            frame.fill_text(Text {
                content: "Run analysis to see the FOS profile".to_string(),
                position: Point::new(MARGIN, bounds.height / 2.0),
                color: self.axis_color(),
                size: Pixels(11.0),
                ..Text::default()
            });
            return vec![frame.into_geometry()];
        }

        let n = self.profile.len();
        let plot_width = bounds.width - 2.0 * MARGIN;
        let plot_height = bounds.height - 2.0 * MARGIN;
        let span_mm = self.profile.last().map(|(pos, _)| *pos).unwrap_or(1.0);

        let map = |pos: f64, fos: f64| {
            let log = (fos.max(1e-3).log10() as f32).clamp(LOG_MIN, LOG_MAX);
            Point::new(
                MARGIN + plot_width * (pos / span_mm) as f32,
                MARGIN + plot_height * (LOG_MAX - log) / (LOG_MAX - LOG_MIN),
            )
        };

        // Decade grid lines, FOS = 1 emphasised
        for decade in -1..=3 {
            let y = map(0.0, 10f64.powi(decade)).y;
            let line = Path::line(
                Point::new(MARGIN, y),
                Point::new(MARGIN + plot_width, y),
            );
            let width = if decade == 0 { 1.5 } else { 0.5 };
            frame.stroke(
                &line,
                Stroke::default().with_color(self.axis_color()).with_width(width),
            );
            frame.fill_text(Text {
                content: format!("{}", 10f64.powi(decade)),
                position: Point::new(2.0, y - 5.0),
                color: self.text_color(),
                size: Pixels(9.0),
                ..Text::default()
            });
        }

        let modes = FailureMode::ALL.len();
        for mode_index in 0..modes {
            let color = MODE_COLORS[mode_index % MODE_COLORS.len()];
            let path = Path::new(|builder| {
                let mut started = false;
                for (pos, row) in &self.profile {
                    let Some(&fos) = row.get(mode_index) else {
                        continue;
                    };
                    // Capped samples carry no information; break the curve
                    if fos >= FOS_CAP {
                        started = false;
                        continue;
                    }
                    let point = map(*pos, fos);
                    if started {
                        builder.line_to(point);
                    } else {
                        builder.move_to(point);
                        started = true;
                    }
                }
            });
            frame.stroke(&path, Stroke::default().with_color(color).with_width(1.2));
        }

        frame.fill_text(Text {
            content: format!("FOS vs position (log scale, {} samples)", n),
            position: Point::new(MARGIN, 6.0),
            color: self.text_color(),
            size: Pixels(10.0),
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}
