//! 2D painting for the board texture and the oscilloscope widget.
//!
//! Painting goes through the [`Painter`] trait; in the browser it is a
//! `CanvasRenderingContext2d`, elsewhere a [`DrawList`] that records the
//! calls. The board is recorded once and replayed onto a canvas, so the
//! texture is the same every run.

pub trait Painter {
    fn set_fill(&mut self, css: &str);
    fn set_stroke(&mut self, css: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_alpha(&mut self, alpha: f64);
    fn set_font(&mut self, css: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn polyline(&mut self, points: &[(f64, f64)]);
    fn fill_circle(&mut self, x: f64, y: f64, r: f64);
    /// Text centred on (x, y).
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(String),
    Stroke(String),
    LineWidth(f64),
    Alpha(f64),
    Font(String),
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    Polyline(Vec<(f64, f64)>),
    FillCircle(f64, f64, f64),
    FillText(String, f64, f64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn replay(&self, p: &mut impl Painter) {
        for op in &self.ops {
            match op {
                DrawOp::Fill(c) => p.set_fill(c),
                DrawOp::Stroke(c) => p.set_stroke(c),
                DrawOp::LineWidth(w) => p.set_line_width(*w),
                DrawOp::Alpha(a) => p.set_alpha(*a),
                DrawOp::Font(f) => p.set_font(f),
                DrawOp::FillRect(x, y, w, h) => p.fill_rect(*x, *y, *w, *h),
                DrawOp::StrokeRect(x, y, w, h) => p.stroke_rect(*x, *y, *w, *h),
                DrawOp::Polyline(pts) => p.polyline(pts),
                DrawOp::FillCircle(x, y, r) => p.fill_circle(*x, *y, *r),
                DrawOp::FillText(t, x, y) => p.fill_text(t, *x, *y),
            }
        }
    }
}

impl Painter for DrawList {
    fn set_fill(&mut self, css: &str) {
        self.ops.push(DrawOp::Fill(css.into()));
    }
    fn set_stroke(&mut self, css: &str) {
        self.ops.push(DrawOp::Stroke(css.into()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }
    fn set_font(&mut self, css: &str) {
        self.ops.push(DrawOp::Font(css.into()));
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect(x, y, w, h));
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::StrokeRect(x, y, w, h));
    }
    fn polyline(&mut self, points: &[(f64, f64)]) {
        self.ops.push(DrawOp::Polyline(points.to_vec()));
    }
    fn fill_circle(&mut self, x: f64, y: f64, r: f64) {
        self.ops.push(DrawOp::FillCircle(x, y, r));
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText(text.into(), x, y));
    }
}

pub const BOARD_TEXTURE_SIZE: u32 = 2048;

/// Silkscreen outlines: label, x, y, w, h in texture pixels.
const SILKSCREEN: [(&str, f64, f64, f64, f64); 5] = [
    ("U1", 924.0, 924.0, 200.0, 200.0),
    ("VRM", 300.0, 300.0, 200.0, 150.0),
    ("Y1", 1548.0, 348.0, 100.0, 100.0),
    ("U3", 1548.0, 1548.0, 200.0, 150.0),
    ("P1", 1698.0, 698.0, 100.0, 80.0),
];

pub fn paint_board(p: &mut impl Painter) {
    let size = f64::from(BOARD_TEXTURE_SIZE);

    p.set_fill("#1a3d28");
    p.fill_rect(0.0, 0.0, size, size);

    p.set_stroke("rgba(74, 140, 93, 0.15)");
    p.set_line_width(1.0);
    let mut i = 0.0;
    while i <= size {
        p.polyline(&[(i, 0.0), (i, size)]);
        p.polyline(&[(0.0, i), (size, i)]);
        i += 64.0;
    }

    // Barely-there copper pour.
    p.set_fill("rgba(184, 115, 51, 0.02)");
    p.fill_rect(100.0, 100.0, size - 200.0, size - 200.0);

    p.set_alpha(0.3);
    p.set_stroke("#8c7352");
    p.set_line_width(2.0);
    for k in 0..8 {
        let y = 300.0 + f64::from(k) * 200.0;
        p.polyline(&[(150.0, y), (size - 150.0, y)]);
    }
    p.set_stroke("#7a6245");
    p.set_line_width(1.5);
    for k in 0..8 {
        let x = 300.0 + f64::from(k) * 200.0;
        p.polyline(&[(x, 150.0), (x, size - 150.0)]);
    }
    p.set_alpha(1.0);

    p.set_fill("#bfa382");
    for a in 0..8 {
        for b in 0..8 {
            p.fill_circle(300.0 + f64::from(a) * 200.0, 300.0 + f64::from(b) * 200.0, 6.0);
        }
    }

    p.set_font("bold 40px monospace");
    p.set_stroke("rgba(200, 200, 200, 0.2)");
    p.set_line_width(2.0);
    p.set_fill("rgba(200, 200, 200, 0.3)");
    for (label, x, y, w, h) in SILKSCREEN {
        p.stroke_rect(x, y, w, h);
        p.fill_text(label, x + w / 2.0, y + h / 2.0);
    }
}

/// The board painting as a recorded list, built once.
pub fn board_draw_list() -> DrawList {
    let mut list = DrawList::default();
    paint_board(&mut list);
    list
}

/// Integer hash mapped to [-0.5, 0.5).
fn noise(x: u32, frame: u32) -> f64 {
    let mut h = x.wrapping_mul(0x9E37_79B9) ^ frame.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    f64::from(h) / 4_294_967_296.0 - 0.5
}

/// Fake oscilloscope trace: persistence-faded grid, a two-tone wave
/// with a little noise, and a sweeping scan line.
#[derive(Debug, Clone)]
pub struct Scope {
    pub width: f64,
    pub height: f64,
    time: f64,
    frame: u32,
}

impl Scope {
    pub const WIDTH: u32 = 192;
    pub const HEIGHT: u32 = 96;

    pub fn new() -> Self {
        Self { width: f64::from(Self::WIDTH), height: f64::from(Self::HEIGHT), time: 0.0, frame: 0 }
    }

    pub fn wave_y(&self, x: f64) -> f64 {
        self.height / 2.0 + (x * 0.05 + self.time).sin() * 20.0 + (x * 0.1 - self.time * 2.0).sin() * 10.0
    }

    pub fn scan_x(&self) -> f64 {
        (self.time * 100.0) % self.width
    }

    /// Advances one frame and paints it.
    pub fn paint_frame(&mut self, p: &mut impl Painter) {
        self.time += 0.02;
        self.frame = self.frame.wrapping_add(1);
        let (w, h) = (self.width, self.height);

        p.set_fill("rgba(13, 17, 23, 0.2)");
        p.fill_rect(0.0, 0.0, w, h);

        p.set_stroke("rgba(0, 255, 136, 0.1)");
        p.set_line_width(1.0);
        let mut x = 0.0;
        while x < w {
            p.polyline(&[(x, 0.0), (x, h)]);
            x += 20.0;
        }
        let mut y = 0.0;
        while y < h {
            p.polyline(&[(0.0, y), (w, y)]);
            y += 20.0;
        }

        p.set_stroke("#00ff88");
        p.set_line_width(2.0);
        let wave: Vec<(f64, f64)> = (0..Self::WIDTH)
            .map(|px| {
                let x = f64::from(px);
                (x, self.wave_y(x) + noise(px, self.frame) * 5.0)
            })
            .collect();
        p.polyline(&wave);

        p.set_fill("rgba(0, 255, 136, 0.5)");
        p.fill_rect(self.scan_x(), 0.0, 2.0, h);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
