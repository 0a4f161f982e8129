// ============================================================================
// SIGNATURE STATE - Contabilidad de trazos del pad de firma (sin DOM)
// ============================================================================
// El canvas pinta; esta estructura decide si hay firma y qué segmento dibujar.
// ============================================================================

use crate::error::ApiError;

/// Contrato de captura de firma que usan los view models
pub trait SignatureCapture {
    fn clear(&self);
    fn is_empty(&self) -> bool;
    /// Raster actual como data URL (PNG)
    fn to_data_url(&self) -> Result<String, ApiError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignatureSurface {
    css_width: f64,
    css_height: f64,
    pixel_ratio: f64,
    strokes: usize,
    pen: Option<Point>,
}

impl SignatureSurface {
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            pixel_ratio: normalize_ratio(pixel_ratio),
            strokes: 0,
            pen: None,
        }
    }

    /// Redimensionar pierde el bitmap: la superficie queda vacía.
    /// Devuelve el tamaño del backing store en px físicos.
    pub fn resize(&mut self, css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
        self.css_width = css_width.max(0.0);
        self.css_height = css_height.max(0.0);
        self.pixel_ratio = normalize_ratio(pixel_ratio);
        self.clear();
        self.backing_size()
    }

    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.css_width * self.pixel_ratio).round() as u32,
            (self.css_height * self.pixel_ratio).round() as u32,
        )
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Pen down. Un punto suelto ya cuenta como trazo.
    pub fn begin_stroke(&mut self, at: Point) {
        self.strokes += 1;
        self.pen = Some(at);
    }

    /// Pen move: segmento a pintar si el lápiz está abajo
    pub fn extend_stroke(&mut self, to: Point) -> Option<(Point, Point)> {
        let from = self.pen?;
        self.pen = Some(to);
        Some((from, to))
    }

    pub fn end_stroke(&mut self) {
        self.pen = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_some()
    }

    pub fn clear(&mut self) {
        self.strokes = 0;
        self.pen = None;
    }

    pub fn is_empty(&self) -> bool {
        self.strokes == 0
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes
    }
}

/// devicePixelRatio < 1 (o NaN) se trata como 1
fn normalize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 1.0 {
        ratio
    } else {
        1.0
    }
}
