//! SVG sketches of footprint sequences.
//!
//! Renders the oriented boxes of one or more footprint sequences, plus
//! optional restricted-zone rectangles, as an audit file for layout work and
//! walk debugging.

use std::fmt::Write;
use std::path::Path;

use crate::core::Point2D;
use crate::footprint::FootprintSequence;
use crate::geometry::Aabb;

/// Colors used by the sketch.
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Stroke colors cycled per footprint sequence.
    pub footprints: [&'static str; 3],
    /// Restricted-zone fill color.
    pub zone: &'static str,
    /// Page background.
    pub background: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            footprints: ["#2222AA", "#22AA22", "#AA2222"],
            zone: "#FFAA00",
            background: "#F8F8F8",
        }
    }
}

/// Rendering parameters.
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per map unit.
    pub scale: f64,
    /// Padding around the drawing in pixels.
    pub padding: f64,
    /// Box outline width in pixels.
    pub stroke_width: f64,
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 0.1,
            padding: 20.0,
            stroke_width: 1.0,
            colors: SvgColorScheme::default(),
        }
    }
}

/// Sketch builder collecting sequences and zones before rendering.
pub struct SvgSketch {
    config: SvgConfig,
    sequences: Vec<Vec<[Point2D; 4]>>,
    zones: Vec<Aabb>,
}

impl SvgSketch {
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            sequences: Vec::new(),
            zones: Vec::new(),
        }
    }

    /// Add the boxes of a footprint sequence as outlined polygons.
    pub fn with_sequence(mut self, sequence: &FootprintSequence) -> Self {
        let polygons = sequence
            .iter()
            .map(|segment| segment.obb.vertices())
            .collect();
        self.sequences.push(polygons);
        self
    }

    /// Add a restricted-zone rectangle.
    pub fn with_zone(mut self, zone: Aabb) -> Self {
        self.zones.push(zone);
        self
    }

    /// Render to an SVG string.
    pub fn render(&self) -> String {
        let (min, max) = self.bounds();
        let scale = self.config.scale;
        let padding = self.config.padding;
        let width = (max.x - min.x) * scale + 2.0 * padding;
        let height = (max.y - min.y) * scale + 2.0 * padding;

        // SVG y grows downward; flip against the top edge of the bounds
        let place = |point: &Point2D| -> (f64, f64) {
            (
                (point.x - min.x) * scale + padding,
                (max.y - point.y) * scale + padding,
            )
        };

        let mut svg = String::new();
        writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )
        .unwrap();
        writeln!(
            &mut svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.config.colors.background
        )
        .unwrap();

        if !self.zones.is_empty() {
            writeln!(&mut svg, r#"  <g id="zones">"#).unwrap();
            for zone in &self.zones {
                let (x, y) = place(&Point2D::new(zone.min().x, zone.max().y));
                writeln!(
                    &mut svg,
                    r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" opacity="0.4"/>"#,
                    x,
                    y,
                    2.0 * zone.half_x * scale,
                    2.0 * zone.half_y * scale,
                    self.config.colors.zone
                )
                .unwrap();
            }
            writeln!(&mut svg, "  </g>").unwrap();
        }

        for (i, polygons) in self.sequences.iter().enumerate() {
            let color = self.config.colors.footprints[i % self.config.colors.footprints.len()];
            writeln!(&mut svg, r#"  <g id="footprint-{}">"#, i).unwrap();
            for corners in polygons {
                let mut points = String::new();
                for corner in corners {
                    let (x, y) = place(corner);
                    write!(&mut points, "{:.1},{:.1} ", x, y).unwrap();
                }
                writeln!(
                    &mut svg,
                    r#"    <polygon points="{}" fill="none" stroke="{}" stroke-width="{}" opacity="0.6"/>"#,
                    points.trim_end(),
                    color,
                    self.config.stroke_width
                )
                .unwrap();
            }
            writeln!(&mut svg, "  </g>").unwrap();
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    /// Write the rendered sketch to a file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, self.render())
    }

    fn bounds(&self) -> (Point2D, Point2D) {
        let mut min = Point2D::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut extend = |point: &Point2D| {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        };
        for polygons in &self.sequences {
            for corners in polygons {
                for corner in corners {
                    extend(corner);
                }
            }
        }
        for zone in &self.zones {
            extend(&zone.min());
            extend(&zone.max());
        }
        if min.x > max.x {
            return (Point2D::ORIGIN, Point2D::new(100.0, 100.0));
        }
        (min, max)
    }
}
