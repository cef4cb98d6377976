//! AQI scale chart (plotters)
//!
//! A horizontal band per AQI category with a marker at the current reading,
//! rasterized to PNG for embedding in the PDF. The chart carries no text; the
//! PDF prints the band legend itself, so rendering never needs system fonts.

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::advisory::AqiCategory;

/// Right edge of the scale; readings beyond it are pinned to the edge
pub const SCALE_MAX: f64 = 500.0;

/// `(from, to, category)` spans covering 0..SCALE_MAX
pub fn category_spans() -> Vec<(f64, f64, AqiCategory)> {
    let bands = AqiCategory::BANDS;
    bands
        .iter()
        .enumerate()
        .map(|(i, (floor, category))| {
            let from = floor.max(0.0);
            let to = bands.get(i + 1).map(|(next, _)| *next).unwrap_or(SCALE_MAX);
            (from, to, *category)
        })
        .collect()
}

/// Render the scale as PNG bytes
pub fn render_aqi_scale(aqi: Option<f64>, width: u32, height: u32) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .build_cartesian_2d(0.0..SCALE_MAX, 0.0..1.0)
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(category_spans().into_iter().map(|(from, to, category)| {
                let (r, g, b) = category.color();
                Rectangle::new([(from, 0.2), (to, 0.7)], RGBColor(r, g, b).filled())
            }))
            .map_err(|e| e.to_string())?;

        // Tick every 50 AQI under the bands
        chart
            .draw_series((0..=(SCALE_MAX as i32)).step_by(50).map(|tick| {
                let x = tick as f64;
                PathElement::new(vec![(x, 0.05), (x, 0.2)], BLACK.stroke_width(1))
            }))
            .map_err(|e| e.to_string())?;

        if let Some(value) = aqi {
            let x = value.clamp(0.0, SCALE_MAX);
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x, 0.1), (x, 0.8)],
                    BLACK.stroke_width(3),
                )))
                .map_err(|e| e.to_string())?;
            chart
                .draw_series(std::iter::once(TriangleMarker::new((x, 0.88), 9, BLACK.filled())))
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    let img = RgbImage::from_raw(width, height, buffer).ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_cover_scale() {
        let spans = category_spans();
        assert_eq!(spans.first().unwrap().0, 0.0);
        assert_eq!(spans.last().unwrap().1, SCALE_MAX);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_render_produces_png() {
        let png = render_aqi_scale(Some(180.0), 400, 80).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_without_reading() {
        assert!(render_aqi_scale(None, 400, 80).is_ok());
    }
}
