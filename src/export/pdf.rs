//! PDF rendering of the report view
//!
//! The view is laid out as a column of blocks on a single A4-wide page whose
//! height follows the content, so the whole report always fits one page.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local};
use printpdf::*;

use super::chart::render_aqi_scale;
use super::ExportError;
use crate::advisory::{AqiCategory, COLOR_UNKNOWN};
use crate::view::ReportView;

// ============================================================================
// Page Geometry (mm unless noted)
// ============================================================================

pub const PAGE_WIDTH_MM: f32 = 210.0;
const MARGIN_MM: f32 = 15.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_CHAR_EM: f32 = 0.52;
const LINE_SPACING: f32 = 1.35;

const CHART_WIDTH_PX: u32 = 1000;
const CHART_HEIGHT_PX: u32 = 140;
const LEGEND_HEIGHT_MM: f32 = 6.0;
const RULE_HEIGHT_MM: f32 = 5.0;

const COLOR_TITLE: (u8, u8, u8) = (37, 99, 235);
const COLOR_HEADING: (u8, u8, u8) = (30, 64, 175);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (110, 110, 110);
const COLOR_LIGHT_GRAY: (u8, u8, u8) = (200, 200, 200);
const COLOR_WARNING: (u8, u8, u8) = (146, 64, 14);
const COLOR_ERROR: (u8, u8, u8) = (220, 38, 38);

fn chart_height_mm() -> f32 {
    CONTENT_WIDTH_MM * CHART_HEIGHT_PX as f32 / CHART_WIDTH_PX as f32
}

/// DPI at which the chart spans exactly the content width
fn chart_dpi() -> f32 {
    CHART_WIDTH_PX as f32 / (CONTENT_WIDTH_MM / 25.4)
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

fn chars_per_line(size_pt: f32, width_mm: f32) -> usize {
    ((width_mm / (size_pt * PT_TO_MM * AVG_CHAR_EM)).floor() as usize).max(1)
}

/// Shown in place of characters the builtin fonts cannot draw
pub const UNPRINTABLE: char = '?';

/// Characters of the WinAnsi upper half outside Latin-1
const WIN_ANSI_EXTRA: &str = "\u{20AC}\u{201A}\u{0192}\u{201E}\u{2026}\u{2020}\u{2021}\u{02C6}\u{2030}\u{0160}\u{2039}\u{0152}\u{017D}\u{2018}\u{2019}\u{201C}\u{201D}\u{2022}\u{2013}\u{2014}\u{02DC}\u{2122}\u{0161}\u{203A}\u{0153}\u{017E}\u{0178}";

/// Replace what builtin Helvetica (WinAnsi) would drop silently, so missing
/// glyphs show up as `UNPRINTABLE` instead of vanishing.
pub fn printable_text(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x0A | 0x20..=0x7E | 0xA0..=0xFF => c,
            0x09 => ' ',
            _ if WIN_ANSI_EXTRA.contains(c) => c,
            _ => UNPRINTABLE,
        })
        .collect()
}

/// Greedy word wrap; words longer than a line are split hard.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut rest = word;
            while rest.chars().count() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let split = rest
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                lines.push(rest[..split].to_string());
                rest = &rest[split..];
            }
            if rest.is_empty() {
                continue;
            }

            let word_len = rest.chars().count();
            if current_len > 0 && current_len + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(rest);
            current_len += word_len;
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Weight {
    Regular,
    Bold,
}

#[derive(Debug)]
enum Block {
    Text {
        lines: Vec<String>,
        size: f32,
        weight: Weight,
        color: (u8, u8, u8),
    },
    Chart(Vec<u8>),
    Legend,
    Rule,
    Gap(f32),
}

impl Block {
    fn text(text: &str, size: f32, weight: Weight, color: (u8, u8, u8)) -> Self {
        Block::Text {
            lines: wrap_text(&printable_text(text), chars_per_line(size, CONTENT_WIDTH_MM)),
            size,
            weight,
            color,
        }
    }

    fn heading(text: &str) -> Self {
        Self::text(text, 13.0, Weight::Bold, COLOR_HEADING)
    }

    fn body(text: &str) -> Self {
        Self::text(text, 10.0, Weight::Regular, COLOR_BLACK)
    }

    fn height_mm(&self) -> f32 {
        match self {
            Block::Text { lines, size, .. } => lines.len() as f32 * line_height_mm(*size),
            Block::Chart(_) => chart_height_mm() + 2.0,
            Block::Legend => LEGEND_HEIGHT_MM,
            Block::Rule => RULE_HEIGHT_MM,
            Block::Gap(mm) => *mm,
        }
    }
}

fn section(blocks: &mut Vec<Block>, heading: &str, paragraphs: &[&str]) {
    blocks.push(Block::heading(heading));
    blocks.push(Block::Gap(1.0));
    for paragraph in paragraphs {
        blocks.push(Block::body(paragraph));
        blocks.push(Block::Gap(1.5));
    }
    blocks.push(Block::Gap(3.0));
}

fn layout(view: &ReportView, generated_at: DateTime<Local>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let aqi_color = view
        .aqi_category
        .map(|c| c.color())
        .unwrap_or(COLOR_UNKNOWN);

    blocks.push(Block::text("Air Quality Health Report", 18.0, Weight::Bold, COLOR_TITLE));
    blocks.push(Block::Gap(2.0));
    blocks.push(Block::text(
        &format!(
            "Report: {}    Observed: {}    Generated: {}",
            view.report_id,
            view.observed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            generated_at.format("%Y-%m-%d %H:%M"),
        ),
        9.0,
        Weight::Regular,
        COLOR_GRAY,
    ));
    blocks.push(Block::Rule);

    blocks.push(Block::heading("Current Air Quality"));
    blocks.push(Block::Gap(1.0));
    blocks.push(Block::text(
        &format!("AQI Value: {}    Status: {}", view.aqi_display, view.aqi_status),
        12.0,
        Weight::Bold,
        aqi_color,
    ));
    blocks.push(Block::Gap(1.0));
    match render_aqi_scale(view.aqi_value, CHART_WIDTH_PX, CHART_HEIGHT_PX) {
        Ok(png) => blocks.push(Block::Chart(png)),
        Err(e) => {
            tracing::warn!(error = %e, "AQI chart rendering failed");
            blocks.push(Block::text(
                &format!("Chart generation error: {}", e),
                9.0,
                Weight::Regular,
                COLOR_ERROR,
            ));
        }
    }
    blocks.push(Block::Legend);
    blocks.push(Block::Rule);

    section(
        &mut blocks,
        "Personal Information",
        &[format!("Name: {}", view.name).as_str(), format!("Age: {}", view.age).as_str()],
    );

    let server_sections = [
        ("General Recommendation", &view.general_recommendation),
        ("Age-specific Recommendation", &view.age_specific_recommendation),
        ("Health Condition Recommendation", &view.health_specific_recommendation),
    ];
    for (heading, text) in server_sections {
        if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
            section(&mut blocks, heading, &[text]);
        }
    }

    let advisories = &view.advisories;
    section(
        &mut blocks,
        "Time-specific Recommendation",
        &[
            view.time_of_day_advice,
            format!("Outdoor Activity Assessment: {}", advisories.activity).as_str(),
        ],
    );
    section(
        &mut blocks,
        "Mask Recommendation",
        &[
            advisories.mask.general.as_str(),
            format!("Personalized Mask Recommendation: {}", advisories.mask.personalized).as_str(),
        ],
    );
    section(&mut blocks, "Medicine Recommendations", &[advisories.medicine.as_str()]);
    if let Some(disclaimer) = view.medicine_disclaimer {
        blocks.push(Block::text(disclaimer, 8.5, Weight::Regular, COLOR_WARNING));
        blocks.push(Block::Gap(3.0));
    }

    blocks.push(Block::Rule);
    blocks.push(Block::text(view.disclaimer, 8.0, Weight::Regular, COLOR_GRAY));

    blocks
}

/// Page height that fits the laid-out blocks plus margins
fn page_height_mm(blocks: &[Block]) -> f32 {
    blocks.iter().map(Block::height_mm).sum::<f32>() + 2.0 * MARGIN_MM
}

// ============================================================================
// PDF Drawing Helpers
// ============================================================================

fn rgb_to_printpdf(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color));
    layer.use_text(text, size, x, y, font);
}

fn add_line(layer: &PdfLayerReference, x1: Mm, y1: Mm, x2: Mm, y2: Mm, color: (u8, u8, u8), width: f32) {
    layer.set_outline_color(rgb_to_printpdf(color));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![(Point::new(x1, y1), false), (Point::new(x2, y2), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

fn draw_block(layer: &PdfLayerReference, fonts: &Fonts, block: &Block, top: f32) -> Result<(), ExportError> {
    match block {
        Block::Text { lines, size, weight, color } => {
            let mut baseline = top;
            for line in lines {
                baseline -= line_height_mm(*size);
                add_text(layer, fonts.pick(*weight), line, Mm(MARGIN_MM), Mm(baseline), *size, *color);
            }
        }
        Block::Chart(png) => {
            let dynamic_image = printpdf::image_crate::load_from_memory(png)
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            let transform = ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(top - chart_height_mm())),
                dpi: Some(chart_dpi()),
                ..Default::default()
            };
            Image::from_dynamic_image(&dynamic_image).add_to_layer(layer.clone(), transform);
        }
        Block::Legend => {
            let spans = AqiCategory::BANDS.len() as f32;
            let slot = CONTENT_WIDTH_MM / spans;
            let baseline = top - LEGEND_HEIGHT_MM + 2.0;
            for (i, (_, category)) in AqiCategory::BANDS.iter().enumerate() {
                let label = format!("{} ({})", short_name(*category), category.range_label());
                let x = MARGIN_MM + i as f32 * slot;
                add_text(layer, &fonts.regular, &label, Mm(x), Mm(baseline), 7.0, legend_color(*category));
            }
        }
        Block::Rule => {
            let y = top - RULE_HEIGHT_MM / 2.0;
            add_line(layer, Mm(MARGIN_MM), Mm(y), Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y), COLOR_LIGHT_GRAY, 0.5);
        }
        Block::Gap(_) => {}
    }
    Ok(())
}

fn short_name(category: AqiCategory) -> &'static str {
    match category {
        AqiCategory::UnhealthyForSensitiveGroups => "Sensitive",
        other => other.display_name(),
    }
}

/// Yellow text is unreadable on white; darken it for the legend
fn legend_color(category: AqiCategory) -> (u8, u8, u8) {
    match category {
        AqiCategory::Moderate => (184, 134, 11),
        other => other.color(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the view into a single-page PDF at `path`. Returns the page height in mm.
pub fn render_pdf(view: &ReportView, path: &Path, generated_at: DateTime<Local>) -> Result<f32, ExportError> {
    let blocks = layout(view, generated_at);
    let page_height = page_height_mm(&blocks);

    let (doc, page, layer) = PdfDocument::new(
        "Air Quality Health Report",
        Mm(PAGE_WIDTH_MM),
        Mm(page_height),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    };

    let layer = doc.get_page(page).get_layer(layer);

    let mut top = page_height - MARGIN_MM;
    for block in &blocks {
        draw_block(&layer, &fonts, block, top)?;
        top -= block.height_mm();
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| ExportError::Pdf(e.to_string()))?;

    Ok(page_height)
}
