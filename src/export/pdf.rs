//! PDF export of the expense table
//!
//! Lays the six-column table out on US Letter pages with one-inch margins.
//! The header row repeats on every page. Free-text cells that are too long
//! are cut with an ellipsis; headers, dates, amounts and labels are always
//! shown whole, shrinking the font when the column is narrow.
//!
//! Text is set in the built-in Helvetica faces, which only cover Latin-1.
//! Other characters are replaced with `?` and counted in the outcome.

use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt, Rect, Rgb,
};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::reports::{Alignment, ExpenseTableReport, ReportRow, COLUMNS};
use crate::storage::write_bytes_atomic;

const HEADER_FONT_SIZE: f32 = 10.0;
const BODY_FONT_SIZE: f32 = 9.0;
/// Smallest size a cell is shrunk to; past this the text overflows
const MIN_FONT_SIZE: f32 = 5.0;
const CELL_PADDING: f32 = 6.0;
const GRID_THICKNESS: f32 = 1.0;
/// Helvetica cap height as a fraction of the font size
const CAP_HEIGHT: f32 = 0.718;
const REPLACEMENT_CHAR: char = '?';

/// Result of a PDF export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The report was written
    Written {
        path: PathBuf,
        rows: usize,
        pages: usize,
        /// Characters the PDF font cannot show, replaced with `?`
        substituted: usize,
    },
    /// There were no expenses, so no file was created
    NothingToExport,
}

/// Page geometry in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub header_row_height: f32,
    pub body_row_height: f32,
}

/// Text placed in one table cell, in page coordinates (points)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub left: f32,
    pub width: f32,
    pub text: String,
    pub font_size: f32,
    /// Start of the text run
    pub x: f32,
    pub baseline: f32,
}

/// One table row as it lands on the page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub header: bool,
    pub bottom: f32,
    pub height: f32,
    pub cells: Vec<PlacedCell>,
}

impl PageLayout {
    /// US Letter portrait with one-inch margins
    pub fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 72.0,
            header_row_height: 24.0,
            body_row_height: 18.0,
        }
    }

    /// Width between the margins
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Body rows that fit below the header on one page
    pub fn rows_per_page(&self) -> usize {
        let available = self.page_height - 2.0 * self.margin - self.header_row_height;
        ((available / self.body_row_height).floor() as usize).max(1)
    }

    /// Split `row_count` body rows into per-page ranges
    pub fn paginate(&self, row_count: usize) -> Vec<Range<usize>> {
        let per_page = self.rows_per_page();
        (0..row_count)
            .step_by(per_page)
            .map(|start| start..(start + per_page).min(row_count))
            .collect()
    }

    /// Column widths and left edges; the table is centered between margins
    fn columns(&self) -> Vec<(f32, f32)> {
        let widths = ExpenseTableReport::column_widths(self.content_width());
        let table_width: f32 = widths.iter().sum();
        let mut x = self.margin + (self.content_width() - table_width) / 2.0;

        widths
            .iter()
            .map(|&w| {
                let left = x;
                x += w;
                (left, w)
            })
            .collect()
    }

    /// Place the header row and `rows` on one page, top to bottom
    pub fn layout_page(&self, rows: &[ReportRow]) -> Vec<PlacedRow> {
        let columns = self.columns();
        let mut placed = Vec::with_capacity(rows.len() + 1);
        let mut top = self.page_height - self.margin;

        let bottom = top - self.header_row_height;
        let header = ExpenseTableReport::header();
        placed.push(PlacedRow {
            header: true,
            bottom,
            height: self.header_row_height,
            cells: columns
                .iter()
                .enumerate()
                .map(|(i, &(left, width))| {
                    place_cell(header[i], left, bottom, width, self.header_row_height, i, true)
                })
                .collect(),
        });
        top = bottom;

        for row in rows {
            let bottom = top - self.body_row_height;
            placed.push(PlacedRow {
                header: false,
                bottom,
                height: self.body_row_height,
                cells: columns
                    .iter()
                    .enumerate()
                    .map(|(i, &(left, width))| {
                        place_cell(&row[i], left, bottom, width, self.body_row_height, i, false)
                    })
                    .collect(),
            });
            top = bottom;
        }

        placed
    }

    /// Every page of the report, each starting with the header row
    pub fn layout_document(&self, report: &ExpenseTableReport) -> Vec<Vec<PlacedRow>> {
        self.paginate(report.rows.len())
            .into_iter()
            .map(|range| self.layout_page(&report.rows[range]))
            .collect()
    }
}

/// Export expenses to a PDF file
///
/// Expenses are rendered in the order given. An empty slice writes nothing
/// and returns [`ExportOutcome::NothingToExport`].
pub fn export_expenses_pdf(expenses: &[Expense], destination: &Path) -> ExpenseResult<ExportOutcome> {
    let report = ExpenseTableReport::generate(expenses);
    if report.is_empty() {
        tracing::info!("no expenses to export");
        return Ok(ExportOutcome::NothingToExport);
    }

    let layout = PageLayout::letter();
    let pages = layout.paginate(report.rows.len()).len();
    let substituted: usize = report
        .rows
        .iter()
        .flatten()
        .map(|cell| encode_for_builtin_font(cell).1)
        .sum();
    if substituted > 0 {
        tracing::warn!(substituted, "replaced characters the PDF font cannot show");
    }

    let bytes = render_pdf(&report, &layout)?;

    write_bytes_atomic(destination, &bytes).map_err(|e| {
        ExpenseError::Report(format!(
            "Could not write PDF to {}: {}",
            destination.display(),
            e
        ))
    })?;

    tracing::info!(path = %destination.display(), rows = report.rows.len(), pages, "exported expenses to PDF");

    Ok(ExportOutcome::Written {
        path: destination.to_path_buf(),
        rows: report.rows.len(),
        pages,
        substituted,
    })
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the table into PDF bytes
pub fn render_pdf(report: &ExpenseTableReport, layout: &PageLayout) -> ExpenseResult<Vec<u8>> {
    let width = mm(layout.page_width);
    let height = mm(layout.page_height);

    let (doc, first_page, first_layer) = PdfDocument::new("Expense Report", width, height, "Table");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
    };

    let mut first = Some((first_page, first_layer));
    for rows in layout.layout_document(report) {
        let (page, layer) = first
            .take()
            .unwrap_or_else(|| doc.add_page(width, height, "Table"));
        let layer = doc.get_page(page).get_layer(layer);
        draw_page(&layer, &fonts, &rows);
    }

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer).map_err(render_error)?;
        writer
            .flush()
            .map_err(|e| ExpenseError::Report(e.to_string()))?;
    }
    Ok(bytes)
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, rows: &[PlacedRow]) {
    layer.set_outline_color(black());
    layer.set_outline_thickness(GRID_THICKNESS);

    for row in rows {
        let (fill, ink, font) = if row.header {
            (grey(), white_smoke(), &fonts.bold)
        } else {
            (beige(), black(), &fonts.regular)
        };

        for cell in &row.cells {
            layer.set_fill_color(fill.clone());
            let rect = Rect::new(
                mm(cell.left),
                mm(row.bottom),
                mm(cell.left + cell.width),
                mm(row.bottom + row.height),
            )
            .with_mode(PaintMode::FillStroke);
            layer.add_rect(rect);

            layer.set_fill_color(ink.clone());
            layer.use_text(cell.text.clone(), cell.font_size, mm(cell.x), mm(cell.baseline), font);
        }
    }
}

fn place_cell(
    raw: &str,
    left: f32,
    bottom: f32,
    width: f32,
    height: f32,
    column: usize,
    header: bool,
) -> PlacedCell {
    let base_size = if header { HEADER_FONT_SIZE } else { BODY_FONT_SIZE };
    let available = width - 2.0 * CELL_PADDING;
    let encoded = encode_for_builtin_font(raw).0;

    let (text, font_size) = if COLUMNS[column].truncate && !header {
        (fit_text(&encoded, available, base_size, header), base_size)
    } else {
        let size = shrink_to_fit(&encoded, available, base_size, header);
        (encoded.into_owned(), size)
    };

    let run_width = text_width(&text, font_size, header);
    let x = match COLUMNS[column].align {
        Alignment::Center => left + (width - run_width) / 2.0,
        Alignment::Right => left + width - CELL_PADDING - run_width,
    };
    let baseline = bottom + (height - CAP_HEIGHT * font_size) / 2.0;

    PlacedCell {
        left,
        width,
        text,
        font_size,
        x,
        baseline,
    }
}

/// Font size at which `text` fits `max_width` points
///
/// Never larger than `font_size` nor smaller than the minimum size; text
/// still too wide at the minimum overflows its cell.
pub fn shrink_to_fit(text: &str, max_width: f32, font_size: f32, bold: bool) -> f32 {
    let natural = text_width(text, font_size, bold);
    if natural <= max_width || natural <= 0.0 {
        return font_size;
    }
    (font_size * max_width / natural).max(MIN_FONT_SIZE)
}

/// Cut text with an ellipsis so it fits `max_width` points
pub fn fit_text(text: &str, max_width: f32, font_size: f32, bold: bool) -> String {
    if text_width(text, font_size, bold) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = text_width("...", font_size, bold);
    let mut fitted = String::new();
    let mut used = 0.0;
    for c in text.chars() {
        let w = char_width(c, bold) * font_size / 1000.0;
        if used + w + ellipsis_width > max_width {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.push_str("...");
    fitted
}

/// Make text showable in the built-in fonts
///
/// Returns the text with unsupported characters replaced by `?`, and how
/// many were replaced. Control whitespace becomes a plain space.
pub fn encode_for_builtin_font(text: &str) -> (Cow<'_, str>, usize) {
    if text.chars().all(is_latin1_printable) {
        return (Cow::Borrowed(text), 0);
    }

    let mut replaced = 0;
    let encoded = text
        .chars()
        .map(|c| {
            if is_latin1_printable(c) {
                c
            } else if c.is_whitespace() {
                ' '
            } else {
                replaced += 1;
                REPLACEMENT_CHAR
            }
        })
        .collect();
    (Cow::Owned(encoded), replaced)
}

fn is_latin1_printable(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF)
}

/// Approximate Helvetica advance width of `text` in points
pub fn text_width(text: &str, font_size: f32, bold: bool) -> f32 {
    text.chars().map(|c| char_width(c, bold)).sum::<f32>() * font_size / 1000.0
}

/// Helvetica glyph widths in thousandths of an em, grouped by shape
fn char_width(c: char, bold: bool) -> f32 {
    let regular = match c {
        'i' | 'j' | 'l' | '\'' | '|' => 222.0,
        ' ' | '.' | ',' | ':' | ';' | '!' | '/' | 'I' | 'f' | 't' | '[' | ']' => 278.0,
        'r' | '-' | '(' | ')' => 333.0,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500.0,
        'm' => 833.0,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722.0,
        'G' | 'O' | 'Q' => 778.0,
        'M' => 833.0,
        'W' => 944.0,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667.0,
        'F' | 'T' | 'Z' => 611.0,
        'L' => 556.0,
        '%' => 889.0,
        _ => 556.0,
    };
    if bold {
        regular * 1.06
    } else {
        regular
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn grey() -> Color {
    rgb(0.502, 0.502, 0.502)
}

fn white_smoke() -> Color {
    rgb(0.961, 0.961, 0.961)
}

fn beige() -> Color {
    rgb(0.961, 0.961, 0.863)
}

fn black() -> Color {
    rgb(0.0, 0.0, 0.0)
}

fn render_error(e: printpdf::Error) -> ExpenseError {
    ExpenseError::Report(format!("Could not render PDF: {}", e))
}
