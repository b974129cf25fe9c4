//! Page composition and frame descriptors
//!
//! [`CalendarPage::compose`] runs the whole pipeline (grid, legend, image
//! placeholders) in the required order. [`CalendarPage::frames`] flattens
//! the result into positioned, styled frames in drawing order; that list is
//! everything a drawing backend needs.

use chrono::Datelike;
use serde::Serialize;

use super::holiday::HolidayInstance;
use super::layout::{layout, CalendarSpec, GridResult, PageGeometry, Rect};
use super::legend::{self, LegendLayout};
use super::style::{style_for, CellKind, CellStyle};

/// Switches for the optional parts of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub legend: bool,
    pub image_frames: bool,
    pub week_number_heading: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            legend: true,
            image_frames: false,
            week_number_heading: "Wk".to_string(),
        }
    }
}

/// One positioned frame for the drawing backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub rect: Rect,
    pub kind: CellKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub style: CellStyle,
}

impl Frame {
    fn new(rect: Rect, kind: CellKind, text: Option<String>) -> Self {
        Self {
            rect,
            kind,
            text,
            style: style_for(kind),
        }
    }
}

/// A fully laid-out calendar page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarPage {
    pub grid: GridResult,
    pub legend: Option<LegendLayout>,
    pub images: Vec<Rect>,
    #[serde(skip)]
    week_number_heading: String,
}

impl CalendarPage {
    /// Lays out the grid, then the legend, then the image placeholders
    pub fn compose(
        spec: &CalendarSpec,
        holidays: &[HolidayInstance],
        page: &PageGeometry,
        options: &PageOptions,
    ) -> Self {
        let grid = layout(spec, holidays, page, options.legend);
        let legend = options
            .legend
            .then(|| legend::build(&grid, holidays, page));
        let images = if options.image_frames {
            image_frames(page)
        } else {
            Vec::new()
        };

        Self {
            grid,
            legend,
            images,
            week_number_heading: options.week_number_heading.clone(),
        }
    }

    /// Text above the week-number column
    pub fn week_number_heading(&self) -> &str {
        &self.week_number_heading
    }

    /// All frames in drawing order
    pub fn frames(&self) -> Vec<Frame> {
        let spec = &self.grid.spec;
        let metrics = &self.grid.metrics;
        let day_offset = u32::from(spec.show_week_numbers());
        let letters = spec.first_weekday().letters();
        let mut frames = Vec::new();

        for month in &self.grid.months {
            frames.push(Frame::new(
                metrics.cell_rect(month.row_origin, month.col_origin, spec.month_columns()),
                CellKind::MonthHeading,
                Some(month.heading.clone()),
            ));

            let names_row = month.row_origin + 1;
            if spec.show_week_numbers() {
                frames.push(Frame::new(
                    metrics.cell_rect(names_row, month.col_origin, 1),
                    CellKind::WeekNumberHeading,
                    Some(self.week_number_heading.clone()),
                ));
            }
            for (pos, letter) in letters.iter().enumerate() {
                frames.push(Frame::new(
                    metrics.cell_rect(names_row, month.col_origin + day_offset + pos as u32, 1),
                    CellKind::WeekdayName,
                    Some((*letter).to_string()),
                ));
            }

            for week in &month.weeks {
                if let Some(col) = week.week_number_col {
                    frames.push(Frame::new(
                        metrics.cell_rect(week.row, col, 1),
                        CellKind::WeekNumber,
                        Some(week.iso_week.to_string()),
                    ));
                }
                for day in &week.days {
                    let text = day.in_month.then(|| day.date.day().to_string());
                    frames.push(Frame::new(
                        metrics.cell_rect(day.row, day.col, 1),
                        CellKind::Day(day.classification),
                        text,
                    ));
                }
            }
        }

        if let Some(legend) = &self.legend {
            let text = (!legend.lines.is_empty()).then(|| legend.lines.join("\n"));
            frames.push(Frame::new(legend.frame, CellKind::Legend, text));
        }

        for image in &self.images {
            frames.push(Frame::new(*image, CellKind::Image, None));
        }

        frames
    }
}

/// Placeholder frames for the offset areas left of and above the grid
pub fn image_frames(page: &PageGeometry) -> Vec<Rect> {
    let margins = page.margins();
    let mut frames = Vec::new();
    if page.offset_x() != 0.0 {
        frames.push(Rect::new(
            margins.left,
            margins.top,
            page.offset_x() - page.inner_margin_x(),
            page.usable_height(),
        ));
    }
    // The top frame starts right of the left one so they never overlap
    if page.offset_y() != 0.0 {
        frames.push(Rect::new(
            margins.left + page.offset_x(),
            margins.top,
            page.usable_width() - page.offset_x(),
            page.offset_y() - page.inner_margin_y(),
        ));
    }
    frames
}
