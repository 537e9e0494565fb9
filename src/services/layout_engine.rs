//! Column-width allocation for the site table.
//!
//! Pure arithmetic: given the display configuration, distribute the widget
//! width across the visible columns. Five columns are always shown; bonus
//! and seeds are gated by [`DisplayConfig`]. Base widths are guaranteed,
//! leftover space is handed out by priority weight. When the bases already
//! exceed the total width nothing shrinks — rows may overflow the nominal
//! width instead.

use crate::types::settings::DisplayConfig;

/// Nominal widget width in points.
pub const TOTAL_WIDTH: u32 = 290;

/// Gap between adjacent columns in points.
pub const COLUMN_SPACING: u32 = 3;

/// The table columns, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Site,
    Upload,
    Download,
    Ratio,
    Bonus,
    Seeds,
    Size,
}

/// Final width for every column; hidden columns carry 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub site: u32,
    pub upload: u32,
    pub download: u32,
    pub ratio: u32,
    pub bonus: u32,
    pub seeds: u32,
    pub size: u32,
}

impl ColumnWidths {
    /// Width for one column.
    pub fn get(&self, column: Column) -> u32 {
        match column {
            Column::Site => self.site,
            Column::Upload => self.upload,
            Column::Download => self.download,
            Column::Ratio => self.ratio,
            Column::Bonus => self.bonus,
            Column::Seeds => self.seeds,
            Column::Size => self.size,
        }
    }
}

/// Returns the visible column set for a display configuration, in render
/// order: the five mandatory columns plus bonus/seeds when enabled.
pub fn visible_columns(display: DisplayConfig) -> Vec<Column> {
    let mut columns = vec![
        Column::Site,
        Column::Upload,
        Column::Download,
        Column::Ratio,
    ];
    if display.show_bonus {
        columns.push(Column::Bonus);
    }
    if display.show_seeds {
        columns.push(Column::Seeds);
    }
    columns.push(Column::Size);
    columns
}

/// Guaranteed minimum width for a column. The bonus column widens when it
/// is the only optional column shown.
fn base_width(column: Column, display: DisplayConfig) -> u32 {
    match column {
        Column::Site => 50,
        Column::Upload => 48,
        Column::Download => 48,
        Column::Ratio => 38,
        Column::Bonus => {
            if display.show_bonus && !display.show_seeds {
                58
            } else {
                38
            }
        }
        Column::Seeds => 28,
        Column::Size => 48,
    }
}

/// Weight used when distributing leftover width. The site name gets the
/// most room; seeds the least; bonus is promoted when shown alone.
fn priority(column: Column, display: DisplayConfig) -> f64 {
    match column {
        Column::Site => 2.0,
        Column::Bonus => {
            if display.show_bonus && !display.show_seeds {
                2.0
            } else {
                1.2
            }
        }
        Column::Seeds => 1.0,
        _ => 1.2,
    }
}

/// Computes the width of every column for one render pass.
///
/// `available = total_width - spacing * (visible - 1)`; whatever exceeds
/// the summed base widths is split proportionally to each visible column's
/// priority weight, floored. If the bases already exceed the available
/// width every column keeps its base width.
pub fn allocate(display: DisplayConfig, total_width: u32, spacing: u32) -> ColumnWidths {
    let visible = visible_columns(display);

    let total_spacing = spacing * (visible.len() as u32 - 1);
    let available = total_width.saturating_sub(total_spacing);

    let base_total: u32 = visible.iter().map(|&c| base_width(c, display)).sum();
    let extra = available.saturating_sub(base_total);

    let total_priority: f64 = visible.iter().map(|&c| priority(c, display)).sum();

    let extra_for = |column: Column| -> u32 {
        ((extra as f64 * priority(column, display)) / total_priority).floor() as u32
    };

    let width_for = |column: Column| -> u32 {
        if visible.contains(&column) {
            base_width(column, display) + extra_for(column)
        } else {
            0
        }
    };

    ColumnWidths {
        site: width_for(Column::Site),
        upload: width_for(Column::Upload),
        download: width_for(Column::Download),
        ratio: width_for(Column::Ratio),
        bonus: width_for(Column::Bonus),
        seeds: width_for(Column::Seeds),
        size: width_for(Column::Size),
    }
}
