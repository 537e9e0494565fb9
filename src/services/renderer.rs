//! Terminal rendering of the dashboard.
//!
//! Builds a small widget tree (styled spans grouped into lines) from a
//! parsed snapshot plus the computed column widths, then serializes it to
//! an ANSI-colored string. Dracula palette throughout. Every error kind
//! has a fallback widget so a render pass always produces output.

use colored::Colorize;

use crate::services::layout_engine::{visible_columns, Column, ColumnWidths};
use crate::types::settings::DisplayConfig;
use crate::types::snapshot::{SiteRow, StatSnapshot, SubscriptionSnapshot};

// Dracula palette.
pub const FOREGROUND: Rgb = Rgb(0xf8, 0xf8, 0xf2);
pub const COMMENT: Rgb = Rgb(0x62, 0x72, 0xa4);
pub const GREEN: Rgb = Rgb(0x50, 0xfa, 0x7b);
pub const RED: Rgb = Rgb(0xff, 0x55, 0x55);
pub const PURPLE: Rgb = Rgb(0xbd, 0x93, 0xf9);
pub const CYAN: Rgb = Rgb(0x8b, 0xe9, 0xfd);
pub const ORANGE: Rgb = Rgb(0xff, 0xb8, 0x6c);
pub const YELLOW: Rgb = Rgb(0xf1, 0xfa, 0x8c);
pub const PINK: Rgb = Rgb(0xff, 0x79, 0xc6);

/// Points-to-characters scale when mapping widget widths to a monospace
/// terminal. One column character per six layout points, minimum one.
const POINTS_PER_CHAR: u32 = 6;

/// Maximum site-name length before truncation.
const MAX_NAME_CHARS: usize = 8;

/// Progress bar width in characters.
const PROGRESS_BAR_CHARS: usize = 27;

/// Divider width in characters.
const DIVIDER_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One colored run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub color: Rgb,
}

impl Span {
    fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// One rendered line of spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

/// The built widget: a list of lines ready for serialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Widget {
    pub lines: Vec<Line>,
}

impl Widget {
    fn push_line(&mut self, spans: Vec<Span>) {
        self.lines.push(Line { spans });
    }

    fn push_blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Serializes the widget with ANSI truecolor escapes.
    pub fn render_ansi(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            for span in &line.spans {
                let Rgb(r, g, b) = span.color;
                out.push_str(&span.text.truecolor(r, g, b).to_string());
            }
            out.push('\n');
        }
        out
    }

    /// Serializes the widget without color, for assertions and piping.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            for span in &line.spans {
                out.push_str(&span.text);
            }
            out.push('\n');
        }
        out
    }
}

/// Builds the per-site statistics dashboard.
pub fn build_site_widget(
    snapshot: &StatSnapshot,
    display: DisplayConfig,
    widths: ColumnWidths,
) -> Widget {
    let mut widget = Widget::default();

    widget.push_line(vec![
        Span::new("PT站点数据统计  ", FOREGROUND),
        Span::new(format!("↑{}  ", snapshot.upload), GREEN),
        Span::new(format!("↓{}  ", snapshot.download), RED),
        Span::new(format!("📦{}  ", snapshot.seed_count), PURPLE),
        Span::new(format!("💾{}", snapshot.seed_size), CYAN),
    ]);
    widget.push_line(vec![divider_span()]);

    let columns = visible_columns(display);

    let header = columns
        .iter()
        .map(|&c| Span::new(pad_cell(column_title(c), char_width(widths.get(c))), PINK))
        .collect();
    widget.push_line(header);

    if snapshot.sites.is_empty() {
        widget.push_blank();
        widget.push_line(vec![Span::new("暂无站点数据", RED)]);
        return widget;
    }

    for site in &snapshot.sites {
        let row = columns
            .iter()
            .map(|&c| {
                Span::new(
                    pad_cell(&cell_value(site, c), char_width(widths.get(c))),
                    column_color(c),
                )
            })
            .collect();
        widget.push_line(row);
    }

    widget
}

/// Builds the subscription usage dashboard.
pub fn build_subscription_widget(snapshot: &SubscriptionSnapshot) -> Widget {
    let mut widget = Widget::default();

    widget.push_line(vec![Span::new("我的订阅", COMMENT)]);
    widget.push_blank();
    widget.push_line(vec![Span::new(snapshot.plan_name.clone(), CYAN)]);

    let reset_line = match snapshot.reset_day {
        Some(days) => format!("距离到期还有 {} 天", days),
        None => "该订阅长期有效".to_string(),
    };
    widget.push_line(vec![Span::new(reset_line, PINK)]);

    widget.push_line(vec![progress_bar_span(snapshot.used_fraction)]);
    widget.push_line(vec![Span::new(
        format!(
            "已用 {} / 总计 {}",
            snapshot.used_formatted(),
            snapshot.total_formatted()
        ),
        GREEN,
    )]);

    widget
}

/// Fallback widget shown when no credentials are stored.
pub fn build_login_prompt() -> Widget {
    let mut widget = Widget::default();
    widget.push_line(vec![Span::new("ptdash", FOREGROUND)]);
    widget.push_blank();
    widget.push_line(vec![Span::new(
        "未登录，请运行 ptdash login <用户名> <密码>",
        COMMENT,
    )]);
    widget
}

/// Fallback widget shown when a render pass fails.
pub fn build_error_widget(message: &str) -> Widget {
    let mut widget = Widget::default();
    widget.push_line(vec![Span::new("数据获取失败", RED)]);
    widget.push_line(vec![Span::new(message.to_string(), COMMENT)]);
    widget
}

/// Advisory refresh footer appended in preview mode.
pub fn push_refresh_footer(widget: &mut Widget, refresh_minutes: u32) {
    widget.push_blank();
    widget.push_line(vec![Span::new(
        format!("每 {} 分钟刷新", refresh_minutes),
        COMMENT,
    )]);
}

/// Truncates a site name to eight characters, appending an ellipsis.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(MAX_NAME_CHARS - 1).collect();
        format!("{}…", head)
    } else {
        name.to_string()
    }
}

fn divider_span() -> Span {
    Span::new("─".repeat(DIVIDER_CHARS), COMMENT)
}

fn progress_bar_span(fraction: f64) -> Span {
    let filled = (fraction.clamp(0.0, 1.0) * PROGRESS_BAR_CHARS as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(PROGRESS_BAR_CHARS - filled));
    Span::new(bar, PURPLE)
}

fn char_width(points: u32) -> usize {
    ((points / POINTS_PER_CHAR).max(1)) as usize
}

/// Pads a cell to its column width plus one space of gap. Values longer
/// than the column are kept whole — rows overflow rather than shrink.
fn pad_cell(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        format!("{} ", value)
    } else {
        format!("{}{} ", value, " ".repeat(width - len))
    }
}

fn column_title(column: Column) -> &'static str {
    match column {
        Column::Site => "站点",
        Column::Upload => "上传",
        Column::Download => "下载",
        Column::Ratio => "分享率",
        Column::Bonus => "魔力",
        Column::Seeds => "种数",
        Column::Size => "体积",
    }
}

fn column_color(column: Column) -> Rgb {
    match column {
        Column::Site => FOREGROUND,
        Column::Upload => GREEN,
        Column::Download => RED,
        Column::Ratio => ORANGE,
        Column::Bonus => PURPLE,
        Column::Seeds => CYAN,
        Column::Size => YELLOW,
    }
}

fn cell_value(site: &SiteRow, column: Column) -> String {
    match column {
        Column::Site => truncate_name(&site.name),
        Column::Upload => site.upload.clone(),
        Column::Download => site.download.clone(),
        Column::Ratio => site.ratio.clone(),
        Column::Bonus => site.bonus.clone(),
        Column::Seeds => site.seeds.clone(),
        Column::Size => site.size.clone(),
    }
}
