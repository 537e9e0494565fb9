//! Unit tests for the widget renderer.
//!
//! Assertions run against the plain-text serialization so they stay
//! independent of ANSI escape handling.

use ptdash::services::layout_engine::{allocate, COLUMN_SPACING, TOTAL_WIDTH};
use ptdash::services::renderer::{
    build_error_widget, build_login_prompt, build_site_widget, build_subscription_widget,
    push_refresh_footer, truncate_name,
};
use ptdash::types::settings::DisplayConfig;
use ptdash::types::snapshot::{SiteRow, StatSnapshot, SubscriptionSnapshot};

fn site(name: &str) -> SiteRow {
    SiteRow {
        name: name.to_string(),
        level: "精英".to_string(),
        upload: "1.2 TB".to_string(),
        download: "800 GB".to_string(),
        ratio: "1.54".to_string(),
        bonus: "12345.6".to_string(),
        seeds: "42".to_string(),
        size: "500 GB".to_string(),
    }
}

fn snapshot(sites: Vec<SiteRow>) -> StatSnapshot {
    StatSnapshot {
        upload: "10.5 TB".to_string(),
        download: "3.2 TB".to_string(),
        seed_count: "412".to_string(),
        seed_size: "18.7 TB".to_string(),
        sites,
    }
}

#[test]
fn test_site_widget_shows_totals_and_rows() {
    let display = DisplayConfig::default();
    let widths = allocate(display, TOTAL_WIDTH, COLUMN_SPACING);
    let widget = build_site_widget(&snapshot(vec![site("OpenCD")]), display, widths);

    let text = widget.to_plain_text();
    assert!(text.contains("↑10.5 TB"));
    assert!(text.contains("↓3.2 TB"));
    assert!(text.contains("OpenCD"));
    assert!(text.contains("1.2 TB"));
    assert!(text.contains("500 GB"));
}

#[test]
fn test_site_widget_header_follows_display_config() {
    let all = DisplayConfig::default();
    let widths = allocate(all, TOTAL_WIDTH, COLUMN_SPACING);
    let text = build_site_widget(&snapshot(vec![]), all, widths).to_plain_text();
    assert!(text.contains("魔力"));
    assert!(text.contains("种数"));

    let bare = DisplayConfig {
        show_bonus: false,
        show_seeds: false,
    };
    let widths = allocate(bare, TOTAL_WIDTH, COLUMN_SPACING);
    let text = build_site_widget(&snapshot(vec![]), bare, widths).to_plain_text();
    assert!(!text.contains("魔力"));
    assert!(!text.contains("种数"));
    assert!(text.contains("站点"));
    assert!(text.contains("体积"));
}

#[test]
fn test_site_widget_empty_site_list_renders_notice() {
    let display = DisplayConfig::default();
    let widths = allocate(display, TOTAL_WIDTH, COLUMN_SPACING);
    let text = build_site_widget(&snapshot(vec![]), display, widths).to_plain_text();
    assert!(text.contains("暂无站点数据"));
}

#[test]
fn test_long_site_names_are_truncated_in_rows() {
    let display = DisplayConfig::default();
    let widths = allocate(display, TOTAL_WIDTH, COLUMN_SPACING);
    let widget = build_site_widget(
        &snapshot(vec![site("VeryLongTrackerName")]),
        display,
        widths,
    );

    let text = widget.to_plain_text();
    assert!(!text.contains("VeryLongTrackerName"));
    assert!(text.contains("VeryLon…"));
}

#[test]
fn test_truncate_name_boundaries() {
    assert_eq!(truncate_name("OpenCD"), "OpenCD");
    assert_eq!(truncate_name("Exactly8"), "Exactly8");
    assert_eq!(truncate_name("NineChars"), "NineCha…");
    // Counts characters, not bytes.
    assert_eq!(truncate_name("馒头站"), "馒头站");
}

#[test]
fn test_subscription_widget_contents() {
    let widget = build_subscription_widget(&SubscriptionSnapshot {
        plan_name: "年付套餐".to_string(),
        used_bytes: 50 * 1024 * 1024 * 1024,
        total_bytes: 100 * 1024 * 1024 * 1024,
        reset_day: Some(12),
        used_fraction: 0.5,
    });

    let text = widget.to_plain_text();
    assert!(text.contains("年付套餐"));
    assert!(text.contains("距离到期还有 12 天"));
    assert!(text.contains("已用 50.00GB / 总计 100.00GB"));

    // Half-used plan fills roughly half the 27-character bar.
    let filled = text.matches('█').count();
    assert!((13..=14).contains(&filled));
    assert_eq!(filled + text.matches('░').count(), 27);
}

#[test]
fn test_subscription_widget_without_reset_day() {
    let widget = build_subscription_widget(&SubscriptionSnapshot {
        plan_name: "长期".to_string(),
        used_bytes: 0,
        total_bytes: 1024,
        reset_day: None,
        used_fraction: 0.0,
    });

    let text = widget.to_plain_text();
    assert!(text.contains("该订阅长期有效"));
    assert_eq!(text.matches('█').count(), 0);
}

#[test]
fn test_login_prompt_and_error_widgets() {
    assert!(build_login_prompt().to_plain_text().contains("ptdash login"));

    let text = build_error_widget("HTTP 500: boom").to_plain_text();
    assert!(text.contains("数据获取失败"));
    assert!(text.contains("HTTP 500: boom"));
}

#[test]
fn test_refresh_footer_names_the_interval() {
    let mut widget = build_login_prompt();
    push_refresh_footer(&mut widget, 5);
    assert!(widget.to_plain_text().contains("每 5 分钟刷新"));
}

#[test]
fn test_render_ansi_carries_color_escapes() {
    // Test output is not a TTY; force coloring on for this assertion.
    colored::control::set_override(true);

    let display = DisplayConfig::default();
    let widths = allocate(display, TOTAL_WIDTH, COLUMN_SPACING);
    let widget = build_site_widget(&snapshot(vec![site("OpenCD")]), display, widths);

    let ansi = widget.render_ansi();
    assert!(ansi.contains("\u{1b}["));
    // Plain text is the same content minus the escapes.
    assert!(widget.to_plain_text().len() < ansi.len());
}
