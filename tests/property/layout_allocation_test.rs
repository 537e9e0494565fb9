//! Property-based tests for the column-width allocator.
//!
//! For any display configuration and widget width, the allocator must
//! never overflow the total when spare space exists, must never shrink a
//! column below its base width, and must be a pure function of its inputs.

use proptest::prelude::*;
use ptdash::services::layout_engine::{allocate, visible_columns, Column};
use ptdash::types::settings::DisplayConfig;

fn arb_display() -> impl Strategy<Value = DisplayConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(show_bonus, show_seeds)| DisplayConfig {
        show_bonus,
        show_seeds,
    })
}

/// The documented base-width table, re-stated here so a drift in the
/// allocator's constants fails a test.
fn base_width(column: Column, display: DisplayConfig) -> u32 {
    match column {
        Column::Site => 50,
        Column::Upload | Column::Download | Column::Size => 48,
        Column::Ratio => 38,
        Column::Bonus => {
            if display.show_bonus && !display.show_seeds {
                58
            } else {
                38
            }
        }
        Column::Seeds => 28,
    }
}

proptest! {
    /// When spare width exists, visible widths plus spacing never exceed
    /// the total.
    #[test]
    fn widths_fit_within_total_when_space_remains(
        display in arb_display(),
        total in 320u32..2000,
        spacing in 0u32..8,
    ) {
        let visible = visible_columns(display);
        let spacing_total = spacing * (visible.len() as u32 - 1);
        let base_total: u32 = visible.iter().map(|&c| base_width(c, display)).sum();
        prop_assume!(total.saturating_sub(spacing_total) > base_total);

        let widths = allocate(display, total, spacing);
        let sum: u32 = visible.iter().map(|&c| widths.get(c)).sum();
        prop_assert!(sum + spacing_total <= total);
    }

    /// When the bases already exceed the available width, every visible
    /// column keeps exactly its base width — no shrinking.
    #[test]
    fn overflow_keeps_base_widths(
        display in arb_display(),
        total in 0u32..250,
        spacing in 0u32..8,
    ) {
        let visible = visible_columns(display);
        let spacing_total = spacing * (visible.len() as u32 - 1);
        let base_total: u32 = visible.iter().map(|&c| base_width(c, display)).sum();
        prop_assume!(total.saturating_sub(spacing_total) <= base_total);

        let widths = allocate(display, total, spacing);
        for &column in &visible {
            prop_assert_eq!(widths.get(column), base_width(column, display));
        }
    }

    /// Visible columns never drop below base width; hidden columns are 0.
    #[test]
    fn visible_at_least_base_hidden_zero(
        display in arb_display(),
        total in 0u32..2000,
        spacing in 0u32..8,
    ) {
        let visible = visible_columns(display);
        let widths = allocate(display, total, spacing);

        for column in [
            Column::Site,
            Column::Upload,
            Column::Download,
            Column::Ratio,
            Column::Bonus,
            Column::Seeds,
            Column::Size,
        ] {
            if visible.contains(&column) {
                prop_assert!(widths.get(column) >= base_width(column, display));
            } else {
                prop_assert_eq!(widths.get(column), 0);
            }
        }
    }

    /// Pure function: the same inputs always produce the same widths.
    #[test]
    fn allocation_is_deterministic(
        display in arb_display(),
        total in 0u32..2000,
        spacing in 0u32..8,
    ) {
        prop_assert_eq!(
            allocate(display, total, spacing),
            allocate(display, total, spacing)
        );
    }
}
