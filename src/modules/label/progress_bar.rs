use crate::core::models::{Options, ProgressBarVariant};

/// Renders the textual progress bar for `fraction` of the content played.
///
/// `fraction` is not clamped. Glyph counts that would go negative
/// (fraction above 1 or below 0) render as zero glyphs instead.
pub fn render_progress_bar(fraction: f64, options: &Options) -> String {
    let total = options.total_segments.max(1) as usize;
    let passed = options.passed_symbol.as_str();
    let remaining = options.remaining_symbol.as_str();

    match options.progress_bar_variant {
        ProgressBarVariant::Simple => simple(fraction, total, passed, remaining),
        ProgressBarVariant::NonTrailing => non_trailing(fraction, total, passed, remaining),
        ProgressBarVariant::Gradient => {
            gradient(fraction, total, passed, remaining, &options.gradient_symbol)
        }
    }
}

fn glyph_count(value: f64) -> usize {
    if value > 0.0 { value as usize } else { 0 }
}

fn simple(fraction: f64, total: usize, passed: &str, remaining: &str) -> String {
    let passed_count = glyph_count((fraction * total as f64).round());
    let remaining_count = total.saturating_sub(passed_count);

    format!("{}{}", passed.repeat(passed_count), remaining.repeat(remaining_count))
}

/// One marker glyph over `total - 1` slots.
fn non_trailing(fraction: f64, total: usize, marker: &str, remaining: &str) -> String {
    let slots = total - 1;
    let before = glyph_count((fraction * slots as f64).floor());
    let after = slots.saturating_sub(1).saturating_sub(before);

    format!("{}{}{}", remaining.repeat(before), marker, remaining.repeat(after))
}

fn gradient(fraction: f64, total: usize, passed: &str, remaining: &str, transition: &str) -> String {
    (0..total)
        .map(|i| {
            let lower = i as f64 / total as f64;
            let upper = (i + 1) as f64 / total as f64;
            if fraction >= upper {
                passed
            } else if fraction > lower {
                transition
            } else {
                remaining
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(variant: ProgressBarVariant, total_segments: u32) -> Options {
        Options {
            total_segments,
            passed_symbol: "#".to_string(),
            remaining_symbol: "-".to_string(),
            gradient_symbol: "~".to_string(),
            progress_bar_variant: variant,
            ..Options::default()
        }
    }

    // ── Simple ────────────────────────────────────────────────────────────────

    #[test]
    fn simple_rounds_half_up() {
        let bar = render_progress_bar(0.35, &options(ProgressBarVariant::Simple, 10));
        assert_eq!(bar, "####------");
    }

    #[test]
    fn simple_empty_and_full() {
        let opts = options(ProgressBarVariant::Simple, 5);
        assert_eq!(render_progress_bar(0.0, &opts), "-----");
        assert_eq!(render_progress_bar(1.0, &opts), "#####");
    }

    #[test]
    fn simple_overshoot_does_not_panic() {
        let bar = render_progress_bar(1.3, &options(ProgressBarVariant::Simple, 10));
        assert_eq!(bar, "#############");
    }

    #[test]
    fn simple_uses_default_block_glyphs() {
        let bar = render_progress_bar(0.5, &Options::default());
        assert_eq!(bar, "█████░░░░░");
    }

    // ── NonTrailing ───────────────────────────────────────────────────────────

    #[test]
    fn non_trailing_places_single_marker() {
        let bar = render_progress_bar(0.5, &options(ProgressBarVariant::NonTrailing, 5));
        assert_eq!(bar, "--#-");
        assert_eq!(bar.chars().count(), 4);
    }

    #[test]
    fn non_trailing_at_start() {
        let bar = render_progress_bar(0.0, &options(ProgressBarVariant::NonTrailing, 5));
        assert_eq!(bar, "#---");
    }

    #[test]
    fn non_trailing_with_one_segment_is_just_the_marker() {
        let bar = render_progress_bar(0.7, &options(ProgressBarVariant::NonTrailing, 1));
        assert_eq!(bar, "#");
    }

    // ── Gradient ──────────────────────────────────────────────────────────────

    #[test]
    fn gradient_marks_the_slot_being_crossed() {
        let bar = render_progress_bar(0.35, &options(ProgressBarVariant::Gradient, 10));
        assert_eq!(bar, "###~------");
    }

    #[test]
    fn gradient_on_boundary_has_no_transition_glyph() {
        let bar = render_progress_bar(0.5, &options(ProgressBarVariant::Gradient, 4));
        assert_eq!(bar, "##--");
    }

    #[test]
    fn gradient_has_at_most_one_transition_glyph() {
        let opts = options(ProgressBarVariant::Gradient, 7);
        for step in 0..=100 {
            let bar = render_progress_bar(step as f64 / 100.0, &opts);
            assert!(bar.matches('~').count() <= 1, "bar {} at {}%", bar, step);
            assert_eq!(bar.chars().count(), 7);
        }
    }

    #[test]
    fn zero_total_segments_is_treated_as_one() {
        let bar = render_progress_bar(1.0, &options(ProgressBarVariant::Simple, 0));
        assert_eq!(bar, "#");
    }
}
