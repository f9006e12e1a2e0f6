use crate::bus::ScrollMetrics;

/// How far down the page the reader is, in percent.
///
/// Pages without scrollable content report 0.
pub fn progress_percent(metrics: &ScrollMetrics) -> f64 {
    let scrollable = metrics.scroll_height - metrics.viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    let percent = metrics.scroll_y / scrollable * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(scroll_y: f64) -> ScrollMetrics {
        ScrollMetrics { scroll_y, scroll_height: 3000.0, viewport_height: 1000.0 }
    }

    #[test]
    fn endpoints() {
        assert_eq!(progress_percent(&at(0.0)), 0.0);
        assert_eq!(progress_percent(&at(1000.0)), 50.0);
        assert_eq!(progress_percent(&at(2000.0)), 100.0);
    }

    #[test]
    fn monotonic_and_bounded() {
        let mut last = 0.0;
        for y in (0..=2200).step_by(37) {
            let p = progress_percent(&at(y as f64));
            assert!(p >= last);
            assert!((0.0..=100.0).contains(&p));
            last = p;
        }
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(progress_percent(&at(-40.0)), 0.0);
        assert_eq!(progress_percent(&at(2100.0)), 100.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        let metrics = ScrollMetrics { scroll_y: 0.0, scroll_height: 800.0, viewport_height: 800.0 };
        assert_eq!(progress_percent(&metrics), 0.0);
        let metrics = ScrollMetrics { scroll_y: 10.0, scroll_height: 600.0, viewport_height: 800.0 };
        assert_eq!(progress_percent(&metrics), 0.0);
    }
}
