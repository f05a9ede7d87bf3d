//! Board text formatting for gaps and lap times.

/// Format a signed gap in seconds.
///
/// Precise gaps show milliseconds (`+0.312`). Otherwise gaps under 15 s show
/// one decimal (`-1.2`) and larger ones round to whole seconds (`+23`). With
/// `arrows` the sign is replaced by the board's up/down arrow glyphs (`^`
/// gaining, `|` losing).
pub fn gap_to_str(seconds: f64, precise: bool, arrows: bool) -> String {
    let mut s = if precise {
        format!("{seconds:+.3}")
    } else if seconds > -15.0 && seconds < 15.0 {
        format!("{seconds:+.1}")
    } else {
        format!("{:+}", seconds.round() as i64)
    };

    if arrows {
        let arrow = if s.starts_with('+') { '^' } else { '|' };
        s.replace_range(0..1, &arrow.to_string());
    }

    s
}

/// Format a lap time in milliseconds as `m:ss.mmm`, or `m:ss` without millis.
pub fn lap_time_to_str(ms: i32, show_ms: bool) -> String {
    let ms = ms.max(0);
    let (secs, millis) = (ms / 1000, ms % 1000);
    let (mins, secs) = (secs / 60, secs % 60);

    if show_ms {
        format!("{mins}:{secs:02}.{millis:03}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precise_gap_shows_millis() {
        assert_eq!(gap_to_str(0.312, true, false), "+0.312");
        assert_eq!(gap_to_str(-1.05, true, false), "-1.050");
    }

    #[test]
    fn small_gap_one_decimal() {
        assert_eq!(gap_to_str(1.24, false, false), "+1.2");
        assert_eq!(gap_to_str(-0.26, false, false), "-0.3");
    }

    #[test]
    fn large_gap_whole_seconds() {
        assert_eq!(gap_to_str(23.7, false, false), "+24");
        assert_eq!(gap_to_str(-90.2, false, false), "-90");
    }

    #[test]
    fn arrows_replace_sign() {
        assert_eq!(gap_to_str(1.2, false, true), "^1.2");
        assert_eq!(gap_to_str(-1.2, false, true), "|1.2");
    }

    #[test]
    fn lap_time_formatting() {
        assert_eq!(lap_time_to_str(83_456, true), "1:23.456");
        assert_eq!(lap_time_to_str(83_456, false), "1:23");
        assert_eq!(lap_time_to_str(59_999, true), "0:59.999");
        assert_eq!(lap_time_to_str(3_600_000, false), "60:00");
    }
}
