//! Tests for algorithm configuration constants and validation

#[cfg(test)]
mod tests {
    use wavetile::io::configuration::{
        ANIMATION_SUFFIX, DEFAULT_ATTEMPT_FACTOR, DEFAULT_CELL_COUNT, DEFAULT_MAX_RESTARTS,
        DEFAULT_OUTPUT_COUNT, DEFAULT_PATTERN_SIZE, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
        MAX_INDIVIDUAL_PROGRESS_BARS, MAX_WAVE_CELLS, OUTPUT_SUFFIX, PROGRESS_BAR_WIDTH,
        VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests extraction defaults are correct
    // Verified by changing constant values
    #[test]
    fn test_extraction_defaults() {
        assert_eq!(DEFAULT_PATTERN_SIZE, 2);
        assert_eq!(DEFAULT_CELL_COUNT, 10);
    }

    // Tests retry policy defaults allow recovery before giving up
    // Verified by zeroing the restart allowance
    #[test]
    fn test_retry_policy_defaults() {
        assert_eq!(DEFAULT_ATTEMPT_FACTOR, 2);
        assert_eq!(DEFAULT_MAX_RESTARTS, 10);
        assert!(DEFAULT_MAX_RESTARTS > 0);
    }

    // Tests maximum wave cell count value
    // Verified by reducing the cell limit
    #[test]
    fn test_max_wave_cells() {
        assert_eq!(MAX_WAVE_CELLS, 1_000_000);
    }

    // Tests progress bar limit
    // Verified by increasing bar limit
    #[test]
    fn test_max_progress_bars_value() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
    }

    // Tests progress bar width
    // Verified by changing width value
    #[test]
    fn test_progress_bar_width() {
        assert_eq!(PROGRESS_BAR_WIDTH, 50);
    }

    // Tests default seed is fixed
    // Verified by changing seed value
    #[test]
    fn test_default_seed_is_reproducible() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests default output count
    // Verified by increasing the output count
    #[test]
    fn test_default_output_count() {
        assert_eq!(DEFAULT_OUTPUT_COUNT, 1);
    }

    // Tests output suffixes start with underscore
    // Verified by removing underscore prefix
    #[test]
    fn test_output_suffix_format() {
        assert!(OUTPUT_SUFFIX.starts_with('_'));
        assert!(!OUTPUT_SUFFIX.is_empty());
        assert!(ANIMATION_SUFFIX.starts_with('_'));
        assert_ne!(OUTPUT_SUFFIX, ANIMATION_SUFFIX);
    }

    // Tests filesystem safety of suffixes
    // Verified by adding special character
    #[test]
    fn test_output_suffix_no_special_chars() {
        for suffix in [OUTPUT_SUFFIX, ANIMATION_SUFFIX] {
            for ch in suffix.chars() {
                assert!(
                    ch.is_alphanumeric() || ch == '_' || ch == '-',
                    "Suffix contains invalid character: {ch}"
                );
            }
        }
    }

    // Tests GIF frame delay values
    // Verified by changing delay values
    #[test]
    fn test_gif_frame_delays() {
        assert_eq!(GIF_FRAME_DELAY_MS, 5);
        assert_eq!(VIEWER_MIN_FRAME_DELAY_MS, 50);
        assert!(GIF_FRAME_DELAY_MS < VIEWER_MIN_FRAME_DELAY_MS);
    }
}
