//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{ImageBuffer, Rgba};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use wavetile::algorithm::selection::SamplingStrategy;
    use wavetile::io::cli::{Cli, Command, FileProcessor, ImageArgs};
    use wavetile::io::configuration::{
        DEFAULT_CELL_COUNT, DEFAULT_OUTPUT_COUNT, DEFAULT_PATTERN_SIZE, DEFAULT_SEED,
    };

    fn parse_image_args(args: &[&str]) -> ImageArgs {
        let mut full = vec!["wavetile", "image"];
        full.extend_from_slice(args);
        match Cli::parse_from(full).command {
            Command::Image(image_args) => image_args,
            Command::Text(_) => unreachable!("Expected image subcommand"),
        }
    }

    fn write_solid_png(path: &Path) {
        let img = ImageBuffer::from_pixel(4, 4, Rgba([255u8, 0, 0, 255]));
        img.save(path).expect("Failed to save sample");
    }

    // Tests text parsing with only the required sample argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_text_minimal() {
        let cli = Cli::parse_from(["wavetile", "text", "AAB"]);

        let Command::Text(args) = cli.command else {
            unreachable!("Expected text subcommand");
        };
        assert_eq!(args.sample, "AAB");
        assert_eq!(args.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(args.cells, DEFAULT_CELL_COUNT);
        assert_eq!(args.count, DEFAULT_OUTPUT_COUNT);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert!(!args.weighted);
    }

    // Tests text parsing with all available arguments
    // Verified by changing flag definitions to ensure they're bound
    #[test]
    fn test_cli_parse_text_all_args() {
        let cli = Cli::parse_from([
            "wavetile",
            "text",
            "XYZZY",
            "--pattern-size",
            "3",
            "--cells",
            "12",
            "--count",
            "4",
            "--seed",
            "123",
            "--weighted",
        ]);

        let Command::Text(args) = cli.command else {
            unreachable!("Expected text subcommand");
        };
        assert_eq!(args.sample, "XYZZY");
        assert_eq!(args.pattern_size, 3);
        assert_eq!(args.cells, 12);
        assert_eq!(args.count, 4);
        assert_eq!(args.seed, 123);
        assert!(args.weighted);
    }

    // Tests the weighted flag selects the sampling strategy
    // Verified by inverting the flag in the sampling method
    #[test]
    fn test_text_sampling_strategy() {
        let cli = Cli::parse_from(["wavetile", "text", "AB", "-w"]);
        let Command::Text(weighted) = cli.command else {
            unreachable!("Expected text subcommand");
        };
        assert_eq!(weighted.sampling(), SamplingStrategy::FrequencyWeighted);

        let cli = Cli::parse_from(["wavetile", "text", "AB"]);
        let Command::Text(uniform) = cli.command else {
            unreachable!("Expected text subcommand");
        };
        assert_eq!(uniform.sampling(), SamplingStrategy::Uniform);
    }

    // Tests image parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_image_minimal() {
        let args = parse_image_args(&["test.png"]);

        assert_eq!(args.target, PathBuf::from("test.png"));
        assert_eq!(args.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(args.cells, DEFAULT_CELL_COUNT);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert!(!args.weighted);
        assert!(!args.rotate);
        assert!(!args.mirror);
        assert!(!args.visualize);
        assert!(!args.quiet);
    }

    // Tests image short flag parsing
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_parse_image_short_flags() {
        let args = parse_image_args(&[
            "input.png",
            "-s",
            "999",
            "-c",
            "12",
            "-n",
            "3",
            "-r",
            "-m",
            "-v",
            "-q",
        ]);

        assert_eq!(args.seed, 999);
        assert_eq!(args.cells, 12);
        assert_eq!(args.pattern_size, 3);
        assert!(args.rotate);
        assert!(args.mirror);
        assert!(args.visualize);
        assert!(args.quiet);
    }

    // Tests file skip behavior based on --no-skip flag
    // Verified by inverting boolean logic in skip_existing method
    #[test]
    fn test_skip_existing_logic() {
        let args_default = parse_image_args(&["test.png"]);
        assert!(args_default.skip_existing());

        let args_no_skip = parse_image_args(&["test.png", "--no-skip"]);
        assert!(!args_no_skip.skip_existing());
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        let args_default = parse_image_args(&["test.png"]);
        assert!(args_default.should_show_progress());

        let args_quiet = parse_image_args(&["test.png", "--quiet"]);
        assert!(!args_quiet.should_show_progress());
    }

    // Tests error handling for missing files
    // Verified by removing error return for nonexistent files
    #[test]
    fn test_process_nonexistent_file() {
        let args = parse_image_args(&["nonexistent.png", "-q"]);
        let mut processor = FileProcessor::new(args);

        let result = processor.process();
        assert!(result.is_err());
    }

    // Tests error handling for non-PNG files
    // Verified by removing file type validation
    #[test]
    fn test_process_invalid_file_type() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let txt_file = temp_dir.path().join("test.txt");
        fs::write(&txt_file, "not a png").expect("Failed to write file");

        let args = parse_image_args(&[txt_file.to_str().expect("Failed to convert path"), "-q"]);
        let mut processor = FileProcessor::new(args);

        let result = processor.process();
        assert!(result.is_err());
    }

    // Tests oversized cell counts are rejected before touching files
    // Verified by validating after file collection
    #[test]
    fn test_process_cells_limit() {
        let args = parse_image_args(&["nonexistent.png", "-c", "1001", "-q"]);
        let mut processor = FileProcessor::new(args);

        let result = processor.process();
        let error = result.expect_err("Expected cell validation error");
        assert!(error.to_string().contains("cells"));
    }

    // Tests skip logic when output file exists
    // Verified by removing skip check
    #[test]
    fn test_skip_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input_file = temp_dir.path().join("test.png");
        let output_file = temp_dir.path().join("test_result.png");

        fs::write(&input_file, "fake png").expect("Failed to write file");
        fs::write(&output_file, "fake png").expect("Failed to write file");

        let args = parse_image_args(&[input_file.to_str().expect("Failed to convert path"), "-q"]);
        let mut processor = FileProcessor::new(args);

        let result = processor.process();
        assert!(result.is_ok());
    }

    // Tests processing empty directories
    // Verified by adding error for empty directories
    #[test]
    fn test_process_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let args =
            parse_image_args(&[temp_dir.path().to_str().expect("Failed to convert path"), "-q"]);
        let mut processor = FileProcessor::new(args);

        let result = processor.process();
        assert!(result.is_ok());
    }

    // Tests output filename generation with suffix
    // Verified by changing output suffix to verify path generation
    #[test]
    fn test_output_path_generation() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input_file = temp_dir.path().join("test_image.png");
        write_solid_png(&input_file);

        let args = parse_image_args(&[
            input_file.to_str().expect("Failed to convert path"),
            "-c",
            "3",
            "-q",
        ]);
        let mut processor = FileProcessor::new(args);
        processor.process().expect("Failed to process");

        let output_file = temp_dir.path().join("test_image_result.png");
        assert!(output_file.exists(), "Output should use the result suffix");

        let wrong_output = temp_dir.path().join("test_image_output.png");
        assert!(
            !wrong_output.exists(),
            "Should not create file with wrong suffix"
        );
    }

    // Tests a full generation run over a real sample file
    // Verified by corrupting the assembled labels before export
    #[test]
    fn test_process_real_sample() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input_file = temp_dir.path().join("solid.png");
        write_solid_png(&input_file);

        let args = parse_image_args(&[
            input_file.to_str().expect("Failed to convert path"),
            "-c",
            "3",
            "-q",
        ]);
        let mut processor = FileProcessor::new(args);
        processor.process().expect("Failed to process");

        let output_file = temp_dir.path().join("solid_result.png");
        let reloaded = image::open(&output_file).expect("Failed to reload output");
        let rgba = reloaded.to_rgba8();

        // Three cells of 2x2 patterns tile a 6x6 output
        assert_eq!(rgba.dimensions(), (6, 6));
        for pixel in rgba.pixels() {
            assert_eq!(pixel.0, [255, 0, 0, 255]);
        }
    }

    // Tests the visualize flag writes a collapse animation
    // Verified by removing the recorder export call
    #[test]
    fn test_process_visualize_writes_gif() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input_file = temp_dir.path().join("solid.png");
        write_solid_png(&input_file);

        let args = parse_image_args(&[
            input_file.to_str().expect("Failed to convert path"),
            "-c",
            "3",
            "-q",
            "-v",
        ]);
        let mut processor = FileProcessor::new(args);
        processor.process().expect("Failed to process");

        let animation_file = temp_dir.path().join("solid_collapse.gif");
        assert!(animation_file.exists(), "Animation should be exported");
    }

    // Tests directory targets process every PNG inside
    // Verified by stopping after the first directory entry
    #[test]
    fn test_process_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_solid_png(&temp_dir.path().join("first.png"));
        write_solid_png(&temp_dir.path().join("second.png"));
        fs::write(temp_dir.path().join("notes.txt"), "ignored").expect("Failed to write file");

        let args = parse_image_args(&[
            temp_dir.path().to_str().expect("Failed to convert path"),
            "-c",
            "3",
            "-q",
        ]);
        let mut processor = FileProcessor::new(args);
        processor.process().expect("Failed to process");

        assert!(temp_dir.path().join("first_result.png").exists());
        assert!(temp_dir.path().join("second_result.png").exists());
        assert!(!temp_dir.path().join("notes_result.txt").exists());
    }
}
