//! Command-line interface for string and image generation

use crate::algorithm::assembly::assemble_grid;
use crate::algorithm::executor::{
    Solver, SolverConfig, StepOutcome, generate_sequence_with, validate_wave_cells,
};
use crate::algorithm::selection::SamplingStrategy;
use crate::analysis::model::Model;
use crate::analysis::patterns::PatternTransforms;
use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_CELL_COUNT, DEFAULT_OUTPUT_COUNT, DEFAULT_PATTERN_SIZE, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, WithContext, configuration_error};
use crate::io::image::{PixelGrid, export_labels_as_png};
use crate::io::progress::ProgressManager;
use crate::io::text::{parse_sample, render_sequence};
use crate::io::visualization::CollapseRecorder;
use crate::spatial::topology::Topology;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate strings and images with wave function collapse"
)]
/// Command-line arguments for the generation tool
pub struct Cli {
    /// Generation mode
    #[command(subcommand)]
    pub command: Command,
}

/// Available generation modes
#[derive(Subcommand)]
pub enum Command {
    /// Generate strings from a sample string
    Text(TextArgs),
    /// Generate PNG images from sample images
    Image(ImageArgs),
}

/// Arguments for the text generation subcommand
#[derive(Args)]
pub struct TextArgs {
    /// Sample string to learn adjacencies from
    #[arg(value_name = "SAMPLE")]
    pub sample: String,

    /// Length of extracted patterns in symbols
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Number of wave cells in the output ring
    #[arg(short, long, default_value_t = DEFAULT_CELL_COUNT)]
    pub cells: usize,

    /// Number of strings to generate
    #[arg(short = 'k', long, default_value_t = DEFAULT_OUTPUT_COUNT)]
    pub count: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Bias observation towards frequent patterns
    #[arg(short, long)]
    pub weighted: bool,
}

impl TextArgs {
    /// Sampling strategy selected by the weighted flag
    pub const fn sampling(&self) -> SamplingStrategy {
        if self.weighted {
            SamplingStrategy::FrequencyWeighted
        } else {
            SamplingStrategy::Uniform
        }
    }
}

#[derive(Args)]
/// Arguments for the image generation subcommand
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct ImageArgs {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Side length of extracted patterns in pixels
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Output rows and columns in wave cells
    #[arg(short, long, default_value_t = DEFAULT_CELL_COUNT)]
    pub cells: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Bias observation towards frequent patterns
    #[arg(short, long)]
    pub weighted: bool,

    /// Include rotated copies of each pattern (90°, 180°, 270°)
    #[arg(short = 'r', long)]
    pub rotate: bool,

    /// Include mirrored copies of each pattern (horizontal reflection)
    #[arg(short = 'm', long)]
    pub mirror: bool,

    /// Record the collapse as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl ImageArgs {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Sampling strategy selected by the weighted flag
    pub const fn sampling(&self) -> SamplingStrategy {
        if self.weighted {
            SamplingStrategy::FrequencyWeighted
        } else {
            SamplingStrategy::Uniform
        }
    }
}

/// Execute the parsed command line
///
/// # Errors
///
/// Returns an error if model construction, generation, or any file
/// operation fails
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Text(args) => run_text(&args),
        Command::Image(args) => FileProcessor::new(args).process(),
    }
}

// Generated strings are the program output
#[allow(clippy::print_stdout)]
fn run_text(args: &TextArgs) -> Result<()> {
    let symbols = parse_sample(&args.sample);
    let model = Model::from_sequence(&symbols, args.pattern_size)?;
    let config = SolverConfig {
        sampling: args.sampling(),
        ..SolverConfig::default()
    };

    // Derived seeds keep each output independently reproducible
    for index in 0..args.count {
        let seed = args.seed.wrapping_add(index as u64);
        let output = generate_sequence_with(&model, args.cells, seed, config)?;
        println!("{}", render_sequence(&output));
    }

    Ok(())
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    args: ImageArgs,
    progress: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given image arguments
    pub fn new(args: ImageArgs) -> Self {
        let progress = args.should_show_progress().then(ProgressManager::new);

        Self { args, progress }
    }

    /// Process files according to the image arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, model construction,
    /// generation, or any file operation fails
    pub fn process(&mut self) -> Result<()> {
        validate_wave_cells(self.args.cells.saturating_mul(self.args.cells))?;

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.args.target.is_file() {
            if self.args.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.args.target) {
                    Ok(vec![self.args.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(configuration_error(
                    "target",
                    &self.args.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.args.target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(&self.args.target)
                .with_operation("read directory")
                .with_path(&self.args.target)?;
            for entry in entries {
                let path = entry
                    .with_operation("read directory entry")
                    .with_path(&self.args.target)?
                    .path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(configuration_error(
                "target",
                &self.args.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.args.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for skip messages
            #[allow(clippy::print_stderr)]
            if !self.args.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let output_path = Self::output_path(input_path);

        let sample = PixelGrid::from_png_file(input_path)?;
        let transforms = PatternTransforms {
            rotations: self.args.rotate,
            reflections: self.args.mirror,
        };
        let model =
            Model::from_grid_with_transforms(sample.labels(), self.args.pattern_size, transforms)?;

        let config = SolverConfig {
            sampling: self.args.sampling(),
            ..SolverConfig::default()
        };
        let topology = Topology::Grid {
            rows: self.args.cells,
            cols: self.args.cells,
        };
        let mut solver = Solver::new(
            model.adjacency(),
            model.catalog().frequencies(),
            topology,
            config,
            self.args.seed,
        );

        if let Some(ref mut pm) = self.progress {
            pm.start_run(index, input_path, solver.attempt_budget());
        }

        let mut recorder = self.args.visualize.then(|| {
            CollapseRecorder::new(self.args.cells, self.args.cells, sample.palette().to_vec())
        });

        loop {
            let outcome = solver.step()?;

            if let Some(ref mut recorder) = recorder {
                recorder.record_step(solver.wave(), model.catalog());
            }
            if let Some(ref mut pm) = self.progress {
                pm.update_attempts(index, solver.attempts());
            }

            if outcome == StepOutcome::Collapsed {
                break;
            }
        }

        let labels = assemble_grid(solver.wave(), model.catalog())?;
        export_labels_as_png(&labels, sample.palette(), &output_path)?;

        if let Some(ref recorder) = recorder {
            recorder.export_gif(&Self::animation_path(input_path), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut pm) = self.progress {
            pm.complete_run(index);
        }

        Ok(())
    }

    fn output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn animation_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let animation_name = format!("{}{}.gif", stem.to_string_lossy(), ANIMATION_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(animation_name)
        } else {
            PathBuf::from(animation_name)
        }
    }
}
