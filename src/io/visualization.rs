//! Frame capture and GIF generation for collapse visualization

use crate::analysis::patterns::{BlockPattern, PatternCatalog};
use crate::io::error::{AlgorithmError, Result, configuration_error};
use crate::io::image::label_error;
use crate::spatial::wave::Wave;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// A single change to a cell's resolved label
///
/// `label` is `None` when the cell reverted to uncertain, which happens
/// after a contradiction rollback or a full restart.
#[derive(Debug, Clone)]
pub struct CellUpdate {
    /// Flat index of the changed cell
    pub cell: usize,
    /// Resolved label, or `None` for a reverted cell
    pub label: Option<usize>,
    /// Solver step that produced the change
    pub step: usize,
}

/// Captures per-step wave state for visualization
///
/// The recorder sits outside the solver and diffs the wave between steps,
/// storing one update per changed cell. Collapsed cells resolve to the
/// label of their pattern's top-left symbol; everything else renders as
/// the mean palette color.
pub struct CollapseRecorder {
    updates: Vec<CellUpdate>,
    current: Vec<Option<usize>>,
    steps: usize,
    rows: usize,
    cols: usize,
    palette: Vec<[u8; 4]>,
    uncertain_color: [u8; 4],
}

impl CollapseRecorder {
    /// The average of all palette colors is used as the uncertain color
    pub fn new(rows: usize, cols: usize, palette: Vec<[u8; 4]>) -> Self {
        let uncertain_color = if palette.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut r_sum = 0u32;
            let mut g_sum = 0u32;
            let mut b_sum = 0u32;
            let mut a_sum = 0u32;

            for color in &palette {
                r_sum += u32::from(color[0]);
                g_sum += u32::from(color[1]);
                b_sum += u32::from(color[2]);
                a_sum += u32::from(color[3]);
            }

            let count = palette.len() as u32;
            [
                (r_sum / count) as u8,
                (g_sum / count) as u8,
                (b_sum / count) as u8,
                (a_sum / count) as u8,
            ]
        };

        Self {
            updates: Vec::new(),
            current: vec![None; rows * cols],
            steps: 0,
            rows,
            cols,
            palette,
            uncertain_color,
        }
    }

    /// Diff the wave against the last recorded state and store the changes
    ///
    /// Call once after every solver step. Cells whose domain collapsed to a
    /// single pattern resolve to that pattern's top-left label; cells that
    /// regained uncertainty record a `None` update.
    pub fn record_step(&mut self, wave: &Wave, catalog: &PatternCatalog<BlockPattern<usize>>) {
        let step = self.steps;
        for cell in 0..self.current.len() {
            let label = wave
                .collapsed_pattern(cell)
                .and_then(|pattern| catalog.content(pattern))
                .and_then(|content| content.get(0, 0))
                .copied();

            let Some(slot) = self.current.get_mut(cell) else {
                continue;
            };
            if *slot != label {
                *slot = label;
                self.updates.push(CellUpdate { cell, label, step });
            }
        }
        self.steps += 1;
    }

    /// Returns all recorded cell updates
    pub fn updates(&self) -> &[CellUpdate] {
        &self.updates
    }

    /// Returns the number of solver steps recorded
    pub const fn step_count(&self) -> usize {
        self.steps
    }

    /// Export the captured steps as a GIF with automatic frame skipping
    ///
    /// Skips frames when the requested frame rate exceeds viewer
    /// capabilities. For example, if `GIF_FRAME_DELAY_MS` is 5ms (200 FPS)
    /// but viewers only support 20ms (50 FPS), this keeps every 4th frame
    /// to maintain the apparent animation speed. The final frame is held
    /// longer so the finished output stays visible.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No solver steps were recorded
    /// - A recorded label has no palette entry
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;

        if self.steps == 0 {
            return Err(configuration_error(
                "visualization",
                &output_path.display(),
                &"no collapse steps were recorded",
            ));
        }

        let delay = frame_delay_ms.max(1);
        let effective_delay_ms = delay.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if delay < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(delay) as usize
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Result<Vec<Frame>> {
        let mut state: Vec<Option<usize>> = vec![None; self.rows * self.cols];
        let mut frames = Vec::new();

        frames.push(self.render_frame(&state, delay_ms)?);

        let mut frame_count = 0;
        let mut index = 0;

        while let Some(first) = self.updates.get(index) {
            let step = first.step;
            while let Some(update) = self.updates.get(index) {
                if update.step != step {
                    break;
                }
                if let Some(slot) = state.get_mut(update.cell) {
                    *slot = update.label;
                }
                index += 1;
            }

            frame_count += 1;
            if frame_count % skip_factor == 0 {
                frames.push(self.render_frame(&state, delay_ms)?);
            }
        }

        if frame_count % skip_factor != 0 {
            frames.push(self.render_frame(&state, delay_ms)?);
        }

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            let final_frame_delay = delay_ms * 25;
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(final_frame_delay, 1),
            ));
        }

        Ok(frames)
    }

    fn render_frame(&self, state: &[Option<usize>], delay_ms: u32) -> Result<Frame> {
        let mut img = RgbaImage::new(self.cols as u32, self.rows as u32);

        for (cell, label) in state.iter().enumerate() {
            let color = match label {
                Some(index) => {
                    let rgba = self
                        .palette
                        .get(*index)
                        .copied()
                        .ok_or_else(|| label_error(*index, self.palette.len()))?;
                    Rgba(rgba)
                }
                None => Rgba(self.uncertain_color),
            };

            let row = (cell / self.cols) as u32;
            let col = (cell % self.cols) as u32;
            img.put_pixel(col, row, color);
        }

        Ok(Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1)))
    }
}
