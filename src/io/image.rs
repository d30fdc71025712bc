//! PNG loading and export via palette-labelled grids

use crate::io::error::{AlgorithmError, Result, configuration_error};
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A sample image reduced to palette labels
///
/// Every distinct RGBA value becomes one palette entry; pixels are replaced
/// by the index of their color. Sorting the palette makes the labelling
/// deterministic, so identical samples always produce identical models.
pub struct PixelGrid {
    labels: Array2<usize>,
    palette: Vec<[u8; 4]>,
}

impl PixelGrid {
    /// Load a PNG file and reduce it to palette labels
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded as an image
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();
        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);

        let colors: HashSet<[u8; 4]> = rgba_img.pixels().map(|pixel| pixel.0).collect();

        // Deterministic color ordering keeps labels stable across runs
        let mut palette: Vec<[u8; 4]> = colors.into_iter().collect();
        palette.sort_unstable();

        let index: HashMap<[u8; 4], usize> = palette
            .iter()
            .enumerate()
            .map(|(label, &color)| (color, label))
            .collect();

        let mut labels = Array2::zeros((height, width));
        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            if let Some(&label) = index.get(&pixel.0) {
                if let Some(cell) = labels.get_mut((y as usize, x as usize)) {
                    *cell = label;
                }
            }
        }

        Ok(Self { labels, palette })
    }

    /// Labelled pixel data, one row per image row
    pub const fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    /// RGBA palette indexed by label
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Number of distinct colors in the sample
    pub const fn palette_size(&self) -> usize {
        self.palette.len()
    }
}

/// Export a labelled grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - A label has no palette entry
/// - The parent directory cannot be created
/// - The image cannot be saved to the given path
pub fn export_labels_as_png(
    labels: &Array2<usize>,
    palette: &[[u8; 4]],
    output_path: &Path,
) -> Result<()> {
    let (rows, cols) = labels.dim();
    let mut img = ImageBuffer::new(cols as u32, rows as u32);

    for ((row, col), &label) in labels.indexed_iter() {
        let rgba = palette
            .get(label)
            .copied()
            .ok_or_else(|| label_error(label, palette.len()))?;
        img.put_pixel(col as u32, row as u32, Rgba(rgba));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

pub(crate) fn label_error(label: usize, palette_size: usize) -> AlgorithmError {
    configuration_error(
        "palette",
        &label,
        &format!("label has no palette entry (palette holds {palette_size} colors)"),
    )
}
