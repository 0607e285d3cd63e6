// ============================================================
// Layer 6 — Text Visualisation
// ============================================================
// Renders run outputs without pulling in a plotting stack:
//
//   render_heatmap      — d × d table → ASCII density plot.
//                         Works for both the learned joint
//                         probability table and raw-data count
//                         grids: values are scaled by the table
//                         maximum, so only relative intensity
//                         matters.
//
//   render_train_curves — per-epoch train/test losses → rows of
//                         proportional bars, a terminal stand-in
//                         for a learning-curve chart.
//
//   count_grid          — samples → d × d occurrence counts,
//                         the discrete analogue of a scatter plot.
//
//   save_table_csv      — d × d table → CSV file, one row per x0,
//                         for anyone who wants a real plot later.
//
// Table convention everywhere in this module: flattened row-major
// with index = x0 * d + x1, i.e. rows are x0, columns are x1.
//
// Reference: Rust Book §8 (Strings and Vectors)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, io::Write, path::Path};

use crate::domain::sample::Sample;

/// Intensity ramp from empty to dense. Ten levels is plenty for
/// a terminal — finer gradations are indistinguishable anyway.
const SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Width of the loss bars in render_train_curves.
const CURVE_WIDTH: usize = 40;

/// Render a flattened d × d table as an ASCII heatmap.
///
/// Each cell is printed twice so the plot comes out roughly square
/// in a terminal font. Rows are labelled with their x0 value.
pub fn render_heatmap(table: &[f32], d: usize) -> String {
    debug_assert_eq!(table.len(), d * d);

    let max = table.iter().cloned().fold(0.0f32, f32::max);
    let mut out = String::with_capacity(d * (2 * d + 8));

    // Column header marks the x1 axis
    out.push_str("      x1 →\n");
    for x0 in 0..d {
        out.push_str(&format!("{x0:>4} |"));
        for x1 in 0..d {
            let v = table[x0 * d + x1];
            let level = if max > 0.0 {
                (((v / max) * (SHADES.len() - 1) as f32).round() as usize)
                    .min(SHADES.len() - 1)
            } else {
                0
            };
            let c = SHADES[level];
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Render the per-epoch losses as proportional horizontal bars,
/// one train row and one test row per epoch.
pub fn render_train_curves(train_losses: &[f64], test_losses: &[f64]) -> String {
    let max = train_losses
        .iter()
        .chain(test_losses.iter())
        .cloned()
        .fold(0.0f64, f64::max);

    let bar = |loss: f64| -> String {
        let len = if max > 0.0 {
            ((loss / max) * CURVE_WIDTH as f64).round() as usize
        } else {
            0
        };
        "#".repeat(len.min(CURVE_WIDTH))
    };

    let mut out = String::from("Training curve (loss per epoch):\n");
    for (i, (&tr, &te)) in train_losses.iter().zip(test_losses.iter()).enumerate() {
        out.push_str(&format!("epoch {:>3}  train {:>8.4} |{}\n", i + 1, tr, bar(tr)));
        out.push_str(&format!("           test  {:>8.4} |{}\n", te, bar(te)));
    }
    out
}

/// Count how often each (x0, x1) cell occurs in the samples.
/// Returns the flattened row-major d × d grid.
///
/// Samples are trusted to be in range — an out-of-range pair is a
/// caller bug and panics on the index.
pub fn count_grid(samples: &[Sample], d: usize) -> Vec<f32> {
    let mut counts = vec![0.0f32; d * d];
    for s in samples {
        counts[s.x0 * d + s.x1] += 1.0;
    }
    counts
}

/// Write a flattened d × d table to a CSV file, one row per x0 value.
pub fn save_table_csv(path: &Path, table: &[f32], d: usize) -> Result<()> {
    let mut f = fs::File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    for x0 in 0..d {
        let row: Vec<String> = (0..d)
            .map(|x1| format!("{:.8}", table[x0 * d + x1]))
            .collect();
        writeln!(f, "{}", row.join(","))?;
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_grid() {
        let samples = vec![
            Sample::new(0, 0),
            Sample::new(0, 0),
            Sample::new(1, 2),
        ];
        let grid = count_grid(&samples, 3);
        assert_eq!(grid[0], 2.0); // (0,0)
        assert_eq!(grid[5], 1.0); // (1,2) = 1*3+2
        assert_eq!(grid.iter().sum::<f32>(), 3.0);
    }

    #[test]
    fn test_heatmap_dimensions() {
        let table = vec![0.25f32; 16];
        let rendered = render_heatmap(&table, 4);
        // One header line plus one line per x0 row
        assert_eq!(rendered.lines().count(), 5);
        // Uniform table: every cell at maximum intensity
        assert!(rendered.contains("@@@@@@@@"));
    }

    #[test]
    fn test_heatmap_all_zero_table() {
        let table = vec![0.0f32; 9];
        // Must not divide by zero; cells render as blanks
        let rendered = render_heatmap(&table, 3);
        assert_eq!(rendered.lines().count(), 4);
    }

    #[test]
    fn test_train_curves_rows() {
        let rendered = render_train_curves(&[3.0, 2.0], &[2.9, 1.9]);
        // Header + two lines per epoch
        assert_eq!(rendered.lines().count(), 5);
        // The largest loss fills the full bar width
        assert!(rendered.contains(&"#".repeat(CURVE_WIDTH)));
    }

    #[test]
    fn test_save_table_csv_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("autoreg2d_table_test_{}.csv", std::process::id()));

        let table = vec![0.1f32, 0.2, 0.3, 0.4];
        save_table_csv(&path, &table, 2).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: Vec<f32> = contents
            .lines()
            .flat_map(|l| l.split(','))
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(parsed.len(), 4);
        for (a, b) in parsed.iter().zip(table.iter()) {
            assert!((a - b).abs() < 1e-6, "wrote {b}, read back {a}");
        }

        let _ = fs::remove_file(&path);
    }
}
