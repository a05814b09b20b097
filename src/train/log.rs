use std::io::{self, Write};

/// Rows of each chart drawn by [`plot_log`].
pub const PLOT_HEIGHT: usize = 10;
/// Maximum columns of each chart; longer series are averaged into buckets.
pub const PLOT_WIDTH: usize = 60;

/// Training losses (one per batch) and evaluation losses (one per evaluation).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingLog {
    pub losses: Vec<f64>,
    pub eval_losses: Vec<f64>,
}

impl TrainingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_losses(&mut self, losses: impl IntoIterator<Item = f64>) {
        self.losses.extend(losses);
    }

    pub fn push_eval_loss(&mut self, loss: f64) {
        self.eval_losses.push(loss);
    }

    pub fn format_log(&self, step: usize) -> String {
        format_log(step, &self.losses, &self.eval_losses)
    }

    pub fn print_log(&self, step: usize) {
        print_log(step, &self.losses, &self.eval_losses);
    }

    pub fn plot_log<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        plot_log(&self.losses, &self.eval_losses, writer)
    }
}

/// Latest training and evaluation losses, `none` for an empty series.
pub fn format_log(step: usize, losses: &[f64], eval_losses: &[f64]) -> String {
    let last = |xs: &[f64]| xs.last().map_or("none".to_string(), |x| x.to_string());
    format!(
        "Step {step}, loss {}, eval_loss {}",
        last(losses),
        last(eval_losses)
    )
}

pub fn print_log(step: usize, losses: &[f64], eval_losses: &[f64]) {
    println!("{}", format_log(step, losses, eval_losses));
}

/// Draws both series as log-scaled ASCII charts, training losses first.
///
/// Each chart is a title line, [`PLOT_HEIGHT`] rows and an axis line.
/// Non-positive and non-finite values cannot be drawn on a log scale and are skipped.
pub fn plot_log<W: Write>(losses: &[f64], eval_losses: &[f64], writer: &mut W) -> io::Result<()> {
    plot_semilogy("loss", losses, writer)?;
    plot_semilogy("eval_loss", eval_losses, writer)
}

fn plot_semilogy<W: Write>(title: &str, values: &[f64], writer: &mut W) -> io::Result<()> {
    let logs: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite() && **v > 0.)
        .map(|v| v.log10())
        .collect();
    writeln!(writer, "{title} ({} points)", logs.len())?;

    let columns = bucket_means(&logs, PLOT_WIDTH);
    let lo = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if columns.is_empty() { 0. } else { hi - lo };
    let level = |v: f64| {
        if span > 0. {
            ((v - lo) / span * (PLOT_HEIGHT - 1) as f64).round() as usize
        } else {
            0
        }
    };
    let levels: Vec<usize> = columns.iter().map(|v| level(*v)).collect();

    for row in (0..PLOT_HEIGHT).rev() {
        let label = if columns.is_empty() {
            String::new()
        } else {
            let v = lo + span * row as f64 / (PLOT_HEIGHT - 1) as f64;
            format!("{:.2e}", 10f64.powf(v))
        };
        let line: String = levels
            .iter()
            .map(|l| if *l == row { '*' } else { ' ' })
            .collect();
        writeln!(writer, "{label:>10} |{}", line.trim_end())?;
    }
    writeln!(writer, "{:>10} +{}", "", "-".repeat(columns.len()))
}

/// Averages `values` into at most `width` contiguous buckets.
fn bucket_means(values: &[f64], width: usize) -> Vec<f64> {
    let n = values.len();
    let width = width.min(n);
    (0..width)
        .map(|i| {
            let bucket = &values[i * n / width..(i + 1) * n / width];
            bucket.iter().sum::<f64>() / bucket.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_latest_losses() {
        let mut log = TrainingLog::new();
        log.extend_losses([3.0, 2.0, 1.5]);
        log.push_eval_loss(1.75);
        assert_eq!(log.format_log(4), "Step 4, loss 1.5, eval_loss 1.75");
    }

    #[test]
    fn formats_empty_series() {
        assert_eq!(format_log(0, &[], &[]), "Step 0, loss none, eval_loss none");
    }

    #[test]
    fn plot_has_one_line_per_row() {
        let losses: Vec<f64> = (1..=200).map(|i| 1.0 / i as f64).collect();
        let mut out = Vec::new();
        plot_log(&losses, &[0.5, 0.25], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 * (PLOT_HEIGHT + 2));
        assert_eq!(lines[0], "loss (200 points)");
        assert_eq!(lines[PLOT_HEIGHT + 2], "eval_loss (2 points)");
        // the axis is as wide as the widest chart
        assert!(lines[PLOT_HEIGHT + 1].ends_with(&"-".repeat(PLOT_WIDTH)));
    }

    #[test]
    fn decreasing_losses_descend() {
        let mut out = Vec::new();
        plot_semilogy("loss", &[100.0, 10.0, 1.0], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // top row holds the first point, bottom row the last
        assert!(lines[1].ends_with("|*"));
        assert!(lines[PLOT_HEIGHT].ends_with("|  *"));
        assert!(lines[1].trim_start().starts_with("1.00e2"));
    }

    #[test]
    fn skips_values_without_a_logarithm() {
        let mut out = Vec::new();
        plot_semilogy("loss", &[0.0, -1.0, f64::NAN], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("loss (0 points)"));
        assert_eq!(text.lines().count(), PLOT_HEIGHT + 2);
    }
}
