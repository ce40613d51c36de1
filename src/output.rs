//! Plain-text rendering of previews and series for the terminal.

use common::{AccuracyMetrics, TimePoint};

const MAX_CELL_WIDTH: usize = 32;

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{}…", kept)
}

/// Left-aligned table with a dashed rule under the header.
pub fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let header: Vec<String> = columns.iter().map(|c| clip(c)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| clip(c)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.chars().count()).collect();
    for row in &body {
        for (idx, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(idx) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let pad = widths[idx].saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&header)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.extend(body.iter().map(|row| line(row)));
    out.join("\n")
}

pub fn number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

/// One row per point: timestamp, actual, predicted, lower, upper.
pub fn points_table(points: &[TimePoint]) -> String {
    let columns: Vec<String> = ["ts", "actual", "predicted", "lower", "upper"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.timestamp.clone(),
                number(p.actual),
                number(p.predicted),
                number(p.lower_bound),
                number(p.upper_bound),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

pub fn metrics_line(metrics: Option<&AccuracyMetrics>) -> String {
    match metrics {
        Some(m) => format!(
            "MAE {}  RMSE {}  MAPE {}%",
            number(m.mae),
            number(m.rmse),
            number(m.mape)
        ),
        None => "No validation split, accuracy metrics unavailable".to_string(),
    }
}
