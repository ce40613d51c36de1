pub mod plotly_chart;

pub use plotly_chart::PlotlyChart;
