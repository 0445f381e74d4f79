use egui::{Align2, Color32, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, LineStyle, Plot, PlotPoint,
    PlotPoints, PlotUi, Points, Text, VLine,
};

use crate::processing::charts::{BellCurve, ChartData, ChartKind, HistogramBin, Marker};
use crate::processing::report::format_number;

const BLUE: Color32 = Color32::from_rgb(31, 119, 180);
const EDGE: Color32 = Color32::BLACK;

/// A chart shown in its own floating window.
pub struct ChartWindow {
    pub id: u64,
    pub kind: ChartKind,
    pub data: ChartData,
    pub decimal_places: usize,
    pub open: bool,
}

impl ChartWindow {
    pub fn new(id: u64, kind: ChartKind, data: ChartData, decimal_places: usize) -> Self {
        Self {
            id,
            kind,
            data,
            decimal_places,
            open: true,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new(self.kind.title())
            .id(egui::Id::new(("chart", self.id)))
            .open(&mut open)
            .resizable(true)
            .default_size([640.0, 420.0])
            .show(ctx, |ui| self.show_plot(ui));
        self.open = open;
    }

    fn show_plot(&self, ui: &mut egui::Ui) {
        let mut plot = Plot::new(("chart_plot", self.id)).legend(Legend::default());
        if let Some((x, y)) = self.kind.axis_labels() {
            plot = plot.x_axis_label(x).y_axis_label(y);
        }

        let dp = self.decimal_places;
        plot.show(ui, |plot_ui| match &self.data {
            ChartData::Histogram(bins) => plot_ui.bar_chart(histogram_bars(bins, BLUE)),
            ChartData::Line { points, markers, top } => {
                draw_line(plot_ui, points, markers, *top, dp)
            }
            ChartData::Scatter(points) => plot_ui.points(
                Points::new(PlotPoints::new(points.clone()))
                    .radius(3.0)
                    .color(BLUE),
            ),
            ChartData::BoxPlot(spread) => draw_box(plot_ui, spread, dp),
            ChartData::BellCurve(bell) => draw_bell_curve(plot_ui, bell),
        });
    }
}

fn histogram_bars(bins: &[HistogramBin], fill: Color32) -> BarChart {
    let bars = bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.value)
                .width(b.width())
                .fill(fill)
                .stroke(Stroke::new(1.0, EDGE))
        })
        .collect();
    BarChart::new(bars).color(fill)
}

fn marker_color(marker: &Marker) -> Color32 {
    match marker.label {
        "Q1" => Color32::RED,
        "Q3" => Color32::from_rgb(0, 128, 0),
        _ => Color32::from_rgb(255, 165, 0),
    }
}

fn draw_line(plot_ui: &mut PlotUi, points: &[[f64; 2]], markers: &[Marker], top: f64, dp: usize) {
    plot_ui.line(
        Line::new(PlotPoints::new(points.to_vec()))
            .color(BLUE)
            .width(2.0),
    );
    plot_ui.points(
        Points::new(PlotPoints::new(points.to_vec()))
            .radius(3.0)
            .color(BLUE),
    );

    for marker in markers {
        let color = marker_color(marker);
        plot_ui.vline(
            VLine::new(marker.x)
                .color(color)
                .style(LineStyle::dashed_loose())
                .name(marker.label),
        );
        plot_ui.text(
            Text::new(
                PlotPoint::new(marker.x, top),
                format!("{}: {}", marker.label, format_number(marker.value, dp)),
            )
            .color(color)
            .anchor(Align2::CENTER_BOTTOM),
        );
    }
}

fn draw_box(plot_ui: &mut PlotUi, spread: &crate::processing::charts::BoxSpread, dp: usize) {
    let elem = BoxElem::new(
        1.0,
        BoxSpread::new(
            spread.lower_whisker,
            spread.q1,
            spread.median,
            spread.q3,
            spread.upper_whisker,
        ),
    )
    .box_width(0.5)
    .whisker_width(0.25)
    .fill(BLUE.linear_multiply(0.2))
    .stroke(Stroke::new(1.5, BLUE));
    plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal());

    if !spread.outliers.is_empty() {
        let outliers: Vec<[f64; 2]> = spread.outliers.iter().map(|&v| [v, 1.0]).collect();
        plot_ui.points(
            Points::new(PlotPoints::new(outliers))
                .radius(3.0)
                .filled(false)
                .color(EDGE),
        );
    }

    let annotations = [
        ("Q1", spread.q1, 1.4),
        ("Median", spread.median, 1.2),
        ("Q3", spread.q3, 1.3),
    ];
    for (label, x, y) in annotations {
        plot_ui.text(
            Text::new(
                PlotPoint::new(x, y),
                format!("{label}: {}", format_number(x, dp)),
            )
            .anchor(Align2::CENTER_BOTTOM),
        );
    }
}

fn draw_bell_curve(plot_ui: &mut PlotUi, bell: &BellCurve) {
    plot_ui.bar_chart(histogram_bars(
        &bell.histogram,
        Color32::from_rgb(0, 128, 0).linear_multiply(0.5),
    ));
    plot_ui.line(
        Line::new(PlotPoints::new(bell.curve.clone()))
            .color(BLUE)
            .width(2.0)
            .name("Normal density"),
    );

    let red = Color32::RED.linear_multiply(0.6);
    for line in &bell.z_lines {
        plot_ui.vline(
            VLine::new(line.x)
                .color(red)
                .style(LineStyle::dashed_loose()),
        );
        if line.k != 0 {
            plot_ui.text(
                Text::new(
                    PlotPoint::new(line.x, bell.label_height),
                    format!("Z={}", line.k),
                )
                .color(Color32::RED)
                .anchor(Align2::CENTER_BOTTOM),
            );
        }
    }
}
