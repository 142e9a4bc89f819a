//! Daily commit activity card.
//!
//! Shows a skeleton while the first fetch runs, an explanatory message when
//! there is nothing to plot, and otherwise a line chart of commits per day,
//! oldest day on the left.

use egui::{
    pos2, vec2, Align2, Color32, Direction, FontId, Frame, Layout, Margin, Rect, RichText, Sense,
    Stroke, TextureHandle, TextureOptions, Ui,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use super::query::{DailyStatsQuery, QueryState};
use crate::plotting::{render_line_chart, ChartStyle, ChartTheme, RenderedChart, ThemeOption};
use crate::types::{ChartPoint, DailyStat};
use crate::utils::format_day_label;

/// Trailing window the card asks for.
pub const DAILY_WINDOW_DAYS: u32 = 30;

pub const EMPTY_MESSAGE: &str = "No daily stats yet. Sync your repositories first.";

/// The card's presentation, decided purely from the query state.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Loading,
    Empty,
    Populated(Vec<ChartPoint>),
}

impl ChartView {
    pub fn from_state(state: &QueryState) -> Self {
        if state.is_loading {
            return ChartView::Loading;
        }
        let points = chart_points(state.data.as_deref());
        if points.is_empty() {
            ChartView::Empty
        } else {
            ChartView::Populated(points)
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartView::Loading => "Daily Commits",
            ChartView::Empty | ChartView::Populated(_) => "Daily Commit Activity",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartView::Loading => "Last 30 days",
            ChartView::Empty | ChartView::Populated(_) => "Commits over the last 30 days",
        }
    }
}

/// Turn newest-first statistics into oldest-first chart points.
///
/// Missing data is treated as an empty series. Every statistic yields exactly
/// one point.
pub fn chart_points(data: Option<&[DailyStat]>) -> Vec<ChartPoint> {
    data.unwrap_or_default()
        .iter()
        .rev()
        .map(|day| ChartPoint {
            date: format_day_label(&day.stat_date),
            commits: day.total_commits,
        })
        .collect()
}

struct CachedChart {
    key: u64,
    chart: RenderedChart,
    texture: TextureHandle,
}

/// The daily commits card widget.
pub struct DailyCommitsChart {
    overrides: Vec<(ThemeOption, Color32)>,
    style: ChartStyle,
    rendered: Option<CachedChart>,
    failed_key: Option<u64>,
}

impl DailyCommitsChart {
    /// Create the widget with `option name -> #rrggbb` theme overrides
    pub fn new(theme_overrides: &HashMap<String, String>) -> Self {
        Self {
            overrides: ChartTheme::parse_overrides(theme_overrides),
            style: ChartStyle::default(),
            rendered: None,
            failed_key: None,
        }
    }

    /// Theme resolved against the host UI's current visuals
    pub fn theme(&self, ui: &Ui) -> ChartTheme {
        ChartTheme::from_visuals(ui.visuals()).with_overrides(&self.overrides)
    }

    /// Draw the card, returning the view that was shown
    pub fn show(&mut self, ui: &mut Ui, query: &mut DailyStatsQuery) -> ChartView {
        let state = query.poll(DAILY_WINDOW_DAYS);
        let view = ChartView::from_state(&state);
        let theme = self.theme(ui);

        card(ui, &theme, view.title(), view.description(), |ui| match &view {
            ChartView::Loading => skeleton(ui, &theme, self.style.skeleton_height),
            ChartView::Empty => empty_state(ui, &theme, self.style.skeleton_height),
            ChartView::Populated(points) => self.chart(ui, &theme, points),
        });

        view
    }

    fn chart(&mut self, ui: &mut Ui, theme: &ChartTheme, points: &[ChartPoint]) {
        let size = vec2(ui.available_width().max(1.0), self.style.chart_height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let (width, height) = (rect.width().round() as u32, rect.height().round() as u32);

        let key = render_key(points, width, height, theme);
        let stale = self.rendered.as_ref().map(|cached| cached.key) != Some(key);
        if stale && self.failed_key != Some(key) {
            match render_line_chart(points, width, height, theme, &self.style) {
                Ok(chart) => {
                    let texture = ui.ctx().load_texture(
                        "daily_commits_chart",
                        chart.to_color_image(),
                        TextureOptions::LINEAR,
                    );
                    self.rendered = Some(CachedChart { key, chart, texture });
                    self.failed_key = None;
                }
                Err(e) => {
                    log::error!("Failed to render daily commits chart: {}", e);
                    self.rendered = None;
                    self.failed_key = Some(key);
                }
            }
        }

        let Some(cached) = self.rendered.as_ref().filter(|cached| cached.key == key) else {
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                EMPTY_MESSAGE,
                FontId::proportional(14.0),
                theme.text.gamma_multiply(0.7),
            );
            return;
        };

        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        ui.painter().image(cached.texture.id(), rect, uv, Color32::WHITE);

        let Some(pointer) = response.hover_pos() else {
            return;
        };
        let scale = vec2(
            rect.width() / cached.chart.width as f32,
            rect.height() / cached.chart.height as f32,
        );
        let local_x = (pointer.x - rect.left()) / scale.x;
        let Some(idx) = cached.chart.nearest_point(local_x) else {
            return;
        };

        let (x, y) = cached.chart.markers[idx];
        let center = rect.left_top() + vec2(x * scale.x, y * scale.y);
        ui.painter()
            .circle_filled(center, self.style.active_marker_radius, theme.accent_active);

        let point = &points[idx];
        response.on_hover_ui_at_pointer(|ui| tooltip(ui, theme, point));
    }
}

impl Default for DailyCommitsChart {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}

fn render_key(points: &[ChartPoint], width: u32, height: u32, theme: &ChartTheme) -> u64 {
    let mut hasher = DefaultHasher::new();
    points.hash(&mut hasher);
    (width, height).hash(&mut hasher);
    for option in ThemeOption::ALL {
        theme.resolve(option).hash(&mut hasher);
    }
    hasher.finish()
}

fn card<R>(
    ui: &mut Ui,
    theme: &ChartTheme,
    title: &str,
    description: &str,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> R {
    Frame::none()
        .fill(theme.background)
        .stroke(Stroke::new(1.0, theme.border))
        .rounding(8.0)
        .inner_margin(Margin::same(16.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).heading().color(theme.text));
            ui.label(RichText::new(description).weak());
            ui.add_space(12.0);
            add_contents(ui)
        })
        .inner
}

fn skeleton(ui: &mut Ui, theme: &ChartTheme, height: f32) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    let time = ui.input(|i| i.time);
    let pulse = 0.5 + 0.25 * (time * 2.0).sin() as f32;
    ui.painter()
        .rect_filled(rect, 6.0, theme.border.gamma_multiply(pulse));
    ui.ctx().request_repaint();
}

fn empty_state(ui: &mut Ui, theme: &ChartTheme, height: f32) {
    ui.allocate_ui_with_layout(
        vec2(ui.available_width(), height),
        Layout::centered_and_justified(Direction::TopDown),
        |ui| ui.label(RichText::new(EMPTY_MESSAGE).color(theme.text.gamma_multiply(0.7))),
    );
}

fn tooltip(ui: &mut Ui, theme: &ChartTheme, point: &ChartPoint) {
    Frame::none()
        .fill(theme.popover)
        .stroke(Stroke::new(1.0, theme.border))
        .rounding(8.0)
        .inner_margin(Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.label(RichText::new(&point.date).strong().color(theme.text));
            ui.label(RichText::new(format!("commits: {}", point.commits)).color(theme.accent));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(date: &str, commits: u32) -> ChartPoint {
        ChartPoint {
            date: date.to_string(),
            commits,
        }
    }

    #[test]
    fn test_points_are_reversed_and_labelled() {
        let data = vec![DailyStat::new("2024-06-02", 5), DailyStat::new("2024-06-01", 3)];

        assert_eq!(
            chart_points(Some(data.as_slice())),
            vec![point("Jun 01", 3), point("Jun 02", 5)]
        );
    }

    #[test]
    fn test_point_count_matches_input() {
        let data: Vec<DailyStat> = (1..=30)
            .rev()
            .map(|d| DailyStat::new(format!("2024-06-{:02}", d), d))
            .collect();

        let points = chart_points(Some(data.as_slice()));
        assert_eq!(points.len(), data.len());
        for (i, p) in points.iter().enumerate() {
            let source = &data[data.len() - 1 - i];
            assert_eq!(p.commits, source.total_commits);
            assert_eq!(p.date, format_day_label(&source.stat_date));
        }
    }

    #[test]
    fn test_loading_wins_over_data() {
        let state = QueryState {
            data: Some(vec![DailyStat::new("2024-06-01", 3)]),
            is_loading: true,
        };
        let view = ChartView::from_state(&state);
        assert_eq!(view, ChartView::Loading);
        assert_eq!(view.title(), "Daily Commits");
        assert_eq!(view.description(), "Last 30 days");
    }

    #[test]
    fn test_missing_and_empty_data() {
        let missing = ChartView::from_state(&QueryState::default());
        assert_eq!(missing, ChartView::Empty);
        assert_eq!(missing.title(), "Daily Commit Activity");

        let empty = QueryState {
            data: Some(Vec::new()),
            is_loading: false,
        };
        assert_eq!(ChartView::from_state(&empty), ChartView::Empty);
    }

    #[test]
    fn test_populated_view() {
        let state = QueryState {
            data: Some(vec![DailyStat::new("2024-06-02", 5), DailyStat::new("2024-06-01", 3)]),
            is_loading: false,
        };
        let view = ChartView::from_state(&state);
        assert_eq!(
            view,
            ChartView::Populated(vec![point("Jun 01", 3), point("Jun 02", 5)])
        );
        assert_eq!(view.description(), "Commits over the last 30 days");
    }

    #[test]
    fn test_render_key_tracks_inputs() {
        let theme = ChartTheme::default();
        let points = vec![point("Jun 01", 3)];
        let base = render_key(&points, 640, 300, &theme);

        assert_eq!(base, render_key(&points, 640, 300, &theme));
        assert_ne!(base, render_key(&points, 641, 300, &theme));
        assert_ne!(base, render_key(&[point("Jun 01", 4)], 640, 300, &theme));

        let recoloured = ChartTheme {
            accent: Color32::RED,
            ..theme.clone()
        };
        assert_ne!(base, render_key(&points, 640, 300, &recoloured));
    }
}
