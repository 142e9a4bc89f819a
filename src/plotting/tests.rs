#[cfg(test)]
mod tests {
    use super::super::chart::{build_chart, label_step, marker_positions, y_axis_range};
    use super::super::styles::parse_hex_color;
    use super::super::*;
    use crate::types::ChartPoint;
    use egui::Color32;
    use plotters::prelude::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn setup_points() -> Vec<ChartPoint> {
        vec![
            ChartPoint { date: "Jun 01".to_string(), commits: 3 },
            ChartPoint { date: "Jun 02".to_string(), commits: 5 },
            ChartPoint { date: "Jun 03".to_string(), commits: 1 },
        ]
    }

    #[test]
    fn test_marker_geometry() {
        let points = setup_points();
        let mut buffer = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buffer, (400, 300)).into_drawing_area();
        let chart = build_chart(&root, &points, &ChartStyle::default()).unwrap();

        let markers = marker_positions(&chart, &points);
        assert_eq!(markers.len(), 3);
        // Oldest point on the left
        assert!(markers[0].0 < markers[1].0 && markers[1].0 < markers[2].0);
        // More commits sit higher, i.e. at a smaller pixel row
        assert!(markers[1].1 < markers[0].1);
        assert!(markers[0].1 < markers[2].1);
        assert!(markers.iter().all(|(x, y)| *x >= 0.0 && *x < 400.0 && *y >= 0.0 && *y < 300.0));
    }

    #[test]
    fn test_nearest_point() {
        let chart = RenderedChart {
            width: 100,
            height: 50,
            pixels: vec![0; 100 * 50 * 3],
            markers: vec![(10.0, 20.0), (50.0, 10.0), (90.0, 30.0)],
        };

        assert_eq!(chart.nearest_point(0.0), Some(0));
        assert_eq!(chart.nearest_point(35.0), Some(1));
        assert_eq!(chart.nearest_point(71.0), Some(2));
        assert!(chart.to_rgb_image().is_some());

        let empty = RenderedChart { markers: Vec::new(), ..chart };
        assert_eq!(empty.nearest_point(10.0), None);
    }

    #[test]
    fn test_y_axis_range() {
        assert_eq!(y_axis_range(&setup_points()), (0.0, 6.0));
        assert_eq!(y_axis_range(&[]), (0.0, 1.0));

        let quiet = vec![ChartPoint { date: "Jun 01".to_string(), commits: 0 }];
        assert_eq!(y_axis_range(&quiet), (0.0, 1.0));
    }

    #[test]
    fn test_label_step() {
        assert_eq!(label_step(3, 8), 1);
        assert_eq!(label_step(30, 8), 4);
        assert_eq!(label_step(0, 8), 1);
        assert_eq!(label_step(10, 0), 10);
    }

    #[test]
    fn test_zero_sized_chart() {
        let result = render_line_chart(
            &setup_points(),
            0,
            300,
            &ChartTheme::default(),
            &ChartStyle::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_render_line_chart() {
        let result = render_line_chart(
            &setup_points(),
            640,
            300,
            &ChartTheme::default(),
            &ChartStyle::default(),
        );

        match result {
            Ok(chart) => {
                assert_eq!(chart.pixels.len(), 640 * 300 * 3);
                assert_eq!(chart.markers.len(), 3);
                assert_eq!(chart.to_color_image().size, [640, 300]);
                assert!(chart.to_rgb_image().is_some());
            }
            // Axis labels need a system font; hosts without one may only fail on text
            Err(e) => assert!(
                e.to_string().to_lowercase().contains("font"),
                "unexpected render error: {}",
                e
            ),
        }
    }

    #[test]
    fn test_theme_options() {
        let theme = ChartTheme::default();
        assert_eq!(theme.resolve(ThemeOption::Accent), Color32::from_rgb(0x2d, 0xd4, 0xbf));
        assert_eq!(
            theme.resolve(ThemeOption::AccentActive),
            Color32::from_rgb(0x14, 0xb8, 0xa6)
        );

        for option in ThemeOption::ALL {
            assert_eq!(option.name().parse::<ThemeOption>(), Ok(option));
        }
        assert!("accent".parse::<ThemeOption>().is_err());
    }

    #[test]
    fn test_theme_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("accent-color".to_string(), "#ff8800".to_string());
        overrides.insert("border-color".to_string(), "not a colour".to_string());
        overrides.insert("shadow-color".to_string(), "#000000".to_string());

        let theme = ChartTheme::default().apply_overrides(&overrides);
        assert_eq!(theme.accent, Color32::from_rgb(0xff, 0x88, 0x00));
        assert_eq!(theme.border, ChartTheme::default().border);
    }

    #[test]
    fn test_theme_from_visuals() {
        let visuals = egui::Visuals::light();
        let theme = ChartTheme::from_visuals(&visuals);
        assert_eq!(theme.text, visuals.text_color());
        assert_eq!(theme.background, visuals.panel_fill);
        assert_eq!(theme.accent, ChartTheme::default().accent);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#2dd4bf"), Some(Color32::from_rgb(0x2d, 0xd4, 0xbf)));
        assert_eq!(parse_hex_color("14B8A6"), Some(Color32::from_rgb(0x14, 0xb8, 0xa6)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
