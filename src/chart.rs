//! SVG chart rendering for the Benford comparison.
//!
//! The chart is a grouped two-series bar chart: for every leading digit 1
//! through 9, an observed-proportion bar next to a theoretical-proportion
//! bar, with y-axis gridlines, digit labels, axis titles and a legend. The
//! document is assembled as text the same way the Markdown renderers build
//! theirs, with fixed-precision coordinates so identical input renders
//! byte-identical output.

use crate::benford::BenfordAnalysis;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 60.0;

const OBSERVED_FILL: &str = "#4C78A8";
const EXPECTED_FILL: &str = "#F58518";

/// Render the two-series bar chart as an SVG document.
pub fn render_benford_chart(analysis: &BenfordAnalysis) -> String {
    let chart_width = WIDTH - 2.0 * MARGIN;
    let chart_height = HEIGHT - 2.0 * MARGIN;
    let base_y = HEIGHT - MARGIN;

    let max_value = analysis
        .digits
        .iter()
        .map(|d| d.observed_percent.max(d.expected_percent))
        .fold(0.01_f64, f64::max);

    let slot = chart_width / analysis.digits.len().max(1) as f64;
    let bar_width = slot * 0.32;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\">\n"
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"Arial\" \
         font-size=\"18\">Benford's Law Analysis: {}</text>\n",
        WIDTH / 2.0,
        MARGIN / 2.0,
        analysis.column,
    ));

    // Horizontal gridlines with tick labels
    for tick in 0..=5 {
        let value = max_value * f64::from(tick) / 5.0;
        let y = base_y - (value / max_value) * chart_height;
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" \
             stroke=\"#E0E0E0\" stroke-width=\"1\"/>\n",
            MARGIN,
            WIDTH - MARGIN,
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"Arial\" \
             font-size=\"12\">{value:.2}</text>\n",
            MARGIN - 10.0,
            y + 4.0,
        ));
    }

    // One observed and one expected bar per digit
    for (i, bucket) in analysis.digits.iter().enumerate() {
        let slot_x = MARGIN + i as f64 * slot;
        let observed_x = slot_x + slot * 0.14;
        let expected_x = slot_x + slot * 0.54;

        let observed_height = (bucket.observed_percent / max_value) * chart_height;
        let expected_height = (bucket.expected_percent / max_value) * chart_height;

        svg.push_str(&format!(
            "<rect x=\"{observed_x:.2}\" y=\"{:.2}\" width=\"{bar_width:.2}\" \
             height=\"{observed_height:.2}\" fill=\"{OBSERVED_FILL}\" opacity=\"0.85\"/>\n",
            base_y - observed_height,
        ));
        svg.push_str(&format!(
            "<rect x=\"{expected_x:.2}\" y=\"{:.2}\" width=\"{bar_width:.2}\" \
             height=\"{expected_height:.2}\" fill=\"{EXPECTED_FILL}\" opacity=\"0.85\"/>\n",
            base_y - expected_height,
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"Arial\" \
             font-size=\"12\">{}</text>\n",
            slot_x + slot / 2.0,
            HEIGHT - MARGIN / 2.0,
            bucket.digit,
        ));
    }

    // Legend, top right
    let legend_x = WIDTH - MARGIN - 170.0;
    let legend_y = MARGIN / 2.0;
    svg.push_str(&format!(
        "<rect x=\"{legend_x:.2}\" y=\"{:.2}\" width=\"12\" height=\"12\" \
         fill=\"{OBSERVED_FILL}\"/>\n",
        legend_y - 10.0,
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{legend_y:.2}\" font-family=\"Arial\" \
         font-size=\"12\">Observed</text>\n",
        legend_x + 18.0,
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"12\" height=\"12\" \
         fill=\"{EXPECTED_FILL}\"/>\n",
        legend_x + 90.0,
        legend_y - 10.0,
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{legend_y:.2}\" font-family=\"Arial\" \
         font-size=\"12\">Expected</text>\n",
        legend_x + 108.0,
    ));

    // Axis titles
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"Arial\" \
         font-size=\"14\">Leading Digit</text>\n",
        WIDTH / 2.0,
        HEIGHT - 10.0,
    ));
    svg.push_str(&format!(
        "<text x=\"20\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"Arial\" \
         font-size=\"14\" transform=\"rotate(-90 20,{:.2})\">Proportion</text>\n",
        HEIGHT / 2.0,
        HEIGHT / 2.0,
    ));

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benford::distribution;

    fn sample_analysis() -> BenfordAnalysis {
        let leading = vec![1, 2, 3, 4, 1, 2, 3, 4, 5, 1];
        BenfordAnalysis {
            file: "sample.csv".to_owned(),
            column: "Amount".to_owned(),
            total_values: leading.len(),
            digits: distribution(&leading),
        }
    }

    #[test]
    fn test_chart_is_well_formed() {
        let svg = render_benford_chart(&sample_analysis());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));

        // 1 background + 18 bars + 2 legend swatches
        let rects = svg.matches("<rect ").count();
        assert_eq!(rects, 21);

        assert!(svg.contains("Leading Digit"));
        assert!(svg.contains("Proportion"));
        assert!(svg.contains("Observed"));
        assert!(svg.contains("Expected"));
        assert!(svg.contains("Benford's Law Analysis: Amount"));
    }

    #[test]
    fn test_chart_is_deterministic() {
        let first = render_benford_chart(&sample_analysis());
        let second = render_benford_chart(&sample_analysis());
        assert_eq!(first, second);
    }

    #[test]
    fn test_chart_handles_zero_total() {
        let analysis = BenfordAnalysis {
            file: "sample.csv".to_owned(),
            column: "Amount".to_owned(),
            total_values: 0,
            digits: distribution(&[]),
        };
        let svg = render_benford_chart(&analysis);
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("NaN"));
    }
}
