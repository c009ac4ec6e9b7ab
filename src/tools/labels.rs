//! Price-axis labels for the points of hovered and selected tools.

use bevy::color::Color;

use super::set::ToolSet;
use crate::constants::PRICE_LABEL_HEIGHT;
use crate::model::CoordinateAdapter;
use crate::options::{contrast_color, price_precision};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceLabel {
    /// Vertical centre of the label in pane pixels
    pub y: f32,
    pub text: String,
    pub background: Color,
    pub text_color: Color,
}

/// Labels for every resolvable point of hovered or selected tools, stacked so
/// none overlap.
pub fn price_axis_labels(tools: &ToolSet, adapter: CoordinateAdapter) -> Vec<PriceLabel> {
    let host = adapter.host();
    let mut labels = Vec::new();

    for tool in tools.iter() {
        if !(tool.is_hovered() || tool.is_selected()) || !tool.is_visible() {
            continue;
        }
        let precision = price_precision(tool.options());
        let background = tool.shape().accent_color(tool.options());

        for point in tool.points() {
            let Some(y) = host.price_to_coordinate(point.price) else {
                continue;
            };
            labels.push(PriceLabel {
                y,
                text: format!("{:.*}", precision, point.price),
                background,
                text_color: contrast_color(background),
            });
        }
    }

    stack_labels(labels, adapter.pane_size().y)
}

/// Sort by y, push labels apart by the label height, then clamp to the pane.
pub fn stack_labels(mut labels: Vec<PriceLabel>, pane_height: f32) -> Vec<PriceLabel> {
    if labels.is_empty() {
        return labels;
    }
    labels.sort_by(|a, b| a.y.total_cmp(&b.y));

    let half = PRICE_LABEL_HEIGHT / 2.0;
    for i in 1..labels.len() {
        let min_y = labels[i - 1].y + PRICE_LABEL_HEIGHT;
        if labels[i].y < min_y {
            labels[i].y = min_y;
        }
    }

    // Pull the stack back up if it runs off the bottom
    let last = labels.len() - 1;
    let bottom = (pane_height - half).max(half);
    if labels[last].y > bottom {
        labels[last].y = bottom;
        for i in (0..last).rev() {
            let max_y = labels[i + 1].y - PRICE_LABEL_HEIGHT;
            if labels[i].y > max_y {
                labels[i].y = max_y;
            }
        }
    }

    // Too many labels for the pane: the top one wins
    if labels[0].y < half {
        let shift = half - labels[0].y;
        for label in &mut labels {
            label.y += shift;
        }
    }
    labels
}
