use crate::analysis::presentation::{
    confidence_tier, format_confidence, CategoryTier, ConfidenceTier, PriorityTier, ReviewStatus,
    SentimentTier,
};
use egui::{Color32, Pos2, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

const GREEN: Color32 = Color32::from_rgb(34, 197, 94);
const YELLOW: Color32 = Color32::from_rgb(234, 179, 8);
const RED: Color32 = Color32::from_rgb(239, 68, 68);
const BLUE: Color32 = Color32::from_rgb(59, 130, 246);
const PURPLE: Color32 = Color32::from_rgb(147, 51, 234);
const ORANGE: Color32 = Color32::from_rgb(249, 115, 22);
const GRAY: Color32 = Color32::from_rgb(107, 114, 128);

pub fn tier_color(tier: ConfidenceTier) -> Color32 {
    match tier {
        ConfidenceTier::High => GREEN,
        ConfidenceTier::Medium => YELLOW,
        ConfidenceTier::Low => RED,
    }
}

pub fn priority_color(label: &str) -> Color32 {
    match PriorityTier::from_label(label) {
        PriorityTier::High => RED,
        PriorityTier::Medium => YELLOW,
        PriorityTier::Low => GREEN,
        PriorityTier::Unknown => GRAY,
    }
}

pub fn sentiment_color(label: &str) -> Color32 {
    match SentimentTier::from_label(label) {
        SentimentTier::Positive => GREEN,
        SentimentTier::Negative => RED,
        SentimentTier::Neutral => BLUE,
        SentimentTier::Unknown => GRAY,
    }
}

pub fn category_color(label: &str) -> Color32 {
    match CategoryTier::from_label(label) {
        CategoryTier::AccountManagement => PURPLE,
        CategoryTier::ProductInquiry => BLUE,
        CategoryTier::Support => ORANGE,
        CategoryTier::Unknown => GRAY,
    }
}

pub fn review_color(status: ReviewStatus) -> Color32 {
    match status {
        ReviewStatus::NeedsReview => YELLOW,
        ReviewStatus::AutoProcessed => GREEN,
    }
}

/// Rounded label with a tinted outline.
pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    egui::Frame::default()
        .inner_margin(4.0)
        .corner_radius(8.0)
        .stroke(Stroke::new(1.0, color))
        .fill(color.gamma_multiply(0.15))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(color));
        });
}

/// Horizontal bar filled to `confidence`, coloured by tier.
pub fn confidence_bar(ui: &mut egui::Ui, confidence: f64, width: f32, show_label: bool) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 8.0), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, ui.visuals().faint_bg_color);

    let fraction = confidence.clamp(0.0, 1.0) as f32;
    if fraction > 0.0 {
        let mut filled = rect;
        filled.set_width(rect.width() * fraction);
        painter.rect_filled(filled, 4.0, tier_color(confidence_tier(confidence)));
    }

    if show_label {
        ui.label(egui::RichText::new(format_confidence(confidence)).small());
    }
}

/// Ring gauge for a single score, percentage in the hole.
pub fn confidence_ring(ui: &mut egui::Ui, confidence: f64, size: f32) {
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let center = response.rect.center();
    let radius = size * 0.4;
    let thickness = size * 0.12;

    painter.circle_stroke(center, radius, Stroke::new(thickness, ui.visuals().faint_bg_color));

    let fraction = confidence.clamp(0.0, 1.0) as f32;
    if fraction > 0.0 {
        let start_angle = -TAU / 4.0; // Start from top
        let sweep = fraction * TAU;
        let segments = (sweep / 0.05).max(2.0) as usize;
        let points: Vec<Pos2> = (0..=segments)
            .map(|j| {
                let angle = start_angle + sweep * (j as f32 / segments as f32);
                Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        painter.add(Shape::line(
            points,
            Stroke::new(thickness, tier_color(confidence_tier(confidence))),
        ));
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format_confidence(confidence),
        egui::FontId::proportional(size * 0.2),
        ui.visuals().text_color(),
    );
}
