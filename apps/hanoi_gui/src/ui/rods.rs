//! Painting of the three rods and their disks.

use eframe::egui;
use hanoi_core::RodSnapshot;
use shared::domain::{RodIndex, ROD_COUNT};

const BASE_LINE_HEIGHT: f32 = 5.0;
const MAX_DISK_HEIGHT: f32 = 40.0;
const MIN_DISK_WIDTH: f32 = 30.0;
const ROD_MARGIN: f32 = 20.0;
const POST_WIDTH: f32 = 6.0;

/// Indexed by rank - 1.
const DISK_COLORS: [egui::Color32; 10] = [
    egui::Color32::from_rgb(220, 20, 60),
    egui::Color32::from_rgb(30, 90, 220),
    egui::Color32::from_rgb(34, 160, 60),
    egui::Color32::from_rgb(240, 210, 40),
    egui::Color32::from_rgb(128, 0, 128),
    egui::Color32::from_rgb(255, 140, 0),
    egui::Color32::from_rgb(255, 160, 200),
    egui::Color32::from_rgb(140, 80, 30),
    egui::Color32::from_rgb(0, 200, 220),
    egui::Color32::from_rgb(230, 0, 230),
];

pub fn disk_color(rank: u8) -> egui::Color32 {
    let index = usize::from(rank.max(1) - 1) % DISK_COLORS.len();
    DISK_COLORS[index]
}

/// Width grows linearly from `MIN_DISK_WIDTH` for rank 1 to `max_width` for
/// the largest disk.
pub fn disk_width(rank: u8, disk_count: u8, max_width: f32) -> f32 {
    if disk_count <= 1 {
        return max_width;
    }
    let step = f32::from(rank.saturating_sub(1)) / f32::from(disk_count - 1);
    MIN_DISK_WIDTH + (max_width - MIN_DISK_WIDTH).max(0.0) * step
}

pub fn disk_height(rod_height: f32, disk_count: u8) -> f32 {
    (rod_height / f32::from(disk_count.max(1))).min(MAX_DISK_HEIGHT)
}

/// Rectangle of the disk at stack position `level` (0 = bottom) on a rod
/// occupying `column`.
pub fn disk_rect(column: egui::Rect, level: usize, rank: u8, disk_count: u8) -> egui::Rect {
    let rod_height = column.height() - BASE_LINE_HEIGHT;
    let height = disk_height(rod_height, disk_count);
    let width = disk_width(rank, disk_count, column.width() - ROD_MARGIN);
    let bottom = column.bottom() - BASE_LINE_HEIGHT - height * level as f32;
    egui::Rect::from_min_max(
        egui::pos2(column.center().x - width / 2.0, bottom - height),
        egui::pos2(column.center().x + width / 2.0, bottom),
    )
}

fn columns(area: egui::Rect) -> [egui::Rect; ROD_COUNT] {
    let width = area.width() / ROD_COUNT as f32;
    RodIndex::ALL.map(|rod| {
        let left = area.left() + width * rod.index() as f32;
        egui::Rect::from_min_max(
            egui::pos2(left, area.top()),
            egui::pos2(left + width, area.bottom()),
        )
    })
}

pub fn paint_rods(ui: &mut egui::Ui, rods: &RodSnapshot, disk_count: u8) {
    let (area, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let painter = ui.painter_at(area);
    let post_color = ui.visuals().widgets.noninteractive.fg_stroke.color;

    for (rod, column) in RodIndex::ALL.iter().zip(columns(area)) {
        let column = column.shrink2(egui::vec2(8.0, 20.0));
        let post = egui::Rect::from_center_size(
            egui::pos2(column.center().x, column.center().y),
            egui::vec2(POST_WIDTH, column.height()),
        );
        painter.rect_filled(post, egui::CornerRadius::same(2), post_color);
        painter.rect_filled(
            egui::Rect::from_min_max(
                egui::pos2(column.left(), column.bottom() - BASE_LINE_HEIGHT),
                column.right_bottom(),
            ),
            egui::CornerRadius::same(1),
            post_color,
        );
        painter.text(
            egui::pos2(column.center().x, column.bottom() + 2.0),
            egui::Align2::CENTER_TOP,
            rod.label(),
            egui::FontId::proportional(14.0),
            post_color,
        );

        for (level, rank) in rods[rod.index()].iter().enumerate() {
            let rect = disk_rect(column, level, *rank, disk_count);
            painter.rect_filled(rect, egui::CornerRadius::same(3), disk_color(*rank));
            painter.rect_stroke(
                rect,
                egui::CornerRadius::same(3),
                egui::Stroke::new(2.0, egui::Color32::BLACK),
                egui::StrokeKind::Middle,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_and_largest_disks_span_the_width_range() {
        assert_eq!(disk_width(1, 5, 200.0), MIN_DISK_WIDTH);
        assert_eq!(disk_width(5, 5, 200.0), 200.0);
        assert!(disk_width(3, 5, 200.0) > disk_width(2, 5, 200.0));
    }

    #[test]
    fn disk_height_is_capped() {
        assert_eq!(disk_height(400.0, 4), MAX_DISK_HEIGHT);
        assert_eq!(disk_height(200.0, 10), 20.0);
    }

    #[test]
    fn stacked_disks_do_not_overlap() {
        let column = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(220.0, 305.0));
        let bottom = disk_rect(column, 0, 4, 4);
        let above = disk_rect(column, 1, 3, 4);
        assert!(above.bottom() <= bottom.top() + f32::EPSILON);
        assert!(above.width() < bottom.width());
        assert_eq!(bottom.bottom(), column.bottom() - BASE_LINE_HEIGHT);
    }

    #[test]
    fn every_rank_has_a_color() {
        for rank in 1..=10 {
            assert_eq!(disk_color(rank), DISK_COLORS[usize::from(rank) - 1]);
        }
    }
}
