//! Plain-text drawing of the three rods.

use hanoi_core::RodSnapshot;
use shared::domain::{RodIndex, ROD_COUNT};

/// Draws the rods side by side, one text row per disk level, widest disk on
/// the bottom row.
pub fn draw_rods(rods: &RodSnapshot, disk_count: u8) -> String {
    let width = usize::from(disk_count) * 2 + 1;
    let height = usize::from(disk_count);
    let mut out = String::new();

    for level in (0..height).rev() {
        let row: Vec<String> = rods
            .iter()
            .map(|rod| match rod.get(level) {
                Some(rank) => center("=".repeat(usize::from(*rank) * 2 + 1), width),
                None => center("|".to_string(), width),
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }

    let labels: Vec<String> = RodIndex::ALL
        .iter()
        .map(|rod| center(rod.label().to_string(), width))
        .collect();
    out.push_str(&"-".repeat(width * ROD_COUNT + ROD_COUNT - 1));
    out.push('\n');
    out.push_str(labels.join(" ").trim_end());
    out.push('\n');
    out
}

fn center(text: String, width: usize) -> String {
    format!("{text:^width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_fresh_tower_on_the_first_rod() {
        let drawing = draw_rods(&[vec![2, 1], vec![], vec![]], 2);
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines[0], " ===    |     |");
        assert_eq!(lines[1], "=====   |     |");
        assert_eq!(lines[2], "-----------------");
        assert_eq!(lines[3], "  A     B     C");
    }

    #[test]
    fn draws_one_row_per_disk_level() {
        let drawing = draw_rods(&[vec![4], vec![3, 2], vec![1]], 4);
        assert_eq!(drawing.lines().count(), 4 + 2);
        assert!(drawing.contains("==="));
    }
}
