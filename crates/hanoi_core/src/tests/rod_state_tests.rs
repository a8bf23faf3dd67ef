use super::*;

#[test]
fn reset_stacks_largest_disk_at_the_bottom_of_the_source_rod() {
    let mut rods = RodState::new();
    rods.reset(5).expect("reset");

    let ranks: Vec<u8> = rods
        .disks_on(RodIndex::SOURCE)
        .iter()
        .map(|disk| disk.rank())
        .collect();
    assert_eq!(ranks, vec![5, 4, 3, 2, 1]);
    assert!(rods.disks_on(RodIndex::AUXILIARY).is_empty());
    assert!(rods.disks_on(RodIndex::DESTINATION).is_empty());
    assert_eq!(rods.top_of(RodIndex::SOURCE), Some(Disk::new(1)));
    rods.verify().expect("fresh rods are valid");
}

#[test]
fn reset_clears_a_previous_game() {
    let mut rods = RodState::new();
    rods.reset(6).expect("first reset");
    rods.apply_move(RodIndex::SOURCE, RodIndex::DESTINATION)
        .expect("move");

    rods.reset(4).expect("second reset");
    assert_eq!(rods.snapshot(), [vec![4, 3, 2, 1], vec![], vec![]]);
    assert_eq!(rods.disk_count(), 4);
}

#[test]
fn reset_rejects_unsupported_disk_counts_without_touching_rods() {
    let mut rods = RodState::new();
    rods.reset(4).expect("reset");

    for disk_count in [0, 3, 11, 200] {
        let err = rods.reset(disk_count).expect_err("out of range");
        assert!(matches!(err, HanoiError::InvalidArgument(_)));
        assert!(!err.is_defect());
    }
    assert_eq!(rods.snapshot(), [vec![4, 3, 2, 1], vec![], vec![]]);
}

#[test]
fn apply_move_transfers_the_top_disk() {
    let mut rods = RodState::new();
    rods.reset(4).expect("reset");

    let disk = rods
        .apply_move(RodIndex::SOURCE, RodIndex::AUXILIARY)
        .expect("move");
    assert_eq!(disk.rank(), 1);
    assert_eq!(rods.snapshot(), [vec![4, 3, 2], vec![1], vec![]]);
    rods.verify().expect("still valid");
}

#[test]
fn apply_move_from_empty_rod_is_a_defect() {
    let mut rods = RodState::new();
    rods.reset(4).expect("reset");

    assert!(!rods.move_permitted(RodIndex::AUXILIARY, RodIndex::DESTINATION));
    let err = rods
        .apply_move(RodIndex::AUXILIARY, RodIndex::DESTINATION)
        .expect_err("empty rod");
    assert_eq!(
        err,
        HanoiError::EmptyRod {
            from: RodIndex::AUXILIARY,
            to: RodIndex::DESTINATION,
        }
    );
    assert!(err.is_defect());
    assert_eq!(rods.snapshot(), [vec![4, 3, 2, 1], vec![], vec![]]);
}

#[test]
fn move_permitted_only_checks_the_source_rod() {
    let mut rods = RodState::new();
    rods.reset(4).expect("reset");
    rods.apply_move(RodIndex::SOURCE, RodIndex::AUXILIARY)
        .expect("move");

    // Disk 2 onto disk 1 would be illegal, but ordering is the sequencer's job.
    assert!(rods.move_permitted(RodIndex::SOURCE, RodIndex::AUXILIARY));
}

#[test]
fn verify_reports_a_larger_disk_on_a_smaller_one() {
    let rods = RodState::from_ranks([&[4, 3], &[1, 2], &[]]);
    let err = rods.verify().expect_err("bad ordering");
    assert!(err.to_string().contains("disk 2 rests on disk 1"));
}

#[test]
fn verify_reports_duplicated_and_missing_disks() {
    let duplicated = RodState::from_ranks([&[4, 3], &[2], &[2]]);
    assert!(duplicated
        .verify()
        .expect_err("duplicate")
        .to_string()
        .contains("more than once"));

    let foreign = RodState::from_ranks([&[9, 3], &[2], &[1]]);
    assert!(foreign
        .verify()
        .expect_err("foreign disk")
        .to_string()
        .contains("not part of a 4-disk game"));
}

#[test]
fn solved_only_when_every_disk_is_on_the_destination() {
    let rods = RodState::from_ranks([&[], &[], &[4, 3, 2, 1]]);
    assert!(rods.is_solved(RodIndex::DESTINATION));
    assert!(!rods.is_solved(RodIndex::AUXILIARY));

    let partial = RodState::from_ranks([&[1], &[], &[4, 3, 2]]);
    assert!(!partial.is_solved(RodIndex::DESTINATION));
}
