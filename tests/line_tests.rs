use slide_merge::line::collapse_line;

#[test]
fn test_triple_merges_only_the_leading_pair() {
    let collapse = collapse_line(&[2, 2, 2, 0]);

    assert_eq!(collapse.values, vec![4, 2, 0, 0]);
    assert_eq!(collapse.score, 4);
    assert_eq!(collapse.merged_at, vec![0]);
}

#[test]
fn test_gap_between_equal_values_still_merges() {
    let collapse = collapse_line(&[2, 0, 0, 2]);

    assert_eq!(collapse.values, vec![4, 0, 0, 0]);
    assert_eq!(collapse.score, 4);
    assert_eq!(collapse.merged_at, vec![0]);
}

#[test]
fn test_merge_sites_are_result_indices() {
    // the second merge lands at index 1 once the line is compacted
    let collapse = collapse_line(&[2, 2, 4, 4]);

    assert_eq!(collapse.values, vec![4, 8, 0, 0]);
    assert_eq!(collapse.score, 12);
    assert_eq!(collapse.merged_at, vec![0, 1]);
    assert!(collapse.is_merge_site(1));
    assert!(!collapse.is_merge_site(2));
}

#[test]
fn test_merge_product_does_not_merge_again() {
    let collapse = collapse_line(&[2, 2, 4, 0]);

    assert_eq!(collapse.values, vec![4, 4, 0, 0]);
    assert_eq!(collapse.score, 4);
}

#[test]
fn test_four_equal_values_make_two_merges() {
    let collapse = collapse_line(&[4, 4, 4, 4, 0]);

    assert_eq!(collapse.values, vec![8, 8, 0, 0, 0]);
    assert_eq!(collapse.score, 16);
    assert_eq!(collapse.merges(), 2);
}

#[test]
fn test_empty_line() {
    let collapse = collapse_line(&[0, 0, 0, 0, 0]);

    assert_eq!(collapse.values, vec![0; 5]);
    assert_eq!(collapse.score, 0);
    assert!(collapse.merged_at.is_empty());
}

#[test]
fn test_no_pairs_only_slides() {
    let collapse = collapse_line(&[0, 2, 0, 4, 8]);

    assert_eq!(collapse.values, vec![2, 4, 8, 0, 0]);
    assert_eq!(collapse.score, 0);
    assert!(collapse.merged_at.is_empty());
}

#[test]
fn test_already_packed_line_is_unchanged() {
    let line = [2, 4, 8, 16];
    let collapse = collapse_line(&line);

    assert_eq!(collapse.values, line.to_vec());
    assert_eq!(collapse.score, 0);
}

#[test]
fn test_non_adjacent_equal_values_do_not_merge() {
    let collapse = collapse_line(&[2, 4, 2, 0]);

    assert_eq!(collapse.values, vec![2, 4, 2, 0]);
    assert_eq!(collapse.score, 0);
}

#[test]
fn test_huge_values_saturate_instead_of_overflowing() {
    let half = 1 << 31;
    let collapse = collapse_line(&[half, half, half, half]);

    assert_eq!(collapse.values, vec![u32::MAX, u32::MAX, 0, 0]);
    assert_eq!(collapse.score, u32::MAX);
    assert_eq!(collapse.merged_at, vec![0, 1]);
}
