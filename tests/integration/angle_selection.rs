use angleshot::angle::{select_angles, CAMERA_ANGLES, MAX_IMAGES, MIN_IMAGES};
use std::collections::HashSet;

#[test]
fn every_valid_count_yields_distinct_catalog_entries() {
    for n in MIN_IMAGES..=MAX_IMAGES {
        let picked = select_angles(&CAMERA_ANGLES, n).unwrap();
        assert_eq!(picked.len(), n);
        let seeds: HashSet<_> = picked.iter().map(|a| a.prompt_seed).collect();
        assert_eq!(seeds.len(), n, "duplicate angle for n = {}", n);
        assert!(picked.iter().all(|a| CAMERA_ANGLES.contains(a)));
    }
}

#[test]
fn full_catalog_selection_is_verbatim() {
    for _ in 0..5 {
        assert_eq!(
            select_angles(&CAMERA_ANGLES, CAMERA_ANGLES.len()).unwrap(),
            CAMERA_ANGLES.to_vec()
        );
    }
}

#[test]
fn partial_selection_is_random() {
    let distinct: HashSet<Vec<&str>> = (0..50)
        .map(|_| {
            select_angles(&CAMERA_ANGLES, 2)
                .unwrap()
                .iter()
                .map(|a| a.prompt_seed)
                .collect()
        })
        .collect();
    assert!(distinct.len() > 1);
}
