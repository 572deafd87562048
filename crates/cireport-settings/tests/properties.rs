//! Property-based tests for cireport-settings.

use cireport_settings::CoverageFilter;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn empty_include_keeps_everything_not_excluded(path in "[a-z/]{1,40}") {
        let filter = CoverageFilter { include: Vec::new(), exclude: Vec::new() };
        prop_assert!(filter.keeps(&path));
    }

    #[test]
    fn exclude_always_wins(prefix in "[a-z]{0,10}", suffix in "[a-z]{0,10}") {
        let filter = CoverageFilter {
            include: vec![prefix.clone()],
            exclude: vec!["/usr/".to_string()],
        };
        let path = format!("{prefix}/usr/{suffix}");
        prop_assert!(!filter.keeps(&path));
    }

    #[test]
    fn include_dirs_always_end_with_slash(dirs in prop::collection::vec("[a-z]{1,8}", 0..5)) {
        let filter = CoverageFilter::default().with_include_dirs(&dirs);
        prop_assert_eq!(filter.include.len(), dirs.len());
        prop_assert!(filter.include.iter().all(|p| p.ends_with('/')));
    }
}
