use notesync_fs::{NormalizedPath, validate_item_name};
use proptest::prelude::*;

proptest! {
    #[test]
    fn accepted_names_round_trip_through_file_names(name in "[A-Za-z0-9 _()-]{1,32}") {
        prop_assume!(!name.trim().is_empty());
        prop_assert!(validate_item_name(&name).is_ok());

        // A created file is named `<name>.txt`; scanning must recover the name
        let path = NormalizedPath::new("/notes").join(&format!("{}.txt", name));
        prop_assert_eq!(path.file_stem(), Some(name.as_str()));
    }

    #[test]
    fn normalized_paths_never_contain_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }
}
