mod linked_file_tests {
    use std::path::{Path, PathBuf};

    use appartmap::persistence::linked_file::{FileGate, LinkedCsvFile, Permission};

    struct ScriptedGate {
        answer: Permission,
        prompts: usize,
    }

    impl ScriptedGate {
        fn new(answer: Permission) -> ScriptedGate {
            ScriptedGate { answer, prompts: 0 }
        }
    }

    impl FileGate for ScriptedGate {
        fn request_write(&mut self, _path: &Path) -> Permission {
            self.prompts += 1;
            self.answer
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("appartmap_{}_{}.csv", name, std::process::id()))
    }

    #[test]
    fn starts_unlinked_with_writes_disabled() {
        let file = LinkedCsvFile::new();
        assert!(!file.is_linked());
        assert!(file.path().is_none());

        let err = file.write_all("loyer\n").unwrap_err();
        assert!(err.to_string().contains("export download"));
    }

    #[test]
    fn denied_grant_leaves_the_state_unlinked() {
        let mut file = LinkedCsvFile::new();
        let mut gate = ScriptedGate::new(Permission::Denied);

        let result = file.link(&mut gate, temp_path("denied"));

        assert!(result.is_err());
        assert!(!file.is_linked());
        assert_eq!(gate.prompts, 1);
    }

    #[test]
    fn granted_link_enables_full_contents_writes() {
        let path = temp_path("granted");
        let mut file = LinkedCsvFile::new();
        let mut gate = ScriptedGate::new(Permission::Granted);

        file.link(&mut gate, path.clone()).unwrap();
        assert!(file.is_linked());
        assert_eq!(file.path(), Some(path.as_path()));

        file.write_all("loyer,adresse\n800,1 rue X\n").unwrap();
        file.write_all("loyer,adresse\n900,2 rue Y\n").unwrap();

        // Each write replaces the previous contents entirely.
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "loyer,adresse\n900,2 rue Y\n");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn failed_write_keeps_the_link() {
        let mut file = LinkedCsvFile::new();
        let mut gate = ScriptedGate::new(Permission::Granted);
        let missing_dir = std::env::temp_dir()
            .join("appartmap_missing_dir")
            .join("out.csv");

        file.link(&mut gate, missing_dir).unwrap();
        assert!(file.write_all("loyer\n").is_err());
        assert!(file.is_linked());
    }
}

mod json_tests {
    use appartmap::models::listing::Listing;
    use appartmap::persistence::json::to_pretty_json;

    #[test]
    fn export_is_an_indented_array_with_explicit_nulls() {
        let listings = vec![Listing {
            rent: Some(800),
            address: Some("1 rue X".to_string()),
            latitude: Some(43.6),
            longitude: Some(3.88),
            ..Default::default()
        }];

        let json = to_pretty_json(&listings).unwrap();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"loyer\": 800"));
        assert!(json.contains("\"adresse\": \"1 rue X\""));
        assert!(json.contains("\"parking\": null"));

        let round: Vec<Listing> = serde_json::from_str(&json).unwrap();
        assert_eq!(round, listings);
    }
}
