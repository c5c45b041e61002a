//! Tests for icon selection and resolution.

use std::path::PathBuf;

use super::{FLAG_SIZES, Icon, IconRef, IconSink, IconTheme, LogIconSink};

mod icon {
    use super::*;

    #[test]
    fn empty_code_is_default() {
        assert_eq!(Icon::for_country(""), Icon::Default);
    }

    #[test]
    fn code_is_lowercased() {
        assert_eq!(Icon::for_country("DE"), Icon::Flag("de".to_string()));
    }

    #[test]
    fn display_names_icon() {
        assert_eq!(Icon::Default.to_string(), "default");
        assert_eq!(Icon::for_country("fr").to_string(), "flag:fr");
    }
}

mod theme {
    use super::*;

    #[test]
    fn default_theme_matches_bundled_layout() {
        let theme = IconTheme::default();

        assert_eq!(theme.flags_dir, PathBuf::from("flags"));
        assert_eq!(theme.default_icon, PathBuf::from("icon.png"));
    }

    #[test]
    fn resolves_default_icon() {
        let theme = IconTheme::new("/opt/flags", "/opt/icon.png");

        assert_eq!(
            theme.resolve(&Icon::Default),
            IconRef::Default(PathBuf::from("/opt/icon.png"))
        );
    }

    #[test]
    fn resolves_flag_for_every_size() {
        let theme = IconTheme::default();
        let icon = theme.resolve(&Icon::for_country("de"));

        let IconRef::Sized(paths) = &icon else {
            panic!("expected sized icon, got {icon:?}");
        };
        assert_eq!(paths.len(), FLAG_SIZES.len());
        for size in FLAG_SIZES {
            assert_eq!(icon.path_for(size), Some(&PathBuf::from("flags/de.png")));
        }
    }

    #[test]
    fn flag_path_lowercases_code() {
        let theme = IconTheme::default();
        assert_eq!(theme.flag_path("US"), PathBuf::from("flags/us.png"));
    }

    #[test]
    fn sized_icon_has_no_path_for_unknown_size() {
        let icon = IconTheme::default().resolve(&Icon::for_country("jp"));
        assert!(icon.path_for(64).is_none());
    }

    #[test]
    fn default_icon_has_path_for_any_size() {
        let icon = IconTheme::default().resolve(&Icon::Default);
        assert_eq!(icon.path_for(64), Some(&PathBuf::from("icon.png")));
    }
}

#[test]
fn log_sink_accepts_both_variants() {
    let theme = IconTheme::default();
    LogIconSink.set_icon(&theme.resolve(&Icon::Default));
    LogIconSink.set_icon(&theme.resolve(&Icon::for_country("it")));
}
