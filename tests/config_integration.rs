// SPDX-License-Identifier: MPL-2.0
use everlasting_moments::config::{self, Config, CONFIG_FILE};
use everlasting_moments::i18n::fluent::I18n;
use tempfile::tempdir;

#[test]
fn language_follows_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join(CONFIG_FILE);

    let mut english = Config::default();
    english.general.language = Some("en-US".to_string());
    config::save_to_path(&english, &path).expect("Failed to write english config");
    let (loaded, warning) = config::load_with_override(Some(path.clone()));
    assert!(warning.is_none());
    assert_eq!(I18n::new(None, &loaded).current_locale().to_string(), "en-US");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("Failed to write french config");
    let (loaded, _) = config::load_with_override(Some(path));
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("download-dialog-title"), "Enregistrer l'album");
}

#[test]
fn command_line_language_wins_over_config() {
    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), &french);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn written_default_album_reloads_identically() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("out").join(CONFIG_FILE);

    config::save_to_path(&Config::default(), &path).expect("Failed to write album");
    let loaded = config::load_from_path(&path).expect("Failed to reload album");

    assert_eq!(loaded, Config::default());
    let catalog = loaded.catalog().expect("catalog");
    assert_eq!(catalog.event().first_name, "Olivia");
}

#[test]
fn custom_album_drives_the_catalog() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(
        &path,
        r#"
        [event]
        first_name = "Ana"
        second_name = "Leo"
        date = "June 1, 2025"

        [[stories]]
        id = 1
        image_url = "https://example.org/story.jpg"
        caption = "Sunrise"

        [[photos]]
        id = 4
        image_url = "https://example.org/photos/800/600"
        category = "portraits"
        alt = "Portrait"
        "#,
    )
    .expect("Failed to write album");

    let (loaded, warning) = config::load_with_override(Some(path));
    assert!(warning.is_none());
    let catalog = loaded.catalog().expect("catalog");
    assert_eq!(catalog.event().second_name, "Leo");
    assert_eq!(catalog.stories().len(), 1);
    assert_eq!(catalog.photos()[0].id, 4);
}
