// SPDX-License-Identifier: MPL-2.0
use everlasting_moments::app::{App, Message, Screen};
use everlasting_moments::application::{Direction, GalleryFilter};
use everlasting_moments::config::{Config, PhotoEntry};
use everlasting_moments::domain::{CategoryFilter, PhotoCategory};
use everlasting_moments::ui::album;
use everlasting_moments::ui::gate_screen;
use everlasting_moments::ui::lightbox::{self, Effect, TokenSource};
use everlasting_moments::ui::state::ScrollLock;
use std::sync::Arc;

fn app() -> App {
    App::with_config(Config::default(), Some("en-US".to_string()), None)
}

fn unlock(app: &mut App) {
    let _ = app.update(Message::Gate(gate_screen::Message::InputChanged(
        "password123".to_string(),
    )));
    let _ = app.update(Message::Gate(gate_screen::Message::Submit));
}

fn reception() -> GalleryFilter {
    let catalog = Config::default().catalog().expect("built-in catalog");
    let mut gallery = GalleryFilter::new(Arc::new(catalog));
    gallery.set_category(CategoryFilter::Only(PhotoCategory::Reception));
    gallery
}

/// Drives one lightbox navigation the way the app does: the cross-fade
/// timer fires, then the advance effect moves the shared selection.
fn navigate(state: &mut lightbox::State, gallery: &mut GalleryFilter, message: lightbox::Message) {
    let Effect::Schedule { token, kind, .. } = state.handle(message) else {
        panic!("navigation should schedule a cross-fade");
    };
    let Effect::Advance(direction) = state.handle(lightbox::Message::TimerFired { token, kind })
    else {
        panic!("cross-fade should end with an advance");
    };
    gallery.step(direction);
    let photo = gallery.selected_photo().expect("selection").clone();
    state.show(photo.image_url, photo.alt, None);
}

fn fade_in(state: &mut lightbox::State, effect: Effect) {
    if let Effect::Schedule { token, kind, .. } = effect {
        state.handle(lightbox::Message::TimerFired { token, kind });
    }
}

#[test]
fn wrong_password_stays_on_gate() {
    let mut app = app();
    let _ = app.update(Message::Gate(gate_screen::Message::InputChanged(
        "Password123".to_string(),
    )));
    let _ = app.update(Message::Gate(gate_screen::Message::Submit));
    assert_eq!(app.screen(), Screen::Gate);
}

#[tokio::test]
async fn correct_password_reveals_album() {
    let mut app = app();
    unlock(&mut app);
    assert_eq!(app.screen(), Screen::Album);
    assert_eq!(app.notifications().visible_count(), 0);
}

#[test]
fn reception_navigation_wraps_in_both_directions() {
    let mut gallery = reception();
    assert_eq!(gallery.len(), 4);
    gallery.open(2).expect("open third reception photo");

    let lock = ScrollLock::new();
    let photo = gallery.selected_photo().expect("selection").clone();
    let (mut state, effect) =
        lightbox::State::open(&lock, &TokenSource::new(), photo.image_url, photo.alt, None, None);
    fade_in(&mut state, effect);

    let mut visited = Vec::new();
    for _ in 0..4 {
        navigate(&mut state, &mut gallery, lightbox::Message::ArrowRight);
        visited.push(gallery.selected_index().expect("selection"));
    }
    assert_eq!(visited, vec![3, 0, 1, 2]);

    navigate(&mut state, &mut gallery, lightbox::Message::Previous);
    navigate(&mut state, &mut gallery, lightbox::Message::Previous);
    navigate(&mut state, &mut gallery, lightbox::Message::Previous);
    assert_eq!(gallery.selected_index(), Some(3));
    assert_eq!(
        state.url(),
        gallery.selected_photo().expect("selection").image_url
    );
}

#[test]
fn closing_the_lightbox_releases_page_scroll() {
    let mut gallery = reception();
    gallery.open(0).expect("open");

    let lock = ScrollLock::new();
    let (mut state, effect) = lightbox::State::open(&lock, &TokenSource::new(), "a", "b", None, None);
    fade_in(&mut state, effect);
    assert!(lock.is_locked());

    let Effect::Schedule { token, kind, .. } = state.handle(lightbox::Message::Escape) else {
        panic!("close should schedule the fade-out");
    };
    assert!(lock.is_locked(), "page stays locked during the fade-out");

    assert_eq!(
        state.handle(lightbox::Message::TimerFired { token, kind }),
        Effect::Closed
    );
    gallery.close();
    assert!(!lock.is_locked());
    assert_eq!(gallery.selected_index(), None);
}

#[tokio::test]
async fn tile_opens_lightbox_and_filter_change_closes_it() {
    let mut app = app();
    unlock(&mut app);

    let _ = app.update(Message::Album(album::Message::OpenPhoto(1)));
    assert!(app.lightbox().is_some());
    assert!(app.is_scroll_locked());
    assert_eq!(app.gallery().selected_index(), Some(1));

    // A second tile press while open is ignored.
    let _ = app.update(Message::Album(album::Message::OpenPhoto(3)));
    assert_eq!(app.gallery().selected_index(), Some(1));

    let _ = app.update(Message::Album(album::Message::FilterSelected(
        CategoryFilter::Only(PhotoCategory::Portraits),
    )));
    assert!(app.lightbox().is_none());
    assert!(!app.is_scroll_locked());
    assert_eq!(app.gallery().selected_index(), None);
    assert_eq!(app.gallery().category(), CategoryFilter::Only(PhotoCategory::Portraits));
}

#[tokio::test]
async fn out_of_range_tile_shows_an_error() {
    let mut app = app();
    unlock(&mut app);

    let _ = app.update(Message::Album(album::Message::OpenPhoto(99)));
    assert!(app.lightbox().is_none());
    assert!(!app.is_scroll_locked());
    assert_eq!(app.notifications().visible_count(), 1);
}

#[test]
fn invalid_catalog_falls_back_to_built_in_album() {
    let mut config = Config::default();
    let duplicate: PhotoEntry = config.photos[0].clone();
    config.photos.push(duplicate);

    let app = App::with_config(config, Some("en-US".to_string()), None);
    assert_eq!(app.catalog().photos().len(), Config::default().photos.len());
    assert_eq!(app.notifications().visible_count(), 1);
}

#[test]
fn empty_category_yields_empty_gallery() {
    let mut config = Config::default();
    config
        .photos
        .retain(|photo| photo.category != everlasting_moments::config::CategoryEntry::Portraits);
    let catalog = config.catalog().expect("catalog");
    let mut gallery = GalleryFilter::new(Arc::new(catalog));

    gallery.set_category(CategoryFilter::Only(PhotoCategory::Portraits));
    assert!(gallery.is_empty());
    assert!(gallery.open(0).is_err());
    gallery.step(Direction::Next);
    assert_eq!(gallery.selected_index(), None);
}

#[test]
fn stale_timer_from_a_dropped_session_is_ignored() {
    let lock = ScrollLock::new();
    let tokens = TokenSource::new();

    let (mut first, effect) = lightbox::State::open(&lock, &tokens, "a", "a", None, None);
    fade_in(&mut first, effect);
    let Effect::Schedule {
        token: stale,
        kind: stale_kind,
        ..
    } = first.handle(lightbox::Message::Next)
    else {
        panic!("navigation should schedule a cross-fade");
    };
    // A filter change drops the session with its cross-fade still in flight.
    drop(first);

    let (mut second, effect) = lightbox::State::open(&lock, &tokens, "b", "b", None, None);
    fade_in(&mut second, effect);
    assert!(matches!(
        second.handle(lightbox::Message::Next),
        Effect::Schedule { .. }
    ));
    assert_eq!(
        second.handle(lightbox::Message::TimerFired {
            token: stale,
            kind: stale_kind,
        }),
        Effect::None
    );
    assert!(second.is_transitioning());
}
