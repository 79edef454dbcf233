// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use sweep_app_core::config::{ConfigError, ConfigService};
use sweep_app_core::prefs::{PrefsPort, SessionPrefs, SESSION_PREFS_KEY};
use sweep_core::GameConfig;
use sweep_dry_tests::{FailOn, InMemoryConfigStore};

#[test]
fn missing_prefs_load_as_none() {
    let store = InMemoryConfigStore::new();
    let service = ConfigService::new(store.clone());
    assert_eq!(service.load_prefs().unwrap(), None);
    assert_eq!(store.load_count(), 1);
}

#[test]
fn saved_prefs_come_back_unchanged() {
    let store = InMemoryConfigStore::new();
    let service = ConfigService::new(store.clone());
    let prefs = SessionPrefs {
        game: GameConfig {
            grid_size: 8,
            root_probability: 0.5,
            ..GameConfig::default()
        },
        seed: Some(1234),
        autopilot: true,
    };
    service.save_prefs(&prefs).unwrap();
    assert!(store.contains_key(SESSION_PREFS_KEY));
    assert_eq!(store.saved_prefs().as_ref(), Some(&prefs));
    assert_eq!(service.load_prefs().unwrap(), Some(prefs));
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let store = InMemoryConfigStore::with_entry(SESSION_PREFS_KEY, br#"{ "autopilot": true }"#);
    let service = ConfigService::new(store);
    let prefs = service.load_prefs().unwrap().unwrap();
    assert!(prefs.autopilot);
    assert_eq!(prefs.seed, None);
    assert_eq!(prefs.game, GameConfig::default());
}

#[test]
fn unplayable_constants_are_refused_both_ways() {
    let store = InMemoryConfigStore::new();
    let service = ConfigService::new(store.clone());
    let bad = SessionPrefs {
        game: GameConfig {
            cross_edge_probability: 1.5,
            ..GameConfig::default()
        },
        ..SessionPrefs::default()
    };
    assert!(matches!(service.save_prefs(&bad), Err(ConfigError::Invalid(_))));
    assert_eq!(store.save_count(), 0);

    let raw = InMemoryConfigStore::with_entry(
        SESSION_PREFS_KEY,
        br#"{ "game": { "min_spawn_interval_ms": 5000 } }"#,
    );
    let service = ConfigService::new(raw);
    assert!(matches!(service.load_prefs(), Err(ConfigError::Invalid(_))));
}

#[test]
fn store_failures_surface() {
    let store = InMemoryConfigStore::new();
    store.fail_on(FailOn {
        load: true,
        save: false,
    });
    let service = ConfigService::new(store);
    assert!(matches!(service.load_prefs(), Err(ConfigError::Other(_))));
}

#[test]
fn corrupt_json_is_a_serde_error() {
    let store = InMemoryConfigStore::with_entry(SESSION_PREFS_KEY, b"{ not json");
    let service = ConfigService::new(store);
    assert!(matches!(service.load_prefs(), Err(ConfigError::Serde(_))));
}

#[test]
fn load_or_default_fills_in_missing_prefs() {
    let service = ConfigService::new(InMemoryConfigStore::new());
    let prefs: SessionPrefs = service.load_or_default().unwrap();
    assert_eq!(prefs, SessionPrefs::default());
}

#[test]
fn oversized_grid_in_saved_prefs_is_refused() {
    let store = InMemoryConfigStore::with_entry(
        SESSION_PREFS_KEY,
        br#"{ "game": { "grid_size": 60000 } }"#,
    );
    let service = ConfigService::new(store);
    assert!(matches!(
        service.load_prefs(),
        Err(ConfigError::Invalid(sweep_core::ConfigError::GridTooLarge(60_000)))
    ));
}
