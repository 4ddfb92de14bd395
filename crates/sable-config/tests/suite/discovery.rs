use sable_config::{discover_config_path, load_for_workspace};

// `SABLE_CONFIG_PATH` is process-global; these tests only cover discovery
// without it.

#[test]
fn no_config_means_defaults() {
    if std::env::var_os(sable_config::SABLE_CONFIG_ENV_VAR).is_some() {
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, path, diagnostics) = load_for_workspace(dir.path()).expect("load");
    assert_eq!(config, Default::default());
    assert_eq!(path, None);
    assert!(diagnostics.is_empty());
}

#[test]
fn plain_name_wins_over_hidden_name() {
    if std::env::var_os(sable_config::SABLE_CONFIG_ENV_VAR).is_some() {
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".sable.toml"), "").expect("write");
    assert_eq!(
        discover_config_path(dir.path()),
        Some(dir.path().join(".sable.toml"))
    );

    std::fs::write(dir.path().join("sable.toml"), "").expect("write");
    assert_eq!(
        discover_config_path(dir.path()),
        Some(dir.path().join("sable.toml"))
    );
}
