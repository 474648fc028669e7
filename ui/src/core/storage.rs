//! Local persistence for user settings.
//!
//! Web builds keep settings in `localStorage`; native builds (used by the
//! test suite and any future desktop shell) keep a small file under the
//! platform config directory. Failures are swallowed: a missing or broken
//! store only costs the user their saved preference.

const LANGUAGE_KEY: &str = "language";

pub fn load_language_code() -> Option<String> {
    read_setting(LANGUAGE_KEY)
}

pub fn save_language_code(code: &str) {
    write_setting(LANGUAGE_KEY, code);
}

#[cfg(target_arch = "wasm32")]
fn read_setting(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn write_setting(key: &str, value: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path(key: &str) -> Option<std::path::PathBuf> {
    let dirs = directories::ProjectDirs::from("uz", "Skillwave", "skillwave")?;
    Some(dirs.config_dir().join(format!("{key}.txt")))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_setting(key: &str) -> Option<String> {
    let path = settings_path(key)?;
    let value = std::fs::read_to_string(path).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_setting(key: &str, value: &str) {
    if let Some(path) = settings_path(key) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, value);
    }
}
