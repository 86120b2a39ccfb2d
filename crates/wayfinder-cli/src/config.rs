//! Reads `~/.wayfinder/config.toml` and applies `WAYFINDER_*` overrides.

use std::fs;
use std::path::{Path, PathBuf};

use wayfinder_types::{NavError, NavigationConfig};

/// Return the path to `~/.wayfinder/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".wayfinder").join("config.toml")
}

/// Load the effective configuration: the file (or defaults when it is
/// missing) with environment overrides applied on top.
pub fn load() -> Result<NavigationConfig, NavError> {
    let mut cfg = load_from(&config_path())?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Parse the file at `path`.  Returns `None` if it does not exist.
pub(crate) fn load_from(path: &Path) -> Result<Option<NavigationConfig>, NavError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        NavError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    let cfg = toml::from_str(&raw).map_err(|e| {
        NavError::Config(format!("failed to parse {}: {e}", path.display()))
    })?;
    Ok(Some(cfg))
}

/// Apply `WAYFINDER_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `WAYFINDER_ARRIVAL_RADIUS` | `guidance.arrival_radius_m` |
/// | `WAYFINDER_HYSTERESIS` | `guidance.hysteresis_threshold` |
/// | `WAYFINDER_WARNING_DISTANCE` | `scanner.warning_distance_m` |
/// | `WAYFINDER_SMOOTHING_WINDOW` | `smoothing.window` |
///
/// Values that do not parse, or are out of range, are ignored.
pub fn apply_env_overrides(cfg: &mut NavigationConfig) {
    apply_overrides_with(cfg, |key| std::env::var(key).ok());
}

fn apply_overrides_with(cfg: &mut NavigationConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("WAYFINDER_ARRIVAL_RADIUS")
        && let Some(r) = parse_metres(&v, true)
    {
        cfg.guidance.arrival_radius_m = r;
    }
    if let Some(v) = lookup("WAYFINDER_HYSTERESIS")
        && let Ok(n) = v.trim().parse::<u32>()
        && n > 0
    {
        cfg.guidance.hysteresis_threshold = n;
    }
    if let Some(v) = lookup("WAYFINDER_WARNING_DISTANCE")
        && let Some(d) = parse_metres(&v, false)
    {
        cfg.scanner.warning_distance_m = d;
    }
    if let Some(v) = lookup("WAYFINDER_SMOOTHING_WINDOW")
        && let Ok(n) = v.trim().parse::<usize>()
        && n > 0
    {
        cfg.smoothing.window = n;
    }
}

fn parse_metres(raw: &str, allow_zero: bool) -> Option<f32> {
    let v = raw.trim().parse::<f32>().ok()?;
    let in_range = if allow_zero { v >= 0.0 } else { v > 0.0 };
    (v.is_finite() && in_range).then_some(v)
}
