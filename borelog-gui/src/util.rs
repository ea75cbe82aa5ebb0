//! Numeric conversions and platform helpers for borelog-gui.

use std::path::Path;

use anyhow::Context;

/// Convert f32 to u8 with clamping to [0, 255].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f32_to_u8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 255.0);
    clamped.round() as u8
}

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Convert f64 to f32 with allowed precision loss (plot geometry).
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_f32(value: f64) -> f32 {
    value as f32
}

/// Open a file with the platform's default handler.
///
/// The caller has already confirmed the file exists; spawning still reports
/// launcher failures.
pub fn open_external(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = std::process::Command::new("open");
        c.arg(path);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut command = {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(path);
        c
    };

    command
        .spawn()
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_u8_clamps() {
        assert_eq!(f32_to_u8(-4.0), 0);
        assert_eq!(f32_to_u8(128.4), 128);
        assert_eq!(f32_to_u8(300.0), 255);
    }
}
