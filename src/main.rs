use anyhow::Context;
use heliofield::{app::EditorApp, config::EditorConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::from_env().context("Invalid HELIOFIELD_* setting")?;
    log::info!(
        "Starting field editor ({} indicators, {}px gizmo, {:?} corner)",
        config.gizmo.style,
        config.gizmo.overlay_extent_px,
        config.gizmo.corner
    );

    EditorApp::new(config)?.run()
}
