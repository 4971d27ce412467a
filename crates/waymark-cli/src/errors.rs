use color_eyre::Result;

/// Install the color-eyre report and panic hooks.
pub fn init() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .display_location_section(cfg!(debug_assertions))
        .install()
}
