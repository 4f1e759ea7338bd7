pub mod banner;
pub mod report;
pub mod tui;

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup of the terminal client (after tracing init).
pub fn init_ui(info: &banner::BannerInfo<'_>) {
    banner::print_welcome(info);
    tui::apply_theme();
}
