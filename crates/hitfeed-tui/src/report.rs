//! Plain-text badge report for non-interactive use.

use hitfeed_app::BadgeGenerator;

/// Render the generated badge as labelled lines.
pub fn badge_report(badge: &BadgeGenerator) -> String {
    let output = badge.output();
    format!(
        "Image:    {}\nMarkdown: {}\nHTML:     {}",
        output.image_url,
        output.markdown,
        output.html_source()
    )
}
