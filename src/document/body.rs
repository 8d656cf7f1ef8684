use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::{ArticleResult, ImageDescriptor};

/// Article text as HTML paragraphs: blank lines split paragraphs, single
/// newlines become `<br>`.
pub fn format_content_html(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    let paragraphs: Vec<String> = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let lines: Vec<String> = p
                .lines()
                .map(|line| encode_text(line.trim()).into_owned())
                .collect();
            format!("<p>{}</p>", lines.join("<br>\n"))
        })
        .collect();

    if paragraphs.is_empty() {
        "<p class=\"empty\">No content</p>".to_string()
    } else {
        paragraphs.join("\n")
    }
}

/// Cover figure built from the first image, or nothing.
pub fn cover_image_html(result: &ArticleResult) -> String {
    match result.images().first() {
        Some(image) => format!(
            "<div class=\"cover\"><img src=\"{}\" alt=\"{}\"></div>",
            encode_double_quoted_attribute(&image.src),
            encode_double_quoted_attribute(image.alt.as_deref().unwrap_or(result.display_title())),
        ),
        None => String::new(),
    }
}

pub fn format_images_html(images: &[ImageDescriptor]) -> String {
    if images.is_empty() {
        return String::new();
    }

    let figures: Vec<String> = images
        .iter()
        .map(|image| {
            let caption = image
                .caption
                .as_deref()
                .map(|c| format!("<figcaption>{}</figcaption>", encode_text(c)))
                .unwrap_or_default();
            format!(
                "<figure><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{}</figure>",
                encode_double_quoted_attribute(&image.src),
                encode_double_quoted_attribute(image.alt.as_deref().unwrap_or("")),
                caption
            )
        })
        .collect();

    format!(
        "<section class=\"gallery\">\n{}\n</section>",
        figures.join("\n")
    )
}
