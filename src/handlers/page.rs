use std::fmt::Write as _;

use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{html, Parser};

use crate::post::image::ImageInput;
use crate::post::preferences::{Preferences, Tone, MAX_MAX_CHARS, MIN_MAX_CHARS};
use crate::post::presenter::{char_count_badge, ResultView, DOWNLOAD_FILE_NAME};

const PAGE_TITLE: &str = "X Post Generator";
const INTRO_MARKDOWN: &str =
    "Upload an image and get a compelling **X (Twitter)** post generated for it.";
const DESCRIPTION_LABEL: &str = "What's in this image? (Optional but recommended)";
const DESCRIPTION_HELP: &str = "Describe what's in the image to help generate a more accurate post";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; }
aside { width: 260px; padding: 1.5rem; background: #f0f2f6; }
main { flex: 1; padding: 1.5rem 2rem; }
.columns { display: flex; gap: 2rem; }
.columns > section { flex: 1; }
textarea { width: 100%; box-sizing: border-box; }
img.preview { max-width: 100%; border-radius: 6px; }
.warning { background: #fff4d6; padding: .75rem 1rem; border-radius: 6px; }
.error { background: #ffe3e3; color: #8a1f1f; padding: .75rem 1rem; border-radius: 6px; }
.toast { position: fixed; bottom: 1.5rem; right: 1.5rem; background: #222; color: #fff; padding: .75rem 1rem; border-radius: 6px; }
.actions { display: flex; gap: .75rem; align-items: center; }
"#;

const COPY_SCRIPT: &str = r#"
function copyPost() {
  const area = document.getElementById('post-content');
  if (area && navigator.clipboard) { navigator.clipboard.writeText(area.value); }
}
"#;

/// Everything the page needs, borrowed from the session for one render.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub preferences: &'a Preferences,
    pub description: &'a str,
    pub image: Option<&'a ImageInput>,
    pub view: Option<&'a ResultView>,
    pub warning: Option<&'a str>,
    pub toast: Option<&'a str>,
    pub copied: bool,
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut escaped, text);
    escaped
}

fn render_markdown(markdown: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(markdown));
    rendered
}

fn checked(value: bool) -> &'static str {
    if value {
        " checked"
    } else {
        ""
    }
}

fn render_settings(out: &mut String, preferences: &Preferences) {
    out.push_str("<aside>\n<h2>Settings</h2>\n");
    out.push_str("<label for=\"tone\">Select tone</label><br>\n");
    out.push_str("<select id=\"tone\" name=\"tone\" form=\"post-form\">\n");
    for tone in Tone::ALL {
        let selected = if tone == preferences.tone {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<option value=\"{label}\"{selected}>{label}</option>",
            label = tone.label()
        );
    }
    out.push_str("</select>\n");

    let _ = writeln!(
        out,
        "<p><label><input type=\"checkbox\" name=\"include_hashtags\" form=\"post-form\"{}> Include hashtags</label></p>",
        checked(preferences.include_hashtags)
    );
    let _ = writeln!(
        out,
        "<p><label><input type=\"checkbox\" name=\"include_emoji\" form=\"post-form\"{}> Include emoji</label></p>",
        checked(preferences.include_emoji)
    );
    let _ = writeln!(
        out,
        "<p><label for=\"max_chars\">Max characters: <output id=\"max_chars_value\">{value}</output></label><br>\
         <input type=\"range\" id=\"max_chars\" name=\"max_chars\" form=\"post-form\" min=\"{MIN_MAX_CHARS}\" max=\"{MAX_MAX_CHARS}\" value=\"{value}\" \
         oninput=\"document.getElementById('max_chars_value').value = this.value\"></p>",
        value = preferences.max_chars()
    );
    out.push_str("</aside>\n");
}

fn render_upload(out: &mut String, ctx: &PageContext<'_>) {
    out.push_str("<section>\n<h3>Upload Your Image</h3>\n");
    out.push_str(
        "<form id=\"post-form\" method=\"post\" action=\"/generate\" enctype=\"multipart/form-data\">\n",
    );
    out.push_str(
        "<input type=\"file\" name=\"image\" accept=\".jpg,.jpeg,.png,image/jpeg,image/png\"><br><br>\n",
    );
    let _ = writeln!(
        out,
        "<label for=\"description\">{}</label><br>\n<textarea id=\"description\" name=\"description\" rows=\"4\" title=\"{}\">{}</textarea>",
        escape(DESCRIPTION_LABEL),
        escape(DESCRIPTION_HELP),
        escape(ctx.description)
    );
    let _ = writeln!(out, "<small>{}</small>", escape(DESCRIPTION_HELP));
    out.push_str("<p><button type=\"submit\">Generate Post</button></p>\n</form>\n");

    if let Some(image) = ctx.image {
        let _ = writeln!(
            out,
            "<figure><img class=\"preview\" src=\"{}\" alt=\"Uploaded Image\"><figcaption>Uploaded Image ({}×{})</figcaption></figure>",
            image.data_url(),
            image.width,
            image.height
        );
    }
    out.push_str("</section>\n");
}

fn render_result(out: &mut String, view: &ResultView, copied: bool) {
    out.push_str("<section>\n");
    match view {
        ResultView::Post(post) => {
            let badge = char_count_badge(post);
            out.push_str("<h3>Generated Post</h3>\n");
            let _ = writeln!(
                out,
                "<label for=\"post-content\">Post Content</label>\n<textarea id=\"post-content\" rows=\"8\">{}</textarea>",
                escape(&post.text)
            );
            let _ = writeln!(
                out,
                "<p style=\"color:{}\">{}</p>",
                badge.color,
                escape(&badge.label)
            );
            out.push_str("<div class=\"actions\">\n");
            let _ = writeln!(
                out,
                "<form method=\"post\" action=\"/copy\"><button type=\"submit\" onclick=\"copyPost()\">Copy to Clipboard{}</button></form>",
                if copied { " ✓" } else { "" }
            );
            let _ = writeln!(
                out,
                "<a href=\"/download\" download=\"{DOWNLOAD_FILE_NAME}\">Download as Text</a>"
            );
            out.push_str(
                "<button type=\"submit\" form=\"post-form\" formaction=\"/regenerate\">Regenerate with Same Settings</button>\n",
            );
            out.push_str("</div>\n");
        }
        ResultView::Error(message) => {
            let _ = writeln!(out, "<div class=\"error\">{}</div>", escape(message));
        }
    }
    out.push_str("</section>\n");
}

pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n<script>{COPY_SCRIPT}</script>\n</head>\n<body>\n"
    );

    render_settings(&mut out, ctx.preferences);

    let _ = writeln!(out, "<main>\n<h1>✖️ {PAGE_TITLE} with Gemini</h1>");
    out.push_str(&render_markdown(INTRO_MARKDOWN));

    if let Some(warning) = ctx.warning {
        let _ = writeln!(out, "<div class=\"warning\">{}</div>", escape(warning));
    }

    out.push_str("<div class=\"columns\">\n");
    render_upload(&mut out, ctx);
    if let Some(view) = ctx.view {
        render_result(&mut out, view, ctx.copied);
    }
    out.push_str("</div>\n</main>\n");

    if let Some(toast) = ctx.toast {
        let _ = writeln!(out, "<div class=\"toast\">✓ {}</div>", escape(toast));
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::image::test_images;
    use crate::post::outcome::{GeneratedPost, GenerationOutcome};

    fn render(view: Option<&ResultView>, description: &str) -> String {
        let preferences = Preferences::default();
        render_page(&PageContext {
            preferences: &preferences,
            description,
            image: None,
            view,
            warning: None,
            toast: None,
            copied: false,
        })
    }

    #[test]
    fn idle_page_has_form_and_no_result_panel() {
        let page = render(None, "");
        assert!(page.contains("action=\"/generate\""));
        assert!(page.contains("<strong>X (Twitter)</strong>"));
        assert!(page.contains("<option value=\"Casual\" selected>Casual</option>"));
        assert!(page.contains("min=\"100\" max=\"280\" value=\"250\""));
        assert!(!page.contains("Generated Post"));
        assert!(!page.contains("Download as Text"));
    }

    #[test]
    fn post_view_shows_text_badge_and_actions() {
        let view = ResultView::Post(GeneratedPost::new("Nap champion <3 #CatsOfX"));
        let page = render(Some(&view), "");
        assert!(page.contains("Nap champion &lt;3 #CatsOfX"));
        assert!(page.contains("<p style=\"color:green\">Characters: 24/280</p>"));
        assert!(page.contains("Copy to Clipboard"));
        assert!(page.contains("href=\"/download\""));
        assert!(page.contains("formaction=\"/regenerate\""));
    }

    #[test]
    fn over_limit_post_is_red() {
        let view = ResultView::Post(GeneratedPost::new("a".repeat(300)));
        let page = render(Some(&view), "");
        assert!(page.contains("<p style=\"color:red\">Characters: 300/280</p>"));
    }

    #[test]
    fn error_view_has_no_result_panel_or_download() {
        let view = ResultView::from_outcome(GenerationOutcome::Failed("timed out".to_string()));
        let page = render(Some(&view), "");
        assert!(page.contains("<div class=\"error\">Error generating post: timed out</div>"));
        assert!(!page.contains("Generated Post"));
        assert!(!page.contains("post-content\""));
        assert!(!page.contains("Download as Text"));
        assert!(!page.contains("formaction=\"/regenerate\""));
    }

    #[test]
    fn empty_view_shows_no_response_message() {
        let view = ResultView::from_outcome(GenerationOutcome::Empty);
        let page = render(Some(&view), "");
        assert!(page.contains("No response generated from Gemini"));
        assert!(!page.contains("Download as Text"));
    }

    #[test]
    fn description_is_escaped_in_textarea() {
        let page = render(None, "</textarea><script>alert(1)</script>");
        assert!(page.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(!page.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn preview_toast_and_warning_render() {
        let preferences = Preferences::default();
        let image = ImageInput::from_upload(test_images::png(), "").unwrap();
        let page = render_page(&PageContext {
            preferences: &preferences,
            description: "",
            image: Some(&image),
            view: None,
            warning: Some("Please upload an image to generate a post."),
            toast: Some("Post copied to clipboard!"),
            copied: true,
        });
        assert!(page.contains("src=\"data:image/png;base64,"));
        assert!(page.contains("Uploaded Image (4×3)"));
        assert!(page.contains("<div class=\"toast\">✓ Post copied to clipboard!</div>"));
        assert!(page.contains("<div class=\"warning\">Please upload an image"));
    }
}
