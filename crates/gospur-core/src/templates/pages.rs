//! HTML pages assembled from fragments rather than templates.
//!
//! Page bodies contain Go template actions (`{{ .Ctx.Title }}`), so they
//! are never passed through tera. They are built by concatenation and
//! pretty-printed with [`format_html`].

use crate::stack::{CssStrategy, Extra, StackConfig, UiLibrary, WebFramework};
use crate::templates::files::Page;

const PLAIN_HOME_BODY: &str = r#"<body class="container">
<div>
<h1>{{ .Ctx.Title }}</h1>
<img
src="public/gopher.png"
class="rounded-md"
height="500"
width="500"
/>
<p>{{ .Ctx.Desc }}</p>
</div>
</body>"#;

const TAILWIND_HOME_BODY: &str = r#"<body class="max-w-3xl mx-auto">
<div class="flex items-center gap-y-6 mt-4 flex-col justify-center">
<h1 class="text-4xl my-4 text-blue-600 font-bold">
{{ .Ctx.Title }}
</h1>
<img
src="public/gopher.png"
class="rounded-md"
height="500"
width="500"
/>
<p class="text-lg font-medium">{{ .Ctx.Desc }}</p>
</div>
</body>"#;

const PLAIN_ERROR_BODY: &str = r#"<body class="container">
<h1>{{ .Ctx.FullError }}</h1>
</body>"#;

const TAILWIND_ERROR_BODY: &str = r#"<body class="flex items-center justify-center">
<h1 class="text-4xl my-4 font-bold">{{ .Ctx.FullError }}</h1>
</body>"#;

const LIVE_RELOAD: &str = r#"<!-- For live reloading -->
{{ if .IsDev }}
<script src="http://localhost:35729/livereload.js"></script>
{{ end }}"#;

const CLIENT_INSTRUCTIONS: &str = "# Instructions
After building your frontend, copy the static files in this directory.

-> web/dist/...files

For more info visit -> https://github.com/nilotpaul/gospur/blob/main/docs/go-seperate-client.md
**You can delete this file later.**
";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Contents of `page` for the given stack
pub fn generate_page(page: Page, cfg: &StackConfig) -> String {
    match page {
        Page::Home => content_page(home_body(cfg), true, cfg),
        Page::Error => content_page(error_body(cfg), false, cfg),
        Page::RootLayout => format_html(&root_layout(cfg)),
        Page::ClientInstructions => CLIENT_INSTRUCTIONS.to_string(),
    }
}

/// Layout frameworks get the bare body content, Echo a whole document
fn content_page(body: &str, with_scripts: bool, cfg: &StackConfig) -> String {
    if cfg.web_framework.uses_layout_shell() {
        return format_html(&strip_outer_lines(body));
    }

    let mut head = head_styles();
    head.push('\n');
    head.push_str(LIVE_RELOAD);
    if with_scripts {
        if let Some(scripts) = head_scripts(cfg) {
            head.push('\n');
            head.push_str(&scripts);
        }
    }
    format_html(&document(&head, body))
}

fn root_layout(cfg: &StackConfig) -> String {
    let body_class = match cfg.css_strategy {
        CssStrategy::Tailwind => "flex items-center justify-center",
        CssStrategy::Vanilla => "container",
    };
    let embed = match cfg.web_framework {
        WebFramework::Chi => "embed .Page .",
        _ => "embed",
    };

    let mut head = head_styles();
    head.push('\n');
    head.push_str(LIVE_RELOAD);
    if let Some(scripts) = head_scripts(cfg) {
        head.push('\n');
        head.push_str(&scripts);
    }
    let body = ["<body class=\"", body_class, "\">{{ ", embed, " }}</body>"].concat();

    document(&head, &body)
}

fn document(head: &str, body: &str) -> String {
    [
        "<!DOCTYPE html>",
        "<html lang=\"en\">",
        "<head>",
        "<meta charset=\"UTF-8\" />",
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />",
        head,
        "<title>{{ .Ctx.Title }}</title>",
        "<meta name=\"title\" content=\"{{ .Ctx.Title }}\" />",
        "</head>",
        body,
        "</html>",
    ]
    .join("\n")
}

fn home_body(cfg: &StackConfig) -> &'static str {
    match cfg.css_strategy {
        CssStrategy::Tailwind => TAILWIND_HOME_BODY,
        CssStrategy::Vanilla => PLAIN_HOME_BODY,
    }
}

fn error_body(cfg: &StackConfig) -> &'static str {
    match cfg.css_strategy {
        CssStrategy::Tailwind => TAILWIND_ERROR_BODY,
        CssStrategy::Vanilla => PLAIN_ERROR_BODY,
    }
}

fn head_styles() -> String {
    [
        "<!-- Styles -->",
        "<link rel=\"stylesheet\" href=\"public/bundle/globals.css\" />",
    ]
    .join("\n")
}

fn head_scripts(cfg: &StackConfig) -> Option<String> {
    let mut scripts = Vec::new();
    if cfg.has_extra(Extra::Htmx) {
        scripts.push("<script defer src=\"public/bundle/htmx.js\"></script>");
    }
    if cfg.ui_library == Some(UiLibrary::Preline) {
        scripts.push("<script defer src=\"public/bundle/preline.js\"></script>");
    }
    if scripts.is_empty() {
        return None;
    }

    scripts.insert(0, "<!-- Bundled Javascript -->");
    Some(scripts.join("\n"))
}

/// Drops the `<body>` wrapper lines of a fragment
fn strip_outer_lines(fragment: &str) -> String {
    let lines: Vec<&str> = fragment.trim().lines().collect();
    match lines.len() {
        0..=2 => String::new(),
        n => lines[1..n - 1].join("\n"),
    }
}

/// Re-indents markup with two spaces per nesting level.
///
/// Every line is trimmed and blank lines are dropped, so the result only
/// depends on the line contents and formatting twice changes nothing.
pub fn format_html(input: &str) -> String {
    let mut out = String::new();
    let mut depth: usize = 0;
    // Name of a start tag whose attributes continue on the next lines
    let mut pending: Option<String> = None;

    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(name) = pending.take() {
            let Some(end) = line.find('>') else {
                push_line(&mut out, depth + 1, line);
                pending = Some(name);
                continue;
            };

            let indent = if line.starts_with('>') || line.starts_with("/>") {
                depth
            } else {
                depth + 1
            };
            push_line(&mut out, indent, line);

            if !line[..=end].ends_with("/>") && !is_void(&name) {
                depth += 1;
            }
            let scan = scan_tags(&line[end + 1..]);
            depth = apply(depth, scan.net);
            pending = scan.pending;
            continue;
        }

        let indent = if line.starts_with("</") {
            depth.saturating_sub(1)
        } else {
            depth
        };
        push_line(&mut out, indent, line);

        let scan = scan_tags(line);
        depth = apply(depth, scan.net);
        pending = scan.pending;
    }

    out
}

struct TagScan {
    net: isize,
    pending: Option<String>,
}

fn scan_tags(line: &str) -> TagScan {
    let mut net = 0;
    let mut rest = line;

    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];

        if let Some(after) = rest.strip_prefix('/') {
            net -= 1;
            rest = after;
            continue;
        }

        let name: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if name.is_empty() {
            // comments, doctype, stray '<'
            continue;
        }

        match rest.find('>') {
            Some(end) => {
                let self_closing = rest[..end].ends_with('/');
                if !self_closing && !is_void(&name) {
                    net += 1;
                }
                rest = &rest[end + 1..];
            }
            None => {
                return TagScan {
                    net,
                    pending: Some(name.to_ascii_lowercase()),
                }
            }
        }
    }

    TagScan { net, pending: None }
}

fn apply(depth: usize, net: isize) -> usize {
    depth.saturating_add_signed(net)
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

fn push_line(out: &mut String, indent: usize, line: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{RenderingStrategy, StackConfigBuilder, StackOptions};

    fn stack(framework: WebFramework, css: CssStrategy, ui: Option<UiLibrary>) -> StackConfig {
        let options = StackOptions::default();
        let mut builder = StackConfigBuilder::new(&options);
        builder
            .web_framework(framework)
            .unwrap()
            .css_strategy(css)
            .unwrap()
            .rendering(RenderingStrategy::Templates)
            .unwrap()
            .extra(Extra::Htmx)
            .unwrap();
        if let Some(ui) = ui {
            builder.ui_library(ui).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_format_indents_and_drops_blank_lines() {
        let formatted = format_html("<div>\n\n   <p>hi</p>\n<span>\nx\n</span>\n  </div>");
        assert_eq!(
            formatted,
            "<div>\n  <p>hi</p>\n  <span>\n    x\n  </span>\n</div>\n"
        );
    }

    #[test]
    fn test_format_multiline_start_tag() {
        let formatted = format_html("<div>\n<img\nsrc=\"a.png\"\nwidth=\"5\"\n/>\n<p>x</p>\n</div>");
        assert_eq!(
            formatted,
            "<div>\n  <img\n    src=\"a.png\"\n    width=\"5\"\n  />\n  <p>x</p>\n</div>\n"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        for framework in [WebFramework::Echo, WebFramework::Fiber, WebFramework::Chi] {
            let cfg = stack(framework, CssStrategy::Tailwind, Some(UiLibrary::Preline));
            for page in [Page::Home, Page::Error, Page::RootLayout] {
                let once = generate_page(page, &cfg);
                assert_eq!(format_html(&once), once, "{framework} {page:?}");
            }
        }
    }

    #[test]
    fn test_echo_pages_are_full_documents() {
        let cfg = stack(WebFramework::Echo, CssStrategy::Vanilla, None);
        let home = generate_page(Page::Home, &cfg);

        assert!(home.starts_with("<!DOCTYPE html>"));
        assert!(home.contains("<body class=\"container\">"));
        assert!(home.contains("public/bundle/globals.css"));
        assert!(home.contains("public/bundle/htmx.js"));
        assert!(home.contains("{{ if .IsDev }}"));
        assert!(home.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_layout_frameworks_get_bare_body() {
        let cfg = stack(WebFramework::Fiber, CssStrategy::Tailwind, None);
        let home = generate_page(Page::Home, &cfg);

        assert!(!home.contains("<body"));
        assert!(!home.contains("<html"));
        assert!(home.starts_with("<div class=\"flex items-center"));
        assert!(home.contains("{{ .Ctx.Title }}"));

        let error = generate_page(Page::Error, &cfg);
        assert_eq!(
            error,
            "<h1 class=\"text-4xl my-4 font-bold\">{{ .Ctx.FullError }}</h1>\n"
        );
    }

    #[test]
    fn test_root_layout_embed_call() {
        let fiber = stack(WebFramework::Fiber, CssStrategy::Tailwind, None);
        let layout = generate_page(Page::RootLayout, &fiber);
        assert!(layout.contains("<body class=\"flex items-center justify-center\">{{ embed }}</body>"));

        let chi = stack(WebFramework::Chi, CssStrategy::Vanilla, None);
        let layout = generate_page(Page::RootLayout, &chi);
        assert!(layout.contains("<body class=\"container\">{{ embed .Page . }}</body>"));
    }

    #[test]
    fn test_head_scripts_follow_stack() {
        let with_preline = stack(WebFramework::Chi, CssStrategy::Tailwind, Some(UiLibrary::Preline));
        let layout = generate_page(Page::RootLayout, &with_preline);
        assert!(layout.contains("<!-- Bundled Javascript -->"));
        assert!(layout.contains("public/bundle/preline.js"));

        let options = StackOptions::default();
        let mut builder = StackConfigBuilder::new(&options);
        builder
            .web_framework(WebFramework::Chi)
            .unwrap()
            .css_strategy(CssStrategy::Vanilla)
            .unwrap()
            .rendering(RenderingStrategy::Templates)
            .unwrap();
        let bare = builder.build().unwrap();
        let layout = generate_page(Page::RootLayout, &bare);
        assert!(!layout.contains("<!-- Bundled Javascript -->"));
        assert!(!layout.contains("<script defer"));
    }

    #[test]
    fn test_client_instructions() {
        let cfg = stack(WebFramework::Echo, CssStrategy::Vanilla, None);
        let text = generate_page(Page::ClientInstructions, &cfg);
        assert!(text.starts_with("# Instructions"));
        assert!(text.contains("web/dist/"));
    }
}
