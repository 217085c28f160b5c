//! Serialize a virtual node tree to HTML

use pagecraft_model::{is_valid_attr_name, VirtualElement, VirtualNode};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the tree in a full document with head and body
    pub full_document: bool,
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            full_document: false,
            title: "Pagecraft Preview".to_string(),
        }
    }
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

pub fn render_html(node: &VirtualNode, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    if ctx.options.full_document {
        let title = format!("<title>{}</title>", escape_text(&ctx.options.title));
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();
        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        ctx.add_line(&title);
        ctx.dedent();
        ctx.add_line("</head>");
        ctx.add_line("<body>");
        ctx.indent();
        compile_node(node, &mut ctx);
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    } else {
        compile_node(node, &mut ctx);
    }

    ctx.get_output()
}

fn compile_node(node: &VirtualNode, ctx: &mut Context) {
    match node {
        VirtualNode::Element(element) => compile_element(element, ctx),
        VirtualNode::Text(text) => ctx.add_line(&escape_text(text)),
        VirtualNode::Markup(markup) => ctx.add_line(markup),
    }
}

fn compile_element(element: &VirtualElement, ctx: &mut Context) {
    let open = open_tag(element);

    if VOID_TAGS.contains(&element.tag.as_str()) {
        ctx.add_line(&open);
        return;
    }

    // Single text child stays on one line
    if let [VirtualNode::Text(text)] = element.children.as_slice() {
        ctx.add_line(&format!("{}{}</{}>", open, escape_text(text), element.tag));
        return;
    }
    if element.children.is_empty() {
        ctx.add_line(&format!("{}</{}>", open, element.tag));
        return;
    }

    ctx.add_line(&open);
    ctx.indent();
    for child in &element.children {
        compile_node(child, ctx);
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", element.tag));
}

fn open_tag(element: &VirtualElement) -> String {
    let mut tag = format!("<{}", element.tag);

    if !element.class_names.is_empty() {
        tag.push_str(&format!(" class=\"{}\"", escape_attr(&element.class_names.join(" "))));
    }
    // class and style come from their own fields; unwritable names are dropped
    for (name, value) in &element.attributes {
        if name == "class" || name == "style" || !is_valid_attr_name(name) {
            continue;
        }
        tag.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    if !element.styles.is_empty() {
        let style = element
            .styles
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        tag.push_str(&format!(" style=\"{}\"", escape_attr(&style)));
    }

    tag.push('>');
    tag
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let node: VirtualNode = VirtualElement::new("div")
            .with_class("hero")
            .with_attr("data-editor-id", "hero-1.title")
            .with_child(VirtualElement::new("h1").with_text("Fish & Chips"))
            .with_child(VirtualElement::new("img").with_attr("src", "/a.png"))
            .into();

        let html = render_html(
            &node,
            HtmlOptions {
                pretty: false,
                ..HtmlOptions::default()
            },
        );

        assert_eq!(
            html,
            "<div class=\"hero\" data-editor-id=\"hero-1.title\"><h1>Fish &amp; Chips</h1><img src=\"/a.png\"></div>"
        );
    }

    #[test]
    fn test_class_and_style_are_written_once() {
        let node: VirtualNode = VirtualElement::new("p")
            .with_class("lead")
            .with_attr("class", "stray")
            .with_attr("style", "color: blue")
            .with_attr("x\" onload=\"y", "1")
            .with_attr("id", "intro")
            .with_style("color", "red")
            .with_text("Hi")
            .into();

        let html = render_html(
            &node,
            HtmlOptions {
                pretty: false,
                ..HtmlOptions::default()
            },
        );

        assert_eq!(html, "<p class=\"lead\" id=\"intro\" style=\"color: red\">Hi</p>");
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let node: VirtualNode = VirtualElement::new("div").with_markup("<p>Hi</p>").into();
        let html = render_html(&node, HtmlOptions::default());
        assert!(html.contains("  <p>Hi</p>\n"));
    }

    #[test]
    fn test_full_document() {
        let node: VirtualNode = VirtualElement::new("main").into();
        let html = render_html(
            &node,
            HtmlOptions {
                full_document: true,
                ..HtmlOptions::default()
            },
        );
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
        assert!(html.contains("    <main></main>\n"));
    }
}
