//! SVG serialization of the document model.

use std::fmt::Write as _;
use std::path::Path;

use crate::document::{DocumentModel, Node, Paint, Stroke, TextAnchor, TextStyle};
use crate::text::escape_xml;

/// Builds an SVG document from model nodes.
///
/// Image hrefs go through a resolver so the rasterizer can inline data URIs
/// while plain SVG export keeps file paths.
pub(crate) struct SvgBuilder<'a> {
    elements: Vec<String>,
    width: f32,
    height: f32,
    font_family: &'a str,
    top_comments: Vec<String>,
}

impl<'a> SvgBuilder<'a> {
    pub(crate) fn new(width: f32, height: f32, font_family: &'a str) -> Self {
        Self { elements: Vec::new(), width, height, font_family, top_comments: Vec::new() }
    }

    pub(crate) fn add_comment(&mut self, text: &str) {
        self.top_comments.push(text.replace("--", "- -"));
    }

    pub(crate) fn add_nodes<F>(&mut self, nodes: &[Node], href: &mut F)
    where
        F: FnMut(&Path) -> Option<String>,
    {
        for node in nodes {
            self.add_node(node, href);
        }
    }

    fn add_node<F>(&mut self, node: &Node, href: &mut F)
    where
        F: FnMut(&Path) -> Option<String>,
    {
        match node {
            Node::Rect { x, y, width, height, radius, fill, stroke } => {
                let rx = if *radius > 0.0 { format!(r#" rx="{}""#, radius) } else { String::new() };
                self.elements.push(format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}{}/>"#,
                    x, y, width, height, rx, fill_attrs(fill.as_ref()), stroke_attrs(stroke.as_ref())
                ));
            }
            Node::Line { x1, y1, x2, y2, stroke } => {
                self.elements.push(format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                    x1, y1, x2, y2, stroke_attrs(Some(stroke))
                ));
            }
            Node::Circle { cx, cy, r, fill, stroke } => {
                self.elements.push(format!(
                    r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
                    cx, cy, r, fill_attrs(fill.as_ref()), stroke_attrs(stroke.as_ref())
                ));
            }
            Node::Path { d, x, y, scale, fill, stroke } => {
                let transform = if *x == 0.0 && *y == 0.0 && *scale == 1.0 {
                    String::new()
                } else {
                    format!(r#" transform="translate({} {}) scale({})""#, x, y, scale)
                };
                // Stroke widths are given in page pixels
                let stroke = stroke.as_ref().map(|s| Stroke::new(s.paint.clone(), s.width / scale));
                self.elements.push(format!(
                    r#"<path d="{}"{}{}{} stroke-linejoin="round"/>"#,
                    d, transform, fill_attrs(fill.as_ref()), stroke_attrs(stroke.as_ref())
                ));
            }
            Node::Text { x, y, content, style } => {
                self.elements.push(format!(
                    r#"<text x="{}" y="{}"{}>{}</text>"#,
                    x, y, self.text_attrs(style), escape_xml(content)
                ));
            }
            Node::Image { x, y, width, height, source } => match href(source) {
                Some(link) => self.elements.push(format!(
                    r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" href="{}"/>"#,
                    x, y, width, height, escape_xml(&link)
                )),
                None => log::debug!("Skipping image without href: {}", source.display()),
            },
            Node::Group { id, children } => {
                self.elements.push(format!(r#"<g id="{}">"#, escape_xml(id)));
                self.add_nodes(children, href);
                self.elements.push("</g>".to_string());
            }
        }
    }

    fn text_attrs(&self, style: &TextStyle) -> String {
        let mut out = String::new();
        let family = style.family.as_deref().unwrap_or(self.font_family);
        let _ = write!(out, r#" font-family="{}" font-size="{}" font-weight="{}""#, escape_xml(family), style.size, style.weight);
        if style.italic {
            out.push_str(r#" font-style="italic""#);
        }
        if style.letter_spacing != 0.0 {
            let _ = write!(out, r#" letter-spacing="{}""#, style.letter_spacing);
        }
        match style.anchor {
            TextAnchor::Start => {}
            TextAnchor::Middle => out.push_str(r#" text-anchor="middle""#),
            TextAnchor::End => out.push_str(r#" text-anchor="end""#),
        }
        out.push_str(&fill_attrs(Some(&style.fill)));
        out
    }

    pub(crate) fn finish(self) -> String {
        let mut content = String::new();
        content.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        content.push('\n');
        for c in &self.top_comments {
            let _ = writeln!(content, "<!-- {} -->", c);
        }
        let _ = writeln!(
            content,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        for element in &self.elements {
            content.push_str(element);
            content.push('\n');
        }
        content.push_str("</svg>\n");
        content
    }
}

fn fill_attrs(fill: Option<&Paint>) -> String {
    match fill {
        None => r#" fill="none""#.to_string(),
        Some(p) if p.opacity < 1.0 => format!(r#" fill="{}" fill-opacity="{}""#, p.color, p.opacity),
        Some(p) => format!(r#" fill="{}""#, p.color),
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        None => String::new(),
        Some(s) if s.paint.opacity < 1.0 => format!(
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            s.paint.color, s.paint.opacity, s.width
        ),
        Some(s) => format!(r#" stroke="{}" stroke-width="{}""#, s.paint.color, s.width),
    }
}

impl DocumentModel {
    /// Serialize with a custom image href resolver; images it rejects are left out.
    pub fn render_svg<F>(&self, font_family: &str, mut href: F) -> String
    where
        F: FnMut(&Path) -> Option<String>,
    {
        let mut svg = SvgBuilder::new(self.width, self.height, font_family);
        svg.add_comment(&format!("planilla {}", env!("CARGO_PKG_VERSION")));
        svg.add_nodes(&self.nodes, &mut href);
        svg.finish()
    }

    /// Serialize with images linked by file path.
    pub fn to_svg(&self, font_family: &str) -> String {
        self.render_svg(font_family, |p| Some(p.display().to_string()))
    }
}
