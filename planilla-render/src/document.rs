/*!
# Document Model

Builds the lineup sheet as a tree of positioned visual nodes. The tree is a
pure function of the lineup snapshot and the branding; serializing it to SVG
and rasterizing it happen elsewhere.

Page geometry is fixed at 794 × 1123 CSS pixels (A4 portrait at 96 dpi).
Node order is paint order: earlier nodes are painted below later ones.
*/

use std::path::{Path, PathBuf};

use planilla_core::types::short_name;
use planilla_core::{Lineup, MatchMetadata, PositionedPlayer, StaffMember, Substitute};

use crate::style::Branding;
use crate::text::{approx_text_width, format_match_date, truncate_to_width, wrap_lines};

pub const PAGE_WIDTH: f32 = 794.0;
pub const PAGE_HEIGHT: f32 = 1123.0;

pub const NOTES_PLACEHOLDER: &str = "Escribe tus notas en el panel lateral...";

const PAGE_PADDING: f32 = 40.0;
const TOP_BORDER: f32 = 12.0;
const SECTION_GAP: f32 = 24.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * PAGE_PADDING;
const GRID_GAP: f32 = 24.0;
const GRID_COLUMN: f32 = (CONTENT_WIDTH - 11.0 * GRID_GAP) / 12.0;
const LEFT_WIDTH: f32 = 5.0 * GRID_COLUMN + 4.0 * GRID_GAP;
const RIGHT_WIDTH: f32 = 7.0 * GRID_COLUMN + 6.0 * GRID_GAP;

const JERSEY_SIZE: f32 = 48.0;
const BENCH_JERSEY_SIZE: f32 = 28.0;
const NAME_TAG_FONT: f32 = 9.0;
const NAME_TAG_HEIGHT: f32 = 17.5;
const NAME_TAG_OVERLAP: f32 = 4.0;
const MAX_NOTE_LINES: usize = 12;

const MONO: &str = "ui-monospace, Menlo, Consolas, monospace";

const PITCH_GREEN: &str = "#2D7A3E";
const PITCH_BORDER: &str = "#3D8A4E";
const WHITE: &str = "#ffffff";
const GRAY_50: &str = "#f9fafb";
const GRAY_100: &str = "#f3f4f6";
const GRAY_200: &str = "#e5e7eb";
const GRAY_300: &str = "#d1d5db";
const GRAY_400: &str = "#9ca3af";
const GRAY_600: &str = "#4b5563";
const GRAY_800: &str = "#1f2937";
const GRAY_900: &str = "#111827";
const EMERALD_600: &str = "#059669";

/// Outline of the jersey glyph in a 100 × 100 box.
pub const JERSEY_BODY_PATH: &str = "M20,20 L80,20 L85,45 L70,45 L70,90 L30,90 L30,45 L15,45 Z";
const JERSEY_NECK_PATH: &str = "M40,20 Q50,30 60,20";

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: String,
    pub opacity: f32,
}

impl Paint {
    pub fn solid(color: &str) -> Self {
        Self { color: color.to_string(), opacity: 1.0 }
    }

    pub fn translucent(color: &str, opacity: f32) -> Self {
        Self { color: color.to_string(), opacity }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
}

impl Stroke {
    pub fn new(paint: Paint, width: f32) -> Self {
        Self { paint, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: u16,
    pub fill: Paint,
    pub anchor: TextAnchor,
    pub italic: bool,
    pub letter_spacing: f32,
    /// Overrides the document font family, e.g. for jersey numbers in tables
    pub family: Option<String>,
}

impl TextStyle {
    fn new(size: f32, weight: u16, color: &str) -> Self {
        Self {
            size,
            weight,
            fill: Paint::solid(color),
            anchor: TextAnchor::Start,
            italic: false,
            letter_spacing: 0.0,
            family: None,
        }
    }

    fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    fn mono(mut self) -> Self {
        self.family = Some(MONO.to_string());
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// A visual element of the sheet, in page pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    /// Path data in a local box, placed with translate + uniform scale
    Path {
        d: String,
        x: f32,
        y: f32,
        scale: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        style: TextStyle,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        source: PathBuf,
    },
    Group {
        id: String,
        children: Vec<Node>,
    },
}

impl Node {
    fn filled_rect(x: f32, y: f32, width: f32, height: f32, radius: f32, fill: Paint) -> Self {
        Node::Rect { x, y, width, height, radius, fill: Some(fill), stroke: None }
    }

    fn hline(x1: f32, x2: f32, y: f32, color: &str) -> Self {
        Node::Line { x1, y1: y, x2, y2: y, stroke: Stroke::new(Paint::solid(color), 1.0) }
    }

    fn text(x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> Self {
        Node::Text { x, y, content: content.into(), style }
    }

    fn group(id: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Group { id: id.into(), children }
    }

    /// Depth-first search for a group by id.
    pub fn find_group(&self, wanted: &str) -> Option<&Node> {
        match self {
            Node::Group { id, children } => {
                if id == wanted {
                    return Some(self);
                }
                children.iter().find_map(|c| c.find_group(wanted))
            }
            _ => None,
        }
    }

    /// All text content under this node, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text { content, .. } => out.push(content.as_str()),
            Node::Group { children, .. } => children.iter().for_each(|c| c.collect_texts(out)),
            _ => {}
        }
    }
}

/// Everything the sheet shows, borrowed from the current lineup snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DocumentInput<'a> {
    pub players: &'a [PositionedPlayer],
    pub substitutes: &'a [Substitute],
    pub staff: &'a [StaffMember],
    pub metadata: &'a MatchMetadata,
    pub notes: &'a str,
    pub branding: &'a Branding,
}

/// The fully laid-out lineup sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<Node>,
}

impl DocumentModel {
    /// Resolve the lineup's formation and compose the sheet.
    pub fn from_lineup(lineup: &Lineup, branding: &Branding) -> Self {
        let players = lineup.positioned_players();
        Self::compose(&DocumentInput {
            players: &players,
            substitutes: &lineup.substitutes,
            staff: &lineup.staff,
            metadata: &lineup.metadata,
            notes: &lineup.notes,
            branding,
        })
    }

    pub fn compose(input: &DocumentInput<'_>) -> Self {
        let primary = input.branding.primary_color.as_str();
        let mut nodes = Vec::new();

        // Page background and top border
        nodes.push(Node::filled_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, 0.0, Paint::solid(WHITE)));
        nodes.push(Node::filled_rect(0.0, 0.0, PAGE_WIDTH, TOP_BORDER, 0.0, Paint::solid(primary)));

        let mut y = TOP_BORDER + PAGE_PADDING;
        let (header, header_h) = header(input.branding, PAGE_PADDING, y);
        nodes.push(header);
        y += header_h + SECTION_GAP;

        let (strip, strip_h) = match_strip(input.metadata, PAGE_PADDING, y);
        nodes.push(strip);
        y += strip_h + SECTION_GAP;

        let (notes, notes_top) = notes_footer(input.notes, PAGE_PADDING, PAGE_HEIGHT - PAGE_PADDING);

        // Left column: lists
        let left_x = PAGE_PADDING;
        let mut left_y = y;
        let (roster, h) = roster_table(input.players, left_x, left_y, primary);
        nodes.push(roster);
        left_y += h + SECTION_GAP;
        let (subs, h) = substitutes_list(input.substitutes, left_x, left_y, primary);
        nodes.push(subs);
        left_y += h + SECTION_GAP;
        let (staff, _) = staff_list(input.staff, left_x, left_y, primary);
        nodes.push(staff);

        // Right column: field and bench
        let right_x = PAGE_PADDING + LEFT_WIDTH + GRID_GAP;
        let (pitch, pitch_h) = pitch(input.players, right_x, y, RIGHT_WIDTH, primary);
        nodes.push(pitch);
        let (bench, _) = bench(input.substitutes, right_x, y + pitch_h + 16.0, RIGHT_WIDTH, primary);
        nodes.push(bench);

        // Notes last so an over-full grid never hides them
        nodes.push(Node::filled_rect(
            PAGE_PADDING,
            notes_top,
            CONTENT_WIDTH,
            PAGE_HEIGHT - PAGE_PADDING - notes_top,
            0.0,
            Paint::solid(WHITE),
        ));
        nodes.push(notes);

        Self { width: PAGE_WIDTH, height: PAGE_HEIGHT, nodes }
    }

    pub fn find_group(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|n| n.find_group(id))
    }

    /// Image files referenced by the sheet, in paint order.
    pub fn image_sources(&self) -> Vec<&Path> {
        fn walk<'a>(node: &'a Node, out: &mut Vec<&'a Path>) {
            match node {
                Node::Image { source, .. } => out.push(source.as_path()),
                Node::Group { children, .. } => children.iter().for_each(|c| walk(c, out)),
                _ => {}
            }
        }
        let mut out = Vec::new();
        self.nodes.iter().for_each(|n| walk(n, &mut out));
        out
    }
}

fn header(branding: &Branding, x: f32, y: f32) -> (Node, f32) {
    let primary = branding.primary_color.as_str();
    let logo = 96.0;
    let mut children = vec![Node::Rect {
        x,
        y,
        width: logo,
        height: logo,
        radius: 8.0,
        fill: Some(Paint::solid(WHITE)),
        stroke: Some(Stroke::new(Paint::solid(GRAY_100), 1.0)),
    }];
    if let Some(emblem) = &branding.emblem {
        children.push(Node::Image {
            x: x + 4.0,
            y: y + 4.0,
            width: logo - 8.0,
            height: logo - 8.0,
            source: emblem.clone(),
        });
    }

    let title_x = x + logo + 24.0;
    let block_top = y + (logo - 68.0) / 2.0;
    children.push(Node::text(
        title_x,
        block_top + 32.0,
        branding.club_name.to_uppercase(),
        TextStyle::new(36.0, 900, primary).spacing(-0.9),
    ));
    children.push(Node::text(
        title_x,
        block_top + 61.0,
        branding.club_location.to_uppercase(),
        TextStyle::new(18.0, 500, GRAY_400).spacing(3.6),
    ));

    let badge_text = branding.document_title.to_uppercase();
    let badge_w = approx_text_width(&badge_text, 14.0, 1.4) + 48.0;
    let badge_h = 44.0;
    let badge_x = x + CONTENT_WIDTH - badge_w;
    let badge_y = y + (logo - badge_h) / 2.0;
    children.push(Node::Rect {
        x: badge_x,
        y: badge_y,
        width: badge_w,
        height: badge_h,
        radius: 8.0,
        fill: None,
        stroke: Some(Stroke::new(Paint::translucent(primary, 0.1), 2.0)),
    });
    children.push(Node::text(
        badge_x + badge_w / 2.0,
        badge_y + 27.0,
        badge_text,
        TextStyle::new(14.0, 900, primary).spacing(1.4).anchor(TextAnchor::Middle),
    ));

    let bottom = y + logo + 32.0;
    children.push(Node::hline(x, x + CONTENT_WIDTH, bottom + 0.5, GRAY_100));

    (Node::group("header", children), bottom + 1.0 - y)
}

fn match_strip(meta: &MatchMetadata, x: f32, y: f32) -> (Node, f32) {
    let height = 68.0;
    let cells = [
        ("Categoría", meta.category.clone()),
        ("Rival", meta.opponent.clone()),
        ("Fecha", format_match_date(&meta.date)),
        ("Hora", meta.kickoff.clone()),
        ("Cancha", meta.venue.clone()),
    ];
    let cell_w = (CONTENT_WIDTH - (cells.len() as f32 - 1.0)) / cells.len() as f32;

    let mut children = vec![Node::filled_rect(x, y, CONTENT_WIDTH, height, 8.0, Paint::solid(GRAY_100))];
    for (i, (label, value)) in cells.iter().enumerate() {
        let cx = x + i as f32 * (cell_w + 1.0);
        children.push(Node::filled_rect(cx, y + 1.0, cell_w, height - 2.0, 0.0, Paint::solid(WHITE)));
        children.push(Node::text(
            cx + 16.0,
            y + 25.0,
            label.to_uppercase(),
            TextStyle::new(9.0, 700, GRAY_400).spacing(0.45),
        ));
        let avail = cell_w - 32.0;
        let size = fit_font_size(value, avail, 14.0, 9.0);
        children.push(Node::text(
            cx + 16.0,
            y + 48.0,
            truncate_to_width(value, avail, size, 0.0),
            TextStyle::new(size, 700, GRAY_900),
        ));
    }
    (Node::group("match-info", children), height)
}

// Largest size in [min, max] at which `text` fits `width`
fn fit_font_size(text: &str, width: f32, max: f32, min: f32) -> f32 {
    let at_one = approx_text_width(text, 1.0, 0.0);
    if at_one <= 0.0 {
        return max;
    }
    // Floor to 1/100 px so the fitted width never rounds past `width`
    ((width / at_one * 100.0).floor() / 100.0).clamp(min, max)
}

// Section heading with a small icon marker; returns the y of the rule below it
fn section_heading(children: &mut Vec<Node>, title: &str, x: f32, y: f32, width: f32, primary: &str) -> f32 {
    children.push(Node::Rect {
        x: x + 1.0,
        y: y + 1.0,
        width: 14.0,
        height: 14.0,
        radius: 3.0,
        fill: None,
        stroke: Some(Stroke::new(Paint::solid(primary), 2.0)),
    });
    children.push(Node::text(
        x + 24.0,
        y + 12.0,
        title.to_uppercase(),
        TextStyle::new(11.0, 900, GRAY_900).spacing(0.55),
    ));
    let rule = y + 24.0;
    children.push(Node::hline(x, x + width, rule, GRAY_200));
    rule
}

fn roster_table(players: &[PositionedPlayer], x: f32, y: f32, primary: &str) -> (Node, f32) {
    let row_h = 22.0;
    let name_x = x + 36.0;
    let mut children = Vec::new();
    let rule = section_heading(&mut children, "Formación Inicial", x, y, LEFT_WIDTH, primary);

    let head = TextStyle::new(8.0, 700, GRAY_400).spacing(0.8);
    let head_y = rule + 15.0;
    children.push(Node::text(x, head_y, "NO.", head.clone()));
    children.push(Node::text(name_x, head_y, "JUGADOR", head.clone()));
    children.push(Node::text(x + LEFT_WIDTH, head_y, "POS", head.anchor(TextAnchor::End)));

    let mut row_y = rule + row_h;
    for (i, player) in players.iter().enumerate() {
        if i > 0 {
            children.push(Node::hline(x, x + LEFT_WIDTH, row_y, GRAY_50));
        }
        let baseline = row_y + 15.0;
        children.push(Node::text(x, baseline, player.number.clone(), TextStyle::new(10.0, 700, GRAY_400).mono()));
        children.push(Node::text(
            name_x,
            baseline,
            truncate_to_width(&player.name, 140.0, 10.0, 0.0),
            TextStyle::new(10.0, 700, GRAY_800),
        ));
        children.push(Node::text(
            x + LEFT_WIDTH,
            baseline,
            player.role.code(),
            TextStyle::new(8.0, 700, GRAY_400).mono().anchor(TextAnchor::End),
        ));
        row_y += row_h;
    }
    (Node::group("roster", children), row_y - y)
}

fn substitutes_list(subs: &[Substitute], x: f32, y: f32, primary: &str) -> (Node, f32) {
    let row_h = 20.0;
    let col_gap = 16.0;
    let col_w = (LEFT_WIDTH - col_gap) / 2.0;
    let mut children = Vec::new();
    let rule = section_heading(&mut children, "Suplentes", x, y, LEFT_WIDTH, primary);

    let top = rule + 8.0;
    for (i, sub) in subs.iter().enumerate() {
        let cx = x + (i % 2) as f32 * (col_w + col_gap);
        let cy = top + (i / 2) as f32 * row_h;
        children.push(Node::text(cx, cy + 12.0, sub.number.clone(), TextStyle::new(10.0, 700, GRAY_300).mono()));
        children.push(Node::text(
            cx + 24.0,
            cy + 12.0,
            truncate_to_width(&sub.name, col_w - 24.0, 10.0, 0.0),
            TextStyle::new(10.0, 500, GRAY_600),
        ));
        children.push(Node::hline(cx, cx + col_w, cy + 16.5, GRAY_50));
    }
    let rows = subs.len().div_ceil(2) as f32;
    (Node::group("substitutes", children), top + rows * row_h - y)
}

fn staff_list(staff: &[StaffMember], x: f32, y: f32, primary: &str) -> (Node, f32) {
    let row_h = 20.0;
    let mut children = Vec::new();
    let rule = section_heading(&mut children, "Cuerpo Técnico", x, y, LEFT_WIDTH, primary);

    let top = rule + 8.0;
    for (i, member) in staff.iter().enumerate() {
        let cy = top + i as f32 * row_h;
        let role = member.role.to_uppercase();
        let badge_w = approx_text_width(&role, 7.0, 0.0) + 8.0;
        children.push(Node::filled_rect(x, cy + 3.0, badge_w, 11.0, 2.0, Paint::solid(EMERALD_600)));
        children.push(Node::text(
            x + badge_w / 2.0,
            cy + 11.0,
            role,
            TextStyle::new(7.0, 900, WHITE).anchor(TextAnchor::Middle),
        ));
        children.push(Node::text(
            x + badge_w + 12.0,
            cy + 12.0,
            truncate_to_width(&member.name, LEFT_WIDTH - badge_w - 12.0, 10.0, 0.0),
            TextStyle::new(10.0, 700, GRAY_800),
        ));
        children.push(Node::hline(x, x + LEFT_WIDTH, cy + 16.5, GRAY_50));
    }
    (Node::group("staff", children), top + staff.len() as f32 * row_h - y)
}

/// Area inside the pitch border that percentages refer to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldArea {
    /// Page point for a field position: x grows rightwards, y grows upwards from the bottom edge.
    pub fn to_page(&self, x_pct: f32, y_pct_from_baseline: f32) -> (f32, f32) {
        let px = self.x + x_pct / 100.0 * self.width;
        let py = self.y + self.height - y_pct_from_baseline / 100.0 * self.height;
        (px, py)
    }
}

fn jersey(x: f32, y: f32, size: f32, number: &str, primary: &str) -> Vec<Node> {
    let scale = size / 100.0;
    vec![
        Node::Path {
            d: JERSEY_BODY_PATH.to_string(),
            x,
            y,
            scale,
            fill: Some(Paint::solid(primary)),
            stroke: Some(Stroke::new(Paint::solid(WHITE), 2.0)),
        },
        Node::Path {
            d: "M45,20 L55,20 L55,90 L45,90 Z".to_string(),
            x,
            y,
            scale,
            fill: Some(Paint::translucent(WHITE, 0.2)),
            stroke: None,
        },
        Node::Path {
            d: JERSEY_NECK_PATH.to_string(),
            x,
            y,
            scale,
            fill: None,
            stroke: Some(Stroke::new(Paint::solid(WHITE), 2.0)),
        },
        Node::text(
            x + size / 2.0,
            y + size * 0.69,
            number.to_string(),
            TextStyle::new(size * 14.0 / JERSEY_SIZE, 900, WHITE).anchor(TextAnchor::Middle),
        ),
    ]
}

fn marker(player: &PositionedPlayer, area: &FieldArea, primary: &str) -> Node {
    let (px, py) = area.to_page(player.position.x_pct, player.position.y_pct_from_baseline);
    let column_h = JERSEY_SIZE + NAME_TAG_HEIGHT - NAME_TAG_OVERLAP;
    let top = py - column_h / 2.0;

    let mut children = jersey(px - JERSEY_SIZE / 2.0, top, JERSEY_SIZE, &player.number, primary);

    // Name tag overlaps the bottom of the jersey and is painted after it
    let tag = short_name(&player.name).to_uppercase();
    let tag_w = approx_text_width(&tag, NAME_TAG_FONT, -0.2) + 16.0;
    let tag_y = top + JERSEY_SIZE - NAME_TAG_OVERLAP;
    children.push(Node::filled_rect(
        px - tag_w / 2.0,
        tag_y,
        tag_w,
        NAME_TAG_HEIGHT,
        4.0,
        Paint::translucent(WHITE, 0.9),
    ));
    children.push(Node::text(
        px,
        tag_y + 12.0,
        tag,
        TextStyle::new(NAME_TAG_FONT, 700, GRAY_900).spacing(-0.2).anchor(TextAnchor::Middle),
    ));

    Node::group(format!("marker-{}", player.id), children)
}

fn pitch(players: &[PositionedPlayer], x: f32, y: f32, width: f32, primary: &str) -> (Node, f32) {
    let height = width * 4.0 / 3.0;
    let border = 4.0;
    let line = || Stroke::new(Paint::translucent(WHITE, 0.3), 2.0);

    let mut markings = vec![Node::Rect {
        x: x + border / 2.0,
        y: y + border / 2.0,
        width: width - border,
        height: height - border,
        radius: 12.0,
        fill: Some(Paint::solid(PITCH_GREEN)),
        stroke: Some(Stroke::new(Paint::solid(PITCH_BORDER), border)),
    }];

    // Touch lines, halfway line, centre circle and both penalty areas
    let inset = border + 16.0;
    let (mx, my) = (x + inset, y + inset);
    let (mw, mh) = (width - 2.0 * inset, height - 2.0 * inset);
    markings.push(Node::Rect { x: mx, y: my, width: mw, height: mh, radius: 0.0, fill: None, stroke: Some(line()) });
    markings.push(Node::Line { x1: mx, y1: my + mh / 2.0, x2: mx + mw, y2: my + mh / 2.0, stroke: line() });
    markings.push(Node::Circle { cx: mx + mw / 2.0, cy: my + mh / 2.0, r: 64.0, fill: None, stroke: Some(line()) });
    let box_w = mw / 2.0;
    let box_h = 96.0;
    let box_x = mx + (mw - box_w) / 2.0;
    markings.push(Node::Path {
        d: format!("M{box_x},{my} L{box_x},{b} L{r},{b} L{r},{my}", b = my + box_h, r = box_x + box_w),
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        fill: None,
        stroke: Some(line()),
    });
    let bottom = my + mh;
    markings.push(Node::Path {
        d: format!("M{box_x},{bottom} L{box_x},{t} L{r},{t} L{r},{bottom}", t = bottom - box_h, r = box_x + box_w),
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        fill: None,
        stroke: Some(line()),
    });

    let area = FieldArea { x: x + border, y: y + border, width: width - 2.0 * border, height: height - 2.0 * border };
    let markers = players.iter().map(|p| marker(p, &area, primary)).collect();

    let children = vec![Node::group("pitch-markings", markings), Node::group("pitch-markers", markers)];
    (Node::group("pitch", children), height)
}

fn bench(subs: &[Substitute], x: f32, y: f32, width: f32, primary: &str) -> (Node, f32) {
    let pad = 12.0;
    let cols = 4usize;
    let gap = 12.0;
    let col_w = (width - 2.0 * pad - (cols as f32 - 1.0) * gap) / cols as f32;
    let item_h = BENCH_JERSEY_SIZE + 4.0 + 9.0;
    let rows = subs.len().div_ceil(cols);
    let grid_top = y + pad + 14.0 + 12.0;
    let height = (grid_top - y) + rows as f32 * item_h + rows.saturating_sub(1) as f32 * gap + pad;

    let mut children = vec![Node::Rect {
        x,
        y,
        width,
        height,
        radius: 12.0,
        fill: Some(Paint::translucent(GRAY_50, 0.5)),
        stroke: Some(Stroke::new(Paint::solid(GRAY_100), 1.0)),
    }];
    children.push(Node::Circle {
        cx: x + pad + 7.0,
        cy: y + pad + 7.0,
        r: 6.0,
        fill: None,
        stroke: Some(Stroke::new(Paint::solid(primary), 2.0)),
    });
    children.push(Node::text(
        x + pad + 22.0,
        y + pad + 10.0,
        "SUPLENTES (BANCO)",
        TextStyle::new(9.0, 900, GRAY_900).spacing(0.9),
    ));

    for (i, sub) in subs.iter().enumerate() {
        let cx = x + pad + (i % cols) as f32 * (col_w + gap) + col_w / 2.0;
        let cy = grid_top + (i / cols) as f32 * (item_h + gap);
        children.extend(jersey(cx - BENCH_JERSEY_SIZE / 2.0, cy, BENCH_JERSEY_SIZE, &sub.number, primary));
        children.push(Node::text(
            cx,
            cy + BENCH_JERSEY_SIZE + 4.0 + 7.0,
            truncate_to_width(&short_name(&sub.name).to_uppercase(), col_w, 7.0, -0.35),
            TextStyle::new(7.0, 900, GRAY_400).spacing(-0.35).anchor(TextAnchor::Middle),
        ));
    }
    (Node::group("bench", children), height)
}

// Returns the notes footer and the y where it starts; it grows upwards from `bottom`
fn notes_footer(notes: &str, x: f32, bottom: f32) -> (Node, f32) {
    let line_h = 16.25;
    let body = if notes.is_empty() { NOTES_PLACEHOLDER } else { notes };
    let max_chars = (CONTENT_WIDTH / (10.0 * 0.58)).floor() as usize;
    let mut lines = wrap_lines(body, max_chars);
    if lines.len() > MAX_NOTE_LINES {
        log::debug!("Notes truncated to {} of {} lines", MAX_NOTE_LINES, lines.len());
        lines.truncate(MAX_NOTE_LINES);
    }
    let body_h = (lines.len() as f32 * line_h).max(60.0);
    let top = bottom - (1.0 + 16.0 + 12.0 + 8.0 + body_h);

    let mut children = vec![Node::hline(x, x + CONTENT_WIDTH, top + 0.5, GRAY_100)];
    children.push(Node::text(
        x,
        top + 1.0 + 16.0 + 9.0,
        "NOTAS TÁCTICAS",
        TextStyle::new(9.0, 700, GRAY_300).spacing(2.7),
    ));
    let body_top = top + 1.0 + 16.0 + 12.0 + 8.0;
    for (i, text) in lines.into_iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        children.push(Node::text(
            x,
            body_top + i as f32 * line_h + 11.0,
            text,
            TextStyle::new(10.0, 400, GRAY_600).italic(),
        ));
    }
    (Node::group("notes", children), top)
}
