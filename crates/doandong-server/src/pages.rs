//! Server-rendered HTML pages.

use doandong_core::{Canvas, EditorCommand, Shape, ShapeField, ShapeId};
use doandong_render::{RenderResult, SvgRenderer};
use uuid::Uuid;

const CATEGORIES: [(&str, &str); 5] = [
    ("👕", "상의"),
    ("🧣", "목도리"),
    ("🧦", "양말"),
    ("🧸", "인형"),
    ("🎨", "기타"),
];

const WORK_TABS: [&str; 3] = ["최근 작업", "구매한 도안", "즐겨찾기"];

const NAV_LINKS: [(&str, &str); 4] = [
    ("/editor", "도안제작"),
    ("/market", "마켓"),
    ("/community", "커뮤니티"),
    ("/mypage", "👤"),
];

const PLACEHOLDER_CARDS: u32 = 5;

/// Wrap page content in the shared header and navigation.
fn layout(title: &str, body: &str) -> String {
    let nav: String = NAV_LINKS
        .iter()
        .map(|(href, label)| format!(r#"<a href="{href}">{label}</a>"#))
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="utf-8">
  <meta name="description" content="Knitting Pattern Platform">
  <title>{title}</title>
</head>
<body>
  <header>
    <a href="/" class="brand">도안동</a>
    <input type="text" placeholder="도안 검색...">
    <nav>
      {nav}
    </nav>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn home() -> String {
    let categories: String = CATEGORIES
        .iter()
        .map(|(icon, label)| {
            format!(r#"      <button class="category"><span>{icon}</span><span>{label}</span></button>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let tabs: String = WORK_TABS
        .iter()
        .map(|tab| format!("      <button>{tab}</button>"))
        .collect::<Vec<_>>()
        .join("\n");

    let cards: String = (1..=PLACEHOLDER_CARDS)
        .map(|i| {
            format!(
                r#"      <div class="card"><div class="thumb">THUMB</div><h3>작업 파일명 {i}</h3><p>2026.01.{day} 수정됨</p></div>"#,
                day = 20 + i,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"    <section>
      <h1>생성: 무엇을 만들어 볼까요?</h1>
{categories}
    </section>
    <section>
      <h2>관리: 내 작업 이어가기</h2>
{tabs}
{cards}
    </section>"#
    );
    layout("Doandong", &body)
}

/// Editor page rendered from a canvas.
///
/// `session` is stamped on the page so a host script can route button
/// presses to that session's action endpoint.
pub fn editor(canvas: &Canvas, session: Option<Uuid>) -> RenderResult<String> {
    let svg = SvgRenderer::new().render_to_string(&canvas.scene())?;
    let session_attr = session
        .map(|id| format!(r#" data-session="{id}""#))
        .unwrap_or_default();
    let undo = history_button(canvas, EditorCommand::Undo, "undo", "Undo", canvas.can_undo());
    let redo = history_button(canvas, EditorCommand::Redo, "redo", "Redo", canvas.can_redo());
    let properties = match canvas.selected_shape() {
        Some(shape) => properties_panel(shape),
        None => String::new(),
    };

    let body = format!(
        r#"    <div class="editor"{session_attr}>
    <header class="editor-header">
      <h1>두들</h1>
      {undo}
      {redo}
    </header>
    <aside class="toolbar">
      <button data-action="add_shape" data-kind="rectangle">Rect</button>
      <button data-action="add_shape" data-kind="circle">Circle</button>
    </aside>
    <div class="canvas">
{svg}    </div>
    <aside class="properties">
      <h3>속성</h3>
{properties}    </aside>
    </div>"#
    );
    Ok(layout("Doandong", &body))
}

fn history_button(
    canvas: &Canvas,
    command: EditorCommand,
    action: &str,
    label: &str,
    enabled: bool,
) -> String {
    let title = canvas
        .config()
        .key_bindings
        .shortcut_for(command)
        .map(|shortcut| {
            format!(
                r#" title="{} ({})""#,
                escape_html(shortcut.description),
                escape_html(&shortcut.format())
            )
        })
        .unwrap_or_default();
    let disabled = if enabled { "" } else { " disabled" };
    format!(r#"<button data-action="{action}"{title}{disabled}>{label}</button>"#)
}

/// Fill, position and delete controls for the selected shape.
fn properties_panel(shape: &Shape) -> String {
    let id = shape.id();
    let fill = shape.fill().as_str();
    // Colour pickers only take #rrggbb; keywords get a text box.
    let fill_input = if fill.len() == 7 && fill.starts_with('#') {
        "color"
    } else {
        "text"
    };

    let mut panel = format!(
        r#"      <div class="property" data-shape="{id}">
        <label>색상</label>
        <input type="{fill_input}" data-field="fill" value="{value}">
        <span>{value}</span>
      </div>
      <div class="property">
        <label>위치</label>
"#,
        value = escape_html(fill),
    );
    let fields = match shape {
        Shape::Rectangle(rect) => vec![
            ("X", ShapeField::X, rect.position.x),
            ("Y", ShapeField::Y, rect.position.y),
        ],
        Shape::Circle(circle) => vec![
            ("CX", ShapeField::Cx, circle.center.x),
            ("CY", ShapeField::Cy, circle.center.y),
            ("R", ShapeField::Radius, circle.radius),
        ],
    };
    for (label, field, value) in fields {
        panel.push_str(&number_input(id, label, field, value));
    }
    panel.push_str(&format!(
        r#"      </div>
      <button data-action="delete" data-shape="{id}">Delete</button>
"#
    ));
    panel
}

fn number_input(id: ShapeId, label: &str, field: ShapeField, value: f64) -> String {
    format!(
        r#"        <label>{label} <input type="number" data-shape="{id}" data-field="{field}" value="{value}"></label>
"#,
        value = value.round(),
    )
}

pub fn pattern_detail(id: &str) -> String {
    let body = format!(
        r#"    <h1>도안 상세 페이지</h1>
    <p>현재 보고 계신 도안 번호는 <strong>{id}</strong>번입니다.</p>"#,
        id = escape_html(id),
    );
    layout("Doandong", &body)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
