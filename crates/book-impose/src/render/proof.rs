//! Proof rendering: one PDF page per sheet face
//!
//! The proof shows where every page lands. Each slot gets its trim box,
//! content box and label; the face gets its printer's marks.

use crate::constants::{
    GUIDE_GRAY, GUIDE_LINE_WIDTH, HELVETICA_CHAR_WIDTH_RATIO, PAGE_NUMBER_FONT_SIZE,
    PAGE_NUMBER_OFFSET, TRIM_LINE_WIDTH,
};
use crate::impose::{Face, SheetPlan, Slot};
use crate::layout::{Rect, SlotGeometry, content_rect};
use crate::marks::generate_marks;
use crate::types::*;
use book_paginate::Book;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Render a sheet plan as a PDF proof
pub fn render_proof(plan: &SheetPlan, book: &Book) -> Result<Document> {
    if plan.source_pages != book.len() {
        return Err(ImposeError::Config(format!(
            "Plan was built for {} pages but the book has {}",
            plan.source_pages,
            book.len()
        )));
    }

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let font_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut page_refs = Vec::new();
    for sheet in &plan.sheets {
        for face in sheet.faces() {
            let page_id = render_face(&mut output, plan, book, face, pages_tree_id, font_id);
            page_refs.push(Object::Reference(page_id));
        }
    }

    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// Render one side of a sheet to the output document
fn render_face(
    output: &mut Document,
    plan: &SheetPlan,
    book: &Book,
    face: &Face,
    parent_pages_id: ObjectId,
    font_id: ObjectId,
) -> ObjectId {
    let geometry = &plan.geometry;
    let show_bleed = plan.config.marks.bleed() && book.setup().bleed > 0.0;

    let mut content_ops = Vec::new();
    for (slot, slot_geometry) in face.slots().into_iter().zip(&geometry.slots) {
        content_ops.push(render_slot(book, slot, slot_geometry, show_bleed));
    }
    content_ops.push(generate_marks(&geometry.marks));

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.sheet_width),
            Object::Real(geometry.sheet_height),
        ]),
    );
    page_dict.set(
        "TrimBox",
        Object::Array(vec![
            Object::Real(geometry.trim.x),
            Object::Real(geometry.trim.y),
            Object::Real(geometry.trim.right()),
            Object::Real(geometry.trim.top()),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

fn render_slot(book: &Book, slot: Slot, geometry: &SlotGeometry, show_bleed: bool) -> String {
    let mut ops = String::new();

    if show_bleed {
        ops.push_str(&format!(
            "q {} G {} w [3 3] 0 d {} Q\n",
            GUIDE_GRAY,
            GUIDE_LINE_WIDTH,
            rect_op(&geometry.bleed)
        ));
    }
    ops.push_str(&format!(
        "q 0 G {} w {} Q\n",
        TRIM_LINE_WIDTH,
        rect_op(&geometry.trim)
    ));

    let trim = &geometry.trim;
    match slot.page().and_then(|page_ref| page_ref.resolve(book)) {
        Some(page) => {
            let content = content_rect(trim, book.setup(), page.is_recto());
            ops.push_str(&format!(
                "q {} G {} w {} Q\n",
                GUIDE_GRAY,
                GUIDE_LINE_WIDTH,
                rect_op(&content)
            ));

            let range = page.content_range();
            ops.push_str(&text_op(
                &format!("{}..{}", range.start, range.end),
                content.center_x(),
                content.top() - PAGE_NUMBER_FONT_SIZE - 2.0,
            ));

            let label = page
                .footer
                .clone()
                .unwrap_or_else(|| page.number.to_string());
            ops.push_str(&text_op(&label, trim.center_x(), trim.y + PAGE_NUMBER_OFFSET));
        }
        None => {
            ops.push_str(&format!("q {} g\n", GUIDE_GRAY));
            ops.push_str(&text_op("blank", trim.center_x(), trim.center_y()));
            ops.push_str("Q\n");
        }
    }

    ops
}

fn rect_op(rect: &Rect) -> String {
    format!("{} {} {} {} re S", rect.x, rect.y, rect.width, rect.height)
}

/// Centered single-line text in Helvetica
fn text_op(text: &str, center_x: f32, y: f32) -> String {
    let text_width =
        text.chars().count() as f32 * PAGE_NUMBER_FONT_SIZE * HELVETICA_CHAR_WIDTH_RATIO;
    format!(
        "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
        PAGE_NUMBER_FONT_SIZE,
        center_x - text_width / 2.0,
        y,
        escape_text(text)
    )
}

/// Escape a string for a PDF literal; non-ASCII is replaced
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
