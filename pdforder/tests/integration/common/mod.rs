//! Helpers shared by the integration tests.
//!
//! PDFs are generated on the fly with `lopdf`. Every page of a generated file
//! gets the same MediaBox width, which makes pages traceable after a merge.

#![allow(dead_code)]

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};

/// Write a PDF with `pages` pages, each `width` points wide.
pub fn write_pdf(dir: &Path, name: &str, pages: usize, width: i64) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    doc.save(&path).unwrap();
    path
}

/// MediaBox widths of a document's pages, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_object(id).unwrap().as_dict().unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// File names of `paths`, in the same order.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
