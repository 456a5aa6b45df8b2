//! Booklet imposition for printed maze pages.
//!
//! Pages are reordered into a front and a back sheet sequence so that a
//! folded and cut stack of sheets reads in order. Every second group of
//! four pages is printed upside down.

use std::fs;
use std::path::{Path, PathBuf};

use svg::Document;
use svg::node::Blob;
use svg::node::element::Group;
use svg::node::element::tag::{SVG, Type};
use svg::parser::Event;

use crate::error::{MazeError, Result};

/// 1-based page numbers for the front sides.
pub const FRONT: [usize; 16] = [5, 28, 29, 4, 12, 21, 20, 13, 6, 24, 17, 16, 8, 23, 32, 1];
/// 1-based page numbers for the back sides.
pub const BACK: [usize; 16] = [3, 30, 27, 6, 14, 19, 22, 11, 15, 18, 23, 10, 2, 31, 26, 7];

/// Pages a full booklet draws from.
pub const PAGE_COUNT: usize = 32;

/// A rendered page to be placed on a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    /// The page's SVG markup without an XML declaration.
    pub content: String,
}

impl Page {
    pub fn parse(content: &str) -> Result<Self> {
        let (width, height) = page_size(content)?;
        Ok(Self {
            width,
            height,
            content: strip_prolog(content).to_owned(),
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| MazeError::io(path, e))?;
        Self::parse(&text)
            .map_err(|e| MazeError::Booklet(format!("{}: {e}", path.display())))
    }

    /// The page on a new document of the same size, optionally turned by
    /// 180 degrees about its center.
    pub fn impose(&self, rotate: bool) -> Document {
        let mut group = Group::new().add(Blob::new(self.content.clone()));
        if rotate {
            group = group.set(
                "transform",
                format!("rotate(180 {} {})", self.width / 2.0, self.height / 2.0),
            );
        }
        Document::new()
            .set("viewBox", (0.0, 0.0, self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .add(group)
    }
}

/// Leading numeric part of a length such as `"500"` or `"210mm"`.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// `width` and `height` of the root `<svg>` element.
pub fn page_size(content: &str) -> Result<(f64, f64)> {
    let parser = svg::read(content).map_err(|e| MazeError::Svg(e.to_string()))?;
    for event in parser {
        match event {
            Event::Tag(SVG, Type::Start | Type::Empty, attributes) => {
                let length = |name: &str| attributes.get(name).and_then(|v| parse_length(v));
                return match (length("width"), length("height")) {
                    (Some(w), Some(h)) => Ok((w, h)),
                    _ => Err(MazeError::Svg("page has no width/height".to_owned())),
                };
            }
            Event::Error(e) => return Err(MazeError::Svg(e.to_string())),
            _ => {}
        }
    }
    Err(MazeError::Svg("no <svg> element".to_owned()))
}

fn strip_prolog(content: &str) -> &str {
    let trimmed = content.trim_start();
    match trimmed.strip_prefix("<?xml").and_then(|rest| rest.find("?>").map(|i| &rest[i + 2..])) {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}

/// The first [`PAGE_COUNT`] `*.svg` files of `dir`, sorted by name.
pub fn collect_pages(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut pages = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MazeError::io(dir, e))? {
        let path = entry.map_err(|e| MazeError::io(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "svg") {
            pages.push(path);
        }
    }
    pages.sort();
    pages.truncate(PAGE_COUNT);
    Ok(pages)
}

/// Writes one sheet side: `order[i]` becomes `output_dir/{i:02}.svg`.
///
/// The rotation flips after every fourth page.
pub fn write_side(pages: &[PathBuf], order: &[usize], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| MazeError::io(output_dir, e))?;

    let mut written = Vec::with_capacity(order.len());
    let mut rotate = false;
    for (index, &number) in order.iter().enumerate() {
        let source = number
            .checked_sub(1)
            .and_then(|i| pages.get(i))
            .ok_or_else(|| {
                MazeError::Booklet(format!(
                    "page {number} requested but only {} pages found",
                    pages.len()
                ))
            })?;

        let out = output_dir.join(format!("{index:02}.svg"));
        let doc = Page::open(source)?.impose(rotate);
        svg::save(&out, &doc).map_err(|e| MazeError::io(&out, e))?;
        log::debug!("{} -> {} (rotated: {rotate})", source.display(), out.display());
        written.push(out);

        if index % 4 == 3 {
            rotate = !rotate;
        }
    }
    Ok(written)
}

/// Imposes `pages` into `output_dir/front` and `output_dir/back`.
pub fn make_booklet(pages: &[PathBuf], output_dir: impl AsRef<Path>) -> Result<()> {
    let output_dir = output_dir.as_ref();
    for (order, side) in [(&FRONT, "front"), (&BACK, "back")] {
        let written = write_side(pages, order, &output_dir.join(side))?;
        log::info!("booklet {side}: {} pages", written.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width: &str, label: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="300"><text>{label}</text></svg>"#
        )
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("maze-booklet-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_page_size_with_units() {
        assert_eq!(page_size(&page("200mm", 0)).unwrap(), (200.0, 300.0));
        assert!(page_size(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#).is_err());
    }

    #[test]
    fn impose_rotates_about_the_center() {
        let p = Page::parse(&page("200", 1)).unwrap();
        assert!(!p.content.starts_with("<?xml"));

        let upright = p.impose(false).to_string();
        assert!(!upright.contains("rotate"));
        assert!(upright.contains("<text>1</text>"));

        let turned = p.impose(true).to_string();
        assert!(turned.contains("rotate(180 100 150)"));
    }

    #[test]
    fn booklet_writes_both_sides() {
        let src = temp_dir("src");
        for i in 0..PAGE_COUNT {
            fs::write(src.join(format!("{i:02}_simple.svg")), page("200", i + 1)).unwrap();
        }
        let out = temp_dir("out");

        let pages = collect_pages(&src).unwrap();
        assert_eq!(pages.len(), PAGE_COUNT);
        make_booklet(&pages, &out).unwrap();

        let first = fs::read_to_string(out.join("front/00.svg")).unwrap();
        assert!(first.contains("<text>5</text>"));
        assert!(!first.contains("rotate"));
        let fifth = fs::read_to_string(out.join("front/04.svg")).unwrap();
        assert!(fifth.contains("<text>12</text>"));
        assert!(fifth.contains("rotate"));
        assert!(out.join("back/15.svg").exists());

        fs::remove_dir_all(src).unwrap();
        fs::remove_dir_all(out).unwrap();
    }

    #[test]
    fn too_few_pages_is_an_error() {
        let src = temp_dir("few");
        fs::write(src.join("a.svg"), page("200", 1)).unwrap();
        let pages = collect_pages(&src).unwrap();

        assert!(matches!(
            write_side(&pages, &FRONT, &src.join("front")),
            Err(MazeError::Booklet(_))
        ));
        fs::remove_dir_all(src).unwrap();
    }
}
