use crate::card::{self, CardFonts};
use crate::colour::colours;
use crate::document::Document;
use crate::grid::{GridLayout, Pass};
use crate::image::Image;
use crate::page::{ImageLayout, Page};
use crate::pagesize;
use crate::qr;
use crate::record::Record;
use crate::units::{Cm, Pt};
use crate::Error;
use id_arena::Id;
use std::collections::HashMap;

/// Distance from each cell edge to the QR code, leaving room for the
/// decorative background frame around it
const QR_INSET: Pt = Pt(55.0);

/// The fixed layout every document uses: A4 pages of 6.5 cm cells below a
/// 0.8 cm top margin, which comes out to 3 columns by 4 rows
pub fn card_grid() -> GridLayout {
    GridLayout::new(pagesize::A4, Cm(6.5).into(), Cm(0.8).into())
}

/// How many PDF pages a record count produces: each input page of records is
/// rendered twice, once per pass
pub fn document_page_count(grid: &GridLayout, record_count: usize) -> usize {
    grid.page_count(record_count) * 2
}

/// Drives the two rendering passes over the records, page by page: all codes
/// for a page, then all text for the same page at mirrored columns. Fonts and
/// the background asset are handed in at construction; QR images are generated
/// in memory and deduped by a hash of their URL.
pub struct Compositor {
    grid: GridLayout,
    fonts: CardFonts,
    background: Id<Image>,
}

impl Compositor {
    pub fn new(grid: GridLayout, fonts: CardFonts, background: Id<Image>) -> Compositor {
        Compositor {
            grid,
            fonts,
            background,
        }
    }

    /// Render all records into `doc`. Records are consumed in input order,
    /// grouped into runs of `cells_per_page`; cells past the last record are
    /// left untouched.
    pub fn compose(&self, doc: &mut Document, records: &[Record]) -> Result<(), Error> {
        let per_page = self.grid.cells_per_page();
        let total = records.len();
        let mut qr_cache: HashMap<String, Id<Image>> = HashMap::new();

        for start in (0..total).step_by(per_page) {
            tracing::info!("processing {start} of {total} records");

            let codes = code_page(
                &self.grid,
                self.background,
                doc,
                records,
                start,
                &mut qr_cache,
            )?;
            doc.add_page(codes);

            let text = text_page(&self.grid, &self.fonts, doc, records, start);
            doc.add_page(text);
        }

        tracing::info!("processed {total} of {total} records");
        Ok(())
    }
}

/// One full code-pass page starting at record `start`: per record, the
/// background frame filling the cell, the QR code inset within it, and a
/// white cut-line border
fn code_page(
    grid: &GridLayout,
    background: Id<Image>,
    doc: &mut Document,
    records: &[Record],
    start: usize,
    qr_cache: &mut HashMap<String, Id<Image>>,
) -> Result<Page, Error> {
    let end = (start + grid.cells_per_page()).min(records.len());
    let mut page = Page::new(grid.page_size);

    for (index, record) in records[start..end].iter().enumerate() {
        let cell = grid.cell_rect(start + index, Pass::Code);

        page.add_image(ImageLayout {
            image: background,
            position: cell,
        });

        if record.url.is_empty() {
            return Err(Error::EmptyUrl(format!(
                "{} – {}",
                record.artist, record.title
            )));
        }
        let key = qr::qr_key(&record.url);
        let image_id = match qr_cache.get(&key) {
            Some(&id) => id,
            None => {
                let id = doc.add_image(Image::new(qr::qr_image(&record.url)?));
                qr_cache.insert(key, id);
                id
            }
        };
        page.add_image(ImageLayout {
            image: image_id,
            position: cell.inset(QR_INSET),
        });

        card::stroke_cell_border(&mut page, &cell, colours::WHITE);
    }

    Ok(page)
}

/// One full text-pass page starting at record `start`, columns mirrored so
/// the sheet backs line up after printing
fn text_page(
    grid: &GridLayout,
    fonts: &CardFonts,
    doc: &Document,
    records: &[Record],
    start: usize,
) -> Page {
    let end = (start + grid.cells_per_page()).min(records.len());
    let mut page = Page::new(grid.page_size);

    for (index, record) in records[start..end].iter().enumerate() {
        tracing::debug!(
            artist = %record.artist,
            title = %record.title,
            year = %record.year,
            "rendering card text"
        );
        let cell = grid.cell_rect(start + index, Pass::Text);
        card::layout_card_text(doc, &mut page, &cell, record, fonts);
        card::stroke_cell_border(&mut page, &cell, colours::CUTLINE_GREY);
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Tier;
    use image::DynamicImage;

    fn record(url: &str) -> Record {
        Record {
            artist: "Band".into(),
            title: "Song".into(),
            year: "1999".into(),
            tier: Tier::Single,
            url: url.into(),
        }
    }

    // a grid of 2x2 cells on a square-ish page, 4 cells per page
    fn tiny_grid() -> GridLayout {
        GridLayout::new((Pt(200.0), Pt(210.0)), Pt(100.0), Pt(5.0))
    }

    fn doc_with_background() -> (Document, Id<Image>) {
        let mut doc = Document::default();
        let background = doc.add_image(Image::new(DynamicImage::new_luma8(1, 1)));
        (doc, background)
    }

    #[test]
    fn five_records_at_four_cells_make_four_document_pages() {
        let grid = tiny_grid();
        assert_eq!(grid.cells_per_page(), 4);
        assert_eq!(document_page_count(&grid, 5), 4);
        assert_eq!(document_page_count(&grid, 4), 2);
        assert_eq!(document_page_count(&grid, 0), 0);
    }

    #[test]
    fn code_page_draws_nothing_for_missing_records() {
        let (mut doc, background) = doc_with_background();
        let records: Vec<Record> = (0..5)
            .map(|i| record(&format!("http://example.com/{i}")))
            .collect();

        let mut cache = HashMap::new();
        let first = code_page(&tiny_grid(), background, &mut doc, &records, 0, &mut cache)
            .expect("page composes");
        // background + qr + border per record
        assert_eq!(first.contents.len(), 4 * 3);

        let second = code_page(&tiny_grid(), background, &mut doc, &records, 4, &mut cache)
            .expect("page composes");
        assert_eq!(second.contents.len(), 3);
    }

    #[test]
    fn repeated_urls_share_one_embedded_image() {
        let (mut doc, background) = doc_with_background();
        let records = vec![
            record("http://example.com/same"),
            record("http://example.com/same"),
            record("http://example.com/other"),
        ];

        let mut cache = HashMap::new();
        code_page(&tiny_grid(), background, &mut doc, &records, 0, &mut cache)
            .expect("page composes");
        assert_eq!(cache.len(), 2);
        // background + 2 distinct QR codes
        assert_eq!(doc.images.len(), 3);
    }

    #[test]
    fn empty_url_aborts_the_code_pass() {
        let (mut doc, background) = doc_with_background();
        let records = vec![record("")];

        let mut cache = HashMap::new();
        let err = code_page(&tiny_grid(), background, &mut doc, &records, 0, &mut cache);
        assert!(matches!(err, Err(Error::EmptyUrl(_))));
    }
}
