//! Fixed-layout agreement PDF construction.
//!
//! The document is three letter-sized pages built directly from content
//! operations: page 1 carries the title block, the vendor-information table
//! and the selected partnership level; page 2 the fixed key terms; page 3
//! the signature blocks, with the decoded vendor signature embedded when one
//! is available.
//!
//! Content streams are left uncompressed, so the output stays inspectable
//! byte-wise. Apart from the generation date the output is a pure function
//! of the payload and the signature bytes.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, xobject, Document, Object, Stream};

use znznow_core::{AgreementForm, PartnershipLevel};

use crate::error::Result;
use crate::terms;

// Letter pages with 0.75in margins.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 54.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 20.0;
const SUBTITLE_SIZE: f32 = 13.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 8.0;
const TABLE_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 13.0;

const LABEL_COL_WIDTH: f32 = 144.0;
const VALUE_COL_WIDTH: f32 = 288.0;
const ROW_HEIGHT: f32 = 22.0;

// Signature image slot, 2in x 0.75in.
const SIGNATURE_WIDTH: f32 = 144.0;
const SIGNATURE_HEIGHT: f32 = 54.0;

/// Font resource names used in the content streams.
const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Resource name of the embedded signature image.
const SIGNATURE_XOBJECT: &str = "Sig1";

/// Names stamped into every document.
#[derive(Debug, Clone)]
pub struct Branding {
    /// Organization name on the title block.
    pub organization: String,
    /// Name printed for the pre-signed platform party.
    pub representative: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            organization: "ZNZNOW TOURS & ACTIVITIES".to_string(),
            representative: "Zanzisouk LTD - ZNZNOW".to_string(),
        }
    }
}

/// Renders agreement payloads into finished PDF byte buffers.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    branding: Branding,
}

impl PdfRenderer {
    /// Create a renderer with the given branding.
    #[must_use]
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    /// Render the full agreement document.
    ///
    /// The payload is read-only. A signature that fails to embed is logged
    /// and skipped so the rest of the document still renders; the textual
    /// placeholder only appears when no signature bytes were decoded at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the PDF itself cannot be assembled or serialized.
    pub fn render(&self, form: &AgreementForm, signature_png: Option<&[u8]>) -> Result<Vec<u8>> {
        let today = Utc::now().format("%B %d, %Y").to_string();

        let signature_image = signature_png.and_then(|png| {
            match xobject::image_from(png.to_vec()) {
                Ok(stream) => Some(stream),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to embed signature image");
                    None
                }
            }
        });

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let font_bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });

        let mut resources = dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => font_regular,
                FONT_BOLD => font_bold,
            },
        };

        let signature_image_id = signature_image.map(|stream| doc.add_object(stream));
        if let Some(image_id) = signature_image_id {
            resources.set(
                "XObject",
                dictionary! { SIGNATURE_XOBJECT => image_id },
            );
        }
        let resources_id = doc.add_object(resources);

        let page_contents = [
            self.compose_overview_page(form, &today),
            Self::compose_terms_page(),
            self.compose_signature_page(
                form,
                &today,
                signature_png.is_some(),
                signature_image_id.is_some(),
            ),
        ];

        let mut page_ids = Vec::new();
        for composer in page_contents {
            let content = Content {
                operations: composer.ops,
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let count = i64::try_from(page_ids.len()).unwrap_or(0);
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Page 1: title block, vendor information table, partnership level.
    fn compose_overview_page(&self, form: &AgreementForm, today: &str) -> PageComposer {
        let mut page = PageComposer::new();

        page.advance(TITLE_SIZE);
        page.text_centered(FONT_BOLD, TITLE_SIZE, &self.branding.organization);
        page.advance(24.0);
        page.text_centered(FONT_BOLD, SUBTITLE_SIZE, "Vendor Partnership Agreement");
        page.advance(26.0);
        page.text(FONT_REGULAR, BODY_SIZE, MARGIN, &format!("Date: {today}"));
        page.advance(30.0);

        page.text(FONT_BOLD, HEADING_SIZE, MARGIN, "1. VENDOR INFORMATION");
        page.advance(20.0);
        page.table(&[
            ("Business Name:", form.vendor_name.as_str()),
            ("Registration Number:", form.vendor_registration.as_str()),
            ("Address:", form.vendor_address.as_str()),
            ("City/Region:", form.vendor_city.as_str()),
            ("Country:", form.vendor_country.as_str()),
            ("Contact Email:", form.vendor_email.as_str()),
            ("Contact Phone:", form.vendor_phone.as_str()),
            ("Primary Contact:", form.contact_person.as_str()),
            ("Contact Title:", form.contact_title.as_str()),
        ]);
        page.advance(30.0);

        page.text(FONT_BOLD, HEADING_SIZE, MARGIN, "2. PARTNERSHIP LEVEL");
        page.advance(18.0);
        let level = PartnershipLevel::from_code(&form.partnership_level);
        page.text(FONT_REGULAR, BODY_SIZE, MARGIN, &format!("Selected: {level}"));

        page
    }

    /// Page 2: the fixed key terms.
    fn compose_terms_page() -> PageComposer {
        let mut page = PageComposer::new();

        page.advance(HEADING_SIZE);
        page.text(FONT_BOLD, HEADING_SIZE, MARGIN, "3. KEY TERMS & CONDITIONS");
        page.advance(24.0);

        for (label, body) in terms::KEY_TERMS {
            page.text(FONT_BOLD, BODY_SIZE, MARGIN, &format!("{label}:"));
            page.advance(LINE_HEIGHT);
            for line in wrap(body, CONTENT_WIDTH, BODY_SIZE) {
                page.text(FONT_REGULAR, BODY_SIZE, MARGIN, &line);
                page.advance(LINE_HEIGHT);
            }
            page.advance(8.0);
        }

        page
    }

    /// Page 3: both signature blocks and the acknowledgement line.
    ///
    /// The signature slot has three shapes: the embedded image when one was
    /// decoded and embedded, the textual placeholder when nothing decoded,
    /// and blank space when bytes decoded but could not be embedded.
    fn compose_signature_page(
        &self,
        form: &AgreementForm,
        today: &str,
        signature_provided: bool,
        image_embedded: bool,
    ) -> PageComposer {
        let mut page = PageComposer::new();

        page.advance(HEADING_SIZE);
        page.text(FONT_BOLD, HEADING_SIZE, MARGIN, "4. DIGITAL SIGNATURES");
        page.advance(28.0);

        page.text(FONT_BOLD, BODY_SIZE, MARGIN, "ZNZNOW Representative Signature");
        page.advance(12.0);
        page.text(FONT_REGULAR, SMALL_SIZE, MARGIN, "Pre-signed by ZNZNOW");
        page.advance(14.0);
        page.text(
            FONT_REGULAR,
            BODY_SIZE,
            MARGIN,
            &format!("Name: {}", self.branding.representative),
        );
        page.advance(14.0);
        page.text(FONT_REGULAR, BODY_SIZE, MARGIN, &format!("Date: {today}"));
        page.advance(34.0);

        page.text(FONT_BOLD, BODY_SIZE, MARGIN, "Vendor Signature");
        page.advance(14.0);
        page.text(
            FONT_REGULAR,
            BODY_SIZE,
            MARGIN,
            &format!("Name: {}", form.contact_person),
        );
        page.advance(14.0);
        page.text(FONT_REGULAR, BODY_SIZE, MARGIN, &format!("Date: {today}"));
        page.advance(10.0);

        if image_embedded {
            page.advance(SIGNATURE_HEIGHT);
            page.image(SIGNATURE_XOBJECT, MARGIN, SIGNATURE_WIDTH, SIGNATURE_HEIGHT);
        } else if signature_provided {
            page.advance(SIGNATURE_HEIGHT);
        } else {
            page.advance(14.0);
            page.text(FONT_REGULAR, BODY_SIZE, MARGIN, "No Signature Provided");
            page.advance(SIGNATURE_HEIGHT - 14.0);
        }
        page.advance(24.0);

        page.text(FONT_REGULAR, BODY_SIZE, MARGIN, terms::ACKNOWLEDGEMENT);

        page
    }
}

/// Accumulates content operations for one page, tracking a cursor that moves
/// down from the top margin.
struct PageComposer {
    ops: Vec<Operation>,
    y: f32,
}

impl PageComposer {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Move the cursor down.
    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// One line of text with its baseline at the current cursor.
    fn text(&mut self, font: &str, size: f32, x: f32, text: &str) {
        let y = self.y;
        self.text_at(font, size, x, y, text);
    }

    /// One line of text at an explicit baseline.
    fn text_at(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), real(size)]));
        self.ops
            .push(Operation::new("Td", vec![real(x), real(y)]));
        self.ops
            .push(Operation::new("Tj", vec![Object::string_literal(text)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// One line of text horizontally centered on the page.
    fn text_centered(&mut self, font: &str, size: f32, text: &str) {
        let x = (PAGE_WIDTH - text_width(text, size)) / 2.0;
        self.text(font, size, x.max(MARGIN), text);
    }

    /// Stroke a straight line.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops
            .push(Operation::new("m", vec![real(x1), real(y1)]));
        self.ops
            .push(Operation::new("l", vec![real(x2), real(y2)]));
        self.ops.push(Operation::new("S", vec![]));
    }

    /// Fill a light-gray rectangle.
    fn shade(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "rg",
            vec![real(0.94), real(0.94), real(0.94)],
        ));
        self.ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(width), real(height)],
        ));
        self.ops.push(Operation::new("f", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Place a previously registered image XObject.
    fn image(&mut self, name: &str, x: f32, width: f32, height: f32) {
        let y = self.y;
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                real(width),
                real(0.0),
                real(0.0),
                real(height),
                real(x),
                real(y),
            ],
        ));
        self.ops
            .push(Operation::new("Do", vec![name.into()]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// A two-column label/value grid starting at the current cursor, with the
    /// label column shaded. Leaves the cursor below the last row.
    fn table(&mut self, rows: &[(&str, &str)]) {
        let x0 = MARGIN;
        let x1 = MARGIN + LABEL_COL_WIDTH;
        let x2 = x1 + VALUE_COL_WIDTH;
        let top = self.y;
        #[allow(clippy::cast_precision_loss)]
        let bottom = top - ROW_HEIGHT * rows.len() as f32;

        for (i, (label, value)) in rows.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let row_top = top - ROW_HEIGHT * i as f32;
            let baseline = row_top - 15.0;
            self.shade(x0, row_top - ROW_HEIGHT, LABEL_COL_WIDTH, ROW_HEIGHT);
            self.text_at(FONT_BOLD, TABLE_SIZE, x0 + 6.0, baseline, label);
            self.text_at(FONT_REGULAR, TABLE_SIZE, x1 + 6.0, baseline, value);
        }

        // Grid strokes, gray.
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "RG",
            vec![real(0.5), real(0.5), real(0.5)],
        ));
        self.ops.push(Operation::new("w", vec![real(0.75)]));
        for i in 0..=rows.len() {
            #[allow(clippy::cast_precision_loss)]
            let y = top - ROW_HEIGHT * i as f32;
            self.line(x0, y, x2, y);
        }
        for x in [x0, x1, x2] {
            self.line(x, top, x, bottom);
        }
        self.ops.push(Operation::new("Q", vec![]));

        self.y = bottom;
    }
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

/// Approximate rendered width of a line of Helvetica text.
#[allow(clippy::cast_precision_loss)]
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Greedy word wrap against the estimated text width.
fn wrap(text: &str, max_width: f32, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    const PIXEL_PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    fn sample_form() -> AgreementForm {
        AgreementForm {
            vendor_name: "Spice Tours".to_string(),
            vendor_email: "a@b.com".to_string(),
            vendor_registration: "REG1".to_string(),
            vendor_address: "123 Beach Road".to_string(),
            contact_person: "Jane".to_string(),
            partnership_level: "growth".to_string(),
            ..AgreementForm::default()
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn renders_pdf_with_vendor_fields() {
        let pdf = PdfRenderer::default().render(&sample_form(), None).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(contains(&pdf, "Spice Tours"));
        assert!(contains(&pdf, "REG1"));
        assert!(contains(&pdf, "Vendor Partnership Agreement"));
        assert!(contains(&pdf, "4. DIGITAL SIGNATURES"));
    }

    #[test]
    fn growth_renders_25_percent() {
        let pdf = PdfRenderer::default().render(&sample_form(), None).unwrap();
        assert!(contains(&pdf, "Growth Partner"));
        assert!(contains(&pdf, "25% Commission"));
    }

    #[test]
    fn any_other_level_renders_30_percent() {
        for code in ["strategic", "platinum", ""] {
            let mut form = sample_form();
            form.partnership_level = code.to_string();
            let pdf = PdfRenderer::default().render(&form, None).unwrap();
            assert!(contains(&pdf, "Strategic Partner"), "code {code:?}");
            assert!(contains(&pdf, "30% Commission"), "code {code:?}");
        }
    }

    #[test]
    fn missing_optional_fields_render_as_blanks() {
        let form = AgreementForm {
            vendor_name: "Bare Tours".to_string(),
            vendor_email: "x@y.com".to_string(),
            vendor_registration: "R2".to_string(),
            contact_person: "Ali".to_string(),
            ..AgreementForm::default()
        };
        let pdf = PdfRenderer::default().render(&form, None).unwrap();
        assert!(contains(&pdf, "Bare Tours"));
    }

    #[test]
    fn placeholder_when_no_signature() {
        let pdf = PdfRenderer::default().render(&sample_form(), None).unwrap();
        assert!(contains(&pdf, "No Signature Provided"));
    }

    #[test]
    fn signature_bytes_suppress_placeholder() {
        let png = STANDARD.decode(PIXEL_PNG_B64).unwrap();
        let pdf = PdfRenderer::default()
            .render(&sample_form(), Some(&png))
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(!contains(&pdf, "No Signature Provided"));
    }

    #[test]
    fn garbage_signature_bytes_do_not_abort() {
        let pdf = PdfRenderer::default()
            .render(&sample_form(), Some(b"definitely not a png"))
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn rendering_does_not_mutate_input() {
        let form = sample_form();
        let before = form.clone();
        let _ = PdfRenderer::default().render(&form, None).unwrap();
        assert_eq!(form, before);
    }

    #[test]
    fn terms_page_carries_fixed_clauses() {
        let pdf = PdfRenderer::default().render(&sample_form(), None).unwrap();
        assert!(contains(&pdf, "Governing Law:"));
        assert!(contains(&pdf, "Confidentiality:"));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five six seven eight", 60.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0) <= 60.0 || !line.contains(' '));
        }
    }
}
