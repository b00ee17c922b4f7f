//! PDF Writer Module
//! Builds a single-page PDF 1.4 document holding one JPEG image.
//!
//! The file is assembled by hand: five objects, an xref table with the byte
//! offset of every object, and a trailer.

/// PDF user space units per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Single-image PDF builder
pub struct PdfWriter {
    buffer: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    /// Build a page sized to the image at `dpi`, with the JPEG drawn edge to edge.
    pub fn image_page(jpeg: &[u8], width_px: u32, height_px: u32, dpi: f64) -> Vec<u8> {
        let page_w = width_px as f64 / dpi * POINTS_PER_INCH;
        let page_h = height_px as f64 / dpi * POINTS_PER_INCH;

        let mut pdf = Self {
            buffer: Vec::with_capacity(jpeg.len() + 1024),
            offsets: Vec::new(),
        };

        // Binary marker comment so transfer tools keep the file 8-bit clean
        pdf.buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        pdf.object(b"<< /Type /Catalog /Pages 2 0 R >>");
        pdf.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
        pdf.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>",
                page_w, page_h
            )
            .as_bytes(),
        );
        pdf.stream(
            &format!(
                "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>",
                width_px,
                height_px,
                jpeg.len()
            ),
            jpeg,
        );
        let content = format!("q\n{:.2} 0 0 {:.2} 0 0 cm\n/Im0 Do\nQ\n", page_w, page_h);
        pdf.stream(
            &format!("<< /Length {} >>", content.len()),
            content.as_bytes(),
        );

        pdf.finish()
    }

    fn begin_object(&mut self) {
        self.offsets.push(self.buffer.len());
        let header = format!("{} 0 obj\n", self.offsets.len());
        self.buffer.extend_from_slice(header.as_bytes());
    }

    fn object(&mut self, body: &[u8]) {
        self.begin_object();
        self.buffer.extend_from_slice(body);
        self.buffer.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, dict: &str, data: &[u8]) {
        self.begin_object();
        self.buffer.extend_from_slice(dict.as_bytes());
        self.buffer.extend_from_slice(b"\nstream\n");
        self.buffer.extend_from_slice(data);
        self.buffer.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buffer.len();
        let count = self.offsets.len() + 1;

        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", count);
        for offset in &self.offsets {
            // Each entry is exactly 20 bytes
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            count, xref_offset
        ));
        self.buffer.extend_from_slice(xref.as_bytes());
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn header_and_trailer() {
        let pdf = PdfWriter::image_page(&[0xFF, 0xD8, 0xFF, 0xD9], 300, 150, 300.0);
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));

        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/MediaBox [0 0 72.00 36.00]"));
        assert!(text.contains("/Width 300 /Height 150"));
        assert!(text.contains("/Filter /DCTDecode /Length 4"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = PdfWriter::image_page(b"not really a jpeg", 10, 10, 100.0);

        let xref_at = find(&pdf, b"\nxref\n").unwrap() + 1;
        let startxref = find(&pdf, b"startxref\n").unwrap() + b"startxref\n".len();
        let declared: usize = String::from_utf8_lossy(&pdf[startxref..])
            .lines()
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, xref_at);

        let table = String::from_utf8_lossy(&pdf[xref_at..]).to_string();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take(5)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 5);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(pdf[*offset..].starts_with(expected.as_bytes()));
        }
    }
}
