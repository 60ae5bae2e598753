use chrono::Utc;

/// Built-in test files the download endpoint can emit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Docx,
    Pdf,
    Txt,
    Zip,
}

impl FileKind {
    /// Resolve a `file` query parameter; unknown ids are rejected
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "docx" => Some(FileKind::Docx),
            "pdf" => Some(FileKind::Pdf),
            "txt" => Some(FileKind::Txt),
            "zip" => Some(FileKind::Zip),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Docx => "docx",
            FileKind::Pdf => "pdf",
            FileKind::Txt => "txt",
            FileKind::Zip => "zip",
        }
    }

    /// The file's native MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            FileKind::Pdf => "application/pdf",
            FileKind::Txt => "text/plain",
            FileKind::Zip => "application/zip",
        }
    }

    /// Generate the response body for this file
    pub fn body(&self) -> Vec<u8> {
        match self {
            FileKind::Docx => generate_word_body(),
            FileKind::Pdf => generate_pdf_body(),
            FileKind::Txt => generate_text_body(),
            FileKind::Zip => generate_zip_body(),
        }
    }
}

/// Content-Disposition modes accepted by the download endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// `attachment` with no filename
    Attachment,
    /// `attachment; filename="..."`
    AttachmentFilename,
    /// `inline`
    Inline,
}

impl Disposition {
    pub fn from_param(param: &str) -> Self {
        match param {
            "inline" => Disposition::Inline,
            "attachment-filename" => Disposition::AttachmentFilename,
            _ => Disposition::Attachment,
        }
    }
}

/// MIME override modes accepted by the download endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MimeOverride {
    OctetStream,
    Plain,
}

impl MimeOverride {
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "octet-stream" => Some(MimeOverride::OctetStream),
            "plain" => Some(MimeOverride::Plain),
            _ => None,
        }
    }
}

/// Fully resolved header policy for one download request.
///
/// Query parameters come in as loose strings; this holds the decisions so
/// handlers only have to apply them.
#[derive(Clone, Debug)]
pub struct DownloadPolicy {
    pub kind: FileKind,
    pub disposition: Disposition,
    pub mime_override: Option<MimeOverride>,
    /// X-Download-Options value, `None` when the header is omitted
    pub download_options: Option<String>,
    /// Tag embedded in the generated filename
    pub test_tag: String,
}

impl DownloadPolicy {
    /// Resolve the raw query parameters. Returns `None` for an unknown
    /// file id; all other parameters fall back to defaults.
    pub fn resolve(
        file: Option<&str>,
        headers: Option<&str>,
        disposition: Option<&str>,
        mime_type: Option<&str>,
        test: Option<&str>,
    ) -> Option<Self> {
        let kind = FileKind::from_id(file.unwrap_or("docx"))?;
        // "none" disables the header; absent falls back to noopen, the
        // value the lab exists to reproduce
        let download_options = match headers.unwrap_or("noopen") {
            "none" => None,
            value => Some(value.to_string()),
        };
        Some(Self {
            kind,
            disposition: Disposition::from_param(disposition.unwrap_or("attachment")),
            mime_override: mime_type.and_then(MimeOverride::from_param),
            download_options,
            test_tag: test.unwrap_or("1").to_string(),
        })
    }

    pub fn filename(&self) -> String {
        format!("test-{}.{}", self.test_tag, self.kind.extension())
    }

    /// Effective Content-Type after any override
    pub fn content_type(&self) -> &'static str {
        match self.mime_override {
            Some(MimeOverride::OctetStream) => "application/octet-stream",
            Some(MimeOverride::Plain) => "text/plain",
            None => self.kind.mime_type(),
        }
    }

    pub fn content_disposition(&self) -> String {
        match self.disposition {
            Disposition::Attachment => "attachment".to_string(),
            Disposition::AttachmentFilename => {
                format!("attachment; filename=\"{}\"", self.filename())
            }
            Disposition::Inline => "inline".to_string(),
        }
    }

    /// The complete header set for the response, cache suppression included
    pub fn response_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Content-Type", self.content_type().to_string()),
            ("Content-Disposition", self.content_disposition()),
        ];
        if let Some(value) = &self.download_options {
            headers.push(("X-Download-Options", value.clone()));
        }
        headers.push((
            "Cache-Control",
            "no-cache, no-store, must-revalidate".to_string(),
        ));
        headers.push(("Pragma", "no-cache".to_string()));
        headers.push(("Expires", "0".to_string()));
        headers
    }
}

fn generate_text_body() -> Vec<u8> {
    format!(
        "X-Download-Options Header Test File\n\
         Created: {}\n\n\
         This file tests the X-Download-Options header behavior.\n\n\
         The X-Download-Options: noopen header can prevent files from opening\n\
         directly from the browser download bubble in Chromium-based browsers.\n\n\
         To reproduce the issue:\n\
         1. Download with X-Download-Options: noopen\n\
         2. Try opening from the download bubble\n\
         3. Compare with downloads without the header\n",
        Utc::now().to_rfc3339()
    )
    .into_bytes()
}

fn generate_word_body() -> Vec<u8> {
    format!(
        "X-Download-Options Header Test Document\n\n\
         Created: {}\n\n\
         When X-Download-Options: noopen is set, browsers may prevent direct\n\
         opening of downloaded files from the download bubble, especially\n\
         Office documents.\n\n\
         Test instructions:\n\
         1. Download this file with X-Download-Options: noopen\n\
         2. Try to open it directly from the browser download bubble\n\
         3. Check for \"file permissions\" or similar errors\n\
         4. Repeat without the header to compare behavior\n\n\
         Expected results:\n\
         - With X-Download-Options: noopen -> may fail to open directly\n\
         - Without the header -> should open normally\n",
        Utc::now().to_rfc3339()
    )
    .into_bytes()
}

fn generate_pdf_body() -> Vec<u8> {
    // Minimal single-page PDF with one line of text
    let created = Utc::now().to_rfc3339();
    format!(
        "%PDF-1.4\n\
         1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
         2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n\
         3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n\
         4 0 obj\n<< /Length 120 >>\nstream\n\
         BT\n/F1 12 Tf\n50 750 Td\n(X-Download-Options Header Test) Tj\n\
         0 -20 Td\n(Created: {created}) Tj\nET\n\
         endstream\nendobj\n\
         5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n\
         trailer\n<< /Size 6 /Root 1 0 R >>\n\
         %%EOF\n"
    )
    .into_bytes()
}

fn generate_zip_body() -> Vec<u8> {
    // Empty stored entry named "test.txt" plus end-of-central-directory
    vec![
        0x50, 0x4B, 0x03, 0x04, // local file header signature
        0x14, 0x00, // version needed to extract
        0x00, 0x00, // general purpose bit flag
        0x00, 0x00, // compression method (stored)
        0x00, 0x00, // last mod time
        0x00, 0x00, // last mod date
        0x00, 0x00, 0x00, 0x00, // CRC-32
        0x00, 0x00, 0x00, 0x00, // compressed size
        0x00, 0x00, 0x00, 0x00, // uncompressed size
        0x08, 0x00, // file name length
        0x00, 0x00, // extra field length
        b't', b'e', b's', b't', b'.', b't', b'x', b't', // "test.txt"
        0x50, 0x4B, 0x05, 0x06, // end of central directory signature
        0x00, 0x00, // number of this disk
        0x00, 0x00, // disk with central directory
        0x00, 0x00, // central directory records on this disk
        0x00, 0x00, // total central directory records
        0x00, 0x00, 0x00, 0x00, // size of central directory
        0x00, 0x00, 0x00, 0x00, // offset of central directory
        0x00, 0x00, // comment length
    ]
}
