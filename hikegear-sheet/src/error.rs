/// Errors that can occur while reading a spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    Format(String),
}

impl SheetError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// The message shown when the upload is not an `.xlsx` workbook at all.
    pub fn not_xlsx() -> Self {
        Self::Format("bad format, file must have .xlsx extension".to_string())
    }
}
