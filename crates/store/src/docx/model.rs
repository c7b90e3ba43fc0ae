//! DOCX document model
//!
//! A flat description of what goes into the package: sections with page
//! setup, header/footer variants, and body paragraphs. Built from document
//! metadata, then handed to the writer.

use chrono::{DateTime, Utc};
use doc_model::{DocumentContent, DocumentMetadata, PageGeometry};

/// How a section starts relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionBreak {
    /// Start on a new page
    #[default]
    NextPage,
    /// Continue on the same page
    Continuous,
}

impl SectionBreak {
    /// Value of `w:type/@w:val`
    pub fn as_str(self) -> &'static str {
        match self {
            SectionBreak::NextPage => "nextPage",
            SectionBreak::Continuous => "continuous",
        }
    }
}

/// Live fields that Word evaluates at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Current page number
    Page,
    /// Total number of pages
    NumPages,
}

impl FieldKind {
    /// Field instruction text
    pub fn instruction(self) -> &'static str {
        match self {
            FieldKind::Page => "PAGE",
            FieldKind::NumPages => "NUMPAGES",
        }
    }
}

/// A run of inline content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxRun {
    /// Literal text
    Text(String),
    /// A field evaluated by the word processor
    Field(FieldKind),
}

/// A paragraph made of runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxParagraph {
    pub runs: Vec<DocxRun>,
}

impl DocxParagraph {
    /// A paragraph with no runs
    pub fn empty() -> Self {
        Self::default()
    }

    /// A paragraph holding one text run
    pub fn text(text: impl Into<String>) -> Self {
        Self::empty().with_text(text)
    }

    /// Builder: append a text run
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.runs.push(DocxRun::Text(text.into()));
        self
    }

    /// Builder: append a field
    pub fn with_field(mut self, field: FieldKind) -> Self {
        self.runs.push(DocxRun::Field(field));
        self
    }

    /// Whether the paragraph has no runs
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// `w:headerReference/@w:type` and `w:footerReference/@w:type` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceType {
    Default,
    First,
    Even,
}

impl ReferenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceType::Default => "default",
            ReferenceType::First => "first",
            ReferenceType::Even => "even",
        }
    }
}

/// Header or footer variants for one section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFooterParts {
    pub default: Option<DocxParagraph>,
    pub first: Option<DocxParagraph>,
    pub even: Option<DocxParagraph>,
    pub odd: Option<DocxParagraph>,
}

impl HeaderFooterParts {
    /// Parts with only a default variant
    pub fn with_default(paragraph: DocxParagraph) -> Self {
        Self {
            default: Some(paragraph),
            ..Self::default()
        }
    }

    /// Whether even/odd variants are present
    pub fn has_odd_even(&self) -> bool {
        self.even.is_some() || self.odd.is_some()
    }

    /// Parts to write, with the reference type each is bound to
    ///
    /// OOXML has no odd reference type: with even/odd headers enabled the
    /// default reference renders on odd pages, so an odd variant takes the
    /// default slot.
    pub fn references(&self) -> Vec<(ReferenceType, &DocxParagraph)> {
        let mut refs = Vec::new();
        if let Some(default) = self.odd.as_ref().or(self.default.as_ref()) {
            refs.push((ReferenceType::Default, default));
        }
        if let Some(even) = &self.even {
            refs.push((ReferenceType::Even, even));
        }
        if let Some(first) = &self.first {
            refs.push((ReferenceType::First, first));
        }
        refs
    }
}

/// One document section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxSection {
    pub page: PageGeometry,
    /// Whether page 1 of the section uses the first-page variants
    pub title_page: bool,
    pub break_type: SectionBreak,
    pub headers: HeaderFooterParts,
    pub footers: HeaderFooterParts,
    pub body: Vec<DocxParagraph>,
}

impl DocxSection {
    /// A US-Letter section with no headers, footers, or body
    pub fn new() -> Self {
        Self {
            page: PageGeometry::us_letter(),
            title_page: false,
            break_type: SectionBreak::NextPage,
            headers: HeaderFooterParts::default(),
            footers: HeaderFooterParts::default(),
            body: Vec::new(),
        }
    }
}

impl Default for DocxSection {
    fn default() -> Self {
        Self::new()
    }
}

/// Package-level document properties (`docProps/core.xml`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: String,
    pub creator: String,
    pub last_modified_by: String,
    pub modified: DateTime<Utc>,
}

/// A complete DOCX document ready to be packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxDocument {
    pub sections: Vec<DocxSection>,
    pub core: CoreProperties,
}

impl DocxDocument {
    /// Build the section layout for a document
    ///
    /// The body is placed in the first section. A different first page on
    /// either band adds a leading title-page section whose `first` slots carry
    /// the first-page variants of both bands; its remaining slots repeat the
    /// base and odd/even parts so pages after the first render them. The main
    /// section then follows as a continuous break with an empty paragraph.
    /// Visibility flags apply to the live view and PDF only.
    pub fn from_document(metadata: &DocumentMetadata, content: &DocumentContent) -> Self {
        let mut sections = Vec::with_capacity(2);
        let body = DocxParagraph::text(content.as_markup());

        let mut headers =
            HeaderFooterParts::with_default(DocxParagraph::text(metadata.header_content.as_str()));
        if metadata.header_settings.different_odd_even {
            headers.even = Some(DocxParagraph::text(metadata.header_settings.even_page()));
            headers.odd = Some(DocxParagraph::text(metadata.header_settings.odd_page()));
        }

        // The odd footer takes the default slot, so it keeps the live fields
        let mut footers = HeaderFooterParts::with_default(page_number_footer(&metadata.footer_content));
        if metadata.footer_settings.different_odd_even {
            footers.even = Some(DocxParagraph::text(metadata.footer_settings.even_page()));
            footers.odd = Some(page_number_footer(metadata.footer_settings.odd_page()));
        }

        let leading = metadata.has_different_first_page();
        if leading {
            sections.push(DocxSection {
                title_page: true,
                headers: HeaderFooterParts {
                    first: Some(DocxParagraph::text(metadata.header_settings.first_page())),
                    ..headers.clone()
                },
                footers: HeaderFooterParts {
                    first: Some(DocxParagraph::text(metadata.footer_settings.first_page())),
                    ..footers.clone()
                },
                body: vec![body.clone()],
                ..DocxSection::new()
            });
        }

        sections.push(DocxSection {
            break_type: if leading {
                SectionBreak::Continuous
            } else {
                SectionBreak::NextPage
            },
            headers,
            footers,
            body: vec![if leading { DocxParagraph::empty() } else { body }],
            ..DocxSection::new()
        });

        Self {
            sections,
            core: CoreProperties {
                title: metadata.title.clone(),
                creator: metadata.author.clone(),
                last_modified_by: metadata.author.clone(),
                modified: metadata.last_updated,
            },
        }
    }

    /// Whether any section has even/odd header or footer variants
    pub fn even_and_odd_headers(&self) -> bool {
        self.sections
            .iter()
            .any(|s| s.headers.has_odd_even() || s.footers.has_odd_even())
    }
}

/// Footer paragraph: base text, then `PAGE of NUMPAGES`
fn page_number_footer(footer_content: &str) -> DocxParagraph {
    DocxParagraph::text(footer_content)
        .with_field(FieldKind::Page)
        .with_text(" of ")
        .with_field(FieldKind::NumPages)
}
