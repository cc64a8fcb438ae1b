//! Template directives and the template builder.

/// A single template directive.
///
/// Paths are dotted field paths into the input record (`"chapter"`,
/// `"student.name"`). Inside an [`Segment::Each`] body, paths resolve
/// against the current array element, and `"."` refers to the element
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Fixed text emitted verbatim.
    Literal(String),

    /// Scalar substitution (string, integer, number, or boolean).
    Placeholder {
        /// Field path to substitute
        path: String,
    },

    /// Body emitted only when the field is present and truthy.
    ///
    /// Truthy: `true`, a non-zero number, a non-empty string, or a
    /// non-empty array. Absent optional fields omit the whole block;
    /// no literal placeholder token ever leaks into the payload.
    Conditional {
        /// Gating field path
        path: String,
        /// Directives emitted when the gate passes
        body: Vec<Segment>,
    },

    /// Body emitted once per element of an array field.
    ///
    /// The separator is emitted between consecutive elements but not
    /// after the last one.
    Each {
        /// Array field path
        path: String,
        /// Directives emitted for each element
        body: Vec<Segment>,
        /// Text emitted between elements
        separator: Option<String>,
    },

    /// Appends the attachments found at the path to the payload.
    ///
    /// The field may hold a single attachment or an array of them;
    /// order is preserved. Emits no text. Absent fields are skipped.
    Media {
        /// Attachment field path
        path: String,
    },
}

/// A fixed instruction template for one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Creates a template directly from segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns a builder for fluent template construction.
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// The template's directives in emission order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Fluent builder over the closed directive set.
///
/// # Examples
///
/// ```
/// use vidya_template::Template;
///
/// let template = Template::builder()
///     .literal("Generate notes on ")
///     .placeholder("chapter")
///     .conditional("remarks", |body| {
///         body.literal(" Additional guidance: ").placeholder("remarks")
///     })
///     .build();
///
/// assert_eq!(template.segments().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    segments: Vec<Segment>,
}

impl TemplateBuilder {
    /// Appends fixed text.
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Literal(text.into()));
        self
    }

    /// Appends a scalar substitution.
    pub fn placeholder(mut self, path: impl Into<String>) -> Self {
        self.segments.push(Segment::Placeholder { path: path.into() });
        self
    }

    /// Appends a conditional block built by `body`.
    pub fn conditional(
        mut self,
        path: impl Into<String>,
        body: impl FnOnce(TemplateBuilder) -> TemplateBuilder,
    ) -> Self {
        let inner = body(TemplateBuilder::default());
        self.segments.push(Segment::Conditional {
            path: path.into(),
            body: inner.segments,
        });
        self
    }

    /// Appends an iteration block with a separator between elements.
    pub fn each(
        mut self,
        path: impl Into<String>,
        separator: impl Into<String>,
        body: impl FnOnce(TemplateBuilder) -> TemplateBuilder,
    ) -> Self {
        let inner = body(TemplateBuilder::default());
        self.segments.push(Segment::Each {
            path: path.into(),
            body: inner.segments,
            separator: Some(separator.into()),
        });
        self
    }

    /// Appends an iteration block with no separator.
    pub fn each_plain(
        mut self,
        path: impl Into<String>,
        body: impl FnOnce(TemplateBuilder) -> TemplateBuilder,
    ) -> Self {
        let inner = body(TemplateBuilder::default());
        self.segments.push(Segment::Each {
            path: path.into(),
            body: inner.segments,
            separator: None,
        });
        self
    }

    /// Appends a media embed directive.
    pub fn media(mut self, path: impl Into<String>) -> Self {
        self.segments.push(Segment::Media { path: path.into() });
        self
    }

    /// Finalizes the template.
    pub fn build(self) -> Template {
        Template::new(self.segments)
    }
}
