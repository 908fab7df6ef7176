//! Field specifications and registry.
//!
//! A record is a bag of named fields, and every field the format engine knows
//! about is declared here, once. The parser, the serializer and the matcher
//! never special-case a field by name: they read the capability flags off its
//! [`FieldSpec`].
//!
//! ## Flags
//!
//! | Flag | Meaning |
//! |------|---------|
//! | `required` | Must be present and non-empty |
//! | `multiple` | Value is an ordered list, one element per indented line |
//! | `alphabetical` | List is sorted on output instead of keeping insertion order |
//! | `searchable` | Bare (unscoped) search terms look at this field |
//! | `editable` | Shown in the editing template |
//! | `keyword_style` | List elements are `keyword[: description]` entries |
//! | `longform` | Multi-paragraph free text, hidden in brief display |
//! | `numeric` | All-digit value, stored as an integer |
//! | `choices` | Closed set of permitted values |
//!
//! Declaration order is emission order: the serializer walks [`FIELDS`] top to
//! bottom regardless of the order fields appeared in the input.

/// Maximum width, in columns, of a serialized line.
pub const MAX_WIDTH: usize = 80;

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Specification for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name as it appears on disk (e.g. "title", "plot-summary")
    pub name: &'static str,
    pub required: bool,
    pub multiple: bool,
    pub alphabetical: bool,
    pub searchable: bool,
    pub editable: bool,
    pub keyword_style: bool,
    pub longform: bool,
    pub numeric: bool,
    /// Permitted values, in the order they are listed in error messages.
    pub choices: Option<&'static [&'static str]>,
}

impl FieldSpec {
    /// Create a plain, editable, single-valued field.
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            multiple: false,
            alphabetical: false,
            searchable: false,
            editable: true,
            keyword_style: false,
            longform: false,
            numeric: false,
            choices: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    const fn longform(mut self) -> Self {
        self.longform = true;
        self
    }

    const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    const fn internal(mut self) -> Self {
        self.editable = false;
        self
    }

    /// A list of `keyword[: description]` entries.
    const fn keywords(mut self) -> Self {
        self.multiple = true;
        self.keyword_style = true;
        self
    }

    const fn alphabetical(mut self) -> Self {
        self.alphabetical = true;
        self
    }

    const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }
}

/// Registry of every field a record may carry.
///
/// This is the single source of truth for the record format.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title").required().searchable(),
    FieldSpec::new("creator").searchable(),
    FieldSpec::new("type")
        .required()
        .choices(&["book", "film", "play", "story"]),
    FieldSpec::new("year").numeric(),
    FieldSpec::new("language"),
    FieldSpec::new("plot-summary").longform(),
    FieldSpec::new("characters").keywords().searchable(),
    FieldSpec::new("locations").keywords().searchable(),
    FieldSpec::new("keywords")
        .keywords()
        .alphabetical()
        .searchable(),
    FieldSpec::new("external")
        .keywords()
        .alphabetical()
        .searchable(),
    FieldSpec::new("quotes").longform(),
    FieldSpec::new("notes").longform(),
    FieldSpec::new(LAST_UPDATED).internal(),
    FieldSpec::new(CREATED_AT).internal(),
];

pub const LAST_UPDATED: &str = "last-updated";
pub const CREATED_AT: &str = "created-at";

/// The field whose locations are resolved against the location hierarchy.
pub const LOCATIONS: &str = "locations";

/// Keyword-style field left out of keyword statistics (character names are
/// not keywords in any useful sense).
pub const CHARACTERS: &str = "characters";

/// Look up a field spec by name.
pub fn get_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// Names of the fields consulted by bare search terms.
pub fn searchable_fields() -> impl Iterator<Item = &'static str> {
    FIELDS
        .iter()
        .filter(|spec| spec.searchable)
        .map(|spec| spec.name)
}
