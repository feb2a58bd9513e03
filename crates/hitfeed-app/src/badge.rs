//! Badge URL generator.
//!
//! Derives the badge image URL and two copyable snippets (Markdown and HTML)
//! from a username/repository pair and the service origin. Independent of the
//! event stream.

use hitfeed_core::Origin;

/// Username used until the user enters one.
pub const DEFAULT_USERNAME: &str = "webklex";

/// Repository used until the user enters one.
pub const DEFAULT_REPOSITORY: &str = "gohits";

/// Alt text of the badge image.
const ALT_TEXT: &str = "Hits";

/// Editable badge input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeField {
    /// Account the counter belongs to.
    Username,
    /// Repository the counter belongs to.
    Repository,
}

impl BadgeField {
    /// The other field.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Username => Self::Repository,
            Self::Repository => Self::Username,
        }
    }

    /// Field label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Repository => "Repository",
        }
    }
}

/// Current badge inputs.
///
/// # Invariants
///
/// - Neither field is ever empty. Empty edits are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeInputs {
    /// Account name.
    pub username: String,
    /// Repository name.
    pub repository: String,
}

impl Default for BadgeInputs {
    fn default() -> Self {
        Self { username: DEFAULT_USERNAME.to_string(), repository: DEFAULT_REPOSITORY.to_string() }
    }
}

impl BadgeInputs {
    /// Stored value of `field`.
    pub fn get(&self, field: BadgeField) -> &str {
        match field {
            BadgeField::Username => &self.username,
            BadgeField::Repository => &self.repository,
        }
    }
}

/// Generated badge strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeOutput {
    /// `<origin>/svg/<username>/<repository>`
    pub image_url: String,
    /// Markdown image link to the origin.
    pub markdown: String,
    /// HTML image link with `<` and `>` written as entities.
    pub html: String,
}

impl BadgeOutput {
    /// HTML snippet as markup, entities resolved.
    ///
    /// Terminals print text literally, so this is what a user copies there.
    pub fn html_source(&self) -> String {
        self.html.replace("&lt;", "<").replace("&gt;", ">")
    }
}

/// Badge generator.
///
/// Holds the inputs and the output derived from them. Every input change
/// regenerates the output, whether or not the change was accepted.
#[derive(Debug, Clone)]
pub struct BadgeGenerator {
    origin: Origin,
    inputs: BadgeInputs,
    output: BadgeOutput,
}

impl BadgeGenerator {
    /// Create a generator with default inputs and generate once.
    pub fn new(origin: &Origin) -> Self {
        let mut generator = Self {
            origin: origin.clone(),
            inputs: BadgeInputs::default(),
            output: BadgeOutput::default(),
        };
        generator.regenerate();
        generator
    }

    /// Apply an input change and regenerate.
    ///
    /// An empty `value` keeps the previous input.
    pub fn on_input_change(&mut self, field: BadgeField, value: &str) {
        if value.is_empty() {
            tracing::trace!(?field, "ignoring empty badge input");
        } else {
            let slot = match field {
                BadgeField::Username => &mut self.inputs.username,
                BadgeField::Repository => &mut self.inputs.repository,
            };
            value.clone_into(slot);
        }
        self.regenerate();
    }

    /// Recompute the output from the current inputs.
    pub fn regenerate(&mut self) {
        let origin = self.origin.to_string();
        let image_url = self.origin.badge_url(&self.inputs.username, &self.inputs.repository);
        let markdown = format!("[![{ALT_TEXT}]({image_url})]({origin})");
        let html = format!(
            "&lt;a href=\"{origin}\"&gt;&lt;img src=\"{image_url}\" alt=\"{ALT_TEXT}\"/&gt;&lt;/a&gt;"
        );

        self.output = BadgeOutput { image_url, markdown, html };
    }

    /// Current inputs.
    pub fn inputs(&self) -> &BadgeInputs {
        &self.inputs
    }

    /// Current output.
    pub fn output(&self) -> &BadgeOutput {
        &self.output
    }

    /// Origin the badge links to.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}
