use std::fmt::Display;

/// Placeholder used when a repository has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description";

/// Placeholder used when a repository has no detected language.
pub const LANGUAGE_PLACEHOLDER: &str = "Unknown";

/// Placeholder used when a listing field is missing from the markup.
pub const FIELD_PLACEHOLDER: &str = "?";

/// A repository found by a code-hosting search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryResult {
    /// The owner/repo identifier.
    name: String,

    /// The canonical web address of the repository.
    url: String,

    /// The description of the repository.
    description: String,

    /// The number of stars the repository has.
    star_count: u32,

    /// The main language of the repository.
    language: String,

    /// The download address of the package asset of the latest release, if any.
    release_asset_url: Option<String>,
}

impl RepositoryResult {
    /// Creates a new `RepositoryResult`, falling back to placeholders for the missing fields.
    pub fn new(
        name: &str,
        url: &str,
        description: Option<&str>,
        star_count: u32,
        language: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            description: description.unwrap_or(DESCRIPTION_PLACEHOLDER).to_string(),
            star_count,
            language: language.unwrap_or(LANGUAGE_PLACEHOLDER).to_string(),
            release_asset_url: None,
        }
    }

    /// Returns the same repository with the given release asset address.
    pub fn with_release_asset_url(self, release_asset_url: Option<String>) -> Self {
        Self {
            release_asset_url,
            ..self
        }
    }

    /// Retrieves the owner/repo identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves the web address.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Retrieves the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Retrieves the star count.
    pub fn star_count(&self) -> u32 {
        self.star_count
    }

    /// Retrieves the language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Retrieves the release asset download address.
    pub fn release_asset_url(&self) -> Option<&str> {
        self.release_asset_url.as_deref()
    }
}

impl Display for RepositoryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repository: {}, Stars: {}, Language: {}, Asset: {}",
            self.name,
            self.star_count,
            self.language,
            self.release_asset_url.as_deref().unwrap_or("none")
        )
    }
}

/// A release row found on a listing site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingResult {
    /// The title of the release.
    title: String,

    /// The absolute address of the release page.
    url: String,

    /// The version label.
    version: String,

    /// The release date label.
    date: String,

    /// The file size label.
    size: String,
}

impl ListingResult {
    /// Creates a new `ListingResult`, falling back to `?` for the missing labels.
    pub fn new(
        title: &str,
        url: &str,
        version: Option<&str>,
        date: Option<&str>,
        size: Option<&str>,
    ) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            version: version.unwrap_or(FIELD_PLACEHOLDER).to_string(),
            date: date.unwrap_or(FIELD_PLACEHOLDER).to_string(),
            size: size.unwrap_or(FIELD_PLACEHOLDER).to_string(),
        }
    }

    /// Retrieves the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Retrieves the absolute address.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Retrieves the version label.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Retrieves the release date label.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Retrieves the file size label.
    pub fn size(&self) -> &str {
        &self.size
    }
}

impl Display for ListingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Listing: {}, Version: {}, Date: {}, Size: {}",
            self.title, self.version, self.date, self.size
        )
    }
}
