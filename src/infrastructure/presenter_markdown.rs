use crate::{ListingResult, RepositoryResult};

/// Descriptions longer than this many characters are truncated.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Escapes the characters that open an entity in Telegram legacy Markdown.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Formats the text in bold. Entities can't be escaped from inside, so asterisks are dropped.
fn bold(text: &str) -> String {
    format!("*{}*", text.replace('*', ""))
}

/// Formats the text as inline code.
pub fn inline_code(text: &str) -> String {
    format!("`{}`", text.replace('`', "'"))
}

/// Percent-encodes closing parentheses, which would otherwise end the link target early.
fn link_target(url: &str) -> String {
    url.replace(')', "%29")
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        let truncated = description
            .chars()
            .take(DESCRIPTION_MAX_CHARS)
            .collect::<String>();
        format!("{truncated}...")
    } else {
        description.to_string()
    }
}

fn render_repository(repository: &RepositoryResult) -> String {
    let mut block = format!(
        "📦 {}\n⭐ {} • 🐍 {}\n📝 {}\n🔗 [Open repository]({})\n",
        bold(repository.name()),
        repository.star_count(),
        escape_markdown(repository.language()),
        escape_markdown(&truncate_description(repository.description())),
        link_target(repository.url())
    );
    if let Some(release_asset_url) = repository.release_asset_url() {
        block.push_str(&format!(
            "📱 [Download APK]({})\n",
            link_target(release_asset_url)
        ));
    }

    block
}

fn render_listing(listing: &ListingResult) -> String {
    format!(
        "📱 {}\nVersion: {} • {}\n💾 {}\n🔗 [Download from APKMirror]({})\n",
        bold(listing.title()),
        escape_markdown(listing.version()),
        escape_markdown(listing.date()),
        escape_markdown(listing.size()),
        link_target(listing.url())
    )
}

/// Renders repositories as Markdown blocks separated by a blank line.
pub fn render_repositories(repositories: &[RepositoryResult]) -> String {
    repositories
        .iter()
        .map(render_repository)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders listing rows as Markdown blocks separated by a blank line.
pub fn render_listings(listings: &[ListingResult]) -> String {
    listings
        .iter()
        .map(render_listing)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_markdown_prefixes_entity_characters() {
        assert_eq!(r"snake\_case \*x\* \`y\` \[z]", escape_markdown("snake_case *x* `y` [z]"));
    }

    #[test]
    fn inline_code_replaces_backticks() {
        assert_eq!("`a'b`", inline_code("a`b"));
    }

    #[test]
    fn render_repository_with_release_asset() {
        let repository = RepositoryResult::new(
            "org-1/telegram-app",
            "https://github.com/org-1/telegram-app",
            Some("A Telegram client"),
            200,
            Some("Python"),
        )
        .with_release_asset_url(Some("https://github.com/download/app.apk".to_string()));

        assert_eq!(
            "📦 *org-1/telegram-app*\n\
             ⭐ 200 • 🐍 Python\n\
             📝 A Telegram client\n\
             🔗 [Open repository](https://github.com/org-1/telegram-app)\n\
             📱 [Download APK](https://github.com/download/app.apk)\n",
            render_repositories(&[repository])
        );
    }

    #[test]
    fn render_repository_truncates_long_description() {
        let description = "é".repeat(DESCRIPTION_MAX_CHARS + 1);
        let repository =
            RepositoryResult::new("org/repo", "https://x/org/repo", Some(&description), 1, None);

        let rendered = render_repositories(&[repository]);

        assert!(rendered.contains(&format!("📝 {}...\n", "é".repeat(DESCRIPTION_MAX_CHARS))));
        assert!(!rendered.contains("Download APK"));
    }

    #[test]
    fn render_repository_keeps_description_at_limit() {
        let description = "a".repeat(DESCRIPTION_MAX_CHARS);
        let repository =
            RepositoryResult::new("org/repo", "https://x/org/repo", Some(&description), 1, None);

        let rendered = render_repositories(&[repository]);

        assert!(rendered.contains(&format!("📝 {description}\n")));
    }

    #[test]
    fn render_encodes_closing_parenthesis_in_links() {
        let repository = RepositoryResult::new(
            "org/repo",
            "https://github.com/org/repo_(fork)",
            None,
            1,
            None,
        )
        .with_release_asset_url(Some("https://github.com/download/app(1).apk".to_string()));
        let listing = ListingResult::new("App", "https://x/apk/app-(beta)/", None, None, None);

        let repositories = render_repositories(&[repository]);
        let listings = render_listings(&[listing]);

        assert!(repositories.contains("[Open repository](https://github.com/org/repo_(fork%29)\n"));
        assert!(repositories.contains("[Download APK](https://github.com/download/app(1%29.apk)\n"));
        assert!(listings.contains("[Download from APKMirror](https://x/apk/app-(beta%29/)\n"));
    }

    #[test]
    fn render_listings_separates_blocks_with_blank_line() {
        let listings = vec![
            ListingResult::new("App 1", "https://x/1", Some("1.0"), Some("Oct 1"), Some("1 MB")),
            ListingResult::new("App 2", "https://x/2", None, None, None),
        ];

        assert_eq!(
            "📱 *App 1*\nVersion: 1.0 • Oct 1\n💾 1 MB\n🔗 [Download from APKMirror](https://x/1)\n\
             \n\
             📱 *App 2*\nVersion: ? • ?\n💾 ?\n🔗 [Download from APKMirror](https://x/2)\n",
            render_listings(&listings)
        );
    }
}
