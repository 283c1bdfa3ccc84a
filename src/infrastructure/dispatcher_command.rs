use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    BotMessenger, Command, IncomingMessage, ListingSearchFetcher, OutgoingMessage,
    RepositorySearchFetcher, StdResult, inline_code, render_listings, render_repositories,
};

const WELCOME_TEXT: &str = "🔍 *Git & APK Search Bot*\n\n\
I look for apps (APK) on APKMirror and for sources and scripts on GitHub.\n\n\
*Commands:*\n\
/git [query] - search GitHub\n\
/apk [query] - search APKMirror\n\
/help - usage hints";

const HELP_TEXT: &str = "📚 *How to use the bot*\n\n\
🔹 `/git python telegram` - searches GitHub repositories matching the query\n\
🔹 `/apk youtube` - searches APKs on APKMirror\n\
🔹 For GitHub the bot lists repositories, with a download link when the latest release ships an APK.\n\
🔹 For APKMirror the bot gives direct links to the download pages.";

const GIT_USAGE_TEXT: &str = "❌ Add a query after /git, for example: `/git python telegram`";

const APK_USAGE_TEXT: &str = "❌ Add a query after /apk, for example: `/apk youtube`";

const NOTHING_FOUND_TEXT: &str = "😕 Nothing found. Try another query.";

const UNAVAILABLE_TEXT: &str = "⚠️ The search service is unavailable right now. Try again later.";

/// Routes user commands to the fetchers and replies with the rendered results.
pub struct CommandDispatcher {
    repository_fetcher: Arc<dyn RepositorySearchFetcher>,
    listing_fetcher: Arc<dyn ListingSearchFetcher>,
    messenger: Arc<dyn BotMessenger>,
    results_limit: u16,
}

impl CommandDispatcher {
    /// Creates a new `CommandDispatcher` instance.
    pub fn new(
        repository_fetcher: Arc<dyn RepositorySearchFetcher>,
        listing_fetcher: Arc<dyn ListingSearchFetcher>,
        messenger: Arc<dyn BotMessenger>,
        results_limit: u16,
    ) -> Self {
        Self {
            repository_fetcher,
            listing_fetcher,
            messenger,
            results_limit,
        }
    }

    /// Handles a message, ignoring texts that are not commands.
    pub async fn handle(&self, message: &IncomingMessage) -> StdResult<()> {
        let Some(command) = Command::parse(message.text()) else {
            debug!("Ignoring {message}");
            return Ok(());
        };
        info!("Handling {command} in chat {}", message.chat_id());

        match command {
            Command::Start => {
                self.messenger
                    .send_message(&OutgoingMessage::markdown(message.chat_id(), WELCOME_TEXT))
                    .await
            }
            Command::Help => {
                self.messenger
                    .send_message(&OutgoingMessage::markdown(message.chat_id(), HELP_TEXT))
                    .await
            }
            Command::Git(query) => self.search_repositories(message, &query).await,
            Command::Apk(query) => self.search_listings(message, &query).await,
        }
    }

    async fn search_repositories(&self, message: &IncomingMessage, query: &str) -> StdResult<()> {
        if query.is_empty() {
            return self.reply_markdown(message, GIT_USAGE_TEXT).await;
        }
        self.reply_markdown(
            message,
            &format!("🔍 Searching GitHub: {} ...", inline_code(query)),
        )
        .await?;

        match self
            .repository_fetcher
            .try_search(query, self.results_limit)
            .await
        {
            Ok(repositories) if repositories.is_empty() => {
                self.reply_plain(message, NOTHING_FOUND_TEXT).await
            }
            Ok(repositories) => {
                self.reply_markdown(message, &render_repositories(&repositories))
                    .await
            }
            Err(e) => {
                warn!("Repository search failed for query {query:?}: {e}");
                self.reply_plain(message, UNAVAILABLE_TEXT).await
            }
        }
    }

    async fn search_listings(&self, message: &IncomingMessage, query: &str) -> StdResult<()> {
        if query.is_empty() {
            return self.reply_markdown(message, APK_USAGE_TEXT).await;
        }
        self.reply_markdown(
            message,
            &format!("🔍 Searching APKMirror: {} ...", inline_code(query)),
        )
        .await?;

        match self
            .listing_fetcher
            .try_search(query, self.results_limit)
            .await
        {
            Ok(listings) if listings.is_empty() => {
                self.reply_plain(message, NOTHING_FOUND_TEXT).await
            }
            Ok(listings) => {
                self.reply_markdown(message, &render_listings(&listings))
                    .await
            }
            Err(e) => {
                warn!("Listing search failed for query {query:?}: {e}");
                self.reply_plain(message, UNAVAILABLE_TEXT).await
            }
        }
    }

    async fn reply_markdown(&self, message: &IncomingMessage, text: &str) -> StdResult<()> {
        self.messenger
            .send_message(&OutgoingMessage::markdown_reply(
                message.chat_id(),
                message.message_id(),
                text,
            ))
            .await
    }

    async fn reply_plain(&self, message: &IncomingMessage, text: &str) -> StdResult<()> {
        self.messenger
            .send_message(&OutgoingMessage::plain_reply(
                message.chat_id(),
                message.message_id(),
                text,
            ))
            .await
    }
}
