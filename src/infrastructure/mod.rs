mod dispatcher_command;
mod fetcher_apkmirror;
mod fetcher_github;
mod messenger_telegram;
mod parser_apkmirror;
mod pinger_liveness;
mod poller_bot;
mod presenter_markdown;

pub use dispatcher_command::*;
pub use fetcher_apkmirror::*;
pub use fetcher_github::*;
pub use messenger_telegram::*;
pub use parser_apkmirror::*;
pub use pinger_liveness::*;
pub use poller_bot::*;
pub use presenter_markdown::*;
