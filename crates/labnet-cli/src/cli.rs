use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use labnet_core::PostKind;

#[derive(Parser)]
#[command(
    name = "labnet",
    about = "Research network feed, connections and messages",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Data directory holding the collections and config.toml
    #[arg(long, global = true, env = "LABNET_DATA_DIR", default_value = ".labnet")]
    pub data_dir: PathBuf,

    /// Output format (overrides `[output] format` in config.toml)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory, seed it and write config.toml
    Init(InitArgs),
    /// Show the feed, newest first
    Feed(FeedArgs),
    /// Publish a post, article or job offer
    Post(PostArgs),
    /// Change a post's text or links
    EditPost(EditPostArgs),
    /// Delete a post
    DeletePost(DeletePostArgs),
    /// Like or unlike a post
    Like(PostRef),
    /// Share a post
    Share(PostRef),
    /// Comment on a post
    Comment(CommentArgs),
    /// Delete a comment
    DeleteComment(DeleteCommentArgs),
    /// Save or unsave a post
    Save(PostRef),
    /// List saved posts
    Saved,
    /// List notifications, or mark them read
    Notifications(NotificationsArgs),
    /// Send a connection request
    Connect(UserRef),
    /// Accept a pending connection request
    Accept(RequestRef),
    /// Reject a pending connection request
    Reject(RequestRef),
    /// Withdraw a pending connection request
    Withdraw(WithdrawArgs),
    /// Remove a connection
    Disconnect(DisconnectArgs),
    /// Connections, pending requests and suggestions
    Network(NetworkArgs),
    /// Send a direct message
    Message(MessageArgs),
    /// List conversations
    Conversations,
    /// Show the conversation with a user and mark it read
    Thread(UserRef),
    /// Show a profile, or edit your own
    Profile(ProfileArgs),
    /// Search people and posts
    #[command(alias = "s")]
    Search(SearchArgs),
    /// List job offers
    Jobs(JobsArgs),
    /// Apply store commands given as JSON
    Apply(ApplyArgs),
    /// Print shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml with defaults
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct FeedArgs {
    /// Maximum number of posts (defaults to `[output] feed_limit`)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    /// Only posts of this kind
    #[arg(long)]
    pub kind: Option<KindArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Post,
    Article,
    Job,
}

impl From<KindArg> for PostKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Post => PostKind::Post,
            KindArg::Article => PostKind::Article,
            KindArg::Job => PostKind::Job,
        }
    }
}

#[derive(Args)]
pub struct PostArgs {
    /// Post text
    #[arg(default_value = "")]
    pub content: String,
    #[arg(long, value_enum, default_value = "post")]
    pub kind: KindArg,
    /// Image URL (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
    #[arg(long)]
    pub youtube: Option<String>,
    #[arg(long)]
    pub pdf: Option<String>,

    #[command(flatten)]
    pub job: JobFields,
    #[command(flatten)]
    pub article: ArticleFields,
}

#[derive(Args, Default)]
pub struct JobFields {
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    /// e.g. full-time, part-time, contract
    #[arg(long)]
    pub job_type: Option<String>,
    #[arg(long)]
    pub field: Option<String>,
    /// e.g. postdoc, senior
    #[arg(long)]
    pub level: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub requirements: Option<String>,
    #[arg(long)]
    pub benefits: Option<String>,
}

#[derive(Args, Default)]
pub struct ArticleFields {
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,
    /// Keyword (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
    /// Co-author (repeatable)
    #[arg(long = "co-author")]
    pub co_authors: Vec<String>,
    #[arg(long)]
    pub journal: Option<String>,
    #[arg(long)]
    pub doi: Option<String>,
}

#[derive(Args)]
pub struct EditPostArgs {
    pub id: String,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub youtube: Option<String>,
    #[arg(long)]
    pub pdf: Option<String>,
    /// Drop the YouTube and PDF links
    #[arg(long, conflicts_with_all = ["youtube", "pdf"])]
    pub clear_links: bool,
}

#[derive(Args)]
pub struct DeletePostArgs {
    pub id: String,
    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct PostRef {
    pub post_id: String,
}

#[derive(Args)]
pub struct CommentArgs {
    pub post_id: String,
    pub content: String,
    /// Comment id this is a reply to
    #[arg(long)]
    pub reply_to: Option<String>,
}

#[derive(Args)]
pub struct DeleteCommentArgs {
    pub post_id: String,
    pub comment_id: String,
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct NotificationsArgs {
    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,
    /// Mark one notification read
    #[arg(long, value_name = "ID", conflicts_with = "read_all")]
    pub read: Option<String>,
    /// Mark every notification read
    #[arg(long)]
    pub read_all: bool,
}

#[derive(Args)]
pub struct UserRef {
    pub user_id: String,
}

#[derive(Args)]
pub struct RequestRef {
    pub request_id: String,
}

#[derive(Args)]
pub struct WithdrawArgs {
    pub request_id: String,
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct DisconnectArgs {
    pub user_id: String,
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct NetworkArgs {
    /// How many suggestions to show
    #[arg(long, default_value = "6")]
    pub suggestions: usize,
}

#[derive(Args)]
pub struct MessageArgs {
    pub to: String,
    pub content: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Whose profile to show (defaults to your own)
    pub user_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub institution: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
    #[arg(long)]
    pub cover_image: Option<String>,
    /// Replace the skill list (repeatable)
    #[arg(long = "skill")]
    pub skills: Vec<String>,

    /// Add an image URL to the gallery
    #[arg(long, value_name = "URL")]
    pub add_image: Option<String>,
    /// Remove an image URL from the gallery
    #[arg(long, value_name = "URL")]
    pub remove_image: Option<String>,
}

impl ProfileArgs {
    /// Whether any edit flag was given.
    pub fn is_edit(&self) -> bool {
        self.name.is_some()
            || self.title.is_some()
            || self.bio.is_some()
            || self.institution.is_some()
            || self.location.is_some()
            || self.avatar.is_some()
            || self.cover_image.is_some()
            || !self.skills.is_empty()
            || self.add_image.is_some()
            || self.remove_image.is_some()
    }
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Args)]
pub struct JobsArgs {
    /// Text in position, company or description
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub job_type: Option<String>,
    #[arg(long)]
    pub field: Option<String>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// JSON file with one command or an array of commands; `-` reads stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn job_flags_parse() {
        let cli = Cli::try_parse_from([
            "labnet",
            "post",
            "Hiring",
            "--kind",
            "job",
            "--position",
            "Postdoc",
            "--company",
            "EMBL",
            "--location",
            "Heidelberg",
        ])
        .unwrap();
        let Command::Post(args) = cli.command else {
            panic!("expected post");
        };
        assert_eq!(args.kind, KindArg::Job);
        assert_eq!(args.job.company.as_deref(), Some("EMBL"));
        assert!(args.job.salary.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["labnet", "feed", "--format", "json", "--data-dir", "/tmp/x"])
                .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
    }
}
